use snapjig_core::geom::Rect;
use snapjig_core::grid::{grid_for_piece_count, GridError, GridSpec};
use snapjig_core::layout::{fit_board_rect, piece_metrics, tray_home_slots, BoardGeometry};
use snapjig_core::rules::AssemblyRules;

#[test]
fn grid_matches_piece_count_and_aspect() {
    let grid = grid_for_piece_count(150, 1.5).unwrap();
    assert_eq!(grid.cols, 15);
    assert_eq!(grid.rows, 10);
    assert_eq!(grid.total(), 150);

    let portrait = grid_for_piece_count(150, 1.0 / 1.5).unwrap();
    assert_eq!(portrait.cols, 10);
    assert_eq!(portrait.rows, 15);
}

#[test]
fn grid_rejects_degenerate_input() {
    assert!(matches!(
        grid_for_piece_count(0, 1.5),
        Err(GridError::EmptyGrid { .. })
    ));
    assert!(matches!(
        grid_for_piece_count(100, 0.0),
        Err(GridError::BadAspect { .. })
    ));
    assert!(matches!(
        grid_for_piece_count(100, f32::NAN),
        Err(GridError::BadAspect { .. })
    ));
    assert!(matches!(
        GridSpec::new(0, 5),
        Err(GridError::EmptyGrid { .. })
    ));
}

#[test]
fn cell_index_is_row_major_and_bounded() {
    let grid = GridSpec::new(3, 4).unwrap();
    assert_eq!(grid.cell_index(0, 0), Some(0));
    assert_eq!(grid.cell_index(1, 2), Some(6));
    assert_eq!(grid.cell_index(2, 3), Some(11));
    assert_eq!(grid.cell_index(3, 0), None);
    assert_eq!(grid.cell_index(0, 4), None);
}

#[test]
fn board_fits_zone_preserving_aspect() {
    let zone = Rect::new(0.0, 0.0, 1000.0, 500.0);
    let wide = fit_board_rect(zone, 4.0, 8.0);
    assert_eq!(wide.width, 992.0);
    assert_eq!(wide.height, 248.0);

    let tall = fit_board_rect(zone, 0.5, 8.0);
    assert_eq!(tall.height, 492.0);
    assert_eq!(tall.width, 246.0);
    // Centered inside the zone.
    assert!((tall.x - (1000.0 - 246.0) * 0.5).abs() < 1e-3);
}

#[test]
fn piece_metrics_include_tab_margin() {
    let board = Rect::new(0.0, 0.0, 300.0, 200.0);
    let grid = GridSpec::new(2, 3).unwrap();
    let (size, outer) = piece_metrics(board, &grid, 0.24);
    assert_eq!(size.width, 100.0);
    assert_eq!(size.height, 100.0);
    assert_eq!(outer.tab, 24.0);
    assert_eq!(outer.width, 148.0);
    assert_eq!(outer.height, 148.0);
}

#[test]
fn snap_threshold_uses_the_smaller_side() {
    let board = Rect::new(0.0, 0.0, 400.0, 100.0);
    let tray = Rect::new(0.0, 120.0, 400.0, 100.0);
    let grid = GridSpec::new(2, 2).unwrap();
    let geometry = BoardGeometry::from_rects(board, tray, &grid, 0.24);
    assert_eq!(geometry.snap_threshold(0.35), 50.0 * 0.35);
}

#[test]
fn tray_slots_wrap_into_rows() {
    let tray = Rect::new(0.0, 0.0, 400.0, 300.0);
    let grid = GridSpec::new(2, 2).unwrap();
    let board = Rect::new(0.0, 0.0, 200.0, 200.0);
    let (_, outer) = piece_metrics(board, &grid, 0.24);
    // outer is 148 wide; two columns fit in 400 - 2*16 padding.
    let slots = tray_home_slots(tray, outer, 5, 16.0, 12.0);
    assert_eq!(slots.len(), 5);
    assert_eq!(slots[0], (16.0, 16.0));
    assert_eq!(slots[1], (16.0 + 160.0, 16.0));
    assert_eq!(slots[2], (16.0, 16.0 + 160.0));
    assert_eq!(slots[3].1, slots[2].1);
    assert_eq!(slots[4].1, 16.0 + 320.0);
}

#[test]
fn rules_clamp_out_of_range_values() {
    let rules = AssemblyRules {
        snap_threshold_ratio: 3.0,
        tab_ratio: 0.0,
        tray_padding: -4.0,
        tray_gap: -1.0,
        board_inset: -2.0,
        flash_duration_ms: 1.0,
    }
    .clamped();
    assert_eq!(rules.snap_threshold_ratio, 0.5);
    assert_eq!(rules.tab_ratio, 0.1);
    assert_eq!(rules.tray_padding, 0.0);
    assert_eq!(rules.tray_gap, 0.0);
    assert_eq!(rules.board_inset, 0.0);
    assert_eq!(rules.flash_duration_ms, 100.0);
}
