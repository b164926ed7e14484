use snapjig::{aligned_cluster, GroupManager, PieceLocation, PieceRegistry};
use snapjig_core::edges::build_edge_maps;
use snapjig_core::grid::GridSpec;
use snapjig_core::layout::PieceSize;

fn build_registry(rows: u32, cols: u32) -> PieceRegistry {
    let grid = GridSpec::new(rows, cols).unwrap();
    let maps = build_edge_maps(rows, cols, 7);
    PieceRegistry::build(grid, &maps, 11)
}

#[test]
fn merge_is_transitive() {
    let mut registry = build_registry(1, 3);
    let mut groups = GroupManager::new();
    let first = groups.join_as_group(&mut registry, &[0, 1]).unwrap();
    let second = groups.join_as_group(&mut registry, &[1, 2]).unwrap();
    assert_eq!(first, second);
    assert_eq!(groups.len(), 1);
    let mut members = groups.group(first).unwrap().members.clone();
    members.sort_unstable();
    assert_eq!(members, vec![0, 1, 2]);
    for id in 0..3 {
        assert_eq!(registry.piece(id).unwrap().group, Some(first));
    }
}

#[test]
fn repeated_merge_is_a_no_op() {
    let mut registry = build_registry(1, 3);
    let mut groups = GroupManager::new();
    let id = groups.join_as_group(&mut registry, &[0, 1, 2]).unwrap();
    let again = groups.join_as_group(&mut registry, &[0, 1, 2]).unwrap();
    assert_eq!(id, again);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups.group(id).unwrap().members.len(), 3);
}

#[test]
fn joining_fewer_than_two_pieces_is_refused() {
    let mut registry = build_registry(1, 3);
    let mut groups = GroupManager::new();
    assert!(groups.join_as_group(&mut registry, &[1]).is_none());
    assert!(groups.join_as_group(&mut registry, &[1, 1]).is_none());
    assert!(groups.is_empty());
}

#[test]
fn dissolving_a_pair_clears_both_pieces() {
    let mut registry = build_registry(1, 2);
    let mut groups = GroupManager::new();
    groups.join_as_group(&mut registry, &[0, 1]).unwrap();
    groups.leave_group(&mut registry, 0);
    assert!(groups.is_empty());
    assert_eq!(registry.piece(0).unwrap().group, None);
    assert_eq!(registry.piece(1).unwrap().group, None);
}

#[test]
fn leaving_a_larger_group_keeps_the_rest() {
    let mut registry = build_registry(1, 3);
    let mut groups = GroupManager::new();
    let id = groups.join_as_group(&mut registry, &[0, 1, 2]).unwrap();
    groups.leave_group(&mut registry, 0);
    assert_eq!(groups.len(), 1);
    let mut members = groups.group(id).unwrap().members.clone();
    members.sort_unstable();
    assert_eq!(members, vec![1, 2]);
    assert_eq!(registry.piece(0).unwrap().group, None);
}

#[test]
fn aligned_cluster_follows_measured_offsets() {
    let mut registry = build_registry(1, 3);
    let size = PieceSize {
        width: 100.0,
        height: 100.0,
    };
    for id in 0..3 {
        registry.move_to(id, PieceLocation::Board);
    }
    registry.set_position(0, 10.0, 10.0);
    registry.set_position(1, 112.0, 8.0);
    registry.set_position(2, 400.0, 10.0);

    let mut cluster = aligned_cluster(&registry, size, 20.0, 0);
    cluster.sort_unstable();
    assert_eq!(cluster, vec![0, 1]);

    registry.set_position(2, 213.0, 11.0);
    let mut cluster = aligned_cluster(&registry, size, 20.0, 0);
    cluster.sort_unstable();
    assert_eq!(cluster, vec![0, 1, 2]);
}

#[test]
fn tray_pieces_and_locked_pieces_stay_out_of_clusters() {
    let mut registry = build_registry(1, 3);
    let size = PieceSize {
        width: 100.0,
        height: 100.0,
    };
    registry.move_to(0, PieceLocation::Board);
    registry.set_position(0, 10.0, 10.0);
    registry.move_to(1, PieceLocation::Board);
    registry.set_position(1, 110.0, 10.0);
    registry.lock(1, 110.0, 10.0);
    // Piece 2 stays in the tray at an aligned position.
    registry.set_position(2, 210.0, 10.0);

    let cluster = aligned_cluster(&registry, size, 20.0, 0);
    assert_eq!(cluster, vec![0]);
}

#[test]
fn registry_lookup_and_order() {
    let registry = build_registry(3, 4);
    assert_eq!(registry.piece_at(1, 2), Some(6));
    assert_eq!(registry.piece_at(-1, 0), None);
    assert_eq!(registry.piece_at(0, 4), None);

    let mut orders: Vec<usize> = registry.pieces().iter().map(|piece| piece.order).collect();
    orders.sort_unstable();
    assert_eq!(orders, (0..12).collect::<Vec<_>>());

    let tray = registry.tray_order();
    assert_eq!(tray.len(), 12);
    for pair in tray.windows(2) {
        assert!(registry.piece(pair[0]).unwrap().order < registry.piece(pair[1]).unwrap().order);
    }
}
