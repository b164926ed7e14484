use crate::geom::Rect;
use crate::grid::GridSpec;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PieceSize {
    pub width: f32,
    pub height: f32,
}

impl PieceSize {
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

// Outer box = grid cell inflated by the tab protrusion margin on all sides.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OuterSize {
    pub width: f32,
    pub height: f32,
    pub tab: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardGeometry {
    pub board_rect: Rect,
    pub tray_rect: Rect,
    pub piece_size: PieceSize,
    pub piece_outer: OuterSize,
}

impl BoardGeometry {
    pub fn from_rects(board_rect: Rect, tray_rect: Rect, grid: &GridSpec, tab_ratio: f32) -> Self {
        let (piece_size, piece_outer) = piece_metrics(board_rect, grid, tab_ratio);
        Self {
            board_rect,
            tray_rect,
            piece_size,
            piece_outer,
        }
    }

    pub fn snap_threshold(&self, ratio: f32) -> f32 {
        self.piece_size.min_side() * ratio
    }
}

pub fn fit_board_rect(zone: Rect, aspect: f32, inset: f32) -> Rect {
    let safe_aspect = if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    };
    let mut width = (zone.width - inset).max(1.0);
    let mut height = width / safe_aspect;
    let max_height = (zone.height - inset).max(1.0);
    if height > max_height {
        height = max_height;
        width = height * safe_aspect;
    }
    Rect::new(
        zone.x + (zone.width - width) * 0.5,
        zone.y + (zone.height - height) * 0.5,
        width,
        height,
    )
}

pub fn piece_metrics(board: Rect, grid: &GridSpec, tab_ratio: f32) -> (PieceSize, OuterSize) {
    let piece_size = PieceSize {
        width: board.width / grid.cols as f32,
        height: board.height / grid.rows as f32,
    };
    let tab = piece_size.min_side() * tab_ratio;
    let piece_outer = OuterSize {
        width: piece_size.width + tab * 2.0,
        height: piece_size.height + tab * 2.0,
        tab,
    };
    (piece_size, piece_outer)
}

// Home slots in tray-local coordinates, row-major, as many columns as fit.
pub fn tray_home_slots(
    tray: Rect,
    outer: OuterSize,
    count: usize,
    padding: f32,
    gap: f32,
) -> Vec<(f32, f32)> {
    if count == 0 || outer.width <= 0.0 {
        return Vec::new();
    }
    let available = tray.width - padding * 2.0;
    let cell_width = outer.width + gap;
    let columns = (((available + gap) / cell_width).floor() as usize).max(1);
    let mut slots = Vec::with_capacity(count);
    for index in 0..count {
        let col = index % columns;
        let row = index / columns;
        slots.push((
            padding + col as f32 * cell_width,
            padding + row as f32 * (outer.height + gap),
        ));
    }
    slots
}
