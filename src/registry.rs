use snapjig_core::edges::{EdgeMaps, PieceEdges};
use snapjig_core::grid::GridSpec;
use snapjig_core::rng::shuffled_order;

pub type PieceId = usize;
pub type GroupId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceLocation {
    Tray,
    Floating,
    Board,
}

// `position` is the top-left of the outer (tab-inflated) box in play-area
// coordinates while the piece is floating or on the board; while the piece
// sits in the tray it mirrors `home`, which is tray-local.
#[derive(Clone, Debug)]
pub struct Piece {
    pub id: PieceId,
    pub row: u32,
    pub col: u32,
    pub locked: bool,
    pub location: PieceLocation,
    pub order: usize,
    pub group: Option<GroupId>,
    pub edges: PieceEdges,
    pub position: (f32, f32),
    pub home: (f32, f32),
}

#[derive(Clone, Debug)]
pub struct PieceRegistry {
    grid: GridSpec,
    pieces: Vec<Piece>,
}

impl PieceRegistry {
    pub fn build(grid: GridSpec, maps: &EdgeMaps, shuffle_seed: u32) -> Self {
        let total = grid.total();
        let mut pieces = Vec::with_capacity(total);
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let id = (row * grid.cols + col) as usize;
                pieces.push(Piece {
                    id,
                    row,
                    col,
                    locked: false,
                    location: PieceLocation::Tray,
                    order: id,
                    group: None,
                    edges: maps.piece_edges(row, col),
                    position: (0.0, 0.0),
                    home: (0.0, 0.0),
                });
            }
        }
        let mut registry = Self { grid, pieces };
        registry.reshuffle(shuffle_seed);
        registry
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id)
    }

    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(id)
    }

    pub fn piece_at(&self, row: i32, col: i32) -> Option<PieceId> {
        if row < 0 || col < 0 {
            return None;
        }
        self.grid.cell_index(row as u32, col as u32)
    }

    pub fn neighbor_cells(&self, id: PieceId) -> [Option<PieceId>; 4] {
        match self.piece(id) {
            Some(piece) => {
                let row = piece.row as i32;
                let col = piece.col as i32;
                [
                    self.piece_at(row - 1, col),
                    self.piece_at(row, col + 1),
                    self.piece_at(row + 1, col),
                    self.piece_at(row, col - 1),
                ]
            }
            None => [None; 4],
        }
    }

    pub fn position(&self, id: PieceId) -> (f32, f32) {
        self.piece(id).map(|piece| piece.position).unwrap_or((0.0, 0.0))
    }

    pub fn set_position(&mut self, id: PieceId, x: f32, y: f32) {
        if let Some(piece) = self.pieces.get_mut(id) {
            piece.position = (x, y);
        }
    }

    pub fn translate(&mut self, ids: &[PieceId], dx: f32, dy: f32) {
        for &id in ids {
            if let Some(piece) = self.pieces.get_mut(id) {
                piece.position = (piece.position.0 + dx, piece.position.1 + dy);
                piece.location = PieceLocation::Board;
            }
        }
    }

    pub fn lock(&mut self, id: PieceId, x: f32, y: f32) {
        if let Some(piece) = self.pieces.get_mut(id) {
            piece.locked = true;
            piece.location = PieceLocation::Board;
            piece.position = (x, y);
        }
    }

    pub fn unlock(&mut self, id: PieceId) {
        if let Some(piece) = self.pieces.get_mut(id) {
            piece.locked = false;
        }
    }

    pub fn move_to(&mut self, id: PieceId, location: PieceLocation) {
        if let Some(piece) = self.pieces.get_mut(id) {
            piece.location = location;
        }
    }

    pub fn send_to_tray(&mut self, id: PieceId) {
        if let Some(piece) = self.pieces.get_mut(id) {
            piece.locked = false;
            piece.location = PieceLocation::Tray;
            piece.position = piece.home;
        }
    }

    // Tray sequence only; gameplay logic never reads `order`.
    pub fn tray_order(&self) -> Vec<PieceId> {
        let mut ids: Vec<PieceId> = self
            .pieces
            .iter()
            .filter(|piece| !piece.locked && piece.location == PieceLocation::Tray)
            .map(|piece| piece.id)
            .collect();
        ids.sort_by_key(|&id| self.pieces[id].order);
        ids
    }

    pub fn reshuffle(&mut self, seed: u32) {
        let order = shuffled_order(seed, self.pieces.len());
        for (slot, id) in order.into_iter().enumerate() {
            self.pieces[id].order = slot;
        }
    }

    pub fn assign_tray_homes(&mut self, slots: &[(f32, f32)]) {
        let ids = self.tray_order();
        for (index, id) in ids.into_iter().enumerate() {
            let Some(&slot) = slots.get(index) else {
                break;
            };
            let piece = &mut self.pieces[id];
            piece.home = slot;
            piece.position = slot;
        }
    }

    pub fn locked_count(&self) -> usize {
        self.pieces.iter().filter(|piece| piece.locked).count()
    }

    pub fn all_locked(&self) -> bool {
        !self.pieces.is_empty() && self.pieces.iter().all(|piece| piece.locked)
    }
}
