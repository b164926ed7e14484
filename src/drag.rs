use crate::registry::{Piece, PieceId, PieceRegistry};

// One live pointer interaction. Member offsets are captured relative to the
// grabbed anchor piece so the whole set translates rigidly.
#[derive(Clone, Debug)]
pub struct DragSession {
    pub anchor: PieceId,
    pub pieces: Vec<PieceId>,
    pub offsets: Vec<(f32, f32)>,
    pub grab_offset: (f32, f32),
    pub pointer_id: i32,
}

impl DragSession {
    pub fn offset_of(&self, piece: PieceId) -> (f32, f32) {
        self.pieces
            .iter()
            .position(|&id| id == piece)
            .and_then(|index| self.offsets.get(index).copied())
            .unwrap_or((0.0, 0.0))
    }
}

// Locking is final: the locked piece left every group when it locked, so
// there is no still-draggable cluster to move it with.
pub fn can_start_drag(piece: &Piece) -> bool {
    !piece.locked
}

pub fn build_drag_offsets(
    registry: &PieceRegistry,
    pieces: &[PieceId],
    anchor: PieceId,
) -> Vec<(f32, f32)> {
    let anchor_pos = registry.position(anchor);
    pieces
        .iter()
        .map(|&id| {
            let pos = registry.position(id);
            (pos.0 - anchor_pos.0, pos.1 - anchor_pos.1)
        })
        .collect()
}
