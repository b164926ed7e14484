use snapjig_core::layout::BoardGeometry;
use snapjig_core::path::Outline;

use crate::registry::{PieceId, PieceRegistry};

// Everything the presentation layer needs to paint one piece: the outline
// to clip and stroke, the outer view box, and where the full board image
// sits inside that box so the right region shows through the clip.
#[derive(Clone, Debug)]
pub struct PieceRenderData<'a> {
    pub piece: PieceId,
    pub position: (f32, f32),
    pub locked: bool,
    pub outline: &'a Outline,
    pub view_box: (f32, f32),
    pub image_offset: (f32, f32),
    pub image_size: (f32, f32),
}

pub(crate) fn piece_render_data<'a>(
    registry: &PieceRegistry,
    geometry: &BoardGeometry,
    outlines: &'a [Outline],
    id: PieceId,
) -> Option<PieceRenderData<'a>> {
    let piece = registry.piece(id)?;
    let outline = outlines.get(id)?;
    let tab = geometry.piece_outer.tab;
    Some(PieceRenderData {
        piece: id,
        position: piece.position,
        locked: piece.locked,
        outline,
        view_box: (geometry.piece_outer.width, geometry.piece_outer.height),
        image_offset: (
            tab - piece.col as f32 * geometry.piece_size.width,
            tab - piece.row as f32 * geometry.piece_size.height,
        ),
        image_size: (geometry.board_rect.width, geometry.board_rect.height),
    })
}
