use std::collections::VecDeque;

use snapjig_core::geom::distance;
use snapjig_core::layout::BoardGeometry;

use crate::events::EngineEvent;
use crate::groups::{expected_neighbor_position, GroupManager};
use crate::registry::{PieceId, PieceLocation, PieceRegistry};

pub fn snap_threshold(geometry: &BoardGeometry, ratio: f32) -> f32 {
    geometry.snap_threshold(ratio)
}

// Grid-assigned slot, top-left of the cell in play-area coordinates.
pub fn piece_target(
    geometry: &BoardGeometry,
    registry: &PieceRegistry,
    id: PieceId,
) -> Option<(f32, f32)> {
    let piece = registry.piece(id)?;
    Some((
        geometry.board_rect.x + piece.col as f32 * geometry.piece_size.width,
        geometry.board_rect.y + piece.row as f32 * geometry.piece_size.height,
    ))
}

// Where the outer box sits when the piece is exactly on its slot.
pub fn piece_snap_position(
    geometry: &BoardGeometry,
    registry: &PieceRegistry,
    id: PieceId,
) -> Option<(f32, f32)> {
    let target = piece_target(geometry, registry, id)?;
    let tab = geometry.piece_outer.tab;
    Some((target.0 - tab, target.1 - tab))
}

pub fn piece_center(geometry: &BoardGeometry, registry: &PieceRegistry, id: PieceId) -> (f32, f32) {
    let pos = registry.position(id);
    (
        pos.0 + geometry.piece_outer.width * 0.5,
        pos.1 + geometry.piece_outer.height * 0.5,
    )
}

pub fn piece_target_distance(
    geometry: &BoardGeometry,
    registry: &PieceRegistry,
    id: PieceId,
) -> Option<f32> {
    let target = piece_target(geometry, registry, id)?;
    let target_center = (
        target.0 + geometry.piece_size.width * 0.5,
        target.1 + geometry.piece_size.height * 0.5,
    );
    Some(distance(piece_center(geometry, registry, id), target_center))
}

pub fn is_close_to_target(
    geometry: &BoardGeometry,
    registry: &PieceRegistry,
    ratio: f32,
    id: PieceId,
) -> bool {
    match piece_target_distance(geometry, registry, id) {
        Some(dist) => dist <= snap_threshold(geometry, ratio),
        None => false,
    }
}

pub(crate) fn bring_to_front(z_order: &mut Vec<PieceId>, ids: &[PieceId]) {
    z_order.retain(|id| !ids.contains(id));
    z_order.extend_from_slice(ids);
}

// Locking places the piece exactly on its slot, clears any group
// membership, and raises it above its siblings.
pub(crate) fn lock_piece_at(
    registry: &mut PieceRegistry,
    groups: &mut GroupManager,
    z_order: &mut Vec<PieceId>,
    id: PieceId,
    position: (f32, f32),
) {
    groups.leave_group(registry, id);
    registry.lock(id, position.0, position.1);
    bring_to_front(z_order, &[id]);
}

pub fn try_snap_piece(
    registry: &mut PieceRegistry,
    groups: &mut GroupManager,
    geometry: &BoardGeometry,
    ratio: f32,
    z_order: &mut Vec<PieceId>,
    events: &mut VecDeque<EngineEvent>,
    id: PieceId,
) -> bool {
    if !is_close_to_target(geometry, registry, ratio, id) {
        return false;
    }
    let Some(snap) = piece_snap_position(geometry, registry, id) else {
        return false;
    };
    lock_piece_at(registry, groups, z_order, id, snap);
    events.push_back(EngineEvent::Flash { pieces: vec![id] });
    cascade_lock_neighbors(registry, groups, geometry, ratio, z_order, events, id);
    true
}

// As locked pieces accumulate, neighbors that already sit within their own
// slot threshold lock too, breadth-first, keeping the board self-correcting.
fn cascade_lock_neighbors(
    registry: &mut PieceRegistry,
    groups: &mut GroupManager,
    geometry: &BoardGeometry,
    ratio: f32,
    z_order: &mut Vec<PieceId>,
    events: &mut VecDeque<EngineEvent>,
    start: PieceId,
) {
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        for neighbor in registry.neighbor_cells(current).into_iter().flatten() {
            let Some(piece) = registry.piece(neighbor) else {
                continue;
            };
            if piece.locked || piece.location == PieceLocation::Tray {
                continue;
            }
            if !is_close_to_target(geometry, registry, ratio, neighbor) {
                continue;
            }
            let Some(snap) = piece_snap_position(geometry, registry, neighbor) else {
                continue;
            };
            lock_piece_at(registry, groups, z_order, neighbor, snap);
            events.push_back(EngineEvent::Flash {
                pieces: vec![neighbor],
            });
            queue.push_back(neighbor);
        }
    }
}

// The qualifying member closest to its own slot anchors a group snap.
pub fn find_group_snap_anchor(
    registry: &PieceRegistry,
    geometry: &BoardGeometry,
    ratio: f32,
    pieces: &[PieceId],
) -> Option<PieceId> {
    let threshold = snap_threshold(geometry, ratio);
    let mut best: Option<(PieceId, f32)> = None;
    for &id in pieces {
        let Some(dist) = piece_target_distance(geometry, registry, id) else {
            continue;
        };
        if dist > threshold {
            continue;
        }
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((id, dist)),
        }
    }
    best.map(|(id, _)| id)
}

pub fn try_snap_group_to_board(
    registry: &mut PieceRegistry,
    groups: &mut GroupManager,
    geometry: &BoardGeometry,
    ratio: f32,
    z_order: &mut Vec<PieceId>,
    events: &mut VecDeque<EngineEvent>,
    pieces: &[PieceId],
) -> bool {
    let Some(anchor) = find_group_snap_anchor(registry, geometry, ratio, pieces) else {
        return false;
    };
    let Some(snap) = piece_snap_position(geometry, registry, anchor) else {
        return false;
    };
    let pos = registry.position(anchor);
    registry.translate(pieces, snap.0 - pos.0, snap.1 - pos.1);
    if let Some(first) = pieces.first() {
        if let Some(group) = groups.group_of(registry, *first) {
            groups.clear_group(registry, group);
        }
    }
    for &id in pieces {
        if let Some(slot) = piece_snap_position(geometry, registry, id) {
            lock_piece_at(registry, groups, z_order, id, slot);
        }
    }
    events.push_back(EngineEvent::Flash {
        pieces: pieces.to_vec(),
    });
    true
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeighborSnap {
    pub piece: PieceId,
    pub neighbor: PieceId,
    pub dx: f32,
    pub dy: f32,
    pub distance: f32,
}

// Nearest outside neighbor whose grid-implied offset from a member of the
// dropped set lies within the threshold.
pub fn find_neighbor_snap(
    registry: &PieceRegistry,
    geometry: &BoardGeometry,
    ratio: f32,
    pieces: &[PieceId],
) -> Option<NeighborSnap> {
    let threshold = snap_threshold(geometry, ratio);
    let mut best: Option<NeighborSnap> = None;
    for &id in pieces {
        for neighbor in registry.neighbor_cells(id).into_iter().flatten() {
            let Some(candidate) = registry.piece(neighbor) else {
                continue;
            };
            if candidate.locked
                || candidate.location == PieceLocation::Tray
                || pieces.contains(&neighbor)
            {
                continue;
            }
            let Some(expected) =
                expected_neighbor_position(registry, geometry.piece_size, neighbor, id)
            else {
                continue;
            };
            let pos = registry.position(id);
            let dx = expected.0 - pos.0;
            let dy = expected.1 - pos.1;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > threshold {
                continue;
            }
            match best {
                Some(current) if dist >= current.distance => {}
                _ => {
                    best = Some(NeighborSnap {
                        piece: id,
                        neighbor,
                        dx,
                        dy,
                        distance: dist,
                    });
                }
            }
        }
    }
    best
}

pub fn try_snap_to_neighbor(
    registry: &mut PieceRegistry,
    groups: &mut GroupManager,
    geometry: &BoardGeometry,
    ratio: f32,
    events: &mut VecDeque<EngineEvent>,
    pieces: &[PieceId],
) -> bool {
    let Some(snap) = find_neighbor_snap(registry, geometry, ratio, pieces) else {
        return false;
    };
    registry.translate(pieces, snap.dx, snap.dy);
    let neighbor_members = groups.members_of(registry, snap.neighbor);
    let mut joined: Vec<PieceId> = Vec::with_capacity(pieces.len() + 1);
    joined.push(snap.neighbor);
    joined.extend_from_slice(pieces);
    groups.join_as_group(registry, &joined);
    let mut flashed = neighbor_members;
    for &id in pieces {
        if !flashed.contains(&id) {
            flashed.push(id);
        }
    }
    events.push_back(EngineEvent::Flash { pieces: flashed });
    true
}

// Center of the set's bounding box over outer boxes.
pub fn group_center(
    registry: &PieceRegistry,
    geometry: &BoardGeometry,
    pieces: &[PieceId],
) -> (f32, f32) {
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for &id in pieces {
        let pos = registry.position(id);
        min_x = min_x.min(pos.0);
        min_y = min_y.min(pos.1);
        max_x = max_x.max(pos.0 + geometry.piece_outer.width);
        max_y = max_y.max(pos.1 + geometry.piece_outer.height);
    }
    ((min_x + max_x) * 0.5, (min_y + max_y) * 0.5)
}

pub fn send_to_tray(
    registry: &mut PieceRegistry,
    groups: &mut GroupManager,
    events: &mut VecDeque<EngineEvent>,
    pieces: &[PieceId],
) {
    if let Some(first) = pieces.first() {
        if let Some(group) = groups.group_of(registry, *first) {
            groups.clear_group(registry, group);
        }
    }
    for &id in pieces {
        registry.send_to_tray(id);
    }
    events.push_back(EngineEvent::TrayLayoutChanged);
}
