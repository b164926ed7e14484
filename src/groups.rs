use std::collections::{HashMap, VecDeque};

use snapjig_core::geom::distance;
use snapjig_core::layout::PieceSize;

use crate::registry::{GroupId, PieceId, PieceLocation, PieceRegistry};

#[derive(Clone, Debug)]
pub struct Group {
    pub id: GroupId,
    pub members: Vec<PieceId>,
}

// Groups exist only while at least two unlocked pieces are connected.
// Membership is mutual: a member's `group` field always names the group
// that lists it, and a locked piece never has one.
#[derive(Clone, Debug)]
pub struct GroupManager {
    groups: HashMap<GroupId, Group>,
    next_id: GroupId,
}

impl Default for GroupManager {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupManager {
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn clear(&mut self) {
        self.groups.clear();
        self.next_id = 1;
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub fn group_of(&self, registry: &PieceRegistry, piece: PieceId) -> Option<GroupId> {
        let group = registry.piece(piece)?.group?;
        self.groups.contains_key(&group).then_some(group)
    }

    pub fn members_of(&self, registry: &PieceRegistry, piece: PieceId) -> Vec<PieceId> {
        match self.group_of(registry, piece) {
            Some(group) => self.groups[&group].members.clone(),
            None => vec![piece],
        }
    }

    // Transitive union: every group already touching one of `pieces` merges
    // into the largest of them, then loose pieces join it.
    pub fn join_as_group(
        &mut self,
        registry: &mut PieceRegistry,
        pieces: &[PieceId],
    ) -> Option<GroupId> {
        let mut unique: Vec<PieceId> = Vec::with_capacity(pieces.len());
        for &id in pieces {
            if registry.piece(id).is_some() && !unique.contains(&id) {
                unique.push(id);
            }
        }
        if unique.len() < 2 {
            return None;
        }
        let mut touched: Vec<GroupId> = Vec::new();
        for &id in &unique {
            if let Some(group) = self.group_of(registry, id) {
                if !touched.contains(&group) {
                    touched.push(group);
                }
            }
        }
        let target = match touched
            .iter()
            .copied()
            .max_by_key(|id| self.groups[id].members.len())
        {
            Some(id) => id,
            None => {
                let id = self.next_id;
                self.next_id += 1;
                self.groups.insert(
                    id,
                    Group {
                        id,
                        members: Vec::new(),
                    },
                );
                id
            }
        };
        for source in touched {
            if source == target {
                continue;
            }
            let Some(group) = self.groups.remove(&source) else {
                continue;
            };
            for member in group.members {
                if let Some(entry) = registry.piece_mut(member) {
                    entry.group = Some(target);
                }
                if let Some(target_group) = self.groups.get_mut(&target) {
                    target_group.members.push(member);
                }
            }
        }
        for &id in &unique {
            if registry.piece(id).and_then(|piece| piece.group) == Some(target) {
                continue;
            }
            if let Some(piece) = registry.piece_mut(id) {
                piece.group = Some(target);
            }
            if let Some(group) = self.groups.get_mut(&target) {
                group.members.push(id);
            }
        }
        Some(target)
    }

    pub fn leave_group(&mut self, registry: &mut PieceRegistry, piece: PieceId) {
        let Some(group_id) = self.group_of(registry, piece) else {
            return;
        };
        if let Some(entry) = registry.piece_mut(piece) {
            entry.group = None;
        }
        let Some(group) = self.groups.get_mut(&group_id) else {
            return;
        };
        group.members.retain(|&member| member != piece);
        if group.members.len() >= 2 {
            return;
        }
        // A group can never keep a single dangling member.
        let members = group.members.clone();
        for member in members {
            if let Some(entry) = registry.piece_mut(member) {
                entry.group = None;
            }
        }
        self.groups.remove(&group_id);
    }

    pub fn clear_group(&mut self, registry: &mut PieceRegistry, group_id: GroupId) {
        let Some(group) = self.groups.remove(&group_id) else {
            return;
        };
        for member in group.members {
            if let Some(entry) = registry.piece_mut(member) {
                entry.group = None;
            }
        }
    }
}

// Breadth-first search over grid-adjacent pieces whose measured on-screen
// offset from the current piece matches the grid-expected offset within
// `threshold`. Recovers connectivity that was never recorded explicitly,
// e.g. pieces dragged into alignment one at a time.
pub fn aligned_cluster(
    registry: &PieceRegistry,
    piece_size: PieceSize,
    threshold: f32,
    start: PieceId,
) -> Vec<PieceId> {
    if registry.piece(start).is_none() {
        return Vec::new();
    }
    let mut cluster = vec![start];
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        for neighbor in registry.neighbor_cells(current).into_iter().flatten() {
            let Some(candidate) = registry.piece(neighbor) else {
                continue;
            };
            if candidate.locked
                || candidate.location == PieceLocation::Tray
                || cluster.contains(&neighbor)
            {
                continue;
            }
            if !pieces_aligned(registry, piece_size, threshold, current, neighbor) {
                continue;
            }
            cluster.push(neighbor);
            queue.push_back(neighbor);
        }
    }
    cluster
}

pub fn expected_neighbor_position(
    registry: &PieceRegistry,
    piece_size: PieceSize,
    base: PieceId,
    neighbor: PieceId,
) -> Option<(f32, f32)> {
    let base_piece = registry.piece(base)?;
    let neighbor_piece = registry.piece(neighbor)?;
    let col_diff = neighbor_piece.col as f32 - base_piece.col as f32;
    let row_diff = neighbor_piece.row as f32 - base_piece.row as f32;
    Some((
        base_piece.position.0 + col_diff * piece_size.width,
        base_piece.position.1 + row_diff * piece_size.height,
    ))
}

fn pieces_aligned(
    registry: &PieceRegistry,
    piece_size: PieceSize,
    threshold: f32,
    base: PieceId,
    neighbor: PieceId,
) -> bool {
    let Some(expected) = expected_neighbor_position(registry, piece_size, base, neighbor) else {
        return false;
    };
    distance(expected, registry.position(neighbor)) <= threshold
}
