use std::collections::VecDeque;

use tracing::{debug, trace};

use snapjig_core::edges::{build_edge_maps, EdgeMaps};
use snapjig_core::grid::{GridError, GridSpec};
use snapjig_core::layout::{tray_home_slots, BoardGeometry};
use snapjig_core::path::{build_piece_path, Outline};
use snapjig_core::rng::splitmix32;
use snapjig_core::rules::AssemblyRules;
use snapjig_core::snapshot::{ImageInfo, PuzzleDefinition};

use crate::drag::{build_drag_offsets, can_start_drag, DragSession};
use crate::events::EngineEvent;
use crate::groups::{aligned_cluster, GroupManager};
use crate::registry::{PieceId, PieceLocation, PieceRegistry};
use crate::render::{piece_render_data, PieceRenderData};
use crate::snap::{
    bring_to_front, group_center, piece_center, piece_snap_position, send_to_tray,
    try_snap_group_to_board, try_snap_piece, try_snap_to_neighbor,
};

const SHAPE_SEED_DEFAULT: u32 = 0x5EED_77AB;

struct Assembly {
    maps: EdgeMaps,
    registry: PieceRegistry,
    z_order: Vec<PieceId>,
    outlines: Vec<Outline>,
}

// Owns the registry, group manager, and drag state behind one interface;
// geometry and image data are pushed in by the embedding layer, never read
// from ambient state.
pub struct AssemblyEngine {
    rules: AssemblyRules,
    shape_seed: u32,
    image: Option<ImageInfo>,
    geometry: Option<BoardGeometry>,
    assembly: Option<Assembly>,
    groups: GroupManager,
    drag: Option<DragSession>,
    layout_queued: bool,
    completion_sent: bool,
    events: VecDeque<EngineEvent>,
}

impl AssemblyEngine {
    pub fn new() -> Self {
        Self::with_rules(AssemblyRules::default())
    }

    pub fn with_rules(rules: AssemblyRules) -> Self {
        Self {
            rules: rules.clamped(),
            shape_seed: SHAPE_SEED_DEFAULT,
            image: None,
            geometry: None,
            assembly: None,
            groups: GroupManager::new(),
            drag: None,
            layout_queued: false,
            completion_sent: false,
            events: VecDeque::new(),
        }
    }

    pub fn rules(&self) -> AssemblyRules {
        self.rules
    }

    pub fn set_rules(&mut self, rules: AssemblyRules) {
        self.rules = rules.clamped();
        self.schedule_layout();
    }

    pub fn image(&self) -> Option<&ImageInfo> {
        self.image.as_ref()
    }

    pub fn set_image(&mut self, image: ImageInfo) {
        debug!("image set: {}", image.id);
        self.image = Some(image);
        self.completion_sent = false;
        self.schedule_layout();
    }

    // Metadata loading failed or the selection was cleared: drop everything
    // derived from the image and leave the board empty.
    pub fn clear_image(&mut self) {
        debug!("image cleared");
        self.image = None;
        self.geometry = None;
        self.assembly = None;
        self.groups.clear();
        self.drag = None;
        self.completion_sent = false;
    }

    pub fn grid(&self) -> Option<GridSpec> {
        self.assembly.as_ref().map(|assembly| assembly.registry.grid())
    }

    pub fn geometry(&self) -> Option<&BoardGeometry> {
        self.geometry.as_ref()
    }

    pub fn registry(&self) -> Option<&PieceRegistry> {
        self.assembly.as_ref().map(|assembly| &assembly.registry)
    }

    pub fn groups(&self) -> &GroupManager {
        &self.groups
    }

    pub fn edge_maps(&self) -> Option<&EdgeMaps> {
        self.assembly.as_ref().map(|assembly| &assembly.maps)
    }

    pub fn z_order(&self) -> &[PieceId] {
        self.assembly
            .as_ref()
            .map(|assembly| assembly.z_order.as_slice())
            .unwrap_or(&[])
    }

    pub fn definition(&self) -> Option<PuzzleDefinition> {
        let image = self.image.as_ref()?;
        let grid = self.grid()?;
        Some(PuzzleDefinition::new(image.clone(), grid, self.shape_seed))
    }

    pub fn reset_assembly(&mut self, rows: u32, cols: u32) -> Result<(), GridError> {
        let seed = splitmix32(self.shape_seed.wrapping_add(1));
        self.reset_assembly_with_seed(rows, cols, seed)
    }

    pub fn reset_assembly_with_seed(
        &mut self,
        rows: u32,
        cols: u32,
        seed: u32,
    ) -> Result<(), GridError> {
        let grid = GridSpec::new(rows, cols)?;
        debug!("assembly reset: {}x{} seed {:08x}", rows, cols, seed);
        self.shape_seed = seed;
        let maps = build_edge_maps(rows, cols, seed);
        let registry = PieceRegistry::build(grid, &maps, splitmix32(seed ^ 0x0D0E_5EED));
        let z_order = (0..grid.total()).collect();
        self.assembly = Some(Assembly {
            maps,
            registry,
            z_order,
            outlines: Vec::new(),
        });
        self.groups.clear();
        self.drag = None;
        self.completion_sent = false;
        if let Some(geometry) = self.geometry {
            self.apply_geometry(geometry);
        }
        self.schedule_layout();
        Ok(())
    }

    // Pushed by the layout collaborator whenever the board's rendered size
    // changes; outlines and locked positions depend on pixel metrics.
    pub fn board_geometry_changed(&mut self, geometry: BoardGeometry) {
        if self.image.is_none() {
            trace!("geometry ignored: no image");
            return;
        }
        self.apply_geometry(geometry);
    }

    fn apply_geometry(&mut self, geometry: BoardGeometry) {
        self.geometry = Some(geometry);
        let rules = self.rules;
        let Some(assembly) = self.assembly.as_mut() else {
            return;
        };
        let size = geometry.piece_size;
        let tab = geometry.piece_outer.tab;
        assembly.outlines = assembly
            .registry
            .pieces()
            .iter()
            .map(|piece| build_piece_path(&piece.edges, size.width, size.height, tab))
            .collect();
        let locked: Vec<PieceId> = assembly
            .registry
            .pieces()
            .iter()
            .filter(|piece| piece.locked)
            .map(|piece| piece.id)
            .collect();
        for id in locked {
            if let Some(snap) = piece_snap_position(&geometry, &assembly.registry, id) {
                assembly.registry.set_position(id, snap.0, snap.1);
            }
        }
        assign_homes(&mut assembly.registry, &geometry, &rules);
    }

    // Coalesces bursts of resize/reset triggers into one recomputation per
    // frame: `schedule_layout` marks, `take_layout_request` clears.
    pub fn schedule_layout(&mut self) -> bool {
        if self.layout_queued {
            return false;
        }
        self.layout_queued = true;
        true
    }

    pub fn take_layout_request(&mut self) -> bool {
        let queued = self.layout_queued;
        self.layout_queued = false;
        queued
    }

    pub fn shuffle_tray(&mut self, seed: u32) {
        let rules = self.rules;
        let geometry = self.geometry;
        let Some(assembly) = self.assembly.as_mut() else {
            return;
        };
        assembly.registry.reshuffle(seed);
        if let Some(geometry) = geometry {
            assign_homes(&mut assembly.registry, &geometry, &rules);
        }
        self.events.push_back(EngineEvent::TrayLayoutChanged);
    }

    pub fn pointer_down(&mut self, piece_id: PieceId, x: f32, y: f32, pointer_id: i32) {
        if self.image.is_none() {
            return;
        }
        let Some(geometry) = self.geometry else {
            return;
        };
        if self.drag.is_some() {
            trace!("pointer down ignored: drag in progress");
            return;
        }
        let rules = self.rules;
        let Some(assembly) = self.assembly.as_mut() else {
            return;
        };
        let Some(piece) = assembly.registry.piece(piece_id) else {
            return;
        };
        if !can_start_drag(piece) {
            return;
        }
        let was_in_tray = piece.location == PieceLocation::Tray;

        let mut members = self.groups.members_of(&assembly.registry, piece_id);
        if members.len() < 2 {
            let threshold = geometry.snap_threshold(rules.snap_threshold_ratio);
            let cluster =
                aligned_cluster(&assembly.registry, geometry.piece_size, threshold, piece_id);
            if cluster.len() >= 2 {
                self.groups.join_as_group(&mut assembly.registry, &cluster);
                members = cluster;
            }
        }

        if was_in_tray {
            // Tray coordinates convert to play-area coordinates without a
            // visible jump; the piece floats until it lands somewhere.
            let (tray_x, tray_y) = geometry.tray_rect.origin();
            if let Some(piece) = assembly.registry.piece_mut(piece_id) {
                piece.position = (tray_x + piece.home.0, tray_y + piece.home.1);
                piece.location = PieceLocation::Floating;
            }
            assign_homes(&mut assembly.registry, &geometry, &rules);
            self.events.push_back(EngineEvent::TrayLayoutChanged);
        }

        let anchor_pos = assembly.registry.position(piece_id);
        let offsets = build_drag_offsets(&assembly.registry, &members, piece_id);
        bring_to_front(&mut assembly.z_order, &members);
        self.drag = Some(DragSession {
            anchor: piece_id,
            pieces: members,
            offsets,
            grab_offset: (x - anchor_pos.0, y - anchor_pos.1),
            pointer_id,
        });
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, pointer_id: i32) {
        let Some(drag) = self.drag.as_ref() else {
            return;
        };
        if drag.pointer_id != pointer_id {
            return;
        }
        let Some(assembly) = self.assembly.as_mut() else {
            return;
        };
        let anchor = (x - drag.grab_offset.0, y - drag.grab_offset.1);
        for (index, &id) in drag.pieces.iter().enumerate() {
            let offset = drag.offsets.get(index).copied().unwrap_or((0.0, 0.0));
            assembly
                .registry
                .set_position(id, anchor.0 + offset.0, anchor.1 + offset.1);
        }
    }

    // Release and cancel take the same path: the session always ends with a
    // full snap evaluation, never half-applied.
    pub fn pointer_up(&mut self, pointer_id: i32) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        if drag.pointer_id != pointer_id {
            self.drag = Some(drag);
            return;
        }
        let rules = self.rules;
        let Some(geometry) = self.geometry else {
            return;
        };
        let Some(assembly) = self.assembly.as_mut() else {
            return;
        };
        if drag.pieces.len() > 1 {
            finish_group_drop(
                &mut assembly.registry,
                &mut self.groups,
                &geometry,
                &rules,
                &mut assembly.z_order,
                &mut self.events,
                &drag.pieces,
            );
        } else if let Some(&piece) = drag.pieces.first() {
            finish_single_drop(
                &mut assembly.registry,
                &mut self.groups,
                &geometry,
                &rules,
                &mut assembly.z_order,
                &mut self.events,
                piece,
            );
        }
        self.check_completion();
    }

    pub fn pointer_cancel(&mut self, pointer_id: i32) {
        self.pointer_up(pointer_id);
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.assembly
            .as_ref()
            .map(|assembly| assembly.registry.all_locked())
            .unwrap_or(false)
    }

    fn check_completion(&mut self) {
        if self.completion_sent || !self.is_complete() {
            return;
        }
        let Some(image) = self.image.as_ref() else {
            return;
        };
        debug!("assembly complete: {}", image.id);
        self.completion_sent = true;
        self.events.push_back(EngineEvent::Completed {
            image_id: image.id.clone(),
        });
        self.events.push_back(EngineEvent::Celebrate);
    }

    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain(..).collect()
    }

    pub fn render_data(&self) -> Vec<PieceRenderData<'_>> {
        let (Some(assembly), Some(geometry)) = (self.assembly.as_ref(), self.geometry.as_ref())
        else {
            return Vec::new();
        };
        assembly
            .z_order
            .iter()
            .filter_map(|&id| {
                piece_render_data(&assembly.registry, geometry, &assembly.outlines, id)
            })
            .collect()
    }
}

impl Default for AssemblyEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn assign_homes(registry: &mut PieceRegistry, geometry: &BoardGeometry, rules: &AssemblyRules) {
    let count = registry.tray_order().len();
    let slots = tray_home_slots(
        geometry.tray_rect,
        geometry.piece_outer,
        count,
        rules.tray_padding,
        rules.tray_gap,
    );
    registry.assign_tray_homes(&slots);
}

fn finish_single_drop(
    registry: &mut PieceRegistry,
    groups: &mut GroupManager,
    geometry: &BoardGeometry,
    rules: &AssemblyRules,
    z_order: &mut Vec<PieceId>,
    events: &mut VecDeque<EngineEvent>,
    piece: PieceId,
) {
    let ratio = rules.snap_threshold_ratio;
    if try_snap_piece(registry, groups, geometry, ratio, z_order, events, piece) {
        return;
    }
    let center = piece_center(geometry, registry, piece);
    if geometry.board_rect.contains(center.0, center.1) {
        if !try_snap_to_neighbor(registry, groups, geometry, ratio, events, &[piece]) {
            registry.move_to(piece, PieceLocation::Board);
        }
        return;
    }
    send_to_tray(registry, groups, events, &[piece]);
    assign_homes(registry, geometry, rules);
}

fn finish_group_drop(
    registry: &mut PieceRegistry,
    groups: &mut GroupManager,
    geometry: &BoardGeometry,
    rules: &AssemblyRules,
    z_order: &mut Vec<PieceId>,
    events: &mut VecDeque<EngineEvent>,
    pieces: &[PieceId],
) {
    let ratio = rules.snap_threshold_ratio;
    if try_snap_group_to_board(registry, groups, geometry, ratio, z_order, events, pieces) {
        return;
    }
    let center = group_center(registry, geometry, pieces);
    if geometry.board_rect.contains(center.0, center.1) {
        if !try_snap_to_neighbor(registry, groups, geometry, ratio, events, pieces) {
            for &id in pieces {
                registry.move_to(id, PieceLocation::Board);
            }
        }
        return;
    }
    send_to_tray(registry, groups, events, pieces);
    assign_homes(registry, geometry, rules);
}
