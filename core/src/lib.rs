pub mod catalog;
pub mod codec;
pub mod edges;
pub mod geom;
pub mod grid;
pub mod layout;
pub mod path;
pub mod rng;
pub mod rules;
pub mod snapshot;

pub use catalog::{image_by_id, ImageCatalogEntry, DEFAULT_IMAGE_ID, IMAGE_CATALOG};
pub use codec::{decode, encode};
pub use edges::{build_edge_maps, Edge, EdgeMaps, PieceEdges, FLAT_EDGE, FLAT_PIECE_EDGES};
pub use geom::{distance, to_local, Rect};
pub use grid::{grid_for_piece_count, GridError, GridSpec, DEFAULT_GRID};
pub use layout::{
    fit_board_rect, piece_metrics, tray_home_slots, BoardGeometry, OuterSize, PieceSize,
};
pub use path::{build_piece_path, Outline, PathCmd};
pub use rng::{rand_range, rand_unit, shuffled_order, splitmix32};
pub use rules::AssemblyRules;
pub use snapshot::{
    validate_definition, ImageInfo, PuzzleDefinition, PUZZLE_DEFINITION_VERSION,
};
