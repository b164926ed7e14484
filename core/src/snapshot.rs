use rkyv::{Archive, Deserialize, Serialize};

use crate::grid::GridSpec;

pub const PUZZLE_DEFINITION_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct ImageInfo {
    pub id: String,
    pub label: String,
    pub src: String,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }
}

// Which puzzle is being assembled: image, grid, and the seed the edge maps
// derive from. In-progress piece state is deliberately not part of this.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    pub version: u32,
    pub image: ImageInfo,
    pub rows: u32,
    pub cols: u32,
    pub shape_seed: u32,
}

impl PuzzleDefinition {
    pub fn new(image: ImageInfo, grid: GridSpec, shape_seed: u32) -> Self {
        Self {
            version: PUZZLE_DEFINITION_VERSION,
            image,
            rows: grid.rows,
            cols: grid.cols,
            shape_seed,
        }
    }

    pub fn grid(&self) -> Result<GridSpec, crate::grid::GridError> {
        GridSpec::new(self.rows, self.cols)
    }
}

pub fn validate_definition(definition: &PuzzleDefinition) -> Result<(), String> {
    if definition.version != PUZZLE_DEFINITION_VERSION {
        return Err(format!("unsupported version {}", definition.version));
    }
    if definition.image.id.trim().is_empty() {
        return Err("missing image id".to_string());
    }
    if definition.image.width == 0 || definition.image.height == 0 {
        return Err("image has zero dimensions".to_string());
    }
    if definition.rows == 0 || definition.cols == 0 {
        return Err("grid has zero cells".to_string());
    }
    Ok(())
}
