use serde::{Deserialize, Serialize};

pub const SNAP_THRESHOLD_RATIO_DEFAULT: f32 = 0.35;
pub const SNAP_THRESHOLD_RATIO_MIN: f32 = 0.05;
pub const SNAP_THRESHOLD_RATIO_MAX: f32 = 0.5;

pub const TAB_RATIO_DEFAULT: f32 = 0.24;
pub const TAB_RATIO_MIN: f32 = 0.1;
pub const TAB_RATIO_MAX: f32 = 0.35;

pub const TRAY_PADDING_DEFAULT: f32 = 16.0;
pub const TRAY_GAP_DEFAULT: f32 = 12.0;
pub const BOARD_INSET_DEFAULT: f32 = 8.0;

pub const FLASH_DURATION_MS_DEFAULT: f32 = 600.0;
pub const FLASH_DURATION_MS_MIN: f32 = 100.0;
pub const FLASH_DURATION_MS_MAX: f32 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssemblyRules {
    pub snap_threshold_ratio: f32,
    pub tab_ratio: f32,
    pub tray_padding: f32,
    pub tray_gap: f32,
    pub board_inset: f32,
    pub flash_duration_ms: f32,
}

impl Default for AssemblyRules {
    fn default() -> Self {
        Self {
            snap_threshold_ratio: SNAP_THRESHOLD_RATIO_DEFAULT,
            tab_ratio: TAB_RATIO_DEFAULT,
            tray_padding: TRAY_PADDING_DEFAULT,
            tray_gap: TRAY_GAP_DEFAULT,
            board_inset: BOARD_INSET_DEFAULT,
            flash_duration_ms: FLASH_DURATION_MS_DEFAULT,
        }
    }
}

impl AssemblyRules {
    pub fn clamped(self) -> Self {
        Self {
            snap_threshold_ratio: self
                .snap_threshold_ratio
                .clamp(SNAP_THRESHOLD_RATIO_MIN, SNAP_THRESHOLD_RATIO_MAX),
            tab_ratio: self.tab_ratio.clamp(TAB_RATIO_MIN, TAB_RATIO_MAX),
            tray_padding: self.tray_padding.max(0.0),
            tray_gap: self.tray_gap.max(0.0),
            board_inset: self.board_inset.max(0.0),
            flash_duration_ms: self
                .flash_duration_ms
                .clamp(FLASH_DURATION_MS_MIN, FLASH_DURATION_MS_MAX),
        }
    }
}
