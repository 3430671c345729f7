//! Data-driven per-level balance
//!
//! One table entry per level. Level generation and recycle-time re-anchoring
//! both read from here, so a safe-zone or gap tweak lands in both places.

use serde::{Deserialize, Serialize};

use crate::consts::FINAL_LEVEL;

/// Constants that hold for the duration of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelParams {
    /// World scroll speed (pixels/frame) when not slowed
    pub base_speed: f32,
    /// Added to vertical velocity every frame
    pub gravity: f32,
    /// Upward velocity applied by a jump
    pub jump_strength: f32,
    /// Horizontal gap between consecutive platforms
    pub min_gap: f32,
    pub max_gap: f32,
    /// Platform width range
    pub min_width: f32,
    pub max_width: f32,
    /// Vertical offsets from ground level, cycled by platform index
    pub height_pattern: [f32; 8],
    /// Number of static hazards placed at level start
    pub hazard_count: usize,
    /// Fraction of platform width kept hazard-free at each edge
    pub safe_zone: f32,
    /// Hazards are placed dead-centre instead of randomly (tutorial level)
    pub center_hazards: bool,
    /// Landing nudges the player forward (tutorial level)
    pub landing_nudge: bool,
}

impl LevelParams {
    /// Generated platforms beyond the full-width ground platform
    pub fn platform_count(level: u32) -> usize {
        6 + level as usize
    }

    pub fn collectible_count(level: u32) -> usize {
        8 + level as usize * 2
    }

    /// Patrol hazards only appear from level 2 on, one per level number
    pub fn patrol_count(level: u32) -> usize {
        if level >= 2 { level as usize } else { 0 }
    }

    pub fn patrol_speed(level: u32) -> f32 {
        0.4 + level as f32 * 0.15
    }

    pub fn has_pursuit(level: u32) -> bool {
        level >= 2
    }
}

/// Balance table for a level (1-based). Levels past the last reuse its entry.
pub fn level_params(level: u32) -> LevelParams {
    match level.clamp(1, FINAL_LEVEL) {
        1 => LevelParams {
            base_speed: 2.8,
            gravity: 0.3,
            jump_strength: 16.0,
            min_gap: 200.0,
            max_gap: 280.0,
            min_width: 180.0,
            max_width: 350.0,
            height_pattern: [0.0, -40.0, 0.0, -30.0, 0.0, -50.0, 0.0, -20.0],
            hazard_count: 1,
            safe_zone: 0.35,
            center_hazards: true,
            landing_nudge: true,
        },
        2 => LevelParams {
            base_speed: 3.2,
            gravity: 0.35,
            jump_strength: 15.0,
            min_gap: 180.0,
            max_gap: 250.0,
            min_width: 160.0,
            max_width: 300.0,
            height_pattern: [0.0, -60.0, 0.0, -40.0, 0.0, -70.0, 0.0, -30.0],
            hazard_count: 3,
            safe_zone: 0.3,
            center_hazards: false,
            landing_nudge: false,
        },
        _ => LevelParams {
            base_speed: 3.6,
            gravity: 0.4,
            jump_strength: 14.0,
            min_gap: 160.0,
            max_gap: 230.0,
            min_width: 140.0,
            max_width: 280.0,
            height_pattern: [0.0, -80.0, 0.0, -50.0, 0.0, -90.0, 0.0, -40.0],
            hazard_count: 5,
            safe_zone: 0.25,
            center_hazards: false,
            landing_nudge: false,
        },
    }
}
