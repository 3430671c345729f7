//! Rooftop Escape - a side-scrolling rooftop runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level content, game state)
//! - `session`: Level/life progression and screen flow
//! - `view`: Contracts for the presentation and menu collaborators
//! - `input`: Keyboard/pointer input surface
//! - `tuning`: Data-driven per-level balance
//! - `settings`: Runtime configuration for the native runner

pub mod error;
pub mod input;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod view;

pub use error::ConfigError;
pub use session::{Session, SessionPhase};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default viewport dimensions (pixels)
    pub const DEFAULT_SCREEN_WIDTH: f32 = 800.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 600.0;
    /// Smallest viewport the generator can lay a level out on
    pub const MIN_SCREEN_WIDTH: f32 = 320.0;
    pub const MIN_SCREEN_HEIGHT: f32 = 240.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_SPAWN_X: f32 = 100.0;

    /// Session defaults
    pub const START_LIVES: u8 = 5;
    pub const FINAL_LEVEL: u32 = 3;
    pub const COLLECT_REWARD: u64 = 100;

    /// Slowdown after touching a static hazard
    pub const SLOW_DURATION_FRAMES: u32 = 45;
    pub const SLOW_SPEED_FACTOR: f32 = 0.6;

    /// Grace period after losing a life
    pub const INVULNERABLE_FRAMES: u32 = 150;

    /// Landing band around a platform top: above / below the platform body
    pub const LANDING_TOLERANCE_ABOVE: f32 = 15.0;
    pub const LANDING_TOLERANCE_BELOW: f32 = 20.0;
    /// Level 1 forward nudge on every landing (fraction of current speed)
    pub const TUTORIAL_NUDGE_FACTOR: f32 = 0.3;

    /// Camera starts following once the player passes this fraction of the screen
    pub const CAMERA_FOLLOW_FRACTION: f32 = 0.6;
    /// Level is complete once the player is this close to the finish platform's end
    pub const FINISH_MARGIN: f32 = 50.0;

    /// Terrain
    pub const GROUND_HEIGHT: f32 = 50.0;
    pub const PLATFORM_HEIGHT: f32 = 30.0;
    /// Highest platform top, measured up from the bottom of the screen
    pub const PLATFORM_MAX_RISE: f32 = 180.0;

    /// Static hazards ("antennas")
    pub const HAZARD_WIDTH: f32 = 20.0;
    pub const HAZARD_HEIGHT: f32 = 30.0;

    /// Collectibles ("fish")
    pub const COLLECTIBLE_WIDTH: f32 = 15.0;
    pub const COLLECTIBLE_HEIGHT: f32 = 10.0;
    pub const COLLECTIBLE_LIFT: f32 = 20.0;
    pub const COLLECTIBLE_MARGIN: f32 = 50.0;

    /// Patrol hazards ("aliens")
    pub const PATROL_WIDTH: f32 = 30.0;
    pub const PATROL_HEIGHT: f32 = 40.0;
    /// Spawn / re-anchor distance past a platform's right edge
    pub const PATROL_SPAWN_OFFSET_MIN: f32 = 200.0;
    pub const PATROL_SPAWN_OFFSET_MAX: f32 = 400.0;
    /// Wrap distance past a platform's right edge once off-screen left
    pub const PATROL_WRAP_OFFSET_MIN: f32 = 200.0;
    pub const PATROL_WRAP_OFFSET_MAX: f32 = 500.0;
    /// Patrols sit on platforms in the last part of the level (percent of platforms)
    pub const PATROL_TAIL_PERCENT: usize = 30;

    /// Pursuit hazard ("chasing alien")
    pub const PURSUIT_WIDTH: f32 = 40.0;
    pub const PURSUIT_HEIGHT: f32 = 50.0;
    pub const PURSUIT_SPAWN_X: f32 = -300.0;
    /// Height above the bottom of the screen
    pub const PURSUIT_RISE: f32 = 100.0;
    pub const PURSUIT_ACTIVATION_FRAMES: u32 = 240;
    pub const PURSUIT_ACCELERATION: f32 = 0.001;
    /// Start speed and cap as fractions of the level's base speed
    pub const PURSUIT_START_FACTOR: f32 = 0.3;
    pub const PURSUIT_MAX_FACTOR: f32 = 0.6;
    /// Pursuit gives up this far past the right edge of the screen
    pub const PURSUIT_GIVE_UP_MARGIN: f32 = 500.0;

    /// Entity colour tags (0xRRGGBB)
    pub const PLATFORM_COLOR: u32 = 0x53_34_83;
    pub const HAZARD_COLOR: u32 = 0xe9_45_60;
    pub const COLLECTIBLE_COLOR: u32 = 0x4c_c9_f0;
    pub const PATROL_COLOR: u32 = 0x00_ff_9d;
    pub const PURSUIT_COLOR: u32 = 0xff_3e_6d;
}
