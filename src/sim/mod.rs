//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call = one display frame)
//! - Seeded RNG only
//! - Stable iteration order (platforms by id)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod effects;
pub mod generate;
pub mod geom;
pub mod state;
pub mod tick;

pub use effects::{EffectKind, Effects, Particle};
pub use geom::{Rect, landing_contact, rectangles_overlap};
pub use state::{
    Collectible, GameEvent, GamePhase, Hazard, PatrolHazard, Platform, PlatformId, Player,
    PursuitHazard, SimulationState, Viewport, World,
};
pub use tick::{TickInput, tick, try_jump, update};
