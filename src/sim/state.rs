//! Game state and core simulation types
//!
//! The simulation owns everything here. Presentation and the menu layer only
//! ever see it through shared references.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::Effects;
use super::geom::Rect;
use crate::consts::*;
use crate::tuning::{LevelParams, level_params};

/// Stable platform identifier. Dependents refer to platforms by id, never by
/// reference, so recycling a platform is a pure id-keyed update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlatformId(pub u32);

/// Visible area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

impl Viewport {
    /// Top edge of the full-width ground platform
    pub fn ground_top(&self) -> f32 {
        self.height - GROUND_HEIGHT
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// No level loaded yet
    Idle,
    /// Active gameplay
    Playing,
    /// Frozen by the player; resumes exactly where it stopped
    Paused,
    /// Player reached the end of the level
    LevelComplete,
    /// Out of lives
    Defeat,
}

/// Things that happened during a frame, drained by the session layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    Jumped,
    Collected { score: u64 },
    Slowed,
    LifeLost { lives: u8 },
    Defeat { score: u64 },
    LevelComplete { level: u32, score: u64 },
    PlatformRecycled { id: PlatformId },
    PursuitActivated,
    PursuitGaveUp,
}

/// The runner
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity_y: f32,
    pub jumping: bool,
    pub slowed: bool,
    pub slow_timer: u32,
    pub facing_right: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, 0.0),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            velocity_y: 0.0,
            jumping: false,
            slowed: false,
            slow_timer: 0,
            facing_right: true,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Midpoint of the bottom edge
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x * 0.5, self.pos.y + self.size.y)
    }

    /// Stand at the spawn point on top of a surface
    pub fn respawn(&mut self, surface_top: f32) {
        self.pos = Vec2::new(PLAYER_SPAWN_X, surface_top - self.size.y);
        self.velocity_y = 0.0;
        self.jumping = false;
        self.slowed = false;
        self.slow_timer = 0;
    }
}

/// A rooftop
#[derive(Debug, Clone, Serialize)]
pub struct Platform {
    pub id: PlatformId,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: u32,
}

impl Platform {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }
}

/// Static obstacle that slows the player on contact
#[derive(Debug, Clone, Serialize)]
pub struct Hazard {
    pub pos: Vec2,
    pub size: Vec2,
    pub platform_id: PlatformId,
    pub color: u32,
}

impl Hazard {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Bonus item. `collected` only ever goes false -> true.
#[derive(Debug, Clone, Serialize)]
pub struct Collectible {
    pub pos: Vec2,
    pub size: Vec2,
    pub collected: bool,
    pub platform_id: PlatformId,
    pub color: u32,
}

impl Collectible {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Alien walking leftward on its own, costs a life on contact
#[derive(Debug, Clone, Serialize)]
pub struct PatrolHazard {
    pub pos: Vec2,
    pub size: Vec2,
    /// Own leftward speed on top of the world scroll
    pub speed: f32,
    pub platform_id: PlatformId,
    pub color: u32,
}

impl PatrolHazard {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// The chasing alien. Sleeps for a while, then closes in from the left.
#[derive(Debug, Clone, Serialize)]
pub struct PursuitHazard {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub acceleration: f32,
    pub active: bool,
    pub activation_timer: u32,
    pub color: u32,
}

impl PursuitHazard {
    pub fn new(viewport: &Viewport, base_speed: f32) -> Self {
        let mut pursuit = Self {
            pos: Vec2::ZERO,
            size: Vec2::new(PURSUIT_WIDTH, PURSUIT_HEIGHT),
            speed: 0.0,
            acceleration: PURSUIT_ACCELERATION,
            active: false,
            activation_timer: 0,
            color: PURSUIT_COLOR,
        };
        pursuit.pos.y = viewport.height - PURSUIT_RISE;
        pursuit.reset(base_speed);
        pursuit
    }

    /// Back to the pre-activation pose. Height is kept.
    pub fn reset(&mut self, base_speed: f32) {
        self.pos.x = PURSUIT_SPAWN_X;
        self.speed = base_speed * PURSUIT_START_FACTOR;
        self.active = false;
        self.activation_timer = PURSUIT_ACTIVATION_FRAMES;
    }

    pub fn max_speed(base_speed: f32) -> f32 {
        base_speed * PURSUIT_MAX_FACTOR
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Entity pool for one level
///
/// Platforms are kept in creation order and never removed mid-level, so a
/// platform's id is also its index. The last platform is the finish line.
#[derive(Debug, Clone, Default, Serialize)]
pub struct World {
    pub platforms: Vec<Platform>,
    pub hazards: Vec<Hazard>,
    pub collectibles: Vec<Collectible>,
    pub patrols: Vec<PatrolHazard>,
    pub pursuit: Option<PursuitHazard>,
}

impl World {
    pub fn clear(&mut self) {
        self.platforms.clear();
        self.hazards.clear();
        self.collectibles.clear();
        self.patrols.clear();
        self.pursuit = None;
    }

    pub fn platform(&self, id: PlatformId) -> Option<&Platform> {
        self.platforms.get(id.0 as usize).filter(|p| p.id == id)
    }

    /// Id the next generated platform will get
    pub fn next_platform_id(&self) -> PlatformId {
        PlatformId(self.platforms.len() as u32)
    }

    /// The platform whose far end completes the level
    pub fn finish(&self) -> Option<&Platform> {
        self.platforms.last()
    }

    /// Right edge of the furthest platform (where the runway currently ends)
    pub fn runway_end(&self) -> Option<f32> {
        self.platforms
            .iter()
            .map(Platform::right)
            .max_by(|a, b| a.total_cmp(b))
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize)]
pub struct SimulationState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub viewport: Viewport,
    /// Current level, 1-based. Goes to FINAL_LEVEL + 1 on victory.
    pub level: u32,
    pub params: LevelParams,
    pub score: u64,
    pub lives: u8,
    /// Scroll speed this frame (base speed, or reduced while slowed)
    pub current_speed: f32,
    pub camera_offset: f32,
    pub invulnerable: bool,
    pub invulnerable_timer: u32,
    pub phase: GamePhase,
    /// Frames simulated in the current level
    pub frame: u64,
    pub player: Player,
    pub world: World,
    pub effects: Effects,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
}

impl SimulationState {
    /// Create an idle state; call [`SimulationState::load_level`] to play
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        let params = level_params(1);
        Self {
            seed,
            viewport,
            level: 1,
            current_speed: params.base_speed,
            params,
            score: 0,
            lives: START_LIVES,
            camera_offset: 0.0,
            invulnerable: false,
            invulnerable_timer: 0,
            phase: GamePhase::Idle,
            frame: 0,
            player: Player::default(),
            world: World::default(),
            effects: Effects::new(seed),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Reset score and lives for a fresh run at level 1
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.level = 1;
    }

    /// Tear down the current level and generate `self.level` from scratch.
    /// Score and lives carry over.
    pub fn load_level(&mut self) {
        self.params = level_params(self.level);
        self.current_speed = self.params.base_speed;
        self.camera_offset = 0.0;
        self.invulnerable = false;
        self.invulnerable_timer = 0;
        self.frame = 0;
        self.effects.clear();
        self.events.clear();

        super::generate::generate_level(
            &mut self.world,
            self.level,
            &self.params,
            &self.viewport,
            &mut self.rng,
        );

        let spawn_top = self
            .world
            .platforms
            .first()
            .map_or(self.viewport.ground_top(), Platform::top);
        self.player.respawn(spawn_top);
        self.phase = GamePhase::Playing;

        log::info!(
            "Level {} generated: {} platforms, {} hazards, {} collectibles, {} patrols, pursuit={}",
            self.level,
            self.world.platforms.len(),
            self.world.hazards.len(),
            self.world.collectibles.len(),
            self.world.patrols.len(),
            self.world.pursuit.is_some()
        );
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Player sprite should be drawn this frame (blinks while invulnerable)
    pub fn player_visible(&self) -> bool {
        !self.invulnerable || (self.invulnerable_timer / 5) % 2 == 0
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
