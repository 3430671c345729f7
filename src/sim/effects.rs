//! Transient visual effects
//!
//! Particles are cosmetic: the engine spawns and ages them, presentation draws
//! them, and no gameplay decision ever reads them. They draw from their own
//! RNG stream so toggling or tweaking effects cannot shift level generation.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

/// Maximum particles alive at once
pub const MAX_PARTICLES: usize = 256;

/// Mixed into the session seed to derive the effects stream
const EFFECTS_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// What spawned a particle (drives colour and fade)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EffectKind {
    /// Dust kicked up by a jump
    Jump,
    /// Sparkle when a collectible is picked up
    Collect,
    /// Burst when a life is lost
    Damage,
    /// Swirl when a static hazard slows the player
    Slow,
}

impl EffectKind {
    pub fn color(self) -> u32 {
        match self {
            EffectKind::Jump => 0xff_9a_00,
            EffectKind::Collect => 0x4c_c9_f0,
            EffectKind::Damage => 0xe9_45_60,
            EffectKind::Slow => 0x8a_2b_e2,
        }
    }

    /// Life value at which a particle is drawn fully opaque
    pub fn fade_frames(self) -> f32 {
        match self {
            EffectKind::Jump => 30.0,
            EffectKind::Collect => 25.0,
            EffectKind::Damage => 35.0,
            EffectKind::Slow => 45.0,
        }
    }
}

/// A single cosmetic particle, in world coordinates
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub kind: EffectKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Frames left to live
    pub life: f32,
}

impl Particle {
    pub fn color(&self) -> u32 {
        self.kind.color()
    }

    /// Opacity in [0, 1]
    pub fn alpha(&self) -> f32 {
        (self.life / self.kind.fade_frames()).clamp(0.0, 1.0)
    }
}

/// All live particles plus the RNG that scatters them
#[derive(Debug, Clone, Serialize)]
pub struct Effects {
    pub particles: Vec<Particle>,
    #[serde(skip)]
    rng: Pcg32,
}

impl Effects {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed ^ EFFECTS_SEED_SALT),
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Move every particle one frame and drop the expired ones
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.life -= 1.0;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    /// Dust falling from the player's feet
    pub fn spawn_jump(&mut self, feet: Vec2) {
        for _ in 0..5 {
            let vel = Vec2::new(
                self.rng.random_range(-2.0..2.0),
                self.rng.random_range(1.0..4.0),
            );
            let size = self.rng.random_range(2.0..5.0);
            let life = self.rng.random_range(20.0..30.0);
            self.push(EffectKind::Jump, feet, vel, size, life);
        }
    }

    pub fn spawn_collect(&mut self, at: Vec2) {
        self.burst(EffectKind::Collect, at, 8, 3.0, (2.0, 5.0), (15.0, 25.0));
    }

    pub fn spawn_damage(&mut self, center: Vec2) {
        self.burst(EffectKind::Damage, center, 12, 5.0, (3.0, 7.0), (20.0, 35.0));
    }

    pub fn spawn_slow(&mut self, center: Vec2) {
        self.burst(EffectKind::Slow, center, 15, 4.0, (3.0, 7.0), (25.0, 45.0));
    }

    /// Scatter `count` particles from a point in all directions
    fn burst(
        &mut self,
        kind: EffectKind,
        at: Vec2,
        count: usize,
        max_speed: f32,
        size: (f32, f32),
        life: (f32, f32),
    ) {
        for _ in 0..count {
            let vel = Vec2::new(
                self.rng.random_range(-max_speed..max_speed),
                self.rng.random_range(-max_speed..max_speed),
            );
            let size = self.rng.random_range(size.0..size.1);
            let life = self.rng.random_range(life.0..life.1);
            self.push(kind, at, vel, size, life);
        }
    }

    fn push(&mut self, kind: EffectKind, pos: Vec2, vel: Vec2, size: f32, life: f32) {
        if self.particles.len() >= MAX_PARTICLES {
            return;
        }
        self.particles.push(Particle {
            kind,
            pos,
            vel,
            size,
            life,
        });
    }
}
