//! Contracts for the collaborators outside the simulation
//!
//! The menu layer switches screens and keeps the HUD current; the presenter
//! draws one frame from a read-only snapshot. Neither ever mutates game state.

use crate::consts::FINAL_LEVEL;
use crate::sim::{
    Collectible, Hazard, Particle, PatrolHazard, Platform, Player, PursuitHazard, SimulationState,
    Viewport,
};

/// Screen/menu switcher
///
/// Called on transitions only, except [`MenuView::update_hud`] which follows
/// every score, level or lives change.
pub trait MenuView {
    fn show_start(&mut self);
    fn show_instructions(&mut self);
    fn show_level_complete(&mut self, score: u64, story: &str);
    fn show_game_over(&mut self, score: u64, victory: bool);
    fn update_hud(&mut self, score: u64, level: u32, lives: u8);
    fn hide_all(&mut self);
}

/// Everything needed to draw one frame, borrowed from the simulation
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    pub viewport: Viewport,
    /// World-space x at the left edge of the screen
    pub camera_offset: f32,
    pub player: &'a Player,
    /// False on the off-phase of the invulnerability blink
    pub player_visible: bool,
    pub platforms: &'a [Platform],
    pub hazards: &'a [Hazard],
    pub collectibles: &'a [Collectible],
    pub patrols: &'a [PatrolHazard],
    pub pursuit: Option<&'a PursuitHazard>,
    pub particles: &'a [Particle],
}

impl<'a> FrameSnapshot<'a> {
    pub fn new(state: &'a SimulationState) -> Self {
        Self {
            viewport: state.viewport,
            camera_offset: state.camera_offset,
            player: &state.player,
            player_visible: state.player_visible(),
            platforms: &state.world.platforms,
            hazards: &state.world.hazards,
            collectibles: &state.world.collectibles,
            patrols: &state.world.patrols,
            pursuit: state.world.pursuit.as_ref(),
            particles: &state.effects.particles,
        }
    }

    /// Collectibles still waiting to be picked up
    pub fn visible_collectibles(self) -> impl Iterator<Item = &'a Collectible> {
        self.collectibles.iter().filter(|c| !c.collected)
    }

    /// The pursuit hazard, only once it is awake
    pub fn active_pursuit(&self) -> Option<&'a PursuitHazard> {
        self.pursuit.filter(|p| p.active)
    }
}

/// Draws frames. Must tolerate empty collections.
pub trait Presenter {
    fn present(&mut self, frame: &FrameSnapshot<'_>);
}

const LEVEL_STORIES: [&str; FINAL_LEVEL as usize] = [
    "Level 1: Off the roof\n\
     The cat is breaking out of the rooftop where the aliens held it. \
     Jump over the vents and antennas!",
    "Level 2: Across the skyscrapers\n\
     The cat races over the high-rises looking for cover. \
     But the aliens have already started the chase!",
    "Level 3: The final dash\n\
     A spaceship waits ahead that can carry the cat to safety. \
     Only the last obstacles stand in the way!",
];

/// Story text shown when `level` is completed; empty past the last level
pub fn level_story(level: u32) -> &'static str {
    level
        .checked_sub(1)
        .and_then(|i| LEVEL_STORIES.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// Title and subtitle for the game-over screen
pub fn game_over_message(victory: bool) -> (&'static str, &'static str) {
    if victory {
        ("Victory!", "The cat escaped from the aliens!")
    } else {
        ("Caught!", "The aliens grabbed our hero.")
    }
}
