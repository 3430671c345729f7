//! Progression controller
//!
//! Owns the simulation and drives the menu layer: title and instructions
//! screens, the run itself, level transitions, defeat and victory. The menu
//! is told about transitions only; the HUD is refreshed whenever score, level
//! or lives change.

use crate::consts::FINAL_LEVEL;
use crate::input::{InputAction, InputState, Key};
use crate::sim::{GameEvent, GamePhase, SimulationState, TickInput, Viewport, tick, try_jump};
use crate::view::{FrameSnapshot, MenuView, Presenter, level_story};

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Title,
    Instructions,
    Running,
    Paused,
    LevelComplete,
    GameOver { victory: bool },
}

pub struct Session<V: MenuView> {
    state: SimulationState,
    view: V,
    input: InputState,
    phase: SessionPhase,
    autopilot: bool,
}

impl<V: MenuView> Session<V> {
    /// Build a session on the title screen
    pub fn new(viewport: Viewport, seed: u64, mut view: V) -> Self {
        view.show_start();
        Self {
            state: SimulationState::new(viewport, seed),
            view,
            input: InputState::new(),
            phase: SessionPhase::Title,
            autopilot: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Read-only view of the simulation
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Let the idle AI play
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    /// Title screen -> how-to-play screen
    pub fn show_instructions(&mut self) {
        if self.phase != SessionPhase::Title {
            log::debug!("Ignoring show_instructions in {:?}", self.phase);
            return;
        }
        self.view.show_instructions();
        self.phase = SessionPhase::Instructions;
    }

    /// Fresh run from level 1
    pub fn start_game(&mut self) {
        log::info!("Starting new game (seed {})", self.state.seed);
        self.begin_run();
    }

    /// Same as a new game, from the game-over screen
    pub fn restart_game(&mut self) {
        log::info!("Restarting game");
        self.begin_run();
    }

    fn begin_run(&mut self) {
        self.state.reset_run();
        self.refresh_hud();
        self.state.load_level();
        self.view.hide_all();
        self.phase = SessionPhase::Running;
    }

    /// Advance from the level-complete screen. Past the last level this is
    /// the victory screen; no further level is generated.
    pub fn next_level(&mut self) {
        if self.phase != SessionPhase::LevelComplete {
            log::warn!("next_level requested in {:?}", self.phase);
            return;
        }

        self.state.level += 1;
        if self.state.level > FINAL_LEVEL {
            log::info!("Victory with score {}", self.state.score);
            self.phase = SessionPhase::GameOver { victory: true };
            self.view.show_game_over(self.state.score, true);
            return;
        }

        self.refresh_hud();
        self.state.load_level();
        self.view.hide_all();
        self.phase = SessionPhase::Running;
    }

    pub fn pause(&mut self) {
        if self.phase == SessionPhase::Running {
            self.state.phase = GamePhase::Paused;
            self.phase = SessionPhase::Paused;
            self.input.clear();
            log::debug!("Paused at frame {}", self.state.frame);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == SessionPhase::Paused {
            self.state.phase = GamePhase::Playing;
            self.phase = SessionPhase::Running;
            log::debug!("Resumed at frame {}", self.state.frame);
        }
    }

    /// Jump right now, between frames. Ignored unless running, grounded and
    /// not slowed.
    pub fn jump(&mut self) -> bool {
        self.is_running() && try_jump(&mut self.state)
    }

    pub fn key_down(&mut self, key: Key) {
        match self.input.key_down(key) {
            InputAction::Jump => {
                self.jump();
            }
            InputAction::TogglePause => match self.phase {
                SessionPhase::Running => self.pause(),
                SessionPhase::Paused => self.resume(),
                _ => {}
            },
            InputAction::None => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    pub fn pointer_down(&mut self) {
        if self.input.pointer_down() == InputAction::Jump {
            self.jump();
        }
    }

    /// Run one frame and forward its outcome to the menu layer
    pub fn tick(&mut self) {
        if !self.is_running() {
            return;
        }
        let input = TickInput {
            jump: false,
            autopilot: self.autopilot,
        };
        tick(&mut self.state, &input);
        self.dispatch_events();
    }

    /// Hand the current frame to the presenter. Skipped while not running.
    pub fn render<P: Presenter>(&self, presenter: &mut P) {
        if self.is_running() {
            presenter.present(&FrameSnapshot::new(&self.state));
        }
    }

    fn refresh_hud(&mut self) {
        self.view
            .update_hud(self.state.score, self.state.level, self.state.lives);
    }

    fn dispatch_events(&mut self) {
        let mut hud_dirty = false;
        let mut outcome = None;
        for event in self.state.drain_events() {
            match event {
                GameEvent::Collected { .. } | GameEvent::LifeLost { .. } => hud_dirty = true,
                GameEvent::Defeat { .. } | GameEvent::LevelComplete { .. } => outcome = Some(event),
                _ => {}
            }
        }

        if hud_dirty {
            self.refresh_hud();
        }

        match outcome {
            Some(GameEvent::Defeat { score }) => {
                self.phase = SessionPhase::GameOver { victory: false };
                self.view.show_game_over(score, false);
            }
            Some(GameEvent::LevelComplete { level, score }) => {
                self.phase = SessionPhase::LevelComplete;
                self.view.show_level_complete(score, level_story(level));
            }
            _ => {}
        }
    }
}
