//! Fixed-order per-frame simulation step
//!
//! One call to [`tick`] advances the game by exactly one display frame. The
//! steps run in a fixed order and some of them end the frame early (falling
//! off the screen, losing a life, finishing the level); that order is part of
//! the game's feel and is covered by the tests below.

use std::ops::ControlFlow;

use super::autopilot;
use super::generate::{recycle_platforms, wrap_patrol};
use super::geom::{landing_contact, rectangles_overlap};
use super::state::{GameEvent, GamePhase, PursuitHazard, SimulationState};
use crate::consts::*;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump trigger (key press or tap) seen since the last frame
    pub jump: bool,
    /// Idle/demo mode - AI decides when to jump
    pub autopilot: bool,
}

/// Advance the game by one frame
pub fn tick(state: &mut SimulationState, input: &TickInput) {
    if !state.is_running() {
        return;
    }
    if input.jump || (input.autopilot && autopilot::wants_jump(state)) {
        try_jump(state);
    }
    update(state);
}

/// Start a jump if the runner is on its feet and not slowed
///
/// Returns true if the jump happened.
pub fn try_jump(state: &mut SimulationState) -> bool {
    if !state.is_running() || state.player.jumping || state.player.slowed {
        return false;
    }
    state.player.velocity_y = -state.params.jump_strength;
    state.player.jumping = true;
    state.effects.spawn_jump(state.player.feet());
    state.events.push(GameEvent::Jumped);
    true
}

/// Run the frame update. Does nothing unless the game is playing.
pub fn update(state: &mut SimulationState) {
    if !state.is_running() {
        return;
    }
    state.frame += 1;
    let _ = step(state);
}

fn step(state: &mut SimulationState) -> ControlFlow<()> {
    integrate_player(state);
    state.effects.step();
    tick_slow(state);
    land_on_platforms(state);
    check_fall(state)?;
    tick_invulnerability(state);
    resolve_hazards(state)?;
    update_pursuit(state)?;
    pick_up_collectibles(state);
    scroll_world(state);
    update_camera(state);
    check_finish(state)
}

fn integrate_player(state: &mut SimulationState) {
    state.player.velocity_y += state.params.gravity;
    state.player.pos.y += state.player.velocity_y;
}

fn tick_slow(state: &mut SimulationState) {
    let player = &mut state.player;
    if !player.slowed {
        return;
    }
    player.slow_timer = player.slow_timer.saturating_sub(1);
    if player.slow_timer == 0 {
        player.slowed = false;
        state.current_speed = state.params.base_speed;
    }
}

fn land_on_platforms(state: &mut SimulationState) {
    let player = &mut state.player;
    for platform in &state.world.platforms {
        if !landing_contact(&player.rect(), player.velocity_y, &platform.rect()) {
            continue;
        }
        player.pos.y = platform.top() - player.size.y;
        player.velocity_y = 0.0;
        player.jumping = false;
        if state.params.landing_nudge {
            player.pos.x += state.current_speed * TUTORIAL_NUDGE_FACTOR;
        }
    }
}

fn check_fall(state: &mut SimulationState) -> ControlFlow<()> {
    if state.player.pos.y > state.viewport.height {
        lose_life(state);
        return ControlFlow::Break(());
    }
    ControlFlow::Continue(())
}

fn tick_invulnerability(state: &mut SimulationState) {
    if !state.invulnerable {
        return;
    }
    state.invulnerable_timer = state.invulnerable_timer.saturating_sub(1);
    if state.invulnerable_timer == 0 {
        state.invulnerable = false;
    }
}

/// Static hazards slow, patrols cost a life. Patrols only walk while the
/// player can be hurt; the world scroll still carries them.
fn resolve_hazards(state: &mut SimulationState) -> ControlFlow<()> {
    if state.invulnerable {
        return ControlFlow::Continue(());
    }
    let player = state.player.rect();

    // One slow per frame no matter how many hazards overlap
    if state
        .world
        .hazards
        .iter()
        .any(|h| rectangles_overlap(&player, &h.rect()))
    {
        slow_player(state);
    }

    // Each patrol is hit-tested before it takes its own step
    for index in 0..state.world.patrols.len() {
        if rectangles_overlap(&player, &state.world.patrols[index].rect()) {
            lose_life(state);
            return ControlFlow::Break(());
        }
        let alien = &mut state.world.patrols[index];
        alien.pos.x -= alien.speed;
        if alien.rect().right() < 0.0 {
            wrap_patrol(alien, &state.world.platforms, &mut state.rng);
        }
    }
    ControlFlow::Continue(())
}

fn update_pursuit(state: &mut SimulationState) -> ControlFlow<()> {
    let max_speed = PursuitHazard::max_speed(state.params.base_speed);
    let give_up_x = state.viewport.width + PURSUIT_GIVE_UP_MARGIN;
    let player = state.player.rect();

    let Some(pursuit) = state.world.pursuit.as_mut() else {
        return ControlFlow::Continue(());
    };

    if !pursuit.active {
        pursuit.activation_timer = pursuit.activation_timer.saturating_sub(1);
        if pursuit.activation_timer == 0 {
            pursuit.active = true;
            state.events.push(GameEvent::PursuitActivated);
            log::debug!("Pursuit active at x={:.1}", pursuit.pos.x);
        }
        return ControlFlow::Continue(());
    }

    pursuit.pos.x += pursuit.speed;
    pursuit.speed = (pursuit.speed + pursuit.acceleration).min(max_speed);

    // Catches even during the grace period
    if rectangles_overlap(&player, &pursuit.rect()) {
        lose_life(state);
        return ControlFlow::Break(());
    }

    if pursuit.pos.x > give_up_x {
        pursuit.active = false;
        state.events.push(GameEvent::PursuitGaveUp);
    }
    ControlFlow::Continue(())
}

fn pick_up_collectibles(state: &mut SimulationState) {
    let player = state.player.rect();
    for item in state.world.collectibles.iter_mut().filter(|c| !c.collected) {
        if !rectangles_overlap(&player, &item.rect()) {
            continue;
        }
        item.collected = true;
        state.score += COLLECT_REWARD;
        state.effects.spawn_collect(item.pos);
        state.events.push(GameEvent::Collected { score: state.score });
    }
}

/// Scroll everything left by the current speed, then recycle what fell off
fn scroll_world(state: &mut SimulationState) {
    let dx = state.current_speed;
    let world = &mut state.world;
    for p in &mut world.platforms {
        p.pos.x -= dx;
    }
    for h in &mut world.hazards {
        h.pos.x -= dx;
    }
    for c in &mut world.collectibles {
        c.pos.x -= dx;
    }
    for alien in &mut world.patrols {
        alien.pos.x -= dx;
    }

    for id in recycle_platforms(world, &state.params, &mut state.rng) {
        log::trace!("Recycled platform {:?}", id);
        state.events.push(GameEvent::PlatformRecycled { id });
    }
}

fn update_camera(state: &mut SimulationState) {
    let threshold = state.viewport.width * CAMERA_FOLLOW_FRACTION;
    state.camera_offset = (state.player.pos.x - threshold).max(0.0);
}

fn check_finish(state: &mut SimulationState) -> ControlFlow<()> {
    let Some(finish) = state.world.finish() else {
        return ControlFlow::Continue(());
    };
    if state.player.pos.x > finish.right() - FINISH_MARGIN {
        complete_level(state);
        return ControlFlow::Break(());
    }
    ControlFlow::Continue(())
}

/// Touching a static hazard: slow the world down for a while.
/// Re-triggering while slowed just restarts the timer.
pub fn slow_player(state: &mut SimulationState) {
    state.player.slowed = true;
    state.player.slow_timer = SLOW_DURATION_FRAMES;
    state.current_speed = state.params.base_speed * SLOW_SPEED_FACTOR;
    state.effects.spawn_slow(state.player.center());
    state.events.push(GameEvent::Slowed);
    log::debug!("Player slowed (frame {})", state.frame);
}

/// Lose a life: either game over, or respawn with a grace period
pub fn lose_life(state: &mut SimulationState) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost { lives: state.lives });

    if state.lives == 0 {
        state.phase = GamePhase::Defeat;
        state.events.push(GameEvent::Defeat { score: state.score });
        log::info!("Defeat on level {} with score {}", state.level, state.score);
        return;
    }

    state.invulnerable = true;
    state.invulnerable_timer = INVULNERABLE_FRAMES;

    let spawn_top = state
        .world
        .platforms
        .first()
        .map_or(state.viewport.ground_top(), |p| p.top());
    state.player.respawn(spawn_top);
    state.camera_offset = 0.0;
    state.current_speed = state.params.base_speed;

    if let Some(pursuit) = state.world.pursuit.as_mut() {
        pursuit.reset(state.params.base_speed);
    }

    state.effects.spawn_damage(state.player.center());
    log::debug!("Life lost, {} remaining", state.lives);
}

/// Freeze the level; score and lives carry over to the next one
pub fn complete_level(state: &mut SimulationState) {
    state.phase = GamePhase::LevelComplete;
    state.events.push(GameEvent::LevelComplete {
        level: state.level,
        score: state.score,
    });
    log::info!(
        "Level {} complete after {} frames, score {}",
        state.level,
        state.frame,
        state.score
    );
}
