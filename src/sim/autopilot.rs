//! Idle/demo mode controller
//!
//! Plays the game from the simulation state alone: jump off the end of the
//! current rooftop, and hop over anything dangerous walking or standing just
//! ahead. It is not perfect; static hazards only slow the runner.

use super::geom::Rect;
use super::state::{Platform, SimulationState};

/// Take off when the rooftop ends within this many frames of scrolling
const EDGE_LEAD_FRAMES: f32 = 2.0;
/// Jump this many frames before reaching a static hazard
const HAZARD_LEAD_FRAMES: f32 = 6.0;
/// Jump this many frames before meeting a patrol
const PATROL_LEAD_FRAMES: f32 = 8.0;
/// Bottom edge within this distance of a platform top counts as standing on it
const SUPPORT_TOLERANCE: f32 = 1.0;

/// Platform the player is currently standing on, if any
pub fn support_platform(state: &SimulationState) -> Option<&Platform> {
    let rect = state.player.rect();
    state
        .world
        .platforms
        .iter()
        .find(|p| rect.overlaps_x(&p.rect()) && (rect.bottom() - p.top()).abs() <= SUPPORT_TOLERANCE)
}

/// Gap between the player's front edge and something ahead, if it is ahead
fn distance_ahead(player: &Rect, obstacle: &Rect) -> Option<f32> {
    (obstacle.right() > player.x).then(|| obstacle.x - player.right())
}

/// Decide whether to press jump this frame
pub fn wants_jump(state: &SimulationState) -> bool {
    let player = &state.player;
    if !state.is_running() || player.jumping || player.slowed {
        return false;
    }
    let Some(support) = support_platform(state) else {
        return false;
    };
    let rect = player.rect();
    let speed = state.current_speed;

    if support.right() - rect.right() <= speed * EDGE_LEAD_FRAMES {
        return true;
    }

    if !state.invulnerable {
        let hazard_close = state
            .world
            .hazards
            .iter()
            .filter_map(|h| distance_ahead(&rect, &h.rect()))
            .any(|d| d <= speed * HAZARD_LEAD_FRAMES);
        if hazard_close {
            return true;
        }

        let patrol_close = state.world.patrols.iter().any(|alien| {
            distance_ahead(&rect, &alien.rect())
                .is_some_and(|d| d <= (speed + alien.speed) * PATROL_LEAD_FRAMES)
        });
        if patrol_close {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;

    fn level_one() -> SimulationState {
        let mut state = SimulationState::new(Viewport::default(), 21);
        state.load_level();
        state.world.hazards.clear();
        state.world.patrols.clear();
        state
    }

    #[test]
    fn test_stays_put_mid_platform() {
        let state = level_one();
        assert!(support_platform(&state).is_some());
        assert!(!wants_jump(&state));
    }

    #[test]
    fn test_jumps_at_edge() {
        let mut state = level_one();
        // Ground ends just in front of the player
        let right = state.player.rect().right() + 1.0;
        state.world.platforms[0].size.x = right;
        assert!(wants_jump(&state));
    }

    #[test]
    fn test_no_jump_in_air_or_slowed() {
        let mut state = level_one();
        state.world.platforms[0].size.x = state.player.rect().right();
        state.player.jumping = true;
        assert!(!wants_jump(&state));
        state.player.jumping = false;
        state.player.slowed = true;
        assert!(!wants_jump(&state));
    }

    #[test]
    fn test_jumps_over_close_hazard() {
        let mut state = level_one();
        let mut state_far = state.clone();
        let template = crate::sim::state::Hazard {
            pos: glam::Vec2::new(state.player.rect().right() + 5.0, 520.0),
            size: glam::Vec2::new(20.0, 30.0),
            platform_id: crate::sim::state::PlatformId(0),
            color: 0,
        };
        state.world.hazards.push(template.clone());
        assert!(wants_jump(&state));

        let mut far = template;
        far.pos.x += 300.0;
        state_far.world.hazards.push(far);
        assert!(!wants_jump(&state_far));
    }
}
