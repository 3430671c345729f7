//! Level content generation
//!
//! Builds the finite platform pool for a level, scatters hazards, pickups and
//! aliens over it, and recycles platforms that scroll off the left edge so the
//! runway never runs out. Every placement rule lives in one function that both
//! the initial layout and recycle-time re-anchoring call.

use glam::Vec2;
use rand::Rng;

use super::state::{
    Collectible, Hazard, PatrolHazard, Platform, PlatformId, PursuitHazard, Viewport, World,
};
use crate::consts::*;
use crate::tuning::LevelParams;

/// Platform that carries the single tutorial hazard
pub const TUTORIAL_HAZARD_PLATFORM: usize = 4;

/// Uniform sample in `[min, max)`, or `min` for an empty range
fn roll<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// Generate a complete level into `world`, discarding whatever was there
pub fn generate_level<R: Rng>(
    world: &mut World,
    level: u32,
    params: &LevelParams,
    viewport: &Viewport,
    rng: &mut R,
) {
    world.clear();

    // Full-width ground the player spawns on
    world.platforms.push(Platform {
        id: PlatformId(0),
        pos: Vec2::new(0.0, viewport.ground_top()),
        size: Vec2::new(viewport.width, GROUND_HEIGHT),
        color: PLATFORM_COLOR,
    });

    generate_platforms(world, level, params, viewport, rng);
    generate_hazards(world, params, rng);
    generate_collectibles(world, level, rng);
    generate_patrols(world, level, rng);

    if LevelParams::has_pursuit(level) {
        world.pursuit = Some(PursuitHazard::new(viewport, params.base_speed));
    }
}

/// Append `6 + level` rooftops to the right of the screen
pub fn generate_platforms<R: Rng>(
    world: &mut World,
    level: u32,
    params: &LevelParams,
    viewport: &Viewport,
    rng: &mut R,
) {
    let ground_top = viewport.ground_top();
    let highest_top = viewport.height - PLATFORM_MAX_RISE;
    let mut last_x = viewport.width;

    for i in 0..LevelParams::platform_count(level) {
        let width = roll(rng, params.min_width, params.max_width);
        let gap = roll(rng, params.min_gap, params.max_gap);
        let offset = params.height_pattern[i % params.height_pattern.len()];
        let y = (ground_top + offset).clamp(highest_top, ground_top);

        let id = world.next_platform_id();
        world.platforms.push(Platform {
            id,
            pos: Vec2::new(last_x + gap, y),
            size: Vec2::new(width, PLATFORM_HEIGHT),
            color: PLATFORM_COLOR,
        });
        last_x += gap + width;
    }
}

/// Where a static hazard goes on `platform`, or None if the safe interior is empty
///
/// `safe_zone` of the platform width is kept clear at both edges. The tutorial
/// level always centres its hazard.
pub fn hazard_x<R: Rng>(platform: &Platform, params: &LevelParams, rng: &mut R) -> Option<f32> {
    let safe = platform.size.x * params.safe_zone;
    let min_x = platform.pos.x + safe;
    let max_x = platform.right() - safe - HAZARD_WIDTH;
    if max_x <= min_x {
        return None;
    }
    if params.center_hazards {
        Some(platform.pos.x + platform.size.x / 2.0 - HAZARD_WIDTH / 2.0)
    } else {
        Some(roll(rng, min_x, max_x))
    }
}

/// Where a collectible goes on `platform`, or None if it is too narrow
pub fn collectible_x<R: Rng>(platform: &Platform, rng: &mut R) -> Option<f32> {
    let span = platform.size.x - 2.0 * COLLECTIBLE_MARGIN;
    if span <= 0.0 {
        return None;
    }
    Some(platform.pos.x + COLLECTIBLE_MARGIN + roll(rng, 0.0, span))
}

/// Patrol spawn point beyond the right edge of `platform`
fn patrol_anchor<R: Rng>(platform: &Platform, rng: &mut R) -> Vec2 {
    Vec2::new(
        platform.right() + roll(rng, PATROL_SPAWN_OFFSET_MIN, PATROL_SPAWN_OFFSET_MAX),
        platform.top() - PATROL_HEIGHT,
    )
}

fn hazard_platform_index(params: &LevelParams, i: usize, platform_count: usize) -> usize {
    if params.center_hazards {
        TUTORIAL_HAZARD_PLATFORM
    } else {
        2 + i * platform_count.saturating_sub(4) / params.hazard_count.max(1)
    }
}

fn generate_hazards<R: Rng>(world: &mut World, params: &LevelParams, rng: &mut R) {
    let count = world.platforms.len();
    for i in 0..params.hazard_count {
        let Some(platform) = world.platforms.get(hazard_platform_index(params, i, count)) else {
            continue;
        };
        let Some(x) = hazard_x(platform, params, rng) else {
            continue;
        };
        world.hazards.push(Hazard {
            pos: Vec2::new(x, platform.top() - HAZARD_HEIGHT),
            size: Vec2::new(HAZARD_WIDTH, HAZARD_HEIGHT),
            platform_id: platform.id,
            color: HAZARD_COLOR,
        });
    }
}

fn generate_collectibles<R: Rng>(world: &mut World, level: u32, rng: &mut R) {
    if world.platforms.is_empty() {
        return;
    }
    for _ in 0..LevelParams::collectible_count(level) {
        let platform = &world.platforms[rng.random_range(0..world.platforms.len())];
        let Some(x) = collectible_x(platform, rng) else {
            continue;
        };
        world.collectibles.push(Collectible {
            pos: Vec2::new(x, platform.top() - COLLECTIBLE_LIFT),
            size: Vec2::new(COLLECTIBLE_WIDTH, COLLECTIBLE_HEIGHT),
            collected: false,
            platform_id: platform.id,
            color: COLLECTIBLE_COLOR,
        });
    }
}

fn generate_patrols<R: Rng>(world: &mut World, level: u32, rng: &mut R) {
    let count = world.platforms.len();
    if count == 0 {
        return;
    }
    let tail_start = count * (100 - PATROL_TAIL_PERCENT) / 100;
    let tail_len = count as f32 * PATROL_TAIL_PERCENT as f32 / 100.0;

    for _ in 0..LevelParams::patrol_count(level) {
        let index = (tail_start + roll(rng, 0.0, tail_len) as usize).min(count - 1);
        let platform = &world.platforms[index];
        world.patrols.push(PatrolHazard {
            pos: patrol_anchor(platform, rng),
            size: Vec2::new(PATROL_WIDTH, PATROL_HEIGHT),
            speed: LevelParams::patrol_speed(level),
            platform_id: platform.id,
            color: PATROL_COLOR,
        });
    }
}

/// Move every platform whose right edge has passed x=0 to the end of the runway
///
/// Each recycled platform lands one gap past the furthest platform, so the
/// runway keeps growing in x. Its dependents are re-anchored before returning.
pub fn recycle_platforms<R: Rng>(
    world: &mut World,
    params: &LevelParams,
    rng: &mut R,
) -> Vec<PlatformId> {
    let mut recycled = Vec::new();
    for index in 0..world.platforms.len() {
        if world.platforms[index].right() >= 0.0 {
            continue;
        }
        let Some(runway_end) = world.runway_end() else {
            break;
        };
        let gap = roll(rng, params.min_gap, params.max_gap);
        world.platforms[index].pos.x = runway_end + gap;

        let id = world.platforms[index].id;
        reanchor_dependents(world, id, params, rng);
        recycled.push(id);
    }
    recycled
}

/// Re-place everything standing on platform `id` using the generation rules
pub fn reanchor_dependents<R: Rng>(
    world: &mut World,
    id: PlatformId,
    params: &LevelParams,
    rng: &mut R,
) {
    let Some(platform) = world.platform(id).cloned() else {
        log::warn!("Re-anchor requested for unknown platform {:?}", id);
        return;
    };
    let centered = platform.pos.x + platform.size.x / 2.0;

    for hazard in world.hazards.iter_mut().filter(|h| h.platform_id == id) {
        hazard.pos.x = hazard_x(&platform, params, rng).unwrap_or(centered - hazard.size.x / 2.0);
        hazard.pos.y = platform.top() - hazard.size.y;
    }

    for item in world.collectibles.iter_mut().filter(|c| c.platform_id == id) {
        item.pos.x = collectible_x(&platform, rng).unwrap_or(centered - item.size.x / 2.0);
        item.pos.y = platform.top() - COLLECTIBLE_LIFT;
    }

    for alien in world.patrols.iter_mut().filter(|a| a.platform_id == id) {
        alien.pos = patrol_anchor(&platform, rng);
    }
}

/// Send a patrol that walked off the left edge to a random platform ahead
pub fn wrap_patrol<R: Rng>(alien: &mut PatrolHazard, platforms: &[Platform], rng: &mut R) {
    debug_assert!(!platforms.is_empty(), "level without platforms");
    if platforms.is_empty() {
        return;
    }
    let platform = &platforms[rng.random_range(0..platforms.len())];
    alien.pos.x = platform.right() + roll(rng, PATROL_WRAP_OFFSET_MIN, PATROL_WRAP_OFFSET_MAX);
    alien.pos.y = platform.top() - alien.size.y;
    alien.platform_id = platform.id;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::level_params;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn level(level: u32, seed: u64) -> (World, LevelParams, Viewport) {
        let params = level_params(level);
        let viewport = Viewport::default();
        let mut world = World::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        generate_level(&mut world, level, &params, &viewport, &mut rng);
        (world, params, viewport)
    }

    #[test]
    fn test_level_two_platform_ranges() {
        let (world, _, viewport) = level(2, 42);
        let generated = &world.platforms[1..];
        assert_eq!(generated.len(), 8);

        let mut prev_right = viewport.width;
        for p in generated {
            let gap = p.pos.x - prev_right;
            assert!((179.99..=250.01).contains(&gap), "gap {gap} out of range");
            assert!((160.0..=300.0).contains(&p.size.x), "width {} out of range", p.size.x);
            prev_right = p.right();
        }
    }

    #[test]
    fn test_platform_heights_follow_pattern() {
        let (world, params, viewport) = level(3, 9);
        for (i, p) in world.platforms[1..].iter().enumerate() {
            let expected = viewport.ground_top() + params.height_pattern[i % 8];
            assert_eq!(p.top(), expected.max(viewport.height - PLATFORM_MAX_RISE));
            assert!(p.top() >= viewport.height - PLATFORM_MAX_RISE);
            assert!(p.top() <= viewport.ground_top());
        }
    }

    #[test]
    fn test_ground_platform() {
        let (world, _, viewport) = level(1, 1);
        let ground = &world.platforms[0];
        assert_eq!(ground.id, PlatformId(0));
        assert_eq!(ground.pos, Vec2::new(0.0, viewport.height - 50.0));
        assert_eq!(ground.size.x, viewport.width);
    }

    #[test]
    fn test_tutorial_hazard_centered() {
        let (world, _, _) = level(1, 5);
        assert_eq!(world.hazards.len(), 1);
        let hazard = &world.hazards[0];
        let platform = &world.platforms[TUTORIAL_HAZARD_PLATFORM];
        assert_eq!(hazard.platform_id, platform.id);
        let hazard_center = hazard.pos.x + hazard.size.x / 2.0;
        let platform_center = platform.pos.x + platform.size.x / 2.0;
        assert!((hazard_center - platform_center).abs() < 1e-3);
        assert_eq!(hazard.pos.y, platform.top() - HAZARD_HEIGHT);
    }

    #[test]
    fn test_hazards_respect_safe_zone() {
        for lvl in [2, 3] {
            let (world, params, _) = level(lvl, 77);
            assert_eq!(world.hazards.len(), params.hazard_count);
            for h in &world.hazards {
                let p = world.platform(h.platform_id).expect("live platform");
                let safe = p.size.x * params.safe_zone;
                assert!(h.pos.x >= p.pos.x + safe);
                assert!(h.pos.x <= p.right() - safe - HAZARD_WIDTH);
            }
        }
    }

    #[test]
    fn test_hazard_spread_indices() {
        let params = level_params(3);
        // 10 platforms including ground: 2 + i * 6 / 5
        let indices: Vec<_> = (0..5).map(|i| hazard_platform_index(&params, i, 10)).collect();
        assert_eq!(indices, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_degenerate_safe_interior_skipped() {
        let params = level_params(2);
        let narrow = Platform {
            id: PlatformId(3),
            pos: Vec2::new(0.0, 500.0),
            // 0.3 * 40 * 2 + 20 > 40
            size: Vec2::new(40.0, PLATFORM_HEIGHT),
            color: PLATFORM_COLOR,
        };
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(hazard_x(&narrow, &params, &mut rng), None);
        assert_eq!(collectible_x(&narrow, &mut rng), None);
    }

    #[test]
    fn test_collectibles_inside_margin() {
        let (world, _, _) = level(2, 3);
        assert_eq!(world.collectibles.len(), LevelParams::collectible_count(2));
        for c in &world.collectibles {
            let p = world.platform(c.platform_id).expect("live platform");
            assert!(!c.collected);
            assert!(c.pos.x >= p.pos.x + COLLECTIBLE_MARGIN);
            assert!(c.pos.x <= p.right() - COLLECTIBLE_MARGIN + 1e-3);
            assert_eq!(c.pos.y, p.top() - COLLECTIBLE_LIFT);
        }
    }

    #[test]
    fn test_patrols_in_level_tail() {
        let (world, _, _) = level(1, 3);
        assert!(world.patrols.is_empty());
        assert!(world.pursuit.is_none());

        let (world, _, _) = level(3, 3);
        assert_eq!(world.patrols.len(), 3);
        // 10 platforms including ground: the last three
        let tail_start = 7;
        for alien in &world.patrols {
            assert!(alien.platform_id.0 >= tail_start);
            assert!((alien.speed - 0.85).abs() < 1e-5);
            let p = world.platform(alien.platform_id).expect("live platform");
            let offset = alien.pos.x - p.right();
            assert!((200.0..=400.0).contains(&offset));
        }
        let pursuit = world.pursuit.as_ref().expect("pursuit on level 3");
        assert!(!pursuit.active);
        assert_eq!(pursuit.pos.x, PURSUIT_SPAWN_X);
    }

    #[test]
    fn test_same_seed_same_level() {
        let (a, _, _) = level(3, 1234);
        let (b, _, _) = level(3, 1234);
        let xs = |w: &World| w.platforms.iter().map(|p| p.pos.x).collect::<Vec<_>>();
        assert_eq!(xs(&a), xs(&b));
    }

    #[test]
    fn test_recycle_reanchors_dependents() {
        let (mut world, params, _) = level(2, 11);
        let mut rng = Pcg32::seed_from_u64(99);

        // Push platform 2 fully off-screen left
        let target = PlatformId(2);
        let shift = world.platforms[2].right() + 1.0;
        world.platforms[2].pos.x -= shift;
        let end_before = world
            .platforms
            .iter()
            .filter(|p| p.id != target)
            .map(Platform::right)
            .fold(f32::MIN, f32::max);

        let recycled = recycle_platforms(&mut world, &params, &mut rng);
        assert_eq!(recycled, vec![target]);

        let p = world.platform(target).expect("still live").clone();
        let gap = p.pos.x - end_before;
        assert!(gap >= params.min_gap - 0.01 && gap <= params.max_gap + 0.01);

        let safe = p.size.x * params.safe_zone;
        for h in world.hazards.iter().filter(|h| h.platform_id == target) {
            assert!(h.pos.x >= p.pos.x + safe && h.pos.x <= p.right() - safe - HAZARD_WIDTH);
        }
        for c in world.collectibles.iter().filter(|c| c.platform_id == target) {
            assert!(c.pos.x >= p.pos.x + COLLECTIBLE_MARGIN);
            assert!(c.pos.x <= p.right() - COLLECTIBLE_MARGIN + 1e-3);
        }
    }

    #[test]
    fn test_recycle_reanchors_patrols() {
        let (mut world, params, _) = level(3, 11);
        let mut rng = Pcg32::seed_from_u64(5);

        let target = world.patrols[0].platform_id;
        let index = target.0 as usize;
        let shift = world.platforms[index].right() + 1.0;
        world.platforms[index].pos.x -= shift;

        let recycled = recycle_platforms(&mut world, &params, &mut rng);
        assert_eq!(recycled, vec![target]);

        let p = world.platform(target).expect("still live").clone();
        let riders: Vec<_> = world.patrols.iter().filter(|a| a.platform_id == target).collect();
        assert!(!riders.is_empty());
        for alien in riders {
            let offset = alien.pos.x - p.right();
            assert!(offset >= PATROL_SPAWN_OFFSET_MIN - 0.01);
            assert!(offset <= PATROL_SPAWN_OFFSET_MAX + 0.01);
            assert_eq!(alien.pos.y, p.top() - PATROL_HEIGHT);
        }
    }

    #[test]
    fn test_tutorial_reanchor_stays_centered() {
        let (mut world, params, _) = level(1, 8);
        let mut rng = Pcg32::seed_from_u64(1);
        let id = PlatformId(TUTORIAL_HAZARD_PLATFORM as u32);
        world.platforms[TUTORIAL_HAZARD_PLATFORM].pos.x = 3000.0;
        reanchor_dependents(&mut world, id, &params, &mut rng);
        let p = &world.platforms[TUTORIAL_HAZARD_PLATFORM];
        let h = &world.hazards[0];
        assert!((h.pos.x - (p.pos.x + p.size.x / 2.0 - HAZARD_WIDTH / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_patrol_lands_ahead() {
        let (mut world, _, _) = level(2, 4);
        let mut rng = Pcg32::seed_from_u64(4);
        let mut alien = world.patrols.remove(0);
        alien.pos.x = -100.0;
        wrap_patrol(&mut alien, &world.platforms, &mut rng);
        let p = world.platform(alien.platform_id).expect("live platform");
        let offset = alien.pos.x - p.right();
        assert!((200.0..=500.0).contains(&offset));
        assert_eq!(alien.pos.y, p.top() - PATROL_HEIGHT);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn recycled_platform_extends_runway(seed in 0u64..500, lvl in 1u32..=3, victim in 1usize..7) {
                let (mut world, params, _) = level(lvl, seed);
                let mut rng = Pcg32::seed_from_u64(seed ^ 0xabcd);
                let shift = world.platforms[victim].right() + 1.0;
                world.platforms[victim].pos.x -= shift;
                let furthest = world.runway_end().expect("platforms");

                recycle_platforms(&mut world, &params, &mut rng);

                let p = &world.platforms[victim];
                prop_assert!(p.pos.x > furthest);
                prop_assert_eq!(world.runway_end(), Some(p.right()));
            }
        }
    }
}
