use nalgebra as na;

use crate::config::MovementConfig;
use crate::constants::SUPPORT_SKIN;
use crate::player::player_aabb_at;
use crate::state::{GroundState, InputIntent, PlayerState};
use crate::types::{Aabb, Point3, Vec3};
use crate::world::WorldIndex;

/// Owns the player's state and advances it one frame at a time.
#[derive(Clone, Debug)]
pub struct LocomotionController {
    config: MovementConfig,
    state: PlayerState,
}

impl LocomotionController {
    /// A player standing at the origin with eyes at `player_height`, not yet grounded.
    pub fn new(config: MovementConfig) -> Self {
        let spawn = Vec3::new(0.0, config.player_height, 0.0);
        Self::with_state(config, PlayerState::new(spawn))
    }

    pub fn with_state(config: MovementConfig, state: PlayerState) -> Self {
        Self { config, state }
    }

    #[inline]
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Advance one frame.
    ///
    /// Behavior
    /// - Clamps `dt` to `[0, max_dt]`; a non-finite `dt` counts as zero.
    /// - Sets planar velocity from the yaw-rotated, normalized key direction (no inertia).
    /// - Integrates gravity; a jump request triggers only from the ground.
    /// - Clamps to the floor plane, then resolves X and Z independently so blocked
    ///   motion on one axis still slides along the other.
    /// - Pushes the player upward out of any remaining overlap, landing it on the
    ///   obstacle when it was not rising.
    /// - A player that is not rising and has an obstacle top just under its feet
    ///   stands on it: grounded, zero vertical velocity, resting a skin above it.
    pub fn step(&mut self, intent: &InputIntent, dt: f32, world: &WorldIndex) -> &PlayerState {
        let cfg = &self.config;
        let state = &mut self.state;
        let dt = clamp_dt(dt, cfg.max_dt);
        let old = state.position;

        // 1) + 2) Direction in world space.
        let dir = world_direction(intent);

        // 3) Sprint only while moving forward.
        let speed = if intent.sprint_active() {
            cfg.move_speed * cfg.sprint_multiplier
        } else {
            cfg.move_speed
        };

        // 4) Planar velocity is set, not accelerated.
        state.velocity.x = dir.x * speed;
        state.velocity.z = dir.z * speed;

        // 5) Gravity, then jump.
        state.velocity.y += cfg.gravity * dt;
        if intent.jump_requested && state.can_jump() {
            state.velocity.y = cfg.jump_velocity;
            state.ground = GroundState::Airborne;
        }

        // 6) Proposed position.
        let mut proposed = old + state.velocity * dt;

        // 7) Floor plane.
        if proposed.y <= cfg.player_height {
            proposed.y = cfg.player_height;
            state.velocity.y = 0.0;
            state.ground = GroundState::Grounded;
        } else {
            state.ground = GroundState::Airborne;
        }

        // 8) Planar collision, one axis at a time against the starting position.
        let held_y = proposed.y.max(old.y);

        let test_x = Vec3::new(proposed.x, held_y, old.z);
        if !world.within_bounds(test_x.x) || world.overlaps(&player_aabb_at(test_x, cfg)) {
            proposed.x = old.x;
            state.velocity.x = 0.0;
        }

        let test_z = Vec3::new(old.x, held_y, proposed.z);
        if !world.within_bounds(test_z.z) || world.overlaps(&player_aabb_at(test_z, cfg)) {
            proposed.z = old.z;
            state.velocity.z = 0.0;
        }

        // 9) Vertical overlap: head bump or landing on an obstacle.
        let mut embedded = false;
        if world.overlaps(&player_aabb_at(proposed, cfg)) {
            let rising = state.velocity.y > 0.0;
            state.velocity.y = state.velocity.y.min(0.0);

            match find_clear_height(proposed, cfg, world) {
                Some(y) => {
                    proposed.y = y;
                    if !rising {
                        state.velocity.y = 0.0;
                        state.ground = GroundState::Grounded;
                    }
                }
                None => {
                    embedded = true;
                    log::debug!(
                        "player embedded at ({:.2}, {:.2}, {:.2}); no clear height within {}",
                        proposed.x,
                        proposed.y,
                        proposed.z,
                        cfg.unstick_max_height
                    );
                }
            }
        }

        // Standing on an obstacle top counts as ground while not rising. The
        // player rests a skin above the highest supporting top.
        if !embedded && state.velocity.y <= 0.0 {
            if let Some(top) = world.highest_top(&support_probe(proposed, cfg)) {
                let rest_y = top + cfg.player_height + SUPPORT_SKIN;
                let rest = Vec3::new(proposed.x, rest_y, proposed.z);
                if !world.overlaps(&player_aabb_at(rest, cfg)) {
                    proposed.y = rest.y;
                }
                state.velocity.y = 0.0;
                state.ground = GroundState::Grounded;
            }
        }

        // 10) Commit.
        state.position = proposed;

        log::trace!(
            "step dt={dt:.4} pos=({:.3}, {:.3}, {:.3}) vel=({:.3}, {:.3}, {:.3}) ground={:?}",
            state.position.x,
            state.position.y,
            state.position.z,
            state.velocity.x,
            state.velocity.y,
            state.velocity.z,
            state.ground
        );

        &self.state
    }
}

#[inline]
fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_finite() { dt.clamp(0.0, max_dt) } else { 0.0 }
}

/// Normalized local key direction rotated by the look yaw about +Y.
///
/// Returns zero when no (net) movement key is held.
fn world_direction(intent: &InputIntent) -> Vec3 {
    let local = intent.local_direction();
    let len_sq = local.norm_squared();
    if len_sq <= 0.0 {
        return Vec3::zeros();
    }

    let yaw = na::UnitQuaternion::from_axis_angle(&na::Vector3::y_axis(), intent.look_yaw);
    yaw * (local / len_sq.sqrt())
}

/// First height at or above `pos.y`, in `unstick_step` increments up to
/// `unstick_max_height`, where the player's box is clear of every obstacle.
fn find_clear_height(pos: Vec3, cfg: &MovementConfig, world: &WorldIndex) -> Option<f32> {
    (0..=cfg.unstick_steps())
        .map(|k| pos.y + k as f32 * cfg.unstick_step)
        .find(|&y| !world.overlaps(&player_aabb_at(Vec3::new(pos.x, y, pos.z), cfg)))
}

/// Thin slab under the player's feet, same footprint as its box.
fn support_probe(pos: Vec3, cfg: &MovementConfig) -> Aabb {
    let r = cfg.player_radius;
    let feet = pos.y - cfg.player_height;
    Aabb::new(
        Point3::new(pos.x - r, feet - cfg.support_probe_depth, pos.z - r),
        Point3::new(pos.x + r, feet, pos.z + r),
    )
}
