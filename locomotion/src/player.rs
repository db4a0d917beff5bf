use crate::config::MovementConfig;
use crate::types::{Aabb, Point3, Vec3};

/// The player's collision box when its position (eye point) is at `pos`.
///
/// A short box standing in for a capsule: `player_radius` on X/Z, reaching
/// `player_height` below the position and `head_clearance_fraction * player_height`
/// above it.
#[inline]
pub fn player_aabb_at(pos: Vec3, config: &MovementConfig) -> Aabb {
    let r = config.player_radius;
    let head = config.player_height * config.head_clearance_fraction;
    Aabb::new(
        Point3::new(pos.x - r, pos.y - config.player_height, pos.z - r),
        Point3::new(pos.x + r, pos.y + head, pos.z + r),
    )
}
