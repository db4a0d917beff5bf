/*!
Core data types shared by the world index and the locomotion controller.

This module intentionally contains no algorithms. Geometry uses nalgebra for
vectors and parry's `Aabb` (re-exported by rapier3d) for bounding volumes, so
the same box type flows from world construction through to overlap queries.
*/

use nalgebra as na;

pub use rapier3d::parry::bounding_volume::{Aabb, BoundingVolume};

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Point3 = na::Point3<f32>;

/// Build an `Aabb` from a center and half-extents.
#[inline]
pub fn aabb_from_center(center: Vec3, half_extents: Vec3) -> Aabb {
    Aabb::from_half_extents(Point3::from(center), half_extents)
}

/// Which side of the room a wall closes.
///
/// Forward motion is toward −Z, so the front wall sits at −Z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallSide {
    /// −X
    Left,
    /// +X
    Right,
    /// −Z
    Front,
    /// +Z
    Back,
    Ceiling,
}

impl WallSide {
    pub const ALL: [WallSide; 5] = [
        WallSide::Left,
        WallSide::Right,
        WallSide::Front,
        WallSide::Back,
        WallSide::Ceiling,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollidableKind {
    Wall(WallSide),
    /// Cubic obstacle raised by `level` block heights above the floor.
    Block { level: u32 },
}

/// A static obstacle. Its box is computed once when the world is built.
#[derive(Clone, Copy, Debug)]
pub struct Collidable {
    pub kind: CollidableKind,
    pub aabb: Aabb,
}

impl Collidable {
    #[inline]
    pub fn new(kind: CollidableKind, aabb: Aabb) -> Self {
        Self { kind, aabb }
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        matches!(self.kind, CollidableKind::Wall(_))
    }

    /// Test this obstacle's box against `query`. Touching faces count as overlap.
    #[inline]
    pub fn overlaps(&self, query: &Aabb) -> bool {
        self.aabb.intersects(query)
    }
}
