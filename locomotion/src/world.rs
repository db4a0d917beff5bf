/*!
Static world index: the walls, ceiling and scattered blocks the player collides with.

The index is built once and never mutated. Every obstacle's AABB is computed at
build time and stored in a parry `Bvh`, so [`WorldIndex::overlaps`] only
confirms the handful of candidates whose leaves intersect the query box.
*/

use rand::{Rng, SeedableRng, rngs::StdRng};
use rapier3d::parry::partitioning::{Bvh, BvhBuildStrategy};

use crate::config::WorldConfig;
use crate::constants::BOUNDARY_MARGIN;
use crate::error::ConfigError;
use crate::types::{Aabb, Collidable, CollidableKind, Vec3, WallSide, aabb_from_center};

/// Immutable set of collidables plus a broad-phase over their boxes.
pub struct WorldIndex {
    collidables: Vec<Collidable>,
    bvh: Bvh,
    half_size: f32,
}

impl WorldIndex {
    /// Build the room described by `config`, drawing block positions from `rng`.
    pub fn build<R: Rng>(config: &WorldConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut collidables = Vec::with_capacity(WallSide::ALL.len() + config.block_count);
        collidables.extend(build_walls(config));
        collidables.extend((0..config.block_count).map(|_| place_block(config, rng)));

        let index = Self::from_collidables(collidables, config.half_size);
        log::info!(
            "world built: {} walls, {} blocks, half size {}",
            index.walls().count(),
            index.blocks().count(),
            index.half_size
        );
        Ok(index)
    }

    /// Build with a `StdRng` seeded from `seed`. The same seed always yields the same world.
    pub fn generate(config: &WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::build(config, &mut rng)
    }

    /// Index an explicit set of obstacles inside a room of half-extent `half_size`.
    pub fn from_collidables(collidables: Vec<Collidable>, half_size: f32) -> Self {
        let leaves: Vec<Aabb> = collidables.iter().map(|c| c.aabb).collect();
        let bvh = Bvh::from_leaves(BvhBuildStrategy::Binned, &leaves);

        Self {
            collidables,
            bvh,
            half_size,
        }
    }

    /// True iff `query` intersects any collidable's box (touching counts).
    pub fn overlaps(&self, query: &Aabb) -> bool {
        self.bvh
            .intersect_aabb(query)
            .any(|leaf| self.collidables[leaf as usize].overlaps(query))
    }

    /// Highest top face among the collidables `query` intersects.
    pub fn highest_top(&self, query: &Aabb) -> Option<f32> {
        self.bvh
            .intersect_aabb(query)
            .map(|leaf| &self.collidables[leaf as usize])
            .filter(|c| c.overlaps(query))
            .map(|c| c.aabb.maxs.y)
            .reduce(f32::max)
    }

    /// Whether a planar coordinate lies within the walkable bound
    /// `|coord| <= half_size - BOUNDARY_MARGIN`.
    #[inline]
    pub fn within_bounds(&self, coord: f32) -> bool {
        coord.abs() <= self.bound()
    }

    #[inline]
    pub fn bound(&self) -> f32 {
        self.half_size - BOUNDARY_MARGIN
    }

    #[inline]
    pub fn half_size(&self) -> f32 {
        self.half_size
    }

    #[inline]
    pub fn collidables(&self) -> &[Collidable] {
        &self.collidables
    }

    pub fn walls(&self) -> impl Iterator<Item = &Collidable> {
        self.collidables.iter().filter(|c| c.is_wall())
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Collidable> {
        self.collidables.iter().filter(|c| !c.is_wall())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.collidables.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.collidables.is_empty()
    }
}

/// The four side walls and the ceiling.
///
/// Front/back walls are `2 * thickness` longer than the room so they cover the
/// corners left open by the side walls.
fn build_walls(config: &WorldConfig) -> [Collidable; 5] {
    let h = config.half_size;
    let t = config.walls.thickness;
    let height = config.walls.height;
    let base = config.walls.base_y;

    let center_y = base + height * 0.5;
    let span = h + t;
    let offset = h + t * 0.5;

    let wall = |side, center: Vec3, half: Vec3| {
        Collidable::new(CollidableKind::Wall(side), aabb_from_center(center, half))
    };

    [
        wall(
            WallSide::Left,
            Vec3::new(-offset, center_y, 0.0),
            Vec3::new(t * 0.5, height * 0.5, h),
        ),
        wall(
            WallSide::Right,
            Vec3::new(offset, center_y, 0.0),
            Vec3::new(t * 0.5, height * 0.5, h),
        ),
        wall(
            WallSide::Front,
            Vec3::new(0.0, center_y, -offset),
            Vec3::new(span, height * 0.5, t * 0.5),
        ),
        wall(
            WallSide::Back,
            Vec3::new(0.0, center_y, offset),
            Vec3::new(span, height * 0.5, t * 0.5),
        ),
        // Flush with the top of the side walls.
        wall(
            WallSide::Ceiling,
            Vec3::new(0.0, base + height - t * 0.5, 0.0),
            Vec3::new(span, t * 0.5, span),
        ),
    ]
}

/// Draw one block inside the padded interior, snapped to the block grid.
///
/// Draws whose footprint would touch the spawn clearance square are rejected
/// and redrawn. `WorldConfig::validate` guarantees a position outside it exists.
fn place_block<R: Rng>(config: &WorldConfig, rng: &mut R) -> Collidable {
    let size = config.block_size;
    let half = size * 0.5;
    let inner = config.interior_half_width();

    loop {
        let x = rng.gen_range(-inner..inner);
        let z = rng.gen_range(-inner..inner);
        let level = if rng.gen_bool(config.stack_probability) {
            rng.gen_range(0..config.max_stack_levels)
        } else {
            0
        };

        let cx = snap_to_grid(x, size);
        let cz = snap_to_grid(z, size);
        if in_spawn_clearance(cx, cz, half, config.spawn_clearance) {
            continue;
        }

        let cy = half + level as f32 * size;
        return Collidable::new(
            CollidableKind::Block { level },
            aabb_from_center(Vec3::new(cx, cy, cz), Vec3::new(half, half, half)),
        );
    }
}

#[inline]
fn snap_to_grid(v: f32, size: f32) -> f32 {
    (v / size).round() * size
}

/// Does a block footprint centered at (cx, cz) reach into the square `[-c, c]²`?
#[inline]
fn in_spawn_clearance(cx: f32, cz: f32, half: f32, clearance: f32) -> bool {
    clearance > 0.0 && cx.abs() - half < clearance && cz.abs() - half < clearance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point3;

    fn small_config() -> WorldConfig {
        WorldConfig {
            block_count: 200,
            ..WorldConfig::default()
        }
    }

    fn wall(index: &WorldIndex, side: WallSide) -> Aabb {
        index
            .walls()
            .find(|c| c.kind == CollidableKind::Wall(side))
            .map(|c| c.aabb)
            .unwrap()
    }

    #[test]
    fn builds_five_walls_and_requested_blocks() {
        let index = WorldIndex::generate(&small_config(), 7).unwrap();
        assert_eq!(index.walls().count(), 5);
        assert_eq!(index.blocks().count(), 200);
        assert_eq!(index.len(), 205);
    }

    #[test]
    fn walls_close_the_room() {
        let index = WorldIndex::generate(&WorldConfig::empty_room(50.0), 0).unwrap();

        let left = wall(&index, WallSide::Left);
        assert!((left.maxs.x + 50.0).abs() < 1.0e-4);
        assert!((left.mins.x + 52.0).abs() < 1.0e-4);
        assert!((left.mins.y + 0.5).abs() < 1.0e-4);
        assert!((left.maxs.y - 29.5).abs() < 1.0e-4);

        let right = wall(&index, WallSide::Right);
        assert!((right.mins.x - 50.0).abs() < 1.0e-4);

        // Front/back extend past the side walls to close the corners.
        let front = wall(&index, WallSide::Front);
        assert!((front.maxs.z + 50.0).abs() < 1.0e-4);
        assert!(front.mins.x <= left.mins.x + 1.0e-4);
        assert!(front.maxs.x >= right.maxs.x - 1.0e-4);

        let back = wall(&index, WallSide::Back);
        assert!((back.mins.z - 50.0).abs() < 1.0e-4);

        let ceiling = wall(&index, WallSide::Ceiling);
        assert!((ceiling.maxs.y - 29.5).abs() < 1.0e-4);
        assert!((ceiling.mins.y - 27.5).abs() < 1.0e-4);
        assert!(ceiling.mins.x <= front.mins.x + 1.0e-4);
        assert!(ceiling.maxs.z >= back.maxs.z - 1.0e-4);
    }

    #[test]
    fn corners_leave_no_gap() {
        let index = WorldIndex::generate(&WorldConfig::empty_room(50.0), 0).unwrap();
        // A thin probe just outside each interior corner must hit a wall.
        for (x, z) in [(50.5, 50.5), (-50.5, 50.5), (50.5, -50.5), (-50.5, -50.5)] {
            let probe = aabb_from_center(Vec3::new(x, 10.0, z), Vec3::new(0.05, 0.05, 0.05));
            assert!(index.overlaps(&probe), "gap at corner ({x}, {z})");
        }
    }

    #[test]
    fn blocks_are_snapped_and_inside_the_padded_interior() {
        let cfg = small_config();
        let index = WorldIndex::generate(&cfg, 99).unwrap();
        let inner = cfg.interior_half_width();

        for block in index.blocks() {
            let center = block.aabb.center();
            for v in [center.x, center.z] {
                let cells = v / cfg.block_size;
                assert!((cells - cells.round()).abs() < 1.0e-4, "{v} is off grid");
                assert!(v.abs() <= inner + cfg.block_size * 0.5 + 1.0e-4);
            }

            let half = block.aabb.half_extents();
            assert!((half.x - 1.0).abs() < 1.0e-5);
            assert!((half.y - 1.0).abs() < 1.0e-5);
            assert!((half.z - 1.0).abs() < 1.0e-5);
        }
    }

    #[test]
    fn block_levels_follow_stacking_rules() {
        let cfg = WorldConfig {
            block_count: 500,
            stack_probability: 1.0,
            ..WorldConfig::default()
        };
        let index = WorldIndex::generate(&cfg, 3).unwrap();

        let mut seen = [false; 3];
        for block in index.blocks() {
            let CollidableKind::Block { level } = block.kind else {
                unreachable!()
            };
            assert!(level < 3);
            seen[level as usize] = true;

            let expected_bottom = level as f32 * cfg.block_size;
            assert!((block.aabb.mins.y - expected_bottom).abs() < 1.0e-4);
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn zero_probability_keeps_blocks_on_the_floor() {
        let cfg = WorldConfig {
            stack_probability: 0.0,
            ..small_config()
        };
        let index = WorldIndex::generate(&cfg, 11).unwrap();
        assert!(index.blocks().all(|b| b.aabb.mins.y.abs() < 1.0e-5));
    }

    #[test]
    fn spawn_clearance_is_respected() {
        let cfg = WorldConfig {
            block_count: 1000,
            padding: 40.0,
            spawn_clearance: 3.0,
            ..WorldConfig::default()
        };
        let index = WorldIndex::generate(&cfg, 5).unwrap();

        let spawn_zone = Aabb::new(Point3::new(-2.9, 0.0, -2.9), Point3::new(2.9, 20.0, 2.9));
        assert!(!index.overlaps(&spawn_zone));
    }

    #[test]
    fn same_seed_builds_the_same_world() {
        let cfg = small_config();
        let a = WorldIndex::generate(&cfg, 42).unwrap();
        let b = WorldIndex::generate(&cfg, 42).unwrap();

        for (ca, cb) in a.collidables().iter().zip(b.collidables()) {
            assert_eq!(ca.aabb, cb.aabb);
            assert_eq!(ca.kind, cb.kind);
        }
    }

    #[test]
    fn build_rejects_invalid_config() {
        let cfg = WorldConfig {
            block_size: -1.0,
            ..WorldConfig::default()
        };
        assert!(WorldIndex::generate(&cfg, 0).is_err());
    }

    #[test]
    fn overlaps_finds_a_hand_placed_block() {
        let block = Collidable::new(
            CollidableKind::Block { level: 0 },
            aabb_from_center(Vec3::new(5.0, 1.0, 5.0), Vec3::new(1.0, 1.0, 1.0)),
        );
        let index = WorldIndex::from_collidables(vec![block], 50.0);

        let hit = aabb_from_center(Vec3::new(5.5, 1.0, 5.5), Vec3::new(0.6, 1.0, 0.6));
        let miss = aabb_from_center(Vec3::new(-5.0, 1.0, 5.0), Vec3::new(0.6, 1.0, 0.6));
        assert!(index.overlaps(&hit));
        assert!(!index.overlaps(&miss));
    }

    #[test]
    fn highest_top_picks_the_tallest_support() {
        let cube = |y: f32, level| {
            Collidable::new(
                CollidableKind::Block { level },
                aabb_from_center(Vec3::new(0.0, y, 0.0), Vec3::new(1.0, 1.0, 1.0)),
            )
        };
        let index = WorldIndex::from_collidables(vec![cube(1.0, 0), cube(3.0, 1)], 50.0);

        let slab = Aabb::new(Point3::new(-0.5, 3.9, -0.5), Point3::new(0.5, 4.05, 0.5));
        assert_eq!(index.highest_top(&slab), Some(4.0));

        let above = Aabb::new(Point3::new(-0.5, 4.5, -0.5), Point3::new(0.5, 4.6, 0.5));
        assert_eq!(index.highest_top(&above), None);
    }

    #[test]
    fn empty_index_never_overlaps() {
        let index = WorldIndex::from_collidables(Vec::new(), 50.0);
        assert!(index.is_empty());
        let query = aabb_from_center(Vec3::zeros(), Vec3::new(100.0, 100.0, 100.0));
        assert!(!index.overlaps(&query));
    }

    #[test]
    fn bounds_use_the_margin() {
        let index = WorldIndex::from_collidables(Vec::new(), 50.0);
        assert!(index.within_bounds(49.0));
        assert!(index.within_bounds(-49.0));
        assert!(!index.within_bounds(49.01));
    }

    #[test]
    fn snap_rounds_to_nearest_cell() {
        assert_eq!(snap_to_grid(3.2, 2.0), 4.0);
        assert_eq!(snap_to_grid(2.9, 2.0), 2.0);
        assert_eq!(snap_to_grid(-3.2, 2.0), -4.0);
    }
}
