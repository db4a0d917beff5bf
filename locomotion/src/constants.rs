use std::time::Duration;

/// Half-extent of the playable room on X and Z (meters).
///
/// The room interior spans `-WORLD_HALF_SIZE..=WORLD_HALF_SIZE` on both planar axes.
pub const WORLD_HALF_SIZE: f32 = 50.0;

/// Distance kept between the player's center and the room's inner wall faces (meters).
///
/// The controller rejects planar motion once `|x|` or `|z|` would exceed
/// `WORLD_HALF_SIZE - BOUNDARY_MARGIN`.
pub const BOUNDARY_MARGIN: f32 = 1.0;

/// Thickness of each wall and of the ceiling slab (meters).
pub const WALL_THICKNESS: f32 = 2.0;

/// Height of the side walls (meters).
pub const WALL_HEIGHT: f32 = 30.0;

/// Y of the bottom face of every wall.
///
/// The floor is a 1 m slab whose top sits at y = 0; walls start half-way into it.
pub const WALL_BASE_Y: f32 = -0.5;

/// Number of obstacle blocks scattered through the room.
pub const NUM_BLOCKS: usize = 1000;

/// Edge length of a cubic obstacle block (meters). Block centers snap to this grid.
pub const BLOCK_SIZE: f32 = 2.0;

/// Border kept free of blocks along each wall (meters).
pub const BLOCK_PADDING: f32 = 6.0;

/// Chance that a block is considered for stacking.
pub const STACK_PROBABILITY: f64 = 0.18;

/// Number of elevation levels a stacked block may take (`0..MAX_STACK_LEVELS` block heights).
pub const MAX_STACK_LEVELS: u32 = 3;

/// Half-width of the square around the origin that no block footprint may touch (meters).
///
/// Keeps the spawn point from starting inside an obstacle. Zero disables the check.
pub const SPAWN_CLEARANCE: f32 = 2.0;

/// Eye height above the floor; also the vertical distance from the player's
/// position down to the bottom of its bounding volume (meters).
pub const PLAYER_HEIGHT: f32 = 2.0;

/// Planar half-extent of the player's bounding volume (meters).
pub const PLAYER_RADIUS: f32 = 0.6;

/// Fraction of `PLAYER_HEIGHT` the bounding volume extends above the player's position.
pub const HEAD_CLEARANCE_FRACTION: f32 = 0.1;

/// Vertical acceleration in meters per second squared (negative is down).
pub const GRAVITY: f32 = -30.0;

/// Vertical velocity set when a jump triggers (meters per second).
pub const JUMP_VELOCITY: f32 = 12.0;

/// Walking speed (meters per second).
pub const MOVE_SPEED: f32 = 8.0;

/// Speed multiplier applied while sprinting forward.
pub const SPRINT_MULTIPLIER: f32 = 1.9;

/// Largest time step the controller integrates in one call (seconds).
///
/// Long frames (tab stalls, hitches) are truncated to this so a single step can
/// never carry the player through a block.
pub const MAX_STEP_DT: f32 = 0.05;

/// Increment used when searching upward for a position clear of obstacles (meters).
pub const UNSTICK_STEP: f32 = 0.1;

/// Highest offset tried by the upward search before giving up (meters).
pub const UNSTICK_MAX_HEIGHT: f32 = 2.0;

/// Depth of the probe below the feet that detects standing on an obstacle top (meters).
pub const SUPPORT_PROBE_DEPTH: f32 = 0.15;

/// Gap kept between the feet and the obstacle top a player stands on (meters).
///
/// Touching faces count as overlap, so a resting player hovers this far above the top.
pub const SUPPORT_SKIN: f32 = 0.01;

/// Most increments the upward search may take in one step.
pub const MAX_UNSTICK_STEPS: u32 = 1000;

/// Two forward presses closer together than this turn sprint on.
pub const SPRINT_DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);
