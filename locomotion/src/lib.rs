//! Movement and collision core for a first-person walk through a walled room
//! of scattered blocks.
//!
//! - [`WorldIndex`]: immutable walls, ceiling and blocks, queried with [`WorldIndex::overlaps`].
//! - [`LocomotionController`]: gravity, jumping and axis-separated collision, one step per frame.
//! - [`InputState`]: held keys, jump edge and the double-tap sprint gesture.
//! - [`Simulation`]: a session pairing the two for the host's frame loop.

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod input;
pub mod logging;
pub mod player;
pub mod simulation;
pub mod state;
pub mod types;
pub mod world;

pub use config::{MovementConfig, WallSpec, WorldConfig};
pub use constants::{
    BLOCK_SIZE, GRAVITY, JUMP_VELOCITY, MAX_STEP_DT, MOVE_SPEED, NUM_BLOCKS, PLAYER_HEIGHT,
    PLAYER_RADIUS, SPRINT_MULTIPLIER, WORLD_HALF_SIZE,
};
pub use controller::LocomotionController;
pub use error::ConfigError;
pub use input::{InputState, MoveKey, MoveKeys};
pub use logging::init as init_logging;
pub use player::player_aabb_at;
pub use simulation::Simulation;
pub use state::{GroundState, InputIntent, PlayerState};
pub use types::{Aabb, Collidable, CollidableKind, Vec3, WallSide, aabb_from_center};
pub use world::WorldIndex;
