//! One play session: the static world plus the player walking through it.

use crate::config::{MovementConfig, WorldConfig};
use crate::controller::LocomotionController;
use crate::error::ConfigError;
use crate::state::{InputIntent, PlayerState};
use crate::types::Vec3;
use crate::world::WorldIndex;

/// Owns the world index and the controller for the lifetime of a session.
///
/// The host calls [`Simulation::frame`] once per rendered frame and places its
/// camera rig at the returned position. The rig never writes back.
pub struct Simulation {
    world: WorldIndex,
    controller: LocomotionController,
}

impl Simulation {
    /// Validate both configurations, build the world from `seed` and spawn the player.
    pub fn new(
        world_config: WorldConfig,
        movement_config: MovementConfig,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let world = WorldIndex::generate(&world_config, seed)?;
        Self::with_world(world, movement_config)
    }

    /// Spawn the player into an already built world.
    pub fn with_world(
        world: WorldIndex,
        movement_config: MovementConfig,
    ) -> Result<Self, ConfigError> {
        movement_config.validate()?;
        let controller = LocomotionController::new(movement_config);
        log::info!(
            "session started: {} collidables, spawn at {:?}",
            world.len(),
            controller.state().position
        );
        Ok(Self { world, controller })
    }

    /// Advance one frame and return the committed position for the renderer.
    pub fn frame(&mut self, intent: &InputIntent, dt: f32) -> Vec3 {
        self.controller.step(intent, dt, &self.world).position
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.controller.state().position
    }

    #[inline]
    pub fn player(&self) -> &PlayerState {
        self.controller.state()
    }

    #[inline]
    pub fn world(&self) -> &WorldIndex {
        &self.world
    }
}
