/*!
Startup configuration for the world builder and the locomotion controller.

Defaults come from [`crate::constants`]. Both structs deserialize with
`#[serde(default)]`, so a host only has to provide the fields it wants to
override. Call `validate()` (or go through [`crate::Simulation::new`]) before
using a configuration that did not come from `Default`.
*/

use serde::{Deserialize, Serialize};

use crate::constants::{
    BLOCK_PADDING, BLOCK_SIZE, BOUNDARY_MARGIN, GRAVITY, HEAD_CLEARANCE_FRACTION, JUMP_VELOCITY,
    MAX_STACK_LEVELS, MAX_STEP_DT, MAX_UNSTICK_STEPS, MOVE_SPEED, NUM_BLOCKS, PLAYER_HEIGHT,
    PLAYER_RADIUS, SPAWN_CLEARANCE, SPRINT_MULTIPLIER, STACK_PROBABILITY, SUPPORT_PROBE_DEPTH,
    UNSTICK_MAX_HEIGHT, UNSTICK_STEP, WALL_BASE_Y, WALL_HEIGHT, WALL_THICKNESS, WORLD_HALF_SIZE,
};
use crate::error::ConfigError;

/// Dimensions of the walls and ceiling enclosing the room.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallSpec {
    /// Thickness of each wall and of the ceiling slab (meters).
    pub thickness: f32,
    /// Height of the side walls (meters).
    pub height: f32,
    /// Y of the bottom face of the walls.
    pub base_y: f32,
}

impl Default for WallSpec {
    fn default() -> Self {
        Self {
            thickness: WALL_THICKNESS,
            height: WALL_HEIGHT,
            base_y: WALL_BASE_Y,
        }
    }
}

/// Parameters for [`WorldIndex::build`](crate::WorldIndex::build).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Half-extent of the room on X and Z (meters).
    pub half_size: f32,
    pub walls: WallSpec,
    /// Number of obstacle blocks to scatter.
    pub block_count: usize,
    /// Edge length of a block; also the placement grid (meters).
    pub block_size: f32,
    /// Border along each wall that stays free of blocks (meters).
    pub padding: f32,
    /// Chance that a block is considered for stacking.
    pub stack_probability: f64,
    /// Stacked blocks are raised by `0..max_stack_levels` block heights.
    pub max_stack_levels: u32,
    /// Half-width of the block-free square around the spawn point. Zero disables it.
    pub spawn_clearance: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            half_size: WORLD_HALF_SIZE,
            walls: WallSpec::default(),
            block_count: NUM_BLOCKS,
            block_size: BLOCK_SIZE,
            padding: BLOCK_PADDING,
            stack_probability: STACK_PROBABILITY,
            max_stack_levels: MAX_STACK_LEVELS,
            spawn_clearance: SPAWN_CLEARANCE,
        }
    }
}

impl WorldConfig {
    /// An empty room: walls and ceiling only.
    pub fn empty_room(half_size: f32) -> Self {
        Self {
            half_size,
            block_count: 0,
            ..Self::default()
        }
    }

    /// Largest `|x|` / `|z|` the player's center may reach.
    #[inline]
    pub fn bound(&self) -> f32 {
        self.half_size - BOUNDARY_MARGIN
    }

    /// Half-width of the square in which block centers are drawn.
    #[inline]
    pub fn interior_half_width(&self) -> f32 {
        self.half_size - self.padding
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("half_size", self.half_size)?;
        finite("walls.thickness", self.walls.thickness)?;
        finite("walls.height", self.walls.height)?;
        finite("walls.base_y", self.walls.base_y)?;
        finite("block_size", self.block_size)?;
        finite("padding", self.padding)?;
        finite("spawn_clearance", self.spawn_clearance)?;

        positive("walls.thickness", self.walls.thickness)?;
        positive("walls.height", self.walls.height)?;
        positive("block_size", self.block_size)?;
        non_negative("padding", self.padding)?;
        non_negative("spawn_clearance", self.spawn_clearance)?;

        if self.bound() <= 0.0 {
            return Err(ConfigError::RoomTooSmall {
                half_size: self.half_size,
                margin: BOUNDARY_MARGIN,
            });
        }

        if !(0.0..=1.0).contains(&self.stack_probability) {
            return Err(ConfigError::ProbabilityOutOfRange(self.stack_probability));
        }
        if self.max_stack_levels == 0 {
            return Err(ConfigError::NoStackLevels);
        }

        // Only matters when blocks are actually placed.
        if self.block_count > 0 {
            let interior = self.interior_half_width();
            if interior <= 0.0 {
                return Err(ConfigError::PaddingTooLarge {
                    padding: self.padding,
                    half_size: self.half_size,
                });
            }
            if self.spawn_clearance > 0.0 && self.spawn_clearance + self.block_size >= interior {
                return Err(ConfigError::SpawnClearanceTooLarge {
                    clearance: self.spawn_clearance,
                    block_size: self.block_size,
                    interior,
                });
            }
        }

        Ok(())
    }
}

/// Tuning for [`LocomotionController`](crate::LocomotionController).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Eye height above the floor; the bounding volume extends this far below the position.
    pub player_height: f32,
    /// Planar half-extent of the bounding volume.
    pub player_radius: f32,
    /// Fraction of `player_height` the bounding volume extends above the position.
    pub head_clearance_fraction: f32,
    /// Vertical acceleration (negative is down).
    pub gravity: f32,
    pub jump_velocity: f32,
    pub move_speed: f32,
    pub sprint_multiplier: f32,
    /// Per-step cap on `dt` (seconds).
    pub max_dt: f32,
    /// Increment of the upward search that resolves vertical overlaps.
    pub unstick_step: f32,
    /// Highest offset the upward search tries.
    pub unstick_max_height: f32,
    /// How far below the feet an obstacle top still counts as support.
    pub support_probe_depth: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            player_height: PLAYER_HEIGHT,
            player_radius: PLAYER_RADIUS,
            head_clearance_fraction: HEAD_CLEARANCE_FRACTION,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            move_speed: MOVE_SPEED,
            sprint_multiplier: SPRINT_MULTIPLIER,
            max_dt: MAX_STEP_DT,
            unstick_step: UNSTICK_STEP,
            unstick_max_height: UNSTICK_MAX_HEIGHT,
            support_probe_depth: SUPPORT_PROBE_DEPTH,
        }
    }
}

impl MovementConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("player_height", self.player_height),
            ("player_radius", self.player_radius),
            ("head_clearance_fraction", self.head_clearance_fraction),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("move_speed", self.move_speed),
            ("sprint_multiplier", self.sprint_multiplier),
            ("max_dt", self.max_dt),
            ("unstick_step", self.unstick_step),
            ("unstick_max_height", self.unstick_max_height),
            ("support_probe_depth", self.support_probe_depth),
        ];
        for (field, value) in fields {
            finite(field, value)?;
        }

        positive("player_height", self.player_height)?;
        positive("player_radius", self.player_radius)?;
        positive("max_dt", self.max_dt)?;
        positive("unstick_step", self.unstick_step)?;
        positive("sprint_multiplier", self.sprint_multiplier)?;
        non_negative("head_clearance_fraction", self.head_clearance_fraction)?;
        non_negative("jump_velocity", self.jump_velocity)?;
        non_negative("move_speed", self.move_speed)?;
        non_negative("unstick_max_height", self.unstick_max_height)?;
        non_negative("support_probe_depth", self.support_probe_depth)?;

        let steps = (self.unstick_max_height / self.unstick_step).round();
        if steps > MAX_UNSTICK_STEPS as f32 {
            return Err(ConfigError::UnstickSearchTooLong {
                step: self.unstick_step,
                max_height: self.unstick_max_height,
                limit: MAX_UNSTICK_STEPS,
            });
        }

        Ok(())
    }

    /// Number of increments the upward search tries after the zero offset,
    /// never more than [`MAX_UNSTICK_STEPS`].
    #[inline]
    pub fn unstick_steps(&self) -> u32 {
        let steps = (self.unstick_max_height / self.unstick_step).round();
        if steps.is_nan() {
            0
        } else {
            (steps as u32).min(MAX_UNSTICK_STEPS)
        }
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(WorldConfig::default().validate(), Ok(()));
        assert_eq!(MovementConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_bound_sits_one_meter_inside_the_walls() {
        let cfg = WorldConfig::default();
        assert!((cfg.bound() - 49.0).abs() < 1.0e-6);
    }

    #[test]
    fn rejects_non_finite_half_size() {
        let cfg = WorldConfig {
            half_size: f32::NAN,
            ..WorldConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotFinite {
                field: "half_size",
                ..
            })
        ));
    }

    #[test]
    fn rejects_room_inside_boundary_margin() {
        let cfg = WorldConfig::empty_room(0.5);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::RoomTooSmall { .. })
        ));
    }

    #[test]
    fn rejects_padding_that_swallows_the_interior() {
        let cfg = WorldConfig {
            padding: 60.0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::PaddingTooLarge { .. })
        ));
    }

    #[test]
    fn padding_is_irrelevant_without_blocks() {
        let cfg = WorldConfig {
            padding: 60.0,
            ..WorldConfig::empty_room(50.0)
        };
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn rejects_spawn_clearance_covering_the_interior() {
        let cfg = WorldConfig {
            spawn_clearance: 43.0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::SpawnClearanceTooLarge { .. })
        ));
    }

    #[test]
    fn rejects_probability_above_one() {
        let cfg = WorldConfig {
            stack_probability: 1.5,
            ..WorldConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ProbabilityOutOfRange(1.5)));
    }

    #[test]
    fn rejects_zero_stack_levels() {
        let cfg = WorldConfig {
            max_stack_levels: 0,
            ..WorldConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NoStackLevels));
    }

    #[test]
    fn rejects_non_positive_block_size() {
        let cfg = WorldConfig {
            block_size: 0.0,
            ..WorldConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotPositive {
                field: "block_size",
                ..
            })
        ));
    }

    #[test]
    fn rejects_bad_movement_fields() {
        let cfg = MovementConfig {
            player_radius: -0.1,
            ..MovementConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotPositive {
                field: "player_radius",
                ..
            })
        ));

        let cfg = MovementConfig {
            max_dt: f32::INFINITY,
            ..MovementConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotFinite {
                field: "max_dt",
                ..
            })
        ));
    }

    #[test]
    fn default_unstick_search_covers_twenty_increments() {
        assert_eq!(MovementConfig::default().unstick_steps(), 20);
    }

    #[test]
    fn rejects_an_unbounded_unstick_search() {
        let cfg = MovementConfig {
            unstick_step: 1.0e-9,
            ..MovementConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::UnstickSearchTooLong { limit: 1000, .. })
        ));
        assert_eq!(cfg.unstick_steps(), MAX_UNSTICK_STEPS);

        let at_limit = MovementConfig {
            unstick_step: 0.002,
            ..MovementConfig::default()
        };
        assert_eq!(at_limit.validate(), Ok(()));
    }

    #[test]
    fn partial_movement_config_keeps_defaults() {
        let cfg: MovementConfig = serde_json::from_str(r#"{ "move_speed": 5.5 }"#).unwrap();
        assert_eq!(
            cfg,
            MovementConfig {
                move_speed: 5.5,
                ..MovementConfig::default()
            }
        );
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn partial_world_config_keeps_nested_defaults() {
        let json = r#"{ "block_count": 12, "walls": { "height": 10.0 } }"#;
        let cfg: WorldConfig = serde_json::from_str(json).unwrap();

        assert_eq!(cfg.block_count, 12);
        assert_eq!(cfg.walls.height, 10.0);
        assert_eq!(cfg.walls.thickness, WALL_THICKNESS);
        assert_eq!(cfg.half_size, WORLD_HALF_SIZE);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn movement_config_survives_serialization() {
        let cfg = MovementConfig {
            gravity: -12.0,
            ..MovementConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: MovementConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
