use thiserror::Error;

/// Reasons a [`WorldConfig`](crate::WorldConfig) or [`MovementConfig`](crate::MovementConfig)
/// cannot be used to build a session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("`{field}` must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error(
        "half size {half_size} leaves no room inside the boundary margin of {margin}"
    )]
    RoomTooSmall { half_size: f32, margin: f32 },

    #[error("block padding {padding} leaves no interior in a room of half size {half_size}")]
    PaddingTooLarge { padding: f32, half_size: f32 },

    #[error(
        "spawn clearance {clearance} plus block size {block_size} does not fit inside the padded interior half-width {interior}"
    )]
    SpawnClearanceTooLarge {
        clearance: f32,
        block_size: f32,
        interior: f32,
    },

    #[error("stack probability must lie in [0, 1], got {0}")]
    ProbabilityOutOfRange(f64),

    #[error("`max_stack_levels` must be at least 1")]
    NoStackLevels,

    #[error(
        "upward search of {max_height} in steps of {step} exceeds {limit} increments"
    )]
    UnstickSearchTooLong {
        step: f32,
        max_height: f32,
        limit: u32,
    },
}
