//! Player state owned by the controller and the per-frame input snapshot it consumes.

use crate::types::Vec3;

/// Whether the player's vertical motion currently rests on a supporting surface.
///
/// Transitions:
/// - `Grounded -> Airborne` when a jump triggers or the player leaves the floor.
/// - `Airborne -> Grounded` on floor contact or on landing on top of an obstacle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GroundState {
    Grounded,
    #[default]
    Airborne,
}

/// Position, velocity and ground state of the player for the whole session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    /// Eye point in world space. The render rig reads this; nothing else writes it.
    pub position: Vec3,
    /// Meters per second. X/Z are overwritten from input every step.
    pub velocity: Vec3,
    pub ground: GroundState,
}

impl PlayerState {
    /// A player standing still at `position`, not yet grounded.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::zeros(),
            ground: GroundState::Airborne,
        }
    }

    #[inline]
    pub fn on_ground(&self) -> bool {
        self.ground == GroundState::Grounded
    }

    /// A jump may only trigger from the ground; both flags read the same state.
    #[inline]
    pub fn can_jump(&self) -> bool {
        self.on_ground()
    }

    #[inline]
    pub fn horizontal_speed(&self) -> f32 {
        (self.velocity.x * self.velocity.x + self.velocity.z * self.velocity.z).sqrt()
    }
}

/// What the input collaborator reports for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// One-shot: true only on the frame a jump was requested.
    pub jump_requested: bool,
    /// Set by the double-tap-forward gesture; only takes effect while `forward` is held.
    pub sprinting: bool,
    /// Horizontal look angle about +Y (radians).
    pub look_yaw: f32,
}

impl InputIntent {
    /// Local-space planar move vector: forward −Z, backward +Z, left −X, right +X.
    ///
    /// Unnormalized; opposite keys cancel.
    pub fn local_direction(&self) -> Vec3 {
        let mut dir = Vec3::zeros();
        if self.forward {
            dir.z -= 1.0;
        }
        if self.backward {
            dir.z += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }

    #[inline]
    pub fn has_movement_input(&self) -> bool {
        self.local_direction().norm_squared() > 0.0
    }

    /// Sprint only counts while moving forward.
    #[inline]
    pub fn sprint_active(&self) -> bool {
        self.sprinting && self.forward
    }
}
