/*!
Held-key tracking that turns key events into a per-frame [`InputIntent`].

Raw event capture stays with the host; it forwards presses and releases here
with a monotonic timestamp. Two things need memory across frames:
- the jump request is an edge, consumed by the next [`InputState::snapshot`];
- sprint turns on when forward is pressed twice within
  [`SPRINT_DOUBLE_TAP_WINDOW`] and stays on until forward is released.
*/

use std::time::Duration;

use crate::constants::SPRINT_DOUBLE_TAP_WINDOW;
use crate::state::InputIntent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    fn slot(&mut self, key: MoveKey) -> &mut bool {
        match key {
            MoveKey::Forward => &mut self.forward,
            MoveKey::Backward => &mut self.backward,
            MoveKey::Left => &mut self.left,
            MoveKey::Right => &mut self.right,
        }
    }
}

#[derive(Clone, Debug)]
pub struct InputState {
    keys: MoveKeys,
    jump_pending: bool,
    sprinting: bool,
    last_forward_press: Option<Duration>,
    double_tap_window: Duration,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(SPRINT_DOUBLE_TAP_WINDOW)
    }
}

impl InputState {
    pub fn new(double_tap_window: Duration) -> Self {
        Self {
            keys: MoveKeys::default(),
            jump_pending: false,
            sprinting: false,
            last_forward_press: None,
            double_tap_window,
        }
    }

    /// Record a key press at host time `now`.
    ///
    /// Auto-repeat presses of a key already held are ignored, so holding
    /// forward never counts as a double tap.
    pub fn key_down(&mut self, key: MoveKey, now: Duration) {
        let held = self.keys.slot(key);
        if *held {
            return;
        }
        *held = true;

        if key == MoveKey::Forward {
            if let Some(last) = self.last_forward_press {
                if now.saturating_sub(last) < self.double_tap_window {
                    self.sprinting = true;
                    log::debug!("sprint on");
                }
            }
            self.last_forward_press = Some(now);
        }
    }

    pub fn key_up(&mut self, key: MoveKey) {
        *self.keys.slot(key) = false;
        if key == MoveKey::Forward && self.sprinting {
            self.sprinting = false;
            log::debug!("sprint off");
        }
    }

    /// Latch a jump request for the next snapshot.
    pub fn request_jump(&mut self) {
        self.jump_pending = true;
    }

    /// Release everything, e.g. when the host loses input focus.
    pub fn clear(&mut self) {
        self.keys = MoveKeys::default();
        self.jump_pending = false;
        self.sprinting = false;
        self.last_forward_press = None;
    }

    #[inline]
    pub fn keys(&self) -> MoveKeys {
        self.keys
    }

    #[inline]
    pub fn sprinting(&self) -> bool {
        self.sprinting
    }

    /// Build this frame's intent and consume the pending jump.
    pub fn snapshot(&mut self, look_yaw: f32) -> InputIntent {
        let jump_requested = std::mem::take(&mut self.jump_pending);
        InputIntent {
            forward: self.keys.forward,
            backward: self.keys.backward,
            left: self.keys.left,
            right: self.keys.right,
            jump_requested,
            sprinting: self.sprinting,
            look_yaw,
        }
    }
}
