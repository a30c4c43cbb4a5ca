//! Input handling for keyboard, mouse, and gamepads.
//!
//! Device state lives in [`DeviceManager`]; action bindings live in
//! [`InputMap`]. Both are updated once per frame by the event loop, so
//! `just_pressed` / `just_released` edges are stable for the whole frame.

#[cfg(feature = "gamepad")]
mod backend;
mod button_states;
pub mod deadzone;
mod device_manager;
mod gamepad;
mod input_map;
mod keyboard;
mod mouse;

#[cfg(test)]
mod tests;

#[cfg(feature = "gamepad")]
pub use backend::GamepadBackend;
pub use button_states::ButtonStates;
pub use device_manager::{DeviceId, DeviceManager, GamepadInfo, MAX_GAMEPADS};
pub use gamepad::{
    Gamepad, GamepadAxis, GamepadButton, GamepadButtonLabel, GamepadType, RawGamepadState,
    VibrationRequest,
};
pub use input_map::{ActionId, GamepadInput, InputMap, InputMethod, to_action_id};
pub use keyboard::{Key, Keyboard};
pub use mouse::{Mouse, MouseButton, MouseWheel};

use serde::{Deserialize, Serialize};

/// Largest deadzone accepted from configuration. Values at 1.0 would make
/// the rescale in [`deadzone::smooth`] divide by zero, so sanitization caps
/// slightly below.
pub const MAX_DEADZONE: f32 = 0.95;

/// Input configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Deadzone for analog sticks (0.0-1.0)
    #[serde(default = "default_deadzone")]
    pub stick_deadzone: f32,

    /// Deadzone for analog triggers (0.0-1.0)
    #[serde(default = "default_trigger_deadzone")]
    pub trigger_deadzone: f32,
}

fn default_deadzone() -> f32 {
    0.15
}
fn default_trigger_deadzone() -> f32 {
    0.1
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            stick_deadzone: default_deadzone(),
            trigger_deadzone: default_trigger_deadzone(),
        }
    }
}

impl InputConfig {
    /// Clamp both deadzones to `[0.0, MAX_DEADZONE]`. Config files are
    /// user-edited, so out-of-range values are corrected rather than
    /// rejected.
    pub fn sanitize(&mut self) {
        self.stick_deadzone = self.stick_deadzone.clamp(0.0, MAX_DEADZONE);
        self.trigger_deadzone = self.trigger_deadzone.clamp(0.0, MAX_DEADZONE);
    }
}
