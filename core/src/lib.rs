//! Talvi Core - Small real-time application engine
//!
//! A fixed-responsibility main loop that owns a window, a wgpu renderer,
//! a clock, and an input subsystem, and dispatches per-frame callbacks to
//! a user [`App`].
//!
//! # Architecture
//!
//! - [`App`] - Trait implemented by the application (load/poll/update/render)
//! - [`Context`] - Window, renderer, clock, devices, and action map
//! - [`DeviceManager`] - Keyboard, mouse, and hot-pluggable gamepad slots
//! - [`InputMap`] - Named actions aggregating heterogeneous bindings

pub mod app;
pub mod color;
pub mod input;
pub mod render;
pub mod time;

// Re-export the application surface
pub use app::{
    App, BackendPreference, ConfigError, Context, ProjectSettings, RendererConfig, VsyncMode,
    WindowConfig, run,
};
pub use color::Color;
pub use render::Renderer;
pub use time::Time;

// Re-export the input surface
#[cfg(feature = "gamepad")]
pub use input::GamepadBackend;
pub use input::{
    ActionId, ButtonStates, DeviceId, DeviceManager, Gamepad, GamepadAxis, GamepadButton,
    GamepadButtonLabel, GamepadInfo, GamepadInput, GamepadType, InputConfig, InputMap, InputMethod,
    Key, Keyboard, MAX_GAMEPADS, Mouse, MouseButton, MouseWheel, RawGamepadState,
    VibrationRequest, deadzone, to_action_id,
};
