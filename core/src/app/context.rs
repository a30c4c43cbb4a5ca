//! Engine services handed to application callbacks.

use std::sync::Arc;

use winit::window::Window;

use crate::color::Color;
use crate::input::{
    DeviceManager, Gamepad, GamepadInput, InputMap, InputMethod, Keyboard, MAX_GAMEPADS, Mouse,
};
use crate::render::Renderer;
use crate::time::Time;

/// Everything the engine owns on behalf of the application: the window,
/// the renderer, the clock, the devices, and the action map. One instance
/// lives for the whole run and is threaded through every [`super::App`]
/// callback.
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) renderer: Renderer,
    pub(crate) time: Time,
    pub(crate) devices: DeviceManager,
    pub(crate) input: InputMap,
    pub(crate) exit_requested: bool,
}

impl Context {
    pub(crate) fn new(window: Arc<Window>, renderer: Renderer, devices: DeviceManager) -> Self {
        Self {
            window,
            renderer,
            time: Time::new(),
            devices,
            input: InputMap::new(),
            exit_requested: false,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    /// Seconds elapsed between the two most recent frames.
    pub fn delta(&self) -> f32 {
        self.time.delta()
    }

    pub fn fps(&self) -> f32 {
        self.time.fps()
    }

    /// All connected input devices.
    pub fn devices(&self) -> &DeviceManager {
        &self.devices
    }

    pub fn devices_mut(&mut self) -> &mut DeviceManager {
        &mut self.devices
    }

    pub fn keyboard(&self) -> &Keyboard {
        self.devices.keyboard()
    }

    pub fn mouse(&self) -> &Mouse {
        self.devices.mouse()
    }

    /// Gamepad at a logical slot, or `None` while the slot is empty.
    pub fn gamepad(&self, slot: usize) -> Option<&Gamepad> {
        self.devices.gamepad(slot)
    }

    pub fn gamepad_mut(&mut self, slot: usize) -> Option<&mut Gamepad> {
        self.devices.gamepad_mut(slot)
    }

    /// Positional view over all gamepad slots.
    pub fn gamepads(&self) -> [Option<&Gamepad>; MAX_GAMEPADS] {
        self.devices.gamepads()
    }

    /// Connected gamepads only, ascending by slot.
    pub fn active_gamepads(&self) -> Vec<&Gamepad> {
        self.devices.active_gamepads()
    }

    /// The action binding table.
    pub fn input(&self) -> &InputMap {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputMap {
        &mut self.input
    }

    /// Bind an action to any key, mouse button, wheel direction, gamepad
    /// button, or gamepad axis.
    pub fn bind(&mut self, action: &str, method: impl Into<InputMethod>) {
        self.input.bind(action, method);
    }

    /// Bind an action to a gamepad input on one specific slot.
    pub fn bind_slot(&mut self, action: &str, input: impl Into<GamepadInput>, slot: usize) {
        self.input.bind_slot(action, input, slot);
    }

    pub fn is_action_pressed(&self, action: &str) -> bool {
        self.input.is_action_pressed(&self.devices, action)
    }

    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        self.input.is_action_just_pressed(&self.devices, action)
    }

    pub fn is_action_just_released(&self, action: &str) -> bool {
        self.input.is_action_just_released(&self.devices, action)
    }

    pub fn action_strength(&self, action: &str) -> f32 {
        self.input.action_strength(&self.devices, action)
    }

    /// Background color for the frame clear. Takes effect next frame.
    pub fn set_clear_color(&mut self, color: Color) {
        self.renderer.set_clear_color(color);
    }

    /// Show or hide the OS cursor over the window. The flag is applied to
    /// the window once per frame.
    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.devices.mouse_mut().set_cursor_visible(visible);
    }

    /// Ask the engine to exit after the current frame completes.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }
}
