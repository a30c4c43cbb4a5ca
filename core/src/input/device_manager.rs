//! Device ownership, slot assignment, and hot-plug topology

use std::fmt;

use glam::Vec2;
use hashbrown::HashMap;
use winit::keyboard::KeyCode;

use super::InputConfig;
use super::gamepad::{Gamepad, GamepadType};
use super::keyboard::Keyboard;
use super::mouse::Mouse;

/// Number of logical gamepad slots.
pub const MAX_GAMEPADS: usize = 8;

/// Volatile gamepad identifier, assigned by the platform backend at connect
/// time. Not stable across sessions or reconnections; use slots for stable
/// player positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(u32);

impl DeviceId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Connect-time identity of a device offered by the platform backend.
#[derive(Debug, Clone)]
pub struct GamepadInfo {
    pub name: String,
    pub gamepad_type: GamepadType,
    /// Whether the host exposes a gamepad-capable mapping for this device.
    /// Joysticks and other unmapped HID devices are rejected.
    pub mapped: bool,
}

/// Owner of all input devices and sole authority for slot assignment.
///
/// Keyboard and mouse are singletons living as long as the manager.
/// Gamepads come and go with hot-plug events; every connected pad is keyed
/// by its volatile [`DeviceId`] and referenced by exactly one stable slot.
pub struct DeviceManager {
    keyboard: Keyboard,
    mouse: Mouse,
    slots: [Option<DeviceId>; MAX_GAMEPADS],
    gamepads: HashMap<DeviceId, Gamepad>,
    config: InputConfig,
}

impl DeviceManager {
    pub fn new(mut config: InputConfig) -> Self {
        config.sanitize();
        Self {
            keyboard: Keyboard::new(),
            mouse: Mouse::new(),
            slots: [None; MAX_GAMEPADS],
            gamepads: HashMap::new(),
            config,
        }
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn keyboard_mut(&mut self) -> &mut Keyboard {
        &mut self.keyboard
    }

    pub fn mouse(&self) -> &Mouse {
        &self.mouse
    }

    pub fn mouse_mut(&mut self) -> &mut Mouse {
        &mut self.mouse
    }

    /// Gamepad at a logical slot, or `None` while the slot is empty.
    ///
    /// Panics on an out-of-range slot: slot numbers are caller-controlled
    /// constants, so a bad one is a programming error, not device absence.
    pub fn gamepad(&self, slot: usize) -> Option<&Gamepad> {
        assert!(slot < MAX_GAMEPADS, "gamepad slot {slot} out of range");
        self.slots[slot].and_then(|id| self.gamepads.get(&id))
    }

    pub fn gamepad_mut(&mut self, slot: usize) -> Option<&mut Gamepad> {
        assert!(slot < MAX_GAMEPADS, "gamepad slot {slot} out of range");
        self.slots[slot].and_then(|id| self.gamepads.get_mut(&id))
    }

    /// Positional view over all slots; empty slots stay `None` so callers
    /// can correlate index and player position.
    pub fn gamepads(&self) -> [Option<&Gamepad>; MAX_GAMEPADS] {
        std::array::from_fn(|slot| self.slots[slot].and_then(|id| self.gamepads.get(&id)))
    }

    /// Connected gamepads only, ascending by slot.
    pub fn active_gamepads(&self) -> Vec<&Gamepad> {
        self.gamepads().into_iter().flatten().collect()
    }

    pub fn gamepad_by_id(&self, id: DeviceId) -> Option<&Gamepad> {
        self.gamepads.get(&id)
    }

    pub fn gamepad_by_id_mut(&mut self, id: DeviceId) -> Option<&mut Gamepad> {
        self.gamepads.get_mut(&id)
    }

    pub fn gamepad_count(&self) -> usize {
        self.gamepads.len()
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn set_config(&mut self, mut config: InputConfig) {
        config.sanitize();
        self.config = config;
    }

    /// Register a newly connected device and assign the first free slot.
    /// Duplicate events, unmapped devices, and a full slot table are all
    /// absorbed without state change.
    pub fn handle_gamepad_added(&mut self, id: DeviceId, info: GamepadInfo) {
        if self.gamepads.contains_key(&id) {
            return;
        }
        if !info.mapped {
            tracing::debug!(
                "Ignoring device {} without a gamepad mapping: {}",
                id,
                info.name
            );
            return;
        }
        let Some(slot) = self.slots.iter().position(Option::is_none) else {
            tracing::warn!(
                "Gamepad {} connected but all {} slots are taken: {}",
                id,
                MAX_GAMEPADS,
                info.name
            );
            return;
        };
        self.slots[slot] = Some(id);
        tracing::info!(
            "Gamepad {} connected as slot {}: {} ({:?})",
            id,
            slot,
            info.name,
            info.gamepad_type
        );
        self.gamepads
            .insert(id, Gamepad::new(id, info.name, info.gamepad_type));
    }

    /// Remove a disconnected device and free its slot. Unknown ids are
    /// absorbed without state change.
    pub fn handle_gamepad_removed(&mut self, id: DeviceId) {
        if self.gamepads.remove(&id).is_none() {
            return;
        }
        if let Some(slot) = self.slots.iter().position(|entry| *entry == Some(id)) {
            self.slots[slot] = None;
            tracing::info!("Gamepad {} (slot {}) disconnected", id, slot);
        }
    }

    /// Forward a host key event to the keyboard.
    pub fn handle_key_event(&mut self, code: KeyCode, pressed: bool) {
        self.keyboard.handle_key_event(code, pressed);
    }

    /// Forward a host mouse button event.
    pub fn handle_mouse_button(&mut self, button: winit::event::MouseButton, pressed: bool) {
        self.mouse.handle_button_event(button, pressed);
    }

    /// Forward the cursor position in window coordinates.
    pub fn handle_cursor_moved(&mut self, position: Vec2) {
        self.mouse.handle_cursor_moved(position);
    }

    /// Forward a scroll delta in lines.
    pub fn handle_wheel_event(&mut self, delta: Vec2) {
        self.mouse.handle_wheel_event(delta);
    }

    /// Advance every owned device exactly once. Must run once per frame,
    /// after event delivery and application update logic.
    pub fn update(&mut self) {
        self.keyboard.update();
        self.mouse.update();
        for gamepad in self.gamepads.values_mut() {
            gamepad.update(&self.config);
        }
    }
}

impl Default for DeviceManager {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}
