//! Name-based action bindings layered over the device manager
//!
//! Actions are hashed names ("jump", "fire") bound to any mix of physical
//! inputs. Pressed queries OR across bindings, strength takes the maximum,
//! and gamepad bindings can be scoped to one slot or left to match every
//! connected pad.

use hashbrown::HashMap;
use smallvec::SmallVec;

use super::device_manager::{DeviceManager, MAX_GAMEPADS};
use super::gamepad::{Gamepad, GamepadAxis, GamepadButton};
use super::keyboard::Key;
use super::mouse::{MouseButton, MouseWheel};

/// 64-bit action identifier derived from the action name.
pub type ActionId = u64;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Hash an action name with FNV-1a. Binding storage never holds the
/// original string, only this id.
///
/// Distinct names that collide become the same action; with 64 bits over a
/// game's action vocabulary this is accepted rather than detected.
pub const fn to_action_id(name: &str) -> ActionId {
    let bytes = name.as_bytes();
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// One physical input a binding can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputMethod {
    Key(Key),
    MouseButton(MouseButton),
    MouseWheel(MouseWheel),
    GamepadButton(GamepadButton),
    GamepadAxis(GamepadAxis),
}

impl From<Key> for InputMethod {
    fn from(key: Key) -> Self {
        InputMethod::Key(key)
    }
}

impl From<MouseButton> for InputMethod {
    fn from(button: MouseButton) -> Self {
        InputMethod::MouseButton(button)
    }
}

impl From<MouseWheel> for InputMethod {
    fn from(wheel: MouseWheel) -> Self {
        InputMethod::MouseWheel(wheel)
    }
}

impl From<GamepadButton> for InputMethod {
    fn from(button: GamepadButton) -> Self {
        InputMethod::GamepadButton(button)
    }
}

impl From<GamepadAxis> for InputMethod {
    fn from(axis: GamepadAxis) -> Self {
        InputMethod::GamepadAxis(axis)
    }
}

/// Gamepad-only input, the binding kind that may carry a slot. Keyboard and
/// mouse methods can never be slot-scoped because this type cannot hold
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadInput {
    Button(GamepadButton),
    Axis(GamepadAxis),
}

impl From<GamepadButton> for GamepadInput {
    fn from(button: GamepadButton) -> Self {
        GamepadInput::Button(button)
    }
}

impl From<GamepadAxis> for GamepadInput {
    fn from(axis: GamepadAxis) -> Self {
        GamepadInput::Axis(axis)
    }
}

impl From<GamepadInput> for InputMethod {
    fn from(input: GamepadInput) -> Self {
        match input {
            GamepadInput::Button(button) => InputMethod::GamepadButton(button),
            GamepadInput::Axis(axis) => InputMethod::GamepadAxis(axis),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Binding {
    method: InputMethod,
    /// `Some(slot)`: only that slot's pad matches. `None` with a gamepad
    /// method: any connected pad matches. Always `None` for other methods.
    gamepad_slot: Option<usize>,
}

/// Binding table from action ids to their physical inputs.
///
/// Queries read device state through a borrowed [`DeviceManager`], so they
/// are only meaningful between that frame's event delivery and the next
/// device update.
#[derive(Debug, Default)]
pub struct InputMap {
    bindings: HashMap<ActionId, SmallVec<[Binding; 4]>>,
}

impl InputMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a binding for an action. Binding the same input twice
    /// registers it twice; existing bindings are never replaced.
    pub fn bind(&mut self, action: &str, method: impl Into<InputMethod>) {
        self.bindings
            .entry(to_action_id(action))
            .or_default()
            .push(Binding {
                method: method.into(),
                gamepad_slot: None,
            });
    }

    /// Append a gamepad binding scoped to one slot. The binding matches
    /// only while that slot holds a connected pad; an empty slot simply
    /// contributes nothing.
    pub fn bind_slot(&mut self, action: &str, input: impl Into<GamepadInput>, slot: usize) {
        assert!(slot < MAX_GAMEPADS, "gamepad slot {slot} out of range");
        self.bindings
            .entry(to_action_id(action))
            .or_default()
            .push(Binding {
                method: input.into().into(),
                gamepad_slot: Some(slot),
            });
    }

    /// True while any binding for the action is held. Unregistered actions
    /// are false.
    pub fn is_action_pressed(&self, devices: &DeviceManager, action: &str) -> bool {
        self.bindings_for(action)
            .iter()
            .any(|binding| binding_pressed(devices, binding))
    }

    /// True on the frame any binding for the action went down. Wheel
    /// bindings trigger here and only here.
    pub fn is_action_just_pressed(&self, devices: &DeviceManager, action: &str) -> bool {
        self.bindings_for(action)
            .iter()
            .any(|binding| binding_just_pressed(devices, binding))
    }

    /// True on the frame any binding for the action was released.
    pub fn is_action_just_released(&self, devices: &DeviceManager, action: &str) -> bool {
        self.bindings_for(action)
            .iter()
            .any(|binding| binding_just_released(devices, binding))
    }

    /// Maximum strength across the action's bindings: digital inputs
    /// contribute 0 or 1, axes their shaped value. Unregistered actions
    /// are 0.
    pub fn action_strength(&self, devices: &DeviceManager, action: &str) -> f32 {
        self.bindings_for(action)
            .iter()
            .fold(0.0, |strength, binding| {
                strength.max(binding_strength(devices, binding))
            })
    }

    fn bindings_for(&self, action: &str) -> &[Binding] {
        self.bindings
            .get(&to_action_id(action))
            .map_or(&[], |list| list.as_slice())
    }
}

/// Does any pad in the binding's scope satisfy the predicate?
fn any_gamepad(
    devices: &DeviceManager,
    slot: Option<usize>,
    pred: impl Fn(&Gamepad) -> bool,
) -> bool {
    match slot {
        Some(slot) => devices.gamepad(slot).is_some_and(pred),
        None => devices.gamepads().into_iter().flatten().any(|pad| pred(pad)),
    }
}

/// Maximum of `value` over the pads in the binding's scope.
fn max_gamepad(devices: &DeviceManager, slot: Option<usize>, value: impl Fn(&Gamepad) -> f32) -> f32 {
    match slot {
        Some(slot) => devices.gamepad(slot).map_or(0.0, value),
        None => devices
            .gamepads()
            .into_iter()
            .flatten()
            .fold(0.0, |max, pad| max.max(value(pad))),
    }
}

fn binding_pressed(devices: &DeviceManager, binding: &Binding) -> bool {
    match binding.method {
        InputMethod::Key(key) => devices.keyboard().is_key_pressed(key),
        InputMethod::MouseButton(button) => devices.mouse().is_button_pressed(button),
        // A scroll tick has no held state
        InputMethod::MouseWheel(_) => false,
        InputMethod::GamepadButton(button) => {
            any_gamepad(devices, binding.gamepad_slot, |pad| {
                pad.is_button_pressed(button)
            })
        }
        InputMethod::GamepadAxis(axis) => any_gamepad(devices, binding.gamepad_slot, |pad| {
            pad.is_axis_pressed(axis)
        }),
    }
}

fn binding_just_pressed(devices: &DeviceManager, binding: &Binding) -> bool {
    match binding.method {
        InputMethod::Key(key) => devices.keyboard().is_key_just_pressed(key),
        InputMethod::MouseButton(button) => devices.mouse().is_button_just_pressed(button),
        InputMethod::MouseWheel(wheel) => devices.mouse().is_wheel_triggered(wheel),
        InputMethod::GamepadButton(button) => {
            any_gamepad(devices, binding.gamepad_slot, |pad| {
                pad.is_button_just_pressed(button)
            })
        }
        InputMethod::GamepadAxis(axis) => any_gamepad(devices, binding.gamepad_slot, |pad| {
            pad.is_axis_just_pressed(axis)
        }),
    }
}

fn binding_just_released(devices: &DeviceManager, binding: &Binding) -> bool {
    match binding.method {
        InputMethod::Key(key) => devices.keyboard().is_key_just_released(key),
        InputMethod::MouseButton(button) => devices.mouse().is_button_just_released(button),
        InputMethod::MouseWheel(_) => false,
        InputMethod::GamepadButton(button) => {
            any_gamepad(devices, binding.gamepad_slot, |pad| {
                pad.is_button_just_released(button)
            })
        }
        InputMethod::GamepadAxis(axis) => any_gamepad(devices, binding.gamepad_slot, |pad| {
            pad.is_axis_just_released(axis)
        }),
    }
}

fn binding_strength(devices: &DeviceManager, binding: &Binding) -> f32 {
    match binding.method {
        InputMethod::GamepadAxis(axis) => {
            max_gamepad(devices, binding.gamepad_slot, |pad| pad.axis_value(axis))
        }
        // Digital methods contribute full scale while pressed; wheel never
        // holds, so it contributes nothing here
        _ => {
            if binding_pressed(devices, binding) {
                1.0
            } else {
                0.0
            }
        }
    }
}
