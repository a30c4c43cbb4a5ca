//! Cross-module tests: host events through [`DeviceManager`] into
//! [`InputMap`] queries, exercising the per-frame update contract.

use glam::Vec2;
use winit::keyboard::KeyCode;

use super::*;

const EPSILON: f32 = 1e-6;

fn connect_pad(devices: &mut DeviceManager, raw_id: u32, name: &str) {
    devices.handle_gamepad_added(
        DeviceId::new(raw_id),
        GamepadInfo {
            name: name.to_string(),
            gamepad_type: GamepadType::Standard,
            mapped: true,
        },
    );
}

fn set_pad_raw(devices: &mut DeviceManager, raw_id: u32, raw: RawGamepadState) {
    devices
        .gamepad_by_id_mut(DeviceId::new(raw_id))
        .expect("pad connected")
        .set_raw_state(raw);
}

// === Config Tests ===

#[test]
fn test_config_defaults() {
    let config = InputConfig::default();
    assert!((config.stick_deadzone - 0.15).abs() < EPSILON);
    assert!((config.trigger_deadzone - 0.1).abs() < EPSILON);
}

#[test]
fn test_config_missing_fields_fill_defaults() {
    let config: InputConfig = toml::from_str("stick_deadzone = 0.3").unwrap();
    assert!((config.stick_deadzone - 0.3).abs() < EPSILON);
    assert!((config.trigger_deadzone - 0.1).abs() < EPSILON);
}

#[test]
fn test_config_sanitize_clamps_deadzones() {
    let mut config = InputConfig {
        stick_deadzone: 2.0,
        trigger_deadzone: -0.5,
    };
    config.sanitize();
    assert!((config.stick_deadzone - MAX_DEADZONE).abs() < EPSILON);
    assert_eq!(config.trigger_deadzone, 0.0);
}

#[test]
fn test_device_manager_sanitizes_config_on_construction() {
    let devices = DeviceManager::new(InputConfig {
        stick_deadzone: 1.0,
        trigger_deadzone: 0.1,
    });
    assert!((devices.config().stick_deadzone - MAX_DEADZONE).abs() < EPSILON);
}

// === Action Aggregation Tests ===

#[test]
fn test_action_pressed_from_any_bound_device() {
    let mut map = InputMap::new();
    map.bind("jump", Key::Space);
    map.bind("jump", GamepadButton::South);

    let mut devices = DeviceManager::default();
    connect_pad(&mut devices, 1, "Pad");

    // Only the gamepad holds its binding down
    let mut raw = RawGamepadState::default();
    raw.buttons[GamepadButton::South as usize] = true;
    set_pad_raw(&mut devices, 1, raw);
    devices.update();

    assert!(map.is_action_pressed(&devices, "jump"));
    assert!((map.action_strength(&devices, "jump") - 1.0).abs() < EPSILON);

    // Now only the keyboard
    set_pad_raw(&mut devices, 1, RawGamepadState::default());
    devices.handle_key_event(KeyCode::Space, true);
    devices.update();

    assert!(map.is_action_pressed(&devices, "jump"));
}

#[test]
fn test_action_just_pressed_fires_once_per_edge() {
    let mut map = InputMap::new();
    map.bind("fire", Key::A);

    let mut devices = DeviceManager::default();
    devices.handle_key_event(KeyCode::KeyA, true);
    devices.update();

    assert!(map.is_action_pressed(&devices, "fire"));
    assert!(map.is_action_just_pressed(&devices, "fire"));

    // Held: level stays, edge clears
    devices.update();
    assert!(map.is_action_pressed(&devices, "fire"));
    assert!(!map.is_action_just_pressed(&devices, "fire"));

    devices.handle_key_event(KeyCode::KeyA, false);
    devices.update();
    assert!(!map.is_action_pressed(&devices, "fire"));
    assert!(map.is_action_just_released(&devices, "fire"));
}

#[test]
fn test_action_edge_from_one_device_while_another_holds() {
    let mut map = InputMap::new();
    map.bind("jump", Key::Space);
    map.bind("jump", GamepadButton::South);

    let mut devices = DeviceManager::default();
    connect_pad(&mut devices, 1, "Pad");
    let mut raw = RawGamepadState::default();
    raw.buttons[GamepadButton::South as usize] = true;
    set_pad_raw(&mut devices, 1, raw);
    devices.update();
    devices.update(); // pad binding is now held, not an edge

    devices.handle_key_event(KeyCode::Space, true);
    devices.update();

    // The keyboard edge shows through even though the pad never released
    assert!(map.is_action_just_pressed(&devices, "jump"));
}

#[test]
fn test_unregistered_action_is_inert() {
    let map = InputMap::new();
    let devices = DeviceManager::default();

    assert!(!map.is_action_pressed(&devices, "no_such_action"));
    assert!(!map.is_action_just_pressed(&devices, "no_such_action"));
    assert!(!map.is_action_just_released(&devices, "no_such_action"));
    assert_eq!(map.action_strength(&devices, "no_such_action"), 0.0);
}

// === Strength Tests ===

#[test]
fn test_axis_strength_reports_shaped_value() {
    let mut map = InputMap::new();
    map.bind("accelerate", GamepadAxis::RightTrigger);

    let mut devices = DeviceManager::default();
    connect_pad(&mut devices, 1, "Pad");
    let raw = RawGamepadState {
        right_trigger: 0.55,
        ..Default::default()
    };
    set_pad_raw(&mut devices, 1, raw);
    devices.update();

    // 0.55 through the 0.1 trigger deadzone rescales to 0.5
    assert!((map.action_strength(&devices, "accelerate") - 0.5).abs() < EPSILON);
    assert!(map.is_action_pressed(&devices, "accelerate"));
}

#[test]
fn test_strength_takes_max_across_bindings() {
    let mut map = InputMap::new();
    map.bind("forward", GamepadAxis::LeftStickUp);
    map.bind("forward", Key::W);

    let mut devices = DeviceManager::default();
    connect_pad(&mut devices, 1, "Pad");
    let raw = RawGamepadState {
        left_stick: Vec2::new(0.0, 0.575), // shapes to 0.5 at the 0.15 deadzone
        ..Default::default()
    };
    set_pad_raw(&mut devices, 1, raw);
    devices.handle_key_event(KeyCode::KeyW, true);
    devices.update();

    // Digital binding saturates the action even with a partial stick
    assert!((map.action_strength(&devices, "forward") - 1.0).abs() < EPSILON);

    devices.handle_key_event(KeyCode::KeyW, false);
    devices.update();
    assert!((map.action_strength(&devices, "forward") - 0.5).abs() < EPSILON);
}

// === Slot Scoping Tests ===

#[test]
fn test_slot_scoped_binding_ignores_other_slots() {
    let mut map = InputMap::new();
    map.bind_slot("p2_left", GamepadAxis::LeftStickLeft, 1);

    let mut devices = DeviceManager::default();
    connect_pad(&mut devices, 1, "P1 Pad"); // slot 0
    connect_pad(&mut devices, 2, "P2 Pad"); // slot 1

    let raw = RawGamepadState {
        left_stick: Vec2::new(-1.0, 0.0),
        ..Default::default()
    };
    set_pad_raw(&mut devices, 1, raw);
    devices.update();

    // Slot 0 activity must not leak into the slot 1 binding
    assert!(!map.is_action_pressed(&devices, "p2_left"));
    assert_eq!(map.action_strength(&devices, "p2_left"), 0.0);

    set_pad_raw(&mut devices, 1, RawGamepadState::default());
    set_pad_raw(&mut devices, 2, raw);
    devices.update();

    assert!(map.is_action_pressed(&devices, "p2_left"));
    assert!((map.action_strength(&devices, "p2_left") - 1.0).abs() < EPSILON);
}

#[test]
fn test_slot_scoped_binding_with_empty_slot_is_inert() {
    let mut map = InputMap::new();
    map.bind_slot("p4_jump", GamepadButton::South, 3);

    let devices = DeviceManager::default();
    assert!(!map.is_action_pressed(&devices, "p4_jump"));
    assert_eq!(map.action_strength(&devices, "p4_jump"), 0.0);
}

#[test]
fn test_unscoped_gamepad_binding_matches_any_pad() {
    let mut map = InputMap::new();
    map.bind("jump", GamepadButton::South);

    let mut devices = DeviceManager::default();
    connect_pad(&mut devices, 1, "P1 Pad");
    connect_pad(&mut devices, 2, "P2 Pad");

    let mut raw = RawGamepadState::default();
    raw.buttons[GamepadButton::South as usize] = true;
    set_pad_raw(&mut devices, 2, raw);
    devices.update();

    assert!(map.is_action_pressed(&devices, "jump"));
}

// === Wheel Binding Tests ===

#[test]
fn test_wheel_binding_is_edge_only() {
    let mut map = InputMap::new();
    map.bind("zoom_in", MouseWheel::Up);

    let mut devices = DeviceManager::default();
    devices.handle_wheel_event(Vec2::new(0.0, 1.0));
    devices.update();

    // A wheel tick is only ever a just-pressed edge
    assert!(map.is_action_just_pressed(&devices, "zoom_in"));
    assert!(!map.is_action_pressed(&devices, "zoom_in"));
    assert!(!map.is_action_just_released(&devices, "zoom_in"));
    assert_eq!(map.action_strength(&devices, "zoom_in"), 0.0);

    // The edge lasts exactly one frame
    devices.update();
    assert!(!map.is_action_just_pressed(&devices, "zoom_in"));
}

#[test]
fn test_wheel_directions_do_not_cross_trigger() {
    let mut map = InputMap::new();
    map.bind("zoom_in", MouseWheel::Up);
    map.bind("zoom_out", MouseWheel::Down);

    let mut devices = DeviceManager::default();
    devices.handle_wheel_event(Vec2::new(0.0, -2.0));
    devices.update();

    assert!(map.is_action_just_pressed(&devices, "zoom_out"));
    assert!(!map.is_action_just_pressed(&devices, "zoom_in"));
}

// === Mouse Binding Tests ===

#[test]
fn test_mouse_button_binding_through_map() {
    let mut map = InputMap::new();
    map.bind("shoot", MouseButton::Left);

    let mut devices = DeviceManager::default();
    devices.handle_mouse_button(winit::event::MouseButton::Left, true);
    devices.update();

    assert!(map.is_action_just_pressed(&devices, "shoot"));
    assert!((map.action_strength(&devices, "shoot") - 1.0).abs() < EPSILON);

    devices.handle_mouse_button(winit::event::MouseButton::Left, false);
    devices.update();
    assert!(map.is_action_just_released(&devices, "shoot"));
}

// === Hot-plug Under Bindings Tests ===

#[test]
fn test_disconnect_mid_hold_releases_action() {
    let mut map = InputMap::new();
    map.bind("jump", GamepadButton::South);

    let mut devices = DeviceManager::default();
    connect_pad(&mut devices, 1, "Pad");
    let mut raw = RawGamepadState::default();
    raw.buttons[GamepadButton::South as usize] = true;
    set_pad_raw(&mut devices, 1, raw);
    devices.update();
    assert!(map.is_action_pressed(&devices, "jump"));

    // The pad vanishes while held; the action simply reads released
    devices.handle_gamepad_removed(DeviceId::new(1));
    devices.update();
    assert!(!map.is_action_pressed(&devices, "jump"));
    assert!(!map.is_action_just_released(&devices, "jump"));
}
