//! gilrs-backed gamepad platform layer
//!
//! Bridges gilrs to the device manager: allocates engine device ids for
//! gilrs's opaque gamepad ids, feeds connect/disconnect events through the
//! hot-plug path, snapshots raw pad state once per frame, and renders
//! vibration requests through the force-feedback API.

use gilrs::ff::{BaseEffect, BaseEffectType, Effect, EffectBuilder, Repeat, Ticks};
use gilrs::{Axis, Button, EventType, GamepadId, Gilrs, MappingSource};
use glam::Vec2;
use hashbrown::HashMap;

use super::device_manager::{DeviceId, DeviceManager, GamepadInfo};
use super::gamepad::{GamepadButton, GamepadType, RawGamepadState, VibrationRequest};

/// Owns the gilrs context and the gilrs-id to engine-id mapping.
pub struct GamepadBackend {
    /// None if gilrs failed to initialize; the engine then runs without pads.
    gilrs: Option<Gilrs>,
    device_ids: HashMap<GamepadId, DeviceId>,
    next_device_id: u32,
    /// Live rumble effects per device. Dropping a handle stops the effect.
    rumble_effects: HashMap<DeviceId, Effect>,
}

impl GamepadBackend {
    /// Initialize gilrs and register every already-connected pad through
    /// the same hot-plug path later connections take.
    pub fn new(devices: &mut DeviceManager) -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => Some(gilrs),
            Err(e) => {
                tracing::warn!(
                    "Failed to initialize gamepad support: {}. Gamepads will not be available.",
                    e
                );
                None
            }
        };

        let mut backend = Self {
            gilrs,
            device_ids: HashMap::new(),
            next_device_id: 0,
            rumble_effects: HashMap::new(),
        };

        if let Some(gilrs) = &backend.gilrs {
            let connected: Vec<GamepadId> = gilrs.gamepads().map(|(id, _)| id).collect();
            for gilrs_id in connected {
                attach_gamepad(
                    gilrs,
                    &mut backend.device_ids,
                    &mut backend.next_device_id,
                    gilrs_id,
                    devices,
                );
            }
        }

        backend
    }

    /// Drain hot-plug events and snapshot raw state for every tracked pad.
    /// Runs once per frame, before the application's update hook.
    pub fn pump(&mut self, devices: &mut DeviceManager) {
        let Some(gilrs) = &mut self.gilrs else { return };

        while let Some(event) = gilrs.next_event() {
            match event.event {
                EventType::Connected => attach_gamepad(
                    gilrs,
                    &mut self.device_ids,
                    &mut self.next_device_id,
                    event.id,
                    devices,
                ),
                EventType::Disconnected => {
                    if let Some(device_id) = self.device_ids.remove(&event.id) {
                        self.rumble_effects.remove(&device_id);
                        devices.handle_gamepad_removed(device_id);
                    }
                }
                // Button and axis state is polled below, not event-driven
                _ => {}
            }
        }

        for (&gilrs_id, &device_id) in &self.device_ids {
            let pad = gilrs.gamepad(gilrs_id);
            if !pad.is_connected() {
                continue;
            }
            if let Some(gamepad) = devices.gamepad_by_id_mut(device_id) {
                gamepad.set_raw_state(read_raw_state(&pad));
            }
        }
    }

    /// Drain recorded haptics requests and render them through gilrs.
    /// Runs once per frame, after the device update.
    pub fn service_haptics(&mut self, devices: &mut DeviceManager) {
        let Some(gilrs) = &mut self.gilrs else { return };

        for (&gilrs_id, &device_id) in &self.device_ids {
            let Some(pad) = devices.gamepad_by_id_mut(device_id) else {
                continue;
            };

            if let Some(request) = pad.take_vibration_request() {
                match request {
                    VibrationRequest::Start {
                        weak,
                        strong,
                        duration,
                    } => {
                        let result = EffectBuilder::new()
                            .add_effect(BaseEffect {
                                kind: BaseEffectType::Strong {
                                    magnitude: (strong * u16::MAX as f32) as u16,
                                },
                                ..Default::default()
                            })
                            .add_effect(BaseEffect {
                                kind: BaseEffectType::Weak {
                                    magnitude: (weak * u16::MAX as f32) as u16,
                                },
                                ..Default::default()
                            })
                            .repeat(Repeat::For(Ticks::from_ms(duration.as_millis() as u32)))
                            .gamepads(&[gilrs_id])
                            .finish(gilrs);
                        match result {
                            Ok(effect) => {
                                if let Err(e) = effect.play() {
                                    tracing::warn!(
                                        "Failed to start rumble on gamepad {}: {}",
                                        device_id,
                                        e
                                    );
                                }
                                // Replacing the entry drops any prior effect
                                self.rumble_effects.insert(device_id, effect);
                            }
                            Err(e) => tracing::warn!(
                                "Failed to create rumble effect for gamepad {}: {}",
                                device_id,
                                e
                            ),
                        }
                    }
                    VibrationRequest::Stop => {
                        self.rumble_effects.remove(&device_id);
                    }
                }
            }

            if let Some(color) = pad.take_led_request() {
                // gilrs exposes no LED control; acknowledge and drop
                tracing::debug!(
                    "Gamepad {} LED request {:?} ignored: backend has no LED support",
                    device_id,
                    color
                );
            }
        }
    }
}

fn attach_gamepad(
    gilrs: &Gilrs,
    device_ids: &mut HashMap<GamepadId, DeviceId>,
    next_device_id: &mut u32,
    gilrs_id: GamepadId,
    devices: &mut DeviceManager,
) {
    let pad = gilrs.gamepad(gilrs_id);
    let device_id = *device_ids.entry(gilrs_id).or_insert_with(|| {
        let id = DeviceId::new(*next_device_id);
        *next_device_id += 1;
        id
    });
    let info = GamepadInfo {
        name: pad.name().to_string(),
        gamepad_type: GamepadType::classify(
            pad.vendor_id().unwrap_or(0),
            pad.product_id().unwrap_or(0),
            pad.name(),
        ),
        mapped: pad.mapping_source() != MappingSource::None,
    };
    devices.handle_gamepad_added(device_id, info);
}

fn read_raw_state(pad: &gilrs::Gamepad<'_>) -> RawGamepadState {
    let mut raw = RawGamepadState::default();
    for button in GamepadButton::ALL {
        if let Some(gilrs_button) = button_to_gilrs(button) {
            raw.buttons[button as usize] = pad.is_pressed(gilrs_button);
        }
    }
    // gilrs stick axes are already normalized signed floats with up positive
    raw.left_stick = Vec2::new(pad.value(Axis::LeftStickX), pad.value(Axis::LeftStickY));
    raw.right_stick = Vec2::new(pad.value(Axis::RightStickX), pad.value(Axis::RightStickY));
    // Triggers come through analog button data; the Z axes are not
    // populated uniformly across platform backends
    raw.left_trigger = pad
        .button_data(Button::LeftTrigger2)
        .map_or(0.0, |data| data.value());
    raw.right_trigger = pad
        .button_data(Button::RightTrigger2)
        .map_or(0.0, |data| data.value());
    raw
}

/// Engine button to gilrs button. Buttons gilrs cannot express read as
/// never pressed.
fn button_to_gilrs(button: GamepadButton) -> Option<Button> {
    match button {
        GamepadButton::South => Some(Button::South),
        GamepadButton::East => Some(Button::East),
        GamepadButton::West => Some(Button::West),
        GamepadButton::North => Some(Button::North),
        GamepadButton::Back => Some(Button::Select),
        GamepadButton::Guide => Some(Button::Mode),
        GamepadButton::Start => Some(Button::Start),
        GamepadButton::LeftStick => Some(Button::LeftThumb),
        GamepadButton::RightStick => Some(Button::RightThumb),
        GamepadButton::LeftShoulder => Some(Button::LeftTrigger),
        GamepadButton::RightShoulder => Some(Button::RightTrigger),
        GamepadButton::DpadUp => Some(Button::DPadUp),
        GamepadButton::DpadDown => Some(Button::DPadDown),
        GamepadButton::DpadLeft => Some(Button::DPadLeft),
        GamepadButton::DpadRight => Some(Button::DPadRight),
        GamepadButton::Paddle1
        | GamepadButton::Paddle2
        | GamepadButton::Paddle3
        | GamepadButton::Paddle4
        | GamepadButton::Touchpad
        | GamepadButton::Misc1
        | GamepadButton::Misc2
        | GamepadButton::Misc3
        | GamepadButton::Misc4
        | GamepadButton::Misc5
        | GamepadButton::Misc6 => None,
    }
}
