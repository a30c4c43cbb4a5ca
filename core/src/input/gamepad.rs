//! Gamepad device: button bank, logical axes, identity, and haptics requests

use std::time::Duration;

use glam::Vec2;

use crate::color::Color;

use super::InputConfig;
use super::button_states::ButtonStates;
use super::deadzone;
use super::device_manager::DeviceId;

/// Physical gamepad button identifier. Variants index the button bank.
///
/// Face buttons are named by position (South/East/West/North); the
/// family-specific glyph comes from [`GamepadType::button_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    South,
    East,
    West,
    North,
    Back,
    Guide,
    Start,
    LeftStick,
    RightStick,
    LeftShoulder,
    RightShoulder,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    Paddle1,
    Paddle2,
    Paddle3,
    Paddle4,
    Touchpad,
    Misc1,
    Misc2,
    Misc3,
    Misc4,
    Misc5,
    Misc6,
}

impl GamepadButton {
    pub const COUNT: usize = 26;

    /// Every button in bank order, for translation-table iteration.
    pub const ALL: [GamepadButton; Self::COUNT] = [
        GamepadButton::South,
        GamepadButton::East,
        GamepadButton::West,
        GamepadButton::North,
        GamepadButton::Back,
        GamepadButton::Guide,
        GamepadButton::Start,
        GamepadButton::LeftStick,
        GamepadButton::RightStick,
        GamepadButton::LeftShoulder,
        GamepadButton::RightShoulder,
        GamepadButton::DpadUp,
        GamepadButton::DpadDown,
        GamepadButton::DpadLeft,
        GamepadButton::DpadRight,
        GamepadButton::Paddle1,
        GamepadButton::Paddle2,
        GamepadButton::Paddle3,
        GamepadButton::Paddle4,
        GamepadButton::Touchpad,
        GamepadButton::Misc1,
        GamepadButton::Misc2,
        GamepadButton::Misc3,
        GamepadButton::Misc4,
        GamepadButton::Misc5,
        GamepadButton::Misc6,
    ];
}

/// Logical gamepad axis, all values in `[0, 1]`.
///
/// Each signed stick axis is split into its two unsigned directions, so
/// "how far left is the left stick" is a single axis value rather than the
/// sign of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftStickLeft,
    LeftStickRight,
    LeftStickUp,
    LeftStickDown,
    RightStickLeft,
    RightStickRight,
    RightStickUp,
    RightStickDown,
    LeftTrigger,
    RightTrigger,
}

impl GamepadAxis {
    pub const COUNT: usize = 10;
}

/// Controller family, used for face-button labels and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamepadType {
    #[default]
    Unknown,
    Standard,
    Xbox360,
    XboxOne,
    Ps3,
    Ps4,
    Ps5,
    Switch,
    JoyconLeft,
    JoyconRight,
    JoyconPair,
    GameCube,
}

/// Face-button glyph as printed on the physical controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamepadButtonLabel {
    Unknown,
    A,
    B,
    X,
    Y,
    Cross,
    Circle,
    Square,
    Triangle,
}

const VENDOR_SONY: u16 = 0x054c;
const VENDOR_MICROSOFT: u16 = 0x045e;
const VENDOR_NINTENDO: u16 = 0x057e;

impl GamepadType {
    /// Classify a controller from its USB identity, falling back to name
    /// heuristics for devices behind adapters or remapping layers.
    pub fn classify(vendor_id: u16, product_id: u16, name: &str) -> Self {
        match (vendor_id, product_id) {
            (VENDOR_SONY, 0x0268) => return GamepadType::Ps3,
            (VENDOR_SONY, 0x05c4 | 0x09cc | 0x0ba0) => return GamepadType::Ps4,
            (VENDOR_SONY, 0x0ce6 | 0x0df2) => return GamepadType::Ps5,
            (VENDOR_MICROSOFT, 0x028e | 0x028f | 0x02a1) => return GamepadType::Xbox360,
            (VENDOR_MICROSOFT, 0x02d1 | 0x02dd | 0x02e3 | 0x02ea | 0x0b12 | 0x0b13) => {
                return GamepadType::XboxOne;
            }
            (VENDOR_NINTENDO, 0x2009) => return GamepadType::Switch,
            (VENDOR_NINTENDO, 0x2006) => return GamepadType::JoyconLeft,
            (VENDOR_NINTENDO, 0x2007) => return GamepadType::JoyconRight,
            (VENDOR_NINTENDO, 0x200e) => return GamepadType::JoyconPair,
            (VENDOR_NINTENDO, 0x0337) => return GamepadType::GameCube,
            _ => {}
        }

        let name = name.to_lowercase();
        if name.contains("xbox 360") {
            GamepadType::Xbox360
        } else if name.contains("xbox") {
            GamepadType::XboxOne
        } else if name.contains("dualsense") {
            GamepadType::Ps5
        } else if name.contains("dualshock 4") {
            GamepadType::Ps4
        } else if name.contains("dualshock 3") || name.contains("sixaxis") {
            GamepadType::Ps3
        } else if name.contains("joy-con (l)") {
            GamepadType::JoyconLeft
        } else if name.contains("joy-con (r)") {
            GamepadType::JoyconRight
        } else if name.contains("joy-con") {
            GamepadType::JoyconPair
        } else if name.contains("gamecube") {
            GamepadType::GameCube
        } else if name.contains("switch") || name.contains("pro controller") {
            GamepadType::Switch
        } else if !name.is_empty() {
            GamepadType::Standard
        } else {
            GamepadType::Unknown
        }
    }

    /// Glyph for a button on this controller family. Only face buttons have
    /// labels; everything else is `Unknown`.
    pub fn button_label(self, button: GamepadButton) -> GamepadButtonLabel {
        match self {
            GamepadType::Ps3 | GamepadType::Ps4 | GamepadType::Ps5 => match button {
                GamepadButton::South => GamepadButtonLabel::Cross,
                GamepadButton::East => GamepadButtonLabel::Circle,
                GamepadButton::West => GamepadButtonLabel::Square,
                GamepadButton::North => GamepadButtonLabel::Triangle,
                _ => GamepadButtonLabel::Unknown,
            },
            // Nintendo layouts swap A/B and X/Y relative to Xbox positions
            GamepadType::Switch
            | GamepadType::JoyconLeft
            | GamepadType::JoyconRight
            | GamepadType::JoyconPair
            | GamepadType::GameCube => match button {
                GamepadButton::South => GamepadButtonLabel::B,
                GamepadButton::East => GamepadButtonLabel::A,
                GamepadButton::West => GamepadButtonLabel::Y,
                GamepadButton::North => GamepadButtonLabel::X,
                _ => GamepadButtonLabel::Unknown,
            },
            _ => match button {
                GamepadButton::South => GamepadButtonLabel::A,
                GamepadButton::East => GamepadButtonLabel::B,
                GamepadButton::West => GamepadButtonLabel::X,
                GamepadButton::North => GamepadButtonLabel::Y,
                _ => GamepadButtonLabel::Unknown,
            },
        }
    }
}

/// Raw device state as supplied by the platform backend once per frame.
///
/// Stick components are signed `[-1, 1]` with up as positive y; triggers
/// are `[0, 1]`. The backend owns normalization of vendor integer ranges,
/// including their asymmetric negative extents.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawGamepadState {
    pub buttons: [bool; GamepadButton::COUNT],
    pub left_stick: Vec2,
    pub right_stick: Vec2,
    pub left_trigger: f32,
    pub right_trigger: f32,
}

/// Pending rumble request, drained by the platform backend after the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VibrationRequest {
    Start {
        /// Weak (high-frequency) motor magnitude in `[0, 1]`.
        weak: f32,
        /// Strong (low-frequency) motor magnitude in `[0, 1]`.
        strong: f32,
        duration: Duration,
    },
    Stop,
}

/// One connected gamepad.
pub struct Gamepad {
    id: DeviceId,
    name: String,
    gamepad_type: GamepadType,
    buttons: ButtonStates<{ GamepadButton::COUNT }>,
    raw: RawGamepadState,
    axes: [f32; GamepadAxis::COUNT],
    axes_previous: [f32; GamepadAxis::COUNT],
    vibration_request: Option<VibrationRequest>,
    led_request: Option<Color>,
}

impl Gamepad {
    pub fn new(id: DeviceId, name: impl Into<String>, gamepad_type: GamepadType) -> Self {
        Self {
            id,
            name: name.into(),
            gamepad_type,
            buttons: ButtonStates::new(),
            raw: RawGamepadState::default(),
            axes: [0.0; GamepadAxis::COUNT],
            axes_previous: [0.0; GamepadAxis::COUNT],
            vibration_request: None,
            led_request: None,
        }
    }

    /// Device identifier assigned at connect time. Volatile: not stable
    /// across reconnects of the same physical unit.
    pub fn id(&self) -> DeviceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gamepad_type(&self) -> GamepadType {
        self.gamepad_type
    }

    /// Glyph printed on this controller for the given button.
    pub fn button_label(&self, button: GamepadButton) -> GamepadButtonLabel {
        self.gamepad_type.button_label(button)
    }

    /// Replace the raw snapshot; called by the backend between frames.
    pub fn set_raw_state(&mut self, raw: RawGamepadState) {
        self.raw = raw;
    }

    /// Advance the frame: shadow previous state, latch raw buttons, shape
    /// the analog axes, and split sticks into unsigned directional axes.
    pub fn update(&mut self, config: &InputConfig) {
        self.buttons.refresh();
        self.axes_previous = self.axes;

        self.buttons.set_all(&self.raw.buttons);

        let left = deadzone::smooth2(self.raw.left_stick, config.stick_deadzone);
        let right = deadzone::smooth2(self.raw.right_stick, config.stick_deadzone);
        let left_trigger = deadzone::smooth(self.raw.left_trigger, config.trigger_deadzone);
        let right_trigger = deadzone::smooth(self.raw.right_trigger, config.trigger_deadzone);

        self.axes[GamepadAxis::LeftStickLeft as usize] = (-left.x).max(0.0);
        self.axes[GamepadAxis::LeftStickRight as usize] = left.x.max(0.0);
        self.axes[GamepadAxis::LeftStickUp as usize] = left.y.max(0.0);
        self.axes[GamepadAxis::LeftStickDown as usize] = (-left.y).max(0.0);
        self.axes[GamepadAxis::RightStickLeft as usize] = (-right.x).max(0.0);
        self.axes[GamepadAxis::RightStickRight as usize] = right.x.max(0.0);
        self.axes[GamepadAxis::RightStickUp as usize] = right.y.max(0.0);
        self.axes[GamepadAxis::RightStickDown as usize] = (-right.y).max(0.0);
        self.axes[GamepadAxis::LeftTrigger as usize] = left_trigger;
        self.axes[GamepadAxis::RightTrigger as usize] = right_trigger;
    }

    pub fn is_button_pressed(&self, button: GamepadButton) -> bool {
        self.buttons.is_pressed(button as usize)
    }

    pub fn is_button_just_pressed(&self, button: GamepadButton) -> bool {
        self.buttons.is_just_pressed(button as usize)
    }

    pub fn is_button_just_released(&self, button: GamepadButton) -> bool {
        self.buttons.is_just_released(button as usize)
    }

    /// Current logical axis value in `[0, 1]` (post deadzone shaping).
    pub fn axis_value(&self, axis: GamepadAxis) -> f32 {
        self.axes[axis as usize]
    }

    /// An axis counts as pressed while its shaped value is above zero,
    /// giving buttons and axes the same pressed-state vocabulary.
    pub fn is_axis_pressed(&self, axis: GamepadAxis) -> bool {
        self.axes[axis as usize] > 0.0
    }

    pub fn is_axis_just_pressed(&self, axis: GamepadAxis) -> bool {
        self.axes[axis as usize] > 0.0 && self.axes_previous[axis as usize] <= 0.0
    }

    pub fn is_axis_just_released(&self, axis: GamepadAxis) -> bool {
        self.axes[axis as usize] <= 0.0 && self.axes_previous[axis as usize] > 0.0
    }

    /// Request rumble. Magnitudes are clamped to `[0, 1]` before the
    /// backend scales them to the motor range. Fire-and-forget.
    pub fn begin_vibrate(&mut self, weak: f32, strong: f32, duration: Duration) {
        self.vibration_request = Some(VibrationRequest::Start {
            weak: weak.clamp(0.0, 1.0),
            strong: strong.clamp(0.0, 1.0),
            duration,
        });
    }

    /// Cancel any running rumble. Fire-and-forget.
    pub fn stop_vibrate(&mut self) {
        self.vibration_request = Some(VibrationRequest::Stop);
    }

    /// Request a lightbar/LED color where the hardware has one.
    pub fn set_led_color(&mut self, color: Color) {
        self.led_request = Some(color);
    }

    pub(crate) fn take_vibration_request(&mut self) -> Option<VibrationRequest> {
        self.vibration_request.take()
    }

    pub(crate) fn take_led_request(&mut self) -> Option<Color> {
        self.led_request.take()
    }
}
