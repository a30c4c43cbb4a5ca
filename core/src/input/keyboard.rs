//! Keyboard device and device-neutral key identifiers

use winit::keyboard::KeyCode;

use super::button_states::ButtonStates;

/// Device-neutral key identifier.
///
/// Variants double as indices into the keyboard's button bank, so the enum
/// must stay dense (no explicit discriminants, `NumLock` last).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    // Digit row
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    // Main block
    Escape,
    Grave,
    Minus,
    Equal,
    Backspace,
    Tab,
    LeftBracket,
    RightBracket,
    Backslash,
    CapsLock,
    Semicolon,
    Apostrophe,
    Enter,
    LeftShift,
    Comma,
    Period,
    Slash,
    RightShift,
    LeftControl,
    LeftAlt,
    Space,
    RightAlt,
    RightControl,
    LeftSuper,
    RightSuper,
    // Editing and navigation
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    PrintScreen,
    ScrollLock,
    Pause,
    // Arrows
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    // Numpad
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    NumpadDivide,
    NumpadMultiply,
    NumpadSubtract,
    NumpadAdd,
    NumpadEnter,
    NumpadDecimal,
    NumLock,
}

impl Key {
    /// Number of enumerated keys; sizes the keyboard's button bank.
    pub const COUNT: usize = 103;

    /// Translate a winit key code into the engine key space.
    ///
    /// Returns `None` for host keys with no engine equivalent; those never
    /// reach the button bank, so their queries stay false.
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        let key = match code {
            KeyCode::KeyA => Key::A,
            KeyCode::KeyB => Key::B,
            KeyCode::KeyC => Key::C,
            KeyCode::KeyD => Key::D,
            KeyCode::KeyE => Key::E,
            KeyCode::KeyF => Key::F,
            KeyCode::KeyG => Key::G,
            KeyCode::KeyH => Key::H,
            KeyCode::KeyI => Key::I,
            KeyCode::KeyJ => Key::J,
            KeyCode::KeyK => Key::K,
            KeyCode::KeyL => Key::L,
            KeyCode::KeyM => Key::M,
            KeyCode::KeyN => Key::N,
            KeyCode::KeyO => Key::O,
            KeyCode::KeyP => Key::P,
            KeyCode::KeyQ => Key::Q,
            KeyCode::KeyR => Key::R,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyT => Key::T,
            KeyCode::KeyU => Key::U,
            KeyCode::KeyV => Key::V,
            KeyCode::KeyW => Key::W,
            KeyCode::KeyX => Key::X,
            KeyCode::KeyY => Key::Y,
            KeyCode::KeyZ => Key::Z,
            KeyCode::Digit0 => Key::Digit0,
            KeyCode::Digit1 => Key::Digit1,
            KeyCode::Digit2 => Key::Digit2,
            KeyCode::Digit3 => Key::Digit3,
            KeyCode::Digit4 => Key::Digit4,
            KeyCode::Digit5 => Key::Digit5,
            KeyCode::Digit6 => Key::Digit6,
            KeyCode::Digit7 => Key::Digit7,
            KeyCode::Digit8 => Key::Digit8,
            KeyCode::Digit9 => Key::Digit9,
            KeyCode::F1 => Key::F1,
            KeyCode::F2 => Key::F2,
            KeyCode::F3 => Key::F3,
            KeyCode::F4 => Key::F4,
            KeyCode::F5 => Key::F5,
            KeyCode::F6 => Key::F6,
            KeyCode::F7 => Key::F7,
            KeyCode::F8 => Key::F8,
            KeyCode::F9 => Key::F9,
            KeyCode::F10 => Key::F10,
            KeyCode::F11 => Key::F11,
            KeyCode::F12 => Key::F12,
            KeyCode::Escape => Key::Escape,
            KeyCode::Backquote => Key::Grave,
            KeyCode::Minus => Key::Minus,
            KeyCode::Equal => Key::Equal,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab => Key::Tab,
            KeyCode::BracketLeft => Key::LeftBracket,
            KeyCode::BracketRight => Key::RightBracket,
            KeyCode::Backslash => Key::Backslash,
            KeyCode::CapsLock => Key::CapsLock,
            KeyCode::Semicolon => Key::Semicolon,
            KeyCode::Quote => Key::Apostrophe,
            KeyCode::Enter => Key::Enter,
            KeyCode::ShiftLeft => Key::LeftShift,
            KeyCode::Comma => Key::Comma,
            KeyCode::Period => Key::Period,
            KeyCode::Slash => Key::Slash,
            KeyCode::ShiftRight => Key::RightShift,
            KeyCode::ControlLeft => Key::LeftControl,
            KeyCode::AltLeft => Key::LeftAlt,
            KeyCode::Space => Key::Space,
            KeyCode::AltRight => Key::RightAlt,
            KeyCode::ControlRight => Key::RightControl,
            KeyCode::SuperLeft => Key::LeftSuper,
            KeyCode::SuperRight => Key::RightSuper,
            KeyCode::Insert => Key::Insert,
            KeyCode::Delete => Key::Delete,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::PrintScreen => Key::PrintScreen,
            KeyCode::ScrollLock => Key::ScrollLock,
            KeyCode::Pause => Key::Pause,
            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,
            KeyCode::Numpad0 => Key::Numpad0,
            KeyCode::Numpad1 => Key::Numpad1,
            KeyCode::Numpad2 => Key::Numpad2,
            KeyCode::Numpad3 => Key::Numpad3,
            KeyCode::Numpad4 => Key::Numpad4,
            KeyCode::Numpad5 => Key::Numpad5,
            KeyCode::Numpad6 => Key::Numpad6,
            KeyCode::Numpad7 => Key::Numpad7,
            KeyCode::Numpad8 => Key::Numpad8,
            KeyCode::Numpad9 => Key::Numpad9,
            KeyCode::NumpadDivide => Key::NumpadDivide,
            KeyCode::NumpadMultiply => Key::NumpadMultiply,
            KeyCode::NumpadSubtract => Key::NumpadSubtract,
            KeyCode::NumpadAdd => Key::NumpadAdd,
            KeyCode::NumpadEnter => Key::NumpadEnter,
            KeyCode::NumpadDecimal => Key::NumpadDecimal,
            KeyCode::NumLock => Key::NumLock,
            _ => return None,
        };
        Some(key)
    }
}

/// Keyboard device: a button bank over [`Key`] plus the live key array
/// written by window events between frames.
#[derive(Debug)]
pub struct Keyboard {
    buttons: ButtonStates<{ Key::COUNT }>,
    raw: [bool; Key::COUNT],
}

impl Default for Keyboard {
    fn default() -> Self {
        Self {
            buttons: ButtonStates::default(),
            raw: [false; Key::COUNT],
        }
    }
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a host key event. Unmapped key codes are dropped here.
    pub fn handle_key_event(&mut self, code: KeyCode, pressed: bool) {
        if let Some(key) = Key::from_key_code(code) {
            self.raw[key as usize] = pressed;
        }
    }

    /// Advance the frame: shadow the previous state, then latch raw state.
    pub fn update(&mut self) {
        self.buttons.refresh();
        self.buttons.set_all(&self.raw);
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.buttons.is_pressed(key as usize)
    }

    pub fn is_key_just_pressed(&self, key: Key) -> bool {
        self.buttons.is_just_pressed(key as usize)
    }

    pub fn is_key_just_released(&self, key: Key) -> bool {
        self.buttons.is_just_released(key as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_count_matches_last_variant() {
        assert_eq!(Key::NumLock as usize, Key::COUNT - 1);
    }

    #[test]
    fn test_from_key_code_letters() {
        assert_eq!(Key::from_key_code(KeyCode::KeyA), Some(Key::A));
        assert_eq!(Key::from_key_code(KeyCode::KeyZ), Some(Key::Z));
    }

    #[test]
    fn test_from_key_code_arrows_and_numpad() {
        assert_eq!(Key::from_key_code(KeyCode::ArrowUp), Some(Key::ArrowUp));
        assert_eq!(Key::from_key_code(KeyCode::Numpad7), Some(Key::Numpad7));
        assert_eq!(
            Key::from_key_code(KeyCode::NumpadEnter),
            Some(Key::NumpadEnter)
        );
    }

    #[test]
    fn test_from_key_code_unmapped_returns_none() {
        assert_eq!(Key::from_key_code(KeyCode::ContextMenu), None);
        assert_eq!(Key::from_key_code(KeyCode::MediaPlayPause), None);
        assert_eq!(Key::from_key_code(KeyCode::IntlBackslash), None);
    }

    #[test]
    fn test_key_event_visible_after_update() {
        let mut keyboard = Keyboard::new();
        keyboard.handle_key_event(KeyCode::Space, true);
        // Raw state is not visible until the frame advances
        assert!(!keyboard.is_key_pressed(Key::Space));

        keyboard.update();
        assert!(keyboard.is_key_pressed(Key::Space));
        assert!(keyboard.is_key_just_pressed(Key::Space));
    }

    #[test]
    fn test_held_key_stops_being_just_pressed() {
        let mut keyboard = Keyboard::new();
        keyboard.handle_key_event(KeyCode::KeyW, true);
        keyboard.update();
        assert!(keyboard.is_key_just_pressed(Key::W));

        keyboard.update();
        assert!(keyboard.is_key_pressed(Key::W));
        assert!(!keyboard.is_key_just_pressed(Key::W));
    }

    #[test]
    fn test_release_edge() {
        let mut keyboard = Keyboard::new();
        keyboard.handle_key_event(KeyCode::Enter, true);
        keyboard.update();
        keyboard.handle_key_event(KeyCode::Enter, false);
        keyboard.update();
        assert!(!keyboard.is_key_pressed(Key::Enter));
        assert!(keyboard.is_key_just_released(Key::Enter));

        keyboard.update();
        assert!(!keyboard.is_key_just_released(Key::Enter));
    }

    #[test]
    fn test_unmapped_key_event_is_dropped() {
        let mut keyboard = Keyboard::new();
        keyboard.handle_key_event(KeyCode::ContextMenu, true);
        keyboard.update();
        for i in 0..Key::COUNT {
            assert!(!keyboard.buttons.is_pressed(i), "key index {} leaked", i);
        }
    }
}
