//! Mouse device: buttons, position tracking, and scroll accumulation

use glam::Vec2;

use super::button_states::ButtonStates;

/// Mouse button identifier. Variants index the mouse's button bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// First extra button (often "back")
    X1,
    /// Second extra button (often "forward")
    X2,
}

impl MouseButton {
    pub const COUNT: usize = 5;

    /// Translate a winit mouse button; `Other(_)` buttons are dropped.
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(MouseButton::Left),
            winit::event::MouseButton::Right => Some(MouseButton::Right),
            winit::event::MouseButton::Middle => Some(MouseButton::Middle),
            winit::event::MouseButton::Back => Some(MouseButton::X1),
            winit::event::MouseButton::Forward => Some(MouseButton::X2),
            winit::event::MouseButton::Other(_) => None,
        }
    }
}

/// Signed scroll direction for edge-triggered wheel queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseWheel {
    Up,
    Down,
    Left,
    Right,
}

/// Mouse device state.
///
/// Wheel events accumulate into `scroll` between frames; `update()` latches
/// the accumulator into `scroll_delta` and clears it, so the per-frame
/// scroll amount is exactly what arrived since the previous frame.
#[derive(Debug)]
pub struct Mouse {
    buttons: ButtonStates<{ MouseButton::COUNT }>,
    raw_buttons: [bool; MouseButton::COUNT],
    position: Vec2,
    position_previous: Vec2,
    raw_position: Vec2,
    scroll: Vec2,
    scroll_delta: Vec2,
    cursor_visible: bool,
}

impl Default for Mouse {
    fn default() -> Self {
        Self {
            buttons: ButtonStates::new(),
            raw_buttons: [false; MouseButton::COUNT],
            position: Vec2::ZERO,
            position_previous: Vec2::ZERO,
            raw_position: Vec2::ZERO,
            scroll: Vec2::ZERO,
            scroll_delta: Vec2::ZERO,
            cursor_visible: true,
        }
    }
}

impl Mouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a host button event. Unmapped buttons are dropped here.
    pub fn handle_button_event(&mut self, button: winit::event::MouseButton, pressed: bool) {
        if let Some(button) = MouseButton::from_winit(button) {
            self.raw_buttons[button as usize] = pressed;
        }
    }

    /// Record the cursor position in window coordinates.
    pub fn handle_cursor_moved(&mut self, position: Vec2) {
        self.raw_position = position;
    }

    /// Accumulate a scroll delta in lines (positive y = up, positive x = right).
    pub fn handle_wheel_event(&mut self, delta: Vec2) {
        self.scroll += delta;
    }

    /// Advance the frame: shadow previous state, latch raw state, finalize
    /// the scroll accumulator into this frame's delta.
    pub fn update(&mut self) {
        self.buttons.refresh();
        self.buttons.set_all(&self.raw_buttons);
        self.position_previous = self.position;
        self.position = self.raw_position;
        self.scroll_delta = self.scroll;
        self.scroll = Vec2::ZERO;
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons.is_pressed(button as usize)
    }

    pub fn is_button_just_pressed(&self, button: MouseButton) -> bool {
        self.buttons.is_just_pressed(button as usize)
    }

    pub fn is_button_just_released(&self, button: MouseButton) -> bool {
        self.buttons.is_just_released(button as usize)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Cursor movement since the previous frame.
    pub fn position_delta(&self) -> Vec2 {
        self.position - self.position_previous
    }

    /// Scroll amount finalized at the last `update()`.
    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }

    /// True only on a frame where the accumulated scroll moved in the given
    /// direction. Edge-triggered; there is no held state for the wheel.
    pub fn is_wheel_triggered(&self, wheel: MouseWheel) -> bool {
        match wheel {
            MouseWheel::Up => self.scroll_delta.y > 0.0,
            MouseWheel::Down => self.scroll_delta.y < 0.0,
            MouseWheel::Left => self.scroll_delta.x < 0.0,
            MouseWheel::Right => self.scroll_delta.x > 0.0,
        }
    }

    /// Requested cursor visibility; applied to the window by the shell.
    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_translation() {
        assert_eq!(
            MouseButton::from_winit(winit::event::MouseButton::Left),
            Some(MouseButton::Left)
        );
        assert_eq!(
            MouseButton::from_winit(winit::event::MouseButton::Back),
            Some(MouseButton::X1)
        );
        assert_eq!(
            MouseButton::from_winit(winit::event::MouseButton::Forward),
            Some(MouseButton::X2)
        );
        assert_eq!(MouseButton::from_winit(winit::event::MouseButton::Other(7)), None);
    }

    #[test]
    fn test_button_press_edges() {
        let mut mouse = Mouse::new();
        mouse.handle_button_event(winit::event::MouseButton::Left, true);
        mouse.update();
        assert!(mouse.is_button_pressed(MouseButton::Left));
        assert!(mouse.is_button_just_pressed(MouseButton::Left));

        mouse.update();
        assert!(mouse.is_button_pressed(MouseButton::Left));
        assert!(!mouse.is_button_just_pressed(MouseButton::Left));

        mouse.handle_button_event(winit::event::MouseButton::Left, false);
        mouse.update();
        assert!(mouse.is_button_just_released(MouseButton::Left));
    }

    #[test]
    fn test_position_delta_across_frames() {
        let mut mouse = Mouse::new();
        mouse.handle_cursor_moved(Vec2::new(100.0, 50.0));
        mouse.update();
        mouse.handle_cursor_moved(Vec2::new(110.0, 45.0));
        mouse.update();

        assert_eq!(mouse.position(), Vec2::new(110.0, 45.0));
        assert_eq!(mouse.position_delta(), Vec2::new(10.0, -5.0));
    }

    #[test]
    fn test_still_cursor_has_zero_delta() {
        let mut mouse = Mouse::new();
        mouse.handle_cursor_moved(Vec2::new(30.0, 30.0));
        mouse.update();
        mouse.update();
        assert_eq!(mouse.position_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_scroll_accumulates_then_latches() {
        let mut mouse = Mouse::new();
        mouse.handle_wheel_event(Vec2::new(0.0, 1.0));
        mouse.handle_wheel_event(Vec2::new(0.0, 2.0));
        // Not visible until the frame advances
        assert_eq!(mouse.scroll_delta(), Vec2::ZERO);

        mouse.update();
        assert_eq!(mouse.scroll_delta(), Vec2::new(0.0, 3.0));

        // Nothing new arrived: next frame's delta is zero again
        mouse.update();
        assert_eq!(mouse.scroll_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_wheel_triggered_directions() {
        let mut mouse = Mouse::new();
        mouse.handle_wheel_event(Vec2::new(-1.0, 1.0));
        mouse.update();
        assert!(mouse.is_wheel_triggered(MouseWheel::Up));
        assert!(!mouse.is_wheel_triggered(MouseWheel::Down));
        assert!(mouse.is_wheel_triggered(MouseWheel::Left));
        assert!(!mouse.is_wheel_triggered(MouseWheel::Right));

        mouse.update();
        assert!(!mouse.is_wheel_triggered(MouseWheel::Up));
        assert!(!mouse.is_wheel_triggered(MouseWheel::Left));
    }

    #[test]
    fn test_cursor_visibility_flag() {
        let mut mouse = Mouse::new();
        assert!(mouse.cursor_visible());
        mouse.set_cursor_visible(false);
        assert!(!mouse.cursor_visible());
    }
}
