//! Double-buffered button state storage shared by all input devices

/// Fixed-size bank of boolean button states with a previous-frame shadow.
///
/// Every device (keyboard, mouse, gamepad) owns one of these, sized to its
/// button count. `refresh()` must be called exactly once per frame, before
/// new raw state is written, so edge queries stay frame-quantized.
#[derive(Debug, Clone, Copy)]
pub struct ButtonStates<const N: usize> {
    current: [bool; N],
    previous: [bool; N],
}

impl<const N: usize> Default for ButtonStates<N> {
    fn default() -> Self {
        Self {
            current: [false; N],
            previous: [false; N],
        }
    }
}

impl<const N: usize> ButtonStates<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `current` into `previous`, opening a new frame.
    pub fn refresh(&mut self) {
        self.previous = self.current;
    }

    /// Write one button's live state. Index must be within the device's
    /// enumerated button space.
    pub fn set(&mut self, index: usize, down: bool) {
        self.current[index] = down;
    }

    /// Overwrite all live states at once from a raw snapshot.
    pub fn set_all(&mut self, states: &[bool; N]) {
        self.current = *states;
    }

    pub fn is_pressed(&self, index: usize) -> bool {
        self.current[index]
    }

    pub fn is_just_pressed(&self, index: usize) -> bool {
        self.current[index] && !self.previous[index]
    }

    pub fn is_just_released(&self, index: usize) -> bool {
        !self.current[index] && self.previous[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bank_is_all_released() {
        let bank: ButtonStates<4> = ButtonStates::new();
        for i in 0..4 {
            assert!(!bank.is_pressed(i));
            assert!(!bank.is_just_pressed(i));
            assert!(!bank.is_just_released(i));
        }
    }

    #[test]
    fn test_press_is_just_pressed_for_one_frame() {
        let mut bank: ButtonStates<4> = ButtonStates::new();

        // Frame 1: button goes down
        bank.refresh();
        bank.set(2, true);
        assert!(bank.is_pressed(2));
        assert!(bank.is_just_pressed(2));
        assert!(!bank.is_just_released(2));

        // Frame 2: still held
        bank.refresh();
        bank.set(2, true);
        assert!(bank.is_pressed(2));
        assert!(!bank.is_just_pressed(2));
        assert!(!bank.is_just_released(2));
    }

    #[test]
    fn test_release_is_just_released_for_one_frame() {
        let mut bank: ButtonStates<4> = ButtonStates::new();

        bank.refresh();
        bank.set(0, true);

        // Frame 2: released
        bank.refresh();
        bank.set(0, false);
        assert!(!bank.is_pressed(0));
        assert!(!bank.is_just_pressed(0));
        assert!(bank.is_just_released(0));

        // Frame 3: still up
        bank.refresh();
        assert!(!bank.is_just_released(0));
    }

    #[test]
    fn test_refresh_without_write_keeps_held_state() {
        let mut bank: ButtonStates<2> = ButtonStates::new();
        bank.refresh();
        bank.set(1, true);
        bank.refresh();
        // No write this frame: current still reflects the held button
        assert!(bank.is_pressed(1));
        assert!(!bank.is_just_pressed(1));
    }

    #[test]
    fn test_set_all_overwrites_every_state() {
        let mut bank: ButtonStates<3> = ButtonStates::new();
        bank.refresh();
        bank.set_all(&[true, false, true]);
        assert!(bank.is_pressed(0));
        assert!(!bank.is_pressed(1));
        assert!(bank.is_pressed(2));
        assert!(bank.is_just_pressed(0));
        assert!(bank.is_just_pressed(2));
    }

    #[test]
    fn test_bounce_within_one_frame_is_invisible_to_edges() {
        let mut bank: ButtonStates<1> = ButtonStates::new();
        bank.refresh();
        bank.set(0, true);
        bank.set(0, false);
        bank.set(0, true);
        // Only the final state matters once the frame is queried
        assert!(bank.is_pressed(0));
        assert!(bank.is_just_pressed(0));
    }
}
