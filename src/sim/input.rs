//! Held-control state and raw key events
//!
//! Input handlers never touch the simulation directly. They produce
//! `InputEvent`s which the driver applies to an `InputState` between ticks;
//! the tick only ever reads a snapshot.

use serde::{Deserialize, Serialize};

/// A player control action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Left,
    Right,
    Accelerate,
    Brake,
}

impl Control {
    /// Map a DOM-style key code to a control
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Control::Left),
            "ArrowRight" | "KeyD" => Some(Control::Right),
            "ArrowUp" | "KeyW" => Some(Control::Accelerate),
            "ArrowDown" | "KeyS" => Some(Control::Brake),
            _ => None,
        }
    }
}

/// A key edge: press or release of one control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    pub control: Control,
    pub pressed: bool,
}

impl InputEvent {
    pub fn press(control: Control) -> Self {
        Self { control, pressed: true }
    }

    pub fn release(control: Control) -> Self {
        Self { control, pressed: false }
    }
}

/// Which controls are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub accelerate: bool,
    pub brake: bool,
}

impl InputState {
    /// Apply a key edge. Repeats are harmless: a flag is simply set again.
    pub fn apply(&mut self, event: InputEvent) {
        let flag = match event.control {
            Control::Left => &mut self.left,
            Control::Right => &mut self.right,
            Control::Accelerate => &mut self.accelerate,
            Control::Brake => &mut self.brake,
        };
        *flag = event.pressed;
    }

    pub fn is_held(&self, control: Control) -> bool {
        match control {
            Control::Left => self.left,
            Control::Right => self.right,
            Control::Accelerate => self.accelerate,
            Control::Brake => self.brake,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::default();
        input.apply(InputEvent::press(Control::Left));
        input.apply(InputEvent::press(Control::Accelerate));
        assert!(input.left && input.accelerate);
        assert!(!input.right && !input.brake);

        input.apply(InputEvent::release(Control::Left));
        assert!(!input.left);
        assert!(input.is_held(Control::Accelerate));
    }

    #[test]
    fn test_repeated_press_is_idempotent() {
        let mut input = InputState::default();
        input.apply(InputEvent::press(Control::Brake));
        input.apply(InputEvent::press(Control::Brake));
        assert!(input.brake);
        input.apply(InputEvent::release(Control::Brake));
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(Control::from_key_code("ArrowUp"), Some(Control::Accelerate));
        assert_eq!(Control::from_key_code("ArrowDown"), Some(Control::Brake));
        assert_eq!(Control::from_key_code("KeyA"), Some(Control::Left));
        assert_eq!(Control::from_key_code("Space"), None);
    }
}
