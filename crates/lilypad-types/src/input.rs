//! Platform-agnostic input types.
//!
//! The host reports raw per-control state once per frame. The core turns
//! that into press/release events; navigation acts on releases.

use serde::{Deserialize, Serialize};

/// An edge-triggered input event derived from two consecutive frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A face / d-pad button went down this frame.
    ButtonPress(Button),
    /// A face / d-pad button went up this frame.
    ButtonRelease(Button),
    /// Shoulder trigger went down this frame.
    TriggerPress(Trigger),
    /// Shoulder trigger went up this frame.
    TriggerRelease(Trigger),
}

/// Face and d-pad buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    /// Launch / enter (A).
    Confirm,
    /// Back (B).
    Cancel,
    /// Favourite toggle (X).
    Triangle,
    /// Unused by the browser, forwarded to the settings editor (Y).
    Square,
    Start,
    Select,
}

/// Shoulder / trigger buttons. Used for paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    Left,
    Right,
}

/// Any single physical control the host can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Button(Button),
    Trigger(Trigger),
}

impl Control {
    /// Every control, in a stable order (used as an index into state arrays).
    pub const ALL: [Control; 12] = [
        Control::Button(Button::Up),
        Control::Button(Button::Down),
        Control::Button(Button::Left),
        Control::Button(Button::Right),
        Control::Button(Button::Confirm),
        Control::Button(Button::Cancel),
        Control::Button(Button::Triangle),
        Control::Button(Button::Square),
        Control::Button(Button::Start),
        Control::Button(Button::Select),
        Control::Trigger(Trigger::Left),
        Control::Trigger(Trigger::Right),
    ];

    /// Position of this control in [`Control::ALL`].
    pub fn index(self) -> usize {
        match self {
            Control::Button(Button::Up) => 0,
            Control::Button(Button::Down) => 1,
            Control::Button(Button::Left) => 2,
            Control::Button(Button::Right) => 3,
            Control::Button(Button::Confirm) => 4,
            Control::Button(Button::Cancel) => 5,
            Control::Button(Button::Triangle) => 6,
            Control::Button(Button::Square) => 7,
            Control::Button(Button::Start) => 8,
            Control::Button(Button::Select) => 9,
            Control::Trigger(Trigger::Left) => 10,
            Control::Trigger(Trigger::Right) => 11,
        }
    }

    /// Parse a control from a short name (`up`, `a`, `l`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let control = match name.trim().to_ascii_lowercase().as_str() {
            "up" => Control::Button(Button::Up),
            "down" => Control::Button(Button::Down),
            "left" => Control::Button(Button::Left),
            "right" => Control::Button(Button::Right),
            "a" | "confirm" => Control::Button(Button::Confirm),
            "b" | "cancel" | "back" => Control::Button(Button::Cancel),
            "x" | "triangle" => Control::Button(Button::Triangle),
            "y" | "square" => Control::Button(Button::Square),
            "start" => Control::Button(Button::Start),
            "select" => Control::Button(Button::Select),
            "l" => Control::Trigger(Trigger::Left),
            "r" => Control::Trigger(Trigger::Right),
            _ => return None,
        };
        Some(control)
    }

    /// The event emitted when this control goes up.
    pub fn release_event(self) -> InputEvent {
        match self {
            Control::Button(b) => InputEvent::ButtonRelease(b),
            Control::Trigger(t) => InputEvent::TriggerRelease(t),
        }
    }

    /// The event emitted when this control goes down.
    pub fn press_event(self) -> InputEvent {
        match self {
            Control::Button(b) => InputEvent::ButtonPress(b),
            Control::Trigger(t) => InputEvent::TriggerPress(t),
        }
    }
}
