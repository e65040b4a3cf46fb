//! Edge detection over the host's per-frame control state.

use lilypad_types::input::{Control, InputEvent};

const CONTROLS: usize = Control::ALL.len();

/// Remembers last frame's state so presses and releases can be reported.
#[derive(Debug, Default, Clone)]
pub struct InputTracker {
    down: [bool; CONTROLS],
    /// Consecutive frames each control has been down (0 when up).
    held: [u32; CONTROLS],
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample every control once and return this frame's edges, presses
    /// before releases, each in [`Control::ALL`] order.
    pub fn update(&mut self, mut is_down: impl FnMut(Control) -> bool) -> Vec<InputEvent> {
        let mut presses = Vec::new();
        let mut releases = Vec::new();
        for control in Control::ALL {
            let i = control.index();
            let now = is_down(control);
            match (self.down[i], now) {
                (false, true) => presses.push(control.press_event()),
                (true, false) => releases.push(control.release_event()),
                _ => {},
            }
            self.down[i] = now;
            self.held[i] = if now { self.held[i].saturating_add(1) } else { 0 };
        }
        presses.extend(releases);
        presses
    }

    /// Frames `control` has been down, counting the current one.
    pub fn held_frames(&self, control: Control) -> u32 {
        self.held[control.index()]
    }

    /// Forget all state, so a control that stays down is not released.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
