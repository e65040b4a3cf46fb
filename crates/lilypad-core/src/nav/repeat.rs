//! Hold-to-repeat for the vertical d-pad directions.
//!
//! A tap moves on release. Holding past [`REPEAT_DELAY_FRAMES`] moves every
//! [`REPEAT_INTERVAL_FRAMES`] instead, and a held step that would wrap past
//! either end first waits [`BOUNDARY_DELAY_FRAMES`] at that edge. Once a
//! hold has repeated, its release does not move again.

/// Frames a direction must be held before repeating starts.
pub const REPEAT_DELAY_FRAMES: u32 = 20;
/// Frames between repeated steps.
pub const REPEAT_INTERVAL_FRAMES: u32 = 4;
/// Frames a held direction rests at the first or last row before wrapping.
pub const BOUNDARY_DELAY_FRAMES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// What a held frame asks the list to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum HoldStep {
    Wait,
    Move,
}

#[derive(Debug, Default, Clone, Copy)]
pub(super) struct HoldRepeat {
    /// Frames spent at an edge, waiting to wrap.
    boundary_timer: u32,
    boundary_side: Option<Direction>,
    /// A step already fired during the current hold.
    fired: bool,
}

impl HoldRepeat {
    pub(super) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(super) fn boundary(&self) -> Option<(Direction, u32)> {
        self.boundary_side.map(|side| (side, self.boundary_timer))
    }

    /// Decide one held frame. `at_edge` is true when stepping in `dir` would
    /// wrap around.
    pub(super) fn held(&mut self, dir: Direction, held_frames: u32, at_edge: bool) -> HoldStep {
        if held_frames < REPEAT_DELAY_FRAMES {
            return HoldStep::Wait;
        }

        if at_edge {
            if self.boundary_side != Some(dir) {
                self.boundary_side = Some(dir);
                self.boundary_timer = 0;
            }
            self.boundary_timer += 1;
            if self.boundary_timer < BOUNDARY_DELAY_FRAMES {
                return HoldStep::Wait;
            }
            self.boundary_side = None;
            self.boundary_timer = 0;
            self.fired = true;
            return HoldStep::Move;
        }

        self.boundary_side = None;
        self.boundary_timer = 0;
        if (held_frames - REPEAT_DELAY_FRAMES) % REPEAT_INTERVAL_FRAMES != 0 {
            return HoldStep::Wait;
        }
        self.fired = true;
        HoldStep::Move
    }

    /// Whether the release that ends a hold should still move.
    pub(super) fn released(&mut self) -> bool {
        let move_on_release = !self.fired;
        self.reset();
        move_on_release
    }
}
