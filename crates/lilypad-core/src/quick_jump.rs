//! A-Z quick jump overlay.
//!
//! A 7-column grid of 28 cells: the letters, then a digit bucket and a
//! bucket for everything else. Confirming a cell moves the selection to the
//! first row whose name starts in that bucket.

use lilypad_types::input::Button;

use crate::entry::Entry;

pub const GRID_COLUMNS: usize = 7;
pub const GRID_CELLS: usize = 28;

/// Cell captions in grid order.
pub const CELL_LABELS: [&str; GRID_CELLS] = [
    "A", "B", "C", "D", "E", "F", "G", //
    "H", "I", "J", "K", "L", "M", "N", //
    "O", "P", "Q", "R", "S", "T", "U", //
    "V", "W", "X", "Y", "Z", "0-9", "#",
];

/// What a grid cell matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Letter(char),
    Digit,
    Other,
}

impl Bucket {
    pub fn for_cell(index: usize) -> Self {
        match index {
            0..=25 => Bucket::Letter((b'A' + index as u8) as char),
            26 => Bucket::Digit,
            _ => Bucket::Other,
        }
    }

    /// Whether a name starting with `first` falls in this bucket. Letters
    /// compare ASCII case-insensitively.
    pub fn matches(self, first: char) -> bool {
        match self {
            Bucket::Letter(letter) => first.to_ascii_uppercase() == letter,
            Bucket::Digit => first.is_ascii_digit(),
            Bucket::Other => !first.is_ascii_alphanumeric(),
        }
    }
}

/// Index of the first row whose name starts in `bucket`. Names are tested
/// as shown, `..` included.
pub fn find_first(entries: &[Entry], bucket: Bucket) -> Option<usize> {
    entries.iter().position(|e| {
        e.display_name
            .chars()
            .next()
            .is_some_and(|c| bucket.matches(c))
    })
}

/// What a button did to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// Still open.
    Open,
    /// Closed by confirm; carries the matching row, if any.
    Jump(Option<usize>),
    Cancelled,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QuickJump {
    active: bool,
    grid_index: usize,
}

impl QuickJump {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn grid_index(&self) -> usize {
        self.grid_index
    }

    /// Open on the first cell.
    pub fn open(&mut self) {
        self.active = true;
        self.grid_index = 0;
    }

    pub fn close(&mut self) {
        self.active = false;
    }

    /// Feed a released button. Movement stops at the grid edges.
    pub fn handle_button(&mut self, button: Button, entries: &[Entry]) -> JumpOutcome {
        if !self.active {
            return JumpOutcome::Cancelled;
        }
        match button {
            Button::Up if self.grid_index >= GRID_COLUMNS => self.grid_index -= GRID_COLUMNS,
            Button::Down if self.grid_index + GRID_COLUMNS < GRID_CELLS => {
                self.grid_index += GRID_COLUMNS;
            },
            Button::Left if self.grid_index > 0 => self.grid_index -= 1,
            Button::Right if self.grid_index + 1 < GRID_CELLS => self.grid_index += 1,
            Button::Confirm => {
                self.active = false;
                return JumpOutcome::Jump(find_first(entries, Bucket::for_cell(self.grid_index)));
            },
            Button::Cancel => {
                self.active = false;
                return JumpOutcome::Cancelled;
            },
            _ => {},
        }
        JumpOutcome::Open
    }
}
