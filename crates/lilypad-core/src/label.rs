//! Row label formatting: truncation for unselected rows and a ping-pong
//! marquee for the selected one.

use crate::nav::ViewKind;

/// Budget for the selected row and for rows in menu views.
pub const MAX_LABEL_CHARS: usize = 30;
/// Budget for unselected rows next to a thumbnail.
pub const MAX_UNSELECTED_CHARS: usize = 20;
/// Frames the selected label rests before it starts to slide.
pub const SCROLL_DELAY_FRAMES: u32 = 60;
/// Frames between one-character slides.
pub const SCROLL_STEP_FRAMES: u32 = 4;

const ELLIPSIS: &str = "...";

/// Marquee position of the selected row. Reset whenever the selection moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    frame_counter: u32,
    offset: usize,
    forward: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            frame_counter: 0,
            offset: 0,
            forward: true,
        }
    }
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current window start, in characters.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Advance one frame for a label that can slide up to `max_offset`.
    fn tick(&mut self, max_offset: usize) {
        self.frame_counter = self.frame_counter.wrapping_add(1);
        if self.frame_counter < SCROLL_DELAY_FRAMES || self.frame_counter % SCROLL_STEP_FRAMES != 0 {
            return;
        }
        if self.forward {
            self.offset += 1;
        } else {
            self.offset = self.offset.saturating_sub(1);
        }
        if self.offset >= max_offset {
            self.offset = max_offset;
            self.forward = false;
        } else if self.offset == 0 {
            self.forward = true;
        }
    }
}

/// `count` characters of `text` starting at character `start`.
fn char_window(text: &str, start: usize, count: usize) -> &str {
    let mut indices = text.char_indices().map(|(i, _)| i).chain([text.len()]);
    let begin = indices.nth(start).unwrap_or(text.len());
    let end = indices.nth(count.saturating_sub(1)).unwrap_or(text.len());
    if count == 0 { &text[begin..begin] } else { &text[begin..end] }
}

/// Text to draw for one row.
///
/// Unselected rows over budget are cut and get `...`. The selected row
/// always has the long budget; when it overflows it advances `scroll` by one
/// frame and returns the current marquee window.
pub fn format_label(name: &str, selected: bool, view: &ViewKind, scroll: &mut ScrollState) -> String {
    let len = name.chars().count();
    let budget = if selected || view.uses_long_labels() {
        MAX_LABEL_CHARS
    } else {
        MAX_UNSELECTED_CHARS
    };

    if len <= budget {
        return name.to_string();
    }
    if !selected {
        return format!("{}{ELLIPSIS}", char_window(name, 0, budget));
    }

    scroll.tick(len - MAX_LABEL_CHARS);
    char_window(name, scroll.offset, MAX_LABEL_CHARS).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG: &str = "The Legend of Zelda - Link's Awakening DX (Rev 2).gbc";

    fn browsing() -> ViewKind {
        ViewKind::SubdirBrowser("/ROMS/gb".into())
    }

    #[test]
    fn short_names_untouched() {
        let mut s = ScrollState::new();
        assert_eq!(format_label("Tetris.gb", false, &browsing(), &mut s), "Tetris.gb");
        assert_eq!(format_label("Tetris.gb", true, &browsing(), &mut s), "Tetris.gb");
        assert_eq!(s, ScrollState::new());
    }

    #[test]
    fn unselected_budget_depends_on_view() {
        let mut s = ScrollState::new();
        let name = "Twenty-five characters!!!";
        assert_eq!(
            format_label(name, false, &browsing(), &mut s),
            "Twenty-five characte..."
        );
        assert_eq!(format_label(name, false, &ViewKind::RootBrowser, &mut s), name);
        assert_eq!(format_label(name, false, &ViewKind::Favorites, &mut s), name);
    }

    #[test]
    fn selected_rests_then_slides() {
        let mut s = ScrollState::new();
        let first: String = LONG.chars().take(MAX_LABEL_CHARS).collect();
        for _ in 0..SCROLL_DELAY_FRAMES - 1 {
            assert_eq!(format_label(LONG, true, &browsing(), &mut s), first);
        }
        // Frame 60 is a step frame.
        let moved = format_label(LONG, true, &browsing(), &mut s);
        assert_eq!(s.offset(), 1);
        assert_eq!(moved, char_window(LONG, 1, MAX_LABEL_CHARS));
        for _ in 0..SCROLL_STEP_FRAMES - 1 {
            format_label(LONG, true, &browsing(), &mut s);
        }
        assert_eq!(s.offset(), 1);
        format_label(LONG, true, &browsing(), &mut s);
        assert_eq!(s.offset(), 2);
    }

    #[test]
    fn marquee_ping_pongs() {
        let name: String = "x".repeat(MAX_LABEL_CHARS + 2);
        let mut s = ScrollState::new();
        let mut seen = Vec::new();
        for _ in 0..SCROLL_DELAY_FRAMES + SCROLL_STEP_FRAMES * 5 {
            format_label(&name, true, &browsing(), &mut s);
            if seen.last() != Some(&s.offset()) {
                seen.push(s.offset());
            }
        }
        assert_eq!(seen, vec![0, 1, 2, 1, 0, 1, 2]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let name = "ポケットモンスター 金 (Japan) (Rev 1) [Crystal Edition].gbc";
        let mut s = ScrollState::new();
        let out = format_label(name, false, &browsing(), &mut s);
        assert_eq!(out.chars().count(), MAX_UNSELECTED_CHARS + ELLIPSIS.len());
        assert!(out.starts_with("ポケットモンスター"));
    }

    #[test]
    fn reset_restarts_delay() {
        let mut s = ScrollState::new();
        for _ in 0..SCROLL_DELAY_FRAMES + 10 {
            format_label(LONG, true, &browsing(), &mut s);
        }
        assert!(s.offset() > 0);
        s.reset();
        assert_eq!(s.offset(), 0);
        format_label(LONG, true, &browsing(), &mut s);
        assert_eq!(s.offset(), 0);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn selected_window_is_bounded_substring(
                name in "\\PC{0,80}",
                frames in 0usize..400,
            ) {
                let mut s = ScrollState::new();
                let mut out = String::new();
                for _ in 0..=frames {
                    out = format_label(&name, true, &browsing(), &mut s);
                }
                prop_assert!(out.chars().count() <= MAX_LABEL_CHARS);
                prop_assert!(name.contains(&out));
            }

            #[test]
            fn unselected_never_exceeds_budget(name in "\\PC{0,80}") {
                let mut s = ScrollState::new();
                let out = format_label(&name, false, &browsing(), &mut s);
                prop_assert!(out.chars().count() <= MAX_UNSELECTED_CHARS + ELLIPSIS.len());
            }
        }
    }
}
