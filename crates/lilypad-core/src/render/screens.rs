//! Screen layouts.
//!
//! All coordinates are for the fixed 320x240 screen.

use lilypad_types::color::Rgb565;

use crate::collab::SettingsRow;
use crate::theme::Theme;
use crate::thumbnail::Thumbnail;

use super::font::TextRenderer;
use super::{Framebuffer, SCREEN_H, SCREEN_W};

pub const PADDING: i32 = 16;
pub const TITLE_Y: i32 = 10;
pub const LIST_TOP: i32 = 40;
pub const ITEM_HEIGHT: i32 = 20;
const PILL_PAD: i32 = 6;
const EDGE_MARGIN: i32 = 12;
const LEGEND_Y: i32 = SCREEN_H as i32 - 24;
const LABEL_Y: i32 = 8;

const TEXT_TOP: i32 = 50;
const TEXT_LINE: i32 = 24;

const QUICK_JUMP_W: u32 = 280;
const QUICK_JUMP_H: u32 = 180;
const QUICK_JUMP_TITLE_Y: i32 = 30;
const GRID_X: i32 = 40;
const GRID_Y: i32 = 70;
const GRID_COL_W: i32 = 38;
const GRID_ROW_H: i32 = 30;

/// Options shown per page of the settings screen (two lines each).
const SETTINGS_VISIBLE: usize = 3;

const HOTKEYS: [&str; 5] = [
    "SAVE STATE: L + R + X",
    "LOAD STATE: L + R + Y",
    "NEXT SLOT: L + R + >",
    "PREV SLOT: L + R + <",
    "SCREENSHOT: L + R + START",
];

const CREDITS: [(&str, &str); 2] = [
    (" Development ", "The lilypad contributors"),
    (" Design ", "The lilypad contributors"),
];

/// Which button hints the legend shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendMode {
    /// Folders and menus.
    Browse,
    /// A game list where X toggles a favourite.
    Favourite,
    /// The favourites list, where X removes.
    Remove,
    /// Text screens.
    Back,
    Settings,
}

impl LegendMode {
    pub fn text(self) -> &'static str {
        match self {
            LegendMode::Browse => " A - OPEN  B - BACK ",
            LegendMode::Favourite => " A - OPEN  B - BACK  X - FAV ",
            LegendMode::Remove => " A - OPEN  B - BACK  X - REMOVE ",
            LegendMode::Back => " B - BACK ",
            LegendMode::Settings => " A - SAVE   B - EXIT   Y - RESET ",
        }
    }
}

/// One visible list row, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub text: String,
    pub selected: bool,
    pub favorite: bool,
}

/// Draws whole screens with one font and theme.
pub struct Painter<'a> {
    pub fb: &'a mut Framebuffer,
    pub font: &'a dyn TextRenderer,
    pub theme: &'a Theme,
}

impl Painter<'_> {
    pub fn background(&mut self) {
        self.fb.clear(self.theme.background);
    }

    fn text(&mut self, x: i32, y: i32, text: &str, color: Rgb565) {
        self.font.draw(self.fb, x, y, text, color);
    }

    /// Text on a rounded pill that extends `pad` pixels past it sideways.
    fn pillbox(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        bg: Rgb565,
        fg: Rgb565,
        pad: i32,
    ) {
        let w = self.font.measure(text) as i32 + pad * 2;
        let h = self.font.line_height() + 4;
        self.fb
            .fill_rounded_rect(x - pad, y - 2, w.max(0) as u32, h, h / 2, bg);
        self.text(x, y, text, fg);
    }

    fn centered_x(&self, text: &str) -> i32 {
        (SCREEN_W as i32 - self.font.measure(text) as i32) / 2
    }

    pub fn header(&mut self, title: &str) {
        let color = self.theme.header;
        self.text(PADDING, TITLE_Y, title, color);
    }

    /// Preview on the right half, vertically centred. Rows are drawn over it.
    pub fn thumbnail(&mut self, image: &Thumbnail) {
        let x = SCREEN_W as i32 - image.width as i32 - 8;
        let y = (SCREEN_H as i32 - image.height as i32) / 2;
        self.fb.blit(image, x, y);
    }

    /// The visible rows, top to bottom.
    pub fn rows(&mut self, rows: &[RowView]) {
        for (i, row) in rows.iter().enumerate() {
            let y = LIST_TOP + i as i32 * ITEM_HEIGHT;
            if row.favorite {
                let marker = self.theme.favorite;
                self.fb.fill_rect(PADDING - 12, y + 3, 6, 6, marker);
            }
            if row.selected {
                let (bg, fg) = (self.theme.select_bg, self.theme.select_text);
                self.pillbox(PADDING, y, &row.text, bg, fg, PILL_PAD);
            } else {
                let color = self.theme.text;
                self.text(PADDING, y, &row.text, color);
            }
        }
    }

    /// `selected/count` in the top-right corner (1-based).
    pub fn position_label(&mut self, selected: usize, count: usize) {
        let label = format!("{}/{}", selected + 1, count);
        let x = SCREEN_W as i32 - self.font.measure(&label) as i32 - EDGE_MARGIN;
        let (bg, fg) = (self.theme.legend_bg, self.theme.legend);
        self.pillbox(x, LABEL_Y, &label, bg, fg, PILL_PAD);
    }

    pub fn legend(&mut self, mode: LegendMode) {
        let text = mode.text();
        let width = self.font.measure(text) as i32;
        let x = SCREEN_W as i32 - width - EDGE_MARGIN;
        self.fb
            .fill_rounded_rect(x - 4, LEGEND_Y - 2, (width + 8) as u32, 20, 10, self.theme.legend_bg);
        let color = self.theme.legend;
        self.text(x, LEGEND_Y, text, color);
    }

    /// The A-Z grid in a centred box.
    pub fn quick_jump(&mut self, labels: &[&str], grid_index: usize, columns: usize) {
        let box_x = (SCREEN_W - QUICK_JUMP_W) as i32 / 2;
        let box_y = (SCREEN_H - QUICK_JUMP_H) as i32 / 2;
        self.fb
            .fill_rect(box_x, box_y, QUICK_JUMP_W, QUICK_JUMP_H, self.theme.background);

        let title = "QUICK JUMP";
        let x = self.centered_x(title);
        let (bg, fg) = (self.theme.select_bg, self.theme.select_text);
        self.pillbox(x, QUICK_JUMP_TITLE_Y, title, bg, fg, PILL_PAD);

        for (i, label) in labels.iter().enumerate() {
            let x = GRID_X + (i % columns) as i32 * GRID_COL_W;
            let y = GRID_Y + (i / columns) as i32 * GRID_ROW_H;
            if i == grid_index {
                self.pillbox(x, y, label, bg, fg, PILL_PAD);
            } else {
                let color = self.theme.text;
                self.text(x, y, label, color);
            }
        }
    }

    pub fn hotkeys(&mut self) {
        self.background();
        self.header("HOTKEYS");
        let color = self.theme.text;
        for (i, line) in HOTKEYS.iter().enumerate() {
            self.text(PADDING, TEXT_TOP + i as i32 * TEXT_LINE, line, color);
        }
        self.legend(LegendMode::Back);
    }

    pub fn credits(&mut self) {
        self.background();
        self.header("CREDITS");
        for (i, (section, names)) in CREDITS.iter().enumerate() {
            let y = TEXT_TOP + i as i32 * TEXT_LINE * 2;
            let (bg, fg, text) = (self.theme.header, self.theme.background, self.theme.text);
            self.pillbox(PADDING, y, section, bg, fg, 4);
            self.text(PADDING, y + TEXT_LINE, names, text);
        }
        self.legend(LegendMode::Back);
    }

    /// Shown once a game has been handed to the loader.
    pub fn loading(&mut self) {
        self.background();
        let text = "LOADING...";
        let x = self.centered_x(text);
        let y = (SCREEN_H as i32 - self.font.line_height() as i32) / 2;
        let (bg, fg) = (self.theme.header, self.theme.background);
        self.pillbox(x, y, text, bg, fg, PILL_PAD);
    }

    /// Blocking screen painted while the empty folder cache is rebuilt.
    pub fn rebuild_progress(&mut self, done: usize, total: usize) {
        self.background();
        let text = "Rebuilding folder cache...";
        let x = self.centered_x(text);
        let y = (SCREEN_H as i32 - self.font.line_height() as i32) / 2;
        let (bg, fg) = (self.theme.select_bg, self.theme.select_text);
        self.pillbox(x, y, text, bg, fg, PILL_PAD);

        let bar_w = 200u32;
        let bar_x = (SCREEN_W - bar_w) as i32 / 2;
        let bar_y = y + 24;
        self.fb.fill_rect(bar_x, bar_y, bar_w, 6, self.theme.legend_bg);
        if total > 0 {
            let filled = (bar_w as usize * done.min(total) / total) as u32;
            self.fb.fill_rect(bar_x, bar_y, filled, 6, self.theme.header);
        }
    }

    /// Options editor: name on one line, value on the next.
    pub fn settings(&mut self, title: &str, rows: &[SettingsRow], selected: usize) {
        self.background();
        self.header(title);

        let first = selected.saturating_sub(SETTINGS_VISIBLE - 1);
        for (i, row) in rows.iter().enumerate().skip(first).take(SETTINGS_VISIBLE) {
            let y_name = LIST_TOP + (i - first) as i32 * ITEM_HEIGHT * 2;
            let y_value = y_name + ITEM_HEIGHT;
            let text = self.theme.text;
            self.text(PADDING, y_name, &row.label, text);
            if i == selected {
                let value = format!("< {} >", row.value);
                let (bg, fg) = (self.theme.select_bg, self.theme.select_text);
                self.pillbox(PADDING, y_value, &value, bg, fg, PILL_PAD);
            } else {
                self.text(PADDING, y_value, &row.value, text);
            }
        }
        self.legend(LegendMode::Settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::BlockFont;

    fn with_painter(f: impl FnOnce(&mut Painter<'_>)) -> Framebuffer {
        let mut fb = Framebuffer::new();
        let font = BlockFont::default();
        let theme = Theme::DEFAULT;
        {
            let mut painter = Painter {
                fb: &mut fb,
                font: &font,
                theme: &theme,
            };
            f(&mut painter);
        }
        fb
    }

    #[test]
    fn legends_fit_on_screen() {
        let font = BlockFont::default();
        for mode in [
            LegendMode::Browse,
            LegendMode::Favourite,
            LegendMode::Remove,
            LegendMode::Back,
            LegendMode::Settings,
        ] {
            assert!(font.measure(mode.text()) as i32 + EDGE_MARGIN + 4 <= SCREEN_W as i32);
        }
    }

    #[test]
    fn selected_row_gets_pill() {
        let fb = with_painter(|p| {
            p.background();
            p.rows(&[
                RowView {
                    text: "gb".into(),
                    selected: false,
                    favorite: false,
                },
                RowView {
                    text: "nes".into(),
                    selected: true,
                    favorite: true,
                },
            ]);
        });
        let second_row = (LIST_TOP + ITEM_HEIGHT) as u32;
        // Pill background just left of the text.
        assert_eq!(fb.pixel(PADDING as u32 - 2, second_row + 4), Some(Theme::DEFAULT.select_bg));
        // Favourite marker.
        assert_eq!(fb.pixel(PADDING as u32 - 10, second_row + 5), Some(Theme::DEFAULT.favorite));
        // No pill on the first row.
        assert_eq!(fb.pixel(PADDING as u32 - 2, LIST_TOP as u32 + 4), Some(Theme::DEFAULT.background));
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        let fb = with_painter(|p| p.rebuild_progress(1, 2));
        let bar_x = (SCREEN_W - 200) / 2;
        let y = (SCREEN_H - 12) / 2 + 24 + 2;
        assert_eq!(fb.pixel(bar_x + 50, y), Some(Theme::DEFAULT.header));
        assert_eq!(fb.pixel(bar_x + 150, y), Some(Theme::DEFAULT.legend_bg));
    }

    #[test]
    fn text_screens_draw_legend() {
        let fb = with_painter(|p| p.hotkeys());
        let x = SCREEN_W - 4;
        assert_ne!(fb.pixel(x - EDGE_MARGIN as u32, LEGEND_Y as u32 + 5), Some(Theme::DEFAULT.background));
    }
}
