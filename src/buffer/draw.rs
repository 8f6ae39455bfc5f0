//! Drawing primitives on [`Buffer`].
//!
//! The primitive set is fixed: rectangles, single cells, text runs and
//! buffer-to-buffer blits. Higher layers compose these; nothing here knows
//! what is being drawn. Every primitive clips silently, so coordinates may
//! wander off the grid during animation.
//!
//! When the target buffer respects alpha, writes composite with
//! [`Cell::over`]; otherwise they overwrite.

use super::buffer::Buffer;
use super::cell::{Attributes, Cell};
use super::color::Rgba;
use crate::geometry::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A highlighted range within a text run.
///
/// `start..end` is a half-open range of character indices (grapheme
/// clusters, counted from the start of the text, not columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// First selected character index.
    pub start: usize,
    /// One past the last selected character index.
    pub end: usize,
    /// Background for selected characters.
    pub bg: Rgba,
    /// Optional foreground override for selected characters.
    pub fg: Option<Rgba>,
}

impl Selection {
    /// Create a selection that only changes the background.
    pub const fn new(start: usize, end: usize, bg: Rgba) -> Self {
        Self {
            start,
            end,
            bg,
            fg: None,
        }
    }

    /// Override the selected foreground as well (builder pattern).
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgba) -> Self {
        self.fg = Some(fg);
        self
    }

    /// Whether the character at `index` is selected.
    #[inline]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

impl Buffer {
    /// The whole grid as a rectangle.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width(), self.height())
    }

    /// Write `cell` at `idx`, compositing when the buffer respects alpha.
    #[inline]
    fn write_cell(&mut self, idx: usize, cell: Cell) {
        if self.respects_alpha() {
            let below = self.cell_at(idx);
            self.put(idx, cell.over(below));
        } else {
            self.put(idx, cell);
        }
    }

    /// Fill a rectangle with a background color.
    ///
    /// Cells become the empty glyph on `color`. When the buffer respects
    /// alpha and `color` is translucent, the color is blended over what is
    /// there instead, tinting any glyphs underneath.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgba) {
        self.prepare_write();
        let area = Rect::new(x, y, width, height).intersection(&self.bounds());
        if area.is_empty() {
            return;
        }

        let fill = Cell::EMPTY.with_bg(color);
        let blend = self.respects_alpha() && !color.is_opaque();
        let stride = self.width() as usize;

        for row in area.y..area.bottom() {
            let start = row as usize * stride;
            for col in area.x..area.right() {
                let idx = start + col as usize;
                if blend {
                    let below = self.cell_at(idx);
                    self.put(idx, fill.over(below));
                } else {
                    self.put(idx, fill);
                }
            }
        }
    }

    /// Reset a rectangle to [`Cell::EMPTY`], ignoring the alpha mode.
    pub fn clear_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.prepare_write();
        let area = Rect::new(x, y, width, height).intersection(&self.bounds());
        for row in area.y..area.bottom() {
            for col in area.x..area.right() {
                if let Some(idx) = self.index_of(col, row) {
                    self.put(idx, Cell::EMPTY);
                }
            }
        }
    }

    /// Composite a cell over the existing one at (x, y), whatever the
    /// buffer's alpha mode.
    ///
    /// Foreground and background blend with [`Rgba::blend`]. Out-of-bounds
    /// coordinates are ignored.
    pub fn set_cell_with_alpha_blending(
        &mut self,
        x: i32,
        y: i32,
        glyph: char,
        fg: Rgba,
        bg: Rgba,
        attrs: Attributes,
    ) {
        self.prepare_write();
        if let Some(idx) = self.index_of(x, y) {
            let below = self.cell_at(idx);
            self.put(idx, Cell::new(glyph, fg, bg, attrs).over(below));
        }
    }

    /// Draw a single character, blending if the buffer respects alpha.
    pub fn draw_char(&mut self, x: i32, y: i32, ch: char, fg: Rgba, bg: Rgba, attrs: Attributes) {
        self.prepare_write();
        if let Some(idx) = self.index_of(x, y) {
            self.write_cell(idx, Cell::new(ch, fg, bg, attrs));
        }
    }

    /// Draw a single line of text starting at (x, y).
    ///
    /// Each grapheme cluster takes the cell(s) its display width calls for:
    /// zero-width clusters are dropped and wide clusters fill a second,
    /// continuation cell. Only the first codepoint of a cluster is stored.
    /// Columns outside the buffer are clipped. Characters whose index falls
    /// in `selection` use the selection colors.
    ///
    /// Returns the number of columns the text advanced, clipped or not.
    pub fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        fg: Rgba,
        bg: Rgba,
        attrs: Attributes,
        selection: Option<&Selection>,
    ) -> i32 {
        self.prepare_write();
        let right_edge = i32::from(self.width());
        let row_visible = y >= 0 && y < i32::from(self.height());
        let mut col = x;

        for (index, grapheme) in text.graphemes(true).enumerate() {
            let Some(ch) = grapheme.chars().next() else {
                continue;
            };
            if ch.is_control() {
                continue;
            }
            let width = grapheme.width().min(2) as i32;
            if width == 0 {
                continue;
            }
            if col >= right_edge {
                // Keep counting so the advance matches the unclipped text.
                col = col.saturating_add(width);
                continue;
            }

            let (cell_fg, cell_bg) = match selection {
                Some(sel) if sel.contains(index) => (sel.fg.unwrap_or(fg), sel.bg),
                _ => (fg, bg),
            };

            if row_visible {
                // A wide glyph cut by the right edge degrades to a blank.
                let glyph = if width == 2 && col + 1 >= right_edge { ' ' } else { ch };
                if let Some(idx) = self.index_of(col, y) {
                    self.write_cell(idx, Cell::new(glyph, cell_fg, cell_bg, attrs));
                }
                if width == 2 {
                    if let Some(idx) = self.index_of(col + 1, y) {
                        // Likewise for one cut by the left edge.
                        let tail = if col < 0 {
                            Cell::new(' ', cell_fg, cell_bg, attrs)
                        } else {
                            Cell::continuation(cell_fg, cell_bg, attrs)
                        };
                        self.write_cell(idx, tail);
                    }
                }
            }
            col = col.saturating_add(width);
        }

        col - x
    }

    /// Copy a rectangle of `source` into this buffer with its top-left
    /// corner at (`dest_x`, `dest_y`).
    ///
    /// The source rectangle (`src_x`, `src_y`, `width`, `height`) is clipped
    /// to `source`, and the destination to `self`. When this buffer respects
    /// alpha each copied cell is composited over the existing cell; blank,
    /// fully transparent source cells without attributes leave the
    /// destination untouched. A blank translucent cell over a glyph keeps
    /// that glyph and its attributes (see [`Cell::over`]). Without alpha,
    /// cells are copied verbatim. Wide glyphs split by the clip edges are
    /// copied as blanks.
    pub fn draw_frame_buffer(
        &mut self,
        dest_x: i32,
        dest_y: i32,
        source: &Self,
        src_x: i32,
        src_y: i32,
        width: i32,
        height: i32,
    ) {
        self.prepare_write();
        let requested = Rect::new(src_x, src_y, width, height);
        let src = requested.intersection(&source.bounds());
        if src.is_empty() {
            return;
        }

        // Shift the destination by however much the source was clipped.
        let origin_x = dest_x.saturating_add(src.x - src_x);
        let origin_y = dest_y.saturating_add(src.y - src_y);
        let dest = Rect::new(origin_x, origin_y, src.width, src.height).intersection(&self.bounds());
        if dest.is_empty() {
            return;
        }

        let blend = self.respects_alpha();
        for row in dest.y..dest.bottom() {
            let sy = src.y + (row - origin_y);
            for col in dest.x..dest.right() {
                let sx = src.x + (col - origin_x);
                let (Some(sidx), Some(didx)) = (source.index_of(sx, sy), self.index_of(col, row))
                else {
                    continue;
                };
                let mut cell = source.cell_at(sidx);
                // Wide glyphs cut by the clip edges degrade to blanks.
                let cut_head = col + 1 == dest.right() && source.get(sx + 1, sy).is_continuation();
                if (cell.is_continuation() && col == dest.x) || cut_head {
                    cell = cell.with_glyph(Cell::EMPTY_GLYPH);
                }
                if !blend {
                    self.put(didx, cell);
                } else if !(cell.is_blank() && cell.bg().is_transparent() && cell.attrs().is_empty()) {
                    let below = self.cell_at(didx);
                    self.put(didx, cell.over(below));
                }
            }
        }
    }

    /// Copy the whole of `source` with its top-left corner at (x, y).
    pub fn blit(&mut self, x: i32, y: i32, source: &Self) {
        self.draw_frame_buffer(
            x,
            y,
            source,
            0,
            0,
            i32::from(source.width()),
            i32::from(source.height()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(width: u16, height: u16, respect_alpha: bool) -> Buffer {
        Buffer::new(width, height, respect_alpha).unwrap()
    }

    #[test]
    fn test_fill_rect_opaque() {
        let mut buf = buffer(10, 5, false);
        buf.set_cell(3, 2, 'x', Rgba::WHITE, Rgba::BLACK, Attributes::BOLD);
        buf.fill_rect(2, 1, 3, 2, Rgba::BLUE);

        let cell = buf.get(3, 2);
        assert!(cell.is_blank());
        assert_eq!(cell.bg(), Rgba::BLUE);
        assert_eq!(cell.fg(), Rgba::TRANSPARENT);
        assert!(cell.attrs().is_empty());

        assert_eq!(buf.get(1, 1), Cell::EMPTY);
        assert_eq!(buf.get(5, 1), Cell::EMPTY);
        assert_eq!(buf.get(2, 3), Cell::EMPTY);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut buf = buffer(4, 4, false);
        buf.fill_rect(-2, -2, 4, 4, Rgba::RED);
        assert_eq!(buf.get(0, 0).bg(), Rgba::RED);
        assert_eq!(buf.get(1, 1).bg(), Rgba::RED);
        assert_eq!(buf.get(2, 2), Cell::EMPTY);

        buf.fill_rect(100, 100, 5, 5, Rgba::RED);
        buf.fill_rect(0, 0, -5, 5, Rgba::GREEN);
        assert_eq!(buf.get(0, 0).bg(), Rgba::RED);
    }

    #[test]
    fn test_fill_rect_blends_when_respecting_alpha() {
        let mut buf = buffer(2, 1, true);
        buf.fill_rect(0, 0, 2, 1, Rgba::BLACK);
        buf.draw_char(1, 0, 'q', Rgba::WHITE, Rgba::BLACK, Attributes::empty());
        buf.fill_rect(0, 0, 2, 1, Rgba::WHITE.with_alpha(0.5));

        let plain = buf.get(0, 0);
        assert!(plain.is_blank());
        assert!((plain.bg().r() - 0.5).abs() < 1e-6);
        assert_eq!(plain.bg().a(), 1.0);

        let tinted = buf.get(1, 0);
        assert_eq!(tinted.ch(), Some('q'));
        assert!((tinted.bg().r() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_fill_rect_overwrites_without_alpha() {
        let mut buf = buffer(1, 1, false);
        buf.fill_rect(0, 0, 1, 1, Rgba::BLACK);
        let half = Rgba::WHITE.with_alpha(0.5);
        buf.fill_rect(0, 0, 1, 1, half);
        assert_eq!(buf.get(0, 0).bg(), half);
    }

    #[test]
    fn test_set_cell_with_alpha_blending() {
        let mut buf = buffer(3, 1, false);
        buf.set_cell(0, 0, 'a', Rgba::WHITE, Rgba::BLUE, Attributes::empty());
        buf.set_cell_with_alpha_blending(
            0,
            0,
            'b',
            Rgba::RED.with_alpha(0.5),
            Rgba::TRANSPARENT,
            Attributes::UNDERLINE,
        );

        let cell = buf.get(0, 0);
        assert_eq!(cell.ch(), Some('b'));
        assert_eq!(cell.bg(), Rgba::BLUE);
        assert_eq!(cell.fg().r(), 1.0);
        assert!((cell.fg().g() - 0.5).abs() < 1e-6);
        assert_eq!(cell.attrs(), Attributes::UNDERLINE);

        // Out of bounds is a no-op.
        buf.set_cell_with_alpha_blending(7, 0, 'z', Rgba::RED, Rgba::RED, Attributes::empty());
        assert_eq!(buf.get(2, 0), Cell::EMPTY);
    }

    #[test]
    fn test_draw_text_basic() {
        let mut buf = buffer(10, 1, false);
        let advance = buf.draw_text("AB", 0, 0, Rgba::WHITE, Rgba::BLACK, Attributes::empty(), None);
        assert_eq!(advance, 2);

        assert_eq!(buf.get(0, 0), Cell::new('A', Rgba::WHITE, Rgba::BLACK, Attributes::empty()));
        assert_eq!(buf.get(1, 0), Cell::new('B', Rgba::WHITE, Rgba::BLACK, Attributes::empty()));
        for x in 2..10 {
            assert_eq!(buf.get(x, 0), Cell::EMPTY);
        }
    }

    #[test]
    fn test_draw_text_clips_both_edges() {
        let mut buf = buffer(4, 1, false);
        let advance = buf.draw_text("abcdef", -2, 0, Rgba::WHITE, Rgba::BLACK, Attributes::empty(), None);
        assert_eq!(advance, 6);
        assert_eq!(buf.rows().next().as_deref(), Some("cdef"));

        let mut buf = buffer(4, 1, false);
        buf.draw_text("abcdef", 1, 0, Rgba::WHITE, Rgba::BLACK, Attributes::empty(), None);
        assert_eq!(buf.rows().next().as_deref(), Some(" abc"));

        // Rows outside the buffer draw nothing but still report the advance.
        let mut buf = buffer(4, 1, false);
        assert_eq!(buf.draw_text("ab", 0, 3, Rgba::WHITE, Rgba::BLACK, Attributes::empty(), None), 2);
        assert_eq!(buf.get(0, 0), Cell::EMPTY);
    }

    #[test]
    fn test_draw_text_selection() {
        let mut buf = buffer(6, 1, false);
        let sel = Selection::new(1, 3, Rgba::BLUE).with_fg(Rgba::BLACK);
        buf.draw_text("hello", 0, 0, Rgba::WHITE, Rgba::GREEN, Attributes::empty(), Some(&sel));

        assert_eq!(buf.get(0, 0).bg(), Rgba::GREEN);
        assert_eq!(buf.get(1, 0).bg(), Rgba::BLUE);
        assert_eq!(buf.get(1, 0).fg(), Rgba::BLACK);
        assert_eq!(buf.get(2, 0).bg(), Rgba::BLUE);
        assert_eq!(buf.get(3, 0).bg(), Rgba::GREEN);
        assert_eq!(buf.get(3, 0).fg(), Rgba::WHITE);
    }

    #[test]
    fn test_draw_text_wide_characters() {
        let mut buf = buffer(6, 1, false);
        let advance = buf.draw_text("日本x", 0, 0, Rgba::WHITE, Rgba::BLACK, Attributes::empty(), None);
        assert_eq!(advance, 5);
        assert_eq!(buf.get(0, 0).ch(), Some('日'));
        assert!(buf.get(1, 0).is_continuation());
        assert_eq!(buf.get(2, 0).ch(), Some('本'));
        assert!(buf.get(3, 0).is_continuation());
        assert_eq!(buf.get(4, 0).ch(), Some('x'));
        assert_eq!(buf.rows().next().as_deref(), Some("日本x "));
    }

    #[test]
    fn test_draw_text_wide_character_at_edge() {
        let mut buf = buffer(3, 1, false);
        buf.draw_text("ab日", 0, 0, Rgba::WHITE, Rgba::BLACK, Attributes::empty(), None);
        assert_eq!(buf.get(2, 0).ch(), Some(' '));
        assert_eq!(buf.get(2, 0).bg(), Rgba::BLACK);

        let mut buf = buffer(3, 1, false);
        buf.draw_text("日ab", -1, 0, Rgba::WHITE, Rgba::BLACK, Attributes::empty(), None);
        assert_eq!(buf.rows().next().as_deref(), Some(" ab"));
        assert!(!buf.get(0, 0).is_continuation());
    }

    #[test]
    fn test_draw_text_combining_marks_share_a_cell() {
        let mut buf = buffer(4, 1, false);
        let advance = buf.draw_text("e\u{301}a", 0, 0, Rgba::WHITE, Rgba::BLACK, Attributes::empty(), None);
        assert_eq!(advance, 2);
        assert_eq!(buf.get(0, 0).ch(), Some('e'));
        assert_eq!(buf.get(1, 0).ch(), Some('a'));
    }

    #[test]
    fn test_draw_text_blends_over_background() {
        let mut buf = buffer(3, 1, true);
        buf.fill_rect(0, 0, 3, 1, Rgba::BLUE);
        buf.draw_text("hi", 0, 0, Rgba::WHITE, Rgba::TRANSPARENT, Attributes::empty(), None);
        assert_eq!(buf.get(0, 0).ch(), Some('h'));
        assert_eq!(buf.get(0, 0).bg(), Rgba::BLUE);
    }

    #[test]
    fn test_blit_opaque_into_transparent() {
        let mut src = buffer(5, 5, false);
        src.fill_rect(0, 0, 5, 5, Rgba::RED);

        let mut dest = buffer(10, 10, true);
        dest.draw_frame_buffer(2, 3, &src, 0, 0, 5, 5);

        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(dest.get(x + 2, y + 3), src.get(x, y));
            }
        }
        assert_eq!(dest.get(1, 3), Cell::EMPTY);
        assert_eq!(dest.get(7, 3), Cell::EMPTY);
    }

    #[test]
    fn test_blit_clips_source_and_destination() {
        let mut src = buffer(4, 4, false);
        for y in 0..4 {
            for x in 0..4 {
                let ch = char::from(b'a' + (y * 4 + x) as u8);
                src.set_cell(x, y, ch, Rgba::WHITE, Rgba::BLACK, Attributes::empty());
            }
        }

        // Source rect hangs off the top-left; destination hangs off the bottom-right.
        let mut dest = buffer(3, 3, false);
        dest.draw_frame_buffer(1, 1, &src, -1, -1, 5, 5);

        // dest (1,1) lies one cell inside the requested rect, which is clipped
        // to source (0,0), so it lands at (2,2).
        assert_eq!(dest.get(1, 1), Cell::EMPTY);
        assert_eq!(dest.get(2, 2).ch(), Some('a'));
        assert_eq!(dest.get(0, 0), Cell::EMPTY);
    }

    #[test]
    fn test_blit_negative_destination() {
        let mut src = buffer(3, 1, false);
        src.draw_text("xyz", 0, 0, Rgba::WHITE, Rgba::BLACK, Attributes::empty(), None);

        let mut dest = buffer(3, 1, false);
        dest.blit(-1, 0, &src);
        assert_eq!(dest.rows().next().as_deref(), Some("yz "));
    }

    #[test]
    fn test_blit_transparent_source_preserves_destination() {
        let src = buffer(2, 2, false);
        let mut dest = buffer(2, 2, true);
        dest.set_cell(0, 0, 'k', Rgba::GREEN, Rgba::BLACK, Attributes::BOLD);
        let before = dest.get(0, 0);
        dest.blit(0, 0, &src);
        assert_eq!(dest.get(0, 0), before);
    }

    #[test]
    fn test_blit_translucent_source_composites() {
        let mut src = buffer(1, 1, false);
        src.fill_rect(0, 0, 1, 1, Rgba::WHITE.with_alpha(0.5));
        let mut dest = buffer(1, 1, true);
        dest.fill_rect(0, 0, 1, 1, Rgba::BLACK);
        dest.blit(0, 0, &src);
        let bg = dest.get(0, 0).bg();
        assert!((bg.r() - 0.5).abs() < 1e-6);
        assert_eq!(bg.a(), 1.0);
    }

    #[test]
    fn test_blit_without_alpha_copies_verbatim() {
        let src = buffer(2, 2, false);
        let mut dest = buffer(2, 2, false);
        dest.fill_rect(0, 0, 2, 2, Rgba::RED);
        dest.blit(0, 0, &src);
        assert_eq!(dest.get(1, 1), Cell::EMPTY);
    }

    #[test]
    fn test_draw_char_over_wide_glyph_tail_blanks_head() {
        let mut buf = buffer(4, 1, false);
        buf.draw_text("日", 0, 0, Rgba::WHITE, Rgba::BLACK, Attributes::empty(), None);
        buf.draw_char(1, 0, 'x', Rgba::WHITE, Rgba::BLACK, Attributes::empty());

        assert_eq!(buf.rows().next().as_deref(), Some(" x  "));
        assert_eq!(buf.get(0, 0).bg(), Rgba::BLACK);
    }

    #[test]
    fn test_draw_char_over_wide_glyph_head_blanks_tail() {
        let mut buf = buffer(4, 1, false);
        buf.draw_text("日", 1, 0, Rgba::WHITE, Rgba::BLACK, Attributes::empty(), None);
        buf.draw_char(1, 0, 'y', Rgba::WHITE, Rgba::BLACK, Attributes::empty());

        assert_eq!(buf.rows().next().as_deref(), Some(" y  "));
        assert!(!buf.get(2, 0).is_continuation());
    }

    #[test]
    fn test_wide_glyph_shifted_by_one_column() {
        let mut buf = buffer(4, 1, false);
        buf.draw_text("本", 1, 0, Rgba::WHITE, Rgba::BLACK, Attributes::empty(), None);
        buf.draw_text("日", 0, 0, Rgba::WHITE, Rgba::BLACK, Attributes::empty(), None);

        assert_eq!(buf.rows().next().as_deref(), Some("日  "));
        assert!(buf.get(1, 0).is_continuation());
        assert!(!buf.get(2, 0).is_continuation());
    }

    #[test]
    fn test_fill_rect_over_half_a_wide_glyph() {
        let mut buf = buffer(4, 1, false);
        buf.draw_text("日本", 0, 0, Rgba::WHITE, Rgba::BLACK, Attributes::empty(), None);
        buf.fill_rect(1, 0, 2, 1, Rgba::BLUE);

        assert_eq!(buf.get(0, 0).ch(), Some(' '));
        assert_eq!(buf.get(3, 0).ch(), Some(' '));
        assert_eq!(buf.rows().next().as_deref(), Some("    "));
    }

    #[test]
    fn test_translucent_fill_keeps_wide_glyph() {
        let mut buf = buffer(2, 1, true);
        buf.draw_text("日", 0, 0, Rgba::WHITE, Rgba::BLACK, Attributes::empty(), None);
        buf.fill_rect(0, 0, 2, 1, Rgba::BLUE.with_alpha(0.5));

        assert_eq!(buf.get(0, 0).ch(), Some('日'));
        assert!(buf.get(1, 0).is_continuation());
    }

    #[test]
    fn test_blit_splitting_wide_glyph_copies_blanks() {
        let mut src = buffer(4, 1, false);
        src.draw_text("日本", 0, 0, Rgba::WHITE, Rgba::BLACK, Attributes::empty(), None);

        // Starts on the continuation of 日 and ends on the head of 本.
        let mut dest = buffer(4, 1, false);
        dest.draw_frame_buffer(0, 0, &src, 1, 0, 2, 1);
        assert_eq!(dest.rows().next().as_deref(), Some("    "));
        assert_eq!(dest.get(0, 0).bg(), Rgba::BLACK);
        assert_eq!(dest.get(1, 0).bg(), Rgba::BLACK);
        assert_eq!(dest.get(2, 0), Cell::EMPTY);

        // Whole glyphs still arrive intact.
        dest.blit(0, 0, &src);
        assert_eq!(dest.rows().next().as_deref(), Some("日本"));
    }

    #[test]
    fn test_blit_keeps_attributes_of_transparent_blanks() {
        let mut src = buffer(2, 1, false);
        src.set(0, 0, Cell::EMPTY.with_attrs(Attributes::UNDERLINE));

        let mut dest = buffer(2, 1, true);
        dest.fill_rect(0, 0, 2, 1, Rgba::BLACK);
        dest.blit(0, 0, &src);

        let cell = dest.get(0, 0);
        assert!(cell.is_blank());
        assert_eq!(cell.attrs(), Attributes::UNDERLINE);
        assert_eq!(cell.bg(), Rgba::BLACK);
        assert_eq!(dest.get(1, 0).attrs(), Attributes::empty());
    }
}
