//! `AnsiWriter`: Turns an update stream into terminal output.
//!
//! The writer remembers the cursor position, colors and attributes it last
//! emitted so redundant escape sequences are skipped. Everything is queued
//! into the underlying writer and flushed once per [`AnsiWriter::present`].

use crate::buffer::{Attributes, Cell, CellUpdate, DiffStats, Rgba};
use crate::error::Result;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use std::io::Write;
use tracing::trace;
use unicode_width::UnicodeWidthChar;

/// Mapping from cell attributes to SGR attributes.
const ATTRIBUTE_MAP: [(Attributes, Attribute); 8] = [
    (Attributes::BOLD, Attribute::Bold),
    (Attributes::DIM, Attribute::Dim),
    (Attributes::ITALIC, Attribute::Italic),
    (Attributes::UNDERLINE, Attribute::Underlined),
    (Attributes::BLINK, Attribute::SlowBlink),
    (Attributes::INVERSE, Attribute::Reverse),
    (Attributes::HIDDEN, Attribute::Hidden),
    (Attributes::STRIKETHROUGH, Attribute::CrossedOut),
];

/// Writes [`CellUpdate`]s to a terminal as ANSI escape sequences.
///
/// Terminals have no alpha channel. Background colors are composited over
/// the base background, and foreground colors over the resulting
/// background; a fully transparent foreground means the base foreground.
#[derive(Debug)]
pub struct AnsiWriter<W: Write> {
    out: W,
    base_fg: Rgba,
    base_bg: Rgba,
    /// Where the terminal cursor is, if known.
    cursor: Option<(u16, u16)>,
    fg: Option<(u8, u8, u8)>,
    bg: Option<(u8, u8, u8)>,
    attrs: Option<Attributes>,
}

impl<W: Write> AnsiWriter<W> {
    /// Create a writer assuming a white-on-black terminal.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            base_fg: Rgba::WHITE,
            base_bg: Rgba::BLACK,
            cursor: None,
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    /// Set the terminal's own colors, used under translucent cells.
    ///
    /// Translucent base colors are flattened onto black.
    #[must_use]
    pub fn with_base(mut self, base_fg: Rgba, base_bg: Rgba) -> Self {
        self.base_fg = base_fg.over(Rgba::BLACK);
        self.base_bg = base_bg.over(Rgba::BLACK);
        self
    }

    /// The underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the writer, returning the underlying one.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Forget the tracked terminal state.
    ///
    /// Call after anything else has written to the terminal, so the next
    /// cell re-emits its position and style.
    pub fn invalidate(&mut self) {
        self.cursor = None;
        self.fg = None;
        self.bg = None;
        self.attrs = None;
    }

    /// Write every update in order, then flush once.
    ///
    /// Continuation cells are skipped since the wide glyph before them
    /// already covers their column.
    pub fn present<I>(&mut self, updates: I) -> Result<DiffStats>
    where
        I: IntoIterator<Item = CellUpdate>,
    {
        let mut stats = DiffStats::default();
        let mut prev = None;
        for update in updates {
            stats.record(prev.as_ref(), &update);
            prev = Some(update);
            if !update.cell.is_continuation() {
                self.write_cell(update.x, update.y, &update.cell)?;
            }
        }
        self.out.flush()?;
        trace!(cells = stats.cells_changed, runs = stats.runs, "updates written");
        Ok(stats)
    }

    /// Reset the terminal's attributes and colors to defaults and flush.
    pub fn reset_style(&mut self) -> Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        self.out.flush()?;
        self.fg = None;
        self.bg = None;
        self.attrs = None;
        Ok(())
    }

    fn write_cell(&mut self, x: u16, y: u16, cell: &Cell) -> Result<()> {
        if self.cursor != Some((x, y)) {
            queue!(self.out, MoveTo(x, y))?;
        }

        // Removing an attribute needs a full SGR reset, which drops colors too.
        let attrs = cell.attrs();
        let current = self.attrs.unwrap_or_default();
        if !current.difference(attrs).is_empty() {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
            self.fg = None;
            self.bg = None;
            self.attrs = None;
        }

        let bg = cell.bg().over(self.base_bg);
        let fg = if cell.fg().is_transparent() {
            self.base_fg
        } else {
            cell.fg().over(bg)
        };

        let bg = bg.to_rgb8();
        if self.bg != Some(bg) {
            queue!(self.out, SetBackgroundColor(rgb(bg)))?;
            self.bg = Some(bg);
        }
        let fg = fg.to_rgb8();
        if self.fg != Some(fg) {
            queue!(self.out, SetForegroundColor(rgb(fg)))?;
            self.fg = Some(fg);
        }

        if self.attrs != Some(attrs) {
            let added = attrs.difference(self.attrs.unwrap_or_default());
            for (flag, attribute) in ATTRIBUTE_MAP {
                if added.contains(flag) {
                    queue!(self.out, SetAttribute(attribute))?;
                }
            }
            self.attrs = Some(attrs);
        }

        // Zero-width and invalid glyphs would desync the cursor.
        let (ch, width) = match cell.ch().and_then(|ch| Some((ch, ch.width()?))) {
            Some((ch, width)) if width > 0 => (ch, width.min(2) as u16),
            _ => (' ', 1),
        };
        queue!(self.out, Print(ch))?;
        self.cursor = Some((x.saturating_add(width), y));
        Ok(())
    }
}

const fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb { r, g, b }
}
