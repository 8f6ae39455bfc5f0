//! Cell: One terminal character position.
//!
//! A cell is a codepoint plus two [`Rgba`] colors and an attribute mask.
//! Buffers do not store `Cell` values directly (they keep parallel arrays),
//! so this type is the unit that crosses the API: reads, writes, and the
//! updates produced by the diff engine.

use super::color::Rgba;
use bitflags::bitflags;

bitflags! {
    /// Text attributes.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use tessera::Attributes;
    /// let style = Attributes::BOLD | Attributes::UNDERLINE;
    /// assert!(style.contains(Attributes::BOLD));
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Blinking text
        const BLINK = 0b0001_0000;
        /// Swapped foreground and background
        const INVERSE = 0b0010_0000;
        /// Hidden/invisible text
        const HIDDEN = 0b0100_0000;
        /// Strikethrough text
        const STRIKETHROUGH = 0b1000_0000;
    }
}

impl std::fmt::Debug for Attributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A single terminal cell.
///
/// Equality is exact across glyph, both colors and attributes; the diff
/// engine relies on it and applies no tolerance.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Unicode scalar value, [`Cell::EMPTY_GLYPH`] or [`Cell::CONTINUATION`].
    glyph: u32,
    /// Foreground color.
    fg: Rgba,
    /// Background color.
    bg: Rgba,
    /// Text attributes.
    attrs: Attributes,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// Codepoint of the empty glyph.
    pub const EMPTY_GLYPH: u32 = ' ' as u32;

    /// Sentinel glyph for the second column of a wide character.
    pub const CONTINUATION: u32 = 0;

    /// An empty cell: blank glyph, transparent colors, no attributes.
    pub const EMPTY: Self = Self {
        glyph: Self::EMPTY_GLYPH,
        fg: Rgba::TRANSPARENT,
        bg: Rgba::TRANSPARENT,
        attrs: Attributes::empty(),
    };

    /// Create a cell from a character with the given colors and attributes.
    #[inline]
    pub const fn new(ch: char, fg: Rgba, bg: Rgba, attrs: Attributes) -> Self {
        Self {
            glyph: ch as u32,
            fg,
            bg,
            attrs,
        }
    }

    /// Create a cell from a raw glyph codepoint.
    #[inline]
    pub const fn from_glyph(glyph: u32, fg: Rgba, bg: Rgba, attrs: Attributes) -> Self {
        Self {
            glyph,
            fg,
            bg,
            attrs,
        }
    }

    /// Create a cell holding only a character, on transparent colors.
    #[inline]
    pub const fn from_char(ch: char) -> Self {
        Self::new(ch, Rgba::TRANSPARENT, Rgba::TRANSPARENT, Attributes::empty())
    }

    /// Continuation cell placed after a wide character.
    #[inline]
    pub const fn continuation(fg: Rgba, bg: Rgba, attrs: Attributes) -> Self {
        Self::from_glyph(Self::CONTINUATION, fg, bg, attrs)
    }

    /// The raw glyph codepoint.
    #[inline]
    pub const fn glyph(&self) -> u32 {
        self.glyph
    }

    /// The glyph as a `char`, or `None` for continuation cells and invalid
    /// codepoints written through the raw arrays.
    #[inline]
    pub fn ch(&self) -> Option<char> {
        if self.is_continuation() {
            return None;
        }
        char::from_u32(self.glyph)
    }

    /// Whether this is the second column of a wide character.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.glyph == Self::CONTINUATION
    }

    /// Whether the glyph is blank.
    #[inline]
    pub const fn is_blank(&self) -> bool {
        self.glyph == Self::EMPTY_GLYPH
    }

    /// Foreground color.
    #[inline]
    pub const fn fg(&self) -> Rgba {
        self.fg
    }

    /// Background color.
    #[inline]
    pub const fn bg(&self) -> Rgba {
        self.bg
    }

    /// Attributes.
    #[inline]
    pub const fn attrs(&self) -> Attributes {
        self.attrs
    }

    /// Set the glyph (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_glyph(mut self, glyph: u32) -> Self {
        self.glyph = glyph;
        self
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgba) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Rgba) -> Self {
        self.bg = bg;
        self
    }

    /// Set the attributes (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    /// Composite `self` over `below`.
    ///
    /// Colors use [`Rgba::blend`]. A blank glyph on a translucent background
    /// lets the glyph underneath show through, tinted by the overlay; any
    /// other glyph replaces what is below.
    #[must_use]
    pub fn over(self, below: Self) -> Self {
        let bg = Rgba::blend(self.bg, below.bg);
        if self.is_blank() && !self.bg.is_opaque() && !below.is_blank() {
            return Self {
                glyph: below.glyph,
                fg: Rgba::blend(self.bg, below.fg),
                bg,
                attrs: below.attrs,
            };
        }
        Self {
            glyph: self.glyph,
            fg: Rgba::blend(self.fg, below.fg),
            bg,
            attrs: self.attrs,
        }
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("Cell");
        match self.ch() {
            Some(ch) => s.field("glyph", &ch),
            None => s.field("glyph", &self.glyph),
        };
        s.field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("attrs", &self.attrs)
            .finish()
    }
}
