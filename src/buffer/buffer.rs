//! Buffer: A grid of cells stored as parallel arrays.
//!
//! Glyphs, foreground channels, background channels and attributes live in
//! four separate `Vec`s indexed by `y * width + x`. Colors take four `f32`
//! slots per cell, in `r, g, b, a` order.

use super::cell::{Attributes, Cell};
use super::color::Rgba;
use crate::error::{Error, Result};
use tracing::{debug, trace};

/// Color channels per cell in the fg/bg planes.
pub const CHANNELS: usize = 4;

/// A named `width × height` grid of cells.
///
/// The buffer is exclusively owned by whoever created it. Reads and writes
/// go through bounds-checked accessors; coordinates are `i32` because
/// drawing code routinely computes positions that briefly leave the grid.
/// Out-of-bounds writes are ignored and out-of-bounds reads return
/// [`Cell::EMPTY`].
///
/// When `respect_alpha` is set, the drawing primitives composite translucent
/// colors over existing content instead of overwriting it.
#[derive(Clone)]
pub struct Buffer {
    /// Identifier used in logs and debugging output.
    id: String,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
    /// Whether writes blend against existing content.
    respect_alpha: bool,
    /// Cell storage.
    planes: Planes,
    /// Set when raw views were handed out; cleared by [`Buffer::normalize`].
    raw_touched: bool,
}

#[derive(Clone)]
struct Planes {
    glyphs: Vec<u32>,
    fg: Vec<f32>,
    bg: Vec<f32>,
    attrs: Vec<u8>,
}

impl Planes {
    /// Allocate planes for `len` empty cells, reporting allocation failure.
    fn try_new(len: usize) -> Option<Self> {
        let empty_fg = Cell::EMPTY.fg().to_array();
        let empty_bg = Cell::EMPTY.bg().to_array();
        let mut planes = Self {
            glyphs: try_vec(len)?,
            fg: try_vec(len * CHANNELS)?,
            bg: try_vec(len * CHANNELS)?,
            attrs: try_vec(len)?,
        };
        planes.glyphs.resize(len, Cell::EMPTY_GLYPH);
        for _ in 0..len {
            planes.fg.extend_from_slice(&empty_fg);
            planes.bg.extend_from_slice(&empty_bg);
        }
        planes.attrs.resize(len, Cell::EMPTY.attrs().bits());
        Some(planes)
    }

    fn len(&self) -> usize {
        self.glyphs.len()
    }
}

fn try_vec<T>(capacity: usize) -> Option<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(capacity).ok()?;
    Some(v)
}

/// Read-only views over a buffer's parallel arrays.
#[derive(Debug, Clone, Copy)]
pub struct RawParts<'a> {
    /// Glyph codepoints, one per cell.
    pub glyphs: &'a [u32],
    /// Foreground channels, four per cell.
    pub fg: &'a [f32],
    /// Background channels, four per cell.
    pub bg: &'a [f32],
    /// Attribute bits, one per cell.
    pub attrs: &'a [u8],
}

/// Mutable views over a buffer's parallel arrays.
///
/// Writes through these slices bypass clipping, blending and channel
/// clamping. The buffer treats its contents as unvalidated until
/// [`Buffer::normalize`] runs, which every checked write does first.
/// Reads in the meantime clamp channels on the way out, so NaN never
/// escapes through [`Buffer::get`].
#[derive(Debug)]
pub struct RawPartsMut<'a> {
    /// Glyph codepoints, one per cell.
    pub glyphs: &'a mut [u32],
    /// Foreground channels, four per cell.
    pub fg: &'a mut [f32],
    /// Background channels, four per cell.
    pub bg: &'a mut [f32],
    /// Attribute bits, one per cell.
    pub attrs: &'a mut [u8],
}

impl Buffer {
    /// Create an unnamed buffer with the given dimensions.
    ///
    /// All cells start as [`Cell::EMPTY`].
    pub fn new(width: u16, height: u16, respect_alpha: bool) -> Result<Self> {
        Self::named("buffer", width, height, respect_alpha)
    }

    /// Create a buffer with an identifier for logs.
    pub fn named(
        id: impl Into<String>,
        width: u16,
        height: u16,
        respect_alpha: bool,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let planes = Planes::try_new(area(width, height))
            .ok_or(Error::Allocation { width, height })?;
        let id = id.into();
        trace!(id = %id, width, height, respect_alpha, "buffer allocated");
        Ok(Self {
            id,
            width,
            height,
            respect_alpha,
            planes,
            raw_touched: false,
        })
    }

    /// Buffer identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Rename the buffer.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Dimensions as `(width, height)`.
    #[inline]
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    /// Check if the buffer is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.planes.len() == 0
    }

    /// Whether drawing into this buffer alpha-blends.
    #[inline]
    pub const fn respects_alpha(&self) -> bool {
        self.respect_alpha
    }

    /// Change the alpha-blending mode.
    #[inline]
    pub fn set_respect_alpha(&mut self, respect_alpha: bool) {
        self.respect_alpha = respect_alpha;
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < i32::from(self.width) && y < i32::from(self.height) {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Convert a linear index to (x, y) coordinates.
    #[inline]
    pub fn coords_of(&self, index: usize) -> Option<(u16, u16)> {
        if index < self.len() {
            let x = (index % (self.width as usize)) as u16;
            let y = (index / (self.width as usize)) as u16;
            Some((x, y))
        } else {
            None
        }
    }

    /// Whether (x, y) lies inside the grid.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index_of(x, y).is_some()
    }

    /// Read the cell at (x, y), or [`Cell::EMPTY`] when out of bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Cell {
        self.index_of(x, y)
            .map_or(Cell::EMPTY, |idx| self.cell_at(idx))
    }

    /// Read the cell at a linear index.
    #[inline]
    pub fn cell_at_index(&self, index: usize) -> Option<Cell> {
        (index < self.len()).then(|| self.cell_at(index))
    }

    /// Assemble a cell from the planes. `idx` must be in range.
    #[inline]
    pub(crate) fn cell_at(&self, idx: usize) -> Cell {
        let c = idx * CHANNELS;
        Cell::from_glyph(
            self.planes.glyphs[idx],
            rgba_from(&self.planes.fg[c..c + CHANNELS]),
            rgba_from(&self.planes.bg[c..c + CHANNELS]),
            Attributes::from_bits_retain(self.planes.attrs[idx]),
        )
    }

    /// Store a cell into the planes. `idx` must be in range.
    ///
    /// Overwriting either half of a wide glyph blanks the other half, since
    /// a terminal erases the whole glyph when one of its columns is written.
    #[inline]
    pub(crate) fn put(&mut self, idx: usize, cell: Cell) {
        let old = self.planes.glyphs[idx];
        if old != cell.glyph() {
            self.split_wide(idx, old);
        }
        let c = idx * CHANNELS;
        self.planes.glyphs[idx] = cell.glyph();
        self.planes.fg[c..c + CHANNELS].copy_from_slice(&cell.fg().to_array());
        self.planes.bg[c..c + CHANNELS].copy_from_slice(&cell.bg().to_array());
        self.planes.attrs[idx] = cell.attrs().bits();
    }

    /// Blank the orphaned half of a wide glyph whose cell at `idx`, which
    /// held `old`, is about to change.
    fn split_wide(&mut self, idx: usize, old: u32) {
        let col = idx % self.width as usize;
        if old == Cell::CONTINUATION {
            if col > 0 && self.planes.glyphs[idx - 1] != Cell::CONTINUATION {
                self.planes.glyphs[idx - 1] = Cell::EMPTY_GLYPH;
            }
        } else if col + 1 < self.width as usize && self.planes.glyphs[idx + 1] == Cell::CONTINUATION {
            self.planes.glyphs[idx + 1] = Cell::EMPTY_GLYPH;
        }
    }

    /// Overwrite the cell at (x, y) without blending.
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        self.prepare_write();
        if let Some(idx) = self.index_of(x, y) {
            self.put(idx, cell);
            true
        } else {
            false
        }
    }

    /// Overwrite the cell at (x, y) from its parts, without blending.
    ///
    /// Out-of-bounds coordinates are ignored.
    pub fn set_cell(&mut self, x: i32, y: i32, glyph: char, fg: Rgba, bg: Rgba, attrs: Attributes) {
        self.set(x, y, Cell::new(glyph, fg, bg, attrs));
    }

    /// Set every cell to the empty glyph on `bg`, with transparent foreground
    /// and no attributes.
    pub fn clear(&mut self, bg: Rgba) {
        self.raw_touched = false;
        let bg = bg.to_array();
        let fg = Cell::EMPTY.fg().to_array();
        self.planes.glyphs.fill(Cell::EMPTY_GLYPH);
        for chunk in self.planes.fg.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&fg);
        }
        for chunk in self.planes.bg.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&bg);
        }
        self.planes.attrs.fill(0);
    }

    /// Reset every cell to [`Cell::EMPTY`].
    pub fn reset(&mut self) {
        self.clear(Cell::EMPTY.bg());
    }

    /// Resize the buffer, preserving the overlap of old and new content.
    ///
    /// Cells outside the old bounds start empty. On failure the buffer is
    /// left exactly as it was. Raw views taken before a resize must not be
    /// reused afterwards; the borrow checker already forbids holding them.
    pub fn resize(&mut self, new_width: u16, new_height: u16) -> Result<()> {
        if new_width == 0 || new_height == 0 {
            return Err(Error::InvalidDimension {
                width: new_width,
                height: new_height,
            });
        }
        if new_width == self.width && new_height == self.height {
            return Ok(());
        }

        let mut planes = Planes::try_new(area(new_width, new_height)).ok_or(Error::Allocation {
            width: new_width,
            height: new_height,
        })?;

        // Copy existing content
        let copy_width = self.width.min(new_width) as usize;
        let copy_height = self.height.min(new_height) as usize;
        let old_w = self.width as usize;
        let new_w = new_width as usize;

        for y in 0..copy_height {
            let old_start = y * old_w;
            let new_start = y * new_w;
            planes.glyphs[new_start..new_start + copy_width]
                .copy_from_slice(&self.planes.glyphs[old_start..old_start + copy_width]);
            planes.attrs[new_start..new_start + copy_width]
                .copy_from_slice(&self.planes.attrs[old_start..old_start + copy_width]);

            let (old_c, new_c, n) = (old_start * CHANNELS, new_start * CHANNELS, copy_width * CHANNELS);
            planes.fg[new_c..new_c + n].copy_from_slice(&self.planes.fg[old_c..old_c + n]);
            planes.bg[new_c..new_c + n].copy_from_slice(&self.planes.bg[old_c..old_c + n]);

            // A wide glyph whose second column was cut off.
            if copy_width < old_w && self.planes.glyphs[old_start + copy_width] == Cell::CONTINUATION {
                planes.glyphs[new_start + copy_width - 1] = Cell::EMPTY_GLYPH;
            }
        }

        debug!(
            id = %self.id,
            from = ?(self.width, self.height),
            to = ?(new_width, new_height),
            "buffer resized"
        );
        self.planes = planes;
        self.width = new_width;
        self.height = new_height;
        Ok(())
    }

    /// Copy content from another buffer of the same dimensions.
    pub fn copy_from(&mut self, other: &Self) -> Result<()> {
        if self.size() != other.size() {
            return Err(Error::DimensionMismatch {
                front: self.size(),
                back: other.size(),
            });
        }
        self.planes.clone_from(&other.planes);
        self.raw_touched = other.raw_touched;
        Ok(())
    }

    /// Swap the contents of two buffers.
    ///
    /// This is O(1) - just pointer swaps. Identifiers and alpha modes stay
    /// with their owners.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.planes, &mut other.planes);
        std::mem::swap(&mut self.width, &mut other.width);
        std::mem::swap(&mut self.height, &mut other.height);
        std::mem::swap(&mut self.raw_touched, &mut other.raw_touched);
    }

    /// Read-only views over the parallel arrays.
    pub fn raw_parts(&self) -> RawParts<'_> {
        RawParts {
            glyphs: &self.planes.glyphs,
            fg: &self.planes.fg,
            bg: &self.planes.bg,
            attrs: &self.planes.attrs,
        }
    }

    /// Mutable views over the parallel arrays.
    ///
    /// This is the bulk escape hatch: see [`RawPartsMut`] for the
    /// invariants it suspends.
    pub fn raw_parts_mut(&mut self) -> RawPartsMut<'_> {
        self.raw_touched = true;
        RawPartsMut {
            glyphs: &mut self.planes.glyphs,
            fg: &mut self.planes.fg,
            bg: &mut self.planes.bg,
            attrs: &mut self.planes.attrs,
        }
    }

    /// Whether raw views were taken since the last normalization.
    #[inline]
    pub const fn is_raw_touched(&self) -> bool {
        self.raw_touched
    }

    /// Re-validate the color planes: non-finite channels become 0 and the
    /// rest are clamped to `[0, 1]`.
    pub fn normalize(&mut self) {
        for ch in self.planes.fg.iter_mut().chain(self.planes.bg.iter_mut()) {
            *ch = if ch.is_finite() { ch.clamp(0.0, 1.0) } else { 0.0 };
        }
        self.raw_touched = false;
    }

    /// Normalize if raw views were handed out. Every checked write calls this.
    #[inline]
    pub(crate) fn prepare_write(&mut self) {
        if self.raw_touched {
            trace!(id = %self.id, "normalizing after raw access");
            self.normalize();
        }
    }

    /// Row contents as strings, continuation cells omitted.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.planes.glyphs.chunks(self.width as usize).map(|row| {
            row.iter()
                .filter(|&&g| g != Cell::CONTINUATION)
                .map(|&g| char::from_u32(g).unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect()
        })
    }

    /// Get memory usage in bytes (approximate).
    pub fn memory_usage(&self) -> usize {
        let per_cell = std::mem::size_of::<u32>()
            + 2 * CHANNELS * std::mem::size_of::<f32>()
            + std::mem::size_of::<u8>();
        self.len() * per_cell + self.id.len() + std::mem::size_of::<Self>()
    }
}

#[inline]
fn area(width: u16, height: u16) -> usize {
    (width as usize) * (height as usize)
}

#[inline]
fn rgba_from(channels: &[f32]) -> Rgba {
    Rgba::new(channels[0], channels[1], channels[2], channels[3])
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("respect_alpha", &self.respect_alpha)
            .field("memory_bytes", &self.memory_usage())
            .finish_non_exhaustive()
    }
}
