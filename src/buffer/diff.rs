//! Diffing Engine: Find the cells that changed between two buffers.
//!
//! The engine compares a *front* buffer (what the terminal shows) with a
//! *back* buffer (what was just drawn) and lazily yields one
//! [`CellUpdate`] per differing cell. Comparison is exact: a one-unit
//! channel difference is a change.
//!
//! Updates come out in row-major order (top to bottom, left to right), so a
//! writer can position the cursor once and emit a whole horizontal run.
//! [`runs`] does that grouping for writers that want it explicitly.

use super::{Buffer, Cell};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use std::iter::FusedIterator;

/// A single required terminal write: the new cell at (x, y).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUpdate {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// The cell the terminal should show.
    pub cell: Cell,
}

impl CellUpdate {
    /// Create a new update.
    #[inline]
    pub const fn new(x: u16, y: u16, cell: Cell) -> Self {
        Self { x, y, cell }
    }
}

/// Summary of one frame's output delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Number of cells that were different.
    pub cells_changed: usize,
    /// Number of horizontal runs those cells formed.
    pub runs: usize,
}

impl DiffStats {
    /// Account for one update, given the previous one in the stream.
    pub(crate) fn record(&mut self, prev: Option<&CellUpdate>, update: &CellUpdate) {
        self.cells_changed += 1;
        if !prev.is_some_and(|p| p.y == update.y && p.x + 1 == update.x) {
            self.runs += 1;
        }
    }
}

/// Scan position over a region, shared by [`Diff`] and the compositor's
/// presentation stream.
#[derive(Debug, Clone)]
pub(crate) struct Cursor {
    region: Rect,
    x: i32,
    y: i32,
    /// Yield every cell instead of only changed ones.
    all: bool,
}

impl Cursor {
    pub(crate) const fn new(region: Rect, all: bool) -> Self {
        Self {
            region,
            x: region.x,
            y: region.y,
            all,
        }
    }

    pub(crate) const fn is_done(&self) -> bool {
        self.region.is_empty() || self.y >= self.region.bottom()
    }

    /// Advance to the next cell that must be written and return it.
    ///
    /// `front` and `back` must have the same dimensions and `region` must
    /// lie inside them.
    pub(crate) fn next_update(&mut self, front: &Buffer, back: &Buffer) -> Option<CellUpdate> {
        let stride = back.width() as usize;
        while !self.is_done() {
            let (x, y) = (self.x, self.y);
            self.x += 1;
            if self.x >= self.region.right() {
                self.x = self.region.x;
                self.y += 1;
            }

            let idx = y as usize * stride + x as usize;
            let next = back.cell_at(idx);
            if self.all || front.cell_at(idx) != next {
                return Some(CellUpdate::new(x as u16, y as u16, next));
            }
        }
        None
    }
}

/// Lazy, finite stream of the cells that differ between two buffers.
///
/// The stream cannot be restarted; call [`diff`] again for a fresh one.
#[derive(Debug)]
pub struct Diff<'a> {
    front: &'a Buffer,
    back: &'a Buffer,
    cursor: Cursor,
}

impl Iterator for Diff<'_> {
    type Item = CellUpdate;

    #[inline]
    fn next(&mut self) -> Option<CellUpdate> {
        self.cursor.next_update(self.front, self.back)
    }
}

impl FusedIterator for Diff<'_> {}

/// Compare `front` against `back` over the whole grid.
///
/// Fails with [`Error::DimensionMismatch`] if the sizes differ; the caller
/// should then emit the back buffer in full (see [`full`]).
pub fn diff<'a>(front: &'a Buffer, back: &'a Buffer) -> Result<Diff<'a>> {
    diff_region(front, back, back.bounds())
}

/// Compare `front` against `back` inside a dirty rectangle only.
///
/// The rectangle is clipped to the buffers; an empty result yields nothing.
pub fn diff_region<'a>(front: &'a Buffer, back: &'a Buffer, region: Rect) -> Result<Diff<'a>> {
    if front.size() != back.size() {
        return Err(Error::DimensionMismatch {
            front: front.size(),
            back: back.size(),
        });
    }
    Ok(Diff {
        front,
        back,
        cursor: Cursor::new(region.intersection(&back.bounds()), false),
    })
}

/// Every cell of `buffer` as an update, in row-major order.
///
/// Used for full repaints, when the terminal contents are unknown.
pub fn full(buffer: &Buffer) -> Diff<'_> {
    Diff {
        front: buffer,
        back: buffer,
        cursor: Cursor::new(buffer.bounds(), true),
    }
}

/// A run of horizontally consecutive updates on one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Column of the first cell.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// Consecutive cells starting at `x`.
    pub cells: Vec<Cell>,
}

impl Run {
    /// Column one past the last cell.
    #[inline]
    pub fn end_x(&self) -> u16 {
        self.x + self.cells.len() as u16
    }
}

/// Iterator adapter grouping a row-major update stream into [`Run`]s.
#[derive(Debug, Clone)]
pub struct Runs<I: Iterator<Item = CellUpdate>> {
    updates: I,
    pending: Option<CellUpdate>,
}

impl<I: Iterator<Item = CellUpdate>> Iterator for Runs<I> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let first = self.pending.take().or_else(|| self.updates.next())?;
        let mut run = Run {
            x: first.x,
            y: first.y,
            cells: vec![first.cell],
        };
        for update in self.updates.by_ref() {
            if update.y == run.y && update.x == run.end_x() {
                run.cells.push(update.cell);
            } else {
                self.pending = Some(update);
                break;
            }
        }
        Some(run)
    }
}

/// Group updates into runs of consecutive cells.
pub fn runs<I: IntoIterator<Item = CellUpdate>>(updates: I) -> Runs<I::IntoIter> {
    Runs {
        updates: updates.into_iter(),
        pending: None,
    }
}
