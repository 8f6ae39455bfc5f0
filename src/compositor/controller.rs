//! Frame controller: owns the buffer pair, the surface pool and the frame
//! state machine.

use super::config::CompositorConfig;
use crate::buffer::diff::Cursor;
use crate::buffer::{Buffer, BufferPool, CellUpdate, DiffStats};
use crate::error::{Error, Result};
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// Where the compositor is in its per-frame cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameState {
    /// Between frames.
    #[default]
    Idle,
    /// The caller is drawing into the back buffer.
    Rendering,
    /// Back is being compared against front.
    Diffing,
    /// The update stream is being handed to the output.
    Presenting,
}

/// Double-buffered frame controller.
///
/// The back buffer is where the current frame is drawn; the front buffer
/// mirrors what the terminal last received. Ending a frame yields the
/// cells that differ, then the two swap roles. The old front becomes the
/// next back buffer, so no cell data is copied.
///
/// # Example
///
/// ```
/// use tessera::{Compositor, Rgba};
///
/// let mut compositor = Compositor::new(10, 10)?;
/// let back = compositor.begin_frame()?;
/// back.fill_rect(0, 0, 3, 3, Rgba::BLUE);
///
/// let updates: Vec<_> = compositor.end_frame()?.collect();
/// assert_eq!(updates.len(), 9);
/// assert_eq!((updates[0].x, updates[0].y), (0, 0));
/// # Ok::<(), tessera::Error>(())
/// ```
#[derive(Debug)]
pub struct Compositor {
    /// Configuration.
    config: CompositorConfig,
    /// Last presented state.
    front: Buffer,
    /// Frame being drawn.
    back: Buffer,
    /// Current position in the frame cycle.
    state: FrameState,
    /// Whether the next presentation must include every cell.
    full_repaint: bool,
    /// Free buffers for transient surfaces.
    pool: BufferPool,
    /// Frames presented so far.
    frame_count: u64,
    /// Statistics of the last presented frame.
    last_stats: DiffStats,
}

impl Compositor {
    /// Create a compositor with default configuration.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        Self::with_config(width, height, CompositorConfig::default())
    }

    /// Create a compositor with custom configuration.
    pub fn with_config(width: u16, height: u16, config: CompositorConfig) -> Result<Self> {
        let front = Buffer::named("front", width, height, config.respect_alpha)?;
        let back = Buffer::named("back", width, height, config.respect_alpha)?;
        debug!(width, height, "compositor created");
        Ok(Self {
            front,
            back,
            state: FrameState::Idle,
            full_repaint: config.initial_full_repaint,
            pool: BufferPool::with_config(config.pool),
            frame_count: 0,
            last_stats: DiffStats::default(),
            config,
        })
    }

    /// Configuration.
    pub const fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// Current frame state.
    pub const fn state(&self) -> FrameState {
        self.state
    }

    /// Dimensions as `(width, height)`.
    pub const fn size(&self) -> (u16, u16) {
        self.back.size()
    }

    /// The last presented buffer.
    pub const fn front(&self) -> &Buffer {
        &self.front
    }

    /// The buffer being drawn (or about to be drawn).
    pub const fn back(&self) -> &Buffer {
        &self.back
    }

    /// Frames presented so far.
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Statistics of the last presented frame.
    pub const fn last_stats(&self) -> DiffStats {
        self.last_stats
    }

    /// Whether the next presentation will include every cell.
    pub const fn needs_full_repaint(&self) -> bool {
        self.full_repaint
    }

    /// Make the next presentation include every cell.
    ///
    /// Use this when something else wrote to the terminal.
    pub fn force_full_repaint(&mut self) {
        debug!("full repaint requested");
        self.full_repaint = true;
    }

    /// Start a frame and return the back buffer to draw into.
    ///
    /// The back buffer is cleared to the configured color first. Fails with
    /// [`Error::ConcurrentFrame`] if a frame is already in flight.
    pub fn begin_frame(&mut self) -> Result<&mut Buffer> {
        if self.state != FrameState::Idle {
            return Err(Error::ConcurrentFrame { state: self.state });
        }
        self.state = FrameState::Rendering;
        if let Some(color) = self.config.clear_color {
            self.back.clear(color);
        }
        Ok(&mut self.back)
    }

    /// The back buffer of the frame in flight.
    ///
    /// Lets drawing code re-borrow the back buffer after using other
    /// compositor methods (such as [`Compositor::acquire_surface`]).
    pub fn back_mut(&mut self) -> Result<&mut Buffer> {
        if self.state != FrameState::Rendering {
            return Err(Error::NoFrameInProgress { state: self.state });
        }
        Ok(&mut self.back)
    }

    /// Finish drawing and start presenting.
    ///
    /// Returns the lazy stream of cells the terminal must update, in
    /// row-major order. After a resize or [`Compositor::force_full_repaint`]
    /// the stream holds every cell. If the back buffer was resized through
    /// the `&mut Buffer` from [`Compositor::begin_frame`], the front buffer
    /// is resized to match and the frame is a full repaint. Should that
    /// resize fail, the frame stays in [`FrameState::Rendering`]. Dropping the returned [`Presentation`]
    /// swaps the buffers and returns the compositor to [`FrameState::Idle`].
    pub fn end_frame(&mut self) -> Result<Presentation<'_>> {
        if self.state != FrameState::Rendering {
            return Err(Error::NoFrameInProgress { state: self.state });
        }

        // The back buffer was resized directly; bring front along and repaint.
        let size_changed = self.front.size() != self.back.size();
        if size_changed {
            let (width, height) = self.back.size();
            self.front.resize(width, height)?;
            debug!(size = ?(width, height), "back buffer resized mid-frame");
        }
        self.state = FrameState::Diffing;

        let full = self.full_repaint || size_changed;
        let cursor = Cursor::new(self.back.bounds(), full);
        if full {
            debug!(size = ?self.back.size(), "presenting full repaint");
        }

        self.state = FrameState::Presenting;
        Ok(Presentation {
            compositor: self,
            cursor,
            full,
            stats: DiffStats::default(),
            last: None,
        })
    }

    /// Called when a presentation is dropped.
    fn finish_frame(&mut self, stats: DiffStats, completed: bool) {
        self.front.swap(&mut self.back);
        self.full_repaint = !completed;
        if !completed {
            debug!("presentation dropped before completion, next frame repaints fully");
        }
        self.frame_count += 1;
        self.last_stats = stats;
        self.state = FrameState::Idle;
        trace!(
            frame = self.frame_count,
            cells_changed = stats.cells_changed,
            runs = stats.runs,
            "frame presented"
        );
    }

    /// Resize both buffers.
    ///
    /// Only allowed between frames. The replaced buffers go back to the
    /// pool and the next frame repaints every cell. If allocation fails
    /// the current buffers are kept untouched and the error is returned.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        if self.state != FrameState::Idle {
            return Err(Error::ConcurrentFrame { state: self.state });
        }
        if (width, height) == self.size() {
            return Ok(());
        }

        let respect_alpha = self.config.respect_alpha;
        let front = self.pool.acquire("front", width, height, respect_alpha)?;
        let back = match self.pool.acquire("back", width, height, respect_alpha) {
            Ok(back) => back,
            Err(err) => {
                self.pool.release(front);
                return Err(err);
            }
        };

        debug!(from = ?self.size(), to = ?(width, height), "compositor resized");
        let old_front = std::mem::replace(&mut self.front, front);
        let old_back = std::mem::replace(&mut self.back, back);
        self.pool.release(old_front);
        self.pool.release(old_back);
        self.full_repaint = true;
        Ok(())
    }

    /// Get a cleared buffer for a transient surface, reusing a pooled one
    /// when one of the right size is free.
    pub fn acquire_surface(
        &mut self,
        id: impl Into<String>,
        width: u16,
        height: u16,
        respect_alpha: bool,
    ) -> Result<Buffer> {
        self.pool.acquire(id, width, height, respect_alpha)
    }

    /// Hand a surface's buffer back for reuse.
    pub fn release_surface(&mut self, buffer: Buffer) {
        self.pool.release(buffer);
    }

    /// The surface pool.
    pub const fn pool(&self) -> &BufferPool {
        &self.pool
    }

    /// The surface pool, mutably (e.g. to [`BufferPool::drain`] it).
    pub fn pool_mut(&mut self) -> &mut BufferPool {
        &mut self.pool
    }
}

/// The update stream of one frame.
///
/// Yields [`CellUpdate`]s lazily in row-major order. Dropping it completes
/// the frame: the buffers swap and the compositor goes idle. Dropping it
/// before it is exhausted leaves the terminal out of sync, so the next
/// frame becomes a full repaint.
///
/// Leaking it (e.g. with [`std::mem::forget`]) skips that step: the
/// compositor stays in [`FrameState::Presenting`] and every later
/// [`Compositor::begin_frame`] fails with [`Error::ConcurrentFrame`].
#[derive(Debug)]
pub struct Presentation<'a> {
    compositor: &'a mut Compositor,
    cursor: Cursor,
    full: bool,
    stats: DiffStats,
    last: Option<CellUpdate>,
}

impl Presentation<'_> {
    /// Whether this frame repaints every cell.
    pub const fn is_full_repaint(&self) -> bool {
        self.full
    }

    /// Counts of the updates yielded so far.
    pub const fn stats(&self) -> DiffStats {
        self.stats
    }

    /// The back buffer being presented.
    pub fn buffer(&self) -> &Buffer {
        &self.compositor.back
    }
}

impl Iterator for Presentation<'_> {
    type Item = CellUpdate;

    fn next(&mut self) -> Option<CellUpdate> {
        let update = self
            .cursor
            .next_update(&self.compositor.front, &self.compositor.back)?;
        self.stats.record(self.last.as_ref(), &update);
        self.last = Some(update);
        Some(update)
    }
}

impl FusedIterator for Presentation<'_> {}

impl Drop for Presentation<'_> {
    fn drop(&mut self) {
        let completed = self
            .cursor
            .next_update(&self.compositor.front, &self.compositor.back)
            .is_none();
        self.compositor.finish_frame(self.stats, completed);
    }
}
