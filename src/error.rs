//! Error types for buffer and compositor operations.

use crate::compositor::FrameState;
use thiserror::Error;

/// Errors surfaced by the buffer engine.
///
/// All of these are local and recoverable. Drawing outside a buffer is
/// never an error; it is clipped.
#[derive(Error, Debug)]
pub enum Error {
    /// A buffer was requested with a zero width or height.
    #[error("invalid buffer dimensions {width}x{height}")]
    InvalidDimension {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },

    /// A color channel was NaN or infinite.
    #[error("invalid {channel} channel value: {value}")]
    InvalidChannel {
        /// Channel name (`r`, `g`, `b` or `a`).
        channel: char,
        /// The offending value.
        value: f64,
    },

    /// Two buffers of different size were diffed.
    #[error("cannot diff {front:?} against {back:?}")]
    DimensionMismatch {
        /// Front buffer size as (width, height).
        front: (u16, u16),
        /// Back buffer size as (width, height).
        back: (u16, u16),
    },

    /// A frame was started (or the pair resized) while another frame is in flight.
    #[error("a frame is already in flight (state: {state:?})")]
    ConcurrentFrame {
        /// State the compositor was in.
        state: FrameState,
    },

    /// `end_frame` was called without a matching `begin_frame`.
    #[error("no frame in progress (state: {state:?})")]
    NoFrameInProgress {
        /// State the compositor was in.
        state: FrameState,
    },

    /// Backing storage for a buffer could not be allocated.
    #[error("failed to allocate storage for a {width}x{height} buffer")]
    Allocation {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },

    /// Writing to the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
