//! Buffer module: Core data structures for the double-buffer rendering system.
//!
//! This module contains:
//! - [`Rgba`]: Normalized color with "over" blending
//! - [`Cell`]: The unit a terminal position displays
//! - [`Buffer`]: A grid of cells stored as parallel arrays
//! - [`draw`]: Drawing primitives (rectangles, text, blits)
//! - [`diff`]: Diffing engine producing the per-frame update stream
//! - [`pool`]: Reuse of buffers keyed by dimensions

mod cell;
mod color;
#[allow(clippy::module_inception)]
mod buffer;
pub mod diff;
pub mod draw;
pub mod pool;

pub use buffer::{Buffer, RawParts, RawPartsMut, CHANNELS};
pub use cell::{Attributes, Cell};
pub use color::Rgba;
pub use diff::{CellUpdate, DiffStats};
pub use draw::Selection;
pub use pool::{BufferPool, PoolConfig, SharedBufferPool};
