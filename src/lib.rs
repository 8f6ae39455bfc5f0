//! # Tessera
//!
//! An alpha-blending cell frame-buffer compositor for terminal UIs.
//!
//! Tessera keeps an in-memory grid of styled cells, lets you draw into it
//! with translucent colors, and works out the smallest set of cell writes
//! that brings the terminal up to date each frame.
//!
//! ## Core Concepts
//!
//! - **Cell buffers**: Grids stored as parallel arrays (glyphs, colors, attributes)
//! - **Alpha compositing**: Porter-Duff "over" for fills, text and blits
//! - **Double-buffered frames**: Front and back buffers, swapped without copying
//! - **Lazy diffing**: Row-major stream of changed cells, consumed by a writer
//! - **Buffer pooling**: Transient surfaces reuse allocations keyed by size
//!
//! ## Example
//!
//! ```rust
//! use tessera::{AnsiWriter, Attributes, Compositor, Rgba};
//!
//! let mut compositor = Compositor::new(80, 24)?;
//! let mut writer = AnsiWriter::new(Vec::new());
//!
//! let back = compositor.begin_frame()?;
//! back.fill_rect(0, 0, 80, 1, Rgba::BLUE);
//! back.draw_text("status", 1, 0, Rgba::WHITE, Rgba::TRANSPARENT, Attributes::BOLD, None);
//!
//! let stats = writer.present(compositor.end_frame()?)?;
//! assert_eq!(stats.cells_changed, 80);
//! # Ok::<(), tessera::Error>(())
//! ```

pub mod buffer;
pub mod compositor;
pub mod error;
pub mod geometry;
pub mod terminal;

// Re-exports for convenience
pub use buffer::{
    Attributes, Buffer, BufferPool, Cell, CellUpdate, DiffStats, PoolConfig, Rgba, Selection,
    SharedBufferPool,
};
pub use compositor::{Compositor, CompositorConfig, FrameState, Presentation};
pub use error::{Error, Result};
pub use geometry::Rect;
pub use terminal::AnsiWriter;
