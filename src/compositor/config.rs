//! Compositor configuration.

use crate::buffer::{PoolConfig, Rgba};

/// Configuration for the [`Compositor`](super::Compositor).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositorConfig {
    /// Color the back buffer is cleared to at the start of every frame.
    ///
    /// `None` leaves the recycled buffer as it is, which then holds the
    /// frame before last; only useful when every frame repaints every cell.
    pub clear_color: Option<Rgba>,
    /// Whether the back buffer alpha-blends drawing calls.
    pub respect_alpha: bool,
    /// Whether the first frame repaints every cell, for terminals whose
    /// contents are unknown at startup.
    pub initial_full_repaint: bool,
    /// Limits for the surface pool.
    pub pool: PoolConfig,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            clear_color: Some(Rgba::TRANSPARENT),
            respect_alpha: true,
            initial_full_repaint: false,
            pool: PoolConfig::default(),
        }
    }
}
