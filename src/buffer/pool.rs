//! Buffer pool: Reuse of buffers keyed by dimensions.
//!
//! Transient surfaces (overlays, popups, off-screen subtrees) are created
//! and torn down often. Releasing their buffers here and acquiring from
//! the pool first keeps allocation churn bounded.
//!
//! The pool is plain owned state. A single render target owns one (the
//! [`Compositor`](crate::Compositor) does); targets that share a pool wrap
//! it in a [`SharedBufferPool`] so acquire and release are serialized.

use super::Buffer;
use crate::error::Result;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Pool limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Free buffers kept per (width, height).
    pub max_per_size: usize,
    /// Free buffers kept across all sizes.
    pub max_total: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_per_size: 4,
            max_total: 32,
        }
    }
}

/// Pool counters for debugging/profiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Acquisitions served from the free list.
    pub hits: u64,
    /// Acquisitions that allocated.
    pub misses: u64,
    /// Buffers accepted back into the free list.
    pub returned: u64,
    /// Buffers dropped because the pool was full.
    pub evicted: u64,
}

/// A bounded free-list of buffers keyed by (width, height).
#[derive(Debug, Default)]
pub struct BufferPool {
    config: PoolConfig,
    free: HashMap<(u16, u16), Vec<Buffer>>,
    total: usize,
    stats: PoolStats,
}

/// A pool shared between render targets.
pub type SharedBufferPool = Arc<Mutex<BufferPool>>;

impl BufferPool {
    /// Create a pool with default limits.
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Create a pool with custom limits.
    pub fn with_config(config: PoolConfig) -> Self {
        Self {
            config,
            free: HashMap::new(),
            total: 0,
            stats: PoolStats::default(),
        }
    }

    /// Wrap the pool for sharing across render targets.
    pub fn into_shared(self) -> SharedBufferPool {
        Arc::new(Mutex::new(self))
    }

    /// Pool limits.
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Pool counters.
    pub const fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Number of free buffers held.
    pub const fn len(&self) -> usize {
        self.total
    }

    /// Whether the pool holds no buffers.
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of free buffers held for one size.
    pub fn available(&self, width: u16, height: u16) -> usize {
        self.free.get(&(width, height)).map_or(0, Vec::len)
    }

    /// Get a cleared buffer of the given size, reusing a free one if possible.
    ///
    /// A reused buffer is reset to empty cells and takes the new id and
    /// alpha mode, so it is indistinguishable from a fresh one.
    pub fn acquire(
        &mut self,
        id: impl Into<String>,
        width: u16,
        height: u16,
        respect_alpha: bool,
    ) -> Result<Buffer> {
        if let Some(mut buffer) = self.take(width, height) {
            self.total -= 1;
            self.stats.hits += 1;
            buffer.reset();
            buffer.set_id(id);
            buffer.set_respect_alpha(respect_alpha);
            trace!(id = buffer.id(), width, height, "pool hit");
            return Ok(buffer);
        }

        self.stats.misses += 1;
        let buffer = Buffer::named(id, width, height, respect_alpha)?;
        trace!(id = buffer.id(), width, height, "pool miss");
        Ok(buffer)
    }

    /// Return a buffer for later reuse.
    ///
    /// The buffer is dropped instead if its size bucket or the pool as a
    /// whole is at capacity.
    pub fn release(&mut self, buffer: Buffer) {
        let key = buffer.size();
        if self.available(key.0, key.1) >= self.config.max_per_size
            || self.total >= self.config.max_total
        {
            self.stats.evicted += 1;
            debug!(id = buffer.id(), size = ?key, "pool full, dropping buffer");
            return;
        }
        self.free.entry(key).or_default().push(buffer);
        self.total += 1;
        self.stats.returned += 1;
    }

    /// Pop a free buffer of one size, dropping its bucket once empty.
    fn take(&mut self, width: u16, height: u16) -> Option<Buffer> {
        let bucket = self.free.get_mut(&(width, height))?;
        let buffer = bucket.pop();
        if bucket.is_empty() {
            self.free.remove(&(width, height));
        }
        buffer
    }

    /// Drop every pooled buffer, returning how many were freed.
    ///
    /// Call at shutdown, or after a resize makes the old sizes useless.
    pub fn drain(&mut self) -> usize {
        let freed = self.total;
        self.free.clear();
        self.total = 0;
        if freed > 0 {
            debug!(freed, "buffer pool drained");
        }
        freed
    }
}
