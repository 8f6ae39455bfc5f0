//! Compositor: The double-buffer swap controller.
//!
//! One [`Compositor`] owns a front/back buffer pair for one render target
//! and walks it through a fixed cycle each frame:
//!
//! ```text
//!  begin_frame()        end_frame()                 drop(Presentation)
//! ┌──────┐   ────▶   ┌───────────┐  ──▶  ┌─────────┐  ──▶  ┌────────────┐
//! │ Idle │           │ Rendering │       │ Diffing │       │ Presenting │ ──▶ Idle
//! └──────┘           └───────────┘       └─────────┘       └────────────┘
//! ```
//!
//! Only one frame is ever in flight. That is enforced by the state machine,
//! not by locks: a compositor is driven from a single thread, and callers
//! that share one across threads must serialize access themselves.

mod config;
mod controller;

pub use config::CompositorConfig;
pub use controller::{Compositor, FrameState, Presentation};
