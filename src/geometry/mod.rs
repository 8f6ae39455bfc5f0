//! Geometry module: Rectangles used for clipping and dirty regions.
//!
//! Positions are signed so that callers can describe rectangles that hang
//! partly off a buffer; every consumer clips before touching cells.

mod rect;

pub use rect::Rect;
