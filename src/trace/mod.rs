//! # Tracing Primitives
//!
//! Integer rasterization over caller-supplied visitors.
//!
//! Every primitive hands each computed point to a visitor closure
//! `FnMut(i32, i32) -> bool`. For [`line`], [`ray`] and [`fill`] the return value
//! decides whether tracing continues; [`circle`] ignores it. The primitives keep no
//! state of their own besides the traversal itself, so bounds checks and "already
//! visited" bookkeeping belong to the visitor.
//!
//! All arithmetic is integer-only, so results are identical on every platform and can
//! be pinned by regression tests.
//!
//! # Examples
//!
//! ```
//! use tilecarve::trace;
//!
//! let mut points = Vec::new();
//! let reached = trace::line(0, 0, 3, 1, |x, y| {
//!     points.push((x, y));
//!     true
//! });
//! assert!(reached);
//! assert_eq!(points, vec![(0, 0), (1, 0), (2, 1), (3, 1)]);
//! ```

pub mod circle;
pub mod fill;
pub mod line;

pub use circle::circle;
pub use fill::fill;
pub use line::{line, ray, COORDINATE_LIMIT};
