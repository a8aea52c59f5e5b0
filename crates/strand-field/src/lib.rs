//! Field containers for the strand thermal simulator.
//!
//! The state of the live strand is a sliding window of cross-sectional
//! [`SliceGrid`]s held in a [`SlidingFieldBuffer`], double-buffered as a
//! [`FieldPair`] so each tick reads the previous field and writes the
//! next one. All containers are plain data; the solver and scheduler
//! crates own the physics and the threading.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod pair;
mod rotating;
mod slice;
mod window;

pub use pair::FieldPair;
pub use slice::{QuadrantMut, SliceGrid};
pub use window::{Residency, SlidingFieldBuffer, FIELD_BLOCK};
