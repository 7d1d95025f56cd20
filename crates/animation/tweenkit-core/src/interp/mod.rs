//! Interpolation helpers.
//!
//! Progress comes from [`crate::curve::evaluate`]; these helpers only blend
//! values component-wise with that scalar progress.

pub mod functions;

pub use functions::lerp_value;
