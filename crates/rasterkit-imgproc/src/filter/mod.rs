//! Filter operations
//!
//! Window filters over 8-bit images. Every filter shares the same border policy: taps
//! that fall outside the image are skipped rather than padded.

/// Filter kernels
pub mod kernels;

mod convolution;
pub use convolution::filter2d;
pub(crate) use convolution::source_rows;

/// Filter operations
mod ops;
pub use ops::*;

mod rank;
pub use rank::{max_min_filter, median_blur};

pub use kernels::Direction;
