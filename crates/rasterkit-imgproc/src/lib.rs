#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image enhancement module.
pub mod enhance;

/// image filtering module.
pub mod filter;

/// frequency domain transform and band filters.
pub mod fourier;

/// compute and adjust image histograms.
pub mod histogram;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallization utilities.
pub mod parallel;

/// block pooling operations.
pub mod pooling;

/// outcome of operations that may not apply to an input.
pub mod processed;

/// utility functions for resizing images.
pub mod resize;

/// operations to threshold images.
pub mod threshold;

/// image geometric transformations module.
pub mod warp;

mod check;

pub use processed::Processed;
