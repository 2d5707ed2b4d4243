//! Pixel interpolation methods for image transformations.
//!
//! This module provides the interpolation algorithms used when resampling images
//! during resizing.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Linear blend of the 2x2 neighbourhood
//! - **Bicubic**: Cubic convolution over the 4x4 neighbourhood

mod bicubic;
mod bilinear;
pub(crate) mod interpolate;
mod nearest;

pub use bicubic::cubic_weight;
pub use interpolate::{interpolate_pixel, InterpolationMode, Sampler};
