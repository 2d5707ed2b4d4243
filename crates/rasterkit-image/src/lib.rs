#![deny(missing_docs)]
//! Strided 8-bit image type and scoped pixel access.

/// image representation for pixel processing.
pub mod image;

/// Bounds-checked pixel views.
pub mod buffer;

/// Error types for the image module.
pub mod error;

pub use crate::buffer::{PixelView, PixelViewMut};
pub use crate::error::ImageError;
pub use crate::image::{aligned_stride, Image, ImageSize, PixelFormat};
