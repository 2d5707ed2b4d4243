//! Geometric image transformations.
//!
//! Affine mapping by inverse lookup: every destination pixel asks which source pixel
//! lands on it and copies it when it exists.
//!
//! # Examples
//!
//! Rotating an image by 30 degrees about its center:
//!
//! ```
//! use rasterkit_image::{Image, PixelFormat};
//! use rasterkit_imgproc::warp::{affine, AffineTransform};
//!
//! let image = Image::from_size_val([16, 8].into(), PixelFormat::Gray8, 1).unwrap();
//! let rotated = affine(&image, &AffineTransform::rotation(30.0)).unwrap();
//!
//! assert_eq!(rotated.size(), image.size());
//! ```

mod affine;

pub use affine::{affine, warp_affine, AffineTransform, InverseMap};
