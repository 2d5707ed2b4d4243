#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]
#![deny(missing_docs)]

#[doc(inline)]
pub use rasterkit_image as image;

#[doc(inline)]
pub use rasterkit_imgproc as imgproc;

/// The processing modes and their dispatch.
pub mod mode;
pub use mode::ProcMode;

/// Default parameters bound to the processing modes.
pub mod params;
pub use params::ProcParams;
