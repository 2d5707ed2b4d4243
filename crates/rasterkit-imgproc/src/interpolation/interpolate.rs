use super::bicubic::bicubic_interpolation;
use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use rasterkit_image::{Image, ImageError};

/// Interpolation mode for the resize operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Nearest neighbor interpolation
    Nearest,
    /// Bilinear interpolation
    Bilinear,
    /// Bicubic interpolation
    Bicubic,
}

/// Read-only rows of a source image prepared for interpolation.
#[derive(Debug)]
pub struct Sampler<'a> {
    pub(crate) rows: Vec<&'a [u8]>,
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) channels: usize,
}

impl<'a> Sampler<'a> {
    /// Borrow the rows of `image`.
    pub fn new(image: &'a Image) -> Result<Self, ImageError> {
        let view = image.view();
        let rows = (0..image.height())
            .map(|y| view.row(y))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rows,
            width: image.width(),
            height: image.height(),
            channels: image.num_channels(),
        })
    }

    /// Sample `ch` of the pixel at integer position `(y, x)`.
    #[inline]
    pub(crate) fn at(&self, y: usize, x: usize, ch: usize) -> u8 {
        self.rows[y][x * self.channels + ch]
    }

    /// Number of channels per pixel.
    pub fn num_channels(&self) -> usize {
        self.channels
    }
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The source image rows.
/// * `u` - The x coordinate in the source image.
/// * `v` - The y coordinate in the source image.
/// * `interpolation` - The interpolation mode to use.
/// * `pixel` - The output pixel, one value per channel.
pub fn interpolate_pixel(
    image: &Sampler,
    u: f64,
    v: f64,
    interpolation: InterpolationMode,
    pixel: &mut [u8],
) {
    match interpolation {
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v, pixel),
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v, pixel),
        InterpolationMode::Bicubic => bicubic_interpolation(image, u, v, pixel),
    }
}
