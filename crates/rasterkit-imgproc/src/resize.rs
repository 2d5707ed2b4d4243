use crate::interpolation::{interpolate_pixel, InterpolationMode, Sampler};
use crate::{check, parallel};
use rasterkit_image::{Image, ImageError, ImageSize};

/// Size of an image scaled by `(rx, ry)`: `round(width * rx) x round(height * ry)`.
///
/// # Errors
///
/// If a ratio is not a positive finite number.
pub fn resized_size(size: ImageSize, rx: f64, ry: f64) -> Result<ImageSize, ImageError> {
    check::positive("rx", rx)?;
    check::positive("ry", ry)?;

    Ok(ImageSize {
        width: (size.width as f64 * rx).round() as usize,
        height: (size.height as f64 * ry).round() as usize,
    })
}

/// Resample an image by the ratios `(rx, ry)` into `dst`.
///
/// Destination pixel `(x, y)` samples the source at `(x / rx, y / ry)` with the chosen
/// interpolation; rows are processed in parallel.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image, usually of size [`resized_size`].
/// * `rx` - The horizontal scale ratio.
/// * `ry` - The vertical scale ratio.
/// * `interpolation` - The interpolation mode to use.
///
/// PRECONDITION: `src` and `dst` must have the same channel count.
pub fn resample(
    src: &Image,
    dst: &mut Image,
    rx: f64,
    ry: f64,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    check::positive("rx", rx)?;
    check::positive("ry", ry)?;
    check::channels(dst, src.num_channels())?;

    let sampler = Sampler::new(src)?;
    let channels = src.num_channels();

    parallel::par_for_each_row(dst, |y, dst_row| {
        let v = y as f64 / ry;
        for (x, pixel) in dst_row.chunks_exact_mut(channels).enumerate() {
            interpolate_pixel(&sampler, x as f64 / rx, v, interpolation, pixel);
        }
    });

    Ok(())
}

/// Resize an image by the ratios `(rx, ry)`.
///
/// # Example
///
/// ```
/// use rasterkit_image::{Image, PixelFormat};
/// use rasterkit_imgproc::interpolation::InterpolationMode;
/// use rasterkit_imgproc::resize::resize;
///
/// let image = Image::from_size_val([4, 5].into(), PixelFormat::Bgr8, 0).unwrap();
/// let resized = resize(&image, 1.5, 0.5, InterpolationMode::Bilinear).unwrap();
///
/// assert_eq!(resized.width(), 6);
/// assert_eq!(resized.height(), 3);
/// ```
pub fn resize(
    src: &Image,
    rx: f64,
    ry: f64,
    interpolation: InterpolationMode,
) -> Result<Image, ImageError> {
    let size = resized_size(src.size(), rx, ry)?;
    let mut dst = Image::from_size_val(size, src.format(), 0)?;
    resample(src, &mut dst, rx, ry, interpolation)?;
    Ok(dst)
}
