use super::kernels::Kernel;
use crate::{check, parallel};
use rasterkit_image::{Image, ImageError};

/// Collect the pixel rows of `src` once so the workers can index them directly.
pub(crate) fn source_rows(src: &Image) -> Result<Vec<&[u8]>, ImageError> {
    let view = src.view();
    (0..src.height()).map(|y| view.row(y)).collect()
}

/// In-bounds tap range `[center - pad, center + pad]` clipped to `[0, len)`.
#[inline]
pub(crate) fn window(center: usize, pad: usize, len: usize) -> std::ops::RangeInclusive<usize> {
    center.saturating_sub(pad)..=(center + pad).min(len - 1)
}

/// Convolve an image with a kernel, skipping taps that fall outside the image.
///
/// For every pixel and channel the weighted window sum is accumulated row by row over
/// the in-bounds taps only, divided by the kernel divisor and saturated to a byte.
/// Near the borders the effective kernel is therefore smaller than `kernel`.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image.
/// * `kernel` - The kernel to apply.
///
/// PRECONDITION: `src` and `dst` must have the same size and channel count.
///
/// # Example
///
/// ```
/// use rasterkit_image::{Image, PixelFormat};
/// use rasterkit_imgproc::filter::{filter2d, kernels};
///
/// let image = Image::from_size_val([3, 3].into(), PixelFormat::Gray8, 9).unwrap();
/// let mut dst = image.zeros_like().unwrap();
///
/// filter2d(&image, &mut dst, &kernels::box_kernel(3).unwrap()).unwrap();
///
/// // the corner only sees four of the nine taps
/// assert_eq!(dst.to_packed_vec(), vec![4, 6, 4, 6, 9, 6, 4, 6, 4]);
/// ```
pub fn filter2d(src: &Image, dst: &mut Image, kernel: &Kernel) -> Result<(), ImageError> {
    check::same_layout(src, dst)?;

    let (width, height, channels) = (src.width(), src.height(), src.num_channels());
    let pad = kernel.pad();
    let divisor = kernel.divisor();
    let rows = source_rows(src)?;

    parallel::par_for_each_row(dst, |y, dst_row| {
        for x in 0..width {
            for ch in 0..channels {
                let mut acc = 0.0;
                for yy in window(y, pad, height) {
                    let src_row = rows[yy];
                    let ky = yy + pad - y;
                    for xx in window(x, pad, width) {
                        let kx = xx + pad - x;
                        acc += src_row[xx * channels + ch] as f64 * kernel.at(ky, kx);
                    }
                }
                dst_row[x * channels + ch] = (acc / divisor).clamp(0.0, 255.0) as u8;
            }
        }
    });

    Ok(())
}
