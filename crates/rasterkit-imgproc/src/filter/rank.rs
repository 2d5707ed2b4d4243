use super::convolution::{source_rows, window};
use crate::{check, parallel};
use rasterkit_image::{Image, ImageError};

fn check_kernel_size(kernel_size: usize) -> Result<(), ImageError> {
    if kernel_size < 3 || kernel_size % 2 == 0 {
        return Err(ImageError::InvalidKernelSize(kernel_size));
    }
    Ok(())
}

/// Apply a median filter to every channel of an image.
///
/// The in-bounds samples of each window are sorted and the one at index
/// `count / 2 + 1` is taken, one past the lower median. When the window holds too few
/// samples for that index the largest sample is used.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image.
/// * `kernel_size` - Odd window side, at least 3.
///
/// PRECONDITION: `src` and `dst` must have the same size and channel count.
pub fn median_blur(src: &Image, dst: &mut Image, kernel_size: usize) -> Result<(), ImageError> {
    check_kernel_size(kernel_size)?;
    check::same_layout(src, dst)?;

    let (width, height, channels) = (src.width(), src.height(), src.num_channels());
    let pad = kernel_size / 2;
    let rows = source_rows(src)?;

    parallel::par_for_each_row(dst, |y, dst_row| {
        let mut samples = Vec::with_capacity(kernel_size * kernel_size);
        for x in 0..width {
            for ch in 0..channels {
                samples.clear();
                for yy in window(y, pad, height) {
                    for xx in window(x, pad, width) {
                        samples.push(rows[yy][xx * channels + ch]);
                    }
                }
                samples.sort_unstable();
                let idx = (samples.len() / 2 + 1).min(samples.len() - 1);
                dst_row[x * channels + ch] = samples[idx];
            }
        }
    });

    Ok(())
}

/// Replace each pixel of a grayscale image with the range `max - min` of its window.
///
/// PRECONDITION: `src` and `dst` must be single channel images of the same size.
pub fn max_min_filter(src: &Image, dst: &mut Image, kernel_size: usize) -> Result<(), ImageError> {
    check_kernel_size(kernel_size)?;
    check::channels(src, 1)?;
    check::same_layout(src, dst)?;

    let (width, height) = (src.width(), src.height());
    let pad = kernel_size / 2;
    let rows = source_rows(src)?;

    parallel::par_for_each_row(dst, |y, dst_row| {
        for (x, out) in dst_row.iter_mut().enumerate() {
            let (mut lo, mut hi) = (u8::MAX, u8::MIN);
            for yy in window(y, pad, height) {
                for &v in &rows[yy][window(x, pad, width)] {
                    lo = lo.min(v);
                    hi = hi.max(v);
                }
            }
            *out = hi - lo;
        }
    });

    Ok(())
}
