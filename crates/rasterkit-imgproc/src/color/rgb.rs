use crate::{check, parallel, Processed};
use rasterkit_image::{Image, ImageError, PixelFormat};

/// Reorder a BGR image into RGB by swapping the first and last channel.
///
/// The same routine converts RGB back into BGR.
///
/// Precondition: the input and output images must have 3 channels and the same size.
pub fn rgb_from_bgr(src: &Image, dst: &mut Image) -> Result<(), ImageError> {
    check::channels(src, 3)?;
    check::channels(dst, 3)?;
    check::same_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = src_pixel[2];
        dst_pixel[1] = src_pixel[1];
        dst_pixel[2] = src_pixel[0];
    });

    Ok(())
}

/// Swap the red and blue channels of a color image.
///
/// Returns [`Processed::Unchanged`] for grayscale input.
pub fn swap_rb(src: &Image) -> Result<Processed, ImageError> {
    if src.format() == PixelFormat::Gray8 {
        return Ok(Processed::Unchanged);
    }

    let mut dst = src.zeros_like()?;
    rgb_from_bgr(src, &mut dst)?;
    Ok(dst.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_rb_reverses_channels() -> Result<(), ImageError> {
        let image = Image::new([2, 1].into(), PixelFormat::Bgr8, vec![1, 2, 3, 4, 5, 6])?;
        let swapped = swap_rb(&image)?.or_original(&image);
        assert_eq!(swapped.to_packed_vec(), vec![3, 2, 1, 6, 5, 4]);

        // twice is the identity
        let back = swap_rb(&swapped)?.or_original(&swapped);
        assert_eq!(back.to_packed_vec(), image.to_packed_vec());

        Ok(())
    }

    #[test]
    fn swap_rb_skips_gray() -> Result<(), ImageError> {
        let image = Image::from_size_val([2, 2].into(), PixelFormat::Gray8, 3)?;
        assert_eq!(swap_rb(&image)?, Processed::Unchanged);
        Ok(())
    }
}
