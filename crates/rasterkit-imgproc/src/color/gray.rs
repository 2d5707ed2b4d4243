use std::borrow::Cow;

use crate::{check, parallel, Processed};
use rasterkit_image::{Image, ImageError, PixelFormat};

/// Fixed-point luma weights for (blue, green, red); they sum to 256.
const LUMA_BGR: [u32; 3] = [29, 150, 77];

#[inline]
fn luma(pixel: &[u8]) -> u8 {
    let sum = LUMA_BGR[0] * pixel[0] as u32
        + LUMA_BGR[1] * pixel[1] as u32
        + LUMA_BGR[2] * pixel[2] as u32;
    (sum >> 8) as u8
}

/// Convert a BGR image to grayscale.
///
/// Each pixel is reduced with `(77 * R + 150 * G + 29 * B) >> 8`.
///
/// # Arguments
///
/// * `src` - The input BGR image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input image must have 3 channels.
/// Precondition: the output image must have 1 channel.
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use rasterkit_image::{Image, PixelFormat};
/// use rasterkit_imgproc::color::gray_from_bgr;
///
/// let data = vec![0, 0, 255, 255, 255, 255];
/// let image = Image::new([2, 1].into(), PixelFormat::Bgr8, data).unwrap();
/// let mut gray = Image::from_size_val(image.size(), PixelFormat::Gray8, 0).unwrap();
///
/// gray_from_bgr(&image, &mut gray).unwrap();
///
/// assert_eq!(gray.to_packed_vec(), vec![76, 255]);
/// ```
pub fn gray_from_bgr(src: &Image, dst: &mut Image) -> Result<(), ImageError> {
    check::channels(src, 3)?;
    check::channels(dst, 1)?;
    check::same_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = luma(src_pixel);
    });

    Ok(())
}

/// Convert an image to grayscale.
///
/// Returns [`Processed::Unchanged`] when the input is already grayscale.
pub fn to_gray(src: &Image) -> Result<Processed, ImageError> {
    match src.format() {
        PixelFormat::Gray8 => Ok(Processed::Unchanged),
        PixelFormat::Bgr8 => {
            let mut dst = Image::from_size_val(src.size(), PixelFormat::Gray8, 0)?;
            gray_from_bgr(src, &mut dst)?;
            Ok(dst.into())
        }
    }
}

/// Borrow a grayscale image as is, or convert a color one.
pub(crate) fn gray_view(src: &Image) -> Result<Cow<'_, Image>, ImageError> {
    Ok(match to_gray(src)? {
        Processed::Image(gray) => Cow::Owned(gray),
        Processed::Unchanged => Cow::Borrowed(src),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_from_bgr_luma() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::new(
            [2, 2].into(),
            PixelFormat::Bgr8,
            vec![
                255, 0, 0,    0, 255, 0,
                0, 0, 255,    255, 255, 255,
            ],
        )?;

        let mut gray = Image::from_size_val(image.size(), PixelFormat::Gray8, 0)?;
        gray_from_bgr(&image, &mut gray)?;

        // blue, green, red, white
        assert_eq!(gray.to_packed_vec(), vec![28, 149, 76, 255]);

        Ok(())
    }

    #[test]
    fn gray_from_bgr_rejects_bad_destination() -> Result<(), ImageError> {
        let image = Image::from_size_val([2, 2].into(), PixelFormat::Bgr8, 0)?;

        let mut small = Image::from_size_val([1, 2].into(), PixelFormat::Gray8, 0)?;
        assert_eq!(
            gray_from_bgr(&image, &mut small),
            Err(ImageError::InvalidImageSize(2, 2, 1, 2))
        );

        let mut color = image.clone();
        assert_eq!(
            gray_from_bgr(&image, &mut color),
            Err(ImageError::ChannelMismatch(1, 3))
        );

        Ok(())
    }

    #[test]
    fn to_gray_skips_gray_input() -> Result<(), ImageError> {
        let image = Image::from_size_val([3, 3].into(), PixelFormat::Gray8, 9)?;
        assert!(to_gray(&image)?.is_unchanged());

        let color = Image::from_size_val([3, 3].into(), PixelFormat::Bgr8, 100)?;
        let gray = to_gray(&color)?.into_image();
        assert_eq!(gray.map(|g| g.to_packed_vec()), Some(vec![100; 9]));

        Ok(())
    }
}
