use crate::{check, parallel, Processed};
use rasterkit_image::{Image, ImageError, PixelFormat};

/// Hue, saturation and value of a normalized RGB triplet.
///
/// Hue is in degrees `[0, 360)`; saturation is the chroma `max - min`.
fn hsv_from_rgb(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if min == b {
        60.0 * (g - r) / delta + 60.0
    } else if min == r {
        60.0 * (b - g) / delta + 180.0
    } else {
        60.0 * (r - b) / delta + 300.0
    };

    (h, delta, max)
}

/// Inverse of [`hsv_from_rgb`] using the hexcone sector formula.
fn rgb_from_hsv(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let c = s;
    let sector = h / 60.0;
    let x = c * (1.0 - ((sector % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if sector < 1.0 {
        (c, x, 0.0)
    } else if sector < 2.0 {
        (x, c, 0.0)
    } else if sector < 3.0 {
        (0.0, c, x)
    } else if sector < 4.0 {
        (0.0, x, c)
    } else if sector < 5.0 {
        (x, 0.0, c)
    } else if sector < 6.0 {
        (c, 0.0, x)
    } else {
        (0.0, 0.0, 0.0)
    };

    (r + m, g + m, b + m)
}

/// Rotate the hue of every pixel of a BGR image by 180 degrees.
///
/// Each pixel goes through HSV space, gets its hue shifted by half a turn and is
/// converted back; the output bytes are truncated from `[0, 1] * 255`.
///
/// Precondition: the input and output images must have 3 channels and the same size.
///
/// # Example
///
/// ```
/// use rasterkit_image::{Image, PixelFormat};
/// use rasterkit_imgproc::color::hue_rotate_bgr;
///
/// let red = Image::new([1, 1].into(), PixelFormat::Bgr8, vec![0, 0, 255]).unwrap();
/// let mut cyan = red.zeros_like().unwrap();
///
/// hue_rotate_bgr(&red, &mut cyan).unwrap();
///
/// assert_eq!(cyan.to_packed_vec(), vec![255, 255, 0]);
/// ```
pub fn hue_rotate_bgr(src: &Image, dst: &mut Image) -> Result<(), ImageError> {
    check::channels(src, 3)?;
    check::same_layout(src, dst)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let b = src_pixel[0] as f64 / 255.0;
        let g = src_pixel[1] as f64 / 255.0;
        let r = src_pixel[2] as f64 / 255.0;

        let (h, s, v) = hsv_from_rgb(r, g, b);
        let (r, g, b) = rgb_from_hsv((h + 180.0) % 360.0, s, v);

        dst_pixel[0] = (b * 255.0) as u8;
        dst_pixel[1] = (g * 255.0) as u8;
        dst_pixel[2] = (r * 255.0) as u8;
    });

    Ok(())
}

/// Rotate the hue of a color image by 180 degrees.
///
/// Returns [`Processed::Unchanged`] for grayscale input.
pub fn hue_rotate(src: &Image) -> Result<Processed, ImageError> {
    if src.format() == PixelFormat::Gray8 {
        return Ok(Processed::Unchanged);
    }

    let mut dst = src.zeros_like()?;
    hue_rotate_bgr(src, &mut dst)?;
    Ok(dst.into())
}
