use crate::check;
use crate::histogram::NUM_BINS;
use crate::threshold::apply_lut;
use rasterkit_image::{Image, ImageError};

/// Number of output levels of [`quantize`].
pub const QUANTIZE_LEVELS: usize = 4;

/// Apply gamma correction to every channel of an image.
///
/// Each sample maps to `255 * ((v / 255) / c)^(1 / g)`, truncated and saturated to a
/// byte. The mapping is evaluated once per intensity into a lookup table.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image.
/// * `c` - Scale applied to the normalized intensity before the power.
/// * `g` - The gamma; values above one brighten the image.
///
/// # Errors
///
/// If `c` or `g` is not a positive finite number.
///
/// # Example
///
/// ```
/// use rasterkit_image::{Image, PixelFormat};
/// use rasterkit_imgproc::enhance::gamma_correction;
///
/// let image = Image::new([3, 1].into(), PixelFormat::Gray8, vec![0, 64, 255]).unwrap();
/// let mut dst = image.zeros_like().unwrap();
///
/// gamma_correction(&image, &mut dst, 1.0, 2.2).unwrap();
///
/// assert_eq!(dst.to_packed_vec(), vec![0, 136, 255]);
/// ```
pub fn gamma_correction(src: &Image, dst: &mut Image, c: f64, g: f64) -> Result<(), ImageError> {
    check::positive("gamma scale", c)?;
    check::positive("gamma", g)?;

    let mut lut = [0u8; NUM_BINS];
    for (i, entry) in lut.iter_mut().enumerate() {
        let v = i as f64 / 255.0;
        *entry = ((v / c).powf(1.0 / g) * 255.0) as u8;
    }

    apply_lut(src, dst, &lut)
}

/// Reduce every channel to four levels: `floor(v / 64) * 64 + 32`.
pub fn quantize(src: &Image, dst: &mut Image) -> Result<(), ImageError> {
    let step = NUM_BINS / QUANTIZE_LEVELS;

    let mut lut = [0u8; NUM_BINS];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = (i / step * step + step / 2) as u8;
    }

    apply_lut(src, dst, &lut)
}
