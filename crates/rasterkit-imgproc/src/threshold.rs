use crate::histogram::{Histogram, NUM_BINS};
use crate::{check, parallel};
use rasterkit_image::{Image, ImageError};

/// The piecewise mapping used by a fixed threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThresholdType {
    /// `v >= thresh` maps to `max_value`, anything else to 0.
    Binary,
    /// `v < thresh` maps to `max_value`, anything else to 0.
    BinaryInv,
    /// `v >= thresh` maps to `thresh`, anything else is kept.
    Trunc,
    /// `v >= thresh` is kept, anything else maps to 0.
    ToZero,
    /// `v < thresh` is kept, anything else maps to 0.
    ToZeroInv,
}

/// Build the 256-entry lookup table of a fixed threshold.
///
/// # Example
///
/// ```
/// use rasterkit_imgproc::threshold::{threshold_lut, ThresholdType};
///
/// let lut = threshold_lut(100, 255, ThresholdType::Binary);
///
/// assert_eq!(lut[99], 0);
/// assert_eq!(lut[100], 255);
/// ```
pub fn threshold_lut(thresh: u8, max_value: u8, kind: ThresholdType) -> [u8; NUM_BINS] {
    let mut lut = [0u8; NUM_BINS];
    for (i, entry) in lut.iter_mut().enumerate() {
        let v = i as u8;
        let above = v >= thresh;
        *entry = match kind {
            ThresholdType::Binary if above => max_value,
            ThresholdType::BinaryInv if !above => max_value,
            ThresholdType::Trunc => v.min(thresh),
            ThresholdType::ToZero if above => v,
            ThresholdType::ToZeroInv if !above => v,
            _ => 0,
        };
    }
    lut
}

/// Map every sample of `src` through `lut`.
///
/// Precondition: the input and output images must have the same size and channel count.
pub fn apply_lut(src: &Image, dst: &mut Image, lut: &[u8; NUM_BINS]) -> Result<(), ImageError> {
    check::same_layout(src, dst)?;

    parallel::par_iter_rows_val(src, dst, |&v, out| *out = lut[v as usize]);

    Ok(())
}

/// Apply a fixed threshold to every channel of an image.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image.
/// * `thresh` - The threshold value.
/// * `max_value` - The value written by the binary types.
/// * `kind` - The mapping to apply.
///
/// # Example
///
/// ```
/// use rasterkit_image::{Image, PixelFormat};
/// use rasterkit_imgproc::threshold::{threshold, ThresholdType};
///
/// let image = Image::new([4, 1].into(), PixelFormat::Gray8, vec![0, 99, 100, 250]).unwrap();
/// let mut dst = image.zeros_like().unwrap();
///
/// threshold(&image, &mut dst, 100, 255, ThresholdType::Binary).unwrap();
///
/// assert_eq!(dst.to_packed_vec(), vec![0, 0, 255, 255]);
/// ```
pub fn threshold(
    src: &Image,
    dst: &mut Image,
    thresh: u8,
    max_value: u8,
    kind: ThresholdType,
) -> Result<(), ImageError> {
    let lut = threshold_lut(thresh, max_value, kind);
    apply_lut(src, dst, &lut)
}

/// Find the threshold that maximizes the between-class variance of a histogram.
///
/// Split points `t = 0..=254` are scanned forward, moving `hist[t]` from the upper class
/// into the lower one. The returned value is `t + 1` for the first split with the
/// largest variance, so that a binary threshold with it keeps `t` in the lower class.
/// A histogram that cannot be split yields 0.
pub fn otsu_threshold(hist: &[u64; NUM_BINS]) -> u8 {
    let (mut w_white, mut sum_white) = (0.0f64, 0.0f64);
    for (i, &count) in hist.iter().enumerate() {
        w_white += count as f64;
        sum_white += (count as f64) * i as f64;
    }

    let (mut w_black, mut sum_black) = (0.0f64, 0.0f64);
    let mean = |sum: f64, weight: f64| if weight > 0.0 { sum / weight } else { 0.0 };

    let mut best = 0.0;
    let mut thresh = 0u8;

    for (i, &count) in hist.iter().enumerate().take(NUM_BINS - 1) {
        let count = count as f64;
        w_black += count;
        sum_black += count * i as f64;
        w_white -= count;
        sum_white -= count * i as f64;

        let diff = mean(sum_black, w_black) - mean(sum_white, w_white);
        let val = w_black * w_white * diff * diff;

        if val > best {
            best = val;
            thresh = (i + 1) as u8;
        }
    }

    thresh
}

/// Binarize a grayscale image with the threshold chosen by [`otsu_threshold`].
///
/// Returns the threshold that was applied.
///
/// # Errors
///
/// If `src` is not a single channel image or the images differ in layout.
pub fn threshold_otsu(src: &Image, dst: &mut Image, max_value: u8) -> Result<u8, ImageError> {
    check::channels(src, 1)?;
    check::same_layout(src, dst)?;

    let hist = Histogram::compute(src);
    let thresh = otsu_threshold(hist.channel(0)?);
    log::debug!("otsu threshold: {thresh}");

    threshold(src, dst, thresh, max_value, ThresholdType::Binary)?;

    Ok(thresh)
}
