use std::f64::consts::PI;

use crate::{check, parallel};
use num_complex::Complex64;
use num_traits::Zero;
use rasterkit_image::{Image, ImageError, ImageSize, PixelFormat};
use rayon::prelude::*;

/// Discrete Fourier coefficients of an image, one plane per channel.
///
/// Plane index `l * width + k` holds bin `(k + 1, l + 1)`: horizontal frequency
/// `k + 1`, vertical frequency `l + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyRepresentation {
    size: ImageSize,
    planes: Vec<Vec<Complex64>>,
}

impl FrequencyRepresentation {
    /// Width of the transformed image.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Height of the transformed image.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Size of the transformed image.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Number of transformed channels.
    pub fn num_channels(&self) -> usize {
        self.planes.len()
    }

    /// The coefficients of channel `ch` in row-major order.
    pub fn plane(&self, ch: usize) -> Result<&[Complex64], ImageError> {
        self.planes
            .get(ch)
            .map(|p| p.as_slice())
            .ok_or(ImageError::ChannelIndexOutOfBounds(ch, self.planes.len()))
    }

    /// Coefficient at row `l`, column `k` of channel `ch`.
    pub fn get(&self, l: usize, k: usize, ch: usize) -> Result<Complex64, ImageError> {
        let (w, h) = (self.size.width, self.size.height);
        if k >= w || l >= h {
            return Err(ImageError::PixelIndexOutOfBounds(k, l, w, h));
        }
        Ok(self.plane(ch)?[l * w + k])
    }

    /// Ideal low pass: zero every coefficient at distance `>= (height / 2) * r`.
    pub fn low_pass(&mut self, r: f64) -> Result<(), ImageError> {
        let d = self.radius(r)?;
        self.mask(|dist| dist >= d);
        Ok(())
    }

    /// Ideal high pass: zero every coefficient at distance `<= (height / 2) * r`.
    pub fn high_pass(&mut self, r: f64) -> Result<(), ImageError> {
        let d = self.radius(r)?;
        self.mask(|dist| dist <= d);
        Ok(())
    }

    /// Ideal band pass: keep distances within `[(height / 2) * lo, (height / 2) * hi]`.
    pub fn band_pass(&mut self, lo: f64, hi: f64) -> Result<(), ImageError> {
        if lo > hi {
            return Err(ImageError::InvalidParameter(format!(
                "band pass range is empty: {lo} > {hi}"
            )));
        }
        let (d_lo, d_hi) = (self.radius(lo)?, self.radius(hi)?);
        self.mask(|dist| dist < d_lo || dist > d_hi);
        Ok(())
    }

    /// Cutoff radius `trunc((height / 2) * r)` for a pass ratio `r`.
    fn radius(&self, r: f64) -> Result<f64, ImageError> {
        if !(r.is_finite() && r >= 0.0) {
            return Err(ImageError::InvalidParameter(format!(
                "pass ratio must be a non-negative finite number, got {r}"
            )));
        }
        Ok(((self.size.height / 2) as f64 * r).trunc())
    }

    /// Zero the four mirrored positions of every first-quadrant bin `(i, j)` whose
    /// distance `sqrt(i² + j²)` satisfies `reject`, in every channel.
    fn mask(&mut self, reject: impl Fn(f64) -> bool + Sync) {
        let (w, h) = (self.size.width, self.size.height);

        self.planes.par_iter_mut().for_each(|plane| {
            for j in 0..h / 2 {
                for i in 0..w / 2 {
                    let dist = ((i * i + j * j) as f64).sqrt();
                    if !reject(dist) {
                        continue;
                    }
                    for (row, col) in mirrors(i, j, w, h) {
                        plane[row * w + col] = Complex64::zero();
                    }
                }
            }
        });
    }
}

/// The four `(row, col)` positions sharing the distance of first-quadrant bin `(i, j)`.
fn mirrors(i: usize, j: usize, w: usize, h: usize) -> [(usize, usize); 4] {
    [(j, i), (j, w - 1 - i), (h - 1 - j, i), (h - 1 - j, w - 1 - i)]
}

/// `exp(-2πi m / n)` for `m = 0..n`.
fn twiddles(n: usize) -> Vec<Complex64> {
    (0..n)
        .map(|m| Complex64::from_polar(1.0, -2.0 * PI * m as f64 / n as f64))
        .collect()
}

/// Forward discrete Fourier transform by direct summation.
///
/// For every channel and bin `(k, l)`, `k = 1..=w`, `l = 1..=h`, the coefficient is
/// `sum I(x, y) exp(-2πi (k x / w + l y / h)) / sqrt(w h)`. The cost is `O(w² h²)` per
/// channel; channels are transformed in parallel.
///
/// # Example
///
/// ```
/// use rasterkit_image::{Image, PixelFormat};
/// use rasterkit_imgproc::fourier::dft;
///
/// let image = Image::from_size_val([4, 4].into(), PixelFormat::Gray8, 10).unwrap();
/// let freq = dft(&image).unwrap();
///
/// // all the energy of a flat image sits in the bin of frequency (w, h)
/// assert!((freq.get(3, 3, 0).unwrap().re - 40.0).abs() < 1e-9);
/// ```
pub fn dft(src: &Image) -> Result<FrequencyRepresentation, ImageError> {
    let (w, h, channels) = (src.width(), src.height(), src.num_channels());
    log::debug!(
        "dft: {w}x{h}x{channels}, {} complex terms per channel",
        (w * h) * (w * h)
    );

    let view = src.view();
    let rows = (0..h).map(|y| view.row(y)).collect::<Result<Vec<_>, _>>()?;
    let (tw_x, tw_y) = (twiddles(w), twiddles(h));
    let norm = ((w * h) as f64).sqrt();

    let planes = (0..channels)
        .into_par_iter()
        .map(|ch| {
            let mut plane = vec![Complex64::zero(); w * h];
            for l in 1..=h {
                for k in 1..=w {
                    let mut val = Complex64::zero();
                    for (y, row) in rows.iter().enumerate() {
                        let ey = tw_y[(l * y) % h];
                        for x in 0..w {
                            val += tw_x[(k * x) % w] * ey * row[x * channels + ch] as f64;
                        }
                    }
                    plane[(l - 1) * w + (k - 1)] = val / norm;
                }
            }
            plane
        })
        .collect();

    Ok(FrequencyRepresentation {
        size: src.size(),
        planes,
    })
}

/// Inverse transform into `dst`.
///
/// Sample `(x, y)`, `x = 1..=w`, `y = 1..=h`, sums every stored coefficient `G[l][k]`
/// times `exp(-2πi (k x / w + l y / h))`; the magnitude divided by `sqrt(w h)` is clamped
/// to a byte and written at `(h - y, w - x)`. Combined with [`dft`] this reproduces the
/// source image.
///
/// PRECONDITION: `dst` must have the size and channel count of `freq`.
pub fn idft(freq: &FrequencyRepresentation, dst: &mut Image) -> Result<(), ImageError> {
    let (w, h, channels) = (freq.width(), freq.height(), freq.num_channels());
    if dst.size() != freq.size {
        return Err(ImageError::InvalidImageSize(w, h, dst.width(), dst.height()));
    }
    check::channels(dst, channels)?;

    log::debug!("idft: {w}x{h}x{channels}");

    let (tw_x, tw_y) = (twiddles(w), twiddles(h));
    let norm = ((w * h) as f64).sqrt();

    let planes = freq
        .planes
        .par_iter()
        .map(|plane| {
            let mut out = vec![0u8; w * h];
            for y in 1..=h {
                for x in 1..=w {
                    let mut val = Complex64::zero();
                    for l in 0..h {
                        let ey = tw_y[(l * y) % h];
                        for k in 0..w {
                            val += tw_x[(k * x) % w] * ey * plane[l * w + k];
                        }
                    }
                    let g = (val.norm() / norm).clamp(0.0, 255.0);
                    out[(h - y) * w + (w - x)] = g as u8;
                }
            }
            out
        })
        .collect::<Vec<_>>();

    parallel::par_for_each_row(dst, |y, dst_row| {
        for (x, pixel) in dst_row.chunks_exact_mut(channels).enumerate() {
            for (out, plane) in pixel.iter_mut().zip(planes.iter()) {
                *out = plane[y * w + x];
            }
        }
    });

    Ok(())
}

/// Inverse transform into a freshly allocated image.
///
/// The pixel format follows the channel count of `freq`.
pub fn inverse(freq: &FrequencyRepresentation) -> Result<Image, ImageError> {
    let format = PixelFormat::from_channels(freq.num_channels())?;
    let mut dst = Image::from_size_val(freq.size(), format, 0)?;
    idft(freq, &mut dst)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &[u8], b: &[u8]) {
        assert_eq!(a.len(), b.len());
        for (i, (&x, &y)) in a.iter().zip(b.iter()).enumerate() {
            assert!((x as i16 - y as i16).abs() <= 1, "sample {i}: {x} vs {y}");
        }
    }

    fn sample() -> Result<Image, ImageError> {
        #[rustfmt::skip]
        let data = vec![
            0, 50, 100, 150,
            200, 250, 255, 10,
            30, 60, 90, 120,
            7, 77, 177, 222,
        ];
        Image::new([4, 4].into(), PixelFormat::Gray8, data)
    }

    #[test]
    fn dft_round_trip() -> Result<(), ImageError> {
        let image = sample()?;
        let freq = dft(&image)?;
        assert_eq!(freq.num_channels(), 1);
        assert_eq!(freq.size(), image.size());

        let restored = inverse(&freq)?;
        assert_close(&restored.to_packed_vec(), &image.to_packed_vec());

        Ok(())
    }

    #[test]
    fn dft_round_trip_color_non_square() -> Result<(), ImageError> {
        let data = (0..5 * 3 * 3).map(|v| (v * 5) as u8).collect();
        let image = Image::new([5, 3].into(), PixelFormat::Bgr8, data)?;
        let restored = inverse(&dft(&image)?)?;
        assert_eq!(restored.format(), PixelFormat::Bgr8);
        assert_close(&restored.to_packed_vec(), &image.to_packed_vec());

        Ok(())
    }

    #[test]
    fn dft_energy_is_preserved() -> Result<(), ImageError> {
        let image = sample()?;
        let freq = dft(&image)?;

        let spatial = image
            .to_packed_vec()
            .iter()
            .map(|&v| (v as f64).powi(2))
            .sum::<f64>();
        let spectral = freq.plane(0)?.iter().map(|c| c.norm_sqr()).sum::<f64>();
        approx::assert_relative_eq!(spatial, spectral, max_relative = 1e-9);

        Ok(())
    }

    #[test]
    fn low_pass_zero_radius_clears_quadrants() -> Result<(), ImageError> {
        let mut freq = dft(&sample()?)?;
        freq.low_pass(0.0)?;

        // every first-quadrant bin and its mirrors is at distance >= 0
        let plane = freq.plane(0)?;
        assert!(plane.iter().all(|c| c.is_zero()));

        Ok(())
    }

    #[test]
    fn high_pass_clears_center_bins_only() -> Result<(), ImageError> {
        let image = sample()?;
        let mut freq = dft(&image)?;
        let before = freq.clone();
        // radius trunc(2 * 0.5) = 1 removes (0, 0), (1, 0), (0, 1) and their mirrors
        freq.high_pass(0.5)?;

        assert!(freq.get(0, 0, 0)?.is_zero());
        assert!(freq.get(0, 3, 0)?.is_zero());
        assert!(freq.get(3, 2, 0)?.is_zero());
        assert_eq!(freq.get(1, 1, 0)?, before.get(1, 1, 0)?);
        assert_eq!(freq.get(2, 2, 0)?, before.get(2, 2, 0)?);

        Ok(())
    }

    #[test]
    fn low_pass_keeps_center_bins() -> Result<(), ImageError> {
        let before = dft(&sample()?)?;
        let mut freq = before.clone();
        // radius trunc(2 * 0.5) = 1 keeps only distance 0
        freq.low_pass(0.5)?;

        for (row, col) in mirrors(0, 0, 4, 4) {
            assert_eq!(freq.get(row, col, 0)?, before.get(row, col, 0)?);
        }
        // the DC term sits at (3, 3)
        assert!(!freq.get(3, 3, 0)?.is_zero());

        for (i, j) in [(1, 0), (0, 1), (1, 1)] {
            for (row, col) in mirrors(i, j, 4, 4) {
                assert!(freq.get(row, col, 0)?.is_zero(), "({row}, {col})");
            }
        }

        Ok(())
    }

    #[test]
    fn band_pass_keeps_ring() -> Result<(), ImageError> {
        let data = (0..64).map(|i| ((i * 37) % 251) as u8).collect();
        let image = Image::new([8, 8].into(), PixelFormat::Gray8, data)?;
        let before = dft(&image)?;
        let mut freq = before.clone();
        // radii trunc(4 * 0.5) = 2 and trunc(4 * 0.75) = 3, both inclusive
        freq.band_pass(0.5, 0.75)?;

        let mut kept = 0;
        for j in 0..4 {
            for i in 0..4 {
                let dist = ((i * i + j * j) as f64).sqrt();
                let inside = (2.0..=3.0).contains(&dist);
                kept += inside as usize;
                for (row, col) in mirrors(i, j, 8, 8) {
                    let value = freq.get(row, col, 0)?;
                    if inside {
                        assert_eq!(value, before.get(row, col, 0)?, "({row}, {col})");
                    } else {
                        assert!(value.is_zero(), "({row}, {col})");
                    }
                }
            }
        }
        // (2, 0), (0, 2), (2, 1), (1, 2), (2, 2), (3, 0), (0, 3)
        assert_eq!(kept, 7);

        Ok(())
    }

    #[test]
    fn band_pass_validates_range() -> Result<(), ImageError> {
        let mut freq = dft(&sample()?)?;
        assert!(freq.band_pass(0.5, 0.1).is_err());
        assert!(freq.low_pass(-1.0).is_err());
        freq.band_pass(0.0, 1.0)?;
        assert!(freq.get(4, 0, 0).is_err());
        assert!(freq.plane(1).is_err());

        Ok(())
    }

    #[test]
    fn idft_rejects_mismatched_destination() -> Result<(), ImageError> {
        let freq = dft(&sample()?)?;
        let mut dst = Image::from_size_val([4, 4].into(), PixelFormat::Bgr8, 0)?;
        assert_eq!(idft(&freq, &mut dst), Err(ImageError::ChannelMismatch(1, 3)));

        Ok(())
    }
}
