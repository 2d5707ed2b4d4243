use rasterkit_imgproc::pooling::POOL_BLOCK;
use rasterkit_imgproc::warp::AffineTransform;

/// Parameters of every processing mode.
///
/// [`ProcParams::default`] holds the values each mode runs with unless a caller
/// overrides them.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcParams {
    /// Threshold of the fixed binary threshold.
    pub threshold: u8,
    /// Value written for pixels above a threshold.
    pub max_value: u8,
    /// Kernel side of the gaussian filter.
    pub gaussian_kernel_size: usize,
    /// Standard deviation of the gaussian filter.
    pub gaussian_sigma: f64,
    /// Kernel side of the median, mean, motion and max-min filters.
    pub kernel_size: usize,
    /// Kernel side of the Laplacian of Gaussian.
    pub log_kernel_size: usize,
    /// Standard deviation of the Laplacian of Gaussian.
    pub log_sigma: f64,
    /// Output range `(a, b)` of histogram normalization.
    pub normalize_range: (u8, u8),
    /// Target mean of the histogram transform.
    pub transform_mean: f64,
    /// Target standard deviation of the histogram transform.
    pub transform_std: f64,
    /// Scale `c` of the gamma correction.
    pub gamma_scale: f64,
    /// Exponent `g` of the gamma correction.
    pub gamma: f64,
    /// Scale ratios `(rx, ry)` of the resampling modes.
    pub resample_ratio: (f64, f64),
    /// Transform of the affine translation mode.
    pub translation: AffineTransform,
    /// Scale factors `(a, d)` of the affine resize mode.
    pub affine_scale: (f64, f64),
    /// Angle in degrees of the rotation mode.
    pub rotation: f64,
    /// Shear `(dx, dy)` in pixels of the skew mode.
    pub skew: (f64, f64),
    /// Radius of the low-pass filter, relative to half the image height.
    pub low_pass: f64,
    /// Radius of the high-pass filter, relative to half the image height.
    pub high_pass: f64,
    /// Radii `(lo, hi)` of the band-pass filter.
    pub band_pass: (f64, f64),
    /// Block side of the pooling modes.
    pub pool_block: usize,
}

impl Default for ProcParams {
    fn default() -> Self {
        Self {
            threshold: 128,
            max_value: 255,
            gaussian_kernel_size: 3,
            gaussian_sigma: 1.3,
            kernel_size: 3,
            log_kernel_size: 5,
            log_sigma: 3.0,
            normalize_range: (0, 255),
            transform_mean: 128.0,
            transform_std: 52.0,
            gamma_scale: 1.0,
            gamma: 2.2,
            resample_ratio: (1.5, 1.5),
            translation: AffineTransform::translation(30.0, -30.0),
            affine_scale: (1.3, 0.8),
            rotation: -30.0,
            skew: (30.0, 30.0),
            low_pass: 0.5,
            high_pass: 0.1,
            band_pass: (0.1, 0.5),
            pool_block: POOL_BLOCK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_translation_is_a_pure_shift() {
        let params = ProcParams::default();
        let t = params.translation;
        assert_eq!((t.a, t.b, t.c, t.d), (1.0, 0.0, 0.0, 1.0));
        assert_eq!((t.tx, t.ty), (30.0, -30.0));
        assert_eq!(params.pool_block, 8);
    }
}
