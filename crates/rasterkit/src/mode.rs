use std::borrow::Cow;
use std::str::FromStr;

use crate::ProcParams;
use rasterkit_image::{Image, ImageError};
use rasterkit_imgproc::{
    color, enhance,
    filter::{self, Direction, EdgeOperator},
    fourier::{self, FrequencyRepresentation},
    histogram,
    interpolation::InterpolationMode,
    pooling::{self, PoolingMode},
    resize,
    threshold::{self, ThresholdType},
    warp::{self, AffineTransform},
    Processed,
};

/// A processing mode: one operation bound to its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProcMode {
    /// Swap the red and blue channels.
    ChannelSwap,
    /// Reduce to luma.
    Grayscale,
    /// Fixed binary threshold of the luma.
    Threshold,
    /// Binary threshold of the luma chosen with Otsu's method.
    OtsuThreshold,
    /// Rotate hues by half a turn.
    HueRotate,
    /// Reduce every channel to four levels.
    Quantize,
    /// Block average.
    AveragePooling,
    /// Block maximum.
    MaxPooling,
    /// Gaussian blur.
    GaussianFilter,
    /// Median filter.
    MedianFilter,
    /// Box (mean) filter.
    MeanFilter,
    /// Diagonal motion blur.
    MotionFilter,
    /// Local intensity range.
    MaxMinFilter,
    /// Vertical first-order difference.
    DifferentialVertical,
    /// Horizontal first-order difference.
    DifferentialHorizontal,
    /// Vertical Prewitt gradient.
    PrewittVertical,
    /// Horizontal Prewitt gradient.
    PrewittHorizontal,
    /// Vertical Sobel gradient.
    SobelVertical,
    /// Horizontal Sobel gradient.
    SobelHorizontal,
    /// 4-neighbour Laplacian.
    Laplacian,
    /// Emboss relief.
    Emboss,
    /// Laplacian of Gaussian.
    LaplacianOfGaussian,
    /// Stretch the intensity range.
    HistogramNormalize,
    /// Move the intensity mean and deviation.
    HistogramTransform,
    /// Histogram equalization.
    HistogramEqualize,
    /// Gamma correction.
    GammaCorrection,
    /// Nearest neighbour resampling.
    NearestResample,
    /// Bilinear resampling.
    BilinearResample,
    /// Bicubic resampling.
    BicubicResample,
    /// Affine translation.
    AffineTranslate,
    /// Affine scaling.
    AffineResize,
    /// Rotation about the image center.
    AffineRotate,
    /// Shear.
    AffineSkew,
    /// Forward and inverse Fourier transform without filtering.
    Fourier,
    /// Fourier low-pass filter of the luma.
    LowPass,
    /// Fourier high-pass filter of the luma.
    HighPass,
    /// Fourier band-pass filter of the luma.
    BandPass,
}

impl ProcMode {
    /// Every mode, in menu order.
    pub const ALL: [ProcMode; 37] = [
        ProcMode::ChannelSwap,
        ProcMode::Grayscale,
        ProcMode::Threshold,
        ProcMode::OtsuThreshold,
        ProcMode::HueRotate,
        ProcMode::Quantize,
        ProcMode::AveragePooling,
        ProcMode::MaxPooling,
        ProcMode::GaussianFilter,
        ProcMode::MedianFilter,
        ProcMode::MeanFilter,
        ProcMode::MotionFilter,
        ProcMode::MaxMinFilter,
        ProcMode::DifferentialVertical,
        ProcMode::DifferentialHorizontal,
        ProcMode::PrewittVertical,
        ProcMode::PrewittHorizontal,
        ProcMode::SobelVertical,
        ProcMode::SobelHorizontal,
        ProcMode::Laplacian,
        ProcMode::Emboss,
        ProcMode::LaplacianOfGaussian,
        ProcMode::HistogramNormalize,
        ProcMode::HistogramTransform,
        ProcMode::HistogramEqualize,
        ProcMode::GammaCorrection,
        ProcMode::NearestResample,
        ProcMode::BilinearResample,
        ProcMode::BicubicResample,
        ProcMode::AffineTranslate,
        ProcMode::AffineResize,
        ProcMode::AffineRotate,
        ProcMode::AffineSkew,
        ProcMode::Fourier,
        ProcMode::LowPass,
        ProcMode::HighPass,
        ProcMode::BandPass,
    ];

    /// The kebab-case name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChannelSwap => "channel-swap",
            Self::Grayscale => "grayscale",
            Self::Threshold => "threshold",
            Self::OtsuThreshold => "otsu-threshold",
            Self::HueRotate => "hue-rotate",
            Self::Quantize => "quantize",
            Self::AveragePooling => "average-pooling",
            Self::MaxPooling => "max-pooling",
            Self::GaussianFilter => "gaussian-filter",
            Self::MedianFilter => "median-filter",
            Self::MeanFilter => "mean-filter",
            Self::MotionFilter => "motion-filter",
            Self::MaxMinFilter => "max-min-filter",
            Self::DifferentialVertical => "differential-vertical",
            Self::DifferentialHorizontal => "differential-horizontal",
            Self::PrewittVertical => "prewitt-vertical",
            Self::PrewittHorizontal => "prewitt-horizontal",
            Self::SobelVertical => "sobel-vertical",
            Self::SobelHorizontal => "sobel-horizontal",
            Self::Laplacian => "laplacian",
            Self::Emboss => "emboss",
            Self::LaplacianOfGaussian => "laplacian-of-gaussian",
            Self::HistogramNormalize => "histogram-normalize",
            Self::HistogramTransform => "histogram-transform",
            Self::HistogramEqualize => "histogram-equalize",
            Self::GammaCorrection => "gamma-correction",
            Self::NearestResample => "nearest-resample",
            Self::BilinearResample => "bilinear-resample",
            Self::BicubicResample => "bicubic-resample",
            Self::AffineTranslate => "affine-translate",
            Self::AffineResize => "affine-resize",
            Self::AffineRotate => "affine-rotate",
            Self::AffineSkew => "affine-skew",
            Self::Fourier => "fourier",
            Self::LowPass => "low-pass",
            Self::HighPass => "high-pass",
            Self::BandPass => "band-pass",
        }
    }

    /// Run the mode on `src`.
    ///
    /// Returns [`Processed::Unchanged`] when the mode does not apply to the input, for
    /// example a grayscale conversion of an image that is already gray.
    ///
    /// # Example
    ///
    /// ```
    /// use rasterkit::image::{Image, PixelFormat};
    /// use rasterkit::{ProcMode, ProcParams};
    ///
    /// let image = Image::from_size_val([16, 16].into(), PixelFormat::Bgr8, 90).unwrap();
    /// let params = ProcParams::default();
    ///
    /// let gray = ProcMode::Grayscale.run(&image, &params).unwrap();
    /// assert!(!gray.is_unchanged());
    ///
    /// let gray = gray.or_original(&image);
    /// assert!(ProcMode::Grayscale.run(&gray, &params).unwrap().is_unchanged());
    /// ```
    pub fn run(&self, src: &Image, params: &ProcParams) -> Result<Processed, ImageError> {
        log::debug!("{self}: input {} {:?}", src.size(), src.format());

        let processed = match self {
            Self::ChannelSwap => color::swap_rb(src)?,
            Self::Grayscale => color::to_gray(src)?,
            Self::Threshold => {
                let gray = luma(src)?;
                map_same(&gray, |s, d| {
                    threshold::threshold(
                        s,
                        d,
                        params.threshold,
                        params.max_value,
                        ThresholdType::Binary,
                    )
                })?
            }
            Self::OtsuThreshold => {
                let gray = luma(src)?;
                map_same(&gray, |s, d| {
                    let thresh = threshold::threshold_otsu(s, d, params.max_value)?;
                    log::info!("{self}: threshold {thresh}");
                    Ok(())
                })?
            }
            Self::HueRotate => color::hue_rotate(src)?,
            Self::Quantize => map_same(src, enhance::quantize)?,
            Self::AveragePooling => map_same(src, |s, d| {
                pooling::block_pool(s, d, params.pool_block, PoolingMode::Average)
            })?,
            Self::MaxPooling => map_same(src, |s, d| {
                pooling::block_pool(s, d, params.pool_block, PoolingMode::Max)
            })?,
            Self::GaussianFilter => map_same(src, |s, d| {
                filter::gaussian_blur(s, d, params.gaussian_kernel_size, params.gaussian_sigma)
            })?,
            Self::MedianFilter => {
                map_same(src, |s, d| filter::median_blur(s, d, params.kernel_size))?
            }
            Self::MeanFilter => map_same(src, |s, d| filter::box_blur(s, d, params.kernel_size))?,
            Self::MotionFilter => {
                map_same(src, |s, d| filter::motion_blur(s, d, params.kernel_size))?
            }
            Self::MaxMinFilter => filter::range_filter(src, params.kernel_size)?.into(),
            Self::HistogramNormalize => map_same(src, |s, d| {
                let (a, b) = params.normalize_range;
                histogram::normalize(s, d, a, b)
            })?,
            Self::HistogramTransform => map_same(src, |s, d| {
                histogram::transform(s, d, params.transform_mean, params.transform_std)
            })?,
            Self::HistogramEqualize => map_same(src, histogram::equalize)?,
            Self::GammaCorrection => map_same(src, |s, d| {
                enhance::gamma_correction(s, d, params.gamma_scale, params.gamma)
            })?,
            Self::NearestResample => resample(src, params, InterpolationMode::Nearest)?,
            Self::BilinearResample => resample(src, params, InterpolationMode::Bilinear)?,
            Self::BicubicResample => resample(src, params, InterpolationMode::Bicubic)?,
            Self::AffineTranslate => warp::affine(src, &params.translation)?.into(),
            Self::AffineResize => {
                let (a, d) = params.affine_scale;
                warp::affine(src, &AffineTransform::scaling(a, d))?.into()
            }
            Self::AffineRotate => {
                warp::affine(src, &AffineTransform::rotation(params.rotation))?.into()
            }
            Self::AffineSkew => {
                let (dx, dy) = params.skew;
                warp::affine(src, &AffineTransform::skew(dx, dy))?.into()
            }
            Self::Fourier => fourier::inverse(&fourier::dft(src)?)?.into(),
            Self::LowPass => band_filter(src, |freq| freq.low_pass(params.low_pass))?,
            Self::HighPass => band_filter(src, |freq| freq.high_pass(params.high_pass))?,
            Self::BandPass => band_filter(src, |freq| {
                let (lo, hi) = params.band_pass;
                freq.band_pass(lo, hi)
            })?,
            edge => filter::edge_filter(src, edge.edge_operator(params)?)?.into(),
        };

        match &processed {
            Processed::Image(image) => {
                log::debug!("{self}: output {} {:?}", image.size(), image.format())
            }
            Processed::Unchanged => log::info!("{self}: not applicable to {:?}", src.format()),
        }

        Ok(processed)
    }

    fn edge_operator(&self, params: &ProcParams) -> Result<EdgeOperator, ImageError> {
        Ok(match self {
            Self::DifferentialVertical => EdgeOperator::Differential(Direction::Vertical),
            Self::DifferentialHorizontal => EdgeOperator::Differential(Direction::Horizontal),
            Self::PrewittVertical => EdgeOperator::Prewitt(Direction::Vertical),
            Self::PrewittHorizontal => EdgeOperator::Prewitt(Direction::Horizontal),
            Self::SobelVertical => EdgeOperator::Sobel(Direction::Vertical),
            Self::SobelHorizontal => EdgeOperator::Sobel(Direction::Horizontal),
            Self::Laplacian => EdgeOperator::Laplacian,
            Self::Emboss => EdgeOperator::Emboss,
            Self::LaplacianOfGaussian => EdgeOperator::LaplacianOfGaussian {
                kernel_size: params.log_kernel_size,
                sigma: params.log_sigma,
            },
            other => {
                return Err(ImageError::InvalidParameter(format!(
                    "{other} is not an edge operator"
                )))
            }
        })
    }
}

/// Run an operation that writes an image of the source layout.
fn map_same(
    src: &Image,
    op: impl FnOnce(&Image, &mut Image) -> Result<(), ImageError>,
) -> Result<Processed, ImageError> {
    let mut dst = src.zeros_like()?;
    op(src, &mut dst)?;
    Ok(dst.into())
}

/// The source itself when already gray, its luma otherwise.
fn luma(src: &Image) -> Result<Cow<'_, Image>, ImageError> {
    Ok(match color::to_gray(src)? {
        Processed::Image(gray) => Cow::Owned(gray),
        Processed::Unchanged => Cow::Borrowed(src),
    })
}

fn resample(
    src: &Image,
    params: &ProcParams,
    mode: InterpolationMode,
) -> Result<Processed, ImageError> {
    let (rx, ry) = params.resample_ratio;
    Ok(resize::resize(src, rx, ry, mode)?.into())
}

fn band_filter(
    src: &Image,
    mask: impl FnOnce(&mut FrequencyRepresentation) -> Result<(), ImageError>,
) -> Result<Processed, ImageError> {
    let gray = luma(src)?;
    let mut freq = fourier::dft(&gray)?;
    mask(&mut freq)?;
    Ok(fourier::inverse(&freq)?.into())
}

impl std::fmt::Display for ProcMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ProcMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|mode| mode.name() == name)
            .copied()
            .ok_or_else(|| format!("Invalid processing mode: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterkit_image::PixelFormat;

    #[test]
    fn names_round_trip() {
        for mode in ProcMode::ALL {
            assert_eq!(mode.name().parse::<ProcMode>(), Ok(mode));
            assert_eq!(mode.to_string(), mode.name());
        }
        assert_eq!("Gaussian-Filter".parse::<ProcMode>(), Ok(ProcMode::GaussianFilter));
        assert!("sharpen".parse::<ProcMode>().is_err());
    }

    #[test]
    fn names_are_unique() {
        let mut names = ProcMode::ALL.iter().map(|m| m.name()).collect::<Vec<_>>();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ProcMode::ALL.len());
    }

    #[test]
    fn color_only_modes_skip_gray() -> Result<(), ImageError> {
        let image = Image::from_size_val([8, 8].into(), PixelFormat::Gray8, 60)?;
        let params = ProcParams::default();
        for mode in [ProcMode::ChannelSwap, ProcMode::Grayscale, ProcMode::HueRotate] {
            assert!(mode.run(&image, &params)?.is_unchanged(), "{mode}");
        }

        Ok(())
    }

    #[test]
    fn threshold_mode_works_on_luma() -> Result<(), ImageError> {
        let mut image = Image::from_size_val([4, 4].into(), PixelFormat::Bgr8, 20)?;
        let mut view = image.view_mut();
        for ch in 0..3 {
            view.set_ch(1, 1, ch, 255)?;
        }
        let out = ProcMode::Threshold
            .run(&image, &ProcParams::default())?
            .into_image()
            .ok_or(ImageError::ChannelMismatch(1, 3))?;

        assert_eq!(out.format(), PixelFormat::Gray8);
        assert_eq!(out.view().get(1, 1)?, 255);
        assert_eq!(out.view().get(0, 0)?, 0);

        Ok(())
    }

    #[test]
    fn hue_rotate_mode_turns_red_to_cyan() -> Result<(), ImageError> {
        let red = Image::new([1, 1].into(), PixelFormat::Bgr8, vec![0, 0, 255])?;
        let out = ProcMode::HueRotate
            .run(&red, &ProcParams::default())?
            .or_original(&red);
        assert_eq!(out.to_packed_vec(), vec![255, 255, 0]);

        Ok(())
    }

    #[test]
    fn non_edge_modes_have_no_operator() {
        let params = ProcParams::default();
        assert!(ProcMode::Quantize.edge_operator(&params).is_err());
        assert_eq!(
            ProcMode::SobelVertical.edge_operator(&params),
            Ok(EdgeOperator::Sobel(Direction::Vertical))
        );
    }
}
