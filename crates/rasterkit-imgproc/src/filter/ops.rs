use super::kernels::{self, Direction, Kernel};
use super::{filter2d, max_min_filter};
use crate::color::gray_view;
use rasterkit_image::{Image, ImageError, PixelFormat};

/// Blur an image with a normalized gaussian kernel.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image.
/// * `kernel_size` - The odd side of the kernel.
/// * `sigma` - The standard deviation of the gaussian.
///
/// PRECONDITION: `src` and `dst` must have the same size and channel count.
pub fn gaussian_blur(
    src: &Image,
    dst: &mut Image,
    kernel_size: usize,
    sigma: f64,
) -> Result<(), ImageError> {
    let kernel = kernels::gaussian(kernel_size, sigma)?;
    filter2d(src, dst, &kernel)
}

/// Average every window; border windows still divide by `kernel_size²`.
///
/// PRECONDITION: `src` and `dst` must have the same size and channel count.
pub fn box_blur(src: &Image, dst: &mut Image, kernel_size: usize) -> Result<(), ImageError> {
    let kernel = kernels::box_kernel(kernel_size)?;
    filter2d(src, dst, &kernel)
}

/// Blur along the main diagonal.
///
/// PRECONDITION: `src` and `dst` must have the same size and channel count.
pub fn motion_blur(src: &Image, dst: &mut Image, kernel_size: usize) -> Result<(), ImageError> {
    let kernel = kernels::motion(kernel_size)?;
    filter2d(src, dst, &kernel)
}

/// The edge and relief operators that work on intensity only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeOperator {
    /// First-order difference with the previous pixel.
    Differential(Direction),
    /// Prewitt gradient.
    Prewitt(Direction),
    /// Sobel gradient.
    Sobel(Direction),
    /// 4-neighbour Laplacian.
    Laplacian,
    /// Emboss relief.
    Emboss,
    /// Laplacian of Gaussian.
    LaplacianOfGaussian {
        /// Odd side of the kernel.
        kernel_size: usize,
        /// Standard deviation of the gaussian.
        sigma: f64,
    },
}

impl EdgeOperator {
    /// The convolution kernel of the operator.
    pub fn kernel(&self) -> Result<Kernel, ImageError> {
        Ok(match *self {
            EdgeOperator::Differential(direction) => kernels::differential(direction),
            EdgeOperator::Prewitt(direction) => kernels::prewitt(direction),
            EdgeOperator::Sobel(direction) => kernels::sobel(direction),
            EdgeOperator::Laplacian => kernels::laplacian(),
            EdgeOperator::Emboss => kernels::emboss(),
            EdgeOperator::LaplacianOfGaussian { kernel_size, sigma } => {
                kernels::laplacian_of_gaussian(kernel_size, sigma)?
            }
        })
    }
}

/// Apply an edge operator to the intensity of an image.
///
/// Color input is converted to grayscale first; the result is always a grayscale image
/// with the responses clamped to `[0, 255]`.
///
/// # Example
///
/// ```
/// use rasterkit_image::{Image, PixelFormat};
/// use rasterkit_imgproc::filter::{edge_filter, EdgeOperator};
///
/// let image = Image::from_size_val([4, 4].into(), PixelFormat::Bgr8, 80).unwrap();
/// let edges = edge_filter(&image, EdgeOperator::Laplacian).unwrap();
///
/// assert_eq!(edges.num_channels(), 1);
/// ```
pub fn edge_filter(src: &Image, operator: EdgeOperator) -> Result<Image, ImageError> {
    let kernel = operator.kernel()?;
    let gray = gray_view(src)?;
    let mut dst = Image::from_size_val(gray.size(), PixelFormat::Gray8, 0)?;
    filter2d(&gray, &mut dst, &kernel)?;
    Ok(dst)
}

/// Local intensity range of an image, see [`max_min_filter`].
///
/// Color input is converted to grayscale first.
pub fn range_filter(src: &Image, kernel_size: usize) -> Result<Image, ImageError> {
    let gray = gray_view(src)?;
    let mut dst = Image::from_size_val(gray.size(), PixelFormat::Gray8, 0)?;
    max_min_filter(&gray, &mut dst, kernel_size)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step() -> Result<Image, ImageError> {
        // dark left half, bright right half
        let data = (0..16).map(|i| if i % 4 < 2 { 0 } else { 100 }).collect();
        Image::new([4, 4].into(), PixelFormat::Gray8, data)
    }

    #[test]
    fn smoothing_keeps_flat_interior() -> Result<(), ImageError> {
        let image = Image::from_size_val([5, 5].into(), PixelFormat::Bgr8, 120)?;
        let mut dst = image.zeros_like()?;

        gaussian_blur(&image, &mut dst, 3, 1.3)?;
        let center = dst.view().pixel(2, 2)?.to_vec();
        assert!(center.iter().all(|&v| v == 119 || v == 120));

        box_blur(&image, &mut dst, 3)?;
        assert_eq!(dst.view().pixel(2, 2)?, &[120, 120, 120]);
        // four of nine taps, divided by nine
        assert_eq!(dst.view().pixel(0, 0)?, &[53, 53, 53]);

        motion_blur(&image, &mut dst, 3)?;
        assert!((119..=120).contains(&dst.view().get(2, 2)?));
        // only two diagonal taps are inside at the corner
        assert!((79..=80).contains(&dst.view().get(0, 0)?));

        Ok(())
    }

    #[test]
    fn gaussian_rejects_bad_parameters() -> Result<(), ImageError> {
        let image = Image::from_size_val([3, 3].into(), PixelFormat::Gray8, 1)?;
        let mut dst = image.zeros_like()?;
        assert_eq!(
            gaussian_blur(&image, &mut dst, 2, 1.0),
            Err(ImageError::InvalidKernelSize(2))
        );
        assert!(gaussian_blur(&image, &mut dst, 3, -1.0).is_err());

        Ok(())
    }

    #[test]
    fn sobel_horizontal_responds_to_vertical_step() -> Result<(), ImageError> {
        let image = step()?;

        let edges = edge_filter(&image, EdgeOperator::Sobel(Direction::Horizontal))?;
        let view = edges.view();
        // the kernel subtracts the right column, so the rising step clamps to 0
        assert_eq!(view.get(1, 1)?, 0);

        let edges = edge_filter(&image, EdgeOperator::Prewitt(Direction::Horizontal))?;
        assert_eq!(edges.view().get(1, 1)?, 255);
        assert_eq!(edges.view().get(1, 0)?, 0);

        let edges = edge_filter(&image, EdgeOperator::Differential(Direction::Horizontal))?;
        assert_eq!(edges.view().get(1, 2)?, 100);
        assert_eq!(edges.view().get(1, 3)?, 0);

        Ok(())
    }

    #[test]
    fn edge_filter_converts_color() -> Result<(), ImageError> {
        let image = Image::from_size_val([3, 3].into(), PixelFormat::Bgr8, 40)?;
        let edges = edge_filter(&image, EdgeOperator::Emboss)?;
        assert_eq!(edges.format(), PixelFormat::Gray8);
        // emboss weights sum to one, so the flat interior is kept
        assert_eq!(edges.view().get(1, 1)?, 40);

        let log = edge_filter(
            &image,
            EdgeOperator::LaplacianOfGaussian {
                kernel_size: 5,
                sigma: 3.0,
            },
        )?;
        assert_eq!(log.format(), PixelFormat::Gray8);
        assert_eq!(log.size(), image.size());

        Ok(())
    }

    #[test]
    fn range_filter_on_step() -> Result<(), ImageError> {
        let ranged = range_filter(&step()?, 3)?;
        assert_eq!(ranged.view().row(0)?, &[0, 100, 100, 0]);

        Ok(())
    }
}
