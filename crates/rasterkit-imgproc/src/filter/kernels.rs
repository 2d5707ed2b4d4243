use rasterkit_image::ImageError;
use std::f64::consts::PI;

/// Orientation of a directional edge kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Responds to intensity changes along the y axis.
    Vertical,
    /// Responds to intensity changes along the x axis.
    Horizontal,
}

/// A square convolution kernel with an odd side length.
///
/// The accumulated sum of a window is divided by `divisor` before it is written, which
/// lets integer-weight kernels such as the box filter divide once at the end.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
    divisor: f64,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// If `size` is even or zero, or `weights` does not hold `size * size` values.
    pub fn new(size: usize, weights: Vec<f64>) -> Result<Self, ImageError> {
        if size % 2 == 0 {
            return Err(ImageError::InvalidKernelSize(size));
        }
        if weights.len() != size * size {
            return Err(ImageError::InvalidParameter(format!(
                "kernel of size {size} needs {} weights, got {}",
                size * size,
                weights.len()
            )));
        }
        Ok(Self {
            size,
            weights,
            divisor: 1.0,
        })
    }

    /// Build a kernel of side `size` by evaluating `f(dx, dy)` at every tap offset.
    pub fn from_fn(size: usize, f: impl Fn(f64, f64) -> f64) -> Result<Self, ImageError> {
        let pad = (size / 2) as f64;
        let weights = (0..size * size)
            .map(|i| f((i % size) as f64 - pad, (i / size) as f64 - pad))
            .collect();
        Self::new(size, weights)
    }

    /// Set the value the window sum is divided by.
    pub fn with_divisor(mut self, divisor: f64) -> Self {
        self.divisor = divisor;
        self
    }

    /// Scale the weights so that they sum to one.
    fn normalized(mut self) -> Self {
        let sum = self.weights.iter().sum::<f64>();
        if sum != 0.0 {
            self.weights.iter_mut().for_each(|w| *w /= sum);
        }
        self
    }

    /// Side length of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of taps on each side of the center.
    pub fn pad(&self) -> usize {
        self.size / 2
    }

    /// Row-major weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The value the window sum is divided by.
    pub fn divisor(&self) -> f64 {
        self.divisor
    }

    /// Weight of the tap at kernel row `ky` and column `kx`.
    #[inline]
    pub fn at(&self, ky: usize, kx: usize) -> f64 {
        self.weights[ky * self.size + kx]
    }
}

fn fixed3(weights: [[f64; 3]; 3]) -> Kernel {
    Kernel {
        size: 3,
        weights: weights.iter().flatten().copied().collect(),
        divisor: 1.0,
    }
}

/// Gaussian kernel `exp(-(dx² + dy²) / (2σ²)) / (2πσ²)` normalized to sum one.
///
/// # Example
///
/// ```
/// use rasterkit_imgproc::filter::kernels::gaussian;
///
/// let kernel = gaussian(3, 1.3).unwrap();
/// let sum = kernel.weights().iter().sum::<f64>();
///
/// assert!((sum - 1.0).abs() < 1e-12);
/// ```
pub fn gaussian(size: usize, sigma: f64) -> Result<Kernel, ImageError> {
    crate::check::positive("sigma", sigma)?;
    let s2 = sigma * sigma;
    Ok(Kernel::from_fn(size, |dx, dy| {
        1.0 / (2.0 * PI * s2) * (-(dx * dx + dy * dy) / (2.0 * s2)).exp()
    })?
    .normalized())
}

/// Box kernel: unit weights, window sum divided by `size²`.
pub fn box_kernel(size: usize) -> Result<Kernel, ImageError> {
    Ok(Kernel::new(size, vec![1.0; size * size])?.with_divisor((size * size) as f64))
}

/// Diagonal motion kernel with `1 / size` on the main diagonal.
pub fn motion(size: usize) -> Result<Kernel, ImageError> {
    let w = 1.0 / size as f64;
    Kernel::from_fn(size, |dx, dy| if dx == dy { w } else { 0.0 })
}

/// First-order difference kernel.
pub fn differential(direction: Direction) -> Kernel {
    match direction {
        Direction::Vertical => fixed3([[0., -1., 0.], [0., 1., 0.], [0., 0., 0.]]),
        Direction::Horizontal => fixed3([[0., 0., 0.], [-1., 1., 0.], [0., 0., 0.]]),
    }
}

/// Prewitt kernel.
pub fn prewitt(direction: Direction) -> Kernel {
    match direction {
        Direction::Vertical => fixed3([[-1., -1., -1.], [0., 0., 0.], [1., 1., 1.]]),
        Direction::Horizontal => fixed3([[-1., 0., 1.], [-1., 0., 1.], [-1., 0., 1.]]),
    }
}

/// Sobel kernel.
pub fn sobel(direction: Direction) -> Kernel {
    match direction {
        Direction::Vertical => fixed3([[1., 2., 1.], [0., 0., 0.], [-1., -2., -1.]]),
        Direction::Horizontal => fixed3([[1., 0., -1.], [2., 0., -2.], [1., 0., -1.]]),
    }
}

/// 4-neighbour Laplacian kernel.
pub fn laplacian() -> Kernel {
    fixed3([[0., 1., 0.], [1., -4., 1.], [0., 1., 0.]])
}

/// Emboss kernel.
pub fn emboss() -> Kernel {
    fixed3([[-2., -1., 0.], [-1., 1., 1.], [0., 1., 2.]])
}

/// Laplacian of Gaussian kernel normalized to sum one.
///
/// Weights are `(r² - σ²) / (2πσ⁶) * exp(-r² / (2σ²))` with `r² = dx² + dy²`.
pub fn laplacian_of_gaussian(size: usize, sigma: f64) -> Result<Kernel, ImageError> {
    crate::check::positive("sigma", sigma)?;
    let s2 = sigma * sigma;
    Ok(Kernel::from_fn(size, |dx, dy| {
        let r2 = dx * dx + dy * dy;
        (r2 - s2) / (2.0 * PI * sigma.powi(6)) * (-r2 / (2.0 * s2)).exp()
    })?
    .normalized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn kernel_rejects_even_size() {
        assert_eq!(box_kernel(4), Err(ImageError::InvalidKernelSize(4)));
        assert_eq!(Kernel::new(0, vec![]), Err(ImageError::InvalidKernelSize(0)));
        assert!(Kernel::new(3, vec![1.0; 8]).is_err());
    }

    #[test]
    fn gaussian_is_normalized_and_symmetric() -> Result<(), ImageError> {
        let kernel = gaussian(5, 1.3)?;
        assert_relative_eq!(kernel.weights().iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(kernel.at(0, 0), kernel.at(4, 4));
        assert_relative_eq!(kernel.at(1, 2), kernel.at(2, 1));
        assert!(kernel.at(2, 2) > kernel.at(2, 1));
        assert!(gaussian(3, 0.0).is_err());

        Ok(())
    }

    #[test]
    fn box_and_motion() -> Result<(), ImageError> {
        let kernel = box_kernel(3)?;
        assert_eq!(kernel.weights(), &[1.0; 9]);
        assert_eq!(kernel.divisor(), 9.0);

        let kernel = motion(3)?;
        assert_relative_eq!(kernel.at(0, 0), 1.0 / 3.0);
        assert_relative_eq!(kernel.at(2, 2), 1.0 / 3.0);
        assert_eq!(kernel.at(0, 2), 0.0);

        Ok(())
    }

    #[test]
    fn fixed_kernels() {
        assert_eq!(sobel(Direction::Horizontal).at(1, 0), 2.0);
        assert_eq!(prewitt(Direction::Vertical).at(2, 1), 1.0);
        assert_eq!(differential(Direction::Horizontal).at(1, 0), -1.0);
        assert_eq!(laplacian().weights().iter().sum::<f64>(), 0.0);
        assert_eq!(emboss().pad(), 1);
    }

    #[test]
    fn log_is_normalized() -> Result<(), ImageError> {
        let kernel = laplacian_of_gaussian(5, 3.0)?;
        assert_relative_eq!(kernel.weights().iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        assert_eq!(kernel.size(), 5);

        Ok(())
    }
}
