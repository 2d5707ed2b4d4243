use std::f64::consts::PI;

use crate::interpolation::Sampler;
use crate::{check, parallel};
use rasterkit_image::{Image, ImageError, ImageSize};

/// Parameters of an affine mapping.
///
/// The forward matrix is `[[a, b], [c, d]]` with translation `(tx, ty)`. A non-zero
/// `theta` (degrees) replaces the matrix with a rotation about the image center; non-zero
/// `dx`, `dy` shear the image and grow the output by as many pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineTransform {
    /// Horizontal scale.
    pub a: f64,
    /// Horizontal shear.
    pub b: f64,
    /// Vertical shear.
    pub c: f64,
    /// Vertical scale.
    pub d: f64,
    /// Horizontal translation.
    pub tx: f64,
    /// Vertical translation.
    pub ty: f64,
    /// Rotation angle in degrees.
    pub theta: f64,
    /// Horizontal skew in pixels.
    pub dx: f64,
    /// Vertical skew in pixels.
    pub dy: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx: 0.0,
            ty: 0.0,
            theta: 0.0,
            dx: 0.0,
            dy: 0.0,
        }
    }
}

impl AffineTransform {
    /// A general matrix with translation.
    pub fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self {
            a,
            b,
            c,
            d,
            tx,
            ty,
            ..Default::default()
        }
    }

    /// Shift the content by `(tx, ty)` pixels.
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Scale the image by `(a, d)`; the output grows accordingly.
    pub fn scaling(a: f64, d: f64) -> Self {
        Self::new(a, 0.0, 0.0, d, 0.0, 0.0)
    }

    /// Rotate by `theta` degrees about the image center.
    pub fn rotation(theta: f64) -> Self {
        Self {
            theta,
            ..Default::default()
        }
    }

    /// Shear by `dx` pixels across the height and `dy` pixels across the width.
    pub fn skew(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            ..Default::default()
        }
    }

    /// Size of the image produced from a source of `size`.
    ///
    /// `round(width * a + dx) x round(height * d + dy)`, or `round(width + dx) x
    /// round(height + dy)` when rotating.
    pub fn output_size(&self, size: ImageSize) -> ImageSize {
        let (w, h) = (size.width as f64, size.height as f64);
        let (width, height) = if self.theta != 0.0 {
            (w + self.dx, h + self.dy)
        } else {
            (w * self.a + self.dx, h * self.d + self.dy)
        };

        ImageSize {
            width: width.round().max(0.0) as usize,
            height: height.round().max(0.0) as usize,
        }
    }

    /// Resolve the destination-to-source mapping for a source of `size`.
    ///
    /// The determinant is taken from the supplied matrix before the skew terms are
    /// applied; a rotation recomputes both the matrix and its determinant and shifts the
    /// translation so that the integer center `(width / 2, height / 2)` stays in place.
    ///
    /// # Errors
    ///
    /// If the resolved determinant is zero or any parameter is not finite.
    pub fn inverse_map(&self, size: ImageSize) -> Result<InverseMap, ImageError> {
        let params = [
            self.a, self.b, self.c, self.d, self.tx, self.ty, self.theta, self.dx, self.dy,
        ];
        if params.iter().any(|p| !p.is_finite()) {
            return Err(ImageError::InvalidParameter(format!(
                "affine parameters must be finite: {self:?}"
            )));
        }

        let (width, height) = (size.width as f64, size.height as f64);
        let mut map = InverseMap {
            a: self.a,
            b: self.b,
            c: self.c,
            d: self.d,
            det: self.a * self.d - self.b * self.c,
            tx: self.tx,
            ty: self.ty,
        };

        if self.dx != 0.0 {
            map.b = self.dx / height;
        }
        if self.dy != 0.0 {
            map.c = self.dy / width;
        }

        if self.theta != 0.0 {
            let rad = self.theta / 180.0 * PI;
            let (a, b, c, d) = (rad.cos(), -rad.sin(), rad.sin(), rad.cos());
            let det = a * d - b * c;

            let cx = (size.width / 2) as f64;
            let cy = (size.height / 2) as f64;
            let new_cx = (d * cx - b * cy) / det;
            let new_cy = (-c * cx + a * cy) / det;

            map = InverseMap {
                a,
                b,
                c,
                d,
                det,
                tx: new_cx - cx,
                ty: new_cy - cy,
            };
        }

        if map.det == 0.0 {
            return Err(ImageError::InvalidParameter(
                "affine matrix is singular".to_string(),
            ));
        }

        Ok(map)
    }
}

/// Destination-to-source mapping of an affine transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InverseMap {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    det: f64,
    tx: f64,
    ty: f64,
}

impl InverseMap {
    /// Source coordinate of destination pixel `(x, y)`, truncated toward zero.
    ///
    /// `x_src = (d x - b y) / det - tx`, `y_src = (-c x + a y) / det - ty`.
    #[inline]
    pub fn source(&self, x: usize, y: usize) -> (i64, i64) {
        let (x, y) = (x as f64, y as f64);
        let xs = (self.d * x - self.b * y) / self.det - self.tx;
        let ys = (-self.c * x + self.a * y) / self.det - self.ty;
        (xs as i64, ys as i64)
    }
}

/// Fill `dst` by looking up every destination pixel in `src` through `map`.
///
/// Pixels whose source falls outside `src` are left untouched.
///
/// PRECONDITION: `src` and `dst` must have the same channel count.
pub fn warp_affine(src: &Image, dst: &mut Image, map: &InverseMap) -> Result<(), ImageError> {
    check::channels(dst, src.num_channels())?;

    let sampler = Sampler::new(src)?;
    let (width, height, channels) = (src.width() as i64, src.height() as i64, src.num_channels());

    parallel::par_for_each_row(dst, |y, dst_row| {
        for (x, pixel) in dst_row.chunks_exact_mut(channels).enumerate() {
            let (xs, ys) = map.source(x, y);
            if xs < 0 || xs >= width || ys < 0 || ys >= height {
                continue;
            }
            for (ch, out) in pixel.iter_mut().enumerate() {
                *out = sampler.at(ys as usize, xs as usize, ch);
            }
        }
    });

    Ok(())
}

/// Apply an affine transform, allocating a zeroed output of
/// [`AffineTransform::output_size`].
///
/// # Example
///
/// ```
/// use rasterkit_image::{Image, PixelFormat};
/// use rasterkit_imgproc::warp::{affine, AffineTransform};
///
/// let image = Image::new([3, 1].into(), PixelFormat::Gray8, vec![1, 2, 3]).unwrap();
/// let shifted = affine(&image, &AffineTransform::translation(1.0, 0.0)).unwrap();
///
/// assert_eq!(shifted.to_packed_vec(), vec![0, 1, 2]);
/// ```
pub fn affine(src: &Image, transform: &AffineTransform) -> Result<Image, ImageError> {
    let map = transform.inverse_map(src.size())?;
    let size = transform.output_size(src.size());
    let mut dst = Image::from_size_val(size, src.format(), 0)?;
    warp_affine(src, &mut dst, &map)?;
    Ok(dst)
}
