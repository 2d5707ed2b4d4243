use super::interpolate::Sampler;

/// Kernel for nearest neighbor interpolation
///
/// The coordinates are rounded and clamped to the last row and column.
pub(crate) fn nearest_neighbor_interpolation(image: &Sampler, u: f64, v: f64, pixel: &mut [u8]) {
    let iu = (u.round().max(0.0) as usize).min(image.width - 1);
    let iv = (v.round().max(0.0) as usize).min(image.height - 1);

    for (ch, out) in pixel.iter_mut().enumerate() {
        *out = image.at(iv, iu, ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterkit_image::{Image, ImageError, PixelFormat};

    #[test]
    fn nearest_rounds_and_clamps() -> Result<(), ImageError> {
        let image = Image::new([3, 1].into(), PixelFormat::Gray8, vec![10, 20, 30])?;
        let sampler = Sampler::new(&image)?;
        let mut pixel = [0u8];

        nearest_neighbor_interpolation(&sampler, 0.4, 0.0, &mut pixel);
        assert_eq!(pixel, [10]);
        nearest_neighbor_interpolation(&sampler, 1.6, 0.0, &mut pixel);
        assert_eq!(pixel, [30]);
        nearest_neighbor_interpolation(&sampler, 7.0, 3.0, &mut pixel);
        assert_eq!(pixel, [30]);

        Ok(())
    }
}
