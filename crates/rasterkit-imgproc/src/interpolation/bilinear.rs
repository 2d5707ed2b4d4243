use super::interpolate::Sampler;

/// Kernel for bilinear interpolation
///
/// The top-left neighbour is `floor` of the coordinates clamped to the image; the
/// bottom-right one is clamped to the last row and column. The blend is truncated.
pub(crate) fn bilinear_interpolation(image: &Sampler, u: f64, v: f64, pixel: &mut [u8]) {
    let iu0 = (u.floor().max(0.0) as usize).min(image.width - 1);
    let iv0 = (v.floor().max(0.0) as usize).min(image.height - 1);

    let frac_u = u - iu0 as f64;
    let frac_v = v - iv0 as f64;

    let iu1 = (iu0 + 1).min(image.width - 1);
    let iv1 = (iv0 + 1).min(image.height - 1);

    let w00 = (1.0 - frac_u) * (1.0 - frac_v);
    let w01 = frac_u * (1.0 - frac_v);
    let w10 = (1.0 - frac_u) * frac_v;
    let w11 = frac_u * frac_v;

    for (ch, out) in pixel.iter_mut().enumerate() {
        let val = w00 * image.at(iv0, iu0, ch) as f64
            + w01 * image.at(iv0, iu1, ch) as f64
            + w10 * image.at(iv1, iu0, ch) as f64
            + w11 * image.at(iv1, iu1, ch) as f64;
        *out = val as u8;
    }
}
