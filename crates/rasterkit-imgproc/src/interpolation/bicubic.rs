use super::interpolate::Sampler;

const A: f64 = -1.0;

/// Cubic convolution weight with `a = -1`.
///
/// `(a + 2)|t|³ - (a + 3)t² + 1` for `|t| <= 1`, `a|t|³ - 5at² + 8a|t| - 4a` for
/// `1 < |t| <= 2`, and 0 beyond.
pub fn cubic_weight(t: f64) -> f64 {
    let t = t.abs();
    if t <= 1.0 {
        (A + 2.0) * t.powi(3) - (A + 3.0) * t.powi(2) + 1.0
    } else if t <= 2.0 {
        A * t.powi(3) - 5.0 * A * t.powi(2) + 8.0 * A * t - 4.0 * A
    } else {
        0.0
    }
}

/// Kernel for bicubic interpolation
///
/// Taps `floor(u) - 1 ..= floor(u) + 2` are clamped to the image and weighted by their
/// distance to `(u, v)` after clamping. The weighted sum is divided by the sum of the
/// weights, truncated and clamped to `[0, 255]`.
pub(crate) fn bicubic_interpolation(image: &Sampler, u: f64, v: f64, pixel: &mut [u8]) {
    let iu = u.floor() as i64;
    let iv = v.floor() as i64;
    let clip = |p: i64, len: usize| p.clamp(0, len as i64 - 1) as usize;

    for (ch, out) in pixel.iter_mut().enumerate() {
        let mut w_sum = 0.0;
        let mut val = 0.0;

        for j in -1..3 {
            let yy = clip(iv + j, image.height);
            let wy = cubic_weight(v - yy as f64);
            for i in -1..3 {
                let xx = clip(iu + i, image.width);
                let wx = cubic_weight(u - xx as f64);
                w_sum += wx * wy;
                val += image.at(yy, xx, ch) as f64 * wx * wy;
            }
        }

        *out = if w_sum != 0.0 {
            (val / w_sum).clamp(0.0, 255.0) as u8
        } else {
            0
        };
    }
}
