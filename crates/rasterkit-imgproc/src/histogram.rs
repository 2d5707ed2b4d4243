use crate::{check, parallel};
use rasterkit_image::{Image, ImageError};

/// Number of intensity levels of an 8-bit channel.
pub const NUM_BINS: usize = 256;

/// Per-channel intensity counts of an 8-bit image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    counts: Vec<[u64; NUM_BINS]>,
}

impl Histogram {
    /// Count the intensities of every channel of `src`.
    ///
    /// Rows are counted in parallel into local tables that are merged afterwards.
    ///
    /// # Example
    ///
    /// ```
    /// use rasterkit_image::{Image, PixelFormat};
    /// use rasterkit_imgproc::histogram::Histogram;
    ///
    /// let image = Image::new([3, 1].into(), PixelFormat::Gray8, vec![0, 7, 7]).unwrap();
    /// let hist = Histogram::compute(&image);
    ///
    /// assert_eq!(hist.channel(0).unwrap()[7], 2);
    /// assert_eq!(hist.total(), 3);
    /// ```
    pub fn compute(src: &Image) -> Self {
        let channels = src.num_channels();

        let counts = parallel::par_fold_rows(
            src,
            || vec![[0u64; NUM_BINS]; channels],
            |mut local, row| {
                for pixel in row.chunks_exact(channels) {
                    for (hist, &val) in local.iter_mut().zip(pixel) {
                        hist[val as usize] += 1;
                    }
                }
                local
            },
            |mut a, b| {
                for (ha, hb) in a.iter_mut().zip(b.iter()) {
                    for (va, vb) in ha.iter_mut().zip(hb.iter()) {
                        *va += vb;
                    }
                }
                a
            },
        );

        Self { counts }
    }

    /// Number of channels counted.
    pub fn num_channels(&self) -> usize {
        self.counts.len()
    }

    /// The counts of channel `ch`.
    pub fn channel(&self, ch: usize) -> Result<&[u64; NUM_BINS], ImageError> {
        self.counts
            .get(ch)
            .ok_or(ImageError::ChannelIndexOutOfBounds(ch, self.counts.len()))
    }

    /// The counts of all channels summed into one table.
    pub fn combined(&self) -> [u64; NUM_BINS] {
        let mut combined = [0u64; NUM_BINS];
        for hist in self.counts.iter() {
            for (c, v) in combined.iter_mut().zip(hist.iter()) {
                *c += v;
            }
        }
        combined
    }

    /// Total number of samples counted over all channels.
    pub fn total(&self) -> u64 {
        self.counts.iter().flat_map(|h| h.iter()).sum()
    }
}

/// Stretch the intensities of an image into `[a, b]`.
///
/// The global minimum `c` and maximum `d` over all channels are found first; then each
/// sample maps to `a` below `a`, to `b` above `b`, and to `(b - a) / (d - c) * (v - c) + a`
/// in between, where the stretch factor `(b - a) / (d - c)` is an integer quotient. A flat
/// image maps every in-range sample to `a`.
///
/// # Errors
///
/// If `a > b` or the images do not share size and channel count.
pub fn normalize(src: &Image, dst: &mut Image, a: u8, b: u8) -> Result<(), ImageError> {
    check::same_layout(src, dst)?;
    if a > b {
        return Err(ImageError::InvalidParameter(format!(
            "normalization range is empty: {a} > {b}"
        )));
    }

    // the extrema must be complete before any sample is mapped
    let (c, d) = parallel::par_fold_rows(
        src,
        || (u8::MAX, u8::MIN),
        |(lo, hi), row| row.iter().fold((lo, hi), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        |(lo_a, hi_a), (lo_b, hi_b)| (lo_a.min(lo_b), hi_a.max(hi_b)),
    );

    let range_in = (d - c) as u32;
    let factor = if range_in > 0 { (b - a) as u32 / range_in } else { 0 };

    parallel::par_iter_rows_val(src, dst, |&v, out| {
        *out = if v < a {
            a
        } else if v <= b {
            if range_in > 0 {
                (factor * (v - c) as u32 + a as u32) as u8
            } else {
                a
            }
        } else {
            b
        };
    });

    Ok(())
}

/// Shift and scale the intensities of an image to mean `m0` and deviation `s0`.
///
/// Each sample maps to `clamp(s0 / s * (v - m) + m0, 0, 255)` where `m` and `s` are the
/// mean and standard deviation over all samples. A flat image maps to `clamp(m0)`.
pub fn transform(src: &Image, dst: &mut Image, m0: f64, s0: f64) -> Result<(), ImageError> {
    check::same_layout(src, dst)?;
    if !m0.is_finite() || !s0.is_finite() {
        return Err(ImageError::InvalidParameter(format!(
            "histogram target must be finite, got mean {m0} and deviation {s0}"
        )));
    }

    let (sum, squared_sum) = parallel::par_fold_rows(
        src,
        || (0u64, 0u64),
        |(sum, sq), row| {
            row.iter().fold((sum, sq), |(sum, sq), &v| {
                let v = v as u64;
                (sum + v, sq + v * v)
            })
        },
        |a, b| (a.0 + b.0, a.1 + b.1),
    );

    let n = (src.width() * src.height() * src.num_channels()) as f64;
    let m = sum as f64 / n;
    let s = (squared_sum as f64 / n - m * m).max(0.0).sqrt();

    log::trace!("histogram transform: mean {m:.3}, deviation {s:.3}");

    parallel::par_iter_rows_val(src, dst, |&v, out| {
        let mapped = if s > 0.0 {
            s0 * (v as f64 - m) / s + m0
        } else {
            m0
        };
        *out = mapped.clamp(0.0, 255.0) as u8;
    });

    Ok(())
}

/// Equalize the intensity distribution of an image.
///
/// One histogram is built over all channels; each sample `v` maps to
/// `round(255 / N * sum(hist[l] for l < v))` with `N` the total number of samples.
pub fn equalize(src: &Image, dst: &mut Image) -> Result<(), ImageError> {
    check::same_layout(src, dst)?;

    let hist = Histogram::compute(src).combined();
    let n = (src.width() * src.height() * src.num_channels()) as f64;

    let mut lut = [0u8; NUM_BINS];
    let mut cumulative = 0u64;
    for (entry, &count) in lut.iter_mut().zip(hist.iter()) {
        *entry = (255.0 / n * cumulative as f64).round() as u8;
        cumulative += count;
    }

    parallel::par_iter_rows_val(src, dst, |&v, out| *out = lut[v as usize]);

    Ok(())
}
