use crate::filter::source_rows;
use crate::{check, parallel};
use rasterkit_image::{Image, ImageError};

/// Side of the square blocks used by the pooling modes.
pub const POOL_BLOCK: usize = 8;

/// Aggregate written over a whole block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolingMode {
    /// Truncated integer mean of the block.
    Average,
    /// Largest value of the block.
    Max,
}

/// Replace every `block x block` tile of each channel with its aggregate.
///
/// The output keeps the input size; tiles at the right and bottom edges that are cut by
/// the image border aggregate only the pixels they contain. Bands of `block` rows are
/// processed in parallel.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image.
/// * `block` - The tile side, [`POOL_BLOCK`] for the classic effect.
/// * `mode` - The aggregate to write.
///
/// PRECONDITION: `src` and `dst` must have the same size and channel count.
///
/// # Example
///
/// ```
/// use rasterkit_image::{Image, PixelFormat};
/// use rasterkit_imgproc::pooling::{block_pool, PoolingMode, POOL_BLOCK};
///
/// let image = Image::new([8, 8].into(), PixelFormat::Gray8, (0..64).collect()).unwrap();
/// let mut dst = image.zeros_like().unwrap();
///
/// block_pool(&image, &mut dst, POOL_BLOCK, PoolingMode::Average).unwrap();
///
/// assert_eq!(dst.to_packed_vec(), vec![31; 64]);
/// ```
pub fn block_pool(
    src: &Image,
    dst: &mut Image,
    block: usize,
    mode: PoolingMode,
) -> Result<(), ImageError> {
    if block == 0 {
        return Err(ImageError::InvalidKernelSize(block));
    }
    check::same_layout(src, dst)?;

    let (width, channels) = (src.width(), src.num_channels());
    let dst_stride = dst.stride();
    let rows = source_rows(src)?;

    parallel::par_for_each_band(dst, block, |y0, band| {
        let band_rows = band.len() / dst_stride;
        let src_rows = &rows[y0..y0 + band_rows];

        for x0 in (0..width).step_by(block) {
            let cols = x0..(x0 + block).min(width);
            for ch in 0..channels {
                let samples = src_rows
                    .iter()
                    .flat_map(|row| cols.clone().map(move |x| row[x * channels + ch]));

                let value = match mode {
                    PoolingMode::Average => {
                        let (sum, count) = samples
                            .fold((0u64, 0u64), |(sum, count), v| (sum + v as u64, count + 1));
                        (sum / count) as u8
                    }
                    PoolingMode::Max => samples.max().unwrap_or(0),
                };

                for dst_row in band.chunks_exact_mut(dst_stride) {
                    for x in cols.clone() {
                        dst_row[x * channels + ch] = value;
                    }
                }
            }
        }
    });

    Ok(())
}
