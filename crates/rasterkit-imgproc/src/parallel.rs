use rasterkit_image::Image;
use rayon::prelude::*;

/// Apply a function to each pixel in the image in parallel.
///
/// Rows are distributed over the rayon pool; `f` receives the channels of one source
/// pixel and of the destination pixel at the same position.
///
/// PRECONDITION: `src` and `dst` must have the same size.
pub fn par_iter_rows(src: &Image, dst: &mut Image, f: impl Fn(&[u8], &mut [u8]) + Send + Sync) {
    let (src_channels, dst_channels) = (src.num_channels(), dst.num_channels());
    let (src_len, dst_len) = (src.row_len(), dst.row_len());
    let dst_stride = dst.stride();

    src.as_slice()
        .par_chunks_exact(src.stride())
        .zip(dst.as_slice_mut().par_chunks_exact_mut(dst_stride))
        .for_each(|(src_row, dst_row)| {
            src_row[..src_len]
                .chunks_exact(src_channels)
                .zip(dst_row[..dst_len].chunks_exact_mut(dst_channels))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each sample in the image in parallel.
///
/// PRECONDITION: `src` and `dst` must have the same size and channel count.
pub fn par_iter_rows_val(src: &Image, dst: &mut Image, f: impl Fn(&u8, &mut u8) + Send + Sync) {
    let row_len = src.row_len();
    let dst_stride = dst.stride();

    src.as_slice()
        .par_chunks_exact(src.stride())
        .zip(dst.as_slice_mut().par_chunks_exact_mut(dst_stride))
        .for_each(|(src_row, dst_row)| {
            src_row[..row_len]
                .iter()
                .zip(dst_row[..row_len].iter_mut())
                .for_each(|(src_val, dst_val)| {
                    f(src_val, dst_val);
                });
        });
}

/// Run `f` on every destination row in parallel.
///
/// `f` receives the row index and the pixel bytes of that row without padding.
pub fn par_for_each_row(dst: &mut Image, f: impl Fn(usize, &mut [u8]) + Send + Sync) {
    let row_len = dst.row_len();
    let stride = dst.stride();

    dst.as_slice_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| f(y, &mut row[..row_len]));
}

/// Run `f` on bands of `band_rows` consecutive destination rows in parallel.
///
/// `f` receives the index of the first row in the band and the raw band bytes
/// (rows of `stride` bytes, padding included). The last band may be shorter.
pub fn par_for_each_band(
    dst: &mut Image,
    band_rows: usize,
    f: impl Fn(usize, &mut [u8]) + Send + Sync,
) {
    let stride = dst.stride();

    dst.as_slice_mut()
        .par_chunks_mut(stride * band_rows.max(1))
        .enumerate()
        .for_each(|(band, chunk)| f(band * band_rows.max(1), chunk));
}

/// Reduce the rows of an image in parallel.
///
/// Each worker folds rows into a local accumulator created by `identity`; the partial
/// results are merged with `reduce`. Intended for integer statistics, where the merge
/// order does not change the result.
pub fn par_fold_rows<T, I, F, R>(src: &Image, identity: I, fold: F, reduce: R) -> T
where
    T: Send,
    I: Fn() -> T + Send + Sync,
    F: Fn(T, &[u8]) -> T + Send + Sync,
    R: Fn(T, T) -> T + Send + Sync,
{
    let row_len = src.row_len();

    src.as_slice()
        .par_chunks_exact(src.stride())
        .fold(&identity, |acc, row| fold(acc, &row[..row_len]))
        .reduce(&identity, reduce)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterkit_image::{ImageError, PixelFormat};

    fn padded_gray() -> Result<Image, ImageError> {
        // 3x2 with one padding byte per row
        Image::from_raw_parts(
            [3, 2].into(),
            PixelFormat::Gray8,
            4,
            vec![1, 2, 3, 200, 4, 5, 6, 200],
        )
    }

    #[test]
    fn test_par_iter_rows_val_skips_padding() -> Result<(), ImageError> {
        let src = padded_gray()?;
        let mut dst = src.zeros_like()?;
        par_iter_rows_val(&src, &mut dst, |s, d| *d = *s * 2);
        assert_eq!(dst.to_packed_vec(), vec![2, 4, 6, 8, 10, 12]);
        assert_eq!(dst.as_slice()[3], 0);

        Ok(())
    }

    #[test]
    fn test_par_iter_rows_changes_channels() -> Result<(), ImageError> {
        let src = Image::new(
            [2, 1].into(),
            PixelFormat::Bgr8,
            vec![1, 2, 3, 10, 20, 30],
        )?;
        let mut dst = Image::from_size_val(src.size(), PixelFormat::Gray8, 0)?;
        par_iter_rows(&src, &mut dst, |s, d| d[0] = s[0] + s[1] + s[2]);
        assert_eq!(dst.to_packed_vec(), vec![6, 60]);

        Ok(())
    }

    #[test]
    fn test_par_for_each_row() -> Result<(), ImageError> {
        let mut dst = padded_gray()?;
        par_for_each_row(&mut dst, |y, row| row.iter_mut().for_each(|v| *v = y as u8));
        assert_eq!(dst.to_packed_vec(), vec![0, 0, 0, 1, 1, 1]);

        Ok(())
    }

    #[test]
    fn test_par_for_each_band() -> Result<(), ImageError> {
        let mut dst = Image::from_size_val([4, 5].into(), PixelFormat::Gray8, 0)?;
        par_for_each_band(&mut dst, 2, |y0, band| band.iter_mut().for_each(|v| *v = y0 as u8));
        assert_eq!(
            dst.to_packed_vec(),
            vec![0, 0, 0, 0, 0, 0, 0, 0, 2, 2, 2, 2, 2, 2, 2, 2, 4, 4, 4, 4]
        );

        Ok(())
    }

    #[test]
    fn test_par_fold_rows() -> Result<(), ImageError> {
        let src = padded_gray()?;
        let sum = par_fold_rows(
            &src,
            || 0u64,
            |acc, row| acc + row.iter().map(|&v| v as u64).sum::<u64>(),
            |a, b| a + b,
        );
        assert_eq!(sum, 21);

        Ok(())
    }
}
