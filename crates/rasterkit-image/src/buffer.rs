use crate::error::ImageError;
use crate::image::ImageSize;

/// Bounds-checked `(y, x, ch)` addressing over a strided byte buffer.
#[derive(Clone, Copy, Debug)]
struct Layout {
    size: ImageSize,
    channels: usize,
    stride: usize,
}

impl Layout {
    #[inline]
    fn offset(&self, y: usize, x: usize, ch: usize) -> Result<usize, ImageError> {
        if x >= self.size.width || y >= self.size.height {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.size.width,
                self.size.height,
            ));
        }

        if ch >= self.channels {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, self.channels));
        }

        Ok(y * self.stride + x * self.channels + ch)
    }

    #[inline]
    fn row_range(&self, y: usize) -> Result<std::ops::Range<usize>, ImageError> {
        if y >= self.size.height {
            return Err(ImageError::PixelIndexOutOfBounds(
                0,
                y,
                self.size.width,
                self.size.height,
            ));
        }
        let start = y * self.stride;
        Ok(start..start + self.size.width * self.channels)
    }
}

/// Read access to the pixels of an image.
///
/// Obtained from [`crate::Image::view`]; holds a shared borrow of the image for its
/// whole lifetime.
///
/// # Examples
///
/// ```
/// use rasterkit_image::{Image, PixelFormat};
///
/// let image = Image::new([2, 1].into(), PixelFormat::Bgr8, vec![1, 2, 3, 4, 5, 6]).unwrap();
/// let view = image.view();
///
/// assert_eq!(view.get_ch(0, 1, 2).unwrap(), 6);
/// assert!(view.get_ch(0, 2, 0).is_err());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PixelView<'a> {
    data: &'a [u8],
    layout: Layout,
}

impl<'a> PixelView<'a> {
    pub(crate) fn new(data: &'a [u8], size: ImageSize, channels: usize, stride: usize) -> Self {
        Self {
            data,
            layout: Layout {
                size,
                channels,
                stride,
            },
        }
    }

    /// Width of the viewed image in pixels.
    pub fn width(&self) -> usize {
        self.layout.size.width
    }

    /// Height of the viewed image in pixels.
    pub fn height(&self) -> usize {
        self.layout.size.height
    }

    /// Number of channels per pixel.
    pub fn num_channels(&self) -> usize {
        self.layout.channels
    }

    /// Bytes between two consecutive rows.
    pub fn stride(&self) -> usize {
        self.layout.stride
    }

    /// Single-channel read of pixel `(y, x)`.
    pub fn get(&self, y: usize, x: usize) -> Result<u8, ImageError> {
        self.get_ch(y, x, 0)
    }

    /// Read channel `ch` of pixel `(y, x)`.
    pub fn get_ch(&self, y: usize, x: usize, ch: usize) -> Result<u8, ImageError> {
        let offset = self.layout.offset(y, x, ch)?;
        Ok(self.data[offset])
    }

    /// All channels of pixel `(y, x)`.
    pub fn pixel(&self, y: usize, x: usize) -> Result<&'a [u8], ImageError> {
        let offset = self.layout.offset(y, x, 0)?;
        let data: &'a [u8] = self.data;
        Ok(&data[offset..offset + self.layout.channels])
    }

    /// The pixel bytes of row `y`, without padding.
    pub fn row(&self, y: usize) -> Result<&'a [u8], ImageError> {
        let range = self.layout.row_range(y)?;
        let data: &'a [u8] = self.data;
        Ok(&data[range])
    }
}

/// Read and write access to the pixels of an image.
///
/// Obtained from [`crate::Image::view_mut`]; holds an exclusive borrow of the image.
#[derive(Debug)]
pub struct PixelViewMut<'a> {
    data: &'a mut [u8],
    layout: Layout,
}

impl<'a> PixelViewMut<'a> {
    pub(crate) fn new(
        data: &'a mut [u8],
        size: ImageSize,
        channels: usize,
        stride: usize,
    ) -> Self {
        Self {
            data,
            layout: Layout {
                size,
                channels,
                stride,
            },
        }
    }

    /// Width of the viewed image in pixels.
    pub fn width(&self) -> usize {
        self.layout.size.width
    }

    /// Height of the viewed image in pixels.
    pub fn height(&self) -> usize {
        self.layout.size.height
    }

    /// Number of channels per pixel.
    pub fn num_channels(&self) -> usize {
        self.layout.channels
    }

    /// Bytes between two consecutive rows.
    pub fn stride(&self) -> usize {
        self.layout.stride
    }

    /// Single-channel read of pixel `(y, x)`.
    pub fn get(&self, y: usize, x: usize) -> Result<u8, ImageError> {
        self.get_ch(y, x, 0)
    }

    /// Read channel `ch` of pixel `(y, x)`.
    pub fn get_ch(&self, y: usize, x: usize, ch: usize) -> Result<u8, ImageError> {
        let offset = self.layout.offset(y, x, ch)?;
        Ok(self.data[offset])
    }

    /// Single-channel write of pixel `(y, x)`.
    pub fn set(&mut self, y: usize, x: usize, value: u8) -> Result<(), ImageError> {
        self.set_ch(y, x, 0, value)
    }

    /// Write channel `ch` of pixel `(y, x)`.
    pub fn set_ch(&mut self, y: usize, x: usize, ch: usize, value: u8) -> Result<(), ImageError> {
        let offset = self.layout.offset(y, x, ch)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Mutable pixel bytes of row `y`, without padding.
    pub fn row_mut(&mut self, y: usize) -> Result<&mut [u8], ImageError> {
        let range = self.layout.row_range(y)?;
        Ok(&mut self.data[range])
    }
}

#[cfg(test)]
mod tests {
    use crate::{Image, ImageError, PixelFormat};

    #[test]
    fn view_addresses_with_stride() -> Result<(), ImageError> {
        // 3x2 gray image with one padding byte per row
        let data = vec![1, 2, 3, 99, 4, 5, 6, 99];
        let image = Image::from_raw_parts([3, 2].into(), PixelFormat::Gray8, 4, data)?;
        let view = image.view();

        assert_eq!(view.get(0, 2)?, 3);
        assert_eq!(view.get(1, 0)?, 4);
        assert_eq!(view.row(1)?, &[4, 5, 6]);

        Ok(())
    }

    #[test]
    fn view_rejects_padding_and_foreign_rows() -> Result<(), ImageError> {
        let data = vec![1, 2, 3, 99, 4, 5, 6, 99];
        let image = Image::from_raw_parts([3, 2].into(), PixelFormat::Gray8, 4, data)?;
        let view = image.view();

        assert_eq!(
            view.get(0, 3),
            Err(ImageError::PixelIndexOutOfBounds(3, 0, 3, 2))
        );
        assert!(view.get(2, 0).unwrap_err().is_out_of_range());
        assert_eq!(
            view.get_ch(0, 0, 1),
            Err(ImageError::ChannelIndexOutOfBounds(1, 1))
        );
        assert!(view.row(2).is_err());

        Ok(())
    }

    #[test]
    fn view_mut_writes_channels() -> Result<(), ImageError> {
        let mut image = Image::from_size_val([2, 2].into(), PixelFormat::Bgr8, 0)?;
        {
            let mut view = image.view_mut();
            view.set_ch(1, 1, 2, 200)?;
            view.set(0, 0, 10)?;
            assert!(view.set_ch(1, 1, 3, 1).is_err());
            view.row_mut(0)?[5] = 7;
        }

        let view = image.view();
        assert_eq!(view.pixel(1, 1)?, &[0, 0, 200]);
        assert_eq!(view.pixel(0, 0)?, &[10, 0, 0]);
        assert_eq!(view.pixel(0, 1)?, &[0, 0, 7]);

        Ok(())
    }

    #[test]
    fn failed_write_leaves_image_untouched() -> Result<(), ImageError> {
        let mut image = Image::from_size_val([2, 2].into(), PixelFormat::Gray8, 5)?;
        let before = image.clone();
        let res = image.view_mut().set(5, 5, 0);

        assert!(res.is_err());
        assert_eq!(image, before);

        Ok(())
    }
}
