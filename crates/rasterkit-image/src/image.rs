use crate::buffer::{PixelView, PixelViewMut};
use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use rasterkit_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Pixel layout of an 8-bit image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// One byte per pixel holding the gray intensity.
    Gray8,
    /// Three bytes per pixel in blue, green, red order.
    Bgr8,
}

impl PixelFormat {
    /// Number of channels (bytes) per pixel.
    pub fn num_channels(&self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Bgr8 => 3,
        }
    }

    /// Resolve the pixel format from a channel count.
    pub fn from_channels(channels: usize) -> Result<Self, ImageError> {
        match channels {
            1 => Ok(PixelFormat::Gray8),
            3 => Ok(PixelFormat::Bgr8),
            _ => Err(ImageError::UnsupportedChannels(channels)),
        }
    }
}

/// Row stride used for freshly allocated images: rows padded to 4 bytes.
pub fn aligned_stride(width: usize, format: PixelFormat) -> usize {
    (width * format.num_channels() + 3) / 4 * 4
}

/// An 8-bit image stored as rows of `stride` bytes.
///
/// The byte of pixel `(y, x)` and channel `ch` lives at `y * stride + x * channels + ch`.
/// Bytes past `width * channels` in each row are padding and never read by the
/// processing operations.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    size: ImageSize,
    format: PixelFormat,
    stride: usize,
    data: Vec<u8>,
}

impl Image {
    /// Create a new image from tightly packed pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `format` - The pixel layout.
    /// * `data` - The pixel data, `width * height * channels` bytes with no row padding.
    ///
    /// # Errors
    ///
    /// If the size is zero or the data length does not match the image size.
    ///
    /// # Examples
    ///
    /// ```
    /// use rasterkit_image::{Image, ImageSize, PixelFormat};
    ///
    /// let image = Image::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     PixelFormat::Bgr8,
    ///     vec![0u8; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.width(), 10);
    /// assert_eq!(image.height(), 20);
    /// assert_eq!(image.num_channels(), 3);
    /// assert_eq!(image.stride(), 30);
    /// ```
    pub fn new(size: ImageSize, format: PixelFormat, data: Vec<u8>) -> Result<Self, ImageError> {
        let stride = size.width * format.num_channels();
        Self::from_raw_parts(size, format, stride, data)
    }

    /// Create a new image from strided pixel data.
    ///
    /// # Errors
    ///
    /// If the size is zero, the stride cannot hold one row, or `data.len()` is not
    /// `stride * height`.
    pub fn from_raw_parts(
        size: ImageSize,
        format: PixelFormat,
        stride: usize,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        if size.width == 0 || size.height == 0 {
            return Err(ImageError::ZeroSizedImage(size.width, size.height));
        }

        let row_len = size.width * format.num_channels();
        if stride < row_len {
            return Err(ImageError::InvalidStride(stride, row_len));
        }

        if data.len() != stride * size.height {
            return Err(ImageError::InvalidDataLength(
                data.len(),
                stride * size.height,
            ));
        }

        Ok(Self {
            size,
            format,
            stride,
            data,
        })
    }

    /// Create a new image with every byte set to `val`.
    ///
    /// Rows are padded to a multiple of 4 bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use rasterkit_image::{Image, ImageSize, PixelFormat};
    ///
    /// let image = Image::from_size_val([5, 2].into(), PixelFormat::Bgr8, 0).unwrap();
    ///
    /// assert_eq!(image.stride(), 16);
    /// assert_eq!(image.as_slice().len(), 32);
    /// ```
    pub fn from_size_val(
        size: ImageSize,
        format: PixelFormat,
        val: u8,
    ) -> Result<Self, ImageError> {
        let stride = aligned_stride(size.width, format);
        let data = vec![val; stride * size.height];
        Self::from_raw_parts(size, format, stride, data)
    }

    /// Create a zero-filled image with the same size and format as `self`.
    pub fn zeros_like(&self) -> Result<Self, ImageError> {
        Self::from_size_val(self.size, self.format, 0)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        self.format.num_channels()
    }

    /// Get the number of bytes between the starts of two consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Get the number of pixel bytes in one row (`width * channels`).
    pub fn row_len(&self) -> usize {
        self.size.width * self.num_channels()
    }

    /// Get the raw buffer including row padding.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get the raw mutable buffer including row padding.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Borrow the image for reading.
    ///
    /// The view lives as long as the borrow; dropping it releases the image.
    pub fn view(&self) -> PixelView<'_> {
        PixelView::new(&self.data, self.size, self.num_channels(), self.stride)
    }

    /// Borrow the image for reading and writing.
    pub fn view_mut(&mut self) -> PixelViewMut<'_> {
        let channels = self.num_channels();
        PixelViewMut::new(&mut self.data, self.size, channels, self.stride)
    }

    /// Copy the pixels into a tightly packed vector, dropping the row padding.
    pub fn to_packed_vec(&self) -> Vec<u8> {
        let row_len = self.row_len();
        let mut packed = Vec::with_capacity(row_len * self.height());
        for row in self.data.chunks_exact(self.stride) {
            packed.extend_from_slice(&row[..row_len]);
        }
        packed
    }

    /// Consume the image and return the raw buffer including row padding.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{aligned_stride, Image, ImageSize, PixelFormat};
    use crate::ImageError;

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(
            image_size.to_string(),
            "ImageSize { width: 10, height: 20 }"
        );
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            PixelFormat::Bgr8,
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);
        assert_eq!(image.stride(), 30);

        Ok(())
    }

    #[test]
    fn image_rejects_zero_size() {
        let res = Image::from_size_val([0, 4].into(), PixelFormat::Gray8, 0);
        assert_eq!(res, Err(ImageError::ZeroSizedImage(0, 4)));
    }

    #[test]
    fn image_rejects_bad_layout() {
        let res = Image::from_raw_parts([4, 2].into(), PixelFormat::Bgr8, 10, vec![0; 20]);
        assert_eq!(res, Err(ImageError::InvalidStride(10, 12)));

        let res = Image::new([4, 2].into(), PixelFormat::Gray8, vec![0; 7]);
        assert_eq!(res, Err(ImageError::InvalidDataLength(7, 8)));
    }

    #[test]
    fn format_from_channels() {
        assert_eq!(PixelFormat::from_channels(1), Ok(PixelFormat::Gray8));
        assert_eq!(PixelFormat::from_channels(3), Ok(PixelFormat::Bgr8));
        assert_eq!(
            PixelFormat::from_channels(4),
            Err(ImageError::UnsupportedChannels(4))
        );
    }

    #[test]
    fn aligned_rows() -> Result<(), ImageError> {
        assert_eq!(aligned_stride(3, PixelFormat::Gray8), 4);
        assert_eq!(aligned_stride(4, PixelFormat::Gray8), 4);
        assert_eq!(aligned_stride(3, PixelFormat::Bgr8), 12);
        assert_eq!(aligned_stride(5, PixelFormat::Bgr8), 16);

        let image = Image::from_size_val([3, 2].into(), PixelFormat::Gray8, 7)?;
        assert_eq!(image.stride(), 4);
        assert_eq!(image.to_packed_vec(), vec![7; 6]);

        Ok(())
    }

    #[test]
    fn packed_copy_skips_padding() -> Result<(), ImageError> {
        let data = vec![1, 2, 3, 0, 4, 5, 6, 0];
        let image = Image::from_raw_parts([3, 2].into(), PixelFormat::Gray8, 4, data)?;
        assert_eq!(image.to_packed_vec(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(image.row_len(), 3);

        Ok(())
    }
}
