/// An error type for the image and image processing crates.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ImageError {
    /// Error when the image has a zero width or height.
    #[error("Image dimensions must be non-zero, got {0}x{1}")]
    ZeroSizedImage(usize, usize),

    /// Error when the channel count is not supported.
    #[error("Unsupported number of channels: {0} (expected 1 or 3)")]
    UnsupportedChannels(usize),

    /// Error when the row stride cannot hold a full row.
    #[error("Row stride ({0}) is smaller than the row length ({1})")]
    InvalidStride(usize, usize),

    /// Error when the data length does not match the image layout.
    #[error("Data length ({0}) does not match the image layout ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when the source and destination sizes do not match.
    #[error("Image size mismatch: ({0}x{1}) vs ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the source and destination channel counts do not match.
    #[error("Channel count mismatch: expected {0}, got {1}")]
    ChannelMismatch(usize, usize),

    /// Error when a kernel size is not valid for the operation.
    #[error("Invalid kernel size: {0}")]
    InvalidKernelSize(usize),

    /// Error when an operation parameter is not valid.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel index out of bounds. The index is ({0}, {1}) and the image size is ({2}x{3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index out of bounds. The index is {0} and the number of channels is {1}")]
    ChannelIndexOutOfBounds(usize, usize),
}

impl ImageError {
    /// Whether the error comes from addressing outside the image bounds.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            ImageError::PixelIndexOutOfBounds(..) | ImageError::ChannelIndexOutOfBounds(..)
        )
    }

    /// Whether the error rejects a malformed image or parameter before processing.
    pub fn is_invalid_input(&self) -> bool {
        !self.is_out_of_range()
    }
}
