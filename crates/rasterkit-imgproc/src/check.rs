use rasterkit_image::{Image, ImageError};

pub(crate) fn same_size(src: &Image, dst: &Image) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }
    Ok(())
}

pub(crate) fn same_layout(src: &Image, dst: &Image) -> Result<(), ImageError> {
    same_size(src, dst)?;
    if src.num_channels() != dst.num_channels() {
        return Err(ImageError::ChannelMismatch(
            src.num_channels(),
            dst.num_channels(),
        ));
    }
    Ok(())
}

pub(crate) fn channels(image: &Image, expected: usize) -> Result<(), ImageError> {
    if image.num_channels() != expected {
        return Err(ImageError::ChannelMismatch(expected, image.num_channels()));
    }
    Ok(())
}

pub(crate) fn positive(name: &str, value: f64) -> Result<(), ImageError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ImageError::InvalidParameter(format!(
            "{name} must be a positive finite number, got {value}"
        )));
    }
    Ok(())
}
