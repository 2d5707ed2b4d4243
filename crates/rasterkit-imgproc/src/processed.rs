use rasterkit_image::Image;

/// Result of an operation that may not apply to the given input.
///
/// Color conversions are defined only for color input; given an image that is already
/// reduced they report [`Processed::Unchanged`] instead of failing. Callers should keep
/// showing or storing the original image in that case.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub enum Processed {
    /// The operation produced a new image.
    Image(Image),
    /// The operation does not apply to the input; the input stands as the result.
    Unchanged,
}

impl Processed {
    /// Whether the operation reported that it does not apply.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Processed::Unchanged)
    }

    /// The produced image, if any.
    pub fn into_image(self) -> Option<Image> {
        match self {
            Processed::Image(image) => Some(image),
            Processed::Unchanged => None,
        }
    }

    /// The produced image, or a copy of `original` when the operation did not apply.
    pub fn or_original(self, original: &Image) -> Image {
        match self {
            Processed::Image(image) => image,
            Processed::Unchanged => original.clone(),
        }
    }
}

impl From<Image> for Processed {
    fn from(image: Image) -> Self {
        Processed::Image(image)
    }
}
