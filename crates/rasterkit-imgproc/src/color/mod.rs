mod gray;
mod hsv;
mod rgb;

pub use gray::{gray_from_bgr, to_gray};
pub use hsv::{hue_rotate, hue_rotate_bgr};
pub use rgb::{rgb_from_bgr, swap_rb};

pub(crate) use gray::gray_view;
