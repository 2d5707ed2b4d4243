use argh::FromArgs;
use std::path::PathBuf;

use rasterkit::image::{Image, PixelFormat};
use rasterkit::imgproc::{color, Processed};
use rasterkit::{ProcMode, ProcParams};

#[derive(FromArgs)]
/// Run one processing mode on an image file
struct Args {
    /// path to the input image
    #[argh(option, short = 'i')]
    input: Option<PathBuf>,

    /// path to the output image
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// the processing mode, see --list
    #[argh(option, short = 'm', default = "ProcMode::Grayscale")]
    mode: ProcMode,

    /// print the available modes and exit
    #[argh(switch)]
    list: bool,

    /// kernel size of the median, mean, motion and max-min filters
    #[argh(option)]
    kernel_size: Option<usize>,

    /// sigma of the gaussian filter
    #[argh(option)]
    sigma: Option<f64>,

    /// threshold of the fixed threshold mode
    #[argh(option)]
    threshold: Option<u8>,

    /// scale ratio of the resampling modes
    #[argh(option)]
    scale: Option<f64>,
}

impl Args {
    fn params(&self) -> ProcParams {
        let mut params = ProcParams::default();
        if let Some(kernel_size) = self.kernel_size {
            params.kernel_size = kernel_size;
            params.gaussian_kernel_size = kernel_size;
        }
        if let Some(sigma) = self.sigma {
            params.gaussian_sigma = sigma;
        }
        if let Some(threshold) = self.threshold {
            params.threshold = threshold;
        }
        if let Some(scale) = self.scale {
            params.resample_ratio = (scale, scale);
        }
        params
    }
}

/// Decode a file into a gray or BGR image.
fn read_image(path: &PathBuf) -> Result<Image, Box<dyn std::error::Error>> {
    let decoded = image::open(path)?;
    let size = [decoded.width() as usize, decoded.height() as usize].into();

    if let Some(gray) = decoded.as_luma8() {
        return Ok(Image::new(size, PixelFormat::Gray8, gray.as_raw().clone())?);
    }

    let rgb = Image::new(size, PixelFormat::Bgr8, decoded.to_rgb8().into_raw())?;
    let mut bgr = rgb.zeros_like()?;
    color::rgb_from_bgr(&rgb, &mut bgr)?;

    Ok(bgr)
}

fn write_image(path: &PathBuf, img: &Image) -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = (img.width() as u32, img.height() as u32);

    match img.format() {
        PixelFormat::Gray8 => {
            let buf = image::GrayImage::from_raw(width, height, img.to_packed_vec())
                .ok_or("gray buffer does not match the image size")?;
            buf.save(path)?;
        }
        PixelFormat::Bgr8 => {
            let mut rgb = img.zeros_like()?;
            color::rgb_from_bgr(img, &mut rgb)?;
            let buf = image::RgbImage::from_raw(width, height, rgb.to_packed_vec())
                .ok_or("color buffer does not match the image size")?;
            buf.save(path)?;
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    if args.list {
        for mode in ProcMode::ALL {
            println!("{mode}");
        }
        return Ok(());
    }

    let (Some(input), Some(output)) = (&args.input, &args.output) else {
        return Err("both --input and --output are required".into());
    };

    let src = read_image(input)?;
    log::info!("read {} ({}, {:?})", input.display(), src.size(), src.format());

    match args.mode.run(&src, &args.params())? {
        Processed::Image(dst) => write_image(output, &dst)?,
        Processed::Unchanged => {
            log::warn!("{} does not apply to {:?} input, copying it", args.mode, src.format());
            write_image(output, &src)?;
        }
    }

    println!("{} -> {}", args.mode, output.display());

    Ok(())
}
