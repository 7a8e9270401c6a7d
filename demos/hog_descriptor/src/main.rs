use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use argh::FromArgs;
use serde::Serialize;

use hogrs::imgproc::{self, HistogramWeight, HogConfig};
use hogrs::io::{dataset, functional as F};

#[derive(FromArgs, Debug)]
/// Compute histogram of oriented gradients descriptors for an image or a directory of images.
struct Args {
    /// path to an image file or to a directory containing images
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to a JSON file with the descriptor configuration
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// number of orientation bins
    #[argh(option)]
    bins: Option<usize>,

    /// side of a cell in pixels
    #[argh(option)]
    cell_size: Option<usize>,

    /// weight histogram votes by gradient magnitude instead of orientation
    #[argh(switch)]
    magnitude_weight: bool,

    /// path of the output file, one JSON record per line; stdout when omitted
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct Record<'a> {
    path: &'a Path,
    class: Option<u32>,
    shape: [usize; 3],
    descriptor: Vec<f32>,
}

fn load_config(args: &Args) -> Result<HogConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_reader(File::open(path)?)?,
        None => HogConfig::default(),
    };

    if let Some(bins) = args.bins {
        config.bins = bins;
    }
    if let Some(cell_size) = args.cell_size {
        config.cell_size = cell_size;
    }
    if args.magnitude_weight {
        config.weight = HistogramWeight::Magnitude;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = load_config(&args)?;
    log::info!("descriptor config: {:?}", config);

    let images_paths = if args.image_path.is_dir() {
        dataset::list_image_files(&args.image_path)?
    } else {
        vec![args.image_path.clone()]
    };

    if images_paths.is_empty() {
        log::warn!("No images found in {}", args.image_path.display());
        return Ok(());
    }

    log::info!("Found {} images", images_paths.len());

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };

    for image_path in images_paths.iter() {
        let image = match F::read_image_any(image_path) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Failed to read {}: {}", image_path.display(), e);
                continue;
            }
        };

        let descriptor = imgproc::hog(&image, &config)?;
        log::info!(
            "{}: {:?} -> descriptor of length {}",
            image_path.display(),
            image.shape,
            descriptor.len()
        );

        let record = Record {
            path: image_path,
            class: dataset::image_class(image_path).ok(),
            shape: image.shape,
            descriptor,
        };
        serde_json::to_writer(&mut writer, &record)?;
        writeln!(writer)?;
    }

    writer.flush()?;

    Ok(())
}
