extern crate color_eyre;
extern crate dsp_sift;

use std::{env,path::Path};
use color_eyre::eyre::Result;

use dsp_sift::{extract,ExtractionOptions};
use dsp_sift::image::Image;

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let image_path = args.get(1).map(String::as_str).unwrap_or("images/blur.png");

    let mut options = match args.get(2) {
        Some(config_path) => ExtractionOptions::load(Path::new(config_path))?,
        None => ExtractionOptions::default()
    };
    options.verbose = options.verbose.max(1);

    let image = Image::load(Path::new(image_path), false)?;
    let result = extract(&image, &options)?;

    println!("{}: {} descriptors with {}", image_path, result.len(), options);
    for frame in result.frames.iter().take(10) {
        println!("{:?}", frame.to_array());
    }

    Ok(())
}
