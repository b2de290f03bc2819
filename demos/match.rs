extern crate color_eyre;
extern crate dsp_sift;

use std::{env,path::Path};
use color_eyre::eyre::{eyre,Result};

use dsp_sift::{extract,par_match_descriptors,ExtractionOptions};
use dsp_sift::image::Image;

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let image_path = args.get(1).map(String::as_str).unwrap_or("images/blur.png");
    let image_path_2 = args.get(2).map(String::as_str).unwrap_or("images/blur_rotated.png");
    let ratio_threshold = match args.get(3) {
        Some(ratio) => ratio.parse()?,
        None => 1.5
    };

    let options = ExtractionOptions::default();
    let features = extract(&Image::load(Path::new(image_path), false)?, &options)?;
    let features_2 = extract(&Image::load(Path::new(image_path_2), false)?, &options)?;

    let descriptors = features.descriptors.as_quantized().ok_or_else(|| eyre!("expected quantized descriptors"))?;
    let descriptors_2 = features_2.descriptors.as_quantized().ok_or_else(|| eyre!("expected quantized descriptors"))?;

    let matches = par_match_descriptors(descriptors, descriptors_2, ratio_threshold);

    println!("number of matched pairs: {} ({} and {} descriptors)", matches.len(), features.len(), features_2.len());
    for m in matches.iter().take(10) {
        let frame = &features.frames[m.index_one-1];
        let frame_2 = &features_2.frames[m.index_two-1];
        println!("({:.1},{:.1}) -> ({:.1},{:.1}) score {}", frame.x, frame.y, frame_2.x, frame_2.y, m.score);
    }

    Ok(())
}
