use log::{debug,info};
use crate::{float,Float};
use crate::error::{Error,Result};
use crate::image::Image;
use crate::descriptor::{keypoint::KeyPoint,feature_vector::Descriptors,transpose::transpose_descriptor};
use crate::pyramid::{ScaleSpaceEngine,OctaveCursor,MAX_ORIENTATIONS,sift_scale_space::SiftScaleSpace};
use self::{frame::Frame,feature_buffer::FeatureBuffer,options::ExtractionOptions,external_keypoint::sorted_by_scale};

pub mod options;
pub mod frame;
pub mod external_keypoint;
pub mod feature_buffer;

/// Co-indexed frames and descriptors of one extraction run
#[derive(Debug,Clone,PartialEq)]
pub struct ExtractionResult {
    pub frames: Vec<Frame>,
    pub descriptors: Descriptors
}

impl ExtractionResult {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Extracts descriptors with the built in difference of gaussians scale space
pub fn extract(image: &Image, options: &ExtractionOptions) -> Result<ExtractionResult> {
    extract_with::<SiftScaleSpace>(image, options)
}

/// Walks every octave of a freshly built `E`, describing either the detected keypoints
/// or the caller supplied ones.
pub fn extract_with<E: ScaleSpaceEngine>(image: &Image, options: &ExtractionOptions) -> Result<ExtractionResult> {
    options.validate()?;
    if image.size() == 0 {
        return Err(Error::InvalidImage{width: image.width(), height: image.height()});
    }
    if options.first_octave < 0 {
        // Room for the upsampled base level, checked before any octave is built
        let factor = 1usize << options.first_octave.unsigned_abs();
        let samples = image.size().checked_mul(factor*factor).ok_or(Error::InvalidImage{width: image.width(), height: image.height()})?;
        Vec::<Float>::new().try_reserve_exact(samples)?;
    }

    let external_keypoints = options.external_keypoints.as_deref().map(sorted_by_scale);

    // The scale space sees the transposed image; frames are mapped back on commit
    let engine_image = image.transpose();
    let mut engine = E::new(engine_image.width(), engine_image.height(), options.octave_count, options.levels, options.first_octave);
    engine.configure(&options.thresholds());

    if options.verbose > 0 {
        info!("filter settings: {}", engine.settings());
        info!("descriptor mode: {:?}", options.descriptor_mode);
        match &external_keypoints {
            Some(keypoints) => info!("will source frames? yes ({} read)", keypoints.len()),
            None => info!("will source frames? no")
        }
        info!("will force orientations? {}", options.force_orientations);
    }

    let mut features = FeatureBuffer::new(options.descriptor_mode);
    let mut next_external = 0;
    let mut cursor = OctaveCursor::new(&mut engine, &engine_image);

    while let Some(octave) = cursor.advance() {
        if options.verbose > 1 {
            debug!("octave {} computed", octave);
        }
        let engine = cursor.engine();

        match &external_keypoints {
            None => {
                let keypoints = engine.detect();
                if options.verbose > 1 {
                    debug!("detected {} (unoriented) keypoints", keypoints.len());
                }
                for keypoint in keypoints.iter() {
                    let angles = engine.keypoint_orientations(keypoint);
                    commit_orientations(engine, &mut features, keypoint, &angles, keypoints.len())?;
                }
            },
            Some(keypoints) => {
                // Scale order keeps each octave's keypoints contiguous
                while let Some(record) = keypoints.get(next_external) {
                    let keypoint = engine.init_keypoint(record.y - 1.0, record.x - 1.0, record.scale);
                    if keypoint.octave < octave {
                        return Err(Error::KeypointOrder{index: next_external, keypoint_octave: keypoint.octave, current_octave: octave});
                    }
                    if keypoint.octave != octave {
                        break;
                    }

                    let angles = match options.force_orientations {
                        true => engine.keypoint_orientations(&keypoint),
                        false => vec![float::consts::FRAC_PI_2 - record.angle]
                    };
                    commit_orientations(engine, &mut features, &keypoint, &angles, keypoints.len())?;
                    next_external += 1;
                }
            }
        }
    }

    if options.verbose > 0 {
        info!("found {} keypoints", features.len());
    }

    let (frames,descriptors) = features.into_parts();
    Ok(ExtractionResult{frames, descriptors})
}

fn commit_orientations<E: ScaleSpaceEngine>(engine: &mut E, features: &mut FeatureBuffer, keypoint: &KeyPoint, angles: &[Float], octave_keypoints: usize) -> Result<()> {
    for &angle in angles.iter().take(MAX_ORIENTATIONS) {
        let raw = engine.keypoint_descriptor(keypoint, angle);
        let descriptor = transpose_descriptor(&raw);
        features.commit(Frame::from_keypoint(keypoint, angle), &descriptor, octave_keypoints)?;
    }
    Ok(())
}
