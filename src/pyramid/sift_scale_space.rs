use crate::{Float,DESCRIPTOR_LENGTH};
use crate::image::Image;
use crate::extrema::{detect_extrema,extrema_refinement};
use crate::descriptor::{keypoint::KeyPoint,orientation_histogram,local_image_descriptor::LocalImageDescriptor};
use crate::pyramid::{ScaleSpaceEngine,OctaveStatus,EngineThresholds,EngineSettings};
use crate::pyramid::{sift_octave::SiftOctave,sift_runtime_params::SiftRuntimeParams};

/// Difference of gaussians scale space holding one octave at a time
#[derive(Debug,Clone)]
pub struct SiftScaleSpace {
    pub runtime_params: SiftRuntimeParams,
    octave: Option<SiftOctave>
}

impl SiftScaleSpace {
    pub fn current_octave(&self) -> Option<&SiftOctave> {
        self.octave.as_ref()
    }

    fn advance_to(&mut self, next: Option<SiftOctave>) -> OctaveStatus {
        match next {
            Some(octave) => {
                self.octave = Some(octave);
                OctaveStatus::Ready
            },
            None => OctaveStatus::Exhausted
        }
    }
}

impl ScaleSpaceEngine for SiftScaleSpace {

    fn new(width: usize, height: usize, octave_count: Option<usize>, levels: usize, first_octave: i32) -> SiftScaleSpace {
        SiftScaleSpace {
            runtime_params: SiftRuntimeParams::new(width, height, octave_count, levels, first_octave),
            octave: None
        }
    }

    fn configure(&mut self, thresholds: &EngineThresholds) -> () {
        self.runtime_params.apply(thresholds);
    }

    fn settings(&self) -> EngineSettings {
        self.runtime_params.settings()
    }

    fn process_first_octave(&mut self, image: &Image) -> OctaveStatus {
        debug_assert_eq!((image.width(),image.height()), (self.runtime_params.width,self.runtime_params.height));
        let first = SiftOctave::build_first_octave(image, &self.runtime_params);
        self.advance_to(first)
    }

    fn process_next_octave(&mut self) -> OctaveStatus {
        let next = match &self.octave {
            Some(octave) => octave.build_next_octave(&self.runtime_params),
            None => None
        };
        self.advance_to(next)
    }

    fn octave_index(&self) -> i32 {
        match &self.octave {
            Some(octave) => octave.index,
            None => self.runtime_params.first_octave
        }
    }

    fn detect(&mut self) -> Vec<KeyPoint> {
        match &self.octave {
            Some(octave) => {
                let extrema = detect_extrema(octave, &self.runtime_params);
                extrema_refinement(&extrema, octave, &self.runtime_params)
            },
            None => Vec::new()
        }
    }

    fn init_keypoint(&self, x: Float, y: Float, sigma: Float) -> KeyPoint {
        let params = &self.runtime_params;
        let levels = params.levels as Float;
        let phi = ((sigma + Float::EPSILON)/params.sigma_0).log2();

        let octave = ((phi - (params.s_min as Float + 0.5)/levels).floor() as i32)
            .min(params.last_octave())
            .max(params.first_octave);
        let s = levels*(phi - octave as Float);
        let is = ((s + 0.5) as i32)
            .min(params.s_max - 2)
            .max(params.s_min + 1);

        let inter_pixel_distance = SiftRuntimeParams::inter_pixel_distance(octave);

        KeyPoint {
            octave,
            ix: (x/inter_pixel_distance + 0.5) as i32,
            iy: (y/inter_pixel_distance + 0.5) as i32,
            is,
            x,
            y,
            s,
            sigma
        }
    }

    fn keypoint_orientations(&mut self, keypoint: &KeyPoint) -> Vec<Float> {
        let s_max = self.runtime_params.s_max;
        match self.octave.as_mut() {
            Some(octave) => {
                octave.ensure_gradients();
                orientation_histogram::keypoint_orientations(octave, s_max, keypoint)
            },
            None => Vec::new()
        }
    }

    fn keypoint_descriptor(&mut self, keypoint: &KeyPoint, angle: Float) -> [Float; DESCRIPTOR_LENGTH] {
        let runtime_params = &self.runtime_params;
        match self.octave.as_mut() {
            Some(octave) => {
                octave.ensure_gradients();
                LocalImageDescriptor::new(octave, runtime_params, keypoint, angle).bins
            },
            None => LocalImageDescriptor::zeros().bins
        }
    }
}
