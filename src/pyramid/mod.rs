use std::fmt;
use crate::{Float,DESCRIPTOR_LENGTH};
use crate::image::Image;
use crate::descriptor::keypoint::KeyPoint;

pub mod sift_runtime_params;
pub mod sift_octave;
pub mod sift_scale_space;

/// At most this many orientations are assigned to a single keypoint
pub const MAX_ORIENTATIONS: usize = 4;

#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum OctaveStatus {
    Ready,
    /// The pyramid has no further octave. This is the normal end of a traversal.
    Exhausted
}

/// Optional overrides of the engine defaults. `None` or a negative value keeps the default.
#[derive(Debug,Copy,Clone,PartialEq,Default)]
pub struct EngineThresholds {
    pub peak_threshold: Option<Float>,
    pub edge_threshold: Option<Float>,
    pub norm_threshold: Option<Float>,
    pub magnification: Option<Float>,
    pub window_size: Option<Float>
}

impl EngineThresholds {
    pub fn enabled(value: Option<Float>) -> Option<Float> {
        value.filter(|&v| v >= 0.0)
    }
}

/// Effective configuration of an engine, reported for diagnostics
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct EngineSettings {
    pub octave_count: usize,
    pub levels: usize,
    pub first_octave: i32,
    pub peak_threshold: Float,
    pub edge_threshold: Float,
    pub norm_threshold: Float,
    pub magnification: Float,
    pub window_size: Float
}

impl fmt::Display for EngineSettings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "octaves: {}, levels: {}, first octave: {}, edge thresh: {}, peak thresh: {}, norm thresh: {}, magnif: {}, window size: {}",
            self.octave_count, self.levels, self.first_octave, self.edge_threshold, self.peak_threshold, self.norm_threshold, self.magnification, self.window_size)
    }
}

/// A stateful scale space walked one octave at a time.
///
/// Keypoints, orientations and descriptors always refer to the octave most recently
/// produced by `process_first_octave` or `process_next_octave`.
pub trait ScaleSpaceEngine {
    /// `octave_count` of `None` lets the engine pick as many octaves as the image supports.
    fn new(width: usize, height: usize, octave_count: Option<usize>, levels: usize, first_octave: i32) -> Self where Self: Sized;
    fn configure(&mut self, thresholds: &EngineThresholds);
    fn settings(&self) -> EngineSettings;
    fn process_first_octave(&mut self, image: &Image) -> OctaveStatus;
    fn process_next_octave(&mut self) -> OctaveStatus;
    fn octave_index(&self) -> i32;
    fn detect(&mut self) -> Vec<KeyPoint>;
    /// Builds a keypoint from a position and scale in base image coordinates and assigns its octave.
    fn init_keypoint(&self, x: Float, y: Float, sigma: Float) -> KeyPoint;
    /// Returns between zero and `MAX_ORIENTATIONS` angles.
    fn keypoint_orientations(&mut self, keypoint: &KeyPoint) -> Vec<Float>;
    fn keypoint_descriptor(&mut self, keypoint: &KeyPoint, angle: Float) -> [Float; DESCRIPTOR_LENGTH];
}

/// Walks the octaves of an engine. The first step builds the first octave from the image.
pub struct OctaveCursor<'a, E: ScaleSpaceEngine> {
    engine: &'a mut E,
    image: &'a Image,
    first: bool
}

impl<'a, E: ScaleSpaceEngine> OctaveCursor<'a, E> {
    pub fn new(engine: &'a mut E, image: &'a Image) -> OctaveCursor<'a, E> {
        OctaveCursor{engine, image, first: true}
    }

    /// Moves to the next octave and returns its index, or `None` at the end of the pyramid.
    pub fn advance(&mut self) -> Option<i32> {
        let status = match self.first {
            true => {
                self.first = false;
                self.engine.process_first_octave(self.image)
            },
            false => self.engine.process_next_octave()
        };

        match status {
            OctaveStatus::Ready => Some(self.engine.octave_index()),
            OctaveStatus::Exhausted => None
        }
    }

    pub fn engine(&mut self) -> &mut E {
        self.engine
    }
}
