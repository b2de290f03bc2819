#![allow(dead_code)]

use std::cell::{Cell,RefCell};
use dsp_sift::{Float,DESCRIPTOR_LENGTH};
use dsp_sift::image::Image;
use dsp_sift::descriptor::keypoint::KeyPoint;
use dsp_sift::pyramid::{ScaleSpaceEngine,OctaveStatus,EngineThresholds,EngineSettings};

thread_local! {
    static DETECTED: RefCell<Vec<Vec<KeyPoint>>> = RefCell::new(Vec::new());
    static DETECT_CALLS: Cell<usize> = Cell::new(0);
    static ORIENTATION_CALLS: Cell<usize> = Cell::new(0);
    static OCTAVE_FROM_ROW: Cell<bool> = Cell::new(false);
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Keypoints the scripted engine reports for each octave, starting at octave 0
pub fn script(octaves: Vec<Vec<KeyPoint>>) {
    DETECTED.with(|d| *d.borrow_mut() = octaves);
    DETECT_CALLS.with(|c| c.set(0));
    ORIENTATION_CALLS.with(|c| c.set(0));
    OCTAVE_FROM_ROW.with(|c| c.set(false));
}

/// Makes `init_keypoint` assign octaves by `floor(x / 100)` instead of by scale
pub fn assign_octave_from_row() {
    OCTAVE_FROM_ROW.with(|c| c.set(true));
}

pub fn detect_calls() -> usize {
    DETECT_CALLS.with(|c| c.get())
}

pub fn orientation_calls() -> usize {
    ORIENTATION_CALLS.with(|c| c.get())
}

/// Keypoint whose `is` field is the number of orientations the scripted engine assigns to it
pub fn keypoint(octave: i32, x: Float, y: Float, sigma: Float, orientation_count: i32) -> KeyPoint {
    KeyPoint{octave, ix: x as i32, iy: y as i32, is: orientation_count, x, y, s: 0.0, sigma}
}

/// Entry `i` of every raw descriptor is `i / 512`, so it reports as the value `i`
pub fn raw_descriptor() -> [Float; DESCRIPTOR_LENGTH] {
    let mut raw = [0.0; DESCRIPTOR_LENGTH];
    for (i,v) in raw.iter_mut().enumerate() {
        *v = i as Float/512.0;
    }
    raw
}

pub struct ScriptedEngine {
    octaves: Vec<Vec<KeyPoint>>,
    octave_count: usize,
    levels: usize,
    current: Option<usize>,
    thresholds: EngineThresholds
}

impl ScaleSpaceEngine for ScriptedEngine {
    fn new(_width: usize, _height: usize, octave_count: Option<usize>, levels: usize, _first_octave: i32) -> ScriptedEngine {
        let octaves = DETECTED.with(|d| d.borrow().clone());
        let octave_count = octave_count.unwrap_or(octaves.len()).min(octaves.len());
        ScriptedEngine{octaves, octave_count, levels, current: None, thresholds: EngineThresholds::default()}
    }

    fn configure(&mut self, thresholds: &EngineThresholds) {
        self.thresholds = *thresholds;
    }

    fn settings(&self) -> EngineSettings {
        EngineSettings {
            octave_count: self.octave_count,
            levels: self.levels,
            first_octave: 0,
            peak_threshold: self.thresholds.peak_threshold.unwrap_or(0.0),
            edge_threshold: self.thresholds.edge_threshold.unwrap_or(10.0),
            norm_threshold: self.thresholds.norm_threshold.unwrap_or(0.0),
            magnification: self.thresholds.magnification.unwrap_or(3.0),
            window_size: self.thresholds.window_size.unwrap_or(2.0)
        }
    }

    fn process_first_octave(&mut self, _image: &Image) -> OctaveStatus {
        match self.octave_count {
            0 => OctaveStatus::Exhausted,
            _ => {
                self.current = Some(0);
                OctaveStatus::Ready
            }
        }
    }

    fn process_next_octave(&mut self) -> OctaveStatus {
        match self.current {
            Some(o) if o + 1 < self.octave_count => {
                self.current = Some(o + 1);
                OctaveStatus::Ready
            },
            _ => OctaveStatus::Exhausted
        }
    }

    fn octave_index(&self) -> i32 {
        self.current.unwrap_or(0) as i32
    }

    fn detect(&mut self) -> Vec<KeyPoint> {
        DETECT_CALLS.with(|c| c.set(c.get() + 1));
        self.current.map(|o| self.octaves[o].clone()).unwrap_or_default()
    }

    fn init_keypoint(&self, x: Float, y: Float, sigma: Float) -> KeyPoint {
        let last = self.octave_count.max(1) as i32 - 1;
        let octave = match OCTAVE_FROM_ROW.with(|c| c.get()) {
            true => (x/100.0).floor() as i32,
            false => sigma.log2().floor() as i32
        };
        keypoint(octave.max(0).min(last), x, y, sigma, 2)
    }

    fn keypoint_orientations(&mut self, keypoint: &KeyPoint) -> Vec<Float> {
        ORIENTATION_CALLS.with(|c| c.set(c.get() + 1));
        (0..keypoint.is.max(0)).map(|q| 0.25*(q + 1) as Float).collect()
    }

    fn keypoint_descriptor(&mut self, _keypoint: &KeyPoint, _angle: Float) -> [Float; DESCRIPTOR_LENGTH] {
        raw_descriptor()
    }
}

pub fn blank_image(width: usize, height: usize) -> Image {
    Image::zeros(width, height)
}

/// Bright gaussian blobs at the given (column, row, sigma) on a dark background
pub fn blob_image(width: usize, height: usize, blobs: &[(Float,Float,Float)]) -> Image {
    let mut image = Image::zeros(width, height);
    for x in 0..width {
        for y in 0..height {
            let mut value = 0.0;
            for &(cx,cy,sigma) in blobs {
                let r2 = (x as Float - cx).powi(2) + (y as Float - cy).powi(2);
                value += 255.0*(-r2/(2.0*sigma*sigma)).exp();
            }
            image.buffer[(y,x)] = value;
        }
    }
    image
}
