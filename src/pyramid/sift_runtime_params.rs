use crate::Float;
use crate::pyramid::{EngineThresholds,EngineSettings};

pub const DEFAULT_PEAK_THRESHOLD: Float = 0.0;
pub const DEFAULT_EDGE_THRESHOLD: Float = 10.0;
pub const DEFAULT_NORM_THRESHOLD: Float = 0.0;
pub const DEFAULT_MAGNIFICATION: Float = 3.0;
pub const DEFAULT_WINDOW_SIZE: Float = 2.0;

/// Blur already present in the input image
const SIGMA_NOMINAL: Float = 0.5;
const SIGMA_BASE: Float = 1.6;

#[derive(Debug,Clone,PartialEq)]
pub struct SiftRuntimeParams {
    pub width: usize,
    pub height: usize,
    pub octave_count: usize,
    pub levels: usize,
    pub first_octave: i32,
    pub s_min: i32,
    pub s_max: i32,
    pub sigma_nominal: Float,
    pub sigma_0: Float,
    pub sigma_k: Float,
    pub d_sigma_0: Float,
    pub peak_threshold: Float,
    pub edge_threshold: Float,
    pub norm_threshold: Float,
    pub magnification: Float,
    pub window_size: Float
}

impl SiftRuntimeParams {

    pub fn new(width: usize, height: usize, octave_count: Option<usize>, levels: usize, first_octave: i32) -> SiftRuntimeParams {
        let levels = levels.max(1);
        let octave_count = octave_count.unwrap_or_else(|| SiftRuntimeParams::automatic_octave_count(width, height, first_octave));
        let sigma_k = (1.0/levels as Float).exp2();
        let sigma_0 = SIGMA_BASE*sigma_k;
        let d_sigma_0 = sigma_0*(1.0 - 1.0/(sigma_k*sigma_k)).sqrt();

        SiftRuntimeParams {
            width,
            height,
            octave_count,
            levels,
            first_octave,
            s_min: -1,
            s_max: levels as i32 + 1,
            sigma_nominal: SIGMA_NOMINAL,
            sigma_0,
            sigma_k,
            d_sigma_0,
            peak_threshold: DEFAULT_PEAK_THRESHOLD,
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            norm_threshold: DEFAULT_NORM_THRESHOLD,
            magnification: DEFAULT_MAGNIFICATION,
            window_size: DEFAULT_WINDOW_SIZE
        }
    }

    pub fn automatic_octave_count(width: usize, height: usize, first_octave: i32) -> usize {
        let min_dim = width.min(height).max(1) as Float;
        let count = min_dim.log2().floor() as i64 - first_octave as i64 - 3;
        count.max(1) as usize
    }

    pub fn apply(&mut self, thresholds: &EngineThresholds) -> () {
        if let Some(v) = EngineThresholds::enabled(thresholds.peak_threshold) {
            self.peak_threshold = v;
        }
        if let Some(v) = EngineThresholds::enabled(thresholds.edge_threshold) {
            self.edge_threshold = v;
        }
        if let Some(v) = EngineThresholds::enabled(thresholds.norm_threshold) {
            self.norm_threshold = v;
        }
        if let Some(v) = EngineThresholds::enabled(thresholds.magnification) {
            self.magnification = v;
        }
        if let Some(v) = EngineThresholds::enabled(thresholds.window_size) {
            self.window_size = v;
        }
    }

    pub fn last_octave(&self) -> i32 {
        self.first_octave + self.octave_count as i32 - 1
    }

    /// Distance between two samples of an octave, measured in base image pixels
    pub fn inter_pixel_distance(octave: i32) -> Float {
        (octave as Float).exp2()
    }

    pub fn octave_dimensions(&self, octave: i32) -> (usize,usize) {
        // Out of range shifts give an empty octave
        match octave {
            o if o < 0 => {
                let shift = o.unsigned_abs();
                (self.width.checked_shl(shift).unwrap_or(0), self.height.checked_shl(shift).unwrap_or(0))
            },
            o => (self.width.checked_shr(o as u32).unwrap_or(0), self.height.checked_shr(o as u32).unwrap_or(0))
        }
    }

    /// Gaussian scale of level `s` relative to its own octave
    pub fn level_sigma(&self, s: Float) -> Float {
        self.sigma_0*(s/self.levels as Float).exp2()
    }

    pub fn settings(&self) -> EngineSettings {
        EngineSettings {
            octave_count: self.octave_count,
            levels: self.levels,
            first_octave: self.first_octave,
            peak_threshold: self.peak_threshold,
            edge_threshold: self.edge_threshold,
            norm_threshold: self.norm_threshold,
            magnification: self.magnification,
            window_size: self.window_size
        }
    }
}
