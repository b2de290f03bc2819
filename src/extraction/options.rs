use std::{fmt,fs,path::Path};
use serde::{Serialize, Deserialize};
use crate::Float;
use crate::error::{Error,Result};
use crate::pyramid::EngineThresholds;
use crate::descriptor::feature_vector::DescriptorMode;
use crate::extraction::external_keypoint::ExternalKeypoint;

/// Upsampling further than this is rejected
pub const MIN_FIRST_OCTAVE: i32 = -3;

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct ExtractionOptions {
    /// `None` picks the number of octaves from the image size
    pub octave_count: Option<usize>,
    pub levels: usize,
    /// Negative values upsample the image before the first octave
    pub first_octave: i32,
    pub edge_threshold: Option<Float>,
    pub peak_threshold: Option<Float>,
    pub norm_threshold: Option<Float>,
    pub magnification: Option<Float>,
    pub window_size: Option<Float>,
    /// Skips detection and describes these keypoints instead
    pub external_keypoints: Option<Vec<ExternalKeypoint>>,
    /// Recomputes orientations of external keypoints instead of using their angle
    pub force_orientations: bool,
    pub descriptor_mode: DescriptorMode,
    pub verbose: u8
}

impl Default for ExtractionOptions {
    fn default() -> ExtractionOptions {
        ExtractionOptions {
            octave_count: None,
            levels: 3,
            first_octave: 0,
            edge_threshold: None,
            peak_threshold: None,
            norm_threshold: None,
            magnification: None,
            window_size: None,
            external_keypoints: None,
            force_orientations: false,
            descriptor_mode: DescriptorMode::Quantized,
            verbose: 0
        }
    }
}

impl ExtractionOptions {

    pub fn from_yaml_str(yaml: &str) -> Result<ExtractionOptions> {
        let options: ExtractionOptions = serde_yaml::from_str(yaml)?;
        options.validate()?;
        Ok(options)
    }

    pub fn load(path: &Path) -> Result<ExtractionOptions> {
        let yaml = fs::read_to_string(path)?;
        ExtractionOptions::from_yaml_str(&yaml)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.levels == 0 {
            return Err(Error::InvalidOptions("levels must be at least 1".to_string()));
        }
        if self.octave_count == Some(0) {
            return Err(Error::InvalidOptions("octave_count must be at least 1".to_string()));
        }
        if self.first_octave < MIN_FIRST_OCTAVE {
            return Err(Error::InvalidOptions(format!("first_octave must be at least {}", MIN_FIRST_OCTAVE)));
        }
        if let Some(index) = self.external_keypoints.as_ref().and_then(|keypoints| keypoints.iter().position(|k| !k.is_finite())) {
            return Err(Error::InvalidOptions(format!("external keypoint {} is not finite", index)));
        }
        Ok(())
    }

    pub fn thresholds(&self) -> EngineThresholds {
        EngineThresholds {
            peak_threshold: self.peak_threshold,
            edge_threshold: self.edge_threshold,
            norm_threshold: self.norm_threshold,
            magnification: self.magnification,
            window_size: self.window_size
        }
    }

    pub fn with_external_keypoints(mut self, keypoints: Vec<ExternalKeypoint>) -> ExtractionOptions {
        self.external_keypoints = Some(keypoints);
        self
    }

    pub fn with_descriptor_mode(mut self, mode: DescriptorMode) -> ExtractionOptions {
        self.descriptor_mode = mode;
        self
    }
}

impl fmt::Display for ExtractionOptions {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let octaves = match self.octave_count {
            Some(count) => count.to_string(),
            None => String::from("auto")
        };
        let mut display = format!("o_{}_s_{}_o_min_{}_{:?}", octaves, self.levels, self.first_octave, self.descriptor_mode);
        let thresholds = [("e",self.edge_threshold),("p",self.peak_threshold),("n",self.norm_threshold),("m",self.magnification),("w",self.window_size)];
        for (name,value) in thresholds.iter() {
            if let Some(v) = EngineThresholds::enabled(*value) {
                display.push_str(format!("_{}_{}", name, v).as_str());
            }
        }
        if let Some(keypoints) = &self.external_keypoints {
            display.push_str(format!("_keys_{}", keypoints.len()).as_str());
        }
        if self.force_orientations {
            display.push_str("_forced");
        }
        write!(f, "{}", display)
    }
}
