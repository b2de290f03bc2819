pub mod error;
pub mod image;
pub mod pyramid;
pub mod extrema;
pub mod descriptor;
pub mod extraction;
pub mod matching;

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

define_float!(f64);

/// Number of orientation bins per spatial histogram
pub const ORIENTATION_BINS: usize = 8;
/// Number of spatial bins along one side of the descriptor window
pub const SPATIAL_BINS: usize = 4;
pub const DESCRIPTOR_LENGTH: usize = SPATIAL_BINS*SPATIAL_BINS*ORIENTATION_BINS;
/// Descriptors are reported scaled by this factor, both as floats and as bytes
pub const DESCRIPTOR_SCALE: Float = 512.0;

pub use self::error::{Error,Result};
pub use self::extraction::{extract,extract_with,ExtractionResult,frame::Frame,options::ExtractionOptions,external_keypoint::ExternalKeypoint};
pub use self::descriptor::feature_vector::{DescriptorMode,Descriptors};
pub use self::matching::{match_descriptors,par_match_descriptors,Match};
