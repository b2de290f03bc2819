use crate::Float;

/// A scale space keypoint.
///
/// `x`, `y` and `sigma` are expressed in base image pixels, `s` is the fractional level within
/// the octave. `ix`, `iy` and `is` are the closest integer sample of the octave.
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct KeyPoint {
    pub octave: i32,
    pub ix: i32,
    pub iy: i32,
    pub is: i32,
    pub x: Float,
    pub y: Float,
    pub s: Float,
    pub sigma: Float
}

impl KeyPoint {
    /// Position and scale measured in samples of the keypoint's own octave
    pub fn octave_coordinates(&self) -> (Float,Float,Float) {
        let inter_pixel_distance = (self.octave as Float).exp2();
        (self.x/inter_pixel_distance, self.y/inter_pixel_distance, self.sigma/inter_pixel_distance)
    }
}
