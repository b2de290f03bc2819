use serde::{Serialize, Deserialize};
use crate::{float,Float};
use crate::descriptor::keypoint::KeyPoint;

/// Geometry of one emitted descriptor in 1-based image coordinates.
///
/// The scale space runs on the transposed image, so the column comes from the keypoint's `y`
/// and the row from its `x`.
#[derive(Debug,Copy,Clone,PartialEq,Serialize,Deserialize)]
pub struct Frame {
    pub x: Float,
    pub y: Float,
    pub scale: Float,
    pub angle: Float
}

impl Frame {
    pub fn from_keypoint(keypoint: &KeyPoint, orientation: Float) -> Frame {
        Frame {
            x: keypoint.y + 1.0,
            y: keypoint.x + 1.0,
            scale: keypoint.sigma,
            angle: float::consts::FRAC_PI_2 - orientation
        }
    }

    pub fn to_array(&self) -> [Float; 4] {
        [self.x, self.y, self.scale, self.angle]
    }
}
