use std::cmp::Ordering;
use serde::{Serialize, Deserialize};
use crate::Float;

/// Keypoint supplied by the caller in 1-based image coordinates. `angle` is the reported frame angle.
#[derive(Debug,Copy,Clone,PartialEq,Serialize,Deserialize)]
pub struct ExternalKeypoint {
    pub x: Float,
    pub y: Float,
    pub scale: Float,
    pub angle: Float
}

impl ExternalKeypoint {
    pub fn new(x: Float, y: Float, scale: Float, angle: Float) -> ExternalKeypoint {
        ExternalKeypoint{x, y, scale, angle}
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.scale.is_finite() && self.angle.is_finite()
    }
}

/// Orders by ascending scale using the IEEE total order, so NaN scales still sort deterministically.
pub fn scale_order(a: &ExternalKeypoint, b: &ExternalKeypoint) -> Ordering {
    a.scale.total_cmp(&b.scale)
}

pub fn is_sorted_by_scale(keypoints: &[ExternalKeypoint]) -> bool {
    keypoints.windows(2).all(|pair| scale_order(&pair[0], &pair[1]) != Ordering::Greater)
}

/// Private copy of `keypoints` in ascending scale order. The sort is stable.
pub fn sorted_by_scale(keypoints: &[ExternalKeypoint]) -> Vec<ExternalKeypoint> {
    let mut copy = keypoints.to_vec();
    if !is_sorted_by_scale(&copy) {
        log::debug!("sorting {} input keypoints by scale", copy.len());
        copy.sort_by(scale_order);
    }
    copy
}
