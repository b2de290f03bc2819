extern crate nalgebra as na;

use na::{Matrix3,Vector3};
use crate::Float;
use crate::pyramid::sift_octave::SiftOctave;

/// Gradient and hessian of the difference of gaussians at an interior sample, by central differences
pub fn new(source_octave: &SiftOctave, x: usize, y: usize, s: i32) -> (Vector3<Float>,Matrix3<Float>) {
    let at = |dx: isize, dy: isize, ds: i32| source_octave.dog_value((x as isize + dx) as usize, (y as isize + dy) as usize, s + ds);

    let center = at(0,0,0);

    let dx = 0.5*(at(1,0,0) - at(-1,0,0));
    let dy = 0.5*(at(0,1,0) - at(0,-1,0));
    let ds = 0.5*(at(0,0,1) - at(0,0,-1));

    let dxx = at(1,0,0) + at(-1,0,0) - 2.0*center;
    let dyy = at(0,1,0) + at(0,-1,0) - 2.0*center;
    let dss = at(0,0,1) + at(0,0,-1) - 2.0*center;

    let dxy = 0.25*(at(1,1,0) + at(-1,-1,0) - at(-1,1,0) - at(1,-1,0));
    let dxs = 0.25*(at(1,0,1) + at(-1,0,-1) - at(-1,0,1) - at(1,0,-1));
    let dys = 0.25*(at(0,1,1) + at(0,-1,-1) - at(0,-1,1) - at(0,1,-1));

    let gradient = Vector3::new(dx,dy,ds);
    let hessian = Matrix3::new(dxx,dxy,dxs,
                               dxy,dyy,dys,
                               dxs,dys,dss);

    (gradient,hessian)
}

/// Ratio of the squared trace to the determinant of the spatial part of the hessian
pub fn edge_score(hessian: &Matrix3<Float>) -> Float {
    let dxx = hessian[(0,0)];
    let dyy = hessian[(1,1)];
    let dxy = hessian[(0,1)];
    (dxx + dyy).powi(2)/(dxx*dyy - dxy*dxy)
}

/// Accepts curvature ratios below `(r+1)^2/r`. Saddle points have a negative score and are rejected.
pub fn accept_edge_response(score: Float, r: Float) -> bool {
    score >= 0.0 && score < (r + 1.0).powi(2)/r
}
