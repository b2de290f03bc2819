extern crate nalgebra as na;

use na::{Matrix3,Vector3};
use crate::Float;
use crate::descriptor::keypoint::KeyPoint;
use crate::pyramid::{sift_octave::SiftOctave,sift_runtime_params::SiftRuntimeParams};

mod hessian;

const MAX_REFINEMENT_ITERATIONS: usize = 5;
/// Offsets beyond this move the sample to the neighbouring pixel
const STEP_THRESHOLD: Float = 0.6;
const MAX_OFFSET: Float = 1.5;
const PEAK_PREFILTER: Float = 0.8;

#[derive(Debug,Copy,Clone,PartialEq)]
pub struct ExtremaParameters {
    pub x: usize,
    pub y: usize,
    pub s: i32
}

/// Strict local extrema of the difference of gaussians over the 26 neighbours in space and scale
pub fn detect_extrema(source_octave: &SiftOctave, runtime_params: &SiftRuntimeParams) -> Vec<ExtremaParameters> {
    let mut extrema_vec: Vec<ExtremaParameters> = Vec::new();
    let width = source_octave.width();
    let height = source_octave.height();
    let threshold = PEAK_PREFILTER*runtime_params.peak_threshold;

    if width < 3 || height < 3 {
        return extrema_vec;
    }

    for s in source_octave.s_min+1..=runtime_params.s_max-2 {
        for x in 1..width-1 {
            for y in 1..height-1 {
                let sample_value = source_octave.dog_value(x, y, s);

                let is_extrema =
                    (sample_value >= threshold && is_sample_extrema_in_neighbourhood(source_octave, sample_value, x, y, s, |v, n| v > n)) ||
                    (sample_value <= -threshold && is_sample_extrema_in_neighbourhood(source_octave, sample_value, x, y, s, |v, n| v < n));

                if is_extrema {
                    extrema_vec.push(ExtremaParameters{x, y, s});
                }
            }
        }
    }

    extrema_vec
}

fn is_sample_extrema_in_neighbourhood<F: Fn(Float,Float) -> bool>(source_octave: &SiftOctave, sample: Float, x_sample: usize, y_sample: usize, s_sample: i32, compare: F) -> bool {
    for s in s_sample-1..=s_sample+1 {
        let buffer = &source_octave.dog(s).buffer;
        for x in x_sample-1..x_sample+2 {
            for y in y_sample-1..y_sample+2 {
                if x == x_sample && y == y_sample && s == s_sample {
                    continue;
                }
                if !compare(sample, buffer[(y,x)]) {
                    return false;
                }
            }
        }
    }

    true
}

/// Fits a quadratic around each extremum and keeps the stable, well contrasted, non edge-like ones
pub fn extrema_refinement(extrema: &[ExtremaParameters], source_octave: &SiftOctave, runtime_params: &SiftRuntimeParams) -> Vec<KeyPoint> {
    extrema.iter().filter_map(|extremum| subpixel_refinement(extremum, source_octave, runtime_params)).collect()
}

pub fn subpixel_refinement(extremum: &ExtremaParameters, source_octave: &SiftOctave, runtime_params: &SiftRuntimeParams) -> Option<KeyPoint> {
    let width = source_octave.width();
    let height = source_octave.height();
    let s = extremum.s;
    let mut x = extremum.x;
    let mut y = extremum.y;

    let mut gradient = Vector3::<Float>::zeros();
    let mut dog_hessian = Matrix3::<Float>::zeros();
    let mut offset = Vector3::<Float>::zeros();
    let mut step: (isize,isize) = (0,0);

    for _ in 0..MAX_REFINEMENT_ITERATIONS {
        x = (x as isize + step.0) as usize;
        y = (y as isize + step.1) as usize;

        let (g,h) = hessian::new(source_octave, x, y, s);
        gradient = g;
        dog_hessian = h;
        offset = dog_hessian.lu().solve(&(-gradient)).unwrap_or_else(Vector3::zeros);

        let step_x = match offset[0] {
            b if b > STEP_THRESHOLD && x < width-2 => 1,
            b if b < -STEP_THRESHOLD && x > 1 => -1,
            _ => 0
        };
        let step_y = match offset[1] {
            b if b > STEP_THRESHOLD && y < height-2 => 1,
            b if b < -STEP_THRESHOLD && y > 1 => -1,
            _ => 0
        };
        step = (step_x,step_y);

        if step == (0,0) {
            break;
        }
    }

    let value = source_octave.dog_value(x, y, s) + 0.5*gradient.dot(&offset);
    let score = hessian::edge_score(&dog_hessian);

    let xn = x as Float + offset[0];
    let yn = y as Float + offset[1];
    let sn = s as Float + offset[2];

    let good = value.abs() > runtime_params.peak_threshold &&
        hessian::accept_edge_response(score, runtime_params.edge_threshold) &&
        offset.iter().all(|b| b.abs() < MAX_OFFSET) &&
        xn >= 0.0 && xn <= (width-1) as Float &&
        yn >= 0.0 && yn <= (height-1) as Float &&
        sn >= runtime_params.s_min as Float && sn <= runtime_params.s_max as Float;

    match good {
        true => {
            let inter_pixel_distance = SiftRuntimeParams::inter_pixel_distance(source_octave.index);
            Some(KeyPoint {
                octave: source_octave.index,
                ix: x as i32,
                iy: y as i32,
                is: s,
                x: xn*inter_pixel_distance,
                y: yn*inter_pixel_distance,
                s: sn,
                sigma: runtime_params.level_sigma(sn)*inter_pixel_distance
            })
        },
        false => None
    }
}
