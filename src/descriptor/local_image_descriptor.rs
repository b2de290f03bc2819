use crate::{float,Float,DESCRIPTOR_LENGTH,ORIENTATION_BINS,SPATIAL_BINS};
use crate::pyramid::{sift_octave::SiftOctave,sift_runtime_params::SiftRuntimeParams};
use crate::descriptor::keypoint::KeyPoint;

/// Entries are clamped to this value between the two normalisations
const SATURATION: Float = 0.2;

/// Histogram of gradient orientations over a 4x4 grid of spatial bins centred on a keypoint.
/// Orientation varies fastest, then the horizontal bin, then the vertical bin.
#[derive(Debug,Clone)]
pub struct LocalImageDescriptor {
    pub bins: [Float; DESCRIPTOR_LENGTH]
}

impl LocalImageDescriptor {

    pub fn zeros() -> LocalImageDescriptor {
        LocalImageDescriptor{bins: [0.0; DESCRIPTOR_LENGTH]}
    }

    pub fn new(octave: &SiftOctave, runtime_params: &SiftRuntimeParams, keypoint: &KeyPoint, angle: Float) -> LocalImageDescriptor {
        let mut descriptor = LocalImageDescriptor::zeros();
        let width = octave.width() as isize;
        let height = octave.height() as isize;
        let (x,y,sigma) = keypoint.octave_coordinates();
        let xi = (x + 0.5) as isize;
        let yi = (y + 0.5) as isize;
        let si = keypoint.is;

        let (st0,ct0) = angle.sin_cos();
        let bin_size = runtime_params.magnification*sigma + Float::EPSILON;
        let half_bins = (SPATIAL_BINS/2) as isize;
        let w = ((2.0 as Float).sqrt()*bin_size*(SPATIAL_BINS as Float + 1.0)/2.0 + 0.5).floor() as isize;
        let window_sigma = runtime_params.window_size;

        if keypoint.octave != octave.index ||
           xi < 0 || xi >= width ||
           yi < 0 || yi >= height-1 ||
           si < octave.s_min+1 || si > runtime_params.s_max-2 {
            return descriptor;
        }

        for dyi in (-w).max(1-yi)..=w.min(height-yi-2) {
            for dxi in (-w).max(1-xi)..=w.min(width-xi-2) {
                let (magnitude,gradient_angle) = octave.gradient((xi + dxi) as usize, (yi + dyi) as usize, si);
                let theta = (gradient_angle - angle).rem_euclid(2.0*float::consts::PI);

                let dx = (xi + dxi) as Float - x;
                let dy = (yi + dyi) as Float - y;

                // Sample position in the rotated frame, in units of spatial bins
                let nx = (ct0*dx + st0*dy)/bin_size;
                let ny = (-st0*dx + ct0*dy)/bin_size;
                let nt = ORIENTATION_BINS as Float*theta/(2.0*float::consts::PI);

                let window = (-(nx*nx + ny*ny)/(2.0*window_sigma*window_sigma)).exp();

                let binx = (nx - 0.5).floor();
                let biny = (ny - 0.5).floor();
                let bint = nt.floor();
                let rbinx = nx - (binx + 0.5);
                let rbiny = ny - (biny + 0.5);
                let rbint = nt - bint;

                let binx = binx as isize;
                let biny = biny as isize;
                let bint = bint as isize;

                for dbinx in 0..2 {
                    for dbiny in 0..2 {
                        for dbint in 0..2 {
                            let bx = binx + dbinx;
                            let by = biny + dbiny;
                            if bx >= -half_bins && bx < half_bins && by >= -half_bins && by < half_bins {
                                let weight = window*magnitude
                                    *(1.0 - dbinx as Float - rbinx).abs()
                                    *(1.0 - dbiny as Float - rbiny).abs()
                                    *(1.0 - dbint as Float - rbint).abs();
                                let t = (bint + dbint).rem_euclid(ORIENTATION_BINS as isize);
                                descriptor.bins[LocalImageDescriptor::index(bx + half_bins, by + half_bins, t)] += weight;
                            }
                        }
                    }
                }
            }
        }

        let norm = descriptor.normalize();
        if runtime_params.norm_threshold > 0.0 && norm < runtime_params.norm_threshold {
            return LocalImageDescriptor::zeros();
        }

        for value in descriptor.bins.iter_mut() {
            *value = value.min(SATURATION);
        }
        descriptor.normalize();

        descriptor
    }

    fn index(binx: isize, biny: isize, bint: isize) -> usize {
        (bint + binx*ORIENTATION_BINS as isize + biny*(SPATIAL_BINS*ORIENTATION_BINS) as isize) as usize
    }

    /// Scales to unit length and returns the norm before scaling
    pub fn normalize(&mut self) -> Float {
        let norm = self.bins.iter().map(|v| v*v).sum::<Float>().sqrt() + Float::EPSILON;
        for value in self.bins.iter_mut() {
            *value /= norm;
        }
        norm
    }
}
