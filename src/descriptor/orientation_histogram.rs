use crate::{float,Float};
use crate::pyramid::{MAX_ORIENTATIONS,sift_octave::SiftOctave};
use crate::descriptor::keypoint::KeyPoint;

const ORIENTATION_HISTOGRAM_BINS: usize = 36;
/// Orientation window sigma relative to the keypoint scale
const WINDOW_FACTOR: Float = 1.5;
const SMOOTHING_PASSES: usize = 6;
const PEAK_RATIO: Float = 0.8;

#[derive(Debug,Clone)]
pub struct OrientationHistogram {
    pub bin_range: Float,
    pub bins: Vec<Float>
}

impl OrientationHistogram {

    pub fn new(bin_len: usize) -> OrientationHistogram {
        OrientationHistogram{
            bin_range: 2.0*float::consts::PI/(bin_len as Float),
            bins: vec![0.0;bin_len]
        }
    }

    /// Splits the vote linearly between the two bins whose centres enclose `orientation`.
    pub fn add_measurement_interpolated(&mut self, orientation: Float, value: Float) -> () {
        let len = self.bins.len() as isize;
        let fbin = orientation/self.bin_range;
        let bin = (fbin - 0.5).floor();
        let rbin = fbin - bin - 0.5;
        let bin = bin as isize;

        self.bins[bin.rem_euclid(len) as usize] += (1.0 - rbin)*value;
        self.bins[(bin + 1).rem_euclid(len) as usize] += rbin*value;
    }

    /// Circular three tap box filter
    pub fn smooth(&mut self) -> () {
        let len = self.bins.len();
        let first = self.bins[0];
        let mut prev = self.bins[len-1];
        for i in 0..len-1 {
            let new_value = (prev + self.bins[i] + self.bins[i+1])/3.0;
            prev = self.bins[i];
            self.bins[i] = new_value;
        }
        self.bins[len-1] = (prev + self.bins[len-1] + first)/3.0;
    }

    pub fn max(&self) -> Float {
        self.bins.iter().cloned().fold(0.0, Float::max)
    }

    /// Angles of the local maxima above `ratio` times the global maximum, refined by a parabola fit.
    pub fn peak_orientations(&self, ratio: Float, max_peaks: usize) -> Vec<Float> {
        let len = self.bins.len();
        let threshold = ratio*self.max();
        let mut orientations = Vec::with_capacity(max_peaks);

        for i in 0..len {
            let (l,c,r) = get_adjacent_circular_by_index(self, i);
            let h0 = self.bins[c];
            let hm = self.bins[l];
            let hp = self.bins[r];

            if h0 > threshold && h0 > hm && h0 > hp {
                let di = -0.5*(hp - hm)/(hp + hm - 2.0*h0);
                orientations.push(self.bin_range*(i as Float + di + 0.5));
                if orientations.len() == max_peaks {
                    break;
                }
            }
        }

        orientations
    }
}

fn get_adjacent_circular_by_index(histogram: &OrientationHistogram, bin_idx: usize) -> (usize,usize,usize) {
    let bin_len = histogram.bins.len();
    assert!(bin_len >=3);

    let l = match bin_idx {
        0 => bin_len-1,
        idx => idx-1
    };

    let r = match bin_idx + 1 {
        idx if idx == bin_len => 0,
        idx => idx
    };

    (l, bin_idx, r)
}

/// Dominant gradient orientations around a keypoint of the current octave
pub fn keypoint_orientations(octave: &SiftOctave, s_max: i32, keypoint: &KeyPoint) -> Vec<Float> {
    let width = octave.width() as isize;
    let height = octave.height() as isize;
    let (x,y,sigma) = keypoint.octave_coordinates();
    let xi = (x + 0.5) as isize;
    let yi = (y + 0.5) as isize;
    let si = keypoint.is;
    let sigma_w = WINDOW_FACTOR*sigma;
    let w = (3.0*sigma_w).floor() as isize;

    if keypoint.octave != octave.index ||
       xi < 0 || xi > width-1 ||
       yi < 0 || yi > height-1 ||
       si < octave.s_min+1 || si > s_max-2 {
        return Vec::new();
    }

    let mut histogram = OrientationHistogram::new(ORIENTATION_HISTOGRAM_BINS);

    for ys in (-w).max(-yi)..=w.min(height-1-yi) {
        for xs in (-w).max(-xi)..=w.min(width-1-xi) {
            let dx = (xi + xs) as Float - x;
            let dy = (yi + ys) as Float - y;
            let r2 = dx*dx + dy*dy;

            if r2 >= (w as Float).powi(2) + 0.6 {
                continue;
            }

            let weight = (-r2/(2.0*sigma_w*sigma_w)).exp();
            let (magnitude,angle) = octave.gradient((xi + xs) as usize, (yi + ys) as usize, si);
            histogram.add_measurement_interpolated(angle, magnitude*weight);
        }
    }

    for _ in 0..SMOOTHING_PASSES {
        histogram.smooth();
    }

    histogram.peak_orientations(PEAK_RATIO, MAX_ORIENTATIONS)
}
