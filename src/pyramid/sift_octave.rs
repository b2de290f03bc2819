extern crate nalgebra as na;

use na::DMatrix;
use crate::{Float,float};
use crate::image::Image;
use crate::pyramid::sift_runtime_params::SiftRuntimeParams;

/// Gaussian levels `s_min..=s_max` of one octave together with their differences.
/// Gradients of the levels usable by keypoints are computed on first use.
#[derive(Debug,Clone)]
pub struct SiftOctave {
    pub index: i32,
    pub s_min: i32,
    pub images: Vec<Image>,
    pub difference_of_gaussians: Vec<Image>,
    gradients: Option<Vec<(DMatrix<Float>,DMatrix<Float>)>>
}

impl SiftOctave {

    pub fn build_first_octave(image: &Image, runtime_params: &SiftRuntimeParams) -> Option<SiftOctave> {
        let octave = runtime_params.first_octave;
        let (width,height) = runtime_params.octave_dimensions(octave);
        if runtime_params.octave_count == 0 || width == 0 || height == 0 {
            return None;
        }

        let mut base = match octave {
            o if o < 0 => (1..-o).fold(image.upsample_double(), |acc,_| acc.upsample_double()),
            0 => image.clone(),
            o => image.downsample(o as u32, width, height)
        };

        let sigma_a = runtime_params.level_sigma(runtime_params.s_min as Float);
        let sigma_b = runtime_params.sigma_nominal*(-octave as Float).exp2();
        if sigma_a > sigma_b {
            base = base.gaussian_smooth((sigma_a.powi(2) - sigma_b.powi(2)).sqrt());
        }

        Some(SiftOctave::build_octave(base, octave, runtime_params))
    }

    pub fn build_next_octave(&self, runtime_params: &SiftRuntimeParams) -> Option<SiftOctave> {
        if self.index >= runtime_params.last_octave() {
            return None;
        }

        let octave = self.index + 1;
        let (width,height) = runtime_params.octave_dimensions(octave);
        if width == 0 || height == 0 {
            return None;
        }

        let s_best = (runtime_params.s_min + runtime_params.levels as i32).min(runtime_params.s_max);
        let mut base = self.gaussian(s_best).downsample(1, width, height);

        let sigma_a = runtime_params.level_sigma(runtime_params.s_min as Float);
        let sigma_b = 0.5*runtime_params.level_sigma(s_best as Float);
        if sigma_a > sigma_b {
            base = base.gaussian_smooth((sigma_a.powi(2) - sigma_b.powi(2)).sqrt());
        }

        Some(SiftOctave::build_octave(base, octave, runtime_params))
    }

    fn build_octave(base: Image, index: i32, runtime_params: &SiftRuntimeParams) -> SiftOctave {
        let s_min = runtime_params.s_min;
        let image_count = (runtime_params.s_max - s_min + 1) as usize;
        let mut images: Vec<Image> = Vec::with_capacity(image_count);
        images.push(base);

        for s in s_min+1..=runtime_params.s_max {
            let sigma_delta = runtime_params.d_sigma_0*runtime_params.sigma_k.powi(s);
            let smoothed = images[images.len()-1].gaussian_smooth(sigma_delta);
            images.push(smoothed);
        }

        let difference_of_gaussians = images.windows(2).map(|pair| Image::from_matrix(&pair[1].buffer - &pair[0].buffer)).collect();

        SiftOctave {index, s_min, images, difference_of_gaussians, gradients: None}
    }

    pub fn width(&self) -> usize {
        self.images[0].width()
    }

    pub fn height(&self) -> usize {
        self.images[0].height()
    }

    pub fn gaussian(&self, s: i32) -> &Image {
        &self.images[(s - self.s_min) as usize]
    }

    pub fn dog(&self, s: i32) -> &Image {
        &self.difference_of_gaussians[(s - self.s_min) as usize]
    }

    pub fn dog_value(&self, x: usize, y: usize, s: i32) -> Float {
        self.dog(s).buffer[(y,x)]
    }

    /// Number of levels that carry gradients: `s_min+1..=s_max-2`
    fn gradient_level_count(&self) -> usize {
        self.images.len().saturating_sub(3)
    }

    pub fn ensure_gradients(&mut self) -> () {
        if self.gradients.is_some() {
            return;
        }

        let gradients = (0..self.gradient_level_count()).map(|i| SiftOctave::polar_gradient(&self.images[i+1])).collect();
        self.gradients = Some(gradients);
    }

    /// Gradient magnitude and angle in `[0, 2π)` at level `s`. Requires `ensure_gradients`.
    pub fn gradient(&self, x: usize, y: usize, s: i32) -> (Float,Float) {
        match &self.gradients {
            Some(gradients) => {
                let (magnitude,angle) = &gradients[(s - self.s_min - 1) as usize];
                (magnitude[(y,x)], angle[(y,x)])
            },
            None => (0.0,0.0)
        }
    }

    fn polar_gradient(image: &Image) -> (DMatrix<Float>,DMatrix<Float>) {
        let buffer = &image.buffer;
        let width = image.width();
        let height = image.height();
        let mut magnitude = DMatrix::<Float>::zeros(height,width);
        let mut angle = DMatrix::<Float>::zeros(height,width);

        for x in 0..width {
            for y in 0..height {
                let gx = SiftOctave::difference(x, width, |i| buffer[(y,i)]);
                let gy = SiftOctave::difference(y, height, |i| buffer[(i,x)]);
                magnitude[(y,x)] = (gx*gx + gy*gy).sqrt();
                angle[(y,x)] = gy.atan2(gx).rem_euclid(2.0*float::consts::PI);
            }
        }

        (magnitude,angle)
    }

    // Central difference inside, one sided at the border
    fn difference<F: Fn(usize) -> Float>(i: usize, len: usize, sample: F) -> Float {
        match i {
            _ if len < 2 => 0.0,
            0 => sample(1) - sample(0),
            i if i == len-1 => sample(i) - sample(i-1),
            i => 0.5*(sample(i+1) - sample(i-1))
        }
    }
}
