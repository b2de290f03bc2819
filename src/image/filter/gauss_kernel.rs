use crate::{Float,float::consts::PI};
use crate::image::kernel::Kernel;

/// Truncation of the gaussian tails, in standard deviations
const TRUNCATION: Float = 4.0;

pub struct GaussKernel1D {
    kernel: Vec<Float>,
    step: usize,
    normalizing_constant: Float
}

impl GaussKernel1D {
    fn sample(mean: Float, std: Float, x:Float) -> Float {
        let exponent = (-0.5*((x-mean)/std).powi(2)).exp();
        let factor = 1.0/(std*(2.0*PI).sqrt());
        factor*exponent
    }

    pub fn radius_for(std: Float) -> usize {
        (TRUNCATION*std).ceil().max(1.0) as usize
    }

    pub fn new(mean: Float, std: Float, step: usize, radius: usize) -> GaussKernel1D {
        assert_eq!(radius%step,0);

        let start = -(radius as isize);
        let end_exclusive = (radius as isize) + 1;
        let kernel: Vec<Float> = (start..end_exclusive).step_by(step).map(|x| GaussKernel1D::sample(mean,std,x as Float)).collect();
        // Taps are truncated, so renormalise to keep flat regions flat
        let normalizing_constant = kernel.iter().sum();
        GaussKernel1D {kernel, step, normalizing_constant}
    }
}

impl Kernel for GaussKernel1D {
    fn kernel(&self) -> &Vec<Float> {
        &self.kernel
    }

    fn step(&self) -> usize {
        self.step
    }

    fn normalizing_constant(&self) -> Float{
        self.normalizing_constant
    }
}
