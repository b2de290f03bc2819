use crate::image::{Image,kernel::Kernel};

pub mod gauss_kernel;

#[repr(u8)]
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum FilterDirection {
    HORIZONTAL,
    VERTICAL
}

/// Convolves along one axis. Samples outside the image repeat the border pixel.
pub fn filter_1d_convolution(source: &Image, filter_direction: FilterDirection, filter_kernel: &dyn Kernel) -> Image {
    let kernel = filter_kernel.kernel();
    let step = filter_kernel.step();
    let kernel_radius_signed = filter_kernel.radius() as isize;
    let normalizing_constant = filter_kernel.normalizing_constant();

    let buffer = &source.buffer;
    let width = buffer.ncols();
    let height = buffer.nrows();
    let mut target = Image::zeros(width, height);

    for x in 0..width {
        for y in 0..height {
            let mut acc = 0.0;
            for kernel_idx in (-kernel_radius_signed..kernel_radius_signed+1).step_by(step) {
                let sample_value = match filter_direction {
                    FilterDirection::HORIZONTAL => {
                        let sample_idx = ((x as isize) + kernel_idx).clamp(0, width as isize - 1);
                        buffer[(y,sample_idx as usize)]
                    },
                    FilterDirection::VERTICAL => {
                        let sample_idx = ((y as isize) + kernel_idx).clamp(0, height as isize - 1);
                        buffer[(sample_idx as usize,x)]
                    }
                };
                acc += sample_value*kernel[(kernel_idx + kernel_radius_signed) as usize];
            }
            target.buffer[(y,x)] = acc/normalizing_constant;
        }
    }

    target
}

pub fn gaussian_2_d_convolution(source: &Image, filter_kernel: &dyn Kernel) -> Image {
    let horizontal = filter_1d_convolution(source, FilterDirection::HORIZONTAL, filter_kernel);
    filter_1d_convolution(&horizontal, FilterDirection::VERTICAL, filter_kernel)
}
