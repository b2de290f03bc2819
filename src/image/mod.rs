extern crate image as image_rs;
extern crate nalgebra as na;

use image_rs::{GrayImage,Pixel};
use image_rs::flat::NormalForm;
use na::DMatrix;

use crate::Float;
use crate::error::{Error,Result};
use self::filter::{gauss_kernel::GaussKernel1D,gaussian_2_d_convolution};

pub mod kernel;
pub mod filter;

/// Single channel floating point image. Rows of the buffer are image rows.
#[derive(Debug,Clone,PartialEq)]
pub struct Image {
    pub buffer: DMatrix<Float>
}

impl Image {

    pub fn width(&self) -> usize {
        self.buffer.ncols()
    }

    pub fn height(&self) -> usize {
        self.buffer.nrows()
    }

    pub fn size(&self) -> usize {
        self.buffer.ncols()*self.buffer.nrows()
    }

    pub fn zeros(width: usize, height: usize) -> Image {
        Image{buffer: DMatrix::<Float>::zeros(height,width)}
    }

    pub fn from_matrix(matrix: DMatrix<Float>) -> Image {
        Image{buffer: matrix}
    }

    /// Builds an image from row major samples.
    pub fn from_row_slice(width: usize, height: usize, data: &[Float]) -> Result<Image> {
        if width*height != data.len() || width == 0 || height == 0 {
            return Err(Error::InvalidImage{width, height});
        }
        Ok(Image{buffer: DMatrix::<Float>::from_row_slice(height,width,data)})
    }

    pub fn from_gray_image(image: &GrayImage, normalize: bool) -> Image {
        let mut buffer = Image::image8_to_matrix(image);

        if normalize {
            let max = buffer.amax();
            if max > 0.0 {
                buffer /= max;
            }
        }

        Image{buffer}
    }

    pub fn load(path: &std::path::Path, normalize: bool) -> Result<Image> {
        let gray_image = image_rs::open(path)?.to_luma8();
        Ok(Image::from_gray_image(&gray_image, normalize))
    }

    pub fn transpose(&self) -> Image {
        Image{buffer: self.buffer.transpose()}
    }

    /// Samples every `2^factor_exp`-th pixel into an image of the requested size.
    pub fn downsample(&self, factor_exp: u32, new_width: usize, new_height: usize) -> Image {
        let step = 1usize << factor_exp;
        let mut new_buffer = DMatrix::<Float>::zeros(new_height,new_width);
        for x in 0..new_width {
            for y in 0..new_height {
                new_buffer[(y,x)] = self.buffer[(y*step,x*step)];
            }
        }
        Image{buffer: new_buffer}
    }

    /// Doubles both dimensions with bilinear interpolation. The last row and column are replicated.
    pub fn upsample_double(&self) -> Image {
        let width = self.width();
        let height = self.height();
        let old_buffer = &self.buffer;
        let mut new_buffer = DMatrix::<Float>::zeros(2*height,2*width);

        for x in 0..width {
            let x_next = (x+1).min(width-1);
            for y in 0..height {
                let y_next = (y+1).min(height-1);
                let a = old_buffer[(y,x)];
                let b = old_buffer[(y,x_next)];
                let c = old_buffer[(y_next,x)];
                let d = old_buffer[(y_next,x_next)];

                new_buffer[(2*y,2*x)] = a;
                new_buffer[(2*y,2*x+1)] = 0.5*(a+b);
                new_buffer[(2*y+1,2*x)] = 0.5*(a+c);
                new_buffer[(2*y+1,2*x+1)] = 0.25*(a+b+c+d);
            }
        }

        Image{buffer: new_buffer}
    }

    pub fn gaussian_smooth(&self, sigma: Float) -> Image {
        let kernel = GaussKernel1D::new(0.0, sigma, 1, GaussKernel1D::radius_for(sigma));
        gaussian_2_d_convolution(self, &kernel)
    }

    fn image8_to_matrix(gray_image: &GrayImage) -> DMatrix<Float> {
        debug_assert!(gray_image.sample_layout().is_normal(NormalForm::RowMajorPacked));

        let (width, height) = gray_image.dimensions();
        let size = (width * height) as usize;
        let mut vec_column_major: Vec<Float> = Vec::with_capacity(size);
        for x in 0..width {
            for y in 0..height {
                let pixel_value = gray_image.get_pixel(x, y).channels()[0];
                vec_column_major.push(pixel_value as Float);
            }
        }
        DMatrix::<Float>::from_vec(height as usize, width as usize, vec_column_major)
    }
}
