pub mod keypoint;
pub mod orientation_histogram;
pub mod local_image_descriptor;
pub mod transpose;
pub mod feature_vector;
