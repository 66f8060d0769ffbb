use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage};
use imageproc::contrast::equalize_histogram;

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Size of the working copy for a `scale` >= 1, never below 1x1.
pub fn working_size(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let shrink = |side: u32| ((side as f64 / scale).round_ties_even() as u32).max(1);
    (shrink(width), shrink(height))
}

/// Shrink to `1/scale` of the linear size with bilinear interpolation
pub fn downscale(img: &GrayImage, scale: f64) -> GrayImage {
    let (width, height) = working_size(img.width(), img.height(), scale);
    if (width, height) == img.dimensions() || img.width() == 0 || img.height() == 0 {
        return img.clone();
    }
    imageops::resize(img, width, height, FilterType::Triangle)
}

/// Spread the histogram over the full intensity range
pub fn equalize(img: &GrayImage) -> GrayImage {
    if img.width() == 0 || img.height() == 0 {
        return img.clone();
    }
    equalize_histogram(img)
}

/// Mirror around the vertical axis
pub fn mirror(img: &GrayImage) -> GrayImage {
    imageops::flip_horizontal(img)
}
