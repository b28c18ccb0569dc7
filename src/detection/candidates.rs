use image::{GrayImage, ImageBuffer, Luma};
use imageproc::contrast::{ThresholdType, threshold};
use imageproc::distance_transform::Norm;
use imageproc::filter::{filter3x3, gaussian_blur_f32};
use imageproc::morphology::{Mask, dilate, erode, grayscale_dilate, grayscale_erode};

use super::gradient::GradientMap;

const FOREGROUND: u8 = 255;

/// Apply Gaussian blur to the saturated gradient
pub fn gaussian_smooth(img: &GrayImage, sigma: f32) -> GrayImage {
    gaussian_blur_f32(img, sigma)
}

/// Pixels strictly above `level` become 255, everything else 0.
pub fn binarize(img: &GrayImage, level: u8) -> GrayImage {
    threshold(img, level, ThresholdType::Binary)
}

/// Morphological closing with a `width` x `height` rectangle centred on the
/// pixel. Both sides must be in `1..=511`.
pub fn close_rect(mask: &GrayImage, width: u32, height: u32) -> GrayImage {
    let element = GrayImage::from_pixel(width, height, Luma([FOREGROUND]));
    let kernel = Mask::from_image(&element, (width / 2) as u8, (height / 2) as u8);
    let dilated = grayscale_dilate(mask, &kernel);
    grayscale_erode(&dilated, &kernel)
}

/// `iterations` erosions with a 3x3 square, then as many dilations.
/// Removes blobs thinner than the erosion reach and restores the rest.
pub fn erode_dilate(mask: &GrayImage, iterations: u8) -> GrayImage {
    if iterations == 0 {
        return mask.clone();
    }
    let eroded = erode(mask, Norm::LInf, iterations);
    dilate(&eroded, Norm::LInf, iterations)
}

/// 3x3 mean filter. Border samples repeat the edge pixel.
pub fn mean_blur_symmetric(map: &GradientMap) -> GradientMap {
    const NINTH: f32 = 1.0 / 9.0;
    filter3x3::<_, f32, f32>(map, &[NINTH; 9])
}

/// Clip to `0..=255` and keep samples strictly above `level`.
pub fn binarize_clipped(map: &GradientMap, level: f32) -> GrayImage {
    ImageBuffer::from_fn(map.width(), map.height(), |x, y| {
        let v = map.get_pixel(x, y)[0].clamp(0.0, 255.0);
        Luma([if v > level { FOREGROUND } else { 0 }])
    })
}

/// Single dilation with a 3x3 square.
pub fn dilate_once(mask: &GrayImage) -> GrayImage {
    dilate(mask, Norm::LInf, 1)
}

/// True when every sample is either 0 or 255.
pub fn is_binary(mask: &GrayImage) -> bool {
    mask.pixels().all(|p| p[0] == 0 || p[0] == FOREGROUND)
}
