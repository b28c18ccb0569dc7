use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use imageproc::filter::filter3x3;
use imageproc::gradients::{horizontal_scharr, vertical_scharr};

/// Per-pixel gradient magnitudes, same size as the grayscale source.
pub type GradientMap = ImageBuffer<Luma<f32>, Vec<f32>>;

#[rustfmt::skip]
const SOBEL_X: [f32; 9] = [
    -1.0, 0.0, 1.0,
    -2.0, 0.0, 2.0,
    -1.0, 0.0, 1.0,
];
#[rustfmt::skip]
const SOBEL_Y: [f32; 9] = [
    -1.0, -2.0, -1.0,
     0.0,  0.0,  0.0,
     1.0,  2.0,  1.0,
];

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// `|gx - gy|` from Scharr derivatives, saturated to the 8-bit range.
///
/// Dense vertical bars give a strong horizontal derivative and almost no
/// vertical one, so the difference stays high on barcodes and cancels on
/// isotropic texture.
pub fn scharr_difference(gray: &GrayImage) -> GradientMap {
    let gx = horizontal_scharr(gray);
    let gy = vertical_scharr(gray);

    ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        let d = gx.get_pixel(x, y)[0] as f32 - gy.get_pixel(x, y)[0] as f32;
        Luma([d.abs().min(255.0)])
    })
}

/// Euclidean Sobel magnitude `sqrt(gx² + gy²)`. Border samples repeat the
/// edge pixel.
pub fn sobel_magnitude(gray: &GrayImage) -> GradientMap {
    let gx: GradientMap = filter3x3::<_, f32, f32>(gray, &SOBEL_X);
    let gy: GradientMap = filter3x3::<_, f32, f32>(gray, &SOBEL_Y);

    ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        let a = gx.get_pixel(x, y)[0];
        let b = gy.get_pixel(x, y)[0];
        Luma([(a * a + b * b).sqrt()])
    })
}

/// Round and clamp each magnitude into a `GrayImage`.
pub fn to_gray_saturated(map: &GradientMap) -> GrayImage {
    ImageBuffer::from_fn(map.width(), map.height(), |x, y| {
        Luma([map.get_pixel(x, y)[0].round().clamp(0.0, 255.0) as u8])
    })
}

/// Scale the map so its maximum lands on 255. Used for debug output.
pub fn to_gray_normalized(map: &GradientMap) -> GrayImage {
    let max = map.pixels().map(|p| p[0]).fold(0.0f32, f32::max);
    if max <= 0.0 {
        return GrayImage::new(map.width(), map.height());
    }
    ImageBuffer::from_fn(map.width(), map.height(), |x, y| {
        Luma([(map.get_pixel(x, y)[0] / max * 255.0).round() as u8])
    })
}
