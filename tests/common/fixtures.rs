use barscan::AxisBox;
use image::{DynamicImage, Luma, Rgb, RgbImage};
use tempfile::NamedTempFile;

/// A flat image with every pixel set to `value`.
pub fn uniform_image(width: u32, height: u32, value: u8) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([value; 3])))
}

/// A solid black rectangle on white. `x`/`y` is the top-left corner.
pub fn black_block(width: u32, height: u32, x: u32, y: u32, w: u32, h: u32) -> DynamicImage {
    let img = image::GrayImage::from_fn(width, height, |px, py| {
        if px >= x && px < x + w && py >= y && py < y + h {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    });
    DynamicImage::ImageLuma8(img)
}

/// Placement of the synthetic barcode drawn by [`barcode_image`].
pub const BARCODE_X: u32 = 50;
pub const BARCODE_Y: u32 = 40;
pub const BARCODE_W: u32 = 100;
pub const BARCODE_H: u32 = 40;

/// 200x120 white image with a patch of 2px black bars and 2px gaps.
pub fn barcode_image() -> DynamicImage {
    let img = RgbImage::from_fn(200, 120, |x, y| {
        let inside = x >= BARCODE_X
            && x < BARCODE_X + BARCODE_W
            && y >= BARCODE_Y
            && y < BARCODE_Y + BARCODE_H;
        if inside && ((x - BARCODE_X) / 2) % 2 == 0 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    });
    DynamicImage::ImageRgb8(img)
}

/// Extent of the black bars in [`barcode_image`] (the last two columns of
/// the patch are a gap).
pub fn barcode_extent() -> AxisBox {
    AxisBox {
        min_row: BARCODE_Y,
        min_col: BARCODE_X,
        max_row: BARCODE_Y + BARCODE_H - 1,
        max_col: BARCODE_X + BARCODE_W - 3,
    }
}

/// Every edge of `actual` lies within `tolerance` pixels of `expected`.
pub fn assert_extent_near(actual: AxisBox, expected: AxisBox, tolerance: u32) {
    let pairs = [
        ("min_row", actual.min_row, expected.min_row),
        ("min_col", actual.min_col, expected.min_col),
        ("max_row", actual.max_row, expected.max_row),
        ("max_col", actual.max_col, expected.max_col),
    ];
    for (name, a, e) in pairs {
        assert!(
            a.abs_diff(e) <= tolerance,
            "{name}: got {a}, expected {e} ± {tolerance} (actual {actual:?})"
        );
    }
}

/// Write `img` as a PNG temp file.
/// The file will be automatically cleaned up when dropped.
pub fn write_temp_png(img: &DynamicImage) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}
