use image::{Rgb, RgbImage};

// Writes a synthetic barcode on a light gradient so the CLI has something to
// find: `cargo run -- test_barcode.png --output marked.png`.
fn main() -> anyhow::Result<()> {
    let (width, height) = (640u32, 400u32);
    let mut img = RgbImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let shade = 200 + (x * 40 / width) as u8;
            img.put_pixel(x, y, Rgb([shade, shade, shade]));
        }
    }

    // 2px bars with 2px gaps in a 260x120 patch
    let (left, top) = (190u32, 140u32);
    for x in (left..left + 260).filter(|x| (x - left) % 4 < 2) {
        for y in top..top + 120 {
            img.put_pixel(x, y, Rgb([0, 0, 0]));
        }
    }

    img.save("test_barcode.png")?;
    println!("Created test_barcode.png ({}x{})", width, height);
    Ok(())
}
