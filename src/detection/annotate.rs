use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;

use crate::models::{AxisBox, BoundingGeometry};

/// Draw `geometry` onto an RGB copy of `source`. The source is left untouched
/// and the result has the same dimensions.
pub fn annotate(
    source: &DynamicImage,
    geometry: &BoundingGeometry,
    color: Rgb<u8>,
    stroke_width: u32,
) -> DynamicImage {
    let mut canvas = source.to_rgb8();
    match geometry {
        BoundingGeometry::Axis(bbox) => draw_box(&mut canvas, bbox, color, stroke_width),
        BoundingGeometry::Oriented(rect) => {
            draw_polygon(&mut canvas, &rect.corners, color, stroke_width)
        }
    }
    DynamicImage::ImageRgb8(canvas)
}

/// Closed polygon, thickened by repeating each edge with a pixel offset.
fn draw_polygon(canvas: &mut RgbImage, corners: &[Point<i32>], color: Rgb<u8>, stroke_width: u32) {
    for i in 0..corners.len() {
        let p1 = corners[i];
        let p2 = corners[(i + 1) % corners.len()];
        for dy in 0..stroke_width {
            for dx in 0..stroke_width {
                let (ox, oy) = (dx as f32, dy as f32);
                draw_line_segment_mut(
                    canvas,
                    (p1.x as f32 + ox, p1.y as f32 + oy),
                    (p2.x as f32 + ox, p2.y as f32 + oy),
                    color,
                );
            }
        }
    }
}

/// Nested hollow rectangles growing outwards from the box edge.
fn draw_box(canvas: &mut RgbImage, bbox: &AxisBox, color: Rgb<u8>, stroke_width: u32) {
    for i in 0..stroke_width {
        let rect = Rect::at(bbox.min_col as i32 - i as i32, bbox.min_row as i32 - i as i32)
            .of_size(bbox.width() + 2 * i, bbox.height() + 2 * i);
        draw_hollow_rect_mut(canvas, rect, color);
    }
}
