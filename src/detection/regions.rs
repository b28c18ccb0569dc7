use std::collections::{BTreeMap, HashMap};

use image::{GrayImage, Luma};
use imageproc::geometry::min_area_rect;
use imageproc::point::Point;
use imageproc::region_labelling::{Connectivity, connected_components};

use crate::models::{OrientedRect, Region};

struct Accumulator {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    count: u32,
    // row -> (leftmost x, rightmost x)
    rows: BTreeMap<u32, (u32, u32)>,
}

impl Accumulator {
    fn new(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
            count: 0,
            rows: BTreeMap::new(),
        }
    }

    fn add(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.count += 1;
        self.rows
            .entry(y)
            .and_modify(|(lo, hi)| {
                *lo = (*lo).min(x);
                *hi = (*hi).max(x);
            })
            .or_insert((x, x));
    }

    fn into_region(self, label: u32) -> Region {
        let mut outline = Vec::with_capacity(self.rows.len() * 2);
        for (y, (lo, hi)) in self.rows {
            outline.push(Point::new(lo as i32, y as i32));
            if hi != lo {
                outline.push(Point::new(hi as i32, y as i32));
            }
        }
        Region {
            label,
            min_x: self.min_x,
            min_y: self.min_y,
            max_x: self.max_x,
            max_y: self.max_y,
            pixel_count: self.count,
            outline,
        }
    }
}

/// Label connected foreground components of a binary mask, ordered by label.
pub fn label_regions(mask: &GrayImage, connectivity: Connectivity) -> Vec<Region> {
    let labeled = connected_components(mask, connectivity, Luma([0u8]));

    let mut regions: HashMap<u32, Accumulator> = HashMap::new();
    for (x, y, label) in labeled.enumerate_pixels() {
        let label = label[0];
        if label == 0 {
            continue; // background
        }
        regions
            .entry(label)
            .or_insert_with(|| Accumulator::new(x, y))
            .add(x, y);
    }

    let mut regions: Vec<Region> = regions
        .into_iter()
        .map(|(label, acc)| acc.into_region(label))
        .collect();
    regions.sort_by_key(|r| r.label);
    regions
}

/// Largest region by pixel count. Ties go to the region whose bounding box
/// starts highest, then leftmost, then to the lower label.
pub fn select_largest(regions: Vec<Region>) -> Option<Region> {
    regions.into_iter().min_by(|a, b| {
        b.pixel_count
            .cmp(&a.pixel_count)
            .then(a.min_y.cmp(&b.min_y))
            .then(a.min_x.cmp(&b.min_x))
            .then(a.label.cmp(&b.label))
    })
}

/// Minimum-area rotated rectangle around the region.
pub fn oriented_rect(region: &Region) -> OrientedRect {
    OrientedRect::from_corners(min_area_rect(&region.outline))
}

pub fn connectivity(eight_connected: bool) -> Connectivity {
    if eight_connected {
        Connectivity::Eight
    } else {
        Connectivity::Four
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AxisBox;

    fn paint(mask: &mut GrayImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) {
        for y in ys {
            for x in xs.clone() {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
    }

    #[test]
    fn empty_mask_has_no_regions() {
        let mask = GrayImage::new(10, 10);
        assert!(label_regions(&mask, Connectivity::Eight).is_empty());
        assert!(select_largest(Vec::new()).is_none());
    }

    #[test]
    fn diagonal_pixels_join_only_with_eight_connectivity() {
        let mut mask = GrayImage::new(4, 4);
        mask.put_pixel(1, 1, Luma([255]));
        mask.put_pixel(2, 2, Luma([255]));
        assert_eq!(label_regions(&mask, Connectivity::Eight).len(), 1);
        assert_eq!(label_regions(&mask, Connectivity::Four).len(), 2);
    }

    #[test]
    fn largest_region_wins() {
        let mut mask = GrayImage::new(30, 30);
        paint(&mut mask, 1..4, 1..4);
        paint(&mut mask, 10..25, 12..20);
        let largest = select_largest(label_regions(&mask, Connectivity::Eight)).unwrap();
        assert_eq!(largest.area(), 15 * 8);
        assert_eq!(
            largest.axis_box(),
            AxisBox {
                min_row: 12,
                min_col: 10,
                max_row: 19,
                max_col: 24
            }
        );
    }

    #[test]
    fn equal_areas_prefer_the_top_left_region() {
        let mut mask = GrayImage::new(30, 30);
        paint(&mut mask, 20..25, 2..6);
        paint(&mut mask, 2..7, 2..6);
        paint(&mut mask, 2..7, 20..24);
        let chosen = select_largest(label_regions(&mask, Connectivity::Eight)).unwrap();
        assert_eq!((chosen.min_x, chosen.min_y), (2, 2));
    }

    #[test]
    fn outline_keeps_row_extremes() {
        let mut mask = GrayImage::new(10, 10);
        paint(&mut mask, 2..6, 3..5);
        let regions = label_regions(&mask, Connectivity::Eight);
        assert_eq!(regions[0].pixel_count, 8);
        assert_eq!(
            regions[0].outline,
            vec![
                Point::new(2, 3),
                Point::new(5, 3),
                Point::new(2, 4),
                Point::new(5, 4)
            ]
        );
    }

    #[test]
    fn oriented_rect_of_axis_aligned_block() {
        let mut mask = GrayImage::new(40, 30);
        paint(&mut mask, 5..35, 10..20);
        let region = select_largest(label_regions(&mask, Connectivity::Eight)).unwrap();
        let rect = oriented_rect(&region);
        let extent = rect.extent();
        // corners are floored back onto the pixel grid
        let near = |a: u32, b: u32| a.abs_diff(b) <= 1;
        assert!(near(extent.min_col, 5) && near(extent.max_col, 34), "{extent:?}");
        assert!(near(extent.min_row, 10) && near(extent.max_row, 19), "{extent:?}");
        assert!((rect.width - 29.0).abs() <= 1.5 || (rect.height - 29.0).abs() <= 1.5);
    }
}
