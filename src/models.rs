use image::DynamicImage;
use imageproc::point::Point;

/// A connected set of foreground mask pixels.
#[derive(Debug, Clone)]
pub struct Region {
    pub label: u32,
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
    pub pixel_count: u32,
    /// Leftmost and rightmost pixel of every row the region touches.
    /// Enough to recover the convex hull.
    pub outline: Vec<Point<i32>>,
}

impl Region {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    pub fn area(&self) -> u32 {
        self.pixel_count
    }

    pub fn axis_box(&self) -> AxisBox {
        AxisBox {
            min_row: self.min_y,
            min_col: self.min_x,
            max_row: self.max_y,
            max_col: self.max_x,
        }
    }
}

/// Axis-aligned box with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisBox {
    pub min_row: u32,
    pub min_col: u32,
    pub max_row: u32,
    pub max_col: u32,
}

impl AxisBox {
    pub fn width(&self) -> u32 {
        self.max_col - self.min_col + 1
    }

    pub fn height(&self) -> u32 {
        self.max_row - self.min_row + 1
    }
}

/// Minimum-area rectangle, possibly rotated.
///
/// Corners are pixel-centre coordinates, so `width` and `height` are
/// centre-to-centre distances: a region 12 pixels wide has `width == 11.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedRect {
    pub center: (f32, f32),
    pub width: f32,
    pub height: f32,
    /// Rotation of the first edge against the x axis, in degrees.
    pub angle: f32,
    /// Corners in drawing order, on pixel centres.
    pub corners: [Point<i32>; 4],
}

impl OrientedRect {
    pub fn from_corners(corners: [Point<i32>; 4]) -> Self {
        let cx = corners.iter().map(|p| p.x as f32).sum::<f32>() / 4.0;
        let cy = corners.iter().map(|p| p.y as f32).sum::<f32>() / 4.0;
        let edge = |a: Point<i32>, b: Point<i32>| {
            let dx = (b.x - a.x) as f32;
            let dy = (b.y - a.y) as f32;
            (dx * dx + dy * dy).sqrt()
        };
        let (p0, p1) = (corners[0], corners[1]);
        let angle = ((p1.y - p0.y) as f32).atan2((p1.x - p0.x) as f32).to_degrees();

        Self {
            center: (cx, cy),
            width: edge(corners[0], corners[1]),
            height: edge(corners[1], corners[2]),
            angle,
            corners,
        }
    }

    /// Axis-aligned extent of the corners, clamped at zero.
    ///
    /// The bounds are the corner coordinates themselves (pixel centres), not
    /// the inclusive pixel bounds an [`AxisBox`] from [`Region::axis_box`]
    /// holds. The outermost pixels contribute only their centre.
    pub fn extent(&self) -> AxisBox {
        let xs = self.corners.iter().map(|p| p.x.max(0) as u32);
        let ys = self.corners.iter().map(|p| p.y.max(0) as u32);
        AxisBox {
            min_row: ys.clone().min().unwrap_or(0),
            min_col: xs.clone().min().unwrap_or(0),
            max_row: ys.max().unwrap_or(0),
            max_col: xs.max().unwrap_or(0),
        }
    }
}

/// Geometry reported for the selected region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingGeometry {
    Axis(AxisBox),
    Oriented(OrientedRect),
}

impl BoundingGeometry {
    pub fn extent(&self) -> AxisBox {
        match self {
            BoundingGeometry::Axis(b) => *b,
            BoundingGeometry::Oriented(r) => r.extent(),
        }
    }
}

/// Outcome of a single pipeline run. `NotFound` is a normal answer.
#[derive(Debug, Clone)]
pub enum DetectionResult {
    Found {
        image: DynamicImage,
        geometry: BoundingGeometry,
    },
    NotFound,
}

impl DetectionResult {
    pub fn is_found(&self) -> bool {
        matches!(self, DetectionResult::Found { .. })
    }

    pub fn geometry(&self) -> Option<&BoundingGeometry> {
        match self {
            DetectionResult::Found { geometry, .. } => Some(geometry),
            DetectionResult::NotFound => None,
        }
    }

    pub fn image(&self) -> Option<&DynamicImage> {
        match self {
            DetectionResult::Found { image, .. } => Some(image),
            DetectionResult::NotFound => None,
        }
    }
}
