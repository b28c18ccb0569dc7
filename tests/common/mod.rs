mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from barscan for tests
pub use barscan::{
    AxisBox, BoundingGeometry, DetectError, DetectionResult, Detector, DetectorConfig, Mode,
    Session,
};
