pub mod config;
pub mod detection;
pub mod error;
pub mod history;
pub mod image_io;
pub mod models;
pub mod pipeline;
pub mod session;

pub use config::{DetectorConfig, FastConfig, ReferenceConfig};
pub use detection::{Detector, FastPipeline, ReferencePipeline};
pub use error::DetectError;
pub use history::HistoryStack;
pub use models::{AxisBox, BoundingGeometry, DetectionResult, OrientedRect, Region};
pub use pipeline::{DebugConfig, DetectionPipeline, Mode, PipelineContext};
pub use session::Session;
