pub mod annotate;
pub mod candidates;
pub mod gradient;
pub mod regions;

use std::panic::{self, AssertUnwindSafe};

use image::{DynamicImage, GenericImageView};

use crate::config::{DetectorConfig, FastConfig, ReferenceConfig};
use crate::error::{DetectError, Result};
use crate::models::{BoundingGeometry, DetectionResult};
use crate::pipeline::{DetectionPipeline, Mode, PipelineContext};

fn ensure_not_empty(image: &DynamicImage) -> Result<()> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(DetectError::PipelineFailure(format!(
            "image has no pixels ({}x{})",
            width, height
        )));
    }
    Ok(())
}

/// Scharr difference, Gaussian blur, high threshold, rectangular closing,
/// erode/dilate cleanup, oriented rectangle.
#[derive(Debug, Clone, Default)]
pub struct FastPipeline {
    pub config: FastConfig,
}

impl FastPipeline {
    pub fn new(config: FastConfig) -> Self {
        Self { config }
    }
}

impl DetectionPipeline for FastPipeline {
    fn run(&self, image: &DynamicImage, context: &PipelineContext) -> Result<DetectionResult> {
        self.config.validate()?;
        ensure_not_empty(image)?;
        let mode = self.mode();

        let gray = gradient::to_grayscale(image);
        let magnitude = gradient::to_gray_saturated(&gradient::scharr_difference(&gray));
        context.save_gray_stage(mode, 1, "gradient", &magnitude)?;

        let blurred = candidates::gaussian_smooth(&magnitude, self.config.blur_sigma());
        context.save_gray_stage(mode, 2, "blurred", &blurred)?;

        let mask = candidates::binarize(&blurred, self.config.threshold);
        context.save_gray_stage(mode, 3, "threshold", &mask)?;

        let closed =
            candidates::close_rect(&mask, self.config.close_width, self.config.close_height);
        let cleaned = candidates::erode_dilate(&closed, self.config.iterations);
        context.save_gray_stage(mode, 4, "mask", &cleaned)?;

        let regions = regions::label_regions(
            &cleaned,
            regions::connectivity(self.config.eight_connected),
        );
        log::debug!("{}: {} candidate regions", self.name(), regions.len());

        let Some(region) = regions::select_largest(regions) else {
            return Ok(DetectionResult::NotFound);
        };
        let rect = regions::oriented_rect(&region);
        log::debug!(
            "{}: selected region {} (area {}), rect {:?}",
            self.name(),
            region.label,
            region.area(),
            rect
        );

        let geometry = BoundingGeometry::Oriented(rect);
        let annotated = annotate::annotate(
            image,
            &geometry,
            self.config.stroke(),
            self.config.stroke_width,
        );
        context.save_stage(mode, 5, "annotated", &annotated)?;

        Ok(DetectionResult::Found {
            image: annotated,
            geometry,
        })
    }

    fn mode(&self) -> Mode {
        Mode::Fast
    }

    fn name(&self) -> &str {
        "Fast Pipeline"
    }
}

/// Explicit Sobel magnitude, 3x3 mean blur, mid threshold, one dilation,
/// axis-aligned box. Works on and annotates the luma image.
#[derive(Debug, Clone, Default)]
pub struct ReferencePipeline {
    pub config: ReferenceConfig,
}

impl ReferencePipeline {
    pub fn new(config: ReferenceConfig) -> Self {
        Self { config }
    }
}

impl DetectionPipeline for ReferencePipeline {
    fn run(&self, image: &DynamicImage, context: &PipelineContext) -> Result<DetectionResult> {
        self.config.validate()?;
        ensure_not_empty(image)?;
        let mode = self.mode();

        let gray = gradient::to_grayscale(image);
        let magnitude = gradient::sobel_magnitude(&gray);
        if context.debug.is_some() {
            context.save_gray_stage(mode, 1, "gradient", &gradient::to_gray_normalized(&magnitude))?;
        }

        let blurred = candidates::mean_blur_symmetric(&magnitude);
        let mask = candidates::binarize_clipped(&blurred, self.config.threshold);
        context.save_gray_stage(mode, 2, "threshold", &mask)?;

        let dilated = candidates::dilate_once(&mask);
        context.save_gray_stage(mode, 3, "mask", &dilated)?;

        let regions = regions::label_regions(
            &dilated,
            regions::connectivity(self.config.eight_connected),
        );
        log::debug!("{}: {} candidate regions", self.name(), regions.len());

        let Some(region) = regions::select_largest(regions) else {
            return Ok(DetectionResult::NotFound);
        };
        let bbox = region.axis_box();
        log::debug!(
            "{}: selected region {} (area {}), box {:?}",
            self.name(),
            region.label,
            region.area(),
            bbox
        );

        let geometry = BoundingGeometry::Axis(bbox);
        let annotated = annotate::annotate(
            &DynamicImage::ImageLuma8(gray),
            &geometry,
            self.config.stroke(),
            self.config.stroke_width,
        );
        context.save_stage(mode, 4, "annotated", &annotated)?;

        Ok(DetectionResult::Found {
            image: annotated,
            geometry,
        })
    }

    fn mode(&self) -> Mode {
        Mode::Reference
    }

    fn name(&self) -> &str {
        "Reference Pipeline"
    }
}

/// Dispatches to the pipeline for a mode and turns anything that goes wrong
/// inside it into a single [`DetectError::PipelineFailure`].
#[derive(Debug, Clone, Default)]
pub struct Detector {
    config: DetectorConfig,
    context: PipelineContext,
}

impl Detector {
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            context: PipelineContext::default(),
        })
    }

    pub fn with_context(mut self, context: PipelineContext) -> Self {
        self.context = context;
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn pipeline(&self, mode: Mode) -> Box<dyn DetectionPipeline> {
        match mode {
            Mode::Fast => Box::new(FastPipeline::new(self.config.fast.clone())),
            Mode::Reference => Box::new(ReferencePipeline::new(self.config.reference.clone())),
        }
    }

    pub fn detect(&self, mode: Mode, image: &DynamicImage) -> Result<DetectionResult> {
        let pipeline = self.pipeline(mode);
        log::debug!(
            "running {} on {}x{} image",
            pipeline.name(),
            image.width(),
            image.height()
        );

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| pipeline.run(image, &self.context)));
        match outcome {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(err)) => {
                log::warn!("{} failed: {}", pipeline.name(), err);
                Err(match err {
                    DetectError::PipelineFailure(msg) => DetectError::PipelineFailure(msg),
                    other => DetectError::PipelineFailure(other.to_string()),
                })
            }
            Err(payload) => {
                let msg = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                log::warn!("{} panicked: {}", pipeline.name(), msg);
                Err(DetectError::PipelineFailure(msg))
            }
        }
    }
}
