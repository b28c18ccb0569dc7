use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::{DynamicImage, GrayImage};

use crate::error::{DetectError, Result};
use crate::models::DetectionResult;

/// Which localization routine to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Scharr difference, blur, high threshold, closing, erode/dilate,
    /// oriented rectangle.
    #[default]
    Fast,
    /// Explicit Sobel magnitude, small mean blur, single dilation,
    /// axis-aligned box.
    Reference,
}

impl Mode {
    /// Label used in status messages.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Fast => "fast",
            Mode::Reference => "reference",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast" | "opencv" => Ok(Mode::Fast),
            "reference" | "lowlevel" | "low-level" => Ok(Mode::Reference),
            other => Err(format!(
                "unknown mode '{}', expected 'fast' or 'reference'",
                other
            )),
        }
    }
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

impl DebugConfig {
    /// The directory must be empty or non-existent
    pub fn new(output_dir: PathBuf) -> anyhow::Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        Ok(Self { output_dir })
    }
}

/// Context available to every pipeline run
#[derive(Clone, Debug, Default)]
pub struct PipelineContext {
    pub debug: Option<DebugConfig>,
}

impl PipelineContext {
    pub fn with_debug(mut self, debug: DebugConfig) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Save an intermediate stage image as `NN_<mode>_<stage>.png` when debug
    /// output is enabled. A no-op otherwise.
    pub fn save_stage(
        &self,
        mode: Mode,
        index: usize,
        stage: &str,
        image: &DynamicImage,
    ) -> Result<()> {
        let Some(debug) = &self.debug else {
            return Ok(());
        };

        let filename = format!(
            "{:02}_{}_{}.png",
            index,
            mode.label(),
            stage.to_lowercase().replace(' ', "_")
        );
        let path = debug.output_dir.join(filename);
        save_debug_image(image, &path)?;
        log::debug!("saved debug image {}", path.display());
        Ok(())
    }

    /// Same as [`Self::save_stage`] for grayscale stages; only copies the
    /// image when debug output is enabled.
    pub fn save_gray_stage(
        &self,
        mode: Mode,
        index: usize,
        stage: &str,
        image: &GrayImage,
    ) -> Result<()> {
        if self.debug.is_none() {
            return Ok(());
        }
        self.save_stage(mode, index, stage, &DynamicImage::ImageLuma8(image.clone()))
    }
}

fn save_debug_image(image: &DynamicImage, path: &Path) -> Result<()> {
    image.save(path).map_err(|source| DetectError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// A complete localization routine: image in, annotated image or nothing out.
pub trait DetectionPipeline: Send + Sync {
    fn run(&self, image: &DynamicImage, context: &PipelineContext) -> Result<DetectionResult>;

    fn mode(&self) -> Mode;

    /// Human-readable name (used in logs)
    fn name(&self) -> &str;
}
