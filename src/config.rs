use std::path::Path;

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::error::{DetectError, Result};

/// Tunables for the fast (Scharr difference + morphology) pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FastConfig {
    /// Side of the Gaussian blur window; must be odd.
    pub blur_kernel: u32,
    /// Pixels strictly above this level survive binarization.
    pub threshold: u8,
    /// Width of the closing rectangle. Wide, to bridge gaps between bars.
    pub close_width: u32,
    pub close_height: u32,
    /// Erode passes followed by the same number of dilate passes.
    pub iterations: u8,
    pub eight_connected: bool,
    pub stroke_color: [u8; 3],
    pub stroke_width: u32,
}

impl Default for FastConfig {
    fn default() -> Self {
        Self {
            blur_kernel: 9,
            threshold: 225,
            close_width: 21,
            close_height: 7,
            iterations: 4,
            eight_connected: true,
            stroke_color: [0, 255, 0],
            stroke_width: 2,
        }
    }
}

impl FastConfig {
    /// Gaussian sigma for the blur window, the way OpenCV derives it when
    /// only a kernel size is given.
    pub fn blur_sigma(&self) -> f32 {
        0.3 * ((self.blur_kernel as f32 - 1.0) * 0.5 - 1.0) + 0.8
    }

    pub fn stroke(&self) -> Rgb<u8> {
        Rgb(self.stroke_color)
    }

    pub fn validate(&self) -> Result<()> {
        if self.blur_kernel < 3 || self.blur_kernel % 2 == 0 {
            return Err(DetectError::InvalidConfig(format!(
                "fast.blur_kernel must be odd and >= 3, got {}",
                self.blur_kernel
            )));
        }
        // Structuring elements are built from a mask image whose center is a u8
        if self.close_width == 0
            || self.close_height == 0
            || self.close_width > 511
            || self.close_height > 511
        {
            return Err(DetectError::InvalidConfig(format!(
                "fast.close size must be within 1..=511, got {}x{}",
                self.close_width, self.close_height
            )));
        }
        if self.stroke_width == 0 {
            return Err(DetectError::InvalidConfig(
                "fast.stroke_width must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Tunables for the reference (explicit Sobel magnitude) pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Blurred magnitude, clipped to 0..=255, must exceed this level.
    pub threshold: f32,
    pub eight_connected: bool,
    pub stroke_color: [u8; 3],
    pub stroke_width: u32,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            threshold: 128.0,
            eight_connected: true,
            stroke_color: [255, 0, 0],
            stroke_width: 2,
        }
    }
}

impl ReferenceConfig {
    pub fn stroke(&self) -> Rgb<u8> {
        Rgb(self.stroke_color)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=255.0).contains(&self.threshold) {
            return Err(DetectError::InvalidConfig(format!(
                "reference.threshold must be within 0..=255, got {}",
                self.threshold
            )));
        }
        if self.stroke_width == 0 {
            return Err(DetectError::InvalidConfig(
                "reference.stroke_width must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// One set of tunables per detection mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub fast: FastConfig,
    pub reference: ReferenceConfig,
}

impl DetectorConfig {
    /// Read a JSON config file. Missing fields fall back to defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| DetectError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| DetectError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.fast.validate()?;
        self.reference.validate()
    }
}
