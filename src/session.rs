use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::detection::Detector;
use crate::error::{DetectError, Result};
use crate::history::HistoryStack;
use crate::image_io;
use crate::models::DetectionResult;
use crate::pipeline::Mode;

/// The image the user opened. Detection always runs on this, never on an
/// annotated history entry.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub path: PathBuf,
    pub image: DynamicImage,
}

/// Everything a front end needs between interactions: the loaded source,
/// the displayed-image history, the selected mode and a status line.
#[derive(Debug)]
pub struct Session {
    detector: Detector,
    source: Option<SourceImage>,
    history: HistoryStack<DynamicImage>,
    mode: Mode,
    status: String,
}

impl Session {
    pub fn new(detector: Detector) -> Self {
        Self {
            detector,
            source: None,
            history: HistoryStack::new(),
            mode: Mode::default(),
            status: "Ready".to_string(),
        }
    }

    /// Load an image and push it onto the history. On failure the session is
    /// left as it was.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let image = match image_io::load(path) {
            Ok(image) => image,
            Err(err) => {
                self.status = format!("Failed to load image: {}", err);
                return Err(err);
            }
        };

        log::info!("opened {}", path.display());
        self.history.append(image.clone());
        self.source = Some(SourceImage {
            path: path.to_path_buf(),
            image,
        });
        self.status = "Image loaded. Run detection to process.".to_string();
        Ok(())
    }

    /// Run the selected mode on the loaded source. A found region is pushed
    /// onto the history; nothing is pushed otherwise.
    pub fn detect(&mut self) -> Result<DetectionResult> {
        let Some(source) = &self.source else {
            self.status = "Please load an image first".to_string();
            return Err(DetectError::NoImage);
        };

        let mode = self.mode;
        match self.detector.detect(mode, &source.image) {
            Ok(DetectionResult::Found { image, geometry }) => {
                log::info!("barcode found with {} method: {:?}", mode, geometry.extent());
                self.history.append(image.clone());
                self.status = format!("Barcode detected using {} method", mode);
                Ok(DetectionResult::Found { image, geometry })
            }
            Ok(DetectionResult::NotFound) => {
                log::info!("no barcode found with {} method", mode);
                self.status = format!("No barcode detected using {} method", mode);
                Ok(DetectionResult::NotFound)
            }
            Err(err) => {
                self.status = format!("Error during detection: {}", err);
                Err(err)
            }
        }
    }

    pub fn undo(&mut self) -> Option<&DynamicImage> {
        let moved = self.history.undo().is_some();
        if moved {
            log::info!("undo -> entry {:?}", self.history.cursor());
        }
        if moved { self.history.current() } else { None }
    }

    pub fn redo(&mut self) -> Option<&DynamicImage> {
        let moved = self.history.redo().is_some();
        if moved {
            log::info!("redo -> entry {:?}", self.history.cursor());
        }
        if moved { self.history.current() } else { None }
    }

    /// Write the currently displayed image.
    pub fn save_result<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let Some(current) = self.history.current() else {
            self.status = "No image to save".to_string();
            return Err(DetectError::NoImage);
        };

        match image_io::save(current, path) {
            Ok(()) => {
                self.status = format!("Image saved to {}", path.display());
                Ok(())
            }
            Err(err) => {
                self.status = format!("Failed to save image: {}", err);
                Err(err)
            }
        }
    }

    pub fn current_image(&self) -> Option<&DynamicImage> {
        self.history.current()
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn history(&self) -> &HistoryStack<DynamicImage> {
        &self.history
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}
