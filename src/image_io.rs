use std::path::Path;

use image::{DynamicImage, ImageError, ImageReader};

use crate::error::{DetectError, Result};

/// Load and decode an image. The format is picked from the file extension.
pub fn load<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    let decode_error = |source: ImageError| DetectError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(path)
        .map_err(|e| decode_error(ImageError::IoError(e)))?
        .decode()
        .map_err(decode_error)?;

    log::debug!(
        "loaded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(img)
}

/// Encode and write an image. The format is picked from the file extension.
pub fn save<P: AsRef<Path>>(image: &DynamicImage, path: P) -> Result<()> {
    let path = path.as_ref();
    image.save(path).map_err(|source| DetectError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
