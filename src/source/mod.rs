//! The image source seam.
//!
//! Models the platform image chooser: asking for an image either yields one
//! or reports that the user backed out. Only unreadable or undecodable files
//! are errors; cancellation is a normal outcome.

use crate::core::error::SourceResult;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Outcome of asking a source for an image.
#[derive(Debug)]
pub enum Picked {
    /// An image was chosen.
    Image(DynamicImage),
    /// The chooser was dismissed without a selection.
    Cancelled,
}

impl Picked {
    /// The chosen image, if any.
    pub fn into_image(self) -> Option<DynamicImage> {
        match self {
            Picked::Image(image) => Some(image),
            Picked::Cancelled => None,
        }
    }
}

/// Something that can produce a source image on request.
pub trait ImageSource {
    /// Ask for an image.
    fn pick(&mut self) -> SourceResult<Picked>;
}

/// File-based source: picks the image at a fixed path.
///
/// An empty path models a chooser the user backed out of.
#[derive(Debug, Clone)]
pub struct PathSource {
    path: PathBuf,
}

impl PathSource {
    /// Source that picks the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSource for PathSource {
    fn pick(&mut self) -> SourceResult<Picked> {
        if self.path.as_os_str().is_empty() {
            log::debug!("image chooser dismissed without a selection");
            return Ok(Picked::Cancelled);
        }
        let image = image::open(&self.path)?;
        log::debug!(
            "picked {} ({}x{})",
            self.path.display(),
            image.width(),
            image.height()
        );
        Ok(Picked::Image(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_empty_path_is_cancellation() {
        let mut source = PathSource::new("");
        let picked = source.pick().unwrap();
        assert!(matches!(picked, Picked::Cancelled));
        assert!(picked.into_image().is_none());
    }

    #[test]
    fn test_picks_image_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        let image = RgbaImage::from_pixel(6, 4, Rgba([10, 20, 30, 255]));
        image.save(&path).unwrap();

        let mut source = PathSource::new(&path);
        let picked = source.pick().unwrap().into_image().unwrap();
        assert_eq!((picked.width(), picked.height()), (6, 4));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut source = PathSource::new("/nonexistent/photo.png");
        assert!(source.pick().is_err());
    }
}
