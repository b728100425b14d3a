//! The photo export seam.
//!
//! Writers are asynchronous: `write` hands the bitmap off and returns, and
//! the outcome arrives later through exactly one of the two callbacks. That
//! callback pair is the only error path the application surfaces to the
//! user.

use crate::core::error::WriteError;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::thread;
use uuid::Uuid;

/// Callback fired once when a write lands, with the destination path.
pub type SaveSuccess = Box<dyn FnOnce(PathBuf) + Send + 'static>;

/// Callback fired once when a write fails.
pub type SaveFailure = Box<dyn FnOnce(WriteError) + Send + 'static>;

/// Asynchronous photo-library stand-in.
///
/// `write` must return promptly and must deliver the outcome by invoking
/// exactly one of the two callbacks, exactly once.
pub trait PhotoWriter: Send + Sync {
    /// Persist one bitmap.
    fn write(&self, image: RgbaImage, on_success: SaveSuccess, on_failure: SaveFailure);
}

/// Output format for the directory album.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumFormat {
    /// Lossless PNG.
    Png,
    /// JPEG at a fixed quality.
    Jpeg {
        /// Encoder quality, 1 to 100.
        quality: u8,
    },
}

impl Default for AlbumFormat {
    fn default() -> Self {
        AlbumFormat::Png
    }
}

impl AlbumFormat {
    /// File extension written for this format.
    pub fn extension(self) -> &'static str {
        match self {
            AlbumFormat::Png => "png",
            AlbumFormat::Jpeg { .. } => "jpg",
        }
    }
}

/// Writes photos into an album directory on a background thread.
///
/// Files are named `lumara-<uuid>.<ext>` so repeated saves never collide.
/// The directory is created on first write if needed.
pub struct DirectoryAlbum {
    directory: PathBuf,
    format: AlbumFormat,
}

impl DirectoryAlbum {
    /// Album writing PNGs into `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            format: AlbumFormat::Png,
        }
    }

    /// Album writing `format` instead of the PNG default.
    pub fn with_format(directory: impl Into<PathBuf>, format: AlbumFormat) -> Self {
        Self {
            directory: directory.into(),
            format,
        }
    }

    /// The album directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn write_sync(
        directory: &Path,
        format: AlbumFormat,
        image: &RgbaImage,
    ) -> Result<PathBuf, WriteError> {
        std::fs::create_dir_all(directory)?;
        let filename = format!("lumara-{}.{}", Uuid::new_v4(), format.extension());
        let full_path = directory.join(filename);

        match format {
            AlbumFormat::Jpeg { quality } => {
                let rgb = image::DynamicImage::ImageRgba8(image.clone()).to_rgb8();
                let mut output = std::io::BufWriter::new(std::fs::File::create(&full_path)?);
                let mut encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut output, quality);
                encoder.encode(
                    &rgb,
                    rgb.width(),
                    rgb.height(),
                    image::ExtendedColorType::Rgb8,
                )?;
            }
            AlbumFormat::Png => {
                image.save(&full_path)?;
            }
        }
        Ok(full_path)
    }
}

impl PhotoWriter for DirectoryAlbum {
    fn write(&self, image: RgbaImage, on_success: SaveSuccess, on_failure: SaveFailure) {
        let directory = self.directory.clone();
        let format = self.format;
        thread::spawn(move || match Self::write_sync(&directory, format, &image) {
            Ok(path) => {
                log::info!("saved photo to {}", path.display());
                on_success(path);
            }
            Err(err) => {
                log::warn!("photo save failed: {}", err);
                on_failure(err);
            }
        });
    }
}
