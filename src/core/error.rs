//! Error types for Lumara.
//!
//! Uses thiserror for structured errors with context. Each collaborator seam
//! gets its own enum:
//! - [`EngineError`]: the filter engine declined to produce output
//! - [`SourceError`]: a source image could not be acquired
//! - [`WriteError`]: an export failed; delivered only through the failure
//!   callback, never as a return value

use thiserror::Error;

/// Errors from the filter engine.
///
/// An engine that returns one of these has produced no output for the pass;
/// the pipeline keeps its previous result and logs the error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A kernel needed an argument the forwarded set did not include.
    /// Indicates a capability table and kernel signature out of step.
    #[error("filter '{filter}' is missing required argument '{parameter}'")]
    MissingParameter {
        /// Filter that was being applied.
        filter: &'static str,
        /// Name of the absent argument.
        parameter: &'static str,
    },

    /// The source image has a zero dimension and cannot be filtered.
    #[error("source image has degenerate extent {width}x{height}")]
    DegenerateInput {
        /// Source width in pixels.
        width: u32,
        /// Source height in pixels.
        height: u32,
    },

    /// The engine has no kernel for the requested filter.
    #[error("filter '{filter}' is not supported by this engine")]
    Unsupported {
        /// Identifier of the unsupported filter.
        filter: String,
    },
}

impl EngineError {
    /// Identifier of the filter involved, if the error names one.
    pub fn filter_id(&self) -> Option<&str> {
        match self {
            EngineError::MissingParameter { filter, .. } => Some(filter),
            EngineError::Unsupported { filter } => Some(filter),
            EngineError::DegenerateInput { .. } => None,
        }
    }
}

/// Errors when acquiring a source image.
///
/// Distinct from cancellation: a picker that was backed out of is not an
/// error, a file that exists but cannot be decoded is.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The underlying file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file was read but could not be decoded as an image.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Errors during export.
///
/// Reaches callers exclusively through the failure callback handed to
/// `save`; the write itself runs off-thread.
#[derive(Error, Debug)]
pub enum WriteError {
    /// The destination could not be created or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The bitmap could not be encoded in the requested format.
    #[error("encode error: {0}")]
    Encode(#[from] image::ImageError),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Result type alias for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type alias for export operations.
pub type WriteResult<T> = Result<T, WriteError>;
