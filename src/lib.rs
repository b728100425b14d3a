//! # Lumara - Live Photo Filtering
//!
//! Lumara is a photo-filtering library built around a fixed catalog of
//! filters with adjustable parameters. It provides a synchronous processing
//! pipeline: move a slider and the whole frame is re-processed on the spot.
//!
//! ## Features
//!
//! - **Fixed Filter Catalog**: Ten built-in filters with a stable listing order
//! - **Capability-driven Controls**: Each filter declares which parameter kinds it accepts
//! - **Live Re-processing**: Every slider tick runs one full, deterministic pass
//! - **Pluggable Backends**: Swap the raster backend through the `FilterEngine` trait
//! - **Asynchronous Export**: Saving hands off to a writer and reports through callbacks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lumara::prelude::*;
//!
//! // Look up a filter in the catalog
//! let catalog = FilterCatalog::new();
//! let blur = catalog.get(FilterKind::GaussianBlur).unwrap();
//!
//! // Open a session and bind an image
//! let mut session = Session::new(blur);
//! session.load(image::open("input.png").ok());
//!
//! // Move sliders; each tick re-processes the frame
//! session.set_parameter(ControlKind::Radius, 0.1);
//! session.set_parameter(ControlKind::RadiusMultiplier, 500.0);
//!
//! // Export through an album writer
//! let album = DirectoryAlbum::new("albums/output");
//! session.save(
//!     &album,
//!     Box::new(|path| println!("saved to {}", path.display())),
//!     Box::new(|err| eprintln!("save failed: {err}")),
//! );
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`core`]: Parameter types, capability sets, and error handling
//! - [`catalog`]: The fixed filter catalog and per-filter control hints
//! - [`engine`]: The `FilterEngine` trait and the built-in raster backend
//! - [`pipeline`]: The live `Session` that re-processes on every change
//! - [`source`]: Image sources feeding the pipeline
//! - [`export`]: Album writers that persist processed bitmaps

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod core;
pub mod engine;
pub mod export;
pub mod pipeline;
pub mod source;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust,ignore
/// use lumara::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::types::{
        CapabilitySet, ControlHint, ControlKind, FilterArgs, ParamKind, ParameterState, SessionId,
    };

    // Errors
    pub use crate::core::error::{EngineError, SourceError, WriteError};

    // Catalog
    pub use crate::catalog::{FilterCatalog, FilterDescriptor, FilterKind};

    // Engine
    pub use crate::engine::{FilterEngine, RasterEngine};

    // Pipeline
    pub use crate::pipeline::Session;

    // Sources
    pub use crate::source::{ImageSource, PathSource, Picked};

    // Export
    pub use crate::export::{AlbumFormat, DirectoryAlbum, PhotoWriter, SaveFailure, SaveSuccess};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
