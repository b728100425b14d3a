//! Core types for the Lumara filtering pipeline.
//!
//! This module contains the foundational types shared by the catalog, the
//! engine, and the session:
//! - Parameter vocabulary (kinds, capability sets, control hints)
//! - Slider state and the forwarding transforms
//! - Error types for each collaborator seam

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{EngineError, SourceError, WriteError};
pub use types::{
    CapabilitySet, ControlHint, ControlKind, FilterArgs, ParamKind, ParameterState, SessionId,
};
