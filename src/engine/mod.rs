//! The filter engine seam.
//!
//! [`FilterEngine`] models the calling convention of the underlying filter
//! library: one call per pass, taking the filter, the source bitmap, and the
//! forwarded arguments, and returning the output bitmap or a failure. The
//! built-in [`RasterEngine`] backs the trait with CPU kernels; callers that
//! need a different backend (tests use recording mocks) inject their own.

pub mod kernels;
mod raster;

pub use raster::RasterEngine;

use crate::catalog::FilterKind;
use crate::core::error::EngineResult;
use crate::core::types::FilterArgs;
use image::RgbaImage;
use std::sync::Arc;

/// Calling convention of the underlying filter library.
///
/// Implementations must be deterministic: identical `(filter, source, args)`
/// triples produce bit-identical output. The output extent is the engine's
/// to decide and may differ from the source extent.
pub trait FilterEngine: Send + Sync {
    /// Apply one filter to `source` with the forwarded arguments.
    ///
    /// An error means the pass produced no output; it carries no partial
    /// result.
    fn apply(
        &self,
        filter: FilterKind,
        source: &RgbaImage,
        args: &FilterArgs,
    ) -> EngineResult<RgbaImage>;
}

/// Get or initialize the process-wide engine context.
///
/// Created once on first use and shared by every session that does not
/// inject its own backend. The raster engine holds no mutable state, so one
/// context serves the whole process; there is no teardown.
pub fn shared() -> Arc<dyn FilterEngine> {
    static ENGINE: std::sync::OnceLock<Arc<RasterEngine>> = std::sync::OnceLock::new();
    ENGINE
        .get_or_init(|| {
            log::debug!("initializing shared raster engine context");
            Arc::new(RasterEngine::new())
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_context_is_created_once() {
        let first = shared();
        let second = shared();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
