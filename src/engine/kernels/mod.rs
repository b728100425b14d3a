//! CPU kernels backing the raster engine.
//!
//! Every kernel is a pure function of its inputs. The same bitmap and
//! arguments always produce the same bytes, which is what lets the pipeline
//! re-run a pass on every slider tick and trust the result.

pub mod blur;
pub mod distort;
pub mod stylize;
pub mod tone;
