//! CPU raster backend for the filter engine.

use crate::catalog::FilterKind;
use crate::core::error::{EngineError, EngineResult};
use crate::core::types::FilterArgs;
use crate::engine::{kernels, FilterEngine};
use image::RgbaImage;

/// CPU implementation of every catalog filter.
///
/// Stateless: all calls take `&self` and identical inputs produce identical
/// bytes, so one instance can back every session in the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterEngine;

impl RasterEngine {
    /// Create a raster engine.
    pub fn new() -> Self {
        RasterEngine
    }
}

fn require(value: Option<f64>, filter: FilterKind, parameter: &'static str) -> EngineResult<f64> {
    value.ok_or(EngineError::MissingParameter {
        filter: filter.id(),
        parameter,
    })
}

fn require_center(value: Option<(f64, f64)>, filter: FilterKind) -> EngineResult<(f64, f64)> {
    value.ok_or(EngineError::MissingParameter {
        filter: filter.id(),
        parameter: "center",
    })
}

impl FilterEngine for RasterEngine {
    fn apply(
        &self,
        filter: FilterKind,
        source: &RgbaImage,
        args: &FilterArgs,
    ) -> EngineResult<RgbaImage> {
        if source.width() == 0 || source.height() == 0 {
            return Err(EngineError::DegenerateInput {
                width: source.width(),
                height: source.height(),
            });
        }

        match filter {
            FilterKind::Crystallize => {
                let radius = require(args.radius, filter, "radius")?;
                let center = require_center(args.center, filter)?;
                Ok(kernels::stylize::crystallize(source, radius, center))
            }
            FilterKind::Edges => {
                let intensity = require(args.intensity, filter, "intensity")?;
                Ok(kernels::stylize::edges(source, intensity))
            }
            FilterKind::GaussianBlur => {
                let radius = require(args.radius, filter, "radius")?;
                Ok(kernels::blur::gaussian(source, radius))
            }
            FilterKind::Pixellate => {
                let scale = require(args.scale, filter, "scale")?;
                let center = require_center(args.center, filter)?;
                Ok(kernels::stylize::pixellate(source, scale, center))
            }
            FilterKind::SepiaTone => {
                let intensity = require(args.intensity, filter, "intensity")?;
                Ok(kernels::tone::sepia(source, intensity))
            }
            FilterKind::UnsharpMask => {
                let radius = require(args.radius, filter, "radius")?;
                let intensity = require(args.intensity, filter, "intensity")?;
                Ok(kernels::blur::unsharp_mask(source, radius, intensity))
            }
            FilterKind::Vignette => {
                let intensity = require(args.intensity, filter, "intensity")?;
                let radius = require(args.radius, filter, "radius")?;
                Ok(kernels::tone::vignette(source, intensity, radius))
            }
            FilterKind::GaborGradient => Ok(kernels::stylize::gabor_gradient(source)),
            FilterKind::Comic => Ok(kernels::stylize::comic(source)),
            FilterKind::TwirlDistortion => {
                let radius = require(args.radius, filter, "radius")?;
                let angle = require(args.angle, filter, "angle")?;
                let center = require_center(args.center, filter)?;
                Ok(kernels::distort::twirl(source, radius, angle, center))
            }
        }
    }
}
