//! The built-in filter catalog.
//!
//! The catalog is a static registry: the filter set is fixed, ordered, and
//! resolved entirely at construction time. Capability sets live in a const
//! table rather than being introspected from the engine, so lookups are pure
//! and infallible and the table is inspectable in one place.

use crate::core::types::{CapabilitySet, ControlHint, ControlKind, ParamKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The built-in filters, in catalog listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    /// Faceted crystal-cell mosaic.
    Crystallize,
    /// Luminance edge tracing.
    Edges,
    /// Gaussian softening.
    GaussianBlur,
    /// Square-block averaging.
    Pixellate,
    /// Warm archival toning.
    SepiaTone,
    /// Sharpening by blurred-copy subtraction.
    UnsharpMask,
    /// Corner darkening.
    Vignette,
    /// Oriented-gradient visualization.
    GaborGradient,
    /// Posterized colors with inked outlines.
    Comic,
    /// Swirl around the image center.
    TwirlDistortion,
}

impl FilterKind {
    /// All filters, in the order the catalog lists them.
    pub const ALL: [FilterKind; 10] = [
        FilterKind::Crystallize,
        FilterKind::Edges,
        FilterKind::GaussianBlur,
        FilterKind::Pixellate,
        FilterKind::SepiaTone,
        FilterKind::UnsharpMask,
        FilterKind::Vignette,
        FilterKind::GaborGradient,
        FilterKind::Comic,
        FilterKind::TwirlDistortion,
    ];

    /// Stable identifier used on the command line and in serialized form.
    pub fn id(self) -> &'static str {
        match self {
            FilterKind::Crystallize => "crystallize",
            FilterKind::Edges => "edges",
            FilterKind::GaussianBlur => "gaussian-blur",
            FilterKind::Pixellate => "pixellate",
            FilterKind::SepiaTone => "sepia-tone",
            FilterKind::UnsharpMask => "unsharp-mask",
            FilterKind::Vignette => "vignette",
            FilterKind::GaborGradient => "gabor-gradient",
            FilterKind::Comic => "comic",
            FilterKind::TwirlDistortion => "twirl-distortion",
        }
    }

    /// Human-facing name for pickers and dialogs.
    pub fn display_name(self) -> &'static str {
        match self {
            FilterKind::Crystallize => "Crystallize",
            FilterKind::Edges => "Edges",
            FilterKind::GaussianBlur => "Gaussian Blur",
            FilterKind::Pixellate => "Pixellate",
            FilterKind::SepiaTone => "Sepia Tone",
            FilterKind::UnsharpMask => "Unsharp Mask",
            FilterKind::Vignette => "Vignette",
            FilterKind::GaborGradient => "Gabor Gradient",
            FilterKind::Comic => "Comic",
            FilterKind::TwirlDistortion => "Twirl Distortion",
        }
    }

    /// One-line description for listings.
    pub fn description(self) -> &'static str {
        match self {
            FilterKind::Crystallize => "Aggregates pixels into faceted crystal cells",
            FilterKind::Edges => "Traces luminance edges",
            FilterKind::GaussianBlur => "Softens the image with a Gaussian kernel",
            FilterKind::Pixellate => "Averages the image into square blocks",
            FilterKind::SepiaTone => "Warms the image toward archival brown tones",
            FilterKind::UnsharpMask => "Sharpens by subtracting a blurred copy",
            FilterKind::Vignette => "Darkens the image toward its corners",
            FilterKind::GaborGradient => "Encodes oriented gradients into the color channels",
            FilterKind::Comic => "Posterizes colors and inks the outlines",
            FilterKind::TwirlDistortion => "Swirls pixels around the image center",
        }
    }

    /// The capability table: which argument kinds each filter accepts.
    pub const fn capabilities(self) -> CapabilitySet {
        match self {
            FilterKind::Crystallize => {
                CapabilitySet::of(&[ParamKind::Radius, ParamKind::CenterPoint])
            }
            FilterKind::Edges => CapabilitySet::of(&[ParamKind::Intensity]),
            FilterKind::GaussianBlur => CapabilitySet::of(&[ParamKind::Radius]),
            FilterKind::Pixellate => {
                CapabilitySet::of(&[ParamKind::Scale, ParamKind::CenterPoint])
            }
            FilterKind::SepiaTone => CapabilitySet::of(&[ParamKind::Intensity]),
            FilterKind::UnsharpMask => {
                CapabilitySet::of(&[ParamKind::Radius, ParamKind::Intensity])
            }
            FilterKind::Vignette => CapabilitySet::of(&[ParamKind::Intensity, ParamKind::Radius]),
            FilterKind::GaborGradient => CapabilitySet::EMPTY,
            FilterKind::Comic => CapabilitySet::EMPTY,
            FilterKind::TwirlDistortion => CapabilitySet::of(&[
                ParamKind::Radius,
                ParamKind::Angle,
                ParamKind::CenterPoint,
            ]),
        }
    }

    /// Look a filter up by its stable identifier.
    pub fn from_id(id: &str) -> Option<FilterKind> {
        FilterKind::ALL.into_iter().find(|kind| kind.id() == id)
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Everything a frontend needs to present one filter.
///
/// Immutable once built; sessions hold a clone of the active descriptor so a
/// catalog does not need to outlive them.
#[derive(Debug, Clone, Serialize)]
pub struct FilterDescriptor {
    /// Which filter this describes.
    pub kind: FilterKind,
    /// Stable identifier.
    pub id: &'static str,
    /// Human-facing name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Argument kinds the filter accepts.
    pub capabilities: CapabilitySet,
    /// Sliders to render, in panel order.
    pub controls: Vec<ControlHint>,
}

impl FilterDescriptor {
    /// Build the descriptor for one filter from the capability table.
    pub fn new(kind: FilterKind) -> Self {
        let capabilities = kind.capabilities();
        FilterDescriptor {
            kind,
            id: kind.id(),
            name: kind.display_name(),
            description: kind.description(),
            capabilities,
            controls: controls_for(capabilities),
        }
    }

    /// Whether the descriptor declares a given slider.
    pub fn has_control(&self, control: ControlKind) -> bool {
        self.controls.iter().any(|hint| hint.control == control)
    }

    /// Whether the filter takes no arguments at all.
    pub fn is_fixed_function(&self) -> bool {
        self.capabilities.is_empty()
    }
}

/// Derive the slider list from a capability set.
///
/// The intensity slider covers both the `Intensity` and `Scale` kinds; a
/// `Radius` capability needs the base and multiplier sliders together.
fn controls_for(caps: CapabilitySet) -> Vec<ControlHint> {
    let mut controls = Vec::new();
    if caps.contains(ParamKind::Intensity) || caps.contains(ParamKind::Scale) {
        controls.push(ControlHint::for_control(ControlKind::Intensity));
    }
    if caps.contains(ParamKind::Radius) {
        controls.push(ControlHint::for_control(ControlKind::Radius));
        controls.push(ControlHint::for_control(ControlKind::RadiusMultiplier));
    }
    if caps.contains(ParamKind::Angle) {
        controls.push(ControlHint::for_control(ControlKind::Angle));
    }
    controls
}

/// Registry of all built-in filters.
///
/// Maintains descriptors in the fixed listing order and answers lookups by
/// kind or identifier. Lookup is pure: no errors, no side effects.
pub struct FilterCatalog {
    filters: IndexMap<FilterKind, FilterDescriptor>,
}

impl FilterCatalog {
    /// Build the catalog with every built-in filter.
    pub fn new() -> Self {
        let mut filters = IndexMap::with_capacity(FilterKind::ALL.len());
        for kind in FilterKind::ALL {
            filters.insert(kind, FilterDescriptor::new(kind));
        }
        Self { filters }
    }

    /// Iterate descriptors in listing order.
    pub fn descriptors(&self) -> impl Iterator<Item = &FilterDescriptor> {
        self.filters.values()
    }

    /// Descriptor for one filter.
    pub fn get(&self, kind: FilterKind) -> Option<&FilterDescriptor> {
        self.filters.get(&kind)
    }

    /// Descriptor lookup by stable identifier.
    pub fn get_by_id(&self, id: &str) -> Option<&FilterDescriptor> {
        FilterKind::from_id(id).and_then(|kind| self.get(kind))
    }

    /// Capability set of one filter.
    pub fn capabilities_of(&self, kind: FilterKind) -> CapabilitySet {
        kind.capabilities()
    }

    /// Whether an identifier names a catalog filter.
    pub fn contains_id(&self, id: &str) -> bool {
        FilterKind::from_id(id).is_some()
    }

    /// Number of filters in the catalog.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether the catalog is empty. It never is; present for completeness.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for FilterCatalog {
    fn default() -> Self {
        Self::new()
    }
}
