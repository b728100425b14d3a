//! Core parameter types shared by the filter catalog and the processing pipeline.
//!
//! The parameter model uses small copyable types throughout:
//! - Closed vocabulary: filters accept a finite set of parameter kinds
//! - Const-friendly capability sets: the catalog table lives in static data
//! - One fixed forwarding rule per kind: slider state maps to engine
//!   arguments the same way for every filter

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Block size in pixels reached when the intensity slider sits at 1.0.
///
/// Filters that take a `Scale` argument have no slider of their own; the
/// intensity slider is mapped onto `[0, MAX_SCALE]` before forwarding.
pub const MAX_SCALE: f64 = 200.0;

/// Kinds of arguments a filter can accept.
///
/// This is the capability vocabulary: each filter declares the subset it
/// understands, and the pipeline forwards only that subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamKind {
    /// Unitless effect strength in `[0, 1]`.
    Intensity,
    /// Neighborhood radius in pixels.
    Radius,
    /// Block or cell size in pixels, derived from the intensity slider.
    Scale,
    /// Rotation in degrees.
    Angle,
    /// Effect origin in pixel coordinates. Never user-adjustable; the
    /// pipeline always supplies the image center.
    CenterPoint,
}

impl ParamKind {
    /// All parameter kinds, in declaration order.
    pub const ALL: [ParamKind; 5] = [
        ParamKind::Intensity,
        ParamKind::Radius,
        ParamKind::Scale,
        ParamKind::Angle,
        ParamKind::CenterPoint,
    ];

    /// Stable identifier used in logs and serialized descriptors.
    pub fn name(self) -> &'static str {
        match self {
            ParamKind::Intensity => "intensity",
            ParamKind::Radius => "radius",
            ParamKind::Scale => "scale",
            ParamKind::Angle => "angle",
            ParamKind::CenterPoint => "center-point",
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of parameter kinds one filter accepts.
///
/// Stored as a bit set so the whole catalog table can be built from `const`
/// expressions. Iteration order follows [`ParamKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    /// The empty set: a fixed-function filter with no adjustable arguments.
    pub const EMPTY: CapabilitySet = CapabilitySet(0);

    /// Build a set from a slice of kinds. Usable in `const` context.
    pub const fn of(kinds: &[ParamKind]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < kinds.len() {
            bits |= 1 << kinds[i] as u8;
            i += 1;
        }
        CapabilitySet(bits)
    }

    /// Whether this set contains `kind`.
    pub const fn contains(self, kind: ParamKind) -> bool {
        self.0 & (1 << kind as u8) != 0
    }

    /// Number of kinds in the set.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set is empty.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the contained kinds in [`ParamKind::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = ParamKind> {
        ParamKind::ALL.into_iter().filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<ParamKind> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = ParamKind>>(iter: I) -> Self {
        let mut set = CapabilitySet::EMPTY;
        for kind in iter {
            set.0 |= 1 << kind as u8;
        }
        set
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, kind) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", kind)?;
        }
        write!(f, "}}")
    }
}

// Serialized as the list of contained kinds so frontends see
// `["radius", "center-point"]` rather than a bit pattern.
impl Serialize for CapabilitySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for CapabilitySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let kinds = Vec::<ParamKind>::deserialize(deserializer)?;
        Ok(kinds.into_iter().collect())
    }
}

// ============================================================================
// Controls
// ============================================================================

/// The sliders a frontend can render for a session.
///
/// Controls are the user-facing side of the model; [`ParamKind`] is the
/// engine-facing side. One control can feed several kinds (the intensity
/// slider also drives `Scale`) and one kind can need two controls (`Radius`
/// is the product of the radius and multiplier sliders).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Effect strength slider.
    Intensity,
    /// Base radius slider.
    Radius,
    /// Radius multiplier slider, scaling the base radius into pixels.
    RadiusMultiplier,
    /// Rotation slider in degrees.
    Angle,
}

impl ControlKind {
    /// All controls, in the order a property panel lays them out.
    pub const ALL: [ControlKind; 4] = [
        ControlKind::Intensity,
        ControlKind::Radius,
        ControlKind::RadiusMultiplier,
        ControlKind::Angle,
    ];

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            ControlKind::Intensity => "Intensity",
            ControlKind::Radius => "Radius",
            ControlKind::RadiusMultiplier => "Radius Multiplier",
            ControlKind::Angle => "Angle",
        }
    }

    /// Declared slider range, inclusive on both ends.
    pub fn range(self) -> (f64, f64) {
        match self {
            ControlKind::Intensity => (0.0, 1.0),
            ControlKind::Radius => (0.0, 1.0),
            ControlKind::RadiusMultiplier => (1.0, 2000.0),
            ControlKind::Angle => (0.0, 360.0),
        }
    }

    /// Default slider position.
    pub fn default_value(self) -> f64 {
        match self {
            ControlKind::Intensity => 0.5,
            ControlKind::Radius => 0.5,
            ControlKind::RadiusMultiplier => 100.0,
            ControlKind::Angle => 0.0,
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Catalog-declared description of one slider: label, range, and default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlHint {
    /// Which slider this is.
    pub control: ControlKind,
    /// Label to render next to the slider.
    pub label: &'static str,
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive.
    pub max: f64,
    /// Starting position.
    pub default: f64,
}

impl ControlHint {
    /// The hint for one control, from its declared range and default.
    pub fn for_control(control: ControlKind) -> Self {
        let (min, max) = control.range();
        ControlHint {
            control,
            label: control.label(),
            min,
            max,
            default: control.default_value(),
        }
    }
}

// ============================================================================
// Parameter State
// ============================================================================

/// The slider state owned by one session.
///
/// Plain fields, mutated in place, never shared. State is kept for every
/// control regardless of the active filter, so switching filters preserves
/// slider positions and kinds outside a filter's capability set are simply
/// not forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterState {
    /// Effect strength in `[0, 1]`.
    pub intensity: f64,
    /// Base radius in `[0, 1]`.
    pub radius: f64,
    /// Radius multiplier in `[1, 2000]`.
    pub radius_multiplier: f64,
    /// Angle in degrees, `[0, 360]`.
    pub angle: f64,
}

impl Default for ParameterState {
    fn default() -> Self {
        ParameterState {
            intensity: ControlKind::Intensity.default_value(),
            radius: ControlKind::Radius.default_value(),
            radius_multiplier: ControlKind::RadiusMultiplier.default_value(),
            angle: ControlKind::Angle.default_value(),
        }
    }
}

impl ParameterState {
    /// Current value of one control.
    pub fn get(&self, control: ControlKind) -> f64 {
        match control {
            ControlKind::Intensity => self.intensity,
            ControlKind::Radius => self.radius,
            ControlKind::RadiusMultiplier => self.radius_multiplier,
            ControlKind::Angle => self.angle,
        }
    }

    /// Set one control, clamping to its declared range.
    ///
    /// Returns `false` and leaves the state untouched when `value` is not a
    /// finite number.
    pub fn set(&mut self, control: ControlKind, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let (min, max) = control.range();
        let value = value.clamp(min, max);
        match control {
            ControlKind::Intensity => self.intensity = value,
            ControlKind::Radius => self.radius = value,
            ControlKind::RadiusMultiplier => self.radius_multiplier = value,
            ControlKind::Angle => self.angle = value,
        }
        true
    }
}

// ============================================================================
// Forwarded Arguments
// ============================================================================

/// The arguments actually handed to the engine for one pass.
///
/// Built by [`FilterArgs::forward`] from the session's slider state,
/// restricted to the active filter's capability set. A `None` field means
/// the filter does not accept that kind.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterArgs {
    /// Raw intensity slider value.
    pub intensity: Option<f64>,
    /// Base radius times the radius multiplier, in pixels.
    pub radius: Option<f64>,
    /// Intensity slider mapped onto `[0, MAX_SCALE]` pixels.
    pub scale: Option<f64>,
    /// Raw angle slider value, in degrees.
    pub angle: Option<f64>,
    /// Image center `(width / 2, height / 2)` in pixel coordinates.
    pub center: Option<(f64, f64)>,
}

impl FilterArgs {
    /// Apply the fixed per-kind forwarding transforms.
    ///
    /// Kinds outside `caps` stay `None`; the slider state itself is never
    /// consulted for them and never modified.
    pub fn forward(caps: CapabilitySet, params: &ParameterState, extent: (u32, u32)) -> Self {
        let mut args = FilterArgs::default();
        if caps.contains(ParamKind::Intensity) {
            args.intensity = Some(params.intensity);
        }
        if caps.contains(ParamKind::Radius) {
            args.radius = Some(params.radius * params.radius_multiplier);
        }
        if caps.contains(ParamKind::Scale) {
            args.scale = Some(params.intensity * MAX_SCALE);
        }
        if caps.contains(ParamKind::Angle) {
            args.angle = Some(params.angle);
        }
        if caps.contains(ParamKind::CenterPoint) {
            args.center = Some((f64::from(extent.0) / 2.0, f64::from(extent.1) / 2.0));
        }
        args
    }
}

// ============================================================================
// Session Identity
// ============================================================================

/// Unique identifier for a session, used to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a session ID from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}
