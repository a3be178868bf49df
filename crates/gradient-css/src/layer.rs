//! Gradient Layer
//!
//! The editor-facing snapshot of one gradient: every field resolved to a
//! concrete value, angles in degrees. This is what the string builder
//! renders. [`GradientLayer::from_parsed`] imports parser output.

use serde::{Deserialize, Serialize};

use crate::model::{
    ColorStop, Geometry, GradientKind, Hint, HueInterpolation, LinearDirection, NamedPosition,
    ParsedGradient, Position, RadialShape, RadialSize, StopOrHint,
};
use crate::stops::update_stops;

/// Interpolation space used when a gradient does not name one
pub const DEFAULT_SPACE: &str = "oklab";

/// Linear settings. A named direction wins; `None` means a custom angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearSettings {
    pub named_angle: Option<LinearDirection>,
    /// Angle in degrees
    pub angle: Option<f64>,
}

impl Default for LinearSettings {
    fn default() -> Self {
        Self::from_direction(LinearDirection::ToBottom)
    }
}

impl LinearSettings {
    /// Named direction, with the numeric angle kept in sync
    pub fn from_direction(direction: LinearDirection) -> Self {
        Self {
            named_angle: Some(direction),
            angle: Some(direction.degrees()),
        }
    }

    /// Numeric angle; snaps to a named direction within half a degree.
    ///
    /// The snap is lossy on non-square boxes: `45deg` and `to top right`
    /// only coincide when width equals height.
    pub fn from_angle(degrees: f64) -> Self {
        Self {
            named_angle: LinearDirection::from_degrees(degrees),
            angle: Some(degrees),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialSettings {
    pub shape: RadialShape,
    pub size: RadialSize,
    pub named_position: Option<NamedPosition>,
    pub position: Option<Position>,
}

impl Default for RadialSettings {
    fn default() -> Self {
        Self {
            shape: RadialShape::Circle,
            size: RadialSize::default(),
            named_position: Some(NamedPosition::Center),
            position: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConicSettings {
    /// Start angle in degrees
    pub angle: f64,
    pub named_position: Option<NamedPosition>,
    pub position: Option<Position>,
}

impl Default for ConicSettings {
    fn default() -> Self {
        Self {
            angle: 0.0,
            named_position: Some(NamedPosition::Center),
            position: None,
        }
    }
}

/// A complete gradient snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientLayer {
    pub kind: GradientKind,
    pub space: String,
    pub interpolation: HueInterpolation,
    pub stops: Vec<StopOrHint>,
    pub linear: LinearSettings,
    pub radial: RadialSettings,
    pub conic: ConicSettings,
}

impl GradientLayer {
    /// Layer of the given kind with default settings and no stops
    pub fn new(kind: GradientKind) -> Self {
        Self {
            kind,
            space: DEFAULT_SPACE.to_string(),
            interpolation: HueInterpolation::default(),
            stops: Vec::new(),
            linear: LinearSettings::default(),
            radial: RadialSettings::default(),
            conic: ConicSettings::default(),
        }
    }

    /// Import a parsed gradient.
    ///
    /// Missing fields take their defaults, angles are converted to degrees,
    /// a hint is synthesized between adjacent stops when the source had
    /// none, and one auto-layout pass is run.
    pub fn from_parsed(parsed: ParsedGradient) -> Self {
        let mut layer = Self::new(parsed.geometry.kind());
        if let Some(space) = parsed.space {
            layer.space = space;
        }
        if let Some(interpolation) = parsed.interpolation {
            layer.interpolation = interpolation;
        }

        match parsed.geometry {
            Geometry::Linear(linear) => {
                layer.linear = match (linear.keyword, linear.angle) {
                    (Some(direction), _) => LinearSettings::from_direction(direction),
                    (None, Some(angle)) => LinearSettings::from_angle(angle.to_degrees()),
                    (None, None) => LinearSettings::from_direction(LinearDirection::ToBottom),
                };
            }
            Geometry::Radial(radial) => {
                layer.radial.shape = radial.shape.unwrap_or_default();
                layer.radial.size = radial.size.unwrap_or_default();
                if radial.named_position.is_some() || radial.position.is_some() {
                    layer.radial.named_position = radial.named_position;
                    layer.radial.position = radial.position;
                }
            }
            Geometry::Conic(conic) => {
                layer.conic.angle = conic.from.map_or(0.0, |from| from.to_degrees());
                if conic.named_position.is_some() || conic.position.is_some() {
                    layer.conic.named_position = conic.named_position;
                    layer.conic.position = conic.position;
                }
            }
        }

        layer.stops = update_stops(with_hints(parsed.stops));
        tracing::debug!("Imported {} layer with {} entries", layer.kind, layer.stops.len());
        layer
    }

    /// Set a numeric linear angle, syncing the named direction
    pub fn set_linear_angle(&mut self, degrees: f64) {
        self.linear = LinearSettings::from_angle(degrees);
    }

    /// Set a named linear direction, syncing the numeric angle
    pub fn set_linear_direction(&mut self, direction: LinearDirection) {
        self.linear = LinearSettings::from_direction(direction);
    }

    /// Replace the stop list and run an auto-layout pass over it
    pub fn set_stops(&mut self, stops: Vec<StopOrHint>) {
        self.stops = update_stops(stops);
    }

    pub fn color_stops(&self) -> impl Iterator<Item = &ColorStop> {
        self.stops.iter().filter_map(StopOrHint::as_stop)
    }
}

impl From<ParsedGradient> for GradientLayer {
    fn from(parsed: ParsedGradient) -> Self {
        Self::from_parsed(parsed)
    }
}

/// Interleave an unset hint between adjacent stops unless hints exist
fn with_hints(stops: Vec<StopOrHint>) -> Vec<StopOrHint> {
    if stops.iter().any(StopOrHint::is_hint) {
        return stops;
    }
    let mut interleaved = Vec::with_capacity(stops.len() * 2);
    for entry in stops {
        if !interleaved.is_empty() {
            interleaved.push(StopOrHint::Hint(Hint::unset()));
        }
        interleaved.push(entry);
    }
    interleaved
}
