//! Gradient Data Model
//!
//! Plain owned value types shared by the parser, the auto-layout pass and
//! the string builder. Numeric tokens are typed at the parse edge and turned
//! back into text only when formatting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gradient function kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    Linear,
    Radial,
    Conic,
}

impl GradientKind {
    /// CSS function name for this kind
    pub fn function_name(self) -> &'static str {
        match self {
            GradientKind::Linear => "linear-gradient",
            GradientKind::Radial => "radial-gradient",
            GradientKind::Conic => "conic-gradient",
        }
    }

    /// Classify a function name (case-insensitive)
    pub fn from_function_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "linear-gradient" => Some(GradientKind::Linear),
            "radial-gradient" => Some(GradientKind::Radial),
            "conic-gradient" => Some(GradientKind::Conic),
            _ => None,
        }
    }
}

impl fmt::Display for GradientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GradientKind::Linear => "linear",
            GradientKind::Radial => "radial",
            GradientKind::Conic => "conic",
        };
        f.write_str(name)
    }
}

/// Hue interpolation method for cylindrical color spaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HueInterpolation {
    #[default]
    Shorter,
    Longer,
    Increasing,
    Decreasing,
}

impl HueInterpolation {
    pub fn as_str(self) -> &'static str {
        match self {
            HueInterpolation::Shorter => "shorter",
            HueInterpolation::Longer => "longer",
            HueInterpolation::Increasing => "increasing",
            HueInterpolation::Decreasing => "decreasing",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "shorter" => Some(HueInterpolation::Shorter),
            "longer" => Some(HueInterpolation::Longer),
            "increasing" => Some(HueInterpolation::Increasing),
            "decreasing" => Some(HueInterpolation::Decreasing),
            _ => None,
        }
    }
}

/// Spaces with a hue channel, where `<mode> hue` is meaningful
pub const CYLINDRICAL_SPACES: [&str; 4] = ["hsl", "hwb", "lch", "oklch"];

/// Whether an interpolation space has a hue channel
pub fn is_cylindrical_space(space: &str) -> bool {
    CYLINDRICAL_SPACES.contains(&space)
}

/// Angle unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    Deg,
    Turn,
    Grad,
    Rad,
}

impl AngleUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            AngleUnit::Deg => "deg",
            AngleUnit::Turn => "turn",
            AngleUnit::Grad => "grad",
            AngleUnit::Rad => "rad",
        }
    }
}

/// An angle as authored: value plus unit, not normalized
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    pub value: f64,
    pub unit: AngleUnit,
}

impl Angle {
    pub fn new(value: f64, unit: AngleUnit) -> Self {
        Self { value, unit }
    }

    pub fn deg(value: f64) -> Self {
        Self::new(value, AngleUnit::Deg)
    }

    /// Parse a `<number><unit>` token such as `45deg` or `.25turn`
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim().to_ascii_lowercase();
        // `grad` must be tried before `rad`
        let units = [AngleUnit::Deg, AngleUnit::Turn, AngleUnit::Grad, AngleUnit::Rad];
        units.into_iter().find_map(|unit| {
            let number = token.strip_suffix(unit.as_str())?;
            parse_number(number).map(|value| Angle::new(value, unit))
        })
    }

    /// Convert to degrees, rounded to four decimals
    pub fn to_degrees(self) -> f64 {
        let degrees = match self.unit {
            AngleUnit::Deg => self.value,
            AngleUnit::Turn => self.value * 360.0,
            AngleUnit::Rad => self.value.to_degrees(),
            AngleUnit::Grad => self.value * 0.9,
        };
        round4(degrees)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_number(self.value), self.unit.as_str())
    }
}

/// Linear gradient direction keywords (`to top`, `to top right`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinearDirection {
    ToTop,
    ToTopRight,
    ToRight,
    ToBottomRight,
    ToBottom,
    ToBottomLeft,
    ToLeft,
    ToTopLeft,
}

impl LinearDirection {
    pub const ALL: [LinearDirection; 8] = [
        LinearDirection::ToTop,
        LinearDirection::ToTopRight,
        LinearDirection::ToRight,
        LinearDirection::ToBottomRight,
        LinearDirection::ToBottom,
        LinearDirection::ToBottomLeft,
        LinearDirection::ToLeft,
        LinearDirection::ToTopLeft,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LinearDirection::ToTop => "to top",
            LinearDirection::ToTopRight => "to top right",
            LinearDirection::ToRight => "to right",
            LinearDirection::ToBottomRight => "to bottom right",
            LinearDirection::ToBottom => "to bottom",
            LinearDirection::ToBottomLeft => "to bottom left",
            LinearDirection::ToLeft => "to left",
            LinearDirection::ToTopLeft => "to top left",
        }
    }

    /// Nominal angle in degrees (0 = to top, clockwise)
    pub fn degrees(self) -> f64 {
        match self {
            LinearDirection::ToTop => 0.0,
            LinearDirection::ToTopRight => 45.0,
            LinearDirection::ToRight => 90.0,
            LinearDirection::ToBottomRight => 135.0,
            LinearDirection::ToBottom => 180.0,
            LinearDirection::ToBottomLeft => 225.0,
            LinearDirection::ToLeft => 270.0,
            LinearDirection::ToTopLeft => 315.0,
        }
    }

    /// Direction whose nominal angle lies within half a degree of `degrees`
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        let normalized = degrees.rem_euclid(360.0);
        Self::ALL.into_iter().find(|dir| {
            let diff = (normalized - dir.degrees()).rem_euclid(360.0);
            diff.min(360.0 - diff) <= 0.5
        })
    }

    /// Build a direction from one or two side words, in either order
    pub fn from_sides(first: &str, second: Option<&str>) -> Option<Self> {
        let first = first.to_ascii_lowercase();
        let second = second.map(str::to_ascii_lowercase);
        let (vertical, horizontal) = match (first.as_str(), second.as_deref()) {
            (side, None) => match side {
                "top" | "bottom" => (Some(side), None),
                "left" | "right" => (None, Some(side)),
                _ => return None,
            },
            (a @ ("top" | "bottom"), Some(b @ ("left" | "right")))
            | (b @ ("left" | "right"), Some(a @ ("top" | "bottom"))) => (Some(a), Some(b)),
            _ => return None,
        };
        Some(match (vertical, horizontal) {
            (Some("top"), None) => LinearDirection::ToTop,
            (Some("bottom"), None) => LinearDirection::ToBottom,
            (None, Some("left")) => LinearDirection::ToLeft,
            (None, Some("right")) => LinearDirection::ToRight,
            (Some("top"), Some("left")) => LinearDirection::ToTopLeft,
            (Some("top"), Some("right")) => LinearDirection::ToTopRight,
            (Some("bottom"), Some("left")) => LinearDirection::ToBottomLeft,
            (Some("bottom"), Some("right")) => LinearDirection::ToBottomRight,
            _ => return None,
        })
    }
}

impl fmt::Display for LinearDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The nine canonical named positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamedPosition {
    Center,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
}

impl NamedPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            NamedPosition::Center => "center",
            NamedPosition::Top => "top",
            NamedPosition::TopRight => "top right",
            NamedPosition::Right => "right",
            NamedPosition::BottomRight => "bottom right",
            NamedPosition::Bottom => "bottom",
            NamedPosition::BottomLeft => "bottom left",
            NamedPosition::Left => "left",
            NamedPosition::TopLeft => "top left",
        }
    }

    /// Match the longest named position at the start of `text`.
    ///
    /// Accepts the `top center`-style aliases and folds them onto the
    /// canonical names. The match must end at a word boundary.
    pub fn from_prefix(text: &str) -> Option<Self> {
        // Longest names first so `top left` is not read as `top`
        const NAMES: [(&str, NamedPosition); 13] = [
            ("bottom center", NamedPosition::Bottom),
            ("bottom right", NamedPosition::BottomRight),
            ("bottom left", NamedPosition::BottomLeft),
            ("right center", NamedPosition::Right),
            ("left center", NamedPosition::Left),
            ("top center", NamedPosition::Top),
            ("top right", NamedPosition::TopRight),
            ("top left", NamedPosition::TopLeft),
            ("center", NamedPosition::Center),
            ("bottom", NamedPosition::Bottom),
            ("right", NamedPosition::Right),
            ("left", NamedPosition::Left),
            ("top", NamedPosition::Top),
        ];
        let text = text.trim_start().to_ascii_lowercase();
        NAMES.into_iter().find_map(|(name, position)| {
            let rest = text.strip_prefix(name)?;
            rest.chars()
                .next()
                .is_none_or(char::is_whitespace)
                .then_some(position)
        })
    }
}

impl fmt::Display for NamedPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explicit `at <x> <y>` position, kept as authored tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: String,
    pub y: String,
}

impl Position {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self { x: x.into(), y: y.into() }
    }

    /// Both coordinates denote 50%
    pub fn is_center(&self) -> bool {
        let half = |token: &str| {
            StopPosition::parse(token).is_some_and(|p| p.value() == 50.0)
        };
        half(&self.x) && half(&self.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coordinate = |token: &str| match StopPosition::parse(token) {
            Some(StopPosition::Unitless(value)) => format!("{}%", format_number(value)),
            _ => token.to_string(),
        };
        write!(f, "{} {}", coordinate(&self.x), coordinate(&self.y))
    }
}

/// Radial gradient shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadialShape {
    #[default]
    Circle,
    Ellipse,
}

impl RadialShape {
    pub fn as_str(self) -> &'static str {
        match self {
            RadialShape::Circle => "circle",
            RadialShape::Ellipse => "ellipse",
        }
    }
}

/// Radial extent keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeKeyword {
    ClosestSide,
    ClosestCorner,
    FarthestSide,
    #[default]
    FarthestCorner,
}

impl SizeKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            SizeKeyword::ClosestSide => "closest-side",
            SizeKeyword::ClosestCorner => "closest-corner",
            SizeKeyword::FarthestSide => "farthest-side",
            SizeKeyword::FarthestCorner => "farthest-corner",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "closest-side" => Some(SizeKeyword::ClosestSide),
            "closest-corner" => Some(SizeKeyword::ClosestCorner),
            "farthest-side" => Some(SizeKeyword::FarthestSide),
            "farthest-corner" => Some(SizeKeyword::FarthestCorner),
            _ => None,
        }
    }
}

/// Radial size: an extent keyword or a literal length pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadialSize {
    Keyword(SizeKeyword),
    Explicit(String),
}

impl Default for RadialSize {
    fn default() -> Self {
        RadialSize::Keyword(SizeKeyword::default())
    }
}

impl fmt::Display for RadialSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadialSize::Keyword(keyword) => f.write_str(keyword.as_str()),
            RadialSize::Explicit(literal) => f.write_str(literal),
        }
    }
}

/// A stop position along the gradient axis.
///
/// Lengths are not representable; the parser drops them so the stop falls
/// back to auto-layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopPosition {
    Unitless(f64),
    Percent(f64),
}

impl StopPosition {
    /// Parse a percentage or bare number; anything else is `None`
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        match token.strip_suffix('%') {
            Some(number) => parse_number(number).map(StopPosition::Percent),
            None => parse_number(token).map(StopPosition::Unitless),
        }
    }

    pub fn value(self) -> f64 {
        match self {
            StopPosition::Unitless(value) | StopPosition::Percent(value) => value,
        }
    }

    pub fn is_zero(self) -> bool {
        self.value() == 0.0
    }
}

impl fmt::Display for StopPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopPosition::Unitless(value) => f.write_str(&format_number(*value)),
            StopPosition::Percent(value) => write!(f, "{}%", format_number(*value)),
        }
    }
}

/// Who last decided a stop's positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// Freshly edited; the next layout pass must not touch the positions
    Explicit,
    #[default]
    AutoAssigned,
}

/// A color plus zero, one or two positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub color: String,
    /// Last auto-computed percentage for this slot
    pub auto: Option<f64>,
    pub position1: Option<StopPosition>,
    pub position2: Option<StopPosition>,
    /// `position2` was copied from `position1` by layout, not authored
    #[serde(default)]
    pub end_auto: bool,
    #[serde(default)]
    pub origin: Origin,
}

impl ColorStop {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            auto: None,
            position1: None,
            position2: None,
            end_auto: false,
            origin: Origin::AutoAssigned,
        }
    }

    pub fn with_positions(
        mut self,
        position1: Option<StopPosition>,
        position2: Option<StopPosition>,
    ) -> Self {
        self.position1 = position1;
        self.position2 = position2;
        self.end_auto = false;
        self
    }

    /// Set positions from an editor and protect them from the next layout pass
    pub fn pin(&mut self, position1: Option<StopPosition>, position2: Option<StopPosition>) {
        self.position1 = position1;
        self.position2 = position2;
        self.end_auto = false;
        self.origin = Origin::Explicit;
    }

    /// Whether `position` is the value auto-layout stamped last time
    pub fn is_auto_position(&self, position: StopPosition) -> bool {
        self.auto
            .is_some_and(|auto| position == StopPosition::Percent(auto))
    }
}

/// Interpolation hint between two stops (a bare percentage)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hint {
    pub auto: Option<f64>,
    pub percentage: Option<f64>,
}

impl Hint {
    pub fn new(percentage: f64) -> Self {
        Self { auto: None, percentage: Some(percentage) }
    }

    /// A hint left entirely to auto-layout
    pub fn unset() -> Self {
        Self::default()
    }
}

/// One entry of a stop list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StopOrHint {
    Stop(ColorStop),
    Hint(Hint),
}

impl StopOrHint {
    pub fn is_stop(&self) -> bool {
        matches!(self, StopOrHint::Stop(_))
    }

    pub fn is_hint(&self) -> bool {
        matches!(self, StopOrHint::Hint(_))
    }

    pub fn as_stop(&self) -> Option<&ColorStop> {
        match self {
            StopOrHint::Stop(stop) => Some(stop),
            StopOrHint::Hint(_) => None,
        }
    }

    pub fn as_hint(&self) -> Option<&Hint> {
        match self {
            StopOrHint::Hint(hint) => Some(hint),
            StopOrHint::Stop(_) => None,
        }
    }
}

impl From<ColorStop> for StopOrHint {
    fn from(stop: ColorStop) -> Self {
        StopOrHint::Stop(stop)
    }
}

impl From<Hint> for StopOrHint {
    fn from(hint: Hint) -> Self {
        StopOrHint::Hint(hint)
    }
}

/// Linear prelude: keyword wins over angle, at most one is set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearPrelude {
    pub keyword: Option<LinearDirection>,
    pub angle: Option<Angle>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RadialPrelude {
    pub shape: Option<RadialShape>,
    pub size: Option<RadialSize>,
    pub named_position: Option<NamedPosition>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConicPrelude {
    pub from: Option<Angle>,
    pub named_position: Option<NamedPosition>,
    pub position: Option<Position>,
}

/// Kind-specific part of a parsed gradient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Linear(LinearPrelude),
    Radial(RadialPrelude),
    Conic(ConicPrelude),
}

impl Geometry {
    pub fn kind(&self) -> GradientKind {
        match self {
            Geometry::Linear(_) => GradientKind::Linear,
            Geometry::Radial(_) => GradientKind::Radial,
            Geometry::Conic(_) => GradientKind::Conic,
        }
    }
}

/// Parser output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedGradient {
    pub space: Option<String>,
    pub interpolation: Option<HueInterpolation>,
    pub geometry: Geometry,
    pub stops: Vec<StopOrHint>,
}

impl ParsedGradient {
    pub fn kind(&self) -> GradientKind {
        self.geometry.kind()
    }

    /// Color stops only, hints skipped
    pub fn color_stops(&self) -> impl Iterator<Item = &ColorStop> {
        self.stops.iter().filter_map(StopOrHint::as_stop)
    }
}

/// Parse `[-+]?\d*\.?\d+` into a number
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let valid = match frac {
        Some(frac) => all_digits(int) && !frac.is_empty() && all_digits(frac),
        None => !int.is_empty() && all_digits(int),
    };
    if !valid {
        return None;
    }
    text.parse().ok()
}

fn round4(value: f64) -> f64 {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    // Avoid printing `-0`
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Shortest text for a number, at most four decimals
pub(crate) fn format_number(value: f64) -> String {
    round4(value).to_string()
}
