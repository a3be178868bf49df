//! Gradient Parser
//!
//! Turns a single CSS gradient function call into a [`ParsedGradient`].
//! The argument list is split on top-level commas; everything before the
//! first color stop is the prelude (direction, shape, position and
//! interpolation space), the rest becomes the stop/hint sequence.

use std::sync::LazyLock;

use regex::Regex;

use crate::color::{ColorSupport, CssColors};
use crate::error::ParseError;
use crate::model::{
    Angle, ColorStop, ConicPrelude, Geometry, GradientKind, Hint, HueInterpolation,
    LinearDirection, LinearPrelude, NamedPosition, ParsedGradient, Position, RadialPrelude,
    RadialShape, RadialSize, SizeKeyword, StopOrHint, StopPosition, parse_number,
};
use crate::split::{matching_paren, split_top_level};

static SPACE_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bin\s+([a-z0-9-]+)").expect("valid regex"));
static HUE_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(shorter|longer|increasing|decreasing)\s+hue\b").expect("valid regex")
});
static FOREIGN_VOCABULARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)circle|ellipse|closest-|farthest-|\bat\s").expect("valid regex")
});
static DIRECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bto\s+(top|bottom|left|right)(?:\s+(left|right|top|bottom))?\b")
        .expect("valid regex")
});
static LINEAR_ANGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\s)([-+]?\d*\.?\d+(?:deg|turn|grad|rad))(?:\s|$)").expect("valid regex")
});
static SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(circle|ellipse)\b").expect("valid regex"));
static SIZE_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(closest-side|closest-corner|farthest-side|farthest-corner)\b")
        .expect("valid regex")
});
static SIZE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d+(?:\.\d+)?(?:%|px|em|rem|vw|vh))\s+(\d+(?:\.\d+)?(?:%|px|em|rem|vw|vh))")
        .expect("valid regex")
});
static FROM_ANGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bfrom\s+([-+]?\d*\.?\d+(?:deg|turn|grad|rad))\b").expect("valid regex")
});
static AT_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\bat\s+(.+)$").expect("valid regex"));

/// CSS gradient parser
#[derive(Debug, Clone, Default)]
pub struct GradientParser<C = CssColors> {
    colors: C,
}

impl GradientParser {
    /// Create a parser validating colors with lightningcss
    pub fn new() -> Self {
        Self { colors: CssColors::new() }
    }
}

impl<C: ColorSupport> GradientParser<C> {
    /// Create a parser with a custom color collaborator
    pub fn with_colors(colors: C) -> Self {
        Self { colors }
    }

    /// Parse a gradient function call.
    ///
    /// Trailing semicolons are tolerated. When several comma-separated
    /// gradient layers are given, only the first is parsed.
    pub fn parse(&self, text: &str) -> Result<ParsedGradient, ParseError> {
        let input = text.trim().trim_end_matches(';').trim_end();

        let (kind, body) = function_body(input)?;
        let segments = split_top_level(body, ',');
        if segments.len() < 2 {
            return Err(ParseError::TooFewSegments { found: segments.len() });
        }

        let (prelude, first_color_index) = self.split_prelude(&segments);
        let (space, interpolation, prelude) = extract_space(&prelude);

        let geometry = match kind {
            GradientKind::Linear => Geometry::Linear(parse_linear(&prelude)?),
            GradientKind::Radial => Geometry::Radial(parse_radial(&prelude)),
            GradientKind::Conic => Geometry::Conic(parse_conic(&prelude)),
        };

        let stops = self.parse_stops(&segments[first_color_index..]);
        let found = stops.iter().filter(|entry| entry.is_stop()).count();
        if found < 2 {
            return Err(ParseError::TooFewStops { found });
        }

        tracing::debug!(
            "Parsed {} gradient: {} entries, space {:?}",
            kind,
            stops.len(),
            space
        );

        Ok(ParsedGradient { space, interpolation, geometry, stops })
    }

    /// Collect the non-color segments before the first color stop.
    ///
    /// Returns the prelude text and the index of the first color segment
    /// (`segments.len()` when there is none).
    fn split_prelude(&self, segments: &[&str]) -> (String, usize) {
        let mut prelude: Vec<&str> = Vec::new();
        for (index, segment) in segments.iter().enumerate() {
            if is_hint(segment) {
                continue;
            }
            if self.leading_color(segment).is_some() {
                return (prelude.join(", "), index);
            }
            prelude.push(segment);
        }
        (prelude.join(", "), segments.len())
    }

    fn parse_stops(&self, segments: &[&str]) -> Vec<StopOrHint> {
        let mut stops = Vec::with_capacity(segments.len());
        for segment in segments.iter().filter(|s| !s.is_empty()) {
            if is_hint(segment) {
                let percentage = segment.strip_suffix('%').and_then(parse_number);
                stops.push(StopOrHint::Hint(Hint { auto: None, percentage }));
                continue;
            }

            let Some((color, rest)) = self.leading_color(segment) else {
                tracing::debug!("Skipping gradient segment {:?}: no valid color", segment);
                continue;
            };

            // Only percentages and unitless numbers are kept; a length in
            // either slot leaves that slot to auto-layout.
            let mut tokens = rest.split_whitespace().map(StopPosition::parse);
            let position1 = tokens.next().flatten();
            let position2 = tokens.next().flatten();

            stops.push(StopOrHint::Stop(
                ColorStop::new(color).with_positions(position1, position2),
            ));
        }
        stops
    }

    /// Split a segment into its validated leading color and the remainder
    fn leading_color<'a>(&self, segment: &'a str) -> Option<(&'a str, &'a str)> {
        let (color, rest) = color_token(segment)?;
        self.colors
            .is_valid_color(color)
            .then(|| (color, rest.trim()))
    }
}

/// Parse a gradient with the default parser
pub fn parse_gradient(text: &str) -> Result<ParsedGradient, ParseError> {
    GradientParser::new().parse(text)
}

/// Classify the function and return the text between its parentheses
fn function_body(input: &str) -> Result<(GradientKind, &str), ParseError> {
    let name_end = input
        .find(|c: char| !(c.is_ascii_alphabetic() || c == '-'))
        .unwrap_or(input.len());
    let name = &input[..name_end];

    let open = name_end + (input[name_end..].len() - input[name_end..].trim_start().len());
    if name.is_empty() || !input[open..].starts_with('(') {
        return Err(ParseError::MissingOpenParen {
            index: Some(char_index(input, open)),
        });
    }

    let kind = GradientKind::from_function_name(name)
        .ok_or_else(|| ParseError::UnknownFunction { name: name.to_ascii_lowercase() })?;

    let close = matching_paren(input, open).ok_or(ParseError::MissingCloseParen {
        index: char_index(input, open),
    })?;

    let trailing = input[close + 1..].trim_start();
    if !trailing.is_empty() && !trailing.starts_with(',') {
        return Err(ParseError::TrailingContent {
            index: char_index(input, input.len() - trailing.len()),
        });
    }

    Ok((kind, input[open + 1..close].trim()))
}

fn char_index(text: &str, byte_index: usize) -> usize {
    text[..byte_index].chars().count()
}

/// A bare percentage segment such as `25%`
fn is_hint(segment: &str) -> bool {
    matches!(StopPosition::parse(segment), Some(StopPosition::Percent(_)))
}

/// Extract the leading color token of a stop segment, unvalidated.
///
/// Recognizes hex colors, function colors with nested parentheses, and
/// bare named colors.
fn color_token(segment: &str) -> Option<(&str, &str)> {
    let segment = segment.trim();

    if let Some(digits) = segment.strip_prefix('#') {
        let len = digits
            .find(|c: char| !c.is_ascii_hexdigit())
            .unwrap_or(digits.len());
        if !matches!(len, 3 | 4 | 6 | 8) {
            return None;
        }
        return Some(segment.split_at(len + 1));
    }

    if !segment.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    let ident_end = segment
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(segment.len());
    if segment[ident_end..].starts_with('(') {
        let end = matching_paren(segment, ident_end).map_or(segment.len(), |close| close + 1);
        return Some(segment.split_at(end));
    }

    let name_end = segment
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(segment.len());
    Some(segment.split_at(name_end))
}

/// Remove the `in <space> [<mode> hue]` clause from a prelude
fn extract_space(prelude: &str) -> (Option<String>, Option<HueInterpolation>, String) {
    let Some(caps) = SPACE_CLAUSE.captures(prelude) else {
        return (None, None, prelude.trim().to_string());
    };
    let space = caps[1].to_ascii_lowercase();
    let interpolation = HUE_CLAUSE
        .captures(prelude)
        .and_then(|hue| HueInterpolation::from_keyword(&hue[1]));

    let rest = SPACE_CLAUSE.replacen(prelude, 1, "");
    let rest = HUE_CLAUSE.replacen(&rest, 1, "");
    (Some(space), interpolation, rest.trim().to_string())
}

fn parse_linear(prelude: &str) -> Result<LinearPrelude, ParseError> {
    if let Some(found) = FOREIGN_VOCABULARY.find(prelude) {
        return Err(ParseError::ForeignVocabulary {
            token: found.as_str().trim().to_ascii_lowercase(),
        });
    }

    if let Some(caps) = DIRECTION.captures(prelude) {
        let second = caps.get(2).map(|m| m.as_str());
        // `to top bottom` keeps only the first side
        let keyword = LinearDirection::from_sides(&caps[1], second)
            .or_else(|| LinearDirection::from_sides(&caps[1], None));
        if keyword.is_some() {
            return Ok(LinearPrelude { keyword, angle: None });
        }
    }

    let angle = LINEAR_ANGLE
        .captures(prelude)
        .and_then(|caps| Angle::parse(&caps[1]));
    Ok(LinearPrelude { keyword: None, angle })
}

fn parse_radial(prelude: &str) -> RadialPrelude {
    let (head, at) = split_at_clause(prelude);

    let shape = SHAPE
        .captures(head)
        .map(|caps| match caps[1].to_ascii_lowercase().as_str() {
            "circle" => RadialShape::Circle,
            _ => RadialShape::Ellipse,
        });

    let size = SIZE_KEYWORD
        .captures(head)
        .and_then(|caps| SizeKeyword::from_keyword(&caps[1]))
        .map(RadialSize::Keyword)
        .or_else(|| {
            SIZE_PAIR
                .captures(head)
                .map(|caps| RadialSize::Explicit(format!("{} {}", &caps[1], &caps[2])))
        });

    let (named_position, position) = extract_position(at);
    RadialPrelude { shape, size, named_position, position }
}

fn parse_conic(prelude: &str) -> ConicPrelude {
    let from = FROM_ANGLE
        .captures(prelude)
        .and_then(|caps| Angle::parse(&caps[1]));
    let (_, at) = split_at_clause(prelude);
    let (named_position, position) = extract_position(at);
    ConicPrelude { from, named_position, position }
}

/// Split a prelude into the part before `at` and the position text after it
fn split_at_clause(prelude: &str) -> (&str, Option<&str>) {
    match AT_CLAUSE.captures(prelude) {
        Some(caps) => {
            let start = caps.get(0).map_or(prelude.len(), |m| m.start());
            (&prelude[..start], caps.get(1).map(|m| m.as_str().trim()))
        }
        None => (prelude, None),
    }
}

/// Named position by longest prefix, else the first two tokens as `x y`
fn extract_position(at: Option<&str>) -> (Option<NamedPosition>, Option<Position>) {
    let Some(rest) = at else {
        return (None, None);
    };
    if let Some(named) = NamedPosition::from_prefix(rest) {
        return (Some(named), None);
    }
    let mut tokens = rest.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(x), Some(y)) => (None, Some(Position::new(x, y))),
        _ => (None, None),
    }
}
