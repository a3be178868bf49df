//! Gradient String Builder
//!
//! Renders a [`GradientLayer`] back to CSS in two dialects:
//! - modern: multi-line, keeps the interpolation space, colors as authored
//! - classic: one header line, colors converted to sRGB hex, no space clause
//!
//! Default values (angle, position, auto stop positions, auto hints) are
//! left out so the output stays minimal.

use crate::color::{ColorSupport, CssColors};
use crate::layer::{ConicSettings, GradientLayer, LinearSettings, RadialSettings};
use crate::model::{
    GradientKind, HueInterpolation, LinearDirection, NamedPosition, Position, StopOrHint,
    format_number, is_cylindrical_space,
};

/// Color tokens at least this long switch the stop list to multi-line
const LONG_COLOR: usize = 20;

/// Indentation of argument lines in multi-line output
const INDENT: &str = "    ";

/// Builder options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Force (`Some(true)`) or forbid (`Some(false)`) one stop per line.
    /// `None` decides from the color tokens.
    pub new_lines: Option<bool>,

    /// Leave out hints sitting exactly at 50%
    pub elide_midpoint_hints: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            new_lines: None,
            elide_midpoint_hints: true,
        }
    }
}

/// Both renderings of a layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientStrings {
    pub modern: String,
    pub classic: String,
}

/// CSS gradient builder
#[derive(Debug, Clone, Default)]
pub struct GradientBuilder<C = CssColors> {
    options: BuildOptions,
    colors: C,
}

impl GradientBuilder {
    /// Create a builder converting colors with lightningcss
    pub fn new() -> Self {
        Self::with_colors(CssColors::new())
    }
}

impl<C: ColorSupport> GradientBuilder<C> {
    /// Create a builder with a custom color collaborator
    pub fn with_colors(colors: C) -> Self {
        Self {
            options: BuildOptions::default(),
            colors,
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Render both dialects
    pub fn build(&self, layer: &GradientLayer) -> GradientStrings {
        GradientStrings {
            modern: self.modern(layer),
            classic: self.classic(layer),
        }
    }

    /// Multi-line rendering with the interpolation space
    pub fn modern(&self, layer: &GradientLayer) -> String {
        let space = space_clause(&layer.space, layer.interpolation);
        let header = match layer.kind {
            GradientKind::Linear => join_tokens([linear_angle(&layer.linear), space]),
            GradientKind::Radial => {
                let (size, shape, at) = radial_tokens(&layer.radial);
                join_tokens([size, shape, at, space])
            }
            GradientKind::Conic => {
                let (from, at) = conic_tokens(&layer.conic);
                join_tokens([from, at, space])
            }
        };
        let stops = self.stops_to_string(&layer.stops, false);

        let mut css = format!("{}(\n", layer.kind.function_name());
        if !header.is_empty() {
            css.push_str(&format!("{INDENT}{header},\n"));
        }
        css.push_str(&format!("{INDENT}{stops}\n  )"));
        css
    }

    /// Single-header rendering with sRGB hex colors
    pub fn classic(&self, layer: &GradientLayer) -> String {
        let header = match layer.kind {
            GradientKind::Linear => linear_angle(&layer.linear),
            GradientKind::Radial => {
                let (size, shape, at) = radial_tokens(&layer.radial);
                join_tokens([size, shape, at])
            }
            GradientKind::Conic => {
                let (from, at) = conic_tokens(&layer.conic);
                join_tokens([from, at])
            }
        };
        let stops = self.stops_to_string(&layer.stops, true);

        if header.is_empty() {
            format!("{}({stops})", layer.kind.function_name())
        } else {
            format!("{}({header}, {stops})", layer.kind.function_name())
        }
    }

    /// Render the stop list.
    ///
    /// With `convert_colors` every color goes through the collaborator's
    /// sRGB conversion, falling back to the authored token.
    pub fn stops_to_string(&self, stops: &[StopOrHint], convert_colors: bool) -> String {
        let first_stop = stops.iter().position(StopOrHint::is_stop);
        let mut rendered = Vec::with_capacity(stops.len());

        for (index, entry) in stops.iter().enumerate() {
            match entry {
                StopOrHint::Stop(stop) => {
                    // A start/end pair both stamped by layout says nothing
                    let auto_pair = stop.end_auto
                        && matches!(
                            (stop.position1, stop.position2),
                            (Some(start), Some(end)) if start == end && stop.is_auto_position(start)
                        );
                    let start = stop
                        .position1
                        .filter(|&p| !stop.is_auto_position(p))
                        .filter(|p| !(Some(index) == first_stop && p.is_zero()));
                    let end = if auto_pair { None } else { stop.position2 };

                    let positions = match (start.map(|p| p.to_string()), end.map(|p| p.to_string())) {
                        (Some(a), Some(b)) if a == b => vec![a],
                        (Some(a), Some(b)) => vec![a, b],
                        (Some(a), None) | (None, Some(a)) => vec![a],
                        (None, None) => Vec::new(),
                    };

                    let color = if convert_colors {
                        self.colors
                            .to_srgb_hex(&stop.color)
                            .unwrap_or_else(|| stop.color.clone())
                    } else {
                        stop.color.clone()
                    };
                    rendered.push(Rendered::Stop { color, positions });
                }
                StopOrHint::Hint(hint) => {
                    let Some(percentage) = hint.percentage else {
                        continue;
                    };
                    if hint.auto == Some(percentage) {
                        continue;
                    }
                    if self.options.elide_midpoint_hints && percentage == 50.0 {
                        continue;
                    }
                    rendered.push(Rendered::Hint(format!("{}%", format_number(percentage))));
                }
            }
        }

        let colors = rendered.iter().filter_map(|entry| match entry {
            Rendered::Stop { color, .. } => Some(color.as_str()),
            Rendered::Hint(_) => None,
        });
        let mut max_len = 0;
        let mut long_color = false;
        for color in colors {
            let len = color.chars().count();
            max_len = max_len.max(len);
            long_color |= len >= LONG_COLOR || color.contains(|c: char| c == '(' || c.is_whitespace());
        }

        if !self.options.new_lines.unwrap_or(long_color) {
            return rendered
                .iter()
                .map(|entry| match entry {
                    Rendered::Stop { color, positions } => {
                        std::iter::once(color.as_str())
                            .chain(positions.iter().map(String::as_str))
                            .collect::<Vec<_>>()
                            .join(" ")
                    }
                    Rendered::Hint(text) => text.clone(),
                })
                .collect::<Vec<_>>()
                .join(", ");
        }

        // One entry per line, first positions aligned after the longest color
        let separator = format!(",\n{INDENT}");
        rendered
            .iter()
            .map(|entry| match entry {
                Rendered::Stop { color, positions } => {
                    let mut line = color.clone();
                    if let Some((first, rest)) = positions.split_first() {
                        let pad = (max_len + 1).saturating_sub(color.chars().count()).max(1);
                        line.push_str(&" ".repeat(pad));
                        line.push_str(first);
                        for position in rest {
                            line.push(' ');
                            line.push_str(position);
                        }
                    }
                    line
                }
                Rendered::Hint(text) => text.clone(),
            })
            .collect::<Vec<_>>()
            .join(separator.as_str())
    }
}

/// Render a layer with the default builder
pub fn build_gradient_strings(layer: &GradientLayer) -> GradientStrings {
    GradientBuilder::new().build(layer)
}

enum Rendered {
    Stop { color: String, positions: Vec<String> },
    Hint(String),
}

fn join_tokens<const N: usize>(tokens: [String; N]) -> String {
    tokens
        .into_iter()
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `in <space>`, with `<mode> hue` for hue spaces off the default mode
fn space_clause(space: &str, interpolation: HueInterpolation) -> String {
    if space.is_empty() {
        return String::new();
    }
    if is_cylindrical_space(space) && interpolation != HueInterpolation::Shorter {
        format!("in {space} {} hue", interpolation.as_str())
    } else {
        format!("in {space}")
    }
}

/// Direction token; empty for the `to bottom` / 180deg default
fn linear_angle(linear: &LinearSettings) -> String {
    match (linear.named_angle, linear.angle) {
        (Some(LinearDirection::ToBottom), _) => String::new(),
        (Some(direction), _) => direction.as_str().to_string(),
        (None, Some(angle)) if angle.rem_euclid(360.0) == 180.0 => String::new(),
        (None, Some(angle)) => format!("{}deg", format_number(angle)),
        (None, None) => String::new(),
    }
}

/// `at <position>`; empty for center or no position
fn at_position(named: Option<NamedPosition>, position: Option<&Position>) -> String {
    match (named, position) {
        (Some(NamedPosition::Center), _) => String::new(),
        (Some(named), _) => format!("at {named}"),
        (None, Some(position)) if position.is_center() => String::new(),
        (None, Some(position)) => format!("at {position}"),
        (None, None) => String::new(),
    }
}

fn radial_tokens(radial: &RadialSettings) -> (String, String, String) {
    (
        radial.size.to_string(),
        radial.shape.as_str().to_string(),
        at_position(radial.named_position, radial.position.as_ref()),
    )
}

fn conic_tokens(conic: &ConicSettings) -> (String, String) {
    let from = if conic.angle.rem_euclid(360.0) == 0.0 {
        String::new()
    } else {
        format!("from {}deg", format_number(conic.angle))
    };
    (from, at_position(conic.named_position, conic.position.as_ref()))
}
