//! Gradient CSS
//!
//! Round-trip conversion between CSS gradient text and a gradient model:
//! parse → auto-layout → build → re-parse.
//!
//! # Example
//! ```rust,ignore
//! use gradient_css::{parse_gradient, build_gradient_strings, GradientLayer};
//!
//! let parsed = parse_gradient("linear-gradient(to right in oklch, red, blue)")?;
//! let layer = GradientLayer::from_parsed(parsed);
//! let css = build_gradient_strings(&layer);
//! println!("{}\n{}", css.modern, css.classic);
//! ```

mod builder;
mod color;
mod error;
mod layer;
pub mod model;
mod parser;
mod split;
mod stops;

pub use builder::{BuildOptions, GradientBuilder, GradientStrings, build_gradient_strings};
pub use color::{ColorSupport, CssColors, hex_string};
pub use error::ParseError;
pub use layer::{ConicSettings, DEFAULT_SPACE, GradientLayer, LinearSettings, RadialSettings};
pub use model::{
    Angle, AngleUnit, ColorStop, ConicPrelude, Geometry, GradientKind, Hint, HueInterpolation,
    LinearDirection, LinearPrelude, NamedPosition, Origin, ParsedGradient, Position,
    RadialPrelude, RadialShape, RadialSize, SizeKeyword, StopOrHint, StopPosition,
};
pub use parser::{GradientParser, parse_gradient};
pub use split::split_top_level;
pub use stops::{default_positions, remove_stop, update_stops};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
