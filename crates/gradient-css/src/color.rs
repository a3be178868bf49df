//! Color collaborator
//!
//! The gradient core treats colors as opaque tokens. Validation and the
//! sRGB fallback conversion are delegated to a [`ColorSupport`]
//! implementation; [`CssColors`] backs it with lightningcss.

use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;

/// Color validation and conversion used by the parser and builder
pub trait ColorSupport: Send + Sync {
    /// Whether `token` is a complete, valid CSS color
    fn is_valid_color(&self, token: &str) -> bool;

    /// Convert `token` to an sRGB hex string, clipping out-of-gamut colors.
    /// `None` leaves the token unconverted.
    fn to_srgb_hex(&self, token: &str) -> Option<String>;
}

/// lightningcss-backed color support
#[derive(Debug, Clone, Copy, Default)]
pub struct CssColors;

impl CssColors {
    pub fn new() -> Self {
        Self
    }

    fn parse(token: &str) -> Option<CssColor> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        CssColor::parse_string(token).ok()
    }
}

impl ColorSupport for CssColors {
    fn is_valid_color(&self, token: &str) -> bool {
        Self::parse(token).is_some()
    }

    fn to_srgb_hex(&self, token: &str) -> Option<String> {
        let color = Self::parse(token)?;
        match color.to_rgb() {
            Ok(CssColor::RGBA(rgba)) => Some(hex_string(rgba.red, rgba.green, rgba.blue, rgba.alpha)),
            _ => {
                tracing::debug!("No sRGB conversion for color {:?}", token);
                None
            }
        }
    }
}

/// Format channels as `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`, shortest first
pub fn hex_string(red: u8, green: u8, blue: u8, alpha: u8) -> String {
    let channels: &[u8] = if alpha == u8::MAX {
        &[red, green, blue]
    } else {
        &[red, green, blue, alpha]
    };
    let shortenable = channels.iter().all(|c| c >> 4 == c & 0x0f);

    let mut hex = String::with_capacity(9);
    hex.push('#');
    for channel in channels {
        if shortenable {
            hex.push_str(&format!("{:x}", channel & 0x0f));
        } else {
            hex.push_str(&format!("{:02x}", channel));
        }
    }
    hex
}
