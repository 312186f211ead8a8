//! Letterbox background color: hex (`#RGB`, `#RRGGBB`) and common named colors.

use core::fmt;
use core::str::FromStr;

use image::Rgb;

use crate::error::{Result, TileError};

/// Opaque sRGB fill for the margins left by a contain fit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Background {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Background {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// White, the paper color.
    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::white()
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Background {
    type Err = TileError;

    /// Accepts `#RGB` / `RGB`, `#RRGGBB` / `RRGGBB`, or a named color
    /// (case-insensitive).
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let hex = text.strip_prefix('#').unwrap_or(text);
        from_hex(hex)
            .or_else(|| named(text))
            .ok_or_else(|| TileError::InvalidColor(s.to_string()))
    }
}

/// Three or six hex digits; a short form doubles each digit.
fn from_hex(hex: &str) -> Option<Background> {
    // from_str_radix alone would accept a leading '+'.
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
    match hex.len() {
        3 => {
            let [r, g, b] = [0, 1, 2].map(|i| channel(&hex[i..=i]).map(|v| v * 0x11));
            Some(Background::rgb(r?, g?, b?))
        }
        6 => {
            let [r, g, b] = [0, 2, 4].map(|i| channel(&hex[i..i + 2]));
            Some(Background::rgb(r?, g?, b?))
        }
        _ => None,
    }
}

fn named(name: &str) -> Option<Background> {
    let name = name.to_ascii_lowercase();
    let idx = NAMED_COLORS
        .binary_search_by_key(&name.as_str(), |&(n, _)| n)
        .ok()?;
    let [r, g, b] = NAMED_COLORS[idx].1;
    Some(Background::rgb(r, g, b))
}

/// Sorted alphabetically for binary search.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("blue", [0, 0, 255]),
    ("cyan", [0, 255, 255]),
    ("darkgray", [169, 169, 169]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("ivory", [255, 255, 240]),
    ("lightgray", [211, 211, 211]),
    ("magenta", [255, 0, 255]),
    ("red", [255, 0, 0]),
    ("silver", [192, 192, 192]),
    ("white", [255, 255, 255]),
    ("yellow", [255, 255, 0]),
];
