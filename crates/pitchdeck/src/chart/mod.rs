pub mod bar;
pub mod donut;
pub mod sparkline;
pub mod svg;
pub mod table;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use bar::{BarSpec, HorizontalBar, horizontal_bar};
pub use donut::{Donut, DonutSegment, donut};
pub use sparkline::{Sparkline, SparklineStyle, sparkline};
pub use table::{Cell, DataTable, Tone, data_table};

/// Precondition violations of the chart primitives.
///
/// Every variant is a caller bug (the deck data is literal), so these are
/// reported at deck-load time and never produce partially drawn charts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    #[error("sparkline needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("donut segments sum to zero")]
    ZeroTotal,

    #[error("bar maximum must be non-zero")]
    ZeroMaximum,

    #[error("chart value at position {0} is not a finite number")]
    NonFinite(usize),

    #[error("chart value at position {0} is negative")]
    NegativeValue(usize),

    #[error("sparkline box {width}x{height} is too small or not finite")]
    SparklineSize { width: f32, height: f32 },

    #[error("donut size {0} leaves no room for the ring")]
    DonutSize(f32),

    #[error("table row {row} has {got} cells, header has {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        got: usize,
    },
}

/// A point in chart-local coordinates (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An opaque sRGB color, written as `#RRGGBB` in deck files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const ACCENT: Rgb = Rgb(0x2D, 0x7A, 0xFF);
    pub const POSITIVE: Rgb = Rgb(0x12, 0xB7, 0x6A);
    pub const NEGATIVE: Rgb = Rgb(0xF0, 0x44, 0x38);
    pub const MUTED: Rgb = Rgb(0x9B, 0xA1, 0xAB);
    pub const FOREGROUND: Rgb = Rgb(0xF0, 0xF1, 0xF4);
    pub const TRACK: Rgb = Rgb(0x1F, 0x22, 0x29);
    pub const SURFACE: Rgb = Rgb(0x1A, 0x1D, 0x24);
    pub const ACCENT_SURFACE: Rgb = Rgb(0x1A, 0x2A, 0x44);

    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::ACCENT
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}: expected #RRGGBB")]
pub struct ParseRgbError(String);

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRgbError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseRgbError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.hex()
    }
}

/// Reject NaN and infinities before they reach any geometry.
fn ensure_finite(values: impl IntoIterator<Item = f64>) -> Result<(), ChartError> {
    for (i, v) in values.into_iter().enumerate() {
        if !v.is_finite() {
            return Err(ChartError::NonFinite(i));
        }
    }
    Ok(())
}

/// Format a chart value the way the deck prints it: integers without a
/// fractional part, everything else with at most two decimals.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{value:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Format with thousands separators (`12700` -> `12,700`).
pub fn group_thousands(value: f64) -> String {
    let plain = format_value(value);
    let (sign, rest) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
