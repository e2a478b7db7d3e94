/// Chart colour palettes.
///
/// Palettes are plain values handed to the panel at construction; there is
/// no global palette. Lookup wraps around so any series index has a colour.
use crate::error::{PanelError, Result};
use serde::{Deserialize, Serialize};

/// Opaque stroke colours for chart lines and borders.
pub const LINE_COLORS: [&str; 6] = [
    "rgba(255, 99, 132, 1)",
    "rgba(54, 162, 235, 1)",
    "rgba(255, 206, 86, 1)",
    "rgba(75, 192, 192, 1)",
    "rgba(153, 102, 255, 1)",
    "rgba(255, 159, 64, 1)",
];

/// Translucent fill colours, same hues as [`LINE_COLORS`].
pub const FILL_COLORS: [&str; 6] = [
    "rgba(255, 99, 132, 0.2)",
    "rgba(54, 162, 235, 0.2)",
    "rgba(255, 206, 86, 0.2)",
    "rgba(75, 192, 192, 0.2)",
    "rgba(153, 102, 255, 0.2)",
    "rgba(255, 159, 64, 0.2)",
];

/// Look up `palette[index mod len]`.
///
/// Negative indices wrap as well. An empty palette is `InvalidArgument`.
pub fn color_for_index<S: AsRef<str>>(index: i64, palette: &[S]) -> Result<&str> {
    if palette.is_empty() {
        return Err(PanelError::invalid_argument("colour palette is empty"));
    }
    let slot = index.rem_euclid(palette.len() as i64) as usize;
    Ok(palette[slot].as_ref())
}

/// A non-empty, immutable list of colour strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ColorPalette {
    colors: Vec<String>,
}

impl ColorPalette {
    /// Build a palette; fails if `colors` is empty.
    pub fn new<I, S>(colors: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if colors.is_empty() {
            return Err(PanelError::invalid_argument("colour palette is empty"));
        }
        Ok(Self { colors })
    }

    /// The default line palette.
    pub fn line() -> Self {
        Self {
            colors: LINE_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// The default fill palette.
    pub fn fill() -> Self {
        Self {
            colors: FILL_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colour for series `index`, wrapping around the palette.
    pub fn color_for_index(&self, index: i64) -> &str {
        let slot = index.rem_euclid(self.colors.len() as i64) as usize;
        &self.colors[slot]
    }
}

impl TryFrom<Vec<String>> for ColorPalette {
    type Error = PanelError;

    fn try_from(colors: Vec<String>) -> Result<Self> {
        Self::new(colors)
    }
}

impl From<ColorPalette> for Vec<String> {
    fn from(palette: ColorPalette) -> Self {
        palette.colors
    }
}

/// The pair of palettes a chart draws with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartPalettes {
    pub line: ColorPalette,
    pub fill: ColorPalette,
}

impl Default for ChartPalettes {
    fn default() -> Self {
        Self {
            line: ColorPalette::line(),
            fill: ColorPalette::fill(),
        }
    }
}

/// A parsed palette colour. Alpha is 0.0 – 1.0 as in CSS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Alpha scaled to a byte.
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

/// Parse `rgb(r, g, b)`, `rgba(r, g, b, a)` or `#rrggbb`.
pub fn parse_rgba(text: &str) -> Result<Rgba> {
    let text = text.trim();
    let bad = || PanelError::invalid_argument(format!("unrecognised colour {text:?}"));

    if let Some(hex) = text.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        return Ok(Rgba {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: 1.0,
        });
    }

    let (body, has_alpha) = if let Some(rest) = text.strip_prefix("rgba(") {
        (rest, true)
    } else if let Some(rest) = text.strip_prefix("rgb(") {
        (rest, false)
    } else {
        return Err(bad());
    };
    let body = body.strip_suffix(')').ok_or_else(bad)?;
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if has_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return Err(bad());
    }
    let channel = |s: &str| s.parse::<u8>().map_err(|_| bad());
    let a = if has_alpha {
        parts[3].parse::<f32>().map_err(|_| bad())?
    } else {
        1.0
    };
    Ok(Rgba {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
        a,
    })
}
