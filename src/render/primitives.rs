use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Deserializes from either channel objects or CSS hex strings (`"#222"`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels.
    #[must_use]
    pub fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(input: &str) -> GraphResult<Self> {
        let invalid = || GraphError::InvalidConfig(format!("invalid hex color `{input}`"));
        let digits = input.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| invalid());
        let short = |index: usize| -> GraphResult<u8> {
            let nibble = channel(&digits[index..=index])?;
            Ok(nibble * 17)
        };

        let (red, green, blue, alpha) = match digits.len() {
            3 => (short(0)?, short(1)?, short(2)?, 255),
            6 => (
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                255,
            ),
            8 => (
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                channel(&digits[6..8])?,
            ),
            _ => return Err(invalid()),
        };

        let mut color = Self::rgb8(red, green, blue);
        color.alpha = f64::from(alpha) / 255.0;
        Ok(color)
    }

    pub fn validate(self) -> GraphResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(GraphError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Channels {
        red: f64,
        green: f64,
        blue: f64,
        #[serde(default = "opaque_alpha")]
        alpha: f64,
    },
}

fn opaque_alpha() -> f64 {
    1.0
}

impl TryFrom<ColorRepr> for Color {
    type Error = GraphError;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        let color = match repr {
            ColorRepr::Hex(hex) => Self::from_hex(&hex)?,
            ColorRepr::Channels {
                red,
                green,
                blue,
                alpha,
            } => Self::rgba(red, green, blue, alpha),
        };
        color.validate()?;
        Ok(color)
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> GraphResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(GraphError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        validate_stroke_width(self.stroke_width)?;
        self.color.validate()
    }
}

/// Draw command for one connected run of points, stroked as a single path.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylinePrimitive {
    pub points: Vec<(f64, f64)>,
    pub stroke_width: f64,
    pub color: Color,
}

impl PolylinePrimitive {
    #[must_use]
    pub fn new(points: Vec<(f64, f64)>, stroke_width: f64, color: Color) -> Self {
        Self {
            points,
            stroke_width,
            color,
        }
    }

    pub fn validate(&self) -> GraphResult<()> {
        if self.points.is_empty() {
            return Err(GraphError::InvalidData(
                "polyline must contain at least one point".to_owned(),
            ));
        }
        if self
            .points
            .iter()
            .any(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(GraphError::InvalidData(
                "polyline coordinates must be finite".to_owned(),
            ));
        }
        validate_stroke_width(self.stroke_width)?;
        self.color.validate()
    }
}

/// Draw command for an axis-aligned rectangle. Without a fill only the
/// border is stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Option<Color>,
    pub border_color: Color,
    pub border_width: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn outline(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        border_width: f64,
        border_color: Color,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color: None,
            border_color,
            border_width,
        }
    }

    pub fn validate(self) -> GraphResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(GraphError::InvalidData(
                "rect origin must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite() || !self.height.is_finite() || self.width < 0.0 || self.height < 0.0 {
            return Err(GraphError::InvalidData(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(GraphError::InvalidData(
                "rect border width must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(fill) = self.fill_color {
            fill.validate()?;
        }
        self.border_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextVAlign {
    Top,
    Middle,
    Bottom,
}

/// Font used for labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFont {
    /// Comma-separated family fallback list, most preferred first.
    pub family: String,
    pub size_px: f64,
}

impl Default for TextFont {
    fn default() -> Self {
        Self {
            family: "Arial,Helvetica,sans-serif".to_owned(),
            size_px: 14.0,
        }
    }
}

impl TextFont {
    pub fn validate(&self) -> GraphResult<()> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(GraphError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: TextFont,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font: TextFont,
        color: Color,
        h_align: TextHAlign,
        v_align: TextVAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font,
            color,
            h_align,
            v_align,
        }
    }

    pub fn validate(&self) -> GraphResult<()> {
        if self.text.is_empty() {
            return Err(GraphError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(GraphError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        self.font.validate()?;
        self.color.validate()
    }
}

fn validate_stroke_width(stroke_width: f64) -> GraphResult<()> {
    if !stroke_width.is_finite() || stroke_width <= 0.0 {
        return Err(GraphError::InvalidData(
            "stroke width must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn short_and_long_hex_agree() {
        let short = Color::from_hex("#222").expect("short hex");
        let long = Color::from_hex("#222222").expect("long hex");
        assert_eq!(short, long);
    }

    #[test]
    fn hex_alpha_channel_is_parsed() {
        let color = Color::from_hex("#ff000080").expect("hex with alpha");
        assert_eq!(color.red, 1.0);
        assert!((color.alpha - 128.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(Color::from_hex("222").is_err());
        assert!(Color::from_hex("#22").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
    }

    #[test]
    fn colors_deserialize_from_hex_or_channels() {
        let hex: Color = serde_json::from_str("\"#c0c0c0\"").expect("hex json");
        assert_eq!(hex, Color::rgb8(0xc0, 0xc0, 0xc0));

        let channels: Color =
            serde_json::from_str(r#"{"red":1.0,"green":0.0,"blue":0.0}"#).expect("channel json");
        assert_eq!(channels, Color::rgb(1.0, 0.0, 0.0));
    }
}
