use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{AxisConfig, LevelPair, Margins, SeriesStyle, TickLevel};
use crate::error::{GraphError, GraphResult};
use crate::render::{Color, TextFont};

/// Chart-level presentation settings.
///
/// Every field is optional in serialized form; missing fields take the
/// documented defaults so hosts can persist only what they override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Surface height as a fraction of container width; `None` uses the
    /// container height directly. Accepts `false` in serialized form.
    #[serde(deserialize_with = "deserialize_aspect_ratio")]
    pub aspect_ratio: Option<f64>,
    pub axis_color: Color,
    pub axis_width: f64,
    pub grid_visible: bool,
    pub grid_color: LevelPair<Color>,
    pub grid_width: LevelPair<f64>,
    pub margins: Margins,
    pub tick_color: Color,
    pub tick_length: LevelPair<f64>,
    pub tick_text_color: Color,
    pub tick_font: TextFont,
    pub tick_width: f64,
    /// Gap between the plot edge and tick label anchors.
    pub tick_label_offset: f64,
    pub series_color: Color,
    pub series_width: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        let ink = Color::rgb8(0x22, 0x22, 0x22);
        Self {
            aspect_ratio: Some(0.5),
            axis_color: ink,
            axis_width: 1.0,
            grid_visible: true,
            grid_color: LevelPair::new(
                Color::rgb8(0xc0, 0xc0, 0xc0),
                Color::rgb8(0xe0, 0xe0, 0xe0),
            ),
            grid_width: LevelPair::new(1.0, 1.0),
            margins: Margins::default(),
            tick_color: ink,
            tick_length: LevelPair::new(12.0, 6.0),
            tick_text_color: ink,
            tick_font: TextFont::default(),
            tick_width: 1.0,
            tick_label_offset: 8.0,
            series_color: Color::rgb(1.0, 0.0, 0.0),
            series_width: 2.0,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> GraphResult<()> {
        if let Some(ratio) = self.aspect_ratio {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(GraphError::InvalidConfig(
                    "aspect ratio must be finite and > 0".to_owned(),
                ));
            }
        }

        for (name, color) in [
            ("axis_color", self.axis_color),
            ("grid_color.major", self.grid_color.major),
            ("grid_color.minor", self.grid_color.minor),
            ("tick_color", self.tick_color),
            ("tick_text_color", self.tick_text_color),
            ("series_color", self.series_color),
        ] {
            color
                .validate()
                .map_err(|err| GraphError::InvalidConfig(format!("{name}: {err}")))?;
        }

        for (name, width) in [
            ("axis_width", self.axis_width),
            ("tick_width", self.tick_width),
            ("series_width", self.series_width),
        ] {
            if !width.is_finite() || width <= 0.0 {
                return Err(GraphError::InvalidConfig(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }

        for level in TickLevel::SELECTION_ORDER {
            let grid_width = *self.grid_width.get(level);
            if !grid_width.is_finite() || grid_width <= 0.0 {
                return Err(GraphError::InvalidConfig(format!(
                    "{level:?} grid width must be finite and > 0"
                )));
            }
            let tick_length = *self.tick_length.get(level);
            if !tick_length.is_finite() || tick_length < 0.0 {
                return Err(GraphError::InvalidConfig(format!(
                    "{level:?} tick length must be finite and >= 0"
                )));
            }
        }

        if !self.tick_label_offset.is_finite() || self.tick_label_offset < 0.0 {
            return Err(GraphError::InvalidConfig(
                "tick label offset must be finite and >= 0".to_owned(),
            ));
        }

        self.margins.validate()?;
        self.tick_font
            .validate()
            .map_err(|err| GraphError::InvalidConfig(format!("tick_font: {err}")))?;
        Ok(())
    }

    /// Global series stroke style, used where a series leaves fields unset.
    #[must_use]
    pub fn default_series_style(&self) -> SeriesStyle {
        SeriesStyle::default()
            .with_color(self.series_color)
            .with_line_width(self.series_width)
    }
}

/// Complete chart setup: presentation settings plus one config per axis.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub settings: RenderSettings,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
}

impl GraphConfig {
    #[must_use]
    pub fn new(settings: RenderSettings, x_axis: AxisConfig, y_axis: AxisConfig) -> Self {
        Self {
            settings,
            x_axis,
            y_axis,
        }
    }

    pub fn validate(&self) -> GraphResult<()> {
        self.settings.validate()?;
        self.x_axis.validate()?;
        self.y_axis.validate()?;
        Ok(())
    }

    pub fn from_json_str(input: &str) -> GraphResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| GraphError::InvalidConfig(format!("failed to parse graph config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> GraphResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            GraphError::InvalidConfig(format!("failed to serialize graph config: {e}"))
        })
    }
}

fn deserialize_aspect_ratio<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AspectRatio {
        Ratio(f64),
        Toggle(bool),
    }

    match Option::<AspectRatio>::deserialize(deserializer)? {
        Some(AspectRatio::Ratio(ratio)) => Ok(Some(ratio)),
        Some(AspectRatio::Toggle(false)) | None => Ok(None),
        Some(AspectRatio::Toggle(true)) => Err(D::Error::custom(
            "aspect_ratio must be a number, false or null",
        )),
    }
}
