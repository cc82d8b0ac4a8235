use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::render::Color;

/// Optional per-series stroke overrides. Unset fields fall back to the
/// graph's default series style.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesStyle {
    pub color: Option<Color>,
    pub line_width: Option<f64>,
}

impl SeriesStyle {
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = Some(line_width);
        self
    }

    pub fn validate(self) -> GraphResult<Self> {
        if let Some(color) = self.color {
            color.validate()?;
        }
        if self
            .line_width
            .is_some_and(|width| !width.is_finite() || width <= 0.0)
        {
            return Err(GraphError::InvalidData(
                "series line width must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// One named dataset: index-aligned x and y samples drawn as a polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    name: String,
    x: Vec<f64>,
    y: Vec<f64>,
    #[serde(default)]
    style: SeriesStyle,
}

impl Series {
    /// Creates a series; `x` and `y` must have the same length.
    pub fn new(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> GraphResult<Self> {
        let name = name.into();
        if x.len() != y.len() {
            return Err(GraphError::InvalidData(format!(
                "series `{name}` has {} x samples but {} y samples",
                x.len(),
                y.len()
            )));
        }
        Ok(Self {
            name,
            x,
            y,
            style: SeriesStyle::default(),
        })
    }

    /// Creates a series from `(x, y)` pairs.
    pub fn from_points(
        name: impl Into<String>,
        points: impl IntoIterator<Item = (f64, f64)>,
    ) -> GraphResult<Self> {
        let (x, y) = points.into_iter().unzip();
        Self::new(name, x, y)
    }

    pub fn with_style(mut self, style: SeriesStyle) -> GraphResult<Self> {
        self.style = style.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    #[must_use]
    pub fn style(&self) -> SeriesStyle {
        self.style
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Rejects length mismatches that deserialization cannot rule out.
    pub fn validate(&self) -> GraphResult<()> {
        if self.x.len() != self.y.len() {
            return Err(GraphError::InvalidData(format!(
                "series `{}` has mismatched sample lengths",
                self.name
            )));
        }
        self.style.validate()?;
        Ok(())
    }
}

/// Inclusive min/max of the usable samples on one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataExtent {
    pub min: f64,
    pub max: f64,
}

impl DataExtent {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Scans `values`, skipping non-finite ones and, with `positive_only`,
    /// non-positive ones. Returns the extent of what remains (if anything)
    /// and how many samples were skipped.
    pub fn scan<I>(values: I, positive_only: bool) -> (Option<Self>, usize)
    where
        I: IntoIterator<Item = f64>,
    {
        let mut extent: Option<Self> = None;
        let mut excluded = 0_usize;
        for value in values {
            if !value.is_finite() || (positive_only && value <= 0.0) {
                excluded += 1;
                continue;
            }
            extent = Some(match extent {
                Some(current) => Self::new(current.min.min(value), current.max.max(value)),
                None => Self::new(value, value),
            });
        }
        (extent, excluded)
    }
}
