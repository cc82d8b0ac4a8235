use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

/// Drawing-surface size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Which chart dimension an axis belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisKind {
    X,
    Y,
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Tick hierarchy level. Majors are labeled, minors subdivide them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickLevel {
    Major,
    Minor,
}

impl TickLevel {
    /// Levels in the order ticks are selected: majors constrain minors.
    pub const SELECTION_ORDER: [TickLevel; 2] = [TickLevel::Major, TickLevel::Minor];
    /// Levels in paint order: minor grid sits underneath the major grid.
    pub const PAINT_ORDER: [TickLevel; 2] = [TickLevel::Minor, TickLevel::Major];
}

/// One value per tick level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelPair<T> {
    pub major: T,
    pub minor: T,
}

impl<T> LevelPair<T> {
    #[must_use]
    pub const fn new(major: T, minor: T) -> Self {
        Self { major, minor }
    }

    #[must_use]
    pub fn get(&self, level: TickLevel) -> &T {
        match level {
            TickLevel::Major => &self.major,
            TickLevel::Minor => &self.minor,
        }
    }

    pub fn get_mut(&mut self, level: TickLevel) -> &mut T {
        match level {
            TickLevel::Major => &mut self.major,
            TickLevel::Minor => &mut self.minor,
        }
    }
}

impl<T: Default> Default for LevelPair<T> {
    fn default() -> Self {
        Self::new(T::default(), T::default())
    }
}

/// Space reserved around the plot rectangle, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn validate(self) -> GraphResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GraphError::InvalidConfig(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(20.0, 20.0, 60.0, 60.0)
    }
}

/// Plot area in surface pixels; `y0` is the top edge, `y1` the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PlotRect {
    /// Subtracts `margins` from a surface of size `viewport`.
    pub fn inside(viewport: Viewport, margins: Margins) -> GraphResult<Self> {
        let rect = Self {
            x0: margins.left,
            y0: margins.top,
            x1: f64::from(viewport.width) - margins.right,
            y1: f64::from(viewport.height) - margins.bottom,
        };
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Err(GraphError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(rect)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.x1 - self.x0
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y1 - self.y0
    }
}
