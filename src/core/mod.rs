pub mod axis;
pub mod numeric;
pub mod series;
pub mod tick_scheme;
pub mod types;

pub use axis::{Axis, AxisConfig, TickLabelFormatterFn};
pub use series::{DataExtent, Series, SeriesStyle};
pub use tick_scheme::{MantissaSet, SchemeRequest, TickScheme};
pub use types::{AxisKind, LevelPair, Margins, PlotRect, TickLevel, Viewport};
