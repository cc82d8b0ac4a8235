use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::numeric::{exponent, factorize, format_tick_value};
use crate::core::series::DataExtent;
use crate::core::tick_scheme::{SchemeRequest, generate_tick_schemes};
use crate::core::types::{AxisKind, LevelPair, TickLevel};
use crate::error::{GraphError, GraphResult};

/// Custom tick label formatter, called with the raw tick value.
pub type TickLabelFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;

/// Log axes whose `max / min` ratio is below this are drawn linearly.
const MIN_LOG_RATIO: f64 = 3.0;

/// A minor tick aligns with a major tick when their projections are closer
/// than this many pixels.
const ALIGNMENT_TOLERANCE_PX: f64 = 1.0;

/// Dense logarithmic minor schemes may overshoot the target count by this factor.
const DENSE_LOG_OVERSHOOT: usize = 3;

/// Caller-supplied configuration of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    pub log: bool,
    pub log_base: u32,
    /// Exponent applied to `log_base` before factorizing it into step fractions.
    /// The default of 2 makes `.25/.5/.75` available on a base-10 axis.
    pub factor_multiply: u32,
    pub ticks_max: usize,
    pub ticks_min: usize,
    pub tick_target_spacing_px: LevelPair<f64>,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            log: false,
            log_base: 10,
            factor_multiply: 2,
            ticks_max: 100,
            ticks_min: 2,
            tick_target_spacing_px: LevelPair::new(80.0, 30.0),
        }
    }
}

impl AxisConfig {
    #[must_use]
    pub fn logarithmic() -> Self {
        Self {
            log: true,
            ..Self::default()
        }
    }

    pub fn validate(self) -> GraphResult<Self> {
        if self.log_base < 2 {
            return Err(GraphError::InvalidConfig(
                "axis log base must be >= 2".to_owned(),
            ));
        }
        if self.factor_multiply < 1 {
            return Err(GraphError::InvalidConfig(
                "axis factor multiply must be >= 1".to_owned(),
            ));
        }
        let factorized = f64::from(self.log_base).powi(self.factor_multiply as i32);
        if !factorized.is_finite() || factorized > i64::MAX as f64 {
            return Err(GraphError::InvalidConfig(
                "axis log base raised to factor multiply overflows".to_owned(),
            ));
        }
        if self.ticks_min < 1 || self.ticks_max < self.ticks_min {
            return Err(GraphError::InvalidConfig(
                "axis tick bounds must satisfy 1 <= ticks_min <= ticks_max".to_owned(),
            ));
        }
        for level in TickLevel::SELECTION_ORDER {
            let spacing = *self.tick_target_spacing_px.get(level);
            if !spacing.is_finite() || spacing <= 0.0 {
                return Err(GraphError::InvalidConfig(format!(
                    "axis {level:?} tick spacing must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }

    fn factor_base(self) -> i64 {
        f64::from(self.log_base).powi(self.factor_multiply as i32).round() as i64
    }
}

/// Smallest power of `base` that is `>= value`.
fn ceil_power(value: f64, base: f64) -> GraphResult<f64> {
    let power = base.powi(exponent(value, base)?);
    Ok(if power < value { power * base } else { power })
}

/// Number of ticks that fit on `axis_span_px` at the target spacing,
/// clamped to `[min_ticks, max_ticks]`.
pub(crate) fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

/// One chart dimension: observed data range, rounded outer bounds, major and
/// minor tick lists, and the value-to-pixel projection.
///
/// The data-space fields are fixed at construction. Moving the axis to a new
/// pixel span only recomputes the tick lists.
#[derive(Clone)]
pub struct Axis {
    kind: AxisKind,
    config: AxisConfig,
    data_min: f64,
    data_max: f64,
    axis_min: f64,
    axis_max: f64,
    logarithmic: bool,
    pixel_start: f64,
    pixel_end: f64,
    ticks: LevelPair<Vec<f64>>,
    formatter: Option<TickLabelFormatterFn>,
}

impl fmt::Debug for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Axis")
            .field("kind", &self.kind)
            .field("config", &self.config)
            .field("data_range", &(self.data_min, self.data_max))
            .field("range", &(self.axis_min, self.axis_max))
            .field("logarithmic", &self.logarithmic)
            .field("pixel_range", &(self.pixel_start, self.pixel_end))
            .field("ticks", &self.ticks)
            .field("custom_formatter", &self.formatter.is_some())
            .finish()
    }
}

impl Axis {
    /// Builds an axis over `extent` projecting onto `[pixel_start, pixel_end]`.
    ///
    /// A degenerate extent (`min == max`) is widened by one unit, or by one
    /// decade on a logarithmic axis.
    pub fn new(
        kind: AxisKind,
        config: AxisConfig,
        extent: DataExtent,
        pixel_start: f64,
        pixel_end: f64,
    ) -> GraphResult<Self> {
        let config = config.validate()?;
        validate_pixel_range(pixel_start, pixel_end)?;
        if !extent.min.is_finite() || !extent.max.is_finite() || extent.min > extent.max {
            return Err(GraphError::InvalidData(format!(
                "{kind} axis extent must be finite and ordered"
            )));
        }
        if config.log && extent.min <= 0.0 {
            return Err(GraphError::InvalidData(format!(
                "{kind} axis is logarithmic but extent reaches {}",
                extent.min
            )));
        }

        let mut data_max = extent.max;
        if extent.min == extent.max {
            data_max = if config.log {
                extent.min * f64::from(config.log_base)
            } else {
                extent.min + 1.0
            };
        }

        let mut axis = Self {
            kind,
            config,
            data_min: extent.min,
            data_max,
            axis_min: extent.min,
            axis_max: data_max,
            logarithmic: config.log,
            pixel_start,
            pixel_end,
            ticks: LevelPair::default(),
            formatter: None,
        };
        axis.set_auto_range()?;
        axis.set_axis_ticks()?;
        Ok(axis)
    }

    /// Builds an axis from raw samples.
    ///
    /// Non-finite samples are skipped; on a logarithmic axis non-positive
    /// samples are skipped as well. No usable sample is an error.
    pub fn from_samples<I>(
        kind: AxisKind,
        config: AxisConfig,
        samples: I,
        pixel_start: f64,
        pixel_end: f64,
    ) -> GraphResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let (extent, excluded) = DataExtent::scan(samples, config.log);
        if excluded > 0 {
            warn!(
                axis = %kind,
                excluded,
                logarithmic = config.log,
                "excluding unusable samples from axis range"
            );
        }
        let extent = extent.ok_or(GraphError::EmptyData { axis: kind })?;
        Self::new(kind, config, extent, pixel_start, pixel_end)
    }

    /// Rounds the data range outward to whole units of its own order of
    /// magnitude.
    ///
    /// On a logarithmic axis a rounded minimum that would reach zero is
    /// replaced by outward snapping to powers of the base.
    pub fn set_auto_range(&mut self) -> GraphResult<()> {
        let base = f64::from(self.config.log_base);
        let span = self.data_max - self.data_min;
        if span.is_nan() || span <= 0.0 {
            return Err(GraphError::InvalidData(format!(
                "{} axis auto-range needs a widened data range",
                self.kind
            )));
        }
        if span.is_infinite() {
            return Err(GraphError::InvalidData(format!(
                "{} axis data span [{}, {}] overflows f64",
                self.kind, self.data_min, self.data_max
            )));
        }

        let magnitude = base.powi(exponent(span, base)?);
        let mut axis_min = snap_quotient(self.data_min / magnitude).floor() * magnitude;
        let mut axis_max = snap_quotient(self.data_max / magnitude).ceil() * magnitude;
        if axis_min > self.data_min {
            axis_min -= magnitude;
        }
        if axis_max < self.data_max {
            axis_max += magnitude;
        }

        if self.config.log && axis_min <= 0.0 {
            axis_min = base.powi(exponent(self.data_min, base)?);
            let top = exponent(self.data_max, base)?;
            axis_max = base.powi(top);
            if axis_max < self.data_max {
                axis_max = base.powi(top + 1);
            }
        }

        self.axis_min = axis_min;
        self.axis_max = axis_max;
        Ok(())
    }

    /// Selects major then minor tick lists for the current pixel span.
    pub fn set_axis_ticks(&mut self) -> GraphResult<()> {
        let base = f64::from(self.config.log_base);
        let factors = factorize(self.config.factor_base());

        let (mut axis_min, mut axis_max) = (self.axis_min, self.axis_max);
        if axis_min > axis_max {
            std::mem::swap(&mut axis_min, &mut axis_max);
        } else if axis_min == axis_max {
            axis_max += 1.0;
        }

        let mut logarithmic = self.config.log;
        if logarithmic && axis_max < MIN_LOG_RATIO * axis_min {
            warn!(
                axis = %self.kind,
                axis_min,
                axis_max,
                "log axis ratio too small, falling back to linear ticks"
            );
            logarithmic = false;
        }
        self.logarithmic = logarithmic;

        let (low, high) = if logarithmic {
            (axis_min.ln() / base.ln(), axis_max.ln() / base.ln())
        } else {
            (axis_min, axis_max)
        };
        let magnitude = if logarithmic {
            // Exponent-space strides must stay whole powers of the base.
            ceil_power(high - low, base)?
        } else {
            10_f64.powf((high - low).log10().ceil())
        };
        let outer = (
            (low / magnitude).floor() * magnitude,
            (high / magnitude).ceil() * magnitude,
        );

        let request = SchemeRequest {
            order_of_magnitude: magnitude,
            logarithmic,
            log_base: self.config.log_base,
            factor_multiply: self.config.factor_multiply,
            ticks_max: self.config.ticks_max,
        };
        let log_base = logarithmic.then_some(base);
        let pixel_span = (self.pixel_end - self.pixel_start).abs();

        self.ticks = LevelPair::default();
        for level in TickLevel::SELECTION_ORDER {
            let target = axis_tick_target_count(
                pixel_span,
                *self.config.tick_target_spacing_px.get(level),
                self.config.ticks_min,
                self.config.ticks_max,
            );
            let schemes = generate_tick_schemes(&request, &factors);
            let minor = level == TickLevel::Minor;

            let mut best: Vec<f64> = Vec::new();
            for scheme in &schemes {
                let trial = scheme.tick_values(outer, (axis_min, axis_max), log_base);

                if minor && !self.overlays(&self.ticks.major, &trial) {
                    continue;
                }

                if logarithmic && minor && scheme.is_dense_decade(self.config.log_base) {
                    if trial.len() > DENSE_LOG_OVERSHOOT * target {
                        break;
                    }
                    best = trial;
                } else if logarithmic && scheme.mantissas.len() > 1 && trial.len() > target {
                    continue;
                } else if trial.len() > target {
                    break;
                } else if trial.len() > best.len() {
                    best = trial;
                }
            }

            trace!(
                axis = %self.kind,
                ?level,
                target,
                candidates = schemes.len(),
                chosen = best.len(),
                "selected axis ticks"
            );
            *self.ticks.get_mut(level) = best;
        }

        if self.ticks.minor.is_empty() && !self.ticks.major.is_empty() {
            warn!(axis = %self.kind, "no aligned minor tick scheme, drawing majors only");
        }
        Ok(())
    }

    /// True when every tick in `majors` has a tick in `minors` projecting
    /// within one pixel of it.
    fn overlays(&self, majors: &[f64], minors: &[f64]) -> bool {
        majors.iter().all(|&major| {
            let target = self.project(major);
            minors
                .iter()
                .any(|&minor| (self.project(minor) - target).abs() < ALIGNMENT_TOLERANCE_PX)
        })
    }

    /// Maps a data value to a pixel coordinate on `[pixel_start, pixel_end]`.
    ///
    /// On a logarithmic axis the result is NaN for `value <= 0`; use
    /// [`Axis::try_project`] when the input is not known to be positive.
    #[must_use]
    pub fn project(&self, value: f64) -> f64 {
        let ratio = if self.logarithmic {
            (value / self.axis_min).ln() / (self.axis_max / self.axis_min).ln()
        } else {
            (value - self.axis_min) / (self.axis_max - self.axis_min)
        };
        self.pixel_start + (self.pixel_end - self.pixel_start) * ratio
    }

    /// Like [`Axis::project`] but rejects values the axis cannot place.
    pub fn try_project(&self, value: f64) -> GraphResult<f64> {
        if !self.can_project(value) {
            return Err(GraphError::InvalidData(format!(
                "{} axis cannot project value {value}",
                self.kind
            )));
        }
        Ok(self.project(value))
    }

    #[must_use]
    pub fn can_project(&self, value: f64) -> bool {
        value.is_finite() && (!self.logarithmic || value > 0.0)
    }

    /// Label text for a tick value.
    #[must_use]
    pub fn tick_text(&self, value: f64) -> String {
        match &self.formatter {
            Some(formatter) => formatter(value),
            None => format_tick_value(value),
        }
    }

    pub fn set_tick_formatter(&mut self, formatter: TickLabelFormatterFn) {
        self.formatter = Some(formatter);
    }

    pub fn clear_tick_formatter(&mut self) {
        self.formatter = None;
    }

    #[must_use]
    pub(crate) fn tick_formatter(&self) -> Option<TickLabelFormatterFn> {
        self.formatter.clone()
    }

    /// Moves the axis onto a new pixel span, recomputing ticks if it changed.
    pub fn set_pixel_range(&mut self, pixel_start: f64, pixel_end: f64) -> GraphResult<()> {
        validate_pixel_range(pixel_start, pixel_end)?;
        if pixel_start == self.pixel_start && pixel_end == self.pixel_end {
            return Ok(());
        }
        self.pixel_start = pixel_start;
        self.pixel_end = pixel_end;
        self.set_axis_ticks()
    }

    #[must_use]
    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    #[must_use]
    pub fn config(&self) -> AxisConfig {
        self.config
    }

    /// Observed data range, after degenerate widening.
    #[must_use]
    pub fn data_range(&self) -> (f64, f64) {
        (self.data_min, self.data_max)
    }

    /// Rounded outer bounds.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.axis_min, self.axis_max)
    }

    #[must_use]
    pub fn pixel_range(&self) -> (f64, f64) {
        (self.pixel_start, self.pixel_end)
    }

    /// Whether ticks and projection are logarithmic after any downgrade.
    #[must_use]
    pub fn is_logarithmic(&self) -> bool {
        self.logarithmic
    }

    #[must_use]
    pub fn ticks(&self, level: TickLevel) -> &[f64] {
        self.ticks.get(level)
    }
}

fn validate_pixel_range(pixel_start: f64, pixel_end: f64) -> GraphResult<()> {
    if !pixel_start.is_finite() || !pixel_end.is_finite() || pixel_start == pixel_end {
        return Err(GraphError::InvalidData(
            "axis pixel range must be finite and non-empty".to_owned(),
        ));
    }
    Ok(())
}

/// Snaps a quotient sitting within float noise of an integer onto it, so
/// `0.3 / 0.1` floors to 3 rather than 2.
fn snap_quotient(quotient: f64) -> f64 {
    let nearest = quotient.round();
    if (quotient - nearest).abs() <= 1e-9 * nearest.abs().max(1.0) {
        nearest
    } else {
        quotient
    }
}
