//! Candidate tick spacing rules.
//!
//! A [`TickScheme`] is a repeatable pattern: walk the outer axis range in
//! `tick_sep` strides and, at every stride, emit one tick per mantissa
//! multiplier. Linear schemes always use the single mantissa `1`; logarithmic
//! schemes stride whole decades in exponent space and fill each decade with
//! integer mantissas.
//!
//! Generation is exhaustive but bounded; selecting among the candidates is the
//! axis's job.

use smallvec::{SmallVec, smallvec};

use crate::core::numeric::{approx_eq, range};

/// Mantissa multipliers of one scheme. At most `base - 1` entries.
pub type MantissaSet = SmallVec<[f64; 12]>;

/// Relative slack used when testing whether a tick value lies on the axis.
const BOUND_TOLERANCE: f64 = 1e-9;

/// Values closer to zero than this fraction of the stride snap to exactly zero.
const ZERO_SNAP_RATIO: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct TickScheme {
    pub mantissas: MantissaSet,
    pub tick_sep: f64,
    pub offset: f64,
}

impl TickScheme {
    #[must_use]
    pub fn linear(tick_sep: f64) -> Self {
        Self {
            mantissas: smallvec![1.0],
            tick_sep,
            offset: 0.0,
        }
    }

    /// One-decade stride with the given in-decade multipliers.
    #[must_use]
    pub fn decade(mantissas: MantissaSet) -> Self {
        Self {
            mantissas,
            tick_sep: 1.0,
            offset: 0.0,
        }
    }

    /// True when the scheme strides one decade and enumerates every integer
    /// mantissa in it.
    #[must_use]
    pub fn is_dense_decade(&self, log_base: u32) -> bool {
        self.tick_sep == 1.0 && self.mantissas.len() >= log_base.saturating_sub(1) as usize
    }

    /// Concrete tick values produced by walking `outer` and keeping those in
    /// `bounds` (inclusive, with float slack).
    ///
    /// With `log_base` set, `outer` is in exponent space and every stride
    /// position is raised to `log_base` before the mantissas are applied.
    #[must_use]
    pub fn tick_values(&self, outer: (f64, f64), bounds: (f64, f64), log_base: Option<f64>) -> Vec<f64> {
        let (outer_min, outer_max) = outer;
        let (axis_min, axis_max) = bounds;
        let tolerance = (axis_max - axis_min).abs() * BOUND_TOLERANCE;
        let start = outer_min + self.offset;

        let mut values = Vec::new();
        for stride in range(0.0, 1.5 + (outer_max - outer_min) / self.tick_sep, 1.0) {
            let mut position = start + stride * self.tick_sep;
            if position.abs() < ZERO_SNAP_RATIO * self.tick_sep {
                position = 0.0;
            }
            let anchor = match log_base {
                Some(base) => base.powf(position),
                None => position,
            };
            for &mantissa in &self.mantissas {
                let value = anchor * mantissa;
                if value < axis_min - tolerance || value > axis_max + tolerance {
                    continue;
                }
                values.push(value);
            }
        }
        values
    }
}

/// Inputs of one scheme enumeration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchemeRequest {
    /// Smallest power covering the axis span: of ten on a linear axis, of the
    /// log base in exponent space on a logarithmic one.
    pub order_of_magnitude: f64,
    pub logarithmic: bool,
    pub log_base: u32,
    pub factor_multiply: u32,
    pub ticks_max: usize,
}

/// Enumerates candidate schemes from coarse to fine.
///
/// `factors` is the factorization of `log_base^factor_multiply`; it is scanned
/// from largest to smallest at each magnitude descent level, so stride sizes
/// shrink monotonically within a level.
#[must_use]
pub fn generate_tick_schemes(request: &SchemeRequest, factors: &[i64]) -> Vec<TickScheme> {
    let base = f64::from(request.log_base);
    let inverse_base = 1.0 / base;
    let fraction_denominator = base.powi(request.factor_multiply as i32 - 1);
    let descent_limit = 10.0 * request.ticks_max as f64;

    let mut schemes = Vec::new();
    let mut level = 1_i32;
    while base.powi(level - 1) < descent_limit {
        let scan = request.order_of_magnitude / base.powi(level);
        level += 1;

        if request.logarithmic {
            if approx_eq(scan, inverse_base) {
                schemes.extend(generate_log_tick_schemes(request.log_base));
                continue;
            }
            if scan < inverse_base {
                // Sub-decade exponent strides would land on non-integer mantissas.
                continue;
            }
        }

        for &factor in factors.iter().rev() {
            let step = factor as f64 / fraction_denominator;
            let stride = step * scan;
            let whole_stride = step == step.round() && approx_eq(stride, stride.round());
            if request.logarithmic && !whole_stride {
                continue;
            }
            schemes.push(TickScheme::linear(stride));
        }
    }
    schemes
}

/// In-decade mantissa schemes for a logarithmic axis.
///
/// Divisor `d` spreads `d` ticks evenly in log space and rounds them to whole
/// mantissas; subdivision stops as soon as two neighbours round to the same
/// integer. A final scheme lists every mantissa `1..base`.
#[must_use]
pub fn generate_log_tick_schemes(log_base: u32) -> Vec<TickScheme> {
    let base = f64::from(log_base);
    let mut schemes = Vec::new();

    'divisors: for divisor in 1_u32.. {
        let mut mantissas = MantissaSet::new();
        for index in 0..divisor {
            let mantissa = base.powf(f64::from(index) / f64::from(divisor)).round();
            if mantissas.last().is_some_and(|&previous| previous == mantissa) {
                break 'divisors;
            }
            mantissas.push(mantissa);
        }
        schemes.push(TickScheme::decade(mantissas));
    }

    schemes.push(TickScheme::decade(
        (1..log_base.max(2)).map(f64::from).collect(),
    ));
    schemes
}
