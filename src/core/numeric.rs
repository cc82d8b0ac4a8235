use crate::error::{GraphError, GraphResult};

/// Materialized arithmetic sequence `min, min + step, min + 2 * step, ...`
/// holding every value strictly below `max`.
///
/// Returns an empty sequence when `step <= 0`, `min >= max`, or any input is
/// not finite. Values are computed as `min + i * step` so long walks do not
/// accumulate rounding drift.
#[must_use]
pub fn range(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || !step.is_finite() {
        return Vec::new();
    }
    if step <= 0.0 || min >= max {
        return Vec::new();
    }

    let mut values = Vec::with_capacity(((max - min) / step).ceil().max(0.0) as usize);
    let mut index = 0_u64;
    loop {
        let value = min + step * index as f64;
        if value >= max {
            break;
        }
        values.push(value);
        index += 1;
    }
    values
}

/// Integer exponent of `x` in `base`: `floor(log(x) / log(base))`.
///
/// The floating estimate is corrected against exact powers so that
/// `exponent(1000.0, 10.0)` is `3` rather than `2`.
pub fn exponent(x: f64, base: f64) -> GraphResult<i32> {
    validate_base(base)?;
    if !x.is_finite() || x <= 0.0 {
        return Err(GraphError::Domain(format!(
            "exponent is undefined for non-positive or non-finite value {x}"
        )));
    }

    let mut exp = (x.ln() / base.ln()).floor() as i32;
    if base.powi(exp + 1) <= x {
        exp += 1;
    } else if base.powi(exp) > x {
        exp -= 1;
    }
    Ok(exp)
}

/// Mantissa of `x` in `base`, a value in `[1, base)` for positive `x`.
pub fn mantissa(x: f64, base: f64) -> GraphResult<f64> {
    let exp = exponent(x, base)?;
    Ok(x / base.powi(exp))
}

/// Ordered divisors of `n` in `1..=ceil(n / 2)`.
///
/// `n` itself is never listed (except for `n == 1`); `n <= 0` has no divisors.
/// Factorizing `base^k` yields the human-friendly fractions of a decade, e.g.
/// `100 -> 1, 2, 4, 5, 10, 20, 25, 50` gives steps of .25, .5 and so on.
#[must_use]
pub fn factorize(n: i64) -> Vec<i64> {
    if n <= 0 {
        return Vec::new();
    }
    let upper = n / 2 + n % 2;
    (1..=upper).filter(|candidate| n % candidate == 0).collect()
}

/// Rounds `value` to `digits` significant decimal digits.
///
/// Used to strip float noise such as `0.30000000000000004` before a tick
/// value is turned into text.
#[must_use]
pub fn snap_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let Ok(exp) = exponent(value.abs(), 10.0) else {
        return value;
    };
    let scale = 10_f64.powi(digits - 1 - exp);
    if !scale.is_finite() || scale == 0.0 {
        return value;
    }
    let snapped = (value * scale).round() / scale;
    if snapped.is_finite() { snapped } else { value }
}

/// Default numeric-to-text conversion for tick labels.
#[must_use]
pub fn format_tick_value(value: f64) -> String {
    let snapped = snap_significant(value, 12);
    if snapped == 0.0 {
        return "0".to_owned();
    }
    format!("{snapped}")
}

/// Relative float comparison used when matching magnitudes such as `1 / base`.
#[must_use]
pub(crate) fn approx_eq(left: f64, right: f64) -> bool {
    let scale = left.abs().max(right.abs()).max(f64::MIN_POSITIVE);
    (left - right).abs() <= scale * 1e-9
}

fn validate_base(base: f64) -> GraphResult<()> {
    if !base.is_finite() || base <= 1.0 {
        return Err(GraphError::Domain(format!(
            "logarithm base must be finite and > 1, got {base}"
        )));
    }
    Ok(())
}
