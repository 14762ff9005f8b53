//! Axis scaling and tick generation.

mod linear;

pub use linear::LinearScale;

/// A tick position on an axis: the domain value and the pixel it maps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub pixel: f64,
}

/// Trait for forward-only axis scales.
pub trait Scale: std::fmt::Debug {
    /// Map a domain value to a pixel coordinate.
    fn apply(&self, value: f64) -> f64;

    /// The `(lo, hi)` domain this scale was built from.
    fn domain(&self) -> (f64, f64);

    /// The `(start, end)` pixel range this scale was built from.
    fn range(&self) -> (f64, f64);

    /// Generate nice ticks covering the domain. Each tick's pixel is exactly
    /// `apply(value)`.
    fn ticks(&self, num_ticks: usize) -> Vec<Tick> {
        let (lo, hi) = self.domain();
        nice_ticks(lo.min(hi), lo.max(hi), num_ticks)
            .into_iter()
            .map(|value| Tick {
                value,
                pixel: self.apply(value),
            })
            .collect()
    }
}

/// Compute "nice" numbers for axis ticks.
pub fn nice_number(range: f64, round: bool) -> f64 {
    let exponent = range.log10().floor();
    let fraction = range / 10_f64.powf(exponent);

    let nice_fraction = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice_fraction * 10_f64.powf(exponent)
}

/// Generate nice tick values within `[min, max]`.
///
/// Values are computed as `start + i * step` rather than by accumulation so
/// that `0.6` stays `0.6` on a `[0, 1]` axis.
pub fn nice_ticks(min: f64, max: f64, num_ticks: usize) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) {
        return Vec::new();
    }
    if num_ticks < 2 || max <= min {
        return vec![min];
    }

    let range = nice_number(max - min, false);
    let step = nice_number(range / (num_ticks - 1) as f64, true);
    let eps = step * 1e-9;
    let first = ((min - eps) / step).ceil();
    let last = ((max + eps) / step).floor();

    // index arithmetic stops being exact once `first` passes 2^53
    let count = last - first;
    if !count.is_finite() || count > MAX_TICKS || first.abs() >= 2f64.powi(53) {
        return vec![min, max];
    }
    if count < 0.0 {
        return Vec::new();
    }

    let mut ticks: Vec<f64> = Vec::new();
    for k in 0..=count as usize {
        let tick = round_to_step((first + k as f64) * step, step);
        if tick >= min - eps && tick <= max + eps && ticks.last() != Some(&tick) {
            ticks.push(tick);
        }
    }

    ticks
}

/// Upper bound on generated ticks; anything beyond means the domain is too
/// narrow for its magnitude.
const MAX_TICKS: f64 = 10_000.0;

/// Strip floating noise below the step's precision (0.30000000000000004 -> 0.3).
fn round_to_step(value: f64, step: f64) -> f64 {
    let decimals = (-step.log10().floor()).max(0.0) as i32 + 1;
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
