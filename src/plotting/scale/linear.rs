//! Linear scale transformation.

use super::Scale;

/// An affine map from a data domain onto a pixel range.
///
/// Two scales compare equal when they were built from the same domain and
/// range, which makes the comparison a cheap stand-in for "same function".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Build a linear scale mapping `domain` onto `range`.
    ///
    /// `range` may be inverted (e.g. `(height, 0.0)` for a y axis whose
    /// largest value sits at the top).
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    /// Survival axis: fixed `[0, 1]` domain, inverted onto `[height, 0]`.
    pub fn survival(height: f64) -> Self {
        LinearScale::new((0.0, 1.0), (height, 0.0))
    }

    /// Time axis: `domain` onto `[0, width]`.
    pub fn time(domain: (f64, f64), width: f64) -> Self {
        LinearScale::new(domain, (0.0, width))
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        LinearScale::new((0.0, 1.0), (0.0, 1.0))
    }
}

impl Scale for LinearScale {
    fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_mapping() {
        let x = LinearScale::time((0.0, 10.0), 200.0);
        assert_eq!(x.apply(0.0), 0.0);
        assert_eq!(x.apply(5.0), 100.0);
        assert_eq!(x.apply(10.0), 200.0);
    }

    #[test]
    fn test_survival_axis_is_inverted() {
        let y = LinearScale::survival(400.0);
        assert_eq!(y.apply(1.0), 0.0);
        assert_eq!(y.apply(0.0), 400.0);
        assert_eq!(y.apply(0.25), 300.0);
    }

    #[test]
    fn test_monotonic_with_range_sign() {
        let up = LinearScale::new((2.0, 8.0), (0.0, 60.0));
        let down = LinearScale::new((2.0, 8.0), (60.0, 0.0));
        let samples = [2.0, 3.5, 4.0, 7.9, 8.0];
        for pair in samples.windows(2) {
            assert!(up.apply(pair[0]) < up.apply(pair[1]));
            assert!(down.apply(pair[0]) > down.apply(pair[1]));
        }
    }

    #[test]
    fn test_degenerate_domain_maps_to_midpoint() {
        let x = LinearScale::time((3.0, 3.0), 100.0);
        assert_eq!(x.apply(3.0), 50.0);
        assert_eq!(x.apply(-7.0), 50.0);
    }

    #[test]
    fn test_equality_tracks_parameters() {
        let a = LinearScale::time((0.0, 10.0), 200.0);
        assert_eq!(a, LinearScale::time((0.0, 10.0), 200.0));
        assert_ne!(a, LinearScale::time((0.0, 10.0), 300.0));
        assert_ne!(a, LinearScale::time((0.0, 12.0), 200.0));
    }
}
