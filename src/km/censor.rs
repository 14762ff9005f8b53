//! Censor tick placement.

use crate::km::model::{Curve, Sample};
use crate::plotting::Scale;

/// Half-length of a censor tick in pixels.
pub const CENSOR_HALF_LENGTH: f64 = 5.0;

/// Pixel position of one censored sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CensorMark {
    pub x: f64,
    pub y: f64,
}

impl CensorMark {
    /// Endpoints of the vertical tick centered on the mark.
    pub fn tick(&self, half_length: f64) -> ((f64, f64), (f64, f64)) {
        ((self.x, self.y - half_length), (self.x, self.y + half_length))
    }
}

/// Samples of `curve` that are censors (`e == false`), in curve order.
pub fn censors(curve: &Curve) -> impl Iterator<Item = &Sample> + '_ {
    curve.samples().iter().filter(|p| p.is_censor())
}

/// Tick positions for every censored sample.
pub fn censor_marks(curve: &Curve, x: &dyn Scale, y: &dyn Scale) -> Vec<CensorMark> {
    censors(curve)
        .map(|p| CensorMark {
            x: x.apply(p.t),
            y: y.apply(p.s),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::LinearScale;

    fn curve() -> Curve {
        let raw = [
            (0.0, 1.0, 12, true),
            (1.0, 0.92, 11, false),
            (2.0, 0.83, 10, true),
            (4.0, 0.83, 9, false),
            (4.0, 0.83, 8, false),
            (9.0, 0.5, 3, true),
        ];
        Curve::new(
            raw.iter()
                .map(|&(t, s, n, e)| Sample { t, s, n, e })
                .collect(),
        )
    }

    #[test]
    fn test_censors_partition_samples() {
        let curve = curve();
        let censored = censors(&curve).count();
        let events = curve.samples().iter().filter(|p| p.e).count();
        assert_eq!(censored, 3);
        assert_eq!(censored + events, curve.len());
        assert!(censors(&curve).all(|p| !p.e));
    }

    #[test]
    fn test_marks_follow_scales() {
        let x = LinearScale::time((0.0, 10.0), 100.0);
        let y = LinearScale::survival(200.0);
        let marks = censor_marks(&curve(), &x, &y);
        assert_eq!(marks.len(), 3);
        assert_eq!(marks[0].x, 10.0);
        assert!((marks[0].y - 16.0).abs() < 1e-9);

        let ((x1, y1), (x2, y2)) = marks[1].tick(CENSOR_HALF_LENGTH);
        assert_eq!(x1, x2);
        assert!((y2 - y1 - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_curve_has_no_marks() {
        let x = LinearScale::default();
        let y = LinearScale::survival(1.0);
        assert!(censor_marks(&Curve::empty(), &x, &y).is_empty());
    }
}
