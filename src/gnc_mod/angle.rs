use std::f64::consts::{PI, TAU};

/// Wrap an angle into [0, 2pi).
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Shortest signed rotation between two absolute angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleDiff {
    /// Signed distance in [-pi, pi]; positive means increasing orientation.
    pub delta: f64,
    /// The shortest path crosses the 0/2pi seam.
    pub through_zero: bool,
}

impl AngleDiff {
    pub fn magnitude(&self) -> f64 {
        self.delta.abs()
    }
}

/// Minimal signed difference going `from` -> `to`.
///
/// The raw difference of the wrapped angles is compared against its folded
/// counterpart; when folding was needed the short way goes through zero.
pub fn angle_diff(from: f64, to: f64) -> AngleDiff {
    let raw = wrap_angle(to) - wrap_angle(from);
    if raw > PI {
        AngleDiff { delta: raw - TAU, through_zero: true }
    } else if raw < -PI {
        AngleDiff { delta: raw + TAU, through_zero: true }
    } else {
        AngleDiff { delta: raw, through_zero: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn quarter_turn_does_not_cross_zero() {
        let d = angle_diff(0.0, FRAC_PI_2);
        assert_abs_diff_eq!(d.delta, FRAC_PI_2, epsilon = 1e-12);
        assert!(!d.through_zero);
    }

    #[test]
    fn short_way_through_zero() {
        let d = angle_diff(FRAC_PI_4, 7.0 * FRAC_PI_4);
        assert_abs_diff_eq!(d.delta, -FRAC_PI_2, epsilon = 1e-12);
        assert!(d.through_zero);

        let back = angle_diff(7.0 * FRAC_PI_4, FRAC_PI_4);
        assert_abs_diff_eq!(back.delta, FRAC_PI_2, epsilon = 1e-12);
        assert!(back.through_zero);
    }

    #[test]
    fn identical_angles_have_zero_diff() {
        let d = angle_diff(1.25, 1.25 + TAU);
        assert_abs_diff_eq!(d.delta, 0.0, epsilon = 1e-12);
        assert!(!d.through_zero);
    }

    #[test]
    fn diff_is_minimal_and_lands_on_target() {
        let steps = 48;
        for i in 0..steps {
            for j in 0..steps {
                let a = TAU * i as f64 / steps as f64 + 0.013;
                let b = TAU * j as f64 / steps as f64 + 0.007;
                let d = angle_diff(a, b);
                assert!(d.magnitude() <= PI + 1e-12, "|diff({a}, {b})| = {}", d.magnitude());
                let landed = angle_diff(wrap_angle(a + d.delta), b);
                assert_abs_diff_eq!(landed.delta, 0.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn wrap_stays_in_range() {
        assert_abs_diff_eq!(wrap_angle(-FRAC_PI_2), 3.0 * FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_angle(TAU + 0.5), 0.5, epsilon = 1e-12);
        assert_eq!(wrap_angle(TAU), 0.0);
        let tiny = wrap_angle(-1e-18);
        assert!((0.0..TAU).contains(&tiny));
    }
}
