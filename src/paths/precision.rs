use std::fmt;

/// Rule applied to every relaxed distance candidate before it is compared
/// with the current distance.
///
/// Rounding changes results: a candidate that only wins by less than the
/// rounding unit may tie or lose after rounding, and a rounded direct weight
/// can replace its unrounded original. The caller chooses explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// Compare raw floating point sums.
    Exact,
    /// Round each candidate to `digits` decimal places.
    ///
    /// Rounding works on the exact binary value, so `22.85` (stored a hair
    /// above the tie) goes up and `73.55` (stored a hair below) goes down.
    /// Only exactly representable halves tie, and those go to even.
    Round { digits: u32 },
}

impl Precision {
    /// Largest digit count that still changes an `f64`. Beyond this the
    /// scale factor alone exceeds the 17 significant digits of a double.
    pub const MAX_DIGITS: u32 = 17;

    /// Rounding to `digits` decimal places, clamped to [`Precision::MAX_DIGITS`].
    pub fn round_to(digits: u32) -> Self {
        Precision::Round {
            digits: digits.min(Self::MAX_DIGITS),
        }
    }

    #[inline]
    pub fn is_exact(self) -> bool {
        matches!(self, Precision::Exact)
    }

    /// Applies the policy to one candidate.
    ///
    /// Infinite values pass through, so the "no path" sentinel survives
    /// rounding.
    #[inline]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Precision::Exact => value,
            Precision::Round { digits } => {
                if !value.is_finite() {
                    return value;
                }
                // fixed precision formatting rounds the exact decimal
                // expansion; scaling by a power of ten first would round twice
                let digits = digits.min(Self::MAX_DIGITS) as usize;
                format!("{value:.digits$}").parse().unwrap_or(value)
            }
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Exact => write!(f, "exact"),
            Precision::Round { digits } => write!(f, "round({digits})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn exact_is_identity() {
        for value in [0.0, -1.5, 1e300, f64::INFINITY, 0.1 + 0.2] {
            assert_eq!(Precision::Exact.apply(value), value);
        }
        assert!(Precision::Exact.is_exact());
        assert!(!Precision::round_to(2).is_exact());
    }

    #[test]
    fn rounds_to_requested_digits() {
        let two = Precision::round_to(2);
        assert_eq!(two.apply(1.234), 1.23);
        assert_eq!(two.apply(-1.236), -1.24);
        assert_eq!(Precision::round_to(0).apply(2.5), 2.0, "ties go to even");
        assert_eq!(Precision::round_to(0).apply(3.5), 4.0, "ties go to even");
        assert_eq!(Precision::round_to(6).apply(0.1 + 0.2), 0.3);
    }

    #[test]
    fn rounds_the_stored_binary_value() {
        let one = Precision::round_to(1);
        // 22.85 is stored as 22.850000000000001..., 73.55 as 73.549999999999997...
        assert_eq!(one.apply(22.85), 22.9);
        assert_eq!(one.apply(73.55), 73.5);
        assert_eq!(one.apply(-22.85), -22.9);
        assert_eq!(Precision::round_to(2).apply(1.005), 1.0, "1.005 is stored below the tie");
        assert_eq!(Precision::round_to(2).apply(0.125), 0.12, "exact halves go to even");
    }

    #[test]
    fn infinity_survives_rounding() {
        let policy = Precision::round_to(6);
        assert_eq!(policy.apply(f64::INFINITY), f64::INFINITY);
        assert_eq!(policy.apply(f64::NEG_INFINITY), f64::NEG_INFINITY);
    }

    #[test]
    fn huge_values_are_left_alone() {
        let policy = Precision::round_to(10);
        assert_eq!(policy.apply(1e300), 1e300);
    }

    #[test]
    fn digits_are_clamped() {
        assert_eq!(Precision::round_to(40), Precision::Round { digits: 17 });
        assert_eq!(Precision::round_to(3).to_string(), "round(3)");
        assert_eq!(Precision::Exact.to_string(), "exact");
    }

    proptest! {
        // Rounding is idempotent and moves a value by at most half a unit.
        #[test]
        fn prop_round_is_idempotent_and_close(value in -1e6f64..1e6, digits in 0u32..=6) {
            let policy = Precision::round_to(digits);
            let once = policy.apply(value);
            prop_assert_eq!(policy.apply(once), once);
            let unit = 10f64.powi(-(digits as i32));
            prop_assert!((once - value).abs() <= unit / 2.0 + 1e-9);
        }
    }
}
