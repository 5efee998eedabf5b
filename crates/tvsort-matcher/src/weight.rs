//! Turning raw edit distances into comparable error rates.

/// Normalised error rate: `distance / (length + 1)`.
///
/// The `+ 1` keeps empty strings finite and makes very short strings
/// slightly more expensive.
pub fn weight(distance: f64, length: usize) -> f64 {
    distance / (length as f64 + 1.0)
}

/// Acceptance thresholds derived from input length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// An input may carry up to `length / exact_error_divisor` edits and
    /// still count as exact.
    pub exact_error_divisor: f64,
    /// Suggestions may carry `suggestion_factor` times the exact allowance.
    pub suggestion_factor: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            exact_error_divisor: 5.0,
            suggestion_factor: 2.5,
        }
    }
}

impl Thresholds {
    /// Largest raw edit distance that still counts as exact.
    pub fn max_distance(&self, length: usize) -> f64 {
        length as f64 / self.exact_error_divisor
    }

    /// Widen an exact allowance into a suggestion allowance.
    pub fn suggestion_distance(&self, max_distance: f64) -> f64 {
        max_distance * self.suggestion_factor
    }

    /// [`Self::max_distance`] expressed as a weight.
    pub fn exact_weight(&self, length: usize) -> f64 {
        weight(self.max_distance(length), length)
    }

    /// [`Self::suggestion_distance`] expressed as a weight.
    pub fn suggestion_weight(&self, length: usize) -> f64 {
        weight(self.suggestion_distance(self.max_distance(length)), length)
    }
}

/// `max_distance` with the default divisor of 5.
pub fn max_distance(length: usize) -> f64 {
    Thresholds::default().max_distance(length)
}

/// `suggestion_factor` with the default factor of 2.5.
pub fn suggestion_factor(max_distance: f64) -> f64 {
    Thresholds::default().suggestion_distance(max_distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_values() {
        assert_eq!(weight(0.0, 10), 0.0);
        assert_eq!(weight(2.0, 0), 2.0);
        assert_eq!(weight(3.0, 5), 0.5);
    }

    #[test]
    fn test_weight_decreases_with_length() {
        for distance in [1.0, 2.0, 7.5] {
            let mut previous = f64::INFINITY;
            for length in 0..50 {
                let w = weight(distance, length);
                assert!(w < previous);
                previous = w;
            }
        }
    }

    #[test]
    fn test_default_thresholds() {
        assert_eq!(max_distance(10), 2.0);
        assert_eq!(suggestion_factor(2.0), 5.0);

        let t = Thresholds::default();
        assert!(t.exact_weight(20) < t.suggestion_weight(20));
        assert_eq!(t.exact_weight(0), 0.0);
    }
}
