//! Bucketize-by-boundaries
//!
//! Both derived categories (the binary poverty flag and the four-level
//! urbanicity ordinal) are interval partitions of a percentage domain. This
//! module implements the partition once, parameterized by an ordered break
//! list, so the boundary convention lives in exactly one place.

/// An ordered set of right-closed intervals over `f64`
///
/// A value `x` falls in bin `i` when `breaks[i] < x <= breaks[i + 1]`.
/// Values at or below the first break, or above the last, are out of range.
#[derive(Debug, Clone)]
pub struct Bins<L: Copy> {
    breaks: Vec<f64>,
    labels: Vec<L>,
}

impl<L: Copy> Bins<L> {
    /// Build a partition from strictly increasing breaks and one label per
    /// interval
    ///
    /// # Panics
    /// Panics if `breaks.len() != labels.len() + 1` or the breaks are not
    /// strictly increasing. Both are programmer errors in the static break
    /// tables, not data conditions.
    #[must_use]
    pub fn new(breaks: Vec<f64>, labels: Vec<L>) -> Self {
        assert_eq!(
            breaks.len(),
            labels.len() + 1,
            "need exactly one more break than labels"
        );
        assert!(
            breaks.windows(2).all(|w| w[0] < w[1]),
            "breaks must be strictly increasing"
        );
        Self { breaks, labels }
    }

    /// Classify a value into its interval label
    ///
    /// Returns `None` for values outside `(first_break, last_break]`,
    /// including NaN.
    #[must_use]
    pub fn classify(&self, x: f64) -> Option<L> {
        if x.is_nan() || x <= self.breaks[0] {
            return None;
        }
        self.breaks[1..]
            .iter()
            .position(|upper| x <= *upper)
            .map(|i| self.labels[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quartiles() -> Bins<u8> {
        Bins::new(vec![-1.0, 10.0, 20.0, 30.0, 100.0], vec![0, 1, 2, 3])
    }

    #[test]
    fn boundaries_are_right_closed() {
        let bins = quartiles();
        assert_eq!(bins.classify(0.0), Some(0));
        assert_eq!(bins.classify(10.0), Some(0));
        assert_eq!(bins.classify(10.000001), Some(1));
        assert_eq!(bins.classify(20.0), Some(1));
        assert_eq!(bins.classify(30.0), Some(2));
        assert_eq!(bins.classify(100.0), Some(3));
    }

    #[test]
    fn out_of_range_values_are_none() {
        let bins = quartiles();
        assert_eq!(bins.classify(-1.0), None);
        assert_eq!(bins.classify(-5.0), None);
        assert_eq!(bins.classify(100.1), None);
        assert_eq!(bins.classify(f64::NAN), None);
    }

    #[test]
    fn classification_is_repeatable() {
        let bins = quartiles();
        for x in [0.0, 9.9, 10.0, 16.3, 55.5] {
            assert_eq!(bins.classify(x), bins.classify(x));
        }
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    fn unsorted_breaks_are_rejected() {
        let _ = Bins::new(vec![0.0, 10.0, 5.0], vec![0, 1]);
    }
}
