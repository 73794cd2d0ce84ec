//! Caller preferences trading travel time against amenity quality.

use thiserror::Error;

/// Errors returned by [`PreferenceWeights::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreferenceError {
    /// A preference was negative, NaN or infinite.
    #[error("{field} must be a finite, non-negative number (found {value})")]
    Invalid {
        /// Name of the offending preference.
        field: &'static str,
        /// Value supplied by the caller.
        value: f64,
    },
}

/// Relative importance of travel time and amenity rating.
///
/// The derived weights are the preferences divided by their sum, or both
/// zero when the sum is zero.
///
/// # Examples
/// ```
/// use locus_core::PreferenceWeights;
///
/// let prefs = PreferenceWeights::new(3.0, 1.0)?;
/// assert_eq!(prefs.time_weight(), 0.75);
/// assert_eq!(prefs.rating_weight(), 0.25);
///
/// let neutral = PreferenceWeights::new(0.0, 0.0)?;
/// assert_eq!(neutral.time_weight(), 0.0);
/// # Ok::<(), locus_core::PreferenceError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreferenceWeights {
    time_preference: f64,
    rating_preference: f64,
}

impl PreferenceWeights {
    /// Validate and construct preference weights.
    pub fn new(time_preference: f64, rating_preference: f64) -> Result<Self, PreferenceError> {
        check("time_preference", time_preference)?;
        check("rating_preference", rating_preference)?;
        Ok(Self {
            time_preference,
            rating_preference,
        })
    }

    /// Raw time preference.
    #[must_use]
    pub const fn time_preference(&self) -> f64 {
        self.time_preference
    }

    /// Raw rating preference.
    #[must_use]
    pub const fn rating_preference(&self) -> f64 {
        self.rating_preference
    }

    /// Share of the cost given to distance and travel time.
    #[must_use]
    pub fn time_weight(&self) -> f64 {
        self.share(self.time_preference)
    }

    /// Share of the cost given to amenity ratings.
    #[must_use]
    pub fn rating_weight(&self) -> f64 {
        self.share(self.rating_preference)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "weights are preferences normalised by their sum"
    )]
    fn share(&self, preference: f64) -> f64 {
        let total = self.time_preference + self.rating_preference;
        if total == 0.0 { 0.0 } else { preference / total }
    }
}

fn check(field: &'static str, value: f64) -> Result<(), PreferenceError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PreferenceError::Invalid { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1.0, 0.0, 1.0, 0.0)]
    #[case(0.0, 2.0, 0.0, 1.0)]
    #[case(1.0, 1.0, 0.5, 0.5)]
    #[case(0.0, 0.0, 0.0, 0.0)]
    fn derives_normalised_weights(
        #[case] time: f64,
        #[case] rating: f64,
        #[case] expected_time: f64,
        #[case] expected_rating: f64,
    ) {
        let prefs = PreferenceWeights::new(time, rating).expect("valid preferences");
        assert!((prefs.time_weight() - expected_time).abs() < 1e-12);
        assert!((prefs.rating_weight() - expected_rating).abs() < 1e-12);
    }

    #[rstest]
    #[case(-1.0, 0.0, "time_preference")]
    #[case(0.0, f64::NAN, "rating_preference")]
    #[case(f64::INFINITY, 1.0, "time_preference")]
    fn rejects_invalid_preferences(#[case] time: f64, #[case] rating: f64, #[case] field: &str) {
        match PreferenceWeights::new(time, rating) {
            Err(PreferenceError::Invalid { field: found, .. }) => assert_eq!(found, field),
            other => panic!("expected Invalid, found {other:?}"),
        }
    }
}
