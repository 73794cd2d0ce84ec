//! Inbound recommendation request and its validated form.
//!
//! [`RecommendRequest`] mirrors the wire payload, where numbers may arrive
//! either as JSON numbers or as numeric strings. [`RecommendRequest::validate`]
//! checks every field before the engine runs and yields a
//! [`RecommendQuery`].

use std::collections::HashSet;

use geo::Coord;
use thiserror::Error;

use crate::{CoordinateError, PreferenceError, PreferenceWeights, parse_lat_lng};

/// A numeric request field supplied as a number or as text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum NumericField {
    /// A JSON number.
    Number(f64),
    /// A string expected to hold a number.
    Text(String),
}

impl Default for NumericField {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

impl From<f64> for NumericField {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NumericField {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl NumericField {
    fn parse(&self, field: &'static str) -> Result<f64, RequestValidationError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(raw) => {
                raw.trim()
                    .parse()
                    .map_err(|_| RequestValidationError::NotANumber {
                        field,
                        raw: raw.clone(),
                    })
            }
        }
    }
}

/// Errors found while validating a [`RecommendRequest`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestValidationError {
    /// `current_location` was not a valid `"lat,lng"` pair.
    #[error("invalid current_location: {0}")]
    Location(#[from] CoordinateError),
    /// A numeric field did not parse.
    #[error("{field} is not a number: {raw:?}")]
    NotANumber {
        /// Name of the offending field.
        field: &'static str,
        /// Text supplied by the caller.
        raw: String,
    },
    /// A preference was negative or non-finite.
    #[error(transparent)]
    Preference(#[from] PreferenceError),
    /// The minimum rating was negative or non-finite.
    #[error("min_rating must be a finite, non-negative number (found {value})")]
    MinRating {
        /// Value supplied by the caller.
        value: f64,
    },
    /// A required text field was empty.
    #[error("{field} must not be blank")]
    BlankField {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The amenity list contained no keywords.
    #[error("amenities must list at least one keyword")]
    NoKeywords,
}

/// A recommendation request as received from a client.
///
/// # Examples
/// ```
/// use locus_core::RecommendRequest;
///
/// let request = RecommendRequest {
///     current_location: "51.5074,-0.1278".into(),
///     city: "London".into(),
///     country: "UK".into(),
///     best_location_type: "coworking".into(),
///     time_preference: 1.0.into(),
///     rating_preference: "0.5".into(),
///     min_rating: 4.0.into(),
///     amenities: "cafe, gym, ,cafe".into(),
/// };
/// let query = request.validate()?;
/// assert_eq!(query.keywords, ["cafe", "gym"]);
/// assert_eq!(query.city_query(), "London, UK");
/// # Ok::<(), locus_core::RequestValidationError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecommendRequest {
    /// Caller position as `"lat,lng"`.
    pub current_location: String,
    /// City searched for amenities.
    pub city: String,
    /// Country of the city.
    pub country: String,
    /// Keyword of the venue type to recommend, e.g. `"coworking"`.
    pub best_location_type: String,
    /// Importance of short travel and proximity.
    pub time_preference: NumericField,
    /// Importance of well-rated amenities.
    pub rating_preference: NumericField,
    /// Minimum venue rating; `0` disables the filter.
    pub min_rating: NumericField,
    /// Comma-separated amenity keywords.
    pub amenities: String,
}

impl RecommendRequest {
    /// Validate every field and build the engine query.
    ///
    /// # Errors
    /// Returns the first [`RequestValidationError`] encountered.
    pub fn validate(&self) -> Result<RecommendQuery, RequestValidationError> {
        let origin = parse_lat_lng(&self.current_location)?;
        let city = required("city", &self.city)?;
        let country = required("country", &self.country)?;
        let best_location_type = required("best_location_type", &self.best_location_type)?;
        let preferences = PreferenceWeights::new(
            self.time_preference.parse("time_preference")?,
            self.rating_preference.parse("rating_preference")?,
        )?;
        let min_rating = self.min_rating.parse("min_rating")?;
        if !min_rating.is_finite() || min_rating < 0.0 {
            return Err(RequestValidationError::MinRating { value: min_rating });
        }
        let keywords = split_keywords(&self.amenities);
        if keywords.is_empty() {
            return Err(RequestValidationError::NoKeywords);
        }
        Ok(RecommendQuery {
            origin,
            city,
            country,
            best_location_type,
            preferences,
            min_rating,
            keywords,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, RequestValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(RequestValidationError::BlankField { field })
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Trimmed, non-blank keywords; the first occurrence of a duplicate wins.
fn split_keywords(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty() && seen.insert(*keyword))
        .map(ToOwned::to_owned)
        .collect()
}

/// A validated recommendation request.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendQuery {
    /// Caller position used as the travel-time origin.
    pub origin: Coord<f64>,
    /// City searched for amenities.
    pub city: String,
    /// Country of the city.
    pub country: String,
    /// Venue type to recommend.
    pub best_location_type: String,
    /// Time versus rating trade-off.
    pub preferences: PreferenceWeights,
    /// Minimum venue rating; `0.0` disables the filter.
    pub min_rating: f64,
    /// Amenity keywords in request order.
    pub keywords: Vec<String>,
}

impl RecommendQuery {
    /// Address geocoded to find the search centre.
    #[must_use]
    pub fn city_query(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> RecommendRequest {
        RecommendRequest {
            current_location: "40.7484,-73.9857".into(),
            city: "New York".into(),
            country: "USA".into(),
            best_location_type: "coworking".into(),
            time_preference: 2.0.into(),
            rating_preference: 1.0.into(),
            min_rating: 0.0.into(),
            amenities: "cafe,gym".into(),
        }
    }

    #[rstest]
    fn valid_request_builds_query(request: RecommendRequest) {
        let query = request.validate().expect("valid request");
        assert_eq!(query.origin, Coord { x: -73.9857, y: 40.7484 });
        assert_eq!(query.keywords, ["cafe", "gym"]);
        assert_eq!(query.preferences.time_weight(), 2.0 / 3.0);
    }

    #[rstest]
    fn numeric_text_is_accepted(mut request: RecommendRequest) {
        request.min_rating = " 3.5 ".into();
        let query = request.validate().expect("valid request");
        assert_eq!(query.min_rating, 3.5);
    }

    #[rstest]
    fn keywords_are_trimmed_and_deduplicated(mut request: RecommendRequest) {
        request.amenities = " gym ,cafe,, gym,park ".into();
        let query = request.validate().expect("valid request");
        assert_eq!(query.keywords, ["gym", "cafe", "park"]);
    }

    #[rstest]
    fn malformed_location_is_rejected(mut request: RecommendRequest) {
        request.current_location = "north pole".into();
        assert!(matches!(
            request.validate(),
            Err(RequestValidationError::Location(_))
        ));
    }

    #[rstest]
    fn non_numeric_preference_is_rejected(mut request: RecommendRequest) {
        request.rating_preference = "lots".into();
        assert_eq!(
            request.validate(),
            Err(RequestValidationError::NotANumber {
                field: "rating_preference",
                raw: "lots".into()
            })
        );
    }

    #[rstest]
    fn negative_preference_is_rejected(mut request: RecommendRequest) {
        request.time_preference = (-1.0).into();
        assert!(matches!(
            request.validate(),
            Err(RequestValidationError::Preference(_))
        ));
    }

    #[rstest]
    #[case(-0.5)]
    #[case(f64::NAN)]
    fn bad_min_rating_is_rejected(mut request: RecommendRequest, #[case] value: f64) {
        request.min_rating = value.into();
        assert!(matches!(
            request.validate(),
            Err(RequestValidationError::MinRating { .. })
        ));
    }

    #[rstest]
    fn blank_city_is_rejected(mut request: RecommendRequest) {
        request.city = "  ".into();
        assert_eq!(
            request.validate(),
            Err(RequestValidationError::BlankField { field: "city" })
        );
    }

    #[rstest]
    fn blank_keyword_list_is_rejected(mut request: RecommendRequest) {
        request.amenities = " , ,".into();
        assert_eq!(request.validate(), Err(RequestValidationError::NoKeywords));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn json_accepts_numbers_and_numeric_strings() {
        let json = serde_json::json!({
            "current_location": "51.5072,-0.1276",
            "city": "London",
            "country": "UK",
            "best_location_type": "library",
            "time_preference": 3,
            "rating_preference": "1.5",
            "min_rating": " 4 ",
            "amenities": "cafe, park"
        });
        let request: RecommendRequest = serde_json::from_value(json).expect("decodes");
        assert_eq!(request.time_preference, NumericField::Number(3.0));
        assert_eq!(request.rating_preference, NumericField::Text("1.5".into()));
        let query = request.validate().expect("valid request");
        assert_eq!(query.min_rating, 4.0);
        assert_eq!(query.preferences.time_weight(), 3.0 / 4.5);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn json_rejects_non_scalar_numeric_fields() {
        let json = serde_json::json!({
            "current_location": "51.5072,-0.1276",
            "city": "London",
            "country": "UK",
            "best_location_type": "library",
            "time_preference": [1],
            "rating_preference": 1,
            "min_rating": 0,
            "amenities": "cafe"
        });
        assert!(serde_json::from_value::<RecommendRequest>(json).is_err());
    }
}
