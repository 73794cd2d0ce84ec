//! Amenities and the flat, category-indexed container that holds them.
//!
//! [`AmenitySet`] keeps every amenity in one owned vector and records each
//! category as a keyword, a weight and an index range into that vector. The
//! engine borrows read-only [`Category`] views and never mutates the data.

use std::ops::Range;

use geo::Coord;

/// Address reported for places the directory returned without one.
pub const NO_ADDRESS: &str = "No address available";

/// A point of interest returned by a places directory.
///
/// A `rating` of `0.0` means the place is unrated.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use locus_core::Amenity;
///
/// let cafe = Amenity::new("Bean There", "1 High St", 4.5, Coord { x: -0.12, y: 51.5 });
/// assert!(cafe.is_rated());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Amenity {
    /// Display name.
    pub name: String,
    /// Street address, or [`NO_ADDRESS`].
    pub address: String,
    /// Average rating; `0.0` when unrated.
    pub rating: f64,
    /// WGS84 position (`x = longitude`, `y = latitude`).
    pub location: Coord<f64>,
}

impl Amenity {
    /// Construct an amenity.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        rating: f64,
        location: Coord<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            rating,
            location,
        }
    }

    /// Whether the amenity carries a rating.
    #[must_use]
    pub fn is_rated(&self) -> bool {
        self.rating != 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CategorySpan {
    keyword: String,
    weight: f64,
    range: Range<usize>,
}

/// Borrowed view of one category inside an [`AmenitySet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Category<'a> {
    /// Search keyword the amenities were fetched with.
    pub keyword: &'a str,
    /// Scoring weight of the category.
    pub weight: f64,
    /// Amenities in the order the directory returned them.
    pub amenities: &'a [Amenity],
}

/// Amenities grouped by category, stored contiguously.
///
/// Weights are caller-supplied. They should sum to `1.0` for the cost to
/// read as a convex combination, but the container does not enforce it.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use locus_core::{Amenity, AmenitySet};
///
/// let gym = Amenity::new("Iron Works", "2 Mill Rd", 4.0, Coord { x: 0.0, y: 0.0 });
/// let cafe = Amenity::new("Bean There", "1 High St", 4.5, Coord { x: 0.01, y: 0.0 });
/// let set = AmenitySet::new()
///     .with_category("gym", 0.5, [gym])
///     .with_category("cafe", 0.5, [cafe]);
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.locations().count(), 2);
/// assert!((set.total_weight() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmenitySet {
    amenities: Vec<Amenity>,
    categories: Vec<CategorySpan>,
}

impl AmenitySet {
    /// Construct an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set where each of the `n` groups receives weight `1 / n`.
    ///
    /// # Examples
    /// ```
    /// use locus_core::AmenitySet;
    ///
    /// let set = AmenitySet::with_equal_weights(vec![
    ///     ("cafe".to_owned(), Vec::new()),
    ///     ("gym".to_owned(), Vec::new()),
    /// ]);
    /// assert!(set.categories().all(|c| c.weight == 0.5));
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "equal weights are the reciprocal of the category count"
    )]
    pub fn with_equal_weights<I, A>(groups: I) -> Self
    where
        I: IntoIterator<Item = (String, A)>,
        A: IntoIterator<Item = Amenity>,
    {
        let groups: Vec<(String, A)> = groups.into_iter().collect();
        let weight = if groups.is_empty() {
            0.0
        } else {
            1.0 / count_as_f64(groups.len())
        };
        groups
            .into_iter()
            .fold(Self::new(), |set, (keyword, amenities)| {
                set.with_category(keyword, weight, amenities)
            })
    }

    /// Append a category and its amenities.
    pub fn push_category<I>(&mut self, keyword: impl Into<String>, weight: f64, amenities: I)
    where
        I: IntoIterator<Item = Amenity>,
    {
        let start = self.amenities.len();
        self.amenities.extend(amenities);
        let end = self.amenities.len();
        self.categories.push(CategorySpan {
            keyword: keyword.into(),
            weight,
            range: start..end,
        });
    }

    /// Append a category while returning `self` for chaining.
    #[must_use]
    pub fn with_category<I>(mut self, keyword: impl Into<String>, weight: f64, amenities: I) -> Self
    where
        I: IntoIterator<Item = Amenity>,
    {
        self.push_category(keyword, weight, amenities);
        self
    }

    /// Iterate over the categories in insertion order.
    pub fn categories(&self) -> impl Iterator<Item = Category<'_>> + '_ {
        self.categories.iter().map(|span| Category {
            keyword: &span.keyword,
            weight: span.weight,
            amenities: self.amenities.get(span.range.clone()).unwrap_or(&[]),
        })
    }

    /// Iterate over every amenity location, ignoring category boundaries.
    pub fn locations(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.amenities.iter().map(|amenity| amenity.location)
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the set has no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of amenities across all categories.
    #[must_use]
    pub fn amenity_count(&self) -> usize {
        self.amenities.len()
    }

    /// Sum of the category weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.categories.iter().map(|span| span.weight).sum()
    }
}

/// Apply the minimum-rating filter to best-location-type venues.
///
/// With a positive threshold, unrated venues and venues rated below the
/// threshold are dropped. A threshold of zero or less keeps everything.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use locus_core::{Amenity, filter_by_min_rating};
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let venues = vec![
///     Amenity::new("Unrated", "a", 0.0, origin),
///     Amenity::new("Good", "b", 4.2, origin),
///     Amenity::new("Poor", "c", 3.1, origin),
/// ];
/// let kept = filter_by_min_rating(venues, 4.0);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].name, "Good");
/// ```
#[must_use]
pub fn filter_by_min_rating(venues: Vec<Amenity>, min_rating: f64) -> Vec<Amenity> {
    if min_rating <= 0.0 {
        return venues;
    }
    venues
        .into_iter()
        .filter(|venue| venue.is_rated() && venue.rating >= min_rating)
        .collect()
}

#[expect(
    clippy::cast_precision_loss,
    reason = "category counts are far below 2^52"
)]
pub(crate) const fn count_as_f64(count: usize) -> f64 {
    count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn amenity(name: &str, rating: f64, x: f64) -> Amenity {
        Amenity::new(name, NO_ADDRESS, rating, Coord { x, y: 0.0 })
    }

    #[fixture]
    fn two_categories() -> AmenitySet {
        AmenitySet::new()
            .with_category("cafe", 0.25, [amenity("a", 4.0, 0.0), amenity("b", 3.0, 0.1)])
            .with_category("gym", 0.75, [amenity("c", 5.0, 0.2)])
    }

    #[rstest]
    fn categories_borrow_their_own_ranges(two_categories: AmenitySet) {
        let categories: Vec<_> = two_categories.categories().collect();
        assert_eq!(categories.len(), 2);
        let names: Vec<_> = categories
            .iter()
            .map(|c| c.amenities.iter().map(|a| a.name.as_str()).collect::<Vec<_>>())
            .collect();
        assert_eq!(names, vec![vec!["a", "b"], vec!["c"]]);
        assert_eq!(categories.first().map(|c| c.keyword), Some("cafe"));
    }

    #[rstest]
    fn locations_flatten_across_categories(two_categories: AmenitySet) {
        let xs: Vec<f64> = two_categories.locations().map(|c| c.x).collect();
        assert_eq!(xs, vec![0.0, 0.1, 0.2]);
        assert_eq!(two_categories.amenity_count(), 3);
    }

    #[rstest]
    fn empty_category_yields_empty_slice() {
        let set = AmenitySet::new().with_category("museum", 1.0, Vec::new());
        let category = set.categories().next().expect("one category");
        assert!(category.amenities.is_empty());
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(7)]
    fn equal_weights_sum_to_one(#[case] groups: usize) {
        let set = AmenitySet::with_equal_weights(
            (0..groups).map(|i| (format!("k{i}"), vec![amenity("x", 1.0, 0.0)])),
        );
        assert!((set.total_weight() - 1.0).abs() < 1e-9);
    }

    #[rstest]
    fn min_rating_zero_keeps_unrated() {
        let venues = vec![amenity("u", 0.0, 0.0), amenity("r", 2.0, 0.0)];
        assert_eq!(filter_by_min_rating(venues.clone(), 0.0), venues);
    }

    #[rstest]
    fn min_rating_is_inclusive() {
        let venues = vec![amenity("edge", 4.0, 0.0), amenity("below", 3.99, 0.0)];
        let kept = filter_by_min_rating(venues, 4.0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.first().map(|v| v.name.as_str()), Some("edge"));
    }
}
