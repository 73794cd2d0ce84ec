//! Turn a winning candidate into a full recommendation.

use geo::Coord;
use thiserror::Error;

use crate::{
    Amenity, AmenitySet, Geocoder, Recommendation, ScoreResult, geodesic_distance_km,
    reverse_geocode_or_sentinel,
};

/// The amenity of one category closest to the winner.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearestAmenity {
    /// Category keyword.
    pub keyword: String,
    /// Geodesic distance from the winner in kilometres.
    pub distance_km: f64,
    /// Name of the closest amenity.
    pub name: String,
    /// Address of the closest amenity.
    pub address: String,
    /// Rating of the closest amenity; `0.0` when unrated.
    pub rating: f64,
}

/// Errors returned by [`assemble`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// No category held any amenity.
    #[error("no category has amenities")]
    NoAmenities,
    /// The venue list was empty.
    #[error("no venue candidates")]
    NoVenues,
}

/// Build the recommendation for `winner`.
///
/// The address comes from `geocoder`, with a sentinel on failure. Each
/// non-empty category reports its nearest amenity, and the venue reported
/// is the one in `venues` closest to the winner. Exact distance ties go to
/// the earlier entry.
///
/// # Errors
/// Returns [`AssemblyError::NoAmenities`] when every category is empty and
/// [`AssemblyError::NoVenues`] when `venues` is empty.
pub fn assemble<G>(
    winner: &ScoreResult,
    amenities: &AmenitySet,
    venues: &[Amenity],
    geocoder: &G,
) -> Result<Recommendation, AssemblyError>
where
    G: Geocoder + ?Sized,
{
    let location = winner.candidate;
    let nearest: Vec<NearestAmenity> = amenities
        .categories()
        .filter_map(|category| {
            let (amenity, distance_km) = closest(location, category.amenities)?;
            Some(NearestAmenity {
                keyword: category.keyword.to_owned(),
                distance_km,
                name: amenity.name.clone(),
                address: amenity.address.clone(),
                rating: amenity.rating,
            })
        })
        .collect();
    if nearest.is_empty() {
        return Err(AssemblyError::NoAmenities);
    }
    let (venue, _) = closest(location, venues).ok_or(AssemblyError::NoVenues)?;

    Ok(Recommendation {
        location,
        address: reverse_geocode_or_sentinel(geocoder, location),
        score: winner.score,
        nearest,
        venue: venue.clone(),
    })
}

/// First amenity at the minimum geodesic distance from `point`.
fn closest(point: Coord<f64>, amenities: &[Amenity]) -> Option<(&Amenity, f64)> {
    amenities
        .iter()
        .map(|amenity| (amenity, geodesic_distance_km(point, amenity.location)))
        .reduce(|best, next| if next.1 < best.1 { next } else { best })
}
