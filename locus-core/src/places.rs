//! Places directory lookups.

use std::sync::Arc;

use geo::Coord;
use log::warn;

use crate::{Amenity, TransportError};

/// Search a places directory for amenities near a point.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use locus_core::{Amenity, PlacesDirectory, TransportError};
///
/// struct Empty;
///
/// impl PlacesDirectory for Empty {
///     fn nearby(
///         &self,
///         _center: Coord<f64>,
///         _radius_m: u32,
///         _keyword: &str,
///     ) -> Result<Vec<Amenity>, TransportError> {
///         Ok(Vec::new())
///     }
/// }
///
/// let found = Empty.nearby(Coord { x: 0.0, y: 0.0 }, 1000, "cafe")?;
/// assert!(found.is_empty());
/// # Ok::<(), TransportError>(())
/// ```
pub trait PlacesDirectory: Send + Sync {
    /// Return amenities matching `keyword` within `radius_m` metres of
    /// `center`, in the directory's ranking order.
    fn nearby(
        &self,
        center: Coord<f64>,
        radius_m: u32,
        keyword: &str,
    ) -> Result<Vec<Amenity>, TransportError>;
}

impl<T: PlacesDirectory + ?Sized> PlacesDirectory for Arc<T> {
    fn nearby(
        &self,
        center: Coord<f64>,
        radius_m: u32,
        keyword: &str,
    ) -> Result<Vec<Amenity>, TransportError> {
        (**self).nearby(center, radius_m, keyword)
    }
}

impl<T: PlacesDirectory + ?Sized> PlacesDirectory for Box<T> {
    fn nearby(
        &self,
        center: Coord<f64>,
        radius_m: u32,
        keyword: &str,
    ) -> Result<Vec<Amenity>, TransportError> {
        (**self).nearby(center, radius_m, keyword)
    }
}

/// Look up nearby amenities, logging failures and returning an empty list.
pub fn nearby_or_empty<P>(places: &P, center: Coord<f64>, radius_m: u32, keyword: &str) -> Vec<Amenity>
where
    P: PlacesDirectory + ?Sized,
{
    places
        .nearby(center, radius_m, keyword)
        .unwrap_or_else(|err| {
            warn!("Places lookup for {keyword:?} failed: {err}");
            Vec::new()
        })
}
