//! # Geographic Utilities
//!
//! Core geographic computation primitives used throughout the clustering
//! engine.
//!
//! ## Overview
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two points, in km |
//! | [`unweighted_centroid`] | Arithmetic mean of a point set's coordinates |
//! | [`weighted_centroid`] | Latitude-weighted mean, correcting meridian convergence |
//!
//! ## Algorithm Notes
//!
//! ### Haversine Formula
//!
//! The haversine formula calculates the great-circle distance between two
//! points on a sphere. It's the standard method for GPS distance
//! calculation, accurate to within 0.3% for most practical applications.
//!
//! Reference: [Haversine formula (Wikipedia)](https://en.wikipedia.org/wiki/Haversine_formula)
//!
//! ### Longitude Weighting
//!
//! Meridians converge toward the poles, so averaging raw longitudes of a
//! non-equatorial point set drags the centroid east or west of where it
//! belongs. [`weighted_centroid`] weights each longitude by the cosine of
//! its latitude to counteract this. The correction degenerates for point
//! sets at the poles, where longitude itself becomes meaningless.
//!
//! ### Coordinate System
//!
//! All functions expect WGS84 coordinates (latitude/longitude in degrees).

use geo::{Distance, Haversine, Point};

use crate::error::{Error, Result};
use crate::GeoPoint;

// =============================================================================
// Distance
// =============================================================================

/// Calculate the great-circle distance between two points using the
/// Haversine formula.
///
/// Returns the distance in kilometers along the Earth's surface (assuming a
/// spherical Earth of radius 6,371 km). Identical points yield exactly 0.
///
/// # Example
///
/// ```rust
/// use geocluster::{geo_utils, GeoPoint};
///
/// let bologna: GeoPoint = GeoPoint::new(44.4938, 11.3388);
/// let venice: GeoPoint = GeoPoint::new(45.4408, 12.3155);
///
/// let distance = geo_utils::haversine_distance(&bologna, &venice);
/// assert!((distance - 130.0).abs() < 5.0); // ~130 km
/// ```
#[inline]
pub fn haversine_distance<T>(a: &GeoPoint<T>, b: &GeoPoint<T>) -> f64 {
    let p1 = Point::new(a.longitude, a.latitude);
    let p2 = Point::new(b.longitude, b.latitude);
    Haversine::distance(p1, p2) / 1000.0
}

// =============================================================================
// Centroids
// =============================================================================

/// Compute the arithmetic centroid of a point set.
///
/// Latitude and longitude are each averaged independently. Suitable for
/// small geographic areas; for sets spanning significant latitude, prefer
/// [`weighted_centroid`].
///
/// Returns [`Error::EmptyInput`] for an empty slice: asking for the
/// centroid of nothing is a caller bug, not a runtime condition.
///
/// The returned point is synthetic: coordinates only, no speed, activity,
/// or payload.
pub fn unweighted_centroid<T>(points: &[GeoPoint<T>]) -> Result<GeoPoint<T>> {
    if points.is_empty() {
        return Err(Error::EmptyInput);
    }

    let n = points.len() as f64;
    let sum_lat: f64 = points.iter().map(|p| p.latitude).sum();
    let sum_lon: f64 = points.iter().map(|p| p.longitude).sum();

    Ok(GeoPoint::new(sum_lat / n, sum_lon / n))
}

/// Compute the latitude-weighted centroid of a point set.
///
/// Latitude is the arithmetic mean; longitude is weighted by the cosine of
/// each point's latitude:
///
/// ```text
/// longitude = Σ(lon_i · cos(lat_i)) / Σ(cos(lat_i))
/// ```
///
/// This is the centroid formula the iteration engine uses when recomputing
/// cluster centers.
///
/// Returns [`Error::EmptyInput`] for an empty slice.
///
/// # Example
///
/// ```rust
/// use geocluster::{geo_utils, GeoPoint};
///
/// let points: Vec<GeoPoint> = vec![
///     GeoPoint::new(44.49, 11.33),
///     GeoPoint::new(44.51, 11.35),
/// ];
///
/// let centroid = geo_utils::weighted_centroid(&points).unwrap();
/// assert!((centroid.latitude - 44.50).abs() < 1e-9);
/// assert!((centroid.longitude - 11.34).abs() < 1e-4);
/// ```
pub fn weighted_centroid<T>(points: &[GeoPoint<T>]) -> Result<GeoPoint<T>> {
    if points.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut sum_lat = 0.0;
    let mut weighted_lon = 0.0;
    let mut cos_lat_sum = 0.0;

    for p in points {
        let w = p.latitude.to_radians().cos();
        sum_lat += p.latitude;
        weighted_lon += p.longitude * w;
        cos_lat_sum += w;
    }

    Ok(GeoPoint::new(
        sum_lat / points.len() as f64,
        weighted_lon / cos_lat_sum,
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================
