//! # Convex Hull
//!
//! Graham-scan convex hull over a cluster's member points, used to draw the
//! geographic footprint of a cluster on a map.
//!
//! The scan works directly in degree space: pick the lowest-latitude point
//! as the pivot, sort the rest by polar angle around it, and sweep, popping
//! any vertex that fails the left-turn test. Accuracy is whatever
//! double-precision degree arithmetic gives, which is fine for display and
//! nothing more.

use crate::GeoPoint;

/// Compute the convex boundary of a point cloud as a closed ring (the
/// pivot vertex is repeated at the end).
///
/// Inputs with fewer than three points come back unchanged, since there is
/// no hull to build. Collinear inputs degenerate to a two-vertex ring.
///
/// # Example
///
/// ```rust
/// use geocluster::{convex_hull, GeoPoint};
///
/// let points: Vec<GeoPoint> = vec![
///     GeoPoint::new(0.0, 0.0),
///     GeoPoint::new(0.0, 2.0),
///     GeoPoint::new(2.0, 2.0),
///     GeoPoint::new(2.0, 0.0),
///     GeoPoint::new(1.0, 1.0), // interior
/// ];
///
/// let ring = convex_hull(&points);
/// assert_eq!(ring.len(), 5); // 4 corners + closing vertex
/// assert_eq!(ring.first().unwrap().latitude, ring.last().unwrap().latitude);
/// ```
pub fn convex_hull<T: Clone>(points: &[GeoPoint<T>]) -> Vec<GeoPoint<T>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    // Pivot: lowest latitude, ties broken by lowest longitude
    let pivot_idx = lowest_point(points);
    let pivot = points[pivot_idx].clone();

    let mut rest: Vec<GeoPoint<T>> = points
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != pivot_idx)
        .map(|(_, p)| p.clone())
        .collect();

    // Counterclockwise sweep order: polar angle around the pivot. Every
    // remaining point has latitude >= the pivot's, so angles fall in [0, π].
    // Equal angles sort nearer-first so the sweep pops the interior
    // collinear points instead of stranding the far one.
    rest.sort_by(|a, b| {
        polar_angle(&pivot, a)
            .total_cmp(&polar_angle(&pivot, b))
            .then_with(|| {
                sq_degree_distance(&pivot, a).total_cmp(&sq_degree_distance(&pivot, b))
            })
    });

    let mut ring: Vec<GeoPoint<T>> = vec![pivot.clone()];
    for point in rest {
        while ring.len() >= 2
            && cross(&ring[ring.len() - 2], &ring[ring.len() - 1], &point) <= 0.0
        {
            ring.pop();
        }
        ring.push(point);
    }

    // Close the ring
    ring.push(pivot);
    ring
}

fn lowest_point<T>(points: &[GeoPoint<T>]) -> usize {
    let mut lowest = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        let best = &points[lowest];
        if p.latitude < best.latitude
            || (p.latitude == best.latitude && p.longitude < best.longitude)
        {
            lowest = i;
        }
    }
    lowest
}

#[inline]
fn polar_angle<T>(pivot: &GeoPoint<T>, p: &GeoPoint<T>) -> f64 {
    (p.latitude - pivot.latitude).atan2(p.longitude - pivot.longitude)
}

#[inline]
fn sq_degree_distance<T>(a: &GeoPoint<T>, b: &GeoPoint<T>) -> f64 {
    let dlat = a.latitude - b.latitude;
    let dlon = a.longitude - b.longitude;
    dlat * dlat + dlon * dlon
}

/// Cross product of O→A and O→B in degree space; positive means A→B turns
/// left around O.
#[inline]
fn cross<T>(o: &GeoPoint<T>, a: &GeoPoint<T>, b: &GeoPoint<T>) -> f64 {
    (a.longitude - o.longitude) * (b.latitude - o.latitude)
        - (a.latitude - o.latitude) * (b.longitude - o.longitude)
}
