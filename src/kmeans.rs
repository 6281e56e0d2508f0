//! # K-Means Iteration Engine
//!
//! Hand-rolled Lloyd's iterations over geographic points, with k-means++
//! seeding and latitude-weighted centroid updates.
//!
//! ## Algorithm
//! 1. Seed k initial centroids with k-means++ (squared-distance roulette)
//! 2. Assign every point to its nearest centroid by Haversine distance
//! 3. Drop clusters that attracted no points
//! 4. Recompute each surviving centroid as the weighted mean of its members
//! 5. Stop when every centroid moved less than the tolerance, or after
//!    `max_iterations` rounds
//!
//! Exhausting the iteration cap is not a failure: the last computed
//! partition is returned as a best-effort result. The round count is
//! reported at debug level for callers that care about convergence quality.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::geo_utils::{haversine_distance, weighted_centroid};
use crate::{Cluster, ClusterConfig, GeoPoint};

// ============================================================================
// Clustering
// ============================================================================

/// Partition `points` into at most `k` clusters.
///
/// Every input point lands in exactly one output cluster, and every output
/// cluster has at least one member; clusters emptied during iteration are
/// pruned, so fewer than `k` clusters may come back. Output is sorted by
/// descending member count for presentation stability.
///
/// If `points.len() <= k` each point becomes its own singleton cluster and
/// no iteration runs.
///
/// # Errors
///
/// [`Error::InvalidParameter`] when `k == 0` or
/// `config.max_iterations == 0`.
///
/// # Example
///
/// ```rust
/// use geocluster::{cluster, ClusterConfig, GeoPoint};
///
/// let points: Vec<GeoPoint> = vec![
///     GeoPoint::new(44.4938, 11.3388),
///     GeoPoint::new(44.4939, 11.3389),
///     GeoPoint::new(45.0000, 12.0000),
///     GeoPoint::new(45.0001, 12.0001),
/// ];
///
/// let clusters = cluster(&points, 2, &ClusterConfig::default().with_seed(1)).unwrap();
/// assert_eq!(clusters.len(), 2);
/// ```
pub fn cluster<T: Clone>(
    points: &[GeoPoint<T>],
    k: usize,
    config: &ClusterConfig,
) -> Result<Vec<Cluster<T>>> {
    if k == 0 {
        return Err(Error::InvalidParameter {
            name: "k",
            message: "must be at least 1",
        });
    }
    if config.max_iterations == 0 {
        return Err(Error::InvalidParameter {
            name: "max_iterations",
            message: "must be at least 1",
        });
    }

    // Degenerate case: no more points than requested clusters
    if points.len() <= k {
        return Ok(points
            .iter()
            .map(|p| Cluster {
                centroid: GeoPoint::new(p.latitude, p.longitude),
                points: vec![p.clone()],
            })
            .collect());
    }

    let mut rng = rng_for(config.seed);
    let mut centroids = seed_centroids(points, k, &mut rng);
    let mut clusters: Vec<Cluster<T>> = Vec::new();
    let mut converged = false;
    let mut iteration = 0;

    while iteration < config.max_iterations && !converged {
        let old_centroids = centroids.clone();

        // Assignment: nearest centroid wins, ties go to the lowest index
        let mut members: Vec<Vec<GeoPoint<T>>> = vec![Vec::new(); centroids.len()];
        for point in points {
            members[nearest_centroid(point, &centroids)].push(point.clone());
        }

        // Prune clusters that attracted no points this round
        members.retain(|m| !m.is_empty());

        // Update: weighted centroid of each surviving cluster. Members are
        // non-empty by construction, so this cannot hit EmptyInput.
        centroids = members
            .iter()
            .map(|m| weighted_centroid(m))
            .collect::<Result<Vec<_>>>()?;

        // A round that changed the number of surviving centroids cannot be
        // compared pairwise against the previous round; treat it as still
        // moving and re-evaluate once the count stabilizes.
        converged = centroids.len() == old_centroids.len()
            && old_centroids
                .iter()
                .zip(centroids.iter())
                .all(|(old, new)| haversine_distance(old, new) < config.tolerance_km);

        clusters = members
            .into_iter()
            .zip(centroids.iter())
            .map(|(points, centroid)| Cluster {
                centroid: centroid.clone(),
                points,
            })
            .collect();

        iteration += 1;
    }

    // Largest cluster first
    clusters.sort_by(|a, b| b.points.len().cmp(&a.points.len()));

    debug!(
        "k-means {} after {} iterations: {} clusters from {} points (k={})",
        if converged { "converged" } else { "hit iteration cap" },
        iteration,
        clusters.len(),
        points.len(),
        k
    );

    Ok(clusters)
}

/// Assign a point to its nearest centroid; ties break toward the first
/// centroid encountered.
fn nearest_centroid<T>(point: &GeoPoint<T>, centroids: &[GeoPoint<T>]) -> usize {
    let mut nearest = 0;
    let mut min_distance = f64::INFINITY;

    for (i, centroid) in centroids.iter().enumerate() {
        let distance = haversine_distance(point, centroid);
        if distance < min_distance {
            min_distance = distance;
            nearest = i;
        }
    }

    nearest
}

// ============================================================================
// K-Means++ Seeding
// ============================================================================

/// Select `k` initial centroids with k-means++: the first uniformly at
/// random, each subsequent one sampled with probability proportional to its
/// squared distance from the nearest already-chosen centroid.
///
/// Precondition (enforced by [`cluster`]): `0 < k <= points.len()`.
fn seed_centroids<T: Clone, R: Rng>(
    points: &[GeoPoint<T>],
    k: usize,
    rng: &mut R,
) -> Vec<GeoPoint<T>> {
    debug_assert!(k >= 1 && k <= points.len());

    let n = points.len();
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..n)].clone());

    // Running minimum distance from each point to the chosen centroids;
    // only the newest centroid can lower an entry
    let mut min_distances = vec![f64::INFINITY; n];

    for _ in 1..k {
        let newest = &centroids[centroids.len() - 1];
        let mut total_squared = 0.0;
        for (j, point) in points.iter().enumerate() {
            let d = haversine_distance(point, newest);
            if d < min_distances[j] {
                min_distances[j] = d;
            }
            total_squared += min_distances[j] * min_distances[j];
        }

        // Every remaining point sits on a chosen centroid; any pick is as
        // good as any other
        if total_squared == 0.0 {
            centroids.push(points[rng.gen_range(0..n)].clone());
            continue;
        }

        // Roulette wheel over cumulative squared distance
        let mut threshold = rng.gen::<f64>() * total_squared;
        let mut chosen = n - 1;
        for (j, d) in min_distances.iter().enumerate() {
            threshold -= d * d;
            if threshold <= 0.0 {
                chosen = j;
                break;
            }
        }

        centroids.push(points[chosen].clone());
    }

    centroids
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

// ============================================================================
// Quality Measures
// ============================================================================

/// Sum of squared errors: the squared geodesic distance from every member
/// point to its cluster's centroid, summed over all clusters. Lower is
/// tighter. This is the quantity the elbow selector minimizes over k.
pub fn sse<T>(clusters: &[Cluster<T>]) -> f64 {
    clusters
        .iter()
        .map(|cluster| {
            cluster
                .points
                .iter()
                .map(|p| haversine_distance(p, &cluster.centroid).powi(2))
                .sum::<f64>()
        })
        .sum()
}

/// Summary statistics over a clustering result.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterMetrics {
    /// Points across all clusters.
    pub total_points: usize,
    /// Member count per cluster, in cluster order.
    pub cluster_sizes: Vec<usize>,
    /// Mean cluster size.
    pub average_cluster_size: f64,
    /// Mean geodesic distance from a point to its centroid, in km.
    pub average_distance_to_centroid_km: f64,
}

/// Compute summary statistics for a clustering result.
pub fn cluster_metrics<T>(clusters: &[Cluster<T>]) -> ClusterMetrics {
    let cluster_sizes: Vec<usize> = clusters.iter().map(|c| c.points.len()).collect();
    let total_points: usize = cluster_sizes.iter().sum();

    let total_distance: f64 = clusters
        .iter()
        .map(|c| {
            c.points
                .iter()
                .map(|p| haversine_distance(p, &c.centroid))
                .sum::<f64>()
        })
        .sum();

    ClusterMetrics {
        total_points,
        average_cluster_size: if clusters.is_empty() {
            0.0
        } else {
            total_points as f64 / clusters.len() as f64
        },
        average_distance_to_centroid_km: if total_points == 0 {
            0.0
        } else {
            total_distance / total_points as f64
        },
        cluster_sizes,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn two_groups() -> Vec<GeoPoint> {
        // Two tight pairs of 3 points, ~70 km apart (Bologna / lagoon area)
        vec![
            GeoPoint::new(44.4938, 11.3388),
            GeoPoint::new(44.4940, 11.3391),
            GeoPoint::new(44.4935, 11.3385),
            GeoPoint::new(45.0000, 12.0000),
            GeoPoint::new(45.0002, 12.0003),
            GeoPoint::new(44.9998, 11.9997),
        ]
    }

    fn seeded() -> ClusterConfig {
        ClusterConfig::default().with_seed(42)
    }

    #[test]
    fn test_zero_k_is_an_error() {
        let points = two_groups();
        assert!(matches!(
            cluster(&points, 0, &seeded()),
            Err(Error::InvalidParameter { name: "k", .. })
        ));
    }

    #[test]
    fn test_zero_iterations_is_an_error() {
        let points = two_groups();
        let config = seeded().with_max_iterations(0);
        assert!(matches!(
            cluster(&points, 2, &config),
            Err(Error::InvalidParameter { name: "max_iterations", .. })
        ));
    }

    #[test]
    fn test_empty_input_yields_no_clusters() {
        let points: Vec<GeoPoint> = vec![];
        let clusters = cluster(&points, 3, &seeded()).unwrap();
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_degenerate_k_yields_singletons() {
        let points = two_groups();
        let clusters = cluster(&points, points.len() + 2, &seeded()).unwrap();

        assert_eq!(clusters.len(), points.len());
        for c in &clusters {
            assert_eq!(c.points.len(), 1);
            assert_eq!(c.centroid.latitude, c.points[0].latitude);
            assert_eq!(c.centroid.longitude, c.points[0].longitude);
        }
    }

    #[test]
    fn test_partition_invariant() {
        let points = two_groups();
        for k in 1..=points.len() {
            let clusters = cluster(&points, k, &seeded()).unwrap();
            let total: usize = clusters.iter().map(|c| c.points.len()).sum();
            assert_eq!(total, points.len(), "partition broken for k={k}");
            assert!(clusters.iter().all(|c| !c.is_empty()));
        }
    }

    #[test]
    fn test_two_well_separated_groups() {
        let points = two_groups();
        let clusters = cluster(&points, 2, &seeded()).unwrap();

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].points.len(), 3);
        assert_eq!(clusters[1].points.len(), 3);

        // Each centroid lands within 1 km of its group's mean
        let group_a: GeoPoint = GeoPoint::new(44.4938, 11.3388);
        let group_b: GeoPoint = GeoPoint::new(45.0000, 12.0000);
        for c in &clusters {
            let to_a = haversine_distance(&c.centroid, &group_a);
            let to_b = haversine_distance(&c.centroid, &group_b);
            assert!(to_a.min(to_b) < 1.0, "centroid far from both groups");
        }
    }

    #[test]
    fn test_output_sorted_by_size() {
        // 4 points near Bologna, 2 near the lagoon
        let points: Vec<GeoPoint> = vec![
            GeoPoint::new(44.4938, 11.3388),
            GeoPoint::new(44.4940, 11.3391),
            GeoPoint::new(44.4935, 11.3385),
            GeoPoint::new(44.4937, 11.3390),
            GeoPoint::new(45.0000, 12.0000),
            GeoPoint::new(45.0002, 12.0003),
        ];
        let clusters = cluster(&points, 2, &seeded()).unwrap();
        assert_eq!(clusters.len(), 2);
        assert!(clusters[0].points.len() >= clusters[1].points.len());
    }

    #[test]
    fn test_iteration_cap_still_returns_partition() {
        let points = two_groups();
        let config = seeded().with_max_iterations(1);
        let clusters = cluster(&points, 2, &config).unwrap();
        let total: usize = clusters.iter().map(|c| c.points.len()).sum();
        assert_eq!(total, points.len());
    }

    #[test]
    fn test_payload_carried_through() {
        let points: Vec<GeoPoint<u32>> = two_groups()
            .into_iter()
            .enumerate()
            .map(|(i, p)| GeoPoint::new(p.latitude, p.longitude).with_payload(i as u32))
            .collect();

        let clusters = cluster(&points, 2, &seeded()).unwrap();
        let mut seen: Vec<u32> = clusters
            .iter()
            .flat_map(|c| c.points.iter().filter_map(|p| p.payload))
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
        // Centroids stay synthetic
        assert!(clusters.iter().all(|c| c.centroid.payload.is_none()));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let points = two_groups();
        let a = cluster(&points, 3, &seeded()).unwrap();
        let b = cluster(&points, 3, &seeded()).unwrap();

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.points.len(), y.points.len());
            assert_eq!(x.centroid.latitude, y.centroid.latitude);
            assert_eq!(x.centroid.longitude, y.centroid.longitude);
        }
    }

    #[test]
    fn test_identical_points_dont_break_seeding() {
        let points: Vec<GeoPoint> = vec![GeoPoint::new(44.5, 11.3); 5];
        let clusters = cluster(&points, 2, &seeded()).unwrap();
        let total: usize = clusters.iter().map(|c| c.points.len()).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn test_seed_centroids_come_from_input() {
        let points = two_groups();
        let mut rng = rng_for(Some(7));
        let seeds = seed_centroids(&points, 4, &mut rng);
        assert_eq!(seeds.len(), 4);
        for s in &seeds {
            assert!(points
                .iter()
                .any(|p| p.latitude == s.latitude && p.longitude == s.longitude));
        }
    }

    #[test]
    fn test_sse_zero_for_singletons() {
        let points = two_groups();
        let clusters = cluster(&points, points.len(), &seeded()).unwrap();
        assert_eq!(sse(&clusters), 0.0);
    }

    #[test]
    fn test_sse_decreases_with_k() {
        let points = two_groups();
        let one = cluster(&points, 1, &seeded()).unwrap();
        let two = cluster(&points, 2, &seeded()).unwrap();
        assert!(sse(&two) < sse(&one));
    }

    #[test]
    fn test_cluster_metrics() {
        let points = two_groups();
        let clusters = cluster(&points, 2, &seeded()).unwrap();
        let metrics = cluster_metrics(&clusters);

        assert_eq!(metrics.total_points, 6);
        assert_eq!(metrics.cluster_sizes, vec![3, 3]);
        assert!((metrics.average_cluster_size - 3.0).abs() < 1e-9);
        // Members sit within ~100 m of their centroids
        assert!(metrics.average_distance_to_centroid_km < 0.1);
    }

    #[test]
    fn test_cluster_metrics_empty() {
        let clusters: Vec<Cluster> = vec![];
        let metrics = cluster_metrics(&clusters);
        assert_eq!(metrics.total_points, 0);
        assert_eq!(metrics.average_cluster_size, 0.0);
        assert_eq!(metrics.average_distance_to_centroid_km, 0.0);
    }
}
