//! # Elbow-Method Cluster-Count Selection
//!
//! Picks an unsupervised cluster count by running the full iteration engine
//! for each candidate k and scanning the resulting SSE curve for its point
//! of maximum discrete curvature (the "elbow").
//!
//! This costs one complete clustering run per candidate k, so it is by far
//! the most expensive operation in the crate. Interactive callers should
//! cap `max_k` or cache the result per point-set version; with the
//! `parallel` feature, [`optimal_k_parallel`] fans the independent k trials
//! across a rayon pool.

use log::{debug, info};

use crate::error::{Error, Result};
use crate::kmeans::{cluster, sse};
use crate::{ClusterConfig, GeoPoint};

/// Conventional `max_k` for callers without a better bound of their own.
pub const DEFAULT_MAX_K: usize = 10;

/// Pick a cluster count for `points` by the elbow heuristic.
///
/// Runs [`cluster`] for every `k` in `1..=min(max_k, points.len())`,
/// records the SSE of each partition, and returns the k at the maximum
/// curvature of the SSE curve, approximated as the angle between successive
/// secant slopes. When no angle exceeds zero the scan falls back to 1.
///
/// Point sets of two or fewer points trivially get one cluster per point:
/// the heuristic is meaningless there.
///
/// The heuristic is approximate by nature: on noiseless data the curve can
/// be convex everywhere and the fallback applies. Treat the result as a
/// starting suggestion, not ground truth.
///
/// # Errors
///
/// [`Error::InvalidParameter`] when `max_k == 0`; anything [`cluster`]
/// itself rejects.
pub fn optimal_k<T: Clone>(
    points: &[GeoPoint<T>],
    max_k: usize,
    config: &ClusterConfig,
) -> Result<usize> {
    let upper = check_trial_range(points, max_k)?;
    if points.len() <= 2 {
        return Ok(points.len());
    }

    let mut sse_curve = Vec::with_capacity(upper);
    for k in 1..=upper {
        let clusters = cluster(points, k, config)?;
        sse_curve.push(sse(&clusters));
    }

    let chosen = elbow_of(&sse_curve);
    info!(
        "elbow selection: k={} out of {} trials over {} points",
        chosen,
        upper,
        points.len()
    );
    Ok(chosen)
}

/// Parallel variant of [`optimal_k`]: the k trials are independent, so they
/// fan out across rayon. Results are identical to the sequential version
/// for the same seed.
#[cfg(feature = "parallel")]
pub fn optimal_k_parallel<T: Clone + Sync>(
    points: &[GeoPoint<T>],
    max_k: usize,
    config: &ClusterConfig,
) -> Result<usize> {
    use rayon::prelude::*;

    let upper = check_trial_range(points, max_k)?;
    if points.len() <= 2 {
        return Ok(points.len());
    }

    let sse_curve: Vec<f64> = (1..=upper)
        .into_par_iter()
        .map(|k| cluster(points, k, config).map(|clusters| sse(&clusters)))
        .collect::<Result<Vec<_>>>()?;

    let chosen = elbow_of(&sse_curve);
    info!(
        "elbow selection (parallel): k={} out of {} trials over {} points",
        chosen,
        upper,
        points.len()
    );
    Ok(chosen)
}

fn check_trial_range<T>(points: &[GeoPoint<T>], max_k: usize) -> Result<usize> {
    if max_k == 0 {
        return Err(Error::InvalidParameter {
            name: "max_k",
            message: "must be at least 1",
        });
    }
    Ok(max_k.min(points.len()))
}

/// Index of maximum discrete curvature in an SSE-vs-k curve, as a k value
/// (`sse_curve[0]` corresponds to k = 1). Interior points only; falls back
/// to 1 when no curvature is positive.
fn elbow_of(sse_curve: &[f64]) -> usize {
    let mut optimal = 1;
    let mut max_curvature = 0.0;

    for i in 1..sse_curve.len().saturating_sub(1) {
        let angle = (sse_curve[i] - sse_curve[i + 1]).atan2(1.0)
            - (sse_curve[i - 1] - sse_curve[i]).atan2(1.0);

        if angle > max_curvature {
            max_curvature = angle;
            optimal = i + 1;
        }
    }

    debug!("elbow scan over {:?}: k={}", sse_curve, optimal);
    optimal
}
