//! # Geocluster
//!
//! Geodesic k-means clustering for GPS position sets.
//!
//! This library provides:
//! - K-means clustering over latitude/longitude points using Haversine distance
//! - K-means++ seeding and latitude-weighted centroid updates
//! - Elbow-method selection of an unsupervised cluster count
//! - Convex-hull boundaries for rendering cluster footprints
//!
//! ## Features
//!
//! - **`serde`** - Enable serde derives on the public data types
//! - **`parallel`** - Enable parallel elbow-method trials with rayon
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use geocluster::{cluster, ClusterConfig, GeoPoint};
//!
//! // Two tight groups of positions, ~70 km apart
//! let points: Vec<GeoPoint> = vec![
//!     GeoPoint::new(44.4938, 11.3388), // Bologna
//!     GeoPoint::new(44.4940, 11.3391),
//!     GeoPoint::new(44.4935, 11.3385),
//!     GeoPoint::new(45.0000, 12.0000),
//!     GeoPoint::new(45.0002, 12.0003),
//!     GeoPoint::new(44.9998, 11.9997),
//! ];
//!
//! let config = ClusterConfig::default().with_seed(42);
//! let clusters = cluster(&points, 2, &config).unwrap();
//!
//! assert_eq!(clusters.len(), 2);
//! assert_eq!(clusters.iter().map(|c| c.points.len()).sum::<usize>(), points.len());
//! ```
//!
//! ## Units
//!
//! All distances are kilometers on a spherical Earth; all coordinates are
//! WGS84 degrees, the convention used by GPS receivers and mapping services.

pub mod activity;
pub mod elbow;
pub mod error;
pub mod geo_utils;
pub mod hull;
pub mod kmeans;

pub use activity::{classify, scatter_around, simulate_movement, Displacement, MovingActivity};
pub use elbow::{optimal_k, DEFAULT_MAX_K};
#[cfg(feature = "parallel")]
pub use elbow::optimal_k_parallel;
pub use error::{Error, Result};
pub use geo_utils::{haversine_distance, unweighted_centroid, weighted_centroid};
pub use hull::convex_hull;
pub use kmeans::{cluster, cluster_metrics, sse, ClusterMetrics};

// ============================================================================
// Core Types
// ============================================================================

/// A geographic sample: a WGS84 coordinate with optional motion annotations
/// and an optional caller-owned payload.
///
/// The payload type `T` is carried through clustering verbatim and never
/// inspected; it defaults to `()` for plain coordinate work.
///
/// # Example
/// ```
/// use geocluster::GeoPoint;
/// let point: GeoPoint = GeoPoint::new(44.4938, 11.3388); // Bologna
/// let tagged = GeoPoint::new(44.4938, 11.3388).with_payload("device-7");
/// assert_eq!(tagged.payload, Some("device-7"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint<T = ()> {
    pub latitude: f64,
    pub longitude: f64,
    /// Instantaneous speed in km/h, if known.
    pub speed: Option<f64>,
    /// Discrete motion state, if known.
    pub activity: Option<MovingActivity>,
    /// Opaque caller data, preserved through clustering.
    pub payload: Option<T>,
}

impl<T> GeoPoint<T> {
    /// Create a new point with no speed, activity, or payload.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            speed: None,
            activity: None,
            payload: None,
        }
    }

    /// Attach an instantaneous speed (km/h).
    pub fn with_speed(mut self, speed_kmh: f64) -> Self {
        self.speed = Some(speed_kmh);
        self
    }

    /// Attach a motion state.
    pub fn with_activity(mut self, activity: MovingActivity) -> Self {
        self.activity = Some(activity);
        self
    }

    /// Attach caller-owned payload data.
    pub fn with_payload(mut self, payload: T) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Safety buffer applied to a cluster's display radius so rendered circles
/// comfortably cover their outermost member.
const DISPLAY_RADIUS_BUFFER: f64 = 1.10;

/// A group of points with their representative centroid.
///
/// The centroid is synthetic (coordinates only, no speed/activity/payload).
/// Member order is assignment order and carries no meaning.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cluster<T = ()> {
    pub centroid: GeoPoint<T>,
    pub points: Vec<GeoPoint<T>>,
}

impl<T> Cluster<T> {
    /// Number of member points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cluster has no members. Clusters produced by
    /// [`cluster`] always have at least one point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Display radius in kilometers: the maximum geodesic distance from the
    /// centroid to any member, scaled by a 10% rendering buffer.
    pub fn radius_km(&self) -> f64 {
        self.points
            .iter()
            .map(|p| geo_utils::haversine_distance(p, &self.centroid))
            .fold(0.0, f64::max)
            * DISPLAY_RADIUS_BUFFER
    }
}

/// Configuration for the k-means iteration engine.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterConfig {
    /// Maximum assignment/update rounds before the current partition is
    /// returned as-is. Default: 300
    pub max_iterations: usize,

    /// Convergence tolerance in kilometers: iteration stops once every
    /// centroid moves less than this between rounds. Default: 0.0001 (10 cm)
    pub tolerance_km: f64,

    /// Seed for the k-means++ random source. `None` draws from system
    /// entropy; supply a value for reproducible runs. Default: `None`
    pub seed: Option<u64>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            tolerance_km: 0.0001,
            seed: None,
        }
    }
}

impl ClusterConfig {
    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance in kilometers.
    pub fn with_tolerance_km(mut self, tolerance_km: f64) -> Self {
        self.tolerance_km = tolerance_km;
        self
    }

    /// Set the random seed for reproducible seeding.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
