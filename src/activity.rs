//! # Activity Classification & Synthetic Movement
//!
//! Maps scalar speeds to discrete motion states, and generates randomized
//! per-tick displacements and point clouds for simulating device movement.
//! None of this feeds the clustering math; it exists to annotate and
//! fabricate position data.

use rand::Rng;

use crate::GeoPoint;

/// Rough meters per degree of latitude, used when converting scatter radii.
const METERS_PER_DEGREE: f64 = 111_300.0;

/// Discrete motion state of a tracked device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum MovingActivity {
    Still,
    Walking,
    Running,
    InVehicle,
}

/// Classify an instantaneous speed (km/h) into a motion state.
///
/// Thresholds: exactly 0 is `Still`; below 1.5 is `Walking`; below 8 is
/// `Running`; everything else is `InVehicle`. The function is total: every
/// speed maps to some state.
///
/// # Example
/// ```
/// use geocluster::{classify, MovingActivity};
/// assert_eq!(classify(0.0), MovingActivity::Still);
/// assert_eq!(classify(5.0), MovingActivity::Running);
/// assert_eq!(classify(42.0), MovingActivity::InVehicle);
/// ```
pub fn classify(speed_kmh: f64) -> MovingActivity {
    if speed_kmh == 0.0 {
        MovingActivity::Still
    } else if speed_kmh < 1.5 {
        MovingActivity::Walking
    } else if speed_kmh < 8.0 {
        MovingActivity::Running
    } else {
        MovingActivity::InVehicle
    }
}

/// A per-tick positional offset in degrees: `dx` is longitude, `dy` is
/// latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
}

/// Generate a randomized displacement for one simulation tick, scaled by
/// the activity's base step.
///
/// Base steps per tick: `Still` 0, `Walking` 0.0001° (~11 m), `Running`
/// 0.001° (~110 m), `InVehicle` 0.005° (~550 m). Each axis is scaled by an
/// independent uniform factor in [-1, 1].
pub fn simulate_movement<R: Rng>(activity: MovingActivity, rng: &mut R) -> Displacement {
    let base = match activity {
        MovingActivity::Still => 0.0,
        MovingActivity::Walking => 0.0001,
        MovingActivity::Running => 0.001,
        MovingActivity::InVehicle => 0.005,
    };

    Displacement {
        dx: base * centered_unit(rng),
        dy: base * centered_unit(rng),
    }
}

/// Uniform draw from [-1, 1].
fn centered_unit<R: Rng>(rng: &mut R) -> f64 {
    (rng.gen::<f64>() - 0.5) * 2.0
}

/// Scatter `count` synthetic points uniformly over a disc around `center`.
///
/// The square root on the radial draw keeps the density uniform over the
/// disc rather than bunching points at the center. Generated points carry
/// no speed, activity, or payload.
pub fn scatter_around<T, R: Rng>(
    center: &GeoPoint<T>,
    radius_km: f64,
    count: usize,
    rng: &mut R,
) -> Vec<GeoPoint<T>> {
    let radius_deg = radius_km * 1000.0 / METERS_PER_DEGREE;

    (0..count)
        .map(|_| {
            let angle = rng.gen::<f64>() * std::f64::consts::TAU;
            let r = rng.gen::<f64>().sqrt() * radius_deg;
            GeoPoint::new(
                center.latitude + r * angle.cos(),
                center.longitude + r * angle.sin(),
            )
        })
        .collect()
}
