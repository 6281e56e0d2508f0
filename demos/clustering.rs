//! Basic example of clustering synthetic device positions.
//!
//! Run with: cargo run --example clustering

use geocluster::{cluster, cluster_metrics, convex_hull, scatter_around, ClusterConfig, GeoPoint};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let mut rng = StdRng::seed_from_u64(7);

    // Two synthetic neighborhoods: Bologna and the Venetian lagoon
    let mut points: Vec<GeoPoint> =
        scatter_around(&GeoPoint::new(44.49381, 11.33875), 3.0, 40, &mut rng);
    points.extend(scatter_around(
        &GeoPoint::new(45.0000, 12.0000),
        3.0,
        20,
        &mut rng,
    ));

    let config = ClusterConfig::default().with_seed(42);
    let clusters = cluster(&points, 2, &config).unwrap();

    println!(
        "Clustered {} positions into {} groups\n",
        points.len(),
        clusters.len()
    );

    for (i, c) in clusters.iter().enumerate() {
        println!("Cluster {}: {} points", i + 1, c.points.len());
        println!(
            "  centroid: ({:.5}, {:.5})",
            c.centroid.latitude, c.centroid.longitude
        );
        println!("  display radius: {:.2} km", c.radius_km());

        let ring = convex_hull(&c.points);
        println!("  hull vertices: {}", ring.len().saturating_sub(1));
    }

    let metrics = cluster_metrics(&clusters);
    println!("\nAverage cluster size: {:.1}", metrics.average_cluster_size);
    println!(
        "Average distance to centroid: {:.2} km",
        metrics.average_distance_to_centroid_km
    );
}
