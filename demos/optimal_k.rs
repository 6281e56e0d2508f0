//! Elbow-method cluster-count selection over synthetic position groups.
//!
//! Run with: cargo run --example optimal_k --features parallel

use geocluster::{cluster, optimal_k_parallel, scatter_around, sse, ClusterConfig, GeoPoint};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let mut rng = StdRng::seed_from_u64(11);

    // Three cities, each with its own tight cloud of positions
    let centers: [GeoPoint; 3] = [
        GeoPoint::new(44.49381, 11.33875), // Bologna
        GeoPoint::new(45.4408, 12.3155),   // Venice
        GeoPoint::new(45.0703, 7.6869),    // Turin
    ];

    let mut points: Vec<GeoPoint> = Vec::new();
    for center in &centers {
        points.extend(scatter_around(center, 2.0, 30, &mut rng));
    }

    let config = ClusterConfig::default().with_seed(42);

    println!("SSE per candidate k:");
    for k in 1..=6 {
        let clusters = cluster(&points, k, &config).unwrap();
        println!("  k={}: {:.1}", k, sse(&clusters));
    }

    let k = optimal_k_parallel(&points, 6, &config).unwrap();
    println!("\nElbow heuristic picks k = {k}");
}
