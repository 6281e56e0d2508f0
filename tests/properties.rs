use geocluster::{cluster, convex_hull, ClusterConfig, GeoPoint};
use proptest::prelude::*;

fn cross(o: &GeoPoint<usize>, a: &GeoPoint<usize>, b: &GeoPoint<usize>) -> f64 {
    (a.longitude - o.longitude) * (b.latitude - o.latitude)
        - (a.latitude - o.latitude) * (b.longitude - o.longitude)
}

proptest! {
    #[test]
    fn prop_cluster_partitions_input(
        coords in prop::collection::vec((40.0f64..50.0, 10.0f64..20.0), 1..30),
        k in 1usize..6,
        seed in 0u64..1000,
    ) {
        let points: Vec<GeoPoint<usize>> = coords
            .iter()
            .enumerate()
            .map(|(i, &(lat, lon))| GeoPoint::new(lat, lon).with_payload(i))
            .collect();

        let config = ClusterConfig::default().with_seed(seed);
        let clusters = cluster(&points, k, &config).unwrap();

        // Every input point lands in exactly one cluster
        let mut seen: Vec<usize> = clusters
            .iter()
            .flat_map(|c| c.points.iter().filter_map(|p| p.payload))
            .collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..points.len()).collect::<Vec<_>>());

        // No empty clusters survive, and never more than k of them
        prop_assert!(clusters.iter().all(|c| !c.is_empty()));
        prop_assert!(clusters.len() <= k);
    }

    #[test]
    fn prop_degenerate_k_yields_singletons(
        coords in prop::collection::vec((40.0f64..50.0, 10.0f64..20.0), 1..10),
        extra in 0usize..5,
        seed in 0u64..1000,
    ) {
        let points: Vec<GeoPoint<usize>> = coords
            .iter()
            .enumerate()
            .map(|(i, &(lat, lon))| GeoPoint::new(lat, lon).with_payload(i))
            .collect();

        let config = ClusterConfig::default().with_seed(seed);
        let clusters = cluster(&points, points.len() + extra, &config).unwrap();

        prop_assert_eq!(clusters.len(), points.len());
        for c in &clusters {
            prop_assert_eq!(c.points.len(), 1);
            prop_assert_eq!(c.centroid.latitude, c.points[0].latitude);
            prop_assert_eq!(c.centroid.longitude, c.points[0].longitude);
        }
    }

    #[test]
    fn prop_hull_contains_every_point(
        coords in prop::collection::vec((40.0f64..50.0, 10.0f64..20.0), 3..40),
    ) {
        let points: Vec<GeoPoint<usize>> = coords
            .iter()
            .map(|&(lat, lon)| GeoPoint::new(lat, lon))
            .collect();

        let ring = convex_hull(&points);

        // The ring is closed
        let first = ring.first().unwrap();
        let last = ring.last().unwrap();
        prop_assert_eq!(first.latitude, last.latitude);
        prop_assert_eq!(first.longitude, last.longitude);

        // No input point falls strictly right of any counterclockwise edge
        for p in &points {
            for edge in ring.windows(2) {
                prop_assert!(
                    cross(&edge[0], &edge[1], p) >= -1e-9,
                    "point escaped the hull"
                );
            }
        }
    }
}
