//! Property-based tests for the distance estimator

use domain::{Coordinate, haversine_km};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-90.0f64..=90.0, -180.0f64..=180.0)
        .prop_map(|(lat, lon)| Coordinate::new(lat, lon).expect("in range"))
}

proptest! {
    #[test]
    fn distance_to_self_is_zero(a in coordinate()) {
        prop_assert!(haversine_km(&a, &a).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric(a in coordinate(), b in coordinate()) {
        let ab = haversine_km(&a, &b);
        let ba = haversine_km(&b, &a);
        prop_assert!((ab - ba).abs() <= 1e-9_f64.max(ab * 1e-9));
    }

    #[test]
    fn distance_bounded_by_half_circumference(a in coordinate(), b in coordinate()) {
        let d = haversine_km(&a, &b);
        prop_assert!(d >= 0.0);
        prop_assert!(d <= std::f64::consts::PI * domain::EARTH_RADIUS_KM + 1e-6);
    }

    #[test]
    fn out_of_range_latitude_rejected(lat in 90.0001f64..1000.0, lon in -180.0f64..=180.0) {
        prop_assert!(Coordinate::new(lat, lon).is_err());
    }
}
