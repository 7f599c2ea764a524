//! Unit tests for cr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::default(), EdgeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{DistanceModel, GeoPoint};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(-6.9175, 107.6191);
        assert_eq!(p.vincenty_km(p), 0.0);
        assert!(p.haversine_km(p) < 1e-9);
    }

    #[test]
    fn equator_degree_of_longitude() {
        // a * π / 180 on WGS-84.
        let d = GeoPoint::new(0.0, 0.0).vincenty_km(GeoPoint::new(0.0, 1.0));
        assert!((d - 111.319).abs() < 0.01, "got {d}");
    }

    #[test]
    fn meridian_degree_at_equator() {
        let d = GeoPoint::new(0.0, 0.0).vincenty_km(GeoPoint::new(1.0, 0.0));
        assert!((d - 110.574).abs() < 0.01, "got {d}");
    }

    #[test]
    fn haversine_degree_of_latitude() {
        let d = GeoPoint::new(30.0, -88.0).haversine_km(GeoPoint::new(31.0, -88.0));
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn models_agree_within_half_percent() {
        let bandung  = GeoPoint::new(-6.9175, 107.6191);
        let surabaya = GeoPoint::new(-7.2575, 112.7521);
        let v = bandung.distance_km(surabaya, DistanceModel::Vincenty);
        let h = bandung.distance_km(surabaya, DistanceModel::Haversine);
        assert!((v - h).abs() / v < 0.005, "vincenty {v}, haversine {h}");
    }

    #[test]
    fn symmetric() {
        let a = GeoPoint::new(-6.5971, 106.8060);
        let b = GeoPoint::new(-7.8705, 112.5271);
        assert_eq!(a.vincenty_km(b), b.vincenty_km(a));
    }

    #[test]
    fn antipodal_is_finite() {
        let d = GeoPoint::new(0.0, 0.0).vincenty_km(GeoPoint::new(0.0, 180.0));
        assert!(d.is_finite());
        assert!((19_950.0..20_100.0).contains(&d), "got {d}");
    }

    #[test]
    fn try_new_rejects_bad_values() {
        assert!(GeoPoint::try_new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::try_new(0.0, f64::INFINITY).is_err());
        assert!(GeoPoint::try_new(90.5, 0.0).is_err());
        assert!(GeoPoint::try_new(0.0, -180.5).is_err());
        assert!(GeoPoint::try_new(-7.25, 112.75).is_ok());
    }

    #[test]
    fn model_from_str() {
        assert_eq!("Vincenty".parse::<DistanceModel>().unwrap(), DistanceModel::Vincenty);
        assert_eq!(" haversine ".parse::<DistanceModel>().unwrap(), DistanceModel::Haversine);
        assert!("manhattan".parse::<DistanceModel>().is_err());
    }
}

#[cfg(test)]
mod points {
    use crate::{CoreError, GeoPoint, PointSet};

    #[test]
    fn preserves_insertion_order() {
        let set = PointSet::from_points([
            ("C", GeoPoint::new(0.0, 3.0)),
            ("A", GeoPoint::new(0.0, 0.0)),
            ("B", GeoPoint::new(0.0, 1.0)),
        ])
        .unwrap();
        let names: Vec<_> = set.names().collect();
        assert_eq!(names, ["C", "A", "B"]);
        assert_eq!(set.get("A"), Some(GeoPoint::new(0.0, 0.0)));
        assert!(set.get("Z").is_none());
    }

    #[test]
    fn rejects_duplicate_name() {
        let mut set = PointSet::new();
        set.insert("Kudus", GeoPoint::new(-6.8048, 110.8407)).unwrap();
        let err = set.insert("Kudus", GeoPoint::new(0.0, 0.0)).unwrap_err();
        assert!(matches!(err, CoreError::DuplicatePoint(n) if n == "Kudus"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn rejects_invalid_coordinate() {
        let mut set = PointSet::new();
        assert!(set.insert("Nowhere", GeoPoint::new(f64::NAN, 0.0)).is_err());
        assert!(set.is_empty());
    }
}

#[cfg(test)]
mod config {
    use crate::{DEFAULT_THRESHOLD_KM, DistanceModel, GraphConfig};

    #[test]
    fn defaults() {
        let cfg = GraphConfig::default();
        assert_eq!(cfg.threshold_km, DEFAULT_THRESHOLD_KM);
        assert_eq!(cfg.model, DistanceModel::Vincenty);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_threshold() {
        for threshold_km in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = GraphConfig { threshold_km, ..GraphConfig::default() };
            assert!(cfg.validate().is_err(), "{threshold_km} accepted");
        }
    }
}
