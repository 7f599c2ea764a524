//! Unit tests for cr-dataset.

#[cfg(test)]
mod embedded {
    use crate::Dataset;

    #[test]
    fn loads_three_provinces() {
        let ds = Dataset::embedded().unwrap();
        let regions: Vec<_> = ds.region_names().collect();
        assert_eq!(regions, ["Jawa Barat", "Jawa Tengah", "Jawa Timur"]);
        assert_eq!(ds.city_count(), 83);

        let per_region: Vec<_> = ds.regions().iter().map(|r| r.cities().len()).collect();
        assert_eq!(per_region, [21, 31, 31]);
    }

    #[test]
    fn default_endpoints_are_first_and_last_sorted() {
        let ds = Dataset::embedded().unwrap();
        assert_eq!(ds.default_endpoints("Jawa Barat").unwrap(), ("Bandung", "Tasikmalaya"));
        assert_eq!(ds.default_endpoints("Jawa Tengah").unwrap(), ("Banjarnegara", "Wonosobo"));
        assert_eq!(ds.default_endpoints("Jawa Timur").unwrap(), ("Bangkalan", "Tulungagung"));
    }

    #[test]
    fn lookups() {
        let ds = Dataset::embedded().unwrap();
        assert_eq!(ds.region_of("Surakarta"), Some("Jawa Tengah"));
        assert_eq!(ds.region_of("Jakarta"), None);
        let sby = ds.city("Surabaya").unwrap();
        assert_eq!((sby.lat, sby.lon), (-7.2575, 112.7521));
    }

    #[test]
    fn points_merge_all_regions_in_file_order() {
        let ds = Dataset::embedded().unwrap();
        let pts = ds.points().unwrap();
        assert_eq!(pts.len(), 83);
        assert_eq!(pts.names().next(), Some("Bandung"));
        assert_eq!(pts.names().last(), Some("Surabaya"));
    }
}

#[cfg(test)]
mod validation {
    use std::io::Write;

    use crate::{Dataset, DatasetError};

    #[test]
    fn trims_whitespace() {
        let csv = "region,city,lat,lon\n Jawa Timur , Batu , -7.8705 , 112.5271 \n";
        let ds = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(ds.sorted_city_names("Jawa Timur").unwrap(), ["Batu"]);
    }

    #[test]
    fn duplicate_city_across_regions() {
        let csv = "\
region,city,lat,lon
North,Alpha,0.0,0.0
South,Beta,0.0,1.0
South,Alpha,0.0,2.0
";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            DatasetError::DuplicateCity { city, first_region, second_region } => {
                assert_eq!(city, "Alpha");
                assert_eq!(first_region, "North");
                assert_eq!(second_region, "South");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_coordinate_reports_line() {
        let csv = "region,city,lat,lon\nR,Ok,0.0,0.0\nR,Bad,95.0,0.0\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidCoordinate { line: 3, ref city, .. } if city == "Bad"));
    }

    #[test]
    fn empty_names_rejected() {
        let csv = "region,city,lat,lon\nR,,0.0,0.0\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::EmptyName { line: 2, field: "city" }));

        let csv = "region,city,lat,lon\n,X,0.0,0.0\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::EmptyName { field: "region", .. }));
    }

    #[test]
    fn malformed_number_is_parse_error() {
        let csv = "region,city,lat,lon\nR,X,north,0.0\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[test]
    fn header_only_is_empty_dataset() {
        let ds = Dataset::from_reader("region,city,lat,lon\n".as_bytes()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.region_count(), 0);
        assert!(ds.points().unwrap().is_empty());
    }

    #[test]
    fn unknown_region() {
        let ds = Dataset::embedded().unwrap();
        assert!(matches!(
            ds.sorted_city_names("Bali"),
            Err(DatasetError::UnknownRegion(r)) if r == "Bali"
        ));
    }

    #[test]
    fn loads_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "region,city,lat,lon").unwrap();
        writeln!(file, "Test,A,0.0,0.0").unwrap();
        writeln!(file, "Test,B,0.0,1.0").unwrap();
        file.flush().unwrap();

        let ds = Dataset::from_path(file.path()).unwrap();
        assert_eq!(ds.city_count(), 2);
        assert_eq!(ds.default_endpoints("Test").unwrap(), ("A", "B"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Dataset::from_path(std::path::Path::new("/nonexistent/cities.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
