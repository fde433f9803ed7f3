use crate::errors::MapError;
use crate::types::AttractionRecord;
use csv::{ReaderBuilder, StringRecord};
use geo::Point;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

pub const COL_NAME: &str = "Tourist Spot";
pub const COL_LOCATION: &str = "Location";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_DESCRIPTION: &str = "Description";
pub const COL_CATEGORY: &str = "Attraction Type";

/// Column positions resolved from the header row.
struct ColumnIndices {
    name: usize,
    location: usize,
    latitude: usize,
    longitude: usize,
    description: usize,
    category: usize,
}

impl ColumnIndices {
    fn from_headers(headers: &StringRecord) -> Result<Self, MapError> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| MapError::format(Some(1), format!("Column '{}' not found in CSV", column)))
        };
        Ok(ColumnIndices {
            name: find(COL_NAME)?,
            location: find(COL_LOCATION)?,
            latitude: find(COL_LATITUDE)?,
            longitude: find(COL_LONGITUDE)?,
            description: find(COL_DESCRIPTION)?,
            category: find(COL_CATEGORY)?,
        })
    }
}

pub fn load_records(path: &Path) -> Result<Vec<AttractionRecord>, MapError> {
    info!("Loading attractions from {:?}", path);
    let file = File::open(path).map_err(|source| MapError::DataSource {
        path: path.to_path_buf(),
        source,
    })?;
    load_records_from_reader(file, path)
}

/// Parse every row of `reader`. `source` only names the input in errors.
pub fn load_records_from_reader<R: Read>(reader: R, source: &Path) -> Result<Vec<AttractionRecord>, MapError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| MapError::from_csv(source.to_path_buf(), e))?
        .clone();
    let columns = ColumnIndices::from_headers(&headers)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(|e| MapError::from_csv(source.to_path_buf(), e))?;
        let line = row.position().map(|p| p.line());
        let record = parse_row(&row, &columns, line)?;

        if !in_range(&record) {
            warn!(
                "{} has out-of-range coordinates ({}, {})",
                record.name,
                record.latitude(),
                record.longitude()
            );
        }
        records.push(record);
    }

    debug!("Loaded {} attraction rows", records.len());
    Ok(records)
}

fn parse_row(row: &StringRecord, columns: &ColumnIndices, line: Option<u64>) -> Result<AttractionRecord, MapError> {
    let text = |idx: usize| row.get(idx).unwrap_or("").to_string();
    let latitude = parse_coordinate(row, columns.latitude, COL_LATITUDE, line)?;
    let longitude = parse_coordinate(row, columns.longitude, COL_LONGITUDE, line)?;

    Ok(AttractionRecord {
        name: text(columns.name),
        location: text(columns.location),
        coordinates: Point::new(longitude, latitude),
        description: text(columns.description),
        category: text(columns.category),
    })
}

fn parse_coordinate(row: &StringRecord, idx: usize, column: &str, line: Option<u64>) -> Result<f64, MapError> {
    let raw = row
        .get(idx)
        .ok_or_else(|| MapError::format(line, format!("{} is missing", column)))?;
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| MapError::format(line, format!("{} '{}' is not a number: {}", column, raw, e)))?;
    if !value.is_finite() {
        return Err(MapError::format(line, format!("{} '{}' is not a finite number", column, raw)));
    }
    Ok(value)
}

fn in_range(record: &AttractionRecord) -> bool {
    (-90.0..=90.0).contains(&record.latitude()) && (-180.0..=180.0).contains(&record.longitude())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Tourist Spot,Location,Latitude,Longitude,Description,Attraction Type\n";

    fn load(csv: &str) -> Result<Vec<AttractionRecord>, MapError> {
        load_records_from_reader(csv.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn test_load_rows_in_file_order() {
        let csv = format!(
            "{}A,X,1.0,2.0,d1,Historical Site\nB,\"Y, Z\",3.5,-4.25,\"d2, long\",Unknown Type\n",
            HEADER
        );
        let records = load(&csv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "A");
        assert_eq!(records[0].latitude(), 1.0);
        assert_eq!(records[0].longitude(), 2.0);
        assert_eq!(records[0].category, "Historical Site");
        assert_eq!(records[1].location, "Y, Z");
        assert_eq!(records[1].description, "d2, long");
        assert_eq!(records[1].longitude(), -4.25);
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(load(HEADER).unwrap().is_empty());
    }

    #[test]
    fn test_columns_in_any_order() {
        let csv = "Attraction Type,Latitude,Longitude,Tourist Spot,Location,Description\nNatural Wonder, 5.0 ,100.0,Cave,Perak,Limestone\n";
        let records = load(csv).unwrap();
        assert_eq!(records[0].name, "Cave");
        assert_eq!(records[0].category, "Natural Wonder");
        assert_eq!(records[0].latitude(), 5.0);
    }

    #[test]
    fn test_missing_column_is_format_error() {
        let csv = "Tourist Spot,Location,Latitude,Description,Attraction Type\nA,X,1.0,d,Others\n";
        match load(csv) {
            Err(MapError::DataFormat { message, .. }) => assert!(message.contains("Longitude")),
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_latitude_fails_whole_load() {
        let csv = format!("{}A,X,1.0,2.0,d1,Historical Site\nB,Y,north,4.0,d2,Others\n", HEADER);
        match load(&csv) {
            Err(MapError::DataFormat { line, message }) => {
                assert_eq!(line, Some(3));
                assert!(message.contains("Latitude"));
            }
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_coordinates_are_format_errors() {
        for (lat, lon) in [("nan", "2.0"), ("1.0", "inf"), ("-infinity", "2.0"), ("NaN", "NaN")] {
            let csv = format!("{}A,X,{},{},d,Historical Site\n", HEADER, lat, lon);
            match load(&csv) {
                Err(MapError::DataFormat { line, message }) => {
                    assert_eq!(line, Some(2));
                    assert!(message.contains("not a finite number"), "{}", message);
                }
                other => panic!("expected format error for ({}, {}), got {:?}", lat, lon, other),
            }
        }
    }

    #[test]
    fn test_extra_trailing_field_is_ignored() {
        let csv = format!("{}A,X,1.0,2.0,d,Historical Site,\n", HEADER);
        let records = load(&csv).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, "Historical Site");
        assert_eq!(records[0].longitude(), 2.0);
    }

    #[test]
    fn test_short_row_with_coordinates_loads() {
        let csv = format!("{}A,X,1.0,2.0\n", HEADER);
        let records = load(&csv).unwrap();
        assert_eq!(records[0].name, "A");
        assert_eq!(records[0].description, "");
        assert_eq!(records[0].category, "");
        assert_eq!(crate::processing::classify(&records[0].category), crate::types::Category::Others);
    }

    #[test]
    fn test_short_row_without_longitude_is_format_error() {
        let csv = format!("{}A,X,1.0\n", HEADER);
        match load(&csv) {
            Err(MapError::DataFormat { line, message }) => {
                assert_eq!(line, Some(2));
                assert!(message.contains("Longitude is missing"));
            }
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_coordinates_are_kept() {
        let csv = format!("{}A,X,95.0,200.0,d,Others\n", HEADER);
        let records = load(&csv).unwrap();
        assert_eq!(records[0].latitude(), 95.0);
    }

    #[test]
    fn test_missing_file_is_source_error() {
        let err = load_records(Path::new("no/such/spots.csv")).unwrap_err();
        assert!(matches!(err, MapError::DataSource { .. }));
    }
}
