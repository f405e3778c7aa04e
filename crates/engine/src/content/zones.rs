use std::collections::HashSet;
use std::fs;
use std::num::ParseFloatError;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::app::{Rect, Vec2};

const ZONE_ROW_COLUMNS: usize = 5;
const BOUND_COLUMN_NAMES: [&str; 4] = ["x_min", "y_min", "x_max", "y_max"];

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneRegion {
    pub rect: Rect,
    pub zone: String,
}

/// Immutable mapping from world regions to zone identifiers.
///
/// Regions keep the row order of the placement asset. Lookups return the
/// first region containing the point, so overlapping rows resolve to
/// whichever was declared first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneMap {
    regions: Vec<ZoneRegion>,
}

impl ZoneMap {
    pub fn from_regions(regions: Vec<ZoneRegion>) -> Self {
        Self { regions }
    }

    pub fn zone_at(&self, point: Vec2) -> Option<&str> {
        self.regions
            .iter()
            .find(|region| region.rect.contains(point))
            .map(|region| region.zone.as_str())
    }

    pub fn rect_of(&self, zone: &str) -> Option<Rect> {
        self.regions
            .iter()
            .find(|region| region.zone == zone)
            .map(|region| region.rect)
    }

    pub fn zone_ids(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|region| region.zone.as_str())
    }

    pub fn regions(&self) -> &[ZoneRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum ZoneMapError {
    #[error("failed to read zone placement file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected {expected} columns (x_min,y_min,x_max,y_max,zone), found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: {column} is not a finite number: '{value}'")]
    InvalidBound {
        line: usize,
        column: &'static str,
        value: String,
        #[source]
        source: Option<ParseFloatError>,
    },
    #[error("line {line}: zone name is empty")]
    EmptyZoneName { line: usize },
    #[error("line {line}: region for zone '{zone}' has min greater than max")]
    InvertedRegion { line: usize, zone: String },
    #[error("line {line}: zone '{zone}' is declared more than once")]
    DuplicateZone { line: usize, zone: String },
}

pub fn load_zone_map(path: &Path) -> Result<ZoneMap, ZoneMapError> {
    let raw = fs::read_to_string(path).map_err(|source| ZoneMapError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let zone_map = parse_zone_map(&raw)?;
    info!(
        path = %path.display(),
        zone_count = zone_map.len(),
        "zone_map_loaded"
    );
    Ok(zone_map)
}

/// Parses `x_min,y_min,x_max,y_max,zone` rows. Blank lines and lines starting
/// with `#` are skipped. Any malformed row fails the whole load.
pub fn parse_zone_map(raw: &str) -> Result<ZoneMap, ZoneMapError> {
    let mut regions = Vec::new();
    let mut seen = HashSet::new();

    for (idx, line) in raw.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let region = parse_zone_row(line_no, trimmed)?;
        if !seen.insert(region.zone.clone()) {
            return Err(ZoneMapError::DuplicateZone {
                line: line_no,
                zone: region.zone,
            });
        }
        regions.push(region);
    }

    Ok(ZoneMap::from_regions(regions))
}

fn parse_zone_row(line: usize, row: &str) -> Result<ZoneRegion, ZoneMapError> {
    let fields: Vec<&str> = row.split(',').map(unquote_field).collect();
    if fields.len() != ZONE_ROW_COLUMNS {
        return Err(ZoneMapError::ColumnCount {
            line,
            expected: ZONE_ROW_COLUMNS,
            found: fields.len(),
        });
    }

    let mut bounds = [0.0f32; 4];
    for (slot, (value, column)) in bounds
        .iter_mut()
        .zip(fields.iter().zip(BOUND_COLUMN_NAMES))
    {
        *slot = parse_bound(line, column, value)?;
    }

    let zone = fields[4];
    if zone.is_empty() {
        return Err(ZoneMapError::EmptyZoneName { line });
    }

    let rect = Rect::new(bounds[0], bounds[1], bounds[2], bounds[3]);
    if !rect.is_normalized() {
        return Err(ZoneMapError::InvertedRegion {
            line,
            zone: zone.to_string(),
        });
    }

    Ok(ZoneRegion {
        rect,
        zone: zone.to_string(),
    })
}

fn parse_bound(line: usize, column: &'static str, value: &str) -> Result<f32, ZoneMapError> {
    let invalid = |source| ZoneMapError::InvalidBound {
        line,
        column,
        value: value.to_string(),
        source,
    };
    let bound = value.parse::<f32>().map_err(|error| invalid(Some(error)))?;
    if !bound.is_finite() {
        return Err(invalid(None));
    }
    Ok(bound)
}

/// Trims a CSV field and drops one pair of surrounding double quotes.
fn unquote_field(field: &str) -> &str {
    let field = field.trim();
    field
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .map(str::trim)
        .unwrap_or(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# x_min,y_min,x_max,y_max,zone
10,10,110,60,field1
10,80,110,130,pen1

200,0,260,720,river
";

    #[test]
    fn parses_rows_in_declaration_order() {
        let zone_map = parse_zone_map(SAMPLE).expect("zone map");

        let ids: Vec<&str> = zone_map.zone_ids().collect();
        assert_eq!(ids, vec!["field1", "pen1", "river"]);
        assert_eq!(
            zone_map.rect_of("pen1"),
            Some(Rect::new(10.0, 80.0, 110.0, 130.0))
        );
        assert_eq!(zone_map.rect_of("house"), None);
    }

    #[test]
    fn zone_at_resolves_point_to_zone() {
        let zone_map = parse_zone_map(SAMPLE).expect("zone map");

        assert_eq!(zone_map.zone_at(Vec2::new(50.0, 30.0)), Some("field1"));
        assert_eq!(zone_map.zone_at(Vec2::new(230.0, 500.0)), Some("river"));
        assert_eq!(zone_map.zone_at(Vec2::new(150.0, 30.0)), None);
    }

    #[test]
    fn overlapping_regions_resolve_to_first_declared() {
        let zone_map = parse_zone_map("0,0,100,100,first\n50,50,150,150,second\n")
            .expect("zone map");

        assert_eq!(zone_map.zone_at(Vec2::new(75.0, 75.0)), Some("first"));
        assert_eq!(zone_map.zone_at(Vec2::new(125.0, 125.0)), Some("second"));
    }

    #[test]
    fn non_numeric_bound_is_rejected_with_location() {
        let error = parse_zone_map("10,10,110,60,field1\n10,abc,110,130,pen1\n")
            .expect_err("should fail");

        match error {
            ZoneMapError::InvalidBound {
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, "y_min");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        for (row, column) in [
            ("-inf,0,10,10,a\n", "x_min"),
            ("0,NaN,10,10,a\n", "y_min"),
            ("0,0,infinity,10,a\n", "x_max"),
        ] {
            match parse_zone_map(row) {
                Err(ZoneMapError::InvalidBound {
                    line: 1,
                    column: found,
                    source: None,
                    ..
                }) => assert_eq!(found, column, "{row}"),
                other => panic!("unexpected result for {row:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn quoted_fields_lose_their_quotes() {
        let zone_map =
            parse_zone_map("\"0\",0,10,10,\"pen1\"\n").expect("zone map");

        let ids: Vec<&str> = zone_map.zone_ids().collect();
        assert_eq!(ids, vec!["pen1"]);
        assert_eq!(zone_map.rect_of("pen1"), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let error = parse_zone_map("10,10,110,field1\n").expect_err("should fail");
        assert!(matches!(
            error,
            ZoneMapError::ColumnCount {
                line: 1,
                expected: 5,
                found: 4
            }
        ));
    }

    #[test]
    fn inverted_and_unnamed_regions_are_rejected() {
        assert!(matches!(
            parse_zone_map("110,10,10,60,field1\n"),
            Err(ZoneMapError::InvertedRegion { line: 1, .. })
        ));
        assert!(matches!(
            parse_zone_map("10,10,110,60, \n"),
            Err(ZoneMapError::EmptyZoneName { line: 1 })
        ));
    }

    #[test]
    fn duplicate_zone_is_rejected() {
        let error = parse_zone_map("0,0,1,1,pen1\n2,2,3,3,pen1\n").expect_err("should fail");
        assert!(matches!(error, ZoneMapError::DuplicateZone { line: 2, .. }));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("interactiveplacement.csv");
        fs::write(&path, SAMPLE).expect("write");

        let zone_map = load_zone_map(&path).expect("load");
        assert_eq!(zone_map.len(), 3);
        assert!(!zone_map.is_empty());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.csv");

        let error = load_zone_map(&path).expect_err("should fail");
        assert!(matches!(error, ZoneMapError::Read { .. }));
    }
}
