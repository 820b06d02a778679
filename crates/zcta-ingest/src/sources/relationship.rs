//! 2010 ZCTA to county relationship file (`zcta_county_rel_10.txt`)
//!
//! Comma-delimited UTF-8 text, one row per ZCTA/county intersection:
//! `ZCTA5,STATE,COUNTY,GEOID,POPPT,...`

use super::{field, FieldResult, Rows, Trim};
use crate::models::RelationshipRow;
use csv::StringRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use zcta_common::Result;

pub const SOURCE: &str = "zcta-county relationship";
pub const DELIMITER: u8 = b',';

pub const ZCTA: usize = 0;
pub const GEOID: usize = 3;
pub const MIN_COLUMNS: usize = 4;

pub fn open(path: &Path) -> Result<Rows<BufReader<File>, RelationshipRow>> {
    Ok(from_reader(BufReader::new(File::open(path)?)))
}

pub fn from_reader<R: Read>(reader: R) -> Rows<R, RelationshipRow> {
    Rows::new(reader, DELIMITER, Trim::All, SOURCE, MIN_COLUMNS, parse_row)
}

fn parse_row(record: &StringRecord) -> FieldResult<RelationshipRow> {
    let geoid = field(record, GEOID);
    if geoid.is_empty() {
        return Err("GEOID is empty".to_string());
    }

    Ok(RelationshipRow {
        zcta: field(record, ZCTA),
        geoid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relationship_rows() {
        let data = "\
ZCTA5,STATE,COUNTY,GEOID,POPPT,HUPT
59715,30,031,30031,31024,13428
59715,30,067,30067,12,9
";
        let rows: Vec<RelationshipRow> = from_reader(data.as_bytes())
            .collect::<Result<Vec<_>>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].zcta, "59715");
        assert_eq!(rows[0].geoid, "30031");
        assert_eq!(rows[1].geoid, "30067");
    }

    #[test]
    fn test_short_row_fails() {
        let data = "ZCTA5,STATE,COUNTY,GEOID\n59715,30\n";
        assert!(from_reader(data.as_bytes()).next().unwrap().is_err());
    }
}
