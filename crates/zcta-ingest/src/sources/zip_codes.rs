//! Free ZIP-code database (`free-zipcode-database-Primary.csv`)
//!
//! Comma-delimited, quoted UTF-8:
//! `"Zipcode","ZipCodeType","City","State","LocationType","Lat","Long",...`
//!
//! Latitude and longitude are left as text. Some rows carry blanks there and
//! the matcher diverts them instead of failing the run. Fields are not
//! trimmed, so `raw` is the source row as written; only the ZIP code key is.

use super::{field, FieldResult, Rows, Trim};
use crate::models::ZipCodeRow;
use csv::StringRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use zcta_common::Result;

pub const SOURCE: &str = "zip-code database";
pub const DELIMITER: u8 = b',';

pub const ZIPCODE: usize = 0;
pub const LAT: usize = 5;
pub const LONG: usize = 6;
pub const MIN_COLUMNS: usize = 7;

pub fn open(path: &Path) -> Result<Rows<BufReader<File>, ZipCodeRow>> {
    Ok(from_reader(BufReader::new(File::open(path)?)))
}

pub fn from_reader<R: Read>(reader: R) -> Rows<R, ZipCodeRow> {
    Rows::new(reader, DELIMITER, Trim::None, SOURCE, MIN_COLUMNS, parse_row)
}

fn parse_row(record: &StringRecord) -> FieldResult<ZipCodeRow> {
    Ok(ZipCodeRow {
        zipcode: field(record, ZIPCODE).trim().to_string(),
        latitude: field(record, LAT),
        longitude: field(record, LONG),
        raw: record.iter().map(str::to_string).collect(),
    })
}
