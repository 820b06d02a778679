//! 2010 national county gazetteer (`Gaz_counties_national.zip`)
//!
//! A zip archive whose first entry is a tab-delimited Latin-1 text file:
//! `USPS GEOID ANSICODE NAME POP10 HU10 ALAND AWATER ALAND_SQMI AWATER_SQMI INTPTLAT INTPTLONG`.
//! Coordinates are always the last two columns, whatever sits between.

use super::{field, float_field, FieldResult, Rows, Trim};
use crate::models::GeographyRow;
use csv::StringRecord;
use encoding_rs::WINDOWS_1252;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;
use zcta_common::{Result, ZctaError};

pub const SOURCE: &str = "county gazetteer";
pub const DELIMITER: u8 = b'\t';

pub const USPS: usize = 0;
pub const GEOID: usize = 1;
pub const NAME: usize = 3;
/// USPS, GEOID, ANSICODE, NAME, then latitude and longitude at minimum
pub const MIN_COLUMNS: usize = 6;

pub type GazetteerRows = Rows<Cursor<Vec<u8>>, GeographyRow>;

pub fn open(path: &Path) -> Result<GazetteerRows> {
    from_archive(File::open(path)?)
}

/// Read the first entry of a zip archive as gazetteer text
pub fn from_archive<R: Read + Seek>(reader: R) -> Result<GazetteerRows> {
    let mut archive = zip::ZipArchive::new(reader)?;
    if archive.len() == 0 {
        return Err(ZctaError::EmptyArchive(SOURCE.to_string()));
    }

    let mut entry = archive.by_index(0)?;
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    debug!(entry = entry.name(), bytes = bytes.len(), "Read gazetteer archive entry");

    Ok(from_latin1(&bytes))
}

/// Parse already-extracted gazetteer bytes
pub fn from_latin1(bytes: &[u8]) -> GazetteerRows {
    // Windows-1252 is the WHATWG decoder for the "latin1" label
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    let text = text.into_owned();
    Rows::new(
        Cursor::new(text.into_bytes()),
        DELIMITER,
        Trim::All,
        SOURCE,
        MIN_COLUMNS,
        parse_row,
    )
}

fn parse_row(record: &StringRecord) -> FieldResult<GeographyRow> {
    let last = record.len() - 1;

    Ok(GeographyRow {
        state: field(record, USPS),
        geoid: field(record, GEOID),
        name: field(record, NAME),
        latitude: float_field(record, last - 1, "latitude")?,
        longitude: float_field(record, last, "longitude")?,
    })
}
