//! Source file readers
//!
//! Each submodule owns one upstream format: its delimiter, its encoding and
//! the positional column layout. Nothing outside these modules indexes into a
//! raw record.
//!
//! All readers skip exactly one header row and yield rows lazily. A reader
//! is single-pass; iterate again by opening the file again. Each source
//! chooses whether fields are trimmed: rows that are echoed into the output
//! must stay verbatim.

pub mod gazetteer;
pub mod relationship;
pub mod zip_codes;

pub use csv::Trim;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::io::Read;
use zcta_common::{Result, ZctaError};

/// Outcome of parsing one record; the message becomes a [`ZctaError::Parse`]
pub(crate) type FieldResult<T> = std::result::Result<T, String>;

/// Lazily parsed rows of one source
pub struct Rows<R, T> {
    source: &'static str,
    min_columns: usize,
    records: StringRecordsIntoIter<R>,
    parse: fn(&StringRecord) -> FieldResult<T>,
}

impl<R: Read, T> Rows<R, T> {
    pub(crate) fn new(
        reader: R,
        delimiter: u8,
        trim: Trim,
        source: &'static str,
        min_columns: usize,
        parse: fn(&StringRecord) -> FieldResult<T>,
    ) -> Self {
        let records = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(trim)
            .from_reader(reader)
            .into_records();

        Self {
            source,
            min_columns,
            records,
            parse,
        }
    }
}

impl<R: Read, T> Iterator for Rows<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if record.len() < self.min_columns {
            return Some(Err(ZctaError::parse(
                self.source,
                line,
                format!(
                    "expected at least {} columns, found {}",
                    self.min_columns,
                    record.len()
                ),
            )));
        }

        Some((self.parse)(&record).map_err(|message| ZctaError::parse(self.source, line, message)))
    }
}

/// Field at a column already known to exist
pub(crate) fn field(record: &StringRecord, index: usize) -> String {
    record.get(index).unwrap_or_default().to_string()
}

pub(crate) fn float_field(record: &StringRecord, index: usize, name: &str) -> FieldResult<f64> {
    let value = record.get(index).unwrap_or_default();
    value
        .parse()
        .map_err(|_| format!("{name} is not a number: '{value}'"))
}
