//! Output table shapes and JSON writing
//!
//! Three shapes come out of one [`CountyIndex`]:
//!
//! - `counties.json`: counties keyed by display name. Two counties that share
//!   a name in different states collide and the later one (in county key
//!   order) wins. This is a known limitation of the format.
//! - `state_county_zip.json`: state -> county name -> ZIP list
//! - `zip_state_county.json`: `[zip, state, county]` triples sorted by
//!   (state, county)

use crate::aggregate::CountyIndex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zcta_common::Result;

pub const COUNTIES_FILE: &str = "counties.json";
pub const BAD_FILE: &str = "bad.json";
pub const DIST_AUDIT_FILE: &str = "dist_audit.json";
pub const STATE_COUNTY_ZIP_FILE: &str = "state_county_zip.json";
pub const ZIP_STATE_COUNTY_FILE: &str = "zip_state_county.json";

/// A county in `counties.json`; the name is the key, not a field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountyEntry<'a> {
    pub state: Option<&'a str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub zip_codes: &'a [String],
}

/// state -> county name -> ZIP codes
pub type StateCountyZips = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Contents of `zip_state_county.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipStateCountyTable {
    pub zip_state_county: Vec<(String, String, String)>,
}

/// Counties keyed and sorted by display name
pub fn counties_by_name(index: &CountyIndex) -> BTreeMap<&str, CountyEntry<'_>> {
    let mut table = BTreeMap::new();
    let mut unnamed = 0usize;

    for (key, county) in index.counties() {
        if county.name.is_none() {
            unnamed += 1;
        }
        let name = county.display_name(key);
        let entry = CountyEntry {
            state: county.state.as_deref(),
            latitude: county.latitude,
            longitude: county.longitude,
            zip_codes: &county.zip_codes,
        };
        if table.insert(name, entry).is_some() {
            warn!(name, key, "County name collision, keeping the later county");
        }
    }

    if unnamed > 0 {
        warn!(count = unnamed, "Counties missing from the gazetteer are keyed by FIPS code");
    }

    table
}

/// Every resolved ZIP with its state and county, sorted by (state, county)
///
/// ZIPs are visited in ascending order and the sort is stable, so each
/// county's ZIPs stay ascending. ZIPs whose county has no gazetteer row have
/// no state or name to report and are left out.
pub fn zip_state_county(index: &CountyIndex) -> ZipStateCountyTable {
    let mut rows = Vec::with_capacity(index.zip_count());
    let mut skipped = 0usize;

    for (zip, key) in index.zip_codes() {
        let county = index.county(key);
        match county.and_then(|c| Some((c.state.as_ref()?, c.name.as_ref()?))) {
            Some((state, name)) => rows.push((zip.to_string(), state.clone(), name.clone())),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(count = skipped, "ZIP codes without a named county left out of state tables");
    }

    rows.sort_by(|a, b| (&a.1, &a.2).cmp(&(&b.1, &b.2)));
    ZipStateCountyTable {
        zip_state_county: rows,
    }
}

/// Group a flat table by state, then county name
pub fn state_county_zips(table: &ZipStateCountyTable) -> StateCountyZips {
    let mut nested = StateCountyZips::new();
    for (zip, state, county) in &table.zip_state_county {
        nested
            .entry(state.clone())
            .or_default()
            .entry(county.clone())
            .or_default()
            .push(zip.clone());
    }
    nested
}

/// Writes JSON files into one output directory, overwriting existing files
#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
    pretty: bool,
}

impl OutputWriter {
    pub fn new(dir: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            dir: dir.into(),
            pretty,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write<T: Serialize>(&self, file_name: &str, value: &T) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        write_json(&path, value, self.pretty)?;
        Ok(path)
    }
}

pub fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), "Wrote JSON");
    Ok(())
}
