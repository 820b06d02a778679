//! Queries over a written `zip_state_county.json`
//!
//! ```no_run
//! use zcta_ingest::{Query, ZipLookup};
//!
//! let lookup = ZipLookup::from_path("out/zip_state_county.json".as_ref()).unwrap();
//! let location = lookup.county_by_zip("59715");
//! let gallatin = lookup.find(&Query::state_county("MT", "Gallatin County"));
//! ```

use crate::models::Location;
use crate::output::{state_county_zips, StateCountyZips, ZipStateCountyTable};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;
use zcta_common::Result;

/// In-memory lookup tables built from the flat ZIP table
#[derive(Debug, Clone, Default)]
pub struct ZipLookup {
    states: StateCountyZips,
    zips: BTreeMap<String, Location>,
}

/// Any combination of state, county and ZIP; empty strings count as unset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub state: Option<String>,
    pub county: Option<String>,
    pub zip: Option<String>,
}

impl Query {
    pub fn state(state: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            ..Default::default()
        }
    }

    pub fn state_county(state: impl Into<String>, county: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            county: Some(county.into()),
            ..Default::default()
        }
    }

    pub fn zip(zip: impl Into<String>) -> Self {
        Self {
            zip: Some(zip.into()),
            ..Default::default()
        }
    }

    pub fn with_zip(mut self, zip: impl Into<String>) -> Self {
        self.zip = Some(zip.into());
        self
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Answer to a [`Query`], shaped by which fields were set
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FindResult<'a> {
    /// state + county + zip: whether the ZIP belongs to that county
    Membership(bool),
    /// state + county: the county's ZIP codes
    Zips(&'a [String]),
    /// state: every county with its ZIP codes
    Counties(&'a BTreeMap<String, Vec<String>>),
    /// zip: where it resolves
    Location(&'a Location),
}

impl ZipLookup {
    pub fn from_path(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let table: ZipStateCountyTable = serde_json::from_reader(reader)?;
        debug!(rows = table.zip_state_county.len(), path = %path.display(), "Loaded ZIP table");
        Ok(Self::from_table(&table))
    }

    pub fn from_table(table: &ZipStateCountyTable) -> Self {
        let zips = table
            .zip_state_county
            .iter()
            .map(|(zip, state, county)| {
                let location = Location {
                    state: state.clone(),
                    county: county.clone(),
                };
                (zip.clone(), location)
            })
            .collect();

        Self {
            states: state_county_zips(table),
            zips,
        }
    }

    /// State identifiers in ascending order
    pub fn states(&self) -> Vec<&str> {
        self.states.keys().map(String::as_str).collect()
    }

    /// County names of a state in ascending order
    pub fn counties_by_state(&self, state: &str) -> Option<Vec<&str>> {
        let counties = self.states.get(state)?;
        Some(counties.keys().map(String::as_str).collect())
    }

    pub fn county_by_zip(&self, zip: &str) -> Option<&Location> {
        self.zips.get(zip)
    }

    pub fn find(&self, query: &Query) -> Option<FindResult<'_>> {
        let state = present(&query.state);
        let county = present(&query.county);
        let zip = present(&query.zip);

        match (state, county, zip) {
            (Some(state), Some(county), Some(zip)) => {
                let member = self
                    .zips_in(state, county)
                    .is_some_and(|zips| zips.iter().any(|z| z == zip));
                Some(FindResult::Membership(member))
            },
            (Some(state), Some(county), None) => self.zips_in(state, county).map(FindResult::Zips),
            (Some(state), None, _) => self.states.get(state).map(FindResult::Counties),
            (None, _, Some(zip)) => self.county_by_zip(zip).map(FindResult::Location),
            _ => None,
        }
    }

    fn zips_in(&self, state: &str, county: &str) -> Option<&[String]> {
        self.states.get(state)?.get(county).map(Vec::as_slice)
    }
}
