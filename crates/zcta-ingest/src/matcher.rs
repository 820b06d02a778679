//! Nearest-county geocoding for ZIP codes missing from the relationship file
//!
//! Every candidate ZIP is compared against every county centroid, so this is
//! O(zips x counties). Ties go to the first county in key order.

use crate::aggregate::CountyIndex;
use crate::geo::haversine_miles;
use crate::models::{CountyKey, ZipCodeRow};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};
use zcta_common::{Result, ZctaError};

/// Nearest distance found for a geocoded ZIP, with the row it came from
///
/// Serializes as `[distance, [field, ...]]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry(pub f64, pub Vec<String>);

impl AuditEntry {
    pub fn distance(&self) -> f64 {
        self.0
    }

    pub fn row(&self) -> &[String] {
        &self.1
    }
}

/// What the matcher did with the ZIP-code database
#[derive(Debug, Default)]
pub struct MatchReport {
    /// Rows whose coordinates did not parse, keyed by ZIP code
    pub bad: BTreeMap<String, Vec<String>>,
    /// Geocoded ZIP codes
    pub audit: BTreeMap<String, AuditEntry>,
    /// Rows skipped because the ZIP already had a county
    pub already_resolved: usize,
}

impl MatchReport {
    pub fn matched(&self) -> usize {
        self.audit.len()
    }
}

/// County whose centroid is closest to the point, with its distance in miles
///
/// Counties without a centroid are not candidates.
pub fn nearest_county(index: &CountyIndex, lat: f64, lon: f64) -> Option<(&str, f64)> {
    let mut best: Option<(&str, f64)> = None;

    for (key, county) in index.counties() {
        let Some((county_lat, county_lon)) = county.centroid() else {
            continue;
        };
        let dist = haversine_miles(lat, lon, county_lat, county_lon);
        if best.map_or(true, |(_, min)| dist < min) {
            best = Some((key, dist));
        }
    }

    best
}

/// Resolve every ZIP-code row the index does not already know
///
/// Rows with unparseable coordinates land in [`MatchReport::bad`]; the rest
/// are assigned to their nearest county and recorded in
/// [`MatchReport::audit`].
pub fn match_unresolved<I>(index: &mut CountyIndex, rows: I) -> Result<MatchReport>
where
    I: IntoIterator<Item = Result<ZipCodeRow>>,
{
    let mut report = MatchReport::default();

    for row in rows {
        let row = row?;
        if index.contains_zip(&row.zipcode) {
            report.already_resolved += 1;
            continue;
        }

        let (lat, lon) = match (
            row.latitude.trim().parse::<f64>(),
            row.longitude.trim().parse::<f64>(),
        ) {
            (Ok(lat), Ok(lon)) => (lat, lon),
            _ => {
                debug!(zip = %row.zipcode, lat = %row.latitude, lon = %row.longitude, "Unusable coordinates");
                report.bad.insert(row.zipcode, row.raw);
                continue;
            },
        };

        let (key, dist): (CountyKey, f64) = nearest_county(index, lat, lon)
            .map(|(k, d)| (k.to_string(), d))
            .ok_or_else(|| ZctaError::config("no county centroids available for matching"))?;

        index.assign_zip(&row.zipcode, &key);
        // A later row with usable coordinates supersedes an earlier bad one
        report.bad.remove(&row.zipcode);
        report.audit.insert(row.zipcode, AuditEntry(dist, row.raw));
    }

    if !report.bad.is_empty() {
        warn!(count = report.bad.len(), "ZIP codes with unusable coordinates");
    }
    info!(
        matched = report.matched(),
        bad = report.bad.len(),
        already_resolved = report.already_resolved,
        "Nearest-county matching complete"
    );

    Ok(report)
}
