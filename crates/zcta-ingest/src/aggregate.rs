//! In-memory county index
//!
//! Counties are keyed by their concatenated state + county FIPS code in a
//! `BTreeMap`, which fixes the enumeration order every later stage relies on
//! (nearest-county tie-breaks, output ordering before explicit sorts).

use crate::models::{County, CountyKey, GeographyRow, RelationshipRow};
use std::collections::BTreeMap;
use tracing::trace;

#[derive(Debug, Default)]
pub struct CountyIndex {
    counties: BTreeMap<CountyKey, County>,
    zip_codes: BTreeMap<String, CountyKey>,
}

impl CountyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-create the county for `key`
    pub fn county_mut(&mut self, key: &str) -> &mut County {
        self.counties.entry(key.to_string()).or_default()
    }

    /// Record name, state and centroid from a gazetteer row
    ///
    /// Overwrites whatever an earlier row set for the same key.
    pub fn apply_geography(&mut self, row: &GeographyRow) {
        let county = self.county_mut(&row.geoid);
        county.name = Some(row.name.clone());
        county.state = Some(row.state.clone());
        county.latitude = Some(row.latitude);
        county.longitude = Some(row.longitude);
    }

    pub fn apply_relationship(&mut self, row: &RelationshipRow) {
        self.assign_zip(&row.zcta, &row.geoid);
    }

    /// Point `zip` at the county `key` and append it to that county's list
    ///
    /// A ZIP belongs to exactly one county: assigning it elsewhere moves it,
    /// and assigning it to the county it already has is a no-op. The last
    /// assignment wins.
    pub fn assign_zip(&mut self, zip: &str, key: &str) {
        if let Some(previous) = self.zip_codes.get(zip) {
            if previous == key {
                return;
            }
            trace!(zip, from = %previous, to = key, "Reassigning ZIP code");
            if let Some(county) = self.counties.get_mut(previous) {
                county.zip_codes.retain(|z| z != zip);
            }
        }

        self.zip_codes.insert(zip.to_string(), key.to_string());
        self.county_mut(key).zip_codes.push(zip.to_string());
    }

    pub fn county(&self, key: &str) -> Option<&County> {
        self.counties.get(key)
    }

    pub fn county_for_zip(&self, zip: &str) -> Option<(&str, &County)> {
        let key = self.zip_codes.get(zip)?;
        let county = self.counties.get(key)?;
        Some((key.as_str(), county))
    }

    pub fn contains_zip(&self, zip: &str) -> bool {
        self.zip_codes.contains_key(zip)
    }

    /// Counties in key order
    pub fn counties(&self) -> impl Iterator<Item = (&str, &County)> {
        self.counties.iter().map(|(k, c)| (k.as_str(), c))
    }

    /// ZIP codes in ascending order with the county each resolves to
    pub fn zip_codes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.zip_codes.iter().map(|(z, k)| (z.as_str(), k.as_str()))
    }

    pub fn len(&self) -> usize {
        self.counties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counties.is_empty()
    }

    pub fn zip_count(&self) -> usize {
        self.zip_codes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geography(geoid: &str, state: &str, name: &str, lat: f64, lon: f64) -> GeographyRow {
        GeographyRow {
            state: state.into(),
            geoid: geoid.into(),
            name: name.into(),
            latitude: lat,
            longitude: lon,
        }
    }

    fn relationship(zcta: &str, geoid: &str) -> RelationshipRow {
        RelationshipRow {
            zcta: zcta.into(),
            geoid: geoid.into(),
        }
    }

    #[test]
    fn test_county_created_lazily_with_empty_fields() {
        let mut index = CountyIndex::new();
        assert!(index.is_empty());

        let county = index.county_mut("30031");
        assert_eq!(*county, County::default());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_geography_overwrites_previous_values() {
        let mut index = CountyIndex::new();
        index.apply_geography(&geography("30031", "MT", "Old Name", 1.0, 2.0));
        index.apply_geography(&geography("30031", "MT", "Gallatin County", 45.54, -111.17));

        let county = index.county("30031").unwrap();
        assert_eq!(county.name.as_deref(), Some("Gallatin County"));
        assert_eq!(county.state.as_deref(), Some("MT"));
        assert_eq!(county.centroid(), Some((45.54, -111.17)));
    }

    #[test]
    fn test_relationship_before_geography_keeps_zip_codes() {
        let mut index = CountyIndex::new();
        index.apply_relationship(&relationship("59714", "30031"));
        index.apply_geography(&geography("30031", "MT", "Gallatin County", 45.54, -111.17));

        let county = index.county("30031").unwrap();
        assert_eq!(county.zip_codes, vec!["59714"]);
        assert_eq!(county.name.as_deref(), Some("Gallatin County"));
    }

    #[test]
    fn test_zip_codes_keep_source_order() {
        let mut index = CountyIndex::new();
        for zip in ["59718", "59714", "59730"] {
            index.apply_relationship(&relationship(zip, "30031"));
        }
        assert_eq!(
            index.county("30031").unwrap().zip_codes,
            vec!["59718", "59714", "59730"]
        );
    }

    #[test]
    fn test_zip_spanning_counties_resolves_to_last_row() {
        let mut index = CountyIndex::new();
        index.apply_relationship(&relationship("59715", "30031"));
        index.apply_relationship(&relationship("59715", "30067"));

        let (key, _) = index.county_for_zip("59715").unwrap();
        assert_eq!(key, "30067");
        assert!(index.county("30031").unwrap().zip_codes.is_empty());
        assert_eq!(index.county("30067").unwrap().zip_codes, vec!["59715"]);
    }

    #[test]
    fn test_repeated_row_is_not_duplicated() {
        let mut index = CountyIndex::new();
        index.apply_relationship(&relationship("59715", "30031"));
        index.apply_relationship(&relationship("59715", "30031"));
        assert_eq!(index.county("30031").unwrap().zip_codes, vec!["59715"]);
        assert_eq!(index.zip_count(), 1);
    }

    #[test]
    fn test_counties_iterate_in_key_order() {
        let mut index = CountyIndex::new();
        index.county_mut("49035");
        index.county_mut("15005");
        index.county_mut("30031");

        let keys: Vec<&str> = index.counties().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["15005", "30031", "49035"]);
    }
}
