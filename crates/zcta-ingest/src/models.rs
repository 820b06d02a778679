//! Domain types shared by the pipeline stages

use serde::{Deserialize, Serialize};

/// Concatenated state + county FIPS code (e.g. "30031")
pub type CountyKey = String;

/// A county as assembled from the gazetteer and relationship sources
///
/// Records are created on first reference from either source, so every
/// descriptive field stays `None` until a gazetteer row fills it in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct County {
    pub name: Option<String>,
    /// USPS state abbreviation
    pub state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub zip_codes: Vec<String>,
}

impl County {
    /// Centroid, if the gazetteer supplied one
    pub fn centroid(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    /// Name used as an output key, falling back to the county key
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(key)
    }
}

/// One gazetteer row
#[derive(Debug, Clone, PartialEq)]
pub struct GeographyRow {
    pub state: String,
    pub geoid: CountyKey,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// One ZCTA-to-county relationship row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipRow {
    pub zcta: String,
    pub geoid: CountyKey,
}

/// One ZIP-code database row
///
/// Coordinates stay unparsed; the matcher decides whether the row is usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipCodeRow {
    pub zipcode: String,
    pub latitude: String,
    pub longitude: String,
    /// Every field of the source row, verbatim
    pub raw: Vec<String>,
}

/// State and county a ZIP code resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub state: String,
    pub county: String,
}
