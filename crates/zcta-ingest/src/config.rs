// Ingest configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use zcta_common::{Result, ZctaError};

pub const COUNTY_ZCTA_URL: &str =
    "http://www2.census.gov/geo/docs/maps-data/data/rel/zcta_county_rel_10.txt";
pub const COUNTY_GEO_URL: &str =
    "http://www2.census.gov/geo/docs/maps-data/data/gazetteer/Gaz_counties_national.zip";
pub const ZIP_CODES_URL: &str = "http://federalgovernmentzipcodes.us/free-zipcode-database-Primary.csv";

pub const DEFAULT_CACHE_DIR: &str = "build";
pub const DEFAULT_OUTPUT_DIR: &str = "out";

/// Where the pipeline reads from and writes to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// ZCTA to county relationship file
    pub county_zcta_url: String,

    /// Zipped county gazetteer
    pub county_geo_url: String,

    /// ZIP-code coordinate database; `None` skips nearest-county matching
    pub zip_codes_url: Option<String>,

    /// Downloads are cached here by file name and never refreshed
    pub cache_dir: PathBuf,

    pub output_dir: PathBuf,

    /// Indent output JSON
    pub pretty: bool,

    pub user_agent: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            county_zcta_url: COUNTY_ZCTA_URL.to_string(),
            county_geo_url: COUNTY_GEO_URL.to_string(),
            zip_codes_url: Some(ZIP_CODES_URL.to_string()),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            pretty: true,
            user_agent: format!("zcta-ingest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl IngestConfig {
    pub fn builder() -> IngestConfigBuilder {
        IngestConfigBuilder::default()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.county_zcta_url.is_empty() {
            return Err(ZctaError::config("Relationship file URL cannot be empty"));
        }

        if self.county_geo_url.is_empty() {
            return Err(ZctaError::config("Gazetteer URL cannot be empty"));
        }

        if self.zip_codes_url.as_deref() == Some("") {
            return Err(ZctaError::config("ZIP-code database URL cannot be empty"));
        }

        if self.cache_dir.as_os_str().is_empty() {
            return Err(ZctaError::config("Cache directory cannot be empty"));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(ZctaError::config("Output directory cannot be empty"));
        }

        Ok(())
    }
}

/// Builder for IngestConfig
#[derive(Debug, Default)]
pub struct IngestConfigBuilder {
    county_zcta_url: Option<String>,
    county_geo_url: Option<String>,
    zip_codes_url: Option<Option<String>>,
    cache_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    pretty: Option<bool>,
    user_agent: Option<String>,
}

impl IngestConfigBuilder {
    pub fn county_zcta_url(mut self, url: impl Into<String>) -> Self {
        self.county_zcta_url = Some(url.into());
        self
    }

    pub fn county_geo_url(mut self, url: impl Into<String>) -> Self {
        self.county_geo_url = Some(url.into());
        self
    }

    pub fn zip_codes_url(mut self, url: impl Into<String>) -> Self {
        self.zip_codes_url = Some(Some(url.into()));
        self
    }

    /// Build only from the census sources
    pub fn without_zip_codes(mut self) -> Self {
        self.zip_codes_url = Some(None);
        self
    }

    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = Some(pretty);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> IngestConfig {
        let default = IngestConfig::default();

        IngestConfig {
            county_zcta_url: self.county_zcta_url.unwrap_or(default.county_zcta_url),
            county_geo_url: self.county_geo_url.unwrap_or(default.county_geo_url),
            zip_codes_url: self.zip_codes_url.unwrap_or(default.zip_codes_url),
            cache_dir: self.cache_dir.unwrap_or(default.cache_dir),
            output_dir: self.output_dir.unwrap_or(default.output_dir),
            pretty: self.pretty.unwrap_or(default.pretty),
            user_agent: self.user_agent.unwrap_or(default.user_agent),
        }
    }
}
