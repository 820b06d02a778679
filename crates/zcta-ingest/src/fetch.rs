//! Download-once file cache
//!
//! Each URL is cached under its final path segment. An existing cache file
//! is returned as-is: there is no checksum or staleness check, so delete the
//! cache directory to pick up new upstream releases.

use crate::config::IngestConfig;
use encoding_rs::{Encoding, WINDOWS_1252};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Client;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use zcta_common::{Result, ZctaError};

pub struct Fetcher {
    client: Client,
    cache_dir: PathBuf,
}

impl Fetcher {
    pub fn new(config: &IngestConfig) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Fetcher {
            client,
            cache_dir: config.cache_dir.clone(),
        })
    }

    /// Local path a URL is cached at
    pub fn cache_path(&self, url: &str) -> Result<PathBuf> {
        let name = file_name(url);
        if name.is_empty() {
            return Err(ZctaError::config(format!("URL has no file name: {url}")));
        }
        Ok(self.cache_dir.join(name))
    }

    /// Return the cached copy of `url`, downloading it first if needed
    pub async fn retrieve(&self, url: &str) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.cache_dir).await?;

        let path = self.cache_path(url)?;
        if tokio::fs::try_exists(&path).await? {
            debug!(url, path = %path.display(), "Cache hit");
            return Ok(path);
        }

        info!(url, "Downloading");
        let response = self.client.get(url).send().await?.error_for_status()?;

        if url.ends_with("zip") {
            let bytes = response.bytes().await?;
            tokio::fs::write(&path, &bytes).await?;
            info!(path = %path.display(), bytes = bytes.len(), "Cached binary download");
        } else {
            let charset = declared_charset(response.headers());
            let bytes = response.bytes().await?;
            let text = decode_text(&bytes, charset.as_deref());
            tokio::fs::write(&path, text.as_bytes()).await?;
            info!(
                path = %path.display(),
                charset = charset.as_deref().unwrap_or("latin-1"),
                bytes = text.len(),
                "Cached text download"
            );
        }

        Ok(path)
    }
}

/// Final path segment of a URL, ignoring any query string
fn file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or_default()
}

/// `charset` parameter of the Content-Type header, if any
pub fn declared_charset(headers: &HeaderMap) -> Option<String> {
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').to_string())
    })
}

/// Decode a text payload with the declared charset, or Latin-1 without one
pub fn decode_text(bytes: &[u8], charset: Option<&str>) -> String {
    let encoding = charset
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(WINDOWS_1252);

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(encoding = used.name(), "Replaced undecodable bytes in download");
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(content_type: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        map
    }

    #[test]
    fn test_file_name_is_last_segment() {
        assert_eq!(
            file_name("http://www2.census.gov/geo/docs/maps-data/data/rel/zcta_county_rel_10.txt"),
            "zcta_county_rel_10.txt"
        );
        assert_eq!(file_name("http://example.com/data.csv?token=1"), "data.csv");
        assert_eq!(file_name("http://example.com/dir/"), "");
    }

    #[test]
    fn test_cache_path_rejects_directory_urls() {
        let config = IngestConfig::builder().cache_dir("/tmp/zcta").build();
        let fetcher = Fetcher::new(&config).unwrap();

        assert_eq!(
            fetcher.cache_path("http://example.com/a/Gaz_counties_national.zip").unwrap(),
            PathBuf::from("/tmp/zcta/Gaz_counties_national.zip")
        );
        assert!(fetcher.cache_path("http://example.com/a/").is_err());
    }

    #[test]
    fn test_declared_charset() {
        assert_eq!(
            declared_charset(&headers("text/plain; charset=UTF-8")).as_deref(),
            Some("UTF-8")
        );
        assert_eq!(
            declared_charset(&headers("text/csv;Charset=\"iso-8859-1\"")).as_deref(),
            Some("iso-8859-1")
        );
        assert_eq!(declared_charset(&headers("text/plain")), None);
        assert_eq!(declared_charset(&HeaderMap::new()), None);
    }

    #[test]
    fn test_decode_falls_back_to_latin1() {
        assert_eq!(decode_text(b"Do\xf1a Ana", None), "Doña Ana");
        assert_eq!(decode_text("Doña Ana".as_bytes(), Some("utf-8")), "Doña Ana");
        assert_eq!(decode_text(b"Do\xf1a Ana", Some("no-such-charset")), "Doña Ana");
    }
}
