//! ZCTA Ingest Library
//!
//! Builds ZIP-code to county lookup tables from three public datasets.
//!
//! # Data Sources
//!
//! - **ZCTA relationship file**: authoritative ZIP (ZCTA) to county rows
//! - **County gazetteer**: county names, states and centroids
//! - **ZIP-code database** (optional): coordinates for ZIP codes the census
//!   relationship file does not cover, resolved to the nearest county centroid
//!
//! # Example
//!
//! ```no_run
//! use zcta_ingest::{IngestConfig, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = IngestConfig::builder().output_dir("./out").build();
//!     let stats = Pipeline::new(config)?.run().await?;
//!     println!("{} counties written", stats.counties);
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod config;
pub mod fetch;
pub mod geo;
pub mod lookup;
pub mod matcher;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod sources;

pub use aggregate::CountyIndex;
pub use config::IngestConfig;
pub use fetch::Fetcher;
pub use lookup::{FindResult, Query, ZipLookup};
pub use matcher::MatchReport;
pub use models::{County, CountyKey, Location};
pub use pipeline::{Pipeline, PipelineStats};
pub use zcta_common::{Result, ZctaError};
