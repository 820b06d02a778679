//! ZCTA Common Library
//!
//! Shared error handling and logging for the ZCTA county workspace.
//!
//! # Overview
//!
//! - **Error Handling**: [`ZctaError`] and the [`Result`] alias used by every
//!   pipeline stage
//! - **Logging**: `tracing` subscriber setup driven by [`logging::LogConfig`]
//!
//! # Example
//!
//! ```no_run
//! use zcta_common::logging::{init_logging, LogConfig};
//! use zcta_common::{Result, ZctaError};
//!
//! fn check(dir: &str) -> Result<()> {
//!     if dir.is_empty() {
//!         return Err(ZctaError::Config("cache directory is empty".into()));
//!     }
//!     Ok(())
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging(&LogConfig::from_env()?)?;
//!     check("build")?;
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{Result, ZctaError};
