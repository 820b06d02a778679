// ZCTA county pipeline orchestration
//
// Fetch -> parse gazetteer -> parse relationships -> (match) -> write.
// Stages run strictly one after another; any error aborts the run and leaves
// whatever output files were already written.

use crate::aggregate::CountyIndex;
use crate::config::IngestConfig;
use crate::fetch::Fetcher;
use crate::matcher::{self, MatchReport};
use crate::output::{self, OutputWriter};
use crate::sources::{gazetteer, relationship, zip_codes};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use zcta_common::Result;

/// Counts from one pipeline run
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineStats {
    pub counties: usize,
    pub relationship_rows: usize,
    /// ZIP codes resolved by the relationship file
    pub relationship_zips: usize,
    /// ZIP codes resolved by nearest-county matching
    pub matched_zips: usize,
    pub bad_zips: usize,
    pub files_written: Vec<PathBuf>,
}

/// Local copies of the upstream sources
#[derive(Debug, Clone)]
pub struct SourcePaths {
    pub relationship: PathBuf,
    pub gazetteer: PathBuf,
    pub zip_codes: Option<PathBuf>,
}

pub struct Pipeline {
    config: IngestConfig,
    fetcher: Fetcher,
}

impl Pipeline {
    pub fn new(config: IngestConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = Fetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }

    /// Run the whole pipeline
    pub async fn run(&self) -> Result<PipelineStats> {
        info!("Step 1/4: Fetching sources...");
        let paths = self.fetch().await?;

        info!("Step 2/4: Building county index...");
        let mut stats = PipelineStats::default();
        let mut index = CountyIndex::new();
        stats.relationship_rows = load_counties(&mut index, &paths)?;
        stats.relationship_zips = index.zip_count();

        let report = match &paths.zip_codes {
            Some(path) => {
                info!("Step 3/4: Matching unresolved ZIP codes...");
                Some(matcher::match_unresolved(&mut index, zip_codes::open(path)?)?)
            },
            None => {
                info!("Step 3/4: No ZIP-code database configured, skipping matching");
                None
            },
        };

        if let Some(report) = &report {
            stats.matched_zips = report.matched();
            stats.bad_zips = report.bad.len();
        }
        stats.counties = index.len();

        info!("Step 4/4: Writing output...");
        let writer = OutputWriter::new(self.config.output_dir.clone(), self.config.pretty);
        stats.files_written = write_outputs(&writer, &index, report.as_ref())?;

        info!(
            counties = stats.counties,
            relationship_zips = stats.relationship_zips,
            matched = stats.matched_zips,
            bad = stats.bad_zips,
            "Pipeline completed"
        );

        Ok(stats)
    }

    /// Retrieve every configured source into the cache
    pub async fn fetch(&self) -> Result<SourcePaths> {
        let relationship = self.fetcher.retrieve(&self.config.county_zcta_url).await?;
        let gazetteer = self.fetcher.retrieve(&self.config.county_geo_url).await?;
        let zip_codes = match &self.config.zip_codes_url {
            Some(url) => Some(self.fetcher.retrieve(url).await?),
            None => None,
        };

        Ok(SourcePaths {
            relationship,
            gazetteer,
            zip_codes,
        })
    }
}

/// Consume the gazetteer, then the relationship file; returns relationship rows read
pub fn load_counties(index: &mut CountyIndex, paths: &SourcePaths) -> Result<usize> {
    for row in gazetteer::open(&paths.gazetteer)? {
        index.apply_geography(&row?);
    }
    info!(counties = index.len(), path = %paths.gazetteer.display(), "Loaded gazetteer");

    let mut rows = 0usize;
    for row in relationship::open(&paths.relationship)? {
        index.apply_relationship(&row?);
        rows += 1;
    }
    info!(
        rows,
        zip_codes = index.zip_count(),
        path = %paths.relationship.display(),
        "Loaded relationship file"
    );

    Ok(rows)
}

/// Write every output table; the audit files only when matching ran
pub fn write_outputs(
    writer: &OutputWriter,
    index: &CountyIndex,
    report: Option<&MatchReport>,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if let Some(report) = report {
        written.push(writer.write(output::BAD_FILE, &report.bad)?);
        written.push(writer.write(output::DIST_AUDIT_FILE, &report.audit)?);
    }

    written.push(writer.write(output::COUNTIES_FILE, &output::counties_by_name(index))?);

    let flat = output::zip_state_county(index);
    written.push(writer.write(
        output::STATE_COUNTY_ZIP_FILE,
        &output::state_county_zips(&flat),
    )?);
    written.push(writer.write(output::ZIP_STATE_COUNTY_FILE, &flat)?);

    info!(files = written.len(), dir = %writer.dir().display(), "Wrote output files");
    Ok(written)
}
