pub mod extract;
pub mod models;
pub mod publish;
pub mod storage;
pub mod transform;

use common::Result;
use common::config::Settings;
use extract::CatalogClient;
use publish::{PublishReport, publish_catalog};
use std::path::Path;
use storage::{S3Config, S3Manager, S3Storage};
use tracing::{error, info};
use transform::{CatalogBuild, catalog_xml, convert_records};

/// Where the package list comes from.
pub enum RecordSource<'a> {
    Api,
    File(&'a Path),
}

/// Loads the package list and renders the DCAT-AP catalog.
pub async fn build_catalog(
    settings: &Settings,
    source: RecordSource<'_>,
) -> Result<(String, CatalogBuild)> {
    let records = match source {
        RecordSource::Api => CatalogClient::new(&settings.api)?.fetch_records().await?,
        RecordSource::File(path) => extract::read_records(path, settings.api.sort_by_name)?,
    };

    let build = convert_records(&records, &settings.dcat);
    let xml = catalog_xml(&build.datasets)?;
    Ok((xml, build))
}

/// Fetches, converts and publishes the catalog to the configured bucket.
pub async fn run_publish_pipeline(settings: &Settings) -> Result<PublishReport> {
    info!("Starting opendataswiss publish pipeline");

    let (xml, build) = build_catalog(settings, RecordSource::Api).await?;

    let manager = S3Manager::new(S3Config::from(&settings.s3));
    let storage = S3Storage::new(&manager, &settings.publish.bucket).await?;
    let report = publish_catalog(&storage, &xml, &settings.publish).await;

    if report.is_success() {
        info!(
            datasets = build.datasets.len(),
            skipped = build.failures.len(),
            "Finished opendataswiss publish pipeline"
        );
    } else {
        error!(?report, "Catalog was not published");
    }

    Ok(report)
}

/// Converts without publishing, writing the XML to `output` or returning it.
pub async fn run_convert(
    settings: &Settings,
    source: RecordSource<'_>,
    output: Option<&Path>,
) -> Result<(String, CatalogBuild)> {
    let (xml, build) = build_catalog(settings, source).await?;

    if let Some(path) = output {
        std::fs::write(path, &xml)?;
        info!(path = %path.display(), datasets = build.datasets.len(), "Wrote catalog");
    }

    Ok((xml, build))
}
