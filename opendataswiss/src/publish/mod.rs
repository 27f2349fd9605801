//! Uploads the catalog to a bucket served as a static website.

mod index;

pub use index::index_html;

use crate::storage::ObjectStorage;
use common::config::PublishConfig;
use tracing::{error, info};

pub const INDEX_DOCUMENT: &str = "index.html";
pub const ERROR_DOCUMENT: &str = "error.html";

/// Which publishing steps went through. Steps are independent: a failed
/// step is logged and the next one still runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub bucket_ready: bool,
    pub policy_set: bool,
    pub catalog_uploaded: bool,
    pub website_configured: bool,
    pub index_uploaded: bool,
}

impl PublishReport {
    /// True when the catalog itself is online.
    pub fn is_success(&self) -> bool {
        self.catalog_uploaded
    }

    pub fn is_complete(&self) -> bool {
        self.bucket_ready
            && self.policy_set
            && self.catalog_uploaded
            && self.website_configured
            && self.index_uploaded
    }
}

fn step(name: &str, bucket: &str, outcome: common::Result<()>) -> bool {
    match outcome {
        Ok(()) => true,
        Err(e) => {
            error!(bucket, step = name, error = %e, "Publishing step failed");
            false
        }
    }
}

pub async fn publish_catalog(
    storage: &dyn ObjectStorage,
    xml: &str,
    config: &PublishConfig,
) -> PublishReport {
    let bucket = storage.bucket().to_string();
    let mut report = PublishReport::default();

    report.bucket_ready = if config.create_bucket {
        step(
            "create_bucket",
            &bucket,
            storage
                .create_bucket(config.public, &config.location_constraint)
                .await,
        )
    } else {
        true
    };

    report.policy_set = if config.public {
        step(
            "set_public_read_policy",
            &bucket,
            storage.set_public_read_policy().await,
        )
    } else {
        true
    };

    report.catalog_uploaded = step(
        "upload_catalog",
        &bucket,
        storage
            .put_object(&config.file_name, xml.as_bytes(), "application/xml")
            .await,
    );

    report.website_configured = step(
        "configure_static_website",
        &bucket,
        storage
            .configure_static_website(INDEX_DOCUMENT, ERROR_DOCUMENT)
            .await,
    );

    let html = index_html(&config.index_title, &[config.file_name.as_str()]);
    report.index_uploaded = step(
        "upload_index",
        &bucket,
        storage
            .put_object(INDEX_DOCUMENT, html.as_bytes(), "text/html")
            .await,
    );

    info!(
        bucket = %bucket,
        key = %config.file_name,
        complete = report.is_complete(),
        "Finished publishing catalog"
    );

    report
}
