//! DCAT-AP (opendata.swiss) mapping of catalog packages.

pub mod catalog;
pub mod dataset;
pub mod dates;
pub mod distribution;
pub mod keywords;
pub mod license;
pub mod size;
pub mod text;

use crate::models::Dataset;
use common::config::DcatConfig;
use serde_json::Value;
use tracing::{error, info};

pub use catalog::catalog_xml;
pub use dataset::{convert_record, map_record};
pub use distribution::map_resource;

pub const LANGUAGE: &str = "en";
pub const THEME: &str = "http://opendata.swiss/themes/education";
pub const SUPPORT_NAME: &str = "EnviDat Support";
pub const SUPPORT_EMAIL: &str = "envidat@wsl.ch";

/// A package that could not be mapped and was left out of the catalog.
#[derive(Debug, Clone)]
pub struct RecordFailure {
    pub index: usize,
    pub name: Option<String>,
    pub reason: String,
}

/// Outcome of converting a whole package list.
#[derive(Debug, Default)]
pub struct CatalogBuild {
    pub datasets: Vec<Dataset>,
    pub failures: Vec<RecordFailure>,
}

impl CatalogBuild {
    pub fn record_outcome(&mut self, index: usize, raw: &Value, outcome: common::Result<Dataset>) {
        match outcome {
            Ok(dataset) => self.datasets.push(dataset),
            Err(e) => {
                error!(
                    index,
                    error = %e,
                    record = %raw,
                    "Failed to convert record, leaving it out of the catalog"
                );
                self.failures.push(RecordFailure {
                    index,
                    name: raw.get("name").and_then(Value::as_str).map(str::to_string),
                    reason: e.to_string(),
                });
            }
        }
    }
}

/// Converts packages one by one in input order. Failing packages are logged
/// and skipped; they never abort the rest.
pub fn convert_records(records: &[Value], config: &DcatConfig) -> CatalogBuild {
    let mut build = CatalogBuild::default();

    for (index, raw) in records.iter().enumerate() {
        build.record_outcome(index, raw, convert_record(raw, config));
    }

    info!(
        converted = build.datasets.len(),
        failed = build.failures.len(),
        "Converted records to DCAT-AP"
    );

    build
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(name: &str, with_maintainer: bool) -> Value {
        let mut raw = json!({
            "name": name,
            "id": format!("id-{}", name),
            "title": name.to_uppercase(),
        });
        if with_maintainer {
            raw["maintainer"] = json!("{\"name\": \"Muster\", \"email\": \"m@wsl.ch\"}");
        }
        raw
    }

    #[test]
    fn test_failed_record_is_skipped() {
        let records = vec![record("one", true), record("two", false), record("three", true)];
        let build = convert_records(&records, &DcatConfig::default());

        let ids: Vec<_> = build.datasets.iter().map(|d| d.identifier.as_str()).collect();
        assert_eq!(ids, vec!["id-one@envidat", "id-three@envidat"]);

        assert_eq!(build.failures.len(), 1);
        assert_eq!(build.failures[0].index, 1);
        assert_eq!(build.failures[0].name.as_deref(), Some("two"));
        assert!(build.failures[0].reason.contains("maintainer"));
    }

    #[test]
    fn test_empty_input() {
        let build = convert_records(&[], &DcatConfig::default());
        assert!(build.datasets.is_empty());
        assert!(build.failures.is_empty());
    }

    #[test]
    fn test_non_object_record_fails_alone() {
        let records = vec![json!("garbage"), record("ok", true)];
        let build = convert_records(&records, &DcatConfig::default());
        assert_eq!(build.datasets.len(), 1);
        assert_eq!(build.failures.len(), 1);
        assert!(build.failures[0].name.is_none());
    }
}
