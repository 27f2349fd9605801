use common::config::ApiConfig;
use common::{Error, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, error, info};
use url::Url;

pub const PACKAGE_LIST_PATH: &str = "api/action/current_package_list_with_resources";

/// Client for the source catalog API.
pub struct CatalogClient {
    client: reqwest::Client,
    endpoint: Url,
    sort_by_name: bool,
}

impl CatalogClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base = Url::parse(&format!("{}/", config.host.trim_end_matches('/')))?;
        let endpoint = base.join(PACKAGE_LIST_PATH)?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            endpoint,
            sort_by_name: config.sort_by_name,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches every package with its resources in a single request.
    pub async fn fetch_records(&self) -> Result<Vec<Value>> {
        info!(url = %self.endpoint, "Fetching metadata records");

        let body = self.get_body().await.inspect_err(|e| {
            error!(url = %self.endpoint, error = %e, "Failed to fetch metadata records");
        })?;

        let mut records = parse_package_list(&body)?;
        if self.sort_by_name {
            sort_by_name(&mut records);
        }

        info!(count = records.len(), "Fetched metadata records");
        Ok(records)
    }

    async fn get_body(&self) -> Result<String> {
        let response = self
            .client
            .get(self.endpoint.as_str())
            .send()
            .await?
            .error_for_status()?;

        debug!(status = %response.status(), "Catalog API responded");
        Ok(response.text().await?)
    }
}

/// Extracts the `result` array of a package list response.
pub fn parse_package_list(body: &str) -> Result<Vec<Value>> {
    let mut envelope: Value = serde_json::from_str(body)?;

    match envelope.get_mut("result").map(Value::take) {
        Some(Value::Array(records)) => Ok(records),
        Some(other) => Err(Error::InvalidInput(format!(
            "Expected 'result' to be an array, got {}",
            type_name(&other)
        ))),
        None => Err(Error::InvalidInput(
            "Package list response has no 'result' field".to_string(),
        )),
    }
}

/// Reads a saved package list response from disk.
pub fn read_records(path: &Path, sort: bool) -> Result<Vec<Value>> {
    let body = std::fs::read_to_string(path)?;
    let mut records = parse_package_list(&body)?;
    if sort {
        sort_by_name(&mut records);
    }
    info!(path = %path.display(), count = records.len(), "Read metadata records");
    Ok(records)
}

/// Stable sort by package `name`; packages without one sort first.
pub fn sort_by_name(records: &mut [Value]) {
    records.sort_by(|a, b| {
        let a = a.get("name").and_then(Value::as_str).unwrap_or_default();
        let b = b.get("name").and_then(Value::as_str).unwrap_or_default();
        a.cmp(b)
    });
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_package_list() {
        let body = r#"{"help": "...", "success": true, "result": [{"name": "b"}, {"name": "a"}]}"#;
        let records = parse_package_list(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], "b");
    }

    #[test]
    fn test_parse_package_list_rejects_bad_envelopes() {
        assert!(matches!(parse_package_list("[]"), Err(Error::InvalidInput(_))));
        assert!(matches!(
            parse_package_list(r#"{"result": {"name": "a"}}"#),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(parse_package_list("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_empty_result() {
        assert!(parse_package_list(r#"{"result": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_sort_by_name() {
        let mut records = vec![
            json!({"name": "snow"}),
            json!({"id": 1}),
            json!({"name": "avalanche"}),
        ];
        sort_by_name(&mut records);
        assert_eq!(records[0], json!({"id": 1}));
        assert_eq!(records[1]["name"], "avalanche");
        assert_eq!(records[2]["name"], "snow");
    }

    #[test]
    fn test_endpoint_from_host() {
        let config = ApiConfig {
            host: "https://www.envidat.ch/".to_string(),
            ..ApiConfig::default()
        };
        let client = CatalogClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://www.envidat.ch/api/action/current_package_list_with_resources"
        );
    }

    #[test]
    fn test_invalid_host() {
        let config = ApiConfig {
            host: "not a url".to_string(),
            ..ApiConfig::default()
        };
        assert!(matches!(CatalogClient::new(&config), Err(Error::InvalidUri(_))));
    }
}
