use crate::models::{Distribution, MetadataRecord, Resource};
use crate::transform::dates::{format_date, format_optional};
use crate::transform::license::rights_for;
use crate::transform::size::byte_size;
use crate::transform::text::clean_text;
use crate::transform::LANGUAGE;
use common::Result;
use common::config::DcatConfig;
use tracing::warn;

/// Maps every resource of a record, in order. The first resource whose
/// `created` date cannot be parsed fails the whole list.
pub fn distributions(record: &MetadataRecord, config: &DcatConfig) -> Result<Vec<Distribution>> {
    record
        .resources()
        .iter()
        .map(|resource| map_resource(resource, &record.name, record.license_id.as_deref(), config))
        .collect()
}

pub fn map_resource(
    resource: &Resource,
    record_name: &str,
    license_id: Option<&str>,
    config: &DcatConfig,
) -> Result<Distribution> {
    let issued = format_date("created", &resource.created)?;

    let modified = fallback_date(resource, "last_modified", resource.last_modified.as_deref())
        .or_else(|| {
            fallback_date(resource, "metadata_modified", resource.metadata_modified.as_deref())
        })
        .unwrap_or_else(|| issued.clone());

    let media_type =
        non_empty(&resource.mimetype).or_else(|| non_empty(&resource.mimetype_inner));

    Ok(Distribution {
        page_url: format!(
            "{}/dataset/{}/resource/{}",
            config.site_url.trim_end_matches('/'),
            record_name,
            resource.id
        ),
        identifier: format!("{}.{}", record_name, resource.id),
        title: resource.name.clone().unwrap_or_else(|| resource.id.clone()),
        description: clean_text(resource.description.as_deref().unwrap_or_default()),
        issued,
        modified,
        language: LANGUAGE.to_string(),
        access_url: resource.url.clone().unwrap_or_default(),
        rights: rights_for(license_id),
        byte_size: byte_size(resource),
        media_type,
        format: non_empty(&resource.format),
    })
}

/// One link of the `modified` chain. Unparseable values are logged and
/// skipped so the next link applies.
fn fallback_date(
    resource: &Resource,
    field: &'static str,
    value: Option<&str>,
) -> Option<String> {
    format_optional(field, value).unwrap_or_else(|e| {
        warn!(resource_id = %resource.id, error = %e, "Ignoring unparseable resource date");
        None
    })
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Error;
    use serde_json::{Value, json};

    fn resource(raw: Value) -> Resource {
        serde_json::from_value(raw).unwrap()
    }

    fn full_resource() -> Resource {
        resource(json!({
            "id": "0a1b",
            "name": "snow_depth.csv",
            "description": "## Columns\r\nstation, depth",
            "created": "2019-06-14T08:34:16.498870",
            "last_modified": "2020-01-02T03:04:05",
            "metadata_modified": "2019-07-01T00:00:00",
            "size": 2048,
            "mimetype": "text/csv",
            "mimetype_inner": "text/plain",
            "format": "CSV",
            "url": "https://www.envidat.ch/dataset/snow/resource/0a1b/download/snow_depth.csv"
        }))
    }

    #[test]
    fn test_map_full_resource() {
        let config = DcatConfig::default();
        let d = map_resource(&full_resource(), "snow", Some("cc-by"), &config).unwrap();

        assert_eq!(d.page_url, "https://www.envidat.ch/dataset/snow/resource/0a1b");
        assert_eq!(d.identifier, "snow.0a1b");
        assert_eq!(d.title, "snow_depth.csv");
        assert_eq!(d.description, " Columns\nstation, depth");
        assert_eq!(d.issued, "2019-06-14T08:34:16Z");
        assert_eq!(d.modified, "2020-01-02T03:04:05Z");
        assert_eq!(d.language, "en");
        assert_eq!(
            d.access_url,
            "https://www.envidat.ch/dataset/snow/resource/0a1b/download/snow_depth.csv"
        );
        assert_eq!(d.rights, "NonCommercialAllowed-CommercialAllowed-ReferenceRequired");
        assert_eq!(d.byte_size, 2048);
        assert_eq!(d.media_type.as_deref(), Some("text/csv"));
        assert_eq!(d.format.as_deref(), Some("CSV"));
    }

    #[test]
    fn test_minimal_resource_defaults() {
        let r = resource(json!({"id": "r9", "created": "2019-06-14"}));
        let d = map_resource(&r, "snow", None, &DcatConfig::default()).unwrap();

        assert_eq!(d.title, "r9");
        assert_eq!(d.description, "");
        assert_eq!(d.modified, d.issued);
        assert_eq!(d.rights, "NonCommercialAllowed-CommercialAllowed-ReferenceRequired");
        assert_eq!(d.byte_size, 0);
        assert!(d.media_type.is_none());
        assert!(d.format.is_none());
    }

    #[test]
    fn test_modified_fallback_chain() {
        let r = resource(json!({
            "id": "r9",
            "created": "2019-06-14",
            "metadata_modified": "2019-07-01T10:00:00"
        }));
        let d = map_resource(&r, "snow", None, &DcatConfig::default()).unwrap();
        assert_eq!(d.modified, "2019-07-01T10:00:00Z");
    }

    #[test]
    fn test_inner_mimetype_and_rights_lookup() {
        let r = resource(json!({
            "id": "r9",
            "created": "2019-06-14",
            "mimetype_inner": "application/zip"
        }));
        let d = map_resource(&r, "snow", Some("unknown-license"), &DcatConfig::default()).unwrap();

        assert_eq!(d.media_type.as_deref(), Some("application/zip"));
        assert_eq!(
            d.rights,
            "NonCommercialWithPermission-CommercialWithPermission-ReferenceRequired"
        );
    }

    #[test]
    fn test_unparseable_modified_falls_back() {
        let r = resource(json!({
            "id": "r9",
            "created": "2019-06-14",
            "last_modified": "not-a-date",
            "metadata_modified": "2019-07-01T10:00:00"
        }));
        let d = map_resource(&r, "snow", None, &DcatConfig::default()).unwrap();
        assert_eq!(d.modified, "2019-07-01T10:00:00Z");

        let r = resource(json!({
            "id": "r9",
            "created": "2019-06-14",
            "last_modified": "not-a-date",
            "metadata_modified": "sometime"
        }));
        let d = map_resource(&r, "snow", None, &DcatConfig::default()).unwrap();
        assert_eq!(d.modified, d.issued);
    }

    #[test]
    fn test_empty_mimetype_uses_inner() {
        let r = resource(json!({
            "id": "r9",
            "created": "2019-06-14",
            "mimetype": "",
            "mimetype_inner": "application/zip",
            "format": ""
        }));
        let d = map_resource(&r, "snow", None, &DcatConfig::default()).unwrap();

        assert_eq!(d.media_type.as_deref(), Some("application/zip"));
        assert!(d.format.is_none());
    }

    #[test]
    fn test_unparseable_created_fails() {
        let r = resource(json!({"id": "r9", "created": "not a date"}));
        let err = map_resource(&r, "snow", None, &DcatConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidDate { field: "created", .. }));
    }
}
