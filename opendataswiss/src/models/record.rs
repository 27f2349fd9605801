use common::{Error, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// One package as returned by `current_package_list_with_resources`.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataRecord {
    pub name: String,
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub metadata_created: Option<String>,
    #[serde(default)]
    pub metadata_modified: Option<String>,
    /// JSON-encoded [`Publication`].
    #[serde(default)]
    pub publication: Option<String>,
    /// JSON-encoded [`Maintainer`].
    #[serde(default)]
    pub maintainer: Option<String>,
    #[serde(default)]
    pub license_id: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
    #[serde(default)]
    pub resources: Option<Vec<Resource>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub created: String,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub metadata_modified: Option<String>,
    /// Byte count, either a number or a numeric string.
    #[serde(default)]
    pub size: Option<Value>,
    /// JSON-encoded [`ResourceSize`].
    #[serde(default)]
    pub resource_size: Option<String>,
    #[serde(default)]
    pub mimetype: Option<String>,
    #[serde(default)]
    pub mimetype_inner: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Publication {
    #[serde(default)]
    pub publisher: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Maintainer {
    pub name: String,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceSize {
    #[serde(default)]
    pub size_value: Option<Value>,
    #[serde(default)]
    pub size_units: Option<String>,
}

impl MetadataRecord {
    /// Parses one raw package. Fails when `name`, `id` or `title` is missing
    /// or when a resource lacks its mandatory fields.
    pub fn from_value(raw: &Value) -> Result<Self> {
        for field in ["name", "id", "title"] {
            if raw.get(field).is_none_or(Value::is_null) {
                return Err(Error::MissingField(field.to_string()));
            }
        }
        Ok(Self::deserialize(raw)?)
    }

    /// Decodes the embedded `publication` string. An absent field is an
    /// empty publication.
    pub fn publication(&self) -> Result<Publication> {
        match non_empty(self.publication.as_deref()) {
            Some(raw) => parse_embedded("publication", raw),
            None => Ok(Publication::default()),
        }
    }

    /// Decodes the embedded `maintainer` string, which every record must carry.
    pub fn maintainer(&self) -> Result<Maintainer> {
        let raw = non_empty(self.maintainer.as_deref())
            .ok_or_else(|| Error::MissingField("maintainer".to_string()))?;
        parse_embedded("maintainer", raw)
    }

    pub fn tags(&self) -> &[Tag] {
        self.tags.as_deref().unwrap_or_default()
    }

    pub fn resources(&self) -> &[Resource] {
        self.resources.as_deref().unwrap_or_default()
    }
}

impl Resource {
    pub fn resource_size(&self) -> Option<Result<ResourceSize>> {
        non_empty(self.resource_size.as_deref()).map(|raw| parse_embedded("resource_size", raw))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

fn parse_embedded<T: DeserializeOwned>(field: &'static str, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|source| Error::EmbeddedJson { field, source })
}
