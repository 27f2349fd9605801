use crate::models::{ContactKind, ContactPoint, Dataset, MetadataRecord};
use crate::transform::dates::format_optional;
use crate::transform::distribution::distributions;
use crate::transform::keywords::keywords;
use crate::transform::text::clean_text;
use crate::transform::{LANGUAGE, SUPPORT_EMAIL, SUPPORT_NAME, THEME};
use common::Result;
use common::config::DcatConfig;
use serde_json::Value;

/// Parses and maps one raw package.
pub fn convert_record(raw: &Value, config: &DcatConfig) -> Result<Dataset> {
    let record = MetadataRecord::from_value(raw)?;
    map_record(&record, config)
}

pub fn map_record(record: &MetadataRecord, config: &DcatConfig) -> Result<Dataset> {
    let landing_page = format!(
        "{}/#/metadata/{}",
        config.site_url.trim_end_matches('/'),
        record.name
    );

    let issued = format_optional("metadata_created", record.metadata_created.as_deref())?;
    let modified = format_optional("metadata_modified", record.metadata_modified.as_deref())?
        .or_else(|| issued.clone());

    let publisher = record.publication()?.publisher.unwrap_or_default();

    Ok(Dataset {
        identifier: format!("{}@envidat", record.id),
        title: record.title.clone(),
        description: clean_text(record.notes.as_deref().unwrap_or_default()),
        issued,
        modified,
        publisher,
        contact_points: contact_points(record)?,
        theme: THEME.to_string(),
        language: LANGUAGE.to_string(),
        keywords: keywords(record),
        distributions: distributions(record, config)?,
        landing_page,
    })
}

/// The maintainer, followed by central support unless the maintainer already
/// is central support.
fn contact_points(record: &MetadataRecord) -> Result<Vec<ContactPoint>> {
    let maintainer = record.maintainer()?;

    let mut name = String::new();
    let given_name = maintainer.given_name.as_deref().map(str::trim);
    if let Some(given) = given_name.filter(|g| !g.is_empty()) {
        name.push_str(given);
        name.push(' ');
    }
    name.push_str(&maintainer.name);

    let email = maintainer.email.as_deref().unwrap_or_default();
    let individual = ContactPoint {
        kind: ContactKind::Individual,
        name,
        email: format!("mailto:{}", email),
    };

    if email == SUPPORT_EMAIL {
        return Ok(vec![individual]);
    }

    Ok(vec![
        individual,
        ContactPoint {
            kind: ContactKind::Organization,
            name: SUPPORT_NAME.to_string(),
            email: format!("mailto:{}", SUPPORT_EMAIL),
        },
    ])
}
