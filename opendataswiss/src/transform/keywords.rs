use crate::models::MetadataRecord;

/// Upper-cased tag display names in source order. A tag without a display
/// name still yields an (empty) keyword.
pub fn keywords(record: &MetadataRecord) -> Vec<String> {
    record
        .tags()
        .iter()
        .map(|tag| tag.display_name.as_deref().unwrap_or_default().to_uppercase())
        .collect()
}
