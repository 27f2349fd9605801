/// DCAT-AP view of one metadata record, ready for serialisation.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub landing_page: String,
    pub identifier: String,
    pub title: String,
    pub description: String,
    pub issued: Option<String>,
    pub modified: Option<String>,
    pub publisher: String,
    pub contact_points: Vec<ContactPoint>,
    pub theme: String,
    pub language: String,
    pub keywords: Vec<String>,
    pub distributions: Vec<Distribution>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Individual,
    Organization,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactPoint {
    pub kind: ContactKind,
    pub name: String,
    /// `mailto:` URI.
    pub email: String,
}

/// DCAT-AP view of one resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub page_url: String,
    pub identifier: String,
    pub title: String,
    pub description: String,
    pub issued: String,
    pub modified: String,
    pub language: String,
    pub access_url: String,
    pub rights: &'static str,
    pub byte_size: u64,
    pub media_type: Option<String>,
    pub format: Option<String>,
}
