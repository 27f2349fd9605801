mod dcat;
mod record;

pub use dcat::{ContactKind, ContactPoint, Dataset, Distribution};
pub use record::{Maintainer, MetadataRecord, Publication, Resource, ResourceSize, Tag};
