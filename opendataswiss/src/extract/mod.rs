mod client;

pub use client::{CatalogClient, PACKAGE_LIST_PATH, parse_package_list, read_records, sort_by_name};
