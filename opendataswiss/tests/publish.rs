use async_trait::async_trait;
use common::config::PublishConfig;
use common::{Error, Result};
use opendataswiss::publish::{PublishReport, publish_catalog};
use opendataswiss::storage::ObjectStorage;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory bucket recording every call.
#[derive(Default)]
struct MemoryStorage {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    calls: Mutex<Vec<String>>,
    fail: Vec<&'static str>,
}

impl MemoryStorage {
    fn failing(fail: Vec<&'static str>) -> Self {
        Self {
            fail,
            ..Self::default()
        }
    }

    fn call(&self, name: &str) -> Result<()> {
        self.calls.lock().unwrap().push(name.to_string());
        if self.fail.iter().any(|f| *f == name) {
            return Err(Error::Storage(format!("{} refused", name)));
        }
        Ok(())
    }

    fn object(&self, key: &str) -> Option<(String, String)> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|(data, content_type)| {
                (String::from_utf8(data.clone()).unwrap(), content_type.clone())
            })
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    fn bucket(&self) -> &str {
        "opendataswiss"
    }

    async fn create_bucket(&self, _public: bool, _location: &str) -> Result<()> {
        self.call("create_bucket")
    }

    async fn set_public_read_policy(&self) -> Result<()> {
        self.call("set_public_read_policy")
    }

    async fn configure_static_website(&self, _index: &str, _error: &str) -> Result<()> {
        self.call("configure_static_website")
    }

    async fn put_object(&self, key: &str, data: &[u8], content_type: &str) -> Result<()> {
        self.call(&format!("put_object:{}", key))?;
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (data.to_vec(), content_type.to_string()));
        Ok(())
    }
}

const XML: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<rdf:RDF/>\n";

#[tokio::test]
async fn test_publish_all_steps() {
    let storage = MemoryStorage::default();
    let report = publish_catalog(&storage, XML, &PublishConfig::default()).await;

    assert!(report.is_success());
    assert!(report.is_complete());
    assert_eq!(
        *storage.calls.lock().unwrap(),
        vec![
            "create_bucket",
            "set_public_read_policy",
            "put_object:dcat-ap-ch.xml",
            "configure_static_website",
            "put_object:index.html",
        ]
    );

    let (catalog, content_type) = storage.object("dcat-ap-ch.xml").unwrap();
    assert_eq!(catalog, XML);
    assert_eq!(content_type, "application/xml");

    let (index, content_type) = storage.object("index.html").unwrap();
    assert!(index.contains("<a href=\"dcat-ap-ch.xml\">"));
    assert!(index.contains("EnviDat OpenDataSwiss XML"));
    assert_eq!(content_type, "text/html");
}

#[tokio::test]
async fn test_failed_steps_do_not_stop_publishing() {
    let storage = MemoryStorage::failing(vec!["create_bucket", "configure_static_website"]);
    let report = publish_catalog(&storage, XML, &PublishConfig::default()).await;

    assert_eq!(
        report,
        PublishReport {
            bucket_ready: false,
            policy_set: true,
            catalog_uploaded: true,
            website_configured: false,
            index_uploaded: true,
        }
    );
    assert!(report.is_success());
    assert!(!report.is_complete());
}

#[tokio::test]
async fn test_failed_catalog_upload_is_reported() {
    let storage = MemoryStorage::failing(vec!["put_object:dcat-ap-ch.xml"]);
    let report = publish_catalog(&storage, XML, &PublishConfig::default()).await;

    assert!(!report.is_success());
    assert!(report.index_uploaded);
    assert!(storage.object("dcat-ap-ch.xml").is_none());
}

#[tokio::test]
async fn test_private_existing_bucket_skips_setup() {
    let storage = MemoryStorage::default();
    let config = PublishConfig {
        create_bucket: false,
        public: false,
        ..PublishConfig::default()
    };
    let report = publish_catalog(&storage, XML, &config).await;

    assert!(report.is_complete());
    let calls = storage.calls.lock().unwrap();
    assert!(!calls.iter().any(|c| c == "create_bucket" || c == "set_public_read_policy"));
}
