pub mod s3;

use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use common::Result;
use common::config::S3Settings;
use std::sync::Arc;
use tracing::debug;

pub use s3::{ObjectStorage, S3Storage};

#[derive(Clone)]
pub struct S3Config {
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub force_path_style: bool,
}

impl From<&S3Settings> for S3Config {
    fn from(settings: &S3Settings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            region: settings.region.clone(),
            access_key: settings.access_key.clone(),
            secret_key: settings.secret_key.clone(),
            force_path_style: settings.force_path_style,
        }
    }
}

#[derive(Clone)]
pub struct S3Manager {
    pub config: S3Config,
}

impl S3Manager {
    pub fn new(config: S3Config) -> Self {
        Self { config }
    }

    /// Builds an S3 client. A configured key pair is used as static
    /// credentials; otherwise the AWS default provider chain applies.
    pub async fn client(&self) -> Result<Arc<S3Client>> {
        let region = Region::new(self.config.region.clone());

        let mut builder = match (&self.config.access_key, &self.config.secret_key) {
            (Some(access_key), Some(secret_key)) => {
                debug!("Using static S3 credentials");
                let credentials = Credentials::new(access_key, secret_key, None, None, "static");
                aws_sdk_s3::Config::builder()
                    .behavior_version(BehaviorVersion::latest())
                    .credentials_provider(credentials)
                    .region(region)
            }
            _ => {
                debug!("Using default AWS credential chain");
                let shared = aws_config::defaults(BehaviorVersion::latest())
                    .region(region)
                    .load()
                    .await;
                aws_sdk_s3::config::Builder::from(&shared)
            }
        };

        if let Some(endpoint) = &self.config.endpoint {
            debug!(%endpoint, "Using custom S3 endpoint");
            builder = builder.endpoint_url(endpoint);
        }

        let s3_config = builder.force_path_style(self.config.force_path_style).build();
        Ok(Arc::new(S3Client::from_conf(s3_config)))
    }
}
