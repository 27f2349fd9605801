use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use tracing::debug;

/// Plain environment variables the deployment already sets, mapped onto
/// their configuration keys. They override file and `APP_` values.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("API_URL", "api.host"),
    ("AWS_ENDPOINT", "s3.endpoint"),
    ("AWS_ACCESS_KEY", "s3.access_key"),
    ("AWS_SECRET_KEY", "s3.secret_key"),
    ("AWS_REGION", "s3.region"),
    ("AWS_BUCKET_NAME", "publish.bucket"),
    ("LOG_LEVEL", "logging.level"),
];

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub api: ApiConfig,
    pub dcat: DcatConfig,
    pub s3: S3Settings,
    pub publish: PublishConfig,
    pub logging: LoggingConfig,
}

/// Source catalog API. Handed to the HTTP client constructor as-is.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub user_agent: String,
    pub sort_by_name: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "https://www.envidat.ch".to_string(),
            user_agent: concat!("opendataswiss/", env!("CARGO_PKG_VERSION")).to_string(),
            sort_by_name: true,
        }
    }
}

/// Settings for the DCAT-AP mapping itself.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DcatConfig {
    /// Public site the landing and resource page URLs point at.
    pub site_url: String,
}

impl Default for DcatConfig {
    fn default() -> Self {
        Self {
            site_url: "https://www.envidat.ch".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct S3Settings {
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub force_path_style: bool,
}

impl Default for S3Settings {
    fn default() -> Self {
        Self {
            endpoint: None,
            region: "us-east-1".to_string(),
            access_key: None,
            secret_key: None,
            force_path_style: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PublishConfig {
    pub bucket: String,
    pub file_name: String,
    pub index_title: String,
    pub create_bucket: bool,
    pub public: bool,
    pub location_constraint: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            bucket: "opendataswiss".to_string(),
            file_name: "dcat-ap-ch.xml".to_string(),
            index_title: "EnviDat OpenDataSwiss XML".to_string(),
            create_bucket: true,
            public: true,
            location_constraint: "zh".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Loads settings from an optional TOML file, `APP_` prefixed variables
    /// (`APP_S3__ENDPOINT`) and the legacy deployment variables.
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder().add_source(File::with_name(path).required(false));
        Self::from_builder(builder, |name| std::env::var(name).ok())
    }

    fn from_builder<F>(builder: ConfigBuilder<DefaultState>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        );

        for &(var, key) in LEGACY_ENV {
            builder = builder.set_override_option(key, lookup(var))?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;

        debug!(
            api_host = %settings.api.host,
            bucket = %settings.publish.bucket,
            s3_endpoint = ?settings.s3.endpoint,
            "Loaded settings"
        );

        Ok(settings)
    }
}
