use crate::storage::S3Manager;
use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::types::{
    BucketCannedAcl, BucketLocationConstraint, CreateBucketConfiguration, ErrorDocument,
    IndexDocument, WebsiteConfiguration,
};
use bytes::Bytes;
use common::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Bucket operations needed to host the catalog as a static website.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    fn bucket(&self) -> &str;
    /// Creates the bucket. An already existing bucket is not an error.
    async fn create_bucket(&self, public: bool, location: &str) -> Result<()>;
    async fn set_public_read_policy(&self) -> Result<()>;
    async fn configure_static_website(&self, index: &str, error: &str) -> Result<()>;
    async fn put_object(&self, key: &str, data: &[u8], content_type: &str) -> Result<()>;
}

pub struct S3Storage {
    bucket: String,
    client: Arc<S3Client>,
}

impl S3Storage {
    pub async fn new(s3_manager: &S3Manager, bucket: &str) -> Result<Self> {
        let client = s3_manager.client().await?;

        Ok(Self {
            client,
            bucket: bucket.to_string(),
        })
    }
}

/// Policy granting anonymous read access to every object in `bucket`.
pub fn public_read_policy(bucket: &str) -> String {
    serde_json::json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Sid": "PublicRead",
            "Effect": "Allow",
            "Principal": "*",
            "Action": ["s3:GetObject"],
            "Resource": [format!("arn:aws:s3:::{}/*", bucket)],
        }],
    })
    .to_string()
}

fn storage_error<E, R>(e: SdkError<E, R>) -> common::Error
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    match e {
        SdkError::ServiceError(err) => common::Error::Storage(err.into_err().to_string()),
        _ => common::Error::Storage(e.to_string()),
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn create_bucket(&self, public: bool, location: &str) -> Result<()> {
        let acl = if public {
            BucketCannedAcl::PublicRead
        } else {
            BucketCannedAcl::Private
        };

        let configuration = CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(location))
            .build();

        debug!(bucket = %self.bucket, "Creating bucket");
        match self
            .client
            .create_bucket()
            .bucket(&self.bucket)
            .acl(acl)
            .create_bucket_configuration(configuration)
            .object_lock_enabled_for_bucket(false)
            .send()
            .await
        {
            Ok(_) => {
                info!(bucket = %self.bucket, "Created bucket");
                Ok(())
            }
            Err(SdkError::ServiceError(err))
                if err.err().is_bucket_already_owned_by_you()
                    || err.err().is_bucket_already_exists() =>
            {
                warn!(bucket = %self.bucket, "Bucket already exists, reusing it");
                Ok(())
            }
            Err(e) => Err(storage_error(e)),
        }
    }

    async fn set_public_read_policy(&self) -> Result<()> {
        self.client
            .put_bucket_policy()
            .bucket(&self.bucket)
            .policy(public_read_policy(&self.bucket))
            .send()
            .await
            .map_err(storage_error)?;

        debug!(bucket = %self.bucket, "Set public read policy");
        Ok(())
    }

    async fn configure_static_website(&self, index: &str, error: &str) -> Result<()> {
        let index_document = IndexDocument::builder()
            .suffix(index)
            .build()
            .map_err(|e| common::Error::Storage(e.to_string()))?;
        let error_document = ErrorDocument::builder()
            .key(error)
            .build()
            .map_err(|e| common::Error::Storage(e.to_string()))?;

        let website = WebsiteConfiguration::builder()
            .index_document(index_document)
            .error_document(error_document)
            .build();

        self.client
            .put_bucket_website()
            .bucket(&self.bucket)
            .website_configuration(website)
            .send()
            .await
            .map_err(storage_error)?;

        debug!(bucket = %self.bucket, "Static website configured");
        Ok(())
    }

    async fn put_object(&self, key: &str, data: &[u8], content_type: &str) -> Result<()> {
        let body = Bytes::copy_from_slice(data);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(body.into())
            .send()
            .await
            .map_err(storage_error)?;

        info!(bucket = %self.bucket, key, "Uploaded object");
        Ok(())
    }
}
