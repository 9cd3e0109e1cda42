use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tracing::info;

use crate::config::Config;
use crate::store::{BlobError, BlobStore};

/// `BlobStore` backed by S3 (MinIO locally, AWS in production).
#[derive(Clone)]
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
}

impl S3BlobStore {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// Builds a client from the static credentials and endpoint in `Config`.
    pub async fn from_config(config: &Config) -> Self {
        let credentials = Credentials::new(
            &config.aws_access_key_id,
            &config.aws_secret_access_key,
            None,
            None,
            "dashboard-static",
        );

        let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.s3_region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&config.s3_endpoint)
            .load()
            .await;

        Self::new(aws_sdk_s3::Client::new(&s3_config))
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn remove(&self, bucket: &str, path: &str) -> Result<(), BlobError> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| BlobError {
                bucket: bucket.to_string(),
                path: path.to_string(),
                message: e.to_string(),
            })?;

        info!("Removed s3://{bucket}/{path}");
        Ok(())
    }
}
