use aws_sdk_s3::{
    Client,
    config::{BehaviorVersion, Credentials, Region},
    primitives::ByteStream,
};
use bytes::Bytes;
use tracing::instrument;

use crate::domain::{
    common::{ObjectStorageConfig, entities::app_errors::CoreError},
    label_analysis::ports::LabelImageStorage,
};

/// Label photo storage on an S3-compatible endpoint.
#[derive(Clone)]
pub struct MinioLabelImageStorage {
    client: Client,
    bucket: String,
}

impl MinioLabelImageStorage {
    pub fn new(config: &ObjectStorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "nutriscan",
        );

        let endpoint = config.endpoint.trim_end_matches('/');
        let endpoint = if endpoint.contains("://") {
            endpoint.to_string()
        } else if config.use_ssl {
            format!("https://{endpoint}")
        } else {
            format!("http://{endpoint}")
        };

        tracing::info!(
            endpoint = %endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing MinIO client"
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(endpoint)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }
}

impl LabelImageStorage for MinioLabelImageStorage {
    #[instrument(skip(self, payload), fields(bucket = %self.bucket))]
    async fn put_object(
        &self,
        object_key: String,
        payload: Bytes,
        content_type: String,
    ) -> Result<(), CoreError> {
        let payload_size = payload.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .content_type(&content_type)
            .body(ByteStream::from(payload))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    object_key = %object_key,
                    payload_size = payload_size,
                    "Failed to upload label image"
                );
                CoreError::ObjectStorageError(format!("Failed to upload label image: {}", e))
            })?;

        tracing::info!(object_key = %object_key, size = payload_size, "Label image stored");

        Ok(())
    }
}
