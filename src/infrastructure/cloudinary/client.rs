//! Cloudinary REST client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode, multipart};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use super::config::CloudinaryConfig;
use super::dto::{DeleteResourcesResponse, DestroyResponse, ErrorResponse};
use super::signature::{SignatureAlgorithm, sign};
use crate::domain::entities::{AssetId, BatchDeleteOutcome, DeleteOutcome, UploadedAsset};
use crate::domain::errors::MediaError;
use crate::domain::ports::{MediaHostPort, UploadParams};

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);
const USER_AGENT: &str = concat!("retag/", env!("CARGO_PKG_VERSION"));

/// Authenticated Cloudinary client for one account.
pub struct CloudinaryClient {
    client: Client,
    api_base: String,
    cloud_name: String,
    api_key: String,
    api_secret: Zeroizing<String>,
    signature_algorithm: SignatureAlgorithm,
}

impl CloudinaryClient {
    /// Creates a client from a complete configuration.
    ///
    /// # Errors
    /// Returns [`MediaError::NotConfigured`] if any credential is missing, or
    /// an unexpected error if the HTTP client cannot be built.
    pub fn new(config: &CloudinaryConfig) -> Result<Self, MediaError> {
        let (Some(cloud_name), Some(api_key), Some(api_secret)) = (
            config.cloud_name.as_deref(),
            config.api_key.as_deref(),
            config.api_secret(),
        ) else {
            return Err(MediaError::NotConfigured);
        };

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(UPLOAD_TIMEOUT)
            .build()
            .map_err(|e| MediaError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            cloud_name: cloud_name.to_string(),
            api_key: api_key.to_string(),
            api_secret: Zeroizing::new(api_secret.to_string()),
            signature_algorithm: config.signature_algorithm,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1_1/{}/{path}", self.api_base, self.cloud_name)
    }

    fn timestamp() -> String {
        Utc::now().timestamp().to_string()
    }

    async fn read_error(response: reqwest::Response) -> MediaError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        map_error_response(status, &body)
    }
}

/// Maps a non-success response to a [`MediaError`].
pub(crate) fn map_error_response(status: StatusCode, body: &str) -> MediaError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|error| error.error.message)
        .unwrap_or_else(|_| format!("HTTP {status}"));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            MediaError::rejected(status.as_u16(), format!("credentials rejected: {message}"))
        }
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            MediaError::network("Cloudinary is temporarily unavailable")
        }
        _ => MediaError::rejected(status.as_u16(), message),
    }
}

fn map_transport_error(e: &reqwest::Error) -> MediaError {
    warn!(error = %e, "Failed to reach Cloudinary");
    if e.is_timeout() {
        MediaError::network("request timed out")
    } else if e.is_connect() {
        MediaError::network("failed to connect to Cloudinary")
    } else {
        MediaError::network(e.to_string())
    }
}

/// Parses a 2xx upload response body. Anything that does not describe an
/// asset counts as no result.
pub(crate) fn parse_upload_response(body: &str) -> Result<UploadedAsset, MediaError> {
    let asset: UploadedAsset = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "Upload response did not describe an asset");
        MediaError::NoResult
    })?;

    if asset.public_id.as_str().trim().is_empty() {
        return Err(MediaError::NoResult);
    }

    Ok(asset)
}

pub(crate) fn into_batch_outcome(response: DeleteResourcesResponse) -> BatchDeleteOutcome {
    let results = response
        .deleted
        .into_iter()
        .filter_map(|(id, outcome)| AssetId::new(id).map(|id| (id, DeleteOutcome::from(outcome))))
        .collect();

    BatchDeleteOutcome {
        results,
        partial: response.partial,
    }
}

#[async_trait]
impl MediaHostPort for CloudinaryClient {
    fn is_configured(&self) -> bool {
        !self.api_secret.is_empty()
    }

    async fn upload(
        &self,
        bytes: Vec<u8>,
        params: &UploadParams,
    ) -> Result<UploadedAsset, MediaError> {
        let timestamp = Self::timestamp();
        let public_id = params.public_id.as_deref().unwrap_or_default();
        let signature = sign(
            &[
                ("folder", params.folder.as_str()),
                ("public_id", public_id),
                ("timestamp", timestamp.as_str()),
                ("transformation", params.transformation.as_str()),
            ],
            self.api_secret.as_str(),
            self.signature_algorithm,
        );

        let size = bytes.len();
        let mut form = multipart::Form::new()
            .part("file", multipart::Part::bytes(bytes).file_name("upload"))
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("folder", params.folder.clone());

        if !public_id.is_empty() {
            form = form.text("public_id", public_id.to_string());
        }
        if !params.transformation.is_empty() {
            form = form.text("transformation", params.transformation.clone());
        }

        debug!(
            folder = %params.folder,
            public_id,
            bytes = size,
            "Uploading image to Cloudinary"
        );

        let response = self
            .client
            .post(self.endpoint("image/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        let body = response.text().await.map_err(|e| map_transport_error(&e))?;
        let asset = parse_upload_response(&body)?;

        info!(
            public_id = %asset.public_id,
            width = asset.width,
            height = asset.height,
            bytes = asset.bytes,
            "Image uploaded"
        );

        Ok(asset)
    }

    async fn destroy(&self, id: &AssetId) -> Result<DeleteOutcome, MediaError> {
        let timestamp = Self::timestamp();
        let signature = sign(
            &[("public_id", id.as_str()), ("timestamp", timestamp.as_str())],
            self.api_secret.as_str(),
            self.signature_algorithm,
        );

        debug!(public_id = %id, "Destroying Cloudinary asset");

        let response = self
            .client
            .post(self.endpoint("image/destroy"))
            .form(&[
                ("public_id", id.as_str()),
                ("api_key", self.api_key.as_str()),
                ("timestamp", timestamp.as_str()),
                ("signature", signature.as_str()),
            ])
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        let body: DestroyResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse destroy response");
            MediaError::unexpected(format!("failed to parse response: {e}"))
        })?;

        Ok(DeleteOutcome::from(body.result))
    }

    async fn delete_resources(&self, ids: &[AssetId]) -> Result<BatchDeleteOutcome, MediaError> {
        if ids.is_empty() {
            return Ok(BatchDeleteOutcome::default());
        }

        let query: Vec<(&str, &str)> = ids.iter().map(|id| ("public_ids[]", id.as_str())).collect();

        debug!(count = ids.len(), "Deleting Cloudinary assets");

        let response = self
            .client
            .delete(self.endpoint("resources/image/upload"))
            .basic_auth(&self.api_key, Some(self.api_secret.as_str()))
            .query(&query)
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        let body: DeleteResourcesResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse delete response");
            MediaError::unexpected(format!("failed to parse response: {e}"))
        })?;

        Ok(into_batch_outcome(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CloudinaryConfig {
        CloudinaryConfig::new(
            Some("acct".to_string()),
            Some("key".to_string()),
            Some("secret".to_string()),
        )
    }

    #[test]
    fn test_requires_credentials() {
        let missing_secret =
            CloudinaryConfig::new(Some("acct".to_string()), Some("key".to_string()), None);
        assert!(matches!(
            CloudinaryClient::new(&missing_secret),
            Err(MediaError::NotConfigured)
        ));
        assert!(CloudinaryClient::new(&config()).is_ok());
    }

    #[test]
    fn test_client_keeps_signature_algorithm() {
        let client = CloudinaryClient::new(&config()).unwrap();
        assert_eq!(client.signature_algorithm, SignatureAlgorithm::Sha1);

        let client =
            CloudinaryClient::new(&config().with_signature_algorithm(SignatureAlgorithm::Sha256))
                .unwrap();
        assert_eq!(client.signature_algorithm, SignatureAlgorithm::Sha256);
    }

    #[test]
    fn test_endpoint_uses_api_base() {
        let client =
            CloudinaryClient::new(&config().with_api_base("http://localhost:9000/")).unwrap();
        assert_eq!(
            client.endpoint("image/upload"),
            "http://localhost:9000/v1_1/acct/image/upload"
        );
    }

    #[test]
    fn test_error_message_from_body() {
        let error = map_error_response(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"message":"Invalid image file"}}"#,
        );
        assert!(matches!(
            error,
            MediaError::Rejected { status: 400, ref message } if message == "Invalid image file"
        ));
    }

    #[test]
    fn test_error_without_body() {
        let error = map_error_response(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(matches!(error, MediaError::Rejected { status: 429, .. }));
        assert!(error.is_recoverable());

        let error = map_error_response(StatusCode::SERVICE_UNAVAILABLE, "oops");
        assert!(matches!(error, MediaError::Network { .. }));
    }

    #[test]
    fn test_auth_failure_not_recoverable() {
        let error = map_error_response(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"Invalid Signature"}}"#,
        );
        assert!(!error.is_recoverable());
        assert!(error.to_string().contains("Invalid Signature"));
    }

    #[test]
    fn test_parse_upload_response() {
        let body = r#"{
            "public_id": "retag/products/image_1_0",
            "version": 1712345678,
            "width": 800,
            "height": 600,
            "format": "jpg",
            "resource_type": "image",
            "bytes": 12345,
            "url": "http://res.cloudinary.com/acct/image/upload/v1712345678/retag/products/image_1_0.jpg",
            "secure_url": "https://res.cloudinary.com/acct/image/upload/v1712345678/retag/products/image_1_0.jpg",
            "etag": "abc"
        }"#;

        let asset = parse_upload_response(body).unwrap();
        assert_eq!(asset.public_id.as_str(), "retag/products/image_1_0");
        assert_eq!(asset.width, 800);
        assert_eq!(asset.version, 1_712_345_678);
    }

    #[test]
    fn test_parse_upload_response_without_id_is_no_result() {
        assert!(matches!(
            parse_upload_response(r#"{"secure_url":"x"}"#),
            Err(MediaError::NoResult)
        ));
        assert!(matches!(
            parse_upload_response("not json"),
            Err(MediaError::NoResult)
        ));
    }

    #[test]
    fn test_batch_outcome_mapping() {
        let response: DeleteResourcesResponse = serde_json::from_str(
            r#"{"deleted":{"a":"deleted","b":"not_found"},"partial":true}"#,
        )
        .unwrap();

        let outcome = into_batch_outcome(response);
        assert!(outcome.partial);
        assert_eq!(outcome.deleted_count(), 1);
        assert_eq!(
            outcome.results.get(&AssetId::new("b").unwrap()),
            Some(&DeleteOutcome::NotFound)
        );
    }
}
