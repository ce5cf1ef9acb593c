//! Media host port definition.

use async_trait::async_trait;

use crate::domain::entities::{AssetId, BatchDeleteOutcome, DeleteOutcome, UploadedAsset};
use crate::domain::errors::MediaError;

/// Fully resolved parameters for one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadParams {
    pub folder: String,
    pub public_id: Option<String>,
    /// Incoming transformation, already rendered as comma-joined directives.
    pub transformation: String,
}

/// Port for the external media host.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaHostPort: Send + Sync {
    /// Whether credentials for the host are present.
    fn is_configured(&self) -> bool;

    /// Sends raw bytes to the host's ingestion endpoint.
    async fn upload(&self, bytes: Vec<u8>, params: &UploadParams)
    -> Result<UploadedAsset, MediaError>;

    /// Deletes a single asset.
    async fn destroy(&self, id: &AssetId) -> Result<DeleteOutcome, MediaError>;

    /// Deletes several assets in one request.
    async fn delete_resources(&self, ids: &[AssetId]) -> Result<BatchDeleteOutcome, MediaError>;
}
