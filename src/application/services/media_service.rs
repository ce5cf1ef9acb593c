//! Upload and deletion of product images on the media host.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, error, info, instrument};

use crate::domain::entities::{
    AssetId, BatchDeleteOutcome, DEFAULT_UPLOAD_FOLDER, DeleteOutcome, ImageFormat, Quality,
    UploadOptions, UploadedAsset,
};
use crate::domain::errors::MediaError;
use crate::domain::ports::{MediaHostPort, UploadParams};

/// Maximum handles the host accepts in one bulk delete request.
pub const MAX_DELETE_BATCH: usize = 100;

/// Application-facing wrapper over the media host.
///
/// Uploads are never retried here; retry policy belongs to the caller.
#[derive(Clone)]
pub struct MediaService {
    host: Arc<dyn MediaHostPort>,
}

impl MediaService {
    #[must_use]
    pub fn new(host: Arc<dyn MediaHostPort>) -> Self {
        Self { host }
    }

    /// Whether upload and delete operations can be used at all.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.host.is_configured()
    }

    /// Resolves caller options against the upload defaults
    /// (product folder, `auto:good` quality, automatic format).
    #[must_use]
    pub fn resolve_params(options: &UploadOptions) -> UploadParams {
        let mut incoming = options.resize.clone();
        incoming.quality = Some(options.quality.unwrap_or(Quality::AutoGood));
        incoming.format = Some(options.format.unwrap_or(ImageFormat::Auto));

        let mut directives = incoming.directives();
        directives.extend(
            options
                .transformation
                .iter()
                .filter(|directive| !directive.trim().is_empty())
                .cloned(),
        );

        UploadParams {
            folder: options
                .folder
                .clone()
                .filter(|folder| !folder.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_UPLOAD_FOLDER.to_string()),
            public_id: options.public_id.clone(),
            transformation: directives.join(","),
        }
    }

    /// Uploads one file.
    ///
    /// # Errors
    /// Returns error if the bytes are empty or the host rejects the upload.
    #[instrument(skip(self, bytes, options), fields(size = bytes.len()))]
    pub async fn upload_asset(
        &self,
        bytes: Vec<u8>,
        options: UploadOptions,
    ) -> Result<UploadedAsset, MediaError> {
        if bytes.is_empty() {
            return Err(MediaError::invalid_input("cannot upload an empty file"));
        }

        let params = Self::resolve_params(&options);
        debug!(folder = %params.folder, transformation = %params.transformation, "Uploading asset");

        match self.host.upload(bytes, &params).await {
            Ok(asset) => {
                info!(public_id = %asset.public_id, bytes = asset.bytes, "Asset uploaded");
                Ok(asset)
            }
            Err(e) => {
                error!(error = %e, "Media host upload error");
                Err(e)
            }
        }
    }

    /// Uploads every file concurrently and waits for all of them.
    ///
    /// Each upload runs as its own task and is never cancelled because a
    /// sibling failed. If any upload fails the whole call fails with the
    /// first failure in input order; successful uploads are not reported.
    ///
    /// # Errors
    /// Returns the first upload error.
    #[instrument(skip(self, files, options), fields(count = files.len()))]
    pub async fn upload_many(
        &self,
        files: Vec<Vec<u8>>,
        options: UploadOptions,
    ) -> Result<Vec<UploadedAsset>, MediaError> {
        if files.is_empty() {
            return Ok(Vec::new());
        }
        if files.iter().any(Vec::is_empty) {
            return Err(MediaError::invalid_input("cannot upload an empty file"));
        }

        let batch_stamp = chrono::Utc::now().timestamp_millis();

        let handles: Vec<_> = files
            .into_iter()
            .enumerate()
            .map(|(index, bytes)| {
                let file_options = options
                    .clone()
                    .public_id(format!("image_{batch_stamp}_{index}"));
                let params = Self::resolve_params(&file_options);
                let host = Arc::clone(&self.host);

                tokio::spawn(async move { host.upload(bytes, &params).await })
            })
            .collect();

        let total = handles.len();
        let mut uploaded = Vec::with_capacity(total);
        let mut first_error = None;

        for (index, joined) in join_all(handles).await.into_iter().enumerate() {
            let result = joined.unwrap_or_else(|e| {
                Err(MediaError::unexpected(format!("upload task failed: {e}")))
            });

            match result {
                Ok(asset) => uploaded.push(asset),
                Err(e) => {
                    error!(index, error = %e, "Upload in batch failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        info!(count = total, "Batch uploaded");
        Ok(uploaded)
    }

    /// Deletes one asset.
    ///
    /// # Errors
    /// Returns error if the host rejects the deletion.
    #[instrument(skip(self), fields(public_id = %id))]
    pub async fn delete_asset(&self, id: &AssetId) -> Result<DeleteOutcome, MediaError> {
        match self.host.destroy(id).await {
            Ok(outcome) => {
                info!(outcome = %outcome, "Asset deletion processed");
                Ok(outcome)
            }
            Err(e) => {
                error!(error = %e, "Error deleting image from media host");
                Err(e)
            }
        }
    }

    /// Deletes several assets, splitting into host-sized batches.
    ///
    /// # Errors
    /// Returns the first batch error; earlier batches stay deleted.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn delete_many(&self, ids: &[AssetId]) -> Result<BatchDeleteOutcome, MediaError> {
        let mut outcome = BatchDeleteOutcome::default();

        for chunk in ids.chunks(MAX_DELETE_BATCH) {
            match self.host.delete_resources(chunk).await {
                Ok(batch) => {
                    outcome.partial |= batch.partial;
                    outcome.results.extend(batch.results);
                }
                Err(e) => {
                    error!(error = %e, "Error deleting multiple images from media host");
                    return Err(e);
                }
            }
        }

        info!(
            requested = ids.len(),
            deleted = outcome.deleted_count(),
            "Bulk deletion processed"
        );
        Ok(outcome)
    }
}
