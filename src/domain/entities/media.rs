//! Media host assets.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::image_options::{ImageFormat, ImageOptions, Quality};

/// Folder used for product uploads when none is given.
pub const DEFAULT_UPLOAD_FOLDER: &str = "retag/products";

/// Opaque handle the media host assigns to an uploaded asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Creates a handle; `None` when blank.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Metadata returned by the host for a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub public_id: AssetId,
    pub secure_url: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub resource_type: String,
    pub bytes: u64,
    #[serde(default)]
    pub version: u64,
}

/// Result the host reports for deleting one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    Other(String),
}

impl From<String> for DeleteOutcome {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ok" | "deleted" => Self::Deleted,
            "not found" | "not_found" => Self::NotFound,
            _ => Self::Other(value),
        }
    }
}

impl From<DeleteOutcome> for String {
    fn from(value: DeleteOutcome) -> Self {
        match value {
            DeleteOutcome::Deleted => "deleted".to_string(),
            DeleteOutcome::NotFound => "not_found".to_string(),
            DeleteOutcome::Other(other) => other,
        }
    }
}

impl fmt::Display for DeleteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted => f.write_str("deleted"),
            Self::NotFound => f.write_str("not found"),
            Self::Other(other) => f.write_str(other),
        }
    }
}

/// Per-asset results of a bulk delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchDeleteOutcome {
    pub results: BTreeMap<AssetId, DeleteOutcome>,
    /// The host stopped early; call again for the remainder.
    pub partial: bool,
}

impl BatchDeleteOutcome {
    #[must_use]
    pub fn deleted_count(&self) -> usize {
        self.results
            .values()
            .filter(|outcome| **outcome == DeleteOutcome::Deleted)
            .count()
    }
}

/// Caller-facing upload options. Unset fields take the upload defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    pub folder: Option<String>,
    pub public_id: Option<String>,
    pub quality: Option<Quality>,
    pub format: Option<ImageFormat>,
    /// Sizing and cropping applied on ingestion.
    pub resize: ImageOptions,
    /// Extra directives passed through verbatim, after the generated ones.
    pub transformation: Vec<String>,
}

impl UploadOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    #[must_use]
    pub fn public_id(mut self, public_id: impl Into<String>) -> Self {
        self.public_id = Some(public_id.into());
        self
    }

    #[must_use]
    pub const fn quality(mut self, quality: Quality) -> Self {
        self.quality = Some(quality);
        self
    }

    #[must_use]
    pub const fn format(mut self, format: ImageFormat) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn resize(mut self, resize: ImageOptions) -> Self {
        self.resize = resize;
        self
    }

    #[must_use]
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.transformation.push(directive.into());
        self
    }
}
