use std::collections::HashMap;

use serde::Deserialize;

/// Error envelope returned by the Cloudinary API.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Response of `image/destroy`.
#[derive(Debug, Deserialize)]
pub struct DestroyResponse {
    pub result: String,
}

/// Response of the bulk resource delete endpoint.
#[derive(Debug, Deserialize)]
pub struct DeleteResourcesResponse {
    #[serde(default)]
    pub deleted: HashMap<String, String>,
    #[serde(default)]
    pub partial: bool,
}
