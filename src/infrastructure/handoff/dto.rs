use serde::Deserialize;

/// Body returned by the QR-token endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrTokenResponse {
    pub qr_token: String,
}

/// Error body returned by the storefront API.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(alias = "error")]
    pub message: String,
}
