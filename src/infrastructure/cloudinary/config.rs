//! Cloudinary account configuration.

use std::fmt;

use zeroize::Zeroizing;

use super::signature::SignatureAlgorithm;

/// Environment variable holding the account (cloud) name.
pub const ENV_CLOUD_NAME: &str = "CLOUDINARY_CLOUD_NAME";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "CLOUDINARY_API_KEY";
/// Environment variable holding the API secret.
pub const ENV_API_SECRET: &str = "CLOUDINARY_API_SECRET";

/// Default REST API base.
pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";
/// Default delivery host.
pub const DEFAULT_CDN_HOST: &str = "res.cloudinary.com";

/// Credentials and endpoints for one Cloudinary account.
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    api_secret: Option<Zeroizing<String>>,
    pub api_base: String,
    pub cdn_host: String,
    pub signature_algorithm: SignatureAlgorithm,
}

impl CloudinaryConfig {
    #[must_use]
    pub fn new(
        cloud_name: Option<String>,
        api_key: Option<String>,
        api_secret: Option<String>,
    ) -> Self {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            cloud_name: non_blank(cloud_name),
            api_key: non_blank(api_key),
            api_secret: non_blank(api_secret).map(Zeroizing::new),
            api_base: DEFAULT_API_BASE.to_string(),
            cdn_host: DEFAULT_CDN_HOST.to_string(),
            signature_algorithm: SignatureAlgorithm::default(),
        }
    }

    /// Reads credentials from the `CLOUDINARY_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(ENV_CLOUD_NAME).ok(),
            std::env::var(ENV_API_KEY).ok(),
            std::env::var(ENV_API_SECRET).ok(),
        )
    }

    /// Uses `cloud_name` when none was found in the environment.
    #[must_use]
    pub fn with_fallback_cloud_name(mut self, cloud_name: Option<&str>) -> Self {
        if self.cloud_name.is_none() {
            self.cloud_name = cloud_name
                .filter(|name| !name.trim().is_empty())
                .map(ToString::to_string);
        }
        self
    }

    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_cdn_host(mut self, cdn_host: impl Into<String>) -> Self {
        self.cdn_host = cdn_host.into().trim_matches('/').to_string();
        self
    }

    #[must_use]
    pub const fn with_signature_algorithm(mut self, algorithm: SignatureAlgorithm) -> Self {
        self.signature_algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn api_secret(&self) -> Option<&str> {
        self.api_secret.as_deref().map(String::as_str)
    }

    /// True when account name, key and secret are all present.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.cloud_name.is_some() && self.api_key.is_some() && self.api_secret.is_some()
    }
}

impl Default for CloudinaryConfig {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

impl fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "********"))
            .field("api_base", &self.api_base)
            .field("cdn_host", &self.cdn_host)
            .field("signature_algorithm", &self.signature_algorithm)
            .finish()
    }
}
