//! Cloudinary delivery URL construction.
//!
//! URLs follow `https://<cdn-host>/<cloud>/image/upload[/<directives>]/<asset>`.
//! Everything here is string assembly; no request is ever made.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::domain::entities::{Crop, Gravity, ImageFormat, ImageOptions, Quality};

use super::config::DEFAULT_CDN_HOST;

/// Thumbnail edge used when no size is given.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 200;

/// Thumbnail edge used in the responsive set.
pub const RESPONSIVE_THUMBNAIL_SIZE: u32 = 150;

/// Base width used for retina images when none is given.
pub const DEFAULT_RETINA_BASE: u32 = 400;

static VERSIONED_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/v\d+/(.+)\.").expect("versioned path pattern is valid"));

static SLUG_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]+").expect("slug pattern is valid"));

/// Named option bundles for common storefront placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePreset {
    Thumbnail(u32),
    Small,
    Medium,
    Large,
    ProductCard,
    ProductDetail,
    Mobile,
    Retina(u32),
    BlurredPlaceholder,
    Original,
}

impl ImagePreset {
    /// Returns the options this preset stands for.
    #[must_use]
    pub fn options(self) -> ImageOptions {
        let square = |edge: u32, quality: Quality| {
            ImageOptions::new()
                .size(edge, edge)
                .crop(Crop::Fill)
                .quality(quality)
                .format(ImageFormat::Auto)
        };

        match self {
            Self::Thumbnail(size) => square(size, Quality::AutoGood),
            Self::Small => square(400, Quality::AutoGood),
            Self::Medium => square(800, Quality::AutoGood),
            Self::Large => square(1200, Quality::AutoGood),
            Self::ProductCard => square(400, Quality::AutoGood).gravity(Gravity::Center),
            Self::ProductDetail => square(800, Quality::AutoGood).gravity(Gravity::Center),
            Self::Mobile => square(400, Quality::AutoEco).gravity(Gravity::Center),
            Self::Retina(base) => {
                let edge = base.saturating_mul(2);
                square(edge, Quality::AutoGood).gravity(Gravity::Center)
            }
            Self::BlurredPlaceholder => square(50, Quality::AutoLow).gravity(Gravity::Center),
            Self::Original => ImageOptions::new()
                .quality(Quality::AutoGood)
                .format(ImageFormat::Auto),
        }
    }

    /// Parses a preset name such as `thumbnail`, `retina` or `product-card`.
    ///
    /// `size` feeds the thumbnail edge and the retina base width.
    #[must_use]
    pub fn parse(name: &str, size: Option<u32>) -> Option<Self> {
        let preset = match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "thumbnail" | "thumb" => Self::Thumbnail(size.unwrap_or(DEFAULT_THUMBNAIL_SIZE)),
            "small" => Self::Small,
            "medium" => Self::Medium,
            "large" => Self::Large,
            "product-card" | "card" => Self::ProductCard,
            "product-detail" | "detail" => Self::ProductDetail,
            "mobile" => Self::Mobile,
            "retina" => Self::Retina(size.unwrap_or(DEFAULT_RETINA_BASE)),
            "blurred" | "placeholder" | "blurred-placeholder" => Self::BlurredPlaceholder,
            "original" => Self::Original,
            _ => return None,
        };
        Some(preset)
    }
}

/// URLs for the standard responsive breakpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsiveUrls {
    pub thumbnail: String,
    pub small: String,
    pub medium: String,
    pub large: String,
    pub original: String,
}

/// Builds delivery URLs for one Cloudinary account.
#[derive(Debug, Clone)]
pub struct DeliveryUrlBuilder {
    cloud_name: Option<String>,
    cdn_host: String,
}

impl DeliveryUrlBuilder {
    #[must_use]
    pub fn new(cloud_name: Option<String>) -> Self {
        Self {
            cloud_name: cloud_name.filter(|name| !name.trim().is_empty()),
            cdn_host: DEFAULT_CDN_HOST.to_string(),
        }
    }

    #[must_use]
    pub fn with_cdn_host(mut self, cdn_host: impl Into<String>) -> Self {
        self.cdn_host = cdn_host.into().trim_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.cloud_name.is_some()
    }

    /// Builds the delivery URL for `asset_id` with `options` applied.
    ///
    /// Returns `asset_id` unchanged when no cloud name is configured.
    #[must_use]
    pub fn build(&self, asset_id: &str, options: &ImageOptions) -> String {
        let Some(cloud_name) = self.cloud_name.as_deref() else {
            warn!("Cloudinary cloud name not configured");
            return asset_id.to_string();
        };

        if asset_id.is_empty() {
            warn!("Empty asset id passed to delivery url builder");
            return String::new();
        }

        let transformation = options.transformation();
        if transformation.is_empty() {
            format!(
                "https://{}/{cloud_name}/image/upload/{asset_id}",
                self.cdn_host
            )
        } else {
            format!(
                "https://{}/{cloud_name}/image/upload/{transformation}/{asset_id}",
                self.cdn_host
            )
        }
    }

    #[must_use]
    pub fn preset(&self, asset_id: &str, preset: ImagePreset) -> String {
        self.build(asset_id, &preset.options())
    }

    #[must_use]
    pub fn thumbnail(&self, asset_id: &str, size: Option<u32>) -> String {
        self.preset(
            asset_id,
            ImagePreset::Thumbnail(size.unwrap_or(DEFAULT_THUMBNAIL_SIZE)),
        )
    }

    #[must_use]
    pub fn retina(&self, asset_id: &str, base_width: Option<u32>) -> String {
        self.preset(
            asset_id,
            ImagePreset::Retina(base_width.unwrap_or(DEFAULT_RETINA_BASE)),
        )
    }

    #[must_use]
    pub fn responsive_urls(&self, asset_id: &str) -> ResponsiveUrls {
        ResponsiveUrls {
            thumbnail: self.preset(asset_id, ImagePreset::Thumbnail(RESPONSIVE_THUMBNAIL_SIZE)),
            small: self.preset(asset_id, ImagePreset::Small),
            medium: self.preset(asset_id, ImagePreset::Medium),
            large: self.preset(asset_id, ImagePreset::Large),
            original: self.preset(asset_id, ImagePreset::Original),
        }
    }

    /// Like [`Self::build`] but fills `auto:good` quality, automatic format and
    /// `fill` crop where `options` leaves them unset.
    #[must_use]
    pub fn optimized_url(&self, asset_id: &str, options: &ImageOptions) -> String {
        let mut options = options.clone();
        options.quality.get_or_insert(Quality::AutoGood);
        options.format.get_or_insert(ImageFormat::Auto);
        options.crop.get_or_insert(Crop::Fill);
        self.build(asset_id, &options)
    }

    /// Progressive, auto-quality URL for web pages; crops only when both
    /// dimensions are known.
    #[must_use]
    pub fn web_optimized_url(
        &self,
        asset_id: &str,
        width: Option<u32>,
        height: Option<u32>,
    ) -> String {
        let mut options = ImageOptions::new()
            .quality(Quality::AutoGood)
            .format(ImageFormat::Auto)
            .width(width.unwrap_or(0))
            .height(height.unwrap_or(0))
            .flags("progressive");

        if options.width.is_some() && options.height.is_some() {
            options = options.crop(Crop::Fill);
        }

        self.build(asset_id, &options)
    }

    /// Appends a slug of `product_name` to the asset path so the URL reads
    /// as the product. Dimensions and crop follow [`Self::web_optimized_url`].
    #[must_use]
    pub fn seo_friendly_url(
        &self,
        asset_id: &str,
        product_name: &str,
        width: Option<u32>,
        height: Option<u32>,
    ) -> String {
        let slug = product_slug(product_name);
        let mut options = ImageOptions::new()
            .quality(Quality::AutoGood)
            .format(ImageFormat::Auto)
            .width(width.unwrap_or(0))
            .height(height.unwrap_or(0));

        if options.width.is_some() && options.height.is_some() {
            options = options.crop(Crop::Fill);
        }

        self.build(&format!("{asset_id}/{slug}"), &options)
    }
}

/// Lowercases `name` and turns each run of other characters into one `-`.
fn product_slug(name: &str) -> String {
    SLUG_SEPARATOR_RE
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

/// Builds a delivery URL without keeping a builder around.
#[must_use]
pub fn build_image_url(cloud_name: Option<&str>, asset_id: &str, options: &ImageOptions) -> String {
    DeliveryUrlBuilder::new(cloud_name.map(ToString::to_string)).build(asset_id, options)
}

/// Recovers the asset id from a versioned delivery URL
/// (`.../v<digits>/<id>.<ext>`). Returns an empty string when the URL does
/// not have that shape.
#[must_use]
pub fn extract_asset_id(url: &str) -> String {
    VERSIONED_PATH_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Checks if a URL points at Cloudinary.
#[must_use]
pub fn is_cloudinary_url(url: &str) -> bool {
    url.contains("cloudinary.com")
}
