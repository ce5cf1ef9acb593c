//! Image transformation options for CDN delivery.

use std::fmt;
use std::num::NonZeroU32;

/// Crop modes understood by the CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Crop {
    Fill,
    Fit,
    Limit,
    Pad,
    Scale,
    Crop,
    Thumb,
}

impl Crop {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Fit => "fit",
            Self::Limit => "limit",
            Self::Pad => "pad",
            Self::Scale => "scale",
            Self::Crop => "crop",
            Self::Thumb => "thumb",
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery quality: one of the automatic levels or an explicit 1-100 value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Auto,
    AutoBest,
    AutoGood,
    AutoEco,
    AutoLow,
    Level(u8),
}

impl Quality {
    /// Explicit quality level; `None` outside 1..=100.
    #[must_use]
    pub const fn level(value: u8) -> Option<Self> {
        if value >= 1 && value <= 100 {
            Some(Self::Level(value))
        } else {
            None
        }
    }

    /// Parses `auto`, `auto:<level>` or a number.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "auto" => Some(Self::Auto),
            "auto:best" => Some(Self::AutoBest),
            "auto:good" => Some(Self::AutoGood),
            "auto:eco" => Some(Self::AutoEco),
            "auto:low" => Some(Self::AutoLow),
            other => other.parse::<u8>().ok().and_then(Self::level),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::AutoBest => f.write_str("auto:best"),
            Self::AutoGood => f.write_str("auto:good"),
            Self::AutoEco => f.write_str("auto:eco"),
            Self::AutoLow => f.write_str("auto:low"),
            Self::Level(value) => write!(f, "{value}"),
        }
    }
}

impl std::str::FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid quality '{s}', expected auto[:level] or 1-100"))
    }
}

/// Delivery format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ImageFormat {
    Auto,
    Webp,
    Avif,
    Jpg,
    Png,
    Gif,
}

impl ImageFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Webp => "webp",
            Self::Avif => "avif",
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Focal point used when cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Gravity {
    Auto,
    Center,
    Face,
    Faces,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Gravity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Center => "center",
            Self::Face => "face",
            Self::Faces => "faces",
            Self::North => "north",
            Self::NorthEast => "north_east",
            Self::East => "east",
            Self::SouthEast => "south_east",
            Self::South => "south",
            Self::SouthWest => "south_west",
            Self::West => "west",
            Self::NorthWest => "north_west",
        }
    }
}

impl fmt::Display for Gravity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of transformations applied to a delivered image.
///
/// Every field is optional; omitted fields produce no directive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ImageOptions {
    pub width: Option<NonZeroU32>,
    pub height: Option<NonZeroU32>,
    pub crop: Option<Crop>,
    pub quality: Option<Quality>,
    pub format: Option<ImageFormat>,
    pub gravity: Option<Gravity>,
    pub flags: Option<String>,
}

impl ImageOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the width; zero clears it.
    #[must_use]
    pub const fn width(mut self, width: u32) -> Self {
        self.width = NonZeroU32::new(width);
        self
    }

    /// Sets the height; zero clears it.
    #[must_use]
    pub const fn height(mut self, height: u32) -> Self {
        self.height = NonZeroU32::new(height);
        self
    }

    #[must_use]
    pub const fn size(self, width: u32, height: u32) -> Self {
        self.width(width).height(height)
    }

    #[must_use]
    pub const fn crop(mut self, crop: Crop) -> Self {
        self.crop = Some(crop);
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
    pub const fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = Some(gravity);
        self
    }

    #[must_use]
    pub fn flags(mut self, flags: impl Into<String>) -> Self {
        self.flags = Some(flags.into()).filter(|f: &String| !f.is_empty());
        self
    }

    /// Renders the transformation directives in their fixed order:
    /// quality, format, dimensions, crop, gravity, flags.
    #[must_use]
    pub fn directives(&self) -> Vec<String> {
        let mut directives = Vec::with_capacity(6);

        if let Some(quality) = self.quality {
            directives.push(format!("q_{quality}"));
        }

        if let Some(format) = self.format {
            directives.push(format!("f_{format}"));
        }

        match (self.width, self.height) {
            (Some(w), Some(h)) => directives.push(format!("w_{w},h_{h}")),
            (Some(w), None) => directives.push(format!("w_{w}")),
            (None, Some(h)) => directives.push(format!("h_{h}")),
            (None, None) => {}
        }

        if let Some(crop) = self.crop {
            directives.push(format!("c_{crop}"));
        }

        if let Some(gravity) = self.gravity {
            directives.push(format!("g_{gravity}"));
        }

        if let Some(flags) = &self.flags {
            directives.push(format!("fl_{flags}"));
        }

        directives
    }

    /// Directives joined into a single path segment; empty when none apply.
    #[must_use]
    pub fn transformation(&self) -> String {
        self.directives().join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_order_is_fixed() {
        let options = ImageOptions::new()
            .gravity(Gravity::Center)
            .crop(Crop::Fill)
            .size(400, 300)
            .format(ImageFormat::Auto)
            .quality(Quality::AutoGood);

        assert_eq!(
            options.transformation(),
            "q_auto:good,f_auto,w_400,h_300,c_fill,g_center"
        );
    }

    #[test]
    fn test_single_dimension() {
        assert_eq!(ImageOptions::new().width(640).transformation(), "w_640");
        assert_eq!(ImageOptions::new().height(480).transformation(), "h_480");
    }

    #[test]
    fn test_zero_dimension_is_omitted() {
        let options = ImageOptions::new().width(0).height(100);
        assert_eq!(options.transformation(), "h_100");
    }

    #[test]
    fn test_empty_options_render_nothing() {
        assert!(ImageOptions::new().directives().is_empty());
        assert_eq!(ImageOptions::new().transformation(), "");
    }

    #[test]
    fn test_quality_parsing() {
        assert_eq!(Quality::parse("auto:eco"), Some(Quality::AutoEco));
        assert_eq!(Quality::parse("80"), Some(Quality::Level(80)));
        assert_eq!(Quality::parse("0"), None);
        assert_eq!(Quality::parse("101"), None);
        assert_eq!(Quality::parse("auto:meh"), None);
    }

    #[test]
    fn test_numeric_quality_renders_bare() {
        let options = ImageOptions::new().quality(Quality::Level(75));
        assert_eq!(options.transformation(), "q_75");
    }

    #[test]
    fn test_compass_gravity_uses_underscores() {
        let options = ImageOptions::new().gravity(Gravity::NorthEast);
        assert_eq!(options.transformation(), "g_north_east");
    }

    #[test]
    fn test_flags_render_last() {
        let options = ImageOptions::new().flags("progressive").quality(Quality::Auto);
        assert_eq!(options.transformation(), "q_auto,fl_progressive");
    }
}
