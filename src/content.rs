//! Content document loading.
//!
//! The whole site is driven by one JSON document, read once per build:
//!
//! ```json
//! {
//!   "portfolio": {
//!     "categories": [{ "slug": "weddings", "name": "Weddings" }],
//!     "images": [
//!       { "src": "assets/gallery/01.jpg", "title": "First Light",
//!         "category": "weddings", "aspectRatio": "landscape" }
//!     ]
//!   },
//!   "testimonials": [{ "quote": "...", "name": "Jo", "role": "Bride" }],
//!   "recentEvents": [{ "src": "...", "title": "...", "category": "...", "aspectRatio": "4/5" }],
//!   "socialProof": { "publications": [], "awards": [], "clients": [] }
//! }
//! ```
//!
//! Every top-level field is optional. A missing region is skipped at render
//! time; only an unreadable or malformed document is an error.

use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Headline shown to visitors when the document cannot be loaded.
pub const LOAD_FAILURE_MESSAGE: &str =
    "Unable to load portfolio content. Please try refreshing the page.";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to load portfolio data: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to load portfolio data: {0}")]
    Json(#[from] serde_json::Error),
}

impl ContentError {
    /// Detail line for the in-page error region.
    pub fn details(&self) -> String {
        self.to_string()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDocument {
    #[serde(default)]
    pub portfolio: Option<Portfolio>,
    #[serde(default)]
    pub testimonials: Option<Vec<Testimonial>>,
    #[serde(default)]
    pub recent_events: Option<Vec<Event>>,
    #[serde(default)]
    pub social_proof: Option<SocialProof>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Portfolio {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub images: Option<Vec<GalleryImage>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    pub slug: String,
    pub name: String,
}

/// Orientation of a gallery tile. Drives the CSS class and intrinsic size.
///
/// Missing, `null` or empty values are portrait. Any other unrecognised
/// value is kept and sized as portrait rather than failing the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
    Square,
    Other(String),
}

impl Orientation {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "portrait" => Orientation::Portrait,
            "landscape" => Orientation::Landscape,
            "square" => Orientation::Square,
            other => Orientation::Other(other.to_string()),
        }
    }

    /// Class for the tile. Unknown values pass through when they form a
    /// single class token.
    pub fn css_class(&self) -> &str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
            Orientation::Square => "square",
            Orientation::Other(value)
                if value
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') =>
            {
                value
            }
            Orientation::Other(_) => "portrait",
        }
    }
}

impl<'de> Deserialize<'de> for Orientation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        let orientation = value.as_deref().map_or(Orientation::Portrait, Orientation::parse);
        if let Orientation::Other(raw) = &orientation {
            tracing::warn!(aspect_ratio = %raw, "unknown gallery aspect ratio; sizing as portrait");
        }
        Ok(orientation)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub aspect_ratio: Orientation,
}

impl GalleryImage {
    /// `alt`, then `title`, then empty.
    pub fn alt_text(&self) -> &str {
        self.alt
            .as_deref()
            .filter(|a| !a.is_empty())
            .or(self.title.as_deref())
            .unwrap_or("")
    }

    /// Intrinsic `(width, height)` written on the `<img>` to reserve layout space.
    pub fn dimensions(&self) -> (u32, u32) {
        match self.aspect_ratio {
            Orientation::Landscape => (800, 600),
            Orientation::Square => (800, 800),
            Orientation::Portrait | Orientation::Other(_) => (800, 1000),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
    pub title: String,
    #[serde(default)]
    pub category: String,
    /// Free-form CSS aspect ratio such as `"4/5"`.
    #[serde(default)]
    pub aspect_ratio: Option<String>,
}

impl Event {
    pub fn alt_text(&self) -> &str {
        self.alt
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(self.title.as_str())
    }

    /// Inline style for the image, if the aspect ratio is safe to emit.
    pub fn aspect_style(&self) -> Option<String> {
        let ratio = self.aspect_ratio.as_deref()?.trim();
        let valid = !ratio.is_empty()
            && ratio
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '/' | '.' | ' '));
        if !valid {
            tracing::warn!(event = %self.title, ratio, "ignoring invalid event aspect ratio");
            return None;
        }
        Some(format!("aspect-ratio: {ratio};"))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SocialProof {
    #[serde(default)]
    pub publications: Option<Vec<String>>,
    #[serde(default)]
    pub awards: Option<Vec<String>>,
    #[serde(default)]
    pub clients: Option<Vec<String>>,
}

impl PortfolioDocument {
    pub fn categories(&self) -> &[Category] {
        self.portfolio
            .as_ref()
            .map(|p| p.categories.as_slice())
            .unwrap_or(&[])
    }

    /// Gallery images, or `None` when the document has no `portfolio.images`.
    pub fn images(&self) -> Option<&[GalleryImage]> {
        self.portfolio.as_ref()?.images.as_deref()
    }

    /// Display name for a category slug, falling back to the slug itself.
    pub fn category_name<'a>(&'a self, slug: &'a str) -> &'a str {
        self.categories()
            .iter()
            .find(|c| c.slug == slug)
            .map(|c| c.name.as_str())
            .unwrap_or(slug)
    }
}

/// Parse a content document from a JSON string.
pub fn parse_document(json: &str) -> Result<PortfolioDocument, ContentError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse the content document at `path`.
pub fn load_document(path: &Path) -> Result<PortfolioDocument, ContentError> {
    let raw = fs::read_to_string(path)?;
    let document = parse_document(&raw)?;
    tracing::debug!(
        path = %path.display(),
        images = document.images().map_or(0, <[_]>::len),
        "loaded content document"
    );
    Ok(document)
}
