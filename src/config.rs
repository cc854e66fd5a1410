//! Site configuration module.
//!
//! Handles loading, validating, and merging the `config.toml` that sits next
//! to the content document. Stock defaults are the base layer; the user file
//! overrides only the keys it names.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml              # Site config (optional)
//! ├── about.md                 # About text (markdown, optional)
//! ├── assets/                  # Copied verbatim to the output root
//! └── data/
//!     └── portfolio.json       # Content document
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Portfolio"
//! subtitle = ""
//! hero_image = ""           # Path relative to the output root
//! about = "about.md"        # Markdown file for the about section
//! contact_email = ""        # Omit or leave empty to hide the contact section
//! data_path = "data/portfolio.json"
//!
//! [gallery]
//! default_category = "all"  # Filter applied on first load
//! lightbox = true           # Generate the lightbox overlay and pages
//!
//! [animations]
//! enabled = true            # Scroll reveals, hero entrance, parallax
//! duration_scale = 1.0      # Multiplier on every animation duration
//!
//! [theme]
//! max_width = "1400px"
//! gallery_gap = "1.5rem"
//!
//! [theme.section_padding]
//! size = "10vw"
//! min = "4rem"
//! max = "9rem"
//!
//! [colors.light]
//! background = "#f7f5f2"
//! text = "#1a1a1a"
//! text_muted = "#6b6b6b"
//! border = "#dedad4"
//! accent = "#8a6d3b"
//! overlay = "rgba(0, 0, 0, 0.55)"
//!
//! [colors.dark]
//! background = "#0d0d0d"
//! text = "#ededed"
//! text_muted = "#9a9a9a"
//! border = "#2e2e2e"
//! accent = "#c9a86a"
//! overlay = "rgba(0, 0, 0, 0.7)"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page identity and content locations.
    pub site: SiteSection,
    /// Filtering and lightbox behaviour.
    pub gallery: GalleryConfig,
    /// Scroll and hero animation settings.
    pub animations: AnimationConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Layout settings.
    pub theme: ThemeConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.data_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.data_path must not be empty".into(),
            ));
        }
        if self.gallery.default_category.trim().is_empty() {
            return Err(ConfigError::Validation(
                "gallery.default_category must not be empty (use \"all\")".into(),
            ));
        }
        let scale = self.animations.duration_scale;
        if !scale.is_finite() || scale <= 0.0 || scale > 4.0 {
            return Err(ConfigError::Validation(
                "animations.duration_scale must be in (0, 4]".into(),
            ));
        }
        Ok(())
    }

    /// Contact email, if one is configured.
    pub fn contact_email(&self) -> Option<&str> {
        Some(self.site.contact_email.trim()).filter(|e| !e.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Site title, shown in the hero and the document `<title>`.
    pub title: String,
    /// Line shown under the hero title.
    pub subtitle: String,
    /// Hero image path, relative to the output root. Empty hides the image.
    pub hero_image: String,
    /// Markdown file (relative to the source dir) rendered into the about section.
    pub about: String,
    /// Contact address. Empty hides the contact section.
    pub contact_email: String,
    /// Content document path, relative to the source dir.
    pub data_path: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            subtitle: String::new(),
            hero_image: String::new(),
            about: "about.md".to_string(),
            contact_email: String::new(),
            data_path: "data/portfolio.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Category slug selected when the page loads without a `?category=` query.
    pub default_category: String,
    /// Whether the lightbox overlay and per-image pages are generated.
    pub lightbox: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            default_category: "all".to_string(),
            lightbox: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Master switch. When off, no animation CSS or trigger table is emitted.
    pub enabled: bool,
    /// Multiplier applied to every duration, delay and stagger.
    pub duration_scale: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_scale: 1.0,
        }
    }
}

/// A responsive CSS size expressed as `clamp(min, size, max)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClampSize {
    /// Preferred/fluid value, typically viewport-relative (e.g. `"10vw"`).
    pub size: String,
    /// Minimum bound (e.g. `"4rem"`).
    pub min: String,
    /// Maximum bound (e.g. `"9rem"`).
    pub max: String,
}

impl ClampSize {
    /// Render as a CSS `clamp()` expression.
    pub fn to_css(&self) -> String {
        format!("clamp({}, {}, {})", self.min, self.size, self.max)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Maximum content width (CSS value).
    pub max_width: String,
    /// Gap between gallery and event tiles (CSS value).
    pub gallery_gap: String,
    /// Vertical padding of each page section.
    pub section_padding: ClampSize,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            max_width: "1400px".to_string(),
            gallery_gap: "1.5rem".to_string(),
            section_padding: ClampSize {
                size: "10vw".to_string(),
                min: "4rem".to_string(),
                max: "9rem".to_string(),
            },
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Captions, roles, category labels.
    pub text_muted: String,
    pub border: String,
    /// Active filter button, links.
    pub accent: String,
    /// Gallery hover overlay.
    pub overlay: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f7f5f2".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#6b6b6b".to_string(),
            border: "#dedad4".to_string(),
            accent: "#8a6d3b".to_string(),
            overlay: "rgba(0, 0, 0, 0.55)".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0d0d0d".to_string(),
            text: "#ededed".to_string(),
            text_muted: "#9a9a9a".to_string(),
            border: "#2e2e2e".to_string(),
            accent: "#c9a86a".to_string(),
            overlay: "rgba(0, 0, 0, 0.7)".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    if overlay.is_none() {
        tracing::debug!(dir = %root.display(), "no config.toml, using stock defaults");
    }
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
title = "Portfolio"
subtitle = ""

# Hero image path, relative to the output root (e.g. "assets/hero.jpg").
# Leave empty to render a text-only hero.
hero_image = ""

# Markdown file rendered into the about section, relative to the source dir.
about = "about.md"

# Contact address. Leave empty to hide the contact section.
contact_email = ""

# Content document, relative to the source dir.
data_path = "data/portfolio.json"

# ---------------------------------------------------------------------------
# Gallery
# ---------------------------------------------------------------------------
[gallery]
# Category slug selected on first load ("all" shows everything).
default_category = "all"

# Generate the lightbox overlay and the per-image pages.
lightbox = true

# ---------------------------------------------------------------------------
# Animations
# ---------------------------------------------------------------------------
[animations]
# Scroll reveals, hero entrance and parallax. Visitors who ask for reduced
# motion never see them regardless of this setting.
enabled = true

# Multiplier on every duration, delay and stagger (0 < scale <= 4).
duration_scale = 1.0

# ---------------------------------------------------------------------------
# Theme / layout
# ---------------------------------------------------------------------------
[theme]
max_width = "1400px"
gallery_gap = "1.5rem"

# Vertical padding of each section, as CSS clamp(min, size, max).
[theme.section_padding]
size = "10vw"
min = "4rem"
max = "9rem"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f7f5f2"
text = "#1a1a1a"
text_muted = "#6b6b6b"    # Captions, roles, category labels
border = "#dedad4"
accent = "#8a6d3b"        # Active filter, links
overlay = "rgba(0, 0, 0, 0.55)"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0d0d0d"
text = "#ededed"
text_muted = "#9a9a9a"
border = "#2e2e2e"
accent = "#c9a86a"
overlay = "rgba(0, 0, 0, 0.7)"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-accent: {light_accent};
    --color-overlay: {light_overlay};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-accent: {dark_accent};
        --color-overlay: {dark_overlay};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        light_overlay = colors.light.overlay,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
        dark_overlay = colors.dark.overlay,
    )
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --max-width: {max_width};
    --gallery-gap: {gallery_gap};
    --section-padding: {section_padding};
}}"#,
        max_width = theme.max_width,
        gallery_gap = theme.gallery_gap,
        section_padding = theme.section_padding.to_css(),
    )
}
