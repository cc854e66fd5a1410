//! HTML site generation.
//!
//! Reads the content document once and renders the site from it. The
//! gallery state model ([`crate::gallery`]) decides what each page shows;
//! this module only turns a [`GalleryView`] and the other content regions
//! into markup.
//!
//! ## Generated Pages
//!
//! - **Index** (`/index.html`): hero, about with social proof, portfolio
//!   (filter buttons + gallery grid), recent events, testimonials, contact,
//!   and the lightbox overlay shell. Filter preselected from
//!   `gallery.default_category`.
//! - **Category pages** (`/category/{slug}/index.html`): the same page with
//!   the gallery pre-filtered. Filter buttons link here, so filtering works
//!   without script; the in-page script intercepts the clicks on the index.
//! - **Lightbox pages** (`/gallery/{n}.html`): one image full-screen with
//!   wraparound previous/next links. Gallery tiles link here; the in-page
//!   script opens the overlay instead.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── site-3f9a0c1b2d.css      # Fingerprinted stylesheet
//! ├── site-77e0d41a9c.js       # Fingerprinted script
//! ├── category/
//! │   ├── weddings/index.html
//! │   └── portraits/index.html
//! ├── gallery/
//! │   ├── 1.html
//! │   └── 2.html
//! └── assets/                  # Copied from content/assets/
//! ```
//!
//! ## Load Failure
//!
//! If the content document cannot be read or parsed, the build still
//! succeeds: the index renders with a single `.content-error` element in the
//! gallery region and no category or lightbox pages.

use crate::animation;
use crate::config::{self, SiteConfig};
use crate::content::{
    self, ContentError, Event, LOAD_FAILURE_MESSAGE, PortfolioDocument, SocialProof, Testimonial,
};
use crate::gallery::{self, Filter, GalleryAction, GalleryState, GalleryView};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Asset copy error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// Inline head script: marks the document as script-capable before first paint.
const JS_FLAG: &str = "document.documentElement.classList.add('js')";

/// What a build produced, for the CLI report.
#[derive(Debug)]
pub struct GenerateReport {
    pub content: ContentStatus,
    pub pages: Vec<GeneratedPage>,
    pub stylesheet: String,
    pub script: String,
    pub assets_copied: usize,
}

#[derive(Debug)]
pub enum ContentStatus {
    Loaded {
        images: usize,
        testimonials: usize,
        events: usize,
    },
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Index,
    Category,
    Lightbox,
}

#[derive(Debug)]
pub struct GeneratedPage {
    pub kind: PageKind,
    /// Output path relative to the output root.
    pub path: String,
    pub title: String,
}

/// Everything a page template needs besides the content itself.
struct PageContext<'a> {
    config: &'a SiteConfig,
    stylesheet: &'a str,
    script: &'a str,
    animation_json: &'a str,
    about_html: Option<&'a str>,
    /// Filter the index opens with; its URL carries no query.
    default_filter: Filter,
}

/// Build the site from `source` into `output`.
pub fn generate(
    source: &Path,
    output: &Path,
    config: &SiteConfig,
) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output)?;
    clean_generated(output)?;

    let default_filter = Filter::parse(&config.gallery.default_category);
    let assets_copied = copy_assets(&source.join("assets"), &output.join("assets"))?;
    let about_html = load_about(&source.join(&config.site.about))?;
    let document = content::load_document(&source.join(&config.site.data_path));
    match &document {
        Ok(doc) => warn_missing_regions(doc, &default_filter),
        Err(e) => tracing::error!(error = %e, "content loading failed; rendering error region"),
    }

    let triggers = animation::resolve_triggers(&config.animations);
    let css = [
        config::generate_color_css(&config.colors),
        config::generate_theme_css(&config.theme),
        CSS_STATIC.to_string(),
        animation::render_css(&triggers),
    ]
    .join("\n\n");
    let stylesheet = write_fingerprinted(output, "site", "css", &css)?;
    let script = write_fingerprinted(output, "site", "js", JS)?;
    let animation_json = animation::render_config_json(&triggers)?;

    let ctx = PageContext {
        config,
        stylesheet: &stylesheet,
        script: &script,
        animation_json: &animation_json,
        about_html: about_html.as_deref(),
        default_filter: default_filter.clone(),
    };

    let mut pages = Vec::new();

    let index = render_site_page(&ctx, document.as_ref(), &default_filter, "", true);
    write_page(output, "index.html", index)?;
    pages.push(GeneratedPage {
        kind: PageKind::Index,
        path: "index.html".to_string(),
        title: config.site.title.clone(),
    });

    let status = match &document {
        Ok(doc) => {
            pages.extend(generate_category_pages(&ctx, doc, output)?);
            if config.gallery.lightbox {
                pages.extend(generate_lightbox_pages(&ctx, doc, output)?);
            }
            ContentStatus::Loaded {
                images: doc.images().map_or(0, <[_]>::len),
                testimonials: doc.testimonials.as_ref().map_or(0, Vec::len),
                events: doc.recent_events.as_ref().map_or(0, Vec::len),
            }
        }
        Err(e) => ContentStatus::Failed(e.details()),
    };

    tracing::info!(pages = pages.len(), output = %output.display(), "site generated");

    Ok(GenerateReport {
        content: status,
        pages,
        stylesheet,
        script,
        assets_copied,
    })
}

fn generate_category_pages(
    ctx: &PageContext,
    doc: &PortfolioDocument,
    output: &Path,
) -> Result<Vec<GeneratedPage>, GenerateError> {
    let mut pages = Vec::new();
    for filter in gallery::filters(doc.categories()) {
        let Filter::Category(slug) = &filter else {
            continue;
        };
        if !is_safe_slug(slug) {
            tracing::warn!(slug = %slug, "skipping category page: slug is not URL-safe");
            continue;
        }
        let path = format!("category/{slug}/index.html");
        let visible = gallery::view(
            &GalleryState::with_filter(filter.clone()),
            doc.images().unwrap_or(&[]),
        )
        .visible_count();
        tracing::debug!(slug = %slug, visible, "rendering category page");
        let page = render_site_page(ctx, Ok(doc), &filter, "../../", false);
        write_page(output, &path, page)?;
        pages.push(GeneratedPage {
            kind: PageKind::Category,
            path,
            title: doc.category_name(slug).to_string(),
        });
    }
    Ok(pages)
}

fn generate_lightbox_pages(
    ctx: &PageContext,
    doc: &PortfolioDocument,
    output: &Path,
) -> Result<Vec<GeneratedPage>, GenerateError> {
    let Some(images) = doc.images() else {
        return Ok(Vec::new());
    };
    let mut pages = Vec::new();
    for index in 0..images.len() {
        let state = gallery::update(
            &GalleryState::default(),
            GalleryAction::Open(index),
            images.len(),
        );
        let view = gallery::view(&state, images);
        let Some(page) = render_lightbox_page(ctx, doc, &view) else {
            continue;
        };
        let path = lightbox_path(index);
        write_page(output, &path, page)?;
        pages.push(GeneratedPage {
            kind: PageKind::Lightbox,
            path,
            title: images[index]
                .title()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Image {}", index + 1)),
        });
    }
    Ok(pages)
}

fn write_page(output: &Path, relative: &str, page: Markup) -> std::io::Result<()> {
    let path = output.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, page.into_string())?;
    tracing::debug!(path = relative, "wrote page");
    Ok(())
}

/// Write `content` as `{stem}-{hash}.{ext}` and return the file name.
fn write_fingerprinted(
    output: &Path,
    stem: &str,
    ext: &str,
    content: &str,
) -> std::io::Result<String> {
    let name = format!("{stem}-{}.{ext}", fingerprint(content));
    fs::write(output.join(&name), content)?;
    Ok(name)
}

/// First 10 hex chars of the SHA-256 of `content`.
fn fingerprint(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    format!("{:x}", digest)[..10].to_string()
}

/// Remove pages and fingerprinted `site-*` files a previous build wrote.
/// Everything else in `output` stays.
fn clean_generated(output: &Path) -> std::io::Result<()> {
    for dir in ["category", "gallery"] {
        let path = output.join(dir);
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        }
    }
    for entry in fs::read_dir(output)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let fingerprinted = name.starts_with("site-")
            && (name.ends_with(".css") || name.ends_with(".js"));
        if fingerprinted && path.is_file() {
            tracing::debug!(path = %path.display(), "removing stale asset");
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

/// Copy the content `assets/` tree to the output. Missing source is not an error.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        tracing::debug!(dir = %src.display(), "no assets directory");
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target: PathBuf = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Render the about markdown, if the file exists.
fn load_about(path: &Path) -> std::io::Result<Option<String>> {
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no about file");
        return Ok(None);
    }
    let markdown = fs::read_to_string(path)?;
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, Parser::new(&markdown));
    Ok(Some(body_html))
}

/// Category slugs become path segments.
fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn lightbox_path(index: usize) -> String {
    format!("gallery/{}.html", index + 1)
}

/// Resolve a content URL against the page's path back to the output root.
///
/// Absolute paths, protocol URLs and data URIs are left alone.
fn asset_url(root: &str, src: &str) -> String {
    if src.starts_with('/') || src.contains("://") || src.starts_with("data:") {
        src.to_string()
    } else {
        format!("{root}{src}")
    }
}

fn filter_href(root: &str, filter: &Filter) -> String {
    match filter {
        Filter::All => format!("{root}index.html"),
        Filter::Category(slug) => format!("{root}category/{slug}/index.html"),
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    title: &str,
    ctx: &PageContext,
    root: &str,
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                script { (PreEscaped(JS_FLAG)) }
                link rel="stylesheet" href={ (root) (ctx.stylesheet) };
            }
            body class=[body_class] {
                (content)
                @if !ctx.animation_json.is_empty() && ctx.animation_json != "[]" {
                    script #animation-config type="application/json" {
                        (PreEscaped(ctx.animation_json))
                    }
                }
                script src={ (root) (ctx.script) } defer {}
            }
        }
    }
}

/// Section anchors shown in the top navigation.
struct NavLink {
    anchor: &'static str,
    label: &'static str,
}

fn site_nav(title: &str, root: &str, links: &[NavLink]) -> Markup {
    html! {
        nav.nav {
            a.nav-brand href={ (root) "index.html" } { (title) }
            ul.nav-links {
                @for link in links {
                    li { a href={ (root) "index.html#" (link.anchor) } { (link.label) } }
                }
            }
        }
    }
}

fn hero(config: &SiteConfig, root: &str) -> Markup {
    let hero_image = Some(config.site.hero_image.trim()).filter(|s| !s.is_empty());
    let subtitle = Some(config.site.subtitle.trim()).filter(|s| !s.is_empty());
    html! {
        section.hero #hero {
            @if let Some(src) = hero_image {
                img.hero-image src=(asset_url(root, src)) alt="";
            }
            div.hero-text {
                h1.hero-title { (config.site.title) }
                @if let Some(subtitle) = subtitle {
                    p.hero-subtitle { (subtitle) }
                }
            }
            a.hero-scroll-cue href="#portfolio" aria-label="Scroll to portfolio" { "Scroll" }
        }
    }
}

fn about_section(about_html: Option<&str>, proof: Option<&SocialProof>) -> Markup {
    html! {
        section.about #about {
            div.about-content {
                @if let Some(body) = about_html {
                    div.about-text { (PreEscaped(body)) }
                }
                @if let Some(proof) = proof {
                    (social_proof(proof))
                }
            }
        }
    }
}

/// Publications, awards and clients. Each list is omitted when absent.
pub fn social_proof(proof: &SocialProof) -> Markup {
    html! {
        div.social-proof {
            @if let Some(publications) = &proof.publications {
                div.proof-group {
                    h3 { "As seen in" }
                    div #publications {
                        @for publication in publications {
                            span.publication-item { (publication) }
                        }
                    }
                }
            }
            @if let Some(awards) = &proof.awards {
                div.proof-group {
                    h3 { "Awards" }
                    ul #awards {
                        @for award in awards {
                            li { (award) }
                        }
                    }
                }
            }
            @if let Some(clients) = &proof.clients {
                div.proof-group {
                    h3 { "Clients" }
                    div #clients {
                        @for client in clients {
                            span.client-item { (client) }
                        }
                    }
                }
            }
        }
    }
}

/// Filter buttons. Each is a real link to its category page.
///
/// `data-query` is the URL query the index shows for that filter; the
/// index default has none.
pub fn category_buttons(
    doc: &PortfolioDocument,
    active: &Filter,
    default: &Filter,
    root: &str,
) -> Markup {
    html! {
        div.category-filters role="tablist" aria-label="Filter by category" {
            @for filter in gallery::filters(doc.categories()) {
                @let is_active = filter == *active;
                @let label = match &filter {
                    Filter::All => "All",
                    Filter::Category(slug) => doc.category_name(slug),
                };
                @if filter == Filter::All || is_safe_slug(filter.slug()) {
                    a.category-btn.active[is_active]
                        href=(filter_href(root, &filter))
                        role="tab"
                        data-category=(filter.slug())
                        data-query=(gallery::filter_query(&filter, default).unwrap_or_default())
                        aria-selected=(if is_active { "true" } else { "false" }) {
                        (label)
                    }
                }
            }
        }
    }
}

/// The gallery grid for a given view: one `.gallery-item` per image.
pub fn gallery_grid(
    doc: &PortfolioDocument,
    view: &GalleryView,
    root: &str,
    live_filter: bool,
    lightbox: bool,
) -> Markup {
    html! {
        div #gallery-grid .gallery-grid
            data-active-category=(view.filter.slug())
            data-live-filter[live_filter] {
            @for item in &view.items {
                @let (width, height) = item.image.dimensions();
                @let class = format!(
                    "gallery-item {}{}",
                    item.image.aspect_ratio.css_class(),
                    if item.visible { "" } else { " is-filtered-out" }
                );
                div class=(class)
                    data-category=(item.image.category)
                    data-index=(item.index)
                    hidden[!item.visible] {
                    @let tile = html! {
                        img.gallery-image
                            src=(asset_url(root, &item.image.src))
                            alt=(item.image.alt_text())
                            loading="lazy"
                            width=(width)
                            height=(height);
                        div.gallery-overlay {
                            @if let Some(title) = item.image.title() {
                                h3.gallery-title { (title) }
                            }
                            @if !item.image.category.is_empty() {
                                p.gallery-category { (doc.category_name(&item.image.category)) }
                            }
                        }
                    };
                    @if lightbox {
                        a.gallery-link href={ (root) (lightbox_path(item.index)) } { (tile) }
                    } @else {
                        (tile)
                    }
                }
            }
        }
    }
}

/// The gallery region when the content document failed to load.
pub fn content_error(error: &ContentError) -> Markup {
    html! {
        div #gallery-grid .gallery-grid {
            div.content-error role="alert" {
                p { (LOAD_FAILURE_MESSAGE) }
                p.error-details { (error.details()) }
            }
        }
    }
}

/// Event categories are free text, shown as written.
fn events_section(events: &[Event], root: &str) -> Markup {
    html! {
        section.events #events {
            h2.events-title { "Recent Events" }
            div.events-grid {
                @for event in events {
                    div.event-item {
                        img.event-image
                            src=(asset_url(root, &event.src))
                            alt=(event.alt_text())
                            loading="lazy"
                            style=[event.aspect_style()];
                        div.gallery-overlay {
                            h3.gallery-title { (event.title) }
                            @if !event.category.is_empty() {
                                p.gallery-category { (event.category) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn testimonials_section(testimonials: &[Testimonial]) -> Markup {
    html! {
        section.testimonials #testimonials {
            h2.testimonials-title.scroll-reveal { "Kind Words" }
            div #testimonials-container {
                @for testimonial in testimonials {
                    div.testimonial-item.scroll-reveal-fast {
                        blockquote.testimonial-quote { "\"" (testimonial.quote) "\"" }
                        div.testimonial-author {
                            p.testimonial-name { (testimonial.name) }
                            @if let Some(role) = testimonial.role.as_deref().filter(|r| !r.is_empty()) {
                                p.testimonial-role { (role) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn contact_section(email: &str) -> Markup {
    html! {
        section.contact #contact {
            h2.contact-title { "Get in Touch" }
            div.contact-form {
                p { "For bookings and enquiries:" }
                a.contact-email href={ "mailto:" (email) } { (email) }
            }
        }
    }
}

/// The lightbox overlay driven by the in-page script.
fn lightbox_shell() -> Markup {
    html! {
        div.lightbox #lightbox hidden {
            div.lightbox-overlay {}
            div.lightbox-content role="dialog" aria-modal="true" aria-label="Image viewer" {
                button.lightbox-close type="button" aria-label="Close lightbox" { "×" }
                button.lightbox-prev type="button" aria-label="Previous image" { "‹" }
                button.lightbox-next type="button" aria-label="Next image" { "›" }
                img.lightbox-image src="" alt="";
                div.lightbox-caption {}
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Render the one-page site with the gallery filtered by `filter`.
///
/// `root` is the relative path from the page back to the output root.
/// `live_filter` lets the script filter in place and keep the URL in sync
/// (index only); elsewhere filter buttons navigate.
fn render_site_page(
    ctx: &PageContext,
    document: Result<&PortfolioDocument, &ContentError>,
    filter: &Filter,
    root: &str,
    live_filter: bool,
) -> Markup {
    let config = ctx.config;
    let state = GalleryState::with_filter(filter.clone());
    let lightbox = config.gallery.lightbox;

    let doc = document.ok();
    let events = doc.and_then(|d| d.recent_events.as_deref());
    let testimonials = doc.and_then(|d| d.testimonials.as_deref());
    let proof = doc.and_then(|d| d.social_proof.as_ref());
    let contact = config.contact_email();

    let mut links = vec![
        NavLink {
            anchor: "about",
            label: "About",
        },
        NavLink {
            anchor: "portfolio",
            label: "Portfolio",
        },
    ];
    if events.is_some() {
        links.push(NavLink {
            anchor: "events",
            label: "Events",
        });
    }
    if testimonials.is_some() {
        links.push(NavLink {
            anchor: "testimonials",
            label: "Testimonials",
        });
    }
    if contact.is_some() {
        links.push(NavLink {
            anchor: "contact",
            label: "Contact",
        });
    }

    let title = match (doc, filter) {
        (Some(doc), Filter::Category(slug)) => {
            format!("{} · {}", doc.category_name(slug), config.site.title)
        }
        _ => config.site.title.clone(),
    };

    let content = html! {
        (site_nav(&config.site.title, root, &links))
        main {
            (hero(config, root))
            (about_section(ctx.about_html, proof))
            section.portfolio #portfolio {
                h2.portfolio-title { "Portfolio" }
                @match document {
                    Ok(doc) => {
                        (category_buttons(doc, filter, &ctx.default_filter, root))
                        @let images = doc.images().unwrap_or(&[]);
                        (gallery_grid(doc, &gallery::view(&state, images), root, live_filter, lightbox))
                    }
                    Err(e) => {
                        (content_error(e))
                    }
                }
            }
            @if let Some(events) = events {
                (events_section(events, root))
            }
            @if let Some(testimonials) = testimonials {
                (testimonials_section(testimonials))
            }
            @if let Some(email) = contact {
                (contact_section(email))
            }
        }
        footer.site-footer {
            p { "© " (config.site.title) }
        }
        @if lightbox && doc.is_some() {
            (lightbox_shell())
        }
    };

    base_document(&title, ctx, root, None, content)
}

fn warn_missing_regions(doc: &PortfolioDocument, default_filter: &Filter) {
    if doc.images().is_none() {
        tracing::warn!("content document has no portfolio.images; gallery is empty");
    }
    if let Filter::Category(slug) = default_filter {
        if !doc.categories().iter().any(|c| c.slug == *slug) {
            tracing::warn!(
                default_category = %slug,
                "gallery.default_category is not a listed category"
            );
        }
    }
    if doc.testimonials.is_none() {
        tracing::warn!("content document has no testimonials; section omitted");
    }
    if doc.recent_events.is_none() {
        tracing::warn!("content document has no recentEvents; section omitted");
    }
    if doc.social_proof.is_none() {
        tracing::warn!("content document has no socialProof; about section has no lists");
    }
}

/// Render a full-page lightbox for the view's open image.
fn render_lightbox_page(
    ctx: &PageContext,
    doc: &PortfolioDocument,
    view: &GalleryView,
) -> Option<Markup> {
    let lightbox = view.lightbox.as_ref()?;
    let image = lightbox.image;
    let root = "../";
    let display_idx = lightbox.index + 1;
    let title = match image.title() {
        Some(t) => format!("{t} · {}", ctx.config.site.title),
        None => format!("Image {display_idx} · {}", ctx.config.site.title),
    };
    // Pages live beside each other in gallery/.
    let prev_url = format!("{}.html", lightbox.prev + 1);
    let next_url = format!("{}.html", lightbox.next + 1);

    let content = html! {
        div.lightbox.active.lightbox-page {
            a.lightbox-overlay href={ (root) "index.html#portfolio" } aria-label="Back to portfolio" {}
            div.lightbox-content {
                a.lightbox-close href={ (root) "index.html#portfolio" } aria-label="Close lightbox" { "×" }
                a.lightbox-prev href=(prev_url) rel="prev" aria-label="Previous image" { "‹" }
                a.lightbox-next href=(next_url) rel="next" aria-label="Next image" { "›" }
                img.lightbox-image src=(asset_url(root, &image.src)) alt=(image.alt_text());
                div.lightbox-caption {
                    @if let Some(t) = image.title() {
                        h3 { (t) }
                    }
                    @if !image.category.is_empty() {
                        p { (doc.category_name(&image.category)) }
                    }
                }
            }
        }
        div.nav-zones data-prev=(prev_url) data-next=(next_url) data-close={ (root) "index.html#portfolio" } {}
    };

    Some(base_document(&title, ctx, root, Some("lightbox-view"), content))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use crate::content::parse_document;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn sample() -> PortfolioDocument {
        parse_document(SAMPLE_DOCUMENT).unwrap()
    }

    fn render_grid(doc: &PortfolioDocument, filter: &str) -> String {
        let state = GalleryState::with_filter(Filter::parse(filter));
        let images = doc.images().unwrap();
        gallery_grid(doc, &gallery::view(&state, images), "", true, true).into_string()
    }

    fn build() -> (TempDir, PathBuf, GenerateReport) {
        let tmp = setup_fixtures();
        let out = tmp.path().join("dist");
        let config = load_config(tmp.path()).unwrap();
        let report = generate(tmp.path(), &out, &config).unwrap();
        (tmp, out, report)
    }

    #[test]
    fn grid_has_one_item_per_image() {
        let doc = sample();
        let html = render_grid(&doc, "all");
        assert_eq!(count_class(&html, "gallery-item"), 5);
        assert!(!html.contains("is-filtered-out"));
    }

    #[test]
    fn grid_items_carry_category_and_index() {
        let html = render_grid(&sample(), "all");
        assert!(html.contains(r#"data-category="weddings""#));
        assert!(html.contains(r#"data-index="0""#));
        assert!(html.contains(r#"data-index="4""#));
        assert!(html.contains(r#"href="gallery/1.html""#));
    }

    #[test]
    fn grid_filter_hides_other_categories() {
        let html = render_grid(&sample(), "weddings");
        // Every item still rendered; non-matching ones hidden.
        assert_eq!(count_class(&html, "gallery-item"), 5);
        assert_eq!(html.matches(" hidden").count(), 3);
        assert!(html.contains(r#"data-active-category="weddings""#));
    }

    #[test]
    fn grid_uses_category_display_name() {
        let html = render_grid(&sample(), "all");
        assert!(html.contains(r#"<p class="gallery-category">Weddings</p>"#));
        // Unlisted category falls back to slug
        assert!(html.contains(r#"<p class="gallery-category">street</p>"#));
    }

    #[test]
    fn grid_image_attributes() {
        let html = render_grid(&sample(), "all");
        assert!(html.contains(r#"alt="Couple walking through a field at sunrise""#));
        assert!(html.contains(r#"width="800" height="600""#));
        assert!(html.contains(r#"width="800" height="1000""#));
        assert!(html.contains(r#"loading="lazy""#));
        assert!(html.contains("gallery-item landscape"));
    }

    #[test]
    fn untitled_image_has_no_title_element() {
        let doc = parse_document(r#"{"portfolio": {"images": [{"src": "a.jpg"}]}}"#).unwrap();
        let html = render_grid(&doc, "all");
        assert!(!html.contains("gallery-title"));
        assert!(!html.contains("gallery-category"));
    }

    #[test]
    fn category_buttons_mark_active() {
        let doc = sample();
        let html = category_buttons(&doc, &Filter::parse("portraits"), &Filter::All, "../../")
            .into_string();
        assert!(html.contains(r#"href="../../index.html""#));
        assert!(html.contains(r#"href="../../category/weddings/index.html""#));
        assert!(html.contains(r#"class="category-btn active""#));
        assert_eq!(html.matches(r#"aria-selected="true""#).count(), 1);
        assert_eq!(html.matches("category-btn").count(), 4);
        assert!(html.contains(r#"data-query="?category=weddings""#));
        assert!(html.contains(r#"data-category="all" data-query="""#));
    }

    #[test]
    fn category_buttons_query_relative_to_default() {
        let doc = sample();
        let default = Filter::parse("portraits");
        let html = category_buttons(&doc, &default, &default, "").into_string();
        assert!(html.contains(r#"data-category="all" data-query="?category=all""#));
        assert!(html.contains(r#"data-category="portraits" data-query="""#));
    }

    #[test]
    fn content_error_shows_message_and_details() {
        let err = parse_document("{").unwrap_err();
        let html = content_error(&err).into_string();
        assert!(html.contains("content-error"));
        assert!(html.contains(LOAD_FAILURE_MESSAGE));
        assert!(html.contains("error-details"));
        assert!(html.contains(r#"id="gallery-grid""#));
    }

    #[test]
    fn social_proof_lists() {
        let doc = sample();
        let html = social_proof(doc.social_proof.as_ref().unwrap()).into_string();
        assert_eq!(count_class(&html, "publication-item"), 2);
        assert_eq!(count_class(&html, "client-item"), 3);
        assert!(html.contains(r#"<ul id="awards"><li>Best Wedding Series 2024</li>"#));
    }

    #[test]
    fn social_proof_omits_missing_lists() {
        let proof = SocialProof {
            publications: None,
            awards: Some(vec!["One".into()]),
            clients: None,
        };
        let html = social_proof(&proof).into_string();
        assert!(!html.contains("publications"));
        assert!(!html.contains("clients"));
        assert!(html.contains("awards"));
    }

    #[test]
    fn testimonials_quote_and_optional_role() {
        let doc = sample();
        let html = testimonials_section(doc.testimonials.as_ref().unwrap()).into_string();
        assert_eq!(count_class(&html, "testimonial-item"), 2);
        assert_eq!(count_class(&html, "testimonial-role"), 1);
        assert!(html.contains("&quot;Calm, quick, and the prints are beautiful.&quot;"));
    }

    #[test]
    fn events_have_overlay_and_aspect_style() {
        let doc = sample();
        let html = events_section(doc.recent_events.as_ref().unwrap(), "").into_string();
        assert_eq!(count_class(&html, "event-item"), 2);
        assert!(html.contains(r#"style="aspect-ratio: 4/5;""#));
        assert!(html.contains("Harbour Gala"));
        assert!(html.contains(r#"alt="Guests under string lights""#));
    }

    #[test]
    fn event_category_is_shown_verbatim() {
        let doc = parse_document(
            r#"{"portfolio": {"categories": [{"slug": "weddings", "name": "Weddings"}]},
                "recentEvents": [{"src": "a.jpg", "title": "A", "category": "weddings"}]}"#,
        )
        .unwrap();
        let html = events_section(doc.recent_events.as_ref().unwrap(), "").into_string();
        assert!(html.contains(r#"<p class="gallery-category">weddings</p>"#));
        assert!(!html.contains("Weddings"));
    }

    #[test]
    fn asset_url_resolution() {
        assert_eq!(asset_url("../", "assets/a.jpg"), "../assets/a.jpg");
        assert_eq!(asset_url("../", "/assets/a.jpg"), "/assets/a.jpg");
        assert_eq!(
            asset_url("../", "https://cdn.example/a.jpg"),
            "https://cdn.example/a.jpg"
        );
    }

    #[test]
    fn safe_slugs() {
        assert!(is_safe_slug("black-and-white_2"));
        assert!(!is_safe_slug(""));
        assert!(!is_safe_slug("../etc"));
        assert!(!is_safe_slug("a b"));
    }

    #[test]
    fn html_escape_in_maud() {
        let doc = parse_document(
            r#"{"portfolio": {"images": [{"src": "a.jpg", "title": "<script>alert('x')</script>"}]}}"#,
        )
        .unwrap();
        let html = render_grid(&doc, "all");
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    // =========================================================================
    // Full builds
    // =========================================================================

    #[test]
    fn build_writes_index_category_and_lightbox_pages() {
        let (_tmp, out, report) = build();
        assert!(out.join("index.html").exists());
        for slug in ["weddings", "portraits", "editorial"] {
            assert!(out.join(format!("category/{slug}/index.html")).exists());
        }
        for n in 1..=5 {
            assert!(out.join(format!("gallery/{n}.html")).exists());
        }
        assert_eq!(report.pages.len(), 1 + 3 + 5);
        assert!(matches!(
            report.content,
            ContentStatus::Loaded {
                images: 5,
                testimonials: 2,
                events: 2
            }
        ));
    }

    #[test]
    fn build_index_renders_every_region() {
        let (_tmp, out, _) = build();
        let html = read_output(&out, "index.html");
        assert_eq!(count_class(&html, "gallery-item"), 5);
        assert!(html.contains(r#"id="testimonials-container""#));
        assert!(html.contains(r#"class="events-grid""#));
        assert!(html.contains(r#"id="publications""#));
        assert!(html.contains(r#"id="lightbox""#));
        assert!(html.contains("data-live-filter"));
        assert!(html.contains("hello@adalens.example"));
        assert!(html.contains("<strong>matter</strong>"));
        assert!(html.contains(r#"src="assets/hero.jpg""#));
    }

    #[test]
    fn build_category_page_is_prefiltered() {
        let (_tmp, out, _) = build();
        let html = read_output(&out, "category/weddings/index.html");
        assert_eq!(count_class(&html, "gallery-item"), 5);
        assert_eq!(html.matches("is-filtered-out").count(), 3);
        assert!(!html.contains("data-live-filter"));
        assert!(html.contains("<title>Weddings · Ada Lens</title>"));
        assert!(html.contains(r#"src="../../assets/gallery/01-first-light.jpg""#));
    }

    #[test]
    fn build_lightbox_pages_wrap_around() {
        let (_tmp, out, _) = build();
        let first = read_output(&out, "gallery/1.html");
        assert!(first.contains(r#"data-prev="5.html""#));
        assert!(first.contains(r#"data-next="2.html""#));
        let last = read_output(&out, "gallery/5.html");
        assert!(last.contains(r#"data-prev="4.html""#));
        assert!(last.contains(r#"data-next="1.html""#));
        assert!(first.contains("<h3>First Light</h3>"));
        assert!(first.contains("<p>Weddings</p>"));
    }

    #[test]
    fn build_copies_assets_and_fingerprints() {
        let (_tmp, out, report) = build();
        assert_eq!(report.assets_copied, 8);
        assert!(out.join("assets/gallery/03-vows.jpg").exists());
        assert!(report.stylesheet.starts_with("site-") && report.stylesheet.ends_with(".css"));
        assert!(out.join(&report.stylesheet).exists());
        assert!(out.join(&report.script).exists());
        let html = read_output(&out, "index.html");
        assert!(html.contains(&format!(r#"href="{}""#, report.stylesheet)));
        assert!(html.contains(&format!(r#"src="{}""#, report.script)));
    }

    #[test]
    fn build_embeds_animation_table() {
        let (_tmp, out, report) = build();
        let html = read_output(&out, "index.html");
        assert!(html.contains(r#"id="animation-config""#));
        let css = read_output(&out, &report.stylesheet);
        assert!(css.contains("prefers-reduced-motion"));
    }

    #[test]
    fn build_without_animations() {
        let tmp = setup_fixtures();
        let out = tmp.path().join("dist");
        let mut config = load_config(tmp.path()).unwrap();
        config.animations.enabled = false;
        let report = generate(tmp.path(), &out, &config).unwrap();
        let html = read_output(&out, "index.html");
        assert!(!html.contains("animation-config"));
        let css = read_output(&out, &report.stylesheet);
        assert!(!css.contains("is-revealed"));
    }

    #[test]
    fn build_without_lightbox() {
        let tmp = setup_fixtures();
        let out = tmp.path().join("dist");
        let mut config = load_config(tmp.path()).unwrap();
        config.gallery.lightbox = false;
        generate(tmp.path(), &out, &config).unwrap();
        assert!(!out.join("gallery").exists());
        let html = read_output(&out, "index.html");
        assert!(!html.contains(r#"id="lightbox""#));
        assert!(!html.contains("gallery-link"));
    }

    #[test]
    fn build_default_category_prefilters_index() {
        let tmp = setup_fixtures();
        let out = tmp.path().join("dist");
        let mut config = load_config(tmp.path()).unwrap();
        config.gallery.default_category = "portraits".to_string();
        generate(tmp.path(), &out, &config).unwrap();
        let html = read_output(&out, "index.html");
        assert_eq!(html.matches("is-filtered-out").count(), 4);
        assert!(html.contains(r#"data-active-category="portraits""#));
        // An empty query reloads as portraits, so "all" must be explicit.
        assert!(html.contains(r#"data-category="all" data-query="?category=all""#));
        assert!(html.contains(r#"data-category="portraits" data-query="""#));
    }

    #[test]
    fn build_lenient_aspect_ratio_keeps_every_region() {
        let tmp = setup_fixtures();
        fs::write(
            tmp.path().join("data/portfolio.json"),
            r#"{"portfolio": {"images": [
                    {"src": "a.jpg", "category": "x", "aspectRatio": "landscape"},
                    {"src": "b.jpg", "category": "x", "aspectRatio": "panorama"},
                    {"src": "c.jpg", "category": "x", "aspectRatio": null}
                ]},
                "testimonials": [{"quote": "Q", "name": "N"}]}"#,
        )
        .unwrap();
        let out = tmp.path().join("dist");
        let config = load_config(tmp.path()).unwrap();
        let report = generate(tmp.path(), &out, &config).unwrap();

        assert!(matches!(report.content, ContentStatus::Loaded { images: 3, .. }));
        let html = read_output(&out, "index.html");
        assert_eq!(count_class(&html, "gallery-item"), 3);
        assert_eq!(count_class(&html, "content-error"), 0);
        assert!(html.contains("gallery-item panorama"));
        assert!(html.contains("gallery-item portrait"));
        assert!(html.contains("testimonials-container"));
    }

    #[test]
    fn rebuild_removes_stale_output() {
        let (tmp, out, first) = build();
        fs::write(out.join("gallery/99.html"), "stale").unwrap();
        fs::create_dir_all(out.join("category/retired")).unwrap();
        fs::write(out.join("category/retired/index.html"), "stale").unwrap();
        fs::write(out.join("site-0000000000.css"), "stale").unwrap();
        fs::write(out.join("site-0000000000.js"), "stale").unwrap();
        fs::write(out.join("CNAME"), "adalens.example").unwrap();

        let config = load_config(tmp.path()).unwrap();
        let second = generate(tmp.path(), &out, &config).unwrap();

        assert!(!out.join("gallery/99.html").exists());
        assert!(!out.join("category/retired").exists());
        assert!(!out.join("site-0000000000.css").exists());
        assert!(!out.join("site-0000000000.js").exists());
        assert!(out.join("CNAME").exists());
        assert_eq!(first.stylesheet, second.stylesheet);
        assert!(out.join(&second.stylesheet).exists());
        assert!(out.join("gallery/5.html").exists());
    }

    #[test]
    fn build_with_missing_document_renders_error() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("data/portfolio.json")).unwrap();
        let out = tmp.path().join("dist");
        let config = load_config(tmp.path()).unwrap();
        let report = generate(tmp.path(), &out, &config).unwrap();

        assert!(matches!(report.content, ContentStatus::Failed(_)));
        assert_eq!(report.pages.len(), 1);
        let html = read_output(&out, "index.html");
        assert_eq!(count_class(&html, "content-error"), 1);
        assert!(html.contains(LOAD_FAILURE_MESSAGE));
        assert_eq!(count_class(&html, "gallery-item"), 0);
        assert!(!out.join("category").exists());
    }

    #[test]
    fn build_with_malformed_document_renders_error() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("data/portfolio.json"), "{ broken").unwrap();
        let out = tmp.path().join("dist");
        let config = load_config(tmp.path()).unwrap();
        let report = generate(tmp.path(), &out, &config).unwrap();
        let ContentStatus::Failed(details) = report.content else {
            panic!("expected failure");
        };
        assert!(details.starts_with("Failed to load portfolio data"));
    }

    #[test]
    fn build_omits_absent_regions() {
        let tmp = setup_fixtures();
        fs::write(
            tmp.path().join("data/portfolio.json"),
            r#"{"portfolio": {"images": [{"src": "a.jpg", "category": "x"}]}}"#,
        )
        .unwrap();
        let out = tmp.path().join("dist");
        let config = load_config(tmp.path()).unwrap();
        generate(tmp.path(), &out, &config).unwrap();
        let html = read_output(&out, "index.html");
        assert_eq!(count_class(&html, "gallery-item"), 1);
        assert!(!html.contains("testimonials-container"));
        assert!(!html.contains("events-grid"));
        assert!(!html.contains(r#"id="publications""#));
    }
}
