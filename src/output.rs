//! CLI output formatting.
//!
//! Output is **information-centric**: each entity leads with its positional
//! index and display name, with paths and counts as indented context lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Gallery (5 images)
//! 001 Weddings (2 images)
//! 002 Portraits (1 image)
//! 003 Editorial (1 image)
//!     Unlisted: street (1 image)
//!
//! Sections
//!     Testimonials: 2
//!     Recent events: 2
//!     Social proof: 2 publications, 2 awards, 3 clients
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Categories
//! 001 Weddings → category/weddings/index.html
//! Lightbox
//! 001 First Light → gallery/1.html
//!
//! Assets: site-3f9a0c1b2d.css, site-77e0d41a9c.js, 8 files copied
//! Generated 1 index, 3 category pages, 5 lightbox pages
//! ```
//!
//! Each format function is pure and returns `Vec<String>`; the `print_*`
//! wrappers write to stdout.

use crate::content::PortfolioDocument;
use crate::gallery::{self, Filter};
use crate::generate::{ContentStatus, GenerateReport, PageKind};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn entity_line(index: usize, title: &str, detail: &str) -> String {
    format!("{} {} {}", format_index(index), title, detail)
}

// ============================================================================
// Check
// ============================================================================

/// Summarize a loaded content document.
pub fn format_check_output(doc: &PortfolioDocument) -> Vec<String> {
    let mut lines = Vec::new();
    let images = doc.images().unwrap_or(&[]);

    match doc.images() {
        Some(images) => lines.push(format!(
            "Gallery ({})",
            plural(images.len(), "image", "images")
        )),
        None => lines.push("Gallery: no portfolio.images".to_string()),
    }

    let mut position = 0;
    for filter in gallery::filters(doc.categories()) {
        let Filter::Category(slug) = &filter else {
            continue;
        };
        position += 1;
        let count = gallery::visible_indices(images, &filter).len();
        lines.push(entity_line(
            position,
            doc.category_name(slug),
            &format!("({})", plural(count, "image", "images")),
        ));
    }

    // Images whose category has no entry in portfolio.categories
    let mut unlisted: Vec<&str> = images
        .iter()
        .map(|i| i.category.as_str())
        .filter(|c| !doc.categories().iter().any(|cat| cat.slug == *c))
        .collect();
    unlisted.sort_unstable();
    unlisted.dedup();
    for slug in unlisted {
        let count = images.iter().filter(|i| i.category == slug).count();
        let label = if slug.is_empty() { "(none)" } else { slug };
        lines.push(format!(
            "{}Unlisted: {} ({})",
            indent(1),
            label,
            plural(count, "image", "images")
        ));
    }

    lines.push(String::new());
    lines.push("Sections".to_string());
    lines.push(match &doc.testimonials {
        Some(t) => format!("{}Testimonials: {}", indent(1), t.len()),
        None => format!("{}Testimonials: missing", indent(1)),
    });
    lines.push(match &doc.recent_events {
        Some(e) => format!("{}Recent events: {}", indent(1), e.len()),
        None => format!("{}Recent events: missing", indent(1)),
    });
    lines.push(match &doc.social_proof {
        Some(p) => format!(
            "{}Social proof: {}, {}, {}",
            indent(1),
            plural(
                p.publications.as_ref().map_or(0, Vec::len),
                "publication",
                "publications"
            ),
            plural(p.awards.as_ref().map_or(0, Vec::len), "award", "awards"),
            plural(p.clients.as_ref().map_or(0, Vec::len), "client", "clients"),
        ),
        None => format!("{}Social proof: missing", indent(1)),
    });

    lines
}

pub fn print_check_output(doc: &PortfolioDocument) {
    for line in format_check_output(doc) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format the generate report: pages by kind, assets, and totals.
pub fn format_build_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    let of_kind = |kind: PageKind| report.pages.iter().filter(move |p| p.kind == kind);

    for page in of_kind(PageKind::Index) {
        lines.push(format!("Home → {}", page.path));
    }

    if let ContentStatus::Failed(details) = &report.content {
        lines.push(format!("{}Content error: {}", indent(1), details));
    }

    let categories: Vec<_> = of_kind(PageKind::Category).collect();
    if !categories.is_empty() {
        lines.push("Categories".to_string());
        for (i, page) in categories.iter().enumerate() {
            lines.push(format!("{} {} → {}", format_index(i + 1), page.title, page.path));
        }
    }

    let lightbox: Vec<_> = of_kind(PageKind::Lightbox).collect();
    if !lightbox.is_empty() {
        lines.push("Lightbox".to_string());
        for (i, page) in lightbox.iter().enumerate() {
            lines.push(format!("{} {} → {}", format_index(i + 1), page.title, page.path));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Assets: {}, {}, {} copied",
        report.stylesheet,
        report.script,
        plural(report.assets_copied, "file", "files")
    ));
    lines.push(format!(
        "Generated 1 index, {}, {}",
        plural(categories.len(), "category page", "category pages"),
        plural(lightbox.len(), "lightbox page", "lightbox pages"),
    ));

    lines
}

pub fn print_build_output(report: &GenerateReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}
