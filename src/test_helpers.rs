//! Shared test utilities for the folio test suite.
//!
//! Provides the fixture content directory, the sample content document, and
//! small builders and HTML probes used across module tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let out = tmp.path().join("dist");
//! generate(tmp.path(), &out, &load_config(tmp.path()).unwrap()).unwrap();
//!
//! let html = read_output(&out, "index.html");
//! assert_eq!(count_class(&html, "gallery-item"), 5);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::content::{GalleryImage, Orientation};

/// The fixture content document: 3 categories, 5 images (one in a category
/// that is not listed), 2 testimonials, 2 events, full social proof.
pub const SAMPLE_DOCUMENT: &str = include_str!("../fixtures/content/data/portfolio.json");

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Builders
// =========================================================================

/// Minimal gallery image in `category`.
pub fn image(src: &str, category: &str) -> GalleryImage {
    GalleryImage {
        src: src.to_string(),
        alt: None,
        title: None,
        category: category.to_string(),
        aspect_ratio: Orientation::Portrait,
    }
}

// =========================================================================
// Output probes
// =========================================================================

/// Read a generated file. Panics with the path on failure.
pub fn read_output(output: &Path, relative: &str) -> String {
    let path = output.join(relative);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

/// Count elements whose class attribute starts with `class`.
///
/// Matches `class="gallery-item"` and `class="gallery-item landscape"` but
/// not `class="gallery-items"`.
pub fn count_class(html: &str, class: &str) -> usize {
    html.matches(&format!(r#"class="{class}""#)).count()
        + html.matches(&format!(r#"class="{class} "#)).count()
}
