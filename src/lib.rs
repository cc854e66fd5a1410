//! # Folio
//!
//! A static site generator for single-page photography portfolios. One JSON
//! content document describes the gallery, testimonials, recent events and
//! social proof; Folio renders them into a page with category filtering, a
//! lightbox viewer, and scroll-triggered animations.
//!
//! # Architecture: Load Once, Render Per State
//!
//! ```text
//! content/data/portfolio.json ─┐
//! content/config.toml ─────────┼─▶ generate ─▶ dist/index.html
//! content/about.md ────────────┘               dist/category/{slug}/index.html
//!                                              dist/gallery/{n}.html
//! ```
//!
//! The document is read exactly once per build. Every output page is the
//! same content rendered under a different [`gallery::GalleryState`]: the
//! index under the default filter, each category page under its filter, each
//! lightbox page with that image open. The in-page script applies the same
//! state rules so the pre-rendered pages and the live page agree.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Content document types, loading, and the load-failure error |
//! | [`gallery`] | Filter and lightbox state, pure transitions, the view function |
//! | [`animation`] | Declarative animation trigger table rendered to CSS and JSON |
//! | [`generate`] | Renders every page with Maud and writes the output tree |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`output`] | CLI output formatting for `check` and `build` |
//!
//! # Design Decisions
//!
//! ## Pages Work Without Script
//!
//! Filter buttons are links to pre-filtered category pages and gallery tiles
//! are links to lightbox pages. The script upgrades both to in-place
//! behaviour, but a visitor without it still gets every feature.
//!
//! ## A Broken Document Still Builds
//!
//! A missing or malformed content document is reported in the page itself
//! (in the gallery region) and in the build log, and the build succeeds.
//! `folio check` is the strict variant for CI.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a compile error and all interpolation is auto-escaped, which matters
//! because every string on the page comes from user-supplied JSON.

pub mod animation;
pub mod config;
pub mod content;
pub mod gallery;
pub mod generate;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
