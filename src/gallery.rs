//! Gallery view state: category filtering and lightbox navigation.
//!
//! The gallery's UI state is an explicit value ([`GalleryState`]) moved
//! forward by a pure transition function ([`update`]) and projected onto the
//! item list by a single view function ([`view`]). Rendering never reads
//! ambient state; the generator builds one state per output page (the index,
//! each category page, each lightbox page) and renders its view.
//!
//! The in-page script applies the same rules to the same DOM contract:
//!
//! | Rule | Rust | Script |
//! |------|------|--------|
//! | `all` shows every item | [`Filter::matches`] | `matches()` |
//! | navigation wraps at both ends | [`step`] | `step()` |
//! | hidden items are still navigable | [`update`] | `update()` |
//! | `?category=` absent for the default | [`filter_query`] | `data-query` |

use crate::content::{Category, GalleryImage};
use std::fmt;

/// Slug reserved for the "show everything" filter.
pub const ALL: &str = "all";

/// Active category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    /// `"all"` and the empty string mean [`Filter::All`].
    pub fn parse(slug: &str) -> Self {
        let slug = slug.trim();
        if slug.is_empty() || slug == ALL {
            Filter::All
        } else {
            Filter::Category(slug.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(slug) => slug == category,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            Filter::All => ALL,
            Filter::Category(slug) => slug,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Filter buttons in display order: `all` first, then the document's categories.
pub fn filters(categories: &[Category]) -> Vec<Filter> {
    std::iter::once(Filter::All)
        .chain(categories.iter().map(|c| Filter::parse(&c.slug)))
        .fold(Vec::new(), |mut acc, f| {
            if !acc.contains(&f) {
                acc.push(f);
            }
            acc
        })
}

/// Query string carrying the filter in the page URL.
///
/// An absent query means the page's default filter, so the default gets
/// `None` and every other filter, `all` included, is written out.
pub fn filter_query(filter: &Filter, default: &Filter) -> Option<String> {
    if filter == default {
        None
    } else {
        Some(format!("?category={}", filter.slug()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Move one position in `direction`, wrapping around at both ends.
///
/// An empty list has no valid position; `0` is returned.
pub fn step(index: usize, direction: Direction, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let index = index.min(len - 1);
    match direction {
        Direction::Forward => (index + 1) % len,
        Direction::Backward => (index + len - 1) % len,
    }
}

/// Gallery UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryState {
    pub filter: Filter,
    /// Index of the image shown in the lightbox, `None` when closed.
    pub lightbox: Option<usize>,
}

impl GalleryState {
    pub fn with_filter(filter: Filter) -> Self {
        Self {
            filter,
            lightbox: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryAction {
    Filter(Filter),
    Open(usize),
    Close,
    Next,
    Prev,
}

/// Apply `action` to `state` for a gallery of `item_count` images.
///
/// - `Open` with an out-of-range index leaves the state unchanged.
/// - `Next`/`Prev` while the lightbox is closed leave the state unchanged.
/// - Navigation walks the full list, filtered-out items included.
pub fn update(state: &GalleryState, action: GalleryAction, item_count: usize) -> GalleryState {
    let mut next = state.clone();
    match action {
        GalleryAction::Filter(filter) => next.filter = filter,
        GalleryAction::Open(index) if index < item_count => next.lightbox = Some(index),
        GalleryAction::Open(_) => {}
        GalleryAction::Close => next.lightbox = None,
        GalleryAction::Next => {
            next.lightbox = state
                .lightbox
                .map(|i| step(i, Direction::Forward, item_count))
        }
        GalleryAction::Prev => {
            next.lightbox = state
                .lightbox
                .map(|i| step(i, Direction::Backward, item_count))
        }
    }
    next
}

/// Indices of the items the filter shows, in document order.
pub fn visible_indices(items: &[GalleryImage], filter: &Filter) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| filter.matches(&item.category))
        .map(|(i, _)| i)
        .collect()
}

#[derive(Debug)]
pub struct ItemView<'a> {
    pub index: usize,
    pub image: &'a GalleryImage,
    pub visible: bool,
}

#[derive(Debug)]
pub struct LightboxView<'a> {
    pub index: usize,
    pub image: &'a GalleryImage,
    pub prev: usize,
    pub next: usize,
}

#[derive(Debug)]
pub struct GalleryView<'a> {
    pub filter: &'a Filter,
    pub items: Vec<ItemView<'a>>,
    pub lightbox: Option<LightboxView<'a>>,
}

impl GalleryView<'_> {
    pub fn visible_count(&self) -> usize {
        self.items.iter().filter(|i| i.visible).count()
    }
}

/// Project `state` onto `items`.
pub fn view<'a>(state: &'a GalleryState, items: &'a [GalleryImage]) -> GalleryView<'a> {
    let lightbox = state
        .lightbox
        .and_then(|index| items.get(index).map(|image| (index, image)))
        .map(|(index, image)| LightboxView {
            index,
            image,
            prev: step(index, Direction::Backward, items.len()),
            next: step(index, Direction::Forward, items.len()),
        });

    GalleryView {
        filter: &state.filter,
        items: items
            .iter()
            .enumerate()
            .map(|(index, image)| ItemView {
                index,
                image,
                visible: state.filter.matches(&image.category),
            })
            .collect(),
        lightbox,
    }
}
