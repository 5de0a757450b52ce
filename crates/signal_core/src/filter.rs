//! Visible-set computation for the signal list.
//!
//! The visible set is always derived from the collection, the current
//! [`FilterQuery`] and the saved ids. It is never stored.

use std::collections::BTreeSet;
use std::fmt;

use crate::{SavedSet, Signal, SignalCategory};

/// The named lens applied before search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ViewFilter {
    #[default]
    All,
    Saved,
    Named(String),
}

impl ViewFilter {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "all" => ViewFilter::All,
            "saved" => ViewFilter::Saved,
            other => ViewFilter::Named(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ViewFilter::All => "all",
            ViewFilter::Saved => "saved",
            ViewFilter::Named(name) => name,
        }
    }

    /// Selecting the active view clears back to `All`; anything else switches to it.
    pub fn toggled(&self, requested: ViewFilter) -> ViewFilter {
        if *self == requested {
            ViewFilter::All
        } else {
            requested
        }
    }
}

impl fmt::Display for ViewFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedView {
    pub name: String,
    pub category: SignalCategory,
}

/// Named views and the category predicate each one is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCatalog {
    views: Vec<NamedView>,
}

impl Default for ViewCatalog {
    fn default() -> Self {
        Self {
            views: vec![NamedView {
                name: "competitor_watch".to_string(),
                category: SignalCategory::Competitor,
            }],
        }
    }
}

impl ViewCatalog {
    pub fn empty() -> Self {
        Self { views: Vec::new() }
    }

    /// Adds or rebinds a view. `all` and `saved` are reserved and ignored.
    pub fn register(&mut self, name: impl Into<String>, category: SignalCategory) {
        let name = name.into();
        if !matches!(ViewFilter::parse(&name), ViewFilter::Named(_)) {
            return;
        }
        match self.views.iter_mut().find(|view| view.name == name) {
            Some(existing) => existing.category = category,
            None => self.views.push(NamedView { name, category }),
        }
    }

    pub fn category_for(&self, name: &str) -> Option<&SignalCategory> {
        self.views
            .iter()
            .find(|view| view.name == name)
            .map(|view| &view.category)
    }

    pub fn views(&self) -> &[NamedView] {
        &self.views
    }
}

/// Sidebar category toggles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelection {
    #[default]
    All,
    Only(BTreeSet<SignalCategory>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryToggle {
    All,
    Category(SignalCategory),
}

impl CategorySelection {
    pub fn toggled(&self, toggle: CategoryToggle) -> CategorySelection {
        let category = match toggle {
            CategoryToggle::All => return CategorySelection::All,
            CategoryToggle::Category(category) => category,
        };
        let mut active = match self {
            CategorySelection::All => BTreeSet::new(),
            CategorySelection::Only(set) => set.clone(),
        };
        if !active.remove(&category) {
            active.insert(category);
        }
        if active.is_empty() {
            CategorySelection::All
        } else {
            CategorySelection::Only(active)
        }
    }

    pub fn is_active(&self, category: &SignalCategory) -> bool {
        match self {
            CategorySelection::All => false,
            CategorySelection::Only(set) => set.contains(category),
        }
    }

    fn admits(&self, category: &SignalCategory) -> bool {
        match self {
            CategorySelection::All => true,
            CategorySelection::Only(set) => set.contains(category),
        }
    }
}

/// Transient filter state. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterQuery {
    pub view: ViewFilter,
    pub search: String,
    pub categories: CategorySelection,
}

impl FilterQuery {
    pub fn new(view: ViewFilter, search: impl Into<String>) -> Self {
        Self {
            view,
            search: search.into(),
            categories: CategorySelection::All,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == FilterQuery::default()
    }
}

/// Returns the visible subset in collection order.
///
/// View, category and search predicates are ANDed. Unknown named views
/// fail open. The `Saved` view ignores category toggles.
pub fn visible<'a>(
    signals: &'a [Signal],
    query: &FilterQuery,
    saved: &SavedSet,
    catalog: &ViewCatalog,
) -> Vec<&'a Signal> {
    let needle = query.search.to_lowercase();
    let bound_category = match &query.view {
        ViewFilter::Named(name) => catalog.category_for(name),
        _ => None,
    };

    signals
        .iter()
        .filter(|signal| match &query.view {
            ViewFilter::Saved => saved.contains(&signal.id),
            ViewFilter::Named(_) => bound_category.map_or(true, |cat| signal.category == *cat),
            ViewFilter::All => true,
        })
        .filter(|signal| {
            query.view == ViewFilter::Saved || query.categories.admits(&signal.category)
        })
        .filter(|signal| needle.is_empty() || matches_search(signal, &needle))
        .collect()
}

/// `needle` must already be lowercased.
fn matches_search(signal: &Signal, needle: &str) -> bool {
    signal.title.to_lowercase().contains(needle)
        || signal.category.label().to_lowercase().contains(needle)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: SignalCategory,
    pub count: usize,
}

/// Per-category totals in first-seen order.
pub fn category_counts(signals: &[Signal]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for signal in signals {
        match counts.iter_mut().find(|c| c.category == signal.category) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                category: signal.category.clone(),
                count: 1,
            }),
        }
    }
    counts
}
