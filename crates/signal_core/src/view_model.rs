use crate::filter::{self, CategorySelection, ViewFilter};
use crate::{DashboardState, Impact, Signal, SignalId};

pub const FEED_HEADING: &str = "Intelligence Feed";
pub const SAVED_HEADING: &str = "Saved Signals";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardViewModel {
    pub heading: &'static str,
    pub view_filter: ViewFilter,
    pub search_query: String,
    pub rows: Vec<SignalRowView>,
    pub total: usize,
    pub saved_count: usize,
    pub categories: Vec<CategoryRowView>,
    pub all_categories_active: bool,
    pub empty_state: Option<EmptyStateView>,
    pub selected: Option<SignalId>,
    pub detail: Option<SignalDetailView>,
    pub loading: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalRowView {
    pub id: SignalId,
    pub title: String,
    pub category_label: String,
    pub impact: Impact,
    pub published: String,
    pub saved: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRowView {
    pub key: String,
    pub label: String,
    pub count: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyStateView {
    pub message: String,
    /// Offer the one-click reset back to the unfiltered feed.
    pub can_clear_filters: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalDetailView {
    pub signal: Signal,
    pub category_definition: Option<&'static str>,
    pub saved: bool,
    pub related: Vec<RelatedLinkView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedLinkView {
    pub id: SignalId,
    pub title: String,
    pub date: String,
    /// False when the referenced signal is not part of the loaded collection.
    pub available: bool,
}

pub(crate) fn build(state: &DashboardState) -> DashboardViewModel {
    let query = state.filter();
    let visible = state.visible();

    let selected = state.effective_selection().cloned();

    let rows = visible
        .iter()
        .map(|signal| SignalRowView {
            id: signal.id.clone(),
            title: signal.title.clone(),
            category_label: signal.category.label().to_string(),
            impact: signal.impact,
            published: signal.published_at.format("%Y-%m-%d").to_string(),
            saved: state.saved().contains(&signal.id),
            selected: selected.as_ref() == Some(&signal.id),
        })
        .collect::<Vec<_>>();

    let empty_state = rows.is_empty().then(|| EmptyStateView {
        message: if query.search.is_empty() {
            "No signals found for this selection.".to_string()
        } else {
            format!("No signals found for \"{}\".", query.search)
        },
        can_clear_filters: !query.is_default(),
    });

    let categories = filter::category_counts(state.signals())
        .into_iter()
        .map(|entry| CategoryRowView {
            key: entry.category.key().to_string(),
            label: entry.category.label().to_string(),
            count: entry.count,
            active: query.categories.is_active(&entry.category),
        })
        .collect();

    let detail = selected
        .as_ref()
        .and_then(|id| state.signal(id))
        .map(|signal| detail_view(state, signal));

    DashboardViewModel {
        heading: if query.view == ViewFilter::Saved {
            SAVED_HEADING
        } else {
            FEED_HEADING
        },
        view_filter: query.view.clone(),
        search_query: query.search.clone(),
        rows,
        total: state.signals().len(),
        saved_count: state.saved().len(),
        categories,
        all_categories_active: query.categories == CategorySelection::All,
        empty_state,
        selected,
        detail,
        loading: state.is_loading(),
        dirty: state.is_dirty(),
    }
}

fn detail_view(state: &DashboardState, signal: &Signal) -> SignalDetailView {
    SignalDetailView {
        signal: signal.clone(),
        category_definition: signal.category.definition(),
        saved: state.saved().contains(&signal.id),
        related: signal
            .annex
            .related
            .iter()
            .map(|related| RelatedLinkView {
                id: related.id.clone(),
                title: related.title.clone(),
                date: related.date.clone(),
                available: state.signal(&related.id).is_some(),
            })
            .collect(),
    }
}
