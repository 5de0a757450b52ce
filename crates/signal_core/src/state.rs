use crate::filter::{self, CategorySelection, FilterQuery, ViewCatalog, ViewFilter};
use crate::view_model::{self, DashboardViewModel};
use crate::{LoadReport, SaveOutcome, SavedSet, Signal, SignalId, SignalStore};

/// Monotonic id handed out per refresh so superseded loads can be dropped.
pub type RequestId = u64;

/// Dashboard root state: one owner for collection, filters, selection and saved ids.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    store: SignalStore,
    saved: SavedSet,
    selection: Option<SignalId>,
    filter: FilterQuery,
    catalog: ViewCatalog,
    last_issued: RequestId,
    last_applied: Option<RequestId>,
    pending: bool,
    dirty: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: ViewCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn view(&self) -> DashboardViewModel {
        view_model::build(self)
    }

    pub fn signals(&self) -> &[Signal] {
        self.store.all()
    }

    pub fn signal(&self, id: &SignalId) -> Option<&Signal> {
        self.store.get(id)
    }

    /// Visible set for the current filter.
    pub fn visible(&self) -> Vec<&Signal> {
        self.visible_for(&self.filter)
    }

    /// Visible set for an arbitrary filter, against the current collection and saved ids.
    pub fn visible_for(&self, query: &FilterQuery) -> Vec<&Signal> {
        filter::visible(self.store.all(), query, &self.saved, &self.catalog)
    }

    /// The stored selection, kept across filter changes. Use
    /// [`effective_selection`](Self::effective_selection) for what the
    /// dashboard actually shows.
    pub fn selection(&self) -> Option<&SignalId> {
        self.selection.as_ref()
    }

    /// The selection as displayed: none while the visible list is empty.
    pub fn effective_selection(&self) -> Option<&SignalId> {
        if self.visible().is_empty() {
            None
        } else {
            self.selection.as_ref()
        }
    }

    pub fn saved(&self) -> &SavedSet {
        &self.saved
    }

    pub fn filter(&self) -> &FilterQuery {
        &self.filter
    }

    pub fn catalog(&self) -> &ViewCatalog {
        &self.catalog
    }

    pub fn is_loading(&self) -> bool {
        self.pending
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn issue_request(&mut self) -> RequestId {
        self.last_issued += 1;
        self.pending = true;
        self.last_issued
    }

    pub(crate) fn last_issued(&self) -> RequestId {
        self.last_issued
    }

    /// Clears the pending flag once the most recent request has an answer.
    pub(crate) fn settle(&mut self, request_id: RequestId) {
        if request_id == self.last_issued {
            self.pending = false;
        }
    }

    /// A result is stale when a newer one has already been applied.
    pub(crate) fn is_superseded(&self, request_id: RequestId) -> bool {
        self.last_applied.is_some_and(|applied| request_id <= applied)
    }

    pub(crate) fn apply_load(&mut self, request_id: RequestId, records: Vec<Signal>) -> LoadReport {
        let report = self.store.load(records);
        self.last_applied = Some(request_id);
        self.settle(request_id);
        if self.selection.is_none() {
            self.selection = self.store.all().first().map(|s| s.id.clone());
        }
        report
    }

    pub(crate) fn prune_saved(&mut self) -> usize {
        self.saved.retain_known(&self.store)
    }

    pub(crate) fn restore_saved(&mut self, ids: Vec<SignalId>) {
        self.saved = ids.into_iter().collect();
        if !self.store.is_empty() {
            self.saved.retain_known(&self.store);
        }
    }

    pub(crate) fn toggle_saved(&mut self, id: SignalId) -> SaveOutcome {
        self.saved.toggle(id)
    }

    pub(crate) fn select(&mut self, id: SignalId) {
        self.selection = Some(id);
    }

    pub(crate) fn set_search(&mut self, search: String) {
        self.filter.search = search;
    }

    pub(crate) fn toggle_view(&mut self, requested: ViewFilter) {
        self.filter.view = self.filter.view.toggled(requested);
    }

    pub(crate) fn set_categories(&mut self, categories: CategorySelection) {
        self.filter.categories = categories;
        self.filter.view = ViewFilter::All;
    }

    pub(crate) fn clear_filters(&mut self) {
        self.filter = FilterQuery::default();
    }
}
