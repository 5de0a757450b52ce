use crate::{CategoryToggle, RequestId, Signal, SignalId, ViewFilter};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the search box.
    SearchChanged(String),
    /// User clicked a view in the sidebar. Clicking the active view clears it.
    ViewFilterChanged(ViewFilter),
    /// User toggled a category in the sidebar.
    CategoryToggled(CategoryToggle),
    /// User clicked "Clear filters" on the empty state.
    ClearFilters,
    /// User opened a signal in the detail panel.
    SignalSelected(SignalId),
    /// User clicked the bookmark button.
    SaveToggled(SignalId),
    /// Saved ids restored from the persistence hook.
    SavedRestored(Vec<SignalId>),
    /// Ask the source collaborator for a fresh collection.
    RefreshRequested,
    /// Source collaborator delivered a collection.
    SignalsLoaded {
        request_id: RequestId,
        records: Vec<Signal>,
    },
    /// Source collaborator failed; the current collection stays.
    SignalsLoadFailed {
        request_id: RequestId,
        message: String,
    },
    /// Render tick.
    Tick,
    NoOp,
}
