use feed_logging::{feed_debug, feed_info, feed_warn};

use crate::{DashboardState, Effect, Msg, Notice, NoticeLevel, SaveOutcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: DashboardState, msg: Msg) -> (DashboardState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchChanged(search) => {
            if state.filter().search != search {
                state.set_search(search);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ViewFilterChanged(view) => {
            state.toggle_view(view);
            state.mark_dirty();
            Vec::new()
        }
        Msg::CategoryToggled(toggle) => {
            let next = state.filter().categories.toggled(toggle);
            state.set_categories(next);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ClearFilters => {
            if !state.filter().is_default() {
                state.clear_filters();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SignalSelected(id) => {
            if state.signal(&id).is_none() {
                feed_debug!("Selected signal {} is not in the current collection", id);
            }
            state.select(id);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SaveToggled(id) => {
            let outcome = state.toggle_saved(id);
            state.mark_dirty();
            let level = match outcome {
                SaveOutcome::Saved => NoticeLevel::Success,
                SaveOutcome::Removed => NoticeLevel::Info,
            };
            vec![
                Effect::Notify(Notice::new(level, outcome.notice())),
                Effect::PersistSaved {
                    ids: state.saved().to_vec(),
                },
            ]
        }
        Msg::SavedRestored(ids) => {
            state.restore_saved(ids);
            state.mark_dirty();
            Vec::new()
        }
        Msg::RefreshRequested => {
            let request_id = state.issue_request();
            state.mark_dirty();
            vec![Effect::FetchSignals { request_id }]
        }
        Msg::SignalsLoaded {
            request_id,
            records,
        } => {
            if state.is_superseded(request_id) {
                feed_debug!("Dropping superseded signal load {}", request_id);
                return (state, Vec::new());
            }

            let report = state.apply_load(request_id, records);
            let pruned = state.prune_saved();
            state.mark_dirty();
            feed_info!(
                "Applied signal load {} ({} records, {} saved ids pruned)",
                request_id,
                report.loaded,
                pruned
            );

            let mut effects = Vec::new();
            if !report.is_clean() {
                effects.push(Effect::DataQualityWarning {
                    duplicate_ids: report.duplicate_ids,
                });
            }
            if pruned > 0 {
                effects.push(Effect::PersistSaved {
                    ids: state.saved().to_vec(),
                });
            }
            effects
        }
        Msg::SignalsLoadFailed {
            request_id,
            message,
        } => {
            if request_id != state.last_issued() || state.is_superseded(request_id) {
                feed_debug!("Ignoring failure of superseded signal load {}", request_id);
                return (state, Vec::new());
            }
            feed_warn!("Signal load {} failed: {}", request_id, message);
            state.settle(request_id);
            state.mark_dirty();
            vec![Effect::Notify(Notice::new(
                NoticeLevel::Error,
                format!("Could not load signals: {message}"),
            ))]
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
