use std::sync::Once;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use signal_core::{
    update, CategoryToggle, DashboardState, Effect, Impact, Msg, Notice, NoticeLevel,
    RelatedSignal, Signal, SignalAnnex, SignalCategory, SignalId, ViewFilter, FEED_HEADING,
    SAVED_HEADING,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(feed_logging::initialize_for_tests);
}

fn signal(id: u64, category: SignalCategory, title: &str) -> Signal {
    Signal {
        id: SignalId::Num(id),
        category,
        title: title.to_string(),
        published_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        source: "Reuters".to_string(),
        score: 90,
        impact: Impact::High,
        summary: format!("summary {id}"),
        full_analysis: String::new(),
        annex: SignalAnnex::default(),
    }
}

fn feed() -> Vec<Signal> {
    vec![
        signal(1, SignalCategory::Industrial, "Competitor X launches analytics"),
        signal(2, SignalCategory::Pricing, "SaaS Market Index: seat price up 12%"),
        signal(3, SignalCategory::Academic, "Sparse attention cuts inference cost"),
        signal(4, SignalCategory::Regulation, "EU AI Act deadline"),
        signal(5, SignalCategory::Competitor, "Competitor 'X' Beta leak"),
    ]
}

fn loaded_state() -> DashboardState {
    let (state, effects) = update(DashboardState::new(), Msg::RefreshRequested);
    assert_eq!(effects, vec![Effect::FetchSignals { request_id: 1 }]);
    let (state, effects) = update(
        state,
        Msg::SignalsLoaded {
            request_id: 1,
            records: feed(),
        },
    );
    assert!(effects.is_empty());
    state
}

fn num(id: u64) -> SignalId {
    SignalId::Num(id)
}

fn row_ids(state: &DashboardState) -> Vec<SignalId> {
    state.view().rows.into_iter().map(|row| row.id).collect()
}

#[test]
fn toggle_saved_twice_restores_membership() {
    init_logging();
    let state = loaded_state();

    let (state, effects) = update(state, Msg::SaveToggled(num(2)));
    assert!(state.saved().contains(&num(2)));
    assert_eq!(
        effects,
        vec![
            Effect::Notify(Notice::new(
                NoticeLevel::Success,
                "Signal saved to your list"
            )),
            Effect::PersistSaved { ids: vec![num(2)] },
        ]
    );

    let (state, effects) = update(state, Msg::SaveToggled(num(2)));
    assert!(state.saved().is_empty());
    assert_eq!(
        effects,
        vec![
            Effect::Notify(Notice::new(
                NoticeLevel::Info,
                "Signal removed from saved items"
            )),
            Effect::PersistSaved { ids: vec![] },
        ]
    );
}

#[test]
fn rapid_toggles_report_the_outcome_they_applied() {
    init_logging();
    let mut state = loaded_state();
    for round in 0..6 {
        let (next, effects) = update(state, Msg::SaveToggled(num(3)));
        let saved_now = next.saved().contains(&num(3));
        let expected = if saved_now {
            "Signal saved to your list"
        } else {
            "Signal removed from saved items"
        };
        match &effects[0] {
            Effect::Notify(notice) => assert_eq!(notice.message, expected, "round {round}"),
            other => panic!("unexpected effect {other:?}"),
        }
        state = next;
    }
}

#[test]
fn view_filter_change_is_self_cancelling() {
    init_logging();
    let state = loaded_state();

    let (state, _) = update(state, Msg::ViewFilterChanged(ViewFilter::Saved));
    assert_eq!(state.filter().view, ViewFilter::Saved);
    assert_eq!(state.view().heading, SAVED_HEADING);

    let (state, _) = update(state, Msg::ViewFilterChanged(ViewFilter::Saved));
    assert_eq!(state.filter().view, ViewFilter::All);
    assert_eq!(state.view().heading, FEED_HEADING);
}

#[test]
fn switching_between_views_goes_directly() {
    init_logging();
    let state = loaded_state();
    let (state, _) = update(state, Msg::ViewFilterChanged(ViewFilter::Saved));
    let (state, _) = update(
        state,
        Msg::ViewFilterChanged(ViewFilter::parse("competitor_watch")),
    );
    assert_eq!(
        state.filter().view,
        ViewFilter::Named("competitor_watch".to_string())
    );
    assert_eq!(row_ids(&state), vec![num(5)]);
}

#[test]
fn saved_view_lists_saved_signals() {
    init_logging();
    let state = loaded_state();
    let (state, _) = update(state, Msg::SaveToggled(num(5)));
    let (state, _) = update(state, Msg::SaveToggled(num(2)));
    let (state, _) = update(state, Msg::ViewFilterChanged(ViewFilter::Saved));

    let view = state.view();
    assert_eq!(row_ids(&state), vec![num(2), num(5)]);
    assert!(view.rows.iter().all(|row| row.saved));
    assert_eq!(view.saved_count, 2);
}

#[test]
fn no_results_offers_clear_filters() {
    init_logging();
    let state = loaded_state();
    let (state, _) = update(state, Msg::SearchChanged("zzz-no-match".to_string()));

    let view = state.view();
    assert!(view.rows.is_empty());
    assert_eq!(view.selected, None);
    assert!(view.detail.is_none());
    let empty = view.empty_state.expect("empty state");
    assert_eq!(empty.message, "No signals found for \"zzz-no-match\".");
    assert!(empty.can_clear_filters);

    let (state, _) = update(state, Msg::ClearFilters);
    assert_eq!(row_ids(&state), (1..=5).map(num).collect::<Vec<_>>());
    assert!(state.view().empty_state.is_none());
    assert_eq!(state.filter().view, ViewFilter::All);
    assert_eq!(state.filter().search, "");
}

#[test]
fn empty_saved_view_message_mentions_selection() {
    init_logging();
    let state = loaded_state();
    let (state, _) = update(state, Msg::ViewFilterChanged(ViewFilter::Saved));
    let empty = state.view().empty_state.expect("empty state");
    assert_eq!(empty.message, "No signals found for this selection.");
}

#[test]
fn empty_list_hides_selection_until_filters_clear() {
    init_logging();
    let state = loaded_state();
    let (state, _) = update(state, Msg::SearchChanged("nothing matches this".to_string()));

    assert_eq!(state.selection(), Some(&num(1)));
    assert_eq!(state.effective_selection(), None);
    assert_eq!(state.view().selected, None);

    let (state, _) = update(state, Msg::ClearFilters);
    assert_eq!(state.effective_selection(), Some(&num(1)));
    assert_eq!(state.view().selected, Some(num(1)));
}

#[test]
fn category_definitions_use_dashboard_wording() {
    assert_eq!(
        SignalCategory::Pricing.definition(),
        Some(
            "Detailed tracking of competitor pricing models, SKU changes, and discounting strategies across the vertical."
        )
    );
    assert_eq!(
        SignalCategory::Regulation.definition(),
        Some(
            "Alerts on new legislative frameworks, compliance deadlines, and regulatory risks affecting AI and data privacy."
        )
    );
    assert_eq!(SignalCategory::Other("market".to_string()).definition(), None);
}

#[test]
fn first_load_selects_first_signal() {
    init_logging();
    let state = loaded_state();
    assert_eq!(state.selection(), Some(&num(1)));
    let detail = state.view().detail.expect("detail");
    assert_eq!(detail.signal.id, num(1));
    assert_eq!(
        detail.category_definition,
        SignalCategory::Industrial.definition()
    );
}

#[test]
fn selection_survives_filtering_it_out_of_the_list() {
    init_logging();
    let state = loaded_state();
    let (state, _) = update(state, Msg::SignalSelected(num(4)));
    let (state, _) = update(state, Msg::SearchChanged("competitor".to_string()));

    let view = state.view();
    assert_eq!(row_ids(&state), vec![num(1), num(5)]);
    assert_eq!(view.selected, Some(num(4)));
    assert_eq!(view.detail.expect("detail").signal.id, num(4));
    assert!(view.rows.iter().all(|row| !row.selected));
}

#[test]
fn unknown_selection_renders_no_detail_and_keeps_working() {
    init_logging();
    let state = loaded_state();
    let ghost = SignalId::from("not-loaded");
    let (state, _) = update(state, Msg::SignalSelected(ghost.clone()));
    assert_eq!(state.selection(), Some(&ghost));
    assert!(state.view().detail.is_none());

    let (state, effects) = update(state, Msg::SaveToggled(ghost.clone()));
    assert!(state.saved().contains(&ghost));
    assert_eq!(effects.len(), 2);

    let (state, _) = update(state, Msg::ViewFilterChanged(ViewFilter::Saved));
    assert!(state.view().rows.is_empty());
}

#[test]
fn category_toggle_resets_view_filter() {
    init_logging();
    let state = loaded_state();
    let (state, _) = update(state, Msg::ViewFilterChanged(ViewFilter::Saved));
    let (state, _) = update(
        state,
        Msg::CategoryToggled(CategoryToggle::Category(SignalCategory::Academic)),
    );

    let view = state.view();
    assert_eq!(view.view_filter, ViewFilter::All);
    assert!(!view.all_categories_active);
    assert_eq!(row_ids(&state), vec![num(3)]);
    let academic = view
        .categories
        .iter()
        .find(|c| c.key == "academic")
        .expect("academic row");
    assert!(academic.active);
    assert_eq!(academic.count, 1);
}

#[test]
fn superseded_load_is_dropped() {
    init_logging();
    let state = DashboardState::new();
    let (state, _) = update(state, Msg::RefreshRequested);
    let (state, _) = update(state, Msg::RefreshRequested);
    assert!(state.is_loading());

    let newer = vec![signal(9, SignalCategory::Pricing, "Newer collection")];
    let (state, _) = update(
        state,
        Msg::SignalsLoaded {
            request_id: 2,
            records: newer,
        },
    );
    assert!(!state.is_loading());

    let (state, effects) = update(
        state,
        Msg::SignalsLoaded {
            request_id: 1,
            records: feed(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(row_ids(&state), vec![num(9)]);
}

#[test]
fn reload_prunes_saved_ids_and_persists() {
    init_logging();
    let state = loaded_state();
    let (state, _) = update(state, Msg::SaveToggled(num(2)));
    let (state, _) = update(state, Msg::SaveToggled(num(4)));
    let (state, _) = update(state, Msg::RefreshRequested);

    let next = feed().into_iter().filter(|s| s.id != num(4)).collect();
    let (state, effects) = update(
        state,
        Msg::SignalsLoaded {
            request_id: 2,
            records: next,
        },
    );
    assert_eq!(effects, vec![Effect::PersistSaved { ids: vec![num(2)] }]);
    assert_eq!(state.saved().to_vec(), vec![num(2)]);
    // Existing selection is kept across reloads.
    assert_eq!(state.selection(), Some(&num(1)));
}

#[test]
fn duplicate_ids_surface_as_diagnostic() {
    init_logging();
    let (state, _) = update(DashboardState::new(), Msg::RefreshRequested);
    let mut records = feed();
    records.push(signal(2, SignalCategory::Pricing, "Corrected pricing index"));

    let (state, effects) = update(
        state,
        Msg::SignalsLoaded {
            request_id: 1,
            records,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::DataQualityWarning {
            duplicate_ids: vec![num(2)]
        }]
    );
    assert_eq!(state.signals().len(), 6);
    assert_eq!(
        state.signal(&num(2)).map(|s| s.title.as_str()),
        Some("Corrected pricing index")
    );
}

#[test]
fn load_failure_keeps_collection_and_notifies() {
    init_logging();
    let state = loaded_state();
    let (state, _) = update(state, Msg::RefreshRequested);
    let (mut state, effects) = update(
        state,
        Msg::SignalsLoadFailed {
            request_id: 2,
            message: "http status 503".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Notify(Notice::new(
            NoticeLevel::Error,
            "Could not load signals: http status 503"
        ))]
    );
    assert!(!state.is_loading());
    assert_eq!(state.signals().len(), 5);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn restored_saved_ids_apply_before_first_load() {
    init_logging();
    let (state, _) = update(
        DashboardState::new(),
        Msg::SavedRestored(vec![num(3), SignalId::from("gone")]),
    );
    assert_eq!(state.saved().len(), 2);

    let (state, _) = update(state, Msg::RefreshRequested);
    let (state, effects) = update(
        state,
        Msg::SignalsLoaded {
            request_id: 1,
            records: feed(),
        },
    );
    assert_eq!(effects, vec![Effect::PersistSaved { ids: vec![num(3)] }]);
}

#[test]
fn related_links_flag_missing_targets() {
    init_logging();
    let mut first = signal(1, SignalCategory::Industrial, "Competitor X launches analytics");
    first.annex.related = vec![
        RelatedSignal {
            id: num(5),
            title: "Competitor 'X' Beta leak".to_string(),
            date: "2 weeks ago".to_string(),
        },
        RelatedSignal {
            id: num(42),
            title: "Archived".to_string(),
            date: "last year".to_string(),
        },
    ];
    let mut records = feed();
    records[0] = first;

    let (state, _) = update(DashboardState::new(), Msg::RefreshRequested);
    let (state, _) = update(
        state,
        Msg::SignalsLoaded {
            request_id: 1,
            records,
        },
    );
    let related = state.view().detail.expect("detail").related;
    assert_eq!(
        related.iter().map(|r| r.available).collect::<Vec<_>>(),
        vec![true, false]
    );
}
