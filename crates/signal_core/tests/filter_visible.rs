use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use signal_core::{
    visible, CategorySelection, CategoryToggle, FilterQuery, Impact, SavedSet, Signal,
    SignalAnnex, SignalCategory, SignalId, ViewCatalog, ViewFilter,
};

fn signal(id: u64, category: SignalCategory, title: &str) -> Signal {
    Signal {
        id: SignalId::Num(id),
        category,
        title: title.to_string(),
        published_at: Utc.with_ymd_and_hms(2025, 3, 10 - id as u32, 9, 0, 0).unwrap(),
        source: "Reuters".to_string(),
        score: 90,
        impact: Impact::Medium,
        summary: String::new(),
        full_analysis: String::new(),
        annex: SignalAnnex::default(),
    }
}

fn feed() -> Vec<Signal> {
    vec![
        signal(
            1,
            SignalCategory::Industrial,
            "Competitor X launches AI-driven analytics platform",
        ),
        signal(
            2,
            SignalCategory::Pricing,
            "SaaS Market Index: median seat price increased by 12%",
        ),
        signal(
            3,
            SignalCategory::Academic,
            "New Transformer architecture reduces inference cost by 40%",
        ),
        signal(
            4,
            SignalCategory::Regulation,
            "EU AI Act: Compliance deadline approached for High-Risk systems",
        ),
        signal(5, SignalCategory::Competitor, "Competitor 'X' Beta leak"),
    ]
}

fn ids(signals: &[&Signal]) -> Vec<SignalId> {
    signals.iter().map(|s| s.id.clone()).collect()
}

fn num_ids(raw: &[u64]) -> Vec<SignalId> {
    raw.iter().copied().map(SignalId::Num).collect()
}

fn run(signals: &[Signal], view: ViewFilter, search: &str, saved: &SavedSet) -> Vec<SignalId> {
    let query = FilterQuery::new(view, search);
    ids(&visible(signals, &query, saved, &ViewCatalog::default()))
}

#[test]
fn all_with_empty_search_is_identity() {
    let signals = feed();
    let got = run(&signals, ViewFilter::All, "", &SavedSet::new());
    assert_eq!(got, num_ids(&[1, 2, 3, 4, 5]));
}

#[test]
fn search_matches_type_label() {
    let signals = feed();
    let got = run(&signals, ViewFilter::All, "pricing", &SavedSet::new());
    assert_eq!(got, num_ids(&[2]));
}

#[test]
fn search_matches_title_case_insensitively() {
    let signals = feed();
    let lower = run(&signals, ViewFilter::All, "competitor", &SavedSet::new());
    let upper = run(&signals, ViewFilter::All, "COMPETITOR", &SavedSet::new());
    // 1 by title, 5 by title and by "Competitor Intel" label.
    assert_eq!(lower, num_ids(&[1, 5]));
    assert_eq!(lower, upper);
}

#[test]
fn saved_view_keeps_saved_ids_in_original_order() {
    let signals = feed();
    let saved: SavedSet = num_ids(&[5, 2]).into_iter().collect();
    let got = run(&signals, ViewFilter::Saved, "", &saved);
    assert_eq!(got, num_ids(&[2, 5]));
}

#[test]
fn saved_view_and_search_are_anded() {
    let signals = feed();
    let saved: SavedSet = num_ids(&[2, 5]).into_iter().collect();
    let got = run(&signals, ViewFilter::Saved, "beta", &saved);
    assert_eq!(got, num_ids(&[5]));

    let got = run(&signals, ViewFilter::Saved, "transformer", &saved);
    assert!(got.is_empty());
}

#[test]
fn no_match_yields_empty_list() {
    let signals = feed();
    let got = run(&signals, ViewFilter::All, "zzz-no-match", &SavedSet::new());
    assert!(got.is_empty());
}

#[test]
fn empty_collection_is_not_an_error() {
    let got = run(&[], ViewFilter::Saved, "anything", &SavedSet::new());
    assert!(got.is_empty());
}

#[test]
fn named_view_applies_bound_category() {
    let signals = feed();
    let got = run(
        &signals,
        ViewFilter::Named("competitor_watch".to_string()),
        "",
        &SavedSet::new(),
    );
    assert_eq!(got, num_ids(&[5]));
}

#[test]
fn unknown_named_view_fails_open() {
    let signals = feed();
    let got = run(
        &signals,
        ViewFilter::parse("quarterly_board_pack"),
        "",
        &SavedSet::new(),
    );
    assert_eq!(got, num_ids(&[1, 2, 3, 4, 5]));
}

#[test]
fn registered_views_extend_the_catalog() {
    let signals = feed();
    let mut catalog = ViewCatalog::default();
    catalog.register("policy", SignalCategory::Regulation);
    catalog.register("saved", SignalCategory::Pricing);

    let query = FilterQuery::new(ViewFilter::parse("policy"), "");
    let got = ids(&visible(&signals, &query, &SavedSet::new(), &catalog));
    assert_eq!(got, num_ids(&[4]));
    assert!(catalog.category_for("saved").is_none());
}

#[test]
fn category_selection_narrows_feed_but_not_saved_view() {
    let signals = feed();
    let saved: SavedSet = num_ids(&[1, 3]).into_iter().collect();
    let categories = CategorySelection::All
        .toggled(CategoryToggle::Category(SignalCategory::Academic))
        .toggled(CategoryToggle::Category(SignalCategory::Pricing));

    let mut query = FilterQuery::new(ViewFilter::All, "");
    query.categories = categories;
    let got = ids(&visible(&signals, &query, &saved, &ViewCatalog::default()));
    assert_eq!(got, num_ids(&[2, 3]));

    query.view = ViewFilter::Saved;
    let got = ids(&visible(&signals, &query, &saved, &ViewCatalog::default()));
    assert_eq!(got, num_ids(&[1, 3]));
}

#[test]
fn category_toggles_fall_back_to_all() {
    let academic = CategoryToggle::Category(SignalCategory::Academic);
    let once = CategorySelection::All.toggled(academic.clone());
    assert!(once.is_active(&SignalCategory::Academic));

    let twice = once.toggled(academic);
    assert_eq!(twice, CategorySelection::All);

    let reset = once_with_two().toggled(CategoryToggle::All);
    assert_eq!(reset, CategorySelection::All);
}

fn once_with_two() -> CategorySelection {
    CategorySelection::All
        .toggled(CategoryToggle::Category(SignalCategory::Academic))
        .toggled(CategoryToggle::Category(SignalCategory::Regulation))
}

#[test]
fn visible_is_an_ordered_subset_for_every_view() {
    let signals = feed();
    let saved: SavedSet = num_ids(&[4, 1]).into_iter().collect();
    let views = [
        ViewFilter::All,
        ViewFilter::Saved,
        ViewFilter::parse("competitor_watch"),
        ViewFilter::parse("unknown"),
    ];
    let searches = ["", "a", "AI", "competitor", "zzz"];

    for view in &views {
        for search in searches {
            let got = run(&signals, view.clone(), search, &saved);
            let positions: Vec<usize> = got
                .iter()
                .map(|id| signals.iter().position(|s| &s.id == id).unwrap())
                .collect();
            assert!(
                positions.windows(2).all(|w| w[0] < w[1]),
                "order broken for {view} / {search:?}"
            );
            if *view == ViewFilter::Saved {
                assert!(got.iter().all(|id| saved.contains(id)));
            }
        }
    }
}
