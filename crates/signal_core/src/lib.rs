//! Signal feed core: pure dashboard state machine, filter engine and view-model helpers.
mod effect;
pub mod filter;
mod msg;
mod saved;
mod signal;
mod state;
mod store;
mod update;
mod view_model;

pub use effect::{Effect, Notice, NoticeLevel};
pub use filter::{
    category_counts, visible, CategoryCount, CategorySelection, CategoryToggle, FilterQuery,
    NamedView, ViewCatalog, ViewFilter,
};
pub use msg::Msg;
pub use saved::{SaveOutcome, SavedSet};
pub use signal::{
    ChartPayload, CorrelationPoint, Impact, MarketMapPoint, Metric, MetricTrend, RelatedSignal,
    RevenuePoint, Signal, SignalAnnex, SignalCategory, SignalId, SourceCitation, TableData,
    DEFAULT_SCORE, DEFAULT_SOURCE,
};
pub use state::{DashboardState, RequestId};
pub use store::{LoadReport, SignalStore};
pub use update::update;
pub use view_model::{
    CategoryRowView, DashboardViewModel, EmptyStateView, RelatedLinkView, SignalDetailView,
    SignalRowView, FEED_HEADING, SAVED_HEADING,
};
