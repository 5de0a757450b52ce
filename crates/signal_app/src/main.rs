mod config;
mod effects;
mod logging;
mod render;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use feed_logging::feed_info;
use signal_core::{CategoryToggle, DashboardState, Msg, SignalCategory, SignalId, ViewFilter};
use signal_source::{
    FetchSettings, FixtureSource, InMemorySavedStore, RestSignalFetcher, RonSavedStore,
    SavedSignalStore, SignalSource,
};

use config::{AppConfig, DEFAULT_FIXTURE};
use effects::EffectRunner;

#[derive(Debug, Parser)]
#[command(name = "signal_app", about = "Browse the research signal feed")]
struct Cli {
    /// Path to the RON configuration file.
    #[arg(long, default_value = "dashboard.ron")]
    config: PathBuf,
    /// Load signals from a JSON fixture instead of the configured source.
    #[arg(long)]
    fixture: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the visible signals.
    List {
        /// View lens: all, saved, or a named view such as competitor_watch.
        #[arg(long)]
        view: Option<String>,
        /// Case-insensitive text matched against titles and category labels.
        #[arg(long, default_value = "")]
        search: String,
        /// Restrict to categories; repeatable.
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    /// Show one signal in full.
    Show { id: String },
    /// Toggle the bookmark on a signal.
    Save { id: String },
}

impl Command {
    fn messages(&self) -> Vec<Msg> {
        match self {
            Command::List {
                view,
                search,
                categories,
            } => {
                // Category toggles reset the view, so they go first.
                let mut msgs: Vec<Msg> = categories
                    .iter()
                    .map(|key| {
                        Msg::CategoryToggled(CategoryToggle::Category(SignalCategory::from_key(
                            key,
                        )))
                    })
                    .collect();
                if let Some(view) = view {
                    let view = ViewFilter::parse(view);
                    if view != ViewFilter::All {
                        msgs.push(Msg::ViewFilterChanged(view));
                    }
                }
                msgs.push(Msg::SearchChanged(search.clone()));
                msgs
            }
            Command::Show { id } => vec![Msg::SignalSelected(SignalId::parse(id))],
            Command::Save { id } => vec![Msg::SaveToggled(SignalId::parse(id))],
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;
    logging::initialize(config.log, &config.log_level);

    let source = build_source(&cli, &config)?;
    let saved = build_saved_store(&config);
    let mut runner = EffectRunner::new(source, saved).context("cannot start signal source")?;

    let state = DashboardState::with_catalog(config.catalog());
    let state = runner.restore_saved(state);
    let state = runner.dispatch(state, Msg::RefreshRequested);
    let mut state = runner.await_load(state, config.load_timeout());

    for msg in cli.command.messages() {
        state = runner.dispatch(state, msg);
    }

    print!("{}", render::render_notices(&runner.take_notices()));
    let view = state.view();
    match &cli.command {
        Command::Show { id } => match &view.detail {
            Some(detail) => print!("{}", render::render_detail(detail)),
            None => bail!("signal {id} is not in the current feed"),
        },
        Command::List { .. } | Command::Save { .. } => print!("{}", render::render_list(&view)),
    }
    Ok(())
}

fn build_source(cli: &Cli, config: &AppConfig) -> anyhow::Result<Arc<dyn SignalSource>> {
    if let Some(path) = cli.fixture.as_ref().or(config.fixture.as_ref()) {
        feed_info!("Using fixture source {:?}", path);
        return Ok(Arc::new(FixtureSource::new(path)));
    }

    if let Some(backend) = &config.backend {
        let api_key = std::env::var(&backend.api_key_env).with_context(|| {
            format!("environment variable {} is not set", backend.api_key_env)
        })?;
        let mut settings = FetchSettings::new(backend.base_url.clone(), api_key);
        settings.table = backend.table.clone();
        settings.request_timeout = Duration::from_secs(backend.request_timeout_secs);
        feed_info!("Using backend source {}", backend.base_url);
        return Ok(Arc::new(RestSignalFetcher::new(settings)));
    }

    let fallback = PathBuf::from(DEFAULT_FIXTURE);
    if !fallback.is_file() {
        bail!("no signal source configured and {DEFAULT_FIXTURE} does not exist");
    }
    Ok(Arc::new(FixtureSource::new(fallback)))
}

fn build_saved_store(config: &AppConfig) -> Arc<dyn SavedSignalStore> {
    match &config.saved_path {
        Some(path) => Arc::new(RonSavedStore::new(path)),
        None => Arc::new(InMemorySavedStore::new()),
    }
}
