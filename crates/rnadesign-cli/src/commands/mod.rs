pub mod browse;
pub mod check;
pub mod columns;
pub mod delete;
pub mod mark;
pub mod vote;
pub mod watch;

use crate::cli::{PuzzleArgs, ViewArgs};
use crate::config::PartialBrowserConfig;
use crate::error::{CliError, Result};
use crate::service::LocalSolutionService;
use crate::settings_store::SettingsStore;
use crate::utils::{parser, table};
use rnadesign::core::io::table::CsvSolutionTable;
use rnadesign::core::io::traits::SolutionTable;
use rnadesign::core::models::solution::Solution;
use rnadesign::engine::config::BrowserConfig;
use rnadesign::engine::error::EngineError;
use rnadesign::engine::model::SolutionListModel;
use rnadesign::engine::session::BrowserSession;
use rnadesign::engine::votes::{self, VoteProcessor};
use rnadesign::workflows::browse::{BrowseQuery, BrowseReport};
use std::path::Path;
use tracing::info;

pub(crate) fn load_config(args: &PuzzleArgs) -> Result<BrowserConfig> {
    let partial = PartialBrowserConfig::load(args)?;
    info!("Merging configuration from file and CLI arguments...");
    partial.merge_with_cli(args)
}

pub(crate) fn load_solutions(path: &Path) -> Result<Vec<Solution>> {
    info!("Loading solutions from {:?}", path);
    CsvSolutionTable::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

/// Turns the `--sort`, `--filter` and `--clear-filter` flags into a browse query.
pub(crate) fn view_query(view: &ViewArgs) -> Result<BrowseQuery> {
    let argument = |e: parser::ParseError| CliError::Argument(e.to_string());
    Ok(BrowseQuery {
        sort: view
            .sort
            .iter()
            .map(|s| parser::parse_sort_arg(s))
            .collect::<std::result::Result<_, _>>()
            .map_err(argument)?,
        filters: view
            .filter
            .iter()
            .map(|f| parser::parse_filter_arg(f))
            .collect::<std::result::Result<_, _>>()
            .map_err(argument)?,
        clear_filters: view
            .clear_filter
            .iter()
            .map(|c| parser::parse_category(c))
            .collect::<std::result::Result<_, _>>()
            .map_err(argument)?,
        rows: view.rows,
        ..Default::default()
    })
}

pub(crate) fn apply_view(
    model: &mut SolutionListModel,
    query: &BrowseQuery,
) -> std::result::Result<(), EngineError> {
    for (category, order, args) in &query.sort {
        model.add_criterion(*category, *order, args.clone())?;
    }
    for category in &query.clear_filters {
        model.clear_filter(*category);
    }
    for predicate in &query.filters {
        model.set_filter(predicate.clone())?;
    }
    Ok(())
}

/// A session over an empty model with the configured view and any stored settings.
pub(crate) fn new_session(
    config: &BrowserConfig,
    store: &SettingsStore,
    query: &BrowseQuery,
) -> Result<BrowserSession> {
    let mut model = SolutionListModel::from_config(config)?;
    if let Some(settings) = store.load_stored()? {
        model.apply_settings(&settings);
    }
    apply_view(&mut model, query)?;
    Ok(BrowserSession::new(
        model,
        VoteProcessor::new(config.vote_budget),
    ))
}

/// Opens a session and performs the first refresh before returning it.
pub(crate) async fn open_session(
    config: &BrowserConfig,
    store: &SettingsStore,
    service: &LocalSolutionService,
) -> Result<BrowserSession> {
    let mut session = new_session(config, store, &BrowseQuery::default())?;
    let ticket = session.begin_refresh()?.ok_or_else(|| {
        CliError::Other(anyhow::anyhow!("A refresh is already in flight."))
    })?;
    let solutions = service.fetch().await?;
    session.complete_refresh(ticket, Ok(solutions));
    session.run_idle();
    Ok(session)
}

pub(crate) fn render_session(
    session: &BrowserSession,
    config: &BrowserConfig,
    rows: usize,
) -> String {
    let model = session.model();
    let slots = votes::slots_left(
        config.submission_slots,
        model.ordered_all(),
        config.player.as_deref(),
        config.round,
    );
    let summary = votes::votes_summary(session.votes().votes_left(), slots, config.novote);
    table::render_report(&BrowseReport::from_model(model, rows, summary))
}
