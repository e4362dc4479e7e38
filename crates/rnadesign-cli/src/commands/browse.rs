use super::{load_config, load_solutions, view_query};
use crate::cli::BrowseArgs;
use crate::error::Result;
use crate::settings_store::SettingsStore;
use crate::utils::table;
use rnadesign::workflows;
use tracing::info;

pub async fn run(args: BrowseArgs, store: &SettingsStore) -> Result<()> {
    let config = load_config(&args.puzzle)?;
    let solutions = load_solutions(&args.puzzle.input)?;

    let mut query = view_query(&args.view)?;
    query.scroll_proportion = args.scroll;
    query.scroll_rows = args.scroll_rows;
    query.settings = store.load_stored()?;

    info!("Invoking the core browse workflow...");
    let report = workflows::browse::run(solutions, &config, &query)?;

    print!("{}", table::render_report(&report));
    Ok(())
}
