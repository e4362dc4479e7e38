use super::{load_config, load_solutions};
use crate::cli::MarkArgs;
use crate::error::Result;
use crate::settings_store::SettingsStore;
use crate::utils::table;
use rnadesign::core::models::ids::SolutionId;
use rnadesign::workflows::{self, browse::BrowseQuery};
use tracing::info;

pub async fn run(args: MarkArgs, store: &SettingsStore) -> Result<()> {
    let config = load_config(&args.puzzle)?;
    let solutions = load_solutions(&args.puzzle.input)?;

    let stored = store.load()?;
    let query = BrowseQuery {
        settings: Some(stored.clone()),
        toggle_marks: args.ids.iter().copied().map(SolutionId).collect(),
        ..Default::default()
    };
    let report = workflows::browse::run(solutions, &config, &query)?;

    // Columns hidden for this puzzle must survive in the stored set.
    let mut settings = stored;
    settings.marked = report.settings.marked.clone();
    store.save(&settings)?;
    info!("{} solution(s) marked.", settings.marked.len());

    print!("{}", table::render_report(&report));
    Ok(())
}
