use super::load_solutions;
use crate::cli::CheckArgs;
use crate::error::{CliError, Result};
use crate::utils::table;
use rnadesign::core::constraints::pair::DisplayContext;
use rnadesign::core::constraints::set::ConstraintSet;
use rnadesign::workflows::{self, check::PairSource};
use tracing::info;

pub async fn run(args: CheckArgs) -> Result<()> {
    let constraints = args
        .constraints
        .parse::<ConstraintSet>()
        .map_err(|e| CliError::Argument(e.to_string()))?;
    let solutions = load_solutions(&args.input)?;

    let context = if args.mission {
        DisplayContext::Mission
    } else {
        DisplayContext::Puzzle
    };
    let source = args
        .structure
        .clone()
        .map_or(PairSource::Recorded, PairSource::Structure);

    info!("Invoking the core check workflow...");
    let mut checks = workflows::check::run(&solutions, &constraints, context, &source)?;
    if args.failing_only {
        checks.retain(|c| !c.passed());
    }

    print!("{}", table::render_checks(&checks));
    Ok(())
}
