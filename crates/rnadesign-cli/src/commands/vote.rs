use super::{load_config, open_session, render_session};
use crate::cli::VoteArgs;
use crate::error::{CliError, Result};
use crate::service::LocalSolutionService;
use crate::settings_store::SettingsStore;
use crate::ui::UiHandle;
use rnadesign::core::models::ids::SolutionId;
use rnadesign::engine::error::EngineError;
use rnadesign::engine::session::{Completion, RequestKind};
use tracing::{debug, info};

pub async fn run(args: VoteArgs, store: &SettingsStore, ui: UiHandle) -> Result<()> {
    let config = load_config(&args.puzzle)?;
    if config.novote {
        return Err(CliError::Argument(format!(
            "Puzzle {} no longer accepts votes.",
            config.puzzle_id
        )));
    }
    let service = LocalSolutionService::new(&args.puzzle.input, config.vote_budget);
    let mut session = open_session(&config, store, &service).await?;

    let id = SolutionId(args.id);
    if session.model().find(id).is_none() {
        return Err(EngineError::SolutionNotFound(id).into());
    }

    let ticket = session.ticket(RequestKind::Vote(id))?;
    ui.status(format!("Voting on solution {}...", id));
    let result = service.toggle_vote(id).await;
    let failure = result.as_ref().err().cloned();

    match session.complete_vote(ticket, result) {
        Completion::Voted {
            new_achievement_ids,
        } => {
            let now = session.votes().tally(id).map_or(0, |t| t.my_votes);
            ui.done(if now > 0 {
                format!("Voted for solution {}.", id)
            } else {
                format!("Withdrew vote from solution {}.", id)
            });
            for achievement in new_achievement_ids {
                ui.notify(format!("New achievement: {}", achievement));
            }
        }
        Completion::Notify(msg) => {
            ui.notify(msg);
            if let Some(e) = failure {
                return Err(e.into());
            }
        }
        other => debug!("Vote completion: {:?}", other),
    }

    session.run_idle();
    info!("Vote synced; {} vote(s) left.", session.votes().votes_left());
    ui.page(render_session(&session, &config, config.page_size));
    Ok(())
}
