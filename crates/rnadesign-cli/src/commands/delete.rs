use super::{load_config, open_session, render_session};
use crate::cli::DeleteArgs;
use crate::error::Result;
use crate::service::LocalSolutionService;
use crate::settings_store::SettingsStore;
use crate::ui::UiHandle;
use rnadesign::core::models::ids::SolutionId;
use rnadesign::engine::error::EngineError;
use rnadesign::engine::session::{Completion, RequestKind};
use tracing::debug;

pub async fn run(args: DeleteArgs, store: &SettingsStore, ui: UiHandle) -> Result<()> {
    let config = load_config(&args.puzzle)?;
    let service = LocalSolutionService::new(&args.puzzle.input, config.vote_budget);
    let mut session = open_session(&config, store, &service).await?;

    let id = SolutionId(args.id);
    if session.model().find(id).is_none() {
        return Err(EngineError::SolutionNotFound(id).into());
    }

    let ticket = session.ticket(RequestKind::Delete(id))?;
    ui.status(format!("Deleting solution {}...", id));
    let result = service.delete(id).await;
    let failure = result.as_ref().err().cloned();

    match session.complete_delete(ticket, result) {
        Completion::Queued => ui.done(format!("Deleted solution {}.", id)),
        Completion::Notify(msg) => {
            ui.notify(msg);
            if let Some(e) = failure {
                return Err(e.into());
            }
        }
        other => debug!("Delete completion: {:?}", other),
    }

    session.run_idle();
    ui.page(render_session(&session, &config, config.page_size));
    Ok(())
}
