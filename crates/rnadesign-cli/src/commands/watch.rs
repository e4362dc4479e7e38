use super::{load_config, new_session, render_session, view_query};
use crate::cli::WatchArgs;
use crate::error::{CliError, Result};
use crate::service::LocalSolutionService;
use crate::settings_store::SettingsStore;
use crate::ui::UiHandle;
use rnadesign::core::models::solution::Solution;
use rnadesign::engine::error::ServiceError;
use rnadesign::engine::session::{BrowserSession, Completion, Ticket};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument};

#[derive(Debug)]
enum WatchEvent {
    Tick,
    Fetched(Ticket, std::result::Result<Vec<Solution>, ServiceError>),
    Shutdown,
}

#[instrument(skip_all, name = "watch_command")]
pub async fn run(args: WatchArgs, store: &SettingsStore, ui: UiHandle) -> Result<()> {
    let mut config = load_config(&args.puzzle)?;
    if let Some(secs) = args.interval {
        if secs == 0 {
            return Err(CliError::Argument(
                "The refresh interval must be at least one second.".to_string(),
            ));
        }
        config.refresh_interval = Duration::from_secs(secs);
    }
    let query = view_query(&args.view)?;
    let rows = query.rows.unwrap_or(config.page_size);
    let service = LocalSolutionService::new(&args.puzzle.input, config.vote_budget);
    let mut session = new_session(&config, store, &query)?;

    let (tx, mut rx) = mpsc::channel::<WatchEvent>(16);
    let ticker = spawn_ticker(tx.clone(), config.refresh_interval);
    let signal = spawn_signal_listener(tx.clone());

    info!(
        "Watching {:?}, refreshing every {}s.",
        service.path(),
        config.refresh_interval.as_secs()
    );

    let mut outstanding = 0usize;
    let mut refreshes = 0u32;
    while let Some(event) = rx.recv().await {
        match event {
            WatchEvent::Tick => {
                if let Some(ticket) = session.begin_refresh()? {
                    ui.status("Refreshing solutions...");
                    outstanding += 1;
                    spawn_fetch(service.clone(), ticket, tx.clone());
                }
            }
            WatchEvent::Fetched(ticket, result) => {
                outstanding = outstanding.saturating_sub(1);
                refreshes += 1;
                handle_refresh(&mut session, ticket, result, &ui);
                if session.run_idle() {
                    ui.done(format!(
                        "Refreshed {} solution(s).",
                        session.model().total_len()
                    ));
                    ui.page(render_session(&session, &config, rows));
                }
                if args.cycles.is_some_and(|limit| refreshes >= limit) {
                    info!("Completed {} refresh(es); stopping.", refreshes);
                    break;
                }
            }
            WatchEvent::Shutdown => {
                info!("Interrupted; shutting down.");
                break;
            }
        }
    }

    let marked = session.model().marked().to_vec();
    session.teardown();
    ticker.abort();
    signal.abort();
    drop(tx);

    // Fetches still in flight complete against the closed session and are dropped.
    while outstanding > 0 {
        match rx.recv().await {
            Some(WatchEvent::Fetched(ticket, result)) => {
                outstanding -= 1;
                handle_refresh(&mut session, ticket, result, &ui);
            }
            Some(_) => {}
            None => break,
        }
    }

    if let Some(mut stored) = store.load_stored()? {
        stored.marked = marked;
        store.save(&stored)?;
    }
    Ok(())
}

fn handle_refresh(
    session: &mut BrowserSession,
    ticket: Ticket,
    result: std::result::Result<Vec<Solution>, ServiceError>,
    ui: &UiHandle,
) {
    match session.complete_refresh(ticket, result) {
        Completion::Notify(msg) => ui.notify(msg),
        other => debug!("Refresh completion: {:?}", other),
    }
}

fn spawn_ticker(tx: mpsc::Sender<WatchEvent>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            timer.tick().await;
            if tx.send(WatchEvent::Tick).await.is_err() {
                break;
            }
        }
    })
}

fn spawn_signal_listener(tx: mpsc::Sender<WatchEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(WatchEvent::Shutdown).await;
        }
    })
}

fn spawn_fetch(service: LocalSolutionService, ticket: Ticket, tx: mpsc::Sender<WatchEvent>) {
    tokio::spawn(async move {
        let result = service.fetch().await;
        let _ = tx.send(WatchEvent::Fetched(ticket, result)).await;
    });
}
