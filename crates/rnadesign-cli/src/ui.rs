use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::warn;

#[derive(Debug)]
pub enum UiEvent {
    /// Start or update the spinner line.
    Status(String),
    /// Stop the spinner and leave a check-marked line behind.
    Done(String),
    /// A rendered page of solutions.
    Page(String),
    /// A failure the user should see; the view stays up.
    Notify(String),
    Log(String),
}

pub struct UiManager {
    mp: Arc<MultiProgress>,
    state: SpinnerState,
    event_receiver: mpsc::Receiver<UiEvent>,
    shutdown_receiver: watch::Receiver<bool>,
    _sentinel_bar: ProgressBar,
}

#[derive(Default)]
struct SpinnerState {
    active: Option<ProgressBar>,
    message: String,
}

impl UiManager {
    pub fn new() -> (Self, mpsc::Sender<UiEvent>, watch::Sender<bool>) {
        let (event_sender, event_receiver) = mpsc::channel(1024);
        let (shutdown_sender, shutdown_receiver) = watch::channel(false);
        let mp = Arc::new(MultiProgress::new());
        mp.set_draw_target(ProgressDrawTarget::stderr_with_hz(12));
        let _sentinel_bar = mp.add(ProgressBar::hidden());
        let manager = Self {
            mp,
            state: SpinnerState::default(),
            event_receiver,
            shutdown_receiver,
            _sentinel_bar,
        };

        (manager, event_sender, shutdown_sender)
    }

    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(event) = self.event_receiver.recv() => {
                    self.handle_event(event);
                }
                result = self.shutdown_receiver.changed() => {
                    if result.is_err() || *self.shutdown_receiver.borrow() {
                        break;
                    }
                }
            }
        }
        while let Ok(event) = self.event_receiver.try_recv() {
            self.handle_event(event);
        }
        if let Some(bar) = self.state.active.take() {
            bar.finish_and_clear();
        }
        self._sentinel_bar.finish_and_clear();
    }

    fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Log(msg) => {
                self.mp.println(msg).ok();
            }
            UiEvent::Status(text) => match self.state.active.as_ref() {
                Some(bar) => bar.set_message(text.clone()),
                None => {
                    let pb = self.mp.add(ProgressBar::new_spinner());
                    pb.enable_steady_tick(Duration::from_millis(80));
                    pb.set_style(Self::spinner_style());
                    pb.set_message(text.clone());
                    self.state.active = Some(pb);
                    self.state.message = text;
                }
            },
            UiEvent::Done(text) => {
                if let Some(bar) = self.state.active.take() {
                    bar.finish_and_clear();
                }
                self.state.message.clear();
                self.mp.println(format!("✓ {}", text)).ok();
            }
            UiEvent::Page(page) => {
                self.mp.println(page.trim_end()).ok();
            }
            UiEvent::Notify(msg) => {
                self.mp.println(format!("! {}", msg)).ok();
            }
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
    }
}

/// Cloneable handle for sending events to the [`UiManager`] from command code.
#[derive(Clone)]
pub struct UiHandle {
    sender: mpsc::Sender<UiEvent>,
}

impl UiHandle {
    pub fn new(sender: mpsc::Sender<UiEvent>) -> Self {
        Self { sender }
    }

    pub fn send(&self, event: UiEvent) {
        if let Err(e) = self.sender.try_send(event) {
            warn!("Failed to send update to UI channel: {}", e);
        }
    }

    pub fn status(&self, text: impl Into<String>) {
        self.send(UiEvent::Status(text.into()));
    }

    pub fn done(&self, text: impl Into<String>) {
        self.send(UiEvent::Done(text.into()));
    }

    pub fn page(&self, page: impl Into<String>) {
        self.send(UiEvent::Page(page.into()));
    }

    pub fn notify(&self, msg: impl Into<String>) {
        self.send(UiEvent::Notify(msg.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_manager() -> (UiManager, mpsc::Sender<UiEvent>, watch::Sender<bool>) {
        let (manager, sender, shutdown) = UiManager::new();
        manager.mp.set_draw_target(ProgressDrawTarget::hidden());
        (manager, sender, shutdown)
    }

    #[test]
    fn status_starts_a_spinner_and_updates_it() {
        let (mut manager, _, _) = setup_manager();
        assert!(manager.state.active.is_none());

        manager.handle_event(UiEvent::Status("Refreshing".into()));
        assert_eq!(manager.state.active.as_ref().unwrap().message(), "Refreshing");
        assert_eq!(manager.state.message, "Refreshing");

        manager.handle_event(UiEvent::Status("Refreshing (retry)".into()));
        assert_eq!(
            manager.state.active.as_ref().unwrap().message(),
            "Refreshing (retry)"
        );
    }

    #[test]
    fn done_clears_the_spinner() {
        let (mut manager, _, _) = setup_manager();
        manager.handle_event(UiEvent::Status("Refreshing".into()));
        manager.handle_event(UiEvent::Done("Refreshed".into()));
        assert!(manager.state.active.is_none());
        assert!(manager.state.message.is_empty());
    }

    #[test]
    fn page_notify_and_log_events_print_without_a_spinner() {
        let (mut manager, _, _) = setup_manager();
        manager.handle_event(UiEvent::Page("Id  Title\n".into()));
        manager.handle_event(UiEvent::Notify("Refresh failed".into()));
        manager.handle_event(UiEvent::Log("log line".into()));
        assert!(manager.state.active.is_none());
    }

    #[tokio::test]
    async fn handle_sends_events_to_the_channel() {
        let (sender, mut receiver) = mpsc::channel(4);
        let handle = UiHandle::new(sender);

        handle.notify("Vote failed: no votes left");

        match receiver.recv().await.unwrap() {
            UiEvent::Notify(msg) => assert_eq!(msg, "Vote failed: no votes left"),
            other => panic!("Incorrect event received: {:?}", other),
        }
    }

    #[tokio::test]
    async fn run_exits_on_shutdown() {
        let (manager, sender, shutdown) = setup_manager();
        let task = tokio::spawn(manager.run());
        sender.send(UiEvent::Log("before shutdown".into())).await.unwrap();
        shutdown.send(true).unwrap();
        task.await.unwrap();
    }
}
