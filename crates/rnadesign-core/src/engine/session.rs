use super::error::{EngineError, ServiceError};
use super::model::SolutionListModel;
use super::queue::{UpdateQueue, UpdateRequest};
use super::votes::{VoteProcessor, VoteResult};
use crate::core::models::ids::SolutionId;
use crate::core::models::solution::Solution;
use tracing::{debug, info, warn};

/// What an outstanding service request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Refresh,
    Vote(SolutionId),
    Delete(SolutionId),
}

/// Proof that a request was issued by a particular incarnation of the session.
///
/// A ticket issued before [`BrowserSession::teardown`] is stale forever after.
#[derive(Debug, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    kind: RequestKind,
}

impl Ticket {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// New data was queued and will be applied at the next idle point.
    Queued,
    /// Vote tallies were recorded; the re-sort happens at the next idle point.
    Voted { new_achievement_ids: Vec<String> },
    /// The session that issued the request is gone. Nothing was touched.
    Abandoned,
    /// The request failed; the model keeps its last known good state.
    Notify(String),
}

/// Owns the list model for the lifetime of one browser view and guards it against
/// completions that arrive after the view was torn down.
#[derive(Debug)]
pub struct BrowserSession {
    model: SolutionListModel,
    queue: UpdateQueue,
    votes: VoteProcessor,
    generation: u64,
    live: bool,
    refresh_in_flight: bool,
    votes_dirty: bool,
}

impl BrowserSession {
    pub fn new(model: SolutionListModel, votes: VoteProcessor) -> Self {
        Self {
            model,
            queue: UpdateQueue::new(),
            votes,
            generation: 0,
            live: true,
            refresh_in_flight: false,
            votes_dirty: false,
        }
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn model(&self) -> &SolutionListModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> Result<&mut SolutionListModel, EngineError> {
        if !self.live {
            return Err(EngineError::SessionClosed);
        }
        Ok(&mut self.model)
    }

    pub fn votes(&self) -> &VoteProcessor {
        &self.votes
    }

    pub fn ticket(&self, kind: RequestKind) -> Result<Ticket, EngineError> {
        if !self.live {
            return Err(EngineError::SessionClosed);
        }
        Ok(Ticket {
            generation: self.generation,
            kind,
        })
    }

    /// Issues a refresh ticket unless a refresh is already outstanding.
    pub fn begin_refresh(&mut self) -> Result<Option<Ticket>, EngineError> {
        if self.refresh_in_flight {
            debug!("Refresh already in flight; coalescing.");
            return Ok(None);
        }
        let ticket = self.ticket(RequestKind::Refresh)?;
        self.refresh_in_flight = true;
        Ok(Some(ticket))
    }

    /// Queues a user-triggered recompute for the next idle point.
    pub fn request_recompute(&mut self, sort: bool) -> Result<(), EngineError> {
        if !self.live {
            return Err(EngineError::SessionClosed);
        }
        self.queue.push(UpdateRequest::Recompute { sort });
        Ok(())
    }

    pub fn complete_refresh(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Solution>, ServiceError>,
    ) -> Completion {
        debug_assert_eq!(ticket.kind, RequestKind::Refresh);
        if self.is_stale(&ticket) {
            return Completion::Abandoned;
        }
        self.refresh_in_flight = false;
        match result {
            Ok(solutions) => self.queue_solutions(solutions),
            Err(e) => {
                warn!("Refresh failed: {}", e);
                Completion::Notify(format!("Refresh failed: {}", e))
            }
        }
    }

    pub fn complete_vote(
        &mut self,
        ticket: Ticket,
        result: Result<VoteResult, ServiceError>,
    ) -> Completion {
        debug_assert!(matches!(ticket.kind, RequestKind::Vote(_)));
        if self.is_stale(&ticket) {
            return Completion::Abandoned;
        }
        match result {
            Ok(result) => {
                self.votes.process(&result);
                self.votes_dirty = true;
                if !result.new_achievement_ids.is_empty() {
                    info!(
                        "Earned {} new achievement(s).",
                        result.new_achievement_ids.len()
                    );
                }
                Completion::Voted {
                    new_achievement_ids: result.new_achievement_ids,
                }
            }
            Err(e) => {
                warn!("Vote failed: {}", e);
                Completion::Notify(format!("Vote failed: {}", e))
            }
        }
    }

    /// A successful delete is followed by a refetch, so the reply is the new solution set.
    pub fn complete_delete(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Solution>, ServiceError>,
    ) -> Completion {
        debug_assert!(matches!(ticket.kind, RequestKind::Delete(_)));
        if self.is_stale(&ticket) {
            return Completion::Abandoned;
        }
        match result {
            Ok(solutions) => self.queue_solutions(solutions),
            Err(e) => {
                warn!("Delete failed: {}", e);
                Completion::Notify(format!("Delete failed: {}", e))
            }
        }
    }

    /// Applies all pending work to the model. Returns whether anything changed.
    pub fn run_idle(&mut self) -> bool {
        if !self.live {
            return false;
        }
        let update = self.queue.drain();
        let sync_votes = std::mem::take(&mut self.votes_dirty);
        if update.is_empty() && !sync_votes {
            return false;
        }
        update.apply(&mut self.model);
        if sync_votes {
            self.model.sync_votes(&self.votes);
        }
        true
    }

    /// Ends the session. Every ticket issued so far becomes stale.
    pub fn teardown(&mut self) {
        if self.live {
            info!("Tearing down browser session.");
        }
        self.live = false;
        self.generation += 1;
        self.refresh_in_flight = false;
        self.votes_dirty = false;
        self.queue.clear();
    }

    fn is_stale(&self, ticket: &Ticket) -> bool {
        let stale = !self.live || ticket.generation != self.generation;
        if stale {
            debug!("Dropping completion of {:?} for a closed session.", ticket.kind);
        }
        stale
    }

    fn queue_solutions(&mut self, solutions: Vec<Solution>) -> Completion {
        self.votes = VoteProcessor::from_solutions(self.votes.budget(), &solutions);
        self.queue.push(UpdateRequest::Refresh(solutions));
        Completion::Queued
    }
}
