use rnadesign::core::io::table::CsvSolutionTable;
use rnadesign::core::io::traits::SolutionTable;
use rnadesign::core::models::ids::SolutionId;
use rnadesign::core::models::solution::Solution;
use rnadesign::engine::error::ServiceError;
use rnadesign::engine::votes::{VoteResult, VoteTally};
use std::collections::HashSet;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Local stand-in for the remote content service, backed by a solution table on disk.
///
/// At most one vote or delete per solution may be outstanding; a second request for the same
/// solution is rejected with [`ServiceError::Busy`] until the first one finishes.
#[derive(Debug, Clone)]
pub struct LocalSolutionService {
    path: PathBuf,
    vote_budget: u32,
    in_flight: Arc<Mutex<HashSet<SolutionId>>>,
}

struct InFlightGuard {
    id: SolutionId,
    in_flight: Arc<Mutex<HashSet<SolutionId>>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Ok(mut set) = self.in_flight.lock() {
            set.remove(&self.id);
        }
    }
}

impl LocalSolutionService {
    pub fn new(path: impl Into<PathBuf>, vote_budget: u32) -> Self {
        Self {
            path: path.into(),
            vote_budget,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn fetch(&self) -> Result<Vec<Solution>, ServiceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| ServiceError::Unavailable(format!("{}: {}", self.path.display(), e)))?;
        let solutions = CsvSolutionTable::read_from(&mut Cursor::new(bytes))
            .map_err(|e| ServiceError::Unavailable(format!("{}: {}", self.path.display(), e)))?;
        debug!("Fetched {} solution(s) from {:?}", solutions.len(), &self.path);
        Ok(solutions)
    }

    /// Adds the player's vote to `id`, or withdraws it if already cast.
    pub async fn toggle_vote(&self, id: SolutionId) -> Result<VoteResult, ServiceError> {
        let _guard = self.begin(id)?;
        let mut solutions = self.fetch().await?;

        let spent: u32 = solutions.iter().map(|s| s.my_votes).sum();
        let solution = solutions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ServiceError::Rejected(format!("solution {} does not exist", id)))?;

        if solution.my_votes > 0 {
            solution.votes = solution.votes.saturating_sub(solution.my_votes);
            solution.my_votes = 0;
            info!("Withdrew vote from solution {}.", id);
        } else {
            if spent >= self.vote_budget {
                return Err(ServiceError::Rejected("no votes left".to_string()));
            }
            solution.votes += 1;
            solution.my_votes = 1;
            info!("Voted for solution {}.", id);
        }

        self.store(&solutions).await?;
        Ok(VoteResult {
            tally: solutions
                .iter()
                .map(|s| VoteTally {
                    solution_id: s.id,
                    votes: s.votes,
                    my_votes: s.my_votes,
                })
                .collect(),
            new_achievement_ids: Vec::new(),
        })
    }

    /// Removes `id` and returns the remaining solution set.
    pub async fn delete(&self, id: SolutionId) -> Result<Vec<Solution>, ServiceError> {
        let _guard = self.begin(id)?;
        let mut solutions = self.fetch().await?;
        let before = solutions.len();
        solutions.retain(|s| s.id != id);
        if solutions.len() == before {
            return Err(ServiceError::Rejected(format!("solution {} does not exist", id)));
        }
        self.store(&solutions).await?;
        info!("Deleted solution {}.", id);
        Ok(solutions)
    }

    fn begin(&self, id: SolutionId) -> Result<InFlightGuard, ServiceError> {
        let mut set = self
            .in_flight
            .lock()
            .map_err(|_| ServiceError::Unavailable("request tracker is poisoned".to_string()))?;
        if !set.insert(id) {
            return Err(ServiceError::Busy(id));
        }
        Ok(InFlightGuard {
            id,
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    async fn store(&self, solutions: &[Solution]) -> Result<(), ServiceError> {
        let mut buffer = Vec::new();
        CsvSolutionTable::write_to(solutions, &mut buffer)
            .map_err(|e| ServiceError::Unavailable(e.to_string()))?;
        tokio::fs::write(&self.path, buffer)
            .await
            .map_err(|e| ServiceError::Unavailable(format!("{}: {}", self.path.display(), e)))
    }
}
