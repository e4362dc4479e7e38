use crate::core::models::ids::SolutionId;
use crate::core::models::solution::Solution;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Vote counts for one solution as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub solution_id: SolutionId,
    pub votes: u32,
    pub my_votes: u32,
}

/// Reply to a vote toggle. `tally` covers every solution of the puzzle for the current round.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteResult {
    pub tally: Vec<VoteTally>,
    #[serde(default)]
    pub new_achievement_ids: Vec<String>,
}

/// Tracks the player's remaining votes and the latest tallies.
#[derive(Debug, Clone)]
pub struct VoteProcessor {
    budget: u32,
    votes_left: u32,
    tallies: HashMap<SolutionId, VoteTally>,
}

impl VoteProcessor {
    pub fn new(budget: u32) -> Self {
        Self {
            budget,
            votes_left: budget,
            tallies: HashMap::new(),
        }
    }

    /// Seeds the tallies from a freshly loaded solution set.
    pub fn from_solutions(budget: u32, solutions: &[Solution]) -> Self {
        let mut processor = Self::new(budget);
        processor.tallies = solutions
            .iter()
            .map(|s| {
                (
                    s.id,
                    VoteTally {
                        solution_id: s.id,
                        votes: s.votes,
                        my_votes: s.my_votes,
                    },
                )
            })
            .collect();
        processor.update_votes_left();
        processor
    }

    pub fn votes_left(&self) -> u32 {
        self.votes_left
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn tally(&self, id: SolutionId) -> Option<&VoteTally> {
        self.tallies.get(&id)
    }

    /// Records a service reply and returns the tallies it carried.
    pub fn process(&mut self, result: &VoteResult) -> Vec<VoteTally> {
        for tally in &result.tally {
            self.tallies.insert(tally.solution_id, *tally);
        }
        self.update_votes_left();
        debug!(
            "Processed {} vote tally entries; {} vote(s) left.",
            result.tally.len(),
            self.votes_left
        );
        result.tally.clone()
    }

    /// Copies the known tallies onto `solutions`. Returns how many solutions changed.
    pub fn apply_to(&self, solutions: &mut [Solution]) -> usize {
        let mut changed = 0;
        for solution in solutions.iter_mut() {
            if let Some(tally) = self.tallies.get(&solution.id) {
                if solution.votes != tally.votes || solution.my_votes != tally.my_votes {
                    solution.votes = tally.votes;
                    solution.my_votes = tally.my_votes;
                    changed += 1;
                }
            }
        }
        changed
    }

    fn update_votes_left(&mut self) {
        let spent: u32 = self
            .tallies
            .values()
            .fold(0u32, |sum, t| sum.saturating_add(t.my_votes));
        self.votes_left = self.budget.saturating_sub(spent);
    }
}

/// Submission slots the player has not used yet in `round`.
pub fn slots_left(available: u32, solutions: &[Solution], player: Option<&str>, round: u32) -> u32 {
    let Some(player) = player else {
        return available;
    };
    let used = solutions
        .iter()
        .filter(|s| s.round == round && s.designer == player)
        .count();
    available.saturating_sub(u32::try_from(used).unwrap_or(u32::MAX))
}

/// The status line shown above the solution list.
pub fn votes_summary(votes_left: u32, slots_left: u32, novote: bool) -> String {
    if novote {
        "This puzzle has been cleared.".to_string()
    } else {
        format!(
            "You have {} votes and {} solution slots left.",
            votes_left, slots_left
        )
    }
}
