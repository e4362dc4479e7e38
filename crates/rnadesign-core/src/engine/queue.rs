use super::model::SolutionListModel;
use crate::core::models::solution::Solution;
use std::collections::VecDeque;

/// Work submitted to the list model by one of its producers.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateRequest {
    /// A periodic or post-delete refresh delivered a new solution set.
    Refresh(Vec<Solution>),
    /// A user action changed the sort or filter state.
    Recompute { sort: bool },
}

/// Everything pending at an idle point, folded into one application.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PendingUpdate {
    pub solutions: Option<Vec<Solution>>,
    pub sort: bool,
}

impl PendingUpdate {
    pub fn is_empty(&self) -> bool {
        self.solutions.is_none() && !self.sort
    }

    /// Applies the update as a single recompute, so a refresh never interleaves with a
    /// pending user recompute.
    pub fn apply(self, model: &mut SolutionListModel) {
        match self.solutions {
            Some(solutions) => {
                model.replace_solutions(solutions);
                if self.sort {
                    model.recompute(true);
                }
            }
            None if self.sort => model.recompute(true),
            None => {}
        }
    }
}

/// FIFO of update requests, drained at the next idle point.
#[derive(Debug, Default)]
pub struct UpdateQueue {
    pending: VecDeque<UpdateRequest>,
}

impl UpdateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, request: UpdateRequest) {
        self.pending.push_back(request);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Coalesces every pending request: the latest refresh wins and sort requests are OR-ed.
    pub fn drain(&mut self) -> PendingUpdate {
        self.pending
            .drain(..)
            .fold(PendingUpdate::default(), |mut update, request| {
                match request {
                    UpdateRequest::Refresh(solutions) => update.solutions = Some(solutions),
                    UpdateRequest::Recompute { sort } => update.sort |= sort,
                }
                update
            })
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::category::DesignCategory;
    use crate::core::models::ids::SolutionId;
    use crate::engine::sort::{SortArgs, SortOrder};

    fn solutions(ids: &[u64]) -> Vec<Solution> {
        ids.iter()
            .map(|&id| Solution {
                id: SolutionId(id),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn latest_refresh_wins_and_sort_flags_are_ored() {
        let mut queue = UpdateQueue::new();
        queue.push(UpdateRequest::Refresh(solutions(&[1])));
        queue.push(UpdateRequest::Recompute { sort: true });
        queue.push(UpdateRequest::Refresh(solutions(&[2, 3])));
        queue.push(UpdateRequest::Recompute { sort: false });

        let update = queue.drain();
        assert_eq!(update.solutions, Some(solutions(&[2, 3])));
        assert!(update.sort);
        assert!(queue.is_empty());
    }

    #[test]
    fn draining_an_empty_queue_yields_nothing_to_do() {
        let mut queue = UpdateQueue::new();
        let update = queue.drain();
        assert!(update.is_empty());
    }

    #[test]
    fn apply_installs_the_refresh_in_sort_order() {
        let mut model = SolutionListModel::new(false);
        model
            .add_criterion(DesignCategory::Id, SortOrder::Descending, SortArgs::None)
            .unwrap();

        let mut queue = UpdateQueue::new();
        queue.push(UpdateRequest::Refresh(solutions(&[1, 3, 2])));
        queue.drain().apply(&mut model);

        let ids: Vec<_> = model.filtered().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }
}
