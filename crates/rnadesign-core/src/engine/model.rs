use super::config::BrowserConfig;
use super::error::EngineError;
use super::filter::{FilterError, FilterPredicate, FilterSet};
use super::settings::BrowserSettings;
use super::sort::{SortArgs, SortError, SortOrder, SortSpecification};
use super::votes::VoteProcessor;
use crate::core::models::category::DesignCategory;
use crate::core::models::ids::SolutionId;
use crate::core::models::solution::Solution;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// The sorted, filtered and windowed view over one puzzle's solutions.
///
/// `ordered_all` holds every solution in sort order. `filtered` holds positions into
/// `ordered_all` of the solutions that pass the filters, in the same relative order. The
/// first visible row is always re-derived from the stored scroll proportion after
/// `filtered` changes. Marks are kept by id and survive any reordering or refiltering.
#[derive(Debug, Clone)]
pub struct SolutionListModel {
    ordered_all: Vec<Solution>,
    filtered: Vec<usize>,
    sort: SortSpecification,
    filters: FilterSet,
    scroll_proportion: f64,
    first_visible_index: usize,
    marked: MarkedIds,
    novote: bool,
    columns: Vec<DesignCategory>,
    unsorted: bool,
}

impl SolutionListModel {
    pub fn new(novote: bool) -> Self {
        Self {
            ordered_all: Vec::new(),
            filtered: Vec::new(),
            sort: SortSpecification::new(),
            filters: FilterSet::new(),
            scroll_proportion: 0.0,
            first_visible_index: 0,
            marked: MarkedIds::default(),
            novote,
            columns: available(DesignCategory::DEFAULT_COLUMNS.to_vec(), novote),
            unsorted: false,
        }
    }

    /// Builds an empty model with the configured columns, initial sort and initial filters.
    pub fn from_config(config: &BrowserConfig) -> Result<Self, EngineError> {
        let mut model = Self::new(config.novote);
        model.columns = available(config.columns.clone(), config.novote);
        for initial in &config.initial_sort {
            model.add_criterion(initial.category, initial.order, initial.args.clone())?;
        }
        for predicate in &config.initial_filters {
            model.set_filter(predicate.clone())?;
        }
        Ok(model)
    }

    /// Restores a persisted column set and marks.
    pub fn apply_settings(&mut self, settings: &BrowserSettings) {
        self.columns = settings.visible_columns(self.novote);
        self.marked = MarkedIds::from_ids(&settings.marked);
    }

    pub fn settings(&self) -> BrowserSettings {
        BrowserSettings {
            columns: self.columns.clone(),
            marked: self.marked.order.clone(),
        }
    }

    /// Installs a freshly fetched solution set.
    ///
    /// The new data is sorted with the current specification even though the recompute is
    /// a non-sorting one, so `ordered_all` is always in sort order.
    pub fn replace_solutions(&mut self, solutions: Vec<Solution>) {
        debug!("Replacing solution set with {} solution(s).", solutions.len());
        self.ordered_all = solutions;
        self.unsorted = true;
        self.recompute(false);
    }

    pub fn add_criterion(
        &mut self,
        category: DesignCategory,
        order: SortOrder,
        args: SortArgs,
    ) -> Result<(), SortError> {
        if !category.is_available(self.novote) {
            return Err(SortError::NotSortable(category));
        }
        if category == DesignCategory::Sequence && args == SortArgs::None {
            return Err(SortError::MissingReference);
        }
        self.sort.add_criterion(category, order, args);
        self.recompute(true);
        Ok(())
    }

    /// Returns whether a criterion was removed.
    pub fn remove_criterion(&mut self, category: DesignCategory) -> bool {
        let removed = self.sort.remove_criterion(category).is_some();
        if removed {
            self.recompute(true);
        }
        removed
    }

    pub fn set_filter(&mut self, predicate: FilterPredicate) -> Result<(), FilterError> {
        if !predicate.category.is_available(self.novote) {
            return Err(FilterError::HiddenColumn(predicate.category));
        }
        self.filters.set_filter(predicate)?;
        self.recompute(false);
        Ok(())
    }

    pub fn clear_filter(&mut self, category: DesignCategory) -> Option<FilterPredicate> {
        let removed = self.filters.clear_filter(category);
        if removed.is_some() {
            self.recompute(false);
        }
        removed
    }

    pub fn should_display(&self, solution: &Solution) -> bool {
        self.filters.should_display(solution)
    }

    /// Re-sorts when `sort` is set (or the data has not been sorted yet), refilters, and
    /// re-derives the first visible row from the scroll proportion.
    pub fn recompute(&mut self, sort: bool) {
        if sort || self.unsorted {
            self.sort.sort(&mut self.ordered_all);
            self.unsorted = false;
        }
        self.filtered = self
            .ordered_all
            .iter()
            .enumerate()
            .filter(|(_, s)| self.filters.should_display(s))
            .map(|(i, _)| i)
            .collect();
        self.first_visible_index = index_for(self.filtered.len(), self.scroll_proportion);
        trace!(
            "Recomputed view: {} of {} solution(s) displayed, first visible row {}.",
            self.filtered.len(),
            self.ordered_all.len(),
            self.first_visible_index
        );
    }

    pub fn set_scroll_proportion(&mut self, proportion: f64) {
        self.scroll_proportion = if proportion.is_nan() {
            0.0
        } else {
            proportion.clamp(0.0, 1.0)
        };
        self.first_visible_index = index_for(self.filtered.len(), self.scroll_proportion);
    }

    /// Moves the window by whole rows, the way a mouse wheel does.
    pub fn scroll_by_rows(&mut self, delta: isize) {
        let len = self.filtered.len();
        if len == 0 {
            self.set_scroll_proportion(0.0);
            return;
        }
        let target = self
            .first_visible_index
            .saturating_add_signed(delta)
            .min(len - 1);
        // Aim at the middle of the row so re-deriving the index lands on it again.
        self.scroll_proportion = (target as f64 + 0.5) / len as f64;
        self.first_visible_index = target;
    }

    pub fn scroll_proportion(&self) -> f64 {
        self.scroll_proportion
    }

    pub fn first_visible_index(&self) -> usize {
        self.first_visible_index
    }

    /// Marks `id` if unmarked, unmarks it otherwise. Returns whether it is now marked.
    pub fn toggle_mark(&mut self, id: SolutionId) -> bool {
        if self.marked.members.remove(&id) {
            self.marked.order.retain(|&m| m != id);
            false
        } else {
            self.marked.insert(id);
            true
        }
    }

    pub fn is_marked(&self, id: SolutionId) -> bool {
        self.marked.members.contains(&id)
    }

    /// Marked ids in the order they were marked.
    pub fn marked(&self) -> &[SolutionId] {
        &self.marked.order
    }

    /// Positions within the filtered view of the marked solutions that are displayed.
    pub fn marked_indices(&self) -> Vec<usize> {
        self.filtered
            .iter()
            .enumerate()
            .filter(|&(_, &i)| self.marked.members.contains(&self.ordered_all[i].id))
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Up to `rows` displayed solutions starting at the first visible row, paired with their
    /// position in the filtered view.
    pub fn visible_window(&self, rows: usize) -> Vec<(usize, &Solution)> {
        self.filtered
            .iter()
            .enumerate()
            .skip(self.first_visible_index)
            .take(rows)
            .map(|(pos, &i)| (pos, &self.ordered_all[i]))
            .collect()
    }

    pub fn solution_at(&self, index: usize) -> Option<&Solution> {
        self.filtered.get(index).map(|&i| &self.ordered_all[i])
    }

    pub fn index_of(&self, id: SolutionId) -> Option<usize> {
        self.filtered
            .iter()
            .position(|&i| self.ordered_all[i].id == id)
    }

    pub fn find(&self, id: SolutionId) -> Option<&Solution> {
        self.ordered_all.iter().find(|s| s.id == id)
    }

    pub fn filtered(&self) -> impl Iterator<Item = &Solution> {
        self.filtered.iter().map(|&i| &self.ordered_all[i])
    }

    pub fn ordered_all(&self) -> &[Solution] {
        &self.ordered_all
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn total_len(&self) -> usize {
        self.ordered_all.len()
    }

    pub fn sort_specification(&self) -> &SortSpecification {
        &self.sort
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn columns(&self) -> &[DesignCategory] {
        &self.columns
    }

    /// Replaces the displayed columns. Vote columns are dropped while voting is closed.
    pub fn set_columns(&mut self, columns: Vec<DesignCategory>) {
        self.columns = available(columns, self.novote);
    }

    pub fn novote(&self) -> bool {
        self.novote
    }

    /// Copies fresh vote tallies onto the solutions and re-sorts.
    pub fn sync_votes(&mut self, processor: &VoteProcessor) -> usize {
        let changed = processor.apply_to(&mut self.ordered_all);
        self.recompute(true);
        changed
    }

    /// Sort-state indicator per displayed column.
    pub fn sort_states(&self) -> HashMap<DesignCategory, SortOrder> {
        self.columns
            .iter()
            .filter_map(|&c| self.sort.order_of(c).map(|order| (c, order)))
            .collect()
    }
}

/// Marked ids in marking order, with a set alongside for membership checks.
#[derive(Debug, Clone, Default)]
struct MarkedIds {
    order: Vec<SolutionId>,
    members: HashSet<SolutionId>,
}

impl MarkedIds {
    fn from_ids(ids: &[SolutionId]) -> Self {
        let mut marked = Self::default();
        for &id in ids {
            marked.insert(id);
        }
        marked
    }

    fn insert(&mut self, id: SolutionId) {
        if self.members.insert(id) {
            self.order.push(id);
        }
    }
}

fn available(columns: Vec<DesignCategory>, novote: bool) -> Vec<DesignCategory> {
    let mut seen = Vec::with_capacity(columns.len());
    for column in columns {
        if column.is_available(novote) && !seen.contains(&column) {
            seen.push(column);
        }
    }
    seen
}

fn index_for(len: usize, proportion: f64) -> usize {
    if len == 0 {
        return 0;
    }
    let index = (len as f64 * proportion).floor() as usize;
    index.min(len - 1)
}
