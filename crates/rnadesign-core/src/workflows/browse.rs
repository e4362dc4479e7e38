use crate::core::models::category::DesignCategory;
use crate::core::models::ids::SolutionId;
use crate::core::models::solution::Solution;
use crate::engine::config::BrowserConfig;
use crate::engine::error::EngineError;
use crate::engine::filter::FilterPredicate;
use crate::engine::model::SolutionListModel;
use crate::engine::settings::BrowserSettings;
use crate::engine::sort::{SortArgs, SortOrder};
use crate::engine::votes::{self, VoteProcessor};
use tracing::{info, instrument};

/// One user's view request on top of the configured defaults.
#[derive(Debug, Clone, Default)]
pub struct BrowseQuery {
    pub sort: Vec<(DesignCategory, SortOrder, SortArgs)>,
    pub filters: Vec<FilterPredicate>,
    pub clear_filters: Vec<DesignCategory>,
    pub scroll_proportion: Option<f64>,
    pub scroll_rows: isize,
    /// Page height; the configured page size when absent.
    pub rows: Option<usize>,
    pub settings: Option<BrowserSettings>,
    pub toggle_marks: Vec<SolutionId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrowseRow {
    /// Position in the filtered view.
    pub position: usize,
    pub id: SolutionId,
    pub marked: bool,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrowseReport {
    pub columns: Vec<DesignCategory>,
    /// Sort indicator per column, aligned with `columns`.
    pub sort_states: Vec<Option<SortOrder>>,
    pub rows: Vec<BrowseRow>,
    pub total: usize,
    pub displayed: usize,
    pub first_visible_index: usize,
    pub marked_indices: Vec<usize>,
    pub votes_summary: String,
    /// Settings to persist after this view, including mark changes.
    pub settings: BrowserSettings,
}

impl BrowseReport {
    pub fn from_model(model: &SolutionListModel, rows: usize, votes_summary: String) -> Self {
        let columns = model.columns().to_vec();
        let sort_states = columns
            .iter()
            .map(|&c| model.sort_specification().order_of(c))
            .collect();
        let rows = model
            .visible_window(rows)
            .into_iter()
            .map(|(position, solution)| BrowseRow {
                position,
                id: solution.id,
                marked: model.is_marked(solution.id),
                cells: columns.iter().map(|&c| solution.display_text(c)).collect(),
            })
            .collect();
        Self {
            columns,
            sort_states,
            rows,
            total: model.total_len(),
            displayed: model.filtered_len(),
            first_visible_index: model.first_visible_index(),
            marked_indices: model.marked_indices(),
            votes_summary,
            settings: model.settings(),
        }
    }
}

#[instrument(skip_all, name = "browse_workflow")]
pub fn run(
    solutions: Vec<Solution>,
    config: &BrowserConfig,
    query: &BrowseQuery,
) -> Result<BrowseReport, EngineError> {
    info!(
        "Browsing {} solution(s) of puzzle {}.",
        solutions.len(),
        config.puzzle_id
    );

    let processor = VoteProcessor::from_solutions(config.vote_budget, &solutions);
    let slots = votes::slots_left(
        config.submission_slots,
        &solutions,
        config.player.as_deref(),
        config.round,
    );

    let mut model = SolutionListModel::from_config(config)?;
    if let Some(settings) = &query.settings {
        model.apply_settings(settings);
    }
    model.replace_solutions(solutions);

    for (category, order, args) in &query.sort {
        model.add_criterion(*category, *order, args.clone())?;
    }
    for category in &query.clear_filters {
        model.clear_filter(*category);
    }
    for predicate in &query.filters {
        model.set_filter(predicate.clone())?;
    }
    for &id in &query.toggle_marks {
        if model.find(id).is_none() {
            return Err(EngineError::SolutionNotFound(id));
        }
        let marked = model.toggle_mark(id);
        info!("Solution {} is now {}.", id, if marked { "marked" } else { "unmarked" });
    }
    if let Some(proportion) = query.scroll_proportion {
        model.set_scroll_proportion(proportion);
    }
    if query.scroll_rows != 0 {
        model.scroll_by_rows(query.scroll_rows);
    }

    let summary = votes::votes_summary(processor.votes_left(), slots, config.novote);
    let rows = query.rows.unwrap_or(config.page_size);
    let report = BrowseReport::from_model(&model, rows, summary);
    info!(
        "Displaying {} of {} solution(s), starting at row {}.",
        report.displayed, report.total, report.first_visible_index
    );
    Ok(report)
}
