use super::filter::FilterPredicate;
use super::sort::{SortArgs, SortOrder};
use crate::core::models::category::DesignCategory;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_VOTE_BUDGET: u32 = 3;
pub const DEFAULT_SUBMISSION_SLOTS: u32 = 3;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for {parameter}: {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialSort {
    pub category: DesignCategory,
    pub order: SortOrder,
    pub args: SortArgs,
}

/// Everything the browser needs to know about one puzzle before the first refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserConfig {
    pub puzzle_id: u64,
    /// The puzzle no longer accepts votes; vote columns are hidden.
    pub novote: bool,
    pub refresh_interval: Duration,
    pub page_size: usize,
    pub vote_budget: u32,
    /// Solutions one player may submit per round.
    pub submission_slots: u32,
    /// Designer name of the local player, used to count used submission slots.
    pub player: Option<String>,
    pub round: u32,
    pub initial_filters: Vec<FilterPredicate>,
    pub initial_sort: Vec<InitialSort>,
    pub columns: Vec<DesignCategory>,
}

#[derive(Default)]
pub struct BrowserConfigBuilder {
    puzzle_id: Option<u64>,
    novote: Option<bool>,
    refresh_interval: Option<Duration>,
    page_size: Option<usize>,
    vote_budget: Option<u32>,
    submission_slots: Option<u32>,
    player: Option<String>,
    round: Option<u32>,
    initial_filters: Vec<FilterPredicate>,
    initial_sort: Vec<InitialSort>,
    columns: Option<Vec<DesignCategory>>,
}

impl BrowserConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn puzzle_id(mut self, id: u64) -> Self {
        self.puzzle_id = Some(id);
        self
    }
    pub fn novote(mut self, novote: bool) -> Self {
        self.novote = Some(novote);
        self
    }
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = Some(interval);
        self
    }
    pub fn page_size(mut self, rows: usize) -> Self {
        self.page_size = Some(rows);
        self
    }
    pub fn vote_budget(mut self, votes: u32) -> Self {
        self.vote_budget = Some(votes);
        self
    }
    pub fn submission_slots(mut self, slots: u32) -> Self {
        self.submission_slots = Some(slots);
        self
    }
    pub fn player(mut self, name: impl Into<String>) -> Self {
        self.player = Some(name.into());
        self
    }
    pub fn round(mut self, round: u32) -> Self {
        self.round = Some(round);
        self
    }
    pub fn initial_filter(mut self, predicate: FilterPredicate) -> Self {
        self.initial_filters.push(predicate);
        self
    }
    pub fn initial_sort(
        mut self,
        category: DesignCategory,
        order: SortOrder,
        args: SortArgs,
    ) -> Self {
        self.initial_sort.push(InitialSort {
            category,
            order,
            args,
        });
        self
    }
    pub fn columns(mut self, columns: Vec<DesignCategory>) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn build(self) -> Result<BrowserConfig, ConfigError> {
        let refresh_interval = self.refresh_interval.unwrap_or(DEFAULT_REFRESH_INTERVAL);
        if refresh_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                parameter: "refresh_interval",
                reason: "must be greater than zero".to_string(),
            });
        }
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ConfigError::InvalidValue {
                parameter: "page_size",
                reason: "must show at least one row".to_string(),
            });
        }

        Ok(BrowserConfig {
            puzzle_id: self
                .puzzle_id
                .ok_or(ConfigError::MissingParameter("puzzle_id"))?,
            novote: self.novote.unwrap_or(false),
            refresh_interval,
            page_size,
            vote_budget: self.vote_budget.unwrap_or(DEFAULT_VOTE_BUDGET),
            submission_slots: self.submission_slots.unwrap_or(DEFAULT_SUBMISSION_SLOTS),
            player: self.player,
            round: self.round.unwrap_or(1),
            initial_filters: self.initial_filters,
            initial_sort: self.initial_sort,
            columns: self
                .columns
                .unwrap_or_else(|| DesignCategory::DEFAULT_COLUMNS.to_vec()),
        })
    }
}
