use crate::cli::PuzzleArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use rnadesign::engine::config as core_config;
use rnadesign::engine::filter::FilterPredicate;
use rnadesign::engine::sort::{SortArgs, SortOrder};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const DEFAULT_PUZZLE_ID: u64 = 0;

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct PartialSortCriterion {
    category: String,
    order: Option<String>,
    reference: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
struct PartialFilter {
    category: String,
    arg1: Option<String>,
    arg2: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialBrowserConfig {
    #[serde(rename = "puzzle-id")]
    puzzle_id: Option<u64>,
    novote: Option<bool>,
    #[serde(rename = "page-size")]
    page_size: Option<usize>,
    #[serde(rename = "refresh-interval-secs")]
    refresh_interval_secs: Option<u64>,
    #[serde(rename = "vote-budget")]
    vote_budget: Option<u32>,
    #[serde(rename = "submission-slots")]
    submission_slots: Option<u32>,
    player: Option<String>,
    round: Option<u32>,
    columns: Option<Vec<String>>,
    #[serde(default)]
    sort: Vec<PartialSortCriterion>,
    #[serde(default)]
    filter: Vec<PartialFilter>,
}

impl PartialBrowserConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file named by `--config`, or starts empty.
    pub fn load(args: &PuzzleArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Precedence: command-line flag, then `--set`, then the file, then built-in defaults.
    pub fn merge_with_cli(mut self, args: &PuzzleArgs) -> Result<core_config::BrowserConfig> {
        self.apply_set_values(&args.set_values)?;

        let puzzle_id = args.puzzle_id.or(self.puzzle_id).unwrap_or_else(|| {
            debug!("No puzzle id given; using {}.", DEFAULT_PUZZLE_ID);
            DEFAULT_PUZZLE_ID
        });

        let mut builder = core_config::BrowserConfigBuilder::new()
            .puzzle_id(puzzle_id)
            .novote(args.novote || self.novote.unwrap_or(false));

        if let Some(rows) = self.page_size {
            builder = builder.page_size(rows);
        }
        if let Some(secs) = self.refresh_interval_secs {
            builder = builder.refresh_interval(Duration::from_secs(secs));
        }
        if let Some(votes) = self.vote_budget {
            builder = builder.vote_budget(votes);
        }
        if let Some(slots) = self.submission_slots {
            builder = builder.submission_slots(slots);
        }
        if let Some(player) = self.player.take() {
            builder = builder.player(player);
        }
        if let Some(round) = self.round {
            builder = builder.round(round);
        }
        if let Some(columns) = &self.columns {
            let columns = columns
                .iter()
                .map(|name| parser::parse_category(name))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| CliError::Config(e.to_string()))?;
            builder = builder.columns(columns);
        }
        for criterion in &self.sort {
            let category = parser::parse_category(&criterion.category)
                .map_err(|e| CliError::Config(e.to_string()))?;
            let order = match &criterion.order {
                Some(order) => order
                    .parse::<SortOrder>()
                    .map_err(|e| CliError::Config(e.to_string()))?,
                None => SortOrder::Ascending,
            };
            let args = criterion
                .reference
                .clone()
                .map_or(SortArgs::None, SortArgs::ReferenceSequence);
            builder = builder.initial_sort(category, order, args);
        }
        for filter in &self.filter {
            let category = parser::parse_category(&filter.category)
                .map_err(|e| CliError::Config(e.to_string()))?;
            builder = builder.initial_filter(FilterPredicate::new(
                category,
                filter.arg1.as_deref(),
                filter.arg2.as_deref(),
            ));
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        if set_values.is_empty() {
            return Ok(());
        }
        for kv_pair in set_values {
            let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;

            let invalid_integer = || {
                CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
            };

            match key {
                "puzzle-id" => {
                    self.puzzle_id = Some(value_str.parse().map_err(|_| invalid_integer())?);
                }
                "novote" => {
                    self.novote = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid boolean value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                "page-size" => {
                    self.page_size = Some(value_str.parse().map_err(|_| invalid_integer())?);
                }
                "refresh-interval-secs" => {
                    self.refresh_interval_secs =
                        Some(value_str.parse().map_err(|_| invalid_integer())?);
                }
                "vote-budget" => {
                    self.vote_budget = Some(value_str.parse().map_err(|_| invalid_integer())?);
                }
                "submission-slots" => {
                    self.submission_slots =
                        Some(value_str.parse().map_err(|_| invalid_integer())?);
                }
                "round" => {
                    self.round = Some(value_str.parse().map_err(|_| invalid_integer())?);
                }
                "player" => {
                    self.player = Some(value_str.to_string());
                }
                "columns" => {
                    self.columns = Some(
                        value_str
                            .split(',')
                            .map(str::trim)
                            .filter(|name| !name.is_empty())
                            .map(str::to_string)
                            .collect(),
                    );
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
