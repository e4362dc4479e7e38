use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "rnadesign - browse, sort, filter and vote on submitted RNA designs, and check them against base-pair constraints.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Use this file for the stored column set and marks instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show one page of a puzzle's solutions, sorted and filtered.
    Browse(BrowseArgs),
    /// Check solutions against a set of minimum base-pair constraints.
    Check(CheckArgs),
    /// Mark or unmark solutions. Marks are kept between runs.
    Mark(MarkArgs),
    /// Show or change the columns the browser displays.
    Columns(ColumnsArgs),
    /// Keep a page of solutions up to date, refreshing on an interval until interrupted.
    Watch(WatchArgs),
    /// Cast the player's vote for a solution, or withdraw it if already cast.
    Vote(VoteArgs),
    /// Delete one of the player's solutions.
    Delete(DeleteArgs),
}

/// Arguments shared by every command that opens a puzzle's solution table.
#[derive(Args, Debug, Clone)]
pub struct PuzzleArgs {
    /// Path to the puzzle's solution table (CSV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to a browser configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the puzzle id from the config file.
    #[arg(long, value_name = "ID")]
    pub puzzle_id: Option<u64>,

    /// Treat the puzzle as closed for voting, overriding the config file.
    #[arg(long)]
    pub novote: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S page-size=40
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// View options shared by `browse` and `watch`.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Sort by a column. Repeat to add tie-breakers.
    /// Format: COLUMN[:asc|desc], or sequence:asc|desc:REFERENCE.
    #[arg(short, long = "sort", value_name = "SPEC")]
    pub sort: Vec<String>,

    /// Filter a column. Format: COLUMN=VALUE, or COLUMN=MIN..MAX for numeric columns.
    #[arg(short, long = "filter", value_name = "SPEC")]
    pub filter: Vec<String>,

    /// Remove a filter set in the config file.
    #[arg(long = "clear-filter", value_name = "COLUMN")]
    pub clear_filter: Vec<String>,

    /// Number of rows to show, overriding the configured page size.
    #[arg(short, long, value_name = "INT")]
    pub rows: Option<usize>,
}

#[derive(Args, Debug)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub puzzle: PuzzleArgs,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Scroll to a proportion of the filtered list, from 0.0 (top) to 1.0 (bottom).
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub scroll: Option<f64>,

    /// Scroll by a number of rows. Negative values scroll up.
    #[arg(long, value_name = "INT", allow_negative_numbers = true, default_value_t = 0)]
    pub scroll_rows: isize,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the solution table (CSV).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Constraints in their serialized form, e.g. GCMIN,5,PAIRS,10.
    #[arg(short = 'k', long, required = true, value_name = "LIST", allow_hyphen_values = true)]
    pub constraints: String,

    /// Count pairs in this dot-bracket target structure instead of using the recorded counts.
    #[arg(long, value_name = "DOT_BRACKET")]
    pub structure: Option<String>,

    /// Describe constraints as they appear on the mission screen.
    #[arg(long)]
    pub mission: bool,

    /// List only the solutions that fail at least one constraint.
    #[arg(long)]
    pub failing_only: bool,
}

#[derive(Args, Debug)]
pub struct MarkArgs {
    #[command(flatten)]
    pub puzzle: PuzzleArgs,

    /// Ids of the solutions to toggle.
    #[arg(required = true, value_name = "ID")]
    pub ids: Vec<u64>,
}

#[derive(Args, Debug)]
#[group(required = false, multiple = false)]
pub struct ColumnsArgs {
    /// Comma-separated list of columns to display, e.g. "title,designer,votes".
    #[arg(long, value_name = "LIST")]
    pub set: Option<String>,

    /// Restore the default columns.
    #[arg(long)]
    pub reset: bool,

    /// List every column the browser knows about.
    #[arg(long)]
    pub available: bool,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub puzzle: PuzzleArgs,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Seconds between refreshes, overriding the configured interval.
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Stop after this many refreshes instead of waiting for Ctrl-C.
    #[arg(long, value_name = "INT")]
    pub cycles: Option<u32>,
}

#[derive(Args, Debug)]
pub struct VoteArgs {
    #[command(flatten)]
    pub puzzle: PuzzleArgs,

    /// Id of the solution to vote for.
    #[arg(value_name = "ID")]
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub puzzle: PuzzleArgs,

    /// Id of the solution to delete.
    #[arg(value_name = "ID")]
    pub id: u64,
}
