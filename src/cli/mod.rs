use crate::analytics::TimeRange;
use crate::constants::{
    APP_DESCRIPTION, APP_NAME, HEATMAP_DAYS, LOG_FORMAT_JSON, LOG_FORMAT_TEXT, MAX_TREND_BUCKETS,
    SUMMARY_MONTHS, TREND_WEEKS,
};
use crate::errors::{AppError, AppResult};
use crate::models::GoalStatus;
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Record what you learned today and get insights on your habit
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, version, long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Reference instant for all analytics (RFC 3339); defaults to the current time
    #[arg(long, global = true, value_name = "RFC3339")]
    pub now: Option<String>,

    /// Database file, overriding TIL_DB
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log format, overriding TIL_LOG_FORMAT
    #[arg(long, global = true, value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON])]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Record something you learned
    Log {
        content: String,
        /// Tag to attach; may be repeated
        #[arg(short = 't', long = "tag")]
        tags: Vec<String>,
        /// Where you learned it (URL, book, ...)
        #[arg(long)]
        source: Option<String>,
        /// Human-readable name of the source
        #[arg(long)]
        source_name: Option<String>,
        /// Goal this entry contributes to
        #[arg(long)]
        goal: Option<String>,
        /// Only use the tags given with --tag
        #[arg(long)]
        no_auto_tags: bool,
    },
    /// List entries, newest first
    Entries {
        /// Only entries with a tag containing this text
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Delete an entry
    DeleteEntry { id: String },
    /// Manage learning goals
    Goal {
        #[command(subcommand)]
        action: GoalCommand,
    },
    /// Dashboard statistics
    Stats,
    /// Activity report for a time range
    Analytics {
        #[arg(long, default_value = "30d")]
        range: TimeRange,
    },
    /// Daily, weekly and monthly activity
    Trends {
        #[arg(long, default_value_t = HEATMAP_DAYS, value_parser = clap::value_parser!(u32).range(1..=MAX_TREND_BUCKETS))]
        days: u32,
        #[arg(long, default_value_t = TREND_WEEKS, value_parser = clap::value_parser!(u32).range(1..=MAX_TREND_BUCKETS))]
        weeks: u32,
        #[arg(long, default_value_t = SUMMARY_MONTHS, value_parser = clap::value_parser!(u32).range(1..=MAX_TREND_BUCKETS))]
        months: u32,
    },
    /// Suggestions for what to do next
    Suggest {
        /// Seed for the review pick, for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Delete every entry and goal
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum GoalCommand {
    /// Create a goal
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Target date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        deadline: Option<String>,
        /// Related tag; may be repeated. Defaults to the cleaned title
        #[arg(short = 't', long = "tag")]
        tags: Vec<String>,
        /// Number of related entries that completes the goal
        #[arg(long)]
        target: Option<i64>,
    },
    /// List goals with their progress
    List,
    /// Change the status of a goal
    Status { id: String, status: GoalStatus },
    /// Delete a goal
    Delete { id: String },
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// The reference instant: `--now` when given, otherwise the wall clock.
    ///
    /// Calendar days are counted in the local time zone (`TZ`), including its
    /// daylight-saving rules; a `--now` offset only pins the instant.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when `--now` is not valid RFC 3339.
    pub fn reference_time(&self) -> AppResult<DateTime<Local>> {
        match &self.now {
            Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
                .map(|now| now.with_timezone(&Local))
                .map_err(|e| {
                    AppError::Validation(format!("--now must be an RFC 3339 timestamp: {}", e))
                }),
            None => Ok(Local::now()),
        }
    }
}
