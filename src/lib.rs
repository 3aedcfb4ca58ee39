/*!
# til-insights

til-insights is the learning-analytics engine behind a "Today I Learned" log.
Users record short learning notes tagged with topics and optionally linked to
goals; the engine turns that history into streaks, tag rankings, goal
progress, time-bucketed activity and a prioritized list of suggestions.

## Architecture

- `models`: Entries, goals and timestamp handling
- `analytics`: Pure functions over an entry/goal snapshot and a reference instant
- `store`: The repository trait and its key-value implementation
- `db`: SQLite key-value backend with connection pooling
- `tagging`: Tag cleanup and keyword-based tag extraction
- `cli` / `commands`: The `til` command line and its handlers
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure

## Usage Example

```rust
use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use til_insights::analytics::{current_streak, generate};
use til_insights::store::{KvRepository, MemoryBackend, Repository};
use til_insights::models::LogEntry;

fn main() -> til_insights::AppResult<()> {
    let repo = KvRepository::new(MemoryBackend::new());
    repo.save_entry(LogEntry::new("entry-1", "Slices borrow", "2024-06-14T09:00:00Z"))?;

    let now = Utc.with_ymd_and_hms(2024, 6, 15, 8, 0, 0).unwrap();
    let entries = repo.list_entries()?;
    assert_eq!(current_streak(&entries, &now), 1);

    let suggestions = generate(&entries, &repo.list_goals()?, &now, &mut StdRng::seed_from_u64(1));
    assert_eq!(suggestions[0].title(), "Keep Your 1-Day Streak!");
    Ok(())
}
```
*/

/// Learning analytics over entry and goal snapshots
pub mod analytics;
/// Command-line interface handling using clap
pub mod cli;
/// Handlers for the `til` subcommands
pub mod commands;
/// Configuration loading and management
pub mod config;
/// Constants used throughout the application
pub mod constants;
/// SQLite storage
pub mod db;
/// Error types and utilities for error handling
pub mod errors;
/// Identifier generation
pub mod ids;
/// Entry and goal records
pub mod models;
/// Repository abstraction
pub mod store;
/// Tag cleanup and extraction
pub mod tagging;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use models::{Goal, GoalStatus, LogEntry};
pub use store::{KvRepository, Repository};
