/*!
# til - Today I Learned

Command-line front end for recording short learning notes and getting
insights on the habit: streaks, tag rankings, goal progress, activity trends
and suggestions for what to do next.

## Usage

```text
til [OPTIONS] <COMMAND>

Commands:
  log           Record something you learned
  entries       List entries, newest first
  delete-entry  Delete an entry
  goal          Manage learning goals
  stats         Dashboard statistics
  analytics     Activity report for a time range
  trends        Daily, weekly and monthly activity
  suggest       Suggestions for what to do next
  clear         Delete every entry and goal

Options:
      --json                     Print machine-readable JSON instead of text
      --now <RFC3339>            Reference instant for all analytics
      --db <PATH>                Database file, overriding TIL_DB
  -v, --verbose                  Print verbose output
      --log-format <LOG_FORMAT>  Log format, overriding TIL_LOG_FORMAT
```

## Configuration

- `TIL_DB`: database location (defaults to `~/.local/share/til/til.db`)
- `TIL_LOG_FORMAT`: `text` or `json`
- `TIL_LOG_LEVEL`: default log level; `RUST_LOG` takes precedence
*/

use std::env;
use std::io::{self, Write};
use til_insights::cli::CliArgs;
use til_insights::commands::{self, OutputMode};
use til_insights::config::Config;
use til_insights::constants::{LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME};
use til_insights::db::Database;
use til_insights::errors::{AppError, AppResult};
use til_insights::store::KvRepository;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// The main entry point for the til application.
///
/// 1. Parses command-line arguments
/// 2. Loads configuration and applies flag overrides
/// 3. Initializes logging
/// 4. Opens the database and runs the command inside the root span
fn main() -> AppResult<()> {
    let args = CliArgs::parse_args();

    let mut config = Config::load()?;
    apply_overrides(&mut config, &args)?;
    config.validate()?;

    init_tracing(&config, args.verbose)?;

    let correlation_id = Uuid::new_v4().to_string();
    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    let result = run(args, &config);
    if let Err(e) = &result {
        error!("Command failed: {}", e);
    }
    result
}

fn run(args: CliArgs, config: &Config) -> AppResult<()> {
    debug!("CLI arguments: {:?}", args);
    let now = args.reference_time()?;
    debug!("Reference time: {}", now.to_rfc3339());

    info!("Opening database");
    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;
    let repo = KvRepository::new(db);

    let mode = if args.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::dispatch(args.command, &repo, &now, mode, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Command-line flags take precedence over the environment.
fn apply_overrides(config: &mut Config, args: &CliArgs) -> AppResult<()> {
    if let Some(db) = &args.db {
        config.db_path = if db.is_absolute() {
            db.clone()
        } else {
            env::current_dir()?.join(db)
        };
    }
    if let Some(format) = &args.log_format {
        config.log_format = format.clone();
    }
    Ok(())
}

/// Installs the global subscriber writing to stderr in the configured format.
fn init_tracing(config: &Config, verbose: bool) -> AppResult<()> {
    let level = if verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| AppError::Config(format!("Invalid log level '{}': {}", level, e)))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.log_format == LOG_FORMAT_JSON {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .try_init()
    };

    result.map_err(|e| AppError::Config(format!("Failed to initialize logging: {}", e)))
}
