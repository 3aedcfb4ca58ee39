//! Domain records shared by the repository and the analytics engine.
//!
//! Field names serialize in camelCase (`createdAt`, `relatedTags`, ...) since
//! these records are the schema boundary every storage and transport layer
//! has to honor.

pub mod entry;
pub mod goal;
pub mod timestamp;

pub use entry::LogEntry;
pub use goal::{Goal, GoalStatus};
pub use timestamp::{format_timestamp, local_day, parse_timestamp, try_parse_timestamp};
