//! Fresh opaque identifiers for entries and goals.

use crate::constants::{ENTRY_ID_PREFIX, GOAL_ID_PREFIX};
use uuid::Uuid;

fn prefixed_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// Returns a new `entry-<uuid>` identifier.
pub fn new_entry_id() -> String {
    prefixed_id(ENTRY_ID_PREFIX)
}

/// Returns a new `goal-<uuid>` identifier.
pub fn new_goal_id() -> String {
    prefixed_id(GOAL_ID_PREFIX)
}
