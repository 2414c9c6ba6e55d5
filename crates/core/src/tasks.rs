//! Task lifecycle states and the finalization transition.
//!
//! A task is either `pending` or `finalized`. The pair (`state`,
//! `finalized_at`) moves together: a task is finalized exactly when its
//! finalization timestamp is set. [`transition_finalized_at`] computes the
//! timestamp side of a state change; the repository persists both fields in
//! a single UPDATE so the invariant never holds half-way.

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// State string stored in the `tasks.state` column for open tasks.
pub const STATE_PENDING: &str = "pending";

/// State string stored in the `tasks.state` column for completed tasks.
pub const STATE_FINALIZED: &str = "finalized";

/// All valid state strings, in lifecycle order.
pub const VALID_STATES: &[&str] = &[STATE_PENDING, STATE_FINALIZED];

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Fixed page size for every task listing endpoint.
pub const TASK_PAGE_SIZE: i64 = 6;

// ---------------------------------------------------------------------------
// TaskState
// ---------------------------------------------------------------------------

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Finalized,
}

impl TaskState {
    /// Parse a state from its database/wire string.
    ///
    /// Anything outside [`VALID_STATES`] is a validation error; the message
    /// names the field and lists the accepted values.
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            STATE_PENDING => Ok(Self::Pending),
            STATE_FINALIZED => Ok(Self::Finalized),
            _ => Err(CoreError::Validation(format!(
                "state '{s}' is not valid. Must be one of: {}",
                VALID_STATES.join(", ")
            ))),
        }
    }

    /// The string stored in the database and returned on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATE_PENDING,
            Self::Finalized => STATE_FINALIZED,
        }
    }
}

// ---------------------------------------------------------------------------
// Lifecycle transition
// ---------------------------------------------------------------------------

/// Compute the `finalized_at` value that accompanies a state change.
///
/// - Moving to `finalized` from any other state stamps `now`.
/// - Re-finalizing an already-finalized task keeps the original timestamp.
/// - Moving to `pending` clears the timestamp unconditionally.
pub fn transition_finalized_at(
    current_state: TaskState,
    current_finalized_at: Option<Timestamp>,
    new_state: TaskState,
    now: Timestamp,
) -> Option<Timestamp> {
    match new_state {
        TaskState::Finalized => {
            if current_state == TaskState::Finalized {
                current_finalized_at
            } else {
                Some(now)
            }
        }
        TaskState::Pending => None,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a task title: non-empty and at most [`MAX_TITLE_LENGTH`] characters.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.is_empty() {
        return Err(CoreError::Validation("title must not be empty".to_string()));
    }
    let length = title.chars().count();
    if length > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LENGTH} characters, got {length}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn parse_valid_states() {
        assert_eq!(TaskState::from_str_value("pending").unwrap(), TaskState::Pending);
        assert_eq!(
            TaskState::from_str_value("finalized").unwrap(),
            TaskState::Finalized
        );
    }

    #[test]
    fn parse_rejects_unknown_state() {
        let err = TaskState::from_str_value("archived").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("archived"), "message should echo the input: {msg}");
        assert!(msg.contains("pending, finalized"), "message should list valid states: {msg}");
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!(TaskState::from_str_value("Pending").is_err());
        assert!(TaskState::from_str_value("FINALIZED").is_err());
    }

    #[test]
    fn as_str_round_trips() {
        for state in [TaskState::Pending, TaskState::Finalized] {
            assert_eq!(TaskState::from_str_value(state.as_str()).unwrap(), state);
        }
    }

    #[test]
    fn finalizing_a_pending_task_stamps_now() {
        let now = Utc::now();
        let result = transition_finalized_at(TaskState::Pending, None, TaskState::Finalized, now);
        assert_eq!(result, Some(now));
    }

    #[test]
    fn refinalizing_keeps_the_original_timestamp() {
        let original = Utc::now() - Duration::hours(3);
        let now = Utc::now();
        let result = transition_finalized_at(
            TaskState::Finalized,
            Some(original),
            TaskState::Finalized,
            now,
        );
        assert_eq!(result, Some(original), "timestamp must not be refreshed");
    }

    #[test]
    fn reopening_clears_the_timestamp() {
        let original = Utc::now() - Duration::minutes(5);
        let now = Utc::now();
        let result = transition_finalized_at(
            TaskState::Finalized,
            Some(original),
            TaskState::Pending,
            now,
        );
        assert_eq!(result, None);
    }

    #[test]
    fn reopening_a_pending_task_is_a_noop() {
        let now = Utc::now();
        let result = transition_finalized_at(TaskState::Pending, None, TaskState::Pending, now);
        assert_eq!(result, None);
    }

    #[test]
    fn transition_upholds_state_timestamp_invariant() {
        // state == finalized <=> finalized_at is set, whatever the starting point.
        let now = Utc::now();
        let starts = [
            (TaskState::Pending, None),
            (TaskState::Finalized, Some(now - Duration::days(1))),
        ];
        for (state, at) in starts {
            for new_state in [TaskState::Pending, TaskState::Finalized] {
                let result = transition_finalized_at(state, at, new_state, now);
                assert_eq!(
                    result.is_some(),
                    new_state == TaskState::Finalized,
                    "invariant broken for {state:?} -> {new_state:?}"
                );
            }
        }
    }

    #[test]
    fn title_must_not_be_empty() {
        let err = validate_title("").unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn title_length_boundary() {
        assert!(validate_title(&"a".repeat(MAX_TITLE_LENGTH)).is_ok());
        assert!(validate_title(&"a".repeat(MAX_TITLE_LENGTH + 1)).is_err());
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        // 200 two-byte characters are still 200 characters.
        assert!(validate_title(&"é".repeat(MAX_TITLE_LENGTH)).is_ok());
    }
}
