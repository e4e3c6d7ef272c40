//! Stock exit-code mappers
//!
//! The supervisor treats the application-level meaning of an exit code as a
//! pluggable function. The two mappers here cover the common cases: the
//! zero/non-zero convention, and an explicit code-to-label table with a
//! fallback.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::supervisor::ExitCodeMapper;

/// Application-level status of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepStatus {
    /// Exit code 0
    Completed,
    /// Any non-zero exit code
    Failed,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Completed => write!(f, "COMPLETED"),
            StepStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Conventional mapper: 0 is `Completed`, everything else is `Failed`
pub fn simple() -> ExitCodeMapper<StepStatus> {
    Box::new(|code| {
        if code == 0 {
            StepStatus::Completed
        } else {
            StepStatus::Failed
        }
    })
}

/// Table-driven mapper: explicit code-to-label entries with a fallback
///
/// Useful when the command encodes meaning in specific exit codes (e.g.
/// rsync's 24 "vanished source files") that should not count as failures.
pub fn from_table(
    table: HashMap<i32, String>,
    fallback: impl Into<String>,
) -> ExitCodeMapper<String> {
    let fallback = fallback.into();
    Box::new(move |code| {
        table
            .get(&code)
            .cloned()
            .unwrap_or_else(|| fallback.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_mapper_zero_is_completed() {
        let mapper = simple();
        assert_eq!(mapper(0), StepStatus::Completed);
    }

    #[test]
    fn test_simple_mapper_nonzero_is_failed() {
        let mapper = simple();
        assert_eq!(mapper(1), StepStatus::Failed);
        assert_eq!(mapper(-1), StepStatus::Failed);
        assert_eq!(mapper(127), StepStatus::Failed);
    }

    #[test]
    fn test_table_mapper_hits_and_fallback() {
        let mut table = HashMap::new();
        table.insert(0, "COMPLETED".to_string());
        table.insert(24, "COMPLETED_WITH_WARNINGS".to_string());

        let mapper = from_table(table, "FAILED");
        assert_eq!(mapper(0), "COMPLETED");
        assert_eq!(mapper(24), "COMPLETED_WITH_WARNINGS");
        assert_eq!(mapper(1), "FAILED");
    }

    #[test]
    fn test_step_status_display_and_json() {
        assert_eq!(StepStatus::Completed.to_string(), "COMPLETED");
        assert_eq!(
            serde_json::to_string(&StepStatus::Failed).unwrap(),
            "\"FAILED\""
        );
    }
}
