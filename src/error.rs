use serde::Serialize;
use thiserror::Error;

/// Validation failures reported by [`crate::run_cpm`].
///
/// Either variant halts the run: earliest/latest times are meaningless without a
/// complete, acyclic ordering, so no partial schedule is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CpmError {
    #[error("Missing successor tasks: {}", .missing.join(", "))]
    MissingSuccessors { missing: Vec<String> },

    #[error("Graph contains a cycle")]
    CycleDetected,

    #[error("Duplicate task id: {id}")]
    DuplicateTask { id: String },
}

/// Wire form of a [`CpmError`], as consumed by the visualization layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CpmErrorWire {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_successors: Option<Vec<String>>,
}

impl CpmError {
    pub fn to_wire(&self) -> CpmErrorWire {
        match self {
            CpmError::MissingSuccessors { missing } => CpmErrorWire {
                error: "Missing successor tasks".to_string(),
                missing_successors: Some(missing.clone()),
            },
            CpmError::CycleDetected => CpmErrorWire {
                error: self.to_string(),
                missing_successors: None,
            },
            CpmError::DuplicateTask { .. } => CpmErrorWire {
                error: self.to_string(),
                missing_successors: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("invalid weekday token '{0}' (expected one of m, t, w, th, f, s, su)")]
    InvalidWeekday(String),

    #[error("calendar requires at least one working day")]
    EmptyWorkWeek,

    #[error("invalid calendar configuration: {0}")]
    Config(String),
}
