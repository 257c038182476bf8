use crate::duration::Duration;
use serde::{Deserialize, Serialize};

/// Slack below this magnitude counts as zero. Earliest/latest times accumulate
/// floating-point error along long chains, so exact equality is never used.
pub const CRITICAL_EPSILON: f64 = 0.001;

/// A task as supplied by the graph-extraction layer.
///
/// Duration fields follow the estimate fallback rule of [`Duration::new`]: zero or
/// missing means "not given".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub id: String,
    #[serde(default)]
    pub duration_low: f64,
    #[serde(default)]
    pub duration_likely: f64,
    #[serde(default)]
    pub duration_high: f64,
    #[serde(default)]
    pub successors: Vec<String>,
}

impl TaskInput {
    pub fn new(id: impl Into<String>, low: f64, likely: f64, high: f64) -> Self {
        Self {
            id: id.into(),
            duration_low: low,
            duration_likely: likely,
            duration_high: high,
            successors: Vec::new(),
        }
    }

    pub fn milestone(id: impl Into<String>) -> Self {
        Self::new(id, 0.0, 0.0, 0.0)
    }

    pub fn with_successors<I, S>(mut self, successors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.successors = successors.into_iter().map(Into::into).collect();
        self
    }

    pub fn duration(&self) -> Duration {
        Duration::from_estimates(self.duration_low, self.duration_likely, self.duration_high)
    }
}

/// Per-run scheduling state of one task. Lives in the graph arena; edges carry the
/// predecessor/successor relationships.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskNode {
    pub id: String,
    pub duration: Duration,
    pub earliest_start: f64,
    pub earliest_finish: f64,
    pub latest_start: f64,
    pub latest_finish: f64,
    pub path_variance: f64,
}

impl TaskNode {
    pub fn new(id: impl Into<String>, duration: Duration) -> Self {
        Self {
            id: id.into(),
            duration,
            earliest_start: 0.0,
            earliest_finish: 0.0,
            latest_start: f64::INFINITY,
            latest_finish: f64::INFINITY,
            path_variance: 0.0,
        }
    }

    pub fn slack(&self) -> f64 {
        self.latest_start - self.earliest_start
    }

    pub fn is_critical(&self) -> bool {
        self.slack().abs() < CRITICAL_EPSILON
    }
}
