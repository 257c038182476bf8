use crate::cpm::CpmResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Assignment of a resource (person, crew, machine) to a task. Many-to-many.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAssignment {
    pub resource_name: String,
    pub task_id: String,
}

impl ResourceAssignment {
    pub fn new(resource_name: impl Into<String>, task_id: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
            task_id: task_id.into(),
        }
    }
}

/// CPM timing plus the task facts the resource scheduler needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedTask {
    pub timing: CpmResult,
    /// Display name; defaults to the task id.
    pub name: String,
    #[serde(default)]
    pub done: bool,
    /// Historical start of a completed task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Historical finish of a completed task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_date: Option<NaiveDate>,
}

impl PlannedTask {
    pub fn id(&self) -> &str {
        &self.timing.id
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Mark completed with a known finish date and, optionally, a known start.
    pub fn completed(mut self, start_date: Option<NaiveDate>, done_date: NaiveDate) -> Self {
        self.done = true;
        self.start_date = start_date;
        self.done_date = Some(done_date);
        self
    }
}

impl From<CpmResult> for PlannedTask {
    fn from(timing: CpmResult) -> Self {
        Self {
            name: timing.id.clone(),
            timing,
            done: false,
            start_date: None,
            done_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    pub task_id: String,
    pub task_name: String,
    pub resource_name: String,
    pub start_offset: u32,
    pub finish_offset: u32,
    pub start_date: NaiveDate,
    pub finish_date: NaiveDate,
    pub duration: f64,
    pub is_critical: bool,
    pub done: bool,
}

/// One resource's serialized work. Tasks never overlap in calendar time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceScheduleRow {
    pub resource_name: String,
    pub tasks: Vec<ScheduledTask>,
    pub total_working_days: f64,
    pub calendar_span: i64,
}

impl ResourceScheduleRow {
    pub fn first_start(&self) -> Option<NaiveDate> {
        self.tasks.first().map(|t| t.start_date)
    }

    pub fn last_finish(&self) -> Option<NaiveDate> {
        self.tasks.iter().map(|t| t.finish_date).max()
    }
}
