pub mod calculations;
pub mod calendar;
pub mod cpm;
pub mod date_mapper;
pub mod duration;
pub mod error;
pub mod graph;
pub mod resource;
pub mod resource_schedule;
pub mod task;
pub mod weekday;

pub use calendar::{
    CalendarConfig, ResourceCalendar, WorkCalendar, add_working_days, skip_to_working_day,
    subtract_working_days, working_days_between,
};
pub use cpm::{ConfidenceInterval, CpmEdge, CpmOutput, CpmResult, CriticalPath, run_cpm};
pub use date_mapper::{DateAxisEntry, DayKind, build_date_axis, date_to_offset, offset_to_date};
pub use duration::Duration;
pub use error::{CalendarError, CpmError, CpmErrorWire};
pub use resource::{PlannedTask, ResourceAssignment, ResourceScheduleRow, ScheduledTask};
pub use resource_schedule::{project_span, schedule_resources};
pub use task::{CRITICAL_EPSILON, TaskInput, TaskNode};
pub use weekday::{parse_weekday, parse_workdays, weekday_token};
