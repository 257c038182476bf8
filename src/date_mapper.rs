//! Conversions between abstract working-day offsets and calendar dates.

use crate::calendar::{CalendarConfig, ResourceCalendar, WorkCalendar};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKind {
    Working,
    Weekend,
    Holiday,
}

/// One day of the project timeline. `offset` is set only on working days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateAxisEntry {
    pub date: NaiveDate,
    pub offset: Option<u32>,
    #[serde(rename = "type")]
    pub kind: DayKind,
}

/// Date of working-day `offset` (0-based) counted from the project start.
///
/// With a resource calendar, that resource's workdays and PTO apply, so offset 0 is
/// the resource's first working day at or after the start date. Fractional offsets
/// round up to the next whole working day.
pub fn offset_to_date(
    offset: f64,
    config: &CalendarConfig,
    resource: Option<&ResourceCalendar>,
) -> NaiveDate {
    offset_to_date_in(&config.calendar_for(resource), config.start_date, offset)
}

pub(crate) fn offset_to_date_in(
    calendar: &WorkCalendar,
    start: NaiveDate,
    offset: f64,
) -> NaiveDate {
    calendar.add_working_days(start, offset + 1.0)
}

/// Inverse of [`offset_to_date`] under the project default calendar.
///
/// Dates before the start map to 0. A non-working date maps to the offset of the
/// working day before it.
pub fn date_to_offset(date: NaiveDate, config: &CalendarConfig) -> u32 {
    date_to_offset_in(&config.calendar(), config.start_date, date)
}

pub(crate) fn date_to_offset_in(
    calendar: &WorkCalendar,
    start: NaiveDate,
    date: NaiveDate,
) -> u32 {
    if date < start {
        return 0;
    }
    let count = calendar.working_days_between(start, date);
    u32::try_from(count - 1).unwrap_or(0)
}

/// One entry per calendar day from the start date through `end_date` inclusive.
///
/// Holidays win over weekends: a holiday on a Saturday is still a holiday.
pub fn build_date_axis(config: &CalendarConfig, end_date: NaiveDate) -> Vec<DateAxisEntry> {
    let calendar = config.calendar();
    let mut axis = Vec::new();
    let mut next_offset = 0u32;
    let mut current = config.start_date;

    while current <= end_date {
        let kind = if calendar.is_holiday(current) {
            DayKind::Holiday
        } else if !config.default_workdays.contains(&current.weekday()) {
            DayKind::Weekend
        } else {
            DayKind::Working
        };
        let offset = (kind == DayKind::Working).then(|| {
            next_offset += 1;
            next_offset - 1
        });
        axis.push(DateAxisEntry {
            date: current,
            offset,
            kind,
        });
        current = current + Duration::days(1);
    }
    axis
}
