use crate::error::CalendarError;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Working-day rules for one person or for the project as a whole.
///
/// A date is a working day when it is not a holiday, not in the PTO set and falls on
/// one of the configured weekdays. All arithmetic steps one calendar day at a time on
/// `NaiveDate`, so there is no time-zone or daylight-saving skew.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkCalendar {
    workdays: HashSet<Weekday>,
    holidays: HashSet<NaiveDate>,
    pto: HashSet<NaiveDate>,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self::new(Self::MON_TO_FRI, Vec::<NaiveDate>::new())
    }
}

impl WorkCalendar {
    pub const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub const MON_TO_FRI: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    pub fn new<I, J>(workdays: I, holidays: J) -> Self
    where
        I: IntoIterator<Item = Weekday>,
        J: IntoIterator<Item = NaiveDate>,
    {
        Self {
            workdays: workdays.into_iter().collect(),
            holidays: holidays.into_iter().collect(),
            pto: HashSet::new(),
        }
    }

    /// Layer personal time off on top of the holiday set.
    pub fn with_pto<I>(mut self, pto: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.pto.extend(pto);
        self
    }

    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    pub fn add_holidays(&mut self, dates: &[NaiveDate]) {
        self.holidays.extend(dates);
    }

    /// Replace the work week (e.g. Tue-Sat for a shifted schedule).
    pub fn set_working_days(&mut self, days: Vec<Weekday>) {
        self.workdays = days.into_iter().collect();
    }

    /// Working weekdays, Monday first.
    pub fn working_days(&self) -> Vec<Weekday> {
        Self::ALL_WEEKDAYS
            .into_iter()
            .filter(|d| self.workdays.contains(d))
            .collect()
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    pub fn is_pto(&self, date: NaiveDate) -> bool {
        self.pto.contains(&date)
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !self.holidays.contains(&date)
            && !self.pto.contains(&date)
            && self.workdays.contains(&date.weekday())
    }

    fn has_working_days(&self) -> bool {
        !self.workdays.is_empty()
    }

    /// Move forward until `date` is a working day. No-op when it already is.
    pub fn skip_to_working_day(&self, date: NaiveDate) -> NaiveDate {
        if !self.has_working_days() {
            warn!("work calendar has no working weekdays; leaving {date} unchanged");
            return date;
        }
        let mut current = date;
        while !self.is_working_day(current) {
            current = current + Duration::days(1);
        }
        current
    }

    /// Move backward until `date` is a working day. No-op when it already is.
    pub fn skip_back_to_working_day(&self, date: NaiveDate) -> NaiveDate {
        if !self.has_working_days() {
            warn!("work calendar has no working weekdays; leaving {date} unchanged");
            return date;
        }
        let mut current = date;
        while !self.is_working_day(current) {
            current = current - Duration::days(1);
        }
        current
    }

    /// First working day strictly after `date`.
    pub fn next_working_day_after(&self, date: NaiveDate) -> NaiveDate {
        if !self.has_working_days() {
            return date;
        }
        self.skip_to_working_day(date + Duration::days(1))
    }

    /// Date of the last working day in a span of `days` working days starting at `start`.
    ///
    /// `start` is first snapped forward to a working day (the anchor). `days <= 0`
    /// returns the anchor, and so does `days == 1`. Fractional counts are rounded up.
    pub fn add_working_days(&self, start: NaiveDate, days: f64) -> NaiveDate {
        let anchor = self.skip_to_working_day(start);
        if days.is_nan() || days <= 0.0 || !self.has_working_days() {
            return anchor;
        }
        let remaining = days.ceil() as i64 - 1;
        let mut current = anchor;
        let mut counted = 0;
        while counted < remaining {
            current = current + Duration::days(1);
            if self.is_working_day(current) {
                counted += 1;
            }
        }
        current
    }

    /// Mirror of [`add_working_days`](Self::add_working_days) counting backward from `end`.
    pub fn subtract_working_days(&self, end: NaiveDate, days: f64) -> NaiveDate {
        let anchor = self.skip_back_to_working_day(end);
        if days.is_nan() || days <= 0.0 || !self.has_working_days() {
            return anchor;
        }
        let remaining = days.ceil() as i64 - 1;
        let mut current = anchor;
        let mut counted = 0;
        while counted < remaining {
            current = current - Duration::days(1);
            if self.is_working_day(current) {
                counted += 1;
            }
        }
        current
    }

    /// Working days in the inclusive range `[start, end]`; 0 when `end < start`.
    pub fn working_days_between(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        let mut count = 0;
        let mut current = start;

        while current <= end {
            if self.is_working_day(current) {
                count += 1;
            }
            current = current + Duration::days(1);
        }
        count
    }

    pub fn working_days_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut current = start;

        while current <= end {
            if self.is_working_day(current) {
                days.push(current);
            }
            current = current + Duration::days(1);
        }
        days
    }
}

/// Free-function form of [`WorkCalendar::add_working_days`].
pub fn add_working_days(
    start: NaiveDate,
    days: f64,
    workdays: &[Weekday],
    holidays: &[NaiveDate],
    pto: Option<&[NaiveDate]>,
) -> NaiveDate {
    calendar_from_parts(workdays, holidays, pto).add_working_days(start, days)
}

/// Free-function form of [`WorkCalendar::subtract_working_days`].
pub fn subtract_working_days(
    end: NaiveDate,
    days: f64,
    workdays: &[Weekday],
    holidays: &[NaiveDate],
    pto: Option<&[NaiveDate]>,
) -> NaiveDate {
    calendar_from_parts(workdays, holidays, pto).subtract_working_days(end, days)
}

pub fn working_days_between(
    start: NaiveDate,
    end: NaiveDate,
    workdays: &[Weekday],
    holidays: &[NaiveDate],
) -> i64 {
    calendar_from_parts(workdays, holidays, None).working_days_between(start, end)
}

pub fn skip_to_working_day(
    date: NaiveDate,
    workdays: &[Weekday],
    holidays: &[NaiveDate],
    pto: Option<&[NaiveDate]>,
) -> NaiveDate {
    calendar_from_parts(workdays, holidays, pto).skip_to_working_day(date)
}

fn calendar_from_parts(
    workdays: &[Weekday],
    holidays: &[NaiveDate],
    pto: Option<&[NaiveDate]>,
) -> WorkCalendar {
    WorkCalendar::new(workdays.iter().copied(), holidays.iter().copied())
        .with_pto(pto.unwrap_or_default().iter().copied())
}

fn default_workdays() -> Vec<Weekday> {
    WorkCalendar::MON_TO_FRI.to_vec()
}

/// Project-wide calendar settings. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarConfig {
    pub start_date: NaiveDate,
    #[serde(default = "default_workdays", with = "crate::weekday::tokens")]
    pub default_workdays: Vec<Weekday>,
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

impl CalendarConfig {
    /// Mon-Fri, no holidays.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            default_workdays: default_workdays(),
            holidays: Vec::new(),
        }
    }

    pub fn with_workdays(mut self, workdays: Vec<Weekday>) -> Self {
        self.default_workdays = workdays;
        self
    }

    pub fn with_holidays(mut self, holidays: Vec<NaiveDate>) -> Self {
        self.holidays = holidays;
        self
    }

    pub fn validate(&self) -> Result<(), CalendarError> {
        if self.default_workdays.is_empty() {
            return Err(CalendarError::EmptyWorkWeek);
        }
        Ok(())
    }

    /// Parse and validate a JSON document such as
    /// `{"startDate": "2026-03-02", "defaultWorkdays": ["m","t","w","th","f"]}`.
    pub fn from_json_str(json: &str) -> Result<Self, CalendarError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| CalendarError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Project default calendar: default workdays and holidays, no PTO.
    pub fn calendar(&self) -> WorkCalendar {
        WorkCalendar::new(
            self.default_workdays.iter().copied(),
            self.holidays.iter().copied(),
        )
    }

    /// Effective calendar for a resource. Missing or empty overrides fall back to the
    /// project defaults; holidays always apply.
    pub fn calendar_for(&self, resource: Option<&ResourceCalendar>) -> WorkCalendar {
        let Some(resource) = resource else {
            return self.calendar();
        };
        let workdays = match resource.workdays.as_deref() {
            Some(days) if !days.is_empty() => days,
            _ => self.default_workdays.as_slice(),
        };
        WorkCalendar::new(workdays.iter().copied(), self.holidays.iter().copied())
            .with_pto(resource.pto.iter().flatten().copied())
    }
}

/// Per-resource overrides. Absent fields fall back to [`CalendarConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCalendar {
    pub resource_name: String,
    #[serde(
        default,
        with = "crate::weekday::option_tokens",
        skip_serializing_if = "Option::is_none"
    )]
    pub workdays: Option<Vec<Weekday>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pto: Option<Vec<NaiveDate>>,
}

impl ResourceCalendar {
    pub fn new(resource_name: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
            workdays: None,
            pto: None,
        }
    }

    pub fn with_workdays(mut self, workdays: Vec<Weekday>) -> Self {
        self.workdays = Some(workdays);
        self
    }

    pub fn with_pto(mut self, pto: Vec<NaiveDate>) -> Self {
        self.pto = Some(pto);
        self
    }
}
