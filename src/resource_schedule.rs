//! Resource leveling: serialize each resource's tasks onto its own working calendar.

use crate::calendar::{CalendarConfig, ResourceCalendar, WorkCalendar};
use crate::cpm::round1;
use crate::date_mapper::{date_to_offset_in, offset_to_date_in};
use crate::resource::{PlannedTask, ResourceAssignment, ResourceScheduleRow, ScheduledTask};
use chrono::NaiveDate;
use log::{debug, trace, warn};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Produce one row per assigned resource, ordered by first task start, then name.
///
/// Assigned tasks without a planned entry are skipped. A resource's tasks are placed
/// in earliest-start order and never overlap: each starts no earlier than the first
/// working day after the previous one finished.
pub fn schedule_resources(
    tasks: &[PlannedTask],
    assignments: &[ResourceAssignment],
    config: &CalendarConfig,
    resource_calendars: &[ResourceCalendar],
) -> Vec<ResourceScheduleRow> {
    let mut by_id: HashMap<&str, &PlannedTask> = HashMap::with_capacity(tasks.len());
    for task in tasks {
        by_id.entry(task.id()).or_insert(task);
    }
    let overrides: HashMap<&str, &ResourceCalendar> = resource_calendars
        .iter()
        .map(|rc| (rc.resource_name.as_str(), rc))
        .collect();

    // Resources in first-appearance order; repeated pairs collapse.
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    let mut group_index: HashMap<&str, usize> = HashMap::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    for assignment in assignments {
        let key = (assignment.resource_name.as_str(), assignment.task_id.as_str());
        if !seen.insert(key) {
            continue;
        }
        let idx = *group_index.entry(key.0).or_insert_with(|| {
            groups.push((key.0, Vec::new()));
            groups.len() - 1
        });
        groups[idx].1.push(key.1);
    }

    let project_calendar = config.calendar();
    let scheduler = ResourceScheduler {
        config,
        project_calendar: &project_calendar,
        by_id: &by_id,
    };

    #[cfg(feature = "parallel")]
    let mut rows: Vec<ResourceScheduleRow> = groups
        .par_iter()
        .map(|(name, ids)| scheduler.schedule_row(name, ids, overrides.get(name).copied()))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let mut rows: Vec<ResourceScheduleRow> = groups
        .iter()
        .map(|(name, ids)| scheduler.schedule_row(name, ids, overrides.get(name).copied()))
        .collect();

    rows.sort_by(compare_rows);
    rows
}

/// Earliest start and latest finish across all rows; the span a date axis should cover.
pub fn project_span(rows: &[ResourceScheduleRow]) -> Option<(NaiveDate, NaiveDate)> {
    let start = rows.iter().filter_map(ResourceScheduleRow::first_start).min()?;
    let finish = rows.iter().filter_map(ResourceScheduleRow::last_finish).max()?;
    Some((start, finish))
}

fn compare_rows(a: &ResourceScheduleRow, b: &ResourceScheduleRow) -> Ordering {
    match (a.first_start(), b.first_start()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.resource_name.cmp(&b.resource_name))
}

struct ResourceScheduler<'a> {
    config: &'a CalendarConfig,
    project_calendar: &'a WorkCalendar,
    by_id: &'a HashMap<&'a str, &'a PlannedTask>,
}

impl ResourceScheduler<'_> {
    fn offset_of(&self, date: NaiveDate) -> u32 {
        date_to_offset_in(self.project_calendar, self.config.start_date, date)
    }

    fn schedule_row(
        &self,
        resource_name: &str,
        task_ids: &[&str],
        resource_calendar: Option<&ResourceCalendar>,
    ) -> ResourceScheduleRow {
        let calendar = self.config.calendar_for(resource_calendar);

        let mut planned: Vec<&PlannedTask> = task_ids
            .iter()
            .filter_map(|id| {
                let task = self.by_id.get(id).copied();
                if task.is_none() {
                    warn!("resource '{resource_name}': task '{id}' has no CPM result; skipped");
                }
                task
            })
            .collect();
        // Stable, so equal starts keep assignment order.
        planned.sort_by(|a, b| a.timing.earliest_start.total_cmp(&b.timing.earliest_start));

        let mut available = calendar.skip_to_working_day(self.config.start_date);
        let mut scheduled = Vec::with_capacity(planned.len());
        let mut total_working_days = 0.0;

        for task in planned {
            let duration = task.timing.expected_duration;
            let span = duration.round();

            let (start, finish) = match (task.done, task.start_date, task.done_date) {
                (true, Some(start), Some(finish)) => {
                    trace!("{resource_name}/{}: completed, recorded dates", task.id());
                    (start, finish)
                }
                (true, None, Some(finish)) => {
                    let derived = calendar.subtract_working_days(finish, span);
                    trace!(
                        "{resource_name}/{}: completed, start derived as {derived}",
                        task.id()
                    );
                    (derived.max(available), finish)
                }
                _ => {
                    let mapped = offset_to_date_in(
                        &calendar,
                        self.config.start_date,
                        task.timing.earliest_start,
                    );
                    let start = calendar.skip_to_working_day(mapped.max(available));
                    (start, calendar.add_working_days(start, span))
                }
            };
            trace!("{resource_name}/{}: {start} -> {finish}", task.id());

            available = calendar.next_working_day_after(finish);
            total_working_days += duration;

            scheduled.push(ScheduledTask {
                task_id: task.id().to_string(),
                task_name: task.name.clone(),
                resource_name: resource_name.to_string(),
                start_offset: self.offset_of(start),
                finish_offset: self.offset_of(finish),
                start_date: start,
                finish_date: finish,
                duration,
                is_critical: task.timing.is_critical,
                done: task.done,
            });
        }

        let calendar_span = match (scheduled.first(), scheduled.last()) {
            (Some(first), Some(last)) => (last.finish_date - first.start_date).num_days(),
            _ => 0,
        };
        debug!(
            "resource '{resource_name}': {} task(s), span {calendar_span} day(s)",
            scheduled.len()
        );

        ResourceScheduleRow {
            resource_name: resource_name.to_string(),
            tasks: scheduled,
            total_working_days: round1(total_working_days),
            calendar_span,
        }
    }
}
