use chrono::NaiveDate;
use pert_planner::{
    CalendarConfig, CpmResult, PlannedTask, ResourceAssignment, ResourceCalendar,
    ResourceScheduleRow, TaskInput, parse_workdays, project_span, run_cpm, schedule_resources,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn planned(id: &str, duration: f64, earliest_start: f64) -> PlannedTask {
    PlannedTask::from(CpmResult {
        id: id.to_string(),
        expected_duration: duration,
        variance: 0.0,
        path_variance: 0.0,
        earliest_start,
        earliest_finish: earliest_start + duration,
        latest_start: earliest_start,
        latest_finish: earliest_start + duration,
        slack: 0.0,
        is_critical: true,
    })
}

fn assign(pairs: &[(&str, &str)]) -> Vec<ResourceAssignment> {
    pairs
        .iter()
        .map(|(resource, task)| ResourceAssignment::new(*resource, *task))
        .collect()
}

fn monday_start() -> CalendarConfig {
    CalendarConfig::new(d(2026, 3, 2))
}

fn row<'a>(rows: &'a [ResourceScheduleRow], name: &str) -> &'a ResourceScheduleRow {
    rows.iter().find(|r| r.resource_name == name).unwrap()
}

fn assert_no_overlap(row: &ResourceScheduleRow) {
    for pair in row.tasks.windows(2) {
        assert!(
            pair[1].start_date > pair[0].finish_date,
            "{} overlaps {} for {}",
            pair[1].task_id,
            pair[0].task_id,
            row.resource_name
        );
    }
}

#[test]
fn sequential_tasks_cross_the_weekend() {
    let tasks = vec![planned("Design", 3.0, 0.0), planned("Build", 5.0, 3.0)];
    let rows = schedule_resources(
        &tasks,
        &assign(&[("Alice", "Design"), ("Alice", "Build")]),
        &monday_start(),
        &[],
    );

    assert_eq!(rows.len(), 1);
    let alice = &rows[0];
    assert_eq!(alice.tasks[0].task_id, "Design");
    assert_eq!(
        (alice.tasks[0].start_date, alice.tasks[0].finish_date),
        (d(2026, 3, 2), d(2026, 3, 4))
    );
    assert_eq!(
        (alice.tasks[1].start_date, alice.tasks[1].finish_date),
        (d(2026, 3, 5), d(2026, 3, 11))
    );
    assert_eq!(alice.tasks[1].start_offset, 3);
    assert_eq!(alice.tasks[1].finish_offset, 7);
    assert_eq!(alice.total_working_days, 8.0);
    assert_eq!(alice.calendar_span, 9);
    assert_no_overlap(alice);
}

#[test]
fn custom_work_week_moves_start_and_counts_saturday() {
    let tasks = vec![planned("Build", 5.0, 0.0)];
    let bob = ResourceCalendar::new("Bob").with_workdays(parse_workdays("t,w,th,f,s").unwrap());
    let rows = schedule_resources(
        &tasks,
        &assign(&[("Bob", "Build")]),
        &monday_start(),
        &[bob],
    );

    let task = &rows[0].tasks[0];
    assert_eq!(task.start_date, d(2026, 3, 3));
    assert_eq!(task.finish_date, d(2026, 3, 7));
}

#[test]
fn completed_tasks_with_only_finish_dates_do_not_overlap() {
    let tasks = vec![
        planned("Spike", 3.0, 0.0).completed(None, d(2026, 3, 4)),
        planned("Prototype", 3.0, 3.0).completed(None, d(2026, 3, 6)),
    ];
    let rows = schedule_resources(
        &tasks,
        &assign(&[("Alice", "Spike"), ("Alice", "Prototype")]),
        &monday_start(),
        &[],
    );

    let alice = &rows[0];
    assert_eq!(alice.tasks[0].start_date, d(2026, 3, 2));
    assert_eq!(alice.tasks[0].finish_date, d(2026, 3, 4));
    // Derived start would be 03-04; clamped to the day after Spike finished.
    assert_eq!(alice.tasks[1].start_date, d(2026, 3, 5));
    assert_eq!(alice.tasks[1].finish_date, d(2026, 3, 6));
    assert!(alice.tasks.iter().all(|t| t.done));
    assert_no_overlap(alice);
}

#[test]
fn completed_tasks_with_both_dates_are_used_verbatim() {
    let tasks = vec![
        planned("Research", 4.0, 0.0).completed(Some(d(2026, 2, 23)), d(2026, 2, 27)),
        planned("Write", 2.0, 0.0),
    ];
    let rows = schedule_resources(
        &tasks,
        &assign(&[("Dana", "Research"), ("Dana", "Write")]),
        &monday_start(),
        &[],
    );

    let dana = &rows[0];
    assert_eq!(dana.tasks[0].start_date, d(2026, 2, 23));
    assert_eq!(dana.tasks[0].finish_date, d(2026, 2, 27));
    assert_eq!(dana.tasks[0].start_offset, 0);
    assert_eq!(dana.tasks[1].start_date, d(2026, 3, 2));
    assert_eq!(dana.tasks[1].finish_date, d(2026, 3, 3));
}

#[test]
fn tasks_allowed_to_overlap_by_cpm_are_serialized() {
    let tasks = vec![planned("Api", 2.0, 0.0), planned("Ui", 2.0, 0.0)];
    let rows = schedule_resources(
        &tasks,
        &assign(&[("Erin", "Api"), ("Erin", "Ui")]),
        &monday_start(),
        &[],
    );

    let erin = &rows[0];
    assert_eq!(erin.tasks[0].task_id, "Api");
    assert_eq!(erin.tasks[1].start_date, d(2026, 3, 4));
    assert_eq!(erin.tasks[1].finish_date, d(2026, 3, 5));
    assert_no_overlap(erin);
}

#[test]
fn milestones_collapse_to_a_single_day() {
    let tasks = vec![planned("Kickoff", 0.0, 0.0), planned("Work", 1.0, 0.0)];
    let rows = schedule_resources(
        &tasks,
        &assign(&[("Finn", "Kickoff"), ("Finn", "Work")]),
        &monday_start(),
        &[],
    );

    let kickoff = &rows[0].tasks[0];
    assert_eq!(kickoff.start_date, kickoff.finish_date);
    assert_eq!(kickoff.start_date, d(2026, 3, 2));
    assert_eq!(rows[0].tasks[1].start_date, d(2026, 3, 3));
}

#[test]
fn pto_and_holidays_delay_work() {
    let config = monday_start().with_holidays(vec![d(2026, 3, 4)]);
    let gus = ResourceCalendar::new("Gus").with_pto(vec![d(2026, 3, 2)]);
    let rows = schedule_resources(
        &[planned("Audit", 3.0, 0.0)],
        &assign(&[("Gus", "Audit")]),
        &config,
        &[gus],
    );

    let task = &rows[0].tasks[0];
    assert_eq!(task.start_date, d(2026, 3, 3));
    assert_eq!(task.finish_date, d(2026, 3, 6));
    assert_eq!(rows[0].calendar_span, 3);
}

#[test]
fn rows_sort_by_first_start_then_name() {
    let tasks = vec![
        planned("Late", 1.0, 5.0),
        planned("EarlyA", 1.0, 0.0),
        planned("EarlyB", 1.0, 0.0),
    ];
    let rows = schedule_resources(
        &tasks,
        &assign(&[
            ("Zed", "Ghost"),
            ("Carol", "Late"),
            ("Bob", "EarlyB"),
            ("Alice", "EarlyA"),
        ]),
        &monday_start(),
        &[],
    );

    let names: Vec<&str> = rows.iter().map(|r| r.resource_name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol", "Zed"]);

    let zed = row(&rows, "Zed");
    assert!(zed.tasks.is_empty());
    assert_eq!(zed.calendar_span, 0);
    assert_eq!(zed.total_working_days, 0.0);
}

#[test]
fn unassigned_resources_produce_no_rows() {
    let rows = schedule_resources(
        &[planned("Solo", 1.0, 0.0)],
        &[],
        &monday_start(),
        &[ResourceCalendar::new("Idle")],
    );
    assert!(rows.is_empty());
    assert_eq!(project_span(&rows), None);
}

#[test]
fn duration_is_rounded_for_calendar_placement() {
    let rows = schedule_resources(
        &[planned("Review", 2.5, 0.0).with_name("Design review")],
        &assign(&[("Hana", "Review"), ("Hana", "Review")]),
        &monday_start(),
        &[],
    );

    assert_eq!(rows[0].tasks.len(), 1);
    let task = &rows[0].tasks[0];
    assert_eq!(task.task_name, "Design review");
    assert_eq!(task.duration, 2.5);
    assert_eq!(task.finish_date, d(2026, 3, 4));
    assert_eq!(rows[0].total_working_days, 2.5);
}

#[test]
fn cpm_output_feeds_the_resource_scheduler() {
    let cpm = run_cpm(&[
        TaskInput::new("Design", 2.0, 3.0, 5.0).with_successors(["Build"]),
        TaskInput::new("Build", 5.0, 8.0, 12.0).with_successors(["Test"]),
        TaskInput::new("Test", 2.0, 3.0, 4.0).with_successors(["Milestone"]),
        TaskInput::milestone("Milestone"),
        TaskInput::new("WriteTests", 2.0, 3.0, 4.0).with_successors(["Test"]),
    ])
    .unwrap();
    let tasks: Vec<PlannedTask> = cpm.tasks.into_iter().map(PlannedTask::from).collect();
    let rows = schedule_resources(
        &tasks,
        &assign(&[
            ("Alice", "Design"),
            ("Alice", "Build"),
            ("Bob", "WriteTests"),
            ("Bob", "Test"),
        ]),
        &monday_start(),
        &[],
    );

    let alice = row(&rows, "Alice");
    assert_eq!(alice.tasks[1].task_id, "Build");
    assert_eq!(alice.tasks[1].start_date, d(2026, 3, 6));
    assert_eq!(alice.tasks[1].finish_date, d(2026, 3, 17));
    assert!(alice.tasks[1].is_critical);

    let bob = row(&rows, "Bob");
    assert!(!bob.tasks[0].is_critical);
    assert_eq!(bob.tasks[1].start_date, d(2026, 3, 18));
    assert_eq!(bob.tasks[1].finish_date, d(2026, 3, 20));

    for r in &rows {
        assert_no_overlap(r);
    }
    assert_eq!(project_span(&rows), Some((d(2026, 3, 2), d(2026, 3, 20))));

    let json = serde_json::to_value(&rows).unwrap();
    assert_eq!(json[0]["tasks"][0]["startDate"], "2026-03-02");
    assert_eq!(json[0]["resourceName"], "Alice");
}
