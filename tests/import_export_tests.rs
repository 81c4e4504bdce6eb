use chrono::NaiveDate;
use gantt_schedule::{
    EntryKind, Milestone, PersistenceError, ProjectPlan, ScheduleMetadata, Task,
    load_entries_from_csv, load_plan_from_json, save_entries_to_csv, save_entries_to_json,
    save_plan_to_json, write_entries_csv,
};
use std::fs;
use tempfile::NamedTempFile;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn build_sample_plan() -> ProjectPlan {
    let mut metadata = ScheduleMetadata::starting_on(d(2025, 1, 6));
    metadata.project_name = "Export Project".into();
    metadata.project_description = "Testing persistence helpers".into();

    let tasks = vec![
        Task::new(1, "Design", 5).with_category("Design"),
        Task::new(2, "Build, phase one", 8)
            .with_predecessors([1])
            .with_category("Build"),
    ];
    let milestones = vec![Milestone::new(1, "Ready", [2])];
    ProjectPlan::new(metadata, tasks, milestones)
}

#[test]
fn plan_json_round_trip() {
    let plan = build_sample_plan();
    let tmp = NamedTempFile::new().expect("create temp file");
    save_plan_to_json(&plan, tmp.path()).unwrap();

    let loaded = load_plan_from_json(tmp.path()).unwrap();
    assert_eq!(loaded, plan);
}

#[test]
fn plan_json_defaults_optional_fields() {
    let tmp = NamedTempFile::new().expect("create temp file");
    fs::write(
        tmp.path(),
        r#"{
            "metadata": { "project_name": "Minimal", "project_start_date": "2025-02-03" },
            "tasks": [ { "id": 1, "name": "only", "duration_days": 2 } ]
        }"#,
    )
    .unwrap();

    let plan = load_plan_from_json(tmp.path()).unwrap();
    assert!(plan.milestones.is_empty());
    assert!(plan.tasks[0].predecessors.is_empty());
    assert_eq!(plan.metadata.milestone_category, "Milestone");

    let schedule = plan.schedule().unwrap();
    assert_eq!(schedule.entries()[0].finish, d(2025, 2, 5));
}

#[test]
fn loading_plan_with_duplicate_ids_is_invalid_data() {
    let mut plan = build_sample_plan();
    plan.tasks.push(Task::new(1, "Design again", 1));
    let tmp = NamedTempFile::new().expect("create temp file");
    fs::write(tmp.path(), serde_json::to_string(&plan).unwrap()).unwrap();

    match load_plan_from_json(tmp.path()) {
        Err(PersistenceError::InvalidData(msg)) => assert!(msg.contains("duplicate task id 1")),
        other => panic!("expected invalid data, got {other:?}"),
    }
}

#[test]
fn saving_invalid_plan_is_refused() {
    let mut plan = build_sample_plan();
    plan.tasks[0].duration_days = -1;
    let tmp = NamedTempFile::new().expect("create temp file");
    assert!(matches!(
        save_plan_to_json(&plan, tmp.path()),
        Err(PersistenceError::InvalidData(_))
    ));
}

#[test]
fn plan_without_start_date_is_rejected() {
    let tmp = NamedTempFile::new().expect("create temp file");
    fs::write(
        tmp.path(),
        r#"{ "tasks": [ { "id": 1, "name": "a", "duration_days": 3 } ] }"#,
    )
    .unwrap();
    match load_plan_from_json(tmp.path()) {
        Err(PersistenceError::Serialization(err)) => {
            assert!(err.to_string().contains("missing field `metadata`"))
        }
        other => panic!("expected serialization error, got {other:?}"),
    }

    fs::write(
        tmp.path(),
        r#"{
            "metadata": { "project_name": "Undated" },
            "tasks": [ { "id": 1, "name": "a", "duration_days": 3 } ]
        }"#,
    )
    .unwrap();
    match load_plan_from_json(tmp.path()) {
        Err(PersistenceError::Serialization(err)) => {
            assert!(err.to_string().contains("missing field `project_start_date`"))
        }
        other => panic!("expected serialization error, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let tmp = NamedTempFile::new().expect("create temp file");
    fs::write(tmp.path(), "{ not json").unwrap();
    assert!(matches!(
        load_plan_from_json(tmp.path()),
        Err(PersistenceError::Serialization(_))
    ));
}

#[test]
fn entries_csv_round_trip() {
    let entries = build_sample_plan().schedule().unwrap().into_entries();
    let tmp = NamedTempFile::new().expect("create temp file");
    save_entries_to_csv(&entries, tmp.path()).unwrap();

    let loaded = load_entries_from_csv(tmp.path()).unwrap();
    assert_eq!(loaded, entries);
    assert_eq!(loaded[2].kind, EntryKind::Milestone(1));
}

#[test]
fn entries_csv_has_header_and_quotes_commas() {
    let entries = build_sample_plan().schedule().unwrap().into_entries();
    let mut buffer = Vec::new();
    write_entries_csv(&entries, &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("kind,id,label,category,start,finish"));
    assert_eq!(lines.next(), Some("task,1,Design,Design,2025-01-06,2025-01-11"));
    assert_eq!(
        lines.next(),
        Some("task,2,\"Build, phase one\",Build,2025-01-11,2025-01-19")
    );
    assert_eq!(
        lines.next(),
        Some("milestone,1,Ready,Milestone,2025-01-19,2025-01-19")
    );
}

#[test]
fn entries_json_carries_kind_and_id() {
    let entries = build_sample_plan().schedule().unwrap().into_entries();
    let tmp = NamedTempFile::new().expect("create temp file");
    save_entries_to_json(&entries, tmp.path()).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(tmp.path()).unwrap()).unwrap();
    let first = &value[0];
    assert_eq!(first["kind"], "task");
    assert_eq!(first["id"], 1);
    assert_eq!(first["label"], "Design");
    assert_eq!(first["start"], "2025-01-06");
}

#[test]
fn csv_with_bad_date_is_invalid_data() {
    let tmp = NamedTempFile::new().expect("create temp file");
    fs::write(
        tmp.path(),
        "kind,id,label,category,start,finish\ntask,1,A,X,2025-02-30,2025-03-01\n",
    )
    .unwrap();
    assert!(matches!(
        load_entries_from_csv(tmp.path()),
        Err(PersistenceError::InvalidData(_))
    ));
}
