use super::{PersistenceError, PersistenceResult};
use crate::project::ProjectPlan;
use crate::schedule::{EntryKind, ScheduledEntry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn save_plan_to_json<P: AsRef<Path>>(plan: &ProjectPlan, path: P) -> PersistenceResult<()> {
    super::validate_plan(plan)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, plan)?;
    Ok(())
}

pub fn load_plan_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<ProjectPlan> {
    let file = File::open(path)?;
    let plan: ProjectPlan = serde_json::from_reader(file)?;
    super::validate_plan(&plan)?;
    Ok(plan)
}

pub fn save_entries_to_json<P: AsRef<Path>>(
    entries: &[ScheduledEntry],
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, entries)?;
    Ok(())
}

/// Flat row handed to chart renderers: one per task or milestone.
#[derive(Debug, Default, Serialize, Deserialize)]
struct EntryCsvRecord {
    kind: String,
    id: i32,
    label: String,
    category: String,
    start: String,
    finish: String,
}

impl From<&ScheduledEntry> for EntryCsvRecord {
    fn from(entry: &ScheduledEntry) -> Self {
        let (kind, id) = match entry.kind {
            EntryKind::Task(id) => ("task", id),
            EntryKind::Milestone(id) => ("milestone", id),
        };
        Self {
            kind: kind.to_string(),
            id,
            label: entry.label.clone(),
            category: entry.category.clone(),
            start: format_date(entry.start),
            finish: format_date(entry.finish),
        }
    }
}

impl EntryCsvRecord {
    fn into_entry(self) -> PersistenceResult<ScheduledEntry> {
        let kind = match self.kind.trim().to_ascii_lowercase().as_str() {
            "task" => EntryKind::Task(self.id),
            "milestone" => EntryKind::Milestone(self.id),
            other => {
                return Err(PersistenceError::InvalidData(format!(
                    "invalid entry kind '{other}'"
                )));
            }
        };
        Ok(ScheduledEntry {
            label: self.label,
            start: parse_date(&self.start)?,
            finish: parse_date(&self.finish)?,
            category: self.category,
            kind,
        })
    }
}

pub fn write_entries_csv<W: Write>(entries: &[ScheduledEntry], writer: W) -> PersistenceResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for entry in entries {
        writer.serialize(EntryCsvRecord::from(entry))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_entries_to_csv<P: AsRef<Path>>(
    entries: &[ScheduledEntry],
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    write_entries_csv(entries, file)
}

pub fn load_entries_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<ScheduledEntry>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut entries = Vec::new();
    for record in reader.deserialize::<EntryCsvRecord>() {
        entries.push(record?.into_entry()?);
    }
    Ok(entries)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_date(input: &str) -> PersistenceResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| PersistenceError::InvalidData(format!("invalid date '{input}': {e}")))
}
