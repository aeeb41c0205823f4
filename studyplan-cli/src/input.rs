//! Task and busy-interval loading for the `plan` command.
//!
//! Tasks: JSON array (engine wire shape) or CSV with header
//! `id,title,due,priority,status,type,estimated_hours,tags,selected`.
//! Busy intervals: JSON array of `{start, end, title?}`.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::Path;

use studyplan_core::time::parse_local_to_utc;
use studyplan_core::{BusyInterval, Priority, Task, TaskStatus, TaskType};

#[derive(Debug, Deserialize)]
struct TaskRow {
    id: String,
    title: String,
    due: String,
    priority: Option<String>,
    status: Option<String>,
    #[serde(rename = "type")]
    task_type: Option<String>,
    estimated_hours: Option<f64>,
    tags: Option<String>,
    selected: Option<bool>,
}

/// RFC3339, or "YYYY-MM-DD HH:MM" read as local time in `tz`.
pub fn parse_due(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    Ok(parse_local_to_utc(s, tz)?)
}

fn optional<T, E>(
    field: Option<&String>,
    parse: impl Fn(&str) -> std::result::Result<T, E>,
) -> Result<Option<T>>
where
    E: std::fmt::Display,
{
    match field.map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(s) => parse(s).map(Some).map_err(|e| anyhow!("{e}")),
        None => Ok(None),
    }
}

fn row_to_task(row: TaskRow, tz: Tz) -> Result<Task> {
    let due = parse_due(&row.due, tz).with_context(|| format!("task {}: due", row.id))?;
    let mut task = Task::new(row.id.trim(), row.title.trim(), due);

    if let Some(p) = optional(row.priority.as_ref(), str::parse::<Priority>)? {
        task = task.with_priority(p);
    }
    if let Some(s) = optional(row.status.as_ref(), str::parse::<TaskStatus>)? {
        task = task.with_status(s);
    }
    if let Some(t) = optional(row.task_type.as_ref(), str::parse::<TaskType>)? {
        task = task.with_type(t);
    }
    if let Some(h) = row.estimated_hours {
        task = task.with_effort_hours(h);
    }
    if let Some(tags) = row.tags.as_deref() {
        task = task.with_tags(tags.split(';').map(str::trim).filter(|t| !t.is_empty()));
    }
    if let Some(selected) = row.selected {
        task = task.with_selected(selected);
    }
    Ok(task)
}

pub fn parse_tasks_csv<R: Read>(reader: R, tz: Tz) -> Result<Vec<Task>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut tasks = Vec::new();
    for (line, result) in rdr.deserialize::<TaskRow>().enumerate() {
        let row = result.with_context(|| format!("csv row {}", line + 1))?;
        tasks.push(row_to_task(row, tz)?);
    }
    Ok(tasks)
}

pub fn parse_tasks_json(s: &str) -> Result<Vec<Task>> {
    serde_json::from_str(s).context("parse tasks json")
}

pub fn parse_busy_json(s: &str) -> Result<Vec<BusyInterval>> {
    serde_json::from_str(s).context("parse busy intervals json")
}

pub fn load_tasks(path: &Path, tz: Tz) -> Result<Vec<Task>> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        let file = fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
        return parse_tasks_csv(file, tz).with_context(|| format!("parsing {}", path.display()));
    }

    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_tasks_json(&s).with_context(|| format!("parsing {}", path.display()))
}

pub fn load_busy(path: &Path) -> Result<Vec<BusyInterval>> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_busy_json(&s).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn chicago() -> Tz {
        chrono_tz::America::Chicago
    }

    #[test]
    fn due_accepts_rfc3339_and_local() {
        let utc = Utc.with_ymd_and_hms(2026, 2, 6, 5, 59, 0).unwrap();
        assert_eq!(parse_due("2026-02-06T05:59:00Z", chicago()).unwrap(), utc);
        assert_eq!(parse_due("2026-02-05 23:59", chicago()).unwrap(), utc);
        assert!(parse_due("next friday", chicago()).is_err());
    }

    #[test]
    fn csv_rows_become_tasks() {
        let data = "\
id,title,due,priority,status,type,estimated_hours,tags,selected
hw3,Problem set 3,2026-02-05 23:59,high,todo,assignment,2.5,math;weekly,true
read7, Chapter 7 ,2026-02-04T18:00:00Z,,,reading,,,
old,Old quiz,2026-02-01 09:00,low,completed,exam,1,,false
";
        let tasks = parse_tasks_csv(data.as_bytes(), chicago()).unwrap();
        assert_eq!(tasks.len(), 3);

        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].estimated_hours, Some(2.5));
        assert_eq!(tasks[0].tags, vec!["math".to_string(), "weekly".to_string()]);
        assert!(tasks[0].is_eligible());

        assert_eq!(tasks[1].title, "Chapter 7");
        assert_eq!(tasks[1].priority, Priority::Medium);
        assert_eq!(tasks[1].task_type, TaskType::Reading);
        assert_eq!(tasks[1].estimated_hours, None);

        assert_eq!(tasks[2].status, TaskStatus::Completed);
        assert!(!tasks[2].is_eligible());
    }

    #[test]
    fn csv_rejects_unknown_priority() {
        let data = "id,title,due,priority,status,type,estimated_hours,tags,selected\n\
                    x,X,2026-02-05 23:59,urgent,,,,,\n";
        assert!(parse_tasks_csv(data.as_bytes(), chicago()).is_err());
    }

    #[test]
    fn busy_json_shape() {
        let busy = parse_busy_json(
            r#"[{"start":"2026-02-02T15:00:00Z","end":"2026-02-02T16:30:00Z","title":"Lecture"},
                {"start":"2026-02-03T15:00:00Z","end":"2026-02-03T16:00:00Z"}]"#,
        )
        .unwrap();
        assert_eq!(busy.len(), 2);
        assert_eq!(busy[0].title.as_deref(), Some("Lecture"));
        assert!(busy[1].title.is_none());
    }
}
