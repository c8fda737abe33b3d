use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snapshot::TaskSnapshot;

const TEMP_ID_PREFIX: &str = "temp_";

/// Input rejected at the form or import boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("task title cannot be empty")]
    EmptyTitle,
    #[error("unknown priority `{0}` (expected high, medium or low)")]
    UnknownPriority(String),
    #[error("task id cannot be empty")]
    EmptyId,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_string()))
    }

    fn from_millis(ms: i64) -> Self {
        Self(format!("{TEMP_ID_PREFIX}{ms}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn issued_millis(&self) -> Option<i64> {
        self.0
            .strip_prefix(TEMP_ID_PREFIX)
            .and_then(|rest| rest.parse().ok())
    }
}

impl TryFrom<String> for TaskId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Sort rank; lower sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(ValidationError::UnknownPriority(s.to_string())),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Priority> for &'static str {
    fn from(priority: Priority) -> Self {
        priority.as_str()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lifecycle {
    #[default]
    Active,
    /// Exit transition running; the record is dropped once it finishes.
    Removing,
}

/// Deserializing goes through [`TaskSnapshot`] so a record can never skip validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskSnapshot")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub priority: Priority,
    pub completed: bool,
    #[serde(skip)]
    pub lifecycle: Lifecycle,
}

impl TryFrom<TaskSnapshot> for Task {
    type Error = ValidationError;

    fn try_from(snapshot: TaskSnapshot) -> Result<Self, Self::Error> {
        snapshot.into_task()
    }
}

impl Task {
    pub fn new(id: TaskId, title: &str, priority: Priority) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(Self {
            id,
            title: title.to_string(),
            priority,
            completed: false,
            lifecycle: Lifecycle::Active,
        })
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }
}

/// Issues `temp_<millis>` ids that never repeat, even when the clock stalls.
#[derive(Debug, Clone, Default)]
pub struct IdSource {
    last: Option<i64>,
}

impl IdSource {
    pub fn next(&mut self, now: DateTime<Utc>) -> TaskId {
        let ms = now.timestamp_millis();
        let ms = match self.last {
            Some(last) if ms <= last => last + 1,
            _ => ms,
        };
        self.last = Some(ms);
        TaskId::from_millis(ms)
    }

    /// Records an id issued elsewhere (e.g. by an earlier page) so it is not handed out again.
    pub fn observe(&mut self, id: &TaskId) {
        if let Some(ms) = id.issued_millis() {
            self.last = Some(self.last.map_or(ms, |last| last.max(ms)));
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn priority_parse_is_case_insensitive_and_strict() {
        assert_eq!("High".parse::<Priority>(), Ok(Priority::High));
        assert_eq!(" medium ".parse::<Priority>(), Ok(Priority::Medium));
        assert_eq!("LOW".parse::<Priority>(), Ok(Priority::Low));
        assert_eq!(
            "urgent".parse::<Priority>(),
            Err(ValidationError::UnknownPriority("urgent".to_string()))
        );
    }

    #[test]
    fn task_title_is_trimmed_and_required() {
        let id = TaskId::new("1").expect("id");
        let task = Task::new(id.clone(), "  water plants ", Priority::Low).expect("task");
        assert_eq!(task.title, "water plants");
        assert!(!task.completed);
        assert!(task.is_active());

        assert_eq!(
            Task::new(id, "   ", Priority::Low),
            Err(ValidationError::EmptyTitle)
        );
    }

    #[test]
    fn id_source_stays_monotonic_when_clock_stalls() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).single().expect("valid timestamp");
        let mut ids = IdSource::default();
        let a = ids.next(now);
        let b = ids.next(now);
        let c = ids.next(now - chrono::Duration::seconds(5));
        assert_eq!(a.as_str(), format!("temp_{}", now.timestamp_millis()));
        assert_eq!(b.as_str(), format!("temp_{}", now.timestamp_millis() + 1));
        assert_eq!(c.as_str(), format!("temp_{}", now.timestamp_millis() + 2));
    }

    #[test]
    fn id_source_skips_observed_ids() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).single().expect("valid timestamp");
        let seen = TaskId::new(format!("temp_{}", now.timestamp_millis() + 10)).expect("id");
        let mut ids = IdSource::default();
        ids.observe(&seen);
        ids.observe(&TaskId::new("42").expect("id"));
        let next = ids.next(now);
        assert_eq!(next.as_str(), format!("temp_{}", now.timestamp_millis() + 11));
    }

    #[test]
    fn task_serde_uses_lowercase_priority() {
        let json = r#"{"id":"7","title":"Ship it","priority":"High","completed":true}"#;
        let task: Task = serde_json::from_str(json).expect("parse");
        assert_eq!(task.priority, Priority::High);
        assert!(task.completed);
        let back = serde_json::to_string(&task).expect("encode");
        assert!(back.contains(r#""priority":"high""#));

        let bad = r#"{"id":"8","title":"x","priority":"urgent"}"#;
        assert!(serde_json::from_str::<Task>(bad).is_err());
    }

    #[test]
    fn task_deserialize_rejects_blank_title() {
        let blank = r#"{"id":"9","title":"   ","priority":"low"}"#;
        let err = serde_json::from_str::<Task>(blank).expect_err("blank title");
        assert!(err.to_string().contains("title cannot be empty"));

        let padded = r#"{"id":" 10 ","title":" nap ","priority":"low"}"#;
        let task: Task = serde_json::from_str(padded).expect("parse");
        assert_eq!(task.id.as_str(), "10");
        assert_eq!(task.title, "nap");
        assert!(!task.completed);
    }
}
