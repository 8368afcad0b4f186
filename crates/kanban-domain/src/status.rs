//! Translation between UI labels and backend codes.
//!
//! Both directions are total: unknown input falls back to a default value
//! instead of failing, so a board can always be rendered from whatever the
//! server sends.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskStatus {
    Todo,
    InProgress,
    InReview,
    Done,
}

impl TaskStatus {
    /// Columns in board order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::InReview,
        TaskStatus::Done,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::InReview => "IN_REVIEW",
            Self::Done => "DONE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::InReview => "Under Review",
            Self::Done => "Done",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::InProgress => 1,
            Self::InReview => 2,
            Self::Done => 3,
        }
    }

    pub fn from_code(code: &str) -> Self {
        Self::parse_code(code).unwrap_or(Self::Todo)
    }

    pub fn from_label(label: &str) -> Self {
        Self::parse_label(label).unwrap_or(Self::Todo)
    }

    pub fn parse_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code.trim())
    }

    pub fn parse_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label.trim())
    }

    /// Accepts either a UI label or a backend code, e.g. from a command line.
    pub fn parse_any(input: &str) -> Option<Self> {
        Self::parse_label(input).or_else(|| Self::parse_code(&input.trim().to_ascii_uppercase()))
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Todo
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = Option::<String>::deserialize(deserializer)?;
        Ok(code.as_deref().map(Self::from_code).unwrap_or(Self::Todo))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn code(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Case-insensitive; anything unrecognised is `Medium`.
    pub fn from_code(code: &str) -> Self {
        Self::parse(code).unwrap_or(Self::Medium)
    }

    pub fn from_label(label: &str) -> Self {
        Self::parse(label).unwrap_or(Self::Medium)
    }

    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL.into_iter().find(|p| p.code().eq_ignore_ascii_case(input))
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TaskPriority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for TaskPriority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = Option::<String>::deserialize(deserializer)?;
        Ok(code.as_deref().map(Self::from_code).unwrap_or(Self::Medium))
    }
}

pub fn to_backend(ui_label: &str) -> &'static str {
    TaskStatus::from_label(ui_label).code()
}

pub fn to_ui(code: &str) -> &'static str {
    TaskStatus::from_code(code).label()
}

pub fn priority_to_backend(ui_label: &str) -> &'static str {
    TaskPriority::from_label(ui_label).code()
}

pub fn priority_to_ui(code: &str) -> &'static str {
    TaskPriority::from_code(code).label()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const LABELS: [&str; 4] = ["To Do", "In Progress", "Under Review", "Done"];

    #[test]
    fn test_label_round_trip_is_stable() {
        for label in LABELS {
            let once = to_backend(label);
            assert_eq!(to_backend(to_ui(once)), once);
            assert_eq!(to_ui(once), label);
        }
    }

    #[test]
    fn test_codes_map_to_distinct_labels() {
        let labels: HashSet<_> = ["TODO", "IN_PROGRESS", "IN_REVIEW", "DONE"]
            .into_iter()
            .map(to_ui)
            .collect();
        assert_eq!(labels.len(), 4);
        assert_eq!(labels, LABELS.into_iter().collect());
    }

    #[test]
    fn test_unknown_status_falls_back_to_todo() {
        assert_eq!(to_backend("Blocked"), "TODO");
        assert_eq!(to_ui("BLOCKED"), "To Do");
        assert_eq!(to_ui(""), "To Do");
    }

    #[test]
    fn test_priority_mapping_is_case_insensitive() {
        assert_eq!(priority_to_ui("high"), "High");
        assert_eq!(priority_to_ui("LOW"), "Low");
        assert_eq!(priority_to_ui("Medium"), "Medium");
        assert_eq!(priority_to_ui("P1"), "Medium");
        assert_eq!(priority_to_backend("High"), "HIGH");
        assert_eq!(priority_to_backend("urgent"), "MEDIUM");
    }

    #[test]
    fn test_parse_any_accepts_labels_and_codes() {
        assert_eq!(TaskStatus::parse_any("Under Review"), Some(TaskStatus::InReview));
        assert_eq!(TaskStatus::parse_any("in_progress"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::parse_any("Someday"), None);
    }

    #[test]
    fn test_serde_uses_backend_codes() {
        let json = serde_json::to_string(&TaskStatus::InReview).unwrap();
        assert_eq!(json, "\"IN_REVIEW\"");

        let status: TaskStatus = serde_json::from_str("\"BLOCKED\"").unwrap();
        assert_eq!(status, TaskStatus::Todo);

        let priority: TaskPriority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(priority, TaskPriority::High);

        let missing: TaskPriority = serde_json::from_str("null").unwrap();
        assert_eq!(missing, TaskPriority::Medium);
    }

    #[test]
    fn test_index_matches_board_order() {
        for (i, status) in TaskStatus::ALL.into_iter().enumerate() {
            assert_eq!(status.index(), i);
        }
    }
}
