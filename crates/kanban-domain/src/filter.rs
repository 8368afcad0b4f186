use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Project/sprint scope of the board. `"all"` is the unfiltered sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum BoardFilter {
    #[default]
    All,
    Scope(String),
}

impl BoardFilter {
    pub const ALL_SENTINEL: &'static str = "all";

    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(Self::ALL_SENTINEL) {
            Self::All
        } else {
            Self::Scope(value.to_string())
        }
    }

    pub fn scope_id(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Scope(id) => Some(id),
        }
    }

    /// Whether a task belonging to `project_id` is visible under this filter.
    pub fn admits(&self, project_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Scope(id) => id == project_id,
        }
    }
}

impl FromStr for BoardFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for BoardFilter {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<BoardFilter> for String {
    fn from(filter: BoardFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for BoardFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL_SENTINEL),
            Self::Scope(id) => f.write_str(id),
        }
    }
}
