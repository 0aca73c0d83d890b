//! The task status enumeration.
//!
//! Stored as upper-case text (`PENDING`, `IN_PROGRESS`, `COMPLETED`) in the
//! `tasks.status` column, which carries a matching CHECK constraint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    /// The stored / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        }
    }

    /// Parse an optional raw status from a request body.
    ///
    /// `None` yields `None`; an unknown value is a field error on `status`.
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<TaskStatus>, CoreError> {
        raw.map(str::parse).transpose()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(TaskStatus::Pending),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "COMPLETED" => Ok(TaskStatus::Completed),
            other => Err(CoreError::invalid_field(
                "status",
                format!("'{other}' is not one of PENDING, IN_PROGRESS, COMPLETED"),
            )),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
