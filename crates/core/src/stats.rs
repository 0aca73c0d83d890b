//! Task statistics aggregation.

use serde::{Deserialize, Serialize};

use crate::task_status::TaskStatus;

/// Per-status task counts, serialized with lower-case status keys.
///
/// Every bucket is always present, zero when no task has that status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
}

impl StatusCounts {
    /// Build from `(status, count)` pairs as returned by a GROUP BY query.
    pub fn from_groups(groups: impl IntoIterator<Item = (TaskStatus, i64)>) -> Self {
        let mut counts = Self::default();
        for (status, count) in groups {
            *counts.bucket_mut(status) += count;
        }
        counts
    }

    pub fn sum(&self) -> i64 {
        self.pending + self.in_progress + self.completed
    }

    fn bucket_mut(&mut self, status: TaskStatus) -> &mut i64 {
        match status {
            TaskStatus::Pending => &mut self.pending,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Completed => &mut self.completed,
        }
    }
}

/// Response body of `GET /tasks/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: i64,
    pub by_status: StatusCounts,
    /// All projects owned by the user, independent of any project filter.
    pub project_count: i64,
}
