//! In-memory search and filtering over fetched tasks.

use nexustrack_core::task_status::TaskStatus;
use nexustrack_core::types::DbId;

use crate::models::Task;

/// Narrows a task list the way the dashboard search box and filter
/// dropdowns do. Every criterion is optional; an empty filter keeps all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Case-insensitive substring over title, description and project name.
    pub search: String,
    pub status: Option<TaskStatus>,
    pub project_id: Option<DbId>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn project(mut self, project_id: DbId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.status.is_none() && self.project_id.is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if self.status.is_some_and(|s| s != task.status) {
            return false;
        }
        if self.project_id.is_some() && self.project_id != task.project_id {
            return false;
        }

        let query = self.search.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        let haystacks = [
            Some(task.title.as_str()),
            task.description.as_deref(),
            task.project.as_ref().map(|p| p.name.as_str()),
        ];
        haystacks
            .into_iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(&query))
    }

    /// Tasks that pass the filter, in their original order.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}
