//! The external collaborators this crate relies on

use std::error::Error;

use async_trait::async_trait;

use crate::course::Course;
use crate::deadline::Deadline;
use crate::stats::Stats;
use crate::task::{StudyTask, TaskDraft, TaskId, TaskListing};

/// A read-only source of study data (usually the study API)
#[async_trait]
pub trait StudySource {
    /// Returns every course, including its weeks
    async fn list_courses(&self) -> Result<Vec<Course>, Box<dyn Error>>;
    /// Returns every deadline
    async fn list_deadlines(&self) -> Result<Vec<Deadline>, Box<dyn Error>>;
    /// Returns every study task, in creation order, along with the task categories
    async fn list_study_tasks(&self) -> Result<TaskListing, Box<dyn Error>>;
    /// Returns the latest progress statistics.
    /// This is called as a notification whenever a mutation may have changed completion counts
    async fn refresh_stats(&self) -> Result<Stats, Box<dyn Error>>;
}

/// A store that owns study tasks, and is the only place they can be changed
#[async_trait]
pub trait TaskStore {
    /// Create a task, and return it as it has been stored
    async fn create_study_task(&self, draft: &TaskDraft) -> Result<StudyTask, Box<dyn Error>>;
    /// Flip the completion flag of a task, and return the updated task
    async fn toggle_study_task(&self, id: &TaskId) -> Result<StudyTask, Box<dyn Error>>;
    /// Remove a task
    async fn delete_study_task(&self, id: &TaskId) -> Result<(), Box<dyn Error>>;
}
