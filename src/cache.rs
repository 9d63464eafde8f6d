//! This module provides a local, file-backed study data store
//!
//! It answers the same calls as the study API, so that the calendar can work offline,
//! and so that tests can use it in place of a server.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::course::Course;
use crate::deadline::Deadline;
use crate::coordinator::refresh::Section;
use crate::mock_behaviour::{Call, MockBehaviour, Mutation};
use crate::stats::Stats;
use crate::task::{StudyTask, TaskCategories, TaskCategory, TaskDraft, TaskId, TaskListing};
use crate::traits::{StudySource, TaskStore};


/// A study data store that keeps its content in a local JSON file
#[derive(Debug)]
pub struct Cache {
    backing_file: Option<PathBuf>,
    data: Mutex<CachedData>,

    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
struct CachedData {
    #[serde(default)]
    courses: Vec<Course>,
    #[serde(default)]
    deadlines: Vec<Deadline>,
    #[serde(default)]
    study_tasks: Vec<StudyTask>,
    #[serde(default)]
    categories: TaskCategories,
}

impl Cache {
    /// Initialize a cache from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let data = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self{
            backing_file: Some(PathBuf::from(path)),
            data: Mutex::new(data),
            mock_behaviour: None,
        })
    }

    /// Initialize an empty cache, that will be saved to `path` after every change
    pub fn new(path: &Path) -> Self {
        Self{
            backing_file: Some(PathBuf::from(path)),
            data: Mutex::new(CachedData::default()),
            mock_behaviour: None,
        }
    }

    /// Initialize an empty cache, that is never saved
    pub fn in_memory() -> Self {
        Self{
            backing_file: None,
            data: Mutex::new(CachedData::default()),
            mock_behaviour: None,
        }
    }

    /// Make some calls fail, according to `behaviour`
    pub fn set_mock_behaviour(&mut self, behaviour: Option<Arc<Mutex<MockBehaviour>>>) {
        self.mock_behaviour = behaviour;
    }

    /// Store the current content to the backing file (if any)
    pub fn save_to_file(&self) -> Result<(), Box<dyn Error>> {
        let path = match &self.backing_file {
            None => return Ok(()),
            Some(path) => path,
        };
        let file = std::fs::File::create(path)
            .map_err(|err| format!("Unable to save file {:?}: {}", path, err))?;
        serde_json::to_writer(file, &*self.lock_data())?;
        Ok(())
    }

    pub fn add_course(&self, course: Course) {
        self.lock_data().courses.push(course);
    }

    pub fn add_deadline(&self, deadline: Deadline) {
        self.lock_data().deadlines.push(deadline);
    }

    /// Add an existing task, e.g. to seed the store. It is appended after every other task
    pub fn add_task(&self, task: StudyTask) {
        self.lock_data().study_tasks.push(task);
    }

    pub fn add_category(&self, category: TaskCategory) {
        self.lock_data().categories.insert(category);
    }

    /// The stored tasks, in creation order
    pub fn tasks(&self) -> Vec<StudyTask> {
        self.lock_data().study_tasks.clone()
    }

    /// Compares two caches to check they have the same current content
    pub fn has_same_contents_than(&self, other: &Self) -> bool {
        let mine = self.lock_data().clone();
        let theirs = other.lock_data().clone();
        mine == theirs
    }

    fn lock_data(&self) -> std::sync::MutexGuard<'_, CachedData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_behaviour(&self, call: Call) -> Result<(), Box<dyn Error>> {
        match &self.mock_behaviour {
            None => Ok(()),
            Some(behaviour) => behaviour.lock().unwrap_or_else(PoisonError::into_inner).check(call),
        }
    }

    fn save_after_change(&self) {
        if let Err(err) = self.save_to_file() {
            log::warn!("Unable to save the cache: {}", err);
        }
    }
}

#[async_trait]
impl StudySource for Cache {
    async fn list_courses(&self) -> Result<Vec<Course>, Box<dyn Error>> {
        self.check_behaviour(Call::Fetch(Section::Courses))?;
        Ok(self.lock_data().courses.clone())
    }

    async fn list_deadlines(&self) -> Result<Vec<Deadline>, Box<dyn Error>> {
        self.check_behaviour(Call::Fetch(Section::Deadlines))?;
        Ok(self.lock_data().deadlines.clone())
    }

    async fn list_study_tasks(&self) -> Result<TaskListing, Box<dyn Error>> {
        self.check_behaviour(Call::Fetch(Section::StudyTasks))?;
        let data = self.lock_data();
        Ok(TaskListing {
            tasks: data.study_tasks.clone(),
            categories: data.categories.clone(),
        })
    }

    async fn refresh_stats(&self) -> Result<Stats, Box<dyn Error>> {
        self.check_behaviour(Call::Fetch(Section::Stats))?;
        let data = self.lock_data();
        let completed = data.study_tasks.iter().filter(|t| t.done()).count();
        let planned_hours: f64 = data.study_tasks.iter().map(|t| t.hours()).sum();
        Ok(Stats::new(json!({
            "total_study_tasks": data.study_tasks.len(),
            "completed_study_tasks": completed,
            "planned_hours": planned_hours,
        })))
    }
}

#[async_trait]
impl TaskStore for Cache {
    async fn create_study_task(&self, draft: &TaskDraft) -> Result<StudyTask, Box<dyn Error>> {
        self.check_behaviour(Call::Mutate(Mutation::Create))?;
        let mut draft = draft.clone();
        if draft.category.trim().is_empty() {
            draft.category = crate::config::default_category();
        }
        let task = StudyTask::from_draft(TaskId::random(), &draft);
        self.lock_data().study_tasks.push(task.clone());
        self.save_after_change();
        Ok(task)
    }

    async fn toggle_study_task(&self, id: &TaskId) -> Result<StudyTask, Box<dyn Error>> {
        self.check_behaviour(Call::Mutate(Mutation::Toggle))?;
        let toggled = {
            let mut data = self.lock_data();
            match data.study_tasks.iter_mut().find(|t| t.id() == id) {
                None => return Err(format!("No task with id {}", id).into()),
                Some(task) => {
                    task.toggle();
                    task.clone()
                }
            }
        };
        self.save_after_change();
        Ok(toggled)
    }

    async fn delete_study_task(&self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        self.check_behaviour(Call::Mutate(Mutation::Delete))?;
        let removed = {
            let mut data = self.lock_data();
            let before = data.study_tasks.len();
            data.study_tasks.retain(|t| t.id() != id);
            before - data.study_tasks.len()
        };
        if removed == 0 {
            log::debug!("Deleting task {}, which does not exist", id);
        }
        self.save_after_change();
        Ok(())
    }
}
