//! This module keeps a snapshot of the study data, and routes task mutations to the task store.
//!
//! There is no optimistic update: after every confirmed mutation, the whole snapshot is fetched again.
//! Nothing held locally can thus diverge from the store.

use std::error::Error;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::calendar::events::{project_events, EventIndex};
use crate::calendar::tasks::{index_tasks, TaskIndex};
use crate::course::Course;
use crate::deadline::Deadline;
use crate::stats::Stats;
use crate::task::{StudyTask, TaskCategories, TaskDraft, TaskId};
use crate::traits::{StudySource, TaskStore};

pub mod refresh;
use refresh::{send_feedback, FeedbackSender, FetchFailure, RefreshEvent, RefreshProgress, Section};


/// Everything fetched by a single reload
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    generation: u64,
    courses: Vec<Course>,
    deadlines: Vec<Deadline>,
    tasks: Vec<StudyTask>,
    categories: TaskCategories,
    stats: Option<Stats>,
    failures: Vec<FetchFailure>,
}

impl Snapshot {
    /// The number of the reload that produced this snapshot. `0` means nothing has been loaded yet
    pub fn generation(&self) -> u64                 { self.generation  }
    pub fn courses(&self) -> &[Course]              { &self.courses    }
    pub fn deadlines(&self) -> &[Deadline]          { &self.deadlines  }
    pub fn tasks(&self) -> &[StudyTask]             { &self.tasks      }
    pub fn categories(&self) -> &TaskCategories     { &self.categories }
    pub fn stats(&self) -> Option<&Stats>           { self.stats.as_ref() }
    /// Sections that could not be fetched, and have been left empty
    pub fn failures(&self) -> &[FetchFailure]       { &self.failures   }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn task(&self, id: &TaskId) -> Option<&StudyTask> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// Calendar events, projected from the courses and deadlines of this snapshot
    pub fn events(&self) -> EventIndex {
        project_events(&self.courses, &self.deadlines)
    }

    /// Study tasks of this snapshot, indexed by day
    pub fn task_index(&self) -> TaskIndex {
        index_tasks(&self.tasks)
    }

    /// Compares two snapshots, regardless of the reload they come from
    pub fn has_same_content_as(&self, other: &Snapshot) -> bool {
           self.courses == other.courses
        && self.deadlines == other.deadlines
        && self.tasks == other.tasks
        && self.categories == other.categories
        && self.stats == other.stats
        && self.failures == other.failures
    }
}


/// Sends task mutations to a store, and reloads the whole study data after each of them.
///
/// Operations take `&self`, so that several of them can be in flight at the same time.
/// Every reload is numbered when it starts. A reload that completes after a more recent one has been installed is discarded,
/// so that the installed snapshot never goes back in time.
pub struct Coordinator<S> {
    source: S,
    snapshot: Mutex<Arc<Snapshot>>,
    issued_reloads: AtomicU64,
    feedback_channel: Option<FeedbackSender>,
}

impl<S> Coordinator<S>
where
    S: StudySource + TaskStore,
{
    /// Create a coordinator. Nothing is fetched until [`Self::reload`] is called
    pub fn new(source: S) -> Self {
        Self {
            source,
            snapshot: Mutex::new(Arc::new(Snapshot::default())),
            issued_reloads: AtomicU64::new(0),
            feedback_channel: None,
        }
    }

    /// Create a coordinator that reports reloads and mutations on a [`feedback channel`](refresh::feedback_channel)
    pub fn new_with_feedback_channel(source: S, channel: FeedbackSender) -> Self {
        let mut coordinator = Self::new(source);
        coordinator.feedback_channel = Some(channel);
        coordinator
    }

    /// Returns the store this coordinator talks to
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The latest installed snapshot
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fetch courses, deadlines, study tasks and stats, in that order, and install the result.
    ///
    /// Sections that cannot be fetched are left empty (see [`Snapshot::failures`]); this never fails.
    /// Returns the installed snapshot, which may come from a more recent reload than this one.
    pub async fn reload(&self) -> Arc<Snapshot> {
        let generation = self.issued_reloads.fetch_add(1, Ordering::SeqCst) + 1;
        let mut progress = RefreshProgress::new(generation, self.feedback_channel.as_ref());
        log::info!("Starting reload #{}", generation);
        progress.feedback(RefreshEvent::Started { generation });

        let courses = progress.or_empty(Section::Courses, self.source.list_courses().await);
        let deadlines = progress.or_empty(Section::Deadlines, self.source.list_deadlines().await);
        let listing = progress.or_empty(Section::StudyTasks, self.source.list_study_tasks().await);
        let stats = progress.or_empty(Section::Stats, self.source.refresh_stats().await.map(Some));

        let failures = progress.into_failures();
        let n_failures = failures.len();
        let candidate = Snapshot {
            generation,
            courses,
            deadlines,
            tasks: listing.tasks,
            categories: listing.categories,
            stats,
            failures,
        };

        let (installed, applied) = self.install(candidate);
        match applied {
            true => log::info!("Reload #{} installed ({} section(s) failed)", generation, n_failures),
            false => log::info!("Reload #{} discarded: reload #{} is more recent", generation, installed.generation()),
        }
        send_feedback(self.feedback_channel.as_ref(), RefreshEvent::Finished { generation, applied, failures: n_failures });
        installed
    }

    /// Install `candidate` unless a more recent snapshot is already there
    fn install(&self, candidate: Snapshot) -> (Arc<Snapshot>, bool) {
        let mut current = self.snapshot.lock().unwrap_or_else(PoisonError::into_inner);
        if candidate.generation > current.generation {
            *current = Arc::new(candidate);
            (current.clone(), true)
        } else {
            (current.clone(), false)
        }
    }

    /// Create a task, then reload everything.
    ///
    /// In case the store fails, the error is returned and nothing is reloaded.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<StudyTask, Box<dyn Error>> {
        log::debug!("Creating task {:?} on {}", draft.title, draft.date);
        let task = self.source.create_study_task(draft).await?;
        self.after_mutation(format!("creating task {}", task.id())).await;
        Ok(task)
    }

    /// Flip the completion flag of a task, then reload everything.
    ///
    /// In case the store fails, the error is returned and nothing is reloaded.
    pub async fn toggle_task(&self, id: &TaskId) -> Result<StudyTask, Box<dyn Error>> {
        log::debug!("Toggling task {}", id);
        let task = self.source.toggle_study_task(id).await?;
        self.after_mutation(format!("toggling task {}", id)).await;
        Ok(task)
    }

    /// Delete a task, then reload everything.
    ///
    /// In case the store fails, the error is returned and nothing is reloaded.
    pub async fn delete_task(&self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        log::debug!("Deleting task {}", id);
        self.source.delete_study_task(id).await?;
        self.after_mutation(format!("deleting task {}", id)).await;
        Ok(())
    }

    async fn after_mutation(&self, mutation: String) {
        send_feedback(self.feedback_channel.as_ref(), RefreshEvent::StatsDirty { mutation });
        self.reload().await;
    }
}
