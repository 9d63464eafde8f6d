//! Utilities to track reloads, and to notify listeners that data has changed

use std::error::Error;
use std::fmt::{Display, Formatter};

/// A part of the study data, fetched by its own call to the study API
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Courses,
    Deadlines,
    StudyTasks,
    Stats,
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Courses => write!(f, "courses"),
            Section::Deadlines => write!(f, "deadlines"),
            Section::StudyTasks => write!(f, "study tasks"),
            Section::Stats => write!(f, "stats"),
        }
    }
}

/// A section that could not be fetched during a reload. It has been left empty
#[derive(Clone, Debug, PartialEq)]
pub struct FetchFailure {
    pub section: Section,
    pub message: String,
}


/// An event that happens around a reload
#[derive(Clone, Debug, PartialEq)]
pub enum RefreshEvent {
    /// A mutation has been confirmed by the task store: anything derived from completion counts (e.g. stats) is outdated.
    /// A reload follows.
    StatsDirty { mutation: String },
    /// A reload has started
    Started { generation: u64 },
    /// A reload is finished. `applied` is false in case a newer reload had already been installed
    Finished { generation: u64, applied: bool, failures: usize },
}

impl Display for RefreshEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshEvent::StatsDirty { mutation } => write!(f, "Stats outdated after {}", mutation),
            RefreshEvent::Started { generation } => write!(f, "Reload #{} has started...", generation),
            RefreshEvent::Finished { generation, applied, failures } => match (applied, failures) {
                (false, _) => write!(f, "Reload #{} discarded (a newer one was installed)", generation),
                (true, 0) => write!(f, "Reload #{} successfully finished", generation),
                (true, n) => write!(f, "Reload #{} finished, {} section(s) could not be fetched", generation, n),
            }
        }
    }
}

/// How many events a listener can lag behind before it starts missing some
pub const FEEDBACK_CAPACITY: usize = 64;

/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::broadcast::Sender<RefreshEvent>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::broadcast::Receiver<RefreshEvent>;

/// Create a feeback channel, that can be used to follow mutations and reloads.
///
/// Every listener receives every event, in the order they were sent: a confirmed mutation is reported as
/// `StatsDirty`, then `Started` and `Finished` for the reload that follows it.
/// More listeners can be added with [`FeedbackSender::subscribe`].
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::broadcast::channel(FEEDBACK_CAPACITY)
}


/// Tracks the progression and the failures of a single reload
pub struct RefreshProgress<'a> {
    generation: u64,
    failures: Vec<FetchFailure>,
    feedback_channel: Option<&'a FeedbackSender>,
}

impl<'a> RefreshProgress<'a> {
    pub fn new(generation: u64, feedback_channel: Option<&'a FeedbackSender>) -> Self {
        Self { generation, failures: Vec::new(), feedback_channel }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Keep the fetched value, or record the failure and use an empty value instead
    pub fn or_empty<T: Default>(&mut self, section: Section, fetched: Result<T, Box<dyn Error>>) -> T {
        match fetched {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Reload #{}: unable to fetch {}: {}. Using an empty section", self.generation, section, err);
                self.failures.push(FetchFailure { section, message: err.to_string() });
                T::default()
            }
        }
    }

    pub fn into_failures(self) -> Vec<FetchFailure> {
        self.failures
    }

    /// Send an event as a feedback to the listener (if any).
    pub fn feedback(&self, event: RefreshEvent) {
        send_feedback(self.feedback_channel, event);
    }
}

pub(crate) fn send_feedback(channel: Option<&FeedbackSender>, event: RefreshEvent) {
    if let Some(sender) = channel {
        // Nobody listening is not an error
        let _ = sender.send(event);
    }
}
