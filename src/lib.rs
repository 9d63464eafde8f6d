//! This crate turns a semester's study data into a month calendar.
//!
//! Study data (courses with their weekly schedule, deadlines, study tasks and progress stats) comes from a [`StudySource`](traits::StudySource).
//! The crate provides a client for the study API in the [`client`] module, and a local file-backed store in the [`cache`] module,
//! that can be used offline or in place of the API in tests.
//!
//! Courses and deadlines are projected into per-day [events](calendar::events), and study tasks are [indexed by day](calendar::tasks).
//! A [`CalendarView`](calendar::CalendarView) lays them out on a Monday-first [month grid](calendar::grid), and lets the user add tasks. \
//! Every task change goes through a [`Coordinator`](coordinator::Coordinator), which reloads the whole study data once the change is confirmed.

pub mod traits;

mod date_key;
pub use date_key::DateKey;
mod color;
pub use color::ColorToken;
pub mod course;
pub use course::{Course, Week, WeekStatus};
pub mod deadline;
pub use deadline::{Deadline, Urgency};
pub mod task;
pub use task::{StudyTask, TaskDraft, TaskId};
pub mod stats;
pub use stats::Stats;
pub mod event;
pub use event::{CalendarEvent, EventKind};

pub mod calendar;
pub mod coordinator;
pub use coordinator::Coordinator;

pub mod client;
pub mod cache;
pub mod mock_behaviour;

pub mod config;
pub mod utils;
