//! Support for library configuration options

use std::sync::{Arc, Mutex, PoisonError};
use once_cell::sync::Lazy;

/// The study API that is used when `STUDY_API_URL` is not set
pub const DEFAULT_API_URL: &str = "http://localhost:5001/api";

/// The base URL of the study API. It is read from the `STUDY_API_URL` environment variable.
/// Feel free to override it when initing this library.
pub static API_URL: Lazy<Arc<Mutex<String>>> = Lazy::new(|| {
    let url = std::env::var("STUDY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    Arc::new(Mutex::new(url))
});

/// The category that is pre-selected in the add-task form, and that the local store gives to tasks created without one.
/// Feel free to override it when initing this library.
pub static DEFAULT_CATEGORY: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("review".to_string())));

/// How many events a grid cell displays before collapsing the rest into a "+N more" count
pub const EVENT_PREVIEW_COUNT: usize = 3;

/// The estimated duration of a task, when none (or nothing valid) has been typed
pub const DEFAULT_TASK_HOURS: f64 = 1.0;

pub fn api_url() -> String {
    API_URL.lock().unwrap_or_else(PoisonError::into_inner).clone()
}

pub fn default_category() -> String {
    DEFAULT_CATEGORY.lock().unwrap_or_else(PoisonError::into_inner).clone()
}
