//! This module provides a client to connect to the study API

use std::error::Error;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use crate::course::Course;
use crate::deadline::Deadline;
use crate::stats::Stats;
use crate::task::{StudyTask, TaskDraft, TaskId, TaskListing};
use crate::traits::{StudySource, TaskStore};


/// A study data source that fetches its data from the study API
pub struct Client {
    base: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(url: S) -> Result<Self, Box<dyn Error>> {
        let base = Url::parse(url.as_ref())?;
        if base.cannot_be_a_base() {
            return Err(format!("{} cannot be used as an API base URL", base).into());
        }

        Ok(Self{
            base,
            http: reqwest::Client::new(),
        })
    }

    /// Create a client for the [configured API URL](crate::config::api_url)
    pub fn from_config() -> Result<Self, Box<dyn Error>> {
        Self::new(crate::config::api_url())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build the URL of an endpoint, relative to the API base (e.g. `["study-tasks", id, "toggle"]`)
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, Box<dyn Error>> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| format!("{} cannot be used as an API base URL", self.base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, method: Method, segments: &[&str], body: Option<serde_json::Value>) -> Result<reqwest::Response, Box<dyn Error>> {
        let url = self.endpoint(segments)?;
        log::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request
            .send()
            .await?
            .error_for_status()?;
        Ok(response)
    }

    async fn request<T: DeserializeOwned>(&self, method: Method, segments: &[&str], body: Option<serde_json::Value>) -> Result<T, Box<dyn Error>> {
        let response = self.send(method, segments, body).await?;
        let parsed = response.json::<T>().await?;
        Ok(parsed)
    }
}

#[async_trait]
impl StudySource for Client {
    async fn list_courses(&self) -> Result<Vec<Course>, Box<dyn Error>> {
        self.request(Method::GET, &["courses"], None).await
    }

    async fn list_deadlines(&self) -> Result<Vec<Deadline>, Box<dyn Error>> {
        self.request(Method::GET, &["deadlines"], None).await
    }

    async fn list_study_tasks(&self) -> Result<TaskListing, Box<dyn Error>> {
        self.request(Method::GET, &["study-tasks"], None).await
    }

    async fn refresh_stats(&self) -> Result<Stats, Box<dyn Error>> {
        self.request(Method::GET, &["stats"], None).await
    }
}

#[async_trait]
impl TaskStore for Client {
    async fn create_study_task(&self, draft: &TaskDraft) -> Result<StudyTask, Box<dyn Error>> {
        // The API expects an empty string for tasks that are not attached to a course
        let body = json!({
            "date": draft.date,
            "course_id": draft.course_id.as_deref().unwrap_or(""),
            "title": draft.title,
            "hours": draft.hours,
            "category": draft.category,
        });
        self.request(Method::POST, &["study-tasks"], Some(body)).await
    }

    async fn toggle_study_task(&self, id: &TaskId) -> Result<StudyTask, Box<dyn Error>> {
        self.request(Method::PATCH, &["study-tasks", id.as_str(), "toggle"], None).await
    }

    async fn delete_study_task(&self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        self.send(Method::DELETE, &["study-tasks", id.as_str()], None).await?;
        Ok(())
    }
}
