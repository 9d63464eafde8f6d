//! User-authored study tasks

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};

use crate::color::ColorToken;
use crate::date_key::DateKey;

/// Category color used when a task refers to a category the API did not list
pub const UNKNOWN_CATEGORY_COLOR: &str = "#6b7280";

/// The identifier the task store gave to a task
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a random TaskId.
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_hyphenated().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}


/// A planned study item on a given day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudyTask {
    id: TaskId,
    date: DateKey,
    /// The API writes an empty string for tasks that are not attached to any course
    #[serde(default, deserialize_with = "empty_as_none")]
    course_id: Option<String>,
    title: String,
    /// Estimated duration
    hours: f64,
    category: String,
    #[serde(default)]
    done: bool,
}

impl StudyTask {
    pub fn new(id: TaskId, date: DateKey, course_id: Option<String>, title: String, hours: f64, category: String, done: bool) -> Self {
        Self { id, date, course_id, title, hours, category, done }
    }

    /// Turn a draft into a task, the way a task store would on creation
    pub fn from_draft(id: TaskId, draft: &TaskDraft) -> Self {
        Self::new(id, draft.date, draft.course_id.clone(), draft.title.clone(), draft.hours, draft.category.clone(), false)
    }

    pub fn id(&self) -> &TaskId      { &self.id       }
    pub fn date(&self) -> DateKey    { self.date      }
    pub fn title(&self) -> &str      { &self.title    }
    pub fn hours(&self) -> f64       { self.hours     }
    pub fn category(&self) -> &str   { &self.category }
    pub fn done(&self) -> bool       { self.done      }
    pub fn course_id(&self) -> Option<&str> { self.course_id.as_deref() }

    /// Flip the completion flag. Only task stores are expected to call this
    pub fn toggle(&mut self) {
        self.done = !self.done;
    }
}


/// What is sent to the task store to create a task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub date: DateKey,
    pub course_id: Option<String>,
    pub title: String,
    pub hours: f64,
    pub category: String,
}


/// A kind of study task (reading, review, lab work...)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaskCategory {
    #[serde(skip)]
    key: String,
    label: String,
    color: String,
}

impl TaskCategory {
    pub fn new(key: String, label: String, color: String) -> Self {
        Self { key, label, color }
    }

    pub fn key(&self) -> &str   { &self.key   }
    pub fn label(&self) -> &str { &self.label }

    /// The category color, or `None` in case it is not a valid CSS color
    pub fn color(&self) -> Option<ColorToken> {
        ColorToken::parse(&self.color)
    }
}

/// The lookup table of task categories, keyed by category key
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TaskCategories {
    categories: BTreeMap<String, TaskCategory>,
}

impl TaskCategories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: TaskCategory) {
        self.categories.insert(category.key.clone(), category);
    }

    pub fn get(&self, key: &str) -> Option<&TaskCategory> {
        self.categories.get(key)
    }

    /// The color of a category. Unknown or invalid categories get a neutral grey
    pub fn color_of(&self, key: &str) -> ColorToken {
        self.get(key)
            .and_then(|category| category.color())
            .unwrap_or_else(|| ColorToken::from_static(UNKNOWN_CATEGORY_COLOR))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskCategory> {
        self.categories.values()
    }
}

/// Used to support serde. The key of every category is only written as its map key
impl<'de> Deserialize<'de> for TaskCategories {
    fn deserialize<D>(deserializer: D) -> Result<TaskCategories, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawCategory {
            label: String,
            #[serde(default)]
            color: String,
        }

        let raw = BTreeMap::<String, RawCategory>::deserialize(deserializer)?;
        let categories = raw.into_iter()
            .map(|(key, c)| (key.clone(), TaskCategory::new(key, c.label, c.color)))
            .collect();
        Ok(TaskCategories { categories })
    }
}


/// The result of listing study tasks
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskListing {
    pub tasks: Vec<StudyTask>,
    #[serde(default)]
    pub categories: TaskCategories,
}


fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}
