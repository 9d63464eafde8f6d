//! Courses and their weekly schedule

use serde::{Deserialize, Serialize};

use crate::color::ColorToken;
use crate::date_key::DateKey;

/// A course, as returned by the study API
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Course {
    id: String,
    code: String,
    /// Display color of this course, in any CSS notation
    color: String,
    #[serde(default)]
    weeks: Vec<Week>,
}

impl Course {
    pub fn new(id: String, code: String, color: String, weeks: Vec<Week>) -> Self {
        Self { id, code, color, weeks }
    }

    pub fn id(&self) -> &str     { &self.id    }
    pub fn code(&self) -> &str   { &self.code  }
    pub fn weeks(&self) -> &[Week] { &self.weeks }

    /// The raw color, as it was received
    pub fn raw_color(&self) -> &str {
        &self.color
    }

    /// The course color, or `None` in case it is not a valid CSS color
    pub fn color(&self) -> Option<ColorToken> {
        ColorToken::parse(&self.color)
    }
}


/// Whether a course week is taught as planned
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStatus {
    Missed,
    Holiday,
    #[serde(other)]
    Normal,
}

impl Default for WeekStatus {
    fn default() -> Self {
        WeekStatus::Normal
    }
}


/// One course's scheduled slot for a given calendar week
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Week {
    #[serde(rename = "week")]
    number: u32,
    /// The day every event of this week is anchored to
    date: DateKey,
    #[serde(default)]
    topic: String,
    #[serde(default)]
    details: String,
    #[serde(default)]
    has_lab: bool,
    #[serde(default)]
    lab_name: Option<String>,
    #[serde(default)]
    has_quiz: bool,
    #[serde(default)]
    quiz_name: Option<String>,
    #[serde(default)]
    status: WeekStatus,
}

impl Week {
    /// Create a regular lecture week, without lab nor quiz
    pub fn new(number: u32, date: DateKey, topic: String) -> Self {
        Self {
            number, date, topic,
            details: String::new(),
            has_lab: false,
            lab_name: None,
            has_quiz: false,
            quiz_name: None,
            status: WeekStatus::Normal,
        }
    }

    pub fn with_details(mut self, details: String) -> Self {
        self.details = details;
        self
    }

    pub fn with_lab(mut self, lab_name: Option<String>) -> Self {
        self.has_lab = true;
        self.lab_name = lab_name;
        self
    }

    pub fn with_quiz(mut self, quiz_name: Option<String>) -> Self {
        self.has_quiz = true;
        self.quiz_name = quiz_name;
        self
    }

    pub fn with_status(mut self, status: WeekStatus) -> Self {
        self.status = status;
        self
    }

    pub fn number(&self) -> u32         { self.number   }
    pub fn date(&self) -> DateKey       { self.date     }
    pub fn topic(&self) -> &str         { &self.topic   }
    pub fn details(&self) -> &str       { &self.details }
    pub fn has_lab(&self) -> bool       { self.has_lab  }
    pub fn has_quiz(&self) -> bool      { self.has_quiz }
    pub fn status(&self) -> WeekStatus  { self.status   }
    pub fn lab_name(&self) -> Option<&str>  { self.lab_name.as_deref()  }
    pub fn quiz_name(&self) -> Option<&str> { self.quiz_name.as_deref() }

    pub fn is_holiday(&self) -> bool {
        self.status == WeekStatus::Holiday
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_api_week() {
        let json = r#"{
            "week": 6, "date": "2026-02-23", "topic": "Word Embeddings", "details": "Word2Vec, GloVe",
            "has_lab": false, "has_quiz": true, "quiz_name": "Quiz 2", "status": "normal"
        }"#;
        let week: Week = serde_json::from_str(json).unwrap();
        assert_eq!(week.number(), 6);
        assert_eq!(week.date().to_string(), "2026-02-23");
        assert!(week.has_quiz());
        assert_eq!(week.quiz_name(), Some("Quiz 2"));
        assert_eq!(week.lab_name(), None);
        assert_eq!(week.status(), WeekStatus::Normal);
    }

    #[test]
    fn unknown_status_is_normal() {
        let json = r#"{ "week": 1, "date": "2026-02-02", "status": "cancelled-ish" }"#;
        let week: Week = serde_json::from_str(json).unwrap();
        assert_eq!(week.status(), WeekStatus::Normal);

        let json = r#"{ "week": 2, "date": "2026-02-09", "status": "holiday" }"#;
        let week: Week = serde_json::from_str(json).unwrap();
        assert!(week.is_holiday());
    }

    #[test]
    fn extra_course_fields_are_ignored() {
        let json = r##"{
            "id": "nlp", "name": "Natural Language Processing", "code": "COMP5423",
            "instructor": "someone", "color": "#6366f1", "weeks": []
        }"##;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.code(), "COMP5423");
        assert_eq!(course.color().unwrap().as_str(), "#6366f1");
    }
}
