//! Assessment deadlines

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use crate::date_key::DateKey;
use crate::event::EventKind;

/// A deadline, as returned by the study API
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deadline {
    id: String,
    course_id: String,
    title: String,
    date: DateKey,
    /// Free-form deadline type (`deadline`, `exam`, `project`, `talk`, or anything else)
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    done: bool,
}

impl Deadline {
    pub fn new(id: String, course_id: String, title: String, date: DateKey, kind: String, done: bool) -> Self {
        Self { id, course_id, title, date, kind, done }
    }

    pub fn id(&self) -> &str         { &self.id        }
    pub fn course_id(&self) -> &str  { &self.course_id }
    pub fn title(&self) -> &str      { &self.title     }
    pub fn date(&self) -> DateKey    { self.date       }
    pub fn kind(&self) -> &str       { &self.kind      }
    pub fn done(&self) -> bool       { self.done       }

    /// The kind of calendar event this deadline is displayed as
    pub fn event_kind(&self) -> EventKind {
        match self.kind.as_str() {
            "exam" => EventKind::Exam,
            "project" => EventKind::Project,
            "talk" => EventKind::Talk,
            _ => EventKind::Deadline,
        }
    }

    /// How soon this deadline is, relative to `today`
    pub fn urgency(&self, today: NaiveDate) -> Urgency {
        let date = self.date.date();
        if date < today && !self.done {
            return Urgency::Overdue;
        }
        if date <= today {
            return Urgency::Today;
        }
        match (date - today).num_days() {
            d if d <= 7 => Urgency::ThisWeek,
            d if d <= 14 => Urgency::NextWeek,
            _ => Urgency::Future,
        }
    }
}


/// How close a deadline is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Overdue,
    Today,
    ThisWeek,
    NextWeek,
    Future,
}

/// Returns the first `limit` deadlines that are not done yet, soonest first.
///
/// Deadlines due on the same day keep their source order.
pub fn upcoming_deadlines(deadlines: &[Deadline], limit: usize) -> Vec<&Deadline> {
    let mut pending: Vec<&Deadline> = deadlines.iter()
        .filter(|d| !d.done())
        .collect();
    pending.sort_by_key(|d| d.date());
    pending.truncate(limit);
    pending
}


#[cfg(test)]
mod tests {
    use super::*;

    fn deadline(id: &str, date: &str, kind: &str, done: bool) -> Deadline {
        Deadline::new(id.to_string(), "nlp".to_string(), format!("Deadline {}", id), date.parse().unwrap(), kind.to_string(), done)
    }

    #[test]
    fn kind_mapping() {
        assert_eq!(deadline("a", "2026-03-01", "exam", false).event_kind(), EventKind::Exam);
        assert_eq!(deadline("a", "2026-03-01", "project", false).event_kind(), EventKind::Project);
        assert_eq!(deadline("a", "2026-03-01", "talk", false).event_kind(), EventKind::Talk);
        assert_eq!(deadline("a", "2026-03-01", "deadline", false).event_kind(), EventKind::Deadline);
        assert_eq!(deadline("a", "2026-03-01", "assignment", false).event_kind(), EventKind::Deadline);
        assert_eq!(deadline("a", "2026-03-01", "", false).event_kind(), EventKind::Deadline);
    }

    #[test]
    fn urgency_levels() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        assert_eq!(deadline("a", "2026-03-09", "deadline", false).urgency(today), Urgency::Overdue);
        assert_eq!(deadline("a", "2026-03-09", "deadline", true).urgency(today), Urgency::Today);
        assert_eq!(deadline("a", "2026-03-10", "deadline", false).urgency(today), Urgency::Today);
        assert_eq!(deadline("a", "2026-03-17", "deadline", false).urgency(today), Urgency::ThisWeek);
        assert_eq!(deadline("a", "2026-03-18", "deadline", false).urgency(today), Urgency::NextWeek);
        assert_eq!(deadline("a", "2026-03-24", "deadline", false).urgency(today), Urgency::NextWeek);
        assert_eq!(deadline("a", "2026-03-25", "deadline", false).urgency(today), Urgency::Future);
    }

    #[test]
    fn upcoming_skips_done_and_keeps_ties_in_order() {
        let deadlines = vec![
            deadline("late", "2026-04-01", "exam", false),
            deadline("done", "2026-03-01", "deadline", true),
            deadline("first", "2026-03-05", "deadline", false),
            deadline("second", "2026-03-05", "talk", false),
        ];
        let ids: Vec<&str> = upcoming_deadlines(&deadlines, 5).iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec!["first", "second", "late"]);

        assert_eq!(upcoming_deadlines(&deadlines, 1).len(), 1);
    }

    #[test]
    fn deserialize_api_deadline() {
        let json = r#"{ "id": "d1", "course_id": "cvpr", "title": "Lab 4", "date": "2026-02-27",
                        "weight": "5%", "type": "deadline", "done": false, "urgency": "overdue" }"#;
        let d: Deadline = serde_json::from_str(json).unwrap();
        assert_eq!(d.kind(), "deadline");
        assert_eq!(d.date().to_string(), "2026-02-27");
    }
}
