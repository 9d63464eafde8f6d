//! Calendar events
//!
//! Events are never fetched nor stored: they are projected from courses and deadlines,
//! see [`calendar::events`](crate::calendar::events).

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::color::ColorToken;

/// What a calendar event stands for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Lecture,
    Lab,
    Quiz,
    Deadline,
    Talk,
    Project,
    Exam,
    Holiday,
}

/// Kinds shown in the calendar legend, in display order.
/// Talks share the lab color and are not listed.
pub const LEGEND: [EventKind; 7] = [
    EventKind::Lecture,
    EventKind::Lab,
    EventKind::Quiz,
    EventKind::Deadline,
    EventKind::Project,
    EventKind::Exam,
    EventKind::Holiday,
];

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Lecture => "lecture",
            EventKind::Lab => "lab",
            EventKind::Quiz => "quiz",
            EventKind::Deadline => "deadline",
            EventKind::Talk => "talk",
            EventKind::Project => "project",
            EventKind::Exam => "exam",
            EventKind::Holiday => "holiday",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Lecture => "Lecture",
            EventKind::Lab => "Lab",
            EventKind::Quiz => "Quiz",
            EventKind::Deadline => "Deadline",
            EventKind::Talk => "Talk",
            EventKind::Project => "Project",
            EventKind::Exam => "Exam",
            EventKind::Holiday => "Holiday",
        }
    }

    /// The color used for this kind when no course color applies
    pub fn default_color(&self) -> ColorToken {
        ColorToken::from_static(self.accent_hex())
    }

    /// Opacity of the background tint of an event pill
    pub fn tint_alpha(&self) -> f64 {
        match self {
            EventKind::Quiz => 0.18,
            EventKind::Talk => 0.12,
            EventKind::Exam => 0.2,
            EventKind::Holiday => 0.08,
            _ => 0.15,
        }
    }

    /// Background tint of an event pill, as a CSS color
    pub fn tint(&self) -> String {
        self.default_color().with_alpha(self.tint_alpha())
    }

    fn accent_hex(&self) -> &'static str {
        match self {
            EventKind::Lecture => "#6366f1",
            EventKind::Lab | EventKind::Talk => "#10b981",
            EventKind::Quiz | EventKind::Exam => "#f43f5e",
            EventKind::Deadline | EventKind::Holiday => "#f59e0b",
            EventKind::Project => "#a855f7",
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

/// The legend entries, with their colors
pub fn legend() -> Vec<(EventKind, ColorToken)> {
    LEGEND.iter()
        .map(|kind| (*kind, kind.default_color()))
        .collect()
}


/// A single scheduled occurrence on a given day (lecture, lab, deadline...)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    id: String,
    title: String,
    kind: EventKind,
    course_id: String,
    color: ColorToken,
}

impl CalendarEvent {
    pub fn new(id: String, title: String, kind: EventKind, course_id: String, color: ColorToken) -> Self {
        Self { id, title, kind, course_id, color }
    }

    /// An identifier derived from the event source, that is stable across projections
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn color(&self) -> &ColorToken {
        &self.color
    }
}
