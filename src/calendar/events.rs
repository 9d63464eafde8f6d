//! Projection of courses and deadlines into calendar events

use std::collections::{BTreeMap, HashMap};

use crate::color::ColorToken;
use crate::course::{Course, Week};
use crate::date_key::DateKey;
use crate::deadline::Deadline;
use crate::event::{CalendarEvent, EventKind};

/// Color of deadlines whose course is not known
pub const UNKNOWN_COURSE_DEADLINE_COLOR: &str = "#f59e0b";

/// Calendar events, grouped by day
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventIndex {
    events: BTreeMap<DateKey, Vec<CalendarEvent>>,
}

impl EventIndex {
    /// The events of a day, in projection order. Days without events return an empty slice
    pub fn on(&self, date: &DateKey) -> &[CalendarEvent] {
        self.events
            .get(date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every day that has at least one event, in chronological order
    pub fn days(&self) -> impl Iterator<Item = &DateKey> {
        self.events.keys()
    }

    /// Total number of events
    pub fn len(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn push(&mut self, date: DateKey, event: CalendarEvent) {
        self.events.entry(date).or_default().push(event);
    }
}


/// Build the calendar events of every course week and every deadline.
///
/// Within a day, events are ordered by course, then by week (lecture, lab, quiz), then come deadlines in their source order.
pub fn project_events(courses: &[Course], deadlines: &[Deadline]) -> EventIndex {
    let course_colors: HashMap<&str, Option<ColorToken>> = courses.iter()
        .map(|c| (c.id(), c.color()))
        .collect();

    let mut index = EventIndex::default();

    for course in courses {
        let color = course_colors.get(course.id()).cloned().flatten();
        for week in course.weeks() {
            for event in week_events(course, week, color.as_ref()) {
                index.push(week.date(), event);
            }
        }
    }

    for deadline in deadlines {
        let kind = deadline.event_kind();
        let color = match course_colors.get(deadline.course_id()) {
            None => ColorToken::from_static(UNKNOWN_COURSE_DEADLINE_COLOR),
            Some(course_color) => course_color.clone().unwrap_or_else(|| kind.default_color()),
        };
        index.push(deadline.date(), CalendarEvent::new(
            format!("dl-{}", deadline.id()),
            deadline.title().to_string(),
            kind,
            deadline.course_id().to_string(),
            color,
        ));
    }

    log::debug!("Projected {} events over {} days", index.len(), index.events.len());
    index
}

/// The events generated by a single week: either one holiday, or a lecture followed by an optional lab and an optional quiz
fn week_events(course: &Course, week: &Week, course_color: Option<&ColorToken>) -> Vec<CalendarEvent> {
    let make = |slot: EventKind, title: String| {
        CalendarEvent::new(
            format!("{}-w{}-{}", course.id(), week.number(), slot.as_str()),
            format!("{}: {}", course.code(), title),
            slot,
            course.id().to_string(),
            course_color.cloned().unwrap_or_else(|| slot.default_color()),
        )
    };

    if week.is_holiday() {
        return vec![make(EventKind::Holiday, "Holiday".to_string())];
    }

    let mut events = vec![make(EventKind::Lecture, week.topic().to_string())];
    if week.has_lab() {
        events.push(make(EventKind::Lab, name_or(week.lab_name(), "Lab")));
    }
    if week.has_quiz() {
        events.push(make(EventKind::Quiz, name_or(week.quiz_name(), "Quiz")));
    }
    events
}

fn name_or(name: Option<&str>, fallback: &str) -> String {
    match name {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => fallback.to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::WeekStatus;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn kinds(events: &[CalendarEvent]) -> Vec<EventKind> {
        events.iter().map(|e| e.kind()).collect()
    }

    fn nlp(weeks: Vec<Week>) -> Course {
        Course::new("nlp".to_string(), "COMP5423".to_string(), "#6366f1".to_string(), weeks)
    }

    #[test]
    fn holiday_week_only_yields_a_holiday() {
        let week = Week::new(8, key("2026-04-06"), "Easter".to_string())
            .with_lab(Some("Lab 5".to_string()))
            .with_quiz(None)
            .with_status(WeekStatus::Holiday);
        let index = project_events(&[nlp(vec![week])], &[]);

        let events = index.on(&key("2026-04-06"));
        assert_eq!(kinds(events), vec![EventKind::Holiday]);
        assert_eq!(events[0].title(), "COMP5423: Holiday");
        assert_eq!(events[0].id(), "nlp-w8-holiday");
    }

    #[test]
    fn lab_and_quiz_week_yields_three_ordered_events() {
        let week = Week::new(6, key("2026-02-23"), "Word Embeddings".to_string())
            .with_lab(None)
            .with_quiz(Some("Quiz 2".to_string()));
        let index = project_events(&[nlp(vec![week])], &[]);

        let events = index.on(&key("2026-02-23"));
        assert_eq!(kinds(events), vec![EventKind::Lecture, EventKind::Lab, EventKind::Quiz]);
        let titles: Vec<&str> = events.iter().map(|e| e.title()).collect();
        assert_eq!(titles, vec!["COMP5423: Word Embeddings", "COMP5423: Lab", "COMP5423: Quiz 2"]);
        let ids: Vec<&str> = events.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["nlp-w6-lecture", "nlp-w6-lab", "nlp-w6-quiz"]);
    }

    #[test]
    fn missed_weeks_are_still_scheduled() {
        let week = Week::new(1, key("2026-02-02"), "Intro".to_string()).with_status(WeekStatus::Missed);
        let index = project_events(&[nlp(vec![week])], &[]);
        assert_eq!(kinds(index.on(&key("2026-02-02"))), vec![EventKind::Lecture]);
    }

    #[test]
    fn courses_then_weeks_then_deadlines() {
        let day = key("2026-03-02");
        let cvpr = Course::new("cvpr".to_string(), "COMP5422".to_string(), "#10b981".to_string(), vec![
            Week::new(3, day, "Features".to_string()).with_lab(Some("Lab 2".to_string())),
        ]);
        let nlp = nlp(vec![Week::new(7, day, "RNNs".to_string())]);
        let deadlines = vec![
            Deadline::new("x".to_string(), "nlp".to_string(), "Assignment 1".to_string(), day, "deadline".to_string(), false),
            Deadline::new("y".to_string(), "cvpr".to_string(), "Midterm".to_string(), day, "exam".to_string(), false),
        ];

        let index = project_events(&[cvpr, nlp], &deadlines);
        let ids: Vec<&str> = index.on(&day).iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["cvpr-w3-lecture", "cvpr-w3-lab", "nlp-w7-lecture", "dl-x", "dl-y"]);
        assert_eq!(index.on(&day)[4].kind(), EventKind::Exam);
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn colors_fall_back() {
        let day = key("2026-03-02");
        let courses = vec![
            Course::new("good".to_string(), "G".to_string(), "rgb(16, 185, 129)".to_string(), vec![
                Week::new(1, day, "a".to_string()),
            ]),
            Course::new("bad".to_string(), "B".to_string(), "nonsense".to_string(), vec![
                Week::new(1, day, "b".to_string()).with_quiz(None),
            ]),
        ];
        let deadlines = vec![
            Deadline::new("1".to_string(), "good".to_string(), "t".to_string(), day, "project".to_string(), false),
            Deadline::new("2".to_string(), "bad".to_string(), "t".to_string(), day, "project".to_string(), false),
            Deadline::new("3".to_string(), "gone".to_string(), "t".to_string(), day, "exam".to_string(), false),
        ];
        let index = project_events(&courses, &deadlines);
        let colors: Vec<&str> = index.on(&day).iter().map(|e| e.color().as_str()).collect();
        assert_eq!(colors, vec![
            "#10b981", // course color
            "#6366f1", // lecture default
            "#f43f5e", // quiz default
            "#10b981", // deadline of a known course
            "#a855f7", // project default, course color is invalid
            "#f59e0b", // unknown course
        ]);
    }

    #[test]
    fn projection_is_deterministic() {
        let courses = vec![nlp(vec![
            Week::new(1, key("2026-02-02"), "Intro".to_string()).with_lab(None),
            Week::new(2, key("2026-02-09"), "Tokens".to_string()).with_quiz(None),
        ])];
        let deadlines = vec![
            Deadline::new("d".to_string(), "nlp".to_string(), "Report".to_string(), key("2026-02-09"), "talk".to_string(), true),
        ];
        assert_eq!(project_events(&courses, &deadlines), project_events(&courses, &deadlines));
    }

    #[test]
    fn empty_days_yield_empty_slices() {
        let index = project_events(&[], &[]);
        assert!(index.is_empty());
        assert!(index.on(&key("2026-01-01")).is_empty());
    }
}
