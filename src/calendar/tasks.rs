//! Indexing of study tasks by day

use std::collections::BTreeMap;

use crate::date_key::DateKey;
use crate::task::StudyTask;

/// Study tasks, grouped by day
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskIndex {
    tasks: BTreeMap<DateKey, Vec<StudyTask>>,
}

impl TaskIndex {
    /// The tasks of a day, in source order. Days without tasks return an empty slice
    pub fn on(&self, date: &DateKey) -> &[StudyTask] {
        self.tasks
            .get(date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Summary of the tasks of a day. This is computed on every call
    pub fn aggregate(&self, date: &DateKey) -> TaskAggregate {
        aggregate(self.on(date))
    }

    /// Every day that has at least one task, in chronological order
    pub fn days(&self) -> impl Iterator<Item = &DateKey> {
        self.tasks.keys()
    }

    pub fn len(&self) -> usize {
        self.tasks.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Group tasks by day. The order of tasks within a day is the order they are given in.
pub fn index_tasks(tasks: &[StudyTask]) -> TaskIndex {
    let mut index = TaskIndex::default();
    for task in tasks {
        index.tasks.entry(task.date()).or_default().push(task.clone());
    }
    index
}


/// Per-day summary of study tasks
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TaskAggregate {
    /// Sum of the hours of every task, completed ones included
    pub planned_hours: f64,
    /// Number of completed tasks
    pub done_count: usize,
    /// Number of tasks
    pub task_count: usize,
}

impl TaskAggregate {
    /// Share of completed tasks, or `None` when there is no task
    pub fn completion_ratio(&self) -> Option<f64> {
        match self.task_count {
            0 => None,
            n => Some(self.done_count as f64 / n as f64),
        }
    }

    /// Combine two summaries (e.g. to summarize several days)
    pub fn merge(self, other: TaskAggregate) -> TaskAggregate {
        TaskAggregate {
            planned_hours: self.planned_hours + other.planned_hours,
            done_count: self.done_count + other.done_count,
            task_count: self.task_count + other.task_count,
        }
    }
}

/// Summarize a list of tasks
pub fn aggregate(tasks: &[StudyTask]) -> TaskAggregate {
    tasks.iter().fold(TaskAggregate::default(), |acc, task| TaskAggregate {
        planned_hours: acc.planned_hours + task.hours(),
        done_count: acc.done_count + usize::from(task.done()),
        task_count: acc.task_count + 1,
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, date: &str, hours: f64, done: bool) -> StudyTask {
        StudyTask::new(id.into(), date.parse().unwrap(), Some("nlp".to_string()), format!("Task {}", id), hours, "review".to_string(), done)
    }

    #[test]
    fn aggregate_counts_completed_hours_too() {
        let tasks = vec![
            task("a", "2026-03-01", 1.5, true),
            task("b", "2026-03-01", 2.0, false),
        ];
        let index = index_tasks(&tasks);
        let summary = index.aggregate(&"2026-03-01".parse().unwrap());
        assert_eq!(summary.planned_hours, 3.5);
        assert_eq!(summary.done_count, 1);
        assert_eq!(summary.task_count, 2);
        assert_eq!(summary.completion_ratio(), Some(0.5));
    }

    #[test]
    fn source_order_is_kept() {
        let tasks = vec![
            task("z", "2026-03-02", 1.0, false),
            task("other-day", "2026-03-01", 1.0, false),
            task("a", "2026-03-02", 3.0, true),
            task("m", "2026-03-02", 0.5, false),
        ];
        let index = index_tasks(&tasks);
        let ids: Vec<&str> = index.on(&"2026-03-02".parse().unwrap()).iter().map(|t| t.id().as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
        assert_eq!(index.len(), 4);
        let days: Vec<String> = index.days().map(|d| d.to_string()).collect();
        assert_eq!(days, vec!["2026-03-01", "2026-03-02"]);
    }

    #[test]
    fn empty_days() {
        let index = index_tasks(&[]);
        let day = "2026-03-01".parse().unwrap();
        assert!(index.on(&day).is_empty());
        let summary = index.aggregate(&day);
        assert_eq!(summary, TaskAggregate::default());
        assert_eq!(summary.completion_ratio(), None);
    }

    #[test]
    fn merge() {
        let a = aggregate(&[task("a", "2026-03-01", 1.0, true)]);
        let b = aggregate(&[task("b", "2026-03-02", 2.5, false)]);
        let total = a.merge(b);
        assert_eq!(total.planned_hours, 3.5);
        assert_eq!(total.done_count, 1);
        assert_eq!(total.task_count, 2);
    }
}
