//! Some utility functions

use crate::calendar::view::{DayDetail, MonthView};
use crate::event::CalendarEvent;
use crate::task::StudyTask;

/// A debug utility that pretty-prints a month grid, one week per line
pub fn print_month(view: &MonthView) {
    println!("{}", view.label);
    println!("{}", view.weekdays.iter().map(|d| format!("{:<10}", d)).collect::<String>());

    for week in view.cells.chunks(7) {
        let line: String = week.iter()
            .map(|cell| {
                let day = cell.key.day();
                let marker = match (cell.is_today, cell.is_selected) {
                    (_, true) => '>',
                    (true, false) => '*',
                    _ if !cell.cell.is_in_current_month() => '.',
                    _ => ' ',
                };
                let n_events = cell.preview.len() + cell.hidden_events;
                format!("{}{:>2} {:<6}", marker, day, summarize(n_events, cell.tasks.task_count))
            })
            .collect();
        println!("{}", line);
    }
}

fn summarize(n_events: usize, n_tasks: usize) -> String {
    match (n_events, n_tasks) {
        (0, 0) => String::new(),
        (e, 0) => format!("{}e", e),
        (0, t) => format!("{}t", t),
        (e, t) => format!("{}e{}t", e, t),
    }
}

/// A debug utility that pretty-prints what is scheduled on a day
pub fn print_day_detail(detail: &DayDetail) {
    match detail {
        DayDetail::NothingScheduled { date } => {
            println!("{}: nothing scheduled", date);
        },
        DayDetail::Scheduled { date, events, tasks, summary } => {
            println!("{} ({}/{} done, {}h planned)", date, summary.done_count, summary.task_count, summary.planned_hours);
            for event in events.iter() {
                print_event(event);
            }
            for task in tasks.iter() {
                print_task(task);
            }
        },
    }
}

pub fn print_event(event: &CalendarEvent) {
    println!("    [{}] {}\t{}", event.kind().as_str(), event.title(), event.id());
}

pub fn print_task(task: &StudyTask) {
    let completion = if task.done() { "✓" } else { " " };
    println!("    {} {} ({}h, {})\t{}", completion, task.title(), task.hours(), task.category(), task.id());
}
