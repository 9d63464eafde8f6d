//! Prints the study calendar of a month, as seen from the study API (or from a local store)
//!
//! Set the `STUDY_API_URL` environment variable to use another API, and `RUST_LOG` to display more info.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use semester_calendar::cache::Cache;
use semester_calendar::calendar::{CalendarView, MonthCursor};
use semester_calendar::client::Client;
use semester_calendar::deadline::upcoming_deadlines;
use semester_calendar::traits::{StudySource, TaskStore};
use semester_calendar::{utils, Coordinator};

const UPCOMING_DEADLINES: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "study-calendar", version, about = "Print a month of the study calendar")]
struct Cli {
    /// Read the study data from this local file instead of the study API
    #[arg(long)]
    cache: Option<PathBuf>,
    /// Year to display (defaults to the current month)
    #[arg(requires = "month")]
    year: Option<i32>,
    /// Month to display, January is 1
    #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,
}


#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Cli::parse();

    let mut view = CalendarView::starting_today()
        .ok_or("today cannot be displayed in a calendar")?;
    if let (Some(year), Some(month)) = (args.year, args.month) {
        let cursor = MonthCursor::new(year, month)
            .ok_or_else(|| format!("{}-{:02} is out of the supported calendar range", year, month))?;
        view.show_month(cursor);
    }

    match args.cache {
        Some(path) => {
            let cache = match Cache::from_file(&path) {
                Ok(cache) => cache,
                Err(err) => {
                    log::warn!("Invalid cache file: {}. Using an empty cache", err);
                    Cache::new(&path)
                }
            };
            show(Coordinator::new(cache), view).await;
        },
        None => show(Coordinator::new(Client::from_config()?), view).await,
    }
    Ok(())
}

async fn show<S>(coordinator: Coordinator<S>, mut view: CalendarView)
where
    S: StudySource + TaskStore,
{
    let snapshot = coordinator.reload().await;
    for failure in snapshot.failures() {
        eprintln!("Unable to fetch {}: {}", failure.section, failure.message);
    }

    let events = snapshot.events();
    let tasks = snapshot.task_index();
    utils::print_month(&view.render(&events, &tasks));

    let summary = view.month_summary(&tasks);
    println!();
    println!("{} task(s) this month, {} done, {}h planned", summary.task_count, summary.done_count, summary.planned_hours);

    let today = view.today();
    if view.click_day(today.into()) {
        if let Some(detail) = view.detail(&events, &tasks) {
            println!();
            utils::print_day_detail(&detail);
        }
    }

    let upcoming = upcoming_deadlines(snapshot.deadlines(), UPCOMING_DEADLINES);
    if !upcoming.is_empty() {
        println!();
        println!("Upcoming deadlines:");
        for deadline in upcoming {
            println!("    {} {:<40} {:?}", deadline.date(), deadline.title(), deadline.urgency(today));
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_line() {
        Cli::command().debug_assert();

        let args = Cli::try_parse_from(["study-calendar", "--cache", "study.json", "2024", "3"]).unwrap();
        assert_eq!(args.cache, Some(PathBuf::from("study.json")));
        assert_eq!((args.year, args.month), (Some(2024), Some(3)));

        let args = Cli::try_parse_from(["study-calendar"]).unwrap();
        assert_eq!((args.cache, args.year, args.month), (None, None, None));

        // A year alone, or a month out of 1..=12, is rejected
        assert!(Cli::try_parse_from(["study-calendar", "2024"]).is_err());
        assert!(Cli::try_parse_from(["study-calendar", "2024", "13"]).is_err());
        assert!(Cli::try_parse_from(["study-calendar", "2024", "march"]).is_err());
    }
}
