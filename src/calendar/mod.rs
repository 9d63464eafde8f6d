//! The month calendar: grid geometry, per-day indexes, and the interactive view built on them

pub mod grid;
pub mod events;
pub mod tasks;
pub mod view;

pub use grid::{build_month_grid, DayCell, MonthCursor};
pub use events::{project_events, EventIndex};
pub use tasks::{index_tasks, TaskAggregate, TaskIndex};
pub use view::{AddTaskForm, CalendarView, DayDetail, MonthView, ViewState};
