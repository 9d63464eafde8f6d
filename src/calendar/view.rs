//! Navigation, selection and task-entry state of the month calendar

use std::error::Error;

use chrono::NaiveDate;

use crate::calendar::events::EventIndex;
use crate::calendar::grid::{month_grid, DayCell, MonthCursor, WEEKDAYS};
use crate::calendar::tasks::{TaskAggregate, TaskIndex};
use crate::config;
use crate::coordinator::Coordinator;
use crate::date_key::DateKey;
use crate::event::CalendarEvent;
use crate::task::{StudyTask, TaskDraft};
use crate::traits::{StudySource, TaskStore};

/// Why a task entry could not be turned into a draft
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("a task needs a title")]
    EmptyTitle,
    #[error("no task is being added")]
    NotAddingTask,
}

/// Why submitting a new task failed
#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    /// Nothing has been sent to the task store
    #[error("invalid task: {0}")]
    Invalid(#[from] FormError),
    /// The task store refused or could not be reached
    #[error("unable to create the task: {0}")]
    Store(Box<dyn Error>),
}


/// The fields of the "add task" form, as typed by the user
#[derive(Clone, Debug, PartialEq)]
pub struct AddTaskForm {
    pub title: String,
    /// Raw hours input. Anything that is not a positive number counts as the default duration
    pub hours: String,
    pub course_id: Option<String>,
    pub category: String,
}

impl Default for AddTaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            hours: config::DEFAULT_TASK_HOURS.to_string(),
            course_id: None,
            category: config::default_category(),
        }
    }
}

impl AddTaskForm {
    /// Validate this form for a given day
    pub fn to_draft(&self, date: DateKey) -> Result<TaskDraft, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::EmptyTitle);
        }
        let course_id = self.course_id.as_ref()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        Ok(TaskDraft {
            date,
            course_id,
            title: title.to_string(),
            hours: parse_hours(&self.hours),
            category: self.category.clone(),
        })
    }
}

/// Parse a duration in hours, falling back to the default duration for anything that is not a positive number
pub fn parse_hours(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(h) if h.is_finite() && h > 0.0 => h,
        _ => config::DEFAULT_TASK_HOURS,
    }
}


/// Where the user is in the calendar
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState {
    /// No day is selected
    Browsing,
    /// A day is selected and its details are shown
    DaySelected(DateKey),
    /// A day is selected and a task is being added to it
    AddingTask { date: DateKey, form: AddTaskForm },
}


/// A grid cell, along with what should be displayed in it
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedCell<'a> {
    pub cell: DayCell,
    pub key: DateKey,
    pub is_today: bool,
    pub is_selected: bool,
    /// The first events of the day
    pub preview: &'a [CalendarEvent],
    /// How many events did not fit in the preview
    pub hidden_events: usize,
    pub tasks: TaskAggregate,
}

/// A whole rendered month
#[derive(Clone, Debug, PartialEq)]
pub struct MonthView<'a> {
    pub month: MonthCursor,
    pub label: String,
    pub weekdays: [&'static str; 7],
    pub cells: Vec<RenderedCell<'a>>,
}

/// The detail panel of the selected day
#[derive(Clone, Debug, PartialEq)]
pub enum DayDetail<'a> {
    /// There is neither event nor task on that day
    NothingScheduled { date: DateKey },
    Scheduled {
        date: DateKey,
        events: &'a [CalendarEvent],
        tasks: &'a [StudyTask],
        summary: TaskAggregate,
    },
}

impl<'a> DayDetail<'a> {
    pub fn date(&self) -> DateKey {
        match self {
            DayDetail::NothingScheduled { date } => *date,
            DayDetail::Scheduled { date, .. } => *date,
        }
    }
}


/// State of a month calendar: the visible month, and the selected day (if any)
#[derive(Clone, Debug)]
pub struct CalendarView {
    today: NaiveDate,
    month: MonthCursor,
    state: ViewState,
}

impl CalendarView {
    /// Create a view showing the month of `today`, with nothing selected.
    ///
    /// Returns `None` in case that month is at the very edge of the calendar range, and cannot be displayed
    pub fn new(today: NaiveDate) -> Option<Self> {
        Some(Self {
            today,
            month: MonthCursor::containing(today)?,
            state: ViewState::Browsing,
        })
    }

    /// Create a view for the current local date
    pub fn starting_today() -> Option<Self> {
        Self::new(chrono::Local::now().date_naive())
    }

    pub fn today(&self) -> NaiveDate        { self.today }
    pub fn month(&self) -> MonthCursor      { self.month }
    pub fn state(&self) -> &ViewState       { &self.state }

    /// Update the current date (e.g. after midnight). The visible month is kept
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    /// The selected day, if any
    pub fn selected(&self) -> Option<DateKey> {
        match &self.state {
            ViewState::Browsing => None,
            ViewState::DaySelected(date) => Some(*date),
            ViewState::AddingTask { date, .. } => Some(*date),
        }
    }

    /// The cells of the visible month
    pub fn grid(&self) -> Vec<DayCell> {
        month_grid(self.month)
    }

    /// Display another month. This clears the selection and closes the task form
    pub fn show_month(&mut self, month: MonthCursor) {
        self.month = month;
        self.state = ViewState::Browsing;
    }

    /// Display the following month. Returns `false` (and changes nothing) at the end of the calendar range
    pub fn next_month(&mut self) -> bool {
        self.navigate_to(self.month.next())
    }

    /// Display the previous month. Returns `false` (and changes nothing) at the start of the calendar range
    pub fn prev_month(&mut self) -> bool {
        self.navigate_to(self.month.prev())
    }

    fn navigate_to(&mut self, target: Option<MonthCursor>) -> bool {
        match target {
            Some(month) => {
                self.show_month(month);
                true
            },
            None => {
                log::debug!("No month can be displayed next to {}", self.month);
                false
            }
        }
    }

    /// Display the current month, and select today.
    /// Returns `false` (and changes nothing) in case the month of today cannot be displayed
    pub fn jump_to_today(&mut self) -> bool {
        match MonthCursor::containing(self.today) {
            Some(month) => {
                self.month = month;
                self.state = ViewState::DaySelected(DateKey::from(self.today));
                true
            },
            None => {
                log::debug!("The month of {} cannot be displayed", self.today);
                false
            }
        }
    }

    /// Handle a click on a day cell.
    ///
    /// Clicking the selected day unselects it, clicking another day selects it.
    /// Clicks are ignored (and `false` is returned) while the task form is open, so that nothing typed is lost:
    /// the form is only left through [`Self::cancel_task_form`] or [`Self::submit_task`].
    /// Days that are not part of the visible grid are ignored as well.
    pub fn click_day(&mut self, date: DateKey) -> bool {
        if let ViewState::AddingTask { date: editing, .. } = &self.state {
            log::debug!("Ignoring a click on {}, a task is being added on {}", date, editing);
            return false;
        }
        if !self.grid().iter().any(|cell| cell.key() == date) {
            log::debug!("Ignoring a click on {}, which is not displayed in {}", date, self.month);
            return false;
        }

        self.state = match self.selected() {
            Some(selected) if selected == date => ViewState::Browsing,
            _ => ViewState::DaySelected(date),
        };
        true
    }

    /// Open the task form for the selected day. Returns `false` if no day is selected
    pub fn open_task_form(&mut self) -> bool {
        match &self.state {
            ViewState::DaySelected(date) => {
                self.state = ViewState::AddingTask { date: *date, form: AddTaskForm::default() };
                true
            },
            ViewState::AddingTask { .. } => true,
            ViewState::Browsing => false,
        }
    }

    /// The task form, if it is open
    pub fn form_mut(&mut self) -> Option<&mut AddTaskForm> {
        match &mut self.state {
            ViewState::AddingTask { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Close the task form, keeping the day selected
    pub fn cancel_task_form(&mut self) {
        if let ViewState::AddingTask { date, .. } = &self.state {
            self.state = ViewState::DaySelected(*date);
        }
    }

    /// Validate the task form. Nothing is changed, so that the form can be corrected
    pub fn prepare_submission(&self) -> Result<TaskDraft, FormError> {
        match &self.state {
            ViewState::AddingTask { date, form } => form.to_draft(*date),
            _ => Err(FormError::NotAddingTask),
        }
    }

    /// Submit the task form through `coordinator`.
    ///
    /// Invalid forms are rejected before anything is sent.
    /// In case the store fails, the form stays open with its content, so that the user can try again.
    pub async fn submit_task<S>(&mut self, coordinator: &Coordinator<S>) -> Result<StudyTask, SubmitError>
    where
        S: StudySource + TaskStore,
    {
        let draft = match self.prepare_submission() {
            Ok(draft) => draft,
            Err(err) => {
                log::debug!("Task form rejected: {}", err);
                return Err(err.into());
            }
        };

        let task = coordinator.create_task(&draft).await.map_err(SubmitError::Store)?;
        self.cancel_task_form();
        Ok(task)
    }

    /// Lay out the visible month
    pub fn render<'a>(&self, events: &'a EventIndex, tasks: &TaskIndex) -> MonthView<'a> {
        let today = DateKey::from(self.today);
        let selected = self.selected();

        let cells = self.grid().into_iter()
            .map(|cell| {
                let key = cell.key();
                let day_events = events.on(&key);
                let shown = day_events.len().min(config::EVENT_PREVIEW_COUNT);
                RenderedCell {
                    cell,
                    key,
                    is_today: key == today,
                    is_selected: selected == Some(key),
                    preview: &day_events[..shown],
                    hidden_events: day_events.len() - shown,
                    tasks: tasks.aggregate(&key),
                }
            })
            .collect();

        MonthView {
            month: self.month,
            label: self.month.label(),
            weekdays: WEEKDAYS,
            cells,
        }
    }

    /// Details of the selected day, or `None` if no day is selected
    pub fn detail<'a>(&self, events: &'a EventIndex, tasks: &'a TaskIndex) -> Option<DayDetail<'a>> {
        let date = self.selected()?;
        let day_events = events.on(&date);
        let day_tasks = tasks.on(&date);

        if day_events.is_empty() && day_tasks.is_empty() {
            return Some(DayDetail::NothingScheduled { date });
        }
        Some(DayDetail::Scheduled {
            date,
            events: day_events,
            tasks: day_tasks,
            summary: tasks.aggregate(&date),
        })
    }

    /// Summary of the tasks of the visible month, padding days excluded
    pub fn month_summary(&self, tasks: &TaskIndex) -> TaskAggregate {
        self.grid().iter()
            .filter(|cell| cell.is_in_current_month())
            .map(|cell| tasks.aggregate(&cell.key()))
            .fold(TaskAggregate::default(), TaskAggregate::merge)
    }
}
