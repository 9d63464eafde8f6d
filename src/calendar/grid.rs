//! Month-shaped grids of day cells

use std::fmt::{Display, Formatter};

use chrono::{Datelike, Duration, NaiveDate};

use crate::date_key::DateKey;

/// Column headers of a grid. Weeks start on Monday.
pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// A (year, month) pair. Months are 1-based, January is 1.
///
/// Every cursor is checked on construction: its whole grid, padding included, is made of representable dates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    year: i32,
    month: u32,
    first: NaiveDate,
    last: NaiveDate,
}

impl MonthCursor {
    /// Create a cursor, rolling over out-of-range months.
    ///
    /// Month 0 is December of the previous year, month 13 is January of the next year, and so on.
    /// Returns `None` in case the resulting month cannot be represented as a calendar date.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let index = i64::from(year) * 12 + i64::from(month) - 1;
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = index.rem_euclid(12) as u32 + 1;

        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let last = NaiveDate::from_ymd_opt(year, month, days_in(year, month))?;
        grid_bounds(first, last)?;

        Some(Self { year, month, first, last })
    }

    /// The month a given day belongs to, if it can be displayed
    pub fn containing(date: NaiveDate) -> Option<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32  { self.year  }
    pub fn month(&self) -> u32 { self.month }

    /// The following month. December wraps to January of the next year
    pub fn next(&self) -> Option<Self> {
        Self::new(self.year, self.month + 1)
    }

    /// The previous month. January wraps to December of the previous year
    pub fn prev(&self) -> Option<Self> {
        Self::new(self.year, self.month - 1)
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    pub fn days_in_month(&self) -> u32 {
        self.last.day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Human-readable name, e.g. `March 2024`
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

fn days_in(year: i32, month: u32) -> u32 {
    match month {
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// First and last day of the grid of a month: the Monday before `first` and the Sunday after `last`
fn grid_bounds(first: NaiveDate, last: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let leading = i64::from(first.weekday().num_days_from_monday());
    let trailing = 6 - i64::from(last.weekday().num_days_from_monday());
    Some((
        first.checked_sub_signed(Duration::days(leading))?,
        last.checked_add_signed(Duration::days(trailing))?,
    ))
}

impl Display for MonthCursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}


/// One position of a month grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayCell {
    date: NaiveDate,
    in_current_month: bool,
}

impl DayCell {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn key(&self) -> DateKey {
        DateKey::from(self.date)
    }

    /// Whether this cell belongs to the requested month, or is padding from an adjacent month
    pub fn is_in_current_month(&self) -> bool {
        self.in_current_month
    }
}


/// Build the grid of `month`: complete Monday-to-Sunday weeks, covering every day of the month.
///
/// Days of the previous month fill the first week up to the 1st, and days of the next month fill the last week.
/// When the month ends on a Sunday, no extra week is added.
pub fn month_grid(month: MonthCursor) -> Vec<DayCell> {
    let (start, end) = match grid_bounds(month.first_day(), month.last_day()) {
        Some(bounds) => bounds,
        None => return Vec::new(),
    };

    let mut cells = Vec::with_capacity(42);
    let mut next = Some(start);
    while let Some(date) = next.filter(|d| *d <= end) {
        cells.push(DayCell {
            date,
            in_current_month: month.contains(date),
        });
        next = date.succ_opt();
    }
    cells
}

/// Build the grid for a (year, month) pair, rolling over out-of-range months (see [`MonthCursor::new`]).
///
/// Returns an empty grid in case this month cannot be represented.
pub fn build_month_grid(year: i32, month: u32) -> Vec<DayCell> {
    match MonthCursor::new(year, month) {
        Some(cursor) => month_grid(cursor),
        None => {
            log::warn!("Month {}-{} is out of the supported calendar range", year, month);
            Vec::new()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn march_2024() {
        // March 1st 2024 is a Friday, March 31st is a Sunday
        let grid = build_month_grid(2024, 3);
        assert_eq!(grid.len(), 35);
        assert_eq!(grid[0].date(), ymd(2024, 2, 26));
        assert!(!grid[0].is_in_current_month());
        assert_eq!(grid[4].date(), ymd(2024, 3, 1));
        assert!(grid[4].is_in_current_month());
        let last = grid.last().unwrap();
        assert_eq!(last.date(), ymd(2024, 3, 31));
        assert!(last.is_in_current_month());
    }

    #[test]
    fn leap_february() {
        // February 1st 2024 is a Thursday, 29 days
        let grid = build_month_grid(2024, 2);
        assert_eq!(grid.len(), 35);
        assert_eq!(grid[0].date(), ymd(2024, 1, 29));
        assert_eq!(grid.iter().filter(|c| c.is_in_current_month()).count(), 29);
        assert_eq!(grid.last().unwrap().date(), ymd(2024, 3, 3));
    }

    #[test]
    fn month_filling_exactly_four_weeks() {
        // February 2021 starts on a Monday and ends on a Sunday
        let grid = build_month_grid(2021, 2);
        assert_eq!(grid.len(), 28);
        assert!(grid.iter().all(|c| c.is_in_current_month()));
    }

    #[test]
    fn six_week_month() {
        // September 2024 starts on a Sunday and has 30 days
        let grid = build_month_grid(2024, 9);
        assert_eq!(grid.len(), 42);
        assert_eq!(grid[6].date(), ymd(2024, 9, 1));
        assert_eq!(grid.last().unwrap().date(), ymd(2024, 10, 6));
    }

    #[test]
    fn every_month_is_made_of_complete_weeks() {
        for year in 1999..=2031 {
            for month in 1..=12 {
                let cursor = MonthCursor::new(year, month).unwrap();
                let grid = month_grid(cursor);
                assert!(grid.len() > 0);
                assert_eq!(grid.len() % 7, 0, "{}", cursor);
                assert_eq!(grid[0].date().weekday(), chrono::Weekday::Mon);
                assert_eq!(grid.last().unwrap().date().weekday(), chrono::Weekday::Sun);

                let in_month: Vec<NaiveDate> = grid.iter()
                    .filter(|c| c.is_in_current_month())
                    .map(|c| c.date())
                    .collect();
                let expected: Vec<NaiveDate> = (1..=cursor.days_in_month())
                    .map(|d| ymd(year, month, d))
                    .collect();
                assert_eq!(in_month, expected, "{}", cursor);

                // consecutive days
                for pair in grid.windows(2) {
                    assert_eq!(pair[1].date() - pair[0].date(), Duration::days(1));
                }
            }
        }
    }

    #[test]
    fn month_rollover() {
        assert_eq!(MonthCursor::new(2024, 0), MonthCursor::new(2023, 12));
        assert_eq!(MonthCursor::new(2024, 13), MonthCursor::new(2025, 1));
        assert_eq!(MonthCursor::new(2024, 25), MonthCursor::new(2026, 1));
        assert_eq!(build_month_grid(2024, 0), build_month_grid(2023, 12));
    }

    #[test]
    fn unrepresentable_months() {
        assert!(MonthCursor::new(i32::MAX, 1).is_none());
        assert!(build_month_grid(i32::MIN, 1).is_empty());
    }

    #[test]
    fn navigation_wraps_years() {
        let nov = MonthCursor::new(2025, 11).unwrap();
        assert_eq!(nov.next(), MonthCursor::new(2025, 12));
        assert_eq!(nov.next().and_then(|m| m.next()), MonthCursor::new(2026, 1));
        assert_eq!(MonthCursor::new(2026, 1).unwrap().prev(), MonthCursor::new(2025, 12));
    }

    #[test]
    fn the_last_displayable_month() {
        assert!(MonthCursor::containing(NaiveDate::MAX).map_or(true, |m| m.next().is_none()));

        // Walk up to the end of the supported range: every month on the way has a complete grid
        let mut cursor = MonthCursor::new(NaiveDate::MAX.year(), NaiveDate::MAX.month() - 1).unwrap();
        while let Some(next) = cursor.next() {
            cursor = next;
        }
        let grid = month_grid(cursor);
        assert_eq!(grid.len() % 7, 0);
        assert_eq!(grid.iter().filter(|c| c.is_in_current_month()).count() as u32, cursor.days_in_month());
        assert!(cursor.next().is_none());
        assert!(build_month_grid(cursor.year(), cursor.month() + 1).is_empty());
    }

    #[test]
    fn the_first_displayable_month() {
        let mut cursor = MonthCursor::new(NaiveDate::MIN.year(), NaiveDate::MIN.month() + 1).unwrap();
        while let Some(prev) = cursor.prev() {
            cursor = prev;
        }
        assert!(!month_grid(cursor).is_empty());
        assert!(cursor.first_day() >= NaiveDate::MIN);
    }

    #[test]
    fn labels() {
        assert_eq!(MonthCursor::new(2024, 3).unwrap().label(), "March 2024");
        assert_eq!(MonthCursor::new(2024, 3).unwrap().to_string(), "2024-03");
        assert_eq!(MonthCursor::new(2023, 2).unwrap().days_in_month(), 28);
    }
}
