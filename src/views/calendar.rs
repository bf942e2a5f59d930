//! Month grid for the appointment calendar.

use chrono::{Datelike, Months, NaiveDate, NaiveTime};

use crate::models::Appointment;

/// Appointments listed per day before the "+N khác" overflow marker.
pub const MAX_ITEMS_PER_DAY: usize = 3;

/// Weekday headers, Sunday first.
pub const WEEKDAYS: [&str; 7] = ["CN", "T2", "T3", "T4", "T5", "T6", "T7"];

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub appointment: Appointment,
    pub time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_today: bool,
    /// Every appointment on this date, in input order.
    pub entries: Vec<CalendarEntry>,
}

impl DayCell {
    /// Entries actually drawn in the cell.
    pub fn shown(&self) -> &[CalendarEntry] {
        &self.entries[..self.entries.len().min(MAX_ITEMS_PER_DAY)]
    }

    /// Count behind the overflow marker; 0 when everything fits.
    pub fn overflow(&self) -> usize {
        self.entries.len().saturating_sub(MAX_ITEMS_PER_DAY)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalendarCell {
    /// Padding before the 1st so it lands under its weekday.
    Blank,
    Day(DayCell),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<CalendarCell>,
}

impl CalendarMonth {
    /// Build the grid for `year`/`month`, bucketing appointments by their
    /// calendar date. Invalid months yield an empty grid.
    pub fn build(year: i32, month: u32, appointments: &[&Appointment], today: NaiveDate) -> Self {
        let mut cells = Vec::new();
        if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
            let leading = first.weekday().num_days_from_sunday() as usize;
            cells.extend(std::iter::repeat(CalendarCell::Blank).take(leading));

            for date in first.iter_days().take_while(|d| d.month() == month) {
                let entries = appointments
                    .iter()
                    .filter(|a| a.appointment_date.date() == date)
                    .map(|a| CalendarEntry {
                        appointment: (*a).clone(),
                        time: a.appointment_date.time(),
                    })
                    .collect();
                cells.push(CalendarCell::Day(DayCell {
                    date,
                    is_today: date == today,
                    entries,
                }));
            }
        }
        Self { year, month, cells }
    }

    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.days().find(|cell| cell.date.day() == day)
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(|cell| match cell {
            CalendarCell::Day(day) => Some(day),
            CalendarCell::Blank => None,
        })
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|c| matches!(c, CalendarCell::Blank))
            .count()
    }

    /// Header text, e.g. "tháng 5 năm 2024".
    pub fn title(&self) -> String {
        format!("tháng {} năm {}", self.month, self.year)
    }
}

/// The calendar's "current month" pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn next(&mut self) {
        if let Some(next) = self.first.checked_add_months(Months::new(1)) {
            self.first = next;
        }
    }

    pub fn previous(&mut self) {
        if let Some(prev) = self.first.checked_sub_months(Months::new(1)) {
            self.first = prev;
        }
    }
}
