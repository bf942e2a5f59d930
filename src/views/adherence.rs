//! Adherence arithmetic over the append-only dose log.

use chrono::{Days, NaiveDate};

use crate::models::{AdherenceRecord, EntityId};

/// Trailing window for the headline rate.
pub const WINDOW_DAYS: u64 = 30;
/// Window for the "missed doses" card.
pub const MISSED_WINDOW_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdherenceRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl AdherenceRating {
    pub fn for_rate(rate: u32) -> Self {
        match rate {
            r if r >= 95 => Self::Excellent,
            r if r >= 85 => Self::Good,
            r if r >= 70 => Self::Fair,
            _ => Self::Poor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Xuất sắc",
            Self::Good => "Tốt",
            Self::Fair => "Khá",
            Self::Poor => "Cần cải thiện",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdherenceStats {
    pub total_doses: usize,
    pub taken_doses: usize,
    /// Whole percent, 0 when there are no records.
    pub rate: u32,
}

impl AdherenceStats {
    pub fn rating(&self) -> AdherenceRating {
        AdherenceRating::for_rate(self.rate)
    }
}

fn since(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// `round(taken / total × 100)` over records dated within the trailing
/// window ending `today`.
pub fn stats(records: &[AdherenceRecord], today: NaiveDate) -> AdherenceStats {
    let from = since(today, WINDOW_DAYS);
    let window: Vec<&AdherenceRecord> = records
        .iter()
        .filter(|r| r.recorded_date >= from)
        .collect();
    let total_doses = window.len();
    let taken_doses = window.iter().filter(|r| r.taken).count();
    let rate = if total_doses == 0 {
        0
    } else {
        (taken_doses as f64 / total_doses as f64 * 100.0).round() as u32
    };
    AdherenceStats {
        total_doses,
        taken_doses,
        rate,
    }
}

/// Missed doses in the last week.
pub fn missed_recently(records: &[AdherenceRecord], today: NaiveDate) -> usize {
    let from = since(today, MISSED_WINDOW_DAYS);
    records
        .iter()
        .filter(|r| !r.taken && r.recorded_date >= from)
        .count()
}

/// Records logged on `date`.
pub fn on_date(records: &[AdherenceRecord], date: NaiveDate) -> Vec<&AdherenceRecord> {
    records.iter().filter(|r| r.recorded_date == date).collect()
}

/// The entry already logged for one medication of one prescription on
/// `date`, if any. Its presence replaces the taken/missed buttons.
pub fn logged_dose<'a>(
    records: &'a [AdherenceRecord],
    prescription_id: Option<&EntityId>,
    medication_name: &str,
    date: NaiveDate,
) -> Option<&'a AdherenceRecord> {
    records.iter().find(|r| {
        r.recorded_date == date
            && r.medication_name == medication_name
            && match (r.prescription_id.as_ref(), prescription_id) {
                (Some(a), Some(b)) => a.same_as(b),
                (None, None) => true,
                _ => false,
            }
    })
}
