//! Appointment list, form and the month calendar.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::{fetch_owned, require, require_id, text_matches, ResourceFamily};
use crate::api::{ApiClient, ApiError};
use crate::messages::{self, FamilyMessages};
use crate::models::{Appointment, AppointmentStatus, User};
use crate::policy::Subject;
use crate::views::calendar::{CalendarMonth, MonthCursor};

pub struct AppointmentsFamily;

#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
}

impl ResourceFamily for AppointmentsFamily {
    type Item = Appointment;
    type Filter = AppointmentFilter;

    const SUBJECT: Subject = Subject::Appointments;
    const MESSAGES: FamilyMessages = messages::APPOINTMENTS;

    async fn fetch(api: &ApiClient, user: Option<&User>) -> Result<Vec<Appointment>, ApiError> {
        fetch_owned(api, user).await
    }

    fn matches(item: &Appointment, search: &str, filter: &AppointmentFilter) -> bool {
        filter.status.map_or(true, |s| s == item.status)
            && text_matches(
                search,
                &[
                    Some(&item.title),
                    item.patient_name.as_deref(),
                    item.notes.as_deref(),
                ],
            )
    }

    fn draft(_user: Option<&User>) -> Appointment {
        let now = Local::now().naive_local();
        Appointment {
            id: None,
            title: String::new(),
            appointment_date: now.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(now),
            patient_id: None,
            patient_name: None,
            doctor_id: None,
            status: AppointmentStatus::Scheduled,
            notes: None,
        }
    }

    fn validate(draft: &Appointment) -> Result<(), String> {
        require(&draft.title)?;
        require_id(draft.patient_id.as_ref())
    }
}

/// Date and time inputs of the form.
pub fn slot_parts(appointment: &Appointment) -> (NaiveDate, NaiveTime) {
    (
        appointment.appointment_date.date(),
        appointment.appointment_date.time(),
    )
}

/// Recombine the form's date and time inputs.
pub fn set_slot(appointment: &mut Appointment, date: NaiveDate, time: NaiveTime) {
    appointment.appointment_date = NaiveDateTime::new(date, time);
}

/// Status label shown on the card.
pub fn status_label(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Scheduled => "Đã lên lịch",
        AppointmentStatus::Confirmed => "Đã xác nhận",
        AppointmentStatus::InProgress => "Đang khám",
        AppointmentStatus::Completed => "Hoàn thành",
        AppointmentStatus::Cancelled => "Đã hủy",
        AppointmentStatus::NoShow => "Không đến",
        AppointmentStatus::Unknown => messages::UNKNOWN_VALUE,
    }
}

/// List or calendar presentation of the same fetched items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Calendar,
}

/// Calendar grid for the cursor's month over the visible appointments.
pub fn calendar_for(
    appointments: &[&Appointment],
    cursor: &MonthCursor,
    today: NaiveDate,
) -> CalendarMonth {
    CalendarMonth::build(cursor.year(), cursor.month(), appointments, today)
}
