//! Vital-sign readings: list with a date window, range badges and trends.

use chrono::{Duration, Local, NaiveDateTime};

use super::{fetch_owned, require_id, ResourceFamily, ResourceList};
use crate::api::{ApiClient, ApiError};
use crate::messages::{self, FamilyMessages};
use crate::models::{same_id, EntityId, User, VitalSigns};
use crate::policy::Subject;
use crate::views::chart::{self, ChartGeometry, ChartLayout};
use crate::views::vitals::{self, VitalMetric, VitalStatus};

pub struct VitalSignsFamily;

/// Window offered by the list's date dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    Days(i64),
    All,
}

impl DateWindow {
    pub const CHOICES: &'static [DateWindow] = &[
        DateWindow::Days(7),
        DateWindow::Days(30),
        DateWindow::Days(90),
        DateWindow::All,
    ];

    pub fn label(self) -> String {
        match self {
            DateWindow::Days(n) => format!("{n} ngày qua"),
            DateWindow::All => "Tất cả".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VitalFilter {
    pub patient_id: Option<EntityId>,
    pub window: DateWindow,
    /// Instant the window is measured back from.
    pub now: NaiveDateTime,
}

impl VitalFilter {
    pub fn cutoff(&self) -> Option<NaiveDateTime> {
        match self.window {
            DateWindow::Days(n) => Some(self.now - Duration::days(n)),
            DateWindow::All => None,
        }
    }
}

impl Default for VitalFilter {
    fn default() -> Self {
        Self {
            patient_id: None,
            window: DateWindow::Days(7),
            now: Local::now().naive_local(),
        }
    }
}

impl ResourceFamily for VitalSignsFamily {
    type Item = VitalSigns;
    type Filter = VitalFilter;

    const SUBJECT: Subject = Subject::VitalSigns;
    const MESSAGES: FamilyMessages = messages::VITAL_SIGNS;

    async fn fetch(api: &ApiClient, user: Option<&User>) -> Result<Vec<VitalSigns>, ApiError> {
        fetch_owned(api, user).await
    }

    // Free-text search is not offered on this screen.
    fn matches(item: &VitalSigns, _search: &str, filter: &VitalFilter) -> bool {
        let patient_ok = filter
            .patient_id
            .as_ref()
            .map_or(true, |p| same_id(item.patient_id.as_ref(), Some(p)));
        let window_ok = match (filter.cutoff(), item.recorded_at) {
            (None, _) => true,
            (Some(cutoff), Some(at)) => at >= cutoff,
            (Some(_), None) => false,
        };
        patient_ok && window_ok
    }

    fn draft(_user: Option<&User>) -> VitalSigns {
        VitalSigns {
            recorded_at: Some(Local::now().naive_local()),
            ..VitalSigns::default()
        }
    }

    fn validate(draft: &VitalSigns) -> Result<(), String> {
        require_id(draft.patient_id.as_ref())?;
        match draft.recorded_at {
            Some(_) => Ok(()),
            None => Err(messages::REQUIRED_FIELD.to_string()),
        }
    }
}

/// Badge for every metric the reading carries.
pub fn badges(record: &VitalSigns) -> Vec<(VitalMetric, VitalStatus)> {
    VitalMetric::ALL
        .iter()
        .filter(|m| m.read(record).is_some())
        .map(|m| (*m, vitals::status_of(record, *m)))
        .collect()
}

impl ResourceList<VitalSignsFamily> {
    /// Visible readings, newest first.
    pub fn timeline(&self) -> Vec<&VitalSigns> {
        let mut rows = self.visible();
        rows.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        rows
    }

    /// Trend of one metric over the visible readings.
    pub fn trend(&self, metric: VitalMetric, layout: ChartLayout) -> Option<ChartGeometry> {
        chart::build(&vitals::series(&self.visible(), metric), layout)
    }
}
