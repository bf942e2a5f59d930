//! Normal ranges, BMI and chart series for vital signs.

use chrono::NaiveDateTime;

use super::chart::SeriesPoint;
use crate::models::VitalSigns;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VitalMetric {
    Systolic,
    Diastolic,
    HeartRate,
    Temperature,
    OxygenSaturation,
    Weight,
    Height,
}

impl VitalMetric {
    pub const ALL: &'static [VitalMetric] = &[
        Self::Systolic,
        Self::Diastolic,
        Self::HeartRate,
        Self::Temperature,
        Self::OxygenSaturation,
        Self::Weight,
        Self::Height,
    ];

    /// Inclusive normal band.
    pub fn normal_range(self) -> (f64, f64) {
        match self {
            Self::Systolic => (90.0, 140.0),
            Self::Diastolic => (60.0, 90.0),
            Self::HeartRate => (60.0, 100.0),
            Self::Temperature => (36.1, 37.2),
            Self::OxygenSaturation => (95.0, 100.0),
            Self::Weight => (40.0, 150.0),
            Self::Height => (140.0, 200.0),
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Systolic | Self::Diastolic => "mmHg",
            Self::HeartRate => "bpm",
            Self::Temperature => "°C",
            Self::OxygenSaturation => "%",
            Self::Weight => "kg",
            Self::Height => "cm",
        }
    }

    pub fn read(self, record: &VitalSigns) -> Option<f64> {
        match self {
            Self::Systolic => record.systolic_bp,
            Self::Diastolic => record.diastolic_bp,
            Self::HeartRate => record.heart_rate,
            Self::Temperature => record.temperature,
            Self::OxygenSaturation => record.oxygen_saturation,
            Self::Weight => record.weight,
            Self::Height => record.height,
        }
    }

    pub fn classify(self, value: f64) -> VitalStatus {
        let (low, high) = self.normal_range();
        if value < low {
            VitalStatus::Low
        } else if value > high {
            VitalStatus::High
        } else {
            VitalStatus::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalStatus {
    Low,
    Normal,
    High,
}

impl VitalStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Thấp",
            Self::Normal => "Bình thường",
            Self::High => "Cao",
        }
    }
}

/// Status of one reading; a missing or zero value counts as normal.
pub fn status_of(record: &VitalSigns, metric: VitalMetric) -> VitalStatus {
    match metric.read(record) {
        Some(value) if value != 0.0 => metric.classify(value),
        _ => VitalStatus::Normal,
    }
}

/// Body-mass index to one decimal, from kg and cm.
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }
    let meters = height_cm / 100.0;
    Some((weight_kg / (meters * meters) * 10.0).round() / 10.0)
}

pub fn record_bmi(record: &VitalSigns) -> Option<f64> {
    bmi(record.weight?, record.height?)
}

/// Most recent reading.
pub fn latest(records: &[VitalSigns]) -> Option<&VitalSigns> {
    records
        .iter()
        .filter(|r| r.recorded_at.is_some())
        .max_by_key(|r| r.recorded_at)
}

/// Readings at or after `cutoff`, newest first. `None` keeps everything.
pub fn within(records: &[VitalSigns], cutoff: Option<NaiveDateTime>) -> Vec<&VitalSigns> {
    let mut kept: Vec<&VitalSigns> = records
        .iter()
        .filter(|r| match (cutoff, r.recorded_at) {
            (None, _) => true,
            (Some(cutoff), Some(at)) => at >= cutoff,
            (Some(_), None) => false,
        })
        .collect();
    kept.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    kept
}

/// One metric over time, oldest first, for the trend chart.
pub fn series(records: &[&VitalSigns], metric: VitalMetric) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = records
        .iter()
        .filter_map(|r| {
            let value = metric.read(r)?;
            Some(SeriesPoint {
                date: r.recorded_at?.date(),
                value,
                label: value.to_string(),
            })
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}
