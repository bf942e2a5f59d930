//! Line-chart geometry for lab and vital-sign trends.
//!
//! `build` maps a date-ordered series onto SVG coordinates inside the
//! plot area: the first point sits on the y axis, the last on the right
//! edge, the smallest value on the x axis and the largest on the top edge.
//! A single point or a flat series never divides by zero.

use chrono::{Datelike, NaiveDate};

use crate::models::{same_id, EntityId, LabResult, LabTestType};

/// Label offset above each point marker.
const VALUE_LABEL_OFFSET: f64 = 15.0;
/// Date labels sit this far below the x axis, rotated.
const DATE_LABEL_OFFSET: f64 = 20.0;
const DATE_LABEL_ROTATION: f64 = -45.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margin: Margins,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            margin: Margins {
                top: 20.0,
                right: 30.0,
                bottom: 60.0,
                left: 60.0,
            },
        }
    }
}

impl ChartLayout {
    pub fn plot_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }
}

/// One measurement. `label` is the value as the user entered it.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
    /// Degrees, rotated about (x, y).
    pub rotation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Everything the renderer draws, in plot-area coordinates (translate by
/// the left/top margins).
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub layout: ChartLayout,
    pub points: Vec<PlotPoint>,
    /// SVG path data, `M x y L x y ...`.
    pub path: String,
    pub value_labels: Vec<Label>,
    pub date_labels: Vec<Label>,
    pub x_axis: Segment,
    pub y_axis: Segment,
}

/// Geometry for `series`, which must already be in date order. `None`
/// for an empty series ("Không có dữ liệu để hiển thị biểu đồ").
pub fn build(series: &[SeriesPoint], layout: ChartLayout) -> Option<ChartGeometry> {
    let summary = summarize(series)?;
    let plot_width = layout.plot_width();
    let plot_height = layout.plot_height();
    let range = match summary.max - summary.min {
        r if r == 0.0 => 1.0,
        r => r,
    };
    let steps = (series.len() - 1).max(1) as f64;

    let points: Vec<PlotPoint> = series
        .iter()
        .enumerate()
        .map(|(i, p)| PlotPoint {
            x: i as f64 / steps * plot_width,
            y: plot_height - (p.value - summary.min) / range * plot_height,
            value: p.value,
        })
        .collect();

    let path = points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{} {} {}", if i == 0 { "M" } else { "L" }, p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ");

    let value_labels = points
        .iter()
        .zip(series)
        .map(|(p, s)| Label {
            x: p.x,
            y: p.y - VALUE_LABEL_OFFSET,
            text: s.label.clone(),
            rotation: 0.0,
        })
        .collect();

    let date_labels = points
        .iter()
        .zip(series)
        .map(|(p, s)| Label {
            x: p.x,
            y: plot_height + DATE_LABEL_OFFSET,
            text: short_date(s.date),
            rotation: DATE_LABEL_ROTATION,
        })
        .collect();

    Some(ChartGeometry {
        layout,
        points,
        path,
        value_labels,
        date_labels,
        x_axis: Segment {
            x1: 0.0,
            y1: plot_height,
            x2: plot_width,
            y2: plot_height,
        },
        y_axis: Segment {
            x1: 0.0,
            y1: 0.0,
            x2: 0.0,
            y2: plot_height,
        },
    })
}

/// `d/m/yyyy`, as the vi-VN locale prints dates.
pub fn short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

pub fn summarize(series: &[SeriesPoint]) -> Option<SeriesSummary> {
    if series.is_empty() {
        return None;
    }
    let (min, max, sum) = series.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(min, max, sum), p| (min.min(p.value), max.max(p.value), sum + p.value),
    );
    Some(SeriesSummary {
        count: series.len(),
        min,
        max,
        mean: sum / series.len() as f64,
    })
}

/// Results of one test type, optionally for one patient, oldest first.
/// Undated results are dropped; unparseable values plot as 0.
pub fn lab_series(
    results: &[LabResult],
    test_type: LabTestType,
    patient: Option<&EntityId>,
) -> Vec<SeriesPoint> {
    let mut series: Vec<SeriesPoint> = results
        .iter()
        .filter(|r| r.test_type == test_type)
        .filter(|r| patient.map_or(true, |p| same_id(r.patient_id.as_ref(), Some(p))))
        .filter_map(|r| {
            Some(SeriesPoint {
                date: r.test_date?,
                value: r.numeric_value(),
                label: r.result.clone(),
            })
        })
        .collect();
    series.sort_by_key(|p| p.date);
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(day: u32, value: f64) -> SeriesPoint {
        SeriesPoint {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            value,
            label: value.to_string(),
        }
    }

    #[test]
    fn default_layout_plot_area() {
        let layout = ChartLayout::default();
        assert_eq!(layout.plot_width(), 710.0);
        assert_eq!(layout.plot_height(), 320.0);
    }

    #[test]
    fn empty_series_has_no_geometry() {
        assert!(build(&[], ChartLayout::default()).is_none());
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn scales_min_to_bottom_and_max_to_top() {
        let geometry = build(&[point(1, 200.0), point(2, 400.0), point(3, 300.0)], ChartLayout::default())
            .unwrap();
        let xs: Vec<f64> = geometry.points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = geometry.points.iter().map(|p| p.y).collect();
        assert_eq!(xs, vec![0.0, 355.0, 710.0]);
        assert_eq!(ys, vec![320.0, 0.0, 160.0]);
        assert_eq!(geometry.path, "M 0 320 L 355 0 L 710 160");
        assert_eq!(geometry.value_labels[1].y, -15.0);
        assert_eq!(geometry.date_labels[0].text, "1/5/2024");
        assert_eq!(geometry.date_labels[0].rotation, -45.0);
        assert_eq!(geometry.date_labels[0].y, 340.0);
    }

    #[test]
    fn single_point_and_flat_series_stay_finite() {
        let single = build(&[point(1, 50.0)], ChartLayout::default()).unwrap();
        assert_eq!((single.points[0].x, single.points[0].y), (0.0, 320.0));

        let flat = build(&[point(1, 7.0), point(2, 7.0)], ChartLayout::default()).unwrap();
        assert!(flat.points.iter().all(|p| p.x.is_finite() && p.y == 320.0));
    }

    #[test]
    fn summary_stats() {
        let summary = summarize(&[point(1, 2.0), point(2, 4.0), point(3, 9.0)]).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
        assert_eq!(summary.mean, 5.0);
    }

    #[test]
    fn lab_series_filters_sorts_and_parses() {
        let result = |patient: i64, test_type, date: &str, value: &str| LabResult {
            patient_id: Some(EntityId::from(patient)),
            test_type,
            test_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            result: value.into(),
            ..LabResult::default()
        };
        let results = vec![
            result(1, LabTestType::Cd4Count, "2024-03-01", "450"),
            result(1, LabTestType::Cd4Count, "2024-01-01", "<50"),
            result(2, LabTestType::Cd4Count, "2024-02-01", "600"),
            result(1, LabTestType::ViralLoad, "2024-02-01", "20"),
        ];

        let series = lab_series(&results, LabTestType::Cd4Count, Some(&EntityId::from(1)));
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.0, 450.0]);
        assert_eq!(series[0].label, "<50");

        assert_eq!(lab_series(&results, LabTestType::Cd4Count, None).len(), 3);
    }

    #[test]
    fn entered_units_and_non_numbers_still_plot_finite() {
        let result = |date: &str, value: &str| LabResult {
            patient_id: Some(EntityId::from(1)),
            test_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            result: value.into(),
            ..LabResult::default()
        };
        let results = vec![
            result("2024-01-01", "450 cells/μL"),
            result("2024-02-01", "NaN"),
            result("2024-03-01", "inf"),
            result("2024-04-01", "620"),
        ];

        let series = lab_series(&results, LabTestType::Cd4Count, None);
        let values: Vec<f64> = series.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![450.0, 0.0, 0.0, 620.0]);

        let geometry = build(&series, ChartLayout::default()).unwrap();
        assert!(geometry.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert!(!geometry.path.contains("NaN"));
        assert_eq!(geometry.value_labels[0].text, "450 cells/μL");
    }
}
