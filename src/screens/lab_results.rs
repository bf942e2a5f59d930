//! Lab results list, form and the trend chart beside it.

use super::{
    fetch_owned, own_patient_id, require, require_id, text_matches, ResourceFamily, ResourceList,
};
use crate::api::{ApiClient, ApiError};
use crate::messages::{self, FamilyMessages};
use crate::models::{same_id, EntityId, LabResult, LabTestType, User};
use crate::policy::Subject;
use crate::views::chart::{self, ChartGeometry, ChartLayout, SeriesSummary};

pub struct LabResultsFamily;

#[derive(Debug, Clone, Default)]
pub struct LabFilter {
    pub patient_id: Option<EntityId>,
    pub test_type: Option<LabTestType>,
}

impl ResourceFamily for LabResultsFamily {
    type Item = LabResult;
    type Filter = LabFilter;

    const SUBJECT: Subject = Subject::LabResults;
    const MESSAGES: FamilyMessages = messages::LAB_RESULTS;

    async fn fetch(api: &ApiClient, user: Option<&User>) -> Result<Vec<LabResult>, ApiError> {
        fetch_owned(api, user).await
    }

    fn matches(item: &LabResult, search: &str, filter: &LabFilter) -> bool {
        let patient_ok = filter
            .patient_id
            .as_ref()
            .map_or(true, |p| same_id(item.patient_id.as_ref(), Some(p)));
        let type_ok = filter.test_type.map_or(true, |t| t == item.test_type);
        patient_ok
            && type_ok
            && text_matches(
                search,
                &[
                    item.patient_name.as_deref(),
                    Some(item.test_type.as_str()),
                    Some(&item.result),
                    item.notes.as_deref(),
                ],
            )
    }

    fn draft(_user: Option<&User>) -> LabResult {
        LabResult {
            test_date: Some(chrono::Local::now().date_naive()),
            ..LabResult::default()
        }
    }

    fn validate(draft: &LabResult) -> Result<(), String> {
        require_id(draft.patient_id.as_ref())?;
        require(&draft.result)
    }
}

impl ResourceList<LabResultsFamily> {
    /// Results of one test type from the backend. A patient only gets
    /// their own.
    pub async fn of_type(&self, test_type: LabTestType) -> Vec<LabResult> {
        let labs = self.core().api().resource::<LabResult>();
        let mut results = self.scoped_query(labs.by_test_type(test_type)).await;
        if let Some(own) = own_patient_id(self.core().current_user().as_ref()) {
            results.retain(|r| same_id(r.patient_id.as_ref(), Some(&own)));
        }
        results
    }
}

/// Chart panel for the current filter. Without a test type filter the
/// chart follows CD4 counts.
pub struct LabTrend {
    pub test_type: LabTestType,
    pub geometry: Option<ChartGeometry>,
    pub summary: Option<SeriesSummary>,
}

pub fn trend(results: &[LabResult], filter: &LabFilter, layout: ChartLayout) -> LabTrend {
    let test_type = filter.test_type.unwrap_or(LabTestType::Cd4Count);
    let series = chart::lab_series(results, test_type, filter.patient_id.as_ref());
    LabTrend {
        test_type,
        geometry: chart::build(&series, layout),
        summary: chart::summarize(&series),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_state::testing::{fixture, user};
    use crate::models::Role;
    use crate::screens::ResourceList;
    use chrono::NaiveDate;
    use serde_json::json;

    fn lab(patient: i64, test_type: LabTestType, day: u32, result: &str) -> LabResult {
        let mut lab = LabResult::default();
        lab.patient_id = Some(EntityId::from(patient));
        lab.apply_test_type(test_type);
        lab.test_date = NaiveDate::from_ymd_opt(2024, 3, day);
        lab.result = result.into();
        lab
    }

    #[test]
    fn filters_by_patient_and_type() {
        let items = [
            lab(1, LabTestType::Cd4Count, 1, "350"),
            lab(1, LabTestType::ViralLoad, 2, "<50"),
            lab(2, LabTestType::Cd4Count, 3, "500"),
        ];
        let filter = LabFilter {
            patient_id: Some(EntityId::from("1")),
            test_type: Some(LabTestType::Cd4Count),
        };
        let hits: Vec<_> = items
            .iter()
            .filter(|l| LabResultsFamily::matches(l, "", &filter))
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].result, "350");
    }

    #[test]
    fn trend_defaults_to_cd4() {
        let items = [
            lab(1, LabTestType::Cd4Count, 9, "420"),
            lab(1, LabTestType::Cd4Count, 1, "350"),
            lab(1, LabTestType::ViralLoad, 2, "1200"),
        ];
        let trend = trend(&items, &LabFilter::default(), ChartLayout::default());
        assert_eq!(trend.test_type, LabTestType::Cd4Count);
        let summary = trend.summary.unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.min, 350.0);
        assert_eq!(trend.geometry.unwrap().points.len(), 2);
    }

    #[test]
    fn empty_trend_has_no_geometry() {
        let trend = trend(&[], &LabFilter::default(), ChartLayout::default());
        assert!(trend.geometry.is_none());
        assert!(trend.summary.is_none());
    }

    #[tokio::test]
    async fn patient_sees_only_own_results() {
        let fx = fixture(Some(user(Role::Patient, 7)), true).await;
        fx.backend.seed(
            "lab-results",
            vec![
                json!({"patientId": 7, "testType": "CD4_COUNT", "result": "410"}),
                json!({"patientId": 8, "testType": "CD4_COUNT", "result": "90"}),
            ],
        );
        let list = ResourceList::<LabResultsFamily>::mount(fx.core.clone()).await;

        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].result, "410");
        assert_eq!(fx.backend.requests_to("lab-results/patient/7").len(), 1);
        assert!(!list.can_create());
    }

    #[tokio::test]
    async fn result_is_required() {
        let fx = fixture(Some(user(Role::Doctor, 2)), true).await;
        let mut list = ResourceList::<LabResultsFamily>::mount(fx.core.clone()).await;
        let form = list.open_create().unwrap();
        form.draft.patient_id = Some(EntityId::from(7));
        form.draft.apply_test_type(LabTestType::ViralLoad);

        assert!(list.submit_form().await.is_err());
        assert!(fx
            .backend
            .requests_to("lab-results")
            .iter()
            .all(|r| r.method != axum::http::Method::POST));
    }

    #[tokio::test]
    async fn results_by_test_type_stay_with_the_patient() {
        let fx = fixture(Some(user(Role::Patient, 7)), true).await;
        fx.backend.seed(
            "lab-results",
            vec![
                json!({"patientId": 7, "testType": "VIRAL_LOAD", "testDate": "2024-01-01", "result": "40"}),
                json!({"patientId": 8, "testType": "VIRAL_LOAD", "testDate": "2024-01-02", "result": "900"}),
                json!({"patientId": 7, "testType": "CD4_COUNT", "testDate": "2024-01-03", "result": "500"}),
            ],
        );
        let list = ResourceList::<LabResultsFamily>::mount(fx.core.clone()).await;

        let viral = list.of_type(LabTestType::ViralLoad).await;

        assert_eq!(viral.len(), 1);
        assert_eq!(viral[0].result, "40");
        assert_eq!(fx.backend.requests_to("lab-results/test-type/VIRAL_LOAD").len(), 1);
    }
}
