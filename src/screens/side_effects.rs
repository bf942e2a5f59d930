//! Side-effect tracker: reports filed by patients, reviewed by staff.

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};

use super::{
    fetch_owned, own_patient_id, require, require_id, text_matches, ResourceFamily, ResourceList,
};
use crate::api::{ApiClient, ApiError};
use crate::messages::{self, FamilyMessages};
use crate::models::{EntityId, SideEffect, SideEffectSeverity, User};
use crate::policy::Subject;

pub const RECENT_DAYS: i64 = 7;

pub struct SideEffectsFamily;

#[derive(Debug, Clone, Default)]
pub struct SideEffectFilter {
    pub severity: Option<SideEffectSeverity>,
}

impl ResourceFamily for SideEffectsFamily {
    type Item = SideEffect;
    type Filter = SideEffectFilter;

    const SUBJECT: Subject = Subject::SideEffects;
    const MESSAGES: FamilyMessages = messages::SIDE_EFFECTS;

    async fn fetch(api: &ApiClient, user: Option<&User>) -> Result<Vec<SideEffect>, ApiError> {
        fetch_owned(api, user).await
    }

    fn matches(item: &SideEffect, search: &str, filter: &SideEffectFilter) -> bool {
        filter.severity.map_or(true, |s| s == item.severity)
            && text_matches(
                search,
                &[
                    Some(&item.effect_name),
                    item.medication_name.as_deref(),
                    item.description.as_deref(),
                ],
            )
    }

    fn draft(user: Option<&User>) -> SideEffect {
        SideEffect {
            patient_id: own_patient_id(user),
            occurred_at: Some(chrono::Local::now().naive_local()),
            ..SideEffect::default()
        }
    }

    fn validate(draft: &SideEffect) -> Result<(), String> {
        require_id(draft.patient_id.as_ref())?;
        require_id(draft.medication_id.as_ref())?;
        require(&draft.effect_name)
    }

    fn prepare(draft: &SideEffect, user: Option<&User>) -> SideEffect {
        let mut payload = draft.clone();
        if let Some(id) = own_patient_id(user) {
            payload.patient_id = Some(id);
        }
        payload
    }
}

/// Summary cards above the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideEffectCounts {
    pub total: usize,
    pub recent: usize,
    pub serious: usize,
}

/// `recent` counts reports from the last [`RECENT_DAYS`] days; `serious`
/// counts SEVERE and CRITICAL ones.
pub fn counts(items: &[SideEffect], now: NaiveDateTime) -> SideEffectCounts {
    let since = now - Duration::days(RECENT_DAYS);
    SideEffectCounts {
        total: items.len(),
        recent: items
            .iter()
            .filter(|s| s.occurred_at.is_some_and(|at| at >= since))
            .count(),
        serious: items.iter().filter(|s| s.severity.is_serious()).count(),
    }
}

impl ResourceList<SideEffectsFamily> {
    /// Every report filed against one medication, for staff review.
    pub async fn reported_for(&self, medication_id: &EntityId) -> Vec<SideEffect> {
        let effects = self.core().api().resource::<SideEffect>();
        self.scoped_query(effects.by_medication(medication_id)).await
    }
}

/// Top `n` effect names by report count. Ties keep the order in which the
/// names first appear.
pub fn most_common(items: &[SideEffect], n: usize) -> Vec<(String, usize)> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut tally: Vec<(String, usize)> = Vec::new();
    for item in items {
        match seen.get(item.effect_name.as_str()) {
            Some(&slot) => tally[slot].1 += 1,
            None => {
                seen.insert(&item.effect_name, tally.len());
                tally.push((item.effect_name.clone(), 1));
            }
        }
    }
    tally.sort_by(|a, b| b.1.cmp(&a.1));
    tally.truncate(n);
    tally
}

pub fn severity_label(severity: SideEffectSeverity) -> &'static str {
    match severity {
        SideEffectSeverity::Mild => "Nhẹ",
        SideEffectSeverity::Moderate => "Trung bình",
        SideEffectSeverity::Severe => "Nặng",
        SideEffectSeverity::Critical => "Nghiêm trọng",
        SideEffectSeverity::Unknown => messages::UNKNOWN_VALUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_state::testing::{fixture, user};
    use crate::models::{EntityId, Role};
    use crate::screens::{DeleteOutcome, ResourceList};
    use serde_json::json;

    fn effect(severity: SideEffectSeverity, at: &str) -> SideEffect {
        SideEffect {
            effect_name: "Buồn nôn".into(),
            severity,
            occurred_at: NaiveDateTime::parse_from_str(at, "%Y-%m-%dT%H:%M").ok(),
            ..SideEffect::default()
        }
    }

    #[test]
    fn summary_counts() {
        let now = NaiveDateTime::parse_from_str("2024-06-10T12:00", "%Y-%m-%dT%H:%M").unwrap();
        let items = [
            effect(SideEffectSeverity::Mild, "2024-06-09T08:00"),
            effect(SideEffectSeverity::Critical, "2024-06-04T08:00"),
            effect(SideEffectSeverity::Severe, "2024-05-01T08:00"),
            SideEffect::default(),
        ];
        assert_eq!(
            counts(&items, now),
            SideEffectCounts {
                total: 4,
                recent: 2,
                serious: 2
            }
        );
    }

    #[test]
    fn most_common_ranks_names_and_keeps_first_seen_on_ties() {
        let named = |name: &str| SideEffect {
            effect_name: name.into(),
            ..SideEffect::default()
        };
        let items: Vec<SideEffect> = [
            "Buồn nôn", "Chóng mặt", "Mệt mỏi", "Chóng mặt", "Phát ban", "Mất ngủ", "Đau đầu",
            "Chóng mặt", "Buồn nôn",
        ]
        .iter()
        .map(|n| named(n))
        .collect();

        let top = most_common(&items, 5);

        assert_eq!(
            top,
            vec![
                ("Chóng mặt".to_string(), 3),
                ("Buồn nôn".to_string(), 2),
                ("Mệt mỏi".to_string(), 1),
                ("Phát ban".to_string(), 1),
                ("Mất ngủ".to_string(), 1),
            ]
        );
        assert!(most_common(&[], 5).is_empty());
        assert_eq!(most_common(&items, 1).len(), 1);
    }

    #[tokio::test]
    async fn patient_reports_and_removes_own_effect() {
        let fx = fixture(Some(user(Role::Patient, 7)), true).await;
        let mut list = ResourceList::<SideEffectsFamily>::mount(fx.core.clone()).await;
        let form = list.open_create().unwrap();
        form.draft.medication_id = Some(EntityId::from(11));
        form.draft.effect_name = "Chóng mặt".into();
        form.draft.severity = SideEffectSeverity::Moderate;
        list.submit_form().await.unwrap();

        assert_eq!(list.items().len(), 1);
        assert_eq!(fx.backend.items("side-effects")[0]["patientId"], 7);

        let id = list.items()[0].id.clone().unwrap();
        assert_eq!(list.delete(&id).await, DeleteOutcome::Deleted);
        assert!(list.items().is_empty());
    }

    #[tokio::test]
    async fn severity_filter() {
        let fx = fixture(Some(user(Role::Doctor, 2)), true).await;
        fx.backend.seed(
            "side-effects",
            vec![
                json!({"patientId": 7, "effectName": "Phát ban", "severity": "SEVERE"}),
                json!({"patientId": 8, "effectName": "Mệt mỏi", "severity": "MILD"}),
            ],
        );
        let mut list = ResourceList::<SideEffectsFamily>::mount(fx.core.clone()).await;
        list.filter.severity = Some(SideEffectSeverity::Severe);
        assert_eq!(list.visible().len(), 1);
        assert_eq!(list.visible()[0].effect_name, "Phát ban");
    }

    #[tokio::test]
    async fn reports_for_one_medication() {
        let fx = fixture(Some(user(Role::Doctor, 2)), true).await;
        fx.backend.seed(
            "side-effects",
            vec![
                json!({"patientId": 7, "medicationId": 11, "effectName": "Chóng mặt", "severity": "MILD"}),
                json!({"patientId": 8, "medicationId": 12, "effectName": "Phát ban", "severity": "SEVERE"}),
            ],
        );
        let list = ResourceList::<SideEffectsFamily>::mount(fx.core.clone()).await;

        let reports = list.reported_for(&EntityId::from(11)).await;
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].effect_name, "Chóng mặt");

        fx.backend.fail("side-effects/medication");
        assert!(list.reported_for(&EntityId::from(11)).await.is_empty());
        assert_eq!(list.items().len(), 2);
        assert_eq!(fx.toasts.last().unwrap().message, messages::SIDE_EFFECTS.load_failed);
    }
}
