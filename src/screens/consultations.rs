//! Consultation requests, their status workflow and the chat thread.

use std::sync::Arc;

use super::{
    fetch_owned, own_patient_id, report_failure, require, text_matches, ResourceFamily,
    ResourceList,
};
use crate::api::{ApiClient, ApiError};
use crate::core_state::CoreState;
use crate::messages::{self, FamilyMessages};
use crate::models::{
    same_id, ChatMessage, Consultation, ConsultationPriority, ConsultationStatus, EntityId, User,
};
use crate::policy::{can, Action, Subject};

pub struct ConsultationsFamily;

#[derive(Debug, Clone, Default)]
pub struct ConsultationFilter {
    pub status: Option<ConsultationStatus>,
    pub priority: Option<ConsultationPriority>,
}

impl ResourceFamily for ConsultationsFamily {
    type Item = Consultation;
    type Filter = ConsultationFilter;

    const SUBJECT: Subject = Subject::Consultations;
    const MESSAGES: FamilyMessages = messages::CONSULTATIONS;

    async fn fetch(api: &ApiClient, user: Option<&User>) -> Result<Vec<Consultation>, ApiError> {
        fetch_owned(api, user).await
    }

    fn matches(item: &Consultation, search: &str, filter: &ConsultationFilter) -> bool {
        filter.status.map_or(true, |s| s == item.status)
            && filter.priority.map_or(true, |p| p == item.priority)
            && text_matches(
                search,
                &[
                    Some(&item.subject),
                    item.description.as_deref(),
                    item.patient_name.as_deref(),
                    item.doctor_name.as_deref(),
                ],
            )
    }

    fn draft(user: Option<&User>) -> Consultation {
        Consultation {
            patient_id: own_patient_id(user),
            priority: ConsultationPriority::Medium,
            ..Consultation::default()
        }
    }

    fn validate(draft: &Consultation) -> Result<(), String> {
        if draft.patient_id.is_none() {
            return Err(messages::SELECT_PATIENT.to_string());
        }
        require(&draft.subject)
    }

    /// A patient always files for themselves, whatever the draft says.
    fn prepare(draft: &Consultation, user: Option<&User>) -> Consultation {
        let mut payload = draft.clone();
        if let Some(id) = own_patient_id(user) {
            payload.patient_id = Some(id);
        }
        payload
    }
}

pub fn status_label(status: ConsultationStatus) -> &'static str {
    match status {
        ConsultationStatus::Pending => "Chờ xử lý",
        ConsultationStatus::InProgress | ConsultationStatus::Active => "Đang tư vấn",
        ConsultationStatus::Completed => "Hoàn thành",
        ConsultationStatus::Cancelled => "Đã hủy",
        ConsultationStatus::Unknown => messages::UNKNOWN_VALUE,
    }
}

pub fn priority_label(priority: ConsultationPriority) -> &'static str {
    match priority {
        ConsultationPriority::Low => "Thấp",
        ConsultationPriority::Normal | ConsultationPriority::Medium => "Trung bình",
        ConsultationPriority::High => "Cao",
        ConsultationPriority::Urgent => "Khẩn cấp",
        ConsultationPriority::Unknown => messages::UNKNOWN_VALUE,
    }
}

// ── Workflow ────────────────────────────────────────────────

impl ResourceList<ConsultationsFamily> {
    /// Consultations assigned to one doctor, straight from the backend.
    pub async fn assigned_to(&self, doctor_id: &EntityId) -> Vec<Consultation> {
        let consultations = self.core().api().resource::<Consultation>();
        self.scoped_query(consultations.by_doctor(doctor_id)).await
    }

    /// Move a consultation to `status`, then refetch.
    pub async fn update_status(&mut self, id: &EntityId, status: ConsultationStatus) -> bool {
        if !self.allows(Action::Edit) {
            self.core().notifier().error(messages::FORBIDDEN);
            return false;
        }
        let result = self
            .core()
            .api()
            .resource::<Consultation>()
            .update_status(id, status)
            .await;
        self.after_command(result, messages::STATUS_UPDATED, messages::STATUS_UPDATE_FAILED)
            .await
    }

    /// Hand a consultation to a doctor, then refetch.
    pub async fn assign_doctor(&mut self, id: &EntityId, doctor_id: &EntityId) -> bool {
        if !self.allows(Action::Assign) {
            self.core().notifier().error(messages::FORBIDDEN);
            return false;
        }
        let result = self
            .core()
            .api()
            .resource::<Consultation>()
            .assign_doctor(id, doctor_id)
            .await;
        self.after_command(result, messages::DOCTOR_ASSIGNED, messages::DOCTOR_ASSIGN_FAILED)
            .await
    }

    async fn after_command(
        &mut self,
        result: Result<(), ApiError>,
        done: &str,
        failed: &str,
    ) -> bool {
        match result {
            Ok(()) => {
                self.core().notifier().success(done);
                self.refresh().await;
                true
            }
            Err(e) => {
                report_failure(self.core(), &e, failed);
                false
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Chat
// ═══════════════════════════════════════════════════════════

/// Message thread of one consultation. Sending re-reads the thread.
pub struct ConsultationChat {
    core: Arc<CoreState>,
    consultation_id: EntityId,
    messages: Vec<ChatMessage>,
    draft: String,
}

impl ConsultationChat {
    pub async fn open(core: Arc<CoreState>, consultation_id: EntityId) -> Self {
        let mut chat = Self {
            core,
            consultation_id,
            messages: Vec::new(),
            draft: String::new(),
        };
        chat.reload().await;
        chat
    }

    pub fn consultation_id(&self) -> &EntityId {
        &self.consultation_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    /// Whether a message was sent by the signed-in user.
    pub fn is_own(&self, message: &ChatMessage) -> bool {
        let user = self.core.current_user();
        same_id(
            message.sender_id.as_ref(),
            user.as_ref().and_then(|u| u.id.as_ref()),
        )
    }

    pub async fn reload(&mut self) -> bool {
        match self
            .core
            .api()
            .resource::<Consultation>()
            .messages(&self.consultation_id)
            .await
        {
            Ok(messages) => {
                self.messages = messages;
                true
            }
            Err(e) => {
                report_failure(&self.core, &e, messages::MESSAGES_LOAD_FAILED);
                false
            }
        }
    }

    /// Post the draft. Blank drafts are ignored; the draft is kept when
    /// sending fails.
    pub async fn send(&mut self) -> bool {
        let content = self.draft.trim().to_string();
        if content.is_empty() {
            return false;
        }
        let message = ChatMessage {
            id: None,
            consultation_id: Some(self.consultation_id.clone()),
            sender_id: self.core.current_user().and_then(|u| u.id),
            sender_name: None,
            content,
            sent_at: None,
        };
        let sent = self
            .core
            .api()
            .resource::<Consultation>()
            .send_message(&self.consultation_id, &message)
            .await;
        match sent {
            Ok(_) => {
                self.draft.clear();
                self.reload().await;
                true
            }
            Err(e) => {
                report_failure(&self.core, &e, messages::MESSAGE_SEND_FAILED);
                false
            }
        }
    }
}

/// Whether `user` may post into a consultation thread.
pub fn can_chat(user: Option<&User>, consultation: &Consultation) -> bool {
    consultation.status != ConsultationStatus::Cancelled
        && consultation.status != ConsultationStatus::Completed
        && can(user, Action::View, Subject::Consultations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_state::testing::{fixture, user};
    use crate::models::Role;
    use serde_json::json;

    fn seed() -> Vec<serde_json::Value> {
        vec![
            json!({"patientId": 7, "subject": "Buồn nôn", "consultationType": "CHAT",
                   "priority": "HIGH", "status": "PENDING"}),
            json!({"patientId": 8, "subject": "Tái khám", "consultationType": "GENERAL",
                   "priority": "LOW", "status": "COMPLETED"}),
        ]
    }

    #[tokio::test]
    async fn patient_request_is_stamped_with_own_id() {
        let fx = fixture(Some(user(Role::Patient, 7)), true).await;
        let mut list = ResourceList::<ConsultationsFamily>::mount(fx.core.clone()).await;
        let form = list.open_create().unwrap();
        assert_eq!(form.draft.patient_id, Some(EntityId::from(7)));
        form.draft.patient_id = Some(EntityId::from(99));
        form.draft.subject = "Hỏi về tác dụng phụ".into();

        list.submit_form().await.unwrap();

        let stored = fx.backend.items("consultations");
        assert_eq!(stored[0]["patientId"], 7);
        assert_eq!(stored[0]["priority"], "MEDIUM");
        assert_eq!(list.items().len(), 1);
    }

    #[tokio::test]
    async fn status_update_refetches() {
        let fx = fixture(Some(user(Role::Doctor, 2)), true).await;
        fx.backend.seed("consultations", seed());
        let mut list = ResourceList::<ConsultationsFamily>::mount(fx.core.clone()).await;
        let id = list.items()[0].id.clone().unwrap();

        assert!(list.update_status(&id, ConsultationStatus::InProgress).await);

        assert_eq!(list.items()[0].status, ConsultationStatus::InProgress);
        assert_eq!(fx.toasts.last().unwrap().message, messages::STATUS_UPDATED);
    }

    #[tokio::test]
    async fn patient_cannot_assign_doctor() {
        let fx = fixture(Some(user(Role::Patient, 7)), true).await;
        fx.backend.seed("consultations", seed());
        let mut list = ResourceList::<ConsultationsFamily>::mount(fx.core.clone()).await;
        let id = list.items()[0].id.clone().unwrap();

        assert!(!list.assign_doctor(&id, &EntityId::from(2)).await);
        assert!(fx.backend.requests_to(&format!("consultations/{id}/assign")).is_empty());
    }

    #[tokio::test]
    async fn doctor_assignment_persists() {
        let fx = fixture(Some(user(Role::Admin, 1)), true).await;
        fx.backend.seed("consultations", seed());
        let mut list = ResourceList::<ConsultationsFamily>::mount(fx.core.clone()).await;
        let id = list.items()[0].id.clone().unwrap();

        assert!(list.assign_doctor(&id, &EntityId::from(4)).await);
        assert_eq!(list.items()[0].doctor_id, Some(EntityId::from(4)));
    }

    #[tokio::test]
    async fn chat_send_clears_draft_and_reloads() {
        let fx = fixture(Some(user(Role::Patient, 7)), true).await;
        let mut chat = ConsultationChat::open(fx.core.clone(), EntityId::from(100)).await;
        assert!(chat.messages().is_empty());

        chat.set_draft("   ");
        assert!(!chat.send().await);

        chat.set_draft("Em bị sốt nhẹ");
        assert!(chat.send().await);
        assert_eq!(chat.draft(), "");
        assert_eq!(chat.messages().len(), 1);
        assert!(chat.is_own(&chat.messages()[0]));
    }

    #[tokio::test]
    async fn failed_send_keeps_draft() {
        let fx = fixture(Some(user(Role::Patient, 7)), true).await;
        let mut chat = ConsultationChat::open(fx.core.clone(), EntityId::from(100)).await;
        fx.backend.fail("consultations");
        chat.set_draft("Xin chào");

        assert!(!chat.send().await);
        assert_eq!(chat.draft(), "Xin chào");
        assert_eq!(fx.toasts.last().unwrap().message, messages::MESSAGE_SEND_FAILED);
    }

    #[test]
    fn closed_consultation_has_no_chat() {
        let doctor = user(Role::Doctor, 2);
        let mut c = Consultation::default();
        assert!(can_chat(Some(&doctor), &c));
        c.status = ConsultationStatus::Completed;
        assert!(!can_chat(Some(&doctor), &c));
        assert!(!can_chat(None, &Consultation::default()));
    }

    #[tokio::test]
    async fn assigned_view_only_holds_that_doctor() {
        let fx = fixture(Some(user(Role::Doctor, 2)), true).await;
        let mut rows = seed();
        rows[0]["doctorId"] = json!(2);
        rows[1]["doctorId"] = json!(4);
        fx.backend.seed("consultations", rows);
        let list = ResourceList::<ConsultationsFamily>::mount(fx.core.clone()).await;

        let mine = list.assigned_to(&EntityId::from(2)).await;

        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].subject, "Buồn nôn");
        assert_eq!(list.items().len(), 2);
        assert_eq!(fx.backend.requests_to("consultations/doctor/2").len(), 1);
    }
}
