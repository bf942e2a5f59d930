//! Notification center: the user's inbox, refreshed on a fixed cadence.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;

use super::{report_failure, text_matches, ResourceFamily, ResourceList};
use crate::api::{ApiClient, ApiError};
use crate::config::NOTIFICATION_POLL_INTERVAL;
use crate::core_state::CoreState;
use crate::messages::{self, FamilyMessages};
use crate::models::{EntityId, Notification, NotificationType, User};
use crate::policy::Subject;

pub struct NotificationsFamily;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadFilter {
    #[default]
    All,
    Unread,
    Read,
}

impl ResourceFamily for NotificationsFamily {
    type Item = Notification;
    type Filter = ReadFilter;

    const SUBJECT: Subject = Subject::Notifications;
    const MESSAGES: FamilyMessages = messages::NOTIFICATIONS;

    async fn fetch(api: &ApiClient, user: Option<&User>) -> Result<Vec<Notification>, ApiError> {
        match user.and_then(|u| u.id.as_ref()) {
            Some(id) => api.resource::<Notification>().by_user(id).await,
            None => Ok(Vec::new()),
        }
    }

    fn matches(item: &Notification, search: &str, filter: &ReadFilter) -> bool {
        let read_ok = match filter {
            ReadFilter::All => true,
            ReadFilter::Unread => !item.is_read,
            ReadFilter::Read => item.is_read,
        };
        read_ok && text_matches(search, &[Some(&item.title), Some(&item.message)])
    }

    fn draft(user: Option<&User>) -> Notification {
        Notification {
            id: None,
            user_id: user.and_then(|u| u.id.clone()),
            kind: NotificationType::System,
            title: String::new(),
            message: String::new(),
            is_read: false,
            action_url: None,
            created_at: None,
        }
    }
}

impl ResourceList<NotificationsFamily> {
    pub fn unread_count(&self) -> usize {
        self.items().iter().filter(|n| !n.is_read).count()
    }

    /// Mark one notification read. Only failures are toasted.
    pub async fn mark_read(&mut self, id: &EntityId) -> bool {
        let core = self.core().clone();
        match core.api().resource::<Notification>().mark_read(id).await {
            Ok(()) => {
                self.refresh().await;
                true
            }
            Err(e) => {
                report_failure(&core, &e, messages::MARK_READ_FAILED);
                false
            }
        }
    }

    pub async fn mark_all_read(&mut self) -> bool {
        let core = self.core().clone();
        match core.api().resource::<Notification>().mark_all_read().await {
            Ok(()) => {
                core.notifier().success(messages::MARK_ALL_READ);
                self.refresh().await;
                true
            }
            Err(e) => {
                report_failure(&core, &e, messages::MARK_ALL_READ_FAILED);
                false
            }
        }
    }
}

pub fn kind_label(kind: NotificationType) -> &'static str {
    match kind {
        NotificationType::AppointmentReminder => "Nhắc lịch hẹn",
        NotificationType::MedicationReminder => "Nhắc uống thuốc",
        NotificationType::LabResult => "Kết quả xét nghiệm",
        NotificationType::System => "Hệ thống",
        NotificationType::TreatmentUpdate => "Cập nhật điều trị",
        NotificationType::Unknown => messages::UNKNOWN_VALUE,
    }
}

// ═══════════════════════════════════════════════════════════
// Polling
// ═══════════════════════════════════════════════════════════

/// Inbox plus the background refresher. The refresher stops when the
/// center is stopped or dropped.
pub struct NotificationCenter {
    list: Arc<Mutex<ResourceList<NotificationsFamily>>>,
    poller: Option<JoinHandle<()>>,
}

impl NotificationCenter {
    /// Load the inbox and refresh it every 30 seconds.
    pub async fn open(core: Arc<CoreState>) -> Self {
        Self::open_with_interval(core, NOTIFICATION_POLL_INTERVAL).await
    }

    pub async fn open_with_interval(core: Arc<CoreState>, period: Duration) -> Self {
        let list = Arc::new(Mutex::new(ResourceList::mount(core).await));
        let shared = list.clone();
        let poller = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await; // first tick is immediate
            loop {
                ticker.tick().await;
                tracing::debug!("Polling notifications");
                shared.lock().await.refresh().await;
            }
        });
        Self {
            list,
            poller: Some(poller),
        }
    }

    pub async fn list(&self) -> MutexGuard<'_, ResourceList<NotificationsFamily>> {
        self.list.lock().await
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.poller.take() {
            handle.abort();
            tracing::debug!("Notification polling stopped");
        }
    }
}

impl Drop for NotificationCenter {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_state::testing::{fixture, user};
    use crate::models::Role;
    use serde_json::json;

    fn seed() -> Vec<serde_json::Value> {
        vec![
            json!({"userId": 7, "type": "LAB_RESULT", "title": "Có kết quả CD4", "isRead": false}),
            json!({"userId": 7, "type": "SYSTEM", "title": "Bảo trì", "isRead": true}),
            json!({"userId": 8, "type": "SYSTEM", "title": "Khác", "isRead": false}),
        ]
    }

    #[tokio::test]
    async fn inbox_is_per_user_with_read_filter() {
        let fx = fixture(Some(user(Role::Patient, 7)), true).await;
        fx.backend.seed("notifications", seed());
        let mut list = ResourceList::<NotificationsFamily>::mount(fx.core.clone()).await;

        assert_eq!(list.items().len(), 2);
        assert_eq!(list.unread_count(), 1);
        list.filter = ReadFilter::Read;
        assert_eq!(list.visible()[0].title, "Bảo trì");
    }

    #[tokio::test]
    async fn mark_read_and_mark_all() {
        let fx = fixture(Some(user(Role::Patient, 7)), true).await;
        fx.backend.seed("notifications", seed());
        let mut list = ResourceList::<NotificationsFamily>::mount(fx.core.clone()).await;
        let id = list.items()[0].id.clone().unwrap();

        assert!(list.mark_read(&id).await);
        assert_eq!(list.unread_count(), 0);
        assert!(fx.toasts.toasts().is_empty());

        assert!(list.mark_all_read().await);
        assert_eq!(fx.toasts.last().unwrap().message, messages::MARK_ALL_READ);
    }

    #[tokio::test]
    async fn poller_refetches_until_dropped() {
        let fx = fixture(Some(user(Role::Patient, 7)), true).await;
        let center =
            NotificationCenter::open_with_interval(fx.core.clone(), Duration::from_millis(40))
                .await;
        assert!(center.is_polling());

        tokio::time::sleep(Duration::from_millis(150)).await;
        let polled = fx.backend.requests_to("notifications/user/7").len();
        assert!(polled >= 2, "expected repeated fetches, saw {polled}");

        drop(center);
        tokio::time::sleep(Duration::from_millis(20)).await;
        let after_drop = fx.backend.requests_to("notifications/user/7").len();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(fx.backend.requests_to("notifications/user/7").len(), after_drop);
    }

    #[tokio::test]
    async fn stop_cancels_polling() {
        let fx = fixture(Some(user(Role::Doctor, 2)), true).await;
        let mut center =
            NotificationCenter::open_with_interval(fx.core.clone(), Duration::from_secs(60)).await;
        center.stop();
        assert!(!center.is_polling());
        assert!(center.list().await.items().is_empty());
    }
}
