//! Shell chrome around the active screen: role-filtered sidebar and header.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::LOGIN_PATH;
use crate::feedback::Confirmer;
use crate::messages;
use crate::models::User;
use crate::policy::{self, can, Action, Subject};
use crate::router::Route;
use crate::session::SessionService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub route: Route,
    pub icon: &'static str,
    pub label: &'static str,
}

impl MenuItem {
    pub fn path(&self) -> String {
        self.route.path()
    }
}

const MENU: &[(Route, &str, &str)] = &[
    (Route::Dashboard, "📊", "Dashboard"),
    (Route::Patients, "👥", "Bệnh nhân"),
    (Route::Appointments, "📅", "Lịch hẹn"),
    (Route::Prescriptions, "💊", "Đơn thuốc"),
    (Route::LabResults, "🧪", "Kết quả xét nghiệm"),
    (Route::Medications, "💉", "Thuốc"),
    (Route::ArvRegimens, "🧬", "Phác đồ ARV"),
    (Route::Consultations, "💬", "Tư vấn"),
    (Route::VitalSigns, "❤️", "Dấu hiệu sinh tồn"),
    (Route::SideEffects, "⚠️", "Tác dụng phụ"),
    (Route::TreatmentPlans, "📋", "Kế hoạch điều trị"),
    (Route::Reminders, "⏰", "Nhắc nhở uống thuốc"),
    (Route::Adherence, "✅", "Tuân thủ điều trị"),
    (Route::Education, "📚", "Giáo dục sức khỏe"),
    (Route::Notifications, "🔔", "Thông báo"),
    (Route::Reports, "📈", "Báo cáo"),
    (Route::AdminUsers, "👤", "Quản lý người dùng"),
    (Route::AdminPanel, "⚙️", "Quản trị hệ thống"),
];

// ═══════════════════════════════════════════════════════════
// Sidebar
// ═══════════════════════════════════════════════════════════

/// Navigation menu. Collapse state is local to the instance and never
/// persisted.
#[derive(Debug, Default)]
pub struct Sidebar {
    collapsed: AtomicBool,
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items the user may open, in menu order.
    pub fn items(&self, user: Option<&User>) -> Vec<MenuItem> {
        MENU.iter()
            .filter(|(route, _, _)| {
                route
                    .subject()
                    .is_some_and(|subject| can(user, Action::View, subject))
            })
            .map(|(route, icon, label)| MenuItem {
                route: route.clone(),
                icon,
                label,
            })
            .collect()
    }

    /// Whether `item` is the entry for `current_path`.
    pub fn is_active(item: &MenuItem, current_path: &str) -> bool {
        Route::parse(current_path).is_some_and(|route| {
            route == item.route
                || matches!((&route, &item.route), (Route::PatientDetail(_), Route::Patients))
        })
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed.load(Ordering::Relaxed)
    }

    pub fn toggle(&self) -> bool {
        !self.collapsed.fetch_xor(true, Ordering::Relaxed)
    }
}

// ═══════════════════════════════════════════════════════════
// Header
// ═══════════════════════════════════════════════════════════

pub struct Header {
    session: Arc<SessionService>,
}

impl Header {
    pub fn new(session: Arc<SessionService>) -> Self {
        Self { session }
    }

    /// Name shown next to the avatar.
    pub fn display_name(&self) -> Option<String> {
        self.session.current_user().map(|u| u.display_name().to_string())
    }

    pub fn role_label(&self) -> Option<&'static str> {
        self.session.current_user().map(|u| policy::role_label(u.role))
    }

    /// Shortcut to the admin panel, shown only to those who may open it.
    pub fn shows_admin_link(&self) -> bool {
        can(
            self.session.current_user().as_ref(),
            Action::View,
            Subject::System,
        )
    }

    /// Ask for confirmation, then sign out and go to the login screen.
    /// Returns whether the user was signed out.
    pub fn logout(&self, confirmer: &dyn Confirmer) -> bool {
        if !confirmer.confirm(messages::CONFIRM_LOGOUT) {
            return false;
        }
        self.session.logout();
        self.session.navigator().push(LOGIN_PATH);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TOKEN_KEY, USER_KEY};
    use crate::feedback::ScriptedConfirmer;
    use crate::models::Role;
    use crate::router::Navigator;
    use crate::storage::{DurableStorage, MemoryStorage};

    fn paths(items: &[MenuItem]) -> Vec<String> {
        items.iter().map(MenuItem::path).collect()
    }

    #[test]
    fn admin_sees_admin_items() {
        let admin = User::blank(Role::Admin);
        let items = paths(&Sidebar::new().items(Some(&admin)));
        assert_eq!(items.len(), MENU.len());
        assert!(items.contains(&"/admin/users".to_string()));
        assert!(items.contains(&"/admin".to_string()));
    }

    #[test]
    fn patient_menu_hides_staff_and_admin_items() {
        let patient = User::blank(Role::Patient);
        let items = paths(&Sidebar::new().items(Some(&patient)));
        assert!(items.contains(&"/appointments".to_string()));
        assert!(items.contains(&"/adherence".to_string()));
        for hidden in ["/patients", "/reports", "/admin/users", "/admin"] {
            assert!(!items.contains(&hidden.to_string()), "{hidden}");
        }
    }

    #[test]
    fn doctor_sees_patients_but_not_admin() {
        let doctor = User::blank(Role::Doctor);
        let items = paths(&Sidebar::new().items(Some(&doctor)));
        assert!(items.contains(&"/patients".to_string()));
        assert!(items.contains(&"/reports".to_string()));
        assert!(!items.contains(&"/admin".to_string()));
    }

    #[test]
    fn signed_out_menu_is_empty() {
        assert!(Sidebar::new().items(None).is_empty());
    }

    #[test]
    fn active_item_matches_detail_route() {
        let item = MenuItem {
            route: Route::Patients,
            icon: "",
            label: "",
        };
        assert!(Sidebar::is_active(&item, "/patients/4"));
        assert!(!Sidebar::is_active(&item, "/appointments"));
    }

    #[test]
    fn collapse_toggles_locally() {
        let sidebar = Sidebar::new();
        assert!(!sidebar.is_collapsed());
        assert!(sidebar.toggle());
        assert!(sidebar.is_collapsed());
        assert!(!Sidebar::new().is_collapsed());
    }

    #[test]
    fn logout_requires_confirmation() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "t1").unwrap();
        storage
            .set(USER_KEY, &serde_json::to_string(&User::blank(Role::Doctor)).unwrap())
            .unwrap();
        let session = Arc::new(SessionService::new(
            storage.clone(),
            Arc::new(Navigator::new("/dashboard")),
        ));
        session.hydrate();
        let header = Header::new(session.clone());
        assert_eq!(header.role_label(), Some(policy::role_label(Role::Doctor)));
        assert!(!header.shows_admin_link());

        assert!(!header.logout(&ScriptedConfirmer::always(false)));
        assert!(session.current_user().is_some());

        let confirmer = ScriptedConfirmer::always(true);
        assert!(header.logout(&confirmer));
        assert_eq!(confirmer.prompts(), vec![messages::CONFIRM_LOGOUT]);
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(session.navigator().current(), "/login");
    }
}
