//! Route table, protected-route resolution and navigation history.

use std::sync::RwLock;

use crate::config::{DASHBOARD_PATH, LOGIN_PATH};
use crate::models::{EntityId, User};
use crate::policy::Subject;

/// Every screen the shell can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    AnonymousBooking,
    Dashboard,
    Patients,
    PatientDetail(EntityId),
    Appointments,
    Prescriptions,
    LabResults,
    Medications,
    ArvRegimens,
    Consultations,
    VitalSigns,
    SideEffects,
    TreatmentPlans,
    Reminders,
    Adherence,
    Education,
    Notifications,
    Reports,
    AdminUsers,
    AdminPanel,
    Profile,
}

const STATIC_ROUTES: &[(&str, Route)] = &[
    ("/", Route::Home),
    ("/login", Route::Login),
    ("/register", Route::Register),
    ("/anonymous-booking", Route::AnonymousBooking),
    ("/dashboard", Route::Dashboard),
    ("/patients", Route::Patients),
    ("/appointments", Route::Appointments),
    ("/prescriptions", Route::Prescriptions),
    ("/lab-results", Route::LabResults),
    ("/medications", Route::Medications),
    ("/arv-regimens", Route::ArvRegimens),
    ("/consultations", Route::Consultations),
    ("/vital-signs", Route::VitalSigns),
    ("/side-effects", Route::SideEffects),
    ("/treatment-plans", Route::TreatmentPlans),
    ("/reminders", Route::Reminders),
    ("/adherence", Route::Adherence),
    ("/education", Route::Education),
    ("/notifications", Route::Notifications),
    ("/reports", Route::Reports),
    ("/admin/users", Route::AdminUsers),
    ("/admin", Route::AdminPanel),
    ("/profile", Route::Profile),
];

impl Route {
    /// Match a path against the table. Query strings and a trailing slash
    /// are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        if let Some((_, route)) = STATIC_ROUTES.iter().find(|(p, _)| *p == path) {
            return Some(route.clone());
        }
        let id = path.strip_prefix("/patients/")?;
        if id.is_empty() || id.contains('/') {
            return None;
        }
        Some(Route::PatientDetail(match id.parse::<i64>() {
            Ok(n) => EntityId::Number(n),
            Err(_) => EntityId::Text(id.to_string()),
        }))
    }

    pub fn path(&self) -> String {
        match self {
            Route::PatientDetail(id) => format!("/patients/{id}"),
            other => STATIC_ROUTES
                .iter()
                .find(|(_, r)| r == other)
                .map(|(p, _)| p.to_string())
                .unwrap_or_else(|| DASHBOARD_PATH.to_string()),
        }
    }

    /// Routes reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Route::Home | Route::Login | Route::Register | Route::AnonymousBooking
        )
    }

    /// Policy subject gating the screen, if any.
    pub fn subject(&self) -> Option<Subject> {
        Some(match self {
            Route::Home | Route::Login | Route::Register | Route::AnonymousBooking => return None,
            Route::Dashboard => Subject::Dashboard,
            Route::Patients | Route::PatientDetail(_) => Subject::Patients,
            Route::Appointments => Subject::Appointments,
            Route::Prescriptions => Subject::Prescriptions,
            Route::LabResults => Subject::LabResults,
            Route::Medications => Subject::Medications,
            Route::ArvRegimens => Subject::ArvRegimens,
            Route::Consultations => Subject::Consultations,
            Route::VitalSigns => Subject::VitalSigns,
            Route::SideEffects => Subject::SideEffects,
            Route::TreatmentPlans => Subject::TreatmentPlans,
            Route::Reminders => Subject::Reminders,
            Route::Adherence => Subject::Adherence,
            Route::Education => Subject::Education,
            Route::Notifications => Subject::Notifications,
            Route::Reports => Subject::Reports,
            Route::AdminUsers => Subject::Users,
            Route::AdminPanel => Subject::System,
            Route::Profile => Subject::Profile,
        })
    }
}

/// Session as seen by the router.
#[derive(Debug, Clone, Copy)]
pub enum AuthView<'a> {
    Loading,
    SignedIn(&'a User),
    SignedOut,
}

/// Outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Session still hydrating; show the spinner.
    Loading,
    Render(Route),
    Redirect(String),
}

/// Apply the protected-route rules to `path`.
///
/// Role is not checked here: a screen a role may not view still renders
/// its own access-denied state.
pub fn resolve(path: &str, auth: AuthView<'_>) -> Resolution {
    let user = match auth {
        AuthView::Loading => return Resolution::Loading,
        AuthView::SignedIn(user) => Some(user),
        AuthView::SignedOut => None,
    };

    match (Route::parse(path), user) {
        (Some(Route::Login), Some(_)) => Resolution::Redirect(DASHBOARD_PATH.to_string()),
        (Some(Route::Home), Some(_)) => Resolution::Redirect(DASHBOARD_PATH.to_string()),
        (Some(route), _) if route.is_public() => Resolution::Render(route),
        (_, None) => Resolution::Redirect(LOGIN_PATH.to_string()),
        (Some(route), Some(_)) => Resolution::Render(route),
        (None, Some(_)) => Resolution::Redirect(DASHBOARD_PATH.to_string()),
    }
}

// ═══════════════════════════════════════════════════════════
// Navigator
// ═══════════════════════════════════════════════════════════

/// Current location plus history. Shared by screens and the 401 handler.
#[derive(Debug)]
pub struct Navigator {
    history: RwLock<Vec<String>>,
}

impl Navigator {
    pub fn new(initial: &str) -> Self {
        Self {
            history: RwLock::new(vec![initial.to_string()]),
        }
    }

    pub fn current(&self) -> String {
        self.history
            .read()
            .ok()
            .and_then(|h| h.last().cloned())
            .unwrap_or_else(|| "/".to_string())
    }

    pub fn push(&self, path: &str) {
        if let Ok(mut history) = self.history.write() {
            if history.last().map(String::as_str) != Some(path) {
                tracing::debug!(path, "navigate");
                history.push(path.to_string());
            }
        }
    }

    /// Replace the current entry. Used for forced redirects so "back"
    /// does not return to the rejected page.
    pub fn replace(&self, path: &str) {
        if let Ok(mut history) = self.history.write() {
            history.pop();
            history.push(path.to_string());
        }
    }

    pub fn back(&self) -> String {
        if let Ok(mut history) = self.history.write() {
            if history.len() > 1 {
                history.pop();
            }
        }
        self.current()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.read().map(|h| h.clone()).unwrap_or_default()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new("/")
    }
}
