//! Role capability rules.
//!
//! Single rule table for every role-gated action in the client:
//! 1. No session user → DENY
//! 2. ADMIN → everything
//! 3. Per-subject rule for DOCTOR and PATIENT
//! 4. Default → DENY
//!
//! Screens and the sidebar ask `can(user, action, subject)` instead of
//! comparing role strings.

use crate::messages;
use crate::models::{Role, User};

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// What the user is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    /// Assign a doctor to a consultation.
    Assign,
    ResetPassword,
    Export,
    /// System commands (backup, maintenance, cache, restart).
    Administer,
}

/// What the action applies to. One per screen family plus the
/// administrative surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Dashboard,
    Patients,
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
    Users,
    System,
    Profile,
}

impl Subject {
    /// Records authored by clinical staff.
    pub fn is_clinical(self) -> bool {
        matches!(
            self,
            Subject::Patients
                | Subject::Appointments
                | Subject::Prescriptions
                | Subject::LabResults
                | Subject::Medications
                | Subject::ArvRegimens
                | Subject::VitalSigns
                | Subject::TreatmentPlans
        )
    }

    /// Records a patient files about themselves.
    pub fn is_patient_reported(self) -> bool {
        matches!(
            self,
            Subject::Consultations | Subject::Reminders | Subject::Adherence | Subject::SideEffects
        )
    }
}

// ═══════════════════════════════════════════════════════════
// Rules
// ═══════════════════════════════════════════════════════════

/// Whether `user` may perform `action` on `subject`. Default-deny.
pub fn can(user: Option<&User>, action: Action, subject: Subject) -> bool {
    match user {
        Some(user) => role_can(user.role, action, subject),
        None => false,
    }
}

/// Role-only form of [`can`], for callers that hold a role without a user.
pub fn role_can(role: Role, action: Action, subject: Subject) -> bool {
    match role {
        Role::Admin => return true,
        Role::Unknown => return false,
        Role::Doctor | Role::Patient => {}
    }
    let staff = role == Role::Doctor;

    match action {
        Action::View => match subject {
            Subject::Users | Subject::System => false,
            Subject::Patients | Subject::Reports => staff,
            _ => true,
        },
        Action::Create | Action::Edit => {
            if subject.is_patient_reported() {
                // Adherence is append-only.
                return !(action == Action::Edit && subject == Subject::Adherence);
            }
            match subject {
                Subject::Notifications => action == Action::Edit,
                Subject::Profile => action == Action::Edit,
                s if s.is_clinical() => staff,
                _ => false,
            }
        }
        Action::Delete => matches!(subject, Subject::Reminders | Subject::SideEffects),
        Action::Assign => staff && subject == Subject::Consultations,
        Action::Export => staff && subject == Subject::Reports,
        Action::ResetPassword | Action::Administer => false,
    }
}

/// Label shown next to the user's name in the header.
pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "Quản trị viên",
        Role::Doctor => "Bác sĩ",
        Role::Patient => "Bệnh nhân",
        Role::Unknown => messages::UNKNOWN_VALUE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User::blank(role)
    }

    const ALL_SUBJECTS: &[Subject] = &[
        Subject::Dashboard,
        Subject::Patients,
        Subject::Appointments,
        Subject::Prescriptions,
        Subject::LabResults,
        Subject::Medications,
        Subject::ArvRegimens,
        Subject::Consultations,
        Subject::VitalSigns,
        Subject::SideEffects,
        Subject::TreatmentPlans,
        Subject::Reminders,
        Subject::Adherence,
        Subject::Education,
        Subject::Notifications,
        Subject::Reports,
        Subject::Users,
        Subject::System,
        Subject::Profile,
    ];

    #[test]
    fn anonymous_user_can_do_nothing() {
        for subject in ALL_SUBJECTS {
            assert!(!can(None, Action::View, *subject));
        }
    }

    #[test]
    fn unrecognised_role_can_do_nothing() {
        let stranger = user(Role::Unknown);
        for subject in ALL_SUBJECTS {
            assert!(!can(Some(&stranger), Action::View, *subject));
        }
        assert_eq!(role_label(Role::Unknown), messages::UNKNOWN_VALUE);
    }

    #[test]
    fn admin_can_do_everything() {
        let admin = user(Role::Admin);
        for subject in ALL_SUBJECTS {
            assert!(can(Some(&admin), Action::Delete, *subject));
        }
        assert!(can(Some(&admin), Action::ResetPassword, Subject::Users));
        assert!(can(Some(&admin), Action::Administer, Subject::System));
    }

    #[test]
    fn clinical_records_are_staff_authored_admin_deleted() {
        let doctor = user(Role::Doctor);
        let patient = user(Role::Patient);
        for subject in ALL_SUBJECTS.iter().filter(|s| s.is_clinical()) {
            assert!(can(Some(&doctor), Action::Create, *subject));
            assert!(can(Some(&doctor), Action::Edit, *subject));
            assert!(!can(Some(&doctor), Action::Delete, *subject));
            assert!(!can(Some(&patient), Action::Create, *subject));
            assert!(!can(Some(&patient), Action::Delete, *subject));
        }
    }

    #[test]
    fn patient_never_gets_admin_actions() {
        let patient = user(Role::Patient);
        assert!(!can(Some(&patient), Action::Delete, Subject::Patients));
        assert!(!can(Some(&patient), Action::Delete, Subject::Users));
        assert!(!can(Some(&patient), Action::View, Subject::Users));
        assert!(!can(Some(&patient), Action::View, Subject::Patients));
        assert!(!can(Some(&patient), Action::Administer, Subject::System));
        assert!(!can(Some(&patient), Action::Export, Subject::Reports));
    }

    #[test]
    fn patient_reports_own_records() {
        let patient = user(Role::Patient);
        assert!(can(Some(&patient), Action::Create, Subject::Consultations));
        assert!(can(Some(&patient), Action::Create, Subject::Reminders));
        assert!(can(Some(&patient), Action::Create, Subject::Adherence));
        assert!(!can(Some(&patient), Action::Edit, Subject::Adherence));
        assert!(can(Some(&patient), Action::Create, Subject::SideEffects));
        assert!(can(Some(&patient), Action::Edit, Subject::Notifications));
    }

    #[test]
    fn education_authoring_is_admin_only() {
        let doctor = user(Role::Doctor);
        assert!(can(Some(&doctor), Action::View, Subject::Education));
        assert!(!can(Some(&doctor), Action::Create, Subject::Education));
        assert!(!can(Some(&doctor), Action::Delete, Subject::Education));
    }

    #[test]
    fn doctors_assign_and_export() {
        let doctor = user(Role::Doctor);
        assert!(can(Some(&doctor), Action::Assign, Subject::Consultations));
        assert!(can(Some(&doctor), Action::Export, Subject::Reports));
        assert!(!can(Some(&doctor), Action::ResetPassword, Subject::Users));
        assert!(!can(Some(&user(Role::Patient)), Action::Assign, Subject::Consultations));
    }
}
