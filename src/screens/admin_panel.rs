//! System administration: live stats, system commands and the admin
//! overview that combines system, user and clinic counters.

use std::sync::Arc;

use super::report_failure;
use crate::core_state::CoreState;
use crate::messages;
use crate::models::{DashboardStats, SystemAction, SystemStats, UserStats};
use crate::policy::{can, Action, Subject};

/// Outcome of one system command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    /// The restart prompt was dismissed; nothing was sent.
    Cancelled,
    Forbidden,
    Failed,
}

/// Label used in the failure toast.
pub fn action_name(action: SystemAction) -> &'static str {
    match action {
        SystemAction::Backup => "backup",
        SystemAction::ToggleMaintenance => "maintenance",
        SystemAction::ClearCache => "clearCache",
        SystemAction::Restart => "restart",
    }
}

fn action_done(action: SystemAction) -> &'static str {
    match action {
        SystemAction::Backup => messages::BACKUP_DONE,
        SystemAction::ToggleMaintenance => messages::MAINTENANCE_TOGGLED,
        SystemAction::ClearCache => messages::CACHE_CLEARED,
        SystemAction::Restart => messages::RESTART_SCHEDULED,
    }
}

// ═══════════════════════════════════════════════════════════
// AdminPanel
// ═══════════════════════════════════════════════════════════

pub struct AdminPanel {
    core: Arc<CoreState>,
    stats: Option<SystemStats>,
    loading: bool,
}

impl AdminPanel {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self {
            core,
            stats: None,
            loading: true,
        }
    }

    pub async fn mount(core: Arc<CoreState>) -> Self {
        let mut panel = Self::new(core);
        panel.refresh().await;
        panel
    }

    /// Non-admins see the access-denied state and nothing is fetched.
    pub fn is_allowed(&self) -> bool {
        can(
            self.core.current_user().as_ref(),
            Action::Administer,
            Subject::System,
        )
    }

    pub fn stats(&self) -> Option<&SystemStats> {
        self.stats.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Reload system stats. On failure the previous stats stay.
    pub async fn refresh(&mut self) -> bool {
        if !self.is_allowed() {
            self.loading = false;
            return false;
        }
        self.loading = true;
        let result = self.core.api().admin().system_stats().await;
        self.loading = false;
        match result {
            Ok(stats) => {
                self.stats = Some(stats);
                true
            }
            Err(e) => {
                report_failure(&self.core, &e, messages::ADMIN_LOAD_FAILED);
                false
            }
        }
    }

    /// Send a system command, toast the outcome and reload stats.
    pub async fn run(&mut self, action: SystemAction) -> ActionOutcome {
        if !self.is_allowed() {
            self.core.notifier().error(messages::FORBIDDEN);
            return ActionOutcome::Forbidden;
        }
        if action.needs_confirmation() && !self.core.confirmer().confirm(messages::CONFIRM_RESTART)
        {
            tracing::debug!(?action, "System action cancelled");
            return ActionOutcome::Cancelled;
        }

        match self.core.api().admin().run(action).await {
            Ok(()) => {
                self.core.notifier().success(action_done(action));
                self.refresh().await;
                ActionOutcome::Done
            }
            Err(e) => {
                report_failure(
                    &self.core,
                    &e,
                    &messages::system_action_failed(action_name(action)),
                );
                ActionOutcome::Failed
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════
// AdminDashboard
// ═══════════════════════════════════════════════════════════

/// Counters shown on the admin overview.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminOverview {
    pub system: SystemStats,
    pub users: UserStats,
    pub clinic: DashboardStats,
}

/// Fetch all three stat groups at once. Any failure fails the whole load.
/// Non-admins get `None` without a request.
pub async fn load_overview(core: &CoreState) -> Option<AdminOverview> {
    if !can(core.current_user().as_ref(), Action::View, Subject::System) {
        return None;
    }
    let admin = core.api().admin();
    let loaded = tokio::try_join!(admin.system_stats(), admin.user_stats(), admin.dashboard_stats());
    match loaded {
        Ok((system, users, clinic)) => Some(AdminOverview {
            system,
            users,
            clinic,
        }),
        Err(e) => {
            report_failure(core, &e, messages::ADMIN_LOAD_FAILED);
            None
        }
    }
}

/// Clinic counters for the dashboard landing page.
pub async fn load_dashboard(core: &CoreState) -> Option<DashboardStats> {
    match core.api().admin().dashboard_stats().await {
        Ok(stats) => Some(stats),
        Err(e) => {
            report_failure(core, &e, messages::DASHBOARD_LOAD_FAILED);
            None
        }
    }
}
