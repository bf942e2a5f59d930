//! Resource screens: list and form state per entity family.
//!
//! Every family follows the same cycle: fetch a collection, filter it
//! client-side, open a form seeded from an entity or defaults, submit to
//! the REST API, then refetch. Lists never patch their items locally; the
//! server is re-read after every mutation.
//!
//! Failures are toasted with the family's fixed message and the screen
//! keeps its last known items. A 401 is not toasted: the client has
//! already expired the session and redirected.

pub mod admin_panel;
pub mod adherence;
pub mod appointments;
pub mod arv_regimens;
pub mod auth;
pub mod booking;
pub mod consultations;
pub mod education;
pub mod lab_results;
pub mod medications;
pub mod notifications;
pub mod patients;
pub mod prescriptions;
pub mod profile;
pub mod reminders;
pub mod reports;
pub mod side_effects;
pub mod treatment_plans;
pub mod users;
pub mod vital_signs;

use std::future::Future;
use std::sync::Arc;

use crate::api::{ApiClient, ApiError, PatientScoped, Resource};
use crate::core_state::CoreState;
use crate::messages::{self, FamilyMessages};
use crate::models::{EntityId, Medication, Patient, Role, User};
use crate::policy::{can, Action, Subject};

// ═══════════════════════════════════════════════════════════
// Family contract
// ═══════════════════════════════════════════════════════════

/// One List+Form pair.
pub trait ResourceFamily: Send + Sync + 'static {
    type Item: Resource;
    /// Dropdown filters next to the search box.
    type Filter: Default + Clone + Send + Sync;

    const SUBJECT: Subject;
    const MESSAGES: FamilyMessages;

    /// Load the collection shown to `user`.
    fn fetch(
        api: &ApiClient,
        user: Option<&User>,
    ) -> impl Future<Output = Result<Vec<Self::Item>, ApiError>> + Send {
        let _ = user;
        async move { api.resource::<Self::Item>().get_all().await }
    }

    /// Client-side predicate. `search` is already trimmed and lowercased.
    fn matches(item: &Self::Item, search: &str, filter: &Self::Filter) -> bool;

    /// Fresh draft for create mode.
    fn draft(user: Option<&User>) -> Self::Item;

    /// Checks beyond required fields. The message is toasted as is.
    fn validate(draft: &Self::Item) -> Result<(), String> {
        let _ = draft;
        Ok(())
    }

    /// Final payload. Families stamp ownership here.
    fn prepare(draft: &Self::Item, user: Option<&User>) -> Self::Item {
        let _ = user;
        draft.clone()
    }
}

/// Patients see only their own records; staff see the whole collection.
pub async fn fetch_owned<T: PatientScoped>(
    api: &ApiClient,
    user: Option<&User>,
) -> Result<Vec<T>, ApiError> {
    match own_patient_id(user) {
        Some(id) => api.resource::<T>().by_patient(&id).await,
        None => api.resource::<T>().get_all().await,
    }
}

/// The user's id when the user is a patient.
pub fn own_patient_id(user: Option<&User>) -> Option<EntityId> {
    user.filter(|u| u.role == Role::Patient)
        .and_then(|u| u.id.clone())
}

/// Case-insensitive substring match over optional text fields. An empty
/// needle matches everything.
pub fn text_matches(needle: &str, fields: &[Option<&str>]) -> bool {
    needle.is_empty()
        || fields
            .iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
}

/// Equality filter where `None` means "all".
pub fn option_matches<T: PartialEq>(filter: &Option<T>, value: &T) -> bool {
    filter.as_ref().map_or(true, |f| f == value)
}

/// Required text field check.
pub fn require(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(messages::REQUIRED_FIELD.to_string())
    } else {
        Ok(())
    }
}

/// Required reference check.
pub fn require_id(value: Option<&EntityId>) -> Result<(), String> {
    match value {
        Some(_) => Ok(()),
        None => Err(messages::REQUIRED_FIELD.to_string()),
    }
}

/// `end` must not precede `start` when both are set.
pub fn check_date_order<T: PartialOrd>(start: Option<T>, end: Option<T>) -> Result<(), String> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(messages::DATE_RANGE_ORDER.to_string()),
        _ => Ok(()),
    }
}

/// Patients for a form's patient picker. Failure toasts and yields none.
pub async fn patient_options(core: &CoreState) -> Vec<Patient> {
    match core.api().resource::<Patient>().get_all().await {
        Ok(patients) => patients,
        Err(e) => {
            report_failure(core, &e, messages::PATIENTS.load_failed);
            Vec::new()
        }
    }
}

/// Active medications for a form's medication picker.
pub async fn medication_options(core: &CoreState) -> Vec<Medication> {
    match core.api().resource::<Medication>().get_all().await {
        Ok(medications) => medications.into_iter().filter(|m| m.is_active).collect(),
        Err(e) => {
            report_failure(core, &e, messages::MEDICATIONS.load_failed);
            Vec::new()
        }
    }
}

/// Toast a failed call unless it was a 401, which is handled globally.
pub(crate) fn report_failure(core: &CoreState, error: &ApiError, message: &str) {
    tracing::warn!(error = %error, message, "Screen action failed");
    if !matches!(error, ApiError::Unauthorized) {
        core.notifier().error(message);
    }
}

// ═══════════════════════════════════════════════════════════
// Errors and outcomes
// ═══════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("{0}")]
    Validation(String),
    #[error("Action not permitted for this role")]
    Forbidden,
    #[error("No form is open")]
    NotOpen,
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The confirmation dialog was dismissed; nothing was sent.
    Cancelled,
    Forbidden,
    Failed,
}

// ═══════════════════════════════════════════════════════════
// ResourceForm
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EntityId),
}

/// Modal form bound to a local draft.
pub struct ResourceForm<F: ResourceFamily> {
    mode: FormMode,
    pub draft: F::Item,
    submitting: bool,
}

impl<F: ResourceFamily> ResourceForm<F> {
    /// Create mode, seeded from family defaults.
    pub fn create(user: Option<&User>) -> Self {
        Self {
            mode: FormMode::Create,
            draft: F::draft(user),
            submitting: false,
        }
    }

    /// Edit mode, seeded from a copy of `item`. An item without an id can
    /// only be created.
    pub fn edit(item: &F::Item) -> Self {
        let mode = match item.id() {
            Some(id) => FormMode::Edit(id.clone()),
            None => FormMode::Create,
        };
        Self {
            mode,
            draft: item.clone(),
            submitting: false,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Submit button is disabled while a request is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate, then create or update. Toasts the outcome.
    pub async fn submit(&mut self, core: &CoreState) -> Result<F::Item, FormError> {
        let user = core.current_user();
        let action = match self.mode {
            FormMode::Create => Action::Create,
            FormMode::Edit(_) => Action::Edit,
        };
        if !can(user.as_ref(), action, F::SUBJECT) {
            core.notifier().error(messages::FORBIDDEN);
            return Err(FormError::Forbidden);
        }
        if let Err(message) = F::validate(&self.draft) {
            core.notifier().error(&message);
            return Err(FormError::Validation(message));
        }

        let payload = F::prepare(&self.draft, user.as_ref());
        let crud = core.api().resource::<F::Item>();
        self.submitting = true;
        let result = match &self.mode {
            FormMode::Create => crud.create(&payload).await,
            FormMode::Edit(id) => crud.update(id, &payload).await,
        };
        self.submitting = false;

        let (done, failed) = match self.mode {
            FormMode::Create => (F::MESSAGES.created, F::MESSAGES.create_failed),
            FormMode::Edit(_) => (F::MESSAGES.updated, F::MESSAGES.update_failed),
        };
        match result {
            Ok(saved) => {
                core.notifier().success(done);
                Ok(saved)
            }
            Err(e) => {
                report_failure(core, &e, failed);
                Err(FormError::Api(e))
            }
        }
    }
}

/// Drafts that embed an ordered list of sub-records.
pub trait LineItems {
    type Line: Default + Clone;

    fn lines(&self) -> &[Self::Line];
    fn lines_mut(&mut self) -> &mut Vec<Self::Line>;
}

impl<F: ResourceFamily> ResourceForm<F>
where
    F::Item: LineItems,
{
    pub fn lines(&self) -> &[<F::Item as LineItems>::Line] {
        self.draft.lines()
    }

    /// Append a blank line; returns its index.
    pub fn add_line(&mut self) -> usize {
        let lines = self.draft.lines_mut();
        lines.push(Default::default());
        lines.len() - 1
    }

    pub fn remove_line(&mut self, index: usize) -> Option<<F::Item as LineItems>::Line> {
        let lines = self.draft.lines_mut();
        (index < lines.len()).then(|| lines.remove(index))
    }

    /// Edit one line in place. Returns false when `index` is out of range.
    pub fn update_line(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut <F::Item as LineItems>::Line),
    ) -> bool {
        match self.draft.lines_mut().get_mut(index) {
            Some(line) => {
                edit(line);
                true
            }
            None => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// ResourceList
// ═══════════════════════════════════════════════════════════

/// List screen: last fetched items, search box, filters and the open form.
pub struct ResourceList<F: ResourceFamily> {
    core: Arc<CoreState>,
    items: Vec<F::Item>,
    loading: bool,
    search: String,
    pub filter: F::Filter,
    form: Option<ResourceForm<F>>,
}

impl<F: ResourceFamily> ResourceList<F> {
    /// Empty list showing the spinner until the first [`refresh`](Self::refresh).
    pub fn new(core: Arc<CoreState>) -> Self {
        Self {
            core,
            items: Vec::new(),
            loading: true,
            search: String::new(),
            filter: F::Filter::default(),
            form: None,
        }
    }

    /// Construct and fetch.
    pub async fn mount(core: Arc<CoreState>) -> Self {
        let mut list = Self::new(core);
        list.refresh().await;
        list
    }

    pub fn core(&self) -> &Arc<CoreState> {
        &self.core
    }

    /// Refetch the collection. On failure the previous items stay.
    pub async fn refresh(&mut self) -> bool {
        self.loading = true;
        let user = self.core.current_user();
        let result = F::fetch(self.core.api(), user.as_ref()).await;
        self.loading = false;
        match result {
            Ok(items) => {
                tracing::debug!(entity = <F::Item as Resource>::NAME, count = items.len(), "Loaded");
                self.items = items;
                true
            }
            Err(e) => {
                report_failure(&self.core, &e, F::MESSAGES.load_failed);
                false
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn items(&self) -> &[F::Item] {
        &self.items
    }

    pub fn find(&self, id: &EntityId) -> Option<&F::Item> {
        self.items
            .iter()
            .find(|item| item.id().is_some_and(|own| own.same_as(id)))
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
    }

    /// Items passing the search term and filters.
    pub fn visible(&self) -> Vec<&F::Item> {
        let needle = self.search.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| F::matches(item, &needle, &self.filter))
            .collect()
    }

    /// A scoped backend query next to the list's own fetch. The list keeps
    /// its items; a failure toasts the family's load message and yields
    /// nothing.
    pub(crate) async fn scoped_query(
        &self,
        query: impl Future<Output = Result<Vec<F::Item>, ApiError>>,
    ) -> Vec<F::Item> {
        match query.await {
            Ok(items) => items,
            Err(e) => {
                report_failure(&self.core, &e, F::MESSAGES.load_failed);
                Vec::new()
            }
        }
    }

    /// Whether the current user gets the button for `action`.
    pub fn allows(&self, action: Action) -> bool {
        can(self.core.current_user().as_ref(), action, F::SUBJECT)
    }

    pub fn can_create(&self) -> bool {
        self.allows(Action::Create)
    }

    pub fn can_edit(&self) -> bool {
        self.allows(Action::Edit)
    }

    pub fn can_delete(&self) -> bool {
        self.allows(Action::Delete)
    }

    /// Policy check, blocking confirmation, delete, toast, full refetch.
    pub async fn delete(&mut self, id: &EntityId) -> DeleteOutcome {
        if !self.can_delete() {
            self.core.notifier().error(messages::FORBIDDEN);
            return DeleteOutcome::Forbidden;
        }
        if !self.core.confirmer().confirm(F::MESSAGES.confirm_delete) {
            return DeleteOutcome::Cancelled;
        }
        match self.core.api().resource::<F::Item>().delete(id).await {
            Ok(()) => {
                self.core.notifier().success(F::MESSAGES.deleted);
                self.refresh().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                report_failure(&self.core, &e, F::MESSAGES.delete_failed);
                DeleteOutcome::Failed
            }
        }
    }

    // ── Form ────────────────────────────────────────────────

    /// Open a blank form. Any previously open draft is discarded.
    pub fn open_create(&mut self) -> Result<&mut ResourceForm<F>, FormError> {
        if !self.can_create() {
            return Err(FormError::Forbidden);
        }
        let user = self.core.current_user();
        Ok(self.form.insert(ResourceForm::create(user.as_ref())))
    }

    /// Open a form seeded from `item`. Any previously open draft is discarded.
    pub fn open_edit(&mut self, item: &F::Item) -> Result<&mut ResourceForm<F>, FormError> {
        if !self.can_edit() {
            return Err(FormError::Forbidden);
        }
        Ok(self.form.insert(ResourceForm::edit(item)))
    }

    pub fn form(&self) -> Option<&ResourceForm<F>> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut ResourceForm<F>> {
        self.form.as_mut()
    }

    /// Submit the open form. On success it closes and the list refetches;
    /// on failure it stays open with the draft intact.
    pub async fn submit_form(&mut self) -> Result<F::Item, FormError> {
        let form = self.form.as_mut().ok_or(FormError::NotOpen)?;
        let saved = form.submit(&self.core).await?;
        self.form = None;
        self.refresh().await;
        Ok(saved)
    }

    /// Close without saving. Closing always refetches.
    pub async fn cancel_form(&mut self) {
        self.form = None;
        self.refresh().await;
    }
}
