//! Three-step anonymous booking wizard, reachable without an account.
//!
//! The generated booking code is always kept in durable storage so the
//! visitor can quote it later. The booking itself is posted only when the
//! client is configured with a booking endpoint.

use std::sync::Arc;

use chrono::{Local, Utc};
use rand::Rng;

use super::require;
use crate::api::ApiError;
use crate::config::ANONYMOUS_BOOKING_KEY;
use crate::core_state::CoreState;
use crate::messages;
use crate::models::AnonymousBooking;
use crate::storage::StorageError;

pub const PAST_DATE: &str = "Vui lòng chọn ngày trong tương lai";

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BookingStep {
    /// Preferred name and a way to reach the visitor.
    Contact,
    /// Date, time and channel.
    Schedule,
    /// Symptoms, urgency and consents.
    Details,
}

impl BookingStep {
    pub fn number(self) -> u8 {
        match self {
            BookingStep::Contact => 1,
            BookingStep::Schedule => 2,
            BookingStep::Details => 3,
        }
    }
}

pub struct BookingWizard {
    core: Arc<CoreState>,
    step: BookingStep,
    pub draft: AnonymousBooking,
    submitting: bool,
    booked_id: Option<String>,
}

impl BookingWizard {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self {
            core,
            step: BookingStep::Contact,
            draft: AnonymousBooking::default(),
            submitting: false,
            booked_id: None,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Code shown on the confirmation page after a successful booking.
    pub fn booked_id(&self) -> Option<&str> {
        self.booked_id.as_deref()
    }

    /// The submit button stays disabled until both consents are ticked.
    pub fn can_submit(&self) -> bool {
        self.step == BookingStep::Details && self.draft.has_consents() && !self.submitting
    }

    fn check_step(&self) -> Result<(), String> {
        match self.step {
            BookingStep::Contact => require(&self.draft.contact_value),
            BookingStep::Schedule => {
                let date = self
                    .draft
                    .appointment_date
                    .ok_or_else(|| messages::REQUIRED_FIELD.to_string())?;
                if self.draft.appointment_time.is_none() {
                    return Err(messages::REQUIRED_FIELD.to_string());
                }
                if date < Local::now().date_naive() {
                    return Err(PAST_DATE.to_string());
                }
                Ok(())
            }
            BookingStep::Details => {
                if self.draft.has_consents() {
                    Ok(())
                } else {
                    Err(messages::BOOKING_CONSENT_REQUIRED.to_string())
                }
            }
        }
    }

    /// Advance when the current step is complete; toasts what is missing.
    pub fn next(&mut self) -> bool {
        if let Err(message) = self.check_step() {
            self.core.notifier().error(&message);
            return false;
        }
        self.step = match self.step {
            BookingStep::Contact => BookingStep::Schedule,
            BookingStep::Schedule | BookingStep::Details => BookingStep::Details,
        };
        true
    }

    pub fn back(&mut self) {
        self.step = match self.step {
            BookingStep::Contact | BookingStep::Schedule => BookingStep::Contact,
            BookingStep::Details => BookingStep::Schedule,
        };
    }

    /// Book from the last step. Returns the generated booking code.
    pub async fn submit(&mut self) -> Result<String, BookingError> {
        if self.step != BookingStep::Details {
            return Err(BookingError::Validation(messages::REQUIRED_FIELD.to_string()));
        }
        if let Err(message) = self.check_step() {
            self.core.notifier().error(&message);
            return Err(BookingError::Validation(message));
        }
        let Some(slot) = self.draft.slot() else {
            self.core.notifier().error(messages::REQUIRED_FIELD);
            return Err(BookingError::Validation(messages::REQUIRED_FIELD.to_string()));
        };

        self.submitting = true;
        let result = self.book(slot).await;
        self.submitting = false;

        match result {
            Ok(id) => {
                tracing::info!(booking = %id, "Anonymous booking stored");
                self.core.notifier().success(messages::BOOKING_SUCCESS);
                self.booked_id = Some(id.clone());
                Ok(id)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Anonymous booking failed");
                self.core.notifier().error(messages::BOOKING_FAILED);
                Err(e)
            }
        }
    }

    async fn book(&mut self, slot: chrono::NaiveDateTime) -> Result<String, BookingError> {
        let id = generate_anonymous_id(Utc::now().timestamp_millis(), &mut rand::thread_rng());
        self.draft.anonymous_id = id.clone();
        if let Some(path) = self.core.api().config().anonymous_booking_path.clone() {
            let payload = self.draft.appointment_payload(slot);
            let _: serde_json::Value = self.core.api().post(&path, &payload).await?;
        }
        self.core.storage().set(ANONYMOUS_BOOKING_KEY, &id)?;
        Ok(id)
    }
}

/// Code of the last booking made on this device.
pub fn stored_booking_id(core: &CoreState) -> Option<String> {
    core.storage().get(ANONYMOUS_BOOKING_KEY).ok().flatten()
}

/// `ANON_<millis base36>_<5 random base36 chars>`, uppercased.
pub fn generate_anonymous_id(millis: i64, rng: &mut impl Rng) -> String {
    let suffix: String = (0..5)
        .filter_map(|_| std::char::from_digit(rng.gen_range(0..36), 36))
        .collect();
    format!("ANON_{}_{}", to_base36(millis.max(0) as u64), suffix).to_uppercase()
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        if let Some(c) = std::char::from_digit((n % 36) as u32, 36) {
            digits.push(c);
        }
        n /= 36;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::core_state::testing::fixture;
    use crate::feedback::{ScriptedConfirmer, ToastLog};
    use crate::mock_backend::MockBackend;
    use crate::storage::{DurableStorage, MemoryStorage};
    use chrono::{Days, NaiveDate, NaiveTime};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regex::Regex;

    fn fill(wizard: &mut BookingWizard) {
        wizard.draft.contact_value = "0901234567".into();
        assert!(wizard.next());
        wizard.draft.appointment_date = Local::now().date_naive().checked_add_days(Days::new(2));
        wizard.draft.appointment_time = NaiveTime::from_hms_opt(9, 30, 0);
        assert!(wizard.next());
        wizard.draft.consent_to_treatment = true;
        wizard.draft.consent_to_data_processing = true;
    }

    #[test]
    fn id_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = generate_anonymous_id(1_700_000_000_000, &mut rng);
        let re = Regex::new(r"^ANON_[0-9A-Z]+_[0-9A-Z]{5}$").unwrap();
        assert!(re.is_match(&id), "{id}");
        let stamp = to_base36(1_700_000_000_000).to_uppercase();
        assert!(id.starts_with(&format!("ANON_{stamp}_")));
    }

    #[test]
    fn base36_digits() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[tokio::test]
    async fn steps_gate_on_required_fields() {
        let fx = fixture(None, true).await;
        let mut wizard = BookingWizard::new(fx.core.clone());
        assert!(!wizard.next());
        assert_eq!(wizard.step(), BookingStep::Contact);

        wizard.draft.contact_value = "a@b.vn".into();
        assert!(wizard.next());
        wizard.draft.appointment_date = NaiveDate::from_ymd_opt(2020, 1, 1);
        wizard.draft.appointment_time = NaiveTime::from_hms_opt(9, 0, 0);
        assert!(!wizard.next());
        assert_eq!(fx.toasts.last().unwrap().message, PAST_DATE);

        wizard.back();
        assert_eq!(wizard.step().number(), 1);
    }

    #[tokio::test]
    async fn consents_required_before_submit() {
        let fx = fixture(None, true).await;
        let mut wizard = BookingWizard::new(fx.core.clone());
        fill(&mut wizard);
        wizard.draft.consent_to_data_processing = false;
        assert!(!wizard.can_submit());

        assert!(matches!(wizard.submit().await, Err(BookingError::Validation(_))));
        assert_eq!(
            fx.toasts.last().unwrap().message,
            messages::BOOKING_CONSENT_REQUIRED
        );
        assert!(stored_booking_id(&fx.core).is_none());
    }

    #[tokio::test]
    async fn booking_is_kept_locally_without_endpoint() {
        let fx = fixture(None, true).await;
        let mut wizard = BookingWizard::new(fx.core.clone());
        fill(&mut wizard);
        assert!(wizard.can_submit());

        let id = wizard.submit().await.unwrap();

        assert_eq!(wizard.booked_id(), Some(id.as_str()));
        assert_eq!(stored_booking_id(&fx.core), Some(id));
        assert!(fx.backend.requests().is_empty());
        assert_eq!(fx.toasts.last().unwrap().message, messages::BOOKING_SUCCESS);
    }

    #[tokio::test]
    async fn booking_posts_when_endpoint_configured() {
        let backend = MockBackend::start().await;
        let storage = Arc::new(MemoryStorage::new());
        let config = ClientConfig {
            anonymous_booking_path: Some("appointments".into()),
            ..ClientConfig::with_base_url(&backend.base_url())
        };
        let core = Arc::new(
            CoreState::new(
                config,
                storage.clone(),
                Arc::new(ToastLog::new()),
                Arc::new(ScriptedConfirmer::always(true)),
            )
            .unwrap(),
        );
        let mut wizard = BookingWizard::new(core);
        fill(&mut wizard);

        let id = wizard.submit().await.unwrap();

        let stored = &backend.items("appointments")[0];
        assert_eq!(stored["anonymousId"], id.as_str());
        assert_eq!(stored["isAnonymous"], true);
        assert_eq!(stored["title"], crate::models::ANONYMOUS_TITLE);
        assert_eq!(storage.get(ANONYMOUS_BOOKING_KEY).unwrap(), Some(id));
    }

    #[tokio::test]
    async fn failed_post_stores_nothing() {
        let backend = MockBackend::start().await;
        backend.fail("appointments");
        let storage = Arc::new(MemoryStorage::new());
        let toasts = Arc::new(ToastLog::new());
        let config = ClientConfig {
            anonymous_booking_path: Some("appointments".into()),
            ..ClientConfig::with_base_url(&backend.base_url())
        };
        let core = Arc::new(
            CoreState::new(
                config,
                storage.clone(),
                toasts.clone(),
                Arc::new(ScriptedConfirmer::always(true)),
            )
            .unwrap(),
        );
        let mut wizard = BookingWizard::new(core);
        fill(&mut wizard);

        assert!(matches!(wizard.submit().await, Err(BookingError::Api(_))));
        assert_eq!(storage.get(ANONYMOUS_BOOKING_KEY).unwrap(), None);
        assert_eq!(toasts.last().unwrap().message, messages::BOOKING_FAILED);
        assert!(wizard.booked_id().is_none());
    }
}
