use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::client::ApiClient;
use super::error::ApiError;
use crate::models::*;

/// A REST collection under `/{PATH}`.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection path below the API root, without slashes.
    const PATH: &'static str;
    /// Entity name used in logs.
    const NAME: &'static str;

    fn id(&self) -> Option<&EntityId>;
}

/// Collections that also answer `GET /{PATH}/patient/{id}`.
pub trait PatientScoped: Resource {
    fn patient_id(&self) -> Option<&EntityId>;
}

macro_rules! resource {
    ($ty:ty, $path:literal, $name:literal) => {
        impl Resource for $ty {
            const PATH: &'static str = $path;
            const NAME: &'static str = $name;

            fn id(&self) -> Option<&EntityId> {
                self.id.as_ref()
            }
        }
    };
    ($ty:ty, $path:literal, $name:literal, patient) => {
        resource!($ty, $path, $name);

        impl PatientScoped for $ty {
            fn patient_id(&self) -> Option<&EntityId> {
                self.patient_id.as_ref()
            }
        }
    };
}

resource!(Patient, "patients", "patient");
resource!(Appointment, "appointments", "appointment", patient);
resource!(Prescription, "prescriptions", "prescription", patient);
resource!(LabResult, "lab-results", "lab_result", patient);
resource!(Medication, "medications", "medication");
resource!(ArvRegimen, "arv-regimens", "arv_regimen");
resource!(Consultation, "consultations", "consultation", patient);
resource!(VitalSigns, "vital-signs", "vital_signs", patient);
resource!(SideEffect, "side-effects", "side_effect", patient);
resource!(TreatmentPlan, "treatment-plans", "treatment_plan", patient);
resource!(MedicationReminder, "medication-reminders", "reminder", patient);
resource!(AdherenceRecord, "medication-adherence", "adherence", patient);
resource!(EducationalContent, "educational-content", "education");
resource!(Notification, "notifications", "notification");
resource!(User, "admin/users", "user");

/// `value` percent-encoded as a single path segment. Empty, `.` and `..`
/// would address another resource once the URL is normalised, so they are
/// refused.
pub(crate) fn path_segment(value: impl std::fmt::Display) -> Result<String, ApiError> {
    let raw = value.to_string();
    match raw.as_str() {
        "" | "." | ".." => Err(ApiError::InvalidUrl(format!(
            "unusable path segment {raw:?}"
        ))),
        _ => Ok(urlencoding::encode(&raw).into_owned()),
    }
}

/// Typed CRUD view over one collection.
pub struct Crud<'a, T> {
    pub(crate) client: &'a ApiClient,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T> Clone for Crud<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Crud<'a, T> {}

impl ApiClient {
    /// CRUD namespace for `T`.
    pub fn resource<T: Resource>(&self) -> Crud<'_, T> {
        Crud {
            client: self,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: Resource> Crud<'a, T> {
    pub(crate) fn item_path(id: &EntityId) -> Result<String, ApiError> {
        Ok(format!("{}/{}", T::PATH, path_segment(id)?))
    }

    /// `GET /{PATH}`
    pub async fn get_all(&self) -> Result<Vec<T>, ApiError> {
        self.client.get(T::PATH).await
    }

    /// `GET /{PATH}/{id}`
    pub async fn get_by_id(&self, id: &EntityId) -> Result<T, ApiError> {
        self.client.get(&Self::item_path(id)?).await
    }

    /// `POST /{PATH}`; returns the stored entity with its server id.
    pub async fn create(&self, item: &T) -> Result<T, ApiError> {
        let created: T = self.client.post(T::PATH, item).await?;
        tracing::info!(entity = T::NAME, id = ?created.id(), "Created");
        Ok(created)
    }

    /// `PUT /{PATH}/{id}`
    pub async fn update(&self, id: &EntityId, item: &T) -> Result<T, ApiError> {
        let updated = self.client.put(&Self::item_path(id)?, item).await?;
        tracing::info!(entity = T::NAME, %id, "Updated");
        Ok(updated)
    }

    /// `DELETE /{PATH}/{id}`
    pub async fn delete(&self, id: &EntityId) -> Result<(), ApiError> {
        self.client.delete(&Self::item_path(id)?).await?;
        tracing::info!(entity = T::NAME, %id, "Deleted");
        Ok(())
    }

    /// `GET /{PATH}/{scope}/{value}`, e.g. `/consultations/doctor/4`.
    pub async fn scoped(&self, scope: &str, value: &str) -> Result<Vec<T>, ApiError> {
        let path = format!("{}/{}/{}", T::PATH, scope, path_segment(value)?);
        self.client.get(&path).await
    }
}

impl<'a, T: PatientScoped> Crud<'a, T> {
    /// `GET /{PATH}/patient/{id}`
    pub async fn by_patient(&self, patient_id: &EntityId) -> Result<Vec<T>, ApiError> {
        self.scoped("patient", &patient_id.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_paths() {
        assert_eq!(
            Crud::<Patient>::item_path(&EntityId::from(5)).unwrap(),
            "patients/5"
        );
        assert_eq!(
            Crud::<User>::item_path(&EntityId::from("u-1")).unwrap(),
            "admin/users/u-1"
        );
    }

    #[test]
    fn text_ids_stay_inside_their_segment() {
        assert_eq!(
            Crud::<Patient>::item_path(&EntityId::from("7/../admin")).unwrap(),
            "patients/7%2F..%2Fadmin"
        );
        assert_eq!(
            Crud::<Patient>::item_path(&EntityId::from("a b?c#d")).unwrap(),
            "patients/a%20b%3Fc%23d"
        );
        for unusable in ["", ".", ".."] {
            assert!(matches!(
                Crud::<Patient>::item_path(&EntityId::from(unusable)),
                Err(ApiError::InvalidUrl(_))
            ));
        }
    }

    #[test]
    fn patient_scoped_reads_owner() {
        let mut lab = LabResult::default();
        lab.patient_id = Some(EntityId::from(9));
        assert_eq!(PatientScoped::patient_id(&lab), Some(&EntityId::from(9)));
    }
}
