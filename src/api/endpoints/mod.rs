//! Resource-specific queries beyond plain CRUD.
//!
//! Each module adds an inherent `impl Crud<'_, T>` block (or a namespace
//! struct) for one backend resource.

pub mod admin;
pub mod auth;
pub mod consultations;
pub mod education;
pub mod lab_results;
pub mod medications;
pub mod notifications;
pub mod profile;
pub mod reminders;
pub mod reports;
pub mod side_effects;
pub mod treatment_plans;
