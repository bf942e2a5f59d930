//! REST client for the clinic backend.
//!
//! One configured `reqwest::Client` carries every call. The session
//! service supplies the bearer token; any 401 expires the session and
//! sends the navigator to `/login`, whichever screen made the call.
//!
//! Resource namespaces are typed views over the client: `Crud<T>` for the
//! conventional REST verbs, plus the scoped queries under `endpoints/`.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod resource;

pub use client::ApiClient;
pub use endpoints::admin::AdminApi;
pub use endpoints::profile::ProfileApi;
pub use endpoints::reports::ReportsApi;
pub use error::ApiError;
pub use resource::{Crud, PatientScoped, Resource};
