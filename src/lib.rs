pub mod api;
pub mod config;
pub mod core_state;
pub mod feedback;
pub mod layout;
pub mod messages;
pub mod models;
pub mod policy;
pub mod router;
pub mod screens;
pub mod session;
pub mod storage;
pub mod views;

#[cfg(test)]
pub(crate) mod mock_backend;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter. Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    if result.is_ok() {
        tracing::info!("{} client v{}", config::APP_NAME, config::APP_VERSION);
    }
}
