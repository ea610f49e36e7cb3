use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds configuration only; datasets are reloaded on every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
