// College eligibility prediction: CSV loading, filtering and the HTTP handler.

pub mod handlers;
pub mod loader;
pub mod models;
pub mod predictor;
