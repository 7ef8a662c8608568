// Sales dashboard engine: ingestion, classification, filtering and aggregation
// of marketplace order exports.

pub mod analytics;
pub mod classify;
pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod report;
pub mod state;

pub use error::{EngineError, Result};
pub use state::DashboardState;
