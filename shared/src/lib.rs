// Data model and locale helpers shared across the workspace.
pub mod models;
pub mod utils;
