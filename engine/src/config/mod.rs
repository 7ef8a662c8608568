pub mod settings;

pub use settings::{ColumnNames, DashboardSettings};
