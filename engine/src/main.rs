// sales-dashboard: load an order export and print the dashboard views.
use anyhow::{Context, Result};
use clap::Parser;
use engine::config::DashboardSettings;
use engine::report;
use engine::DashboardState;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "sales-dashboard")]
#[command(about = "Sales dashboard views for a marketplace order export", long_about = None)]
struct Args {
    /// Order export (.csv, .txt, .xlsx or .xls)
    data_file: PathBuf,
    /// JSON settings file with column names and view sizes
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory for the `;`-delimited table exports
    #[arg(long)]
    export: Option<PathBuf>,
}

/// Loads `path` into `state`. Unreadable or unsupported files are logged and
/// leave the state (and therefore the views) as they were.
async fn load_into(state: &mut DashboardState, path: &Path) -> bool {
    match state.load_path(path).await {
        Ok(true) => true,
        Ok(false) => {
            info!(file = %path.display(), "File type not supported, nothing loaded");
            false
        }
        Err(e) => {
            warn!(file = %path.display(), error = %e, "Could not load file, showing empty views");
            false
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => DashboardSettings::from_json_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => DashboardSettings::default(),
    };

    let mut state = DashboardState::new(settings);
    load_into(&mut state, &args.data_file).await;

    let view = state.view();
    report::write_json(&view, std::io::stdout().lock())?;
    println!();

    if let Some(dir) = &args.export {
        report::export_tables(&view, dir).with_context(|| format!("failed to export tables to {}", dir.display()))?;
    }
    Ok(())
}
