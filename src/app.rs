use std::env;
use std::io;

use crate::core::{
    alerts::engine::RunSummary,
    config::Paths,
    coordinator::Coordinator,
    error::{AttendanceError, Result},
};

fn init_logging() {
    // Ignore a second init (tests, embedding callers)
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Entry point: treats the working directory as the installation directory.
pub fn run() -> Result<RunSummary> {
    init_logging();

    let base_dir = env::current_dir().map_err(|e| AttendanceError::io(".", e))?;
    let coordinator = Coordinator::new(Paths::from_install_dir(&base_dir));
    log::info!(
        "Checking attendance from {:?}, reporting to {:?}",
        coordinator.paths().records_path,
        coordinator.paths().report_file
    );

    let stdout = io::stdout();
    let summary = coordinator.run(stdout.lock())?;
    println!("{}", summary);
    Ok(summary)
}
