//! # CLI Module
//!
//! Drives the two sync phases with console feedback:
//!
//! - [`releases`] - lists followed artists, then downloads their new releases
//! - [`playlists`] - lists followed playlists, then syncs each into an M3U file
//!
//! [`run`] executes the selected phases in order and prints a summary table.
//! A phase that cannot even list its entities is reported and makes the run
//! unclean, but does not stop the other phase.

mod app;
mod playlists;
mod releases;

pub use app::App;
pub use playlists::playlists;
pub use releases::releases;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{success, sync::SyncReport, warning};

/// Which phases a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phases {
    pub releases: bool,
    pub playlists: bool,
}

impl Phases {
    pub const ALL: Phases = Phases {
        releases: true,
        playlists: true,
    };
}

/// Runs the selected phases. Returns `false` when a phase could not run.
pub async fn run(app: &App, phases: Phases) -> bool {
    let mut report = SyncReport::new();
    let mut clean = true;

    if phases.releases {
        match releases(app).await {
            Ok(r) => report.extend(r),
            Err(e) => {
                warning!("Cannot fetch followed artists. Err: {}", e);
                clean = false;
            }
        }
    }

    if phases.playlists {
        match playlists(app).await {
            Ok(r) => report.extend(r),
            Err(e) => {
                warning!("Cannot fetch followed playlists. Err: {}", e);
                clean = false;
            }
        }
    }

    if !report.is_empty() {
        println!("{}", report.table());
    }

    match report.failures() {
        0 if clean => success!("Sync finished."),
        0 => {}
        n => warning!("{} item(s) failed and will be retried on the next run.", n),
    }

    clean
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
