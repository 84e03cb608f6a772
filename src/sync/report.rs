use std::fmt;

use tabled::{Table, settings::Style};

use crate::types::{EntityId, ReportTableRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Artist,
    Playlist,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityType::Artist => write!(f, "artist"),
            EntityType::Playlist => write!(f, "playlist"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Releases were compared; `new_releases` of them were dispatched.
    Releases {
        new_releases: usize,
        failed_downloads: usize,
    },
    /// Playlist fingerprint did not move.
    Unchanged,
    /// Playlist changed, downloads dispatched and the M3U file rewritten.
    Changed {
        tracks: usize,
        failed_downloads: usize,
    },
    Failed(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Releases {
                new_releases: 0, ..
            } => write!(f, "up to date"),
            Outcome::Releases {
                new_releases,
                failed_downloads: 0,
            } => write!(f, "{} new", new_releases),
            Outcome::Releases {
                new_releases,
                failed_downloads,
            } => write!(
                f,
                "{} new, {} download(s) failed",
                new_releases, failed_downloads
            ),
            Outcome::Unchanged => write!(f, "unchanged"),
            Outcome::Changed {
                tracks,
                failed_downloads: 0,
            } => write!(f, "updated ({} tracks)", tracks),
            Outcome::Changed {
                tracks,
                failed_downloads,
            } => write!(
                f,
                "updated ({} tracks), {} download(s) failed",
                tracks, failed_downloads
            ),
            Outcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub entity: EntityType,
    pub id: EntityId,
    pub name: String,
    pub outcome: Outcome,
}

/// What happened to every entity of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    entries: Vec<ReportEntry>,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: EntityType, id: EntityId, name: &str, outcome: Outcome) {
        self.entries.push(ReportEntry {
            entity,
            id,
            name: name.to_string(),
            outcome,
        });
    }

    pub fn extend(&mut self, other: SyncReport) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failures(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, Outcome::Failed(_)))
            .count()
    }

    pub fn table(&self) -> String {
        let rows: Vec<ReportTableRow> = self
            .entries
            .iter()
            .map(|e| ReportTableRow {
                kind: e.entity.to_string(),
                name: e.name.clone(),
                outcome: e.outcome.to_string(),
            })
            .collect();

        Table::new(rows).with(Style::rounded()).to_string()
    }
}
