use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use memoria_shared::{Roster, RosterAudit, RosterError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Roster {
        path: PathBuf,
        source: RosterError,
    },
}

/// Roster as served: parsed once at startup, pre-serialized, never mutated.
#[derive(Debug)]
pub struct LoadedRoster {
    pub roster: Roster,
    pub audit: RosterAudit,
    pub json: Bytes,
    pub etag: String,
    pub loaded_at: DateTime<Utc>,
}

impl LoadedRoster {
    pub fn from_roster(roster: Roster) -> Result<Self, RosterError> {
        let json = Bytes::from(roster.to_json_bytes()?);
        let etag = format!("\"roster-{:08x}\"", crc32fast::hash(&json));
        let audit = roster.audit();
        Ok(Self {
            roster,
            audit,
            json,
            etag,
            loaded_at: Utc::now(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Roster::from_json(&raw)
            .and_then(Self::from_roster)
            .map_err(|source| LoadError::Roster {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<LoadedRoster>,
    pub images_dir: PathBuf,
    pub dist_dir: PathBuf,
}

impl AppState {
    pub fn new(roster: LoadedRoster, images_dir: PathBuf, dist_dir: PathBuf) -> Self {
        Self {
            roster: Arc::new(roster),
            images_dir,
            dist_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{LoadError, LoadedRoster};

    const ROSTER: &str = r##"[
        {"name":"Alice","version":"Default","color":"#ea9999","image":"alice.webp",
         "tier":"10 (Best)","role":"Healer","row_id":1,"rank_index":1},
        {"name":"Alice","version":"Default","color":"#ea9999","image":"alice.webp",
         "tier":"10 (Best)","role":"Healer","row_id":1,"rank_index":2}
    ]"##;

    #[test]
    fn loads_and_fingerprints_roster_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(ROSTER.as_bytes()).expect("write roster");

        let loaded = LoadedRoster::load(file.path()).expect("roster should load");
        assert_eq!(loaded.roster.len(), 2);
        assert!(loaded.audit.is_clean());
        assert!(loaded.etag.starts_with("\"roster-"));

        let again = LoadedRoster::load(file.path()).expect("roster should load");
        assert_eq!(loaded.etag, again.etag);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = LoadedRoster::load(&dir.path().join("absent.json"))
            .expect_err("missing file must fail");
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn duplicate_rank_index_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(ROSTER.replace("\"rank_index\":2", "\"rank_index\":1").as_bytes())
            .expect("write roster");
        let err = LoadedRoster::load(file.path()).expect_err("duplicate must fail");
        assert!(matches!(err, LoadError::Roster { .. }));
        assert!(err.to_string().contains("duplicate rank_index 1"));
    }
}
