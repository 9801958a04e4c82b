use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{session::Session, snapshot::Snapshot, store_error::StoreError};

const APP_DIR: &str = "barloader";
const STATE_FILE: &str = "state.json";

/// Saved session state in a single JSON file.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        StateStore { path }
    }

    /// `<data_dir>/barloader/state.json`
    ///
    /// # Errors
    /// If the platform has no data directory.
    pub fn default_path() -> Result<PathBuf, StoreError> {
        let dir = dirs::data_dir().ok_or(StoreError::NoDirectory("data"))?;
        Ok(dir.join(APP_DIR).join(STATE_FILE))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads the saved snapshot. A missing or unreadable file yields the
    /// default snapshot; this never fails.
    #[must_use]
    pub fn load(&self) -> Snapshot {
        if !self.exists() {
            debug!(path = %self.path.display(), "no saved state, using defaults");
            return Snapshot::default();
        }

        match self.read() {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "failed to load state, using defaults");
                Snapshot::default()
            }
        }
    }

    /// Loads the saved session. The flag is true when the saved state had to
    /// be corrected on the way in and should be written back.
    #[must_use]
    pub fn load_session(&self) -> (Session, bool) {
        self.load().into_session()
    }

    /// Loads the saved session, or starts from `fresh` when nothing has been
    /// saved. The flag is as for [`StateStore::load_session`].
    #[must_use]
    pub fn load_or(&self, fresh: impl FnOnce() -> Session) -> (Session, bool) {
        if self.exists() {
            self.load_session()
        } else {
            (fresh(), false)
        }
    }

    fn read(&self) -> Result<Snapshot, StoreError> {
        let reader = BufReader::new(File::open(&self.path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// # Errors
    /// If the directory cannot be created or the file cannot be written.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writer.flush()?;
        debug!(path = %self.path.display(), "saved state");
        Ok(())
    }

    /// # Errors
    /// See [`StateStore::save`].
    pub fn save_session(&self, session: &Session) -> Result<(), StoreError> {
        self.save(&Snapshot::from(session))
    }
}
