//! Filesystem-backed model store.
//!
//! One file per `(db, store_index)` key, named `{db}.{index}.model` inside
//! the store directory. Saves write to a temporary file in the same directory
//! and rename it over the entry, so concurrent readers see either the old
//! artifact or the new one, never a partial write.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Result, SyntError};
use crate::model::{decode, encode, entry_name, ModelArtifact, ModelStore};

/// A model store writing artifacts under a directory.
#[derive(Clone, Debug)]
pub struct FileModelStore {
    dir: PathBuf,
}

impl FileModelStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            SyntError::storage(format!("cannot create model store {}: {e}", dir.display()))
        })?;
        Ok(FileModelStore { dir })
    }

    /// The store's root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, db: &str, store_index: u32) -> PathBuf {
        self.dir.join(entry_name(db, store_index))
    }
}

impl ModelStore for FileModelStore {
    fn save(&self, db: &str, store_index: u32, artifact: &ModelArtifact) -> Result<()> {
        let bytes = encode(artifact)?;
        let path = self.entry_path(db, store_index);
        let tmp = path.with_extension("model.tmp");

        fs::write(&tmp, &bytes).map_err(|e| {
            SyntError::storage(format!("cannot write model {}: {e}", tmp.display()))
        })?;
        // Rename within the same directory makes the replacement atomic.
        fs::rename(&tmp, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            SyntError::storage(format!("cannot commit model {}: {e}", path.display()))
        })?;

        debug!("saved model {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    fn load(&self, db: &str, store_index: u32) -> Result<ModelArtifact> {
        let path = self.entry_path(db, store_index);
        if !path.is_file() {
            return Err(SyntError::not_found(format!(
                "no model for db '{db}' at store index {store_index}"
            )));
        }
        let bytes = fs::read(&path)
            .map_err(|e| SyntError::storage(format!("cannot read model {}: {e}", path.display())))?;
        decode(&bytes)
    }

    fn exists(&self, db: &str, store_index: u32) -> bool {
        self.entry_path(db, store_index).is_file()
    }

    fn purge(&self, db: &str, store_index: u32) -> Result<()> {
        let path = self.entry_path(db, store_index);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("purged model {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SyntError::storage(format!(
                "cannot purge model {}: {e}",
                path.display()
            ))),
        }
    }
}
