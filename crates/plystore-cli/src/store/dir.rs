// crates/plystore-cli/src/store/dir.rs

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::format::PlyRecord;
use super::{check_limits, validate_name, StorageBackend, StorageError, StoredDocument, StoredElement};

pub const RECORD_EXT: &str = "plyr";

/// One PLYR record file per document under `root`.
#[derive(Clone, Debug)]
pub struct DirBackend {
    root: PathBuf,
    zstd_level: i32,
}

impl DirBackend {
    pub fn open(root: impl Into<PathBuf>, zstd_level: i32) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root, zstd_level })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{RECORD_EXT}"))
    }
}

impl StorageBackend for DirBackend {
    fn exists(&self, name: &str) -> Result<bool, StorageError> {
        validate_name(name)?;
        Ok(self.record_path(name).is_file())
    }

    fn create(&self, name: &str, header_text: &str, elements: &[StoredElement]) -> Result<(), StorageError> {
        validate_name(name)?;
        check_limits(name, header_text, elements)?;

        let bytes = PlyRecord::encode(header_text, elements, self.zstd_level).map_err(|e| {
            StorageError::Corrupt {
                name: name.to_owned(),
                reason: format!("{e:#}"),
            }
        })?;

        // write aside, then link into place without clobbering
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;

        let path = self.record_path(name);
        match tmp.persist_noclobber(&path) {
            Ok(_) => {}
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                debug!(name, "create lost to existing record");
                return Err(StorageError::DuplicateName(name.to_owned()));
            }
            Err(e) => return Err(StorageError::Io(e.error)),
        }

        info!(name, elements = elements.len(), bytes = bytes.len(), "record stored");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<StoredDocument, StorageError> {
        validate_name(name)?;
        let path = self.record_path(name);
        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(name.to_owned()))
            }
            Err(e) => return Err(e.into()),
        };

        let record = PlyRecord::decode(&bytes).map_err(|e| StorageError::Corrupt {
            name: name.to_owned(),
            reason: format!("{e:#}"),
        })?;
        debug!(name, bytes = bytes.len(), "record loaded");

        Ok(StoredDocument {
            name: name.to_owned(),
            header_text: record.header_text,
            elements: record.elements,
        })
    }

    fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_name(stem).is_ok() {
                    names.push(stem.to_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
