//! Sound-bank files on their way to the engine.

use std::path::{Path, PathBuf};

use crate::error::SessionError;

/// The raw contents of a sound-bank file. Never empty.
///
/// The bytes are opaque here; only the engine knows the format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundBank {
    name: String,
    bytes: Vec<u8>,
}

impl SoundBank {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, SessionError> {
        if bytes.is_empty() {
            return Err(SessionError::EmptyBank);
        }
        Ok(Self {
            name: name.into(),
            bytes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// The user's file choice, not yet read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankSelection {
    Path(PathBuf),
    /// Contents already in memory (drag-and-drop, tests).
    Memory { name: String, bytes: Vec<u8> },
}

impl BankSelection {
    pub fn display_name(&self) -> String {
        match self {
            BankSelection::Path(path) => file_name(path),
            BankSelection::Memory { name, .. } => name.clone(),
        }
    }

    /// Read the selection into a `SoundBank` without blocking the caller's thread.
    pub async fn read(self) -> Result<SoundBank, SessionError> {
        match self {
            BankSelection::Path(path) => {
                let bytes = async_std::fs::read(&path)
                    .await
                    .map_err(|source| SessionError::Read {
                        path: path.clone(),
                        source,
                    })?;
                SoundBank::new(file_name(&path), bytes)
            }
            BankSelection::Memory { name, bytes } => SoundBank::new(name, bytes),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_bank_is_rejected() {
        assert!(matches!(
            SoundBank::new("x.sf2", Vec::new()),
            Err(SessionError::EmptyBank)
        ));
    }

    #[test]
    fn read_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".sf2").tempfile().unwrap();
        file.write_all(&[7u8; 1000]).unwrap();
        let selection = BankSelection::Path(file.path().to_path_buf());
        let name = selection.display_name();

        let bank = async_std::task::block_on(selection.read()).unwrap();
        assert_eq!(bank.len(), 1000);
        assert_eq!(bank.name(), name);
        assert!(name.ends_with(".sf2"));
    }

    #[test]
    fn missing_file_is_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.sf2");
        let err = async_std::task::block_on(BankSelection::Path(path.clone()).read()).unwrap_err();
        match err {
            SessionError::Read { path: p, .. } => assert_eq!(p, path),
            other => panic!("Expected Read, got {:?}", other),
        }
    }

    #[test]
    fn empty_file_on_disk_is_read_failure() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = async_std::task::block_on(BankSelection::Path(file.path().to_path_buf()).read())
            .unwrap_err();
        assert!(err.is_read_failure());
    }
}
