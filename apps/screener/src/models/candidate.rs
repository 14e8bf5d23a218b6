use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::errors::ScreenError;

/// Extensions the analysis service can parse. Compared case-insensitively.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// Where a candidate document's bytes come from.
#[derive(Debug, Clone)]
pub enum FileHandle {
    /// Read lazily when the submission is built.
    Path(PathBuf),
    #[cfg(test)]
    Memory(Bytes),
}

/// A user-supplied document queued for analysis. Identity is `name`.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub name: String,
    pub size_bytes: u64,
    pub handle: FileHandle,
}

impl CandidateFile {
    #[cfg(test)]
    pub fn from_bytes(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            size_bytes: content.len() as u64,
            handle: FileHandle::Memory(content),
        }
    }

    /// Stats a file on disk without reading it.
    pub async fn from_path(path: &Path) -> Result<Self, ScreenError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| ScreenError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            size_bytes: metadata.len(),
            handle: FileHandle::Path(path.to_path_buf()),
        })
    }

    /// Matches the suffix after the last `.`, so a bare `.pdf` name counts too.
    pub fn has_accepted_extension(&self) -> bool {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| {
                ACCEPTED_EXTENSIONS
                    .iter()
                    .any(|accepted| ext.eq_ignore_ascii_case(accepted))
            })
            .unwrap_or(false)
    }

    /// Size in KiB with one decimal, as shown next to queued files.
    pub fn size_kib(&self) -> String {
        format!("{:.1} KB", self.size_bytes as f64 / 1024.0)
    }

    /// Loads the document content for upload.
    pub async fn read(&self) -> Result<Bytes, ScreenError> {
        match &self.handle {
            #[cfg(test)]
            FileHandle::Memory(content) => Ok(content.clone()),
            FileHandle::Path(path) => tokio::fs::read(path)
                .await
                .map(Bytes::from)
                .map_err(|source| ScreenError::Io {
                    path: path.clone(),
                    source,
                }),
        }
    }
}
