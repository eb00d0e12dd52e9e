// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Content storage.
//!
//! Artifacts are addressed by repository paths such as `/public/sales.wcdf`. Backends must make
//! single-file writes atomic: readers see either the previous bytes or the new ones.

pub mod fs_access;
pub mod memory;

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

use crate::model::ArtifactOutcome;

pub use fs_access::{FsContentAccess, WriteDurability};
pub use memory::MemoryContentAccess;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("nothing stored at {path:?}")]
    NotFound { path: String },
    #[error("invalid repository path {path:?}")]
    InvalidPath { path: String },
    #[error("refusing to write through symlink at {path:?}")]
    SymlinkRefused { path: PathBuf },
    #[error("content at {path:?} is not valid UTF-8")]
    Utf8 {
        path: String,
        #[source]
        source: FromUtf8Error,
    },
    #[error("{operation} rejected at {path:?}: {reason}")]
    Rejected {
        operation: &'static str,
        path: String,
        reason: String,
    },
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Storage collaborator used for both user content and system (plugin) content.
pub trait ContentAccess: fmt::Debug + Send + Sync {
    fn exists(&self, path: &str) -> bool;

    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    fn write(&self, path: &str, contents: &[u8]) -> Result<(), StorageError>;

    /// Removes `path`; returns `Ok(false)` when nothing was stored there.
    fn delete(&self, path: &str) -> Result<bool, StorageError>;

    fn read_optional(&self, path: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match self.read(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn read_to_string(&self, path: &str) -> Result<String, StorageError> {
        let contents = self.read(path)?;
        String::from_utf8(contents).map_err(|source| StorageError::Utf8 {
            path: path.to_owned(),
            source,
        })
    }
}

/// Writes `contents` verbatim and reports how the stored artifact changed.
pub fn write_artifact(
    storage: &dyn ContentAccess,
    path: &str,
    contents: &[u8],
) -> Result<ArtifactOutcome, StorageError> {
    let outcome = match storage.read_optional(path) {
        Ok(None) => ArtifactOutcome::Created,
        Ok(Some(previous)) if previous == contents => ArtifactOutcome::Unchanged,
        Ok(Some(_)) => ArtifactOutcome::Updated,
        // The write below is what matters; an unreadable predecessor counts as replaced.
        Err(_) => ArtifactOutcome::Updated,
    };

    storage.write(path, contents)?;
    Ok(outcome)
}

/// Removes a derived artifact that should no longer exist.
pub fn remove_artifact(
    storage: &dyn ContentAccess,
    path: &str,
) -> Result<ArtifactOutcome, StorageError> {
    if storage.delete(path)? {
        Ok(ArtifactOutcome::Deleted)
    } else {
        Ok(ArtifactOutcome::Unchanged)
    }
}
