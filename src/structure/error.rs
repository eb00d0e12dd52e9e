// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use thiserror::Error;

use crate::format::FormatError;
use crate::model::{ArtifactKind, PathError};
use crate::services::CollaboratorError;
use crate::store::StorageError;

/// Fatal failure of a dashboard operation.
///
/// Artifacts written by earlier steps stay in place; the failing step's artifact is either fully
/// written or untouched.
#[derive(Debug, Error)]
pub enum StructureError {
    #[error("failed to persist {artifact} at {path:?}")]
    Persistence {
        artifact: ArtifactKind,
        path: String,
        #[source]
        source: StorageError,
    },
    #[error("{path:?} does not exist")]
    NotFound { path: String },
    #[error("invalid settings: {reason}")]
    Validation { reason: String },
    #[error(transparent)]
    InvalidPath(#[from] PathError),
    #[error("missing required parameter {key:?}")]
    MissingParameter { key: &'static str },
    #[error("failed to generate {artifact}")]
    Generation {
        artifact: ArtifactKind,
        #[source]
        source: CollaboratorError,
    },
    #[error("failed to load {path:?}")]
    Load {
        path: String,
        #[source]
        source: LoadError,
    },
    #[error("failed to read system resource {path:?}")]
    Resource {
        path: String,
        #[source]
        source: LoadError,
    },
}

impl StructureError {
    /// The artifact a persistence or generation failure refers to.
    pub fn artifact(&self) -> Option<ArtifactKind> {
        match self {
            Self::Persistence { artifact, .. } | Self::Generation { artifact, .. } => {
                Some(*artifact)
            }
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub(crate) fn persistence(artifact: ArtifactKind, path: &str, source: StorageError) -> Self {
        Self::Persistence {
            artifact,
            path: path.to_owned(),
            source,
        }
    }

    pub(crate) fn generation(artifact: ArtifactKind, source: CollaboratorError) -> Self {
        Self::Generation { artifact, source }
    }

    pub(crate) fn load(path: &str, source: impl Into<LoadError>) -> Self {
        Self::Load {
            path: path.to_owned(),
            source: source.into(),
        }
    }

    pub(crate) fn resource(path: &str, source: impl Into<LoadError>) -> Self {
        Self::Resource {
            path: path.to_owned(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::StructureError;
    use crate::model::ArtifactKind;
    use crate::services::CollaboratorError;
    use crate::store::StorageError;

    #[test]
    fn artifact_tag_is_exposed_for_step_failures() {
        let err = StructureError::persistence(
            ArtifactKind::DataAccess,
            "/a.cda",
            StorageError::NotFound {
                path: "/a.cda".to_owned(),
            },
        );
        assert_eq!(err.artifact(), Some(ArtifactKind::DataAccess));
        assert_eq!(err.to_string(), "failed to persist data-access at \"/a.cda\"");

        let err = StructureError::generation(ArtifactKind::Script, CollaboratorError::new("boom"));
        assert_eq!(err.artifact(), Some(ArtifactKind::Script));

        let err = StructureError::NotFound {
            path: "/a.wcdf".to_owned(),
        };
        assert_eq!(err.artifact(), None);
        assert!(err.is_not_found());
    }
}
