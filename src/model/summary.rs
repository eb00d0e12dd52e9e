// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::paths::ArtifactKind;

/// What an operation actually did to one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactOutcome {
    Created,
    Updated,
    /// Rewritten with identical bytes, or absent before and after.
    Unchanged,
    Deleted,
    /// Not applicable for this identity (e.g. preview copies).
    Skipped,
    /// A best-effort step failed; see the summary warnings.
    Failed,
}

impl ArtifactOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
            Self::Deleted => "deleted",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ArtifactOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// Removing a stale or scratch file failed.
    Cleanup,
    /// Producing or writing a best-effort artifact failed.
    Generation,
    /// A derived artifact failed its consistency checks.
    Validation,
    /// The metadata catalog could not be refreshed.
    Refresh,
}

/// A non-fatal failure recorded while the pipeline kept going.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveWarning {
    pub artifact: ArtifactKind,
    pub kind: WarningKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SaveSummary {
    pub artifacts: BTreeMap<ArtifactKind, ArtifactOutcome>,
    pub cache_invalidated: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SaveWarning>,
}

impl SaveSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, artifact: ArtifactKind, outcome: ArtifactOutcome) {
        self.artifacts.insert(artifact, outcome);
    }

    pub fn outcome(&self, artifact: ArtifactKind) -> Option<ArtifactOutcome> {
        self.artifacts.get(&artifact).copied()
    }

    pub fn warn(&mut self, artifact: ArtifactKind, kind: WarningKind, message: impl Into<String>) {
        self.warnings.push(SaveWarning {
            artifact,
            kind,
            message: message.into(),
        });
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Folds another step's summary into this one; later outcomes win.
    pub fn merge(&mut self, other: SaveSummary) {
        self.artifacts.extend(other.artifacts);
        self.cache_invalidated |= other.cache_invalidated;
        self.warnings.extend(other.warnings);
    }
}
