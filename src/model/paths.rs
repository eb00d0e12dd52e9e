// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub const STRUCTURE_EXT: &str = ".cdfde";
pub const SETTINGS_EXT: &str = ".wcdf";
pub const DATA_ACCESS_EXT: &str = ".cda";
pub const SCRIPT_EXT: &str = ".cgg.js";
pub const WIDGET_REGISTRATION_EXT: &str = ".component.xml";

/// Stem suffix that marks a scratch (preview) copy of a definition.
pub const PREVIEW_MARKER: &str = "_tmp";

/// Every file the persistence layer knows how to produce or clean up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    Settings,
    Structure,
    DataAccess,
    Script,
    WidgetRegistration,
    TempStructure,
    TempDataAccess,
}

impl ArtifactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Structure => "structure",
            Self::DataAccess => "data-access",
            Self::Script => "script",
            Self::WidgetRegistration => "widget-registration",
            Self::TempStructure => "temp-structure",
            Self::TempDataAccess => "temp-data-access",
        }
    }

    /// Classifies a stored path by its suffix.
    ///
    /// Preview suffixes are checked before the plain ones, so `a_tmp.cdfde` is a
    /// `TempStructure` rather than a `Structure`.
    pub fn classify(path: &str) -> Option<Self> {
        const BY_SUFFIX: [(&str, ArtifactKind); 7] = [
            ("_tmp.cdfde", ArtifactKind::TempStructure),
            ("_tmp.cda", ArtifactKind::TempDataAccess),
            (WIDGET_REGISTRATION_EXT, ArtifactKind::WidgetRegistration),
            (SCRIPT_EXT, ArtifactKind::Script),
            (STRUCTURE_EXT, ArtifactKind::Structure),
            (SETTINGS_EXT, ArtifactKind::Settings),
            (DATA_ACCESS_EXT, ArtifactKind::DataAccess),
        ];

        BY_SUFFIX
            .iter()
            .find(|(suffix, _)| path.len() > suffix.len() && path.ends_with(suffix))
            .map(|(_, kind)| *kind)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path must not be empty")]
    Empty,
    #[error("expected {path:?} to end with {expected:?}")]
    UnexpectedSuffix {
        path: String,
        expected: &'static str,
    },
    #[error("path {path:?} has no file name")]
    EmptyStem { path: String },
    #[error("{path:?} is neither a structure (.cdfde) nor a settings (.wcdf) path")]
    UnrecognizedForm { path: String },
}

/// Replaces the structure extension of `structure_path` with `suffix`.
///
/// `derive("/public/sales.cdfde", ".cda")` yields `/public/sales.cda`. Inputs that do not end
/// with `.cdfde` are rejected instead of producing a malformed sibling path.
pub fn derive(structure_path: &str, suffix: &str) -> Result<String, PathError> {
    replace_suffix(structure_path, STRUCTURE_EXT, suffix)
}

fn replace_suffix(path: &str, from: &'static str, to: &str) -> Result<String, PathError> {
    let stem = strip_suffix(path, from)?;
    Ok(format!("{stem}{to}"))
}

fn strip_suffix<'a>(path: &'a str, suffix: &'static str) -> Result<&'a str, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }

    let Some(stem) = path.strip_suffix(suffix) else {
        return Err(PathError::UnexpectedSuffix {
            path: path.to_owned(),
            expected: suffix,
        });
    };

    if stem.is_empty() || stem.ends_with('/') {
        return Err(PathError::EmptyStem {
            path: path.to_owned(),
        });
    }

    Ok(stem)
}

/// The identity shared by a definition's settings and structure files.
///
/// Both syntactic forms (`x.wcdf`, `x.cdfde`) parse to the same value; every derived artifact
/// path is computed from the shared stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefinitionPath {
    stem: String,
}

impl DefinitionPath {
    pub fn from_structure(path: &str) -> Result<Self, PathError> {
        derive(path, "").map(|stem| Self { stem })
    }

    pub fn from_settings(path: &str) -> Result<Self, PathError> {
        replace_suffix(path, SETTINGS_EXT, "").map(|stem| Self { stem })
    }

    /// Accepts either form.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        if path.ends_with(STRUCTURE_EXT) {
            return Self::from_structure(path);
        }
        if path.ends_with(SETTINGS_EXT) {
            return Self::from_settings(path);
        }
        Err(PathError::UnrecognizedForm {
            path: path.to_owned(),
        })
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// File name without directory or extension.
    pub fn name(&self) -> &str {
        self.stem
            .rsplit_once('/')
            .map_or(self.stem.as_str(), |(_, name)| name)
    }

    pub fn is_preview(&self) -> bool {
        self.stem.ends_with(PREVIEW_MARKER)
    }

    /// The scratch sibling edited by the designer before an explicit save.
    pub fn preview(&self) -> Self {
        if self.is_preview() {
            return self.clone();
        }
        Self {
            stem: format!("{}{PREVIEW_MARKER}", self.stem),
        }
    }

    pub fn structure_path(&self) -> String {
        self.with_suffix(STRUCTURE_EXT)
    }

    pub fn settings_path(&self) -> String {
        self.with_suffix(SETTINGS_EXT)
    }

    pub fn data_access_path(&self) -> String {
        self.with_suffix(DATA_ACCESS_EXT)
    }

    pub fn script_path(&self) -> String {
        self.with_suffix(SCRIPT_EXT)
    }

    pub fn widget_registration_path(&self) -> String {
        self.with_suffix(WIDGET_REGISTRATION_EXT)
    }

    pub fn artifact_path(&self, kind: ArtifactKind) -> String {
        match kind {
            ArtifactKind::Settings => self.settings_path(),
            ArtifactKind::Structure => self.structure_path(),
            ArtifactKind::DataAccess => self.data_access_path(),
            ArtifactKind::Script => self.script_path(),
            ArtifactKind::WidgetRegistration => self.widget_registration_path(),
            ArtifactKind::TempStructure => self.preview().structure_path(),
            ArtifactKind::TempDataAccess => self.preview().data_access_path(),
        }
    }

    fn with_suffix(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.stem)
    }
}

impl fmt::Display for DefinitionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stem)
    }
}
