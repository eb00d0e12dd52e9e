// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Store configuration (`--config <file>`, JSON).
//!
//! ```json
//! { "content_root": "repo", "durable_writes": true, "log_filter": "dashvault=debug" }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::store::{FsContentAccess, WriteDurability};
use crate::structure::StructureContext;

/// System content lives here, relative to the content root, unless configured otherwise.
pub const DEFAULT_SYSTEM_DIR: &str = ".dashvault";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub content_root: Option<PathBuf>,
    pub system_root: Option<PathBuf>,
    pub durable_writes: bool,
    pub log_filter: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn content_root(&self) -> PathBuf {
        self.content_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn system_root(&self) -> PathBuf {
        self.system_root
            .clone()
            .unwrap_or_else(|| self.content_root().join(DEFAULT_SYSTEM_DIR))
    }

    pub fn durability(&self) -> WriteDurability {
        if self.durable_writes {
            WriteDurability::Durable
        } else {
            WriteDurability::BestEffort
        }
    }

    /// Filesystem-backed context with the built-in collaborators.
    pub fn open(&self) -> StructureContext {
        let durability = self.durability();
        let user = FsContentAccess::new(self.content_root()).with_durability(durability);
        let system = FsContentAccess::new(self.system_root()).with_durability(durability);
        StructureContext::new(Arc::new(user), Arc::new(system))
    }
}
