// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Collaborators the persistence core calls out to.
//!
//! The orchestrator owns none of these; they are handed in through
//! [`crate::structure::StructureContext`] so tests and embedders can swap them.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::format::{parse_settings, FormatError};
use crate::model::{ArtifactOutcome, DefinitionPath, PropertyCatalog, SettingsDescriptor};
use crate::store::{remove_artifact, write_artifact, ContentAccess, StorageError};

type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

/// Failure reported by a collaborator.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CollaboratorError {
    message: String,
    #[source]
    source: Option<BoxedSource>,
}

impl CollaboratorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<StorageError> for CollaboratorError {
    fn from(err: StorageError) -> Self {
        Self::with_source("storage access failed", err)
    }
}

impl From<FormatError> for CollaboratorError {
    fn from(err: FormatError) -> Self {
        Self::with_source("malformed descriptor", err)
    }
}

/// Output of a data-access generator for one structure body.
pub trait DataAccessRender {
    /// `true` when the structure declares no data sources; no `.cda` should exist then.
    fn is_empty(&self) -> bool;

    fn render(&self) -> Result<String, CollaboratorError>;
}

pub trait DataAccessGenerator: fmt::Debug + Send + Sync {
    fn from_structure(&self, structure: &str)
        -> Result<Box<dyn DataAccessRender>, CollaboratorError>;
}

/// Cache of pre-rendered dashboards, keyed by settings path.
pub trait DefinitionCache: fmt::Debug + Send + Sync {
    fn invalidate(&self, settings_path: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

impl DefinitionCache for NoopCache {
    fn invalidate(&self, settings_path: &str) {
        tracing::trace!(path = %settings_path, "no render cache configured");
    }
}

/// Process-local render cache.
#[derive(Debug, Default)]
pub struct RenderCache {
    entries: Mutex<BTreeMap<String, String>>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn put(&self, settings_path: impl Into<String>, rendered: impl Into<String>) {
        self.entries().insert(settings_path.into(), rendered.into());
    }

    pub fn get(&self, settings_path: &str) -> Option<String> {
        self.entries().get(settings_path).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl DefinitionCache for RenderCache {
    fn invalidate(&self, settings_path: &str) {
        if self.entries().remove(settings_path).is_some() {
            tracing::debug!(path = %settings_path, "dropped cached render");
        }
    }
}

/// Tracks component registrations and the property types they may use.
pub trait MetadataCatalog: fmt::Debug + Send + Sync {
    fn property_catalog(&self) -> Arc<PropertyCatalog>;

    /// Re-reads component registrations; `refresh_data_sources` also reloads data-source types.
    fn refresh(&self, refresh_data_sources: bool) -> Result<(), CollaboratorError>;
}

/// Catalog whose property types are fixed unless replaced.
#[derive(Debug)]
pub struct StaticCatalog {
    catalog: RwLock<Arc<PropertyCatalog>>,
}

impl StaticCatalog {
    pub fn new(catalog: PropertyCatalog) -> Self {
        Self {
            catalog: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn replace(&self, catalog: PropertyCatalog) {
        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(catalog);
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(PropertyCatalog::builtin())
    }
}

impl MetadataCatalog for StaticCatalog {
    fn property_catalog(&self) -> Arc<PropertyCatalog> {
        self.catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn refresh(&self, refresh_data_sources: bool) -> Result<(), CollaboratorError> {
        tracing::debug!(refresh_data_sources, "static catalog refresh");
        Ok(())
    }
}

/// A definition as currently persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Definition {
    #[serde(skip)]
    pub path: DefinitionPath,
    pub settings: SettingsDescriptor,
    pub structure: Value,
}

/// Loads definitions straight from storage, bypassing any read cache.
pub trait DefinitionLoader: fmt::Debug + Send + Sync {
    fn load_fresh(&self, settings_path: &str) -> Result<Definition, CollaboratorError>;
}

#[derive(Debug, Clone)]
pub struct StorageDefinitionLoader {
    storage: Arc<dyn ContentAccess>,
}

impl StorageDefinitionLoader {
    pub fn new(storage: Arc<dyn ContentAccess>) -> Self {
        Self { storage }
    }
}

impl DefinitionLoader for StorageDefinitionLoader {
    fn load_fresh(&self, settings_path: &str) -> Result<Definition, CollaboratorError> {
        let path = DefinitionPath::from_settings(settings_path)
            .map_err(|err| CollaboratorError::with_source("not a settings path", err))?;

        let settings = match self.storage.read_to_string(settings_path) {
            Ok(text) => parse_settings(settings_path, &text)?,
            Err(err) if err.is_not_found() => SettingsDescriptor::new(settings_path),
            Err(err) => return Err(err.into()),
        };

        let structure_path = path.structure_path();
        let text = self.storage.read_to_string(&structure_path)?;
        let structure = serde_json::from_str(&text).map_err(|err| {
            CollaboratorError::with_source(format!("structure {structure_path} is not JSON"), err)
        })?;

        Ok(Definition {
            path,
            settings,
            structure,
        })
    }
}

/// Produces the `.cgg.js` script descriptor of a definition.
pub trait ScriptGenerator: fmt::Debug + Send + Sync {
    /// Empty output means the definition needs no script.
    fn generate(&self, definition: &Definition) -> Result<String, CollaboratorError>;

    /// Stores `script` next to the definition, or removes a stale script when it is empty.
    fn write(
        &self,
        storage: &dyn ContentAccess,
        definition: &Definition,
        script: &str,
    ) -> Result<ArtifactOutcome, StorageError> {
        let path = definition.path.script_path();
        if script.is_empty() {
            remove_artifact(storage, &path)
        } else {
            write_artifact(storage, &path, script.as_bytes())
        }
    }
}
