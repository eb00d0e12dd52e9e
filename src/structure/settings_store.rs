// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{Map, Value};

use super::StructureError;
use crate::format::{export_settings, parse_settings};
use crate::model::{ArtifactKind, ArtifactOutcome, SettingsDescriptor};
use crate::services::CollaboratorError;
use crate::store::{write_artifact, ContentAccess};

/// Loads, updates and persists `.wcdf` settings descriptors.
pub struct SettingsStore<'a> {
    storage: &'a dyn ContentAccess,
}

impl<'a> SettingsStore<'a> {
    pub fn new(storage: &'a dyn ContentAccess) -> Self {
        Self { storage }
    }

    /// Reads `path`, or returns a default descriptor when nothing is stored there.
    pub fn load(&self, path: &str) -> Result<SettingsDescriptor, StructureError> {
        Ok(self
            .read(path)?
            .unwrap_or_else(|| SettingsDescriptor::new(path)))
    }

    /// Like [`Self::load`], but absence is an error.
    pub fn load_required(&self, path: &str) -> Result<SettingsDescriptor, StructureError> {
        self.read(path)?.ok_or_else(|| StructureError::NotFound {
            path: path.to_owned(),
        })
    }

    /// Applies `overrides`; on error the descriptor is left as it was.
    pub fn update(
        &self,
        descriptor: &mut SettingsDescriptor,
        overrides: &Map<String, Value>,
    ) -> Result<(), StructureError> {
        descriptor
            .update(overrides)
            .map_err(|err| StructureError::Validation {
                reason: err.to_string(),
            })
    }

    pub fn persist(
        &self,
        path: &str,
        descriptor: &SettingsDescriptor,
    ) -> Result<ArtifactOutcome, StructureError> {
        let text = export_settings(descriptor).map_err(|err| {
            StructureError::generation(ArtifactKind::Settings, CollaboratorError::from(err))
        })?;

        write_artifact(self.storage, path, text.as_bytes())
            .map_err(|err| StructureError::persistence(ArtifactKind::Settings, path, err))
    }

    fn read(&self, path: &str) -> Result<Option<SettingsDescriptor>, StructureError> {
        let text = match self.storage.read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.is_not_found() => return Ok(None),
            Err(err) => return Err(StructureError::load(path, err)),
        };

        parse_settings(path, &text)
            .map(Some)
            .map_err(|err| StructureError::load(path, err))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map, Value};

    use super::SettingsStore;
    use crate::model::{ArtifactOutcome, RendererType};
    use crate::store::{MemoryContentAccess, StorageError};
    use crate::structure::{LoadError, StructureError};

    fn overrides(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn absent_settings_load_as_defaults() {
        let storage = MemoryContentAccess::new();
        let settings = SettingsStore::new(&storage).load("/a.wcdf").unwrap();
        assert_eq!(settings.path, "/a.wcdf");
        assert_eq!(settings.renderer_type, RendererType::Blueprint);
        assert!(!settings.widget);
    }

    #[test]
    fn load_required_reports_absence_as_not_found() {
        let storage = MemoryContentAccess::new();
        let err = SettingsStore::new(&storage).load_required("/a.wcdf").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn unparsable_settings_are_a_load_failure() {
        let storage = MemoryContentAccess::new();
        storage.insert("/a.wcdf", "<dashboard/>");
        let err = SettingsStore::new(&storage).load("/a.wcdf").unwrap_err();
        assert!(matches!(
            err,
            StructureError::Load {
                source: LoadError::Format(_),
                ..
            }
        ));
    }

    #[test]
    fn settings_that_are_not_utf8_are_a_load_failure() {
        let storage = MemoryContentAccess::new();
        storage.insert("/a.wcdf", &b"<cdf><title>Caf\xE9</title></cdf>"[..]);
        let err = SettingsStore::new(&storage).load("/a.wcdf").unwrap_err();
        assert!(matches!(
            err,
            StructureError::Load {
                source: LoadError::Storage(StorageError::Utf8 { .. }),
                ..
            }
        ));
    }

    #[test]
    fn update_then_persist_round_trips() {
        let storage = MemoryContentAccess::new();
        let store = SettingsStore::new(&storage);

        let mut settings = store.load("/a.wcdf").unwrap();
        store
            .update(&mut settings, &overrides(json!({ "title": "A", "widget": true })))
            .unwrap();
        assert_eq!(store.persist("/a.wcdf", &settings).unwrap(), ArtifactOutcome::Created);
        assert_eq!(store.persist("/a.wcdf", &settings).unwrap(), ArtifactOutcome::Unchanged);

        assert_eq!(store.load_required("/a.wcdf").unwrap(), settings);
    }

    #[test]
    fn invalid_override_is_a_validation_failure() {
        let storage = MemoryContentAccess::new();
        let store = SettingsStore::new(&storage);
        let mut settings = store.load("/a.wcdf").unwrap();

        let err = store
            .update(&mut settings, &overrides(json!({ "rendererType": "flash" })))
            .unwrap_err();
        assert!(matches!(err, StructureError::Validation { .. }));
    }

    #[test]
    fn failed_write_keeps_the_previous_document() {
        let storage = MemoryContentAccess::new();
        storage.insert("/a.wcdf", "<cdf><title>Old</title></cdf>");
        storage.fail_writes_to("/a.wcdf");
        let store = SettingsStore::new(&storage);

        let mut settings = store.load_required("/a.wcdf").unwrap();
        settings.title = "New".to_owned();
        let err = store.persist("/a.wcdf", &settings).unwrap_err();

        assert!(matches!(err, StructureError::Persistence { .. }));
        assert_eq!(
            storage.get_string("/a.wcdf").as_deref(),
            Some("<cdf><title>Old</title></cdf>")
        );
    }
}
