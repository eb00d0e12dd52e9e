// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dashboard persistence.
//!
//! A dashboard is stored as a structure (`.cdfde`) and settings (`.wcdf`) pair plus derived
//! files: the data-access descriptor (`.cda`), the render script (`.cgg.js`) and, for widgets, a
//! component registration in system content. [`DashboardStructure`] runs one pipeline per
//! operation and keeps the derived files consistent with what was just written:
//!
//! - `save`: drop preview copies, write the structure and its `.cda`, invalidate the cached
//!   render, regenerate the script from storage. Preview identities (`*_tmp`) only write.
//! - `saveas`: write settings from the template, then `save`.
//! - `newfile`: `saveas` with the empty structure.
//! - `savesettings`: update existing settings, then publish the widget registration if flagged.
//! - `delete`: remove one file.

mod error;
mod params;
mod persist;
mod publish;
mod resources;
mod script;
mod settings_store;


use std::sync::Arc;

use serde_json::{Map, Value};

pub use error::{LoadError, StructureError};
pub use params::{
    Operation, OperationOutput, OperationParams, ParseOperationError, DESCRIPTION_KEY, FILE_KEY,
    STRUCTURE_KEY, TITLE_KEY,
};
pub use resources::{
    fill_placeholder, Resources, DEFAULT_TITLE, DESCRIPTION_PLACEHOLDER, EMPTY_SETTINGS_PATH,
    EMPTY_STRUCTURE_PATH, TITLE_PLACEHOLDER,
};
pub use settings_store::SettingsStore;

use crate::generate::{ChartScriptGenerator, StructureDataAccessGenerator};
use crate::model::{ArtifactKind, ArtifactOutcome, DefinitionPath, PathError, SaveSummary};
use crate::services::{
    DataAccessGenerator, Definition, DefinitionCache, DefinitionLoader, MetadataCatalog,
    NoopCache, ScriptGenerator, StaticCatalog, StorageDefinitionLoader,
};
use crate::store::{write_artifact, ContentAccess};

/// Collaborators an operation runs against.
#[derive(Debug, Clone)]
pub struct StructureContext {
    user: Arc<dyn ContentAccess>,
    system: Arc<dyn ContentAccess>,
    data_access: Arc<dyn DataAccessGenerator>,
    cache: Arc<dyn DefinitionCache>,
    catalog: Arc<dyn MetadataCatalog>,
    loader: Arc<dyn DefinitionLoader>,
    scripts: Arc<dyn ScriptGenerator>,
}

impl StructureContext {
    /// Context with the built-in generators, no render cache and the builtin property catalog.
    pub fn new(user: Arc<dyn ContentAccess>, system: Arc<dyn ContentAccess>) -> Self {
        Self {
            loader: Arc::new(StorageDefinitionLoader::new(Arc::clone(&user))),
            user,
            system,
            data_access: Arc::new(StructureDataAccessGenerator),
            cache: Arc::new(NoopCache),
            catalog: Arc::new(StaticCatalog::default()),
            scripts: Arc::new(ChartScriptGenerator),
        }
    }

    pub fn with_data_access(mut self, data_access: Arc<dyn DataAccessGenerator>) -> Self {
        self.data_access = data_access;
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn DefinitionCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn MetadataCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_loader(mut self, loader: Arc<dyn DefinitionLoader>) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_scripts(mut self, scripts: Arc<dyn ScriptGenerator>) -> Self {
        self.scripts = scripts;
        self
    }

    pub fn user(&self) -> &dyn ContentAccess {
        self.user.as_ref()
    }

    pub fn system(&self) -> &dyn ContentAccess {
        self.system.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct DashboardStructure {
    ctx: StructureContext,
}

impl DashboardStructure {
    pub fn new(ctx: StructureContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &StructureContext {
        &self.ctx
    }

    fn resources(&self) -> Resources<'_> {
        Resources::new(self.ctx.system())
    }

    fn settings(&self) -> SettingsStore<'_> {
        SettingsStore::new(self.ctx.user())
    }

    /// Routes a raw parameter map to `op`.
    pub fn dispatch(
        &self,
        op: Operation,
        params: Map<String, Value>,
    ) -> Result<OperationOutput, StructureError> {
        let params = OperationParams::from_map(params)?;
        let summary = match op {
            Operation::New => self.new_file(&params)?,
            Operation::Save => self.save(&params)?,
            Operation::SaveAs => self.save_as(&params)?,
            Operation::SaveSettings => self.save_settings(&params)?,
            Operation::Delete => self.delete(&params)?,
            Operation::Load => return self.load(&params).map(OperationOutput::Definition),
        };
        Ok(OperationOutput::Summary(summary))
    }

    /// Creates a dashboard from the empty structure; `file` may use either form.
    pub fn new_file(&self, params: &OperationParams) -> Result<SaveSummary, StructureError> {
        let structure = self.resources().empty_structure_text()?;
        self.save_as(&params.clone().with_structure(structure))
    }

    /// Writes fresh settings (title and description from `params`), then saves the structure.
    ///
    /// Widget flags and parameters of an existing dashboard are not carried over.
    pub fn save_as(&self, params: &OperationParams) -> Result<SaveSummary, StructureError> {
        let path = DefinitionPath::parse(&params.file)?;
        let settings_path = path.settings_path();
        tracing::info!(path = %settings_path, "saving file as");

        let document = self
            .resources()
            .settings_document(params.title.as_deref(), params.description.as_deref())?;
        let outcome = write_artifact(self.ctx.user(), &settings_path, document.as_bytes())
            .map_err(|err| {
                StructureError::persistence(ArtifactKind::Settings, &settings_path, err)
            })?;

        let mut summary = SaveSummary::new();
        summary.record(ArtifactKind::Settings, outcome);
        summary.merge(self.save(&params.with_file(path.structure_path()))?);
        Ok(summary)
    }

    pub fn save(&self, params: &OperationParams) -> Result<SaveSummary, StructureError> {
        let path = DefinitionPath::parse(&params.file)?;
        let body = params
            .structure
            .as_deref()
            .ok_or(StructureError::MissingParameter { key: STRUCTURE_KEY })?;
        tracing::info!(path = %path.structure_path(), "saving file");

        let mut summary = SaveSummary::new();
        let preview = path.is_preview();
        if preview {
            summary.record(ArtifactKind::TempStructure, ArtifactOutcome::Skipped);
            summary.record(ArtifactKind::TempDataAccess, ArtifactOutcome::Skipped);
        } else {
            persist::remove_preview_copies(&self.ctx, &path, &mut summary);
        }

        persist::save_structure(&self.ctx, &path, body, &mut summary)?;

        if preview {
            tracing::debug!(path = %path, "preview copy; skipping invalidation and script");
            summary.record(ArtifactKind::Script, ArtifactOutcome::Skipped);
            return Ok(summary);
        }

        self.ctx.cache.invalidate(&path.settings_path());
        summary.cache_invalidated = true;

        script::regenerate_script(&self.ctx, &path, &mut summary)?;
        Ok(summary)
    }

    /// Applies `params` overrides to existing settings and republishes the widget registration.
    pub fn save_settings(&self, params: &OperationParams) -> Result<SaveSummary, StructureError> {
        let path = DefinitionPath::parse(&params.file)?;
        let settings_path = path.settings_path();
        tracing::info!(path = %settings_path, "saving settings file");

        let store = self.settings();
        let mut settings = store.load_required(&settings_path)?;
        store.update(&mut settings, &params.settings_overrides())?;
        let outcome = store.persist(&settings_path, &settings)?;

        let mut summary = SaveSummary::new();
        summary.record(ArtifactKind::Settings, outcome);

        if path.is_preview() {
            summary.record(ArtifactKind::WidgetRegistration, ArtifactOutcome::Skipped);
        } else {
            publish::publish_if_widget(&self.ctx, &path, &settings, &mut summary);
        }
        Ok(summary)
    }

    /// Deletes exactly the named file; derived siblings are left alone.
    pub fn delete(&self, params: &OperationParams) -> Result<SaveSummary, StructureError> {
        let file = params.file.as_str();
        let Some(kind) = ArtifactKind::classify(file) else {
            return Err(PathError::UnrecognizedForm {
                path: file.to_owned(),
            }
            .into());
        };
        tracing::info!(path = %file, "deleting file");

        match self.ctx.user.delete(file) {
            Ok(true) => {
                let mut summary = SaveSummary::new();
                summary.record(kind, ArtifactOutcome::Deleted);
                Ok(summary)
            }
            Ok(false) => Err(StructureError::NotFound {
                path: file.to_owned(),
            }),
            Err(err) => Err(StructureError::persistence(kind, file, err)),
        }
    }

    /// Reads the structure (the empty one when absent) and its settings.
    pub fn load(&self, params: &OperationParams) -> Result<Definition, StructureError> {
        let path = DefinitionPath::parse(&params.file)?;
        let structure_path = path.structure_path();
        tracing::info!(path = %structure_path, "loading file");

        let structure = match self.ctx.user.read_optional(&structure_path) {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes)
                .map_err(|err| StructureError::load(&structure_path, err))?,
            Ok(None) => self.resources().empty_structure()?,
            Err(err) => return Err(StructureError::load(&structure_path, err)),
        };

        let settings = self.settings().load(&path.settings_path())?;
        Ok(Definition {
            path,
            settings,
            structure,
        })
    }
}
