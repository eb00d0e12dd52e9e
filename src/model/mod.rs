// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A definition is one logical entity stored as a settings file plus a structure file; the
//! remaining artifacts are derived from those two by suffix substitution.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod paths;
pub mod settings;
pub mod summary;
pub mod widget;

pub use paths::{derive, ArtifactKind, DefinitionPath, PathError};
pub use settings::{
    OverrideError, ParseRendererTypeError, RendererType, SettingsDescriptor, SettingsPatch,
};
pub use summary::{ArtifactOutcome, SaveSummary, SaveWarning, WarningKind};
pub use widget::{
    build_widget_registration, PropertyCatalog, PropertySource, PropertyType, PropertyUsage,
    RegistrationError, WidgetRegistration, CONTAINER_PROPERTY,
};
