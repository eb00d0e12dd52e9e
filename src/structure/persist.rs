// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{StructureContext, StructureError};
use crate::model::{ArtifactKind, ArtifactOutcome, DefinitionPath, SaveSummary, WarningKind};
use crate::store::{remove_artifact, write_artifact};

/// Writes the structure body and brings its `.cda` in line with it.
///
/// The data-access artifact exists afterwards iff the generator found data sources in `body`.
pub(crate) fn save_structure(
    ctx: &StructureContext,
    path: &DefinitionPath,
    body: &str,
    summary: &mut SaveSummary,
) -> Result<(), StructureError> {
    let structure_path = path.structure_path();
    let outcome = write_artifact(ctx.user.as_ref(), &structure_path, body.as_bytes())
        .map_err(|err| StructureError::persistence(ArtifactKind::Structure, &structure_path, err))?;
    summary.record(ArtifactKind::Structure, outcome);

    let data_access = ctx
        .data_access
        .from_structure(body)
        .map_err(|err| StructureError::generation(ArtifactKind::DataAccess, err))?;

    let data_access_path = path.data_access_path();
    if data_access.is_empty() {
        let outcome = match remove_artifact(ctx.user.as_ref(), &data_access_path) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(
                    path = %data_access_path,
                    error = %err,
                    "failed to remove stale data-access file"
                );
                summary.warn(ArtifactKind::DataAccess, WarningKind::Cleanup, err.to_string());
                ArtifactOutcome::Failed
            }
        };
        summary.record(ArtifactKind::DataAccess, outcome);
        return Ok(());
    }

    let text = data_access
        .render()
        .map_err(|err| StructureError::generation(ArtifactKind::DataAccess, err))?;
    let outcome = write_artifact(ctx.user.as_ref(), &data_access_path, text.as_bytes()).map_err(
        |err| StructureError::persistence(ArtifactKind::DataAccess, &data_access_path, err),
    )?;
    summary.record(ArtifactKind::DataAccess, outcome);
    Ok(())
}

/// Removes the scratch copies a designer session left next to `path`.
pub(crate) fn remove_preview_copies(
    ctx: &StructureContext,
    path: &DefinitionPath,
    summary: &mut SaveSummary,
) {
    for kind in [ArtifactKind::TempStructure, ArtifactKind::TempDataAccess] {
        let temp_path = path.artifact_path(kind);
        let outcome = match remove_artifact(ctx.user.as_ref(), &temp_path) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(path = %temp_path, error = %err, "failed to remove preview copy");
                summary.warn(kind, WarningKind::Cleanup, err.to_string());
                ArtifactOutcome::Failed
            }
        };
        summary.record(kind, outcome);
    }
}
