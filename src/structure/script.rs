// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{StructureContext, StructureError};
use crate::model::{ArtifactKind, DefinitionPath, SaveSummary};

/// Rebuilds the `.cgg.js` script from the definition as it is now persisted.
pub(crate) fn regenerate_script(
    ctx: &StructureContext,
    path: &DefinitionPath,
    summary: &mut SaveSummary,
) -> Result<(), StructureError> {
    let definition = ctx
        .loader
        .load_fresh(&path.settings_path())
        .map_err(|err| StructureError::generation(ArtifactKind::Script, err))?;

    let script = ctx
        .scripts
        .generate(&definition)
        .map_err(|err| StructureError::generation(ArtifactKind::Script, err))?;

    let script_path = path.script_path();
    let outcome = ctx
        .scripts
        .write(ctx.user.as_ref(), &definition, &script)
        .map_err(|err| StructureError::persistence(ArtifactKind::Script, &script_path, err))?;

    tracing::debug!(path = %script_path, outcome = %outcome, "script regenerated");
    summary.record(ArtifactKind::Script, outcome);
    Ok(())
}
