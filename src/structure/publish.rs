// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Widget publication. Every failure here is reported as a warning; the settings save that
//! triggered it has already succeeded.

use super::StructureContext;
use crate::format::export_widget_registration;
use crate::model::{
    build_widget_registration, ArtifactKind, ArtifactOutcome, DefinitionPath, SaveSummary,
    SettingsDescriptor, WarningKind,
};
use crate::store::{remove_artifact, write_artifact};

const ARTIFACT: ArtifactKind = ArtifactKind::WidgetRegistration;

pub(crate) fn publish_if_widget(
    ctx: &StructureContext,
    path: &DefinitionPath,
    settings: &SettingsDescriptor,
    summary: &mut SaveSummary,
) {
    let registration_path = path.widget_registration_path();
    if !settings.widget {
        withdraw(ctx, &registration_path, summary);
        return;
    }

    tracing::info!(path = %registration_path, "saving widget component file");

    let catalog = ctx.catalog.property_catalog();
    let registration = match build_widget_registration(settings, &catalog) {
        Ok(registration) => registration,
        Err(err) => {
            fail(summary, WarningKind::Validation, &registration_path, err.to_string());
            return;
        }
    };

    let text = match export_widget_registration(&registration) {
        Ok(text) => text,
        Err(err) => {
            fail(summary, WarningKind::Generation, &registration_path, err.to_string());
            return;
        }
    };

    match write_artifact(ctx.system.as_ref(), &registration_path, text.as_bytes()) {
        Ok(outcome) => summary.record(ARTIFACT, outcome),
        Err(err) => {
            fail(summary, WarningKind::Generation, &registration_path, err.to_string());
            return;
        }
    }

    refresh_components(ctx, summary);
}

// A registration left over from when the entity was still a widget is removed.
fn withdraw(ctx: &StructureContext, registration_path: &str, summary: &mut SaveSummary) {
    match remove_artifact(ctx.system.as_ref(), registration_path) {
        Ok(ArtifactOutcome::Deleted) => {
            tracing::info!(path = %registration_path, "removed widget component file");
            summary.record(ARTIFACT, ArtifactOutcome::Deleted);
            refresh_components(ctx, summary);
        }
        Ok(_) => summary.record(ARTIFACT, ArtifactOutcome::Skipped),
        Err(err) => {
            tracing::warn!(
                path = %registration_path,
                error = %err,
                "failed to remove widget component file"
            );
            summary.warn(ARTIFACT, WarningKind::Cleanup, err.to_string());
            summary.record(ARTIFACT, ArtifactOutcome::Failed);
        }
    }
}

// Only the component registrations changed; data sources stay as they are.
fn refresh_components(ctx: &StructureContext, summary: &mut SaveSummary) {
    if let Err(err) = ctx.catalog.refresh(false) {
        tracing::warn!(error = %err, "failed to refresh the metadata catalog");
        summary.warn(ARTIFACT, WarningKind::Refresh, err.to_string());
    }
}

fn fail(summary: &mut SaveSummary, kind: WarningKind, path: &str, message: String) {
    tracing::warn!(path, error = %message, "widget component not published");
    summary.warn(ARTIFACT, kind, message);
    summary.record(ARTIFACT, ArtifactOutcome::Failed);
}
