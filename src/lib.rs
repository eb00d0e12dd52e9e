// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dashvault: persistence for dashboard definitions.
//!
//! One dashboard is a structure/settings pair plus derived files (data access, render script,
//! widget registration). [`structure::DashboardStructure`] keeps them consistent across
//! new/save/save-as/settings/delete operations.

pub mod config;
pub mod format;
pub mod generate;
pub mod logging;
pub mod model;
pub mod services;
pub mod store;
pub mod structure;
