// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV: &str = "DASHVAULT_LOG";

pub const DEFAULT_FILTER: &str = "dashvault=info";
pub const VERBOSE_FILTER: &str = "dashvault=debug";

/// Picks the filter directives: environment, then `--verbose`, then config, then the default.
pub fn filter_directives(env: Option<String>, configured: Option<&str>, verbose: bool) -> String {
    if let Some(env) = env.filter(|env| !env.trim().is_empty()) {
        return env;
    }
    if verbose {
        return VERBOSE_FILTER.to_owned();
    }
    configured
        .filter(|configured| !configured.trim().is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_owned()
}

/// Installs a stderr `fmt` subscriber. Fails if a global subscriber is already set.
pub fn init(configured: Option<&str>, verbose: bool) -> Result<(), TryInitError> {
    let directives = filter_directives(std::env::var(LOG_ENV).ok(), configured, verbose);
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}
