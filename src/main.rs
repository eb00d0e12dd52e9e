// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dashvault CLI entrypoint.
//!
//! Runs one operation against a content directory and prints the result as JSON.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use dashvault::config::StoreConfig;
use dashvault::structure::{DashboardStructure, OperationOutput, OperationParams};

#[derive(Parser, Debug)]
#[command(name = "dashvault", version)]
#[command(about = "Save, load and delete dashboard definitions and their derived files")]
struct Cli {
    /// Content directory (repository root)
    #[arg(long, value_name = "DIR", global = true)]
    root: Option<PathBuf>,

    /// System content directory (templates, widget registrations)
    #[arg(long, value_name = "DIR", global = true)]
    system_root: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// fsync files and directories after each write
    #[arg(long, global = true)]
    durable_writes: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a dashboard with an empty structure
    New {
        file: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Save a structure and regenerate its derived files
    Save {
        file: String,
        #[command(flatten)]
        structure: StructureSource,
    },
    /// Write fresh settings, then save the structure
    SaveAs {
        file: String,
        #[command(flatten)]
        structure: StructureSource,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update the settings of an existing dashboard
    SaveSettings {
        file: String,
        /// Settings override, e.g. `--set title=Sales` or `--set widget=true`
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        set: Vec<(String, String)>,
        /// Widget parameter name (repeatable; replaces the current list)
        #[arg(long = "widget-parameter", value_name = "NAME")]
        widget_parameters: Vec<String>,
    },
    /// Delete one file
    Delete { file: String },
    /// Print a dashboard's structure and settings
    Load { file: String },
    /// Print the JSON schema of operation parameters
    Schema,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct StructureSource {
    /// Structure body (JSON text)
    #[arg(long)]
    structure: Option<String>,

    /// File holding the structure body
    #[arg(long, value_name = "PATH")]
    structure_file: Option<PathBuf>,
}

impl StructureSource {
    fn read(&self) -> Result<String, Box<dyn Error>> {
        match (&self.structure, &self.structure_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => Ok(std::fs::read_to_string(path)?),
            (None, None) => Err("either --structure or --structure-file is required".into()),
        }
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.to_owned()))
        }
        _ => Err(format!("expected KEY=VALUE, got {raw:?}")),
    }
}

/// The widget flag and the widget parameter list are read as JSON; every other key is text.
fn override_value(key: &str, raw: &str) -> Value {
    let parsed = match key {
        "widget" => serde_json::from_str::<Value>(raw).ok().filter(Value::is_boolean),
        "widgetParameters" => serde_json::from_str::<Value>(raw).ok().filter(Value::is_array),
        _ => None,
    };
    parsed.unwrap_or_else(|| Value::String(raw.to_owned()))
}

fn store_config(cli: &Cli) -> Result<StoreConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::default(),
    };
    if let Some(root) = &cli.root {
        config.content_root = Some(root.clone());
    }
    if let Some(system_root) = &cli.system_root {
        config.system_root = Some(system_root.clone());
    }
    config.durable_writes |= cli.durable_writes;
    Ok(config)
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = store_config(&cli)?;
    dashvault::logging::init(config.log_filter.as_deref(), cli.verbose)?;

    let dashboards = DashboardStructure::new(config.open());
    let output = match cli.command {
        Command::New {
            file,
            title,
            description,
        } => {
            let mut params = OperationParams::new(file);
            params.title = title;
            params.description = description;
            OperationOutput::Summary(dashboards.new_file(&params)?)
        }
        Command::Save { file, structure } => {
            let params = OperationParams::new(file).with_structure(structure.read()?);
            OperationOutput::Summary(dashboards.save(&params)?)
        }
        Command::SaveAs {
            file,
            structure,
            title,
            description,
        } => {
            let mut params = OperationParams::new(file).with_structure(structure.read()?);
            params.title = title;
            params.description = description;
            OperationOutput::Summary(dashboards.save_as(&params)?)
        }
        Command::SaveSettings {
            file,
            set,
            widget_parameters,
        } => {
            let mut params = OperationParams::new(file);
            for (key, value) in set {
                let value = override_value(&key, &value);
                params = params.with_override(key, value);
            }
            if !widget_parameters.is_empty() {
                params = params.with_override("widgetParameters", widget_parameters);
            }
            OperationOutput::Summary(dashboards.save_settings(&params)?)
        }
        Command::Delete { file } => {
            OperationOutput::Summary(dashboards.delete(&OperationParams::new(file))?)
        }
        Command::Load { file } => {
            OperationOutput::Definition(dashboards.load(&OperationParams::new(file))?)
        }
        Command::Schema => {
            let schema = schemars::schema_for!(OperationParams);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            return Ok(());
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
