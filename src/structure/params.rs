// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::StructureError;
use crate::model::SaveSummary;
use crate::services::Definition;

pub const FILE_KEY: &str = "file";
pub const STRUCTURE_KEY: &str = "cdfstructure";
pub const TITLE_KEY: &str = "title";
pub const DESCRIPTION_KEY: &str = "description";

/// Parameters of one dashboard operation.
///
/// Built from the caller's key/value map. Keys other than the named fields are kept in
/// `overrides` and applied to the settings descriptor by `savesettings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OperationParams {
    /// Target path (`.cdfde` or `.wcdf`).
    pub file: String,
    /// Structure body (JSON text).
    #[serde(
        rename = "cdfstructure",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub structure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Settings overrides (`author`, `style`, `rendererType`, `widget`, `widgetName`,
    /// `widgetParameters`); unknown keys are ignored.
    #[serde(flatten)]
    pub overrides: Map<String, Value>,
}

impl OperationParams {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    pub fn from_map(mut map: Map<String, Value>) -> Result<Self, StructureError> {
        let file = match map.remove(FILE_KEY) {
            Some(Value::String(file)) if !file.trim().is_empty() => file,
            _ => return Err(StructureError::MissingParameter { key: FILE_KEY }),
        };

        // Callers may hand over an already parsed structure.
        let structure = match map.remove(STRUCTURE_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text),
            Some(other) => Some(other.to_string()),
        };

        let title = map.remove(TITLE_KEY).and_then(text_value);
        let description = map.remove(DESCRIPTION_KEY).and_then(text_value);

        Ok(Self {
            file,
            structure,
            title,
            description,
            overrides: map,
        })
    }

    pub fn with_structure(mut self, structure: impl Into<String>) -> Self {
        self.structure = Some(structure.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    pub(crate) fn with_file(&self, file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..self.clone()
        }
    }

    /// Every settings override carried by these parameters, `title` and `description` included.
    pub fn settings_overrides(&self) -> Map<String, Value> {
        let mut overrides = self.overrides.clone();
        if let Some(title) = &self.title {
            overrides.insert(TITLE_KEY.to_owned(), Value::String(title.clone()));
        }
        if let Some(description) = &self.description {
            overrides.insert(DESCRIPTION_KEY.to_owned(), Value::String(description.clone()));
        }
        overrides
    }
}

fn text_value(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    New,
    Save,
    SaveAs,
    SaveSettings,
    Delete,
    Load,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Self::New,
        Self::Save,
        Self::SaveAs,
        Self::SaveSettings,
        Self::Delete,
        Self::Load,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "newfile",
            Self::Save => "save",
            Self::SaveAs => "saveas",
            Self::SaveSettings => "savesettings",
            Self::Delete => "delete",
            Self::Load => "load",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation {0:?}")]
pub struct ParseOperationError(pub String);

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "new" | "newfile" => Ok(Self::New),
            "save" => Ok(Self::Save),
            "saveas" => Ok(Self::SaveAs),
            "savesettings" => Ok(Self::SaveSettings),
            "delete" => Ok(Self::Delete),
            "load" => Ok(Self::Load),
            _ => Err(ParseOperationError(s.to_owned())),
        }
    }
}

/// Result of [`super::DashboardStructure::dispatch`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    Summary(SaveSummary),
    Definition(Definition),
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{json, Map, Value};

    use super::{Operation, OperationParams};
    use crate::structure::StructureError;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn known_keys_are_lifted_and_the_rest_kept_as_overrides() {
        let params = OperationParams::from_map(map(json!({
            "file": "/public/a.wcdf",
            "cdfstructure": { "layout": {} },
            "title": "Sales",
            "widget": true,
        })))
        .unwrap();

        assert_eq!(params.file, "/public/a.wcdf");
        assert_eq!(params.structure.as_deref(), Some(r#"{"layout":{}}"#));
        assert_eq!(params.title.as_deref(), Some("Sales"));
        assert_eq!(params.overrides.get("widget"), Some(&json!(true)));

        let overrides = params.settings_overrides();
        assert_eq!(overrides.get("title"), Some(&json!("Sales")));
        assert!(!overrides.contains_key("file"));
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({ "file": "" }))]
    #[case(json!({ "file": 7 }))]
    fn file_is_required(#[case] raw: Value) {
        let err = OperationParams::from_map(map(raw)).unwrap_err();
        assert!(matches!(err, StructureError::MissingParameter { key: "file" }));
    }

    #[rstest]
    #[case("newfile", Operation::New)]
    #[case("new", Operation::New)]
    #[case("SaveAs", Operation::SaveAs)]
    #[case("save-settings", Operation::SaveSettings)]
    #[case("delete", Operation::Delete)]
    fn operations_parse_loosely(#[case] raw: &str, #[case] expected: Operation) {
        assert_eq!(raw.parse::<Operation>().unwrap(), expected);
    }

    #[test]
    fn every_operation_round_trips_through_its_name() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
        assert!("publish".parse::<Operation>().is_err());
    }

    #[test]
    fn schema_names_the_wire_keys() {
        let schema = serde_json::to_value(schemars::schema_for!(OperationParams)).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("file"));
        assert!(properties.contains_key("cdfstructure"));
    }
}
