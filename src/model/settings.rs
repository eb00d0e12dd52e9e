// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::paths::SETTINGS_EXT;

pub const DEFAULT_STYLE: &str = "Clean";

/// How the dashboard is laid out when rendered.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum RendererType {
    #[default]
    Blueprint,
    Bootstrap,
    Mobile,
}

impl RendererType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blueprint => "blueprint",
            Self::Bootstrap => "bootstrap",
            Self::Mobile => "mobile",
        }
    }
}

impl fmt::Display for RendererType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown renderer type {0:?} (expected blueprint, bootstrap or mobile)")]
pub struct ParseRendererTypeError(pub String);

impl FromStr for RendererType {
    type Err = ParseRendererTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blueprint" => Ok(Self::Blueprint),
            "bootstrap" => Ok(Self::Bootstrap),
            "mobile" => Ok(Self::Mobile),
            _ => Err(ParseRendererTypeError(s.to_owned())),
        }
    }
}

/// In-memory form of a `.wcdf` settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDescriptor {
    /// Settings path this descriptor was loaded from (or will be written to).
    pub path: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub style: String,
    pub renderer_type: RendererType,
    pub widget: bool,
    pub widget_name: String,
    pub widget_parameters: Vec<String>,
}

impl SettingsDescriptor {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: String::new(),
            author: String::new(),
            description: String::new(),
            style: DEFAULT_STYLE.to_owned(),
            renderer_type: RendererType::default(),
            widget: false,
            widget_name: String::new(),
            widget_parameters: Vec::new(),
        }
    }

    /// Name the widget is published under: the explicit widget name, else the file stem.
    pub fn widget_display_name(&self) -> &str {
        let explicit = self.widget_name.trim();
        if !explicit.is_empty() {
            return explicit;
        }

        let file_name = self
            .path
            .rsplit_once('/')
            .map_or(self.path.as_str(), |(_, name)| name);
        file_name.strip_suffix(SETTINGS_EXT).unwrap_or(file_name)
    }

    /// Applies caller-supplied overrides.
    ///
    /// Every recognized key is validated before anything is assigned, so a rejected override
    /// leaves the descriptor exactly as it was. Unrecognized keys are ignored.
    pub fn update(&mut self, overrides: &Map<String, Value>) -> Result<(), OverrideError> {
        let patch = SettingsPatch::from_overrides(overrides)?;
        self.apply(patch);
        Ok(())
    }

    pub fn apply(&mut self, patch: SettingsPatch) {
        let SettingsPatch {
            title,
            author,
            description,
            style,
            renderer_type,
            widget,
            widget_name,
            widget_parameters,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(author) = author {
            self.author = author;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(style) = style {
            self.style = style;
        }
        if let Some(renderer_type) = renderer_type {
            self.renderer_type = renderer_type;
        }
        if let Some(widget) = widget {
            self.widget = widget;
        }
        if let Some(widget_name) = widget_name {
            self.widget_name = widget_name;
        }
        if let Some(widget_parameters) = widget_parameters {
            self.widget_parameters = widget_parameters;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub style: Option<String>,
    pub renderer_type: Option<RendererType>,
    pub widget: Option<bool>,
    pub widget_name: Option<String>,
    pub widget_parameters: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverrideError {
    #[error("override {key:?} must be {expected}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
    },
    #[error(transparent)]
    RendererType(#[from] ParseRendererTypeError),
    #[error("widget parameter names must not be empty")]
    EmptyWidgetParameter,
    #[error("widget parameter {0:?} is listed more than once")]
    DuplicateWidgetParameter(String),
}

impl SettingsPatch {
    pub fn from_overrides(overrides: &Map<String, Value>) -> Result<Self, OverrideError> {
        let widget_parameters = overrides
            .get("widgetParameters")
            .map(widget_parameters_override)
            .transpose()?;

        let renderer_type = text_override(overrides, "rendererType")?
            .map(|raw| raw.parse::<RendererType>())
            .transpose()?;

        Ok(Self {
            title: text_override(overrides, "title")?,
            author: text_override(overrides, "author")?,
            description: text_override(overrides, "description")?,
            style: text_override(overrides, "style")?,
            renderer_type,
            widget: overrides.get("widget").map(bool_override).transpose()?,
            widget_name: text_override(overrides, "widgetName")?,
            widget_parameters,
        })
    }
}

fn text_override(
    overrides: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<String>, OverrideError> {
    match overrides.get(key) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(String::new())),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(OverrideError::WrongType {
            key,
            expected: "a string",
        }),
    }
}

fn bool_override(value: &Value) -> Result<bool, OverrideError> {
    let wrong_type = || OverrideError::WrongType {
        key: "widget",
        expected: "a boolean",
    };

    match value {
        Value::Bool(flag) => Ok(*flag),
        Value::String(raw) if raw.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(raw) if raw.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(wrong_type()),
    }
}

fn widget_parameters_override(value: &Value) -> Result<Vec<String>, OverrideError> {
    let names = match value {
        Value::Null => Vec::new(),
        Value::String(single) if single.is_empty() => Vec::new(),
        Value::String(single) => vec![single.clone()],
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(name) => Ok(name.clone()),
                _ => Err(OverrideError::WrongType {
                    key: "widgetParameters",
                    expected: "a string or a list of strings",
                }),
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => {
            return Err(OverrideError::WrongType {
                key: "widgetParameters",
                expected: "a string or a list of strings",
            })
        }
    };

    let mut seen = BTreeSet::new();
    for name in &names {
        if name.trim().is_empty() {
            return Err(OverrideError::EmptyWidgetParameter);
        }
        if !seen.insert(name.as_str()) {
            return Err(OverrideError::DuplicateWidgetParameter(name.clone()));
        }
    }

    Ok(names)
}
