// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in generators for the derived `.cda` and `.cgg.js` artifacts.
//!
//! Both read the structure's component tables: `datasources.rows` and `components.rows`, where
//! each row carries an `id`, a `type` and a list of `{ name, value }` properties.

pub mod cda;
pub mod script;

use serde_json::Value;

pub use cda::{DataAccessDocument, StructureDataAccessGenerator};
pub use script::ChartScriptGenerator;

const COMPONENT_TYPE_PREFIX: &str = "Components";

/// One row of a structure component table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRow {
    pub id: String,
    pub kind: String,
    pub properties: Vec<(String, String)>,
}

impl ComponentRow {
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The `name` property, else the row id.
    pub fn name(&self) -> &str {
        self.property("name")
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.id)
    }
}

/// Rows of the `section` table; missing tables and malformed rows are skipped.
pub(crate) fn component_rows(structure: &Value, section: &str) -> Vec<ComponentRow> {
    let Some(rows) = structure
        .get(section)
        .and_then(|table| table.get("rows"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    rows.iter().filter_map(component_row).collect()
}

fn component_row(row: &Value) -> Option<ComponentRow> {
    let id = row.get("id")?.as_str()?.to_owned();
    let kind = row.get("type").and_then(Value::as_str).unwrap_or_default();
    let kind = kind.strip_prefix(COMPONENT_TYPE_PREFIX).unwrap_or(kind).to_owned();

    let properties = row
        .get("properties")
        .and_then(Value::as_array)
        .map(|props| {
            props
                .iter()
                .filter_map(|prop| {
                    let name = prop.get("name")?.as_str()?;
                    let value = match prop.get("value")? {
                        Value::String(text) => text.clone(),
                        Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    Some((name.to_owned(), value))
                })
                .collect()
        })
        .unwrap_or_default();

    Some(ComponentRow {
        id,
        kind,
        properties,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::component_rows;

    #[test]
    fn rows_strip_the_component_prefix_and_stringify_values() {
        let structure = json!({
            "datasources": { "rows": [
                { "id": "q1", "type": "Componentssql_sqlJndi", "properties": [
                    { "name": "query", "value": "select 1" },
                    { "name": "cache", "value": true },
                ]},
                { "type": "missing id" },
            ]},
        });

        let rows = component_rows(&structure, "datasources");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, "sql_sqlJndi");
        assert_eq!(rows[0].property("cache"), Some("true"));
        assert_eq!(rows[0].name(), "q1");
        assert!(component_rows(&structure, "components").is_empty());
    }
}
