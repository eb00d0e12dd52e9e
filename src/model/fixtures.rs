// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{json, Value};

fn row(id: &str, kind: &str, properties: &[(&str, &str)]) -> Value {
    let properties = properties
        .iter()
        .map(|(name, value)| json!({ "name": name, "value": value }))
        .collect::<Vec<_>>();
    json!({ "id": id, "type": kind, "properties": properties })
}

fn structure(components: Vec<Value>, datasources: Vec<Value>) -> String {
    json!({
        "layout": { "title": "Fixture", "rows": [] },
        "components": { "rows": components },
        "datasources": { "rows": datasources },
        "filename": "",
    })
    .to_string()
}

pub(crate) fn structure_without_datasources() -> String {
    structure(Vec::new(), Vec::new())
}

pub(crate) fn structure_with_datasources(names: &[&str]) -> String {
    let datasources = names
        .iter()
        .map(|name| {
            row(
                name,
                "Componentssql_sqlJndi",
                &[("name", name), ("jndi", "SampleData"), ("query", "select 1")],
            )
        })
        .collect();
    structure(Vec::new(), datasources)
}

pub(crate) fn structure_with_chart(chart: &str, datasource: &str) -> String {
    structure(
        vec![row(
            &format!("render_{chart}"),
            "ComponentsbarChart",
            &[("name", chart), ("dataSource", datasource)],
        )],
        vec![row(
            datasource,
            "Componentssql_sqlJndi",
            &[("name", datasource), ("query", "select 1")],
        )],
    )
}
