// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::Write as _;

use serde_json::json;

use super::component_rows;
use crate::services::{CollaboratorError, Definition, ScriptGenerator};

const CHART_MARKER: &str = "Chart";

/// Emits one server-side render registration per chart component.
///
/// Definitions without charts produce an empty script, which removes any stale `.cgg.js`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChartScriptGenerator;

impl ScriptGenerator for ChartScriptGenerator {
    fn generate(&self, definition: &Definition) -> Result<String, CollaboratorError> {
        let charts: Vec<_> = component_rows(&definition.structure, "components")
            .into_iter()
            .filter(|row| row.kind.contains(CHART_MARKER))
            .collect();

        if charts.is_empty() {
            return Ok(String::new());
        }

        let mut script = String::new();
        // `fmt::Write` for `String` cannot fail.
        let _ = writeln!(script, "// {}", definition.settings.path);
        let _ = writeln!(script, "lib('cgg-main.js');");
        for chart in &charts {
            let options = json!({
                "type": chart.kind,
                "dataSource": chart.property("dataSource").unwrap_or_default(),
                "title": definition.settings.title,
            });
            let _ = writeln!(
                script,
                "cgg.register({}, {});",
                json!(chart.name()),
                options
            );
        }

        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::ChartScriptGenerator;
    use crate::model::fixtures::{structure_with_chart, structure_without_datasources};
    use crate::model::{DefinitionPath, SettingsDescriptor};
    use crate::services::{Definition, ScriptGenerator};

    fn definition(structure: &str) -> Definition {
        Definition {
            path: DefinitionPath::from_settings("/public/sales.wcdf").unwrap(),
            settings: SettingsDescriptor::new("/public/sales.wcdf"),
            structure: serde_json::from_str::<Value>(structure).unwrap(),
        }
    }

    #[test]
    fn charts_are_registered() {
        let script = ChartScriptGenerator
            .generate(&definition(&structure_with_chart("salesBar", "salesQuery")))
            .unwrap();

        assert!(script.starts_with("// /public/sales.wcdf\n"));
        let expected = format!(
            "cgg.register(\"salesBar\", {});",
            json!({ "dataSource": "salesQuery", "title": "", "type": "barChart" })
        );
        assert!(script.contains(&expected), "{script}");
    }

    #[test]
    fn no_charts_means_no_script() {
        let script = ChartScriptGenerator
            .generate(&definition(&structure_without_datasources()))
            .unwrap();
        assert!(script.is_empty());
    }
}
