// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use quick_xml::events::BytesStart;
use serde_json::Value;

use super::{component_rows, ComponentRow};
use crate::format::{element_with_text, end, finish_xml, start, xml_writer, FormatError};
use crate::services::{CollaboratorError, DataAccessGenerator, DataAccessRender};

const ROOT: &str = "CDADescriptor";

/// Builds `.cda` descriptors from the structure's `datasources` table.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructureDataAccessGenerator;

impl DataAccessGenerator for StructureDataAccessGenerator {
    fn from_structure(
        &self,
        structure: &str,
    ) -> Result<Box<dyn DataAccessRender>, CollaboratorError> {
        let structure: Value = serde_json::from_str(structure).map_err(|err| {
            CollaboratorError::with_source("structure body is not valid JSON", err)
        })?;

        Ok(Box::new(DataAccessDocument {
            sources: component_rows(&structure, "datasources"),
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataAccessDocument {
    sources: Vec<ComponentRow>,
}

impl DataAccessDocument {
    fn export(&self) -> Result<String, FormatError> {
        let mut writer = xml_writer()?;
        start(&mut writer, BytesStart::new(ROOT))?;

        start(&mut writer, BytesStart::new("DataSources"))?;
        for source in &self.sources {
            let mut connection = BytesStart::new("Connection");
            connection.push_attribute(("id", source.name()));
            connection.push_attribute(("type", source.kind.as_str()));
            start(&mut writer, connection)?;
            for (name, value) in &source.properties {
                if name == "name" || name == "query" {
                    continue;
                }
                let mut property = BytesStart::new("Property");
                property.push_attribute(("name", name.as_str()));
                element_with_text(&mut writer, property, value)?;
            }
            end(&mut writer, "Connection")?;
        }
        end(&mut writer, "DataSources")?;

        for source in &self.sources {
            let mut access = BytesStart::new("DataAccess");
            access.push_attribute(("id", source.name()));
            access.push_attribute(("connection", source.name()));
            access.push_attribute(("access", "public"));
            start(&mut writer, access)?;
            element_with_text(&mut writer, BytesStart::new("Name"), source.name())?;
            element_with_text(
                &mut writer,
                BytesStart::new("Query"),
                source.property("query").unwrap_or_default(),
            )?;
            end(&mut writer, "DataAccess")?;
        }

        end(&mut writer, ROOT)?;
        finish_xml(writer)
    }
}

impl DataAccessRender for DataAccessDocument {
    fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    fn render(&self) -> Result<String, CollaboratorError> {
        Ok(self.export()?)
    }
}

#[cfg(test)]
mod tests {
    use super::StructureDataAccessGenerator;
    use crate::model::fixtures::{structure_with_datasources, structure_without_datasources};
    use crate::services::DataAccessGenerator;

    #[test]
    fn structure_without_sources_is_empty() {
        let render = StructureDataAccessGenerator
            .from_structure(&structure_without_datasources())
            .unwrap();
        assert!(render.is_empty());
        assert_eq!(
            StructureDataAccessGenerator
                .from_structure("{}")
                .map(|render| render.is_empty())
                .ok(),
            Some(true)
        );
    }

    #[test]
    fn each_source_becomes_a_connection_and_a_query() {
        let render = StructureDataAccessGenerator
            .from_structure(&structure_with_datasources(&["sales", "costs"]))
            .unwrap();
        assert!(!render.is_empty());

        let xml = render.render().unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(r#"<Connection id="sales" type="sql_sqlJndi">"#));
        assert!(xml.contains(r#"<Property name="jndi">SampleData</Property>"#));
        assert!(xml.contains(r#"<DataAccess id="costs" connection="costs" access="public">"#));
        assert_eq!(xml.matches("<Query>select 1</Query>").count(), 2);
    }

    #[test]
    fn invalid_json_is_a_generator_failure() {
        assert!(StructureDataAccessGenerator.from_structure("{not json").is_err());
    }
}
