// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Templates read from system (plugin) content, with built-in fallbacks.

use quick_xml::escape::escape;
use serde_json::Value;

use super::StructureError;
use crate::store::{ContentAccess, StorageError};

pub const EMPTY_STRUCTURE_PATH: &str = "resources/empty-structure.json";
pub const EMPTY_SETTINGS_PATH: &str = "resources/empty.wcdf";

pub const TITLE_PLACEHOLDER: &str = "@DASBOARD_TITLE@";
pub const DESCRIPTION_PLACEHOLDER: &str = "@DASBOARD_DESCRIPTION@";
pub const DEFAULT_TITLE: &str = "Dashboard";

const BUILTIN_EMPTY_STRUCTURE: &str = include_str!("../../resources/empty-structure.json");
const BUILTIN_EMPTY_SETTINGS: &str = include_str!("../../resources/empty.wcdf");

pub struct Resources<'a> {
    system: &'a dyn ContentAccess,
}

impl<'a> Resources<'a> {
    pub fn new(system: &'a dyn ContentAccess) -> Self {
        Self { system }
    }

    /// The canonical empty structure, parsed.
    pub fn empty_structure(&self) -> Result<Value, StructureError> {
        let text = self.read(EMPTY_STRUCTURE_PATH, BUILTIN_EMPTY_STRUCTURE)?;
        serde_json::from_str(&text)
            .map_err(|err| StructureError::resource(EMPTY_STRUCTURE_PATH, err))
    }

    /// The canonical empty structure as compact JSON text.
    pub fn empty_structure_text(&self) -> Result<String, StructureError> {
        Ok(self.empty_structure()?.to_string())
    }

    /// A new settings document with `title` (default `Dashboard`) and `description` filled in.
    pub fn settings_document(
        &self,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<String, StructureError> {
        let template = self.read(EMPTY_SETTINGS_PATH, BUILTIN_EMPTY_SETTINGS)?;

        let title = title.filter(|title| !title.is_empty()).unwrap_or(DEFAULT_TITLE);
        let description = description.unwrap_or_default();

        let document = fill_placeholder(&template, TITLE_PLACEHOLDER, title);
        Ok(fill_placeholder(&document, DESCRIPTION_PLACEHOLDER, description))
    }

    fn read(&self, path: &str, builtin: &str) -> Result<String, StructureError> {
        match self.system.read_optional(path) {
            Ok(Some(bytes)) => String::from_utf8(bytes).map_err(|source| {
                let err = StorageError::Utf8 {
                    path: path.to_owned(),
                    source,
                };
                StructureError::resource(path, err)
            }),
            Ok(None) => {
                tracing::debug!(path, "system resource absent; using built-in copy");
                Ok(builtin.to_owned())
            }
            Err(err) => Err(StructureError::resource(path, err)),
        }
    }
}

/// Replaces the first occurrence of `placeholder` with the XML-escaped `value`, taken literally.
pub fn fill_placeholder(template: &str, placeholder: &str, value: &str) -> String {
    template.replacen(placeholder, &escape(value), 1)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{fill_placeholder, Resources, EMPTY_SETTINGS_PATH, EMPTY_STRUCTURE_PATH};
    use crate::format::parse_settings;
    use crate::store::MemoryContentAccess;
    use crate::structure::StructureError;

    #[test]
    fn builtin_copies_are_used_when_system_content_is_absent() {
        let system = MemoryContentAccess::new();
        let resources = Resources::new(&system);

        let structure = resources.empty_structure().unwrap();
        assert_eq!(structure["components"]["rows"], json!([]));
        assert!(!resources.empty_structure_text().unwrap().contains('\n'));

        let document = resources.settings_document(None, None).unwrap();
        let settings = parse_settings("/a.wcdf", &document).unwrap();
        assert_eq!(settings.title, "Dashboard");
        assert_eq!(settings.description, "");
    }

    #[test]
    fn system_content_overrides_the_builtin_copy() {
        let system = MemoryContentAccess::new();
        system.insert(EMPTY_STRUCTURE_PATH, r#"{ "layout": { "rows": [1] } }"#);
        system.insert(
            EMPTY_SETTINGS_PATH,
            "<cdf><title>@DASBOARD_TITLE@</title>\
             <description>@DASBOARD_DESCRIPTION@</description></cdf>",
        );
        let resources = Resources::new(&system);

        assert_eq!(
            resources.empty_structure_text().unwrap(),
            r#"{"layout":{"rows":[1]}}"#
        );
        let document = resources
            .settings_document(Some("Q1 & Q2"), Some("costs"))
            .unwrap();
        assert_eq!(
            document,
            "<cdf><title>Q1 &amp; Q2</title><description>costs</description></cdf>"
        );
    }

    #[test]
    fn malformed_structure_resource_is_reported() {
        let system = MemoryContentAccess::new();
        system.insert(EMPTY_STRUCTURE_PATH, "{");
        let err = Resources::new(&system).empty_structure().unwrap_err();
        assert!(matches!(err, StructureError::Resource { .. }));
    }

    #[test]
    fn only_the_first_placeholder_is_replaced_and_dollars_stay_literal() {
        assert_eq!(fill_placeholder("@T@ @T@", "@T@", "$1"), "$1 @T@");
    }
}
