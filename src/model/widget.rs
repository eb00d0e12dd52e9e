// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Widget component registrations.
//!
//! A settings descriptor flagged as a widget is published as a component type so that other
//! dashboards can embed it. The registration is built as a pure function of the descriptor and
//! the property catalog that is current at build time.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use super::settings::SettingsDescriptor;

pub const WIDGET_NAME_PREFIX: &str = "widget";
pub const WIDGET_CATEGORY: &str = "WIDGETS";
pub const WIDGET_CATEGORY_LABEL: &str = "Widgets";
pub const REGISTRATION_VERSION: &str = "1.0";

/// Property every widget uses to locate the element it renders into.
pub const CONTAINER_PROPERTY: &str = "htmlObject";

pub const PARAMETER_INPUT_TYPE: &str = "Parameter";
pub const STRING_VALUE_TYPE: &str = "String";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyType {
    pub name: String,
    pub label: String,
    pub tooltip: String,
    pub input_type: String,
    pub value_type: String,
}

impl PropertyType {
    pub fn new(name: impl Into<String>, input_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            tooltip: String::new(),
            name,
            input_type: input_type.into(),
            value_type: STRING_VALUE_TYPE.to_owned(),
        }
    }
}

/// Shared property types that component registrations may refer to by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyCatalog {
    properties: BTreeMap<String, PropertyType>,
}

impl PropertyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The property types every installation ships with.
    pub fn builtin() -> Self {
        [
            PropertyType::new(CONTAINER_PROPERTY, "HtmlObject"),
            PropertyType::new("name", "Id"),
            PropertyType::new("listeners", "Listeners"),
            PropertyType::new("parameters", "ValuesArray"),
            PropertyType::new("priority", "Integer"),
            PropertyType::new("executeAtStart", "Boolean"),
        ]
        .into_iter()
        .collect()
    }

    pub fn insert(&mut self, property: PropertyType) {
        self.properties.insert(property.name.clone(), property);
    }

    pub fn get(&self, name: &str) -> Option<&PropertyType> {
        self.properties.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl FromIterator<PropertyType> for PropertyCatalog {
    fn from_iter<I: IntoIterator<Item = PropertyType>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for property in iter {
            catalog.insert(property);
        }
        catalog
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertySource {
    /// Resolved against the shared catalog.
    Catalog,
    /// Declared by the registration itself.
    Own,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyUsage {
    pub name: String,
    pub source: PropertySource,
    pub property: PropertyType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetRegistration {
    pub name: String,
    pub label: String,
    pub tooltip: String,
    pub category: String,
    pub category_label: String,
    pub version: String,
    pub attributes: BTreeMap<String, String>,
    /// Properties declared by the widget (one per widget parameter).
    pub properties: Vec<PropertyType>,
    /// Properties the widget uses, in declaration order; the container comes first.
    pub usages: Vec<PropertyUsage>,
}

impl WidgetRegistration {
    pub fn usage(&self, name: &str) -> Option<&PropertyUsage> {
        self.usages.iter().find(|usage| usage.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("widget name must not be empty")]
    EmptyName,
    #[error("property {name:?} is not declared by the widget nor known to the property catalog")]
    UnknownProperty { name: String },
    #[error("property {name:?} is declared more than once")]
    DuplicateProperty { name: String },
    #[error("property name {name:?} is not a valid identifier")]
    InvalidPropertyName { name: String },
}

/// Builds the component registration for a widget-flagged settings descriptor.
///
/// Building twice from an unchanged descriptor and catalog yields equal registrations.
pub fn build_widget_registration(
    settings: &SettingsDescriptor,
    catalog: &PropertyCatalog,
) -> Result<WidgetRegistration, RegistrationError> {
    let widget_name = settings.widget_display_name();
    if widget_name.is_empty() {
        return Err(RegistrationError::EmptyName);
    }

    let mut attributes = BTreeMap::new();
    attributes.insert("widget".to_owned(), "true".to_owned());
    attributes.insert("wcdf".to_owned(), settings.path.clone());

    let mut properties = Vec::with_capacity(settings.widget_parameters.len());
    let mut declared = BTreeSet::new();
    for param_name in &settings.widget_parameters {
        if !is_property_name(param_name) {
            return Err(RegistrationError::InvalidPropertyName {
                name: param_name.clone(),
            });
        }
        if param_name == CONTAINER_PROPERTY || !declared.insert(param_name.as_str()) {
            return Err(RegistrationError::DuplicateProperty {
                name: param_name.clone(),
            });
        }

        properties.push(PropertyType {
            name: param_name.clone(),
            label: format!("Parameter {param_name}"),
            tooltip: format!(
                "What dashboard parameter should map to widget parameter '{param_name}'?"
            ),
            input_type: PARAMETER_INPUT_TYPE.to_owned(),
            value_type: STRING_VALUE_TYPE.to_owned(),
        });
    }

    let mut usages = Vec::with_capacity(properties.len() + 1);
    usages.push(resolve_usage(CONTAINER_PROPERTY, &properties, catalog)?);
    for property in &properties {
        usages.push(resolve_usage(&property.name, &properties, catalog)?);
    }

    Ok(WidgetRegistration {
        name: format!("{WIDGET_NAME_PREFIX}{widget_name}"),
        label: widget_name.to_owned(),
        tooltip: format!("{widget_name} Widget"),
        category: WIDGET_CATEGORY.to_owned(),
        category_label: WIDGET_CATEGORY_LABEL.to_owned(),
        version: REGISTRATION_VERSION.to_owned(),
        attributes,
        properties,
        usages,
    })
}

fn is_property_name(name: &str) -> bool {
    static PROPERTY_NAME: OnceLock<Regex> = OnceLock::new();
    PROPERTY_NAME
        .get_or_init(|| {
            Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$.\-]*$").expect("hard-coded property name pattern")
        })
        .is_match(name)
}

// Own properties shadow catalog entries of the same name.
fn resolve_usage(
    name: &str,
    own: &[PropertyType],
    catalog: &PropertyCatalog,
) -> Result<PropertyUsage, RegistrationError> {
    if let Some(property) = own.iter().find(|property| property.name == name) {
        return Ok(PropertyUsage {
            name: name.to_owned(),
            source: PropertySource::Own,
            property: property.clone(),
        });
    }

    catalog
        .get(name)
        .map(|property| PropertyUsage {
            name: name.to_owned(),
            source: PropertySource::Catalog,
            property: property.clone(),
        })
        .ok_or_else(|| RegistrationError::UnknownProperty {
            name: name.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::{
        build_widget_registration, PropertyCatalog, PropertySource, RegistrationError,
        CONTAINER_PROPERTY,
    };
    use crate::model::SettingsDescriptor;

    fn widget(params: &[&str]) -> SettingsDescriptor {
        let mut settings = SettingsDescriptor::new("/public/widgets/kpi.wcdf");
        settings.widget = true;
        settings.widget_parameters = params.iter().map(|p| (*p).to_owned()).collect();
        settings
    }

    #[test]
    fn one_property_per_parameter_plus_container() {
        let registration =
            build_widget_registration(&widget(&["p1", "p2"]), &PropertyCatalog::builtin()).unwrap();

        assert_eq!(registration.name, "widgetkpi");
        assert_eq!(registration.tooltip, "kpi Widget");
        let declared: Vec<_> = registration.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(declared, vec!["p1", "p2"]);

        let used: Vec<_> = registration.usages.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(used, vec![CONTAINER_PROPERTY, "p1", "p2"]);
        assert_eq!(
            registration.usage(CONTAINER_PROPERTY).map(|u| u.source),
            Some(PropertySource::Catalog)
        );
        assert!(registration
            .properties
            .iter()
            .all(|p| p.input_type == "Parameter"));
        assert_eq!(
            registration.attributes.get("wcdf").map(String::as_str),
            Some("/public/widgets/kpi.wcdf")
        );
    }

    #[test]
    fn building_twice_yields_equal_registrations() {
        let settings = widget(&["region"]);
        let catalog = PropertyCatalog::builtin();
        assert_eq!(
            build_widget_registration(&settings, &catalog),
            build_widget_registration(&settings, &catalog)
        );
    }

    #[test]
    fn catalog_without_container_rejects_the_registration() {
        let err = build_widget_registration(&widget(&["p1"]), &PropertyCatalog::new()).unwrap_err();
        assert_eq!(
            err,
            RegistrationError::UnknownProperty {
                name: CONTAINER_PROPERTY.to_owned()
            }
        );
    }

    #[test]
    fn parameter_names_must_be_identifiers() {
        let catalog = PropertyCatalog::builtin();
        for bad in ["", "two words", "1st", "a/b"] {
            let err = build_widget_registration(&widget(&[bad]), &catalog).unwrap_err();
            assert!(
                matches!(err, RegistrationError::InvalidPropertyName { .. }),
                "{bad}"
            );
        }
        assert!(build_widget_registration(&widget(&["region.code", "_x"]), &catalog).is_ok());
    }

    #[test]
    fn parameter_may_not_shadow_the_container() {
        let err =
            build_widget_registration(&widget(&[CONTAINER_PROPERTY]), &PropertyCatalog::builtin())
                .unwrap_err();
        assert!(matches!(err, RegistrationError::DuplicateProperty { .. }));
    }
}
