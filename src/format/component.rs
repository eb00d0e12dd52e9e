// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! `.component.xml` documents describing a published widget.

use quick_xml::events::BytesStart;

use super::{
    element_with_text, end, finish_xml, start, text_element, xml_writer, FormatError, XmlWriter,
};
use crate::model::{PropertySource, PropertyType, WidgetRegistration};

const ROOT: &str = "DesignerComponent";

pub fn export_widget_registration(
    registration: &WidgetRegistration,
) -> Result<String, FormatError> {
    let mut writer = xml_writer()?;
    start(&mut writer, BytesStart::new(ROOT))?;

    start(&mut writer, BytesStart::new("Header"))?;
    text_element(&mut writer, "Name", &registration.name)?;
    text_element(&mut writer, "IName", &registration.name)?;
    text_element(&mut writer, "Label", &registration.label)?;
    text_element(&mut writer, "Description", &registration.tooltip)?;
    text_element(&mut writer, "Category", &registration.category)?;
    text_element(&mut writer, "CatDescription", &registration.category_label)?;
    text_element(&mut writer, "Type", "PalleteEntry")?;
    text_element(&mut writer, "Version", &registration.version)?;
    end(&mut writer, "Header")?;

    start(&mut writer, BytesStart::new("Metadata"))?;
    for (name, value) in &registration.attributes {
        let mut meta = BytesStart::new("meta");
        meta.push_attribute(("name", name.as_str()));
        element_with_text(&mut writer, meta, value)?;
    }
    end(&mut writer, "Metadata")?;

    start(&mut writer, BytesStart::new("Contents"))?;
    start(&mut writer, BytesStart::new("Model"))?;
    start(&mut writer, BytesStart::new("Definition"))?;
    for usage in &registration.usages {
        let mut property = BytesStart::new("Property");
        if usage.source == PropertySource::Own {
            property.push_attribute(("type", "own"));
        }
        element_with_text(&mut writer, property, &usage.name)?;
    }
    end(&mut writer, "Definition")?;
    end(&mut writer, "Model")?;

    if registration.properties.is_empty() {
        text_element(&mut writer, "Properties", "")?;
    } else {
        start(&mut writer, BytesStart::new("Properties"))?;
        for property in &registration.properties {
            write_property(&mut writer, property)?;
        }
        end(&mut writer, "Properties")?;
    }
    end(&mut writer, "Contents")?;

    end(&mut writer, ROOT)?;
    finish_xml(writer)
}

fn write_property(writer: &mut XmlWriter, property: &PropertyType) -> Result<(), FormatError> {
    let mut element = BytesStart::new("Property");
    element.push_attribute(("name", property.name.as_str()));
    start(writer, element)?;
    text_element(writer, "Name", &property.name)?;
    text_element(writer, "Label", &property.label)?;
    text_element(writer, "Tooltip", &property.tooltip)?;
    text_element(writer, "InputType", &property.input_type)?;
    text_element(writer, "ValueType", &property.value_type)?;
    end(writer, "Property")
}
