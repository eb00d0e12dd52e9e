// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! `.wcdf` settings documents.
//!
//! ```xml
//! <cdf>
//!   <title>Sales</title>
//!   <widget>true</widget>
//!   <widgetParameters>
//!     <parameter>region</parameter>
//!   </widgetParameters>
//! </cdf>
//! ```

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{end, finish_xml, start, text_element, xml_error, xml_writer, FormatError};
use crate::model::{RendererType, SettingsDescriptor};

const ROOT: &str = "cdf";
const PARAMETERS: &str = "widgetParameters";
const PARAMETER: &str = "parameter";

pub fn export_settings(settings: &SettingsDescriptor) -> Result<String, FormatError> {
    let mut writer = xml_writer()?;
    start(&mut writer, BytesStart::new(ROOT))?;

    text_element(&mut writer, "title", &settings.title)?;
    text_element(&mut writer, "author", &settings.author)?;
    text_element(&mut writer, "description", &settings.description)?;
    text_element(&mut writer, "style", &settings.style)?;
    text_element(&mut writer, "rendererType", settings.renderer_type.as_str())?;
    text_element(&mut writer, "widget", if settings.widget { "true" } else { "false" })?;
    text_element(&mut writer, "widgetName", &settings.widget_name)?;

    if settings.widget_parameters.is_empty() {
        text_element(&mut writer, PARAMETERS, "")?;
    } else {
        start(&mut writer, BytesStart::new(PARAMETERS))?;
        for name in &settings.widget_parameters {
            text_element(&mut writer, PARAMETER, name)?;
        }
        end(&mut writer, PARAMETERS)?;
    }

    end(&mut writer, ROOT)?;
    finish_xml(writer)
}

/// Parses a settings document; `path` is recorded on the returned descriptor.
///
/// Elements this crate does not know are skipped.
pub fn parse_settings(path: &str, text: &str) -> Result<SettingsDescriptor, FormatError> {
    // Text is kept verbatim; indentation between elements never lands on a leaf path.
    let mut reader = Reader::from_str(text);

    let mut settings = SettingsDescriptor::new(path);
    let mut open: Vec<String> = Vec::new();
    let mut saw_root = false;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(element) => {
                let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
                if open.is_empty() {
                    check_root(&name)?;
                    saw_root = true;
                }
                open.push(name);
            }
            Event::Empty(element) => {
                if open.is_empty() {
                    let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
                    check_root(&name)?;
                    saw_root = true;
                }
            }
            Event::End(_) => {
                open.pop();
            }
            Event::Text(text) => {
                let value = text.unescape().map_err(xml_error)?;
                assign(&mut settings, &open, value.into_owned())?;
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                assign(&mut settings, &open, value)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(FormatError::MissingRoot { expected: ROOT });
    }

    Ok(settings)
}

fn check_root(name: &str) -> Result<(), FormatError> {
    if name == ROOT {
        Ok(())
    } else {
        Err(FormatError::UnexpectedRoot {
            expected: ROOT,
            found: name.to_owned(),
        })
    }
}

fn assign(
    settings: &mut SettingsDescriptor,
    open: &[String],
    value: String,
) -> Result<(), FormatError> {
    let path = open.iter().map(String::as_str).collect::<Vec<_>>();
    match path.as_slice() {
        [ROOT, "title"] => settings.title = value,
        [ROOT, "author"] => settings.author = value,
        [ROOT, "description"] => settings.description = value,
        [ROOT, "style"] => settings.style = value,
        [ROOT, "rendererType"] => {
            settings.renderer_type = value
                .parse::<RendererType>()
                .map_err(|_| FormatError::InvalidValue {
                    element: "rendererType",
                    value,
                })?;
        }
        [ROOT, "widget"] => {
            let flag = value.trim();
            if flag.eq_ignore_ascii_case("true") {
                settings.widget = true;
            } else if flag.eq_ignore_ascii_case("false") {
                settings.widget = false;
            } else {
                return Err(FormatError::InvalidValue {
                    element: "widget",
                    value: value.clone(),
                });
            }
        }
        [ROOT, "widgetName"] => settings.widget_name = value,
        [ROOT, PARAMETERS, PARAMETER] => settings.widget_parameters.push(value),
        _ => {}
    }
    Ok(())
}
