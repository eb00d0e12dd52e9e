// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dashvault-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dashvault and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text formats for persisted descriptors.
//!
//! Settings (`.wcdf`) and widget registrations (`.component.xml`) are small XML documents.
//! Structure descriptors are JSON and pass through untouched.

pub mod component;
pub mod wcdf;

use std::fmt;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

pub use component::export_widget_registration;
pub use wcdf::{export_settings, parse_settings};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("malformed xml: {0}")]
    Xml(String),
    #[error("expected root element <{expected}>, found <{found}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },
    #[error("document has no <{expected}> root element")]
    MissingRoot { expected: &'static str },
    #[error("invalid value for <{element}>: {value:?}")]
    InvalidValue {
        element: &'static str,
        value: String,
    },
}

pub(crate) fn xml_error(err: impl fmt::Display) -> FormatError {
    FormatError::Xml(err.to_string())
}

pub(crate) type XmlWriter = Writer<Vec<u8>>;

pub(crate) fn xml_writer() -> Result<XmlWriter, FormatError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    Ok(writer)
}

pub(crate) fn finish_xml(writer: XmlWriter) -> Result<String, FormatError> {
    let mut text = String::from_utf8(writer.into_inner()).map_err(xml_error)?;
    text.push('\n');
    Ok(text)
}

pub(crate) fn start(writer: &mut XmlWriter, element: BytesStart<'_>) -> Result<(), FormatError> {
    writer.write_event(Event::Start(element)).map_err(xml_error)
}

pub(crate) fn end(writer: &mut XmlWriter, name: &str) -> Result<(), FormatError> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)
}

/// Writes `element` (which may carry attributes) wrapping `text`.
pub(crate) fn element_with_text(
    writer: &mut XmlWriter,
    element: BytesStart<'_>,
    text: &str,
) -> Result<(), FormatError> {
    let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
    start(writer, element)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_error)?;
    end(writer, &name)
}

/// Writes `<name>text</name>`, or `<name/>` for empty text.
pub(crate) fn text_element(
    writer: &mut XmlWriter,
    name: &str,
    text: &str,
) -> Result<(), FormatError> {
    if text.is_empty() {
        return writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(xml_error);
    }

    element_with_text(writer, BytesStart::new(name), text)
}
