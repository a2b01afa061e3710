//! Paragraph text from the main part of a WordprocessingML package.
//!
//! Only direct children of `w:body` count. Paragraphs nested in tables, text
//! boxes or content controls belong to those containers and are skipped, as is
//! run text wrapped in an inline content control.

use crate::error::{IngestError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_paragraphs(bytes: &[u8]) -> Result<Vec<String>> {
    let xml = read_document_part(bytes)?;
    paragraphs_from_xml(&xml)
}

fn read_document_part(bytes: &[u8]) -> Result<String> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|error| IngestError::DocxParse(error.to_string()))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|error| IngestError::DocxParse(format!("{DOCUMENT_PART}: {error}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

fn is_container(name: &[u8]) -> bool {
    matches!(name, b"w:tbl" | b"w:txbxContent" | b"w:sdt")
}

pub(crate) fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut container_depth = 0usize;
    let mut in_text_run = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|error| IngestError::DocxParse(error.to_string()))?;

        match event {
            Event::Start(element) => match element.name().as_ref() {
                name if is_container(name) => container_depth += 1,
                b"w:p" if container_depth == 0 => current = Some(String::new()),
                b"w:t" => in_text_run = current.is_some() && container_depth == 0,
                _ => {}
            },
            Event::Empty(element) => {
                if container_depth > 0 {
                    continue;
                }
                match element.name().as_ref() {
                    b"w:p" => paragraphs.push(String::new()),
                    b"w:tab" => push_char(&mut current, '\t'),
                    b"w:br" | b"w:cr" => push_char(&mut current, '\n'),
                    _ => {}
                }
            }
            Event::Text(text) if in_text_run => {
                let unescaped = text
                    .unescape()
                    .map_err(|error| IngestError::DocxParse(error.to_string()))?;
                if let Some(paragraph) = current.as_mut() {
                    paragraph.push_str(&unescaped);
                }
            }
            Event::End(element) => match element.name().as_ref() {
                name if is_container(name) => container_depth = container_depth.saturating_sub(1),
                b"w:p" if container_depth == 0 => {
                    if let Some(paragraph) = current.take() {
                        paragraphs.push(paragraph);
                    }
                }
                b"w:t" => in_text_run = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn push_char(current: &mut Option<String>, value: char) {
    if let Some(paragraph) = current.as_mut() {
        paragraph.push(value);
    }
}
