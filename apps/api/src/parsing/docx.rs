//! DOCX reader — opens the OOXML container and flattens the main document
//! part to plain text.
//!
//! WordprocessingML keeps visible text inside `<w:t>` runs. Paragraphs and
//! explicit breaks become newlines and tabs stay tabs, so two adjacent runs
//! never merge into one token.

use std::io::{Cursor, Read};

use tracing::warn;
use zip::ZipArchive;

use super::{DocumentReader, ParseError};

const DOCUMENT_PART: &str = "word/document.xml";

pub struct DocxReader;

impl DocumentReader for DocxReader {
    fn read(&self, bytes: &[u8]) -> Result<String, ParseError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            warn!("DOCX container open failed: {e}");
            ParseError::Malformed(e.to_string())
        })?;

        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(|_| ParseError::Malformed(format!("missing {DOCUMENT_PART}")))?
            .read_to_string(&mut xml)
            .map_err(|e| ParseError::Malformed(e.to_string()))?;

        let text = flatten_document_xml(&xml);

        if text.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        Ok(text)
    }
}

/// Flattens WordprocessingML to text: `<w:t>` content in document order,
/// `</w:p>` → newline, `<w:tab/>` → tab, `<w:br/>`/`<w:cr/>` → newline.
/// Everything else (run properties, tables markup, drawings) is dropped.
fn flatten_document_xml(xml: &str) -> String {
    let mut out = String::new();
    let mut rest = xml;
    let mut in_text = false;

    while let Some(lt) = rest.find('<') {
        if in_text {
            out.push_str(&decode_entities(&rest[..lt]));
        }

        let Some(gt) = rest[lt..].find('>') else { break };
        let tag = &rest[lt + 1..lt + gt];
        let name = tag
            .trim_start_matches('/')
            .split([' ', '/', '\t', '\n', '\r'])
            .next()
            .unwrap_or("");

        if tag.starts_with('/') {
            match name {
                "w:t" => in_text = false,
                "w:p" => out.push('\n'),
                _ => {}
            }
        } else {
            let self_closing = tag.ends_with('/');
            match name {
                "w:t" if !self_closing => in_text = true,
                "w:tab" => out.push('\t'),
                "w:br" | "w:cr" => out.push('\n'),
                _ => {}
            }
        }

        rest = &rest[lt + gt + 1..];
    }

    out
}

/// Decodes the XML predefined entities plus numeric character references.
/// Unknown entities are left as-is.
fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let Some(semi) = tail.find(';') else {
            out.push('&');
            rest = &tail[1..];
            continue;
        };

        let entity = &tail[1..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                u32::from_str_radix(&entity[2..], 16)
                    .ok()
                    .and_then(char::from_u32)
            }
            _ if entity.starts_with('#') => {
                entity[1..].parse::<u32>().ok().and_then(char::from_u32)
            }
            _ => None,
        };

        match decoded {
            Some(c) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
