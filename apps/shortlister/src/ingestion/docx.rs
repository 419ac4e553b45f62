//! DOCX text extraction: one line per body paragraph of `word/document.xml`.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::errors::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Returns every body paragraph's text in document order, joined with `\n`.
/// Empty paragraphs contribute empty lines. Paragraphs nested inside another
/// paragraph (text boxes) stay on their enclosing paragraph's line.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut package = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Docx(format!("not a DOCX package: {e}")))?;

    let mut xml = String::new();
    package
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractError::Docx(format!("missing {DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)?;

    Ok(body_paragraphs(&xml)?.join("\n"))
}

fn xml_error(e: quick_xml::Error) -> ExtractError {
    ExtractError::Docx(format!("malformed {DOCUMENT_PART}: {e}"))
}

fn body_paragraphs(xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut lines = BodyLines::default();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:body" => lines.in_body = true,
                b"w:p" => lines.open_paragraph(),
                b"w:r" => lines.run_depth += 1,
                b"w:t" => lines.in_text = true,
                // Legacy VML copy of a text box already read from mc:Choice.
                b"mc:Fallback" => {
                    reader.read_to_end(e.name()).map_err(xml_error)?;
                }
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:body" => lines.in_body = false,
                b"w:p" => lines.close_paragraph(),
                b"w:r" => lines.run_depth = lines.run_depth.saturating_sub(1),
                b"w:t" => lines.in_text = false,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" => {
                    lines.open_paragraph();
                    lines.close_paragraph();
                }
                b"w:tab" if lines.run_depth > 0 => lines.push_str("\t"),
                b"w:br" | b"w:cr" if lines.run_depth > 0 => lines.push_str("\n"),
                _ => {}
            },
            Event::Text(t) if lines.in_text => {
                let text = t.unescape().map_err(xml_error)?;
                lines.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(lines.done)
}

/// Paragraph state while walking the document body.
#[derive(Default)]
struct BodyLines {
    done: Vec<String>,
    current: String,
    in_body: bool,
    paragraph_depth: usize,
    run_depth: usize,
    in_text: bool,
}

impl BodyLines {
    fn open_paragraph(&mut self) {
        if !self.in_body {
            return;
        }
        self.paragraph_depth += 1;
        if self.paragraph_depth == 1 {
            self.current.clear();
        } else {
            self.separate();
        }
    }

    fn close_paragraph(&mut self) {
        if !self.in_body || self.paragraph_depth == 0 {
            return;
        }
        self.paragraph_depth -= 1;
        if self.paragraph_depth == 0 {
            self.done.push(std::mem::take(&mut self.current));
        } else {
            self.separate();
        }
    }

    fn push_str(&mut self, text: &str) {
        if self.in_body && self.paragraph_depth > 0 {
            self.current.push_str(text);
        }
    }

    fn separate(&mut self) {
        if !self.current.is_empty() && !self.current.ends_with(char::is_whitespace) {
            self.current.push(' ');
        }
    }
}
