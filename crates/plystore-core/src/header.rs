// crates/plystore-core/src/header.rs

use tracing::debug;

use crate::error::{PlyError, Result};
use crate::tokenizer::{next_delimiter, words_of};

pub const ELEMENT_KEYWORD: &str = "element";
pub const END_HEADER_KEYWORD: &str = "end_header";

/// One `element <name> <count>` line, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementDeclaration {
    pub name: String,
    pub count: u64,
    pub ordinal: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderScan {
    /// Source text from the buffer start through the `end_header` line, without its delimiter.
    pub header_text: String,
    pub declarations: Vec<ElementDeclaration>,
    /// First byte after the `end_header` delimiter.
    pub body_offset: usize,
}

/// Consume header lines until `end_header`.
///
/// Lines other than `element` and `end_header` (format, comment, property) are kept in
/// the header text and otherwise ignored.
pub fn scan(buf: &[u8]) -> Result<HeaderScan> {
    let mut declarations = Vec::new();
    let mut line_start = 0usize;
    let mut line_no = 0usize;

    while let Some(delim) = next_delimiter(buf, line_start) {
        line_no += 1;
        let line = &buf[line_start..delim];
        let mut words = words_of(line, line_no)?;

        match words.next() {
            None => return Err(PlyError::EmptyHeaderLine { line: line_no }),
            Some(ELEMENT_KEYWORD) => {
                let decl = parse_declaration(words, declarations.len()).ok_or_else(|| {
                    PlyError::MalformedElementDeclaration {
                        line: line_no,
                        text: String::from_utf8_lossy(line).into_owned(),
                    }
                })?;
                debug!(name = %decl.name, count = decl.count, ordinal = decl.ordinal, "element declared");
                declarations.push(decl);
            }
            Some(END_HEADER_KEYWORD) => {
                // every line up to here already decoded, so the prefix is valid utf-8
                let header_text = std::str::from_utf8(&buf[..delim])
                    .map_err(|_| PlyError::Decoding { line: line_no })?
                    .to_owned();
                debug!(lines = line_no, body_offset = delim + 1, "header scanned");
                return Ok(HeaderScan {
                    header_text,
                    declarations,
                    body_offset: delim + 1,
                });
            }
            Some(_) => {}
        }

        line_start = delim + 1;
    }

    Err(PlyError::MissingEndHeader)
}

fn parse_declaration<'a>(
    mut rest: impl Iterator<Item = &'a str>,
    ordinal: usize,
) -> Option<ElementDeclaration> {
    let name = rest.next()?;
    let count = rest.next()?.parse::<u64>().ok()?;
    Some(ElementDeclaration {
        name: name.to_owned(),
        count,
        ordinal,
    })
}
