// crates/plystore-core/src/body.rs
//
// Element blocks carry no byte length; the declared record count is the only boundary
// signal, so element N can only be located once element N-1 has been fully counted.

use std::ops::Range;

use tracing::debug;

use crate::error::{PlyError, Result};
use crate::header::ElementDeclaration;
use crate::tokenizer::next_delimiter;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementBody {
    pub declaration: ElementDeclaration,
    /// `[start, end)` into the parsed buffer; ends right after the `count`-th delimiter.
    pub span: Range<usize>,
}

impl ElementBody {
    pub fn bytes<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.span.clone()]
    }

    /// The span without its final delimiter: the form handed to chunk storage.
    pub fn records<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        let bytes = self.bytes(buf);
        bytes.strip_suffix(b"\n").unwrap_or(bytes)
    }
}

pub fn extract(
    buf: &[u8],
    body_offset: usize,
    declarations: &[ElementDeclaration],
) -> Result<Vec<ElementBody>> {
    let mut out = Vec::with_capacity(declarations.len());
    let mut cursor = body_offset;

    for decl in declarations {
        let start = cursor;
        let mut found = 0u64;

        while found < decl.count {
            match next_delimiter(buf, cursor) {
                Some(pos) => {
                    found += 1;
                    cursor = pos + 1;
                }
                None => {
                    return Err(PlyError::TruncatedElementBody {
                        element: decl.name.clone(),
                        expected: decl.count,
                        found,
                    })
                }
            }
        }

        debug!(element = %decl.name, start, end = cursor, "element body");
        out.push(ElementBody {
            declaration: decl.clone(),
            span: start..cursor,
        });
    }

    Ok(out)
}
