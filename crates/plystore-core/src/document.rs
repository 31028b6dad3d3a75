// crates/plystore-core/src/document.rs

use crate::body::{self, ElementBody};
use crate::error::Result;
use crate::header::{self, ElementDeclaration};

/// One parse result over a borrowed buffer. No partial document exists on failure.
#[derive(Clone, Debug)]
pub struct Document<'a> {
    source: &'a [u8],
    body_offset: usize,
    pub header_text: String,
    pub elements: Vec<ElementBody>,
}

impl<'a> Document<'a> {
    pub fn parse(source: &'a [u8]) -> Result<Self> {
        let scan = header::scan(source)?;
        let elements = body::extract(source, scan.body_offset, &scan.declarations)?;
        Ok(Self {
            source,
            body_offset: scan.body_offset,
            header_text: scan.header_text,
            elements,
        })
    }

    pub fn source(&self) -> &'a [u8] {
        self.source
    }

    pub fn declarations(&self) -> impl Iterator<Item = &ElementDeclaration> + '_ {
        self.elements.iter().map(|e| &e.declaration)
    }

    /// `(declaration, span bytes)` in declaration order.
    pub fn element_bytes(&self) -> impl Iterator<Item = (&ElementDeclaration, &'a [u8])> + '_ {
        let src = self.source;
        self.elements.iter().map(move |e| (&e.declaration, e.bytes(src)))
    }

    /// Like `element_bytes`, with each span's final delimiter removed.
    pub fn element_records(&self) -> impl Iterator<Item = (&ElementDeclaration, &'a [u8])> + '_ {
        let src = self.source;
        self.elements.iter().map(move |e| (&e.declaration, e.records(src)))
    }

    pub fn body_offset(&self) -> usize {
        self.body_offset
    }

    /// Offset one past the last element span; anything after it belongs to no element.
    pub fn body_end(&self) -> usize {
        self.elements
            .last()
            .map(|e| e.span.end)
            .unwrap_or(self.body_offset)
    }
}
