// crates/plystore-core/src/chunk.rs
//
// Bounded-size chunking of element payloads and the owned forward chain that carries
// them to storage. Every chunk except the last holds exactly `max_chunk_size` bytes.
//
// Empty payloads split into a single empty chunk, so every chain has a head and
// reconstruct(build(split(x))) == x holds for the empty input too.

use std::fmt;

use crate::error::{PlyError, Result};

/// Default per-chunk byte limit of the storage field.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 250;

pub fn split(payload: &[u8], max_chunk_size: usize) -> Result<Vec<&[u8]>> {
    if max_chunk_size == 0 {
        return Err(PlyError::InvalidChunkSize(max_chunk_size));
    }
    if payload.is_empty() {
        return Ok(vec![payload]);
    }
    Ok(payload.chunks(max_chunk_size).collect())
}

pub struct ChunkNode {
    payload: Vec<u8>,
    next: Option<Box<ChunkNode>>,
}

impl ChunkNode {
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn next(&self) -> Option<&ChunkNode> {
        self.next.as_deref()
    }
}

/// Singly linked, acyclic, exclusively owned chain of chunks.
pub struct ChunkChain {
    head: Box<ChunkNode>,
    chunks: usize,
    bytes: usize,
}

impl ChunkChain {
    /// Link `chunks` so that traversal order equals input order.
    pub fn build<C: AsRef<[u8]>>(chunks: &[C]) -> Result<Self> {
        let (tail, init) = chunks.split_last().ok_or(PlyError::EmptyChunkList)?;
        Ok(Self::link(tail.as_ref(), init.iter().rev().map(|c| c.as_ref())))
    }

    // Tail-first: each new node becomes the head. `before_tail` runs backwards.
    fn link<'c>(tail: &[u8], before_tail: impl Iterator<Item = &'c [u8]>) -> Self {
        let mut chunks = 1usize;
        let mut bytes = tail.len();
        let mut head = Box::new(ChunkNode {
            payload: tail.to_vec(),
            next: None,
        });

        for c in before_tail {
            chunks += 1;
            bytes += c.len();
            head = Box::new(ChunkNode {
                payload: c.to_vec(),
                next: Some(head),
            });
        }

        Self { head, chunks, bytes }
    }

    pub fn from_payload(payload: &[u8], max_chunk_size: usize) -> Result<Self> {
        Self::build(&split(payload, max_chunk_size)?)
    }

    pub fn head(&self) -> &ChunkNode {
        &self.head
    }

    pub fn iter(&self) -> Chunks<'_> {
        Chunks {
            node: Some(self.head()),
        }
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    pub fn byte_len(&self) -> usize {
        self.bytes
    }

    pub fn reconstruct(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.bytes);
        for c in self.iter() {
            out.extend_from_slice(c);
        }
        out
    }
}

/// Concatenate chunk payloads from `head` to the tail.
pub fn reconstruct(head: &ChunkNode) -> Vec<u8> {
    let mut out = Vec::new();
    let mut node = Some(head);
    while let Some(n) = node {
        out.extend_from_slice(&n.payload);
        node = n.next();
    }
    out
}

pub struct Chunks<'a> {
    node: Option<&'a ChunkNode>,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let n = self.node?;
        self.node = n.next();
        Some(&n.payload)
    }
}

impl<'a> IntoIterator for &'a ChunkChain {
    type Item = &'a [u8];
    type IntoIter = Chunks<'a>;

    fn into_iter(self) -> Chunks<'a> {
        self.iter()
    }
}

// The derived drop would recurse once per node.
impl Drop for ChunkChain {
    fn drop(&mut self) {
        let mut next = self.head.next.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

impl Clone for ChunkChain {
    fn clone(&self) -> Self {
        let mut tail = self.head();
        while let Some(n) = tail.next() {
            tail = n;
        }
        let before: Vec<&[u8]> = self.iter().take(self.chunks - 1).collect();
        Self::link(&tail.payload, before.into_iter().rev())
    }
}

impl PartialEq for ChunkChain {
    fn eq(&self, other: &Self) -> bool {
        self.chunks == other.chunks && self.iter().eq(other.iter())
    }
}

impl Eq for ChunkChain {}

impl fmt::Debug for ChunkChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkChain")
            .field("chunks", &self.chunks)
            .field("bytes", &self.bytes)
            .finish()
    }
}
