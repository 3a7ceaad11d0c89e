//! Errors raised while walking chunk structure.

/// Structural failure while reading a chunk stream.
///
/// Both truncation variants are fatal for the node being decoded only: the
/// dispatcher records them and resynchronizes at the enclosing chunk boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChunkError {
    /// A read asked for more bytes than the current frame or buffer holds.
    #[error("truncated read at offset {offset}: need {need} bytes, have {have}")]
    Truncated { offset: usize, need: usize, have: usize },
    /// A chunk header declares more payload than its parent (or the buffer) has left.
    #[error("chunk 0x{id:08X} at offset {offset} declares {declared} bytes, only {available} available")]
    Overrun {
        id: u32,
        offset: usize,
        declared: usize,
        available: usize,
    },
    /// Micro-chunk access outside of any open chunk.
    #[error("no chunk is open")]
    NoOpenChunk,
    /// A second micro-chunk was opened before the first was closed.
    #[error("micro-chunk 0x{0:02X} is already open")]
    MicroChunkOpen(u8),
}

impl ChunkError {
    /// True for the StructuralTruncation family (as opposed to API misuse).
    pub fn is_truncation(&self) -> bool {
        matches!(self, ChunkError::Truncated { .. } | ChunkError::Overrun { .. })
    }
}

pub type Result<T> = std::result::Result<T, ChunkError>;
