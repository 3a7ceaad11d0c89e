//! Builder for chunk streams: test fixtures, benchmarks, fuzz seeds.
//!
//! Lengths of nested chunks are back-patched when the chunk is closed, so callers
//! only describe structure and payload.

use byteorder::{ByteOrder, LittleEndian};

#[derive(Debug, Default)]
pub struct ChunkWriter {
    buf: Vec<u8>,
    /// Offsets of the length fields of chunks still open.
    open: Vec<usize>,
}

impl ChunkWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Start a chunk whose length is patched by the matching [`end_chunk`](Self::end_chunk).
    pub fn begin_chunk(&mut self, id: u32) -> &mut Self {
        self.u32(id);
        self.open.push(self.buf.len());
        self.u32(0);
        self
    }

    /// Close the innermost chunk started with [`begin_chunk`](Self::begin_chunk).
    ///
    /// # Panics
    ///
    /// Panics if no chunk is open.
    pub fn end_chunk(&mut self) -> &mut Self {
        let at = match self.open.pop() {
            Some(at) => at,
            None => panic!("end_chunk called with no open chunk"),
        };
        let len = self.buf.len() - at - 4;
        LittleEndian::write_u32(&mut self.buf[at..at + 4], len as u32);
        self
    }

    /// Complete chunk with a raw payload.
    pub fn chunk(&mut self, id: u32, payload: &[u8]) -> &mut Self {
        self.u32(id);
        self.u32(payload.len() as u32);
        self.bytes(payload)
    }

    /// Micro-chunk with a raw payload (at most 255 bytes).
    pub fn micro(&mut self, id: u8, payload: &[u8]) -> &mut Self {
        debug_assert!(payload.len() <= u8::MAX as usize);
        self.buf.push(id);
        self.buf.push(payload.len() as u8);
        self.bytes(payload)
    }

    pub fn bytes(&mut self, b: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(b);
        self
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.bytes(&v.to_le_bytes())
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.bytes(&v.to_le_bytes())
    }

    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.bytes(&v.to_le_bytes())
    }

    pub fn f32(&mut self, v: f32) -> &mut Self {
        self.bytes(&v.to_le_bytes())
    }

    /// Fixed-width text, NUL-padded (or cut) to `width`.
    pub fn fixed_str(&mut self, s: &str, width: usize) -> &mut Self {
        let mut field = vec![0u8; width];
        let n = s.len().min(width);
        field[..n].copy_from_slice(&s.as_bytes()[..n]);
        self.bytes(&field)
    }

    /// NUL-terminated text.
    pub fn cstr(&mut self, s: &str) -> &mut Self {
        self.bytes(s.as_bytes());
        self.u8(0)
    }

    /// Finished stream. Unclosed chunks keep a zero length.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
