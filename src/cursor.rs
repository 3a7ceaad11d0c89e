//! Bounds-checked sequential reader over a chunk stream.
//!
//! A chunk is `[u32 id][u32 length][length bytes]`, little-endian. Chunks nest:
//! [`ChunkCursor::open_chunk`] pushes a frame, [`ChunkCursor::close_chunk`] pops it
//! and always seeks to the frame's declared end, whatever the decoder consumed in
//! between. Inside a chunk, a run of micro-chunks (`[u8 id][u8 length][bytes]`) can
//! be walked with the `*_micro_chunk` family under the same contract.
//!
//! Every read is checked against the innermost open frame, so a decoder can never
//! read into a sibling's bytes.

use crate::error::{ChunkError, Result};
use byteorder::{ByteOrder, LittleEndian};

/// Size of a chunk header (id + length).
pub const CHUNK_HEADER_LEN: usize = 8;
/// Size of a micro-chunk header (id + length).
pub const MICRO_CHUNK_HEADER_LEN: usize = 2;

#[derive(Debug, Clone, Copy)]
struct Frame {
    id: u32,
    declared: usize,
    /// Absolute offset of the first payload byte.
    start: usize,
}

impl Frame {
    fn end(&self) -> usize {
        self.start + self.declared
    }
}

/// Reader with an open/close frame stack for nested chunks.
#[derive(Debug, Clone)]
pub struct ChunkCursor<'a> {
    data: &'a [u8],
    pos: usize,
    frames: Vec<Frame>,
    micro: Option<Frame>,
}

impl<'a> ChunkCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            frames: Vec::new(),
            micro: None,
        }
    }

    /// Absolute byte position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of chunks currently open.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// End of the innermost open frame (micro-chunk, chunk, then buffer).
    fn limit(&self) -> usize {
        match (self.micro, self.frames.last()) {
            (Some(m), _) => m.end(),
            (None, Some(f)) => f.end(),
            (None, None) => self.data.len(),
        }
    }

    /// Bytes left in the innermost open frame.
    pub fn remaining(&self) -> usize {
        self.limit().saturating_sub(self.pos)
    }

    /// Open the next chunk at the current nesting level.
    ///
    /// Returns `Ok(false)` once no sibling remains. A partial header yields
    /// [`ChunkError::Truncated`]; a declared length larger than what the level has
    /// left yields [`ChunkError::Overrun`]. In both error cases no frame is pushed
    /// and the position is unchanged.
    pub fn open_chunk(&mut self) -> Result<bool> {
        let end = self.limit();
        if self.pos >= end {
            return Ok(false);
        }
        let offset = self.pos;
        let have = end - offset;
        if have < CHUNK_HEADER_LEN {
            return Err(ChunkError::Truncated {
                offset,
                need: CHUNK_HEADER_LEN,
                have,
            });
        }
        let id = LittleEndian::read_u32(&self.data[offset..]);
        let declared = LittleEndian::read_u32(&self.data[offset + 4..]) as usize;
        let start = offset + CHUNK_HEADER_LEN;
        let available = end - start;
        if declared > available {
            return Err(ChunkError::Overrun {
                id,
                offset,
                declared,
                available,
            });
        }
        self.pos = start;
        self.frames.push(Frame { id, declared, start });
        Ok(true)
    }

    /// Close the innermost chunk and seek to its declared end.
    ///
    /// # Panics
    ///
    /// Panics if no chunk is open.
    pub fn close_chunk(&mut self) {
        let frame = match self.frames.pop() {
            Some(f) => f,
            None => panic!("close_chunk called with no open chunk"),
        };
        self.micro = None;
        self.pos = frame.end();
    }

    fn top(&self) -> &Frame {
        match self.frames.last() {
            Some(f) => f,
            None => panic!("no chunk is open"),
        }
    }

    /// Id of the innermost open chunk. Panics if none is open.
    pub fn cur_chunk_id(&self) -> u32 {
        self.top().id
    }

    /// Declared payload length of the innermost open chunk. Panics if none is open.
    pub fn cur_chunk_length(&self) -> u32 {
        self.top().declared as u32
    }

    /// Absolute offset of the innermost open chunk's header. Panics if none is open.
    pub fn cur_chunk_offset(&self) -> usize {
        self.top().start - CHUNK_HEADER_LEN
    }

    /// Open the next micro-chunk inside the current chunk.
    pub fn open_micro_chunk(&mut self) -> Result<bool> {
        if let Some(m) = self.micro {
            return Err(ChunkError::MicroChunkOpen(m.id as u8));
        }
        let end = match self.frames.last() {
            Some(f) => f.end(),
            None => return Err(ChunkError::NoOpenChunk),
        };
        if self.pos >= end {
            return Ok(false);
        }
        let offset = self.pos;
        let have = end - offset;
        if have < MICRO_CHUNK_HEADER_LEN {
            return Err(ChunkError::Truncated {
                offset,
                need: MICRO_CHUNK_HEADER_LEN,
                have,
            });
        }
        let id = self.data[offset] as u32;
        let declared = self.data[offset + 1] as usize;
        let start = offset + MICRO_CHUNK_HEADER_LEN;
        let available = end - start;
        if declared > available {
            return Err(ChunkError::Overrun {
                id,
                offset,
                declared,
                available,
            });
        }
        self.pos = start;
        self.micro = Some(Frame { id, declared, start });
        Ok(true)
    }

    /// Close the open micro-chunk and seek to its declared end.
    ///
    /// # Panics
    ///
    /// Panics if no micro-chunk is open.
    pub fn close_micro_chunk(&mut self) {
        let frame = match self.micro.take() {
            Some(f) => f,
            None => panic!("close_micro_chunk called with no open micro-chunk"),
        };
        self.pos = frame.end();
    }

    fn micro_top(&self) -> &Frame {
        match &self.micro {
            Some(f) => f,
            None => panic!("no micro-chunk is open"),
        }
    }

    pub fn cur_micro_chunk_id(&self) -> u8 {
        self.micro_top().id as u8
    }

    pub fn cur_micro_chunk_length(&self) -> u8 {
        self.micro_top().declared as u8
    }

    fn ensure(&self, n: usize) -> Result<()> {
        let have = self.remaining();
        if n > have {
            return Err(ChunkError::Truncated {
                offset: self.pos,
                need: n,
                have,
            });
        }
        Ok(())
    }

    /// Fill `dst` from the current frame.
    pub fn read(&mut self, dst: &mut [u8]) -> Result<()> {
        let src = self.read_bytes(dst.len())?;
        dst.copy_from_slice(src);
        Ok(())
    }

    /// Borrow `n` bytes from the current frame.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Everything left in the current frame. Never fails.
    pub fn read_all_remaining(&mut self) -> &'a [u8] {
        let end = self.limit().max(self.pos);
        let slice = &self.data[self.pos..end];
        self.pos = end;
        slice
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.read_bytes(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.read_bytes(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.read_bytes(4)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.read_bytes(4)?))
    }

    /// Fixed-width, NUL-padded text field. Bytes after the first NUL are dropped.
    pub fn read_fixed_string(&mut self, n: usize) -> Result<String> {
        let bytes = self.read_bytes(n)?;
        let text = match bytes.iter().position(|&b| b == 0) {
            Some(nul) => &bytes[..nul],
            None => bytes,
        };
        Ok(String::from_utf8_lossy(text).into_owned())
    }

    /// NUL-terminated text; without a terminator the rest of the frame is taken.
    pub fn read_cstring(&mut self) -> Result<String> {
        let rest = &self.data[self.pos..self.limit().max(self.pos)];
        let (text, consumed) = match rest.iter().position(|&b| b == 0) {
            Some(nul) => (&rest[..nul], nul + 1),
            None => (rest, rest.len()),
        };
        self.pos += consumed;
        Ok(String::from_utf8_lossy(text).into_owned())
    }
}
