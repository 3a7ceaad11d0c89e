//! Chunk id → (display name, decoder) table.
//!
//! The table is an explicit registration list, built once per process by
//! [`default_registry`]. Custom tables can be built with [`Registry::new`] for
//! embedding or for tests that inject their own decoders.

use crate::cursor::ChunkCursor;
use crate::dispatch::ParseContext;
use crate::error::Result;
use crate::node::ChunkNode;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Decodes one chunk payload into fields on `node`.
pub type LeafFn = fn(&mut ChunkCursor<'_>, &mut ChunkNode, &mut ParseContext) -> Result<()>;

/// How a registered chunk is decoded.
#[derive(Clone, Copy)]
pub enum Decoder {
    /// Payload is a sequence of chunks; the dispatcher recurses into it.
    Container,
    /// Payload is raw typed data read by the function.
    Leaf(LeafFn),
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoder::Container => f.write_str("Container"),
            Decoder::Leaf(_) => f.write_str("Leaf"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub id: u32,
    pub name: &'static str,
    pub decoder: Decoder,
}

#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<u32, Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `decoder` under `id`. An existing entry for `id` is replaced.
    pub fn register(&mut self, id: u32, name: &'static str, decoder: Decoder) -> &mut Self {
        self.entries.insert(id, Entry { id, name, decoder });
        self
    }

    pub fn register_container(&mut self, id: u32, name: &'static str) -> &mut Self {
        self.register(id, name, Decoder::Container)
    }

    pub fn register_leaf(&mut self, id: u32, name: &'static str, f: LeafFn) -> &mut Self {
        self.register(id, name, Decoder::Leaf(f))
    }

    pub fn lookup(&self, id: u32) -> Option<&Entry> {
        self.entries.get(&id)
    }

    /// Display name for `id`, if registered.
    pub fn name_of(&self, id: u32) -> Option<&'static str> {
        self.lookup(id).map(|e| e.name)
    }

    /// All entries sorted by id.
    pub fn entries(&self) -> Vec<&Entry> {
        let mut out: Vec<&Entry> = self.entries.values().collect();
        out.sort_by_key(|e| e.id);
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The built-in table of known chunk types. Built on first use, immutable after.
pub fn default_registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut r = Registry::new();
        crate::decoders::register_all(&mut r);
        tracing::debug!("registered {} chunk types", r.len());
        r
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut ChunkCursor<'_>, _: &mut ChunkNode, _: &mut ParseContext) -> Result<()> {
        Ok(())
    }

    #[test]
    fn last_registration_wins() {
        let mut r = Registry::new();
        r.register_leaf(5, "FIRST", noop);
        r.register_container(5, "SECOND");
        assert_eq!(r.len(), 1);
        let e = r.lookup(5).expect("entry");
        assert_eq!(e.name, "SECOND");
        assert!(matches!(e.decoder, Decoder::Container));
    }

    #[test]
    fn entries_sorted_by_id() {
        let mut r = Registry::new();
        r.register_container(30, "C").register_container(1, "A").register_container(7, "B");
        let ids: Vec<u32> = r.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 7, 30]);
    }

    #[test]
    fn default_registry_knows_mesh() {
        let r = default_registry();
        assert_eq!(r.name_of(0x0000_0000), Some("MESH"));
        assert!(r.lookup(0xDEAD_BEEF).is_none());
    }
}
