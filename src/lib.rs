//! # chunkdump: Chunk Container Inspector
//!
//! Decodes nested chunk (tag-length-value) asset containers into a tree of named
//! nodes with pre-rendered text fields, and exports that tree as an indented text
//! report plus a list of diagnostics for everything that was not recognized.
//!
//! ## Wire format
//!
//! - **Chunk**: `[u32 id][u32 length][length bytes]`, little-endian. The payload is
//!   either typed data or a further sequence of chunks (a *container*).
//! - **Micro-chunk**: `[u8 id][u8 length][length bytes]`, used inside selected
//!   chunks for compact key/value data.
//!
//! ## Guarantees
//!
//! - Closing a chunk always seeks to its declared end, so a decoder that reads too
//!   little, too much, or fails never hides the next sibling.
//! - Unknown chunk ids are kept as a hex dump of their payload and reported.
//! - Unknown enum values and flag bits are reported and decoding continues.
//! - Arrays decode `floor(length / element_size)` elements; a trailing partial
//!   element is ignored.
//! - Output is a pure function of the input bytes.
//!
//! ## Example
//!
//! ```
//! use chunkdump::{export_diagnostics, export_text, parse, ChunkWriter};
//!
//! let mut w = ChunkWriter::new();
//! w.chunk(0xAAAA, &[1, 2]);
//! let result = parse(&w.into_bytes());
//! assert_eq!(result.root.children[0].name, "0x0000AAAA");
//! assert_eq!(export_diagnostics(&result.diagnostics), "Unknown Chunk 0x0000AAAA\n");
//! assert!(export_text(&result.root).contains("Chunk Data\tUnknown\t01 02"));
//! ```

pub mod batch;
pub mod cursor;
pub mod decoders;
pub mod dispatch;
pub mod dump;
pub mod error;
pub mod fields;
pub mod node;
pub mod registry;
pub mod writer;

pub use batch::{dump_file, BatchError, BatchOptions, BatchReport};
pub use cursor::ChunkCursor;
pub use dispatch::{parse, parse_subchunks, parse_with, parse_with_context, Hints, ParseContext, MAX_DEPTH, ROOT_NAME};
pub use dump::{export_diagnostics, export_text, export_text_with, hex_dump, hex_id, DumpOptions};
pub use error::ChunkError;
pub use node::{ChunkNode, Diagnostic, DiagnosticKind, FieldRecord, ParseResult};
pub use registry::{default_registry, Decoder, Entry, LeafFn, Registry};
pub use writer::ChunkWriter;
