//! Integration tests: dispatch over custom and built-in tables, resync at chunk
//! boundaries, lossless capture of unknown and truncated data, text export, and
//! batch output files.

use chunkdump::dump::parse_hex_dump;
use chunkdump::decoders::{MESH, MESH_USER_TEXT, VERTICES};
use chunkdump::{
    default_registry, dump_file, export_diagnostics, export_text, parse, parse_with, parse_with_context,
    BatchOptions, ChunkCursor, ChunkNode, ChunkWriter, DiagnosticKind, ParseContext, Registry, MAX_DEPTH,
};
use chunkdump::error::Result;

fn float_leaf(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, _: &mut ParseContext) -> Result<()> {
    chunkdump::fields::f32_field(c, node, "Value")?;
    Ok(())
}

/// Reads one byte of whatever it is given.
fn under_reader(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, _: &mut ParseContext) -> Result<()> {
    chunkdump::fields::u8_field(c, node, "First")?;
    Ok(())
}

/// Asks for more than any small chunk holds.
fn over_reader(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, _: &mut ParseContext) -> Result<()> {
    chunkdump::fields::u8_field(c, node, "First")?;
    c.read_bytes(64)?;
    node.push_field("Unreachable", "uint8", "0");
    Ok(())
}

fn byte_leaf(c: &mut ChunkCursor<'_>, node: &mut ChunkNode, _: &mut ParseContext) -> Result<()> {
    chunkdump::fields::u8_field(c, node, "Byte")?;
    Ok(())
}

// ==================== Dispatch ====================

#[test]
fn test_single_float_leaf() {
    let mut r = Registry::new();
    r.register_leaf(0x01, "FLOAT", float_leaf);
    let mut w = ChunkWriter::new();
    w.chunk(0x01, &1.5f32.to_le_bytes());
    let result = parse_with(&r, &w.into_bytes());

    assert!(result.is_clean());
    assert_eq!(result.root.children.len(), 1);
    let node = &result.root.children[0];
    assert_eq!(node.name, "FLOAT");
    assert_eq!(node.fields.len(), 1);
    assert_eq!(export_text(&result.root), "File\n\tFLOAT\n\t\tValue\tfloat\t1.500000\n");
}

#[test]
fn test_container_wrapping_unknown_children() {
    let mut r = Registry::new();
    r.register_container(0x10, "GROUP");
    let mut w = ChunkWriter::new();
    w.begin_chunk(0x10);
    w.chunk(0xAAAA, &[1, 2]);
    w.chunk(0xBBBB, &[3, 4, 5]);
    w.end_chunk();
    let result = parse_with(&r, &w.into_bytes());

    let group = result.root.child("GROUP").expect("group");
    let names: Vec<&str> = group.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["0x0000AAAA", "0x0000BBBB"]);
    assert_eq!(group.children[0].field_value("Chunk Data"), Some("01 02"));
    assert_eq!(group.children[1].field_value("Chunk Data"), Some("03 04 05"));
    assert_eq!(
        export_diagnostics(&result.diagnostics),
        "Unknown Chunk 0x0000AAAA\nUnknown Chunk 0x0000BBBB\n"
    );
}

#[test]
fn test_overrun_after_closed_sibling() {
    let mut w = ChunkWriter::new();
    w.chunk(0xAAAA, &[1, 2]);
    w.u32(0xBBBB).u32(100).bytes(&[7, 8, 9]);
    let result = parse_with(&Registry::new(), &w.into_bytes());

    assert_eq!(result.root.children.len(), 2);
    assert_eq!(result.root.children[0].field_value("Chunk Data"), Some("01 02"));
    let truncated = &result.root.children[1];
    assert_eq!(truncated.name, "0x0000BBBB");
    assert_eq!(truncated.field_value("Declared Length"), Some("100"));
    let data = truncated.field("Chunk Data").expect("data");
    assert_eq!(data.type_tag, "Truncated");
    assert_eq!(data.value, "07 08 09");
    assert_eq!(result.count(DiagnosticKind::UnknownChunk), 1);
    assert_eq!(result.count(DiagnosticKind::Truncation), 1);
    assert_eq!(result.diagnostics[1].offset, 10);
}

#[test]
fn test_overrun_uses_registered_name() {
    let mut w = ChunkWriter::new();
    w.u32(VERTICES).u32(1000).bytes(&[0; 12]);
    let result = parse(&w.into_bytes());

    assert_eq!(result.root.children[0].name, "VERTICES");
    assert!(result.diagnostics[0].message.starts_with("Truncated Chunk VERTICES (0x00000002)"));
}

#[test]
fn test_empty_input() {
    let result = parse(&[]);
    assert!(result.root.children.is_empty());
    assert!(result.is_clean());
    assert_eq!(export_text(&result.root), "File\n");
}

#[test]
fn test_deterministic_output() {
    let mut w = ChunkWriter::new();
    w.begin_chunk(MESH);
    w.chunk(VERTICES, &[0; 24]);
    w.chunk(0x7777, &[0xDE, 0xAD]);
    w.end_chunk();
    w.bytes(&[1, 2, 3]);
    let bytes = w.into_bytes();

    let a = parse(&bytes);
    let b = parse(&bytes);
    assert_eq!(a, b);
    assert_eq!(export_text(&a.root), export_text(&b.root));
    assert_eq!(export_diagnostics(&a.diagnostics), export_diagnostics(&b.diagnostics));
}

#[test]
fn test_deep_nesting_stops_at_limit() {
    let levels = 10_000;
    let mut w = ChunkWriter::new();
    for _ in 0..levels {
        w.begin_chunk(MESH);
    }
    for _ in 0..levels {
        w.end_chunk();
    }
    w.chunk(VERTICES, &[0; 12]);
    let result = parse(&w.into_bytes());

    let mut node = &result.root.children[0];
    let mut depth = 1;
    while let Some(inner) = node.children.first() {
        node = inner;
        depth += 1;
    }
    assert_eq!(depth, MAX_DEPTH + 1);
    let data = node.field("Chunk Data").expect("captured payload");
    assert_eq!(data.type_tag, "Truncated");
    assert_eq!(data.value.split(' ').count(), (levels - MAX_DEPTH - 1) * 8);
    assert_eq!(result.count(DiagnosticKind::Truncation), 1);
    assert!(result.diagnostics[0].message.starts_with("Nesting limit 256 reached at MESH"));
    assert_eq!(result.root.children[1].name, "VERTICES");
}

#[test]
fn test_custom_nesting_limit() {
    let mut w = ChunkWriter::new();
    w.begin_chunk(MESH);
    w.begin_chunk(MESH);
    w.chunk(VERTICES, &[0; 12]);
    w.end_chunk();
    w.end_chunk();
    let bytes = w.into_bytes();

    let result = parse_with_context(default_registry(), &bytes, ParseContext::new().with_max_depth(1));
    let outer = &result.root.children[0];
    assert!(outer.children[0].children.is_empty());
    assert_eq!(outer.children[0].field("Chunk Data").map(|f| f.type_tag.as_str()), Some("Truncated"));

    let full = parse(&bytes);
    assert_eq!(full.root.children[0].children[0].children[0].name, "VERTICES");
    assert!(full.is_clean());
}

#[test]
fn test_control_characters_stay_on_one_line() {
    let mut w = ChunkWriter::new();
    w.begin_chunk(MESH_USER_TEXT).cstr("line1\nline2\tend").end_chunk();
    let result = parse(&w.into_bytes());

    assert_eq!(result.root.children[0].field_value("Text"), Some("line1\nline2\tend"));
    let text = export_text(&result.root);
    assert_eq!(text.lines().count(), 3);
    assert_eq!(text, "File\n\tMESH_USER_TEXT\n\t\tText\tstring\tline1\\nline2\\tend\n");
}

// ==================== Resync ====================

#[test]
fn test_under_reading_decoder_does_not_hide_sibling() {
    let mut r = Registry::new();
    r.register_leaf(0x01, "GREEDY", under_reader).register_leaf(0x02, "NEXT", byte_leaf);
    let mut w = ChunkWriter::new();
    w.chunk(0x01, &[1, 2, 3, 4, 5, 6, 7, 8]);
    w.chunk(0x02, &[42]);
    let result = parse_with(&r, &w.into_bytes());

    assert!(result.is_clean());
    assert_eq!(result.root.children[1].name, "NEXT");
    assert_eq!(result.root.children[1].field_value("Byte"), Some("42"));
}

#[test]
fn test_over_reading_decoder_keeps_partial_node() {
    let mut r = Registry::new();
    r.register_leaf(0x01, "OVER", over_reader).register_leaf(0x02, "NEXT", byte_leaf);
    let mut w = ChunkWriter::new();
    w.chunk(0x01, &[5, 6, 7]);
    w.chunk(0x02, &[42]);
    let result = parse_with(&r, &w.into_bytes());

    let over = &result.root.children[0];
    assert_eq!(over.field_value("First"), Some("5"));
    assert!(over.field("Unreachable").is_none());
    assert_eq!(result.root.children[1].field_value("Byte"), Some("42"));
    assert_eq!(result.count(DiagnosticKind::Truncation), 1);
    assert!(result.diagnostics[0].message.starts_with("Error decoding OVER at offset 0"));
}

#[test]
fn test_resync_inside_nested_container() {
    let mut r = Registry::new();
    r.register_container(0x10, "GROUP")
        .register_leaf(0x01, "OVER", over_reader)
        .register_leaf(0x02, "NEXT", byte_leaf);
    let mut w = ChunkWriter::new();
    w.begin_chunk(0x10);
    w.chunk(0x01, &[1]);
    w.end_chunk();
    w.chunk(0x02, &[9]);
    let result = parse_with(&r, &w.into_bytes());

    assert_eq!(result.root.children.len(), 2);
    assert_eq!(result.root.children[0].children[0].name, "OVER");
    assert_eq!(result.root.children[1].field_value("Byte"), Some("9"));
}

// ==================== Lossless capture ====================

#[test]
fn test_unknown_chunk_payload_is_recoverable() {
    let payload: Vec<u8> = (0u8..=255).collect();
    let mut w = ChunkWriter::new();
    w.chunk(0xCAFE, &payload);
    let result = parse(&w.into_bytes());

    let node = &result.root.children[0];
    let hex = node.field_value("Chunk Data").expect("data");
    assert_eq!(parse_hex_dump(hex), Some(payload));
}

#[test]
fn test_array_ignores_trailing_partial_element() {
    let mut payload = Vec::new();
    for v in [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0] {
        payload.extend_from_slice(&v.to_le_bytes());
    }
    payload.extend_from_slice(&[0xFF; 5]);
    let mut w = ChunkWriter::new();
    w.chunk(VERTICES, &payload);
    let result = parse(&w.into_bytes());

    let node = &result.root.children[0];
    assert_eq!(node.fields.len(), 2);
    assert_eq!(node.field_value("Vertex[0]"), Some("(1.000000, 2.000000, 3.000000)"));
    assert_eq!(node.field_value("Vertex[1]"), Some("(4.000000, 5.000000, 6.000000)"));
    assert!(result.is_clean());
}

// ==================== Batch ====================

fn write_input(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("write input");
    path
}

#[test]
fn test_batch_clean_file_has_no_unk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut w = ChunkWriter::new();
    w.chunk(VERTICES, &[0; 12]);
    let input = write_input(&dir, "clean.bin", &w.into_bytes());
    let stale = chunkdump::batch::unk_path(&input);
    std::fs::write(&stale, "old").expect("write stale");

    let report = dump_file(&input, BatchOptions::default()).expect("dump");
    assert!(report.unk_path.is_none());
    assert!(!stale.exists());
    assert_eq!(report.txt_path, dir.path().join("clean.bin.txt"));
    let txt = std::fs::read_to_string(&report.txt_path).expect("read txt");
    assert!(txt.starts_with("clean.bin\n\tVERTICES\n"));
}

#[test]
fn test_batch_writes_unk_for_diagnostics() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut w = ChunkWriter::new();
    w.chunk(0xAAAA, &[1]);
    let input = write_input(&dir, "odd.bin", &w.into_bytes());

    let report = dump_file(&input, BatchOptions::default()).expect("dump");
    assert_eq!(report.diagnostic_count, 1);
    assert_eq!(report.node_count, 2);
    let unk = report.unk_path.expect("unk written");
    assert_eq!(std::fs::read_to_string(unk).expect("read unk"), "Unknown Chunk 0x0000AAAA\n");
    assert!(report.txt_path.exists());
}

#[test]
fn test_batch_missing_input_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = dump_file(&dir.path().join("absent.bin"), BatchOptions::default()).expect_err("missing");
    assert!(matches!(err, chunkdump::BatchError::Read { .. }));
}
