//! Dump chunk container files to text.
//!
//! Usage:
//!   chunkdump [OPTIONS] FILE...
//!   chunkdump --list
//!
//! For each FILE, writes FILE.txt (indented dump of every chunk and field) and
//! FILE.unk (one line per unrecognized chunk, enum value or flag bit). FILE.unk
//! is removed when there is nothing to report.
//!
//! Options:
//!   --stdout       Print the dump and diagnostics instead of writing files
//!   --no-unk       Do not write or remove FILE.unk
//!   --outline      Node names only, no fields
//!   --list         Print the registered chunk types and exit
//!   -v, --verbose  Debug logging (RUST_LOG overrides)

use chunkdump::{
    default_registry, dump_file, export_diagnostics, export_text_with, hex_id, parse, BatchOptions, Decoder,
    DumpOptions,
};
use std::io::{self, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn take_flag(args: &mut Vec<String>, names: &[&str]) -> bool {
    if let Some(pos) = args.iter().position(|a| names.contains(&a.as_str())) {
        args.remove(pos);
        true
    } else {
        false
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_registry() -> io::Result<()> {
    let mut out = io::stdout().lock();
    for e in default_registry().entries() {
        let kind = match e.decoder {
            Decoder::Container => "container",
            Decoder::Leaf(_) => "leaf",
        };
        writeln!(out, "{}\t{}\t{}", hex_id(e.id), kind, e.name)?;
    }
    Ok(())
}

fn print_dump(path: &Path, dump: DumpOptions) -> anyhow::Result<()> {
    let data = std::fs::read(path).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
    let mut result = parse(&data);
    result.root.name = path.display().to_string();
    let mut out = io::stdout().lock();
    out.write_all(export_text_with(&result.root, dump).as_bytes())?;
    let diags = export_diagnostics(&result.diagnostics);
    if !diags.is_empty() {
        writeln!(out)?;
        out.write_all(diags.as_bytes())?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = take_flag(&mut args, &["--verbose", "-v"]);
    let to_stdout = take_flag(&mut args, &["--stdout"]);
    let no_unk = take_flag(&mut args, &["--no-unk"]);
    let outline = take_flag(&mut args, &["--outline"]);
    let list = take_flag(&mut args, &["--list"]);
    init_logging(verbose);

    if list {
        print_registry()?;
        return Ok(());
    }
    if args.is_empty() {
        eprintln!("usage: chunkdump [--stdout] [--no-unk] [--outline] [-v] FILE...");
        eprintln!("       chunkdump --list");
        std::process::exit(2);
    }

    let options = BatchOptions {
        write_unk: !no_unk,
        dump: DumpOptions {
            include_fields: !outline,
        },
    };

    let mut failed = false;
    for arg in &args {
        let path = Path::new(arg);
        if to_stdout {
            if let Err(e) = print_dump(path, options.dump) {
                eprintln!("{}", e);
                failed = true;
            }
            continue;
        }
        match dump_file(path, options) {
            Ok(report) => {
                let status = match &report.unk_path {
                    Some(unk) => format!("{} unrecognized, see {}", report.diagnostic_count, unk.display()),
                    None => "all chunks recognized".to_string(),
                };
                eprintln!("{} -> {} ({})", path.display(), report.txt_path.display(), status);
            }
            Err(e) => {
                eprintln!("{}", e);
                failed = true;
            }
        }
    }
    if failed {
        std::process::exit(1);
    }
    Ok(())
}
