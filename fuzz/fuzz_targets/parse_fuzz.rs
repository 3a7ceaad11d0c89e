//! Parse fuzz target: feed arbitrary bytes to the chunk dispatcher and exporters.
//! Neither may panic, whatever the declared lengths say.
//! Build with: cargo fuzz run parse_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let result = chunkdump::parse(data);
    let _ = chunkdump::export_text(&result.root);
    let _ = chunkdump::export_diagnostics(&result.diagnostics);
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run parse_fuzz");
}
