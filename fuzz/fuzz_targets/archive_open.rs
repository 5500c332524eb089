//! Fuzz target for ArchiveReader::from_reader with arbitrary byte input.
//!
//! This target exercises zip parsing and the directory view with malformed
//! or adversarial input. Opening must never panic: anything unreadable is
//! an empty archive.
//!
//! Run with: cargo +nightly fuzz run archive_open

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use zipedit::{ArchiveReader, DirectoryView};

fuzz_target!(|data: &[u8]| {
    let mut reader = ArchiveReader::from_reader(Cursor::new(data));
    if !reader.is_present() {
        assert!(reader.entries().is_empty());
        return;
    }

    let entries = reader.entries().to_vec();
    let view = DirectoryView::new(&entries);
    let root = view.list("");
    for child in &root {
        // Every listed child must be found again by lookup
        assert!(view.lookup(child.name.trim_end_matches('/')).is_some());
        let _ = view.list(&child.name);
    }

    // Stream a few entry bodies; read errors are fine, panics are not
    for entry in entries.iter().filter(|e| !e.is_directory).take(4) {
        let _ = reader.copy_entry(&entry.name, &mut std::io::sink());
    }
});
