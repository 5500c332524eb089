//! Shared test utilities for integration tests.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zipedit::ZipEditor;

/// Content used for file entries throughout the tests.
pub const HELLO: &str = "hello, world!\n";

/// Creates an empty temp directory and the path of a (not yet existing)
/// archive inside it.
pub fn temp_archive() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("test.zip");
    (dir, path)
}

/// Builds the reference archive through the editor:
/// `bar/`, `foo/`, `foo/test2.txt`, `test1.txt`.
pub fn base_archive() -> (TempDir, PathBuf) {
    let (dir, path) = temp_archive();
    let mut editor = ZipEditor::new(&path);
    editor
        .add_bytes("test1.txt", HELLO)
        .mkdir("foo")
        .mkdir("bar/")
        .add_bytes("foo/test2.txt", HELLO);
    let result = editor.commit().expect("Failed to build base archive");
    assert_eq!(result.added, 4);
    (dir, path)
}

/// Writes a zip archive with entries in exactly the given order, using the
/// zip crate directly (no sorting).
///
/// Names ending in `/` become directory markers.
pub fn write_raw_archive(path: &Path, entries: &[(&str, &[u8])]) {
    let bytes = raw_archive_bytes(entries);
    std::fs::write(path, bytes).expect("Failed to write archive");
}

/// Same as [`write_raw_archive`] but returns the archive bytes.
pub fn raw_archive_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(*name, options)
                .expect("Failed to add directory");
        } else {
            writer.start_file(*name, options).expect("Failed to start file");
            writer.write_all(data).expect("Failed to write entry");
        }
    }
    writer.finish().expect("Failed to finish archive").into_inner()
}

/// Overwrites the local header signature of entry `name` so the entry can
/// no longer be opened, leaving the central directory intact.
pub fn damage_local_header(path: &Path, name: &str) {
    let mut bytes = std::fs::read(path).expect("Failed to read archive");
    let pos = bytes
        .windows(name.len())
        .position(|w| w == name.as_bytes())
        .expect("Entry name not found");
    let header = pos - 30;
    assert_eq!(&bytes[header..header + 4], b"PK\x03\x04");
    bytes[header..header + 4].copy_from_slice(&[0; 4]);
    std::fs::write(path, bytes).expect("Failed to write archive");
}

/// Returns the entry names of the archive at `path`, in archive order.
pub fn names(path: &Path) -> Vec<String> {
    ZipEditor::new(path)
        .entries()
        .into_iter()
        .map(|e| e.name)
        .collect()
}

/// Reads the content of one entry as a string.
pub fn read_entry(path: &Path, name: &str) -> String {
    let mut content = Vec::new();
    ZipEditor::new(path)
        .copy_entry(name, &mut content)
        .expect("Failed to read entry");
    String::from_utf8(content).expect("Entry is not UTF-8")
}

/// Lists the file names in `dir`, sorted.
pub fn dir_listing(dir: &Path) -> Vec<String> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|e| e.expect("Bad dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    files
}
