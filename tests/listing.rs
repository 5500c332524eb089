//! Integration tests for directory-style browsing of archives.

use zipedit::{ArchiveReader, DirectoryView, ZipEditor};

mod common;

use common::{base_archive, temp_archive, write_raw_archive};

fn listed(editor: &ZipEditor, prefix: &str) -> Vec<(String, bool)> {
    editor
        .list(prefix)
        .into_iter()
        .map(|e| (e.name, e.is_synthesized))
        .collect()
}

#[test]
fn test_list_root_and_subdirectories() {
    let (_dir, path) = temp_archive();
    let mut editor = ZipEditor::new(&path);
    editor
        .add_bytes("test1.txt", "1")
        .mkdir("foo")
        .add_bytes("foo/test2.txt", "2")
        .mkdir("bar")
        .add_bytes("bat/one/test1.txt", "3")
        .add_bytes("bat/two/test1.txt", "4");
    let _ = editor.commit().unwrap();

    let root: Vec<_> = editor.list("").into_iter().map(|e| e.name).collect();
    assert_eq!(root, ["bar/", "bat/", "foo/", "test1.txt"]);

    let bat: Vec<_> = editor.list("bat").into_iter().map(|e| e.name).collect();
    assert_eq!(bat, ["bat/one/", "bat/two/"]);

    let foo: Vec<_> = editor.list("foo/").into_iter().map(|e| e.name).collect();
    assert_eq!(foo, ["foo/test2.txt"]);
}

#[test]
fn test_list_synthesizes_missing_markers_once() {
    let (_dir, path) = temp_archive();
    write_raw_archive(&path, &[("a/b/c.txt", b"c"), ("a/b/d.txt", b"d")]);
    let editor = ZipEditor::new(&path);

    assert_eq!(listed(&editor, ""), [("a/".to_string(), true)]);
    assert_eq!(listed(&editor, "a"), [("a/b/".to_string(), true)]);
    assert_eq!(
        listed(&editor, "a/b"),
        [("a/b/c.txt".to_string(), false), ("a/b/d.txt".to_string(), false)]
    );
}

#[test]
fn test_synthesized_directory_takes_descendant_timestamp() {
    let (_dir, path) = temp_archive();
    write_raw_archive(&path, &[("a/b/c.txt", b"c")]);
    let editor = ZipEditor::new(&path);

    let child = editor.lookup("a/b/c.txt").unwrap();
    let dir = editor.lookup("a").unwrap();
    assert!(dir.is_directory && dir.is_synthesized);
    assert_eq!(dir.name, "a/");
    assert_eq!(dir.modified, child.modified);
    assert_eq!(dir.size, 0);
}

#[test]
fn test_lookup_real_entries() {
    let (_dir, path) = base_archive();
    let editor = ZipEditor::new(&path);

    let file = editor.lookup("foo/test2.txt").unwrap();
    assert!(!file.is_directory);
    assert_eq!(file.size, common::HELLO.len() as u64);

    let dir = editor.lookup("foo").unwrap();
    assert_eq!(dir.name, "foo/");
    assert!(!dir.is_synthesized);

    assert!(editor.lookup("fo").is_none());
    assert!(editor.lookup("").is_none());
}

#[test]
fn test_missing_archive_lists_empty() {
    let (_dir, path) = temp_archive();
    let editor = ZipEditor::new(&path);
    assert!(editor.entries().is_empty());
    assert!(editor.entry_set().is_empty());
    assert!(editor.list("").is_empty());
    assert!(editor.lookup("anything").is_none());
}

#[test]
fn test_view_over_reader_entries() {
    let bytes = common::raw_archive_bytes(&[("docs/", b""), ("docs/a.txt", b"a"), ("x.txt", b"x")]);
    let reader = ArchiveReader::from_reader(std::io::Cursor::new(bytes));
    let view = DirectoryView::new(reader.entries());

    let names: Vec<_> = view.list("").into_iter().map(|e| e.name).collect();
    assert_eq!(names, ["docs/", "x.txt"]);
    assert!(reader.entry_set().contains("docs/a.txt"));
}
