use std::fs;
use std::path::Path;

use avlplaylist::{ExtensionFilter, Group};
use avlutils::IdAllocator;

fn touch(path: &Path) {
    fs::write(path, b"").unwrap();
}

fn names(group: &Group) -> Vec<String> {
    group
        .resources()
        .iter()
        .map(|r| r.description().to_string())
        .collect()
}

#[test]
fn test_extension_filter_and_sort_order() {
    let ids = IdAllocator::new();
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("c.MP3"));
    touch(&dir.path().join("a.mp3"));
    touch(&dir.path().join("b.txt"));

    let filter = ExtensionFilter::from_list(&["mp3"]);
    let group = Group::from_directory(dir.path(), false, &filter, &ids);
    // Case-insensitive suffix match, sorted by name.
    assert_eq!(names(&group), vec!["a.mp3", "c.MP3"]);

    let all = Group::from_directory(dir.path(), false, &ExtensionFilter::AcceptAll, &ids);
    assert_eq!(all.len(), 3);
}

#[test]
fn test_non_recursive_ignores_subdirs() {
    let ids = IdAllocator::new();
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("top.mp3"));
    fs::create_dir(dir.path().join("sub")).unwrap();
    touch(&dir.path().join("sub").join("nested.mp3"));

    let group = Group::from_directory(dir.path(), false, &ExtensionFilter::AcceptAll, &ids);
    assert_eq!(names(&group), vec!["top.mp3"]);
}

#[test]
fn test_recursive_walk_is_deterministic() {
    let ids = IdAllocator::new();
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("z.mp3"));
    touch(&dir.path().join("a.mp3"));
    for sub in ["beta", "alpha"] {
        fs::create_dir(dir.path().join(sub)).unwrap();
        touch(&dir.path().join(sub).join("track.mp3"));
    }

    let group = Group::from_directory(dir.path(), true, &ExtensionFilter::AcceptAll, &ids);
    // Current directory's files first (sorted), then subdirectories in
    // sorted order.
    let full: Vec<String> = group
        .resources()
        .iter()
        .map(|r| r.resource_name().unwrap().to_string())
        .collect();
    assert_eq!(full.len(), 4);
    assert!(full[0].ends_with("a.mp3"));
    assert!(full[1].ends_with("z.mp3"));
    assert!(full[2].contains("alpha"));
    assert!(full[3].contains("beta"));
}

#[test]
fn test_empty_scan_yields_placeholder() {
    let ids = IdAllocator::new();
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("notes.txt"));

    let filter = ExtensionFilter::from_list(&["mp3"]);
    let group = Group::from_directory(dir.path(), false, &filter, &ids);
    assert_eq!(group.len(), 1);
    let placeholder = &group.resources()[0];
    assert!(!placeholder.is_playable());
    assert!(placeholder.error().unwrap().contains("no suitable"));
}

#[test]
fn test_unreadable_dir_yields_placeholder() {
    let ids = IdAllocator::new();
    let group = Group::from_directory(
        Path::new("/no/such/directory"),
        false,
        &ExtensionFilter::AcceptAll,
        &ids,
    );
    assert_eq!(group.len(), 1);
    assert!(group.resources()[0].error().is_some());
}
