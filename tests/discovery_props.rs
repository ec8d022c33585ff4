use assert_fs::TempDir;
use assert_fs::prelude::*;
use std::collections::BTreeSet;
use std::path::PathBuf;
use zfsl::discovery::{discover_in, matches_extension};
use zfsl::{Config, discover};

/// Build a small tree mixing matching and non-matching names at several depths.
fn build_tree(td: &TempDir, names: &[&str]) {
    for name in names {
        td.child(name).write_str(name).unwrap();
    }
}

#[test]
fn scenario_txt_vs_md() {
    let td = TempDir::new().unwrap();
    build_tree(&td, &["src/a.txt", "src/b.txt", "src/c.md"]);
    let cfg = Config::validate(td.path().join("src"), td.path().join("dst"), ".txt").unwrap();

    let found: BTreeSet<_> = discover(&cfg)
        .unwrap()
        .into_iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(found, BTreeSet::from(["a.txt".to_string(), "b.txt".to_string()]));
}

#[test]
fn result_is_exactly_the_suffix_matching_regular_files() {
    let names = [
        "r/one.rs",
        "r/two.RS",
        "r/sub/three.rs",
        "r/sub/three.rs.bak",
        "r/sub/deeper/four.rs",
        "r/notes.txt",
        "r/.rs",
        "r/sub/x.trs",
    ];
    let td = TempDir::new().unwrap();
    build_tree(&td, &names);
    td.child("r/dir.rs").create_dir_all().unwrap();

    for ext in [".rs", ".txt", ".bak", "s"] {
        let root = td.path().join("r");
        let got: BTreeSet<PathBuf> = discover_in(&root, ext).unwrap().into_iter().collect();
        let expected: BTreeSet<PathBuf> = names
            .iter()
            .map(|n| td.path().join(n))
            .filter(|p| matches_extension(p.file_name().unwrap(), ext))
            .collect();
        assert_eq!(got, expected, "extension {ext}");
    }
}

#[test]
fn discovery_is_idempotent_on_unchanged_tree() {
    let td = TempDir::new().unwrap();
    build_tree(&td, &["s/b.txt", "s/a.txt", "s/z/y.txt", "s/z/a.txt", "s/m.md"]);
    let first = discover_in(&td.path().join("s"), ".txt").unwrap();
    let second = discover_in(&td.path().join("s"), ".txt").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[cfg(unix)]
#[test]
fn unreadable_subdirectory_aborts_without_partial_results() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    // Root bypasses permission checks.
    unsafe {
        if libc::geteuid() == 0 {
            eprintln!("skipping: running as root");
            return;
        }
    }

    let td = TempDir::new().unwrap();
    build_tree(&td, &["s/a.txt", "s/locked/b.txt"]);
    let locked = td.path().join("s/locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let res = discover_in(&td.path().join("s"), ".txt");

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    let err = res.expect_err("scan should fail on unreadable directory");
    assert_eq!(err.code(), "access_denied");
}
