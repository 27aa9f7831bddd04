mod common;

use common::{ci2_fingerprint, ci3_fingerprint, ci4_fingerprint, write};
use igniter_migrate::core::ProjectContext;
use igniter_migrate::{detect_generation, Generation};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_each_fingerprint_maps_to_its_generation() {
    let cases: [(fn(&std::path::Path), Generation); 3] = [
        (ci2_fingerprint, Generation::Ci2),
        (ci3_fingerprint, Generation::Ci3),
        (ci4_fingerprint, Generation::Ci4),
    ];
    for (fingerprint, expected) in cases {
        let dir = TempDir::new().unwrap();
        fingerprint(dir.path());
        assert_eq!(detect_generation(dir.path()), expected);
    }
}

#[test]
fn test_directory_without_fingerprint_is_unknown() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "application/controllers/Welcome.php", "<?php");
    write(dir.path(), "index.php", "<?php");
    assert_eq!(detect_generation(dir.path()), Generation::Unknown);
}

#[test]
fn test_core_without_compat_or_marker_is_unknown() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("system/core")).unwrap();
    write(dir.path(), "system/bootstrap.php", "<?php");
    assert_eq!(detect_generation(dir.path()), Generation::Unknown);
}

#[test]
fn test_compat_directory_outranks_version_marker() {
    let dir = TempDir::new().unwrap();
    ci3_fingerprint(dir.path());
    write(
        dir.path(),
        "system/core/CodeIgniter.php",
        "<?php // CI_VERSION is defined below\nconst CI_VERSION = '3.1.0';",
    );
    assert_eq!(detect_generation(dir.path()), Generation::Ci3);
}

#[test]
fn test_context_caches_known_generation() {
    let dir = TempDir::new().unwrap();
    ci4_fingerprint(dir.path());
    let ctx = ProjectContext::new(dir.path(), dir.path().join("out"), "app");
    assert_eq!(ctx.generation(), Generation::Ci4);

    // the cached value survives the fingerprint disappearing
    fs::remove_file(dir.path().join("system/bootstrap.php")).unwrap();
    assert_eq!(ctx.generation(), Generation::Ci4);
}

#[test]
fn test_context_does_not_cache_unknown() {
    let dir = TempDir::new().unwrap();
    let ctx = ProjectContext::new(dir.path(), dir.path().join("out"), "app");
    assert_eq!(ctx.generation(), Generation::Unknown);

    ci3_fingerprint(dir.path());
    assert_eq!(ctx.generation(), Generation::Ci3);
}
