mod common;

use common::write;
use igniter_migrate::processors::{ConfigProcessor, ConfigShape, NodeProcessor};
use igniter_migrate::PhpFileParser;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture() -> (TempDir, Vec<PathBuf>) {
    let dir = TempDir::new().unwrap();
    let mut paths = Vec::new();
    for i in 0..12 {
        let content = if i % 4 == 3 {
            format!("<?php $config['broken_{i}' = ;")
        } else {
            format!("<?php $config['key_{i}'] = {i};")
        };
        paths.push(write(dir.path(), &format!("config_{i:02}.php"), &content));
    }
    paths.push(dir.path().join("missing.php"));
    (dir, paths)
}

fn processor() -> ConfigProcessor {
    ConfigProcessor::new(ConfigShape::ArrayAssignment { variable: "config" })
}

#[test]
fn test_every_path_lands_in_exactly_one_map() {
    let (_dir, paths) = fixture();
    for parallel in [true, false] {
        let batch = PhpFileParser::new().with_parallel(parallel).parse_files_with_mapping(
            &paths,
            processor,
            |p, _| p.results(),
        );
        assert_eq!(batch.len(), paths.len());
        assert_eq!(batch.success.len(), 9);
        assert_eq!(batch.errors.len(), 4);
        for path in &paths {
            assert!(batch.success.contains_key(path) ^ batch.errors.contains_key(path));
        }
        assert!(batch.errors[paths.last().unwrap()].contains("missing.php"));
    }
}

#[test]
fn test_parallel_and_sequential_agree_on_order() {
    let (_dir, paths) = fixture();
    let run = |parallel: bool| {
        PhpFileParser::new()
            .with_parallel(parallel)
            .parse_files_with_mapping(&paths, processor, |p, path| {
                (path.to_path_buf(), p.results().len())
            })
    };
    let parallel = run(true);
    let sequential = run(false);

    let order = |batch: &igniter_migrate::BatchResult<(PathBuf, usize)>| {
        batch.success.keys().cloned().collect::<Vec<_>>()
    };
    assert_eq!(order(&parallel), order(&sequential));
    let expected: Vec<_> = paths
        .iter()
        .filter(|p| sequential.success.contains_key(*p))
        .cloned()
        .collect();
    assert_eq!(order(&parallel), expected);
    assert!(parallel.success.values().all(|(_, count)| *count == 1));
}

#[test]
fn test_empty_input() {
    let batch = PhpFileParser::new().parse_files(&[], processor);
    assert!(batch.is_empty());
}
