//! Integration tests for scanner selection against real shell commands

use fzsl_core::{
    ErrorKind, ExecutionFailure, RunnerOptions, Scanner, ScannerRegistry, Selector, ShellRunner,
};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

fn runner() -> ShellRunner {
    ShellRunner::new(RunnerOptions::default().with_timeout(Some(Duration::from_secs(10))))
}

fn canonical(path: &Path) -> String {
    path.canonicalize().unwrap().to_string_lossy().into_owned()
}

#[test]
fn test_root_scanner_only_applies_under_its_root() {
    let temp = TempDir::new().unwrap();
    let proj = temp.path().join("proj");
    let other = temp.path().join("other");
    fs::create_dir_all(proj.join("src")).unwrap();
    fs::create_dir_all(&other).unwrap();

    let mut registry = ScannerRegistry::new();
    registry
        .register(
            "project",
            Scanner::builder("echo from-project")
                .root_path(canonical(&proj))
                .priority(1)
                .build()
                .unwrap(),
        )
        .unwrap();
    registry
        .register("fallback", Scanner::builder("echo from-fallback").build().unwrap())
        .unwrap();

    let runner = runner();
    let selector = Selector::new(&registry, &runner);

    assert_eq!(selector.select(&proj.join("src")).unwrap().name, "project");
    assert_eq!(selector.select(&other).unwrap().name, "fallback");

    let outcome = selector.scan(Some(&other)).unwrap();
    assert_eq!(outcome.scanner, "fallback");
    assert_eq!(outcome.candidates, vec!["from-fallback"]);
}

#[test]
fn test_scan_runs_from_root_path_not_target() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("root");
    let deep = root.join("a").join("b");
    fs::create_dir_all(&deep).unwrap();
    fs::write(root.join("top.txt"), "").unwrap();

    let scanner = Scanner::builder("ls")
        .root_path(canonical(&root))
        .build()
        .unwrap();

    let candidates = scanner.scan(Some(&deep), &runner()).unwrap();
    assert_eq!(candidates, vec!["a", "top.txt"]);
}

#[test]
fn test_scan_without_root_uses_target() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("one.rs"), "").unwrap();
    fs::write(temp.path().join("two.rs"), "").unwrap();

    let scanner = Scanner::builder("ls *.rs").build().unwrap();
    let candidates = scanner.scan(Some(temp.path()), &runner()).unwrap();
    assert_eq!(candidates, vec!["one.rs", "two.rs"]);
}

#[test]
fn test_output_is_split_on_any_whitespace() {
    let temp = TempDir::new().unwrap();
    let scanner = Scanner::builder("printf ' a\\tb\\n\\n  c \\n'").build().unwrap();

    let candidates = scanner.scan(Some(temp.path()), &runner()).unwrap();
    assert_eq!(candidates, vec!["a", "b", "c"]);
}

#[test]
fn test_failing_scan_command_is_an_execution_error() {
    let temp = TempDir::new().unwrap();
    let scanner = Scanner::builder("echo partial; exit 2").build().unwrap();

    let err = scanner.scan(Some(temp.path()), &runner()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Execution);
    match err {
        fzsl_core::Error::Execution { command, failure, .. } => {
            assert_eq!(command, "echo partial; exit 2");
            assert!(matches!(failure, ExecutionFailure::ExitStatus(Some(2))));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_detect_command_runs_in_target() {
    let temp = TempDir::new().unwrap();
    let marked = temp.path().join("marked");
    fs::create_dir_all(&marked).unwrap();
    fs::write(marked.join("Makefile"), "").unwrap();

    let scanner = Scanner::builder("echo make")
        .detect_cmd("test -f Makefile")
        .build()
        .unwrap();
    let runner = runner();

    assert!(scanner.is_suitable(&marked, &runner).unwrap());
    assert!(!scanner.is_suitable(temp.path(), &runner).unwrap());
}

#[test]
fn test_missing_detect_program_is_an_error() {
    let temp = TempDir::new().unwrap();
    let scanner = Scanner::builder("echo x")
        .detect_cmd("fzsl-no-such-program-1b7c")
        .build()
        .unwrap();

    let err = scanner.is_suitable(temp.path(), &runner()).unwrap_err();
    assert!(matches!(
        err,
        fzsl_core::Error::Execution {
            failure: ExecutionFailure::NotFound,
            ..
        }
    ));
}

#[test]
fn test_higher_priority_detection_wins() {
    let temp = TempDir::new().unwrap();
    let mut registry = ScannerRegistry::new();
    registry
        .register("low", Scanner::builder("echo low").priority(1).build().unwrap())
        .unwrap();
    registry
        .register(
            "high",
            Scanner::builder("echo high")
                .detect_cmd("true")
                .priority(5)
                .build()
                .unwrap(),
        )
        .unwrap();
    registry
        .register(
            "rejected",
            Scanner::builder("echo rejected")
                .detect_cmd("false")
                .priority(9)
                .build()
                .unwrap(),
        )
        .unwrap();

    let runner = runner();
    let selector = Selector::new(&registry, &runner);
    let outcome = selector.scan(Some(temp.path())).unwrap();
    assert_eq!(outcome.scanner, "high");
    assert_eq!(outcome.candidates, vec!["high"]);

    let names: Vec<&str> = selector
        .applicable(temp.path())
        .unwrap()
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["high", "low"]);
}
