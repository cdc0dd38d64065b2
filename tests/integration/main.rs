//! Integration tests for incgraph
//!
//! These run the built binary against configuration files in temporary
//! directories.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn incgraph(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_incgraph"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute incgraph")
}

fn write(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, content).unwrap();
}

/// A small C++ tree and a configuration pointing at it with a renderer
/// that does not exist.
fn fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(root, "sources/main.cpp", "#include \"engine.h\"\n#include <vector>\n\nint main() {}\n");
    write(root, "sources/engine.cpp", "#include \"engine.h\"\n");
    write(root, "sources/engine.h", "#pragma once\n#include <glm/vec3.hpp>\n");
    write(root, "dependencies/glm/vec3.hpp", "#pragma once\n");
    write(
        root,
        "incgraph.toml",
        r#"[settings]
renderer = "incgraph-test-missing-renderer"

[[project]]
name = "demo"
source_directories = ["sources"]
include_directories = ["dependencies"]
output_folder = "results"
"#,
    );
    temp
}

#[test]
fn test_cli_help() {
    let temp = TempDir::new().unwrap();
    let output = incgraph(&["--help"], temp.path());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("incgraph"));
    assert!(stdout.contains("--no-image"));
}

#[test]
fn test_missing_argument_exits_1() {
    let temp = TempDir::new().unwrap();
    let output = incgraph(&[], temp.path());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unreadable_configuration_exits_2() {
    let temp = TempDir::new().unwrap();
    let output = incgraph(&["does-not-exist.toml"], temp.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_configuration_exits_2() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "bad.toml", "[[project]\nname = ");
    let output = incgraph(&["bad.toml"], temp.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_configuration_without_projects_exits_2() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "empty.toml", "[settings]\nimage_format = \"svg\"\n");
    let output = incgraph(&["empty.toml"], temp.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_full_run_writes_dot_and_report() {
    let temp = fixture();
    let output = incgraph(&["incgraph.toml"], temp.path());
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Project: demo"));
    assert!(stdout.contains("Source files: 2 - Lines of code: 5"));
    assert!(stdout.contains("Header files: 3 - Not found: 1"));
    assert!(stdout.contains("Dot file generated in:"));
    // the renderer is missing, so no image timing
    assert!(!stdout.contains("Image generated in:"));

    let dot = fs::read_to_string(temp.path().join("results/demo.dot")).unwrap();
    assert!(dot.starts_with("digraph {\n\trankdir = LR\n"));
    assert!(dot.contains("label=\"sources/engine.cpp (1 loc)\""));
    assert!(dot.contains("label=\"2x\\nsources/engine.h (2 loc)\""));
    assert!(dot.contains("label=\"1x\\ndependencies/glm/vec3.hpp (1 loc)\""));
    assert!(dot.contains("label=\"1x\\nvector\" shape=box, style=filled, color=red"));
    assert!(!temp.path().join("results/demo.png").exists());
}

#[test]
fn test_configuration_from_another_directory() {
    let temp = fixture();
    let elsewhere = TempDir::new().unwrap();
    let config = temp.path().join("incgraph.toml");

    let output = incgraph(&["--no-image", "-j", "1", config.to_str().unwrap()], elsewhere.path());
    assert_eq!(output.status.code(), Some(0));
    assert!(temp.path().join("results/demo.dot").exists());
}

#[test]
fn test_missing_source_directory_is_not_fatal() {
    let temp = fixture();
    write(
        temp.path(),
        "two.toml",
        r#"[[project]]
name = "broken"
source_directories = ["nowhere"]
output_folder = "results"

[[project]]
name = "demo"
source_directories = ["sources"]
include_directories = ["dependencies"]
output_folder = "results"
"#,
    );

    let output = incgraph(&["--no-image", "two.toml"], temp.path());
    assert_eq!(output.status.code(), Some(0));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unable to find the source directory"));
    assert!(!temp.path().join("results/broken.dot").exists());
    assert!(temp.path().join("results/demo.dot").exists());
}
