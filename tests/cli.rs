use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Builds `src/` with two mergeable files, one wrong-extension file, and a
/// file inside the default-ignored `build/` folder.
fn setup_source_tree() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(src.join("build")).unwrap();
    fs::write(src.join("a.cpp"), "int a;\n").unwrap();
    fs::write(src.join("b.h"), "int b;\n").unwrap();
    fs::write(src.join("b.o"), "object code").unwrap();
    fs::write(src.join("build").join("c.cpp"), "int c;\n").unwrap();
    dir
}

fn filemerger(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("filemerger").unwrap();
    // Keep the log filter under the test's control, and point HOME at the
    // test's own directory so a presets file on the developer's machine
    // never leaks into these runs.
    cmd.env_remove("RUST_LOG");
    cmd.env("HOME", home);
    cmd
}

fn write_presets(home: &Path, contents: &str) {
    let config_dir = home.join(".config").join("filemerger");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("presets.toml"), contents).unwrap();
}

#[test]
fn merges_into_default_output_file() {
    let dir = setup_source_tree();

    filemerger(dir.path())
        .current_dir(dir.path())
        .arg("src")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Successfully merged contents into merged_contents.txt",
        ))
        .stdout(predicate::str::contains("Processed 2 files:"))
        .stdout(predicate::str::contains("- src/a.cpp"))
        .stdout(predicate::str::contains("- src/b.h"));

    let merged = fs::read_to_string(dir.path().join("merged_contents.txt")).unwrap();
    assert_eq!(
        merged,
        "\n\n--- src/a.cpp ---\n\nint a;\n\n\n--- src/b.h ---\n\nint b;\n"
    );
}

#[test]
fn output_flag_redirects_the_merge_file() {
    let dir = setup_source_tree();

    filemerger(dir.path())
        .current_dir(dir.path())
        .args(["src", "-o", "custom.txt"])
        .assert()
        .success();

    assert!(dir.path().join("custom.txt").exists());
    assert!(!dir.path().join("merged_contents.txt").exists());
}

#[test]
fn extensions_flag_overrides_the_defaults() {
    let dir = setup_source_tree();

    filemerger(dir.path())
        .current_dir(dir.path())
        .args(["src", "-e", "h"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 1 files:"));

    let merged = fs::read_to_string(dir.path().join("merged_contents.txt")).unwrap();
    assert!(merged.contains("--- src/b.h ---"));
    assert!(!merged.contains("a.cpp"));
}

#[test]
fn ignore_folders_flag_replaces_the_default_list() {
    let dir = setup_source_tree();

    // `build` is ignored by default; naming an unrelated folder drops that
    // default, so build/c.cpp now gets merged.
    filemerger(dir.path())
        .current_dir(dir.path())
        .args(["src", "-I", "vendor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 3 files:"));

    let merged = fs::read_to_string(dir.path().join("merged_contents.txt")).unwrap();
    assert!(merged.contains("--- src/build/c.cpp ---"));
}

#[test]
fn ignore_files_flag_excludes_by_exact_path() {
    let dir = setup_source_tree();

    filemerger(dir.path())
        .current_dir(dir.path())
        .args(["src", "-i", "src/a.cpp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 1 files:"))
        .stdout(predicate::str::contains("- src/b.h"));
}

#[test]
fn merge_files_flag_bypasses_extension_filtering() {
    let dir = setup_source_tree();
    fs::write(dir.path().join("src").join("notes.md"), "# notes\n").unwrap();

    filemerger(dir.path())
        .current_dir(dir.path())
        .args(["src", "--merge-files", "src/notes.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 1 files:"))
        .stdout(predicate::str::contains("- src/notes.md"));
}

#[test]
fn glob_root_merges_matching_files() {
    let dir = setup_source_tree();

    filemerger(dir.path())
        .current_dir(dir.path())
        .arg("src/*.cpp")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 1 files:"))
        .stdout(predicate::str::contains("- src/a.cpp"));
}

#[test]
fn no_resolved_roots_is_a_failure() {
    let dir = tempdir().unwrap();

    filemerger(dir.path())
        .current_dir(dir.path())
        .arg("no_such_path")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "no input paths resolved to any files or directories",
        ));
}

#[test]
fn missing_paths_argument_is_a_usage_error() {
    let dir = tempdir().unwrap();
    filemerger(dir.path()).assert().failure();
}

#[test]
fn preset_supplies_output_and_extensions() {
    let dir = setup_source_tree();
    write_presets(
        dir.path(),
        "[review]\nextensions = [\".h\"]\noutput = \"preset_out.txt\"\n",
    );

    filemerger(dir.path())
        .current_dir(dir.path())
        .args(["src", "--preset", "review"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Successfully merged contents into preset_out.txt",
        ))
        .stdout(predicate::str::contains("Processed 1 files:"));

    let merged = fs::read_to_string(dir.path().join("preset_out.txt")).unwrap();
    assert!(merged.contains("--- src/b.h ---"));
    assert!(!merged.contains("a.cpp"));
    assert!(!dir.path().join("merged_contents.txt").exists());
}

#[test]
fn cli_flag_overrides_preset_field_wise() {
    let dir = setup_source_tree();
    write_presets(
        dir.path(),
        "[review]\nextensions = [\".h\"]\noutput = \"preset_out.txt\"\n",
    );

    // -e beats the preset's extensions; the preset's output still applies.
    filemerger(dir.path())
        .current_dir(dir.path())
        .args(["src", "--preset", "review", "-e", "cpp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 1 files:"));

    let merged = fs::read_to_string(dir.path().join("preset_out.txt")).unwrap();
    assert!(merged.contains("--- src/a.cpp ---"));
    assert!(!merged.contains("b.h"));
}

#[test]
fn preset_named_after_current_folder_applies_automatically() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("myproj");
    let src = project.join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("a.cpp"), "int a;\n").unwrap();
    fs::write(src.join("b.h"), "int b;\n").unwrap();
    write_presets(dir.path(), "[myproj]\nextensions = [\".h\"]\n");

    filemerger(dir.path())
        .current_dir(&project)
        .arg("src")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 1 files:"))
        .stdout(predicate::str::contains("- src/b.h"));
}

#[test]
fn missing_presets_file_is_not_an_error() {
    let dir = setup_source_tree();

    // HOME points at the tempdir, which has no .config/filemerger at all.
    filemerger(dir.path())
        .current_dir(dir.path())
        .args(["src", "--preset", "review"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 2 files:"));
}

#[test]
fn verbose_flag_emits_debug_diagnostics_on_stderr() {
    let dir = setup_source_tree();

    filemerger(dir.path())
        .current_dir(dir.path())
        .args(["src", "-v"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Processing path: src"));

    // Diagnostics never leak into the merge file itself.
    let merged = fs::read_to_string(dir.path().join("merged_contents.txt")).unwrap();
    assert!(!merged.contains("Processing path"));
}

#[test]
fn reruns_are_idempotent_across_output_files() {
    let dir = setup_source_tree();

    filemerger(dir.path())
        .current_dir(dir.path())
        .args(["src", "-o", "first.txt"])
        .assert()
        .success();
    filemerger(dir.path())
        .current_dir(dir.path())
        .args(["src", "-o", "second.txt"])
        .assert()
        .success();

    let first = fs::read(dir.path().join("first.txt")).unwrap();
    let second = fs::read(dir.path().join("second.txt")).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn unreadable_sink_location_is_fatal() {
    let dir = setup_source_tree();

    filemerger(dir.path())
        .current_dir(dir.path())
        .args(["src", "-o", "missing_dir/out.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to create output file"));
}
