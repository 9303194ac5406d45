use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const IDENTITY: [(&str, &str); 4] = [
    ("GIT_AUTHOR_NAME", "Test"),
    ("GIT_AUTHOR_EMAIL", "test@example.com"),
    ("GIT_COMMITTER_NAME", "Test"),
    ("GIT_COMMITTER_EMAIL", "test@example.com"),
];

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .envs(IDENTITY)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Build a small skeleton repository with placeholders in names and contents.
fn make_skeleton(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    write(
        dir,
        "myproject/src/myproject_handler.go",
        "package myproject\n\n// myproject handles orders for myproject\n",
    );
    write(dir, "myproject/myproject-sub/file.txt", "myproject");
    write(dir, "old-myproject-name/keep.txt", "unchanged");
    write(dir, "run.sh", "#!/bin/sh\necho myproject\n");
    fs::set_permissions(dir.join("run.sh"), fs::Permissions::from_mode(0o755)).unwrap();
    write(dir, "welcome.txt", "Welcome to myproject!\n");

    git(dir, &["init", "--quiet"]);
    git(dir, &["add", "--all"]);
    git(dir, &["commit", "--quiet", "-m", "skeleton"]);
}

fn stream_utils() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_stream-utils"));
    cmd.envs(IDENTITY);
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stream-utils");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"));
}

#[test]
fn test_create_help() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stream-utils");
    cmd.args(["create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name of the new project"));
}

#[test]
fn test_create_requires_name() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stream-utils");
    cmd.arg("create").assert().failure();
}

#[test]
fn test_create_rejects_invalid_name() {
    let dir = tempdir().unwrap();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stream-utils");
    cmd.args(["create", "../escape"])
        .current_dir(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid project name"));
}

#[test]
fn test_create_rejects_existing_directory() {
    let dir = tempdir().unwrap();
    write(dir.path(), "orders/existing.txt", "keep me");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stream-utils");
    cmd.args(["create", "orders"])
        .current_dir(dir.path())
        .env("STREAM_UTILS_SKELETON", dir.path().join("unused"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not empty"));

    assert_eq!(
        fs::read_to_string(dir.path().join("orders/existing.txt")).unwrap(),
        "keep me"
    );
}

#[test]
fn test_completion_bash() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("stream-utils");
    cmd.args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stream-utils"));
}

#[test]
fn test_create_end_to_end() {
    if !has_git() {
        eprintln!("Skipping test_create_end_to_end: git not found");
        return;
    }
    let dir = tempdir().unwrap();
    let skeleton = dir.path().join("skeleton");
    make_skeleton(&skeleton);
    let work = dir.path().join("work");
    fs::create_dir(&work).unwrap();

    let output = stream_utils()
        .args(["create", "orders"])
        .current_dir(&work)
        .env("STREAM_UTILS_SKELETON", &skeleton)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "create failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Welcome to orders!"), "{}", stdout);

    let root = work.join("orders");
    let handler = fs::read_to_string(root.join("orders/src/orders_handler.go")).unwrap();
    assert_eq!(
        handler,
        "package orders\n\n// orders handles orders for orders\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("orders/orders-sub/file.txt")).unwrap(),
        "orders"
    );
    assert!(root.join("old-myproject-name/keep.txt").exists());
    assert!(!root.join("myproject").exists());

    let mode = fs::metadata(root.join("run.sh")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);

    // Exactly one commit, with the skeleton's history gone.
    assert_eq!(git(&root, &["rev-list", "--count", "HEAD"]), "1");
    assert_eq!(
        git(&root, &["log", "-1", "--format=%s"]),
        "Project initialized with stream-utils"
    );
    assert_eq!(git(&root, &["status", "--porcelain"]), "");
}

#[test]
fn test_create_alias_without_welcome_file() {
    if !has_git() {
        eprintln!("Skipping test_create_alias_without_welcome_file: git not found");
        return;
    }
    let dir = tempdir().unwrap();
    let skeleton = dir.path().join("skeleton");
    fs::create_dir_all(&skeleton).unwrap();
    write(&skeleton, "README.md", "# myproject\n");
    git(&skeleton, &["init", "--quiet"]);
    git(&skeleton, &["add", "--all"]);
    git(&skeleton, &["commit", "--quiet", "-m", "skeleton"]);

    let output = stream_utils()
        .args(["c", "payments"])
        .current_dir(dir.path())
        .env("STREAM_UTILS_SKELETON", &skeleton)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "create failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cd payments"), "{}", stdout);
    assert_eq!(
        fs::read_to_string(dir.path().join("payments/README.md")).unwrap(),
        "# payments\n"
    );
}

#[test]
fn test_create_with_unreachable_skeleton() {
    if !has_git() {
        eprintln!("Skipping test_create_with_unreachable_skeleton: git not found");
        return;
    }
    let dir = tempdir().unwrap();

    let output = stream_utils()
        .args(["create", "orders"])
        .current_dir(dir.path())
        .env("STREAM_UTILS_SKELETON", dir.path().join("missing-skeleton"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to clone"));
    assert!(!dir.path().join("orders").exists());
}

#[test]
fn test_create_reports_commit_failure_and_keeps_directory() {
    if !has_git() {
        eprintln!("Skipping test_create_reports_commit_failure_and_keeps_directory: git not found");
        return;
    }
    let dir = tempdir().unwrap();
    // An empty skeleton clones fine but leaves nothing to commit.
    let skeleton = dir.path().join("empty-skeleton");
    fs::create_dir_all(&skeleton).unwrap();
    git(&skeleton, &["init", "--quiet"]);

    let output = stream_utils()
        .args(["create", "orders"])
        .current_dir(dir.path())
        .env("STREAM_UTILS_SKELETON", &skeleton)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to create the initial commit"), "{}", stderr);
    assert!(stderr.contains("user.name and user.email"), "{}", stderr);
    assert!(dir.path().join("orders").is_dir());
}
