use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_lit2md(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lit2md"))
        .current_dir(cwd)
        .args(args)
        .output()
        .expect("Failed to execute lit2md")
}

#[test]
fn test_cli_converts_and_reports_progress() {
    let work = TempDir::new().expect("Failed to create temp dir");
    let src = work.path().join("src");
    fs::create_dir_all(src.join("ch1")).unwrap();
    fs::write(src.join("ch1").join("intro.js"), "/*\nHi.\n*/\nconsole.log(1);\n").unwrap();
    fs::write(src.join("ch1").join("notes.txt"), "skip me").unwrap();

    let output = run_lit2md(work.path(), &["-i", "src", "-o", "out"]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = format!(
        "{} -> {}",
        Path::new("src").join("ch1").join("intro.js").display(),
        Path::new("out").join("ch1").join("intro.md").display()
    );
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec![expected.as_str()]);

    let md = fs::read_to_string(work.path().join("out").join("ch1").join("intro.md")).unwrap();
    assert!(md.starts_with("Hi."));
    assert!(md.contains("```javascript"));
    assert!(!work.path().join("out").join("ch1").join("notes.md").exists());
}

#[test]
fn test_cli_uses_config_file() {
    let work = TempDir::new().unwrap();
    fs::write(
        work.path().join("lit2md.yml"),
        "defaults: false\nlanguages:\n  foo:\n    open: '/*'\n    close: '*/'\n    lang: c\n",
    )
    .unwrap();
    fs::create_dir_all(work.path().join("src")).unwrap();
    fs::write(work.path().join("src").join("a.foo"), "int x = 1;").unwrap();
    fs::write(work.path().join("src").join("b.js"), "x();").unwrap();

    let output = run_lit2md(work.path(), &["--input", "src", "--output", "out"]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert_eq!(
        fs::read_to_string(work.path().join("out").join("a.md")).unwrap(),
        "```c\nint x = 1;\n```\n".replace('\n', if cfg!(windows) { "\r\n" } else { "\n" })
    );
    assert!(!work.path().join("out").join("b.md").exists());
}

#[test]
fn test_cli_fails_on_missing_input() {
    let work = TempDir::new().unwrap();
    let output = run_lit2md(work.path(), &["-i", "missing", "-o", "out"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: path not found"), "{}", stderr);
}

#[test]
fn test_cli_fails_on_bad_config() {
    let work = TempDir::new().unwrap();
    fs::write(
        work.path().join("lit2md.yml"),
        "languages:\n  foo:\n    open: ''\n    close: '*/'\n",
    )
    .unwrap();
    fs::create_dir_all(work.path().join("src")).unwrap();

    let output = run_lit2md(work.path(), &["-i", "src", "-o", "out"]);

    assert!(!output.status.success());
    assert!(!work.path().join("out").exists());
}

#[test]
fn test_cli_requires_both_paths() {
    let work = TempDir::new().unwrap();
    let output = run_lit2md(work.path(), &["-i", "src"]);
    assert!(!output.status.success());
}
