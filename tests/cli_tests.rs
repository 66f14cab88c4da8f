use std::{
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

// Helper to get absolute path from manifest dir
fn manifest_path(rel: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir).join(rel)
}

fn quill() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_quill"));

    command.env_remove("QUILL_STACK_CAPACITY").env_remove("RUST_LOG");
    command
}

// Run the binary with the given arguments, feeding it the given standard input.
fn run_with_input(args: &[&str], input: &str) -> Output {
    let mut child = quill()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run interpreter");

    child
        .stdin
        .take()
        .expect("Standard input should be piped")
        .write_all(input.as_bytes())
        .expect("Failed to write the script");

    child.wait_with_output().expect("Failed to wait on interpreter")
}

fn run_script(script: &str, extra_args: &[&str]) -> Output {
    quill()
        .args(extra_args)
        .arg(manifest_path(script))
        .output()
        .expect("Failed to run interpreter")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn hello_script() {
    let output = run_script("tests/scripts/hello.ql", &[]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "Hello, world!\nagain\nagain\n");
}

#[test]
fn recursive_countdown_script() {
    let output = run_script("tests/scripts/countdown.ql", &[]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "5\n4\n3\n2\n1\n0\ndone\n");
}

#[test]
fn broken_script_fails_with_location() {
    let output = run_script("tests/scripts/broken.ql", &[]);
    let stderr = stderr_of(&output);

    assert!(!output.status.success());
    assert!(stderr.contains("Unknown word frobnicate."), "stderr: {}", stderr);
    assert!(stderr.contains("broken.ql (2, 1)"), "stderr: {}", stderr);
    assert!(!stdout_of(&output).contains("never printed"));
}

#[test]
fn missing_script_is_reported() {
    let output = run_script("tests/scripts/does-not-exist.ql", &[]);

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Could not open"));
}

#[test]
fn script_from_standard_input() {
    let output = run_with_input(&[], "'from stdin' print");

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "from stdin\n");
}

#[test]
fn dash_reads_standard_input() {
    let output = run_with_input(&["-"], "1 0 /");
    let stderr = stderr_of(&output);

    assert!(!output.status.success());
    assert!(stderr.contains("<stdin> (1, 5)"), "stderr: {}", stderr);
    assert!(stderr.contains("divide by zero"), "stderr: {}", stderr);
}

#[test]
fn tokens_are_listed_without_running() {
    let output = run_with_input(&["--tokens"], "frobnicate [a b]\n'x'");
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(
        lines,
        vec![
            "<stdin> (1, 1): word frobnicate",
            "<stdin> (1, 12): quotation [a b]",
            "<stdin> (2, 1): text \"x\"",
        ]
    );
}

#[test]
fn stack_capacity_is_enforced() {
    let output = run_with_input(&["--stack-capacity", "1"], "1 2");

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Stack overflow"));
}

#[test]
fn stack_capacity_from_the_environment() {
    let mut child = quill()
        .env("QUILL_STACK_CAPACITY", "2")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run interpreter");

    child
        .stdin
        .take()
        .expect("Standard input should be piped")
        .write_all(b"1 2 3")
        .expect("Failed to write the script");

    let output = child.wait_with_output().expect("Failed to wait on interpreter");

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("all 2 cells are in use"));
}

#[test]
fn zero_stack_capacity_is_rejected() {
    let output = run_with_input(&["--stack-capacity", "0"], "");

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("stack-capacity"));
}

#[test]
fn words_lists_the_dictionary() {
    let output = run_with_input(&["--words"], "'shout' [print] define");
    let stdout = stdout_of(&output);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout.contains("13 words defined."), "stdout: {}", stdout);
    assert!(stdout.contains("shout"));
    assert!(stdout.contains("define"));
}
