// crates/plystore-cli/tests/cli_put_get.rs

use std::fs;
use std::process::Command;

use tempfile::TempDir;

const SAMPLE: &[u8] = b"ply\nformat ascii 1.0\ncomment cli test\nelement vertex 3\nproperty float x\nproperty float y\nend_header\n0 0\n1 0\n0 1\n";

fn plystore(root: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_plystore"));
    cmd.arg("--root").arg(root.path()).env_remove("RUST_LOG");
    cmd
}

fn run_ok(cmd: &mut Command) -> std::process::Output {
    let out = cmd.output().expect("spawn command");
    assert!(
        out.status.success(),
        "command failed: status={:?}\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    out
}

#[test]
fn put_get_roundtrip_through_binary() {
    let root = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let input = work.path().join("tri.ply");
    let output = work.path().join("tri_out.ply");
    fs::write(&input, SAMPLE).unwrap();

    let out = run_ok(plystore(&root).args(["put", "--name", "tri", "--in", input.to_str().unwrap()]));
    assert!(String::from_utf8_lossy(&out.stderr).contains("put ok: name=tri"));

    run_ok(plystore(&root).args(["get", "--name", "tri", "--out", output.to_str().unwrap()]));
    assert_eq!(fs::read(&output).unwrap(), SAMPLE);

    let out = run_ok(plystore(&root).arg("list"));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "tri\n");

    let out = run_ok(plystore(&root).arg("types"));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "vertex\n");
}

#[test]
fn second_put_with_same_name_fails() {
    let root = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let input = work.path().join("a.ply");
    fs::write(&input, SAMPLE).unwrap();

    run_ok(plystore(&root).args(["put", "--name", "a", "--in", input.to_str().unwrap()]));
    let out = plystore(&root)
        .args(["put", "--name", "a", "--in", input.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("already exists"));
}

#[test]
fn parse_reports_malformed_declaration() {
    let root = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let input = work.path().join("bad.ply");
    fs::write(&input, b"ply\nelement vertex abc\nend_header\n").unwrap();

    let out = plystore(&root)
        .args(["parse", "--in", input.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("malformed element declaration"));
}
