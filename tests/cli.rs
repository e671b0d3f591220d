use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn write_source(dir: &Path, name: &str, source: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, source).expect("should be able to write the test source");
    path
}

fn run(args: &[&OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pic12asm"))
        .args(args)
        .output()
        .expect("should be able to run the assembler")
}

fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().expect("should be able to create a temporary directory")
}

#[test]
fn assembles_next_to_input() {
    let dir = tempdir();
    let input = write_source(dir.path(), "blink.asm", "MOVLW 0x3A\nGOTO 0x001\n");

    let out = run(&[input.as_os_str()]);
    assert_eq!(out.status.code(), Some(0));

    let bytes = fs::read(dir.path().join("blink.bin")).expect("output should exist");
    assert_eq!(bytes, vec![0xC3, 0xAA, 0x01]);

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("*** BINARY ***"));
    assert!(stdout.contains("1100 0011 1010 1010 0000 0001 "));
}

#[test]
fn output_flag_overrides_path() {
    let dir = tempdir();
    let input = write_source(dir.path(), "prog.asm", "NOP\n");
    let output = dir.path().join("elsewhere.hex");

    let out = run(&[input.as_os_str(), OsStr::new("-q"), OsStr::new("-o"), output.as_os_str()]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(fs::read(&output).expect("output should exist"), vec![0x00, 0x00]);
    assert!(!dir.path().join("prog.bin").exists());
    assert!(!String::from_utf8_lossy(&out.stdout).contains("*** BINARY ***"));
}

#[test]
fn unknown_mnemonic_is_fatal() {
    let dir = tempdir();
    let input = write_source(dir.path(), "bad.asm", "NOP\nNOP\nNOP\nNOP\nFOOBAR 0x1\n");

    let out = run(&[input.as_os_str()]);
    assert_eq!(out.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("ERROR [line 5]:"), "{}", stderr);
    assert!(stderr.contains("FOOBAR"), "{}", stderr);
    assert!(!dir.path().join("bad.bin").exists());
}

#[test]
fn missing_operand_is_fatal() {
    let dir = tempdir();
    let input = write_source(dir.path(), "short.asm", "NOP\n; trailing\nMOVLW");

    let out = run(&[input.as_os_str()]);
    assert_eq!(out.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("ERROR [line 3]: expected number, got EOF"), "{}", stderr);
    assert!(!dir.path().join("short.bin").exists());
}

#[test]
fn truncation_warns_and_continues() {
    let dir = tempdir();
    let input = write_source(dir.path(), "wide.asm", "NOP\nCLRF 0x25\n");

    let out = run(&[input.as_os_str()]);
    assert_eq!(out.status.code(), Some(0));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stderr.matches("WARNING [line 2]:").count(), 1, "{}", stderr);
    assert_eq!(fs::read(dir.path().join("wide.bin")).expect("output should exist"), vec![0x00, 0x00, 0x65]);
}

#[test]
fn missing_argument_prints_usage() {
    let out = run(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).to_lowercase().contains("usage"));
}

#[test]
fn missing_file_is_fatal() {
    let dir = tempdir();
    let input = dir.path().join("nope.asm");

    let out = run(&[input.as_os_str()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("File not found"));
    assert!(!dir.path().join("nope.bin").exists());
}

#[test]
fn non_utf8_comment_is_accepted() {
    let dir = tempdir();
    let input = dir.path().join("latin.asm");
    fs::write(&input, b"NOP ; caf\xe9\n").expect("should be able to write the test source");

    let out = run(&[input.as_os_str()]);
    assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(dir.path().join("latin.bin")).expect("output should exist"), vec![0x00, 0x00]);
}

#[test]
fn listing_shows_words_and_labels() {
    let dir = tempdir();
    let input = write_source(dir.path(), "list.asm", "start: MOVLW 0x3A\nGOTO 0x001\n");

    let out = run(&[input.as_os_str(), OsStr::new("-d"), OsStr::new("-q")]);
    assert_eq!(out.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("MOVLW 0x3A"), "{}", stdout);
    assert!(stdout.contains("0xC3A"), "{}", stdout);
    assert!(stdout.contains("0xA01"), "{}", stdout);
    assert!(stdout.contains("start:"), "{}", stdout);
}
