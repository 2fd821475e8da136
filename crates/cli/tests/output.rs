use std::{
    path::Path,
    process::{Command, Output},
};

fn fmeta(codes: &Path, args: &[&str], envs: &[(&str, &Path)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fmeta"));
    cmd.arg("--error-codes")
        .arg(codes)
        .args(args)
        .env_remove("FMETA_LOG_LEVEL")
        .env_remove("FMETA_LOG_FILE");
    for (name, value) in envs {
        cmd.env(name, value);
    }
    cmd.output().expect("run fmeta")
}

#[test]
fn failure_stderr_is_a_single_json_document() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let codes = tmp.path().join("codes.json");
    std::fs::write(&codes, b"{}").expect("write codes");
    let missing = tmp.path().join("missing.txt");

    let out = fmeta(&codes, &["file", missing.to_str().expect("utf-8 path")], &[]);

    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let envelope: serde_json::Value =
        serde_json::from_slice(&out.stderr).expect("stderr is one JSON document");
    assert_eq!(envelope["appErrorCode"], "INVALID_FILE_PATH");
}

#[test]
fn configured_log_file_keeps_stderr_clean() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let codes = tmp.path().join("codes.json");
    std::fs::write(&codes, b"{}").expect("write codes");
    let log = tmp.path().join("fmeta.log");

    let out = fmeta(&codes, &["dir", "--compact", ""], &[("FMETA_LOG_FILE", &log)]);

    assert_eq!(out.status.code(), Some(1));
    let envelope: serde_json::Value =
        serde_json::from_slice(&out.stderr).expect("stderr is one JSON document");
    assert_eq!(envelope["appErrorCode"], "MISSING_PARAMETER");

    let logged = std::fs::read_to_string(&log).expect("read log file");
    assert!(logged.contains("[envelope]"));
}
