use super::*;
use log::{Level, Metadata, Record};
use serial_test::serial;

#[test]
#[serial]
fn get_level_from_env_parses_cases() {
    let cases: &[(Option<&str>, Level)] = &[
        (None, Level::Warn),
        (Some("debug"), Level::Debug),
        (Some("DEBUG"), Level::Debug),
        (Some("info"), Level::Info),
        (Some("warn"), Level::Warn),
        (Some("error"), Level::Error),
        (Some("ERROR"), Level::Error),
        (Some("trace"), Level::Trace),
        (Some("garbage"), Level::Warn),
        (Some("off"), Level::Warn),
    ];

    for (value, expected) in cases {
        match value {
            Some(v) => unsafe { std::env::set_var(PROGRAM_LOG_LEVEL, v) },
            None => unsafe { std::env::remove_var(PROGRAM_LOG_LEVEL) },
        }

        let lvl = get_level_from_env();
        assert_eq!(
            lvl, *expected,
            "env {:?} should yield level {:?}, got {:?}",
            value, expected, lvl
        );
    }

    unsafe { std::env::remove_var(PROGRAM_LOG_LEVEL) };
}

#[test]
#[serial]
fn logging_is_configured_only_by_its_variables() {
    unsafe {
        std::env::remove_var(PROGRAM_LOG_LEVEL);
        std::env::remove_var(PROGRAM_LOG_FILE);
    }
    assert!(!is_configured());
    assert_eq!(init_if_configured().ok(), Some(false));

    unsafe { std::env::set_var(PROGRAM_LOG_LEVEL, "") };
    assert!(!is_configured());

    unsafe { std::env::set_var(PROGRAM_LOG_LEVEL, "debug") };
    assert!(is_configured());
    unsafe { std::env::remove_var(PROGRAM_LOG_LEVEL) };

    unsafe { std::env::set_var(PROGRAM_LOG_FILE, "/tmp/fmeta.log") };
    assert!(is_configured());
    unsafe { std::env::remove_var(PROGRAM_LOG_FILE) };
}

#[test]
#[serial]
fn target_defaults_to_stderr_without_env() {
    unsafe { std::env::remove_var(PROGRAM_LOG_FILE) };
    assert!(matches!(get_target_from_env(), LogTarget::Stderr));

    unsafe { std::env::set_var(PROGRAM_LOG_FILE, "") };
    assert!(matches!(get_target_from_env(), LogTarget::Stderr));
    unsafe { std::env::remove_var(PROGRAM_LOG_FILE) };
}

#[test]
#[serial]
fn target_uses_file_when_env_points_to_writable_path() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("logs").join("fmeta.log");

    unsafe { std::env::set_var(PROGRAM_LOG_FILE, &path) };
    let target = get_target_from_env();
    unsafe { std::env::remove_var(PROGRAM_LOG_FILE) };

    assert!(matches!(target, LogTarget::File(_)));
    assert!(path.exists(), "log file should be created eagerly");
}

#[test]
fn enabled_respects_level_threshold() {
    let levels = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    for logger_level in levels {
        let logger = Logger {
            level: logger_level,
            target: LogTarget::Stderr,
        };

        for record_level in levels {
            let meta = Metadata::builder()
                .level(record_level)
                .target("test_target")
                .build();

            let expected = record_level <= logger_level;
            assert_eq!(
                logger.enabled(&meta),
                expected,
                "logger level {:?}, record level {:?}",
                logger_level,
                record_level
            );
        }
    }
}

#[test]
fn file_logger_appends_formatted_lines() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("out.log");
    let file = open_log_file(&path).expect("open log file");

    let logger = Logger {
        level: Level::Info,
        target: LogTarget::File(Mutex::new(file)),
    };

    let args = format_args!("exceptionId=abc");
    let record = Record::builder()
        .level(Level::Error)
        .target("fmeta")
        .args(args)
        .build();
    logger.log(&record);

    // Below threshold, must not be written.
    let args = format_args!("noise");
    let record = Record::builder()
        .level(Level::Debug)
        .target("fmeta")
        .args(args)
        .build();
    logger.log(&record);
    logger.flush();

    let contents = std::fs::read_to_string(&path).expect("read log file");
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("ERROR [fmeta] exceptionId=abc"));
    assert!(!contents.contains("noise"));
}
