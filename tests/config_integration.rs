use std::path::PathBuf;
use std::time::Duration;

use caret_status::config::{ConfigFlags, load_config_flags, parse_flag_tokens};
use caret_status::status::RangeCountPolicy;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".caretstatusrc");
    let content = r#"
# comment
--delay-ms 30

--range-count non-zero

--log-file=status.log
--separator=" :: "
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert_eq!(flags.delay_ms, Some(30));
    assert_eq!(flags.range_count, Some(RangeCountPolicy::NonZero));
    assert_eq!(flags.log_file, Some(PathBuf::from("status.log")));
    assert_eq!(flags.separator.as_deref(), Some(" :: "));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".caretstatusrc");
    let content = "--delay-ms 30\n--rec-label REC*\n--log-file file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "caret-status".to_string(),
        "--delay-ms".to_string(),
        "5".to_string(),
        "--separator".to_string(),
        ":".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert_eq!(effective.delay_ms, Some(5), "cli should override delay");
    assert_eq!(effective.separator.as_deref(), Some(":"));
    assert_eq!(effective.rec_label.as_deref(), Some("REC*"));
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );

    let options = effective.to_indicator_options();
    assert_eq!(options.delay, Duration::from_millis(5));
    assert_eq!(options.format.recording_label, "REC*");
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "caret-status".to_string(),
        "--range-count=multiple".to_string(),
        "--log-file=status.log".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.range_count, Some(RangeCountPolicy::Multiple));
    assert_eq!(flags.log_file, Some(PathBuf::from("status.log")));
}

#[test]
fn test_missing_config_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}
