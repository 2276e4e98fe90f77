use std::path::PathBuf;

use vitrine::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".vitrinerc");
    let content = r"
# comment
--watch

--autoplay-delay 4000

--debug-log=events.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.watch);
    assert_eq!(flags.autoplay_delay, Some(4000));
    assert_eq!(flags.debug_log, Some(PathBuf::from("events.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".vitrinerc");
    let content = "--watch\n--autoplay-delay 3000\n--debug-log file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "vitrine".to_string(),
        "--autoplay-delay".to_string(),
        "6000".to_string(),
        "--no-dots".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.watch, "file flags should remain enabled");
    assert!(effective.no_dots, "cli flags should be applied");
    assert_eq!(
        effective.autoplay_delay,
        Some(6000),
        "cli should override the delay"
    );
    assert_eq!(
        effective.debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "vitrine".to_string(),
        "--autoplay-delay=2500".to_string(),
        "--debug-log=events.log".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.autoplay_delay, Some(2500));
    assert_eq!(flags.debug_log, Some(PathBuf::from("events.log")));
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        watch: true,
        no_autoplay: true,
        ..ConfigFlags::default()
    };
    let cli = ConfigFlags {
        no_navigation: true,
        perf: true,
        ..ConfigFlags::default()
    };
    let merged = file.union(&cli);
    assert!(merged.watch);
    assert!(merged.no_autoplay);
    assert!(merged.no_navigation);
    assert!(merged.perf);
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}
