//! Property-based tests for level lookup and line rendering

use proptest::prelude::*;
use reloadable_logger::prelude::*;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
    ]
}

fn formatter(enable_timestamp: bool, enable_position: bool, enable_color: bool) -> LineFormatter {
    LineFormatter::new(FormatterOptions {
        enable_timestamp,
        enable_position,
        enable_color,
        ..FormatterOptions::default()
    })
}

proptest! {
    #[test]
    fn test_lookup_ignores_case(level in any_level(), mask in prop::collection::vec(any::<bool>(), 5)) {
        let name: String = level
            .to_str()
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect();
        prop_assert_eq!(LogLevel::lookup(&name), level);
    }

    #[test]
    fn test_unknown_names_fall_back_to_info(name in "[a-z]{6,12}") {
        prop_assume!(!["debug", "info", "warn", "error"].contains(&name.as_str()));
        prop_assert_eq!(LogLevel::lookup(&name), LogLevel::Info);
    }

    #[test]
    fn test_line_is_single_and_padded(
        level in any_level(),
        message in "[ -~]{0,80}",
        enable_timestamp in any::<bool>(),
        enable_position in any::<bool>(),
        enable_color in any::<bool>(),
    ) {
        let line = formatter(enable_timestamp, enable_position, enable_color)
            .format(&LogEntry::new(level, message.clone()));

        prop_assert!(line.ends_with(" \n"));
        prop_assert_eq!(line.matches('\n').count(), 1);

        let padded = format!("{:<44}", message);
        prop_assert_eq!(padded.len(), message.len().max(44));
        let tail = format!("] {} \n", padded);
        prop_assert!(line.ends_with(&tail), "line {:?}", line);
        prop_assert!(line.contains(level.tag()));
    }

    #[test]
    fn test_control_characters_never_split_lines(message in "[a-z\n\r\t]{0,60}") {
        let line = formatter(false, false, false).format(&LogEntry::new(LogLevel::Info, message));
        prop_assert_eq!(line.matches('\n').count(), 1);
        prop_assert!(!line.contains('\r') && !line.contains('\t'));
    }

    #[test]
    fn test_any_timestamp_pattern_renders(pattern in "[ -~]{0,24}") {
        prop_assume!(!pattern.contains('%'));
        let line = LineFormatter::new(FormatterOptions {
            enable_position: false,
            timestamp_format: pattern,
            ..FormatterOptions::default()
        })
        .format(&LogEntry::new(LogLevel::Info, "x".to_string()));
        prop_assert!(line.contains("[INFO] x"));
    }

    #[test]
    fn test_level_ordering_matches_threshold(a in any_level(), b in any_level()) {
        let active = ActiveLevel::new(a);
        prop_assert_eq!(active.enabled(b), b >= a);
    }
}
