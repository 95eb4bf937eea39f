//! Property tests for parameter extraction

use layerkit_reader::gcode::{CommandLine, GCommand, MoveParams, SegmentationMode};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_value_ends_at_whitespace_or_comment(
        value in -10_000.0f64..10_000.0,
        terminator in prop::sample::select(vec![" ", "\t", ";", ";comment", " F1200", ""]),
    ) {
        let text = format!("G1 X{value}{terminator}");
        let line = CommandLine::new(&text);
        prop_assert_eq!(line.float("X"), Some(value));
    }

    #[test]
    fn prop_lookup_never_panics(text in "\\PC{0,40}") {
        let line = CommandLine::new(&text);
        let _ = line.float("X");
        let _ = line.int("G");
        let _ = line.int("T");
        let _ = MoveParams::from_line(&line);
    }

    #[test]
    fn prop_unknown_codes_are_other(code in 0i64..1000) {
        let command = GCommand::from_code(code);
        let recognized = matches!(code, 0 | 1 | 28 | 92);
        prop_assert_eq!(command.is_recognized(), recognized);
    }

    #[test]
    fn prop_mode_follows_marker_presence(
        lines in prop::collection::vec("[GMT;][A-Z0-9 .:]{0,12}", 0..20),
        marker_at in prop::option::of(0usize..20),
    ) {
        let mut lines = lines;
        let expected = lines.iter().any(|l| l.starts_with(";LAYER:")) || marker_at.is_some();
        if let Some(at) = marker_at {
            let at = at.min(lines.len());
            lines.insert(at, ";LAYER:3".to_string());
        }
        let mode = SegmentationMode::detect(&lines);
        prop_assert_eq!(mode == SegmentationMode::Explicit, expected);
    }
}
