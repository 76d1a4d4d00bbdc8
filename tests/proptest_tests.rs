//! Property-based tests using proptest.
//!
//! These check invariants of classification, repair and scoring over
//! randomly generated names.

use proptest::prelude::*;
use zipmend::classify::{classify, PathClass, PathTags};
use zipmend::detect::is_byte_representable;
use zipmend::report::encoding_confidence;
use zipmend::{repair, EntryName, Repairer};

/// Strings holding at least one code point above U+00FF.
fn multi_byte_text() -> impl Strategy<Value = String> {
    ("\\PC{0,8}", "[\u{0100}-\u{D7FF}\u{E000}-\u{FFFD}]", "\\PC{0,8}")
        .prop_map(|(head, wide, tail)| format!("{head}{wide}{tail}"))
}

/// Raw name bytes, as a legacy archiver might store them.
fn raw_name() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..24)
}

/// Archive-like paths built from a small alphabet that hits every class.
fn clutter_path() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        Just("__MACOSX".to_string()),
        Just(".DS_Store".to_string()),
        Just(".git".to_string()),
        Just("._photo.jpg".to_string()),
        "[a-z]{1,6}(\\.[a-z]{1,3})?",
    ];
    proptest::collection::vec(segment, 1..5).prop_map(|parts| parts.join("/"))
}

proptest! {
    /// Text that already holds real multi-byte characters is never touched.
    #[test]
    fn multi_byte_text_is_left_alone(text in multi_byte_text()) {
        let result = repair(&text);
        prop_assert!(!result.was_fixed);
        prop_assert_eq!(result.fixed, text);
    }

    /// Repairing a repaired string changes nothing.
    #[test]
    fn repair_is_idempotent(text in "\\PC{0,16}") {
        let once = repair(&text);
        let twice = repair(&once.fixed);
        prop_assert!(!once.was_fixed || !twice.was_fixed);
        prop_assert_eq!(twice.fixed, once.fixed);
    }

    /// A name repaired from stored bytes is a fixed point once written back.
    #[test]
    fn repaired_names_are_fixed_points(raw in raw_name()) {
        let repairer = Repairer::default();
        let once = repairer.repair_name(&EntryName::from_raw(raw));
        prop_assume!(once.was_fixed);

        let twice = repairer.repair_name(&EntryName::from_text(once.fixed.clone()));
        prop_assert!(!twice.was_fixed);
        prop_assert_eq!(twice.fixed, once.fixed);
    }

    /// A fix always yields real multi-byte text and names its encoding.
    #[test]
    fn fixes_are_not_byte_strings(raw in raw_name()) {
        let result = Repairer::default().repair_name(&EntryName::from_raw(raw));
        if result.was_fixed {
            prop_assert!(!is_byte_representable(&result.fixed));
            prop_assert!(result.encoding.is_some());
        } else {
            prop_assert!(result.encoding.is_none());
        }
    }

    /// The repair is a pure function of its input.
    #[test]
    fn repair_is_deterministic(raw in raw_name()) {
        let name = EntryName::from_raw(raw);
        let repairer = Repairer::default();
        prop_assert_eq!(repairer.repair_name(&name), repairer.repair_name(&name));
    }

    /// Confidence never exceeds 100 and never drops as encoding issues grow.
    #[test]
    fn confidence_is_bounded_and_monotonic(
        meta in 0usize..5,
        settings in 0usize..5,
        encoding in 0usize..50,
    ) {
        let score = encoding_confidence(meta, settings, encoding);
        prop_assert!(score <= 100);
        prop_assert!(encoding_confidence(meta, settings, encoding + 1) >= score);
        if meta + settings > 0 {
            prop_assert!(score >= 40);
        }
    }

    /// Classification picks exactly one class, in precedence order.
    #[test]
    fn classification_is_exclusive(path in clutter_path()) {
        let tags = PathTags::of(&path);
        let class = classify(&path);
        prop_assert_eq!(class.is_none(), tags.is_empty());
        match class {
            Some(PathClass::MetadataArtifact) => prop_assert!(tags.metadata_artifact),
            Some(PathClass::SettingsFile) => {
                prop_assert!(tags.settings_file && !tags.metadata_artifact)
            }
            Some(PathClass::HiddenFile) => prop_assert!(
                tags.hidden_file && !tags.metadata_artifact && !tags.settings_file
            ),
            None => {}
        }
    }
}
