// Keyintent Classifier Properties
//
// Randomized checks of the de-duplication, mask and commit rules.
//
// Run with: cargo test --test properties

use proptest::prelude::*;

use keyintent_core::keycode;
use keyintent_core::{
    Classifier, Emission, Intent, KeyEvent, ModifierMask, PlatformProfile, RepeatPolicy,
    RuleAction, RuleTable,
};

fn profile_strategy() -> impl Strategy<Value = PlatformProfile> {
    prop_oneof![Just(PlatformProfile::Default), Just(PlatformProfile::Mac)]
}

/// Events biased toward the keys and modifiers the rule table cares about
fn event_strategy() -> impl Strategy<Value = KeyEvent> {
    let kind = prop_oneof![4 => Just(7i32), 4 => Just(9i32), 1 => any::<i32>()];
    let modifiers = prop_oneof![
        Just(0u32),
        Just(1u32),
        Just(2u32),
        Just(3u32),
        Just(8u32),
        Just(9u32),
        0u32..(1 << 13),
    ];
    let keycode = prop_oneof![
        prop::sample::select(vec![9u32, 17, 20, 27, 32, 37, 38, 39, 40, 70, 72, 74, 75, 76, 80, 82, 84, 87, 91, 219, 221]),
        48u32..=58,
        0u32..256,
    ];
    (kind, modifiers, keycode).prop_map(|(k, m, c)| KeyEvent::from_raw(k, m, c))
}

/// An event matching `rule` for the given profile, with extra modifier bits
fn matching_event(table: &RuleTable, index: usize, extra: u32) -> KeyEvent {
    let rule = &table.primary()[index];
    let code = match &rule.keys {
        keyintent_core::KeyMatch::Exact(code) => *code,
        keyintent_core::KeyMatch::AnyOf(codes) => codes[0],
        keyintent_core::KeyMatch::Range { first, .. } => *first,
    };
    let kind = match rule.event {
        keyintent_core::EventClass::KeyDown => 7,
        keyintent_core::EventClass::KeyUp => 9,
    };
    KeyEvent::from_raw(kind, rule.mask.bits() | extra, code)
}

proptest! {
    #[test]
    fn commit_requires_prior_navigation(
        profile in profile_strategy(),
        events in prop::collection::vec(event_strategy(), 0..64),
    ) {
        let mut classifier = Classifier::configure(profile);
        let mut armed = false;

        for event in events {
            let result = classifier.process(event);
            for emission in &result {
                match emission.intent {
                    Intent::Commit => {
                        prop_assert!(armed, "commit without navigation");
                        armed = false;
                    }
                    intent if intent.is_navigation() => armed = true,
                    _ => {}
                }
            }
            prop_assert_eq!(classifier.can_commit(), armed);
        }
    }

    #[test]
    fn at_most_one_emission_per_block(
        profile in profile_strategy(),
        events in prop::collection::vec(event_strategy(), 1..64),
    ) {
        let mut classifier = Classifier::configure(profile);
        let limit = if profile.is_mac_style() { 2 } else { 1 };
        for event in events {
            prop_assert!(classifier.process(event).len() <= limit);
        }
    }

    #[test]
    fn last_event_always_updated(
        profile in profile_strategy(),
        events in prop::collection::vec(event_strategy(), 1..32),
    ) {
        let mut classifier = Classifier::configure(profile);
        for event in events {
            classifier.process(event);
            prop_assert_eq!(classifier.state().last_event, Some(event));
        }
    }

    #[test]
    fn suppressed_rules_never_fire_on_identical_repeat(
        profile in profile_strategy(),
        event in event_strategy(),
    ) {
        let table = RuleTable::for_profile(profile);
        let mut classifier = Classifier::configure(profile);
        classifier.process(event);
        let repeated = classifier.process(event);

        let suppressed: Vec<_> = table
            .primary()
            .iter()
            .filter(|rule| rule.repeat == RepeatPolicy::Suppressed && rule.matches(&event, false))
            .collect();
        for rule in suppressed {
            if let RuleAction::Emit(intent) = rule.action {
                let still_matched_elsewhere = table
                    .iter()
                    .any(|r| r.repeat == RepeatPolicy::Allowed
                        && r.action.intent() == intent
                        && r.matches(&event, true));
                if !still_matched_elsewhere {
                    prop_assert!(!repeated.contains(intent));
                }
            }
        }
    }

    #[test]
    fn extra_modifier_bits_do_not_block_a_match(
        profile in profile_strategy(),
        index in 0usize..20,
        extra in 0u32..(1 << 13),
    ) {
        let table = RuleTable::for_profile(profile);
        let rule = table.primary()[index].clone();
        let event = matching_event(&table, index, extra);
        prop_assert!(rule.matches(&event, false));
    }

    #[test]
    fn repeat_tolerant_rules_fire_every_time(
        index in 0usize..20,
        count in 1usize..8,
    ) {
        let table = RuleTable::for_profile(PlatformProfile::Default);
        let rule = &table.primary()[index];
        prop_assume!(rule.repeat == RepeatPolicy::Allowed);

        let mut classifier = Classifier::configure(PlatformProfile::Default);
        let event = matching_event(&table, index, 0);
        // the first matching row wins, so compare against a fresh classifier
        let expected = Classifier::configure(PlatformProfile::Default).process(event).into_vec();
        prop_assert!(!expected.is_empty());
        for _ in 0..count {
            prop_assert_eq!(classifier.process(event).into_vec(), expected.clone());
        }
    }
}

#[test]
fn digits_map_to_zero_based_index() {
    for code in keycode::DIGIT_1..=keycode::DIGIT_9 {
        let mut classifier = Classifier::configure(PlatformProfile::Default);
        let result = classifier.process(KeyEvent::down(ModifierMask::CONTROL, code));
        assert_eq!(
            result.into_vec(),
            vec![Emission::with_arg(Intent::SelectByIndex, code - 49)]
        );
    }

    for code in [keycode::DIGIT_0, keycode::DIGIT_9 + 1] {
        let mut classifier = Classifier::configure(PlatformProfile::Default);
        assert!(classifier
            .process(KeyEvent::down(ModifierMask::CONTROL, code))
            .is_empty());
        assert!(!classifier.can_commit());
    }
}

#[test]
fn superset_mask_matches_new_and_recover() {
    let noisy = ModifierMask::SHIFT | ModifierMask::CONTROL | ModifierMask::ALT | ModifierMask::from_bits(1 << 9);

    let mut classifier = Classifier::configure(PlatformProfile::Default);
    // Shift+Primary rule with extra bits
    assert_eq!(
        classifier.process(KeyEvent::down(noisy, keycode::T)).intents(),
        vec![Intent::Recover]
    );
    // Primary-only rule with extra bits; the repeat skips `recover`
    assert_eq!(
        classifier.process(KeyEvent::down(noisy, keycode::T)).intents(),
        vec![Intent::New]
    );

    let mut classifier = Classifier::configure(PlatformProfile::Default);
    let ctrl_alt = ModifierMask::CONTROL | ModifierMask::ALT | ModifierMask::IS_LEFT;
    assert_eq!(
        classifier.process(KeyEvent::down(ctrl_alt, keycode::T)).intents(),
        vec![Intent::New]
    );
}
