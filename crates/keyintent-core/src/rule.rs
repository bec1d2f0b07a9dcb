// Keyintent Rule Table
// Ordered shortcut rules evaluated first-match-wins per block

use std::fmt;

use crate::event::{EventType, KeyEvent};
use crate::keycode;
use crate::{Intent, ModifierMask, PlatformProfile};

/// Which event type a rule listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventClass {
    KeyDown,
    KeyUp,
}

impl EventClass {
    /// `Other` event types never match either class
    pub fn matches(self, kind: EventType) -> bool {
        match self {
            EventClass::KeyDown => kind.is_down(),
            EventClass::KeyUp => kind.is_up(),
        }
    }
}

impl fmt::Display for EventClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventClass::KeyDown => write!(f, "down"),
            EventClass::KeyUp => write!(f, "up"),
        }
    }
}

/// Key code test of a rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyMatch {
    Exact(u32),
    AnyOf(Vec<u32>),
    /// Inclusive range
    Range { first: u32, last: u32 },
}

impl KeyMatch {
    pub fn matches(&self, code: u32) -> bool {
        match self {
            KeyMatch::Exact(expected) => code == *expected,
            KeyMatch::AnyOf(codes) => codes.contains(&code),
            KeyMatch::Range { first, last } => (*first..=*last).contains(&code),
        }
    }

    /// Position of `code` inside the match (0 for the first key)
    pub fn offset(&self, code: u32) -> Option<u32> {
        match self {
            KeyMatch::Exact(expected) => (code == *expected).then_some(0),
            KeyMatch::AnyOf(codes) => codes.iter().position(|c| *c == code).map(|p| p as u32),
            KeyMatch::Range { first, last } => {
                (*first..=*last).contains(&code).then(|| code - *first)
            }
        }
    }
}

impl fmt::Display for KeyMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = |code: u32| match keycode::key_name(code) {
            Some(name) => format!("{}({})", name, code),
            None => code.to_string(),
        };
        match self {
            KeyMatch::Exact(code) => write!(f, "{}", label(*code)),
            KeyMatch::AnyOf(codes) => {
                let parts: Vec<String> = codes.iter().map(|c| label(*c)).collect();
                write!(f, "{}", parts.join("|"))
            }
            KeyMatch::Range { first, last } => write!(f, "{}..{}", label(*first), label(*last)),
        }
    }
}

/// Whether a rule may fire on an event identical to the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepeatPolicy {
    Allowed,
    Suppressed,
}

/// What a matching rule does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleAction {
    Emit(Intent),
    /// Emit with argument `keycode - first key of the match`
    EmitIndex(Intent),
    /// Emit `commit` only if a navigation armed it, then disarm
    Commit,
}

impl RuleAction {
    pub fn intent(self) -> Intent {
        match self {
            RuleAction::Emit(intent) | RuleAction::EmitIndex(intent) => intent,
            RuleAction::Commit => Intent::Commit,
        }
    }
}

/// One row of the shortcut table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortcutRule {
    pub event: EventClass,
    pub mask: ModifierMask,
    pub keys: KeyMatch,
    pub repeat: RepeatPolicy,
    pub action: RuleAction,
}

impl ShortcutRule {
    pub fn new(
        event: EventClass,
        mask: ModifierMask,
        keys: KeyMatch,
        repeat: RepeatPolicy,
        action: RuleAction,
    ) -> Self {
        Self {
            event,
            mask,
            keys,
            repeat,
            action,
        }
    }

    /// Check this rule against an event.
    ///
    /// `is_repeat` is true when the event equals the previous event field by
    /// field; suppressed rules then never match.
    pub fn matches(&self, event: &KeyEvent, is_repeat: bool) -> bool {
        if is_repeat && self.repeat == RepeatPolicy::Suppressed {
            return false;
        }
        self.event.matches(event.kind)
            && event.modifiers.contains(self.mask)
            && self.keys.matches(event.keycode)
    }

    /// True for repeat-tolerant navigation rules, which set the commit flag
    pub fn arms_commit(&self) -> bool {
        self.repeat == RepeatPolicy::Allowed
            && !matches!(self.action, RuleAction::Commit)
            && self.action.intent().is_navigation()
    }
}

impl fmt::Display for ShortcutRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repeat = match self.repeat {
            RepeatPolicy::Allowed => "repeat ok",
            RepeatPolicy::Suppressed => "no repeat",
        };
        write!(
            f,
            "{:<4} {:<18} {:<24} -> {} ({})",
            self.event,
            self.mask.to_string(),
            self.keys.to_string(),
            self.action.intent(),
            repeat
        )
    }
}

/// Rules for one profile: the generic block and the platform-gated block.
///
/// Each block is searched top to bottom and stops at its first match. The
/// platform block is searched after the generic one, whatever the generic
/// block did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    primary: Vec<ShortcutRule>,
    platform: Vec<ShortcutRule>,
}

impl RuleTable {
    pub fn new(primary: Vec<ShortcutRule>, platform: Vec<ShortcutRule>) -> Self {
        Self { primary, platform }
    }

    /// Build the shortcut table for a platform profile
    pub fn for_profile(profile: PlatformProfile) -> Self {
        use EventClass::{KeyDown, KeyUp};
        use RepeatPolicy::{Allowed, Suppressed};

        let primary = profile.primary_mod();
        let shift_primary = profile.shift_primary_mod();
        let rule = ShortcutRule::new;
        let exact = KeyMatch::Exact;
        let any = |codes: &[u32]| KeyMatch::AnyOf(codes.to_vec());
        let emit = RuleAction::Emit;

        let generic = vec![
            rule(KeyDown, shift_primary, exact(keycode::T), Suppressed, emit(Intent::Recover)),
            rule(KeyDown, primary, exact(keycode::T), Allowed, emit(Intent::New)),
            rule(KeyDown, primary, any(&[keycode::L, keycode::SPACE]), Suppressed, emit(Intent::Go)),
            rule(KeyDown, shift_primary, exact(keycode::J), Suppressed, emit(Intent::Back)),
            rule(KeyDown, shift_primary, exact(keycode::K), Suppressed, emit(Intent::Forward)),
            rule(KeyDown, primary, any(&[keycode::J, keycode::DOWN]), Allowed, emit(Intent::Next)),
            rule(KeyDown, primary, any(&[keycode::K, keycode::UP]), Allowed, emit(Intent::Prev)),
            rule(KeyUp, shift_primary, exact(keycode::TAB), Allowed, emit(Intent::Prev)),
            rule(KeyUp, primary, exact(keycode::TAB), Allowed, emit(Intent::Next)),
            rule(
                KeyDown,
                primary,
                KeyMatch::Range {
                    first: keycode::DIGIT_1,
                    last: keycode::DIGIT_9,
                },
                Allowed,
                RuleAction::EmitIndex(Intent::SelectByIndex),
            ),
            rule(KeyDown, primary, exact(keycode::LEFT), Suppressed, emit(Intent::Back)),
            rule(KeyDown, primary, exact(keycode::RIGHT), Suppressed, emit(Intent::Forward)),
            rule(KeyDown, shift_primary, exact(keycode::H), Suppressed, emit(Intent::Toggle)),
            rule(KeyUp, ModifierMask::NONE, exact(profile.primary_key()), Suppressed, RuleAction::Commit),
            // CapsLock remapped as the primary modifier
            rule(KeyUp, primary, exact(keycode::CAPS_LOCK), Suppressed, RuleAction::Commit),
            rule(KeyDown, primary, exact(keycode::W), Allowed, emit(Intent::Close)),
            rule(KeyDown, primary, exact(keycode::P), Suppressed, emit(Intent::StackPin)),
            rule(KeyDown, primary, exact(keycode::F), Suppressed, emit(Intent::FindInPage)),
            rule(KeyDown, primary, exact(keycode::R), Suppressed, emit(Intent::Reload)),
            rule(KeyDown, ModifierMask::NONE, exact(keycode::ESCAPE), Allowed, emit(Intent::Clear)),
        ];

        let platform = if profile.is_mac_style() {
            vec![
                rule(KeyDown, shift_primary, exact(keycode::CLOSE_BRACKET), Allowed, emit(Intent::Next)),
                rule(KeyDown, shift_primary, exact(keycode::OPEN_BRACKET), Allowed, emit(Intent::Prev)),
            ]
        } else {
            Vec::new()
        };

        Self::new(generic, platform)
    }

    pub fn primary(&self) -> &[ShortcutRule] {
        &self.primary
    }

    pub fn platform(&self) -> &[ShortcutRule] {
        &self.platform
    }

    /// Iterate both blocks in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = &ShortcutRule> {
        self.primary.iter().chain(self.platform.iter())
    }

    pub fn len(&self) -> usize {
        self.primary.len() + self.platform.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The blocks in evaluation order
    pub fn blocks(&self) -> [&[ShortcutRule]; 2] {
        [&self.primary, &self.platform]
    }
}

/// First rule of `block` matching the event, if any
pub fn first_match<'a>(
    block: &'a [ShortcutRule],
    event: &KeyEvent,
    is_repeat: bool,
) -> Option<&'a ShortcutRule> {
    block.iter().find(|rule| rule.matches(event, is_repeat))
}
