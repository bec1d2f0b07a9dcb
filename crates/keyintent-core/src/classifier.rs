// Keyintent Shortcut Classifier
// Turns raw key events into semantic intents
//
// The classifier is synchronous and owns all of its memory: the previous
// event (for de-duplication) and the commit flag armed by navigation.
// Events must be fed in the exact order the input source produced them.

use std::ops::Deref;

use smallvec::SmallVec;

use crate::rule::{first_match, RuleAction, RuleTable, ShortcutRule};
use crate::sink::IntentSink;
use crate::{Emission, Intent, KeyEvent, PlatformProfile};

/// Per-instance classifier memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassifierState {
    /// The previously processed event, matched or not
    pub last_event: Option<KeyEvent>,
    /// Set by repeat-tolerant navigation, cleared by the commit rules
    pub can_commit: bool,
}

impl ClassifierState {
    /// True when `event` equals the previous event field by field
    pub fn is_repeat_of_last(&self, event: &KeyEvent) -> bool {
        self.last_event.as_ref() == Some(event)
    }

    /// Apply a matched rule, returning the emission it produces
    fn apply(&mut self, rule: &ShortcutRule, event: &KeyEvent) -> Option<Emission> {
        match rule.action {
            RuleAction::Emit(intent) => {
                if rule.arms_commit() {
                    self.can_commit = true;
                }
                Some(Emission::new(intent))
            }
            RuleAction::EmitIndex(intent) => {
                let index = rule.keys.offset(event.keycode)?;
                if rule.arms_commit() {
                    self.can_commit = true;
                }
                Some(Emission::with_arg(intent, index))
            }
            RuleAction::Commit => {
                let armed = std::mem::take(&mut self.can_commit);
                if armed {
                    Some(Emission::new(Intent::Commit))
                } else {
                    log::trace!("primary release without pending navigation");
                    None
                }
            }
        }
    }
}

/// Emissions produced by one event.
///
/// The generic block yields at most one, the platform block at most one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassificationResult {
    emissions: SmallVec<[Emission; 2]>,
}

impl ClassificationResult {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, emission: Emission) {
        self.emissions.push(emission);
    }

    /// Intents only, in emission order
    pub fn intents(&self) -> Vec<Intent> {
        self.emissions.iter().map(|e| e.intent).collect()
    }

    pub fn contains(&self, intent: Intent) -> bool {
        self.emissions.iter().any(|e| e.intent == intent)
    }

    pub fn into_vec(self) -> Vec<Emission> {
        self.emissions.into_vec()
    }
}

impl Deref for ClassificationResult {
    type Target = [Emission];

    fn deref(&self) -> &[Emission] {
        &self.emissions
    }
}

impl IntoIterator for ClassificationResult {
    type Item = Emission;
    type IntoIter = smallvec::IntoIter<[Emission; 2]>;

    fn into_iter(self) -> Self::IntoIter {
        self.emissions.into_iter()
    }
}

impl<'a> IntoIterator for &'a ClassificationResult {
    type Item = &'a Emission;
    type IntoIter = std::slice::Iter<'a, Emission>;

    fn into_iter(self) -> Self::IntoIter {
        self.emissions.iter()
    }
}

/// Keyboard shortcut classifier bound to one platform profile
#[derive(Debug, Clone)]
pub struct Classifier {
    profile: PlatformProfile,
    rules: RuleTable,
    state: ClassifierState,
}

impl Classifier {
    /// Create a classifier for a profile with fresh state
    pub fn configure(profile: PlatformProfile) -> Self {
        Self {
            profile,
            rules: RuleTable::for_profile(profile),
            state: ClassifierState::default(),
        }
    }

    pub fn profile(&self) -> PlatformProfile {
        self.profile
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn state(&self) -> &ClassifierState {
        &self.state
    }

    pub fn can_commit(&self) -> bool {
        self.state.can_commit
    }

    /// Classify one event.
    ///
    /// Each rule block contributes its first matching rule. Afterwards the
    /// event becomes the new `last_event`, whether or not anything matched.
    pub fn process(&mut self, event: KeyEvent) -> ClassificationResult {
        log::trace!("key event {}", event);

        let is_repeat = self.state.is_repeat_of_last(&event);
        let mut result = ClassificationResult::new();

        for block in self.rules.blocks() {
            if let Some(rule) = first_match(block, &event, is_repeat) {
                if let Some(emission) = self.state.apply(rule, &event) {
                    log::debug!("{} -> {}", event, emission);
                    result.push(emission);
                }
            }
        }

        self.state.last_event = Some(event);
        result
    }

    /// Classify one event and write its emissions to `sink`.
    ///
    /// Returns the number of emissions written.
    pub fn process_into<S: IntentSink + ?Sized>(&mut self, event: KeyEvent, sink: &mut S) -> usize {
        let result = self.process(event);
        let count = result.len();
        for emission in result {
            sink.emit(emission);
        }
        count
    }

    /// Forget the previous event and any pending commit
    pub fn reset(&mut self) {
        log::debug!("classifier reset ({} profile)", self.profile);
        self.state = ClassifierState::default();
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::configure(PlatformProfile::default())
    }
}
