// Keyintent Core Library
// Classifies raw keyboard events into semantic shortcut intents

pub mod classifier;
pub mod dispatch;
pub mod event;
pub mod intent;
pub mod keycode;
pub mod modifier;
pub mod profile;
pub mod rule;
pub mod sink;

#[cfg(feature = "settings")]
pub mod settings;

pub use classifier::{ClassificationResult, Classifier, ClassifierState};
pub use dispatch::{Dispatcher, EventSource};
pub use event::{EventParseError, EventType, KeyEvent};
pub use intent::{Emission, Intent};
pub use modifier::ModifierMask;
pub use profile::{PlatformProfile, ProfileSelector};
pub use rule::{EventClass, KeyMatch, RepeatPolicy, RuleAction, RuleTable, ShortcutRule};
pub use sink::{FnSink, IntentSink};

#[cfg(feature = "settings")]
pub use settings::{Settings, SettingsError};
