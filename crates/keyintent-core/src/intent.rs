// Keyintent Intents
// Named semantic actions emitted to the consuming application

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// A consumer-facing semantic action.
///
/// The string form (`Display`, `FromStr`, serde) is the name consumers
/// subscribe to, e.g. `"select_by_index"`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Recover,
    New,
    Go,
    Back,
    Forward,
    Next,
    Prev,
    SelectByIndex,
    Toggle,
    Commit,
    Close,
    StackPin,
    FindInPage,
    Reload,
    Clear,
}

impl Intent {
    /// Navigation intents arm a deferred commit when emitted by a
    /// repeat-tolerant rule.
    pub fn is_navigation(self) -> bool {
        matches!(self, Intent::Next | Intent::Prev | Intent::SelectByIndex)
    }

    /// Get the subscription name
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// One emitted intent with its optional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Emission {
    pub intent: Intent,
    pub arg: Option<u32>,
}

impl Emission {
    /// A zero-argument emission
    pub fn new(intent: Intent) -> Self {
        Self { intent, arg: None }
    }

    /// An emission carrying one integer argument
    pub fn with_arg(intent: Intent, arg: u32) -> Self {
        Self {
            intent,
            arg: Some(arg),
        }
    }
}

impl From<Intent> for Emission {
    fn from(intent: Intent) -> Self {
        Emission::new(intent)
    }
}

impl fmt::Display for Emission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arg {
            Some(arg) => write!(f, "{} {}", self.intent, arg),
            None => write!(f, "{}", self.intent),
        }
    }
}
