// Keyintent Platform Profile
// Selects which modifier bit acts as the primary shortcut modifier

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::keycode;
use crate::ModifierMask;

/// Platform profile chosen once at startup.
///
/// On `Mac` the primary modifier is Meta (Command) and its own key is 91.
/// Everywhere else it is Control with key code 17.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PlatformProfile {
    #[default]
    Default,
    #[strum(to_string = "mac", serialize = "macos", serialize = "darwin")]
    #[serde(alias = "macos", alias = "darwin")]
    Mac,
}

impl PlatformProfile {
    /// Profile matching the platform this binary was built for
    pub fn host() -> Self {
        if cfg!(target_os = "macos") {
            PlatformProfile::Mac
        } else {
            PlatformProfile::Default
        }
    }

    /// The modifier bit treated as PrimaryMod
    pub fn primary_mod(self) -> ModifierMask {
        match self {
            PlatformProfile::Default => ModifierMask::CONTROL,
            PlatformProfile::Mac => ModifierMask::META,
        }
    }

    /// Key code of the primary modifier's own key
    pub fn primary_key(self) -> u32 {
        match self {
            PlatformProfile::Default => keycode::CONTROL,
            PlatformProfile::Mac => keycode::META_LEFT,
        }
    }

    /// Shift plus the primary modifier
    pub fn shift_primary_mod(self) -> ModifierMask {
        ModifierMask::SHIFT | self.primary_mod()
    }

    /// Whether this profile carries the Mac-only bracket-key rules
    pub fn is_mac_style(self) -> bool {
        self.primary_mod() == ModifierMask::META
    }
}

/// How the profile is picked: pinned, or resolved from the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileSelector {
    #[default]
    Auto,
    Fixed(PlatformProfile),
}

impl ProfileSelector {
    pub fn resolve(self) -> PlatformProfile {
        match self {
            ProfileSelector::Auto => PlatformProfile::host(),
            ProfileSelector::Fixed(profile) => profile,
        }
    }
}

impl FromStr for ProfileSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(ProfileSelector::Auto);
        }
        PlatformProfile::from_str(s.trim())
            .map(ProfileSelector::Fixed)
            .map_err(|_| format!("Unknown platform profile: {}", s))
    }
}
