// Keyintent Modifier Mask
// Bit flags carried in the modifier field of every raw key event

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Modifier bitmask of a raw key event.
///
/// Bits the classifier does not know about (NumLock, keypad flags, ...)
/// are kept as-is. Rules only ever test that their required bits are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierMask(u32);

impl ModifierMask {
    pub const NONE: ModifierMask = ModifierMask(0);
    pub const SHIFT: ModifierMask = ModifierMask(1 << 0);
    pub const CONTROL: ModifierMask = ModifierMask(1 << 1);
    pub const ALT: ModifierMask = ModifierMask(1 << 2);
    pub const META: ModifierMask = ModifierMask(1 << 3);
    pub const IS_LEFT: ModifierMask = ModifierMask(1 << 11);
    pub const IS_RIGHT: ModifierMask = ModifierMask(1 << 12);

    /// Wrap a raw bitmask
    pub const fn from_bits(bits: u32) -> Self {
        ModifierMask(bits)
    }

    /// Get the raw bitmask
    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Superset test: every bit of `required` is set in `self`.
    pub const fn contains(self, required: ModifierMask) -> bool {
        self.0 & required.0 == required.0
    }

    pub const fn union(self, other: ModifierMask) -> Self {
        ModifierMask(self.0 | other.0)
    }
}

impl From<u32> for ModifierMask {
    fn from(bits: u32) -> Self {
        ModifierMask(bits)
    }
}

impl From<ModifierMask> for u32 {
    fn from(mask: ModifierMask) -> Self {
        mask.0
    }
}

impl BitOr for ModifierMask {
    type Output = ModifierMask;

    fn bitor(self, rhs: ModifierMask) -> ModifierMask {
        self.union(rhs)
    }
}

impl BitOrAssign for ModifierMask {
    fn bitor_assign(&mut self, rhs: ModifierMask) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ModifierMask {
    type Output = ModifierMask;

    fn bitand(self, rhs: ModifierMask) -> ModifierMask {
        ModifierMask(self.0 & rhs.0)
    }
}

const NAMED_BITS: &[(ModifierMask, &str)] = &[
    (ModifierMask::SHIFT, "Shift"),
    (ModifierMask::CONTROL, "Control"),
    (ModifierMask::ALT, "Alt"),
    (ModifierMask::META, "Meta"),
    (ModifierMask::IS_LEFT, "IsLeft"),
    (ModifierMask::IS_RIGHT, "IsRight"),
];

impl fmt::Display for ModifierMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }

        let mut parts: Vec<String> = NAMED_BITS
            .iter()
            .filter(|(bit, _)| self.contains(*bit))
            .map(|(_, name)| name.to_string())
            .collect();

        let known = NAMED_BITS
            .iter()
            .fold(0u32, |acc, (bit, _)| acc | bit.bits());
        let unknown = self.0 & !known;
        if unknown != 0 {
            parts.push(format!("{:#x}", unknown));
        }

        write!(f, "{}", parts.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_values() {
        assert_eq!(ModifierMask::SHIFT.bits(), 1);
        assert_eq!(ModifierMask::CONTROL.bits(), 2);
        assert_eq!(ModifierMask::ALT.bits(), 4);
        assert_eq!(ModifierMask::META.bits(), 8);
        assert_eq!(ModifierMask::IS_LEFT.bits(), 2048);
        assert_eq!(ModifierMask::IS_RIGHT.bits(), 4096);
    }

    #[test]
    fn test_contains_is_superset() {
        let shift_ctrl = ModifierMask::SHIFT | ModifierMask::CONTROL;
        let held = shift_ctrl | ModifierMask::ALT | ModifierMask::from_bits(1 << 8);

        assert!(held.contains(ModifierMask::CONTROL));
        assert!(held.contains(shift_ctrl));
        assert!(!ModifierMask::CONTROL.contains(shift_ctrl));
        assert!(ModifierMask::NONE.contains(ModifierMask::NONE));
        assert!(held.contains(ModifierMask::NONE));
    }

    #[test]
    fn test_display() {
        assert_eq!(ModifierMask::NONE.to_string(), "none");
        assert_eq!(
            (ModifierMask::SHIFT | ModifierMask::META).to_string(),
            "Shift+Meta"
        );
        assert_eq!(
            (ModifierMask::CONTROL | ModifierMask::from_bits(1 << 9)).to_string(),
            "Control+0x200"
        );
    }
}
