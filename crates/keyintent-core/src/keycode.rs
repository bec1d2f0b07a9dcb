// Keyintent Key Codes
// Virtual key codes referenced by the shortcut rule table

use std::sync::OnceLock;

pub const TAB: u32 = 9;
pub const CONTROL: u32 = 17;
pub const CAPS_LOCK: u32 = 20;
pub const ESCAPE: u32 = 27;
pub const SPACE: u32 = 32;
pub const LEFT: u32 = 37;
pub const UP: u32 = 38;
pub const RIGHT: u32 = 39;
pub const DOWN: u32 = 40;
pub const DIGIT_0: u32 = 48;
pub const DIGIT_1: u32 = 49;
pub const DIGIT_9: u32 = 57;
pub const F: u32 = 70;
pub const H: u32 = 72;
pub const J: u32 = 74;
pub const K: u32 = 75;
pub const L: u32 = 76;
pub const P: u32 = 80;
pub const R: u32 = 82;
pub const T: u32 = 84;
pub const W: u32 = 87;
/// Left Command key on Mac keyboards
pub const META_LEFT: u32 = 91;
pub const OPEN_BRACKET: u32 = 219;
pub const CLOSE_BRACKET: u32 = 221;

/// Display name for a key code, if it has one
pub fn key_name(code: u32) -> Option<&'static str> {
    static KEY_NAMES: OnceLock<Vec<Option<&'static str>>> = OnceLock::new();
    let names = KEY_NAMES.get_or_init(|| {
        let mut names = vec![None; 256];
        names[8] = Some("BACKSPACE");
        names[TAB as usize] = Some("TAB");
        names[13] = Some("ENTER");
        names[16] = Some("SHIFT");
        names[CONTROL as usize] = Some("CONTROL");
        names[18] = Some("ALT");
        names[CAPS_LOCK as usize] = Some("CAPSLOCK");
        names[ESCAPE as usize] = Some("ESC");
        names[SPACE as usize] = Some("SPACE");
        names[LEFT as usize] = Some("LEFT");
        names[UP as usize] = Some("UP");
        names[RIGHT as usize] = Some("RIGHT");
        names[DOWN as usize] = Some("DOWN");
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        for (offset, name) in DIGITS.iter().enumerate() {
            names[DIGIT_0 as usize + offset] = Some(*name);
        }
        const LETTERS: [&str; 26] = [
            "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q",
            "R", "S", "T", "U", "V", "W", "X", "Y", "Z",
        ];
        for (offset, name) in LETTERS.iter().enumerate() {
            names[65 + offset] = Some(*name);
        }
        names[META_LEFT as usize] = Some("META");
        names[OPEN_BRACKET as usize] = Some("OPEN_BRACKET");
        names[CLOSE_BRACKET as usize] = Some("CLOSE_BRACKET");
        names
    });

    names.get(code as usize).copied().flatten()
}
