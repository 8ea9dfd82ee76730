// src/core/levels.rs
//! Named skill bands as the site prints them. Band index == position here.

use crate::core::sanitize::{label_key, parse_int_cell};

pub const SKILL_LEVELS: [&str; 16] = [
    "atrocious",
    "dreadful",
    "poor",
    "ordinary",
    "average",
    "reasonable",
    "capable",
    "reliable",
    "accomplished",
    "expert",
    "outstanding",
    "spectacular",
    "exceptional",
    "world class",
    "elite",
    "legendary",
];

pub const N_BANDS: i32 = SKILL_LEVELS.len() as i32;

/// "world class" → 13. Case and spacing insensitive.
pub fn level_index(word: &str) -> Option<i32> {
    let key = label_key(word);
    SKILL_LEVELS
        .iter()
        .position(|lvl| label_key(lvl) == key)
        .map(|i| i as i32)
}

pub fn level_name(index: i32) -> Option<&'static str> {
    usize::try_from(index).ok().and_then(|i| SKILL_LEVELS.get(i).copied())
}

/// Archive cells carry either the band word or its index.
pub fn parse_band(cell: &str) -> Option<i32> {
    if let Some(n) = parse_int_cell(cell) {
        return i32::try_from(n).ok().filter(|b| (0..N_BANDS).contains(b));
    }
    level_index(cell)
}
