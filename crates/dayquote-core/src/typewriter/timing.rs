//! Per-character typing delays and blink timing

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sentence and clause punctuation that earns a long pause
const PAUSE_PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '。', '，', '！', '？', '；', '：', '、', '…',
];

/// What kind of character was just revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Space,
    Punctuation,
    Letter,
    /// Digits, symbols, CJK ideographs...
    Other,
}

impl CharClass {
    pub fn of(c: char) -> Self {
        if c.is_whitespace() {
            CharClass::Space
        } else if PAUSE_PUNCTUATION.contains(&c) {
            CharClass::Punctuation
        } else if c.is_ascii_alphabetic() {
            CharClass::Letter
        } else {
            CharClass::Other
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub space_ms: u64,
    pub punctuation_ms: u64,
    /// ASCII letters: random in `[letter_min_ms, letter_max_ms)`
    pub letter_min_ms: u64,
    pub letter_max_ms: u64,
    /// Everything else: random in `[other_min_ms, other_max_ms)`
    pub other_min_ms: u64,
    pub other_max_ms: u64,
    /// Chance per revealed character of a short cursor flash
    pub flash_chance: f64,
    pub flash_ms: u64,
    pub blink_interval_ms: u64,
    /// Cursor toggles before the blink phase ends
    pub blink_toggles: u32,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            space_ms: 50,
            punctuation_ms: 200,
            letter_min_ms: 70,
            letter_max_ms: 100,
            other_min_ms: 90,
            other_max_ms: 130,
            flash_chance: 0.2,
            flash_ms: 80,
            blink_interval_ms: 500,
            blink_toggles: 120,
        }
    }
}

impl TypewriterConfig {
    /// Delay before the character after `c` is revealed
    pub fn delay_after(&self, c: char) -> Duration {
        let ms = match CharClass::of(c) {
            CharClass::Space => self.space_ms,
            CharClass::Punctuation => self.punctuation_ms,
            CharClass::Letter => jitter(self.letter_min_ms, self.letter_max_ms),
            CharClass::Other => jitter(self.other_min_ms, self.other_max_ms),
        };
        Duration::from_millis(ms)
    }

    pub fn roll_flash(&self) -> bool {
        self.flash_chance > 0.0 && rand::thread_rng().gen_bool(self.flash_chance.min(1.0))
    }

    pub fn flash(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms)
    }

    pub fn blink_time(&self) -> Duration {
        self.blink_interval() * self.blink_toggles
    }
}

fn jitter(min: u64, max: u64) -> u64 {
    if max <= min {
        return min;
    }
    rand::thread_rng().gen_range(min..max)
}
