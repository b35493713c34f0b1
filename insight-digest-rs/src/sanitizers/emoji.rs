//! Emoji denylist
//!
//! AI-generated insight text tends to decorate headings and bullets with a
//! small, recurring set of pictographs. Only the code points listed here are
//! removed; everything else (including other emoji) passes through.

use super::string::remove_chars_where;
use super::SanitizeResult;
use lazy_static::lazy_static;
use std::collections::HashSet;

/// Code points stripped from display text
pub const EMOJI_DENYLIST: &[char] = &[
    // Charts and analytics
    '\u{1F4CA}', // 📊
    '\u{1F4C8}', // 📈
    '\u{1F4C9}', // 📉
    '\u{1F4CC}', // 📌
    '\u{1F50D}', // 🔍
    '\u{1F4A1}', // 💡
    '\u{1F3AF}', // 🎯
    '\u{1F4B0}', // 💰
    '\u{1F4B8}', // 💸
    // Status markers
    '\u{2705}',  // ✅
    '\u{274C}',  // ❌
    '\u{26A0}',  // ⚠
    '\u{2757}',  // ❗
    '\u{1F525}', // 🔥
    '\u{1F680}', // 🚀
    '\u{2B50}',  // ⭐
    '\u{1F31F}', // 🌟
    '\u{2728}',  // ✨
    '\u{1F389}', // 🎉
    '\u{1F44D}', // 👍
    '\u{1F449}', // 👉
    // Social and travel
    '\u{1F4F1}', // 📱
    '\u{1F4AC}', // 💬
    '\u{1F465}', // 👥
    '\u{2708}',  // ✈
    '\u{1F3D6}', // 🏖
    '\u{1F30D}', // 🌍
    '\u{1F30E}', // 🌎
    '\u{1F30F}', // 🌏
    // Presentation modifiers left behind once the base emoji is removed
    '\u{FE0F}', // variation selector-16
    '\u{200D}', // zero width joiner
];

lazy_static! {
    static ref DEFAULT_DENYLIST: EmojiDenylist = EmojiDenylist::default();
}

/// Set of code points removed by [`strip_emoji_with`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiDenylist {
    chars: HashSet<char>,
}

impl Default for EmojiDenylist {
    fn default() -> Self {
        Self {
            chars: EMOJI_DENYLIST.iter().copied().collect(),
        }
    }
}

impl EmojiDenylist {
    /// An empty denylist
    pub fn empty() -> Self {
        Self {
            chars: HashSet::new(),
        }
    }

    /// Extend the list with additional code points
    pub fn with<I>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.chars.extend(extra);
        self
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Returns true if the code point is on the default denylist
pub fn is_denylisted_emoji(c: char) -> bool {
    DEFAULT_DENYLIST.contains(c)
}

/// Strip the default emoji denylist
pub fn strip_emoji(input: &str) -> SanitizeResult<String> {
    strip_emoji_with(input, &DEFAULT_DENYLIST)
}

/// Strip every code point in the given denylist
pub fn strip_emoji_with(input: &str, denylist: &EmojiDenylist) -> SanitizeResult<String> {
    remove_chars_where(input, |c| denylist.contains(c), "Removed emoji")
}
