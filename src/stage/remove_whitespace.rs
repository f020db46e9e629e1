use crate::{
    stage::{CharMapper, Stage},
    testing::stage_contract::StageTestConfig,
    unicode::{is_ascii_whitespace_fast, is_strippable_whitespace},
};
use std::borrow::Cow;

/// Deletes every whitespace character.
///
/// The whitespace class is ASCII whitespace (`' '`, `\t`, `\n`, `\r`, `\x0B`,
/// `\x0C`) plus U+3000 IDEOGRAPHIC SPACE. Runs are removed entirely, not
/// collapsed to a single space. Other Unicode spaces such as NBSP are kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct RemoveWhitespace;

impl Stage for RemoveWhitespace {
    fn name(&self) -> &'static str {
        "remove_whitespace"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str) -> bool {
        if text.is_ascii() {
            return text.bytes().any(is_ascii_whitespace_fast);
        }
        text.chars().any(is_strippable_whitespace)
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        self.map_str(text)
    }
}

impl CharMapper for RemoveWhitespace {
    #[inline(always)]
    fn map(&self, c: char) -> Option<char> {
        (!is_strippable_whitespace(c)).then_some(c)
    }
}

impl StageTestConfig for RemoveWhitespace {
    fn samples() -> &'static [&'static str] {
        &[" a b\t\nc　d ", "   ", "\u{3000}\u{3000}", "no_ws", "a\u{00A0}b", ""]
    }

    fn should_pass_through() -> &'static [&'static str] {
        &["hello", "測試", "a\u{00A0}b", "zero\u{200B}width", ""]
    }

    fn should_transform() -> &'static [(&'static str, &'static str)] {
        &[
            (" a b\t\nc　d ", "abcd"),
            (" \t\r\n\x0B\x0C　", ""),
            ("こんにちは　世界", "こんにちは世界"),
            ("a  \n\n  b", "ab"),
        ]
    }
}
