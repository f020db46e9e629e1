use crate::{
    stage::{CharMapper, Stage},
    testing::stage_contract::StageTestConfig,
    unicode::{halfwidth_to_fullwidth, is_halfwidth},
};
use std::borrow::Cow;

/// Converts half-width (narrow) ASCII to full-width (wide) forms.
///
/// - `A−Za−z` → `Ａ−Ｚａ−ｚ`
/// - `0−9` → `０−９`
/// - ASCII punctuation `!`..`~` → `！`..`～`
/// - ` ` (U+0020) → `　` (U+3000)
///
/// Control characters, DEL and every non-ASCII character (CJK ideographs,
/// kana, already full-width forms) pass through unchanged.
///
/// Pure 1:1 mapping: the output has exactly as many code points as the input.
#[derive(Debug, Default, Clone, Copy)]
pub struct ToFullWidth;

impl Stage for ToFullWidth {
    fn name(&self) -> &'static str {
        "to_fullwidth"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str) -> bool {
        // Every target is ASCII, so a byte scan is enough.
        text.bytes().any(|b| is_halfwidth(b as char))
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        if !self.needs_apply(&text) {
            return text;
        }
        // Each converted char grows from 1 to 3 bytes.
        let mut out = String::with_capacity(text.len() * 3);
        out.extend(text.chars().map(halfwidth_to_fullwidth));
        Cow::Owned(out)
    }
}

impl CharMapper for ToFullWidth {
    #[inline(always)]
    fn map(&self, c: char) -> Option<char> {
        Some(halfwidth_to_fullwidth(c))
    }
}

impl StageTestConfig for ToFullWidth {
    fn one_to_one() -> bool {
        true
    }

    fn samples() -> &'static [&'static str] {
        &["ABC 123!", "測試abc", "Hello　World", "ｆｕｌｌ", "tab\tstays", ""]
    }

    fn should_pass_through() -> &'static [&'static str] {
        &["測試", "ＡＢＣ１２３", "\t\n", "\u{7F}", "こんにちは", ""]
    }

    fn should_transform() -> &'static [(&'static str, &'static str)] {
        &[
            ("ABC 123!", "ＡＢＣ　１２３！"),
            ("測試abc", "測試ａｂｃ"),
            ("~{}", "～｛｝"),
            (" ", "　"),
            ("a\tb", "ａ\tｂ"),
        ]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_printable_ascii_range() {
        let ascii: String = (0x20u8..=0x7E).map(char::from).collect();
        let wide = ToFullWidth.apply(Cow::Borrowed(&ascii));
        let mut chars = wide.chars();
        assert_eq!(chars.next(), Some('\u{3000}'));
        for (expected, got) in (0xFF01u32..=0xFF5E).zip(chars) {
            assert_eq!(got as u32, expected);
        }
    }

    #[test]
    fn no_double_conversion() {
        let once = ToFullWidth.apply(Cow::Borrowed("x = 1;"));
        assert!(!ToFullWidth.needs_apply(&once));
        let twice = ToFullWidth.apply(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn apply_without_work_stays_borrowed() {
        let input = "全形";
        let out = ToFullWidth.apply(Cow::Borrowed(input));
        assert!(matches!(out, Cow::Borrowed(s) if s.as_ptr() == input.as_ptr()));
    }

    #[test]
    fn char_mapper_matches_apply() {
        let input = "Mix 混合 42!";
        let via_mapper = ToFullWidth.map_str(Cow::Borrowed(input));
        let via_apply = ToFullWidth.apply(Cow::Borrowed(input));
        assert_eq!(via_mapper, via_apply);
    }
}
