use crate::{stage::Stage, testing::stage_contract::StageTestConfig};
use std::{borrow::Cow, sync::LazyLock};

use icu_normalizer::{ComposingNormalizer, ComposingNormalizerBorrowed};

// ── ICU4X ──
static ICU4X_NFKC: LazyLock<ComposingNormalizerBorrowed> =
    LazyLock::new(ComposingNormalizer::new_nfkc);

/// Unicode Normalization Form KC (Compatibility Composition)
///
/// Folds compatibility forms (full-width letters and punctuation, ligatures,
/// circled digits, ...) onto their canonical counterparts and recomposes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Nfkc;

pub const NFKC: Nfkc = Nfkc;

impl Nfkc {
    #[inline]
    pub fn is_normalized(&self, text: &str) -> bool {
        ICU4X_NFKC.is_normalized(text)
    }
}

impl Stage for Nfkc {
    fn name(&self) -> &'static str {
        "nfkc"
    }

    #[inline(always)]
    fn needs_apply(&self, text: &str) -> bool {
        !self.is_normalized(text)
    }

    #[inline(always)]
    fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        match text {
            Cow::Borrowed(s) => ICU4X_NFKC.normalize(s),
            Cow::Owned(s) => match ICU4X_NFKC.normalize(&s) {
                Cow::Borrowed(_) => Cow::Owned(s),
                Cow::Owned(normalized) => Cow::Owned(normalized),
            },
        }
    }
}

impl StageTestConfig for Nfkc {
    fn samples() -> &'static [&'static str] {
        &["café", "naïve", "e\u{0301}", "ﬁle", "①②③", "ＡＢＣ！", ""]
    }

    fn should_pass_through() -> &'static [&'static str] {
        &["hello", "world123", "測試", ""]
    }

    fn should_transform() -> &'static [(&'static str, &'static str)] {
        &[("ﬁ", "fi"), ("ＡＢＣ！", "ABC!"), ("e\u{0301}", "é"), ("①", "1")]
    }
}
