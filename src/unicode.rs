// Code-point classification shared by every stage.
// Everything here is a pure function over a single `char`; the only tables are
// ICU4X compiled data and the small ASCII lookup below.

use icu_properties::{
    CodePointMapData, CodePointMapDataBorrowed,
    props::{GeneralCategory, GeneralCategoryGroup},
};
use std::sync::LazyLock;

static GENERAL_CATEGORY: LazyLock<CodePointMapDataBorrowed<'static, GeneralCategory>> =
    LazyLock::new(CodePointMapData::<GeneralCategory>::new);

pub const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Distance between a printable ASCII code point and its Fullwidth Forms
/// counterpart (`'!'` U+0021 → `'！'` U+FF01).
pub const FULLWIDTH_OFFSET: u32 = 0xFF01 - 0x21;

// Fast ASCII whitespace check using lookup table.
static ASCII_WS_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b' ' as usize] = true;
    table[b'\t' as usize] = true;
    table[b'\n' as usize] = true;
    table[b'\r' as usize] = true;
    table[b'\x0B' as usize] = true; // Vertical tab
    table[b'\x0C' as usize] = true; // Form feed
    table
};

#[inline(always)]
pub fn is_ascii_whitespace_fast(b: u8) -> bool {
    ASCII_WS_TABLE[b as usize]
}

/// ASCII whitespace (including vertical tab) plus U+3000.
///
/// Other Unicode `White_Space` characters (NBSP, EM SPACE, ...) are *not*
/// part of this class and survive `RemoveWhitespace`.
#[inline(always)]
pub fn is_strippable_whitespace(c: char) -> bool {
    if c.is_ascii() {
        is_ascii_whitespace_fast(c as u8)
    } else {
        c == IDEOGRAPHIC_SPACE
    }
}

// Space plus printable ASCII 0x21..=0x7E. Control chars and DEL are excluded.
#[inline(always)]
pub fn is_halfwidth(c: char) -> bool {
    matches!(c as u32, 0x20..=0x7E)
}

#[inline(always)]
pub fn halfwidth_to_fullwidth(c: char) -> char {
    let cp = c as u32;
    if cp == 0x20 {
        IDEOGRAPHIC_SPACE
    } else if (0x21..=0x7E).contains(&cp) {
        char::from_u32(cp + FULLWIDTH_OFFSET).unwrap_or(c)
    } else {
        c
    }
}

// CJK Unified Ideographs, Extension A, Extension B.
#[inline(always)]
pub fn is_cjk_ideograph(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF   | // Unified
        0x3400..=0x4DBF   | // Ext A
        0x20000..=0x2A6DF   // Ext B
    )
}

#[inline]
pub fn general_category(c: char) -> GeneralCategory {
    GENERAL_CATEGORY.get(c)
}

#[inline]
pub fn is_letter_or_number(c: char) -> bool {
    let gc = general_category(c);
    GeneralCategoryGroup::Letter.contains(gc) || GeneralCategoryGroup::Number.contains(gc)
}

/// Retention rule applied by `RemoveSymbols` after NFKC.
///
/// The ideograph ranges are checked on their own even though the current
/// ICU data already reports them as `Lo`; the output must not depend on the
/// category table's Unicode version for those blocks.
#[inline]
pub fn is_symbol_filter_retained(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric();
    }
    is_cjk_ideograph(c) || is_letter_or_number(c)
}
