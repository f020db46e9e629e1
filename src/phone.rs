//! Mobile number format check and registration availability.

use phf::phf_set;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// `09` followed by eight digits, nothing else.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^09\d{8}$").expect("phone pattern is a valid regex"));

const PREFIX_LEN: usize = 4;

/// Prefixes that may not be registered.
static BANNED_PREFIXES: phf::Set<&'static str> = phf_set! {
    "0911",
};

pub fn is_valid_phone_number(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

/// Outcome of [`check_availability`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Banned,
    InvalidFormat,
}

impl Availability {
    pub fn is_available(self) -> bool {
        matches!(self, Availability::Available)
    }

    /// User-facing message, as shown on the registration form.
    pub fn message(self) -> &'static str {
        match self {
            Availability::Available => "號碼可用",
            Availability::Banned => "此號碼已被禁止註冊",
            Availability::InvalidFormat => "格式錯誤",
        }
    }
}

pub fn check_availability(phone: &str) -> Availability {
    if !is_valid_phone_number(phone) {
        return Availability::InvalidFormat;
    }
    // A valid number may still hold non-ASCII digits, so slice on a char boundary.
    let prefix = phone
        .char_indices()
        .nth(PREFIX_LEN)
        .map_or(phone, |(idx, _)| &phone[..idx]);
    if BANNED_PREFIXES.contains(prefix) {
        Availability::Banned
    } else {
        Availability::Available
    }
}
