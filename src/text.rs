//! Primitive string parsers shared by every extractor.
//!
//! Nothing here traverses a document: these are pure text-to-value
//! transforms for the two patterns the portal uses everywhere, plus the
//! cached-regex capture helper the structural extractors lean on.
//!
//! # Date format
//!
//! Timestamps appear as `YYYY-MM-DD HH:MM:SS` inside attribute values and
//! cell text. Pages that render minute precision get `:00` appended by the
//! extractor before the text reaches [`parse_date`].
//!
//! # Bilingual course names
//!
//! Course names embed an English segment and a Chinese remainder in one
//! string (e.g. `"Calculus I 微積分一"`). Which half wins depends on the
//! consuming platform and the active locale, both passed in explicitly.

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ExtractError, Result};
use crate::models::{DateValue, Platform};

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)-(\d+)-(\d+)\s+(\d+):(\d+):(\d+)").unwrap());

static ENGLISH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9().&\- ]+").unwrap());

/// Pull a [`DateValue`] out of the first `Y-M-D H:M:S` timestamp in `text`.
///
/// Captured components are kept as literal digit substrings; `"03"` stays
/// `"03"`. A string with no timestamp anywhere is
/// [`ExtractError::MalformedDate`].
pub fn parse_date(text: &str) -> Result<DateValue> {
    let caps = DATE_RE
        .captures(text)
        .ok_or_else(|| ExtractError::MalformedDate(text.to_string()))?;
    Ok(DateValue {
        year: caps[1].to_string(),
        month: caps[2].to_string(),
        day: caps[3].to_string(),
        hour: caps[4].to_string(),
        minute: caps[5].to_string(),
        second: caps[6].to_string(),
    })
}

/// Pick the display half of a bilingual course name.
///
/// Names shorter than 10 characters are returned unchanged; they are too
/// short to reliably carry both halves. Likewise a name with no English
/// segment at all. Otherwise iOS consumers and `zh*` locales get the
/// Chinese remainder (the name with every English run removed); everyone
/// else gets the English runs joined with a single space.
pub fn parse_course_name(name: &str, locale: &str, platform: Platform) -> String {
    if name.chars().count() < 10 {
        return name.to_string();
    }
    if !ENGLISH_RE.is_match(name) {
        return name.to_string();
    }
    if platform == Platform::Ios || locale.starts_with("zh") {
        return ENGLISH_RE.replace_all(name, "").into_owned();
    }
    ENGLISH_RE.find_iter(name).map(|m| m.as_str()).join(" ")
}

/// A compiled regex that remembers its source pattern for diagnostics.
///
/// Extractors capture ids out of hrefs with these; a capture the page shape
/// guarantees that fails is a [`ExtractError::PatternMismatch`] naming the
/// pattern, the input and the content-type context.
pub struct Pat {
    pattern: &'static str,
    re: Regex,
}

impl Pat {
    pub fn new(pattern: &'static str) -> Self {
        Pat {
            pattern,
            re: Regex::new(pattern).expect("hardcoded pattern"),
        }
    }

    /// First capture group, or a typed mismatch error.
    pub fn capture(&self, input: &str, context: &'static str) -> Result<String> {
        self.capture_opt(input)
            .ok_or_else(|| ExtractError::PatternMismatch {
                context,
                pattern: self.pattern,
                input: input.to_string(),
            })
    }

    /// First capture group when present; for genuinely optional matches.
    pub fn capture_opt(&self, input: &str) -> Option<String> {
        self.re
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.re.is_match(input)
    }

    /// Drop every match from `input`.
    pub fn strip(&self, input: &str) -> String {
        self.re.replace_all(input, "").into_owned()
    }
}
