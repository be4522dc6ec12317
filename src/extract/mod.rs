//! Extractors: one per page shape the portal serves.
//!
//! Each extractor is a deterministic pure function from a raw HTML or JSON
//! string to plain records, with no I/O and no state between calls, so
//! callers may parallelize freely across documents.
//!
//! | Page | Module | Input | Notes |
//! |------|--------|-------|-------|
//! | Content listings | [`lists`] | HTML | Row parity / header drop per content type |
//! | Content details | [`details`] | HTML or JSON | Announcement details arrive as JSON |
//! | Portal news block | [`news`] | HTML | Second `.BlockR` under `#right` |
//! | Course menu / title | [`course`] | HTML | Bilingual name heuristic applied |
//! | Forum threads | [`forum`] | JSON | Post payload, opening post first |
//! | Score table | [`score`] | HTML | `None` when grades are closed |
//! | Profile / contacts | [`people`] | HTML | Positional name/mail pairing |
//!
//! Listing pages signal an empty result set with a literal marker in the
//! `#main` block; that short-circuits to an empty sequence before any row
//! is touched, so header-only tables never look malformed.

pub mod course;
pub mod details;
pub mod forum;
pub mod lists;
pub mod news;
pub mod people;
pub mod score;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html};

use crate::error::Result;
use crate::query::{self, Sel};

pub use course::{parse_course_list, parse_course_name_title};
pub use details::parse_item_detail;
pub use forum::parse_forum;
pub use lists::parse_item_list;
pub use news::parse_latest_news;
pub use people::{parse_email_list, parse_profile};
pub use score::parse_score;

/// Literal body text marking an empty listing.
pub const NO_DATA_MARKER: &str = "目前尚無資料";

/// Literal body text marking a closed score page.
pub const SCORES_CLOSED_MARKER: &str = "不開放";

pub(crate) static MAIN: Lazy<Sel> = Lazy::new(|| Sel::new("#main"));
pub(crate) static TR: Lazy<Sel> = Lazy::new(|| Sel::new("tr"));
pub(crate) static TD: Lazy<Sel> = Lazy::new(|| Sel::new("td"));
pub(crate) static A: Lazy<Sel> = Lazy::new(|| Sel::new("a"));

/// The `#main` content block every course page hangs its table under.
pub(crate) fn main_block<'a>(doc: &'a Html, context: &'static str) -> Result<ElementRef<'a>> {
    MAIN.one(doc.root_element(), context)
}

/// True when the block's full text carries `marker`.
pub(crate) fn has_marker(block: ElementRef<'_>, marker: &str) -> bool {
    query::text(block).contains(marker)
}
