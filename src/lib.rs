//! # ilms_extract
//!
//! Extraction core for the NTHU iLMS learning platform: the portal has no
//! public API, so this crate turns its server-rendered HTML pages and ajax
//! JSON blobs into typed records — courses, announcements, materials,
//! assignments, forum threads, grades, contacts and portal news.
//!
//! ## Shape
//!
//! Every extractor is a deterministic pure function from one raw document
//! string to one record or sequence. There is no I/O and no state between
//! calls; callers may run extractions in parallel freely. How the strings
//! are fetched and where the records go is the caller's business — the
//! bundled CLI ([`api`] + `main`) is one such caller.
//!
//! ## Failure model
//!
//! Pages signal "nothing here" with a literal marker; that is an empty
//! result. Anything else a well-formed page guarantees — a selector, an
//! attribute, a numeric id inside an href — is a typed
//! [`ExtractError`](error::ExtractError) when absent, carrying the selector
//! or pattern plus content-type context. No partial records are ever
//! synthesized; an error here usually means the portal changed its markup.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod query;
pub mod text;

pub use error::{ExtractError, Result};
pub use extract::{
    parse_course_list, parse_course_name_title, parse_email_list, parse_forum, parse_item_detail,
    parse_item_list, parse_latest_news, parse_profile, parse_score,
};
pub use models::{
    Attachment, ContentType, Contact, Course, DateValue, Detail, Forum, ForumItem, ItemList,
    ListItem, NewsItem, Platform, Post, Profile, ScoreComponent,
};
pub use text::{parse_course_name, parse_date};
