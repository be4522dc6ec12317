//! Output records produced by the extractors.
//!
//! All records are plain data: constructed fresh per extraction call,
//! serialized camelCase to match the shapes the portal's mobile clients
//! consume, and free of behavior beyond small conveniences. Raw upstream
//! text is kept verbatim (`date_str`, scores, counts); derived values
//! (`date`) always come from the same fixed-format parser so the two can
//! never diverge.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// The closed set of per-course content categories the portal serves.
///
/// Listing and detail extraction dispatch exhaustively over this enum;
/// there is no string-tag fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Announcement,
    Material,
    Assignment,
    Forum,
}

/// The consuming platform, threaded explicitly into bilingual name
/// selection together with the locale. Never read from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
}

/// A timestamp split into its literal digit substrings.
///
/// Fields keep exactly the captured digits (leading zeros included) from a
/// `YYYY-MM-DD HH:MM:SS` source string; no numeric coercion happens during
/// extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    pub year: String,
    pub month: String,
    pub day: String,
    pub hour: String,
    pub minute: String,
    pub second: String,
}

impl DateValue {
    /// Interpret the captured digits as a calendar timestamp.
    ///
    /// Returns `None` when the digits do not form a real date/time; useful
    /// for callers that sort or filter chronologically.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(
            self.year.parse().ok()?,
            self.month.parse().ok()?,
            self.day.parse().ok()?,
        )?;
        let time = NaiveTime::from_hms_opt(
            self.hour.parse().ok()?,
            self.minute.parse().ok()?,
            self.second.parse().ok()?,
        )?;
        Some(NaiveDateTime::new(date, time))
    }
}

/// One course from the portal menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
}

/// One row of an announcement/material/assignment listing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub id: String,
    pub title: String,
    pub date: DateValue,
    /// The untransformed upstream date text `date` was parsed from.
    pub date_str: String,
}

/// One row of a forum listing page. The portal renders no timestamp cell
/// for these, only a last-editor line and a reply counter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForumItem {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    /// Raw reply-counter text from the nested span, kept verbatim.
    pub count: String,
}

/// Result of listing-page dispatch: the two row shapes the portal serves.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItemList {
    Items(Vec<ListItem>),
    Threads(Vec<ForumItem>),
}

impl ItemList {
    pub fn len(&self) -> usize {
        match self {
            ItemList::Items(v) => v.len(),
            ItemList::Threads(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A downloadable file hanging off a detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Numeric id captured from the download link's href.
    pub id: String,
    pub name: String,
}

/// An enriched single item from a detail page or detail JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detail {
    /// Absent for announcements; their payload carries no title field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Raw HTML or text body, untransformed.
    pub content: String,
    pub date_str: String,
    pub date: DateValue,
    pub attachments: Vec<Attachment>,
}

/// One message within a forum thread.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: String,
    pub name: String,
    pub account: String,
    pub email: String,
    pub date: String,
    pub content: String,
}

/// A whole forum thread: the opening post plus replies, in upstream order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forum {
    pub id: String,
    pub title: String,
    /// Reply count: total posts minus the opening one.
    pub count: usize,
    pub posts: Vec<Post>,
}

/// The logged-in user's name and mail address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
}

/// A teacher or teaching-assistant contact, name prefixed with its role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
}

/// One grading item from the score table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    /// Grading item name with any parenthetical weight stripped.
    pub name: String,
    /// The parenthetical weight, empty when the header carries none.
    pub percent: String,
    /// Raw score cell text; not necessarily numeric.
    pub score: String,
}

/// One entry of the portal's latest-news block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Position of the entry within the block.
    pub id: usize,
    /// Numeric id captured from the source link.
    pub item_id: String,
    pub title: String,
    pub subtitle: String,
    pub date: DateValue,
    pub date_str: String,
    /// Numeric id captured from the destination link.
    pub course_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_date() -> DateValue {
        DateValue {
            year: "2017".to_string(),
            month: "03".to_string(),
            day: "05".to_string(),
            hour: "14".to_string(),
            minute: "30".to_string(),
            second: "00".to_string(),
        }
    }

    #[test]
    fn test_date_value_to_naive() {
        let naive = sample_date().to_naive().unwrap();
        assert_eq!(naive.to_string(), "2017-03-05 14:30:00");
    }

    #[test]
    fn test_date_value_to_naive_rejects_impossible_dates() {
        let mut date = sample_date();
        date.month = "13".to_string();
        assert!(date.to_naive().is_none());
    }

    #[test]
    fn test_list_item_serializes_camel_case() {
        let item = ListItem {
            id: "1".to_string(),
            title: "Week 1".to_string(),
            date: sample_date(),
            date_str: "2017-03-05 14:30:00".to_string(),
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"dateStr\""));
        assert!(!json.contains("date_str"));
    }

    #[test]
    fn test_item_list_serializes_as_plain_array() {
        let list = ItemList::Threads(vec![ForumItem {
            id: "1".to_string(),
            title: "Q&A".to_string(),
            subtitle: "最後編輯: someone".to_string(),
            count: "3".to_string(),
        }]);
        let json = serde_json::to_string(&list).unwrap();
        assert!(json.starts_with('['));
        assert_eq!(list.len(), 1);
        assert!(!list.is_empty());
    }

    #[test]
    fn test_detail_omits_absent_title() {
        let detail = Detail {
            title: None,
            content: "body".to_string(),
            date_str: "2017-03-05 14:30:00".to_string(),
            date: sample_date(),
            attachments: vec![],
        };
        let json = serde_json::to_string(&detail).unwrap();
        assert!(!json.contains("\"title\""));
    }
}
