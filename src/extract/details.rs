//! Detail-page extractors for announcements, materials and assignments.
//!
//! Three input shapes:
//!
//! - **announcement**: a JSON payload whose `news.attach` field is itself
//!   an HTML fragment of download anchors;
//! - **material**: an HTML document with fixed selectors and a
//!   comma-separated poster line carrying the timestamp;
//! - **assignment**: an HTML document addressed by row position (rows 5-7
//!   of the page's `tr` sequence).
//!
//! All three pages render minute precision, so `:00` is appended before
//! the text reaches the date parser.

use once_cell::sync::Lazy;
use scraper::Html;
use serde::Deserialize;

use crate::error::{ExtractError, Result};
use crate::models::{Attachment, ContentType, Detail};
use crate::query::{self, Sel};
use crate::text::{Pat, parse_date};

use super::{A, TD, TR};

static DOC_TITLE: Lazy<Sel> = Lazy::new(|| Sel::new("#doc .title"));
static DOC_ARTICLE: Lazy<Sel> = Lazy::new(|| Sel::new("#doc .article"));
static POSTER: Lazy<Sel> = Lazy::new(|| Sel::new(".poster"));
static ATTACH_BLOCK: Lazy<Sel> = Lazy::new(|| Sel::new("div.attach div.block div"));
static CURR: Lazy<Sel> = Lazy::new(|| Sel::new("#main span.curr"));
static ATTACH_ID: Lazy<Pat> = Lazy::new(|| Pat::new(r"id=(\d+)"));

/// Extract a detail page/payload into the enriched record of its type.
///
/// Forum threads have no detail page (their payload is a post collection,
/// see [`super::parse_forum`]), so that arm is a typed refusal.
pub fn parse_item_detail(kind: ContentType, input: &str) -> Result<Detail> {
    match kind {
        ContentType::Announcement => parse_announcement_detail(input),
        ContentType::Material => parse_material_detail(input),
        ContentType::Assignment => parse_assignment_detail(input),
        ContentType::Forum => Err(ExtractError::ForumDetail),
    }
}

#[derive(Debug, Deserialize)]
struct AnnouncementPayload {
    news: AnnouncementBody,
}

#[derive(Debug, Deserialize)]
struct AnnouncementBody {
    note: String,
    #[serde(rename = "createTime")]
    create_time: String,
    attach: String,
}

/// Announcement detail: a JSON payload; no title field exists upstream.
pub fn parse_announcement_detail(json: &str) -> Result<Detail> {
    const CTX: &str = "announcement detail";
    let payload: AnnouncementPayload =
        serde_json::from_str(json).map_err(|source| ExtractError::Json {
            context: CTX,
            source,
        })?;

    let fragment = Html::parse_fragment(&payload.news.attach);
    let attachments = A
        .all(fragment.root_element())
        .into_iter()
        .map(|link| {
            let href = query::attr(link, "a", "href", CTX)?;
            Ok(Attachment {
                id: ATTACH_ID.capture(href, CTX)?,
                name: query::text(link),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let date = parse_date(&payload.news.create_time)?;
    Ok(Detail {
        title: None,
        content: payload.news.note,
        date_str: payload.news.create_time,
        date,
        attachments,
    })
}

/// Material detail: fixed selectors; the timestamp is the second
/// comma-separated segment of the poster line.
pub fn parse_material_detail(html: &str) -> Result<Detail> {
    const CTX: &str = "material detail";
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let title = query::text(DOC_TITLE.one(root, CTX)?);
    let poster = query::text(POSTER.one(root, CTX)?);
    let stamp = poster
        .split(", ")
        .nth(1)
        .ok_or_else(|| ExtractError::PatternMismatch {
            context: CTX,
            pattern: "\", \"-separated poster line",
            input: poster.clone(),
        })?;
    let date_str = format!("{stamp}:00");
    let content = query::text(DOC_ARTICLE.one(root, CTX)?);

    let attachments = ATTACH_BLOCK
        .all(root)
        .into_iter()
        .map(|block| {
            let links = A.all(block);
            let link = query::nth(&links, 1, "a", CTX)?;
            let href = query::attr(link, "a[1]", "href", CTX)?;
            Ok(Attachment {
                id: ATTACH_ID.capture(href, CTX)?,
                name: query::attr(link, "a[1]", "title", CTX)?.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Detail {
        title: Some(title),
        content,
        date: parse_date(&date_str)?,
        date_str,
        attachments,
    })
}

/// Assignment detail: due date in row 5, body in row 6, attachments in
/// row 7; cell index 1 in each.
pub fn parse_assignment_detail(html: &str) -> Result<Detail> {
    const CTX: &str = "assignment detail";
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let title = query::text(CURR.one(root, CTX)?);
    let rows = TR.all(root);

    let due_cells = TD.all(query::nth(&rows, 5, "tr", CTX)?);
    let date_str = format!("{}:00", query::text(query::nth(&due_cells, 1, "tr[5] td", CTX)?));

    let body_cells = TD.all(query::nth(&rows, 6, "tr", CTX)?);
    let content = query::text(query::nth(&body_cells, 1, "tr[6] td", CTX)?);

    let attachments = A
        .all(query::nth(&rows, 7, "tr", CTX)?)
        .into_iter()
        .map(|link| {
            let href = query::attr(link, "tr[7] a", "href", CTX)?;
            Ok(Attachment {
                id: ATTACH_ID.capture(href, CTX)?,
                name: query::text(link),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Detail {
        title: Some(title),
        content,
        date: parse_date(&date_str)?,
        date_str,
        attachments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANNOUNCEMENT_JSON: &str = r#"{
  "news": {
    "note": "<p>Midterm moved to room 201.</p>",
    "createTime": "2017-03-05 14:30:00",
    "attach": "<a href=\"/sys/read_attach.php?id=482&type=pdf\">syllabus.pdf</a><a href=\"/sys/read_attach.php?id=483\">rooms.xls</a>"
  }
}"#;

    const MATERIAL_PAGE: &str = r#"
<div id="doc">
  <div class="title">Week 1 slides</div>
  <div class="poster">王小明, 2017-02-20 10:00</div>
  <div class="article">Read before class.</div>
</div>
<div class="attach">
  <div class="block">
    <div>
      <a href="/sys/read_attach.php?id=91"><img src="i.png"></a>
      <a href="/sys/read_attach.php?id=91" title="week1.pdf">week1.pdf (2MB)</a>
    </div>
  </div>
</div>"#;

    const ASSIGNMENT_PAGE: &str = r#"
<div id="main"><span class="curr">HW1</span></div>
<table>
  <tr><td>k</td><td>v</td></tr>
  <tr><td>k</td><td>v</td></tr>
  <tr><td>k</td><td>v</td></tr>
  <tr><td>k</td><td>v</td></tr>
  <tr><td>k</td><td>v</td></tr>
  <tr><td>期限</td><td>2017-03-10 23:59</td></tr>
  <tr><td>說明</td><td>Implement a shell.</td></tr>
  <tr><td>附件</td><td><a href="/sys/read_attach.php?id=12">spec.pdf</a></td></tr>
</table>"#;

    #[test]
    fn test_announcement_detail_has_no_title() {
        let detail = parse_announcement_detail(ANNOUNCEMENT_JSON).unwrap();
        assert_eq!(detail.title, None);
        assert_eq!(detail.content, "<p>Midterm moved to room 201.</p>");
        assert_eq!(detail.date_str, "2017-03-05 14:30:00");
        assert_eq!(detail.date.year, "2017");
    }

    #[test]
    fn test_announcement_attachments_from_fragment() {
        let detail = parse_announcement_detail(ANNOUNCEMENT_JSON).unwrap();
        assert_eq!(detail.attachments.len(), 2);
        assert_eq!(detail.attachments[0].id, "482");
        assert_eq!(detail.attachments[0].name, "syllabus.pdf");
        assert_eq!(detail.attachments[1].id, "483");
    }

    #[test]
    fn test_announcement_attachment_without_id_is_typed() {
        let json = ANNOUNCEMENT_JSON.replace("id=482&type=pdf", "type=pdf");
        let err = parse_announcement_detail(&json).unwrap_err();
        assert!(matches!(err, ExtractError::PatternMismatch { .. }));
    }

    #[test]
    fn test_announcement_detail_rejects_bad_json() {
        let err = parse_announcement_detail("<html>not json</html>").unwrap_err();
        assert!(matches!(err, ExtractError::Json { .. }));
    }

    #[test]
    fn test_material_detail() {
        let detail = parse_material_detail(MATERIAL_PAGE).unwrap();
        assert_eq!(detail.title.as_deref(), Some("Week 1 slides"));
        assert_eq!(detail.content, "Read before class.");
        assert_eq!(detail.date_str, "2017-02-20 10:00:00");
        assert_eq!(detail.date.second, "00");
        assert_eq!(detail.attachments.len(), 1);
        assert_eq!(detail.attachments[0].id, "91");
        assert_eq!(detail.attachments[0].name, "week1.pdf");
    }

    #[test]
    fn test_material_detail_requires_comma_split_poster() {
        let page = MATERIAL_PAGE.replace("王小明, 2017-02-20 10:00", "王小明");
        let err = parse_material_detail(&page).unwrap_err();
        assert!(matches!(err, ExtractError::PatternMismatch { .. }));
    }

    #[test]
    fn test_assignment_detail_reads_fixed_rows() {
        let detail = parse_assignment_detail(ASSIGNMENT_PAGE).unwrap();
        assert_eq!(detail.title.as_deref(), Some("HW1"));
        assert_eq!(detail.content, "Implement a shell.");
        assert_eq!(detail.date_str, "2017-03-10 23:59:00");
        assert_eq!(detail.attachments.len(), 1);
        assert_eq!(detail.attachments[0].id, "12");
        assert_eq!(detail.attachments[0].name, "spec.pdf");
    }

    #[test]
    fn test_assignment_detail_missing_rows_is_typed() {
        let err = parse_assignment_detail(
            "<div id=\"main\"><span class=\"curr\">HW1</span></div><table><tr><td>only</td></tr></table>",
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::MissingElement { .. }));
    }

    #[test]
    fn test_forum_detail_is_refused() {
        let err = parse_item_detail(ContentType::Forum, "{}").unwrap_err();
        assert!(matches!(err, ExtractError::ForumDetail));
    }

    #[test]
    fn test_detail_dispatch() {
        assert!(parse_item_detail(ContentType::Announcement, ANNOUNCEMENT_JSON).is_ok());
        assert!(parse_item_detail(ContentType::Material, MATERIAL_PAGE).is_ok());
        assert!(parse_item_detail(ContentType::Assignment, ASSIGNMENT_PAGE).is_ok());
    }
}
