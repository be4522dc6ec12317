//! Listing-page extractors for the four per-course content types.
//!
//! The portal renders all four listings as a table under `#main`, but with
//! two different row layouts:
//!
//! - **two rows per record** (announcement, forum): a data row followed by
//!   a spacer row, so only odd-indexed rows (0-indexed) carry records;
//! - **one row per record** (material, assignment): a single header row
//!   followed by data rows, so exactly the first row is dropped.
//!
//! Within a surviving row, cells are read by fixed position; the upstream
//! timestamp sits in the `title` attribute of a marker element at the
//! start of a per-type cell index (3 for announcements, 5 for materials,
//! 4 for assignments). Result order is document order; it encodes the
//! portal's chronological/submission ordering.

use once_cell::sync::Lazy;
use scraper::Html;
use tracing::debug;

use crate::error::Result;
use crate::models::{ContentType, ForumItem, ItemList, ListItem};
use crate::query::{self, Sel};
use crate::text::{Pat, parse_date};

use super::{NO_DATA_MARKER, TD, TR, has_marker, main_block};

static SPAN: Lazy<Sel> = Lazy::new(|| Sel::new("span"));
static ASSIGNMENT_ID: Lazy<Pat> = Lazy::new(|| Pat::new(r"hw=(\d+)"));

/// Prefix for the forum listing's last-editor subtitle.
const LAST_EDITED_PREFIX: &str = "最後編輯: ";

/// Extract a listing page into the record shape of its content type.
pub fn parse_item_list(kind: ContentType, html: &str) -> Result<ItemList> {
    match kind {
        ContentType::Announcement => parse_announcement_list(html).map(ItemList::Items),
        ContentType::Material => parse_material_list(html).map(ItemList::Items),
        ContentType::Assignment => parse_assignment_list(html).map(ItemList::Items),
        ContentType::Forum => parse_forum_list(html).map(ItemList::Threads),
    }
}

/// Announcement listing: odd rows, timestamp marker in cell 3.
pub fn parse_announcement_list(html: &str) -> Result<Vec<ListItem>> {
    const CTX: &str = "announcement list";
    let doc = Html::parse_document(html);
    let main = main_block(&doc, CTX)?;
    if has_marker(main, NO_DATA_MARKER) {
        debug!(context = CTX, "No-data marker present, empty listing");
        return Ok(Vec::new());
    }
    let rows = TR.all(main);
    rows.iter()
        .enumerate()
        .filter(|(i, _)| i % 2 == 1)
        .map(|(_, row)| {
            let cells = TD.all(*row);
            let marker = query::first_child(query::nth(&cells, 3, "td", CTX)?, "td[3]", CTX)?;
            let date_str = query::attr(marker, "td[3] > :first-child", "title", CTX)?.to_string();
            Ok(ListItem {
                id: query::text(query::nth(&cells, 0, "td", CTX)?),
                title: query::text(query::nth(&cells, 1, "td", CTX)?),
                date: parse_date(&date_str)?,
                date_str,
            })
        })
        .collect()
}

/// Material listing: header row dropped, trimmed titles, timestamp in cell 5.
pub fn parse_material_list(html: &str) -> Result<Vec<ListItem>> {
    const CTX: &str = "material list";
    let doc = Html::parse_document(html);
    let main = main_block(&doc, CTX)?;
    if has_marker(main, NO_DATA_MARKER) {
        debug!(context = CTX, "No-data marker present, empty listing");
        return Ok(Vec::new());
    }
    let rows = TR.all(main);
    rows.iter()
        .skip(1)
        .map(|row| {
            let cells = TD.all(*row);
            let marker = query::first_child(query::nth(&cells, 5, "td", CTX)?, "td[5]", CTX)?;
            let date_str = query::attr(marker, "td[5] > :first-child", "title", CTX)?.to_string();
            Ok(ListItem {
                id: query::text(query::nth(&cells, 0, "td", CTX)?),
                title: query::text(query::nth(&cells, 1, "td", CTX)?).trim().to_string(),
                date: parse_date(&date_str)?,
                date_str,
            })
        })
        .collect()
}

/// Assignment listing: header row dropped, id captured from the title
/// link's `hw=` query parameter, timestamp in cell 4.
pub fn parse_assignment_list(html: &str) -> Result<Vec<ListItem>> {
    const CTX: &str = "assignment list";
    let doc = Html::parse_document(html);
    let main = main_block(&doc, CTX)?;
    if has_marker(main, NO_DATA_MARKER) {
        debug!(context = CTX, "No-data marker present, empty listing");
        return Ok(Vec::new());
    }
    let rows = TR.all(main);
    rows.iter()
        .skip(1)
        .map(|row| {
            let cells = TD.all(*row);
            let title_cell = query::nth(&cells, 1, "td", CTX)?;
            let link = query::first_child(title_cell, "td[1]", CTX)?;
            let href = query::attr(link, "td[1] > :first-child", "href", CTX)?;
            let marker = query::first_child(query::nth(&cells, 4, "td", CTX)?, "td[4]", CTX)?;
            let date_str = query::attr(marker, "td[4] > :first-child", "title", CTX)?.to_string();
            Ok(ListItem {
                id: ASSIGNMENT_ID.capture(href, CTX)?,
                title: query::text(title_cell).trim().to_string(),
                date: parse_date(&date_str)?,
                date_str,
            })
        })
        .collect()
}

/// Forum listing: odd rows, reply counter from the nested span, subtitle
/// built from the trimmed last-editor cell.
pub fn parse_forum_list(html: &str) -> Result<Vec<ForumItem>> {
    const CTX: &str = "forum list";
    let doc = Html::parse_document(html);
    let main = main_block(&doc, CTX)?;
    if has_marker(main, NO_DATA_MARKER) {
        debug!(context = CTX, "No-data marker present, empty listing");
        return Ok(Vec::new());
    }
    let rows = TR.all(main);
    rows.iter()
        .enumerate()
        .filter(|(i, _)| i % 2 == 1)
        .map(|(_, row)| {
            let cells = TD.all(*row);
            let counter = SPAN.one(query::nth(&cells, 2, "td", CTX)?, CTX)?;
            let last_edit = query::text(query::nth(&cells, 3, "td", CTX)?);
            Ok(ForumItem {
                id: query::text(query::nth(&cells, 0, "td", CTX)?),
                title: query::text(query::nth(&cells, 1, "td", CTX)?),
                subtitle: format!("{LAST_EDITED_PREFIX}{}", last_edit.trim()),
                count: query::text(counter),
            })
        })
        .collect()
}
