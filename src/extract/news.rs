//! Portal latest-news block.
//!
//! The portal home page stacks several `.BlockR` panels under `#right`;
//! the second one is the cross-course news feed. Each `.BlockItem` inside
//! it carries two anchors: the first links the source event (its href
//! embeds the item id in parentheses), the second links the course page
//! (its href embeds the course id). The date hint renders day precision
//! only, so midnight is appended before parsing.

use once_cell::sync::Lazy;
use scraper::Html;
use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::models::{NewsItem, Platform};
use crate::query::{self, Sel};
use crate::text::{Pat, parse_course_name, parse_date};

use super::A;

static BLOCK: Lazy<Sel> = Lazy::new(|| Sel::new("#right div.BlockR"));
static ITEM: Lazy<Sel> = Lazy::new(|| Sel::new(".BlockItem"));
static HINT: Lazy<Sel> = Lazy::new(|| Sel::new(".hint"));
static ITEM_ID: Lazy<Pat> = Lazy::new(|| Pat::new(r"\((\d+)\)"));
static COURSE_ID: Lazy<Pat> = Lazy::new(|| Pat::new(r"ID=(\d+)"));

/// Extract the home page's news feed, newest first as rendered.
pub fn parse_latest_news(html: &str, locale: &str, platform: Platform) -> Result<Vec<NewsItem>> {
    const CTX: &str = "latest news";
    let doc = Html::parse_document(html);
    let blocks = BLOCK.all(doc.root_element());
    let block = blocks
        .get(1)
        .copied()
        .ok_or_else(|| ExtractError::MissingElement {
            context: CTX,
            selector: format!("{}[1]", BLOCK.css()),
        })?;

    let items = ITEM.all(block);
    debug!(count = items.len(), "Latest-news entries found");
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let links = A.all(item);
            let source = query::nth(&links, 0, "a", CTX)?;
            let dest = query::nth(&links, 1, "a", CTX)?;
            let hint = HINT.one(item, CTX)?;
            let date_str = format!("{} 00:00:00", query::attr(hint, ".hint", "title", CTX)?);
            Ok(NewsItem {
                id: i,
                item_id: ITEM_ID.capture(query::attr(source, "a[0]", "href", CTX)?, CTX)?,
                title: parse_course_name(&query::text(dest), locale, platform),
                subtitle: query::text(source),
                date: parse_date(&date_str)?,
                date_str,
                course_id: COURSE_ID.capture(query::attr(dest, "a[1]", "href", CTX)?, CTX)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;

    const HOME_PAGE: &str = r#"
<div id="right">
  <div class="BlockR"><div class="BlockItem">unrelated panel</div></div>
  <div class="BlockR">
    <div class="BlockItem">
      <a href="javascript:viewNews(5566)">公告</a>
      <a href="/course.php?ID=42&f=news">Operating Systems 作業系統</a>
      <span class="hint" title="2017-03-05">3天前</span>
    </div>
    <div class="BlockItem">
      <a href="javascript:viewDoc(7788)">教材</a>
      <a href="/course.php?ID=17&f=doc">微積分一</a>
      <span class="hint" title="2017-03-06">2天前</span>
    </div>
  </div>
</div>"#;

    #[test]
    fn test_latest_news_reads_second_block() {
        let items = parse_latest_news(HOME_PAGE, "zh-TW", Platform::Android).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 0);
        assert_eq!(items[0].item_id, "5566");
        assert_eq!(items[0].course_id, "42");
        assert_eq!(items[0].subtitle, "公告");
        assert_eq!(items[0].date_str, "2017-03-05 00:00:00");
        assert_eq!(items[0].date.hour, "00");
        assert_eq!(items[1].id, 1);
        assert_eq!(items[1].item_id, "7788");
        assert_eq!(items[1].course_id, "17");
    }

    #[test]
    fn test_latest_news_applies_name_heuristic() {
        let zh = parse_latest_news(HOME_PAGE, "zh-TW", Platform::Android).unwrap();
        assert_eq!(zh[0].title, "作業系統");
        let en = parse_latest_news(HOME_PAGE, "en-US", Platform::Android).unwrap();
        assert_eq!(en[0].title, "Operating Systems ");
        // Short names pass through untouched whatever the locale.
        assert_eq!(zh[1].title, "微積分一");
    }

    #[test]
    fn test_latest_news_requires_second_block() {
        let err = parse_latest_news(
            "<div id=\"right\"><div class=\"BlockR\"></div></div>",
            "zh-TW",
            Platform::Android,
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::MissingElement { .. }));
    }

    #[test]
    fn test_latest_news_rejects_source_link_without_id() {
        let page = HOME_PAGE.replace("javascript:viewNews(5566)", "javascript:viewNews()");
        let err = parse_latest_news(&page, "zh-TW", Platform::Android).unwrap_err();
        assert!(matches!(err, ExtractError::PatternMismatch { .. }));
    }
}
