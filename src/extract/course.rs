//! Course menu and page-title extraction.

use once_cell::sync::Lazy;
use scraper::Html;
use tracing::debug;

use crate::error::Result;
use crate::models::{Course, Platform};
use crate::query::{self, Sel};
use crate::text::{Pat, parse_course_name};

static MENU_LINK: Lazy<Sel> = Lazy::new(|| Sel::new(".mnuItem a"));
static TITLE: Lazy<Sel> = Lazy::new(|| Sel::new("title"));
static COURSE_HREF: Lazy<Pat> = Lazy::new(|| Pat::new(r"^/course/(\d+)$"));

/// Trailing site name the portal appends to every page title.
const SITE_TITLE_SUFFIX: &str = " - 國立清華大學 iLMS數位學習平台";

/// Extract the course menu from the portal home page.
///
/// Menu anchors that do not point at a course home (`/course/{id}`) are
/// navigation chrome and are filtered out, not errors.
pub fn parse_course_list(html: &str, locale: &str, platform: Platform) -> Result<Vec<Course>> {
    let doc = Html::parse_document(html);
    let links = MENU_LINK.all(doc.root_element());
    let courses: Vec<Course> = links
        .into_iter()
        .filter_map(|link| {
            let href = link.value().attr("href")?;
            let id = COURSE_HREF.capture_opt(href)?;
            Some(Course {
                id,
                name: parse_course_name(&query::text(link), locale, platform),
            })
        })
        .collect();
    debug!(count = courses.len(), "Courses in menu");
    Ok(courses)
}

/// Extract a course's display name from its page `<title>`.
pub fn parse_course_name_title(html: &str, locale: &str, platform: Platform) -> Result<String> {
    const CTX: &str = "course title";
    let doc = Html::parse_document(html);
    let title = TITLE.one(doc.root_element(), CTX)?;
    let name = query::text(title).replace(SITE_TITLE_SUFFIX, "");
    Ok(parse_course_name(&name, locale, platform))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME_PAGE: &str = r#"
<div class="mnuItem"><a href="/home">首頁</a></div>
<div class="mnuItem"><a href="/course/74">Operating Systems 作業系統</a></div>
<div class="mnuItem"><a href="/course/129">微積分一</a></div>
<div class="mnuItem"><a href="/course/entry/74">進入</a></div>"#;

    #[test]
    fn test_course_list_filters_and_captures_ids() {
        let courses = parse_course_list(HOME_PAGE, "zh-TW", Platform::Android).unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].id, "74");
        assert_eq!(courses[0].name, "作業系統");
        assert_eq!(courses[1].id, "129");
        assert_eq!(courses[1].name, "微積分一");
    }

    #[test]
    fn test_course_list_keeps_english_for_other_locales() {
        let courses = parse_course_list(HOME_PAGE, "en-US", Platform::Android).unwrap();
        assert_eq!(courses[0].name, "Operating Systems ");
    }

    #[test]
    fn test_course_title_strips_site_suffix() {
        let page =
            "<title>Operating Systems 作業系統 - 國立清華大學 iLMS數位學習平台</title>";
        let name = parse_course_name_title(page, "zh-TW", Platform::Android).unwrap();
        assert_eq!(name, "作業系統");
    }

    #[test]
    fn test_course_title_missing_is_typed() {
        assert!(parse_course_name_title("<body></body>", "zh-TW", Platform::Android).is_err());
    }
}
