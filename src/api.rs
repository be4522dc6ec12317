//! Endpoint map and fetch helper for the iLMS web portal.
//!
//! The portal has no API: every endpoint here serves a server-rendered
//! HTML page or a small ajax JSON blob, and the extractors consume the
//! response bodies unmodified. Listing pages hang off `course.php` with an
//! `f=` tag per content type; course homes use the short `/course/{id}`
//! form. Login, sessions and form posting are deliberately out of scope.

use reqwest::get;
use tracing::{debug, info};
use url::Url;

use crate::models::ContentType;

/// Default portal origin.
pub const BASE_URL: &str = "http://lms.nthu.edu.tw";

/// The `f=` tag selecting a listing page's content type.
fn f_tag(kind: ContentType) -> &'static str {
    match kind {
        ContentType::Announcement => "news",
        ContentType::Material => "doc",
        ContentType::Assignment => "hws",
        ContentType::Forum => "forumlist",
    }
}

/// URL builder for the portal's page family.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        Ok(Endpoints {
            base: Url::parse(base)?,
        })
    }

    /// Portal home: latest-news block plus the course menu.
    pub fn home(&self) -> Url {
        self.base.join("/home.php").expect("fixed path")
    }

    /// Profile form page.
    pub fn profile(&self) -> Url {
        self.base.join("/home/profile.php").expect("fixed path")
    }

    /// Course home: page title and the sidebar contact box.
    pub fn course_home(&self, course_id: &str) -> Url {
        self.base
            .join(&format!("/course/{course_id}"))
            .expect("fixed path")
    }

    /// A course's listing page for one content type.
    pub fn list_page(&self, course_id: &str, kind: ContentType) -> Url {
        let mut url = self.base.join("/course.php").expect("fixed path");
        url.query_pairs_mut()
            .append_pair("courseID", course_id)
            .append_pair("f", f_tag(kind));
        url
    }

    /// A course's score page.
    pub fn score_page(&self, course_id: &str) -> Url {
        let mut url = self.base.join("/course.php").expect("fixed path");
        url.query_pairs_mut()
            .append_pair("courseID", course_id)
            .append_pair("f", "score");
        url
    }

    /// Ajax JSON payload for one announcement.
    pub fn announcement_payload(&self, news_id: &str) -> Url {
        let mut url = self
            .base
            .join("/sys/lib/ajax/news.php")
            .expect("fixed path");
        url.query_pairs_mut().append_pair("id", news_id);
        url
    }

    /// Ajax JSON payload for one forum thread's posts.
    pub fn forum_payload(&self, post_id: &str) -> Url {
        let mut url = self
            .base
            .join("/sys/lib/ajax/post.php")
            .expect("fixed path");
        url.query_pairs_mut().append_pair("id", post_id);
        url
    }

    /// A material's detail page.
    pub fn material_detail(&self, course_id: &str, doc_id: &str) -> Url {
        let mut url = self.base.join("/course.php").expect("fixed path");
        url.query_pairs_mut()
            .append_pair("courseID", course_id)
            .append_pair("f", "doc")
            .append_pair("cid", doc_id);
        url
    }

    /// An assignment's detail page.
    pub fn assignment_detail(&self, course_id: &str, hw_id: &str) -> Url {
        let mut url = self.base.join("/course.php").expect("fixed path");
        url.query_pairs_mut()
            .append_pair("courseID", course_id)
            .append_pair("f", "hw")
            .append_pair("hw", hw_id);
        url
    }
}

/// GET a page and hand back its body text untouched.
pub async fn fetch_text(url: &Url) -> reqwest::Result<String> {
    debug!(%url, "GET");
    let body = get(url.clone()).await?.text().await?;
    info!(%url, bytes = body.len(), "Fetched page");
    Ok(body)
}
