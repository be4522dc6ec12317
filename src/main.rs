//! # ilms_extract CLI
//!
//! Thin front end over the extraction library: pick a task, feed it a page
//! saved on disk or let it fetch the live portal pages, get the extracted
//! records as JSON on stdout.
//!
//! ```sh
//! # Parse a saved listing page
//! ilms_extract -t announcement-list -i fixtures/news.html
//!
//! # Fetch and merge announcement listings for two courses
//! ilms_extract -t announcement-list -c 74 -c 129
//! ```
//!
//! Multiple `--course` ids are fetched concurrently; failed fetches are
//! logged and skipped. Merged listings are sorted newest-first, while a
//! single page keeps its document order untouched.

use clap::Parser;
use futures::stream::{self, StreamExt};
use std::cmp::Reverse;
use std::error::Error;
use tokio::fs;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

mod cli;

use cli::{Cli, Task};
use ilms_extract::api::{self, BASE_URL, Endpoints};
use ilms_extract::config::AppConfig;
use ilms_extract::extract;
use ilms_extract::models::{ContentType, ItemList, Platform};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(task = ?args.task, input = ?args.input, courses = ?args.course, "Parsed CLI arguments");

    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let locale = args
        .locale
        .clone()
        .or_else(|| config.locale.clone())
        .unwrap_or_else(|| "zh-TW".to_string());
    let platform = match args.platform {
        Some(arg) => arg.into(),
        None => match config.platform.as_deref() {
            Some("ios") => Platform::Ios,
            Some("android") | None => Platform::Android,
            Some(other) => return Err(format!("unknown platform {other:?} in config").into()),
        },
    };
    let base = args
        .base_url
        .clone()
        .or_else(|| config.base_url.clone())
        .unwrap_or_else(|| BASE_URL.to_string());
    let endpoints = Endpoints::new(&base)?;
    info!(%locale, ?platform, %base, "Starting extraction");

    // --- Acquire documents ---
    let documents: Vec<(String, String)> = if let Some(path) = &args.input {
        let body = fs::read_to_string(path).await?;
        vec![(path.clone(), body)]
    } else {
        let targets = plan_fetch(&args, &endpoints)?;
        stream::iter(targets)
            .then(|(label, url)| async move {
                match api::fetch_text(&url).await {
                    Ok(body) => Some((label, body)),
                    Err(e) => {
                        error!(error = %e, %url, "Fetch failed, skipping");
                        None
                    }
                }
            })
            .filter_map(std::future::ready)
            .collect()
            .await
    };
    if documents.is_empty() {
        return Err("no documents to extract from; pass --input or --course/--item".into());
    }

    // --- Extract ---
    let value = if let Some(kind) = args.task.listing_kind() {
        let mut items = Vec::new();
        let mut threads = Vec::new();
        for (label, body) in &documents {
            match extract::parse_item_list(kind, body)? {
                ItemList::Items(batch) => items.extend(batch),
                ItemList::Threads(batch) => threads.extend(batch),
            }
            debug!(source = %label, "Parsed listing page");
        }
        if kind == ContentType::Forum {
            serde_json::to_value(threads)?
        } else {
            if documents.len() > 1 {
                // Merged across courses; a single page keeps document order.
                items.sort_by_key(|item| Reverse(item.date.to_naive()));
            }
            serde_json::to_value(items)?
        }
    } else if documents.len() == 1 {
        run_task(args.task, &documents[0].1, &locale, platform)?
    } else {
        let mut map = serde_json::Map::new();
        for (label, body) in &documents {
            map.insert(label.clone(), run_task(args.task, body, &locale, platform)?);
        }
        serde_json::Value::Object(map)
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{rendered}");

    info!(elapsed = ?start_time.elapsed(), "Done");
    Ok(())
}

/// Work out which portal pages a fetching invocation needs.
fn plan_fetch(args: &Cli, endpoints: &Endpoints) -> Result<Vec<(String, Url)>, Box<dyn Error>> {
    fn need_courses(courses: &[String]) -> Result<(), Box<dyn Error>> {
        if courses.is_empty() {
            return Err("this task needs --course (or --input)".into());
        }
        Ok(())
    }
    fn need_item(item: &Option<String>) -> Result<String, Box<dyn Error>> {
        item.clone()
            .ok_or_else(|| "this task needs --item (or --input)".into())
    }

    let targets = match args.task {
        Task::LatestNews | Task::CourseList => vec![("home".to_string(), endpoints.home())],
        Task::Profile => vec![("profile".to_string(), endpoints.profile())],
        Task::CourseTitle | Task::Contacts => {
            need_courses(&args.course)?;
            args.course
                .iter()
                .map(|c| (c.clone(), endpoints.course_home(c)))
                .collect()
        }
        Task::Score => {
            need_courses(&args.course)?;
            args.course
                .iter()
                .map(|c| (c.clone(), endpoints.score_page(c)))
                .collect()
        }
        Task::AnnouncementList | Task::MaterialList | Task::AssignmentList | Task::ForumList => {
            let kind = args.task.listing_kind().expect("listing task");
            need_courses(&args.course)?;
            args.course
                .iter()
                .map(|c| (c.clone(), endpoints.list_page(c, kind)))
                .collect()
        }
        Task::AnnouncementDetail => {
            let item = need_item(&args.item)?;
            vec![(item.clone(), endpoints.announcement_payload(&item))]
        }
        Task::ForumThread => {
            let item = need_item(&args.item)?;
            vec![(item.clone(), endpoints.forum_payload(&item))]
        }
        Task::MaterialDetail => {
            let item = need_item(&args.item)?;
            need_courses(&args.course)?;
            vec![(
                item.clone(),
                endpoints.material_detail(&args.course[0], &item),
            )]
        }
        Task::AssignmentDetail => {
            let item = need_item(&args.item)?;
            need_courses(&args.course)?;
            vec![(
                item.clone(),
                endpoints.assignment_detail(&args.course[0], &item),
            )]
        }
    };
    Ok(targets)
}

/// Run a single-document task and serialize its records.
fn run_task(
    task: Task,
    document: &str,
    locale: &str,
    platform: Platform,
) -> Result<serde_json::Value, Box<dyn Error>> {
    let value = match task {
        Task::AnnouncementList | Task::MaterialList | Task::AssignmentList | Task::ForumList => {
            unreachable!("listing tasks go through the merge path")
        }
        Task::AnnouncementDetail => {
            serde_json::to_value(extract::parse_item_detail(ContentType::Announcement, document)?)?
        }
        Task::MaterialDetail => {
            serde_json::to_value(extract::parse_item_detail(ContentType::Material, document)?)?
        }
        Task::AssignmentDetail => {
            serde_json::to_value(extract::parse_item_detail(ContentType::Assignment, document)?)?
        }
        Task::ForumThread => serde_json::to_value(extract::parse_forum(document)?)?,
        Task::LatestNews => {
            serde_json::to_value(extract::parse_latest_news(document, locale, platform)?)?
        }
        Task::CourseList => {
            serde_json::to_value(extract::parse_course_list(document, locale, platform)?)?
        }
        Task::CourseTitle => {
            serde_json::to_value(extract::parse_course_name_title(document, locale, platform)?)?
        }
        Task::Profile => serde_json::to_value(extract::parse_profile(document)?)?,
        Task::Contacts => serde_json::to_value(extract::parse_email_list(document)?)?,
        Task::Score => serde_json::to_value(extract::parse_score(document)?)?,
    };
    Ok(value)
}
