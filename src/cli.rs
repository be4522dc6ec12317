//! Command-line interface definitions.
//!
//! One invocation extracts one kind of record, either from a page saved on
//! disk (`--input`) or fetched live from the portal (`--course`/`--item`).

use clap::{Parser, ValueEnum};

use ilms_extract::models::{ContentType, Platform};

/// Extract typed records from saved or fetched iLMS pages.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// What to extract
    #[arg(short, long, value_enum)]
    pub task: Task,

    /// Read the page from a local file instead of fetching it
    #[arg(short, long)]
    pub input: Option<String>,

    /// Course id to fetch pages for (repeatable)
    #[arg(short, long)]
    pub course: Vec<String>,

    /// Item id for detail and thread tasks
    #[arg(long)]
    pub item: Option<String>,

    /// Locale driving bilingual course-name selection (default zh-TW)
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Consumer platform driving bilingual course-name selection
    #[arg(short, long, value_enum)]
    pub platform: Option<PlatformArg>,

    /// Portal base URL
    #[arg(long, env = "ILMS_BASE_URL")]
    pub base_url: Option<String>,

    /// Optional path to a config.yaml with defaults
    #[arg(long)]
    pub config: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Everything the extractors know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Task {
    AnnouncementList,
    MaterialList,
    AssignmentList,
    ForumList,
    AnnouncementDetail,
    MaterialDetail,
    AssignmentDetail,
    ForumThread,
    LatestNews,
    CourseList,
    CourseTitle,
    Profile,
    Contacts,
    Score,
}

impl Task {
    /// The content type behind a listing task, if this is one.
    pub fn listing_kind(self) -> Option<ContentType> {
        match self {
            Task::AnnouncementList => Some(ContentType::Announcement),
            Task::MaterialList => Some(ContentType::Material),
            Task::AssignmentList => Some(ContentType::Assignment),
            Task::ForumList => Some(ContentType::Forum),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    Ios,
    Android,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Ios => Platform::Ios,
            PlatformArg::Android => Platform::Android,
        }
    }
}
