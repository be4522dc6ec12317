//! Profile form fields and the course sidebar's contact lines.

use itertools::{EitherOrBoth, Itertools};
use once_cell::sync::Lazy;
use scraper::ElementRef;
use scraper::Html;

use crate::error::{ExtractError, Result};
use crate::models::{Contact, Profile};
use crate::query::{self, Sel};

static NAME_FIELD: Lazy<Sel> = Lazy::new(|| Sel::new("#fmName"));
static EMAIL_FIELD: Lazy<Sel> = Lazy::new(|| Sel::new("#fmEmail"));
static BOX_BODY: Lazy<Sel> = Lazy::new(|| Sel::new("#menu div.boxBody"));
static DIV: Lazy<Sel> = Lazy::new(|| Sel::new("div"));
static IMG: Lazy<Sel> = Lazy::new(|| Sel::new("img"));

/// Icon filename marking a mail-address tooltip.
const MAIL_ICON: &str = "mail.png";

/// Placeholder tokens the portal renders for an empty name list.
const EMPTY_TOKENS: [&str; 2] = ["無", "None"];

/// Positions of the teacher and TA lines inside the info box.
const TEACHER_LINE: usize = 4;
const TA_LINE: usize = 5;

/// Read the logged-in user's name and email from the profile form fields.
pub fn parse_profile(html: &str) -> Result<Profile> {
    const CTX: &str = "profile";
    let doc = Html::parse_document(html);
    let root = doc.root_element();
    let name = query::attr(NAME_FIELD.one(root, CTX)?, "#fmName", "value", CTX)?;
    let email = query::attr(EMAIL_FIELD.one(root, CTX)?, "#fmEmail", "value", CTX)?;
    Ok(Profile {
        name: name.to_string(),
        email: email.to_string(),
    })
}

/// Read teacher and TA contacts from the last sidebar info box.
///
/// Each line pairs a comma-separated name list with the `title` tooltips of
/// its mail icons, strictly by position. The portal renders them in
/// matching order; when the counts disagree after dropping the "無"/"None"
/// placeholders the pairing is meaningless, so that is a typed error rather
/// than a truncated or padded result.
pub fn parse_email_list(html: &str) -> Result<Vec<Contact>> {
    const CTX: &str = "contact list";
    let doc = Html::parse_document(html);
    let boxes = BOX_BODY.all(doc.root_element());
    let info = boxes
        .last()
        .copied()
        .ok_or_else(|| ExtractError::MissingElement {
            context: CTX,
            selector: BOX_BODY.css().to_string(),
        })?;
    let lines = DIV.all(info);

    let mut contacts = parse_email_line(query::nth(&lines, TEACHER_LINE, "div", CTX)?)?;
    contacts.extend(parse_email_line(query::nth(&lines, TA_LINE, "div", CTX)?)?);
    Ok(contacts)
}

fn parse_email_line(line: ElementRef<'_>) -> Result<Vec<Contact>> {
    const CTX: &str = "contact line";
    let full = query::text(line);
    let (role, name_list) = full
        .split_once(':')
        .ok_or_else(|| ExtractError::PatternMismatch {
            context: CTX,
            pattern: "role `:` name list",
            input: full.clone(),
        })?;
    let role = role.trim().to_string();

    let names: Vec<String> = name_list
        .split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !EMPTY_TOKENS.contains(&name.as_str()))
        .collect();

    let mut emails = Vec::new();
    for icon in IMG.all(line) {
        if icon
            .value()
            .attr("src")
            .is_some_and(|src| src.ends_with(MAIL_ICON))
        {
            emails.push(query::attr(icon, "img", "title", CTX)?.to_string());
        }
    }

    let (name_count, email_count) = (names.len(), emails.len());
    names
        .into_iter()
        .zip_longest(emails)
        .map(|pair| match pair {
            EitherOrBoth::Both(name, email) => Ok(Contact {
                name: format!("{role}: {name}"),
                email,
            }),
            EitherOrBoth::Left(_) | EitherOrBoth::Right(_) => {
                Err(ExtractError::CountMismatch {
                    context: CTX,
                    expected: name_count,
                    found: email_count,
                })
            }
        })
        .collect()
}
