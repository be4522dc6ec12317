//! Forum thread assembly from the portal's post JSON payload.

use serde::Deserialize;

use crate::error::{ExtractError, Result};
use crate::models::{Forum, Post};

#[derive(Debug, Deserialize)]
struct ThreadPayload {
    id: String,
    title: String,
    items: Vec<PostPayload>,
}

#[derive(Debug, Deserialize)]
struct PostPayload {
    id: String,
    name: String,
    account: String,
    email: String,
    date: String,
    note: String,
}

/// Assemble a [`Forum`] from the raw post-collection payload.
///
/// The first item is the thread's opening post, so the reply count is the
/// item count minus one; a payload with no items at all is malformed.
/// Post order is upstream order.
pub fn parse_forum(json: &str) -> Result<Forum> {
    const CTX: &str = "forum thread";
    let payload: ThreadPayload = serde_json::from_str(json).map_err(|source| ExtractError::Json {
        context: CTX,
        source,
    })?;
    if payload.items.is_empty() {
        return Err(ExtractError::MissingElement {
            context: CTX,
            selector: "items[0]".to_string(),
        });
    }
    Ok(Forum {
        id: payload.id,
        title: payload.title,
        count: payload.items.len() - 1,
        posts: payload
            .items
            .into_iter()
            .map(|item| Post {
                id: item.id,
                name: item.name,
                account: item.account,
                email: item.email,
                date: item.date,
                content: item.note,
            })
            .collect(),
    })
}
