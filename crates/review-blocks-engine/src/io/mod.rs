//! Persistence collaborators.
//!
//! The editor hands the whole article (scalar fields plus the ordered
//! `structuredContent` blocks) to an [`ArticleStore`] and adopts whatever id
//! the store assigns to new articles. There is no retry, cancellation or
//! concurrency token; the last save wins.

mod file;
#[cfg(feature = "http")]
mod http;

pub use file::JsonFileStore;
#[cfg(feature = "http")]
pub use http::HttpArticleStore;

use serde_json::Value;

use crate::models::Article;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Article not found: {0}")]
    NotFound(String),
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a store reports back after a successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    /// Id of the saved article; for new articles this is the assigned id
    pub id: String,
    pub created: bool,
}

/// Load and save whole articles by opaque id
pub trait ArticleStore {
    fn fetch(&self, id: &str) -> Result<Article, PersistError>;
    fn save(&self, article: &Article) -> Result<SaveReceipt, PersistError>;
}

/// User-facing message for a non-success response.
///
/// Prefers a JSON `error` or `message` field, then the raw body, then the
/// status reason phrase.
pub fn error_message_for_response(reason: Option<&str>, body: &str) -> String {
    if body.trim().is_empty() {
        return reason.unwrap_or("Request failed").to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return ["error", "message"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
            .unwrap_or(body)
            .to_string();
    }

    body.to_string()
}

/// Interpret a fetch response
pub fn interpret_fetch(
    id: &str,
    status: u16,
    reason: Option<&str>,
    body: &str,
) -> Result<Article, PersistError> {
    if status == 404 {
        return Err(PersistError::NotFound(id.to_string()));
    }
    if !(200..300).contains(&status) {
        return Err(PersistError::Status {
            status,
            message: error_message_for_response(reason, body),
        });
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|e| PersistError::InvalidResponse(format!("body is not JSON: {e}")))?;
    // Some backends wrap the record as {"article": {...}}
    let record = value.get("article").cloned().unwrap_or(value);
    serde_json::from_value(record)
        .map_err(|e| PersistError::InvalidResponse(format!("unexpected article shape: {e}")))
}

/// Interpret a save response for an article that had `sent_id` (None if new)
pub fn interpret_save(
    sent_id: Option<&str>,
    status: u16,
    reason: Option<&str>,
    body: &str,
) -> Result<SaveReceipt, PersistError> {
    if !(200..300).contains(&status) {
        return Err(PersistError::Status {
            status,
            message: error_message_for_response(reason, body),
        });
    }

    let returned_id = if body.trim().is_empty() {
        None
    } else {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| PersistError::InvalidResponse(format!("body is not JSON: {e}")))?;
        returned_id(&value)
    };

    match (sent_id, returned_id) {
        (None, Some(id)) => Ok(SaveReceipt { id, created: true }),
        (None, None) => Err(PersistError::InvalidResponse(
            "response for a new article carries no id".to_string(),
        )),
        (Some(_), Some(id)) => Ok(SaveReceipt { id, created: false }),
        (Some(sent), None) => Ok(SaveReceipt {
            id: sent.to_string(),
            created: false,
        }),
    }
}

/// `id` at the top level or under `article`/`data`; numbers are accepted
fn returned_id(value: &Value) -> Option<String> {
    let candidates = [
        value.get("id"),
        value.get("article").and_then(|a| a.get("id")),
        value.get("data").and_then(|d| d.get("id")),
    ];
    candidates.into_iter().flatten().find_map(|id| match id {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
