use std::time::Duration;

use reqwest::blocking::{Client, Response};

use super::{ArticleStore, PersistError, SaveReceipt, interpret_fetch, interpret_save};
use crate::models::Article;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Articles behind a JSON-over-HTTP backend:
/// `GET {base}/articles/{id}`, `POST {base}/articles`, `PUT {base}/articles/{id}`
#[derive(Debug, Clone)]
pub struct HttpArticleStore {
    base: reqwest::Url,
    client: Client,
}

impl HttpArticleStore {
    pub fn new(base_url: &str) -> Result<Self, PersistError> {
        let base = reqwest::Url::parse(base_url.trim())
            .map_err(|e| PersistError::Network(format!("invalid base url {base_url}: {e}")))?;
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| PersistError::Network(e.to_string()))?;
        Ok(Self { base, client })
    }

    fn articles_url(&self, id: Option<&str>) -> Result<reqwest::Url, PersistError> {
        let mut url = self.base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                PersistError::Network(format!("base url cannot be a base: {}", self.base))
            })?;
            segments.pop_if_empty().push("articles");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }
}

fn read(response: Response) -> Result<(u16, Option<&'static str>, String), PersistError> {
    let status = response.status();
    let body = response
        .text()
        .map_err(|e| PersistError::Network(format!("failed to read response body: {e}")))?;
    Ok((status.as_u16(), status.canonical_reason(), body))
}

impl ArticleStore for HttpArticleStore {
    fn fetch(&self, id: &str) -> Result<Article, PersistError> {
        let url = self.articles_url(Some(id))?;
        log::info!("fetching article from {url}");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| PersistError::Network(e.to_string()))?;
        let (status, reason, body) = read(response)?;
        interpret_fetch(id, status, reason, &body)
    }

    fn save(&self, article: &Article) -> Result<SaveReceipt, PersistError> {
        let request = match article.id.as_deref() {
            Some(id) => self.client.put(self.articles_url(Some(id))?),
            None => self.client.post(self.articles_url(None)?),
        };
        let response = request
            .json(article)
            .send()
            .map_err(|e| PersistError::Network(e.to_string()))?;
        let (status, reason, body) = read(response)?;
        let receipt = interpret_save(article.id.as_deref(), status, reason, &body)?;
        log::info!("saved article {} (created: {})", receipt.id, receipt.created);
        Ok(receipt)
    }
}
