//! WordPress REST client
//!
//! Wraps a shared `reqwest::Client` configured once from [`RunConfig`]. The
//! client is cheap to clone and safe to use from any number of tasks.

use crate::config::{Credentials, RunConfig};
use crate::error::Result;
use crate::ids::RecordId;
use crate::outcome::{DeleteOutcome, StatusRecord};
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder, Url};

#[derive(Clone)]
pub struct WpClient {
    client: Client,
    endpoint: Url,
    credentials: Option<Credentials>,
}

impl WpClient {
    pub fn new(config: &RunConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            credentials: config.credentials.clone(),
        })
    }

    /// `<endpoint>/<id>?force=true`
    pub fn post_url(&self, id: &RecordId) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        // Bypass the trash and delete permanently
        url.set_query(Some("force=true"));
        url
    }

    /// Permanently delete one record
    ///
    /// Never fails: every way the request can go wrong is folded into the
    /// returned record.
    pub async fn delete_post(&self, id: RecordId) -> StatusRecord {
        let url = self.post_url(&id);

        // `.` and `..` would collapse onto the collection URL
        if !id.is_path_segment() {
            tracing::error!("Refusing to delete post {}: not a usable path segment", id);
            return StatusRecord::new(id, url.to_string(), DeleteOutcome::Failed);
        }

        tracing::debug!("DELETE {}", url);

        let outcome = match self.send_delete(url.clone()).await {
            Ok((status, body)) => DeleteOutcome::from_response(status, body),
            Err(e) if e.is_timeout() => {
                tracing::warn!("Timeout deleting post {}", id);
                DeleteOutcome::TimedOut
            }
            Err(e) => {
                tracing::error!("Failed to delete post {}: {:?}", id, e);
                DeleteOutcome::Failed
            }
        };

        StatusRecord::new(id, url.to_string(), outcome)
    }

    /// Look up posts by slug, returning the raw status and body
    pub async fn get_by_slug(&self, slug: &str) -> reqwest::Result<(u16, String)> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().clear().append_pair("slug", slug);
        tracing::debug!("GET {}", url);

        let response = self.authorize(self.client.get(url)).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }

    async fn send_delete(&self, url: Url) -> reqwest::Result<(u16, String)> {
        let response = self
            .authorize(self.client.delete(url))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(credentials) => {
                request.basic_auth(&credentials.username, Some(&credentials.password))
            }
            None => request,
        }
    }
}
