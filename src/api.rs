// API client module: a small blocking HTTP client for the Flow2 admin API.
// Every request carries a Basic `Authorization` header built from the
// configured credentials. The `PostApi` trait is what the workflow talks to,
// so tests can swap the network for a recording fake.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::media::MediaForm;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::blocking::{Client, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

/// `Basic base64(username:password)`.
pub fn basic_auth_header(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    format!("Basic {}", STANDARD.encode(credentials))
}

/// Identifier the server assigns to a created post. The API returns either
/// a string or a number; both are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostId {
    Text(String),
    Number(serde_json::Number),
}

impl PostId {
    /// Accept only values a client could use as an id: a non-empty string
    /// or a non-zero number.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.is_empty() => Some(PostId::Text(s.clone())),
            serde_json::Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => {
                Some(PostId::Number(n.clone()))
            }
            _ => None,
        }
    }

    /// Extract the id from a create-post response body.
    pub fn from_response(body: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct CreatedPost {
            #[serde(default)]
            id: serde_json::Value,
        }

        serde_json::from_str::<CreatedPost>(body)
            .ok()
            .and_then(|created| PostId::from_value(&created.id))
            .ok_or_else(|| Error::MissingIdentifier {
                body: body.to_string(),
            })
    }

    /// Value written into the document's `id` metadata field.
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            PostId::Text(s) => serde_json::Value::String(s.clone()),
            PostId::Number(n) => serde_json::Value::Number(n.clone()),
        }
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostId::Text(s) => f.write_str(s),
            PostId::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Remote operations the publish and pull workflows depend on.
pub trait PostApi {
    /// Send the document text as a new post and return the raw response body.
    fn create_post(&self, content: &str) -> Result<String>;

    /// Upload every asset in `form` as one multipart request for `post_id`.
    fn upload_media(&self, post_id: &PostId, form: MediaForm) -> Result<()>;

    /// Look a post up by title. `None` when the server has no match.
    fn search_post(&self, title: &str) -> Result<Option<String>>;
}

/// Blocking reqwest client bound to one resolved `Settings`.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    settings: Settings,
}

impl ApiClient {
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, settings))
    }

    /// Use a preconfigured reqwest client (proxy, TLS or timeout overrides).
    pub fn with_client(client: Client, settings: Settings) -> Self {
        ApiClient { client, settings }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.api_base_url, path)
    }

    fn authorization(&self) -> String {
        basic_auth_header(&self.settings.auth_username, &self.settings.auth_password)
    }
}

/// Turn a non-success status into `Error::Status` with the response text.
fn check_status(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let text = res.text().unwrap_or_default();
    Err(Error::Status { status, text })
}

impl PostApi for ApiClient {
    fn create_post(&self, content: &str) -> Result<String> {
        let url = self.url("/admin/api/post");
        debug!(%url, bytes = content.len(), "creating post");
        let res = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.authorization())
            .header(CONTENT_TYPE, "text/plain")
            .body(content.to_string())
            .send()?;
        let res = check_status(res)?;
        Ok(res.text()?)
    }

    fn upload_media(&self, post_id: &PostId, form: MediaForm) -> Result<()> {
        let url = self.url(&format!("/admin/post/{}/media?includesBanner=true", post_id));
        debug!(%url, parts = form.len(), "uploading media");
        let res = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.authorization())
            .multipart(form.into_multipart()?)
            .send()?;
        check_status(res)?;
        Ok(())
    }

    fn search_post(&self, title: &str) -> Result<Option<String>> {
        let url = self.url("/admin/api/post/search");
        debug!(%url, title, "searching post");
        let res = self
            .client
            .get(&url)
            .query(&[("title", title)])
            .header(AUTHORIZATION, self.authorization())
            .header(CONTENT_TYPE, "text/plain")
            .send()?;
        if res.status() != StatusCode::OK {
            debug!(status = %res.status(), "no post found");
            return Ok(None);
        }
        let body = res.text()?;
        Ok(if body.is_empty() { None } else { Some(body) })
    }
}
