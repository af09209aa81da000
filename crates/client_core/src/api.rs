//! Data access layer for the remote `/blogs` collection.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::domain::{Blog, BlogId, CreateBlogInput};
use tracing::{debug, warn};
use url::Url;

use crate::error::ClientError;

pub const DEFAULT_API_URL: &str = "http://localhost:3001";

#[async_trait]
pub trait BlogApi: Send + Sync {
    async fn list_blogs(&self) -> Result<Vec<Blog>, ClientError>;
    async fn get_blog(&self, id: BlogId) -> Result<Blog, ClientError>;
    async fn create_blog(&self, input: &CreateBlogInput) -> Result<Blog, ClientError>;
}

pub struct HttpBlogClient {
    http: Client,
    base_url: Url,
}

impl HttpBlogClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {e}", self.base_url)))
    }
}

fn normalize_base_url(raw: &str) -> Result<Url, ClientError> {
    let trimmed = raw.trim();
    let mut url =
        Url::parse(trimmed).map_err(|e| ClientError::InvalidBaseUrl(format!("{trimmed}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidBaseUrl(trimmed.to_string()));
    }
    // Url::join drops the last path segment unless it ends with a slash.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn send(request: reqwest::RequestBuilder) -> Result<Response, ClientError> {
    request.send().await.map_err(|e| {
        warn!(error = %e, "blogs api: transport failure");
        ClientError::Network(e.to_string())
    })
}

async fn rejection_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request rejected")
            .to_string()
    } else {
        body.to_string()
    }
}

#[async_trait]
impl BlogApi for HttpBlogClient {
    async fn list_blogs(&self) -> Result<Vec<Blog>, ClientError> {
        let url = self.endpoint("blogs")?;
        debug!(%url, "blogs api: list");
        let response = send(self.http.get(url)).await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "blogs api: list rejected");
            return Err(ClientError::Http {
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    async fn get_blog(&self, id: BlogId) -> Result<Blog, ClientError> {
        let url = self.endpoint(&format!("blogs/{id}"))?;
        debug!(%url, blog_id = id.0, "blogs api: get");
        let response = send(self.http.get(url)).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound { id });
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), blog_id = id.0, "blogs api: get rejected");
            return Err(ClientError::Http {
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    async fn create_blog(&self, input: &CreateBlogInput) -> Result<Blog, ClientError> {
        let url = self.endpoint("blogs")?;
        debug!(%url, title = %input.title, "blogs api: create");
        let response = send(self.http.post(url).json(input)).await?;
        let status = response.status();
        if status.is_client_error() {
            let message = rejection_message(response).await;
            warn!(status = status.as_u16(), %message, "blogs api: create rejected");
            return Err(ClientError::Validation {
                status: status.as_u16(),
                message,
            });
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), "blogs api: create failed");
            return Err(ClientError::Http {
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
