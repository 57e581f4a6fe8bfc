use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::{ApiError, ApiResult, PostService};
use crate::report::DraftReport;
use saklolo_types::*;

/// API client for communicating with the Saklolo server
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session_token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            session_token: None,
        }
    }

    /// Set the session token for authenticated requests
    pub fn set_session_token(&mut self, token: Option<String>) {
        self.session_token = token;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Helper to add session token to request if available
    fn add_auth_header(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.session_token {
            req.bearer_auth(token)
        } else {
            req
        }
    }

    /// Helper to handle API responses
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let clean_error = clean_error_body(status.as_u16(), &error_text);

        match status.as_u16() {
            404 => Err(ApiError::NotFound(clean_error)),
            401 | 403 => Err(ApiError::Unauthorized(clean_error)),
            400 | 422 => Err(ApiError::BadRequest(clean_error)),
            code @ 500..=599 => Err(ApiError::Server {
                status: code,
                message: clean_error,
            }),
            _ => Err(ApiError::Api(clean_error)),
        }
    }

    fn build_create_form(draft: DraftReport) -> ApiResult<Form> {
        let mut form = Form::new()
            .text("description", draft.description)
            .text("category", draft.category.as_str());

        if let Some(photo) = draft.photo {
            let part = Part::bytes(photo.bytes)
                .file_name(photo.file_name)
                .mime_str(&photo.mime_type)?;
            form = form.part("photo", part);
        }

        Ok(form)
    }
}

#[async_trait]
impl PostService for ApiClient {
    async fn list_posts(&self) -> ApiResult<Vec<Post>> {
        let url = self.endpoint("posts");
        log::debug!(target: "api_calls", "GET {}", url);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn list_popular_posts(&self) -> ApiResult<Vec<Post>> {
        let url = self.endpoint("posts/popular");
        log::debug!(target: "api_calls", "GET {}", url);
        let req = self.add_auth_header(self.client.get(&url));
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn create_post(&self, draft: DraftReport) -> ApiResult<Post> {
        let url = self.endpoint("posts");
        log::debug!(
            target: "api_calls",
            "POST {} category={} photo={}",
            url,
            draft.category.as_str(),
            draft.photo.is_some()
        );
        let form = Self::build_create_form(draft)?;
        let req = self.add_auth_header(self.client.post(&url).multipart(form));
        let response = req.send().await?;
        self.handle_response(response).await
    }
}

/// Prefer the server's JSON error message; collapse HTML error pages
/// (e.g. from a reverse proxy) into a short hint.
fn clean_error_body(status: u16, body: &str) -> String {
    if body.contains("<html>") || body.contains("<!DOCTYPE") {
        return format!("Server returned {} error. Please check the server URL.", status);
    }
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => match parsed.details {
            Some(details) => format!("{} ({})", parsed.error, details),
            None => parsed.error,
        },
        Err(_) if body.trim().is_empty() => format!("HTTP {}", status),
        Err(_) => body.to_string(),
    }
}
