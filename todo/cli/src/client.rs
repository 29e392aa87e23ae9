use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Public view of the logged-in user, as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub user: UserProfile,
    pub token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{message} ({status})")]
    Api { status: StatusCode, message: String },
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Not logged in. Run `todo login` first.")]
    NotLoggedIn,
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// HTTP client for the task API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl TodoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Attaches the bearer token sent with every task request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotLoggedIn)?;
        Ok(self
            .http
            .request(method, format!("{}/api{}", self.base_url, path))
            .bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string(),
        };
        Err(ClientError::Api { status, message })
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let request = self
            .http
            .post(format!("{}/api/login", self.base_url))
            .json(&json!({ "email": email, "password": password }));
        Self::send(request).await
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        Self::send(self.request(Method::GET, "/items")?).await
    }

    pub async fn create_task(&self, title: &str) -> Result<Task, ClientError> {
        let request = self
            .request(Method::POST, "/items")?
            .json(&json!({ "title": title }));
        Self::send(request).await
    }

    pub async fn get_task(&self, id: i64) -> Result<Task, ClientError> {
        Self::send(self.request(Method::GET, &format!("/items/{}", id))?).await
    }

    /// Sends only the fields that are `Some`.
    pub async fn update_task(
        &self,
        id: i64,
        title: Option<&str>,
        completed: Option<bool>,
    ) -> Result<Task, ClientError> {
        let mut body = serde_json::Map::new();
        if let Some(title) = title {
            body.insert("title".to_string(), json!(title));
        }
        if let Some(completed) = completed {
            body.insert("completed".to_string(), json!(completed));
        }
        let request = self
            .request(Method::PUT, &format!("/items/{}", id))?
            .json(&body);
        Self::send(request).await
    }

    /// Deletes a task and returns the server's confirmation message.
    pub async fn delete_task(&self, id: i64) -> Result<String, ClientError> {
        let response: DeleteResponse =
            Self::send(self.request(Method::DELETE, &format!("/items/{}", id))?).await?;
        Ok(response.message)
    }
}
