use anyhow::Context;
use serde_json::Value;

use crate::task::{TaskId, TaskUpdate};

/// Reason a request was rejected before reaching the store.
/// The `Display` text is what the caller sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required and must be a non-empty string")]
    TitleRequired,
    #[error("At least one field (title or completed) must be provided")]
    NoChanges,
    #[error("Title must be a non-empty string")]
    InvalidTitle,
    #[error("Completed must be a boolean")]
    InvalidCompleted,
    #[error("Invalid ID format")]
    InvalidId,
    #[error("Email and password are required")]
    MissingCredentials,
}

/// Parses a raw request body as JSON. JSON `null` counts as unparsable.
pub fn parse_json_body(bytes: &[u8]) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_slice(bytes).context("Request body is not valid JSON")?;
    if value.is_null() {
        anyhow::bail!("Request body is JSON null");
    }
    Ok(value)
}

/// Parses a path segment as a task identity.
pub fn parse_task_id(raw: &str) -> Result<TaskId, ValidationError> {
    raw.parse::<TaskId>().map_err(|_| ValidationError::InvalidId)
}

/// Returns the trimmed text if `value` is a string with something other than whitespace.
fn non_blank_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    }
}

/// Validated body of a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
}

impl NewTask {
    pub fn parse(body: &Value) -> Result<Self, ValidationError> {
        let title = body
            .get("title")
            .and_then(non_blank_text)
            .ok_or(ValidationError::TitleRequired)?;
        Ok(Self { title })
    }
}

/// Validated body of an update request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges(TaskUpdate);

impl TaskChanges {
    pub fn parse(body: &Value) -> Result<Self, ValidationError> {
        let title = body.get("title");
        let completed = body.get("completed");

        let title_supplied = title.is_some_and(|value| !value.is_null());
        if !title_supplied && completed.is_none() {
            return Err(ValidationError::NoChanges);
        }

        let title = title
            .map(|value| non_blank_text(value).ok_or(ValidationError::InvalidTitle))
            .transpose()?;
        let completed = completed
            .map(|value| value.as_bool().ok_or(ValidationError::InvalidCompleted))
            .transpose()?;

        Ok(Self(TaskUpdate { title, completed }))
    }

    pub fn into_update(self) -> TaskUpdate {
        self.0
    }
}

/// Validated body of a login request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAttempt {
    pub email: String,
    pub password: String,
}

impl LoginAttempt {
    pub fn parse(body: &Value) -> Result<Self, ValidationError> {
        let field = |name: &str| {
            body.get(name)
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
        };
        match (field("email"), field("password")) {
            (Some(email), Some(password)) => Ok(Self { email, password }),
            _ => Err(ValidationError::MissingCredentials),
        }
    }
}
