use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::Config;

pub mod api;

/// A known account: identity, lookup email, plain-text password and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: String,
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Credential {
    pub fn new(id: &str, email: &str, password: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        }
    }

    /// Returns the public projection of this account, without the password.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// Public view of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    /// User identifier
    pub id: String,
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
}

/// Fixed, read-only list of accounts allowed to log in.
#[derive(Debug, Clone)]
pub struct CredentialTable {
    entries: Vec<Credential>,
}

impl Default for CredentialTable {
    fn default() -> Self {
        Self::new(vec![
            Credential::new("1", "test@example.com", "password123", "Test User"),
            Credential::new("2", "admin@example.com", "admin123", "Admin User"),
        ])
    }
}

impl CredentialTable {
    pub fn new(entries: Vec<Credential>) -> Self {
        Self { entries }
    }

    /// Finds the first account whose email and password both match exactly.
    pub fn verify(&self, email: &str, password: &str) -> Option<&Credential> {
        self.entries
            .iter()
            .find(|entry| entry.email == email && entry.password == password)
    }
}

/// Decides which bearer token a verified user receives and which tokens are accepted.
#[cfg_attr(test, mockall::automock)]
pub trait AuthPolicy: Send + Sync {
    fn issue_token(&self, credential: &Credential) -> String;
    fn authorize(&self, token: &str) -> bool;
}

/// One shared secret for every user. No expiry, no revocation.
#[derive(Debug, Clone)]
pub struct StaticTokenPolicy {
    token: String,
}

impl StaticTokenPolicy {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl AuthPolicy for StaticTokenPolicy {
    fn issue_token(&self, _credential: &Credential) -> String {
        self.token.clone()
    }

    fn authorize(&self, token: &str) -> bool {
        token == self.token
    }
}

/// Authentication state shared by the login endpoint and the bearer-token middleware.
#[derive(Clone)]
pub struct AuthState {
    pub credentials: CredentialTable,
    pub policy: Arc<dyn AuthPolicy>,
}

impl AuthState {
    pub fn new(credentials: CredentialTable, policy: Arc<dyn AuthPolicy>) -> Self {
        Self {
            credentials,
            policy,
        }
    }

    /// Creates an AuthState with the built-in accounts and the configured session token.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            CredentialTable::default(),
            Arc::new(StaticTokenPolicy::new(config.session_token.clone())),
        )
    }
}
