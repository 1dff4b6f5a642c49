//! Authentication context supplied by the hosting page.
//!
//! The editor works without a signed-in user. Only submitting a generation
//! job requires one.

use serde::{Deserialize, Serialize};

/// Display profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserProfile {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Up to two upper-case initials for the avatar badge
    pub fn initials(&self) -> String {
        self.display_name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub authenticated: bool,
    pub profile: Option<UserProfile>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(profile: UserProfile) -> Self {
        Self {
            authenticated: true,
            profile: Some(profile),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn display_name(&self) -> Option<&str> {
        self.profile.as_ref().map(|p| p.display_name.as_str())
    }
}
