use derive_more::{Deref, Display};

use crate::TrainingGoal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserID,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub training_goal: Option<TrainingGoal>,
}

impl User {
    #[must_use]
    pub fn display_name(&self) -> &str {
        match &self.full_name {
            Some(full_name) if !full_name.trim().is_empty() => full_name.trim(),
            _ => &self.username,
        }
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserID(u32);

impl UserID {
    #[must_use]
    pub fn nil() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for UserID {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Account data for registering a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub training_goal: Option<TrainingGoal>,
}

impl NewUser {
    pub fn new(
        username: &str,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<Self, UserError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(UserError::EmptyUsername);
        }
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(UserError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(UserError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            training_goal: None,
        })
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
        && !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ".-".contains(c))
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("Username must not be empty")]
    EmptyUsername,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Password must not be empty")]
    EmptyPassword,
}
