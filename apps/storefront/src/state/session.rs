//! # Session State
//!
//! Who is logged in, with which token, and which theme they picked.
//!
//! Passed explicitly to every command that needs it; nothing about the
//! session lives in globals.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,

    /// Bearer token from the store API (or a local mock token offline).
    #[serde(skip_serializing)]
    pub token: String,

    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Session {
            username: username.into(),
            token: token.into(),
            logged_in_at: Utc::now(),
        }
    }
}

/// Light or dark presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    session: Option<Session>,
    theme: ThemeMode,
}

/// Session and theme of the running shell.
#[derive(Debug, Default)]
pub struct SessionState {
    inner: Mutex<Inner>,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState::default()
    }

    /// Stores `session`, replacing any previous one.
    pub fn start(&self, session: Session) {
        self.lock().session = Some(session);
    }

    /// Drops the current session and returns it.
    pub fn end(&self) -> Option<Session> {
        self.lock().session.take()
    }

    pub fn current(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().session.is_some()
    }

    pub fn theme(&self) -> ThemeMode {
        self.lock().theme
    }

    /// Flips the theme and returns the new one.
    pub fn toggle_theme(&self) -> ThemeMode {
        let mut inner = self.lock();
        inner.theme = inner.theme.toggled();
        inner.theme
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
