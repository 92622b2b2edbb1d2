//! # Session Commands
//!
//! Signup, login, logout and the theme toggle.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  login(username, password)                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  validate_credentials ──── empty? ──► VALIDATION_ERROR                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Authenticator::authenticate ── 401? ──► UNAUTHORIZED                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  SessionState::start(Session { username, token, logged_in_at })         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use storefront_core::validation::{validate_credentials, validate_signup};
use tracing::{debug, info, warn};

use crate::error::{ApiError, ErrorCode};
use crate::source::Authenticator;
use crate::state::{CartState, Session, SessionState, ThemeMode};

/// Session status as shown in the header.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub authenticated: bool,
    pub username: Option<String>,
    pub logged_in_at: Option<DateTime<Utc>>,
    pub theme: ThemeMode,
}

impl From<&SessionState> for SessionResponse {
    fn from(state: &SessionState) -> Self {
        let current = state.current();
        SessionResponse {
            authenticated: current.is_some(),
            username: current.as_ref().map(|s| s.username.clone()),
            logged_in_at: current.map(|s| s.logged_in_at),
            theme: state.theme(),
        }
    }
}

/// Result of a signup. The account still has to log in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub username: String,
    /// Id assigned by the store; absent offline.
    pub user_id: Option<u64>,
}

/// Registers a new account with the store.
///
/// Does not log in and does not touch the current session.
pub async fn signup(
    auth: &Authenticator,
    username: &str,
    email: &str,
    password: &str,
) -> Result<SignupResponse, ApiError> {
    debug!(username = %username, "signup command");
    validate_signup(username, email, password)?;

    let user_id = auth.register(username, email, password).await.map_err(|e| {
        warn!(username = %username, error = %e, "Signup failed");
        ApiError::new(ErrorCode::SourceError, "Signup failed. Please try again.")
    })?;

    info!(username = %username, user_id = ?user_id, "Signed up");
    Ok(SignupResponse {
        username: username.to_string(),
        user_id,
    })
}

/// Exchanges credentials for a session token.
///
/// Logging in while already logged in replaces the session; the cart is kept.
pub async fn login(
    session: &SessionState,
    auth: &Authenticator,
    username: &str,
    password: &str,
) -> Result<SessionResponse, ApiError> {
    debug!(username = %username, "login command");
    validate_credentials(username, password)?;

    let token = auth.authenticate(username, password).await.map_err(|e| {
        warn!(username = %username, error = %e, "Login failed");
        ApiError::from(e)
    })?;

    session.start(Session::new(username, token));
    info!(username = %username, "Logged in");
    Ok(SessionResponse::from(session))
}

/// Ends the session and empties the cart.
pub fn logout(session: &SessionState, cart: &CartState) -> SessionResponse {
    debug!("logout command");
    if let Some(ended) = session.end() {
        info!(username = %ended.username, "Logged out");
    }
    cart.update(|c| c.clear());
    SessionResponse::from(session)
}

/// Flips between light and dark. Available without a session.
pub fn toggle_theme(session: &SessionState) -> SessionResponse {
    let theme = session.toggle_theme();
    debug!(theme = ?theme, "toggle_theme command");
    SessionResponse::from(session)
}

pub fn get_session(session: &SessionState) -> SessionResponse {
    debug!("get_session command");
    SessionResponse::from(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StoreClient;
    use serde_json::json;
    use std::time::Duration;
    use storefront_core::{Money, Product};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_offline_signup_leaves_session_alone() {
        let session = SessionState::new();
        let resp = signup(&Authenticator::Offline, "jane", "jane@example.test", "pw")
            .await
            .unwrap();

        assert_eq!(resp.username, "jane");
        assert_eq!(resp.user_id, None);
        assert!(!session.is_authenticated());

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["userId"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_signup_requires_email() {
        let err = signup(&Authenticator::Offline, "jane", "", "pw")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "email is required");
    }

    #[tokio::test]
    async fn test_remote_signup() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 21 })))
            .mount(&server)
            .await;
        let auth = Authenticator::Remote(
            StoreClient::new(&server.uri(), Duration::from_secs(5)).unwrap(),
        );

        let resp = signup(&auth, "jane", "jane@example.test", "pw").await.unwrap();
        assert_eq!(resp.user_id, Some(21));
    }

    #[tokio::test]
    async fn test_remote_signup_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let auth = Authenticator::Remote(
            StoreClient::new(&server.uri(), Duration::from_secs(5)).unwrap(),
        );

        let err = signup(&auth, "jane", "jane@example.test", "pw")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SourceError);
        assert_eq!(err.message, "Signup failed. Please try again.");
    }

    #[tokio::test]
    async fn test_offline_login() {
        let session = SessionState::new();
        let resp = login(&session, &Authenticator::Offline, "mor_2314", "83r5^_")
            .await
            .unwrap();

        assert!(resp.authenticated);
        assert_eq!(resp.username.as_deref(), Some("mor_2314"));
        assert!(resp.logged_in_at.is_some());
        assert!(!session.current().unwrap().token.is_empty());
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let session = SessionState::new();
        let err = login(&session, &Authenticator::Offline, "", "pw")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = login(&session, &Authenticator::Offline, "user", "")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_logout_empties_cart() {
        let session = SessionState::new();
        session.start(Session::new("user", "token"));
        let cart = CartState::new();
        cart.update(|c| c.add(&Product::new(1, "a", "Shoe", Money::from_cents(100))));

        let resp = logout(&session, &cart);
        assert!(!resp.authenticated);
        assert!(resp.username.is_none());
        assert!(cart.snapshot().is_empty());
    }

    #[test]
    fn test_toggle_theme_without_session() {
        let session = SessionState::new();
        assert_eq!(get_session(&session).theme, ThemeMode::Dark);
        assert_eq!(toggle_theme(&session).theme, ThemeMode::Light);

        let json = serde_json::to_value(get_session(&session)).unwrap();
        assert_eq!(json["theme"], "light");
        assert_eq!(json["authenticated"], false);
    }
}
