//! Session actions: registration, login, logout and company creation.
//!
//! Unlike the read actions, registration, login and company creation never
//! fail towards the caller. Failures are logged with the API's error body.

use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use super::{Actions, decode};
use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::storage::ACCESS_TOKEN_KEY;
use crate::store::Mutation;

impl Actions {
    pub async fn sign_up(&self, data: &RegisterRequest) {
        if let Err(e) = self.try_sign_up(data).await {
            log_failure("registration", &e);
        }
    }

    pub async fn login(&self, data: &LoginRequest) {
        if let Err(e) = self.try_login(data).await {
            log_failure("login", &e);
        }
    }

    pub fn handle_auth_completed(&self) {
        self.store.commit(Mutation::SetIsLoggedIn(true));
    }

    pub async fn create_company<T: Serialize + ?Sized>(&self, data: &T) {
        match self.post_json("/companies", data).await {
            Ok(body) => tracing::info!(response = %body, "Company created"),
            Err(e) => log_failure("company creation", &e),
        }
    }

    /// Forget the session and return the state to how it started.
    pub async fn logout(&self) -> AppResult<()> {
        self.tokens.remove(ACCESS_TOKEN_KEY)?;
        self.api.invalidate().await;
        self.store.reset();
        self.store.commit(Mutation::SetIsLoggedIn(false));
        tracing::info!("Logged out");
        Ok(())
    }

    /// [`Actions::sign_up`] that reports failures instead of logging them.
    pub async fn try_sign_up(&self, data: &RegisterRequest) -> AppResult<()> {
        data.validate()?;
        self.authenticate("/register", data).await
    }

    /// [`Actions::login`] that reports failures instead of logging them.
    pub async fn try_login(&self, data: &LoginRequest) -> AppResult<()> {
        data.validate()?;
        self.authenticate("/login", data).await
    }

    async fn authenticate<B: Serialize + ?Sized>(&self, path: &str, data: &B) -> AppResult<()> {
        let body = self.post_json(path, data).await?;
        tracing::debug!(path, response = %redact_token(&body), "Authentication response");
        let auth: AuthResponse = decode(path, body)?;

        self.tokens.set(ACCESS_TOKEN_KEY, &auth.access_token)?;
        // Cached responses were fetched as somebody else
        self.api.invalidate().await;
        self.handle_auth_completed();

        tracing::info!(path, "Authenticated");
        Ok(())
    }
}

/// Copy of an auth response with `access_token` masked.
fn redact_token(body: &Value) -> Value {
    let mut body = body.clone();
    if let Some(token) = body.get_mut("access_token") {
        *token = Value::String("[redacted]".to_string());
    }
    body
}

fn log_failure(operation: &str, error: &AppError) {
    match error.response_body() {
        Some(body) => tracing::error!(operation, status = ?error.status(), response = %body, "Request rejected"),
        None => tracing::error!(operation, error = %error, "Request failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::FakeApi;
    use super::redact_token;
    use crate::models::{LoginRequest, RegisterRequest};
    use crate::storage::{ACCESS_TOKEN_KEY, TokenStore};
    use serde_json::json;

    fn login() -> LoginRequest {
        LoginRequest {
            email: "ada@example.com".into(),
            password: "secret1".into(),
        }
    }

    #[tokio::test]
    async fn test_login_stores_token_and_flags_session() {
        let (actions, api) = FakeApi::actions();
        api.respond(
            "POST",
            "/login",
            json!({"access_token": "tok-123", "token_type": "bearer"}),
        );

        actions.login(&login()).await;

        assert_eq!(
            actions.tokens.get(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some("tok-123")
        );
        assert!(actions.store().snapshot().is_logged_in);
        assert_eq!(api.invalidations(), 1);
        assert_eq!(
            api.requests()[0].body,
            Some(json!({"email": "ada@example.com", "password": "secret1"}))
        );
    }

    #[tokio::test]
    async fn test_failed_login_is_swallowed() {
        let (actions, api) = FakeApi::actions();
        api.fail(
            "POST",
            "/login",
            401,
            json!({"message": "Unauthorized"}),
        );

        actions.login(&login()).await;

        assert_eq!(actions.tokens.access_token().unwrap(), None);
        assert!(!actions.store().snapshot().is_logged_in);
    }

    #[tokio::test]
    async fn test_try_login_reports_rejection() {
        let (actions, api) = FakeApi::actions();
        actions.handle_auth_completed();
        api.fail("POST", "/login", 401, json!({"message": "Unauthorized"}));

        let err = actions.try_login(&login()).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(api.invalidations(), 0);
    }

    #[test]
    fn test_redact_token() {
        let body = json!({"access_token": "tok-123", "token_type": "bearer"});
        assert_eq!(
            redact_token(&body),
            json!({"access_token": "[redacted]", "token_type": "bearer"})
        );
        assert_eq!(redact_token(&json!("oops")), json!("oops"));
    }

    #[tokio::test]
    async fn test_login_without_token_in_response_is_swallowed() {
        let (actions, api) = FakeApi::actions();
        api.respond("POST", "/login", json!({"message": "ok"}));

        actions.login(&login()).await;
        assert!(!actions.store().snapshot().is_logged_in);
    }

    #[tokio::test]
    async fn test_sign_up_posts_registration() {
        let (actions, api) = FakeApi::actions();
        api.respond("POST", "/register", json!({"access_token": "fresh"}));

        actions
            .sign_up(&RegisterRequest::new("Ada", "ada@example.com", "secret1"))
            .await;

        let body = api.requests()[0].body.clone().unwrap();
        assert_eq!(body["password_confirmation"], "secret1");
        assert_eq!(actions.tokens.access_token().unwrap().as_deref(), Some("fresh"));
        assert!(actions.store().snapshot().is_logged_in);
    }

    #[tokio::test]
    async fn test_invalid_registration_never_sent() {
        let (actions, api) = FakeApi::actions();

        actions
            .sign_up(&RegisterRequest::new("Ada", "ada@example.com", "123"))
            .await;

        assert!(api.requests().is_empty());
        assert!(!actions.store().snapshot().is_logged_in);
    }

    #[tokio::test]
    async fn test_create_company_swallows_errors() {
        let (actions, api) = FakeApi::actions();
        api.fail("POST", "/companies", 422, json!({"errors": {"name": ["required"]}}));

        actions.create_company(&json!({"name": ""})).await;

        assert_eq!(api.requests()[0].path, "/companies");
    }

    #[tokio::test]
    async fn test_logout_clears_token_and_state() {
        let (actions, api) = FakeApi::actions();
        api.respond("POST", "/login", json!({"access_token": "tok"}));
        actions.login(&login()).await;
        actions.set_period("daily");
        actions.toggle_loading();

        actions.logout().await.unwrap();

        assert_eq!(actions.tokens.access_token().unwrap(), None);
        let state = actions.store().snapshot();
        assert!(!state.is_logged_in);
        assert!(!state.loading);
        assert_eq!(state.active_period, "all");
        assert_eq!(api.invalidations(), 2);
    }
}
