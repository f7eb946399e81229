//! Authentication endpoints.

use serde_json::json;
use tracing::{debug, info};

use super::BerayClient;
use crate::error::BerayResult;
use crate::models::{AuthResponse, MessageResponse};
use crate::traits::Method;

impl BerayClient {
    /// Ask the server to email a verification code to `email`.
    pub async fn request_verification_code(&self, email: &str) -> BerayResult<MessageResponse> {
        let request = self
            .request(Method::Post, "/auth/request-verification-code")
            .with_json(json!({ "email": email }));
        self.execute_as(request).await
    }

    /// Register a new account. Stores the issued token, if any.
    pub async fn register(
        &self,
        email: &str,
        verification_code: &str,
        password: &str,
    ) -> BerayResult<AuthResponse> {
        let request = self.request(Method::Post, "/auth/register").with_json(json!({
            "email": email,
            "verification_code": verification_code,
            "password": password,
        }));
        let auth = self.execute_as(request).await?;
        self.store_token(&auth);
        Ok(auth)
    }

    /// Log in with a JSON body. Stores the issued token, if any.
    pub async fn login(&self, email: &str, password: &str) -> BerayResult<AuthResponse> {
        let request = self
            .request(Method::Post, "/auth/login")
            .with_json(json!({ "email": email, "password": password }));
        let auth = self.execute_as(request).await?;
        self.store_token(&auth);
        Ok(auth)
    }

    /// Log in through the OAuth2 password form. Stores the issued token, if any.
    pub async fn login_with_form(&self, email: &str, password: &str) -> BerayResult<AuthResponse> {
        let request = self.request(Method::Post, "/auth/token").with_form(vec![
            ("username".to_string(), email.to_string()),
            ("password".to_string(), password.to_string()),
        ]);
        let auth = self.execute_as(request).await?;
        self.store_token(&auth);
        Ok(auth)
    }

    /// Log out. The local token is cleared even if the server rejects the call.
    pub async fn logout(&self) -> BerayResult<MessageResponse> {
        let request = self.request(Method::Post, "/auth/logout");
        let result = self.execute_as(request).await;
        self.session.clear_token();
        info!("Logged out");
        result
    }

    fn store_token(&self, auth: &AuthResponse) {
        match &auth.access_token {
            Some(token) => {
                self.session.set_token(token.clone());
                info!("Signed in, session token stored");
            }
            None => debug!("Auth response carried no access token"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::adapters::mock::MockResponse;
    use crate::client::test_support::*;
    use crate::error::ApiError;
    use serde_json::json;

    #[tokio::test]
    async fn test_request_verification_code() {
        let (client, mock) = client_with_mock();
        mock.set_response(
            &format!("{}/auth/request-verification-code", BASE),
            MockResponse::json(200, json!({"message": "Verification code sent."})),
        );

        let response = client.request_verification_code("test@example.com").await.unwrap();
        assert_eq!(response.message.as_deref(), Some("Verification code sent."));

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, "POST");
        let body: serde_json::Value = serde_json::from_str(&request.body.unwrap()).unwrap();
        assert_eq!(body, json!({"email": "test@example.com"}));
    }

    #[tokio::test]
    async fn test_request_verification_code_conflict() {
        let (client, mock) = client_with_mock();
        mock.set_default_response(MockResponse::json(
            409,
            json!({"detail": "Email already registered."}),
        ));

        let err = client.request_verification_code("test@example.com").await.unwrap_err();
        assert!(matches!(err.as_api_error(), Some(ApiError::Conflict { .. })));
        assert!(err.to_string().contains("Email already registered"));
    }

    #[tokio::test]
    async fn test_register_stores_token() {
        let (client, mock) = client_with_mock();
        mock.set_default_response(MockResponse::json(
            200,
            json!({"access_token": "fake_token", "token_type": "bearer", "user": {"email": "test@example.com"}}),
        ));

        let auth = client.register("test@example.com", "123456", "password").await.unwrap();
        assert_eq!(auth.access_token.as_deref(), Some("fake_token"));
        assert_eq!(client.token().as_deref(), Some("fake_token"));

        let body: serde_json::Value =
            serde_json::from_str(&mock.last_request().unwrap().body.unwrap()).unwrap();
        assert_eq!(body["verification_code"], "123456");
    }

    #[tokio::test]
    async fn test_login_failure_keeps_signed_out() {
        let (client, mock) = client_with_mock();
        mock.set_default_response(MockResponse::json(
            401,
            json!({"detail": "Incorrect email or password"}),
        ));

        let err = client.login("test@example.com", "wrong").await.unwrap_err();
        assert!(err.requires_reauth());
        assert_eq!(err.to_string(), "Authentication failed: Incorrect email or password");
        assert!(client.token().is_none());
    }

    #[tokio::test]
    async fn test_login_with_form_sends_form_fields() {
        let (client, mock) = client_with_mock();
        mock.set_response(
            &format!("{}/auth/token", BASE),
            MockResponse::json(200, json!({"access_token": "fake_token_form", "token_type": "bearer"})),
        );

        client.login_with_form("test@example.com", "password").await.unwrap();
        assert_eq!(client.token().as_deref(), Some("fake_token_form"));

        let body = mock.last_request().unwrap().body.unwrap();
        assert!(body.contains("username=test%40example.com"));
        assert!(body.contains("password=password"));
    }

    #[tokio::test]
    async fn test_logout_clears_token() {
        let (client, mock) = client_with_mock();
        client.set_token("fake_token");
        mock.set_default_response(MockResponse::json(200, json!({"message": "Successfully logged out"})));

        let response = client.logout().await.unwrap();
        assert_eq!(response.message.as_deref(), Some("Successfully logged out"));
        assert!(client.token().is_none());
        assert_eq!(
            mock.last_request().unwrap().headers.get("Authorization").map(String::as_str),
            Some("Bearer fake_token")
        );
    }

    #[tokio::test]
    async fn test_logout_clears_token_on_failure() {
        let (client, mock) = client_with_mock();
        client.set_token("expired");
        mock.set_default_response(MockResponse::json(401, json!({"detail": "Token expired"})));

        assert!(client.logout().await.is_err());
        assert!(client.token().is_none());
    }
}
