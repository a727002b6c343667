use async_trait::async_trait;
use learn_core::model::{Identity, UserId};
use serde::{Deserialize, Serialize};

use super::{SupabaseClient, send};
use crate::auth::{AuthProvider, SignInRequest, SignUpOutcome, SignUpRequest};
use crate::error::{AuthError, SupabaseError};

/// Email + password accounts on the hosted backend.
#[derive(Clone)]
pub struct SupabaseAuth {
    client: SupabaseClient,
}

impl SupabaseAuth {
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn sign_in(&self, request: &SignInRequest) -> Result<Identity, AuthError> {
        let body = Credentials {
            email: request.email.trim(),
            password: &request.password,
            data: None,
        };
        let response = send(
            self.client
                .post("/auth/v1/token?grant_type=password")
                .json(&body),
        )
        .await?;
        let session: SessionResponse = response.json().await.map_err(SupabaseError::from)?;
        let (token, user) = session
            .into_parts()
            .ok_or(AuthError::InvalidCredentials)?;
        self.client.set_access_token(Some(token));
        Ok(user.into_identity(request.email.trim()))
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, AuthError> {
        let email = request.email.trim();
        let body = Credentials {
            email,
            password: &request.password,
            data: Some(Metadata {
                full_name: Some(request.full_name.trim().to_owned()),
            }),
        };
        let response = send(self.client.post("/auth/v1/signup").json(&body)).await?;
        let session: SessionResponse = response.json().await.map_err(SupabaseError::from)?;
        match session.into_parts() {
            Some((token, user)) => {
                self.client.set_access_token(Some(token));
                Ok(SignUpOutcome::SignedIn(user.into_identity(email)))
            }
            None => Ok(SignUpOutcome::ConfirmationRequired {
                email: email.to_owned(),
            }),
        }
    }

    async fn sign_out(&self, _identity: &Identity) -> Result<(), AuthError> {
        let result = send(self.client.post("/auth/v1/logout")).await;
        self.client.set_access_token(None);
        result?;
        Ok(())
    }

    async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        send(
            self.client
                .post("/auth/v1/recover")
                .json(&serde_json::json!({ "email": email })),
        )
        .await?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Metadata>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Metadata {
    full_name: Option<String>,
}

/// Token response, or a bare user when email confirmation is pending.
#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: Option<String>,
    user: Option<AuthUser>,
}

impl SessionResponse {
    fn into_parts(self) -> Option<(String, AuthUser)> {
        Some((self.access_token?, self.user?))
    }
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: UserId,
    email: Option<String>,
    #[serde(default)]
    user_metadata: Option<Metadata>,
}

impl AuthUser {
    fn into_identity(self, fallback_email: &str) -> Identity {
        let full_name = self.user_metadata.and_then(|m| m.full_name);
        let email = self.email.unwrap_or_else(|| fallback_email.to_owned());
        Identity::new(self.id, email, full_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_confirmation_has_no_session() {
        let body: SessionResponse = serde_json::from_str(
            r#"{"id":"5f0c2f0e-8a3b-4d6f-9b6e-0a7c1d2e3f40","email":"asha@example.com"}"#,
        )
        .unwrap();
        assert!(body.into_parts().is_none());
    }

    #[test]
    fn session_user_becomes_identity() {
        let body: SessionResponse = serde_json::from_str(
            r#"{
                "access_token": "jwt",
                "token_type": "bearer",
                "user": {
                    "id": "5f0c2f0e-8a3b-4d6f-9b6e-0a7c1d2e3f40",
                    "email": "asha@example.com",
                    "user_metadata": {"full_name": "Asha Nair"}
                }
            }"#,
        )
        .unwrap();
        let (token, user) = body.into_parts().unwrap();
        assert_eq!(token, "jwt");
        let identity = user.into_identity("ignored@example.com");
        assert_eq!(identity.display_name(), "Asha Nair");
        assert_eq!(identity.email, "asha@example.com");
    }
}
