use std::sync::Arc;

use async_trait::async_trait;
use learn_core::model::Identity;
use storage::repository::{NewProfile, ProfileRepository, StorageError};

use super::{AuthProvider, SignInRequest, SignUpOutcome, SignUpRequest};
use crate::Clock;
use crate::error::AuthError;

/// Offline profiles kept in the local database, each protected by a salted
/// Argon2 hash of its password.
#[derive(Clone)]
pub struct LocalProfileAuth {
    clock: Clock,
    profiles: Arc<dyn ProfileRepository>,
}

impl LocalProfileAuth {
    #[must_use]
    pub fn new(clock: Clock, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { clock, profiles }
    }
}

#[async_trait]
impl AuthProvider for LocalProfileAuth {
    async fn sign_in(&self, request: &SignInRequest) -> Result<Identity, AuthError> {
        self.profiles
            .find_by_email(&request.email)
            .await?
            .filter(|profile| profile.verify_password(&request.password))
            .map(|profile| profile.identity())
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, AuthError> {
        let profile = NewProfile::new(
            &request.email,
            Some(request.full_name.clone()),
            &request.password,
            self.clock.now(),
        )?;
        let stored = self
            .profiles
            .insert_profile(&profile)
            .await
            .map_err(|e| match e {
                StorageError::Conflict => AuthError::EmailTaken,
                other => AuthError::Storage(other),
            })?;
        Ok(SignUpOutcome::SignedIn(stored.identity()))
    }

    async fn sign_out(&self, _identity: &Identity) -> Result<(), AuthError> {
        Ok(())
    }

    async fn reset_password(&self, _email: &str) -> Result<(), AuthError> {
        Err(AuthError::ResetUnsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learn_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    use crate::auth::AuthService;

    fn service() -> AuthService {
        let provider = LocalProfileAuth::new(fixed_clock(), Arc::new(InMemoryRepository::new()));
        AuthService::new(Arc::new(provider))
    }

    fn registration(email: &str) -> SignUpRequest {
        SignUpRequest {
            full_name: "Asha Nair".into(),
            email: email.into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        }
    }

    #[tokio::test]
    async fn sign_up_then_sign_in() {
        let auth = service();
        let SignUpOutcome::SignedIn(created) =
            auth.sign_up(&registration("asha@example.com")).await.unwrap()
        else {
            panic!("local sign-up signs in immediately");
        };
        assert_eq!(created.display_name(), "Asha Nair");

        let signed_in = auth
            .sign_in(&SignInRequest {
                email: "ASHA@example.com".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();
        assert_eq!(signed_in.user_id, created.user_id);
    }

    #[tokio::test]
    async fn wrong_password_cannot_sign_in() {
        let auth = service();
        auth.sign_up(&registration("asha@example.com")).await.unwrap();

        for password in ["secret2", "Secret1", "secret"] {
            let err = auth
                .sign_in(&SignInRequest {
                    email: "asha@example.com".into(),
                    password: password.into(),
                })
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials), "{password}");
        }
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let auth = service();
        auth.sign_up(&registration("asha@example.com")).await.unwrap();
        let err = auth
            .sign_up(&registration("asha@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn unknown_email_cannot_sign_in() {
        let err = service()
            .sign_in(&SignInRequest {
                email: "nobody@example.com".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn reset_is_unsupported_offline() {
        let err = service().reset_password("asha@example.com").await.unwrap_err();
        assert!(matches!(err, AuthError::ResetUnsupported));

        let err = service().reset_password("  ").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingEmail));
    }
}
