//! Sign-in, sign-up and password reset.
//!
//! Forms are validated here once; providers receive well-formed requests.

mod local;

pub use local::LocalProfileAuth;

use std::sync::Arc;

use async_trait::async_trait;
use learn_core::model::Identity;
use tracing::{info, warn};

use crate::error::AuthError;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl SignInRequest {
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` when either field is blank.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpRequest {
    /// Checks run in order: all fields present, password length, confirmation.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as `AuthError`.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.full_name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(AuthError::MissingFields);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The account is usable right away.
    SignedIn(Identity),
    /// The backend sent a verification email first.
    ConfirmationRequired { email: String },
}

/// An identity backend.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for unknown accounts or wrong passwords.
    async fn sign_in(&self, request: &SignInRequest) -> Result<Identity, AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::EmailTaken` for an existing account, or backend errors.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError` if the backend rejects the call.
    async fn sign_out(&self, identity: &Identity) -> Result<(), AuthError>;

    /// Send a password reset link.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ResetUnsupported` for backends without email.
    async fn reset_password(&self, email: &str) -> Result<(), AuthError>;
}

/// Validates forms and delegates to the configured provider.
#[derive(Clone)]
pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
}

impl AuthService {
    #[must_use]
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }

    /// # Errors
    ///
    /// Returns validation errors before contacting the provider, then provider errors.
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<Identity, AuthError> {
        request.validate()?;
        let identity = self.provider.sign_in(request).await.inspect_err(|e| {
            warn!(error = %e, "sign-in failed");
        })?;
        info!(user_id = %identity.user_id, "signed in");
        Ok(identity)
    }

    /// # Errors
    ///
    /// Returns validation errors before contacting the provider, then provider errors.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome, AuthError> {
        request.validate()?;
        let outcome = self.provider.sign_up(request).await.inspect_err(|e| {
            warn!(error = %e, "sign-up failed");
        })?;
        let confirmation_required = matches!(outcome, SignUpOutcome::ConfirmationRequired { .. });
        info!(confirmation_required, "signed up");
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Returns `AuthError` if the provider rejects the call.
    pub async fn sign_out(&self, identity: &Identity) -> Result<(), AuthError> {
        self.provider.sign_out(identity).await?;
        info!(user_id = %identity.user_id, "signed out");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AuthError::MissingEmail` for a blank email, then provider errors.
    pub async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::MissingEmail);
        }
        self.provider.reset_password(email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up(name: &str, email: &str, pw: &str, confirm: &str) -> SignUpRequest {
        SignUpRequest {
            full_name: name.into(),
            email: email.into(),
            password: pw.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn sign_in_requires_both_fields() {
        let req = SignInRequest {
            email: "a@b.c".into(),
            password: String::new(),
        };
        assert!(matches!(req.validate(), Err(AuthError::MissingFields)));
    }

    #[test]
    fn sign_up_validation_order() {
        assert!(matches!(
            sign_up("", "a@b.c", "123", "456").validate(),
            Err(AuthError::MissingFields)
        ));
        assert!(matches!(
            sign_up("Asha", "a@b.c", "12345", "12345").validate(),
            Err(AuthError::PasswordTooShort)
        ));
        assert!(matches!(
            sign_up("Asha", "a@b.c", "123456", "1234567").validate(),
            Err(AuthError::PasswordMismatch)
        ));
        assert!(sign_up("Asha", "a@b.c", "123456", "123456").validate().is_ok());
    }
}
