use services::{SignInRequest, SignUpOutcome, SignUpRequest};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    SignIn,
    ForgotPassword,
}

impl LoginMode {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            LoginMode::SignIn => "Welcome Back",
            LoginMode::ForgotPassword => "Reset Password",
        }
    }

    #[must_use]
    pub fn submit_label(self, busy: bool) -> &'static str {
        match (self, busy) {
            (LoginMode::SignIn, false) => "Sign In",
            (LoginMode::SignIn, true) => "Signing in...",
            (LoginMode::ForgotPassword, false) => "Send Reset Link",
            (LoginMode::ForgotPassword, true) => "Sending...",
        }
    }
}

/// Status line under an auth form.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Error(String),
    Notice(String),
}

impl FormStatus {
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, FormStatus::Submitting)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    #[must_use]
    pub fn to_request(&self) -> SignInRequest {
        SignInRequest {
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    #[must_use]
    pub fn to_request(&self) -> SignUpRequest {
        SignUpRequest {
            full_name: self.full_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }
}

#[must_use]
pub fn reset_notice() -> FormStatus {
    FormStatus::Notice("Password reset link sent! Check your email.".to_owned())
}

/// Status to show after a registration that did not sign the learner in.
#[must_use]
pub fn sign_up_status(outcome: &SignUpOutcome) -> FormStatus {
    match outcome {
        SignUpOutcome::SignedIn(_) => FormStatus::Idle,
        SignUpOutcome::ConfirmationRequired { email } => FormStatus::Notice(format!(
            "Registration successful! Check {email} to confirm your account."
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forms_trim_identity_fields() {
        let form = RegisterForm {
            full_name: " Asha ".into(),
            email: " asha@example.com ".into(),
            password: " secret ".into(),
            confirm_password: " secret ".into(),
        };
        let req = form.to_request();
        assert_eq!(req.full_name, "Asha");
        assert_eq!(req.email, "asha@example.com");
        assert_eq!(req.password, " secret ");
    }

    #[test]
    fn mode_labels() {
        assert_eq!(LoginMode::SignIn.submit_label(true), "Signing in...");
        assert_eq!(LoginMode::ForgotPassword.title(), "Reset Password");
    }

    #[test]
    fn confirmation_produces_notice() {
        let status = sign_up_status(&SignUpOutcome::ConfirmationRequired {
            email: "asha@example.com".into(),
        });
        assert!(matches!(status, FormStatus::Notice(msg) if msg.contains("asha@example.com")));
    }
}
