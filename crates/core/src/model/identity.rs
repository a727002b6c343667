use serde::{Deserialize, Serialize};

use crate::model::ids::UserId;

/// Name shown when a learner has neither a full name nor a usable email.
pub const FALLBACK_DISPLAY_NAME: &str = "Learner";

/// The signed-in learner, passed explicitly to operations that need a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub full_name: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn new(user_id: UserId, email: impl Into<String>, full_name: Option<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            full_name: full_name.filter(|n| !n.trim().is_empty()),
        }
    }

    /// Full name, else the part of the email before `@`, else `"Learner"`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if let Some(name) = self.full_name.as_deref() {
            return name;
        }
        match self.email.split('@').next() {
            Some(local) if !local.trim().is_empty() => local,
            _ => FALLBACK_DISPLAY_NAME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_full_name() {
        let id = Identity::new(UserId::random(), "asha@example.com", Some("Asha".into()));
        assert_eq!(id.display_name(), "Asha");
    }

    #[test]
    fn display_name_falls_back_to_email_then_default() {
        let id = Identity::new(UserId::random(), "ravi@example.com", Some("  ".into()));
        assert_eq!(id.display_name(), "ravi");

        let id = Identity::new(UserId::random(), "", None);
        assert_eq!(id.display_name(), FALLBACK_DISPLAY_NAME);
    }
}
