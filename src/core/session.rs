//! # Session
//!
//! The signed-in user as seen by the screens. Issued elsewhere (config/env);
//! this module only reads it. Passed explicitly to whatever needs it rather
//! than living in a global.

/// Current user identity and auth token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user_name: String,
    mobile_number: String,
    token: Option<String>,
}

impl Session {
    pub fn new(user_name: &str, mobile_number: &str, token: Option<String>) -> Self {
        Self {
            user_name: user_name.to_string(),
            mobile_number: mobile_number.to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    /// A visitor with no token. Can browse, cannot write.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn mobile_number(&self) -> &str {
        &self.mobile_number
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Gates favourite and send-interest actions.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
