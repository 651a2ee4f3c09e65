use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No admin password is configured, so operator mode cannot be entered.
    #[error("operator mode is not configured")]
    Unavailable,

    #[error("invalid operator password")]
    InvalidPassword,

    /// Operator mode can only be toggled after a successful login.
    #[error("operator is not authenticated")]
    NotAuthenticated,

    #[error("operator mode is required for this action")]
    OperatorModeRequired,
}

/// Operator login state for one storefront session.
#[derive(Clone, Default)]
pub struct OperatorSession {
    password: Option<String>,
    authenticated: bool,
    operator_mode: bool,
}

impl fmt::Debug for OperatorSession {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("OperatorSession")
            .field("configured", &self.password.is_some())
            .field("authenticated", &self.authenticated)
            .field("operator_mode", &self.operator_mode)
            .finish()
    }
}

impl OperatorSession {
    pub fn new(password: Option<String>) -> Self {
        Self {
            password: password.filter(|value| !value.is_empty()),
            authenticated: false,
            operator_mode: false,
        }
    }

    /// A correct password authenticates the session and enters operator mode.
    pub fn login(&mut self, attempt: &str) -> Result<(), AuthError> {
        let Some(expected) = self.password.as_deref() else {
            return Err(AuthError::Unavailable);
        };

        if !constant_time_eq(expected.as_bytes(), attempt.as_bytes()) {
            return Err(AuthError::InvalidPassword);
        }

        self.authenticated = true;
        self.operator_mode = true;
        Ok(())
    }

    /// Flip operator mode on or off without logging out. Returns the new mode.
    pub fn toggle(&mut self) -> Result<bool, AuthError> {
        if !self.authenticated {
            return Err(AuthError::NotAuthenticated);
        }

        self.operator_mode = !self.operator_mode;
        Ok(self.operator_mode)
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
        self.operator_mode = false;
    }

    pub fn is_operator(&self) -> bool {
        self.operator_mode
    }

    pub fn require_operator(&self) -> Result<(), AuthError> {
        if self.operator_mode {
            Ok(())
        } else {
            Err(AuthError::OperatorModeRequired)
        }
    }
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }

    left.iter()
        .zip(right)
        .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}
