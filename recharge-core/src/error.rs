//! Error taxonomy shared by the storefront operations.
use thiserror::Error;

/// Form validation failures. Shown inline; no request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Mobile number must be exactly {expected} digits")]
    MobileLength { expected: usize },
    #[error("Mobile number may only contain digits")]
    MobileDigits,
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Passwords do not match!")]
    PasswordMismatch,
    #[error("Price must be greater than zero")]
    InvalidPrice,
}

/// Failures talking to the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP reply.
    #[error("Network error: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The server answered successfully but flagged the operation as failed.
    #[error("{0}")]
    Rejected(String),
    /// The reply body could not be understood.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Message suitable for a user-facing notice.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => {
                "Request failed. Please check if the server is running.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Failures of the recharge flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RechargeError {
    /// The session is not logged in; the caller should show the login view.
    #[error("Please login first!")]
    LoginRequired,
    /// The remote write failed; nothing was mirrored locally.
    #[error("Recharge failed: {0}")]
    Remote(#[from] ApiError),
}

/// Failures of operations that need an admin session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    #[error("Admin access required")]
    NotAdmin,
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Failures of login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Could not save the session: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_read_like_notices() {
        assert_eq!(
            ValidationError::MobileLength { expected: 10 }.to_string(),
            "Mobile number must be exactly 10 digits"
        );
        assert_eq!(
            RechargeError::Remote(ApiError::Rejected("Plan expired".into())).to_string(),
            "Recharge failed: Plan expired"
        );
        assert_eq!(
            ApiError::Status {
                status: 500,
                message: "Internal Server Error".into()
            }
            .user_message(),
            "Internal Server Error"
        );
        assert!(
            ApiError::Transport("offline".into())
                .user_message()
                .contains("server is running")
        );
    }
}
