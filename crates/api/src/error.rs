// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use reserva::{ConflictKind, CoreError};
use reserva_domain::DomainError;
use reserva_persistence::PersistenceError;
use tracing::error;

use crate::password_policy::PasswordPolicyError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// Each variant corresponds to exactly one HTTP status class, so the server
/// can map them without inspecting messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller is not authenticated or presented bad credentials.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller is authenticated but may not perform the operation.
    Forbidden {
        /// A human-readable description of the refusal.
        reason: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The operation clashes with existing data or the current state.
    Conflict {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Forbidden { reason } => write!(f, "{reason}"),
            Self::InvalidInput { message }
            | Self::ResourceNotFound { message, .. }
            | Self::Conflict { message, .. } => write!(f, "{message}"),
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub(crate) fn conflict(rule: &str, message: impl Into<String>) -> Self {
        Self::Conflict {
            rule: rule.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn not_found(resource_type: &str, id: i64) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message: format!("{resource_type} {id} not found"),
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized { .. } => Self::Forbidden {
                reason: err.to_string(),
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(&err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// Every domain error is an input problem; the message is passed through
/// unchanged so clients see which rule failed.
#[must_use]
pub fn translate_domain_error(err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        message: err.to_string(),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(&domain_err),
        CoreError::Validation(message) => ApiError::InvalidInput { message },
        CoreError::NotFound { resource, .. } => ApiError::ResourceNotFound {
            resource_type: resource.to_string(),
            message: err.to_string(),
        },
        CoreError::Forbidden(reason) => ApiError::Forbidden { reason },
        CoreError::ReservationConflict(ref conflict) => {
            let rule: &str = match conflict.kind {
                ConflictKind::Space => "space_double_booking",
                ConflictKind::User => "user_double_booking",
            };
            ApiError::conflict(rule, err.to_string())
        }
        CoreError::Conflict(message) => ApiError::conflict("reservation_state", message),
        CoreError::Store(message) => {
            error!(error = %message, "Reservation store failure");
            ApiError::Internal { message }
        }
    }
}

/// Translates a persistence error into an API error.
///
/// Handlers that know which unique column a write touches map
/// `UniqueViolation` themselves to give a precise message; this is the
/// fallback.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(message) => ApiError::conflict("unique_field", message),
        PersistenceError::ForeignKeyViolation(message) => ApiError::InvalidInput {
            message: format!("Referenced record does not exist: {message}"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        other => {
            error!(error = %other, "Persistence failure");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}
