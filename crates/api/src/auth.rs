// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Callers authenticate with a signed HS256 bearer token carrying their id,
//! email and role. A token that is missing, malformed, expired, signed with
//! another key, or names an unknown role is treated as anonymous; it never
//! produces an error of its own.

use std::str::FromStr;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use reserva::{Capability, Principal};
use reserva_domain::{Role, User};
use reserva_persistence::{Persistence, UserCredentials};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::{ApiError, AuthError};

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The user's id.
    pub id: i64,
    /// The user's email.
    pub email: String,
    /// The user's role.
    pub role: Role,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    #[must_use]
    pub const fn new(id: i64, email: String, role: Role) -> Self {
        Self { id, email, role }
    }

    /// The `{id, role}` pair the reservation engine works with.
    #[must_use]
    pub const fn principal(&self) -> Principal {
        Principal::new(self.id, self.role)
    }
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub id: i64,
    /// User email.
    pub email: String,
    /// Role name.
    pub role: String,
    /// Issued at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// A freshly signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// The encoded token.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: OffsetDateTime,
}

/// Signs and verifies access tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Creates a token service for a shared secret.
    ///
    /// # Arguments
    ///
    /// * `secret` - The HMAC secret
    /// * `ttl` - How long issued tokens remain valid
    #[must_use]
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    /// Issues a token for a user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if signing fails.
    pub fn issue(&self, user: &User, now: OffsetDateTime) -> Result<IssuedToken, ApiError> {
        let expires_at: OffsetDateTime = now + self.ttl;
        let claims: Claims = Claims {
            id: user.user_id,
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            iat: now.unix_timestamp(),
            exp: expires_at.unix_timestamp(),
        };
        self.sign(&claims).map(|token| IssuedToken { token, expires_at })
    }

    /// Signs arbitrary claims.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Internal` if signing fails.
    pub fn sign(&self, claims: &Claims) -> Result<String, ApiError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            ApiError::Internal {
                message: format!("Failed to sign token: {e}"),
            }
        })
    }

    /// Verifies a raw token.
    ///
    /// Returns `None` for any token that does not resolve to a known role.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<AuthenticatedUser> {
        let claims: Claims = match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                debug!(error = %e, "Rejected access token");
                return None;
            }
        };

        let Ok(role) = Role::from_str(&claims.role) else {
            warn!(role = %claims.role, user_id = claims.id, "Token names an unknown role");
            return None;
        };

        Some(AuthenticatedUser::new(claims.id, claims.email, role))
    }

    /// Resolves the caller from an `Authorization` header value.
    ///
    /// Accepts `Bearer <token>`; anything else is anonymous.
    #[must_use]
    pub fn authenticate(&self, authorization_header: Option<&str>) -> Option<AuthenticatedUser> {
        let token: &str = authorization_header?.strip_prefix("Bearer ")?.trim();
        if token.is_empty() {
            return None;
        }
        self.verify(token)
    }
}

/// Authentication service for credential checks and session resolution.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Checks an email and password and issues a token.
    ///
    /// Unknown emails and wrong passwords fail identically.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthenticationFailed` on bad credentials.
    pub fn login(
        persistence: &mut Persistence,
        tokens: &TokenService,
        email: &str,
        password: &str,
        now: OffsetDateTime,
    ) -> Result<(IssuedToken, User), ApiError> {
        let credentials: Option<UserCredentials> =
            persistence.get_credentials_by_email(email.trim())?;

        let Some(credentials) = credentials else {
            warn!(email = %email, "Login attempt for unknown email");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid email or password"),
            }
            .into());
        };

        if !persistence.verify_password(password, &credentials.password_hash)? {
            warn!(user_id = credentials.user.user_id, "Login attempt with wrong password");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid email or password"),
            }
            .into());
        }

        let issued: IssuedToken = tokens.issue(&credentials.user, now)?;
        info!(user_id = credentials.user.user_id, "User logged in");
        Ok((issued, credentials.user))
    }

    /// Resolves the caller and re-reads their account.
    ///
    /// The returned role and email are the stored ones, so a demotion or
    /// deletion takes effect before the token expires.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the header does not
    /// carry a valid token or the account no longer exists.
    pub fn resolve(
        persistence: &mut Persistence,
        tokens: &TokenService,
        authorization_header: Option<&str>,
    ) -> Result<AuthenticatedUser, ApiError> {
        let claimed: AuthenticatedUser =
            tokens
                .authenticate(authorization_header)
                .ok_or_else(|| AuthError::AuthenticationFailed {
                    reason: String::from("A valid bearer token is required"),
                })?;

        let user: User =
            persistence
                .get_user(claimed.id)?
                .ok_or_else(|| AuthError::AuthenticationFailed {
                    reason: String::from("The account no longer exists"),
                })?;

        Ok(AuthenticatedUser::new(user.user_id, user.email, user.role))
    }
}

/// Authorization service for enforcing role-based access control.
///
/// Reservation rules live in the lifecycle manager; these checks cover
/// entity management.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require(
        allowed: Capability,
        action: &str,
        required_role: &str,
    ) -> Result<(), AuthError> {
        if allowed.is_allowed() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: required_role.to_string(),
            })
        }
    }

    /// Checks if an actor may list users.
    ///
    /// # Errors
    ///
    /// Returns an error unless the actor is a Coordinator or Administrator.
    pub fn authorize_list_users(actor: &AuthenticatedUser) -> Result<(), AuthError> {
        let allowed: Capability = actor.principal().capabilities().can_view_users;
        Self::require(allowed, "list_users", "Coordinator or Administrator")
    }

    /// Checks if an actor may view one user.
    ///
    /// Everyone may view their own account.
    ///
    /// # Errors
    ///
    /// Returns an error unless the actor is the target or may view users.
    pub fn authorize_view_user(actor: &AuthenticatedUser, user_id: i64) -> Result<(), AuthError> {
        if actor.id == user_id {
            return Ok(());
        }
        let allowed: Capability = actor.principal().capabilities().can_view_users;
        Self::require(allowed, "view_user", "Coordinator or Administrator")
    }

    /// Checks if an actor may create, edit or delete users.
    ///
    /// # Errors
    ///
    /// Returns an error unless the actor is an Administrator.
    pub fn authorize_manage_users(actor: &AuthenticatedUser) -> Result<(), AuthError> {
        let allowed: Capability = actor.principal().capabilities().can_manage_users;
        Self::require(allowed, "manage_users", "Administrator")
    }

    /// Checks if an actor may create, edit or delete departments.
    ///
    /// # Errors
    ///
    /// Returns an error unless the actor is an Administrator.
    pub fn authorize_manage_departments(actor: &AuthenticatedUser) -> Result<(), AuthError> {
        let allowed: Capability = actor.principal().capabilities().can_manage_departments;
        Self::require(allowed, "manage_departments", "Administrator")
    }

    /// Checks if an actor may create, edit or delete spaces.
    ///
    /// # Errors
    ///
    /// Returns an error unless the actor is an Administrator.
    pub fn authorize_manage_spaces(actor: &AuthenticatedUser) -> Result<(), AuthError> {
        let allowed: Capability = actor.principal().capabilities().can_manage_spaces;
        Self::require(allowed, "manage_spaces", "Administrator")
    }
}
