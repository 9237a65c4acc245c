// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Login, bootstrap and self-service account handlers.

use reserva::Capabilities;
use reserva_domain::{Role, User, validate_email, validate_name};
use reserva_persistence::{NewUser, Persistence};
use time::OffsetDateTime;
use tracing::info;

use super::user_info;
use super::users::email_taken;
use crate::auth::{AuthenticatedUser, AuthenticationService, IssuedToken, TokenService};
use crate::error::{ApiError, AuthError};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    BootstrapRequest, ChangePasswordRequest, LoginRequest, LoginResponse, MeResponse,
    MessageResponse,
};

fn login_response(issued: IssuedToken, user: User) -> LoginResponse {
    LoginResponse {
        token: issued.token,
        token_type: String::from("Bearer"),
        expires_at: issued.expires_at.unix_timestamp(),
        user: user_info(user),
    }
}

/// Creates the first administrator and logs them in.
///
/// # Errors
///
/// Returns an error if:
/// - The name, email or password is invalid
/// - An administrator already exists
pub fn bootstrap(
    persistence: &mut Persistence,
    tokens: &TokenService,
    request: &BootstrapRequest,
    now: OffsetDateTime,
) -> Result<LoginResponse, ApiError> {
    let name: String = validate_name("name", &request.name)?;
    let email: String = validate_email(&request.email)?;
    PasswordPolicy::default().validate(
        &request.password,
        &request.password_confirmation,
        &email,
        &name,
    )?;

    let user: User = persistence.immediate_transaction(|p| -> Result<User, ApiError> {
        if p.count_users_with_role(Role::Administrator)? > 0 {
            return Err(ApiError::conflict(
                "bootstrap_closed",
                "An administrator already exists; bootstrap is no longer available",
            ));
        }

        let user_id: i64 = p
            .create_user(&NewUser {
                name: name.clone(),
                email: email.clone(),
                password: request.password.clone(),
                role: Role::Administrator,
                department_id: None,
            })
            .map_err(|e| email_taken(e, &email))?;

        p.get_user(user_id)?.ok_or_else(|| ApiError::Internal {
            message: format!("User {user_id} missing after creation"),
        })
    })?;

    info!(user_id = user.user_id, "Bootstrapped first administrator");
    let issued: IssuedToken = tokens.issue(&user, now)?;
    Ok(login_response(issued, user))
}

/// Logs in with email and password.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` on bad credentials.
pub fn login(
    persistence: &mut Persistence,
    tokens: &TokenService,
    request: &LoginRequest,
    now: OffsetDateTime,
) -> Result<LoginResponse, ApiError> {
    let (issued, user) =
        AuthenticationService::login(persistence, tokens, &request.email, &request.password, now)?;
    Ok(login_response(issued, user))
}

/// Returns the caller's account and capabilities.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if the account is gone.
pub fn me(persistence: &mut Persistence, actor: &AuthenticatedUser) -> Result<MeResponse, ApiError> {
    let user: User = persistence
        .get_user(actor.id)?
        .ok_or_else(|| AuthError::AuthenticationFailed {
            reason: String::from("The account no longer exists"),
        })?;

    Ok(MeResponse {
        capabilities: Capabilities::for_role(user.role),
        user: user_info(user),
    })
}

/// Changes the caller's own password.
///
/// # Errors
///
/// Returns an error if the current password is wrong or the new one
/// breaks the password policy.
pub fn change_password(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    request: &ChangePasswordRequest,
) -> Result<MessageResponse, ApiError> {
    let user: User = persistence
        .get_user(actor.id)?
        .ok_or_else(|| AuthError::AuthenticationFailed {
            reason: String::from("The account no longer exists"),
        })?;

    if !persistence.verify_user_password(user.user_id, &request.current_password)? {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Current password is incorrect"),
        }
        .into());
    }

    PasswordPolicy::default().validate(
        &request.new_password,
        &request.new_password_confirmation,
        &user.email,
        &user.name,
    )?;

    persistence.update_password(user.user_id, &request.new_password)?;
    info!(user_id = user.user_id, "Password changed");

    Ok(MessageResponse {
        message: String::from("Password changed"),
    })
}
