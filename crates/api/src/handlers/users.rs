// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User management handlers.
//!
//! Every change that could remove the last administrator, or leave a
//! department headed by a non-coordinator, runs in one write transaction
//! with the check that guards it.

use reserva_domain::{Department, Role, User, validate_email, validate_name};
use reserva_persistence::{NewUser, Persistence, PersistenceError};
use tracing::{debug, info};

use super::{parse_enum, user_info};
use crate::auth::{AuthenticatedUser, AuthorizationService};
use crate::error::ApiError;
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    CreateUserRequest, ListUsersQuery, ListUsersResponse, MessageResponse, UpdateUserRequest,
    UserInfo,
};

/// Maps a unique violation on insert or update of a user to a precise
/// conflict.
pub(crate) fn email_taken(err: PersistenceError, email: &str) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(_) => ApiError::conflict(
            "unique_email",
            format!("A user with email '{email}' already exists"),
        ),
        other => other.into(),
    }
}

fn require_department(
    persistence: &mut Persistence,
    department_id: Option<i64>,
) -> Result<(), ApiError> {
    if let Some(id) = department_id
        && persistence.get_department(id)?.is_none()
    {
        return Err(ApiError::not_found("Department", id));
    }
    Ok(())
}

fn ensure_not_last_administrator(
    persistence: &mut Persistence,
    user: &User,
    action: &str,
) -> Result<(), ApiError> {
    if user.role == Role::Administrator
        && persistence.count_users_with_role(Role::Administrator)? <= 1
    {
        return Err(ApiError::conflict(
            "last_administrator",
            format!("Cannot {action} the last administrator"),
        ));
    }
    Ok(())
}

/// Lists users, optionally narrowed by role and department.
///
/// # Errors
///
/// Returns an error unless the actor is a Coordinator or Administrator, or
/// if the role filter is not a role name.
pub fn list_users(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    query: &ListUsersQuery,
) -> Result<ListUsersResponse, ApiError> {
    AuthorizationService::authorize_list_users(actor)?;

    let role: Option<Role> = query.role.as_deref().map(parse_enum::<Role>).transpose()?;
    let users: Vec<User> = persistence.list_users(role, query.department_id)?;
    debug!(count = users.len(), "Listed users");

    Ok(ListUsersResponse {
        users: users.into_iter().map(user_info).collect(),
    })
}

/// Fetches one user.
///
/// # Errors
///
/// Returns an error if the actor may not view the user or it does not exist.
pub fn get_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    user_id: i64,
) -> Result<UserInfo, ApiError> {
    AuthorizationService::authorize_view_user(actor, user_id)?;

    persistence
        .get_user(user_id)?
        .map(user_info)
        .ok_or_else(|| ApiError::not_found("User", user_id))
}

/// Creates a user.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Administrator
/// - A field or the password is invalid
/// - The department does not exist
/// - The email is already registered
pub fn create_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    request: &CreateUserRequest,
) -> Result<UserInfo, ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;

    let name: String = validate_name("name", &request.name)?;
    let email: String = validate_email(&request.email)?;
    let role: Role = parse_enum(&request.role)?;
    PasswordPolicy::default().validate(
        &request.password,
        &request.password_confirmation,
        &email,
        &name,
    )?;

    require_department(persistence, request.department_id)?;

    let user_id: i64 = persistence
        .create_user(&NewUser {
            name,
            email: email.clone(),
            password: request.password.clone(),
            role,
            department_id: request.department_id,
        })
        .map_err(|e| email_taken(e, &email))?;

    info!(user_id, role = %role, actor = actor.id, "Created user");

    persistence
        .get_user(user_id)?
        .map(user_info)
        .ok_or_else(|| ApiError::not_found("User", user_id))
}

/// Replaces a user's profile.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Administrator
/// - The user or department does not exist
/// - A field is invalid or the email is taken
/// - The change demotes the last administrator
/// - The change demotes a coordinator who heads a department
pub fn update_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    user_id: i64,
    request: &UpdateUserRequest,
) -> Result<UserInfo, ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;

    let name: String = validate_name("name", &request.name)?;
    let email: String = validate_email(&request.email)?;
    let role: Role = parse_enum(&request.role)?;

    let updated: User = persistence.immediate_transaction(|p| -> Result<User, ApiError> {
        let current: User = p
            .get_user(user_id)?
            .ok_or_else(|| ApiError::not_found("User", user_id))?;

        if current.role != role {
            ensure_not_last_administrator(p, &current, "demote")?;

            if current.role == Role::Coordinator {
                let headed: Option<Department> = p.find_department_headed_by(user_id)?;
                if let Some(department) = headed {
                    return Err(ApiError::conflict(
                        "department_head_role",
                        format!(
                            "User {user_id} heads department {}; assign another head first",
                            department.code
                        ),
                    ));
                }
            }
        }

        require_department(p, request.department_id)?;

        let user: User = User {
            user_id,
            name,
            email: email.clone(),
            role,
            department_id: request.department_id,
        };
        p.update_user(&user).map_err(|e| email_taken(e, &email))?;
        Ok(user)
    })?;

    info!(user_id, role = %updated.role, actor = actor.id, "Updated user");
    Ok(user_info(updated))
}

/// Deletes a user and their reservations.
///
/// # Errors
///
/// Returns an error if the actor is not an Administrator, the user does not
/// exist, or the user is the last administrator.
pub fn delete_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    user_id: i64,
) -> Result<MessageResponse, ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;

    persistence.immediate_transaction(|p| -> Result<(), ApiError> {
        let user: User = p
            .get_user(user_id)?
            .ok_or_else(|| ApiError::not_found("User", user_id))?;
        ensure_not_last_administrator(p, &user, "delete")?;
        p.delete_user(user_id)?;
        Ok(())
    })?;

    info!(user_id, actor = actor.id, "Deleted user");
    Ok(MessageResponse {
        message: format!("User {user_id} deleted"),
    })
}
