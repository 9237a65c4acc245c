// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Department management handlers.

use reserva_domain::{
    Department, DepartmentType, Role, User, validate_department_code, validate_description,
    validate_name,
};
use reserva_persistence::{NewDepartment, Persistence, PersistenceError};
use tracing::{debug, info};

use super::{department_info, parse_enum};
use crate::auth::{AuthenticatedUser, AuthorizationService};
use crate::error::ApiError;
use crate::request_response::{
    DepartmentInfo, DepartmentRequest, ListDepartmentsResponse, MessageResponse,
};

/// A department request after field validation.
struct ValidDepartment {
    name: String,
    code: String,
    department_type: DepartmentType,
    description: Option<String>,
    head_user_id: Option<i64>,
}

fn validate(request: &DepartmentRequest) -> Result<ValidDepartment, ApiError> {
    Ok(ValidDepartment {
        name: validate_name("name", &request.name)?,
        code: validate_department_code(&request.code)?,
        department_type: parse_enum(&request.department_type)?,
        description: validate_description(request.description.as_deref())?,
        head_user_id: request.head_user_id,
    })
}

/// Checks that a prospective head exists, is a Coordinator, and heads no
/// department other than `department_id`.
fn check_head(
    persistence: &mut Persistence,
    head_user_id: Option<i64>,
    department_id: Option<i64>,
) -> Result<(), ApiError> {
    let Some(head_id) = head_user_id else {
        return Ok(());
    };

    let head: User = persistence
        .get_user(head_id)?
        .ok_or_else(|| ApiError::not_found("User", head_id))?;

    if head.role != Role::Coordinator {
        return Err(ApiError::invalid(format!(
            "Department head must be a Coordinator, but {} is a {}",
            head.name, head.role
        )));
    }

    if let Some(existing) = persistence.find_department_headed_by(head_id)?
        && Some(existing.department_id) != department_id
    {
        return Err(ApiError::conflict(
            "single_department_head",
            format!("{} already heads department {}", head.name, existing.code),
        ));
    }

    Ok(())
}

fn code_taken(err: PersistenceError, code: &str) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(_) => ApiError::conflict(
            "unique_department_code",
            format!("A department with code '{code}' already exists"),
        ),
        other => other.into(),
    }
}

/// Lists all departments.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_departments(
    persistence: &mut Persistence,
) -> Result<ListDepartmentsResponse, ApiError> {
    let departments: Vec<Department> = persistence.list_departments()?;
    debug!(count = departments.len(), "Listed departments");
    Ok(ListDepartmentsResponse {
        departments: departments.into_iter().map(department_info).collect(),
    })
}

/// Fetches one department.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the department does not exist.
pub fn get_department(
    persistence: &mut Persistence,
    department_id: i64,
) -> Result<DepartmentInfo, ApiError> {
    persistence
        .get_department(department_id)?
        .map(department_info)
        .ok_or_else(|| ApiError::not_found("Department", department_id))
}

/// Creates a department.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Administrator
/// - A field is invalid or the head is not a Coordinator
/// - The code is taken or the head already leads a department
pub fn create_department(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    request: &DepartmentRequest,
) -> Result<DepartmentInfo, ApiError> {
    AuthorizationService::authorize_manage_departments(actor)?;
    let valid: ValidDepartment = validate(request)?;

    let department: Department =
        persistence.immediate_transaction(|p| -> Result<Department, ApiError> {
            check_head(p, valid.head_user_id, None)?;

            let department_id: i64 = p
                .create_department(&NewDepartment {
                    name: valid.name.clone(),
                    code: valid.code.clone(),
                    department_type: valid.department_type,
                    description: valid.description.clone(),
                    head_user_id: valid.head_user_id,
                })
                .map_err(|e| code_taken(e, &valid.code))?;

            p.get_department(department_id)?
                .ok_or_else(|| ApiError::not_found("Department", department_id))
        })?;

    info!(
        department_id = department.department_id,
        code = %department.code,
        actor = actor.id,
        "Created department"
    );
    Ok(department_info(department))
}

/// Replaces a department.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Administrator
/// - The department does not exist
/// - A field is invalid or the head is not a Coordinator
/// - The code is taken or the head already leads another department
pub fn update_department(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    department_id: i64,
    request: &DepartmentRequest,
) -> Result<DepartmentInfo, ApiError> {
    AuthorizationService::authorize_manage_departments(actor)?;
    let valid: ValidDepartment = validate(request)?;

    let department: Department =
        persistence.immediate_transaction(|p| -> Result<Department, ApiError> {
            if p.get_department(department_id)?.is_none() {
                return Err(ApiError::not_found("Department", department_id));
            }
            check_head(p, valid.head_user_id, Some(department_id))?;

            let department: Department = Department {
                department_id,
                name: valid.name,
                code: valid.code,
                department_type: valid.department_type,
                description: valid.description,
                head_user_id: valid.head_user_id,
            };
            p.update_department(&department)
                .map_err(|e| code_taken(e, &department.code))?;
            Ok(department)
        })?;

    info!(department_id, actor = actor.id, "Updated department");
    Ok(department_info(department))
}

/// Deletes a department; its members become unassigned.
///
/// # Errors
///
/// Returns an error if the actor is not an Administrator or the department
/// does not exist.
pub fn delete_department(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    department_id: i64,
) -> Result<MessageResponse, ApiError> {
    AuthorizationService::authorize_manage_departments(actor)?;

    if persistence.get_department(department_id)?.is_none() {
        return Err(ApiError::not_found("Department", department_id));
    }
    persistence.delete_department(department_id)?;

    info!(department_id, actor = actor.id, "Deleted department");
    Ok(MessageResponse {
        message: format!("Department {department_id} deleted"),
    })
}
