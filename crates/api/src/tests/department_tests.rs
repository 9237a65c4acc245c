// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for department management.

use reserva_domain::Role;

use super::helpers::{new_persistence, seed_user};
use crate::handlers::departments::{
    create_department, delete_department, get_department, list_departments, update_department,
};
use crate::{ApiError, DepartmentRequest};

fn request(code: &str, head_user_id: Option<i64>) -> DepartmentRequest {
    DepartmentRequest {
        name: format!("Department of {code}"),
        code: code.to_string(),
        department_type: String::from("Academic"),
        description: Some(String::from("  ")),
        head_user_id,
    }
}

#[test]
fn test_create_department_normalizes_fields() {
    let mut persistence = new_persistence();
    let admin = seed_user(&mut persistence, "Ada", Role::Administrator);

    let created = create_department(&mut persistence, &admin, &request("math", None)).unwrap();

    assert_eq!(created.code, "MATH");
    assert_eq!(created.department_type, "Academic");
    assert_eq!(created.description, None);
    assert_eq!(
        get_department(&mut persistence, created.department_id).unwrap(),
        created
    );
}

#[test]
fn test_only_administrators_manage_departments() {
    let mut persistence = new_persistence();
    let coordinator = seed_user(&mut persistence, "Carl", Role::Coordinator);

    assert!(matches!(
        create_department(&mut persistence, &coordinator, &request("MATH", None)),
        Err(ApiError::Forbidden { .. })
    ));
}

#[test]
fn test_invalid_department_fields_are_rejected() {
    let mut persistence = new_persistence();
    let admin = seed_user(&mut persistence, "Ada", Role::Administrator);

    let mut bad_type = request("MATH", None);
    bad_type.department_type = String::from("Sports");
    assert!(matches!(
        create_department(&mut persistence, &admin, &bad_type),
        Err(ApiError::InvalidInput { .. })
    ));

    assert!(matches!(
        create_department(&mut persistence, &admin, &request("M", None)),
        Err(ApiError::InvalidInput { .. })
    ));
}

#[test]
fn test_duplicate_code_is_a_conflict() {
    let mut persistence = new_persistence();
    let admin = seed_user(&mut persistence, "Ada", Role::Administrator);
    create_department(&mut persistence, &admin, &request("MATH", None)).unwrap();

    let result = create_department(&mut persistence, &admin, &request("Math", None));

    assert!(
        matches!(result, Err(ApiError::Conflict { ref rule, .. }) if rule == "unique_department_code")
    );
}

#[test]
fn test_head_must_be_a_coordinator() {
    let mut persistence = new_persistence();
    let admin = seed_user(&mut persistence, "Ada", Role::Administrator);
    let teacher = seed_user(&mut persistence, "Tom", Role::Teacher);

    assert!(matches!(
        create_department(&mut persistence, &admin, &request("MATH", Some(teacher.id))),
        Err(ApiError::InvalidInput { .. })
    ));
    assert!(matches!(
        create_department(&mut persistence, &admin, &request("MATH", Some(404))),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_coordinator_heads_one_department() {
    let mut persistence = new_persistence();
    let admin = seed_user(&mut persistence, "Ada", Role::Administrator);
    let carl = seed_user(&mut persistence, "Carl", Role::Coordinator);

    let math = create_department(&mut persistence, &admin, &request("MATH", Some(carl.id))).unwrap();

    let second = create_department(&mut persistence, &admin, &request("PHYS", Some(carl.id)));
    assert!(
        matches!(second, Err(ApiError::Conflict { ref rule, .. }) if rule == "single_department_head")
    );

    // Re-saving the department Carl already heads is fine.
    let mut rename = request("MATH", Some(carl.id));
    rename.name = String::from("Mathematics");
    let updated =
        update_department(&mut persistence, &admin, math.department_id, &rename).unwrap();
    assert_eq!(updated.name, "Mathematics");
    assert_eq!(updated.head_user_id, Some(carl.id));
}

#[test]
fn test_delete_department() {
    let mut persistence = new_persistence();
    let admin = seed_user(&mut persistence, "Ada", Role::Administrator);
    let math = create_department(&mut persistence, &admin, &request("MATH", None)).unwrap();

    delete_department(&mut persistence, &admin, math.department_id).unwrap();

    assert!(list_departments(&mut persistence).unwrap().departments.is_empty());
    assert!(matches!(
        delete_department(&mut persistence, &admin, math.department_id),
        Err(ApiError::ResourceNotFound { .. })
    ));
}
