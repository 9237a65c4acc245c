// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reserva_domain::{Department, DepartmentType, Role};

use super::{create_test_user, new_persistence};
use crate::{NewDepartment, Persistence, PersistenceError};

fn new_department(code: &str, head_user_id: Option<i64>) -> NewDepartment {
    NewDepartment {
        name: format!("Department {code}"),
        code: code.to_string(),
        department_type: DepartmentType::Academic,
        description: Some(String::from("Teaching staff")),
        head_user_id,
    }
}

fn create(persistence: &mut Persistence, code: &str, head_user_id: Option<i64>) -> i64 {
    persistence
        .create_department(&new_department(code, head_user_id))
        .unwrap()
}

#[test]
fn test_create_and_get_department() {
    let mut persistence = new_persistence();
    let head = create_test_user(&mut persistence, "Carol", Role::Coordinator);
    let department_id = create(&mut persistence, "MATH", Some(head));

    let department: Department = persistence.get_department(department_id).unwrap().unwrap();
    assert_eq!(department.code, "MATH");
    assert_eq!(department.department_type, DepartmentType::Academic);
    assert_eq!(department.head_user_id, Some(head));
    assert_eq!(department.description.as_deref(), Some("Teaching staff"));
}

#[test]
fn test_department_codes_are_unique_regardless_of_case() {
    let mut persistence = new_persistence();
    create(&mut persistence, "MATH", None);

    assert!(matches!(
        persistence.create_department(&new_department("math", None)),
        Err(PersistenceError::UniqueViolation(_))
    ));
}

#[test]
fn test_a_head_leads_one_department() {
    let mut persistence = new_persistence();
    let head = create_test_user(&mut persistence, "Carol", Role::Coordinator);
    let math = create(&mut persistence, "MATH", Some(head));

    assert!(matches!(
        persistence.create_department(&new_department("PHYS", Some(head))),
        Err(PersistenceError::UniqueViolation(_))
    ));

    let headed = persistence.find_department_headed_by(head).unwrap().unwrap();
    assert_eq!(headed.department_id, math);
}

#[test]
fn test_list_departments_orders_by_code() {
    let mut persistence = new_persistence();
    create(&mut persistence, "PHYS", None);
    create(&mut persistence, "ART", None);

    let codes: Vec<String> = persistence
        .list_departments()
        .unwrap()
        .into_iter()
        .map(|d| d.code)
        .collect();
    assert_eq!(codes, vec!["ART", "PHYS"]);
}

#[test]
fn test_deleting_department_detaches_members() {
    let mut persistence = new_persistence();
    let department_id = create(&mut persistence, "MATH", None);
    let member = create_test_user(&mut persistence, "Alice", Role::Teacher);

    let mut user = persistence.get_user(member).unwrap().unwrap();
    user.department_id = Some(department_id);
    persistence.update_user(&user).unwrap();

    persistence.delete_department(department_id).unwrap();

    assert!(persistence.get_department(department_id).unwrap().is_none());
    assert_eq!(
        persistence.get_user(member).unwrap().unwrap().department_id,
        None
    );
}

#[test]
fn test_deleting_head_clears_department_head() {
    let mut persistence = new_persistence();
    let head = create_test_user(&mut persistence, "Carol", Role::Coordinator);
    let department_id = create(&mut persistence, "MATH", Some(head));

    persistence.delete_user(head).unwrap();

    let department = persistence.get_department(department_id).unwrap().unwrap();
    assert_eq!(department.head_user_id, None);
}

#[test]
fn test_update_department() {
    let mut persistence = new_persistence();
    let department_id = create(&mut persistence, "MATH", None);

    let mut department = persistence.get_department(department_id).unwrap().unwrap();
    department.department_type = DepartmentType::Research;
    department.description = None;
    persistence.update_department(&department).unwrap();

    assert_eq!(
        persistence.get_department(department_id).unwrap().unwrap(),
        department
    );
}

#[test]
fn test_unknown_department_head_is_rejected() {
    let mut persistence = new_persistence();

    assert!(matches!(
        persistence.create_department(&new_department("MATH", Some(404))),
        Err(PersistenceError::ForeignKeyViolation(_))
    ));
}
