// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the password policy.

use crate::{PasswordPolicy, PasswordPolicyError};

fn check(password: &str) -> Result<(), PasswordPolicyError> {
    PasswordPolicy::default().validate(password, password, "ana@school.edu", "Ana Lima")
}

#[test]
fn test_strong_password_is_accepted() {
    assert_eq!(check("Correct-Horse-42"), Ok(()));
    assert_eq!(check("lowercase-with-7"), Ok(()));
}

#[test]
fn test_confirmation_must_match() {
    let result =
        PasswordPolicy::default().validate("Correct-Horse-42", "Correct-Horse-43", "a@b.co", "A");
    assert_eq!(result, Err(PasswordPolicyError::ConfirmationMismatch));
}

#[test]
fn test_short_password_is_rejected() {
    assert_eq!(
        check("Ab1!ab1!a"),
        Err(PasswordPolicyError::TooShort { min_length: 10 })
    );
}

#[test]
fn test_two_character_classes_are_not_enough() {
    assert_eq!(
        check("onlylowercase123"),
        Err(PasswordPolicyError::InsufficientComplexity {
            required: 3,
            found: 2
        })
    );
}

#[test]
fn test_password_may_not_equal_email_or_name() {
    let policy = PasswordPolicy::default();

    assert_eq!(
        policy.validate("Ana@School.edu1", "Ana@School.edu1", "ana@school.edu1", "Ana"),
        Err(PasswordPolicyError::MatchesIdentity { field: "email" })
    );
    assert_eq!(
        policy.validate("Ana Lima 2026", "Ana Lima 2026", "ana@school.edu", "ana lima 2026"),
        Err(PasswordPolicyError::MatchesIdentity { field: "name" })
    );
}

#[test]
fn test_policy_error_messages() {
    assert_eq!(
        PasswordPolicyError::TooShort { min_length: 10 }.to_string(),
        "Password must be at least 10 characters long"
    );
    assert_eq!(
        PasswordPolicyError::MatchesIdentity { field: "email" }.to_string(),
        "Password must not match the user's email"
    );
}
