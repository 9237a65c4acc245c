// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password policy validation for user credentials.

use thiserror::Error;

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Password and confirmation differ.
    #[error("Password and confirmation do not match")]
    ConfirmationMismatch,

    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    /// Password uses too few character classes.
    #[error(
        "Password must contain at least {required} of: uppercase letter, lowercase letter, digit, symbol (found {found})"
    )]
    InsufficientComplexity { required: usize, found: usize },

    /// Password equals an identifying field of its owner.
    #[error("Password must not match the user's {field}")]
    MatchesIdentity { field: &'static str },
}

/// Password policy configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum password length in characters.
    pub min_length: usize,
    /// Minimum number of character classes required (out of 4).
    pub min_classes: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 10,
            min_classes: 3,
        }
    }
}

impl PasswordPolicy {
    /// Validates a password for a user.
    ///
    /// Checks run in order: confirmation, length, character classes, and
    /// finally that the password is neither the email nor the name
    /// (ignoring case).
    ///
    /// # Errors
    ///
    /// Returns the first rule the password breaks.
    pub fn validate(
        &self,
        password: &str,
        confirmation: &str,
        email: &str,
        name: &str,
    ) -> Result<(), PasswordPolicyError> {
        if password != confirmation {
            return Err(PasswordPolicyError::ConfirmationMismatch);
        }

        if password.chars().count() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        let found: usize = character_classes(password);
        if found < self.min_classes {
            return Err(PasswordPolicyError::InsufficientComplexity {
                required: self.min_classes,
                found,
            });
        }

        let lowered: String = password.to_lowercase();
        if lowered == email.trim().to_lowercase() {
            return Err(PasswordPolicyError::MatchesIdentity { field: "email" });
        }
        if lowered == name.trim().to_lowercase() {
            return Err(PasswordPolicyError::MatchesIdentity { field: "name" });
        }

        Ok(())
    }
}

/// Counts the classes present among uppercase, lowercase, digit and symbol.
///
/// Any character that is not an ASCII letter or digit, other than
/// whitespace, counts as a symbol.
fn character_classes(password: &str) -> usize {
    let classes: [bool; 4] = password.chars().fold([false; 4], |mut seen, c| {
        if c.is_ascii_uppercase() {
            seen[0] = true;
        } else if c.is_ascii_lowercase() {
            seen[1] = true;
        } else if c.is_ascii_digit() {
            seen[2] = true;
        } else if !c.is_whitespace() {
            seen[3] = true;
        }
        seen
    });

    classes.iter().filter(|&&present| present).count()
}
