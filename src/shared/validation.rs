//! Input Validation
//!
//! Checks for user-supplied account fields. Each function returns the value
//! in the form it should be stored, or a [`SharedError::ValidationError`]
//! naming the field.

use crate::shared::error::SharedError;

/// Shortest accepted username
pub const USERNAME_MIN_LEN: usize = 3;
/// Longest accepted username
pub const USERNAME_MAX_LEN: usize = 50;
/// Shortest accepted password
pub const PASSWORD_MIN_LEN: usize = 8;
/// Longest accepted password in bytes, so that password and salt fit bcrypt's input
pub const PASSWORD_MAX_BYTES: usize = 40;

const EMAIL_MAX_LEN: usize = 254;

/// Usernames are 3-50 ASCII letters, digits or underscores
pub fn validate_username(username: &str) -> Result<String, SharedError> {
    let username = username.trim();
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(SharedError::validation(
            "username",
            format!(
                "Username must be between {} and {} characters",
                USERNAME_MIN_LEN, USERNAME_MAX_LEN
            ),
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(SharedError::validation(
            "username",
            "Username may only contain letters, numbers and underscores",
        ));
    }
    Ok(username.to_string())
}

/// Canonical form of an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic structural email check; returns the normalized address
pub fn validate_email(email: &str) -> Result<String, SharedError> {
    let email = normalize_email(email);
    let invalid = || SharedError::validation("email", "Invalid email address");

    if email.is_empty() || email.len() > EMAIL_MAX_LEN || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(email)
}

/// Passwords need 8+ characters with an uppercase letter, a lowercase letter and a digit
pub fn validate_password_strength(password: &str) -> Result<(), SharedError> {
    let fail = |message: &str| Err(SharedError::validation("password", message));

    if password.chars().count() < PASSWORD_MIN_LEN {
        return fail("Password must be at least 8 characters long");
    }
    if password.len() > PASSWORD_MAX_BYTES {
        return fail("Password must be at most 40 bytes long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return fail("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return fail("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return fail("Password must contain at least one number");
    }
    Ok(())
}
