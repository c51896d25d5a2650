use validator::ValidateEmail;

use crate::types::error::FieldErrors;

pub const MAX_EMAIL_CHARS: usize = 254;

const COMMON_PASSWORDS: &[&str] = &[
    "password", "password1", "password123", "12345678", "123456789", "1234567890",
    "qwertyuiop", "qwerty123", "iloveyou", "sunshine", "princess", "football",
    "baseball", "welcome1", "letmein1", "abc12345", "trustno1", "dragon123",
    "passw0rd", "11111111", "00000000", "administrator", "changeme",
];

/// Normalised email or the message to report on the `email` field.
pub fn validate_email_field(email: &str) -> Result<String, String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err("This field may not be blank.".to_string());
    }
    if trimmed.chars().count() > MAX_EMAIL_CHARS {
        return Err(format!(
            "Ensure this field has no more than {} characters.",
            MAX_EMAIL_CHARS
        ));
    }
    if !trimmed.validate_email() {
        return Err("Enter a valid email address.".to_string());
    }
    Ok(trimmed.to_string())
}

/// Every rule the password breaks, empty when it is acceptable.
pub fn password_problems(password: &str, email: Option<&str>, min_length: usize) -> Vec<String> {
    let mut problems = Vec::new();

    if password.chars().count() < min_length {
        problems.push(format!(
            "This password is too short. It must contain at least {} characters.",
            min_length
        ));
    }
    if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
        problems.push("This password is entirely numeric.".to_string());
    }
    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        problems.push("This password is too common.".to_string());
    }
    if let Some(local) = email.and_then(|e| e.split('@').next()) {
        let local = local.to_lowercase();
        if local.chars().count() >= 3 && lowered.contains(&local) {
            problems.push("The password is too similar to the email address.".to_string());
        }
    }

    problems
}

pub fn validate_password_field(
    errors: &mut FieldErrors,
    field: &str,
    password: &str,
    email: Option<&str>,
    min_length: usize,
) {
    for problem in password_problems(password, email, min_length) {
        errors.add(field, problem);
    }
}

/// Trimmed value, or a blank error on `field`.
pub fn non_blank(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        None => {
            errors.add(field, "This field is required.");
            None
        }
        Some("") => {
            errors.add(field, "This field may not be blank.");
            None
        }
        Some(v) => Some(v.to_string()),
    }
}
