//! Input rules for the auth and admin forms.
//!
//! Each check returns the first failing rule. Displaying the message is the
//! page's job.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use crate::net::types::{ProductCreate, RegisterRequest, UserCreate, UserUpdate};

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 50;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 128;
pub const OTP_LEN: usize = 6;

const PASSWORD_SPECIALS: &str = "-@$!%*?&";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{0} may only contain letters and spaces")]
    InvalidName(&'static str),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error(
        "Password must contain at least one uppercase letter, one lowercase letter, one number, and one special character"
    )]
    WeakPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please enter the complete 6-digit code")]
    IncompleteOtp,
    #[error("{0} cannot be negative")]
    Negative(&'static str),
    #[error("{0} must be a number")]
    NotANumber(&'static str),
}

fn check_length(field: &'static str, value: &str, min: usize, max: usize) -> Result<(), FieldError> {
    let len = value.chars().count();
    if len == 0 {
        return Err(FieldError::Required(field));
    }
    if len < min {
        return Err(FieldError::TooShort { field, min });
    }
    if len > max {
        return Err(FieldError::TooLong { field, max });
    }
    Ok(())
}

/// First/last name: 2-50 ASCII letters or whitespace.
pub fn validate_name(field: &'static str, value: &str) -> Result<(), FieldError> {
    check_length(field, value, NAME_MIN, NAME_MAX)?;
    if value.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace()) {
        Ok(())
    } else {
        Err(FieldError::InvalidName(field))
    }
}

/// Lowercased, trimmed email as the backend expects it.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// `local@domain` with non-empty parts and no whitespace.
pub fn validate_email(email: &str) -> Result<(), FieldError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(FieldError::Required("Email"));
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(FieldError::InvalidEmail);
    };
    let domain_ok = !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..");
    if local.is_empty() || !domain_ok || email.chars().any(char::is_whitespace) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

/// 8-128 characters with an upper, a lower, a digit and one of `-@$!%*?&`.
pub fn validate_password(password: &str) -> Result<(), FieldError> {
    check_length("Password", password, PASSWORD_MIN, PASSWORD_MAX)?;
    let upper = password.chars().any(|c| c.is_ascii_uppercase());
    let lower = password.chars().any(|c| c.is_ascii_lowercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    let special = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));
    if upper && lower && digit && special { Ok(()) } else { Err(FieldError::WeakPassword) }
}

pub fn validate_password_pair(password: &str, confirm: &str) -> Result<(), FieldError> {
    validate_password(password)?;
    if confirm.is_empty() {
        return Err(FieldError::Required("Confirm password"));
    }
    if password == confirm { Ok(()) } else { Err(FieldError::PasswordMismatch) }
}

/// Join the six OTP boxes. Each box must hold exactly one decimal digit.
pub fn join_otp<S: AsRef<str>>(digits: &[S]) -> Result<String, FieldError> {
    if digits.len() != OTP_LEN {
        return Err(FieldError::IncompleteOtp);
    }
    let mut otp = String::with_capacity(OTP_LEN);
    for digit in digits {
        let digit = digit.as_ref().trim();
        let mut chars = digit.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_digit() => otp.push(c),
            _ => return Err(FieldError::IncompleteOtp),
        }
    }
    Ok(otp)
}

pub fn validate_register(form: &RegisterRequest, confirm_password: &str) -> Result<(), FieldError> {
    validate_name("First name", &form.first_name)?;
    validate_name("Last name", &form.last_name)?;
    validate_email(&form.email)?;
    validate_password_pair(&form.password, confirm_password)
}

pub fn validate_user_create(form: &UserCreate) -> Result<(), FieldError> {
    validate_name("First name", &form.first_name)?;
    validate_name("Last name", &form.last_name)?;
    validate_email(&form.email)?;
    validate_password(&form.password)
}

/// Edits check only the fields being changed. Passwords are not edited here.
pub fn validate_user_update(form: &UserUpdate) -> Result<(), FieldError> {
    if let Some(first_name) = &form.first_name {
        validate_name("First name", first_name)?;
    }
    if let Some(last_name) = &form.last_name {
        validate_name("Last name", last_name)?;
    }
    if let Some(email) = &form.email {
        validate_email(email)?;
    }
    Ok(())
}

pub fn validate_product(form: &ProductCreate) -> Result<(), FieldError> {
    let required = [
        ("Model", &form.model),
        ("Power", &form.power),
        ("Gearbox", &form.gearbox),
        ("Range", &form.range),
        ("Image", &form.image),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(FieldError::Required(*field));
    }
    check_amount("Price", form.price)?;
    if let Some(new_price) = form.new_price {
        check_amount("New price", new_price)?;
    }
    Ok(())
}

fn check_amount(field: &'static str, value: f64) -> Result<(), FieldError> {
    if !value.is_finite() {
        return Err(FieldError::NotANumber(field));
    }
    if value < 0.0 {
        return Err(FieldError::Negative(field));
    }
    Ok(())
}
