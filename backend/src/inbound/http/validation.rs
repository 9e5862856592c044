//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{AccountId, AccountValidationError, Error, PasswordValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidPage,
    TooShort,
    TooLong,
    InvalidCharacters,
    InvalidFormat,
    MissingUppercase,
    MissingLowercase,
    MissingDigit,
    Mismatch,
    InvalidLevel,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidPage => "invalid_page",
            ErrorCode::TooShort => "too_short",
            ErrorCode::TooLong => "too_long",
            ErrorCode::InvalidCharacters => "invalid_characters",
            ErrorCode::InvalidFormat => "invalid_format",
            ErrorCode::MissingUppercase => "missing_uppercase",
            ErrorCode::MissingLowercase => "missing_lowercase",
            ErrorCode::MissingDigit => "missing_digit",
            ErrorCode::Mismatch => "mismatch",
            ErrorCode::InvalidLevel => "invalid_level",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn parse_account_id(value: String, field: FieldName) -> Result<AccountId, Error> {
    AccountId::new(&value).map_err(|_| invalid_uuid_error(field, &value))
}

pub(crate) fn invalid_page_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a positive integer"))
        .with_value(ErrorCode::InvalidPage, value)
}

/// Map an account field rejection onto the request field it arrived in.
pub(crate) fn account_field_error(field: FieldName, error: &AccountValidationError) -> Error {
    let code = match error {
        AccountValidationError::UsernameTooShort { .. }
        | AccountValidationError::NameTooShort { .. } => ErrorCode::TooShort,
        AccountValidationError::UsernameTooLong { .. }
        | AccountValidationError::NameTooLong { .. }
        | AccountValidationError::EmailTooLong { .. }
        | AccountValidationError::BioTooLong { .. }
        | AccountValidationError::PersonalStatementTooLong { .. } => ErrorCode::TooLong,
        AccountValidationError::UsernameInvalidCharacters
        | AccountValidationError::NameInvalidCharacters => ErrorCode::InvalidCharacters,
        AccountValidationError::EmailInvalidFormat => ErrorCode::InvalidFormat,
        AccountValidationError::EmptyId | AccountValidationError::InvalidId => {
            ErrorCode::InvalidUuid
        }
    };
    ValidationError::new(field.as_str(), error.to_string()).with_code(code)
}

/// Map a password complexity rejection onto the request field it arrived in.
pub(crate) fn password_field_error(field: FieldName, error: &PasswordValidationError) -> Error {
    let code = match error {
        PasswordValidationError::TooLong { .. } => ErrorCode::TooLong,
        PasswordValidationError::MissingUppercase => ErrorCode::MissingUppercase,
        PasswordValidationError::MissingLowercase => ErrorCode::MissingLowercase,
        PasswordValidationError::MissingDigit => ErrorCode::MissingDigit,
    };
    ValidationError::new(field.as_str(), error.to_string()).with_code(code)
}

pub(crate) fn mismatch_error(field: FieldName, message: &str) -> Error {
    ValidationError::new(field.as_str(), message).with_code(ErrorCode::Mismatch)
}

pub(crate) fn invalid_experience_level_error(field: FieldName, value: &str) -> Error {
    ValidationError::new(
        field.as_str(),
        "experience level must be beginner, intermediate, or advanced",
    )
    .with_value(ErrorCode::InvalidLevel, value)
}
