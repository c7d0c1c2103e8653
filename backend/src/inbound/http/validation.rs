//! Request-shape checks shared by inbound HTTP handlers.
//!
//! These run before a request reaches the domain. Each failure is an
//! `invalid_request` error whose `details` name the offending field and a
//! machine-readable reason code.

use serde_json::json;

use crate::domain::{Error, ItemId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reason {
    MissingField,
    BlankField,
    InvalidValue,
    InvalidId,
}

impl Reason {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::BlankField => "blank_field",
            Self::InvalidValue => "invalid_value",
            Self::InvalidId => "invalid_id",
        }
    }
}

/// Wire name of a request field, as clients see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, reason: Reason, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": reason.as_str(),
    }))
}

fn field_value_error(field: FieldName, reason: Reason, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": reason.as_str(),
        "value": value,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        Reason::MissingField,
        format!("missing required field: {}", field.as_str()),
    )
}

pub(crate) fn invalid_value_error(field: FieldName, value: &str, expected: &str) -> Error {
    field_value_error(
        field,
        Reason::InvalidValue,
        format!("{} must be one of {expected}", field.as_str()),
        value,
    )
}

/// Require a present, non-blank string. The value is returned untrimmed.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    let value = value.ok_or_else(|| missing_field_error(field))?;
    if value.trim().is_empty() {
        return Err(field_error(
            field,
            Reason::BlankField,
            format!("{} must not be blank", field.as_str()),
        ));
    }
    Ok(value)
}

/// Require a present value of any type.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse a path segment as a positive item id.
pub(crate) fn parse_item_id(raw: &str, field: FieldName) -> Result<ItemId, Error> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|value| ItemId::new(value).ok())
        .ok_or_else(|| {
            field_value_error(
                field,
                Reason::InvalidId,
                format!("{} must be a positive integer", field.as_str()),
                raw,
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    const CODE: FieldName = FieldName::new("code");

    fn detail<'a>(err: &'a Error, key: &str) -> Option<&'a str> {
        err.details()
            .and_then(|details| details.get(key))
            .and_then(serde_json::Value::as_str)
    }

    #[rstest]
    fn missing_text_names_the_field() {
        let err = require_text(None, CODE).expect_err("missing");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "missing required field: code");
        assert_eq!(detail(&err, "field"), Some("code"));
        assert_eq!(detail(&err, "code"), Some("missing_field"));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_text_is_rejected(#[case] value: &str) {
        let err = require_text(Some(value.to_owned()), CODE).expect_err("blank");

        assert_eq!(err.message(), "code must not be blank");
        assert_eq!(detail(&err, "code"), Some("blank_field"));
    }

    #[rstest]
    fn surrounding_whitespace_is_preserved() {
        let value = require_text(Some(" sa4123 ".to_owned()), CODE).expect("present");

        assert_eq!(value, " sa4123 ");
    }

    #[rstest]
    #[case("1", Some(1))]
    #[case("999999", Some(999_999))]
    #[case("0", None)]
    #[case("-4", None)]
    #[case("abc", None)]
    #[case("1.5", None)]
    fn item_ids_must_be_positive_integers(#[case] raw: &str, #[case] expected: Option<i64>) {
        let parsed = parse_item_id(raw, FieldName::new("id"));

        match expected {
            Some(id) => assert_eq!(parsed.expect("valid id").get(), id),
            None => {
                let err = parsed.expect_err("invalid id");
                assert_eq!(detail(&err, "value"), Some(raw));
                assert_eq!(detail(&err, "code"), Some("invalid_id"));
            }
        }
    }
}
