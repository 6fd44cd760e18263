use serde_json::Value;

use crate::CycleError;

/// Cursor field extracted from a validated response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorField {
    /// A usable integer timestamp.
    Valid(i64),
    /// The field is absent; the previous cursor stays in effect.
    Missing,
    /// The field is present but not an integer.
    Invalid,
}

/// A response that passed shape validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedResponse {
    /// Homework records, newest first.
    pub homeworks: Vec<Value>,
    /// The `current_date` field, classified.
    pub cursor: CursorField,
}

/// Checks the API response shape before any field is consumed.
///
/// A missing or non-integer `current_date` is reported through
/// [`CursorField`] rather than an error: the previous cursor remains usable,
/// so the cycle can continue without bothering the user.
pub fn validate_response(response: Value) -> Result<ValidatedResponse, CycleError> {
    let Value::Object(mut fields) = response else {
        return Err(CycleError::NotAnObject);
    };

    let homeworks = fields
        .remove("homeworks")
        .ok_or(CycleError::MissingField("homeworks"))?;
    let Value::Array(homeworks) = homeworks else {
        return Err(CycleError::HomeworksNotAList);
    };

    let cursor = match fields.get("current_date") {
        None => CursorField::Missing,
        Some(value) => value.as_i64().map_or(CursorField::Invalid, CursorField::Valid),
    };

    Ok(ValidatedResponse { homeworks, cursor })
}
