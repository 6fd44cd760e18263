use serde_json::Value;

use crate::CycleError;

/// The fixed set of review statuses the service reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    /// The reviewer accepted the work.
    Approved,
    /// The reviewer picked the work up.
    Reviewing,
    /// The reviewer returned the work with remarks.
    Rejected,
}

impl ReviewStatus {
    /// Maps a wire status code onto the fixed enumeration.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Verdict text shown to the student, as worded by the review service.
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Builds the status-change notification for a single homework record.
///
/// Fails when the record lacks `homework_name` or `status` (or they are not
/// strings), or when the status code is outside the verdict set.
pub fn compose_status_message(record: &Value) -> Result<String, CycleError> {
    let name = record
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(CycleError::MissingField("homework_name"))?;
    let code = record
        .get("status")
        .and_then(Value::as_str)
        .ok_or(CycleError::MissingField("status"))?;
    let status = ReviewStatus::from_code(code)
        .ok_or_else(|| CycleError::UnknownStatus(code.to_string()))?;

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    ))
}
