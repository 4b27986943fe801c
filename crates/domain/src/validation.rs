// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;
use time::macros::format_description;

use crate::error::DomainError;
use crate::types::GiftId;

const ITEM_CODE_MAX_LEN: usize = 255;
const NAME_MAX_LEN: usize = 200;
const OBSERVATION_MAX_LEN: usize = 1000;

/// Validates a scanned basket or gift code and returns it trimmed.
///
/// # Errors
///
/// Returns `DomainError::InvalidItemCode` if the code is empty or longer
/// than 255 characters.
pub fn validate_item_code(code: &str) -> Result<String, DomainError> {
    let trimmed: &str = code.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidItemCode(String::from(
            "code cannot be empty",
        )));
    }
    if trimmed.chars().count() > ITEM_CODE_MAX_LEN {
        return Err(DomainError::InvalidItemCode(format!(
            "code cannot exceed {ITEM_CODE_MAX_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validates a person name and returns it trimmed.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is empty or too long.
pub fn validate_name(name: &str) -> Result<String, DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "name cannot be empty",
        )));
    }
    if trimmed.chars().count() > NAME_MAX_LEN {
        return Err(DomainError::InvalidName(format!(
            "name cannot exceed {NAME_MAX_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validates an observation note and returns it trimmed.
///
/// # Errors
///
/// Returns `DomainError::InvalidObservation` if the note is empty or too long.
pub fn validate_observation(text: &str) -> Result<String, DomainError> {
    let trimmed: &str = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidObservation(String::from(
            "observation cannot be empty",
        )));
    }
    if trimmed.chars().count() > OBSERVATION_MAX_LEN {
        return Err(DomainError::InvalidObservation(format!(
            "observation cannot exceed {OBSERVATION_MAX_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Parses the gift list of a delivery request.
///
/// Order is preserved. Duplicates are kept so that the caller's count
/// check sees them.
///
/// # Errors
///
/// Returns `DomainError::EmptyGiftList` for an empty list and
/// `DomainError::InvalidIdentifier` for any value that is not a UUID.
pub fn parse_gift_ids(raw: &[String]) -> Result<Vec<GiftId>, DomainError> {
    if raw.is_empty() {
        return Err(DomainError::EmptyGiftList);
    }
    raw.iter().map(|value| value.parse::<GiftId>()).collect()
}

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value.trim(), format).map_err(|e| DomainError::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}
