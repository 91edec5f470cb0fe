use std::ops::RangeInclusive;

use crate::errors::ServiceError;

pub const NAME_LEN: RangeInclusive<usize> = 2..=50;
pub const BIOGRAPHY_LEN: RangeInclusive<usize> = 20..=450;

fn check_len(value: &str, range: RangeInclusive<usize>, message: &str) -> Result<(), ServiceError> {
    // lengths count characters, not bytes
    if range.contains(&value.chars().count()) {
        Ok(())
    } else {
        Err(ServiceError::Validation(message.to_string()))
    }
}

/// Check the field-length rules in order, returning the first failure.
pub fn validate_user(first_name: &str, last_name: &str, biography: &str) -> Result<(), ServiceError> {
    check_len(first_name, NAME_LEN, "first name must be between 2 and 50 characters long")?;
    check_len(last_name, NAME_LEN, "last name must be between 2 and 50 characters long")?;
    check_len(biography, BIOGRAPHY_LEN, "biography must be between 20 and 450 characters long")?;
    Ok(())
}
