use crate::errors::{AwsWrapperError, Result};

/// Checks that a recipient is a usable numeric phone number and returns it trimmed.
///
/// Accepts an optional leading `+` followed by ASCII digits only. A value that
/// is all zeros is rejected, as it cannot name a real subscriber.
///
/// # Errors
///
/// Returns a precondition error when the number is missing or not numeric.
pub fn validate_recipient(raw: &str) -> Result<&str> {
    let number = raw.trim();
    if number.is_empty() {
        return Err(AwsWrapperError::precondition("recipient mobile number is missing"));
    }

    let digits = number.strip_prefix('+').unwrap_or(number);
    let numeric = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
    if !numeric || digits.bytes().all(|b| b == b'0') {
        return Err(AwsWrapperError::precondition(format!(
            "recipient mobile number {number:?} is not a valid number"
        )));
    }

    Ok(number)
}
