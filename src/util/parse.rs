use crate::error::AppError;

/// Parses a Discord snowflake id from its wire string form.
///
/// # Arguments
/// - `value` - The string to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed snowflake
/// - `Err(AppError::BadRequest)` - The value is not a valid snowflake
pub fn parse_snowflake(value: &str) -> Result<u64, AppError> {
    value
        .parse::<u64>()
        .map_err(|e| AppError::BadRequest(format!("Invalid snowflake '{}': {}", value, e)))
}
