pub mod auth;
pub mod categories;
pub mod inventory;

use crate::error::AppError;

/// Column widths of the `VARCHAR` fields clients can write.
pub const NAME_MAX_CHARS: usize = 255;
pub const CODE_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 255;

pub(crate) fn check_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "{field} must be at most {max} characters long"
        )));
    }
    Ok(())
}
