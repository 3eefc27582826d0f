use crate::error::EditError;

/// Checks that a width, height or font size can be stored on an element
pub(crate) fn validate_dimension(attribute: &'static str, value: f32) -> Result<f32, EditError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EditError::NotPositive { attribute, value })
    }
}
