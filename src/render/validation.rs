use crate::error::RenderError;

use super::RenderSettings;

pub fn validate_settings(settings: &RenderSettings) -> Result<(), RenderError> {
    if settings.width == 0 {
        return Err(RenderError::InvalidArgument {
            name: "width",
            reason: "must be at least 1; the camera basis divides by it",
        });
    }
    if settings.height == 0 {
        return Err(RenderError::InvalidArgument {
            name: "height",
            reason: "must be at least 1",
        });
    }
    if settings.samples_per_pixel == 0 {
        return Err(RenderError::InvalidArgument {
            name: "samples_per_pixel",
            reason: "must be at least 1; exposure divides by it",
        });
    }
    Ok(())
}
