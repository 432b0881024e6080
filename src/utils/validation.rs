//! Input validation for configuration values

use crate::error::CliError;
use crate::query::MAX_PER_PAGE;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Validate a default page size before it is persisted.
///
/// The builder itself silently drops out-of-range limits; a stored
/// default that would always be dropped is rejected up front instead.
pub fn validate_per_page(per_page: u32) -> crate::Result<()> {
    if per_page == 0 || per_page > MAX_PER_PAGE {
        return Err(CliError::InvalidArguments(format!(
            "Invalid page size {}: must be between 1 and {}",
            per_page, MAX_PER_PAGE
        ))
        .into());
    }

    Ok(())
}

pub fn validate_timeout(timeout_secs: u64) -> crate::Result<()> {
    if timeout_secs == 0 {
        return Err(
            CliError::InvalidArguments("Timeout must be at least 1 second".to_string()).into(),
        );
    }

    Ok(())
}
