//! Checks on settings that are only parsed when they are needed.

use crate::error::ConfigError;

use super::FaceppConfig;

impl FaceppConfig {
    /// Parse `concurrent requests` into a slot count for the batch uploader.
    ///
    /// A missing value falls back to the default; anything that is not a
    /// positive integer is an error.
    pub fn concurrent_requests(&self) -> Result<usize, ConfigError> {
        let Some(raw) = self.concurrent_requests.as_deref() else {
            return Ok(super::DEFAULT_CONCURRENT_REQUESTS);
        };
        let value: usize = raw.trim().parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "faceplusplus.\"concurrent requests\" must be an integer, got {raw:?}"
            ))
        })?;
        if value == 0 {
            return Err(ConfigError::ValidationError(
                "faceplusplus.\"concurrent requests\" must be > 0".into(),
            ));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_concurrency(value: &str) -> FaceppConfig {
        FaceppConfig {
            concurrent_requests: Some(value.to_string()),
            ..FaceppConfig::default()
        }
    }

    #[test]
    fn test_template_passes_validation() {
        assert_eq!(FaceppConfig::template().concurrent_requests().unwrap(), 3);
    }

    #[test]
    fn test_missing_concurrency_uses_default() {
        assert_eq!(FaceppConfig::default().concurrent_requests().unwrap(), 3);
    }

    #[test]
    fn test_rejects_non_numeric_concurrency() {
        let err = with_concurrency("lots").concurrent_requests().unwrap_err();
        assert!(err.to_string().contains("concurrent requests"));
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let err = with_concurrency("0").concurrent_requests().unwrap_err();
        assert!(err.to_string().contains("> 0"));
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(with_concurrency(" 8 ").concurrent_requests().unwrap(), 8);
    }
}
