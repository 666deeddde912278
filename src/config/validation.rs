//! Configuration validation logic.

use crate::config::loader::Config;
use crate::config::modes::is_wildcard;
use crate::error::{Error, Result};
use url::Url;

/// Maximum timeout accepted for page and file requests.
const MAX_TIMEOUT_SECONDS: u64 = 3600;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_url(config.target_url()?)?;
    validate_file_types(&config.target.file_types)?;
    validate_wait_for(&config.fetch.wait_for)?;
    validate_timeout("fetch.timeout_seconds", config.fetch.timeout_seconds)?;
    validate_timeout("download.timeout_seconds", config.download.timeout_seconds)?;
    validate_user_agent("http.user_agent", &config.http.user_agent)?;
    validate_user_agent(
        "http.alternate_user_agent",
        &config.http.alternate_user_agent,
    )?;

    Ok(())
}

/// Validate the target URL: must parse and use http or https.
pub fn validate_url(input: &str) -> Result<Url> {
    let url = Url::parse(input.trim())?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::ConfigValidation {
            field: "url".to_string(),
            message: format!("Unsupported scheme '{}', expected http or https", other),
        }),
    }
}

/// Validate file type suffixes. Each must start with a dot and contain more than the dot.
pub fn validate_file_types<S: AsRef<str>>(file_types: &[S]) -> Result<()> {
    for file_type in file_types {
        let file_type = file_type.as_ref();

        if !file_type.starts_with('.') || file_type.len() < 2 {
            return Err(Error::ConfigValidation {
                field: "file_types".to_string(),
                message: format!(
                    "File type '{}' must be a suffix such as '.zip' or '.pdf'",
                    file_type
                ),
            });
        }

        if file_type.contains('/') || file_type.chars().any(char::is_whitespace) {
            return Err(Error::ConfigValidation {
                field: "file_types".to_string(),
                message: format!("File type '{}' contains invalid characters", file_type),
            });
        }
    }

    Ok(())
}

/// Validate the dynamic-mode wait list. The wildcard must stand alone.
pub fn validate_wait_for<S: AsRef<str>>(wait_for: &[S]) -> Result<()> {
    if wait_for.len() > 1 {
        if let Some(wildcard) = wait_for.iter().find(|e| is_wildcard(e.as_ref())) {
            return Err(Error::ConfigValidation {
                field: "fetch.wait_for".to_string(),
                message: format!(
                    "'{}' waits for any link and cannot be combined with suffixes",
                    wildcard.as_ref()
                ),
            });
        }
    }

    Ok(())
}

fn validate_timeout(field: &str, seconds: u64) -> Result<()> {
    if seconds == 0 || seconds > MAX_TIMEOUT_SECONDS {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!(
                "Timeout must be between 1 and {} seconds (got {})",
                MAX_TIMEOUT_SECONDS, seconds
            ),
        });
    }

    Ok(())
}

fn validate_user_agent(field: &str, user_agent: &str) -> Result<()> {
    if user_agent.trim().is_empty() {
        return Err(Error::MissingConfig(field.to_string()));
    }

    Ok(())
}
