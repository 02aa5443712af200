//! Configuration validation logic.

use std::path::Path;

use crate::config::loader::Config;
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static POST_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(/[A-Za-z0-9_.]+)?/(p|reel|tv)/[A-Za-z0-9_-]+/?$").expect("static regex is valid")
});

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_user_agent(&config.http.user_agent)?;

    if config.http.timeout_seconds == 0 {
        return Err(Error::ConfigValidation {
            field: "timeout_seconds".to_string(),
            message: "Timeout must be at least 1 second".to_string(),
        });
    }

    if config.http.max_connections_per_scheme == 0 {
        return Err(Error::ConfigValidation {
            field: "max_connections_per_scheme".to_string(),
            message: "At least one connection per scheme is required".to_string(),
        });
    }

    validate_save_directory(config.download_directory()?)?;

    Ok(())
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.trim().is_empty() {
        return Err(Error::MissingConfig("user_agent".to_string()));
    }

    Ok(())
}

/// Check that the save directory exists and is a directory.
pub fn validate_save_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::ConfigValidation {
            field: "download_directory".to_string(),
            message: format!("Directory does not exist: {}", path.display()),
        });
    }

    if !path.is_dir() {
        return Err(Error::ConfigValidation {
            field: "download_directory".to_string(),
            message: format!("Not a directory: {}", path.display()),
        });
    }

    Ok(())
}

/// Validate a post URL.
///
/// Accepts `http(s)://host/p/<code>`, `/reel/<code>` and `/tv/<code>`, with an
/// optional leading username segment and an optional trailing slash.
pub fn validate_post_url(input: &str) -> Result<Url> {
    let input = input.trim();

    let url = Url::parse(input).map_err(|e| Error::ConfigValidation {
        field: "url".to_string(),
        message: format!("Could not parse URL '{}': {}", input, e),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::ConfigValidation {
            field: "url".to_string(),
            message: format!("Unsupported URL scheme '{}'", url.scheme()),
        });
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(Error::ConfigValidation {
            field: "url".to_string(),
            message: format!("URL has no host: {}", input),
        });
    }

    if !POST_PATH.is_match(url.path()) {
        return Err(Error::ConfigValidation {
            field: "url".to_string(),
            message: format!(
                "'{}' does not look like a post URL (expected /p/<code>/, /reel/<code>/ or /tv/<code>/)",
                input
            ),
        });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_valid_post_urls() {
        assert!(validate_post_url("https://www.instagram.com/p/CxYz123_-a/").is_ok());
        assert!(validate_post_url("https://www.instagram.com/p/CxYz123").is_ok());
        assert!(validate_post_url("https://www.instagram.com/reel/Abc123/?igsh=xyz").is_ok());
        assert!(validate_post_url("http://example.com/some.user/p/Abc123/").is_ok());
    }

    #[test]
    fn test_invalid_post_urls() {
        assert!(validate_post_url("not a url").is_err());
        assert!(validate_post_url("ftp://example.com/p/Abc123/").is_err());
        assert!(validate_post_url("https://www.instagram.com/").is_err());
        assert!(validate_post_url("https://www.instagram.com/explore/tags/rust/").is_err());
    }

    #[test]
    fn test_save_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_save_directory(dir.path()).is_ok());

        let missing = dir.path().join("missing");
        assert!(validate_save_directory(&missing).is_err());

        let file = dir.path().join("file.txt");
        std::fs::write(&file, b"x").unwrap();
        assert!(validate_save_directory(&file).is_err());
    }

    #[test]
    fn test_validate_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        assert!(matches!(
            validate_config(&config),
            Err(Error::MissingConfig(_))
        ));

        config.options.download_directory = Some(dir.path().to_path_buf());
        assert!(validate_config(&config).is_ok());

        config.http.max_connections_per_scheme = 0;
        assert!(validate_config(&config).is_err());

        config.http.max_connections_per_scheme = 5;
        config.options.download_directory = Some(PathBuf::from("/definitely/not/here"));
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_user_agent() {
        assert!(validate_user_agent("  ").is_err());
        assert!(validate_user_agent("Mozilla/5.0").is_ok());
    }
}
