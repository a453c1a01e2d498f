use crate::utils::error::{Result, UploaderError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> UploaderError {
    UploaderError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

/// Route paths are joined onto the base URL, so they must be absolute.
pub fn validate_route(field_name: &str, route: &str) -> Result<()> {
    if !route.starts_with('/') {
        return Err(invalid(field_name, route, "Route must start with '/'"));
    }
    if route.chars().any(char::is_whitespace) {
        return Err(invalid(field_name, route, "Route cannot contain whitespace"));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("server.base_url", "https://ats.example.com").is_ok());
        assert!(validate_url("server.base_url", "http://localhost:8080").is_ok());
        assert!(validate_url("server.base_url", "").is_err());
        assert!(validate_url("server.base_url", "invalid-url").is_err());
        assert!(validate_url("server.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_route() {
        assert!(validate_route("server.upload_path", "/upload").is_ok());
        assert!(validate_route("server.upload_path", "upload").is_err());
        assert!(validate_route("server.upload_path", "/up load").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("ui.banner_ttl_ms", 5000, 1, 600_000).is_ok());
        assert!(validate_range("ui.banner_ttl_ms", 0, 1, 600_000).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("ui.idle_label", "Upload CV").is_ok());
        assert!(validate_non_empty_string("ui.idle_label", "   ").is_err());
    }
}
