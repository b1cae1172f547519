use anyhow::anyhow;
use axum::http::{HeaderName, HeaderValue, Method};
use mn_core::{Error, Result};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

pub const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::OPTIONS,
    Method::PATCH,
    Method::DELETE,
    Method::POST,
    Method::PUT,
];

pub const ALLOWED_HEADERS: [&str; 9] = [
    "x-csrf-token",
    "x-requested-with",
    "accept",
    "accept-version",
    "content-length",
    "content-md5",
    "content-type",
    "date",
    "x-api-version",
];

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Origins allowed to send credentialed requests. Empty means any origin, without credentials.
    pub allowed_origins: Vec<String>,
}

/// Builds the CORS layer.
///
/// Browsers refuse a wildcard origin combined with credentials, so the two
/// are never emitted together: credentials are only allowed for an explicit
/// origin list.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods(AllowMethods::list(ALLOWED_METHODS))
        .allow_headers(AllowHeaders::list(
            ALLOWED_HEADERS.into_iter().map(HeaderName::from_static),
        ));

    if config.allowed_origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    if config.allowed_origins.iter().any(|origin| origin.trim() == "*") {
        return Err(Error::External(anyhow!(
            "Wildcard origin '*' cannot be allowed with credentials; \
             omit --allow-origin to allow any origin"
        )));
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin.trim())
                .map_err(|e| Error::External(anyhow!("Invalid CORS origin '{}': {}", origin, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["https://ok.example".to_string(), "bad\norigin".to_string()],
        };
        assert!(cors_layer(&config).is_err());
    }

    #[test]
    fn test_rejects_wildcard_in_origin_list() {
        for origins in [vec!["*"], vec!["https://ok.example", " * "]] {
            let config = CorsConfig {
                allowed_origins: origins.into_iter().map(String::from).collect(),
            };
            let err = cors_layer(&config).unwrap_err();
            assert!(err.to_string().contains("--allow-origin"));
        }
    }

    #[test]
    fn test_builds_both_modes() {
        assert!(cors_layer(&CorsConfig::default()).is_ok());
        let config = CorsConfig {
            allowed_origins: vec!["https://notes.example.com".to_string()],
        };
        assert!(cors_layer(&config).is_ok());
    }
}
