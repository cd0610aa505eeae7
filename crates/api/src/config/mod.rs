// Server configuration loaded from environment variables
//
// Auth settings live in auth::config; this covers where the server listens,
// how routes are mounted and which store backs them.

/// Default listen address
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:9000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub http_addr: String,
    /// Optional prefix for all API routes, e.g. "/api"
    pub api_prefix: String,
    /// Origins allowed by CORS; empty means same-origin only
    pub cors_allowed_origins: Vec<String>,
    /// Postgres URL; `None` selects the in-memory store
    pub database_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            api_prefix: String::new(),
            cors_allowed_origins: Vec::new(),
            database_url: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// - `HTTP_ADDR`: listen address (default: "0.0.0.0:9000")
    /// - `API_PREFIX`: route prefix (default: none)
    /// - `CORS_ALLOWED_ORIGINS`: comma-separated origins (default: none)
    /// - `DATABASE_URL`: Postgres URL (default: in-memory store)
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|s| !s.trim().is_empty());

        Self {
            http_addr: non_empty("HTTP_ADDR").unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string()),
            api_prefix: non_empty("API_PREFIX")
                .map(|p| normalize_prefix(&p))
                .unwrap_or_default(),
            cors_allowed_origins: non_empty("CORS_ALLOWED_ORIGINS")
                .map(|s| parse_origins(&s))
                .unwrap_or_default(),
            database_url: non_empty("DATABASE_URL"),
        }
    }
}

/// Ensure a leading slash and no trailing slash
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn parse_origins(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.http_addr, "0.0.0.0:9000");
        assert!(config.api_prefix.is_empty());
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("/api"), "/api");
        assert_eq!(normalize_prefix("api/"), "/api");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix("  "), "");
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("https://a.example.com, https://b.example.com,,"),
            vec!["https://a.example.com", "https://b.example.com"]
        );
    }
}
