//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// User directory policy.
    #[serde(default)]
    pub directory: DirectoryConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT settings as read from configuration sources.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret shared with the identity provider for HS256 tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    2_592_000 // 30 days
}

impl JwtSettings {
    /// Returns the access token lifetime as signed seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the lifetime is zero or too large to add to a timestamp.
    pub fn access_token_expires_secs(&self) -> Result<i64, config::ConfigError> {
        i64::try_from(self.access_token_expiry_secs)
            .ok()
            .filter(|secs| (1..=MAX_ACCESS_TOKEN_EXPIRY_SECS).contains(secs))
            .ok_or_else(|| {
                config::ConfigError::Message(format!(
                    "jwt.access_token_expiry_secs must be between 1 and {}, got {}",
                    MAX_ACCESS_TOKEN_EXPIRY_SECS, self.access_token_expiry_secs
                ))
            })
    }
}

// Largest whole-second span chrono can represent.
const MAX_ACCESS_TOKEN_EXPIRY_SECS: i64 = i64::MAX / 1000;

/// Policy for who may be registered in the user directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryConfig {
    /// When set, only emails ending in `@<domain>` are accepted.
    #[serde(default)]
    pub allowed_email_domain: Option<String>,
}

impl DirectoryConfig {
    /// Returns true if the email is acceptable under this policy.
    #[must_use]
    pub fn accepts_email(&self, email: &str) -> bool {
        match &self.allowed_email_domain {
            None => true,
            Some(domain) => email
                .rsplit_once('@')
                .is_some_and(|(local, host)| !local.is_empty() && host.eq_ignore_ascii_case(domain)),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SHIFTPAY").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.jwt.access_token_expires_secs()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("jane@acme.com", true)]
    #[case("JANE@ACME.COM", true)]
    #[case("jane@Acme.Com", true)]
    #[case("jane@other.com", false)]
    #[case("jane@acme.com.evil.io", false)]
    #[case("@acme.com", false)]
    #[case("not-an-email", false)]
    fn test_domain_policy(#[case] email: &str, #[case] accepted: bool) {
        let policy = DirectoryConfig {
            allowed_email_domain: Some("acme.com".to_string()),
        };
        assert_eq!(policy.accepts_email(email), accepted);
    }

    #[test]
    fn test_open_policy_accepts_anything() {
        let policy = DirectoryConfig::default();
        assert!(policy.accepts_email("someone@anywhere.org"));
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "server": {},
            "database": { "url": "postgres://localhost/shiftpay" },
            "jwt": { "secret": "s3cret" }
        }))
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.jwt.access_token_expiry_secs, 2_592_000);
        assert!(config.directory.allowed_email_domain.is_none());
    }

    #[rstest]
    #[case(1, Some(1))]
    #[case(59, Some(59))]
    #[case(90, Some(90))]
    #[case(2_592_000, Some(2_592_000))]
    #[case(0, None)]
    #[case(u64::MAX, None)]
    fn test_access_token_expiry_keeps_seconds(#[case] configured: u64, #[case] expected: Option<i64>) {
        let jwt = JwtSettings {
            secret: "s3cret".to_string(),
            access_token_expiry_secs: configured,
        };
        assert_eq!(jwt.access_token_expires_secs().ok(), expected);
    }
}
