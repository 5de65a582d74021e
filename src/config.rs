use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

const DEFAULT_API_TOKEN: &str = "zns-secret-token-2025";

/// Deployment environment, read from `APP_ENV` (or `NODE_ENV`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Production,
    Test,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            other => anyhow::bail!("APP_ENV must be one of dev, production, test (got '{}')", other),
        }
    }
}

/// Accepted bearer tokens, kept as SHA-256 digests.
#[derive(Clone, Default)]
pub struct ApiTokens {
    digests: HashSet<String>,
}

impl ApiTokens {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            digests: tokens
                .into_iter()
                .filter_map(|t| {
                    let token: &str = t.as_ref();
                    (!token.is_empty()).then(|| digest(token))
                })
                .collect(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.digests.contains(&digest(token))
    }
}

impl std::fmt::Debug for ApiTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiTokens")
            .field("count", &self.digests.len())
            .finish()
    }
}

fn digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub database_url: String,
    /// Direct (non-pooled) connection used for migrations when set.
    pub direct_url: Option<String>,
    pub port: u16,
    pub api_tokens: ApiTokens,
    pub webhook_retired_url: Option<Url>,
    pub webhook_athletes_rights_url: Option<Url>,
    pub webhook_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the process environment
    /// in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = var("APP_ENV")
            .or_else(|| var("NODE_ENV"))
            .map(|v| v.parse::<Environment>())
            .transpose()?
            .unwrap_or(Environment::Dev);

        let database_url = var("DATABASE_URL")
            .or_else(|| var("DB_URL"))
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL or DB_URL environment variable required"))
            .and_then(|url| {
                validate_postgres_url("DATABASE_URL", &url)?;
                Ok(url)
            })?;

        let direct_url = var("DIRECT_URL")
            .map(|url| {
                validate_postgres_url("DIRECT_URL", &url)?;
                Ok::<_, anyhow::Error>(url)
            })
            .transpose()?;

        let port = var("PORT")
            .unwrap_or_else(|| "3333".to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?;

        let api_token = match var("API_TOKEN") {
            Some(token) => token,
            None if environment == Environment::Production => {
                anyhow::bail!("API_TOKEN environment variable required in production")
            }
            None => {
                tracing::warn!("API_TOKEN not set, using the development default token");
                DEFAULT_API_TOKEN.to_string()
            }
        };

        let webhook_retired_url = var("WEBHOOK_RETIRED_URL")
            .map(|url| parse_webhook_url("WEBHOOK_RETIRED_URL", &url))
            .transpose()?;

        let webhook_athletes_rights_url = var("WEBHOOK_ATHLETES_RIGHTS_URL")
            .map(|url| parse_webhook_url("WEBHOOK_ATHLETES_RIGHTS_URL", &url))
            .transpose()?;

        let webhook_timeout = var("WEBHOOK_TIMEOUT_SECS")
            .map(|v| {
                v.parse::<u64>().map_err(|_| {
                    anyhow::anyhow!("WEBHOOK_TIMEOUT_SECS must be a whole number of seconds")
                })
            })
            .transpose()?
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        let config = Self {
            environment,
            database_url,
            direct_url,
            port,
            api_tokens: ApiTokens::new([api_token]),
            webhook_retired_url,
            webhook_athletes_rights_url,
            webhook_timeout,
        };

        // Log successful configuration load (without sensitive values)
        tracing::debug!(
            "Database URL: {}...",
            config.database_url.chars().take(20).collect::<String>()
        );
        tracing::debug!("Environment: {:?}", config.environment);
        tracing::debug!("Server Port: {}", config.port);
        match &config.webhook_retired_url {
            Some(url) => tracing::info!("Retired webhook configured: {}", url),
            None => tracing::info!("Retired webhook not configured"),
        }
        match &config.webhook_athletes_rights_url {
            Some(url) => tracing::info!("Athletes-rights webhook configured: {}", url),
            None => tracing::info!("Athletes-rights webhook not configured"),
        }

        Ok(config)
    }
}

fn validate_postgres_url(name: &str, url: &str) -> anyhow::Result<()> {
    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
        anyhow::bail!("{} must start with postgresql:// or postgres://", name);
    }
    Ok(())
}

fn parse_webhook_url(name: &str, raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| anyhow::anyhow!("{} is not a valid URL: {}", name, e))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("{} must start with http:// or https://", name);
    }
    Ok(url)
}
