//! Configuration parameters, sourced from the environment.

/// The deployment environment we are in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Develop,
    Local,
}

impl Environment {
    /// Read `ENVIRONMENT`, defaulting to local for unset or unknown values.
    pub fn from_env() -> Self {
        match std::env::var("ENVIRONMENT").as_deref() {
            Ok("production") => Environment::Production,
            Ok("develop") => Environment::Develop,
            _ => Environment::Local,
        }
    }

    /// Connection pool sizing per environment.
    pub fn pool_sizes(self) -> (u32, u32) {
        match self {
            Environment::Production => (5, 30),
            Environment::Develop => (3, 20),
            Environment::Local => (3, 10),
        }
    }
}

/// Which relational backend the gateway talks to.
///
/// A missing `DATABASE_URL` is not an error: the service starts in the
/// unconfigured state, degrades reads to empty fallbacks and rejects writes
/// with 503.
#[derive(Debug, Clone)]
pub enum DatabaseConfig {
    Postgres(String),
    MySql(String),
    Unconfigured,
}

/// Configuration parameters for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The port to listen for HTTP requests on.
    pub port: u16,
    /// The environment we are in.
    pub environment: Environment,
    /// Backend selection, derived from the `DATABASE_URL` scheme.
    pub database: DatabaseConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid port number"))?;
        let environment = Environment::from_env();

        let database = match std::env::var("DATABASE_URL") {
            Ok(url) if url.starts_with("postgres://") || url.starts_with("postgresql://") => {
                DatabaseConfig::Postgres(url)
            }
            Ok(url) if url.starts_with("mysql://") => DatabaseConfig::MySql(url),
            Ok(url) => {
                anyhow::bail!("unsupported DATABASE_URL scheme: {url}");
            }
            Err(_) => DatabaseConfig::Unconfigured,
        };

        Ok(Config {
            port,
            environment,
            database,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_sizes_scale_with_environment() {
        assert_eq!(Environment::Production.pool_sizes(), (5, 30));
        assert_eq!(Environment::Local.pool_sizes(), (3, 10));
    }
}
