//! Process configuration.
//!
//! Server flags come from the command line with environment fallbacks
//! (`clap`). Database settings are read from the environment once at startup
//! and any problem is reported as a [`ConfigError`] before a request is served.

use std::{env, fmt, path::PathBuf, time::Duration};

use clap::{Args, Parser};
use thiserror::Error;

/// Errors raised while loading configuration at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Options shared by every entry point.
#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "8000", env = "PORT")]
    pub port: u16,

    /// Seconds before an in-flight request is answered with 408
    #[arg(long, default_value = "30", env = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: u64,
}

impl ServerArgs {
    /// Address in `host:port` form.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// shipping-json - Package tracking API backed by a JSON file
#[derive(Parser, Debug)]
#[command(name = "shipping-json")]
#[command(version, about, long_about = None)]
pub struct JsonCli {
    #[command(flatten)]
    pub server: ServerArgs,

    /// JSON file holding the package database
    #[arg(long, default_value = "packages.json", env = "PACKAGES_FILE")]
    pub data_file: PathBuf,
}

/// shipping-cloudsql - Package tracking API backed by Cloud SQL for PostgreSQL
///
/// Database settings are read from INSTANCE_CONNECTION_NAME, DB_USER,
/// DB_PASS and DB_NAME.
#[derive(Parser, Debug)]
#[command(name = "shipping-cloudsql")]
#[command(version, about, long_about = None)]
pub struct CloudSqlCli {
    #[command(flatten)]
    pub server: ServerArgs,
}

/// How the process reaches the database instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// Unix socket exposed by the managed connector, e.g.
    /// `/cloudsql/project:region:instance`.
    Socket(PathBuf),
    /// Private IP connection, always TLS.
    Tcp { host: String, port: u16 },
}

/// Cloud SQL connection settings.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// `project:region:instance`
    pub instance_connection_name: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub target: DatabaseTarget,
    /// Maximum pooled connections (default: 5)
    pub pool_max: u32,
    /// Connection attempts at startup before giving up (default: 3)
    pub connect_attempts: u32,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("instance_connection_name", &self.instance_connection_name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("target", &self.target)
            .field("pool_max", &self.pool_max)
            .field("connect_attempts", &self.connect_attempts)
            .finish()
    }
}

impl DatabaseConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `INSTANCE_CONNECTION_NAME` - Cloud SQL instance (required)
    /// - `DB_USER` - Database user (required)
    /// - `DB_PASS` - Database password (required)
    /// - `DB_NAME` - Database name (required)
    /// - `DB_SOCKET_DIR` - Directory holding connector sockets (default: "/cloudsql")
    /// - `DB_HOST` - Private IP; switches to a TLS TCP connection when set
    /// - `DB_PORT` - TCP port (default: 5432)
    /// - `DB_POOL_MAX` - Maximum pooled connections (default: 5)
    /// - `DB_CONNECT_ATTEMPTS` - Startup connection attempts (default: 3)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let instance_connection_name = required("INSTANCE_CONNECTION_NAME")?;
        let user = required("DB_USER")?;
        let password = required("DB_PASS")?;
        let database = required("DB_NAME")?;

        if instance_connection_name.split(':').count() != 3 {
            return Err(ConfigError::InvalidVar {
                name: "INSTANCE_CONNECTION_NAME",
                value: instance_connection_name,
                reason: "expected project:region:instance".to_string(),
            });
        }

        let target = match lookup("DB_HOST").filter(|v| !v.trim().is_empty()) {
            Some(host) => DatabaseTarget::Tcp {
                host,
                port: parse_or("DB_PORT", &lookup, 5432)?,
            },
            None => {
                let socket_dir = lookup("DB_SOCKET_DIR")
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| "/cloudsql".to_string());
                DatabaseTarget::Socket(PathBuf::from(socket_dir).join(&instance_connection_name))
            }
        };

        let pool_max: u32 = parse_or("DB_POOL_MAX", &lookup, 5)?;
        if pool_max == 0 {
            return Err(ConfigError::InvalidVar {
                name: "DB_POOL_MAX",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            instance_connection_name,
            user,
            password,
            database,
            target,
            pool_max,
            connect_attempts: parse_or::<u32, _>("DB_CONNECT_ATTEMPTS", &lookup, 3)?.max(1),
        })
    }
}

fn parse_or<T, F>(name: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(ConfigError::InvalidVar {
                name,
                reason: e.to_string(),
                value,
            }),
        },
        None => Ok(default),
    }
}
