use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::{ConfigError, WorklogError};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PG_PORT: u16 = 5432;
const DEFAULT_SOCKET_DIR: &str = "/cloudsql";
const DEFAULT_VIEWS_DIR: &str = "views";

/// How the storage gateway reaches the Postgres instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    /// Full connection URL, bypassing the Cloud SQL parameters.
    Url(String),
    /// Unix socket directory exposed for the instance (public networking).
    Socket(PathBuf),
    /// Private address of the instance.
    Tcp { host: String, port: u16 },
}

/// Role used to authenticate against the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUser {
    Plain(String),
    Iam(String),
}

impl DatabaseUser {
    pub fn name(&self) -> &str {
        match self {
            DatabaseUser::Plain(name) | DatabaseUser::Iam(name) => name,
        }
    }

    pub fn is_iam(&self) -> bool {
        matches!(self, DatabaseUser::Iam(_))
    }
}

/// Credentials and location of the `workitems` database.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub user: Option<DatabaseUser>,
    pub password: String,
    pub database: String,
    pub instance_connection_name: String,
    pub target: ConnectionTarget,
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("instance_connection_name", &self.instance_connection_name)
            .field("target", &self.target)
            .finish()
    }
}

impl DatabaseSettings {
    /// Settings that only carry a connection URL.
    pub fn from_url<U: Into<String>>(url: U) -> Self {
        Self {
            user: None,
            password: String::new(),
            database: String::new(),
            instance_connection_name: String::new(),
            target: ConnectionTarget::Url(url.into()),
        }
    }

    /// Short label for logs; never includes credentials.
    pub fn mode(&self) -> &'static str {
        match self.target {
            ConnectionTarget::Url(_) => "url",
            ConnectionTarget::Socket(_) => "public",
            ConnectionTarget::Tcp { .. } => "private",
        }
    }
}

/// Process configuration for the worklog service.
#[derive(Debug, Clone)]
pub struct WorklogConfig {
    pub database: DatabaseSettings,
    pub port: u16,
    pub views_dir: PathBuf,
}

impl WorklogConfig {
    /// Loads configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset, matching how the deployment tooling
    /// blanks out variables it does not need.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;
        let views_dir = get("VIEWS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_VIEWS_DIR));

        let database = match get("DATABASE_URL") {
            Some(url) => DatabaseSettings::from_url(url),
            None => resolve_cloud_sql(&get)?,
        };

        Ok(Self {
            database,
            port,
            views_dir,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn resolve_cloud_sql<G>(get: &G) -> Result<DatabaseSettings, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let plain_user = get("DB_USER");
    let iam_user = get("DB_IAM_USER");
    let password = require(get, "DB_PASS")?;
    let database = require(get, "DB_NAME")?;
    let instance_connection_name = require(get, "INSTANCE_CONNECTION_NAME")?;

    // IAM identity wins when both are configured.
    let user = match (iam_user, plain_user) {
        (Some(iam), _) => DatabaseUser::Iam(iam),
        (None, Some(plain)) => DatabaseUser::Plain(plain),
        (None, None) => return Err(ConfigError::MissingDatabaseUser),
    };

    let target = if get("PRIVATE_IP").is_some() {
        ConnectionTarget::Tcp {
            host: require(get, "DB_HOST")?,
            port: parse_or("DB_PORT", get("DB_PORT"), DEFAULT_PG_PORT)?,
        }
    } else {
        let socket_dir = get("DB_SOCKET_DIR").unwrap_or_else(|| DEFAULT_SOCKET_DIR.to_string());
        ConnectionTarget::Socket(PathBuf::from(socket_dir).join(&instance_connection_name))
    };

    Ok(DatabaseSettings {
        user: Some(user),
        password,
        database,
        instance_connection_name,
        target,
    })
}

fn require<G>(get: &G, key: &str) -> Result<String, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    get(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnvVar { key, value }),
        None => Ok(default),
    }
}

/// Helper that loads config and converts to the canonical worklog error type.
pub fn load_config() -> Result<WorklogConfig, WorklogError> {
    Ok(WorklogConfig::from_env()?)
}
