//! Runtime configuration.
//!
//! Command-line flags win over environment variables, which win over the
//! built-in defaults:
//!
//! | Flag          | Environment                   | Default          |
//! |---------------|-------------------------------|------------------|
//! | `--bind`      | `BIND_ADDR` (or `PORT`)       | `127.0.0.1:3000` |
//! | `--data-dir`  | `DATA_DIR`                    | `data`           |
//! | `--public-dir`| `PUBLIC_DIR`                  | `public`         |
//! | `--uploads-dir`| `UPLOADS_DIR`                | `uploads`        |
//! | `--log-level` | `LOG_LEVEL`                   | `info`           |
//! | -             | `ADMIN_USERNAME`, `ADMIN_PASSWORD`, `ADMIN_TOKEN` | demo admin |

use anyhow::{Context, Result, anyhow, bail};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_UPLOADS_DIR: &str = "uploads";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_TOKEN: &str = "very_secret_admin_token_123";

/// Login and bearer token of the single admin account.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
    pub token: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            token: DEFAULT_ADMIN_TOKEN.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    /// Static front-end (browser and admin panel) served at `/`.
    pub public_dir: PathBuf,
    /// Uploaded media served at `/uploads`.
    pub uploads_dir: PathBuf,
    pub log_level: tracing::Level,
    pub admin: AdminCredentials,
}

impl Config {
    /// Reads the process arguments and environment.
    pub fn from_env() -> Result<Self> {
        Self::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Builds a config from explicit arguments (program name excluded) and an
    /// environment lookup.
    pub fn parse<I, F>(args: I, env: F) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut bind: Option<String> = None;
        let mut data_dir: Option<String> = None;
        let mut public_dir: Option<String> = None;
        let mut uploads_dir: Option<String> = None;
        let mut log_level: Option<String> = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let slot = match arg.as_str() {
                "--bind" => &mut bind,
                "--data-dir" => &mut data_dir,
                "--public-dir" => &mut public_dir,
                "--uploads-dir" => &mut uploads_dir,
                "--log-level" => &mut log_level,
                other => bail!("unknown argument {:?}", other),
            };
            let value = args
                .next()
                .ok_or_else(|| anyhow!("{} requires a value", arg))?;
            *slot = Some(value);
        }

        let bind_addr = match bind.or_else(|| env("BIND_ADDR")) {
            Some(addr) => addr
                .parse()
                .with_context(|| format!("invalid bind address {:?}", addr))?,
            None => {
                let mut addr: SocketAddr = DEFAULT_BIND.parse()?;
                if let Some(port) = env("PORT") {
                    addr.set_port(
                        port.parse()
                            .with_context(|| format!("invalid PORT {:?}", port))?,
                    );
                }
                addr
            }
        };

        let data_dir = data_dir
            .or_else(|| env("DATA_DIR"))
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        let public_dir = public_dir
            .or_else(|| env("PUBLIC_DIR"))
            .unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_string());
        let uploads_dir = uploads_dir
            .or_else(|| env("UPLOADS_DIR"))
            .unwrap_or_else(|| DEFAULT_UPLOADS_DIR.to_string());

        let log_level = match log_level.or_else(|| env("LOG_LEVEL")) {
            Some(level) => match level.parse::<tracing::Level>() {
                Ok(level) => level,
                Err(_) => bail!("invalid log level {:?}", level),
            },
            None => tracing::Level::INFO,
        };

        let defaults = AdminCredentials::default();
        let admin = AdminCredentials {
            username: env("ADMIN_USERNAME").unwrap_or(defaults.username),
            password: env("ADMIN_PASSWORD").unwrap_or(defaults.password),
            token: env("ADMIN_TOKEN").unwrap_or(defaults.token),
        };

        Ok(Self {
            bind_addr,
            data_dir: PathBuf::from(data_dir),
            public_dir: PathBuf::from(public_dir),
            uploads_dir: PathBuf::from(uploads_dir),
            log_level,
            admin,
        })
    }
}
