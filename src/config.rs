//! Where the servers listen and where secrets end up, read from the environment at startup.
use std::{env, fmt, path::PathBuf};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SECRET_DIR: &str = "tmp";

#[derive(Debug)]
pub enum Error {
    /// `PORT` was set, but not to something we can listen on.
    BadPort(String),
}
use Error::*;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "couldn't read config: ")?;
        match self {
            BadPort(p) => write!(f, "PORT must be a number from 0 to 65535, not {:?}", p),
        }
    }
}

impl std::error::Error for Error {}

/// Listening address for either server.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Reads `HOST` and `PORT`, falling back to `localhost:3000` for whichever is unset.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_vars(env::var("HOST").ok(), env::var("PORT").ok())
    }

    fn from_vars(host: Option<String>, port: Option<String>) -> Result<Self, Error> {
        let port = match port {
            Some(p) => p.trim().parse().map_err(|_| BadPort(p))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Everything the secret server needs on top of its listening address.
#[derive(Debug, Clone, PartialEq)]
pub struct SecretConfig {
    pub listen: Config,
    /// Folder the `<identifier>.json` records are written into.
    pub dir: PathBuf,
    /// Prefix for the locator URLs handed back to clients.
    pub base_url: String,
}

impl SecretConfig {
    /// Same as [`Config::from_env`], plus `SECRET_DIR` and `SECRET_BASE_URL`.
    pub fn from_env() -> Result<Self, Error> {
        let listen = Config::from_env()?;
        Ok(Self::new(
            listen,
            env::var("SECRET_DIR").ok(),
            env::var("SECRET_BASE_URL").ok(),
        ))
    }

    pub fn new(listen: Config, dir: Option<String>, base_url: Option<String>) -> Self {
        Self {
            dir: PathBuf::from(dir.unwrap_or_else(|| DEFAULT_SECRET_DIR.to_string())),
            base_url: base_url.unwrap_or_else(|| listen.base_url()),
            listen,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_to_localhost_3000() {
        let config = Config::from_vars(None, None).expect("defaults should always load");
        assert_eq!(config, Config::default());
        assert_eq!(config.base_url(), "http://localhost:3000");
    }

    #[test]
    fn port_from_env_wins() {
        let config = Config::from_vars(Some("0.0.0.0".to_string()), Some("8080".to_string()))
            .expect("valid port");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn garbage_port_is_an_error() {
        let err = Config::from_vars(None, Some("eighty".to_string()))
            .expect_err("non-numeric PORT should not load");
        assert!(matches!(err, Error::BadPort(p) if p == "eighty"));
    }

    #[test]
    fn secret_locators_default_to_listen_address() {
        let sc = SecretConfig::new(Config::default(), None, None);
        assert_eq!(sc.dir, PathBuf::from("tmp"));
        assert_eq!(sc.base_url, "http://localhost:3000");

        let sc = SecretConfig::new(
            Config::default(),
            Some("/var/secrets".to_string()),
            Some("https://secrets.example.com".to_string()),
        );
        assert_eq!(sc.dir, PathBuf::from("/var/secrets"));
        assert_eq!(sc.base_url, "https://secrets.example.com");
    }
}
