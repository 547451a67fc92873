use std::str::FromStr;

use error_stack::{Report, ResultExt};
use kernel::KernelError;

static STORAGE: &str = "STORAGE";
static SERVER_PORT: &str = "SERVER_PORT";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Storage {
    #[default]
    Postgres,
    /// Process local store seeded with demo data.
    Memory,
}

impl FromStr for Storage {
    type Err = Report<KernelError>;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(Storage::Postgres),
            "memory" => Ok(Storage::Memory),
            _ => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown {STORAGE}: {value}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ServerConfig {
    pub storage: Storage,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        Self::parse(dotenvy::var(STORAGE).ok(), dotenvy::var(SERVER_PORT).ok())
    }

    fn parse(
        storage: Option<String>,
        port: Option<String>,
    ) -> error_stack::Result<Self, KernelError> {
        let storage = match storage {
            Some(storage) => storage.parse()?,
            None => Storage::default(),
        };
        let port = match port {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .change_context_lazy(|| KernelError::Internal)
                .attach_printable_lazy(|| format!("Invalid {SERVER_PORT}: {port}"))?,
            None => DEFAULT_PORT,
        };
        Ok(Self { storage, port })
    }
}

#[cfg(test)]
mod test {
    use super::{ServerConfig, Storage};

    #[test]
    fn defaults() {
        let config = ServerConfig::parse(None, None).unwrap();
        assert_eq!(config.storage, Storage::Postgres);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn explicit_values() {
        let config =
            ServerConfig::parse(Some("Memory".to_string()), Some("9000".to_string())).unwrap();
        assert_eq!(config.storage, Storage::Memory);
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn invalid_values() {
        assert!(ServerConfig::parse(Some("redis".to_string()), None).is_err());
        assert!(ServerConfig::parse(None, Some("http".to_string())).is_err());
    }
}
