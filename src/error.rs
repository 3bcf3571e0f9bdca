use std::fmt;

#[derive(Debug)]
pub enum SqlPilotError {
    ApiError {
        status: u16,
        message: String,
    },
    ConfigError(String),
    AgentError(String),
    DatabaseError(rusqlite::Error),
    AuditError(csv::Error),
    NetworkError(reqwest::Error),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
    Other(String),
}

impl fmt::Display for SqlPilotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlPilotError::ApiError { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            SqlPilotError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            SqlPilotError::AgentError(msg) => write!(f, "Agent error: {}", msg),
            SqlPilotError::DatabaseError(e) => write!(f, "Database error: {}", e),
            SqlPilotError::AuditError(e) => write!(f, "Audit log error: {}", e),
            SqlPilotError::NetworkError(e) => write!(f, "Network error: {}", e),
            SqlPilotError::IoError(e) => write!(f, "IO error: {}", e),
            SqlPilotError::JsonError(e) => write!(f, "JSON error: {}", e),
            SqlPilotError::YamlError(e) => write!(f, "YAML error: {}", e),
            SqlPilotError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SqlPilotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SqlPilotError::DatabaseError(e) => Some(e),
            SqlPilotError::AuditError(e) => Some(e),
            SqlPilotError::NetworkError(e) => Some(e),
            SqlPilotError::IoError(e) => Some(e),
            SqlPilotError::JsonError(e) => Some(e),
            SqlPilotError::YamlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for SqlPilotError {
    fn from(err: rusqlite::Error) -> Self {
        SqlPilotError::DatabaseError(err)
    }
}

impl From<csv::Error> for SqlPilotError {
    fn from(err: csv::Error) -> Self {
        SqlPilotError::AuditError(err)
    }
}

impl From<reqwest::Error> for SqlPilotError {
    fn from(err: reqwest::Error) -> Self {
        SqlPilotError::NetworkError(err)
    }
}

impl From<std::io::Error> for SqlPilotError {
    fn from(err: std::io::Error) -> Self {
        SqlPilotError::IoError(err)
    }
}

impl From<serde_json::Error> for SqlPilotError {
    fn from(err: serde_json::Error) -> Self {
        SqlPilotError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for SqlPilotError {
    fn from(err: serde_yaml::Error) -> Self {
        SqlPilotError::YamlError(err)
    }
}

impl From<anyhow::Error> for SqlPilotError {
    fn from(err: anyhow::Error) -> Self {
        SqlPilotError::Other(err.to_string())
    }
}

impl From<String> for SqlPilotError {
    fn from(msg: String) -> Self {
        SqlPilotError::Other(msg)
    }
}

impl From<&str> for SqlPilotError {
    fn from(msg: &str) -> Self {
        SqlPilotError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SqlPilotError>;
