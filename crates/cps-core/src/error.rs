use thiserror::Error;

/// The main error type for cps-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Environment variable error
  #[error("Environment variable error: {0}")]
  EnvVar(#[from] std::env::VarError),

  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// Serialization/Deserialization error
  #[error("Serialization error: {0}")]
  Serde(#[from] serde_json::Error),

  /// Date/Time parsing error
  #[error("Date parsing error: {0}")]
  ParseDate(#[from] chrono::ParseError),

  /// Parse error for cell and record text
  #[error("Parse error: {0}")]
  Parse(String),

  /// A string did not name any member of a closed enumeration
  #[error("Unknown {kind}: {value}")]
  UnknownVariant { kind: &'static str, value: String },
}

/// Result type alias for cps-* crates
pub type Result<T> = std::result::Result<T, Error>;
