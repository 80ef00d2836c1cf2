use thiserror::Error;

/// Errors surfaced by the fallible parts of the emitter: sinks, configuration
/// and file placement. Text primitives themselves never fail.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid qualified name: {name}")]
    InvalidName { name: String },

    #[error("Output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type EmitResult<T> = Result<T, EmitError>;
