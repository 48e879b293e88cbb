// core/src/error.rs
//
// Error type shared by the dictionary store, schemes and the engine facade.
//
// Lookup misses and unrecognized scheme input are not errors: they produce
// empty results. Only malformed files, I/O, bad indices and use-before-init
// surface here.

use std::io;

/// Errors returned by hanzi-core and the crates built on it.
#[derive(Debug, thiserror::Error)]
pub enum ImeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed dictionary: {0}")]
    Parse(String),

    #[error("dictionary contains no entries")]
    EmptyDictionary,

    #[error("index {index} out of range for {len} candidates")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("engine used before initialize")]
    Uninitialized,

    #[error("unknown input scheme: {0}")]
    UnknownScheme(String),

    #[error("unknown charset: {0}")]
    UnknownCharset(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ImeError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            ImeError::Io(err.into())
        } else {
            ImeError::Parse(err.to_string())
        }
    }
}

impl From<toml::de::Error> for ImeError {
    fn from(err: toml::de::Error) -> Self {
        ImeError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ImeError {
    fn from(err: toml::ser::Error) -> Self {
        ImeError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ImeError>;
