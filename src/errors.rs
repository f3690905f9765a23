use std::path::PathBuf;

use thiserror::Error;

use crate::evolution::NodeId;

/// Main error type for the puzzle core's load, build and guard boundaries.
///
/// The analysis operations themselves never return these; they degrade to
/// `Unknown`/`normal`/`false` answers and carry a message in their result.
#[derive(Debug, Error)]
pub enum PokedokuError {
    /// Error loading or parsing the static species tables
    #[error("Species table error: {0}")]
    Data(#[from] DataError),
    /// Error building or reading an evolution chain
    #[error("Evolution chain error: {0}")]
    Chain(#[from] ChainError),
    /// A lookup name failed the input guard
    #[error("Invalid name: {0}")]
    Name(#[from] NameError),
    /// Error loading configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Malformed JSON payload handed in by the fetch layer
    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Errors related to the static species tables
#[derive(Debug, Error)]
pub enum DataError {
    /// The table file could not be read
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The table file is not valid RON for the expected shape
    #[error("malformed table data: {0}")]
    Malformed(#[from] ron::error::SpannedError),
}

/// Errors related to evolution chain construction and traversal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// A node id does not address a node of this chain
    #[error("dangling node reference #{}", .0.index())]
    DanglingNode(NodeId),
    /// A payload matched none of the chain shapes the adapter understands
    #[error("unrecognized evolution chain shape: {0}")]
    UnrecognizedShape(String),
}

/// Errors from the lookup-name guard
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name is empty")]
    Empty,
    #[error("name must be between 1 and {max} characters, got {len}")]
    TooLong { len: usize, max: usize },
    #[error("invalid characters in name '{0}'")]
    InvalidCharacters(String),
}

/// Errors related to configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed configuration: {0}")]
    Malformed(#[from] toml::de::Error),
}

/// Type alias for Results using PokedokuError
pub type PokedokuResult<T> = Result<T, PokedokuError>;

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;

/// Type alias for Results using ChainError
pub type ChainResult<T> = Result<T, ChainError>;

/// Type alias for Results using NameError
pub type NameResult<T> = Result<T, NameError>;
