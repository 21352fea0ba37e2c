use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the engines and their configuration layer. Note that a
/// search running out of frontier is not an error, see
/// [`crate::search::SearchResult::Unsolvable`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("agent index {index} is out of range for a game with {num_agents} agents")]
    InvalidAgentIndex { index: usize, num_agents: usize },

    #[error("agent {agent_index} has no legal actions at the root")]
    NoLegalActions { agent_index: usize },

    #[error("failed to parse maze at line {line}: {message}")]
    MazeParse { line: usize, message: String },

    #[error("failed to parse grid at line {line}: {message}")]
    GridParse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
