use std::path::PathBuf;

use thiserror::Error;

use crate::chart::{ContainerId, ElementId};

/// A clip could not be opened, decoded or sent to the output device.
#[derive(Debug, Clone, Error)]
#[error("failed to play {path}: {cause}")]
pub struct PlaybackError {
    pub path: String,
    pub cause: String,
}

impl PlaybackError {
    pub fn new(path: impl Into<String>, cause: impl ToString) -> Self {
        Self {
            path: path.into(),
            cause: cause.to_string(),
        }
    }

    /// Text shown to the user in the alert dialog.
    pub fn user_message(&self) -> String {
        format!(
            "Failed to play sound from {}. Please check if the file exists.",
            self.path
        )
    }
}

/// An expected page element is absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissingElementError {
    #[error("container {0} not found")]
    Container(ContainerId),
    #[error("element {0} not found")]
    Element(ElementId),
    #[error("start control not found")]
    StartControl,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog")]
    Parse(#[from] serde_json::Error),
    #[error("catalog entry {index} in {group} has an empty symbol")]
    EmptySymbol { group: &'static str, index: usize },
    #[error("symbol /{symbol}/ has an empty audio path")]
    EmptyPath { symbol: String },
    #[error("symbol /{0}/ appears more than once")]
    DuplicateSymbol(String),
    #[error("unknown symbol /{0}/")]
    UnknownSymbol(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve assets directory at {path:?}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("assets path {0:?} is not a directory")]
    NotADirectory(PathBuf),
    #[error("could not locate an assets directory near the binary or working directory")]
    AssetsNotFound,
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

#[derive(Debug, Error)]
#[error("chart window failed: {0}")]
pub struct UiError(pub String);
