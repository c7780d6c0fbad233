use std::path::PathBuf;

use wheelbot_core::error::CoreError;
use wheelbot_core::wheel::WheelState;

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("Failed to access state file {path}: {source}")]
    StateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("State file {path} is not valid JSON: {source}")]
    StateFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown bot state")]
    UnknownState,

    #[error("No trade to recommend while {0}; record the outcome with `assign` or `expire`")]
    NothingToRecommend(WheelState),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ControllerError>;
