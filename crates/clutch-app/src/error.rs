use std::io;

use thiserror::Error;

use clutch_core::error::ProviderError;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("match already running")]
    AlreadyRunning,
    #[error("match not started")]
    NotStarted,
    #[error("game loop is no longer accepting commands")]
    LoopClosed,
    #[error("game loop thread panicked")]
    LoopPanicked,
    #[error("shared state lock poisoned")]
    Poisoned,
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[source] io::Error),
}
