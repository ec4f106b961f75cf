use tapout_core::{DeckError, EngineError, SetupError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoplayError {
    #[error("setup error: {0}")]
    Setup(String),
    #[error("engine error: {0}")]
    Engine(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<SetupError> for AutoplayError {
    fn from(value: SetupError) -> Self {
        Self::Setup(value.to_string())
    }
}

impl From<DeckError> for AutoplayError {
    fn from(value: DeckError) -> Self {
        Self::Setup(value.to_string())
    }
}

impl From<EngineError> for AutoplayError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value.to_string())
    }
}

impl From<std::io::Error> for AutoplayError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for AutoplayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}
