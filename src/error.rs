//! Error types for the QDutch engine.

use thiserror::Error;

use crate::core::PlayerId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QDutchError {
    #[error("QDutch needs 2 to 4 players, got {0}")]
    InvalidPlayerCount(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid target: seat {seat}, slot {slot}")]
    InvalidTarget { seat: u8, slot: usize },

    #[error("Card was not one of the two offered")]
    CardNotOffered,

    #[error("Dutch was already declared by {0}")]
    DutchAlreadyDeclared(PlayerId),

    #[error("Unexpected input: expected {expected}, got {got}")]
    UnexpectedInput {
        expected: &'static str,
        got: &'static str,
    },

    #[error("The game has ended")]
    GameOver,

    #[error("Config parse error: {0}")]
    ConfigParse(String),
}

impl QDutchError {
    /// Is this a player answer the engine refused and will ask for again?
    #[must_use]
    pub fn is_rejected_input(&self) -> bool {
        matches!(
            self,
            QDutchError::InvalidTarget { .. }
                | QDutchError::CardNotOffered
                | QDutchError::DutchAlreadyDeclared(_)
        )
    }
}

impl From<serde_json::Error> for QDutchError {
    fn from(err: serde_json::Error) -> Self {
        QDutchError::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QDutchError>;
