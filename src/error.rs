//! Error types for the tictactoe-mdp crate

use thiserror::Error;

/// Main error type for the tictactoe-mdp crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal action {action} in state {state}")]
    IllegalAction { action: String, state: String },

    #[error("state {state} is not part of the enumerated state space")]
    UnknownState { state: String },

    #[error("state {state} is terminal and has no policy entry")]
    TerminalState { state: String },

    #[error("non-terminal state {state} has no legal actions")]
    NoLegalActions { state: String },

    #[error("no action produced a finite value in non-terminal state {state}")]
    NoGreedyAction { state: String },

    #[error("policy evaluation of state {state} did not settle within {backups} backups")]
    EvaluationDiverged { state: String, backups: usize },

    #[error("invalid move: position {position} is out of bounds or already occupied")]
    InvalidMove { position: usize },

    #[error("board string too short: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must be equal or X ahead by 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("input closed while waiting for a move")]
    InputClosed,

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn illegal_action(action: impl std::fmt::Debug, state: impl std::fmt::Debug) -> Self {
        Error::IllegalAction {
            action: format!("{action:?}"),
            state: format!("{state:?}"),
        }
    }

    pub(crate) fn unknown_state(state: impl std::fmt::Debug) -> Self {
        Error::UnknownState {
            state: format!("{state:?}"),
        }
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_action_display_includes_state_and_action() {
        let err = Error::illegal_action(4usize, "XO.......");
        assert_eq!(
            err.to_string(),
            "illegal action 4 in state \"XO.......\""
        );
    }

    #[test]
    fn io_errors_convert_with_generic_operation() {
        let err: Error = std::io::Error::other("boom").into();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("IO operation"));
    }
}
