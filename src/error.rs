use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

/// Errors surfaced by the game engine.
///
/// Every variant maps to a stable `errorKind` string (see [`GameError::kind`])
/// that the embedding request handler puts into the error envelope. None of
/// these are fatal to the process, and none leave a session partially updated.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("invalid account: {0}")]
    InvalidAccount(String),
    #[error("invalid choice: {0}. Pick a number between 1 and 6")]
    InvalidChoice(String),
    #[error("payment not confirmed: {0}")]
    PaymentNotConfirmed(String),
    #[error("no active game for this account. Start a new game first")]
    NoActiveGame,
    #[error("a game is already in progress for this account")]
    GameAlreadyInProgress,
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("internal error: {0}")]
    InternalError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl GameError {
    /// Stable kind identifier for the `{ errorKind, message }` envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::InvalidAccount(_) => "invalidAccount",
            GameError::InvalidChoice(_) => "invalidChoice",
            GameError::PaymentNotConfirmed(_) => "paymentNotConfirmed",
            GameError::NoActiveGame => "noActiveGame",
            GameError::GameAlreadyInProgress => "gameAlreadyInProgress",
            GameError::UnknownOperation(_) => "unknownOperation",
            GameError::ValidationError(_) => "validationError",
            GameError::InternalError(_) => "internalError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_stable() {
        assert_eq!(GameError::NoActiveGame.kind(), "noActiveGame");
        assert_eq!(
            GameError::InvalidChoice("7".to_string()).kind(),
            "invalidChoice"
        );
        assert_eq!(
            GameError::GameAlreadyInProgress.kind(),
            "gameAlreadyInProgress"
        );
    }

    #[test]
    fn test_error_messages_carry_detail() {
        let err = GameError::PaymentNotConfirmed("transfer still pending".to_string());
        assert!(err.to_string().contains("transfer still pending"));
    }
}
