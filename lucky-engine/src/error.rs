use thiserror::Error;

/// Règle violée par une combinaison saisie à la main.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{0}' n'est pas un nombre entier")]
    NotANumber(String),
    #[error("il faut exactement {expected} numéros, {actual} fournis")]
    WrongCount { expected: usize, actual: usize },
    #[error("le numéro {value} est hors limites (1-{max})")]
    OutOfRange { value: i64, max: u8 },
    #[error("le numéro {0} est répété")]
    Duplicate(u8),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("loterie inconnue : '{0}'")]
    UnknownLottery(String),
    #[error("combinaison invalide : {0}")]
    Validation(#[from] ValidationError),
    #[error("date invalide : '{0}'")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
