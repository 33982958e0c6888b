use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("loterie inconnue : '{0}'")]
    UnknownLottery(String),
    #[error("configuration '{id}' invalide : {reason}")]
    InvalidConfig { id: String, reason: String },
    #[error("identifiant de loterie en double : '{0}'")]
    DuplicateId(String),
    #[error("tirage du {date} invalide : {reason}")]
    InvalidDraw { date: String, reason: String },
    #[error("JSON invalide : {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;
