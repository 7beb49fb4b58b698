use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Post not found")]
    PostNotFound,

    #[error("Forbidden: you don't have permission to perform this action")]
    Forbidden,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl BlogError {
    pub fn to_status_code(&self) -> u16 {
        match self {
            Self::PostNotFound => 404,
            Self::Forbidden => 403,
            Self::Unauthorized(_) => 401,
            Self::Validation(_) => 400,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }
}

impl From<sqlx::Error> for BlogError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::PostNotFound,
            _ => Self::Database(err.to_string()),
        }
    }
}
