use thiserror::Error;

/// Errors surfaced by translatable records and their stores.
#[derive(Error, Debug)]
pub enum Error {
    /// A keyed operation was called with a key the host never declared.
    #[error("Cannot translate attribute `{key}` as it's not one of the translatable attributes specified in {model}")]
    AttributeIsNotTranslatable { key: String, model: String },

    #[error("Invalid translation table name: {0}")]
    InvalidTableName(String),

    #[error("Invalid column reference: {0}")]
    InvalidColumn(String),

    #[error("Unsupported comparison operator: {0}")]
    InvalidOperator(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Error {
    pub fn not_translatable(key: &str, model: &str) -> Self {
        Error::AttributeIsNotTranslatable {
            key: key.to_string(),
            model: model.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
