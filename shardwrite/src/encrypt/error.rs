use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("encryptor \"{encryptor}\" used by {table}.{column} is not configured")]
    MissingEncryptor {
        table: String,
        column: String,
        encryptor: String,
    },

    #[error("encryptor \"{encryptor}\": {message}")]
    InvalidProperty { encryptor: String, message: String },

    #[error("cipher: {0}")]
    Cipher(String),

    #[error("{table}.{column} is encrypted and can't be assigned \"{expression}\"")]
    UnsupportedExpression {
        table: String,
        column: String,
        expression: String,
    },
}

impl From<aws_lc_rs::error::Unspecified> for Error {
    fn from(_: aws_lc_rs::error::Unspecified) -> Self {
        Self::Cipher("aes operation failed".into())
    }
}
